use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const TITLE: &str = "tick-snake";

/// Values shown on the status row under the board.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct HudInfo {
    pub score: usize,
    pub length: usize,
    pub tick: u64,
}

/// Renders the single HUD row: title on the left, counters on the right.
pub fn render_hud(frame: &mut Frame<'_>, area: Rect, info: HudInfo) {
    let counters = format!(
        "Score {}  Length {}  Tick {}",
        info.score, info.length, info.tick
    );
    let counters_width = u16::try_from(counters.width()).unwrap_or(u16::MAX);

    let [title_area, counters_area] =
        Layout::horizontal([Constraint::Min(0), Constraint::Length(counters_width)]).areas(area);

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            fit_to_width(TITLE, usize::from(title_area.width)),
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ))),
        title_area,
    );

    frame.render_widget(
        Paragraph::new(Line::from(fit_to_width(
            &counters,
            usize::from(counters_area.width),
        )))
        .alignment(Alignment::Right)
        .style(Style::default().fg(Color::White)),
        counters_area,
    );
}

/// Truncates `text` to at most `max_width` terminal columns.
#[must_use]
pub fn fit_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_owned();
    }

    let mut used = 0;
    let mut fitted = String::new();
    for ch in text.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if used + ch_width > max_width {
            break;
        }
        used += ch_width;
        fitted.push(ch);
    }
    fitted
}
