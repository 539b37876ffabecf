use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph};
use ratatui::Frame;

use crate::game::{Collision, Outcome};

/// Draws the game-over popup centered over `area`.
pub fn render_game_over_menu(frame: &mut Frame<'_>, area: Rect, score: usize, outcome: Outcome) {
    let popup = centered_popup(area, 60, 40);
    frame.render_widget(Clear, popup);

    let lines = vec![
        Line::from("GAME OVER").style(
            Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD),
        ),
        Line::from(""),
        Line::from(format!("Score: {score}")),
        Line::from(cause_text(outcome)),
        Line::from(""),
        Line::from("[Enter]/[Q] Exit"),
    ];

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(" game over ")),
        popup,
    );
}

fn cause_text(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::Collision {
            kind: Collision::Wall,
            ..
        } => "Cause: hit wall",
        Outcome::Collision {
            kind: Collision::Body,
            ..
        } => "Cause: hit yourself",
        Outcome::Overflow => "Cause: body is full",
        Outcome::Continue | Outcome::Grew => "",
    }
}

fn centered_popup(area: Rect, width_percent: u16, height_percent: u16) -> Rect {
    let [_, mid, _] = Layout::vertical([
        Constraint::Percentage((100 - height_percent) / 2),
        Constraint::Percentage(height_percent),
        Constraint::Percentage((100 - height_percent) / 2),
    ])
    .areas(area);

    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - width_percent) / 2),
        Constraint::Percentage(width_percent),
        Constraint::Percentage((100 - width_percent) / 2),
    ])
    .areas(mid);

    center
}
