use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Paragraph, Wrap};
use ratatui::Frame;
use rand::Rng;

use crate::config::GridSize;
use crate::game::{Outcome, Simulation};
use crate::snake::Cell;
use crate::ui::hud::{render_hud, HudInfo};
use crate::ui::menu::render_game_over_menu;

/// Terminal columns used per grid unit, so cells look roughly square.
pub const CELL_COLUMNS: u16 = 2;

const GLYPH_CELL: &str = "██";
const HUD_ROWS: u16 = 1;

const HEAD_COLOR: Color = Color::Rgb(100, 255, 100);
const BODY_COLOR: Color = Color::Rgb(0, 255, 0);
const FOOD_COLOR: Color = Color::Rgb(255, 0, 0);
const BOARD_BG: Color = Color::Black;

/// Renders the board, HUD and, once the game has ended, the game-over popup.
pub fn render<R: Rng>(frame: &mut Frame<'_>, sim: &Simulation<R>, game_over: Option<Outcome>) {
    let area = frame.area();
    let Some(board) = board_rect(area, sim.grid()) else {
        render_too_small(frame, area, sim.grid());
        return;
    };

    let block = Block::bordered()
        .border_style(Style::new().fg(Color::White))
        .style(Style::new().bg(BOARD_BG));
    let inner = block.inner(board);
    frame.render_widget(block, board);

    render_food(frame, inner, sim);
    render_snake(frame, inner, sim);

    let hud = Rect {
        x: board.x,
        y: board.bottom(),
        width: board.width,
        height: HUD_ROWS,
    };
    render_hud(
        frame,
        hud,
        HudInfo {
            score: sim.score(),
            length: sim.length(),
            tick: sim.tick_count(),
        },
    );

    if let Some(outcome) = game_over {
        render_game_over_menu(frame, board, sim.score(), outcome);
    }
}

/// Bordered board rectangle centered in `area`, or `None` if it does not fit.
#[must_use]
pub fn board_rect(area: Rect, grid: GridSize) -> Option<Rect> {
    let width = grid.width.checked_mul(CELL_COLUMNS)?.checked_add(2)?;
    let height = grid.height.checked_add(2)?;

    if width > area.width || height.checked_add(HUD_ROWS)? > area.height {
        return None;
    }

    Some(Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height - HUD_ROWS) / 2,
        width,
        height,
    })
}

fn render_food<R: Rng>(frame: &mut Frame<'_>, inner: Rect, sim: &Simulation<R>) {
    let food = sim.food();
    if !food.active {
        return;
    }
    let Some((x, y)) = logical_to_terminal(inner, sim.grid(), food.cell) else {
        return;
    };

    frame
        .buffer_mut()
        .set_string(x, y, GLYPH_CELL, Style::new().fg(FOOD_COLOR));
}

fn render_snake<R: Rng>(frame: &mut Frame<'_>, inner: Rect, sim: &Simulation<R>) {
    let grid = sim.grid();
    let buffer = frame.buffer_mut();

    // Tail first so the head is painted last when cells overlap.
    for (index, cell) in sim.snake().segments().enumerate().rev() {
        let Some((x, y)) = logical_to_terminal(inner, grid, *cell) else {
            continue;
        };

        let style = if index == 0 {
            Style::new().fg(HEAD_COLOR).add_modifier(Modifier::BOLD)
        } else {
            Style::new().fg(BODY_COLOR)
        };
        buffer.set_string(x, y, GLYPH_CELL, style);
    }
}

fn render_too_small(frame: &mut Frame<'_>, area: Rect, grid: GridSize) {
    let needed_width = u32::from(grid.width) * u32::from(CELL_COLUMNS) + 2;
    let needed_height = u32::from(grid.height) + 2 + u32::from(HUD_ROWS);
    let lines = vec![
        Line::from("Terminal too small"),
        Line::from(format!("need {needed_width}x{needed_height}")),
    ];

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        area,
    );
}

fn logical_to_terminal(inner: Rect, bounds: GridSize, cell: Cell) -> Option<(u16, u16)> {
    if !bounds.contains(cell) {
        return None;
    }

    let x_offset = u16::try_from(cell.x).ok()?.checked_mul(CELL_COLUMNS)?;
    let y_offset = u16::try_from(cell.y).ok()?;

    let x = inner.x.saturating_add(x_offset);
    let y = inner.y.saturating_add(y_offset);
    if x >= inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}
