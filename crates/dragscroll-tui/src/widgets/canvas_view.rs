use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;

/// Grid lines every this many cells
const GRID_STEP: u16 = 10;

pub struct CanvasWidget;

impl CanvasWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let canvas = app.canvas.borrow();
        let (content_w, content_h) = canvas.content_size();
        let (left, top) = canvas.cell_offset();
        let span = (content_w as f64 + content_h as f64).max(1.0);

        let lines: Vec<Line> = (0..area.height)
            .map(|row| {
                let y = top.saturating_add(row);
                let spans: Vec<Span> = (0..area.width)
                    .map(|col| {
                        let x = left.saturating_add(col);
                        if x >= content_w || y >= content_h {
                            return Span::styled(" ", Style::default().bg(app.theme.bg1));
                        }
                        let bg = app.theme.gradient_at((x as f64 + y as f64) / span);
                        Span::styled(cell_glyph(x, y), Style::default().bg(bg).fg(app.theme.bg2))
                    })
                    .collect();
                Line::from(spans)
            })
            .collect();

        frame.render_widget(Paragraph::new(lines), area);
    }
}

/// Glyph for content cell (x, y): grid crossings, grid lines, or blank
fn cell_glyph(x: u16, y: u16) -> &'static str {
    match (x % GRID_STEP == 0, y % GRID_STEP == 0) {
        (true, true) => "+",
        (true, false) => "|",
        (false, true) => "-",
        (false, false) => " ",
    }
}
