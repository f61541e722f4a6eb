use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use dragscroll_core::{Cursor, DragState, ScrollSurface};

use crate::app::App;

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let state_str = match app.drag_state() {
            DragState::Idle => "IDLE",
            DragState::Dragging => "DRAG",
            DragState::Coasting => "COAST",
        };

        let (left, top, cursor) = {
            let canvas = app.canvas.borrow();
            (canvas.scroll_left(), canvas.scroll_top(), canvas.cursor())
        };
        let cursor_str = match cursor {
            Cursor::Grabbing => "grabbing",
            Cursor::Grab | Cursor::Default => "grab",
        };

        let velocity = app.tracker.velocity();
        let drag = app.tracker.config();
        let flags = format!(
            "{}{}{}",
            if drag.inertia { "I" } else { "-" },
            if drag.lock_x { "X" } else { "-" },
            if drag.lock_y { "Y" } else { "-" },
        );

        let status_text = if let Some(msg) = &app.status_message {
            format!(" {} | {}", state_str, msg)
        } else {
            format!(
                " {} | {} | scroll {:.0},{:.0} | v {:.1},{:.1} | {}",
                state_str, cursor_str, left, top, velocity.x, velocity.y, flags
            )
        };

        let help_hint = " q:quit i:inertia x/y:lock r:reset ";
        let padding_len = area.width.saturating_sub(
            status_text.len() as u16 + help_hint.len() as u16,
        ) as usize;

        let state_color = match app.drag_state() {
            DragState::Coasting => theme.warning,
            DragState::Dragging => theme.accent,
            DragState::Idle => theme.fg0,
        };

        let line = Line::from(vec![
            Span::styled(status_text, Style::default().fg(state_color).bg(theme.bg2)),
            Span::styled(" ".repeat(padding_len), Style::default().bg(theme.bg2)),
            Span::styled(help_hint, Style::default().fg(theme.grey2).bg(theme.bg2)),
        ]);

        let paragraph = Paragraph::new(line);
        frame.render_widget(paragraph, area);
    }
}
