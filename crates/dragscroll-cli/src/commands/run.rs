use std::io;

use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Terminal,
};

use dragscroll_core::AppConfig;
use dragscroll_tui::{
    event::EventHandler,
    widgets::{CanvasWidget, StatusBarWidget},
    App, Theme,
};

pub async fn run(config: AppConfig) -> Result<()> {
    tracing::info!(
        inertia = config.drag.inertia,
        friction = config.drag.friction,
        "Starting interactive canvas"
    );

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, SetTitle("dragscroll"))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let event_handler =
        EventHandler::with_frame_interval(config.ui.tick_rate_ms, config.ui.frame_interval_ms());
    let mut app = App::new(config, Theme::default());

    let result = event_loop(&mut terminal, &mut app, &event_handler);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    event_handler: &EventHandler,
) -> Result<()> {
    loop {
        // Draw UI
        terminal.draw(|frame| {
            let layout = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(1), Constraint::Length(1)])
                .split(frame.area());

            app.set_viewport(layout[0]);
            CanvasWidget::render(frame, layout[0], app);
            StatusBarWidget::render(frame, layout[1], app);
        })?;

        // Poll at frame rate while coasting so each iteration is one frame
        let event = if app.needs_frames() {
            event_handler.next_frame()?
        } else {
            event_handler.next()?
        };
        if let Some(event) = event {
            app.handle_event(event);
        }

        app.on_frame();

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

