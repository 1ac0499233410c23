use std::io;
use std::path::Path;

use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle,
    },
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Terminal,
};

use trellis_core::AppConfig;
use trellis_tui::{
    event::{AppEvent, EventHandler},
    input::{handle_key_event, Action},
    widgets::{NavWidget, SectionsWidget, StatusBarWidget},
    App,
};

const TICK_RATE_MS: u64 = 100;

pub fn run(page: Option<&Path>, config: &AppConfig) -> Result<()> {
    let def = super::load_page(page)?;
    let mut app = App::new(&def, config)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        SetTitle("Trellis")
    )?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let event_handler = EventHandler::new(TICK_RATE_MS);

    loop {
        terminal.draw(|frame| {
            let size = frame.area();

            // Main layout: content + status bar
            let main_layout = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(1), Constraint::Length(1)])
                .split(size);

            // Nav column beside the scrolling sections
            let columns = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Length(24), Constraint::Min(1)])
                .split(main_layout[0]);

            NavWidget::render(frame, columns[0], &app);
            SectionsWidget::render(frame, columns[1], &app);
            StatusBarWidget::render(frame, main_layout[1], &app);
        })?;

        if let Some(event) = event_handler.next()? {
            match event {
                AppEvent::Key(key) => handle_action(&mut app, handle_key_event(key)),
                AppEvent::Mouse(mouse) => app.handle_mouse(mouse),
                AppEvent::Resize(_, _) | AppEvent::Tick => {}
            }
        }

        if app.should_quit {
            break;
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    Ok(())
}

fn handle_action(app: &mut App, action: Action) {
    match action {
        Action::Quit => app.should_quit = true,
        Action::ScrollDown => app.scroll_by(app.scroll_step()),
        Action::ScrollUp => app.scroll_by(-app.scroll_step()),
        Action::ScrollHalfPageDown => app.scroll_by(app.half_page()),
        Action::ScrollHalfPageUp => app.scroll_by(-app.half_page()),
        Action::JumpToTop => app.scroll_to(0),
        Action::JumpToBottom => app.jump_to_bottom(),
        Action::NextSection => app.next_section(),
        Action::PrevSection => app.prev_section(),
        Action::Refresh => app.refresh(),
        Action::None => {}
    }
}
