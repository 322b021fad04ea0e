//! TUI event loop for the inspector.

use super::app::App;
use super::external::TerminalGuard;
use super::EVENT_POLL_MS;
use crate::config::ResolvedConfig;
use crate::observation::Assertion;
use crate::session::Session;
use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::backend::CrosstermBackend;
use std::io;
use std::time::Duration;

pub(super) fn run_tui(session: Session, config: ResolvedConfig) -> Result<()> {
    let mut app = App::new(session, config);

    let mut guard = TerminalGuard::enter()?;
    let mut terminal = {
        let stdout = io::stdout();
        let backend = CrosstermBackend::new(stdout);
        ratatui::Terminal::new(backend).context("init terminal")?
    };

    loop {
        terminal
            .draw(|frame| app.draw(frame))
            .context("draw inspect ui")?;

        if !event::poll(Duration::from_millis(EVENT_POLL_MS)).context("poll event")? {
            continue;
        }
        let Event::Key(key) = event::read().context("read event")? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        let Some(action) = action_from_key(key) else {
            continue;
        };
        match action {
            Action::Quit => {
                if app.is_detail_view() {
                    app.close_detail();
                } else {
                    break;
                }
            }
            Action::SwitchPane => app.switch_pane(),
            Action::Up => app.move_selection(-1),
            Action::Down => app.move_selection(1),
            Action::PageUp => app.move_selection(-10),
            Action::PageDown => app.move_selection(10),
            Action::NextMap => app.cycle_map_type(true),
            Action::PrevMap => app.cycle_map_type(false),
            Action::NextNightlord => app.cycle_nightlord(true),
            Action::PrevNightlord => app.cycle_nightlord(false),
            Action::Mark(assertion) => app.mark_selected(assertion),
            Action::ClearAll => app.clear_all(),
            Action::TogglePoiFilter => app.toggle_poi_filter(),
            Action::Reset => app.reset(),
            Action::ToggleDetail => app.toggle_detail(),
            Action::ToggleHelp => app.toggle_help(),
            Action::OpenPattern => {
                if let Err(err) = app.open_selected_pattern(&mut guard, &mut terminal) {
                    app.set_message(format!("open pattern failed: {err}"));
                }
            }
        }
    }

    drop(guard);
    terminal.show_cursor().ok();
    Ok(())
}

#[derive(Debug, PartialEq, Eq)]
enum Action {
    Quit,
    SwitchPane,
    Up,
    Down,
    PageUp,
    PageDown,
    NextMap,
    PrevMap,
    NextNightlord,
    PrevNightlord,
    Mark(Assertion),
    ClearAll,
    TogglePoiFilter,
    Reset,
    ToggleDetail,
    ToggleHelp,
    OpenPattern,
}

fn action_from_key(key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        KeyCode::Tab | KeyCode::BackTab => Some(Action::SwitchPane),
        KeyCode::Up | KeyCode::Char('k') => Some(Action::Up),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::Down),
        KeyCode::PageUp => Some(Action::PageUp),
        KeyCode::PageDown => Some(Action::PageDown),
        KeyCode::Char(']') => Some(Action::NextMap),
        KeyCode::Char('[') => Some(Action::PrevMap),
        KeyCode::Char('}') => Some(Action::NextNightlord),
        KeyCode::Char('{') => Some(Action::PrevNightlord),
        KeyCode::Char('c') => Some(Action::Mark(Assertion::Church)),
        KeyCode::Char('m') => Some(Action::Mark(Assertion::Mage)),
        KeyCode::Char('v') => Some(Action::Mark(Assertion::Village)),
        KeyCode::Char('o') => Some(Action::Mark(Assertion::Other)),
        KeyCode::Char('u') => Some(Action::Mark(Assertion::Unknown)),
        KeyCode::Char('x') | KeyCode::Backspace | KeyCode::Delete => {
            Some(Action::Mark(Assertion::Unmarked))
        }
        KeyCode::Char('C') => Some(Action::ClearAll),
        KeyCode::Char('f') => Some(Action::TogglePoiFilter),
        KeyCode::Char('r') => Some(Action::Reset),
        KeyCode::Enter => Some(Action::ToggleDetail),
        KeyCode::Char('p') => Some(Action::OpenPattern),
        KeyCode::Char('?') => Some(Action::ToggleHelp),
        _ => None,
    }
}
