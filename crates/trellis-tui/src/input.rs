use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Input action that can be performed in the demo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    ScrollUp,
    ScrollDown,
    ScrollHalfPageUp,
    ScrollHalfPageDown,
    JumpToTop,
    JumpToBottom,
    NextSection,
    PrevSection,
    Refresh,
    None,
}

/// Map a key event to an action.
pub fn handle_key_event(key: KeyEvent) -> Action {
    match (key.code, key.modifiers) {
        (KeyCode::Char('q'), KeyModifiers::NONE) => Action::Quit,
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Quit,

        (KeyCode::Char('j'), KeyModifiers::NONE) => Action::ScrollDown,
        (KeyCode::Char('k'), KeyModifiers::NONE) => Action::ScrollUp,
        (KeyCode::Down, KeyModifiers::NONE) => Action::ScrollDown,
        (KeyCode::Up, KeyModifiers::NONE) => Action::ScrollUp,

        (KeyCode::Char('d'), KeyModifiers::CONTROL) => Action::ScrollHalfPageDown,
        (KeyCode::Char('u'), KeyModifiers::CONTROL) => Action::ScrollHalfPageUp,

        (KeyCode::Char('g'), KeyModifiers::NONE) => Action::JumpToTop,
        (KeyCode::Char('G'), KeyModifiers::SHIFT) => Action::JumpToBottom,

        (KeyCode::Char('n'), KeyModifiers::NONE) => Action::NextSection,
        (KeyCode::Char('p'), KeyModifiers::NONE) => Action::PrevSection,

        (KeyCode::Char('r'), KeyModifiers::NONE) => Action::Refresh,

        _ => Action::None,
    }
}
