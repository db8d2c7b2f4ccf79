//! Logical keys and the terminal keymap.
//!
//! Views never see raw terminal events. [`map_key`] translates a crossterm
//! [`KeyEvent`] into a [`Key`] according to the focused view's
//! [`InputContext`], so the same physical key can mean "type a letter" in an
//! input box and "delete" in a list.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Logical input understood by views and the router.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    MoveUp,
    MoveDown,
    NextPage,
    PrevPage,
    ActivateFilter,
    ClearFilter,
    AddItem,
    EditItem,
    DeleteItem,
    Refresh,
    Accept,
    Cancel,
    Quit,
    Char(char),
    Backspace,
    SendRequest,
    CycleMethod,
    EditUrl,
    EditBody,
    AddHeader,
}

/// Which keymap applies to the focused view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputContext {
    /// List navigation with no filter.
    Browsing,
    /// List navigation with a filter applied; `Esc` clears it.
    FilterApplied,
    /// Typing a filter query.
    Filtering,
    /// Typing into an edit draft.
    Editing,
    /// Endpoint detail screen.
    Detail,
}

impl InputContext {
    /// Whether printable keys are captured as text.
    #[must_use]
    pub const fn captures_text(self) -> bool {
        matches!(self, Self::Filtering | Self::Editing)
    }
}

/// Maps a terminal key event to a logical key.
///
/// Returns `None` for releases and unbound keys.
#[must_use]
pub fn map_key(event: &KeyEvent, context: InputContext) -> Option<Key> {
    if event.kind == KeyEventKind::Release {
        return None;
    }

    if event.modifiers.contains(KeyModifiers::CONTROL) {
        return match event.code {
            KeyCode::Char('c') => Some(Key::Quit),
            KeyCode::Char('n') => Some(Key::MoveDown),
            KeyCode::Char('p') => Some(Key::MoveUp),
            _ => None,
        };
    }

    match event.code {
        KeyCode::Up => return Some(Key::MoveUp),
        KeyCode::Down => return Some(Key::MoveDown),
        KeyCode::Enter => return Some(Key::Accept),
        _ => {}
    }

    if context.captures_text() {
        return match event.code {
            KeyCode::Esc if context == InputContext::Filtering => Some(Key::ClearFilter),
            KeyCode::Esc => Some(Key::Cancel),
            KeyCode::Backspace => Some(Key::Backspace),
            KeyCode::Char(c) => Some(Key::Char(c)),
            _ => None,
        };
    }

    if context == InputContext::Detail {
        return match event.code {
            KeyCode::Esc | KeyCode::Backspace => Some(Key::Cancel),
            KeyCode::Char('j') => Some(Key::MoveDown),
            KeyCode::Char('k') => Some(Key::MoveUp),
            KeyCode::Char('s') => Some(Key::SendRequest),
            KeyCode::Char('m') => Some(Key::CycleMethod),
            KeyCode::Char('u') => Some(Key::EditUrl),
            KeyCode::Char('b') => Some(Key::EditBody),
            KeyCode::Char('h') => Some(Key::AddHeader),
            KeyCode::Char('r') => Some(Key::Refresh),
            KeyCode::Char('q') => Some(Key::Quit),
            _ => None,
        };
    }

    match event.code {
        KeyCode::Esc if context == InputContext::FilterApplied => Some(Key::ClearFilter),
        KeyCode::Esc | KeyCode::Backspace => Some(Key::Cancel),
        KeyCode::Char('j') => Some(Key::MoveDown),
        KeyCode::Char('k') => Some(Key::MoveUp),
        KeyCode::Char('n') | KeyCode::Right | KeyCode::PageDown => Some(Key::NextPage),
        KeyCode::Char('p') | KeyCode::Left | KeyCode::PageUp => Some(Key::PrevPage),
        KeyCode::Char('/') => Some(Key::ActivateFilter),
        KeyCode::Char('a') => Some(Key::AddItem),
        KeyCode::Char('e') => Some(Key::EditItem),
        KeyCode::Char('x') | KeyCode::Delete => Some(Key::DeleteItem),
        KeyCode::Char('r') => Some(Key::Refresh),
        KeyCode::Char('q') => Some(Key::Quit),
        _ => None,
    }
}
