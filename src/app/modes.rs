//! Interaction modes for list views.
//!
//! A list view is always in exactly one [`ViewMode`]. The draft text of a
//! create or edit lives inside the mode itself, so leaving the mode discards
//! it and there is no way to hold a draft while browsing.
//!
//! ```text
//! Browsing ──/──▶ Filtering ──Enter/Esc──▶ Browsing
//! Browsing ──a──▶ Creating  ──Enter(ok)/Esc──▶ Browsing
//! Browsing ──e──▶ Editing   ──Enter(ok)/Esc──▶ Browsing
//! ```

use super::editor::TextInput;
use crate::domain::validation::MAX_NAME_LEN;

/// In-progress create or edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditDraft {
    /// Text being typed, with its inline validation error.
    pub input: TextInput,

    /// Entity being renamed; `None` for a create.
    pub edit_target_id: Option<i64>,
}

impl EditDraft {
    #[must_use]
    pub const fn create() -> Self {
        Self {
            input: TextInput::new(MAX_NAME_LEN),
            edit_target_id: None,
        }
    }

    /// Draft for renaming `id`, pre-filled with its current title.
    #[must_use]
    pub fn edit(id: i64, current: &str) -> Self {
        Self {
            input: TextInput::with_value(current, MAX_NAME_LEN),
            edit_target_id: Some(id),
        }
    }
}

/// Current interaction mode of a list view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewMode {
    /// Navigating rows and pages.
    Browsing,

    /// Typing a filter query.
    Filtering,

    /// Typing the name of a new item.
    Creating(EditDraft),

    /// Typing a new name for `EditDraft::edit_target_id`.
    Editing(EditDraft),
}

impl ViewMode {
    #[must_use]
    pub const fn kind(&self) -> ModeKind {
        match self {
            Self::Browsing => ModeKind::Browsing,
            Self::Filtering => ModeKind::Filtering,
            Self::Creating(_) => ModeKind::Creating,
            Self::Editing(_) => ModeKind::Editing,
        }
    }

    #[must_use]
    pub const fn draft(&self) -> Option<&EditDraft> {
        match self {
            Self::Creating(draft) | Self::Editing(draft) => Some(draft),
            Self::Browsing | Self::Filtering => None,
        }
    }

    pub fn draft_mut(&mut self) -> Option<&mut EditDraft> {
        match self {
            Self::Creating(draft) | Self::Editing(draft) => Some(draft),
            Self::Browsing | Self::Filtering => None,
        }
    }
}

/// Payload-free tag of a [`ViewMode`], for snapshots and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeKind {
    Browsing,
    Filtering,
    Creating,
    Editing,
}
