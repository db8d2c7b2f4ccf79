//! Single-line text input used for filter queries and edit drafts.

/// Append-only line editor with a character limit and an inline error slot.
///
/// Control characters are dropped. Any edit clears the error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextInput {
    value: String,
    char_limit: usize,
    error: Option<String>,
}

impl TextInput {
    #[must_use]
    pub const fn new(char_limit: usize) -> Self {
        Self {
            value: String::new(),
            char_limit,
            error: None,
        }
    }

    /// Starts with `value`, truncated to the limit.
    #[must_use]
    pub fn with_value(value: &str, char_limit: usize) -> Self {
        Self {
            value: value.chars().take(char_limit).collect(),
            char_limit,
            error: None,
        }
    }

    /// Appends `c` unless the limit is reached. Returns whether it was taken.
    pub fn push(&mut self, c: char) -> bool {
        if c.is_control() || self.value.chars().count() >= self.char_limit {
            return false;
        }
        self.value.push(c);
        self.error = None;
        true
    }

    /// Removes the last character. Returns whether anything was removed.
    pub fn pop(&mut self) -> bool {
        let removed = self.value.pop().is_some();
        if removed {
            self.error = None;
        }
        removed
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.error = None;
    }

    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }
}
