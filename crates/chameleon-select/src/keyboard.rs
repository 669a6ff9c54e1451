//! Keyboard input types for widget navigation.

/// Keys the widget reacts to.
///
/// Anything else maps to [`Key::Unknown`] and passes through to the host
/// untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Commits or toggles, depending on menu state.
    Enter,
    /// Same contract as Enter.
    Space,
    /// Move the selection up one option.
    ArrowUp,
    /// Move the selection down one option.
    ArrowDown,
    /// Close the menu without changing the selection.
    Escape,
    /// Any key the widget does not handle.
    Unknown,
}

/// A key press delivered to a widget container.
#[derive(Debug)]
pub struct KeyPressEvent {
    /// The key that was pressed.
    pub key: Key,
    accepted: bool,
}

impl KeyPressEvent {
    /// Create a new key press event.
    pub fn new(key: Key) -> Self {
        Self {
            key,
            accepted: false,
        }
    }

    /// Check if the event has been accepted.
    ///
    /// An accepted event must not trigger the host's default action,
    /// mirroring preventDefault semantics.
    pub fn is_accepted(&self) -> bool {
        self.accepted
    }

    /// Accept the event, suppressing the host's default action.
    pub fn accept(&mut self) {
        self.accepted = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_start_unaccepted() {
        let mut event = KeyPressEvent::new(Key::Enter);
        assert!(!event.is_accepted());
        event.accept();
        assert!(event.is_accepted());
    }
}
