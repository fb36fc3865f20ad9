//! Bulk-select input overlay state.
//!
//! ```text
//! hidden --open--> visible --submit-----------> hidden (pending cleared)
//!                          --dismiss_outside--> hidden (pending kept)
//! ```

/// Placeholder shown while the count input is empty.
pub const PLACEHOLDER: &str = "Select rows...";

/// Visibility and pending count of the bulk-select overlay.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BulkSelectOverlay {
    visible: bool,
    pending: Option<u32>,
}

impl BulkSelectOverlay {
    /// Create a hidden overlay with no pending count.
    #[cfg(test)]
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if the overlay is visible.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Show the overlay. Has no effect when already visible.
    pub fn open(&mut self) {
        self.visible = true;
    }

    /// Hide after a click or keypress outside, keeping what was typed.
    pub fn dismiss_outside(&mut self) {
        self.visible = false;
    }

    /// Hide and forget the pending count. Used on every submit exit path.
    pub fn close_after_submit(&mut self) {
        self.visible = false;
        self.pending = None;
    }

    /// The raw pending count, if anything was typed.
    #[cfg(test)]
    pub fn pending(&self) -> Option<u32> {
        self.pending
    }

    /// Replace the pending count.
    #[cfg(test)]
    pub fn set_pending(&mut self, pending: Option<u32>) {
        self.pending = pending;
    }

    /// The pending count if it is a usable request (at least 1).
    pub fn requested_count(&self) -> Option<u32> {
        self.pending.filter(|&n| n >= 1)
    }

    /// Append a digit to the pending count.
    ///
    /// Returns false for non-digits or when the value would overflow.
    pub fn push_digit(&mut self, c: char) -> bool {
        let Some(digit) = c.to_digit(10) else {
            return false;
        };
        let next = self
            .pending
            .unwrap_or(0)
            .checked_mul(10)
            .and_then(|n| n.checked_add(digit));
        match next {
            Some(n) => {
                self.pending = Some(n);
                true
            }
            None => false,
        }
    }

    /// Remove the last digit; an emptied input has no pending count.
    pub fn backspace(&mut self) {
        self.pending = match self.pending {
            Some(n) if n >= 10 => Some(n / 10),
            _ => None,
        };
    }

    /// Text for the input field, empty when nothing is pending.
    pub fn input_text(&self) -> String {
        self.pending.map(|n| n.to_string()).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_hidden_and_empty() {
        let overlay = BulkSelectOverlay::new();
        assert!(!overlay.is_visible());
        assert_eq!(overlay.pending(), None);
        assert_eq!(overlay.input_text(), "");
    }

    #[test]
    fn test_open_is_idempotent() {
        let mut overlay = BulkSelectOverlay::new();
        overlay.open();
        overlay.open();
        assert!(overlay.is_visible());
    }

    #[test]
    fn test_typing_digits() {
        let mut overlay = BulkSelectOverlay::new();
        assert!(overlay.push_digit('2'));
        assert!(overlay.push_digit('5'));
        assert!(!overlay.push_digit('x'));
        assert_eq!(overlay.pending(), Some(25));
        assert_eq!(overlay.input_text(), "25");
    }

    #[test]
    fn test_overflow_is_rejected() {
        let mut overlay = BulkSelectOverlay::new();
        overlay.set_pending(Some(u32::MAX));
        assert!(!overlay.push_digit('9'));
        assert_eq!(overlay.pending(), Some(u32::MAX));
    }

    #[test]
    fn test_backspace_to_empty() {
        let mut overlay = BulkSelectOverlay::new();
        overlay.set_pending(Some(42));
        overlay.backspace();
        assert_eq!(overlay.pending(), Some(4));
        overlay.backspace();
        assert_eq!(overlay.pending(), None);
        overlay.backspace();
        assert_eq!(overlay.pending(), None);
    }

    #[test]
    fn test_requested_count_requires_positive() {
        let mut overlay = BulkSelectOverlay::new();
        assert_eq!(overlay.requested_count(), None);
        overlay.set_pending(Some(0));
        assert_eq!(overlay.requested_count(), None);
        overlay.set_pending(Some(3));
        assert_eq!(overlay.requested_count(), Some(3));
    }

    #[test]
    fn test_dismiss_outside_keeps_pending() {
        let mut overlay = BulkSelectOverlay::new();
        overlay.open();
        overlay.set_pending(Some(12));
        overlay.dismiss_outside();

        assert!(!overlay.is_visible());
        assert_eq!(overlay.pending(), Some(12));

        overlay.open();
        assert_eq!(overlay.input_text(), "12");
    }

    #[test]
    fn test_close_after_submit_clears_pending() {
        let mut overlay = BulkSelectOverlay::new();
        overlay.open();
        overlay.set_pending(Some(12));
        overlay.close_after_submit();

        assert!(!overlay.is_visible());
        assert_eq!(overlay.pending(), None);
    }
}
