//! In-process address bar: a linear history of `?query` locations.

/// Back/forward history of query-string locations.
///
/// The controller writes here on user edits (`push`) and canonicalization
/// (`replace`); back, forward, and direct entry are the external changes it
/// reads back through the codec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct History {
    entries: Vec<String>,
    cursor: usize,
}

impl History {
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            entries: vec![initial.into()],
            cursor: 0,
        }
    }

    pub fn current(&self) -> &str {
        self.entries[self.cursor].as_str()
    }

    /// Add a new entry after the current one, discarding any forward entries.
    ///
    /// # Returns
    /// `false` when `location` equals the current entry and nothing changed.
    pub fn push(&mut self, location: impl Into<String>) -> bool {
        let location = location.into();
        if location == self.current() {
            return false;
        }
        self.entries.truncate(self.cursor + 1);
        self.entries.push(location);
        self.cursor = self.entries.len() - 1;
        true
    }

    /// Overwrite the current entry in place.
    pub fn replace(&mut self, location: impl Into<String>) {
        self.entries[self.cursor] = location.into();
    }

    pub fn back(&mut self) -> Option<&str> {
        if !self.can_go_back() {
            return None;
        }
        self.cursor -= 1;
        Some(self.current())
    }

    pub fn forward(&mut self) -> Option<&str> {
        if !self.can_go_forward() {
            return None;
        }
        self.cursor += 1;
        Some(self.current())
    }

    pub fn can_go_back(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::History;

    #[test]
    fn push_skips_duplicates_and_truncates_forward_entries() {
        let mut history = History::new("?page=1");
        assert!(!history.push("?page=1"));
        assert!(history.push("?page=2"));
        assert!(history.push("?page=3"));
        assert_eq!(history.back(), Some("?page=2"));

        assert!(history.push("?page=2&search=fox"));
        assert!(!history.can_go_forward());
        assert_eq!(history.len(), 3);
        assert_eq!(history.back(), Some("?page=2"));
        assert_eq!(history.back(), Some("?page=1"));
        assert_eq!(history.back(), None);
    }

    #[test]
    fn replace_keeps_position_and_length() {
        let mut history = History::new("?page=abc&utm=1");
        history.replace("?page=1");
        assert_eq!(history.current(), "?page=1");
        assert_eq!(history.len(), 1);
        assert!(!history.can_go_back());
    }

    #[test]
    fn forward_walks_back_up_the_stack() {
        let mut history = History::new("?page=1");
        history.push("?page=2");
        history.back();
        assert!(history.can_go_forward());
        assert_eq!(history.forward(), Some("?page=2"));
        assert_eq!(history.forward(), None);
    }
}
