//! Per-panel variable selection.

/// Variable name to included flag, in the order variables were first toggled.
///
/// Lives as long as the panel that owns it. Wholesale data changes call
/// [`SelectionState::reset`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionState {
    entries: Vec<(String, bool)>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: &str, included: bool) {
        match self.entries.iter_mut().find(|(n, _)| n == name) {
            Some((_, flag)) => *flag = included,
            None => self.entries.push((name.to_string(), included)),
        }
    }

    pub fn is_selected(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, flag)| *flag && n == name)
    }

    /// Included names in first-toggle order.
    pub fn selected(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(|(_, flag)| *flag)
            .map(|(name, _)| name.as_str())
    }

    pub fn any_selected(&self) -> bool {
        self.entries.iter().any(|(_, flag)| *flag)
    }

    pub fn reset(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_first_toggle_order() {
        let mut selection = SelectionState::new();
        selection.set("b", true);
        selection.set("a", true);
        selection.set("c", false);
        selection.set("b", false);
        selection.set("b", true);
        assert_eq!(selection.selected().collect::<Vec<_>>(), ["b", "a"]);
        assert!(!selection.is_selected("c"));
    }

    #[test]
    fn reset_forgets_everything() {
        let mut selection = SelectionState::new();
        selection.set("a", true);
        selection.reset();
        assert!(!selection.any_selected());
        assert_eq!(selection, SelectionState::default());
    }
}
