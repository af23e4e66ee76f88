/// Visual state of the search results panel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PanelState {
    #[default]
    Hidden,
    Loading,
    ShowingResults,
    ShowingEmpty,
    ShowingError,
}

impl PanelState {
    pub fn is_visible(self) -> bool {
        !matches!(self, PanelState::Hidden)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_hidden_is_invisible() {
        assert!(!PanelState::Hidden.is_visible());
        assert!(PanelState::Loading.is_visible());
        assert!(PanelState::ShowingResults.is_visible());
        assert!(PanelState::ShowingEmpty.is_visible());
        assert!(PanelState::ShowingError.is_visible());
    }
}
