use shared::ElementId;

/// Single-element selection
#[derive(Debug, Default)]
pub struct SelectionState {
    selected: Option<ElementId>,
    /// Version counter for selection changes (highlight cache invalidation)
    version: u64,
}

impl SelectionState {
    /// Currently selected element
    pub fn selected(&self) -> Option<ElementId> {
        self.selected
    }

    pub fn has_selection(&self) -> bool {
        self.selected.is_some()
    }

    /// Check if an element is selected
    pub fn is_selected(&self, id: ElementId) -> bool {
        self.selected == Some(id)
    }

    /// Select an element (replaces previous selection)
    pub fn select(&mut self, id: ElementId) {
        if self.selected != Some(id) {
            self.selected = Some(id);
            self.version += 1;
        }
    }

    /// Clear selection
    pub fn clear(&mut self) {
        if self.selected.take().is_some() {
            self.version += 1;
        }
    }

    pub fn version(&self) -> u64 {
        self.version
    }
}
