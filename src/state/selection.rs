//! Snapshot listing and selection.

/// Resolve which entry of `listing` should be selected after a refresh.
///
/// Keeps `previous` selected if it is still listed, otherwise falls back to the
/// last entry, or no selection when the listing is empty. An empty `previous`
/// counts as no previous selection.
pub fn resolve_selection(listing: &[String], previous: Option<&str>) -> Option<usize> {
    if let Some(name) = previous.filter(|n| !n.is_empty()) {
        if let Some(index) = listing.iter().position(|s| s == name) {
            return Some(index);
        }
    }
    listing.len().checked_sub(1)
}

/// Sorted snapshot names of the current destination plus the selected entry.
///
/// The listing is only ever replaced wholesale by [`refresh`](Self::refresh),
/// which re-resolves the selection by name.
#[derive(Debug, Clone, Default)]
pub struct SnapshotList {
    names: Vec<String>,
    selected: Option<usize>,
}

impl SnapshotList {
    /// Create an empty listing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the listing and re-resolve the selection by name.
    pub fn refresh(&mut self, names: Vec<String>) {
        let previous = self.selected_name().map(str::to_owned);
        self.names = names;
        self.selected = resolve_selection(&self.names, previous.as_deref());
    }

    /// Drop every entry and the selection.
    pub fn clear(&mut self) {
        self.names.clear();
        self.selected = None;
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Name of the selected snapshot.
    pub fn selected_name(&self) -> Option<&str> {
        self.selected
            .and_then(|i| self.names.get(i))
            .map(String::as_str)
    }

    /// Select by index. Returns false (and leaves the selection alone) if out of range.
    pub fn select(&mut self, index: usize) -> bool {
        if index < self.names.len() {
            self.selected = Some(index);
            true
        } else {
            false
        }
    }

    /// Select by name. Returns false if the name is not listed.
    pub fn select_name(&mut self, name: &str) -> bool {
        match self.names.iter().position(|s| s == name) {
            Some(index) => {
                self.selected = Some(index);
                true
            }
            None => false,
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }
}
