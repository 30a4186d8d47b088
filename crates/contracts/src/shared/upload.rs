use std::collections::BTreeSet;

/// Rows with an image upload in flight
///
/// Each row is tracked on its own, so uploading on one row never blocks
/// the others.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadTracker {
    in_flight: BTreeSet<i64>,
}

impl UploadTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `id` as uploading; `false` if that row is already uploading
    pub fn begin(&mut self, id: i64) -> bool {
        self.in_flight.insert(id)
    }

    pub fn finish(&mut self, id: i64) {
        self.in_flight.remove(&id);
    }

    pub fn is_uploading(&self, id: i64) -> bool {
        self.in_flight.contains(&id)
    }

    pub fn any(&self) -> bool {
        !self.in_flight.is_empty()
    }
}
