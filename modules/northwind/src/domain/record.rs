/// A persisted record addressed by an integer key.
///
/// Id `0` means "not assigned yet": the store picks one on insert.
pub trait Record: Clone + Send + Sync + 'static {
    /// Human-readable kind used in messages and logs.
    const KIND: &'static str;

    fn id(&self) -> i32;

    #[must_use]
    fn with_id(self, id: i32) -> Self;

    fn has_assigned_id(&self) -> bool {
        self.id() != 0
    }
}
