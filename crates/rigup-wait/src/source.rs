use async_trait::async_trait;

/// Capability that returns the current collection of status snapshots.
///
/// Every call must produce a fresh, independent view of the external
/// system; the waiter never caches or merges snapshots across polls.
#[async_trait]
pub trait StatusSource {
    /// One status snapshot in the listing.
    type Status;
    /// Transport-level failure of the listing query itself.
    type Error;

    async fn fetch(&self) -> Result<Vec<Self::Status>, Self::Error>;
}

/// Snapshot that can be located in a listing by its assigned handle.
///
/// The handle is whatever opaque identifier the external system handed
/// out at creation time. It is immutable once obtained.
pub trait Tracked {
    type Handle: PartialEq;

    fn handle(&self) -> Self::Handle;
}
