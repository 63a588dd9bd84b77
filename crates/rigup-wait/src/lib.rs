//! Poll-until-ready for asynchronously provisioned remote resources.
//!
//! A resource is created against an external system (a marketplace, a
//! control plane) and becomes usable some time later. This crate waits
//! for that moment: it re-fetches the system's status listing at a fixed
//! interval, locates the tracked resource, and returns the first snapshot
//! that satisfies a caller-supplied readiness predicate. The returned
//! snapshot is the one the caller should act on — ephemeral fields such
//! as access tokens may rotate between polls.

mod error;
pub use error::WaitError;

mod options;
pub use options::{AbsencePolicy, DEFAULT_POLL_INTERVAL, WaitOptions};

mod source;
pub use source::{StatusSource, Tracked};

mod wait;
pub use wait::wait_until_ready;
