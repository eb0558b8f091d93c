//! In-memory TTL cache with lazy eviction.
//!
//! The foundation every data-access module reuses: values are stored
//! with a per-entry expiry and evicted only when touched, trading
//! memory retention of stale entries for simplicity. There is no
//! background sweep and no persistence across restarts.

pub mod clock;
pub mod ttl;

pub use clock::{Clock, ManualClock, SystemClock};
pub use ttl::TtlCache;
