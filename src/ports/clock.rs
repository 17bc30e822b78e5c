//! Clock port for the report's "generated" timestamp.

use chrono::{DateTime, Utc};

/// Source of the time stamped into the map footer.
///
/// Replayed runs read the recorded instant, so the same cassette always
/// renders a byte-identical page.
pub trait Clock: Send + Sync {
    /// The current UTC time.
    fn now(&self) -> DateTime<Utc>;
}
