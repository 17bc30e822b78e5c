//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the report pipeline and an
//! external system (time, filesystem, the package-manager process, the
//! issue tracker). Implementations live in `src/adapters/`.

pub mod clock;
pub mod filesystem;
pub mod issues;
pub mod shell;

pub use clock::Clock;
pub use filesystem::{FileSystem, WalkEntry};
pub use issues::{Issue, IssueTracker};
pub use shell::{ShellExecutor, ShellOutput};

/// Error type shared by every fallible port method.
pub type PortError = Box<dyn std::error::Error + Send + Sync>;
