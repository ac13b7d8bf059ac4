//! Platform classification
//!
//! Pure string-classification lookups for operating system family and
//! processor architecture. No state, no I/O; the process-wide values are
//! computed once from the compile-time platform constants.

pub mod arch;
pub mod os_family;

pub use arch::{ArchFamily, ArchWidth};
pub use os_family::OsFamily;
