//! Display metrics and derived physical size
//!
//! Provides:
//! - The raw metrics snapshot reported by a display host
//! - The derived-metrics calculator (physical width/height, diagonal size)

mod physical;
mod snapshot;

pub use physical::*;
pub use snapshot::*;
