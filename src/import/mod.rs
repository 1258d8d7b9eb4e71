//! Import sources for dictionary construction.
//!
//! An [`ImportSource`] yields (surface form, entity identifier) pairs one at
//! a time, typically parsed from a file. Sources are consumed sequentially;
//! a source that fails mid-stream still leaves the caller with every pair
//! produced before the failure.

pub mod tsv;

pub use tsv::TsvSource;

use crate::error::Result;

/// A sequential stream of (surface form, entity identifier) pairs.
///
/// `next_entry` returns `Ok(None)` when the source is exhausted. An `Err`
/// means the underlying source became unreadable; callers treat the pairs
/// already produced as a valid partial import.
pub trait ImportSource {
    /// Pull the next (surface form, entity identifier) pair.
    fn next_entry(&mut self) -> Result<Option<(String, String)>>;

    /// Human-readable name of the source, for log messages.
    fn source_name(&self) -> &str;
}
