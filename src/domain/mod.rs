//! Domain models and types for Strata.
//!
//! This module contains the core domain types and business rules shared by
//! the export engine:
//!
//! - **Counters** ([`Counter`]) — the commutative-monoid aggregation of
//!   saved/skipped/errored outcomes merged upward through the recursion
//! - **Context** ([`ExportContext`]) — the immutable per-level settings
//!   bundle threaded through the tree walk
//! - **Formats** ([`ExportFormat`]) — the closed set of output formats
//! - **Error types** ([`StrataError`], [`SourceError`]) and the
//!   [`Result`] alias
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, StrataError>`]:
//!
//! ```rust
//! use strata::domain::{Result, StrataError};
//!
//! fn example() -> Result<()> {
//!     // Errors are automatically converted using the ? operator
//!     Ok(())
//! }
//! ```

pub mod context;
pub mod counter;
pub mod errors;
pub mod format;
pub mod result;

pub use context::ExportContext;
pub use counter::Counter;
pub use errors::{SourceError, StrataError};
pub use format::{ExportFormat, NATIVE_EXTENSION};
pub use result::Result;
