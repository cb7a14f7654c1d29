#![warn(missing_docs)]
#![warn(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! bundle-delta library
//!
//! This library provides the core functionality for comparing bundle sizes
//! and build times between two git branches. It can be used programmatically
//! in addition to the CLI interface.
//!
//! # Basic Example
//!
//! Extracting an asset size from build output and formatting it back:
//!
//! ```
//! use bundle_delta::extract::extract_size;
//! use bundle_delta::fmt::humanize;
//!
//! let output = "dist/assets/vendor-abc123.js: 123.45 KB";
//!
//! let size = extract_size(output, "vendor", "js")?;
//! assert_eq!(size, 123_450);
//! assert_eq!(humanize(size as i64), "123.45 KB");
//! # Ok::<(), bundle_delta::error::BundleDeltaError>(())
//! ```
//!
//! # Advanced Example: Building a Comparison
//!
//! Deriving the six-row comparison from two measurement snapshots:
//!
//! ```
//! use bundle_delta::measure::BranchStats;
//! use bundle_delta::report::{comparison_rows, render_table};
//!
//! let baseline = BranchStats {
//!     vendor_js: 1_000_000,
//!     vendor_css: 10_000,
//!     app_js: 50_000,
//!     app_css: 2_000,
//!     prod_build: 10,
//!     dev_build: 5,
//! };
//! let current = BranchStats {
//!     vendor_js: 1_100_000,
//!     prod_build: 12,
//!     ..baseline.clone()
//! };
//!
//! let rows = comparison_rows("frontend", &current, &baseline);
//! assert_eq!(rows[0].before, "1.00 MB");
//! assert_eq!(rows[0].after, "1.10 MB");
//!
//! let table = render_table(&rows);
//! assert!(table.contains("+100.00 KB"));
//! assert!(table.contains("+2 S"));
//! ```

/// Command handlers for CLI operations
pub mod cmd;
/// Error types with contextual suggestions
pub mod error;
/// Asset size extraction from build-tool output
pub mod extract;
/// Shared formatting utilities
pub mod fmt;
/// Git branch detection and switching
pub mod git;
/// Infrastructure traits for command execution
pub mod infra;
/// Branch measurement orchestration
pub mod measure;
/// Comparison rows and table rendering
pub mod report;
/// Shell command execution
pub mod runner;
/// External tool detection
pub mod tools;
