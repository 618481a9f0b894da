//! kakitori-test - Regression test framework for kakitori
//!
//! This crate provides a small regression test harness in the style of
//! numbered checks: every comparison advances an index, failures are
//! collected, and [`RegParams::cleanup`] reports the outcome.
//!
//! # Usage
//!
//! ```ignore
//! use kakitori_test::RegParams;
//!
//! let mut rp = RegParams::new("stroke");
//! rp.compare_values(2.0, stroke.len() as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! The [`fixtures`] module builds the strokes and libraries the
//! integration tests share.

mod error;
pub mod fixtures;
mod params;

pub use error::{TestError, TestResult};
pub use params::RegParams;
