//! Structured logging facility for Condor
//!
//! This module provides:
//! - Single initialization point via `init(profile)`
//! - Structured logging macros (`log_op_start!`, `log_op_end!`, `log_op_error!`)
//! - Structural anomaly reporting (`log_anomaly!`) for manifest shapes the
//!   reconciliation passes cannot interpret
//! - Test capture mode for deterministic assertions
//!
//! # Usage
//!
//! ```rust
//! use condor_core::logging_facility::{init, Profile};
//!
//! init(Profile::Development);
//! ```

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
