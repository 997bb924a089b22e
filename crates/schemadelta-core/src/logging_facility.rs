//! Structured logging facility for schemadelta
//!
//! - Single initialization point via `init(profile)`
//! - Boundary macros (`log_op_start!`, `log_op_end!`, `log_op_error!`)
//! - Test capture mode for deterministic assertions
//!
//! # Usage
//!
//! ```rust
//! use schemadelta_core::logging_facility::{init, Profile};
//!
//! init(Profile::Development);
//! ```
//!
//! Comparators own their boundary events; matcher tiers and the reporter only
//! use `tracing::debug!`.

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
