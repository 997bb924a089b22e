//! Core types shared across schemadelta facilities
//!
//! This crate provides the canonical schema constants used by the logging
//! macros and by tests that assert on captured events.

pub mod schema;
