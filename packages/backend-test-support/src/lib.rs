//! Backend test support utilities
//!
//! Shared helpers for backend tests: unified logging initialization and
//! Problem Details assertions.

pub mod logging;
pub mod problem_details;
