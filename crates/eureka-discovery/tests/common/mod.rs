//! Common test utilities for discovery integration tests

pub mod log_capture;
pub mod snapshots;
