//! Integration tests module for Raptor Client
//!
//! This module provides common utilities and test infrastructure
//! for integration testing of the client core.

pub mod curl_import_test;
pub mod end_to_end_test;

use std::sync::Once;

static INIT: Once = Once::new();

/// Initialize test environment (run once)
pub fn init_test_env() {
    INIT.call_once(|| {
        // Global test setup hook, currently nothing to initialize
    });
}
