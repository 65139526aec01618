//! Structured logging utilities for the source map checker.
//!
//! This module provides helper functions for consistent, structured
//! logging across the application using the `tracing` crate.

/// Log configuration file loading.
pub fn log_loading_config(path: &str) {
    tracing::debug!(config = path, "Loading configuration");
}

/// Log build start.
pub fn log_build_start(command: &str) {
    tracing::info!(command, "Starting build");
}

/// Log build completion.
pub fn log_build_complete(command: &str, duration_ms: u128) {
    tracing::info!(command, duration_ms = duration_ms as u64, "Build completed");
}

/// Log source map loading.
pub fn log_loading_map(path: &str) {
    tracing::info!(map = path, "Loading source map");
}

/// Log successful source map load.
pub fn log_map_loaded(sources: usize, mappings_len: usize) {
    tracing::debug!(sources, mappings_len, "Source map loaded");
}

pub fn log_check_passed(check: &str) {
    tracing::debug!(check, "Check passed");
}

pub fn log_check_failed(check: &str, error: &str) {
    tracing::warn!(check, error, "Check failed");
}

/// Log verification summary.
pub fn log_verification_complete(passed: usize, total: usize) {
    if passed == total {
        tracing::info!(passed, total, "Verification completed");
    } else {
        tracing::warn!(passed, total, "Verification completed with failures");
    }
}
