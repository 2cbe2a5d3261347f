//! Shared fixtures for dashgate-axum integration tests.

// Each test binary uses a different subset of the fixtures
#![allow(dead_code)]

pub mod fixtures;
