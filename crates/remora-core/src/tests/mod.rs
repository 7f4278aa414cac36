//! Test module for remora-core
//!
//! This module contains tests for:
//! - Profile parsing (field extraction, description composition, totality)
//! - Directory scanning and lookups
//! - Usage persistence
//! - Query matching and usage ranking
//! - Configuration loading and defaults
//! - The `Remora` query/selection cycle

mod fixtures;
mod index_tests;
