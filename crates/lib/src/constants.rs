//! Constants used throughout the Fieldstates library.
//!
//! This module provides central definitions for reserved attribute names and the
//! fingerprint format.

/// Reserved attribute holding a record's identifier. Never part of a fingerprint.
pub const ID: &str = "id";

/// Separator placed between attribute names in a fingerprint.
pub const FINGERPRINT_SEPARATOR: &str = ",";
