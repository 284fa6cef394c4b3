//! Centralized Rule IDs for destructure-merge.

/// Style: consecutive destructuring declarations from the same object
pub const RULE_ID_DESTRUCTURING_MERGE: &str = "DSM-001";
