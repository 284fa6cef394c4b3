//! Applying rule fixes to source text.
//!
//! The core component is `ByteRangeRewriter`, which applies
//! edits using byte offsets and can re-parse the result to make sure
//! a fix never produces invalid code.

mod rewriter;

pub use rewriter::{ByteRangeRewriter, Edit, RewriteError};
