//! Main binary entry point for the destructure-merge tool.
//!
//! This binary simply delegates to the shared `entry_point::run_with_args()` function
//! to ensure consistent behavior across both binaries.

use anyhow::Result;

fn main() -> Result<()> {
    let code = destructure_merge::entry_point::run_with_args(std::env::args().skip(1).collect())?;
    std::process::exit(code);
}
