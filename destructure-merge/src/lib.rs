//! Core library for the destructure-merge tool.
//!
//! Finds runs of consecutive `const`/`let`/`var` object-destructuring
//! declarations that read from the same object, and merges each run into a
//! single declaration:
//!
//! ```text
//! const { a } = req;
//! const { b } = req.cookies;   =>   const { a, cookies: { b, c } } = req;
//! const { c } = req.cookies;
//! ```
//!
//! Sources are parsed with tree-sitter, lowered into flat statement lists,
//! checked by the rules and optionally rewritten in place.

#![allow(
    clippy::similar_names,
    clippy::format_push_string,
    clippy::map_unwrap_or,
    clippy::items_after_statements
)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

/// Module containing the lint driver.
/// This includes the `DestructureMerge` struct and its file processing.
pub mod analyzer;

/// Module for loading configuration.
pub mod config;

/// Module for Tree-sitter parsing and lowering into statement lists.
pub mod cst;

/// Module defining the statement-list model the rules inspect.
pub mod syntax;

/// Module containing the implementation of the rules.
pub mod rules;

/// Module containing the byte-range rewriter used to apply fixes.
pub mod fix;

/// Module containing utility functions.
/// This includes line mapping and path helpers.
pub mod utils;

/// Module defining the entry point logic shared by both binaries.
pub mod entry_point;

/// Module containing shared constants.
pub mod constants;

/// Module containing the linter logic and visitor.
pub mod linter;

/// Module for rich CLI output formatting with colored text and tables.
pub mod output;

/// Module defining the command-line interface arguments and structs.
pub mod cli;

/// Module for handling CLI commands and their execution logic.
pub mod commands;
