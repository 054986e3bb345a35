//! Migration engine.
//!
//! Each template goes through the same pipeline:
//!
//! 1. `parsers::html` builds a span-preserving node tree
//! 2. `extract` walks it and keeps the translatable fragments
//! 3. `keys` numbers the fragments and `rewrite` substitutes them
//! 4. `translations` merges every file's keys, and `manifest` writes the result
//!
//! `migrate` drives the pipeline over all files of a source root.

pub mod extract;
pub mod file_scanner;
pub mod keys;
pub mod manifest;
pub mod migrate;
pub mod parsers;
pub mod rewrite;
pub mod translations;

pub use migrate::{FileOutcome, FileStatus, MigrationContext, MigrationOptions, MigrationReport};
