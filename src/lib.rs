//! ngmig - Angular template i18n migration
//!
//! ngmig finds the hardcoded texts in Angular HTML templates, replaces each one
//! with a `{{ 'MODULE.KEY' | translate }}` pipe and writes every extracted text
//! into a single translation manifest grouped by module.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (argument parsing, commands, reporting)
//! - `config`: Configuration file loading and parsing
//! - `core`: Migration engine (parse, extract, key, rewrite, aggregate)
//! - `issues`: Issue type definitions and reporting

pub mod cli;
pub mod config;
pub mod core;
pub mod issues;
