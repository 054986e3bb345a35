//! Template parsers.
//!
//! - `html`: lenient HTML/Angular template parser that keeps byte spans

pub mod html;
