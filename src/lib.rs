//! Diablo 3 gem crafting helper.
//!
//! Works out whether a stock of lesser gems is enough to craft some target
//! gems, and what is left over or missing.

pub mod cli;
pub mod cluster;
pub mod converter;
pub mod error;
pub mod formatter;
pub mod logging;
pub mod parser;
pub mod report;
