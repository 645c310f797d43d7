//! rehab-cli
//!
//! Command-line front end for the rehabilitation backend and the local
//! scoring rules.

pub mod cli;
pub mod commands;
pub mod config;
pub mod logging;
pub mod render;
