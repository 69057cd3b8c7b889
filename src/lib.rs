//! studiogrid - class schedule grid for a dance studio
//!
//! This library provides:
//! - Parsing of spreadsheet schedule exports
//! - The schedule grid builder (cell merging, class colors, open-slot inquiries)
//! - View state for loading a schedule
//! - Contact inquiries with retry and rate limiting
//! - CLI command parsing and rendering
//!
//! # Example
//!
//! ```no_run
//! use studiogrid::cli::run;
//!
//! fn main() {
//!     if let Err(e) = run() {
//!         eprintln!("Error: {}", e);
//!         std::process::exit(1);
//!     }
//! }
//! ```

pub mod cli;
pub mod config;
pub mod contact;
pub mod grid;
pub mod models;
pub mod source;
pub mod utils;
pub mod view;
