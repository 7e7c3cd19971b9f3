//! Hosting surfaces for the trip planner.

pub mod cli;

pub use cli::CliChannel;
