#![warn(clippy::all, clippy::pedantic)]

// Test modules
pub mod app_tests;
pub mod config_loader_tests;
pub mod grid_tests;
