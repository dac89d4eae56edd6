pub mod app;
pub mod components;
pub mod config;
pub mod game;
pub mod grid;
pub mod player;
pub mod schedule;
pub mod systems;
pub mod ui;

#[cfg(test)]
mod tests;
