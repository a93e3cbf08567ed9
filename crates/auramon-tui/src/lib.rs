//! auramon-tui - Terminal UI for Aura Monitor
//!
//! This crate provides the ratatui-based terminal interface. It creates a
//! SyncEngine from auramon-client and adds terminal rendering, event
//! polling, and the keyboard-driven dashboard/detail/maintenance flow.

pub mod charts;
pub mod event;
pub mod render;
pub mod runner;
pub mod terminal;
pub mod theme;
pub mod view_model;

// Re-export main entry point
pub use runner::run;
