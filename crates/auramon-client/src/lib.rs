//! # auramon-client - Sync Engine and Gateway
//!
//! The state-synchronization layer of auramon. Owns every mutation of
//! dashboard state and talks to the Aura backend over HTTP.
//!
//! ## Architecture
//!
//! The engine follows a single-writer, message-driven design:
//!
//! - Background tasks ([`actions`]) perform all network I/O and report
//!   results as [`Message`]s over an mpsc channel. They never touch state.
//! - [`SyncEngine::process_message`] is the only place state changes. The
//!   caller drains the channel on one thread, so commits are atomic from
//!   the renderer's point of view.
//! - A refresh cycle is all-or-nothing: the snapshot store is replaced
//!   wholesale when both fleet legs succeed, and untouched otherwise.
//!
//! ## Modules
//!
//! - [`gateway`] - `Gateway` trait and the reqwest-backed [`HttpGateway`]
//! - [`engine`] - [`SyncEngine`], the single writer of dashboard state
//! - [`store`] - [`SnapshotStore`], last-known-good fleet state
//! - [`detail`] - [`DetailSession`], the focused-machine drill-down
//! - [`charts`] - chart handle lifecycle and series preparation
//! - [`actions`] - spawned background tasks (ticker, fetch cycles)
//! - [`notify`] - user-facing notification queue
//! - [`config`] - `.auramon/config.toml` settings

pub mod actions;
pub mod charts;
pub mod config;
pub mod detail;
pub mod engine;
pub mod gateway;
pub mod message;
pub mod notify;
pub mod store;

#[cfg(test)]
pub(crate) mod testing;

pub use charts::{history_chart_specs, ChartHandle, ChartRenderer, ChartSpec, ChartTarget};
pub use config::{load_settings, Settings};
pub use detail::DetailSession;
pub use engine::SyncEngine;
pub use gateway::{Gateway, HttpGateway};
pub use message::Message;
pub use notify::{Notification, NotificationQueue, NotifyLevel};
pub use store::SnapshotStore;
