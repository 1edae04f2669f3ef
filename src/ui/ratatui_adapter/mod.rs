//! Ratatui-based verse search screen
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                 TuiApp                      │
//! │   (event loop, terminal setup/teardown)     │
//! └────────────────────┬────────────────────────┘
//!                      │
//!        ┌─────────────┼─────────────┐
//!        ▼             ▼             ▼
//! ┌────────────┐ ┌───────────┐ ┌───────────┐
//! │  AppState  │ │  Ratatui  │ │ Crossterm │
//! │ (search)   │ │ (widgets) │ │  (events) │
//! └────────────┘ └───────────┘ └───────────┘
//! ```
//!
//! Searches run on the [`FetchWorker`](crate::search::FetchWorker); the
//! loop only ever touches the controller from its own thread.

mod app;
mod events;
mod state;
mod theme;
pub mod widgets;

pub use app::TuiApp;
pub use events::{EventResult, handle_key};
pub use state::{AppState, Mode, StatusMessage};
pub use theme::Theme;
