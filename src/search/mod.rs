//! Debounced verse search
//!
//! Turns keystrokes into at most one remote lookup per pause in typing and
//! keeps a safely navigable window over the results:
//! 1. [`SearchController`] decides *when* to search and what to show
//! 2. [`FetchWorker`] executes the requests it hands out, off the UI thread

pub mod controller;
pub mod debounce;
pub mod worker;

pub use controller::{
    Completion, DEFAULT_TRANSLATION, DisplayState, FetchTicket, MIN_TERM_CHARS, RequestState,
    SearchController, SearchOptions, SearchRequest,
};
pub use debounce::{DEFAULT_DEBOUNCE, Debouncer};
pub use worker::{FetchOutcome, FetchWorker};
