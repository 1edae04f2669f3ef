//! Remote verse search
//!
//! The controller never talks to the network directly. It hands a
//! [`SearchQuery`] to a [`VerseSource`]; [`BollsClient`] is the production
//! implementation, tests plug in their own.

mod bolls;
mod error;
mod traits;

pub use bolls::{BollsClient, DEFAULT_ENDPOINT, DEFAULT_TIMEOUT, parse_response};
pub use error::{Result, SourceError};
pub use traits::{MAX_LIMIT, SearchQuery, VerseSource};
