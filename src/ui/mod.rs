//! User interface layer
//!
//! Two front ends share the same search and share code:
//!
//! - **[`ratatui_adapter::TuiApp`]** - the full-screen, search-as-you-type view
//! - **[`OutputWriter`]** - plain status output for the one-shot commands
//!
//! ## Output Messages
//!
//! ```
//! use iquote::ui::output::{OutputWriter, StdoutWriter};
//!
//! let output = StdoutWriter::new(false);
//! output.success("Config written");
//! output.warning("Translation not set, using NKJV");
//! output.info("Additional info");
//! ```

mod error;

pub mod output;
pub mod ratatui_adapter;

pub use error::{Result, UiError};
pub use output::{MessageLevel, OutputWriter, StdoutWriter, format_verse};
pub use ratatui_adapter::TuiApp;
