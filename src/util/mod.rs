//! Utility functions for common operations.
//!
//! - **Text processing**: Unicode-aware width and truncation, plus
//!   stripping of terminal escape sequences from publisher-supplied text
//! - **URL validation**: checks article links before opening them
//!
//! # Examples
//!
//! ```
//! use pulso::util::{display_width, strip_control_chars, truncate_to_width};
//!
//! let title = strip_control_chars("\x1b[1mEleições\x1b[0m 2026");
//! assert_eq!(title, "Eleições 2026");
//! assert_eq!(display_width(&title), 13);
//! assert_eq!(truncate_to_width(&title, 10), "Eleiçõe...");
//! ```

mod text;
mod url_validator;

pub use text::{display_width, strip_control_chars, truncate_to_width};
pub use url_validator::{validate_url_for_open, UrlValidationError};

/// Maximum allowed search query length
pub const MAX_SEARCH_QUERY_LENGTH: usize = 256;
