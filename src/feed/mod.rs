//! Feed state: what the portal is showing and what the user saved.
//!
//! - [`controller`] - category/search/page state machine with stale-response
//!   detection
//! - [`saved`] - the in-memory saved-articles set
//!
//! Neither submodule does I/O. The [`crate::app`] runtime executes the
//! [`FetchRequest`]s the controller hands out.

pub mod controller;
mod saved;

pub use controller::{FeedController, FeedView, FetchRequest, Phase};
pub use saved::SavedArticles;
