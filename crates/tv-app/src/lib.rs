//! Application context for the treemap page.
//!
//! Everything the page does between DOM events lives here, as plain Rust:
//! the bridge forwards events in and applies the resulting state out.

pub mod app;
pub mod chrome;
pub mod query;
pub mod view;

pub use app::{LinkAction, LoadOutcome, LoadRequest, TreemapApp};
pub use chrome::PageChrome;
pub use view::{LoadedView, ViewState, load_view};
