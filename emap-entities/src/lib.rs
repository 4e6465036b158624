#![deny(missing_debug_implementations)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # emap-entities
//!
//! Reusable, agnostic domain entities of the event map.
//!
//! The entities only contain generic functionality that does not reveal any application-specific
//! business logic like filtering or rendering.

pub mod category;
pub mod event;
pub mod filter;
pub mod geo;
pub mod map;
pub mod time;
pub mod url {
    pub use url::{ParseError, Url};
}

#[cfg(any(test, feature = "builders"))]
pub mod builders;
