//! Course Share Core Library
//!
//! This library provides the course-selection state and share-link
//! derivation behind the catalog browser: a session-scoped selection
//! store, a deterministic link synthesizer, and the browsing state fed
//! by the remote catalog API.

pub mod browse;
pub mod catalog;
pub mod error;
pub mod link;
pub mod selection;
pub mod session;
pub mod types;

// Re-export core types and error handling
pub use error::{Error, Result};
pub use types::*;

/// Commonly used items
pub mod prelude {
    pub use crate::{browse::*, catalog::*, link::*, selection::*, session::*, types::*};
}
