//! Document side effects
//!
//! - **root**: RootElement trait and the in-memory StyleRoot
//! - **sync**: DocumentSynchronizer, the store listener writing to the root

pub mod root;
pub mod sync;

pub use root::{RootElement, StyleRoot};
pub use sync::{
    DocumentSynchronizer, SyncHandle, ACCENT_PROPERTY, DARK_CLASS, GLOW_PROPERTY,
    GRADIENT_END_PROPERTY, GRADIENT_START_PROPERTY,
};
