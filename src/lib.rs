// src/lib.rs
//! System Designer Core
//!
//! Scene interaction engine for a star-system and universe editor: ray-cast
//! selection, axis-constrained manipulation handles, a free-fly camera, a
//! shared model cache and jump-connection analysis between systems.
//!
//! The [`presenter::Presenter`] is the entry point; it owns the scene and
//! turns pointer and keyboard input into edits reported back through a
//! [`presenter::PresenterObserver`].

pub mod data;
pub mod error;
pub mod gfx;
pub mod manipulation;
pub mod prelude;
pub mod presenter;
pub mod settings;
pub mod universe;

// Re-export main types for convenience
pub use error::{DesignerError, Result};
pub use presenter::Presenter;

/// Install the `env_logger` backend, defaulting to `info`.
///
/// Safe to call more than once; later calls are ignored.
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).try_init();
}
