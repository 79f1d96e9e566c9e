//! Events and observers.
//!
//! Submodules:
//! - [`statusbar`] – a status bar reached zero
pub mod statusbar;
