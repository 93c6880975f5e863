//! # Features Layer
//!
//! Behaviour that spans several commands or transports.
//!
//! - **Version**: 2.0.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 2.0.0: Collapsible man page views
//! - 1.0.0: Initial feature layout

pub mod collapsible;

pub use collapsible::{
    apply_toggle, decide, render_man_embed, RenderedView, ToggleDecision, ToggleDirection,
    ToggleEvent, ToggleOutcome, ViewMode,
};
