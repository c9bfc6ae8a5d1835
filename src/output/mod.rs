//! Output abstraction layer that routes to rich, plain, diff or JSON output
//! based on mode.

pub mod components;
pub mod context;
pub mod theme;

pub use components::*;
pub use context::{OutputContext, OutputMode};
pub use theme::Theme;
