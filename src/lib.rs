//! Waterfall
//!
//! Virtualized masonry layout: items of unknown height are packed into the
//! shortest column, only the items near the viewport are materialized, and
//! real heights measured after rendering replace placeholder estimates
//! without jumps in the scroll position.
//!
//! [`layout`] is the renderer-agnostic engine. The other modules form the
//! `waterfall` terminal previewer built on top of it.

pub mod config;
pub mod layout;
pub mod logging;
pub mod model;
pub mod parser;
pub mod source;
pub mod view;
