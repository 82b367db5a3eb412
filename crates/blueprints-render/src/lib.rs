//! Blueprints Render Library
//!
//! Drawing surface abstraction and the path renderer for the blueprint
//! viewer. The default surface builds a Vello scene for GPU rendering.

mod path;
mod recording;
mod surface;

#[cfg(feature = "vello-renderer")]
mod vello_impl;

pub use path::{render, render_blueprint};
pub use recording::{DrawCommand, RecordingSurface};
pub use surface::{
    DEFAULT_VIEWPORT, DrawingSurface, MarkerRole, PathStyle, RenderResult, RendererError,
};

#[cfg(feature = "vello-renderer")]
pub use vello_impl::VelloSurface;
