//! Rendering collaborator
//!
//! The simulation hands over a [`FrameView`] once per frame; a renderer turns
//! it into pixels, text, or a message to a browser page. Failures are
//! reported to the caller, which logs them and keeps running.

pub mod ascii;
pub mod json;

pub use ascii::AsciiRenderer;
pub use json::JsonRenderer;

use crate::error::RenderError;
use crate::sim::FrameView;

/// Consumer of per-frame draw lists
pub trait Renderer {
    fn present(&mut self, view: &FrameView) -> Result<(), RenderError>;
}
