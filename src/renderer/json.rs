//! JSON frame serializer for hosts that draw outside Rust (the browser page)

use super::Renderer;
use crate::error::RenderError;
use crate::sim::FrameView;

/// Keeps the latest presented frame serialized as JSON
#[derive(Debug, Clone, Default)]
pub struct JsonRenderer {
    json: String,
}

impl JsonRenderer {
    /// Most recently presented frame; empty until the first present
    pub fn json(&self) -> &str {
        &self.json
    }
}

impl Renderer for JsonRenderer {
    fn present(&mut self, view: &FrameView) -> Result<(), RenderError> {
        self.json = serde_json::to_string(view).map_err(|e| RenderError(e.to_string()))?;
        Ok(())
    }
}
