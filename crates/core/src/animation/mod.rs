use std::path::PathBuf;

use crate::{config::AnimationConfig, raster::ImageRenderer, Renderable, Result};

/// Writes one image per frame, named `<base_name>_<index>.png`.
#[derive(Debug)]
pub struct Animator {
    renderer: ImageRenderer,
    config: AnimationConfig,
}

impl Animator {
    pub fn new(renderer: ImageRenderer, config: AnimationConfig) -> Self {
        Self { renderer, config }
    }

    /// Frame output paths in order, starting at index 0.
    pub fn frame_paths(&self, count: usize, base_name: &str) -> Vec<PathBuf> {
        (0..count)
            .map(|idx| self.config.output_dir.join(format!("{base_name}_{idx}.png")))
            .collect()
    }

    /// Best-effort: every frame is attempted and individual failures are discarded.
    pub fn render_frames<R: Renderable>(&self, frames: &[R], base_name: &str) {
        let _ = std::fs::create_dir_all(&self.config.output_dir);
        let paths = self.frame_paths(frames.len(), base_name);
        for (frame, path) in frames.iter().zip(&paths) {
            self.renderer.render_to_png(frame, path);
        }
    }

    /// Renders every frame sequentially and stops at the first failure.
    pub fn try_render_frames<R: Renderable>(&self, frames: &[R], base_name: &str) -> Result<()> {
        std::fs::create_dir_all(&self.config.output_dir)?;
        let paths = self.frame_paths(frames.len(), base_name);
        for (frame, path) in frames.iter().zip(&paths) {
            self.renderer.try_render_to_png(frame, path)?;
        }
        tracing::debug!(frames = frames.len(), base_name, "rendered frame sequence");
        Ok(())
    }
}

impl Default for Animator {
    fn default() -> Self {
        Self::new(ImageRenderer::default(), AnimationConfig::default())
    }
}
