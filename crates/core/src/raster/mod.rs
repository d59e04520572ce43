//! Image output.
//!
//! Rendered text is laid out on a fixed [`Canvas`] and handed to a
//! [`Rasterizer`]. With the `raster` feature the canvas is drawn through
//! `resvg` and encoded as PNG; otherwise the raw text is written next to the
//! requested path with a `.txt` suffix.

use std::{
    ffi::OsString,
    fmt,
    path::{Path, PathBuf},
};

use crate::{config::ImageConfig, Renderable, Result};

/// A single line of text placed on the canvas. `baseline` is the y coordinate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedLine {
    pub x: u32,
    pub baseline: u32,
    pub text: String,
}

/// Fixed-size drawing surface: white background, black monospace text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
    pub font_family: String,
    pub font_size: u32,
    pub lines: Vec<PlacedLine>,
}

impl Canvas {
    /// Places every line of `text` at a fixed vertical step.
    pub fn layout(text: &str, config: &ImageConfig) -> Self {
        let lines = text
            .split('\n')
            .enumerate()
            .map(|(idx, line)| {
                let idx = u32::try_from(idx).unwrap_or(u32::MAX);
                PlacedLine {
                    x: config.x,
                    baseline: config
                        .first_baseline
                        .saturating_add(idx.saturating_mul(config.line_height)),
                    text: line.to_string(),
                }
            })
            .collect();

        Self {
            width: config.width,
            height: config.height,
            font_family: config.font_family.clone(),
            font_size: config.font_size,
            lines,
        }
    }

    /// The raw text, reassembled from the placed lines.
    pub fn text(&self) -> String {
        self.lines
            .iter()
            .map(|line| line.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Self-contained SVG document for the canvas, with XML-escaped text.
    pub fn to_svg(&self) -> String {
        let mut svg = format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\n\
             <rect width=\"{w}\" height=\"{h}\" fill=\"#ffffff\"/>\n",
            w = self.width,
            h = self.height,
        );
        for line in &self.lines {
            svg.push_str(&format!(
                "<text x=\"{}\" y=\"{}\" font-family=\"{}\" font-size=\"{}\" fill=\"#000000\" xml:space=\"preserve\">{}</text>\n",
                line.x,
                line.baseline,
                escape_xml(&self.font_family),
                self.font_size,
                escape_xml(&line.text),
            ));
        }
        svg.push_str("</svg>");
        svg
    }
}

fn escape_xml(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Backend that turns a laid-out canvas into a file.
pub trait Rasterizer {
    fn rasterize(&self, canvas: &Canvas, path: &Path) -> Result<()>;
}

/// Path used when no raster backend is available: `<path>.txt`.
pub fn fallback_path(path: &Path) -> PathBuf {
    let mut raw: OsString = path.as_os_str().to_owned();
    raw.push(".txt");
    PathBuf::from(raw)
}

/// Writes the canvas text to [`fallback_path`] instead of drawing it.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextFallback;

impl Rasterizer for TextFallback {
    fn rasterize(&self, canvas: &Canvas, path: &Path) -> Result<()> {
        let target = fallback_path(path);
        std::fs::write(&target, canvas.text())?;
        tracing::debug!(path = ?target, "wrote text fallback");
        Ok(())
    }
}

#[cfg(feature = "raster")]
pub use svg_backend::SvgRasterizer;

#[cfg(feature = "raster")]
mod svg_backend {
    use std::{path::Path, sync::Arc};

    use super::{Canvas, Rasterizer};
    use crate::{Result, TeatroError};

    /// Draws the canvas through `usvg`/`resvg` and encodes the pixels with `image`.
    #[derive(Clone)]
    pub struct SvgRasterizer {
        fontdb: Arc<usvg::fontdb::Database>,
    }

    impl SvgRasterizer {
        /// Creates a rasterizer backed by the fonts installed on the system.
        pub fn new() -> Self {
            let mut db = usvg::fontdb::Database::new();
            db.load_system_fonts();
            Self {
                fontdb: Arc::new(db),
            }
        }
    }

    impl Default for SvgRasterizer {
        fn default() -> Self {
            Self::new()
        }
    }

    impl std::fmt::Debug for SvgRasterizer {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.debug_struct("SvgRasterizer")
                .field("fonts", &self.fontdb.len())
                .finish()
        }
    }

    impl Rasterizer for SvgRasterizer {
        fn rasterize(&self, canvas: &Canvas, path: &Path) -> Result<()> {
            let opts = usvg::Options {
                fontdb: self.fontdb.clone(),
                ..Default::default()
            };
            let tree = usvg::Tree::from_str(&canvas.to_svg(), &opts)
                .map_err(|err| TeatroError::raster(format!("parse canvas svg: {err}")))?;

            let mut pixmap = resvg::tiny_skia::Pixmap::new(canvas.width, canvas.height)
                .ok_or_else(|| TeatroError::raster("failed to allocate canvas pixmap"))?;
            resvg::render(
                &tree,
                resvg::tiny_skia::Transform::identity(),
                &mut pixmap.as_mut(),
            );

            image::save_buffer_with_format(
                path,
                pixmap.data(),
                canvas.width,
                canvas.height,
                image::ColorType::Rgba8,
                image::ImageFormat::Png,
            )
            .map_err(|err| TeatroError::raster(format!("write png '{}': {err}", path.display())))?;

            tracing::debug!(?path, "wrote png");
            Ok(())
        }
    }
}

/// Lays out a node's text on a canvas and hands it to a [`Rasterizer`].
pub struct ImageRenderer {
    config: ImageConfig,
    rasterizer: Box<dyn Rasterizer>,
}

impl ImageRenderer {
    pub fn new(config: ImageConfig, rasterizer: impl Rasterizer + 'static) -> Self {
        Self {
            config,
            rasterizer: Box::new(rasterizer),
        }
    }

    /// Uses the best backend compiled into the crate.
    pub fn with_config(config: ImageConfig) -> Self {
        #[cfg(feature = "raster")]
        {
            Self::new(config, SvgRasterizer::new())
        }
        #[cfg(not(feature = "raster"))]
        {
            Self::new(config, TextFallback)
        }
    }

    /// Always writes `<path>.txt`, regardless of enabled features.
    pub fn text_fallback() -> Self {
        Self::new(ImageConfig::default(), TextFallback)
    }

    pub fn config(&self) -> &ImageConfig {
        &self.config
    }

    /// Path written when the caller has no preference.
    pub fn default_output(&self) -> &Path {
        &self.config.default_output
    }

    pub fn canvas(&self, node: &dyn Renderable) -> Canvas {
        Canvas::layout(&node.render(), &self.config)
    }

    /// Best-effort rendering: failures are discarded.
    pub fn render_to_png(&self, node: &dyn Renderable, path: &Path) {
        let _ = self.try_render_to_png(node, path);
    }

    pub fn try_render_to_png(&self, node: &dyn Renderable, path: &Path) -> Result<()> {
        let canvas = self.canvas(node);
        self.rasterizer.rasterize(&canvas, path)
    }
}

impl Default for ImageRenderer {
    fn default() -> Self {
        Self::with_config(ImageConfig::default())
    }
}

impl fmt::Debug for ImageRenderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageRenderer")
            .field("config", &self.config)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use super::*;
    use crate::{Stage, TeatroError, Text, VStack};

    #[derive(Clone, Default)]
    struct Capture {
        canvases: Rc<RefCell<Vec<(Canvas, PathBuf)>>>,
    }

    impl Rasterizer for Capture {
        fn rasterize(&self, canvas: &Canvas, path: &Path) -> Result<()> {
            self.canvases
                .borrow_mut()
                .push((canvas.clone(), path.to_path_buf()));
            Ok(())
        }
    }

    struct Broken;

    impl Rasterizer for Broken {
        fn rasterize(&self, _canvas: &Canvas, _path: &Path) -> Result<()> {
            Err(TeatroError::raster("no backend"))
        }
    }

    fn sample() -> VStack {
        VStack::new().child(Text::new("first")).child(Text::bold("second"))
    }

    #[test]
    fn lays_out_lines_from_first_baseline() {
        let canvas = Canvas::layout("a\nb\nc", &ImageConfig::default());

        assert_eq!((canvas.width, canvas.height), (800, 600));
        let baselines: Vec<u32> = canvas.lines.iter().map(|line| line.baseline).collect();
        assert_eq!(baselines, [30, 50, 70]);
        assert!(canvas.lines.iter().all(|line| line.x == 10));
        assert_eq!(canvas.text(), "a\nb\nc");
    }

    #[test]
    fn baselines_saturate_for_oversized_line_height() {
        let config = ImageConfig {
            line_height: u32::MAX / 2,
            ..ImageConfig::default()
        };
        let canvas = Canvas::layout("a\nb\nc", &config);

        let baselines: Vec<u32> = canvas.lines.iter().map(|line| line.baseline).collect();
        assert_eq!(baselines, [30, 30 + u32::MAX / 2, u32::MAX]);
        assert_eq!(canvas.text(), "a\nb\nc");
    }

    #[test]
    fn canvas_svg_escapes_text_and_paints_background() {
        let canvas = Canvas::layout("<b> & co", &ImageConfig::default());
        let svg = canvas.to_svg();

        assert!(svg.contains("fill=\"#ffffff\""));
        assert!(svg.contains("&lt;b&gt; &amp; co"));
        assert!(svg.contains("font-size=\"16\""));
    }

    #[test]
    fn hands_canvas_to_rasterizer() {
        let capture = Capture::default();
        let renderer = ImageRenderer::new(ImageConfig::default(), capture.clone());

        renderer
            .try_render_to_png(&sample(), Path::new("frame.png"))
            .unwrap();

        let calls = capture.canvases.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0.text(), "first\n**second**");
        assert_eq!(calls[0].1, PathBuf::from("frame.png"));
    }

    #[test]
    fn fallback_writes_sibling_text_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("output.png");

        ImageRenderer::text_fallback().render_to_png(&Stage::new("Demo", sample()), &path);

        let written = std::fs::read_to_string(dir.path().join("output.png.txt")).unwrap();
        assert_eq!(written, "[Stage: Demo]\nfirst\n**second**");
        assert!(!path.exists());
    }

    #[test]
    fn best_effort_render_swallows_failures() {
        let renderer = ImageRenderer::new(ImageConfig::default(), Broken);
        assert!(renderer
            .try_render_to_png(&sample(), Path::new("x.png"))
            .is_err());

        renderer.render_to_png(&sample(), Path::new("x.png"));
    }

    #[test]
    fn fallback_into_missing_directory_is_silent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.png");

        ImageRenderer::text_fallback().render_to_png(&sample(), &path);
        assert!(!fallback_path(&path).exists());
    }

    #[test]
    fn default_output_is_output_png() {
        assert_eq!(
            ImageRenderer::text_fallback().default_output(),
            Path::new("output.png")
        );
    }

    #[cfg(feature = "raster")]
    #[test]
    fn rasterizes_png_with_canvas_dimensions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stage.png");

        ImageRenderer::default()
            .try_render_to_png(&Stage::new("Demo", sample()), &path)
            .expect("png should be written");

        let img = image::open(&path).unwrap();
        assert_eq!((img.width(), img.height()), (800, 600));
        let corner = img.to_rgba8().get_pixel(799, 599).0;
        assert_eq!(corner, [255, 255, 255, 255]);
    }
}
