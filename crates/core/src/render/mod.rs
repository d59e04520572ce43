//! Text-producing backends.
//!
//! Each renderer asks the root node for its line text and reshapes it for a
//! target format. Renderers hold only configuration, so every call is
//! independent of the ones before it.

use std::{fmt, str::FromStr};

use crate::{config::SvgConfig, Renderable, TeatroError};

/// Output formats selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderTarget {
    Html,
    Svg,
    Png,
    #[default]
    CodexPreview,
}

impl RenderTarget {
    pub const ALL: [RenderTarget; 4] = [
        RenderTarget::Html,
        RenderTarget::Svg,
        RenderTarget::Png,
        RenderTarget::CodexPreview,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RenderTarget::Html => "html",
            RenderTarget::Svg => "svg",
            RenderTarget::Png => "png",
            RenderTarget::CodexPreview => "codex-preview",
        }
    }

    /// Parses a target name, falling back to the preview for anything unknown.
    pub fn parse_lenient(name: &str) -> Self {
        name.parse().unwrap_or_default()
    }
}

impl fmt::Display for RenderTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RenderTarget {
    type Err = TeatroError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "html" => Ok(RenderTarget::Html),
            "svg" => Ok(RenderTarget::Svg),
            "png" => Ok(RenderTarget::Png),
            "codex-preview" | "codex" => Ok(RenderTarget::CodexPreview),
            other => Err(TeatroError::msg(format!("unknown render target `{other}`"))),
        }
    }
}

/// Wraps rendered text in a minimal HTML document.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlRenderer;

impl HtmlRenderer {
    pub fn render(node: &dyn Renderable) -> String {
        format!("<html><body><pre>\n{}\n</pre></body></html>", node.render())
    }
}

/// Emits one positioned `<text>` element per rendered line.
#[derive(Debug, Clone, Default)]
pub struct SvgRenderer {
    config: SvgConfig,
}

impl SvgRenderer {
    pub fn new(config: SvgConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SvgConfig {
        &self.config
    }

    pub fn render(&self, node: &dyn Renderable) -> String {
        let text = node.render();
        let lines: Vec<&str> = text.split('\n').collect();
        let SvgConfig {
            width,
            line_height,
            x,
            font_family,
            font_size,
        } = &self.config;

        let count = u32::try_from(lines.len()).unwrap_or(u32::MAX);
        let height = line_height.saturating_add(count.saturating_mul(*line_height));
        let body = lines
            .iter()
            .enumerate()
            .map(|(idx, line)| {
                let idx = u32::try_from(idx).unwrap_or(u32::MAX);
                let y = line_height.saturating_add(idx.saturating_mul(*line_height));
                format!(
                    "<text x=\"{x}\" y=\"{y}\" font-family=\"{font_family}\" font-size=\"{font_size}\">{line}</text>"
                )
            })
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\">\n{body}\n</svg>"
        )
    }
}

/// Debug format that names the root node kind above its rendered text.
#[derive(Debug, Clone, Copy, Default)]
pub struct CodexPreviewer;

impl CodexPreviewer {
    pub fn preview(node: &dyn Renderable) -> String {
        format!(
            "/// Codex Preview:\n///\n/// Source:\n/// {}\n///\n/// Output:\n{}",
            node.kind(),
            node.render()
        )
    }
}
