//! Core library for the Teatro composition engine.
//!
//! Applications build an immutable tree of [`Node`]s (stacks, text, icons,
//! screenplay scenes, scores) and hand the root to one of the renderers. Every
//! renderer asks the root for its line text through [`Renderable`] and reshapes
//! it for its target: HTML, SVG, a PNG canvas or the debug preview.
//!
//! Side effects are confined to [`ImageRenderer`], [`Animator`] and
//! [`Score::render_to_pdf`], each of which talks to its backend through a
//! small strategy trait so the rest of the crate stays pure.

pub mod animation;
pub mod config;
pub mod error;
pub mod fountain;
pub mod layout;
pub mod raster;
pub mod render;
pub mod score;
pub mod view;

pub use animation::Animator;
pub use config::{AnimationConfig, ImageConfig, ScoreConfig, SvgConfig, TeatroConfig};
pub use error::{Result, TeatroError};
pub use fountain::{FountainElement, FountainScene};
pub use layout::{HStack, Icon, Stage, Text, VStack, ICON_MARKER};
#[cfg(feature = "raster")]
pub use raster::SvgRasterizer;
pub use raster::{Canvas, ImageRenderer, PlacedLine, Rasterizer, TextFallback};
pub use render::{CodexPreviewer, HtmlRenderer, RenderTarget, SvgRenderer};
pub use score::{LilyPond, Score, Typesetter};
pub use view::{Alignment, Node, Renderable, TextStyle};
