use std::path::{Path, PathBuf};

use clap::Parser;
use teatro_core::{
    Alignment, CodexPreviewer, FountainScene, HtmlRenderer, Icon, ImageRenderer, Node,
    RenderTarget, Stage, SvgRenderer, TeatroConfig, Text, VStack,
};
use tracing_subscriber::EnvFilter;

fn main() -> teatro_core::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => TeatroConfig::load(path)?,
        None => TeatroConfig::default(),
    };

    let view = load_view(&cli)?;
    let target = RenderTarget::parse_lenient(cli.target.as_deref().unwrap_or_default());
    tracing::debug!(%target, "selected render target");

    match target {
        RenderTarget::Html => println!("{}", HtmlRenderer::render(&view)),
        RenderTarget::Svg => println!("{}", SvgRenderer::new(config.svg).render(&view)),
        RenderTarget::Png => render_png(&view, config, cli.output.as_deref()),
        RenderTarget::CodexPreview => println!("{}", CodexPreviewer::preview(&view)),
    }

    Ok(())
}

fn render_png(view: &Node, config: TeatroConfig, output: Option<&Path>) {
    let renderer = ImageRenderer::with_config(config.image);
    let path = output.unwrap_or(renderer.default_output()).to_path_buf();

    match renderer.try_render_to_png(view, &path) {
        Ok(()) => tracing::info!(?path, "rendered image"),
        Err(err) => tracing::warn!(?path, %err, "image rendering failed"),
    }
}

fn load_view(cli: &Cli) -> teatro_core::Result<Node> {
    if let Some(path) = &cli.scene {
        tracing::info!(?path, "loading node tree");
        return Node::from_json(&std::fs::read_to_string(path)?);
    }

    if let Some(path) = &cli.fountain {
        tracing::info!(?path, "parsing screenplay");
        let scene = FountainScene::from_text(&std::fs::read_to_string(path)?);
        return Ok(Stage::new(display_title(path), scene).into());
    }

    Ok(demo_stage())
}

fn demo_stage() -> Node {
    Stage::new(
        "CLI Demo",
        VStack::new()
            .alignment(Alignment::Center)
            .padding(2)
            .child(Icon::new("🎭"))
            .child(Text::bold("CLI Renderer")),
    )
    .into()
}

fn display_title(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Render a Teatro view to text, HTML, SVG or PNG", long_about = None)]
struct Cli {
    /// Output target: html, svg, png or codex-preview. Unknown values fall back to codex-preview.
    target: Option<String>,
    /// Image path for the png target.
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// JSON configuration file overriding renderer defaults.
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Render a Fountain screenplay file instead of the demo stage.
    #[arg(long, conflicts_with = "scene")]
    fountain: Option<PathBuf>,
    /// Render a node tree described in JSON.
    #[arg(long)]
    scene: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use teatro_core::Renderable;

    #[test]
    fn demo_stage_matches_reference_layout() {
        assert_eq!(
            demo_stage().render(),
            "[Stage: CLI Demo]\n  \u{25C9} 🎭\n  **CLI Renderer**"
        );
    }

    #[test]
    fn target_argument_is_optional() {
        let cli = Cli::try_parse_from(["teatro"]).unwrap();
        assert!(cli.target.is_none());

        let cli = Cli::try_parse_from(["teatro", "svg", "--output", "x.png"]).unwrap();
        assert_eq!(cli.target.as_deref(), Some("svg"));
        assert_eq!(cli.output, Some(PathBuf::from("x.png")));
    }

    #[test]
    fn fountain_and_scene_conflict() {
        assert!(Cli::try_parse_from(["teatro", "--fountain", "a", "--scene", "b"]).is_err());
    }

    #[test]
    fn screenplay_stage_is_titled_after_file() {
        assert_eq!(display_title(Path::new("scripts/pilot.fountain")), "pilot");
    }
}
