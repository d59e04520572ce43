use std::{path::Path, process::Command};

use serde::{Deserialize, Serialize};

use crate::{config::ScoreConfig, Renderable, Result, TeatroError};

/// Produces a typeset artifact from a notation source file.
pub trait Typesetter {
    fn typeset(&self, output_name: &str, source: &Path) -> Result<()>;
}

/// Runs LilyPond through `/usr/bin/env` so the binary is resolved from `PATH`.
#[derive(Debug, Clone)]
pub struct LilyPond {
    program: String,
}

impl LilyPond {
    pub fn new() -> Self {
        Self::from_config(&ScoreConfig::default())
    }

    pub fn from_config(config: &ScoreConfig) -> Self {
        Self {
            program: config.program.clone(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl Default for LilyPond {
    fn default() -> Self {
        Self::new()
    }
}

impl Typesetter for LilyPond {
    fn typeset(&self, output_name: &str, source: &Path) -> Result<()> {
        tracing::debug!(program = %self.program, output_name, ?source, "launching typesetter");

        let status = Command::new("/usr/bin/env")
            .arg(&self.program)
            .arg("-o")
            .arg(output_name)
            .arg(source)
            .status()
            .map_err(|err| TeatroError::process(format!("failed to launch {}: {err}", self.program)))?;

        if status.success() {
            Ok(())
        } else {
            Err(TeatroError::process(format!(
                "{} exited with {status}",
                self.program
            )))
        }
    }
}

/// Music notation source passed through untouched when rendered as text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub content: String,
}

impl Score {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }

    /// Best-effort typesetting: any failure is discarded.
    pub fn render_to_pdf(&self, output_name: &str, typesetter: &dyn Typesetter) {
        let _ = self.try_render_to_pdf(output_name, typesetter);
    }

    /// Writes `<output_name>.ly` into a fresh temporary directory and hands it
    /// to `typesetter`. The directory is removed once the typesetter returns.
    pub fn try_render_to_pdf(&self, output_name: &str, typesetter: &dyn Typesetter) -> Result<()> {
        let workdir = tempfile::Builder::new().prefix("teatro-score-").tempdir()?;
        let source = workdir.path().join(format!("{output_name}.ly"));
        std::fs::write(&source, &self.content)?;
        tracing::debug!(?source, "wrote score source");
        typesetter.typeset(output_name, &source)
    }
}

impl Renderable for Score {
    fn render(&self) -> String {
        self.content.clone()
    }

    fn kind(&self) -> &'static str {
        "Score"
    }
}
