//! Minimal Fountain screenplay support.
//!
//! The classifier looks at one line at a time with no memory of the lines
//! before it. Rules are tried in a fixed order and the first match wins:
//!
//! 1. `INT`/`EXT` prefix: scene heading
//! 2. non-blank line equal to its upper-cased form: character cue
//! 3. `TO:` suffix: transition
//! 4. two-space or tab prefix: dialogue (trimmed)
//! 5. any other non-empty line: action
//!
//! Empty lines produce nothing.

use std::{convert::Infallible, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::Renderable;

/// One classified screenplay line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FountainElement {
    SceneHeading(String),
    CharacterCue(String),
    Dialogue(String),
    Action(String),
    Transition(String),
}

impl FountainElement {
    /// Text carried by the element, without any render decoration.
    pub fn text(&self) -> &str {
        match self {
            FountainElement::SceneHeading(text)
            | FountainElement::CharacterCue(text)
            | FountainElement::Dialogue(text)
            | FountainElement::Action(text)
            | FountainElement::Transition(text) => text,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            FountainElement::SceneHeading(_) => "scene_heading",
            FountainElement::CharacterCue(_) => "character_cue",
            FountainElement::Dialogue(_) => "dialogue",
            FountainElement::Action(_) => "action",
            FountainElement::Transition(_) => "transition",
        }
    }

    /// Classifies a single line. Returns `None` for lines that produce no element.
    pub fn classify(line: &str) -> Option<Self> {
        if line.starts_with("INT") || line.starts_with("EXT") {
            Some(FountainElement::SceneHeading(line.to_string()))
        } else if !line.trim().is_empty() && line.to_uppercase() == line {
            Some(FountainElement::CharacterCue(line.to_string()))
        } else if line.ends_with("TO:") {
            Some(FountainElement::Transition(line.to_string()))
        } else if line.starts_with("  ") || line.starts_with('\t') {
            Some(FountainElement::Dialogue(line.trim().to_string()))
        } else if !line.is_empty() {
            Some(FountainElement::Action(line.to_string()))
        } else {
            None
        }
    }
}

impl Renderable for FountainElement {
    fn render(&self) -> String {
        match self {
            FountainElement::SceneHeading(text) => format!("# {text}"),
            // Cues are upper-cased again at render time even though
            // classification already required an upper-case line.
            FountainElement::CharacterCue(text) => format!("\n{}", text.to_uppercase()),
            FountainElement::Dialogue(text) => format!("\t{text}"),
            FountainElement::Action(text) => text.clone(),
            FountainElement::Transition(text) => format!("{text} >>"),
        }
    }

    fn kind(&self) -> &'static str {
        "FountainElement"
    }
}

/// Splits `text` on `\n` and classifies every line in order.
pub fn parse(text: &str) -> Vec<FountainElement> {
    text.split('\n')
        .filter_map(FountainElement::classify)
        .collect()
}

/// Ordered sequence of screenplay elements built from raw text.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FountainScene {
    elements: Vec<FountainElement>,
}

impl FountainScene {
    pub fn new(elements: Vec<FountainElement>) -> Self {
        Self { elements }
    }

    pub fn from_text(text: &str) -> Self {
        Self::new(parse(text))
    }

    pub fn elements(&self) -> &[FountainElement] {
        &self.elements
    }
}

impl FromStr for FountainScene {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_text(s))
    }
}

impl Renderable for FountainScene {
    fn render(&self) -> String {
        self.elements
            .iter()
            .map(Renderable::render)
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn kind(&self) -> &'static str {
        "FountainScene"
    }
}
