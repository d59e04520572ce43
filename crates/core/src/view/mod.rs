use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    fountain::{FountainElement, FountainScene},
    layout::{HStack, Icon, Stage, Text, VStack},
    score::Score,
    TeatroError,
};

/// The single capability shared by every composable element.
///
/// `render` produces a line-oriented text representation that may contain
/// embedded `\n` characters. It must be deterministic and side-effect free.
pub trait Renderable {
    fn render(&self) -> String;

    /// Name of the declared node kind, used by the preview renderer.
    fn kind(&self) -> &'static str;
}

impl<T: Renderable + ?Sized> Renderable for &T {
    fn render(&self) -> String {
        (**self).render()
    }

    fn kind(&self) -> &'static str {
        (**self).kind()
    }
}

impl<T: Renderable + ?Sized> Renderable for Box<T> {
    fn render(&self) -> String {
        (**self).render()
    }

    fn kind(&self) -> &'static str {
        (**self).kind()
    }
}

/// Horizontal alignment recorded on stacks.
///
/// Alignment is metadata only: it round-trips through construction and
/// serialization but does not change rendered output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Alignment {
    #[default]
    #[serde(rename = "left")]
    Leading,
    #[serde(rename = "center")]
    Center,
    #[serde(rename = "right")]
    Trailing,
}

impl Alignment {
    pub fn as_str(self) -> &'static str {
        match self {
            Alignment::Leading => "left",
            Alignment::Center => "center",
            Alignment::Trailing => "right",
        }
    }
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Alignment {
    type Err = TeatroError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" => Ok(Alignment::Leading),
            "center" => Ok(Alignment::Center),
            "right" => Ok(Alignment::Trailing),
            other => Err(TeatroError::msg(format!("unknown alignment `{other}`"))),
        }
    }
}

/// Inline style applied to a [`Text`] leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextStyle {
    Bold,
    Italic,
    Underline,
    #[default]
    Plain,
}

impl TextStyle {
    /// Wraps `content` in the markers for this style.
    pub fn apply(self, content: &str) -> String {
        match self {
            TextStyle::Bold => format!("**{content}**"),
            TextStyle::Italic => format!("*{content}*"),
            TextStyle::Underline => format!("_{content}_"),
            TextStyle::Plain => content.to_string(),
        }
    }
}

/// Closed set of node kinds that can appear in a composition tree.
///
/// Containers own their children exclusively; there are no parent links, so a
/// tree can never contain a cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Node {
    Text(Text),
    Icon(Icon),
    VStack(VStack),
    HStack(HStack),
    Stage(Stage),
    Fountain(FountainElement),
    Scene(FountainScene),
    Score(Score),
}

impl Node {
    /// Decodes a node tree from its JSON representation.
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl Renderable for Node {
    fn render(&self) -> String {
        match self {
            Node::Text(node) => node.render(),
            Node::Icon(node) => node.render(),
            Node::VStack(node) => node.render(),
            Node::HStack(node) => node.render(),
            Node::Stage(node) => node.render(),
            Node::Fountain(node) => node.render(),
            Node::Scene(node) => node.render(),
            Node::Score(node) => node.render(),
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Node::Text(node) => node.kind(),
            Node::Icon(node) => node.kind(),
            Node::VStack(node) => node.kind(),
            Node::HStack(node) => node.kind(),
            Node::Stage(node) => node.kind(),
            Node::Fountain(node) => node.kind(),
            Node::Scene(node) => node.kind(),
            Node::Score(node) => node.kind(),
        }
    }
}

macro_rules! impl_into_node {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Node {
                fn from(value: $ty) -> Self {
                    Node::$variant(value)
                }
            }
        )*
    };
}

impl_into_node! {
    Text => Text,
    Icon => Icon,
    VStack => VStack,
    HStack => HStack,
    Stage => Stage,
    FountainElement => Fountain,
    FountainScene => Scene,
    Score => Score,
}
