use serde::{Deserialize, Serialize};

use crate::{Alignment, Node, Renderable, TextStyle};

/// Glyph rendered in front of every icon symbol.
pub const ICON_MARKER: char = '\u{25C9}';

/// Styled text leaf.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Text {
    pub content: String,
    #[serde(default)]
    pub style: TextStyle,
}

impl Text {
    pub fn new(content: impl Into<String>) -> Self {
        Self::styled(content, TextStyle::Plain)
    }

    pub fn styled(content: impl Into<String>, style: TextStyle) -> Self {
        Self {
            content: content.into(),
            style,
        }
    }

    pub fn bold(content: impl Into<String>) -> Self {
        Self::styled(content, TextStyle::Bold)
    }

    pub fn italic(content: impl Into<String>) -> Self {
        Self::styled(content, TextStyle::Italic)
    }

    pub fn underline(content: impl Into<String>) -> Self {
        Self::styled(content, TextStyle::Underline)
    }
}

impl Renderable for Text {
    fn render(&self) -> String {
        self.style.apply(&self.content)
    }

    fn kind(&self) -> &'static str {
        "Text"
    }
}

/// Symbol leaf rendered as `◉ <symbol>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Icon {
    pub symbol: String,
}

impl Icon {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
        }
    }
}

impl Renderable for Icon {
    fn render(&self) -> String {
        format!("{ICON_MARKER} {}", self.symbol)
    }

    fn kind(&self) -> &'static str {
        "Icon"
    }
}

/// Vertical container.
///
/// Each child is rendered in insertion order and prefixed once with `padding`
/// spaces. Lines inside a multi-line child are not re-indented.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct VStack {
    #[serde(default)]
    pub alignment: Alignment,
    #[serde(default)]
    pub padding: usize,
    #[serde(default)]
    pub children: Vec<Node>,
}

impl VStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn padding(mut self, padding: usize) -> Self {
        self.padding = padding;
        self
    }

    pub fn child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn children<I>(mut self, children: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Node>,
    {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }
}

impl Renderable for VStack {
    fn render(&self) -> String {
        let indent = " ".repeat(self.padding);
        self.children
            .iter()
            .map(|child| format!("{indent}{}", child.render()))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn kind(&self) -> &'static str {
        "VStack"
    }
}

/// Horizontal container.
///
/// Children are joined with a single space and the padding is applied once in
/// front of the whole line.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HStack {
    #[serde(default)]
    pub alignment: Alignment,
    #[serde(default)]
    pub padding: usize,
    #[serde(default)]
    pub children: Vec<Node>,
}

impl HStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn padding(mut self, padding: usize) -> Self {
        self.padding = padding;
        self
    }

    pub fn child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn children<I>(mut self, children: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Node>,
    {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }
}

impl Renderable for HStack {
    fn render(&self) -> String {
        if self.children.is_empty() {
            return String::new();
        }

        let joined = self
            .children
            .iter()
            .map(Renderable::render)
            .collect::<Vec<_>>()
            .join(" ");
        format!("{}{joined}", " ".repeat(self.padding))
    }

    fn kind(&self) -> &'static str {
        "HStack"
    }
}

/// Titled container holding exactly one child.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stage {
    title: String,
    content: Box<Node>,
}

impl Stage {
    pub fn new(title: impl Into<String>, content: impl Into<Node>) -> Self {
        Self {
            title: title.into(),
            content: Box::new(content.into()),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &Node {
        &self.content
    }
}

impl Renderable for Stage {
    fn render(&self) -> String {
        format!("[Stage: {}]\n{}", self.title, self.content.render())
    }

    fn kind(&self) -> &'static str {
        "Stage"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FountainScene;

    #[test]
    fn renders_styled_text() {
        assert_eq!(Text::bold("Hello").render(), "**Hello**");
        assert_eq!(Text::italic("Hello").render(), "*Hello*");
        assert_eq!(Text::underline("Hello").render(), "_Hello_");
        assert_eq!(Text::new("Hello").render(), "Hello");
    }

    #[test]
    fn renders_icon_with_marker() {
        assert_eq!(Icon::new("🎭").render(), "\u{25C9} 🎭");
    }

    #[test]
    fn vstack_indents_each_child_once() {
        let stack = VStack::new()
            .alignment(Alignment::Leading)
            .padding(2)
            .child(Text::new("A"))
            .child(Text::italic("B"));

        assert_eq!(stack.render(), "  A\n  *B*");
    }

    #[test]
    fn vstack_does_not_reindent_multiline_children() {
        let inner = VStack::new().child(Text::new("x")).child(Text::new("y"));
        let stack = VStack::new().padding(1).child(inner).child(Text::new("z"));

        assert_eq!(stack.render(), " x\ny\n z");
    }

    #[test]
    fn hstack_pads_whole_line_once() {
        let stack = HStack::new()
            .padding(1)
            .children([Text::new("A"), Text::new("B")]);

        assert_eq!(stack.render(), " A B");
    }

    #[test]
    fn empty_stacks_render_empty() {
        assert_eq!(VStack::new().padding(4).render(), "");
        assert_eq!(HStack::new().padding(4).render(), "");
    }

    #[test]
    fn alignment_does_not_change_output() {
        let build = |alignment| {
            VStack::new()
                .alignment(alignment)
                .padding(1)
                .child(Text::new("same"))
                .render()
        };

        assert_eq!(build(Alignment::Leading), build(Alignment::Center));
        assert_eq!(build(Alignment::Center), build(Alignment::Trailing));
    }

    #[test]
    fn stage_renders_header_then_content() {
        let stage = Stage::new(
            "CLI Demo",
            VStack::new()
                .alignment(Alignment::Center)
                .padding(2)
                .child(Icon::new("🎭"))
                .child(Text::bold("CLI Renderer")),
        );

        assert_eq!(stage.title(), "CLI Demo");
        assert_eq!(stage.content().kind(), "VStack");
        assert_eq!(
            stage.render(),
            "[Stage: CLI Demo]\n  \u{25C9} 🎭\n  **CLI Renderer**"
        );
    }

    #[test]
    fn stacks_compose_screenplay_nodes() {
        let scene = FountainScene::from_text("INT. LAB - NIGHT\nROBOT");
        let stack = VStack::new().padding(1).child(scene);

        assert_eq!(stack.render(), " # INT. LAB - NIGHT\n\nROBOT");
    }
}
