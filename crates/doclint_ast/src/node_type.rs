//! Node type definitions.
//!
//! Names follow mdast, including the MDX extension node types, and are
//! what reports and `doclint rules` print.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The kind of a [`SyntaxNode`](crate::SyntaxNode).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub enum NodeType {
    // Document structure
    /// Root document node.
    Root,

    // Block elements
    /// Paragraph containing inline content.
    Paragraph,
    /// ATX or setext heading (H1-H6).
    Heading,
    /// Block quote.
    Blockquote,
    /// Ordered or unordered list.
    List,
    /// Item in a list.
    ListItem,
    /// Fenced or indented code block.
    Code,
    /// Thematic break (`---`).
    ThematicBreak,
    /// Raw HTML.
    Html,
    /// Display math block.
    Math,
    /// YAML frontmatter.
    Yaml,
    /// TOML frontmatter.
    Toml,

    // Inline elements
    /// Plain text.
    Text,
    /// Hard line break.
    Break,
    /// Emphasis (italic).
    Emphasis,
    /// Strong emphasis (bold).
    Strong,
    /// Strikethrough text (GFM).
    Delete,
    /// Inline code.
    InlineCode,
    /// Inline math.
    InlineMath,
    /// Hyperlink.
    Link,
    /// Image.
    Image,

    // References
    /// Link reference.
    LinkReference,
    /// Image reference.
    ImageReference,
    /// Reference definition.
    Definition,
    /// Footnote definition (GFM).
    FootnoteDefinition,
    /// Footnote reference (GFM).
    FootnoteReference,

    // Tables (GFM)
    /// Table.
    Table,
    /// Table row.
    TableRow,
    /// Table cell.
    TableCell,

    // MDX
    /// ESM `import`/`export` block.
    MdxjsEsm,
    /// Block-level JSX element.
    MdxJsxFlowElement,
    /// Inline JSX element.
    MdxJsxTextElement,
    /// Block-level `{expression}`.
    MdxFlowExpression,
    /// Inline `{expression}`.
    MdxTextExpression,
}

impl NodeType {
    /// Returns the mdast name of this node type.
    pub const fn as_str(&self) -> &'static str {
        match self {
            NodeType::Root => "root",
            NodeType::Paragraph => "paragraph",
            NodeType::Heading => "heading",
            NodeType::Blockquote => "blockquote",
            NodeType::List => "list",
            NodeType::ListItem => "listItem",
            NodeType::Code => "code",
            NodeType::ThematicBreak => "thematicBreak",
            NodeType::Html => "html",
            NodeType::Math => "math",
            NodeType::Yaml => "yaml",
            NodeType::Toml => "toml",
            NodeType::Text => "text",
            NodeType::Break => "break",
            NodeType::Emphasis => "emphasis",
            NodeType::Strong => "strong",
            NodeType::Delete => "delete",
            NodeType::InlineCode => "inlineCode",
            NodeType::InlineMath => "inlineMath",
            NodeType::Link => "link",
            NodeType::Image => "image",
            NodeType::LinkReference => "linkReference",
            NodeType::ImageReference => "imageReference",
            NodeType::Definition => "definition",
            NodeType::FootnoteDefinition => "footnoteDefinition",
            NodeType::FootnoteReference => "footnoteReference",
            NodeType::Table => "table",
            NodeType::TableRow => "tableRow",
            NodeType::TableCell => "tableCell",
            NodeType::MdxjsEsm => "mdxjsEsm",
            NodeType::MdxJsxFlowElement => "mdxJsxFlowElement",
            NodeType::MdxJsxTextElement => "mdxJsxTextElement",
            NodeType::MdxFlowExpression => "mdxFlowExpression",
            NodeType::MdxTextExpression => "mdxTextExpression",
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
