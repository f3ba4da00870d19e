//! Markdown and MDX parser using markdown-rs (wooorm/markdown-rs).
//!
//! The mdast produced by `markdown` is converted into arena-allocated
//! [`SyntaxNode`]s. Offsets come from mdast positions; line/column pairs are
//! recomputed with a [`LineIndex`] so that columns count characters.

use markdown::mdast::Node;
use markdown::{Constructs, ParseOptions, to_mdast};

use doclint_ast::{
    AstArena, LineIndex, LinkData, Location, NodeData, NodeType, ReferenceData, Span, SyntaxNode,
};

use crate::{ParseError, Parser};

/// Syntax flavor accepted by a [`MarkdownParser`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flavor {
    /// CommonMark + GFM + frontmatter + math.
    Gfm,
    /// MDX: CommonMark + GFM + frontmatter + math + JSX and expressions.
    Mdx,
}

/// Markdown parser implementation.
pub struct MarkdownParser {
    flavor: Flavor,
}

impl MarkdownParser {
    /// Creates a parser for plain Markdown files.
    pub fn gfm() -> Self {
        Self {
            flavor: Flavor::Gfm,
        }
    }

    /// Creates a parser for MDX files.
    pub fn mdx() -> Self {
        Self {
            flavor: Flavor::Mdx,
        }
    }

    /// Returns the flavor of this parser.
    pub fn flavor(&self) -> Flavor {
        self.flavor
    }

    fn options(&self) -> ParseOptions {
        match self.flavor {
            Flavor::Gfm => ParseOptions {
                constructs: Constructs {
                    frontmatter: true,
                    math_flow: true,
                    math_text: true,
                    ..Constructs::gfm()
                },
                ..ParseOptions::gfm()
            },
            Flavor::Mdx => ParseOptions {
                constructs: Constructs {
                    frontmatter: true,
                    math_flow: true,
                    math_text: true,
                    gfm_autolink_literal: true,
                    gfm_footnote_definition: true,
                    gfm_label_start_footnote: true,
                    gfm_strikethrough: true,
                    gfm_table: true,
                    gfm_task_list_item: true,
                    ..Constructs::mdx()
                },
                ..ParseOptions::mdx()
            },
        }
    }

    /// Converts an mdast node and its subtree.
    fn convert_node<'a>(
        &self,
        arena: &'a AstArena,
        node: &Node,
        lines: &LineIndex<'_>,
    ) -> SyntaxNode<'a> {
        let (node_type, value, data) = classify(arena, node);
        let (span, loc) = node_position(node, lines);
        let children = match node.children() {
            Some(children) => self.convert_children(arena, children, lines),
            None => &[],
        };

        SyntaxNode {
            node_type,
            span,
            loc,
            children,
            value,
            data,
        }
    }

    fn convert_children<'a>(
        &self,
        arena: &'a AstArena,
        children: &[Node],
        lines: &LineIndex<'_>,
    ) -> &'a [SyntaxNode<'a>] {
        arena.alloc_slice_fill_iter(
            children
                .iter()
                .map(|child| self.convert_node(arena, child, lines)),
        )
    }
}

impl Default for MarkdownParser {
    fn default() -> Self {
        Self::mdx()
    }
}

impl Parser for MarkdownParser {
    fn name(&self) -> &str {
        match self.flavor {
            Flavor::Gfm => "markdown",
            Flavor::Mdx => "mdx",
        }
    }

    fn extensions(&self) -> &[&str] {
        match self.flavor {
            Flavor::Gfm => &["md", "markdown", "mdown", "mkdn", "mkd"],
            Flavor::Mdx => &["mdx"],
        }
    }

    fn parse<'a>(&self, arena: &'a AstArena, source: &str) -> Result<SyntaxNode<'a>, ParseError> {
        if u32::try_from(source.len()).is_err() {
            return Err(ParseError::TooLarge(source.len()));
        }

        let mdast =
            to_mdast(source, &self.options()).map_err(|e| ParseError::invalid_source(e.to_string()))?;

        let lines = LineIndex::new(source);
        Ok(self.convert_node(arena, &mdast, &lines))
    }
}

/// Maps an mdast node to its type, literal value and extra data.
fn classify<'a>(arena: &'a AstArena, node: &Node) -> (NodeType, Option<&'a str>, NodeData<'a>) {
    let text = move |s: &str| Some(&*arena.alloc_str(s));
    let opt = move |s: &Option<String>| s.as_deref().map(|v| &*arena.alloc_str(v));

    match node {
        Node::Root(_) => (NodeType::Root, None, NodeData::None),
        Node::Paragraph(_) => (NodeType::Paragraph, None, NodeData::None),
        Node::Heading(heading) => (NodeType::Heading, None, NodeData::Heading(heading.depth)),
        Node::Blockquote(_) => (NodeType::Blockquote, None, NodeData::None),
        Node::List(list) => (NodeType::List, None, NodeData::List(list.ordered)),
        Node::ListItem(_) => (NodeType::ListItem, None, NodeData::None),
        Node::Code(code) => (NodeType::Code, text(&code.value), NodeData::Code(opt(&code.lang))),
        Node::ThematicBreak(_) => (NodeType::ThematicBreak, None, NodeData::None),
        Node::Html(html) => (NodeType::Html, text(&html.value), NodeData::None),
        Node::Math(math) => (NodeType::Math, text(&math.value), NodeData::None),
        Node::Yaml(yaml) => (NodeType::Yaml, text(&yaml.value), NodeData::None),
        Node::Toml(toml) => (NodeType::Toml, text(&toml.value), NodeData::None),

        Node::Text(t) => (NodeType::Text, text(&t.value), NodeData::None),
        Node::Break(_) => (NodeType::Break, None, NodeData::None),
        Node::Emphasis(_) => (NodeType::Emphasis, None, NodeData::None),
        Node::Strong(_) => (NodeType::Strong, None, NodeData::None),
        Node::Delete(_) => (NodeType::Delete, None, NodeData::None),
        Node::InlineCode(code) => (NodeType::InlineCode, text(&code.value), NodeData::None),
        Node::InlineMath(math) => (NodeType::InlineMath, text(&math.value), NodeData::None),
        Node::Link(link) => (
            NodeType::Link,
            None,
            NodeData::Link(LinkData {
                url: arena.alloc_str(&link.url),
                title: opt(&link.title),
            }),
        ),
        Node::Image(image) => (
            NodeType::Image,
            None,
            NodeData::Link(LinkData {
                url: arena.alloc_str(&image.url),
                title: opt(&image.title),
            }),
        ),

        Node::LinkReference(r) => (
            NodeType::LinkReference,
            None,
            reference(arena, &r.identifier, &r.label),
        ),
        Node::ImageReference(r) => (
            NodeType::ImageReference,
            None,
            reference(arena, &r.identifier, &r.label),
        ),
        Node::Definition(d) => (
            NodeType::Definition,
            None,
            reference(arena, &d.identifier, &d.label),
        ),
        Node::FootnoteDefinition(d) => (
            NodeType::FootnoteDefinition,
            None,
            reference(arena, &d.identifier, &d.label),
        ),
        Node::FootnoteReference(r) => (
            NodeType::FootnoteReference,
            None,
            reference(arena, &r.identifier, &r.label),
        ),

        Node::Table(_) => (NodeType::Table, None, NodeData::None),
        Node::TableRow(_) => (NodeType::TableRow, None, NodeData::None),
        Node::TableCell(_) => (NodeType::TableCell, None, NodeData::None),

        Node::MdxjsEsm(esm) => (NodeType::MdxjsEsm, text(&esm.value), NodeData::None),
        Node::MdxJsxFlowElement(el) => (
            NodeType::MdxJsxFlowElement,
            None,
            NodeData::Jsx(opt(&el.name)),
        ),
        Node::MdxJsxTextElement(el) => (
            NodeType::MdxJsxTextElement,
            None,
            NodeData::Jsx(opt(&el.name)),
        ),
        Node::MdxFlowExpression(expr) => {
            (NodeType::MdxFlowExpression, text(&expr.value), NodeData::None)
        }
        Node::MdxTextExpression(expr) => {
            (NodeType::MdxTextExpression, text(&expr.value), NodeData::None)
        }
    }
}

fn reference<'a>(arena: &'a AstArena, identifier: &str, label: &Option<String>) -> NodeData<'a> {
    NodeData::Reference(ReferenceData {
        identifier: arena.alloc_str(identifier),
        label: label.as_deref().map(|l| &*arena.alloc_str(l)),
    })
}

/// Gets the byte span and line/column location of an mdast node.
fn node_position(node: &Node, lines: &LineIndex<'_>) -> (Span, Location) {
    let (start, end) = match node.position() {
        Some(pos) => (pos.start.offset, pos.end.offset),
        None => (0, 0),
    };
    let span = Span::new(start as u32, end as u32);
    let loc = Location::new(lines.position(start), lines.position(end));
    (span, loc)
}
