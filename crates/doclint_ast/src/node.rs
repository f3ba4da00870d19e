//! SyntaxNode definition.

use crate::{Location, NodeType, Span};

/// A node in the document syntax tree.
///
/// Nodes are `Copy` and borrow their children and string values from the
/// [`AstArena`](crate::AstArena) they were allocated in.
#[derive(Debug, Clone, Copy)]
pub struct SyntaxNode<'a> {
    /// The type of this node.
    pub node_type: NodeType,

    /// Byte span in the source text.
    pub span: Span,

    /// Line/column location in the source text.
    pub loc: Location,

    /// Child nodes (for parent nodes).
    pub children: &'a [SyntaxNode<'a>],

    /// Literal value (for text, code, html and expression nodes).
    pub value: Option<&'a str>,

    /// Additional node-specific data.
    pub data: NodeData<'a>,
}

/// Type-specific data attached to a node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NodeData<'a> {
    #[default]
    None,
    /// Heading depth (1-6).
    Heading(u8),
    /// Whether a list is ordered.
    List(bool),
    /// Info-string language of a code block.
    Code(Option<&'a str>),
    /// Link or image destination.
    Link(LinkData<'a>),
    /// Reference identifier of a definition, reference or footnote.
    Reference(ReferenceData<'a>),
    /// Element name of a JSX node (`None` for fragments).
    Jsx(Option<&'a str>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkData<'a> {
    pub url: &'a str,
    pub title: Option<&'a str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferenceData<'a> {
    pub identifier: &'a str,
    pub label: Option<&'a str>,
}
