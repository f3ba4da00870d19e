//! # doclint_ast
//!
//! Syntax tree definitions for doclint.
//!
//! Documents are parsed into a tree of [`SyntaxNode`]s whose types follow the
//! mdast vocabulary (`heading`, `paragraph`, `text`, MDX nodes, ...). Every
//! node carries both a byte [`Span`] and a 1-indexed line/column
//! [`Location`], so rules can report positions that a fixer can map back onto
//! the raw text.
//!
//! ## Architecture
//!
//! - Uses `bumpalo` for arena allocation
//! - All nodes for one file live in a single [`AstArena`]
//! - The arena is dropped as soon as the file has been linted

mod arena;
mod line_index;
mod node;
mod node_type;
mod span;

pub use arena::AstArena;
pub use line_index::LineIndex;
pub use node::{LinkData, NodeData, ReferenceData, SyntaxNode};
pub use node_type::NodeType;
pub use span::{Location, Position, Span};
