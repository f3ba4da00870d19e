//! # doclint_parser
//!
//! Parser abstraction layer for doclint.
//!
//! This crate provides:
//! - A `Parser` trait for turning source text into a `SyntaxNode` tree
//! - `MarkdownParser`, built on `markdown-rs`, in GFM and MDX flavors
//!
//! ## Example
//!
//! ```rust
//! use doclint_ast::{AstArena, NodeType};
//! use doclint_parser::{MarkdownParser, Parser};
//!
//! let arena = AstArena::new();
//! let parser = MarkdownParser::mdx();
//! let root = parser.parse(&arena, "# Hello\n\n<Note>Hi</Note>\n").unwrap();
//!
//! assert_eq!(root.children[0].node_type, NodeType::Heading);
//! assert_eq!(root.children[1].node_type, NodeType::MdxJsxFlowElement);
//! ```

mod error;
mod markdown;
mod traits;

pub use error::ParseError;
pub use markdown::{Flavor, MarkdownParser};
pub use traits::{Parser, parser_for_extension};
