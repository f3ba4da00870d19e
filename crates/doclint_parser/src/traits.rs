//! Parser trait definition.

use doclint_ast::{AstArena, SyntaxNode};

use crate::{MarkdownParser, ParseError};

/// Trait for parsing source text into a syntax tree.
///
/// # Example
///
/// ```rust,ignore
/// use doclint_parser::Parser;
/// use doclint_ast::{AstArena, SyntaxNode};
///
/// struct MyParser;
///
/// impl Parser for MyParser {
///     fn name(&self) -> &str {
///         "my-parser"
///     }
///
///     fn extensions(&self) -> &[&str] {
///         &["myext"]
///     }
///
///     fn parse<'a>(&self, arena: &'a AstArena, source: &str) -> Result<SyntaxNode<'a>, ParseError> {
///         todo!()
///     }
/// }
/// ```
pub trait Parser {
    /// Returns the name of this parser.
    fn name(&self) -> &str;

    /// Returns the file extensions this parser handles, without the leading dot.
    fn extensions(&self) -> &[&str];

    /// Parses the source text into a tree rooted at a `root` node.
    fn parse<'a>(&self, arena: &'a AstArena, source: &str) -> Result<SyntaxNode<'a>, ParseError>;

    /// Returns true if this parser can handle the given file extension.
    fn can_parse(&self, extension: &str) -> bool {
        self.extensions()
            .iter()
            .any(|ext| ext.eq_ignore_ascii_case(extension))
    }
}

/// Selects the parser for a file extension.
///
/// `mdx` files get the MDX flavor; everything else is parsed as GFM.
pub fn parser_for_extension(extension: &str) -> Box<dyn Parser> {
    let mdx = MarkdownParser::mdx();

    if mdx.can_parse(extension) {
        Box::new(mdx)
    } else {
        Box::new(MarkdownParser::gfm())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("mdx", "mdx")]
    #[case("MDX", "mdx")]
    #[case("md", "markdown")]
    #[case("markdown", "markdown")]
    #[case("txt", "markdown")]
    fn test_parser_for_extension(#[case] extension: &str, #[case] expected: &str) {
        assert_eq!(parser_for_extension(extension).name(), expected);
    }
}
