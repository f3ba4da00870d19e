//! `headings-sentence-case`: headings capitalize only their first word.
//!
//! A word keeps its capital letter when it
//!
//! - is the first word of the heading,
//! - follows a word ending in `.`, `!`, `?` or `:`,
//! - is part of an allow-list entry (proper nouns, acronyms), or
//! - has a capital after its first letter and `preserveMixedCase` is set.
//!
//! Inline code, math, JSX, expressions and images count as words but are
//! never changed.
//!
//! Words are split on whitespace only, so `Hello*World*` is a single word
//! and only its first letter is ever changed.

use serde::Deserialize;

use doclint_ast::{NodeType, SyntaxNode};

use crate::{Fix, LinterError, Rule, RuleContext, RuleError, Violation};

pub const RULE_ID: &str = "headings-sentence-case";

/// Terms every project is likely to capitalize.
pub const DEFAULT_ALLOW_LIST: &[&str] = &[
    "API",
    "APIs",
    "CLI",
    "CSS",
    "CSV",
    "DNS",
    "GitHub",
    "GraphQL",
    "HTML",
    "HTTP",
    "HTTPS",
    "I",
    "ID",
    "JavaScript",
    "JSON",
    "JWT",
    "Markdown",
    "MDX",
    "Node.js",
    "OAuth",
    "Postgres",
    "PostgreSQL",
    "React",
    "REST",
    "Rust",
    "SDK",
    "SQL",
    "SSO",
    "TypeScript",
    "UI",
    "URL",
    "UUID",
    "YAML",
];

/// Options accepted under `rules["headings-sentence-case"]`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SentenceCaseOptions {
    /// Extra terms that keep their capitalization. Entries may span words.
    #[serde(default)]
    pub allow_list: Vec<String>,

    /// Whether [`DEFAULT_ALLOW_LIST`] is merged into `allow_list`.
    #[serde(default = "default_true")]
    pub use_default_allow_list: bool,

    /// Keep words like `GraphQL` that have capitals past their first letter.
    #[serde(default)]
    pub preserve_mixed_case: bool,
}

fn default_true() -> bool {
    true
}

impl Default for SentenceCaseOptions {
    fn default() -> Self {
        Self {
            allow_list: Vec::new(),
            use_default_allow_list: true,
            preserve_mixed_case: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct HeadingsSentenceCase {
    /// Allow-list entries split into words, longest first.
    allow_list: Vec<Vec<String>>,
    preserve_mixed_case: bool,
}

/// One whitespace-separated unit of a heading.
///
/// A word may span several inline nodes (`Hello*World*` is one word).
#[derive(Debug, Default)]
struct Word {
    text: String,
    /// Source byte offset of each char of `text`; `None` where the char was
    /// produced by an escape or character reference, or by an opaque node.
    offsets: Vec<Option<usize>>,
    /// Starts with inline code, JSX or similar: occupies a slot but is never
    /// changed.
    opaque: bool,
}

/// Accumulates words across the inline children of a heading.
#[derive(Debug, Default)]
struct WordBuilder {
    words: Vec<Word>,
    /// Whether the next fragment continues the last word.
    joined: bool,
}

impl WordBuilder {
    fn current(&mut self, opaque: bool) -> &mut Word {
        if !self.joined || self.words.is_empty() {
            self.words.push(Word {
                opaque,
                ..Word::default()
            });
            self.joined = true;
        }
        let last = self.words.len() - 1;
        &mut self.words[last]
    }

    fn push_char(&mut self, c: char, offset: Option<usize>) {
        if c.is_whitespace() {
            self.joined = false;
            return;
        }
        let word = self.current(false);
        word.text.push(c);
        word.offsets.push(offset);
    }

    fn push_opaque(&mut self, text: &str) {
        let word = self.current(true);
        word.text.push_str(text);
        word.offsets.extend(text.chars().map(|_| None));
    }

    fn boundary(&mut self) {
        self.joined = false;
    }
}

impl HeadingsSentenceCase {
    pub fn new() -> Self {
        Self::with_options(SentenceCaseOptions::default())
    }

    pub fn with_options(options: SentenceCaseOptions) -> Self {
        let defaults = options
            .use_default_allow_list
            .then_some(DEFAULT_ALLOW_LIST)
            .unwrap_or_default()
            .iter()
            .map(|s| s.to_string());

        let mut allow_list: Vec<Vec<String>> = defaults
            .chain(options.allow_list)
            .map(|entry| {
                entry
                    .split_whitespace()
                    .map(|w| trim_word(w).to_string())
                    .collect::<Vec<_>>()
            })
            .filter(|words| !words.is_empty())
            .collect();
        allow_list.sort_by(|a, b| b.len().cmp(&a.len()));
        allow_list.dedup();

        Self {
            allow_list,
            preserve_mixed_case: options.preserve_mixed_case,
        }
    }

    /// Builds the rule from configuration JSON; `null` means defaults.
    pub fn from_value(value: &serde_json::Value) -> Result<Self, LinterError> {
        if value.is_null() {
            return Ok(Self::new());
        }
        let options: SentenceCaseOptions = serde_json::from_value(value.clone()).map_err(|e| {
            LinterError::config(format!("Invalid options for rule '{}': {}", RULE_ID, e))
        })?;
        Ok(Self::with_options(options))
    }

    /// Number of words an allow-list entry covers at the start of `words`.
    fn allowed_run(&self, words: &[Word]) -> Option<usize> {
        self.allow_list.iter().find_map(|entry| {
            let matched = entry.len() <= words.len()
                && entry.iter().zip(words).all(|(expected, word)| {
                    !word.opaque && {
                        let core = trim_word(&word.text);
                        core == expected || strip_possessive(core) == expected
                    }
                });
            matched.then_some(entry.len())
        })
    }

    fn check_word(
        &self,
        word: &Word,
        heading: &SyntaxNode<'_>,
        ctx: &RuleContext<'_>,
    ) -> Option<Violation> {
        let (index, (lead, first)) = word
            .text
            .char_indices()
            .enumerate()
            .find(|(_, (_, c))| c.is_alphanumeric())?;
        let core = &word.text[lead..];

        if !first.is_uppercase() {
            return None;
        }
        if self.preserve_mixed_case && core.chars().skip(1).any(char::is_uppercase) {
            return None;
        }

        let lower: String = first.to_lowercase().collect();
        let suggestion = format!(
            "{}{}{}",
            &word.text[..lead],
            lower,
            &core[first.len_utf8()..]
        );
        let message = format!(
            "Heading should use sentence case: \"{}\" should be \"{}\"",
            word.text, suggestion
        );

        Some(match word.offsets.get(index).copied().flatten() {
            Some(offset) => {
                let position = ctx.lines.position(offset);
                Violation::new(RULE_ID, message, position).with_fix(Fix::replace_char(position, lower))
            }
            // The letter comes from an escape or entity; point at the word
            None => {
                let location = word
                    .offsets
                    .iter()
                    .flatten()
                    .next()
                    .map_or(heading.loc.start, |&offset| ctx.lines.position(offset));
                Violation::new(RULE_ID, message, location)
            }
        })
    }
}

impl Default for HeadingsSentenceCase {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for HeadingsSentenceCase {
    fn id(&self) -> &str {
        RULE_ID
    }

    fn description(&self) -> &str {
        "Headings use sentence case: only the first word and proper nouns are capitalized"
    }

    fn node_types(&self) -> &[NodeType] {
        &[NodeType::Heading]
    }

    fn run(
        &self,
        node: &SyntaxNode<'_>,
        ctx: &RuleContext<'_>,
    ) -> Result<Vec<Violation>, RuleError> {
        if node.node_type != NodeType::Heading {
            return Err(RuleError::UnexpectedNode(node.node_type));
        }

        let mut builder = WordBuilder::default();
        collect_words(node.children, ctx, &mut builder);
        let words = builder.words;

        let mut violations = Vec::new();
        let mut after_sentence_end = false;
        let mut i = 0;
        while i < words.len() {
            if let Some(n) = self.allowed_run(&words[i..]) {
                after_sentence_end = ends_sentence(&words[i + n - 1].text);
                i += n;
                continue;
            }

            let word = &words[i];
            if i > 0 && !word.opaque && !after_sentence_end {
                violations.extend(self.check_word(word, node, ctx));
            }
            after_sentence_end = !word.opaque && ends_sentence(&word.text);
            i += 1;
        }

        Ok(violations)
    }
}

fn collect_words(nodes: &[SyntaxNode<'_>], ctx: &RuleContext<'_>, words: &mut WordBuilder) {
    for node in nodes {
        match node.node_type {
            NodeType::Text => {
                let Some(value) = node.value else { continue };
                let offsets = match ctx.node_source(node) {
                    Some(raw) => source_offsets(value, raw, node.span.start as usize),
                    None => vec![None; value.chars().count()],
                };
                for (c, offset) in value.chars().zip(offsets) {
                    words.push_char(c, offset);
                }
            }
            NodeType::Emphasis
            | NodeType::Strong
            | NodeType::Delete
            | NodeType::Link
            | NodeType::LinkReference => collect_words(node.children, ctx, words),
            NodeType::Break => words.boundary(),
            _ => words.push_opaque(node.value.unwrap_or_default()),
        }
    }
}

/// Maps each char of a text node's `value` onto its byte offset in `raw`,
/// the node's source slice starting at `base`.
///
/// Chars produced by a backslash escape or a character reference get
/// `None`. Whitespace dropped from continuation lines is skipped. If the two
/// texts stop lining up, the remaining chars get `None`.
fn source_offsets(value: &str, raw: &str, base: usize) -> Vec<Option<usize>> {
    let mut offsets = Vec::with_capacity(value.len());
    let mut cursor = 0;
    let mut in_sync = true;

    for (at, c) in value.char_indices() {
        if !in_sync {
            offsets.push(None);
            continue;
        }

        if !c.is_whitespace() {
            let rest = &raw[cursor..];
            cursor += rest.len() - rest.trim_start().len();
        }
        let rest = &raw[cursor..];

        if let Some(escaped) = rest.strip_prefix('\\')
            && escaped.starts_with(c)
            && c.is_ascii_punctuation()
        {
            offsets.push(None);
            cursor += 1 + c.len_utf8();
        } else if let Some(len) = character_reference_len(rest)
            && !value[at..].starts_with(&rest[..len])
        {
            offsets.push(None);
            cursor += len;
        } else if rest.starts_with(c) {
            offsets.push(Some(base + cursor));
            cursor += c.len_utf8();
        } else {
            offsets.push(None);
            in_sync = false;
        }
    }

    offsets
}

/// Length of a `&name;`, `&#123;` or `&#x7B;` reference at the start of `text`.
fn character_reference_len(text: &str) -> Option<usize> {
    let body = text.strip_prefix('&')?;
    let end = body.find(';')?;
    let name = &body[..end];
    let valid = match name.strip_prefix('#') {
        Some(num) => match num.strip_prefix(['x', 'X']) {
            Some(hex) => !hex.is_empty() && hex.chars().all(|c| c.is_ascii_hexdigit()),
            None => !num.is_empty() && num.chars().all(|c| c.is_ascii_digit()),
        },
        None => !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric()),
    };
    (valid && end <= 32).then_some(end + 2)
}

fn trim_word(word: &str) -> &str {
    word.trim_matches(|c: char| !c.is_alphanumeric())
}

fn strip_possessive(word: &str) -> &str {
    word.strip_suffix("'s")
        .or_else(|| word.strip_suffix("\u{2019}s"))
        .unwrap_or(word)
}

fn ends_sentence(word: &str) -> bool {
    word.trim_end_matches(['"', '\'', ')', ']', '\u{201d}', '\u{2019}'])
        .ends_with(['.', '!', '?', ':'])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixer::apply_fixes_to_content;
    use doclint_ast::{AstArena, LineIndex, Position};
    use doclint_parser::{MarkdownParser, Parser};
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use std::path::Path;

    fn check_with(rule: &HeadingsSentenceCase, source: &str) -> Vec<Violation> {
        let arena = AstArena::new();
        let root = MarkdownParser::mdx().parse(&arena, source).unwrap();
        let lines = LineIndex::new(source);
        let ctx = RuleContext::new(Path::new("page.mdx"), source, &lines);

        root.children
            .iter()
            .filter(|n| n.node_type == NodeType::Heading)
            .flat_map(|n| rule.run(n, &ctx).unwrap())
            .collect()
    }

    fn check(source: &str) -> Vec<Violation> {
        check_with(&HeadingsSentenceCase::new(), source)
    }

    fn rule(options: serde_json::Value) -> HeadingsSentenceCase {
        HeadingsSentenceCase::from_value(&options).unwrap()
    }

    #[rstest]
    #[case::sentence_case("# Getting started\n")]
    #[case::single_word("## Overview\n")]
    #[case::default_allow_list("# Using the GitHub API\n")]
    #[case::after_colon("# Step one: Install the CLI\n")]
    #[case::after_question("## What is this? Read on\n")]
    #[case::lowercase_first("# npm install\n")]
    #[case::digits("## Enable 2FA today\n")]
    #[case::possessive("# The API's limits\n")]
    #[case::inline_code("# Configure `Options` carefully\n")]
    #[case::paragraph_ignored("Some Title Case Paragraph\n")]
    fn test_accepts(#[case] source: &str) {
        assert_eq!(check(source), vec![]);
    }

    #[test]
    fn test_title_case_heading() {
        let violations = check("## My API Is Great\n");

        assert_eq!(violations.len(), 2);
        assert_eq!(violations[0].rule_id, RULE_ID);
        assert_eq!(violations[0].location, Position::new(1, 11));
        assert_eq!(
            violations[0].fix,
            Some(Fix::new(Position::new(1, 11), Position::new(1, 12), "i"))
        );
        assert_eq!(violations[1].location, Position::new(1, 14));
        assert!(violations[0].message.contains("\"Is\" should be \"is\""));
    }

    #[test]
    fn test_fix_is_idempotent() {
        let rule = HeadingsSentenceCase::new();
        let source = "# Getting Started With The CLI\n\nBody Text\n\n## Next Steps\n";

        let violations = check_with(&rule, source);
        assert_eq!(violations.len(), 4);

        let fixed = apply_fixes_to_content(source, &violations).unwrap();
        assert_eq!(
            fixed.fixed_content,
            "# Getting started with the CLI\n\nBody Text\n\n## Next steps\n"
        );
        assert_eq!(check_with(&rule, &fixed.fixed_content), vec![]);
    }

    #[test]
    fn test_non_ascii_columns() {
        let violations = check("# Über Café Öffnungszeiten\n");

        assert_eq!(violations.len(), 2);
        assert_eq!(violations[0].location, Position::new(1, 8));
        assert_eq!(violations[1].location, Position::new(1, 13));
        assert_eq!(violations[1].fix.as_ref().unwrap().text, "ö");
    }

    #[test]
    fn test_setext_heading() {
        let violations = check("Getting Started\n===============\n");

        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].location, Position::new(1, 9));
    }

    #[test]
    fn test_emphasis_is_checked() {
        let violations = check("# Read the *Quick* guide\n");

        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].location, Position::new(1, 13));
    }

    #[test]
    fn test_link_text_is_checked() {
        let violations = check("# See [Other Pages](/docs)\n");

        assert_eq!(violations.len(), 2);
        assert_eq!(violations[0].location, Position::new(1, 8));
    }

    #[test]
    fn test_escape_around_word_keeps_fix() {
        let source = "# Hello \\*World\\*\n";
        let violations = check(source);

        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].location, Position::new(1, 11));
        assert_eq!(
            violations[0].fix,
            Some(Fix::replace_char(Position::new(1, 11), "w"))
        );

        let fixed = apply_fixes_to_content(source, &violations).unwrap();
        assert_eq!(fixed.fixed_content, "# Hello \\*world\\*\n");
    }

    #[test]
    fn test_entity_elsewhere_in_text_keeps_fixes() {
        let source = "# Tom &amp; Jerry Show\n";
        let violations = check(source);

        assert_eq!(violations.len(), 2);
        assert_eq!(violations[0].location, Position::new(1, 13));
        assert_eq!(violations[1].location, Position::new(1, 19));
        assert!(violations.iter().all(Violation::is_fixable));

        let fixed = apply_fixes_to_content(source, &violations).unwrap();
        assert_eq!(fixed.fixed_content, "# Tom &amp; jerry show\n");
        assert_eq!(check(&fixed.fixed_content), vec![]);
    }

    #[test]
    fn test_entity_as_first_letter_has_no_fix() {
        let violations = check("# Tom and &#74;erry\n");

        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].fix, None);
        assert!(violations[0].message.contains("\"Jerry\" should be \"jerry\""));
        // Points at the first letter that maps onto the source
        assert_eq!(violations[0].location, Position::new(1, 16));
    }

    #[test]
    fn test_emphasis_inside_word_is_one_word() {
        let source = "# Hello*World* And more\n";
        let violations = check(source);

        assert_eq!(violations.len(), 1);
        assert!(violations[0].message.contains("\"And\""));

        let fixed = apply_fixes_to_content(source, &violations).unwrap();
        assert_eq!(fixed.fixed_content, "# Hello*World* and more\n");
    }

    #[test]
    fn test_word_split_by_inline_node_changes_first_letter_only() {
        let violations = check("# Read **Re**Write docs\n");

        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].location, Position::new(1, 10));
        assert!(violations[0].message.contains("\"ReWrite\" should be \"reWrite\""));
    }

    #[test]
    fn test_allow_list_matches_merged_word() {
        let custom = rule(serde_json::json!({ "allowList": ["GitHub"] }));
        assert_eq!(check_with(&custom, "# Using Git*Hub* today\n"), vec![]);
    }

    #[test]
    fn test_only_api_allowed() {
        let source = "# My API Is Great\n";
        let custom = rule(serde_json::json!({
            "allowList": ["API"],
            "useDefaultAllowList": false
        }));

        let violations = check_with(&custom, source);
        assert_eq!(violations.len(), 2);

        let fixed = apply_fixes_to_content(source, &violations).unwrap();
        assert_eq!(fixed.fixed_content, "# My API is great\n");
    }

    #[test]
    fn test_jsx_is_opaque() {
        let violations = check("# Hello <Badge>New</Badge> Feature\n");

        assert_eq!(violations.len(), 1);
        assert!(violations[0].message.contains("\"Feature\""));
    }

    #[test]
    fn test_custom_allow_list() {
        let source = "# Deploy with Supabase\n";
        assert_eq!(check(source).len(), 1);

        let custom = rule(serde_json::json!({ "allowList": ["Supabase"] }));
        assert_eq!(check_with(&custom, source), vec![]);
    }

    #[test]
    fn test_multi_word_allow_list() {
        let source = "# Enable Row Level Security\n";
        assert_eq!(check(source).len(), 3);

        let custom = rule(serde_json::json!({ "allowList": ["Row Level Security"] }));
        assert_eq!(check_with(&custom, source), vec![]);
    }

    #[test]
    fn test_allow_list_is_case_sensitive() {
        let custom = rule(serde_json::json!({ "allowList": ["Supabase"] }));
        assert_eq!(check_with(&custom, "# Using SUPABASE\n").len(), 1);
    }

    #[test]
    fn test_without_default_allow_list() {
        let custom = rule(serde_json::json!({ "useDefaultAllowList": false }));
        assert_eq!(check_with(&custom, "# Using the GitHub API\n").len(), 2);
    }

    #[test]
    fn test_preserve_mixed_case() {
        let source = "# Intro to NextAuth\n";
        assert_eq!(check(source).len(), 1);

        let custom = rule(serde_json::json!({ "preserveMixedCase": true }));
        assert_eq!(check_with(&custom, source), vec![]);
    }

    #[test]
    fn test_unknown_option_rejected() {
        let err = HeadingsSentenceCase::from_value(&serde_json::json!({ "allow": [] })).unwrap_err();
        assert!(err.to_string().contains(RULE_ID));
    }

    #[test]
    fn test_rejects_non_heading() {
        let arena = AstArena::new();
        let source = "Just text\n";
        let root = MarkdownParser::mdx().parse(&arena, source).unwrap();
        let lines = LineIndex::new(source);
        let ctx = RuleContext::new(Path::new("page.mdx"), source, &lines);

        let result = HeadingsSentenceCase::new().run(&root.children[0], &ctx);
        assert!(matches!(
            result,
            Err(RuleError::UnexpectedNode(NodeType::Paragraph))
        ));
    }

    #[rstest]
    #[case("Done.", true)]
    #[case("Why?", true)]
    #[case("Note:", true)]
    #[case("(really!)", true)]
    #[case("done", false)]
    #[case("a,", false)]
    fn test_ends_sentence(#[case] word: &str, #[case] expected: bool) {
        assert_eq!(ends_sentence(word), expected);
    }

    #[test]
    fn test_source_offsets_verbatim() {
        let offsets = source_offsets("My API", "My API", 3);
        assert_eq!(
            offsets,
            vec![Some(3), Some(4), Some(5), Some(6), Some(7), Some(8)]
        );
    }

    #[test]
    fn test_source_offsets_skip_escapes_and_references() {
        let offsets = source_offsets("a*b & c", "a\\*b &amp; c", 0);
        assert_eq!(
            offsets,
            vec![Some(0), None, Some(3), Some(4), None, Some(10), Some(11)]
        );
    }

    #[test]
    fn test_source_offsets_keep_unknown_reference_literal() {
        let offsets = source_offsets("&nope", "&nope", 0);
        assert!(offsets.iter().all(Option::is_some));
    }

    #[rstest]
    #[case("&amp; rest", Some(5))]
    #[case("&#74;erry", Some(5))]
    #[case("&#x4A;erry", Some(6))]
    #[case("& alone", None)]
    #[case("&;", None)]
    #[case("&#xZZ;", None)]
    fn test_character_reference_len(#[case] text: &str, #[case] expected: Option<usize>) {
        assert_eq!(character_reference_len(text), expected);
    }
}
