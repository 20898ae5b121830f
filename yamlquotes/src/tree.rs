//! Style-aware YAML document tree.
//!
//! The tree keeps, for every scalar, both how it was written in the source
//! (its [`ScalarStyle`]) and what YAML resolves it to (its [`ResolvedTag`]).
//! The two are independent: `"42"` is a double-quoted string, `42` is a plain
//! integer, and `!!str 42` is a plain string.

use std::fmt;

use serde::Serialize;

/// 1-based position of a node's first character in the source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

impl Location {
    #[must_use]
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// How a scalar was delimited in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ScalarStyle {
    /// Bare, unquoted text.
    Plain,
    /// `'single quoted'`
    SingleQuoted,
    /// `"double quoted"`
    DoubleQuoted,
    /// Literal block (`|`).
    Literal,
    /// Folded block (`>`).
    Folded,
}

impl From<saphyr_parser::ScalarStyle> for ScalarStyle {
    fn from(style: saphyr_parser::ScalarStyle) -> Self {
        match style {
            saphyr_parser::ScalarStyle::Plain => Self::Plain,
            saphyr_parser::ScalarStyle::SingleQuoted => Self::SingleQuoted,
            saphyr_parser::ScalarStyle::DoubleQuoted => Self::DoubleQuoted,
            saphyr_parser::ScalarStyle::Literal => Self::Literal,
            saphyr_parser::ScalarStyle::Folded => Self::Folded,
        }
    }
}

/// The type YAML assigns to a scalar once tags are resolved.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum ResolvedTag {
    String,
    Integer,
    Boolean,
    Null,
    Float,
    Timestamp,
    Binary,
    /// The `<<` merge key.
    Merge,
    /// Any other explicit tag, kept verbatim (e.g. `!custom`, `tag:yaml.org,2002:set`).
    Other(String),
}

/// A leaf value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScalarNode {
    /// The scalar's text after unescaping and folding.
    pub value: String,
    pub tag: ResolvedTag,
    pub style: ScalarStyle,
    pub location: Location,
}

impl ScalarNode {
    /// Whether the scalar resolves to a string.
    #[must_use]
    pub fn is_string(&self) -> bool {
        self.tag == ResolvedTag::String
    }
}

/// A `*alias` reference. It is never followed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AliasNode {
    pub location: Location,
}

/// A node of the document tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Key/value pairs in source order.
    Mapping(Vec<(Node, Node)>),
    /// Items in source order.
    Sequence(Vec<Node>),
    Scalar(ScalarNode),
    Alias(AliasNode),
}
