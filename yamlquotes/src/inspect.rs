//! Tree inspector.
//!
//! Walks a document tree depth-first and reports every string scalar that is
//! not written in double-quoted style. Mapping keys are never inspected.

use std::fmt;

use serde::Serialize;

use crate::tree::{Location, Node, ScalarNode, ScalarStyle};

/// A scalar that should have been double-quoted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    /// `Value '<literal>' is not double-quoted`
    pub message: String,
    /// Where the offending scalar starts.
    pub location: Location,
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Inspect a whole document. An empty document has no issues.
#[must_use]
pub fn check_document(root: Option<&Node>) -> Vec<Issue> {
    root.map(check_node).unwrap_or_default()
}

/// Collect issues for `node` and everything below it, in source order.
///
/// The walk keeps its own stack of pending nodes, so nesting depth is bounded
/// by memory rather than by the call stack.
#[must_use]
pub fn check_node(node: &Node) -> Vec<Issue> {
    let mut issues = Vec::new();
    let mut pending = vec![node];

    while let Some(node) = pending.pop() {
        match node {
            // Children go on in reverse so they come off in source order.
            Node::Mapping(entries) => {
                pending.extend(entries.iter().rev().map(|(_key, value)| value));
            }
            Node::Sequence(items) => pending.extend(items.iter().rev()),
            Node::Scalar(scalar) => issues.extend(check_scalar(scalar)),
            Node::Alias(_) => {}
        }
    }

    issues
}

/// A scalar is flagged when it resolves to a non-empty string written in any
/// style other than double-quoted.
#[must_use]
pub fn check_scalar(scalar: &ScalarNode) -> Option<Issue> {
    if !scalar.is_string() || scalar.value.is_empty() || scalar.style == ScalarStyle::DoubleQuoted
    {
        return None;
    }
    Some(Issue {
        message: format!("Value '{}' is not double-quoted", scalar.value),
        location: scalar.location,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::parse_document;
    use crate::tree::ResolvedTag;

    fn issues_for(content: &str) -> Vec<String> {
        let root = parse_document(content).unwrap();
        check_document(root.as_ref())
            .into_iter()
            .map(|issue| issue.message)
            .collect()
    }

    fn string_scalar(value: &str, style: ScalarStyle) -> ScalarNode {
        ScalarNode {
            value: value.to_owned(),
            tag: ResolvedTag::String,
            style,
            location: Location::new(1, 1),
        }
    }

    #[test]
    fn test_plain_string_is_flagged() {
        assert_eq!(
            issues_for("name: Alice"),
            ["Value 'Alice' is not double-quoted"]
        );
    }

    #[test]
    fn test_double_quoted_string_is_accepted() {
        assert!(issues_for("name: \"Alice\"").is_empty());
    }

    #[test]
    fn test_non_string_types_are_accepted() {
        assert!(issues_for("count: 42").is_empty());
        assert!(issues_for("flag: true").is_empty());
        assert!(issues_for("nothing: null").is_empty());
        assert!(issues_for("empty:").is_empty());
        assert!(issues_for("ratio: 1.5").is_empty());
        assert!(issues_for("when: 2001-12-14").is_empty());
        assert!(issues_for("custom: !thing value").is_empty());
    }

    #[test]
    fn test_timestamp_lookalikes_are_flagged() {
        assert_eq!(
            issues_for(
                "created: 2024-01-15T10:30:00\nspaced: 2001-12-14 21:59:43.10 -5\nbad: 2001-02-30\n"
            ),
            [
                "Value '2024-01-15T10:30:00' is not double-quoted",
                "Value '2001-12-14 21:59:43.10 -5' is not double-quoted",
                "Value '2001-02-30' is not double-quoted",
            ]
        );
        assert!(issues_for("created: 2024-01-15T10:30:00Z").is_empty());
    }

    #[test]
    fn test_sequence_items_in_order() {
        assert_eq!(
            issues_for("items:\n  - foo\n  - \"bar\"\n  - baz\n"),
            [
                "Value 'foo' is not double-quoted",
                "Value 'baz' is not double-quoted"
            ]
        );
    }

    #[test]
    fn test_nested_value_flagged_key_ignored() {
        assert_eq!(issues_for("a:\n  b: c\n"), ["Value 'c' is not double-quoted"]);
    }

    #[test]
    fn test_keys_are_never_inspected() {
        assert!(issues_for("plain_key: \"quoted\"\n'single key': \"quoted\"\n").is_empty());
        assert!(issues_for("? complex key\n: \"value\"\n").is_empty());
    }

    #[test]
    fn test_every_non_double_quoted_style_is_flagged() {
        let issues = issues_for(
            "plain: a\nsingle: 'b'\nliteral: |\n  c\nfolded: >\n  d\ndouble: \"e\"\n",
        );
        assert_eq!(
            issues,
            [
                "Value 'a' is not double-quoted",
                "Value 'b' is not double-quoted",
                "Value 'c\n' is not double-quoted",
                "Value 'd\n' is not double-quoted",
            ]
        );
    }

    #[test]
    fn test_quoted_numbers_are_strings() {
        assert_eq!(
            issues_for("version: '42'\nport: \"8080\"\n"),
            ["Value '42' is not double-quoted"]
        );
    }

    #[test]
    fn test_explicit_string_tag_is_flagged() {
        assert_eq!(
            issues_for("id: !!str 42\n"),
            ["Value '42' is not double-quoted"]
        );
    }

    #[test]
    fn test_empty_strings_are_accepted() {
        assert!(issues_for("single: ''\ndouble: \"\"\n").is_empty());
        assert!(check_scalar(&string_scalar("", ScalarStyle::Plain)).is_none());
        assert!(check_scalar(&string_scalar("", ScalarStyle::Literal)).is_none());
    }

    #[test]
    fn test_aliases_yield_nothing() {
        assert_eq!(
            issues_for("base: &anchor value\ncopy: *anchor\n"),
            ["Value 'value' is not double-quoted"]
        );
    }

    #[test]
    fn test_root_scalar_and_flow_collections() {
        assert_eq!(issues_for("hello"), ["Value 'hello' is not double-quoted"]);
        assert_eq!(
            issues_for("{a: x, b: [y, \"z\", 3]}"),
            [
                "Value 'x' is not double-quoted",
                "Value 'y' is not double-quoted"
            ]
        );
    }

    #[test]
    fn test_empty_document_has_no_issues() {
        assert!(check_document(None).is_empty());
        assert!(issues_for("").is_empty());
    }

    #[test]
    fn test_issue_carries_scalar_location() {
        let root = parse_document("a: \"ok\"\nb:\n  - nope\n").unwrap().unwrap();
        let issues = check_node(&root);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].location, Location::new(3, 5));
        assert_eq!(issues[0].to_string(), "Value 'nope' is not double-quoted");
    }

    #[test]
    fn test_deep_tree_is_walked_in_order() {
        let plain = |value| Node::Scalar(string_scalar(value, ScalarStyle::Plain));
        let mut node = plain("innermost");
        for depth in 0..200_000 {
            node = if depth % 2 == 0 {
                Node::Sequence(vec![node, plain("after")])
            } else {
                Node::Mapping(vec![(plain("key"), node)])
            };
        }

        let issues = check_node(&node);
        assert_eq!(issues.len(), 100_001);
        assert_eq!(issues[0].message, "Value 'innermost' is not double-quoted");
        assert!(issues[1..].iter().all(|i| i.message == "Value 'after' is not double-quoted"));

        // Dropping a tree this deep recurses.
        std::mem::forget(node);
    }

    #[test]
    fn test_inspection_is_idempotent() {
        let root = parse_document("a: x\nb:\n  - y\n  - 1\n").unwrap().unwrap();
        assert_eq!(check_node(&root), check_node(&root));
    }
}
