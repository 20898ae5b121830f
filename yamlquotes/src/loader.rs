//! YAML loader.
//!
//! Reads a file with a bounded read and builds a style-aware [`Node`] tree
//! from the `saphyr-parser` event stream. Only the first document of a
//! stream is loaded; later documents are neither parsed nor returned.

use std::io::Read;
use std::path::Path;

use saphyr_parser::{Event, Parser, ScanError, Span};

use crate::error::LoadError;
use crate::resolve::resolve_scalar;
use crate::tree::{AliasNode, Location, Node, ScalarNode, ScalarStyle};

/// Default upper bound for a single file (10 MB).
pub const DEFAULT_MAX_FILE_SIZE: u64 = 10_485_760;

/// Deepest collection nesting accepted in a document.
pub const MAX_NESTING_DEPTH: usize = 1024;

/// File name suffixes the check looks at.
pub const YAML_SUFFIXES: &[&str] = &[".yaml", ".yml"];

/// Whether a path names a YAML file (suffix match on the full path string).
#[must_use]
pub fn is_yaml_path(path: &Path) -> bool {
    let path_str = path.to_string_lossy();
    YAML_SUFFIXES.iter().any(|suffix| path_str.ends_with(suffix))
}

/// Read and parse the first YAML document of a file.
///
/// Returns `Ok(None)` when the file holds no document at all (empty or
/// comments only).
///
/// # Errors
///
/// Returns a [`LoadError`] if the file cannot be read, is larger than
/// `max_file_size`, has an undecodable encoding, or is not valid YAML.
pub fn load(path: &Path, max_file_size: u64) -> Result<Option<Node>, LoadError> {
    let content = read_file_bounded(path, max_file_size)?;
    parse_document(&content)
}

/// Read a file using a bounded streaming read, enforcing `max_file_size`.
///
/// At most `max_file_size + 1` bytes are read, so an oversized file is
/// detected without loading it completely.
///
/// # Errors
///
/// Returns a [`LoadError`] on I/O failure, when the file exceeds
/// `max_file_size`, or when its content cannot be decoded (see
/// [`decode_content`]).
pub fn read_file_bounded(path: &Path, max_file_size: u64) -> Result<String, LoadError> {
    let io_error = |source| LoadError::Io {
        path: path.to_owned(),
        source,
    };

    let file = std::fs::File::open(path).map_err(io_error)?;

    let mut buffer = Vec::new();
    file.take(max_file_size.saturating_add(1))
        .read_to_end(&mut buffer)
        .map_err(io_error)?;

    if buffer.len() as u64 > max_file_size {
        return Err(LoadError::FileTooLarge { max_file_size });
    }

    decode_content(buffer)
}

/// Decode raw file bytes into text.
///
/// A UTF-16 byte order mark selects UTF-16 in that byte order; otherwise the
/// content must be UTF-8, with an optional UTF-8 byte order mark. The mark is
/// not part of the returned text.
///
/// # Errors
///
/// Returns [`LoadError::InvalidEncoding`] for malformed UTF-8, an odd number
/// of UTF-16 bytes, or an unpaired UTF-16 surrogate.
pub fn decode_content(mut bytes: Vec<u8>) -> Result<String, LoadError> {
    if let Some(rest) = bytes.strip_prefix(&[0xFF, 0xFE]) {
        return decode_utf16(rest, u16::from_le_bytes);
    }
    if let Some(rest) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        return decode_utf16(rest, u16::from_be_bytes);
    }
    if bytes.starts_with(&[0xEF, 0xBB, 0xBF]) {
        bytes.drain(..3);
    }
    String::from_utf8(bytes).map_err(|_| LoadError::InvalidEncoding)
}

fn decode_utf16(bytes: &[u8], unit: fn([u8; 2]) -> u16) -> Result<String, LoadError> {
    let chunks = bytes.chunks_exact(2);
    if !chunks.remainder().is_empty() {
        return Err(LoadError::InvalidEncoding);
    }
    char::decode_utf16(chunks.map(|pair| unit([pair[0], pair[1]])))
        .collect::<Result<String, _>>()
        .map_err(|_| LoadError::InvalidEncoding)
}

/// Parse the first YAML document in `content`.
///
/// # Errors
///
/// Returns [`LoadError::Parse`] if the document is not valid YAML and
/// [`LoadError::TooDeep`] if collections nest deeper than
/// [`MAX_NESTING_DEPTH`].
pub fn parse_document(content: &str) -> Result<Option<Node>, LoadError> {
    let mut builder = TreeBuilder::default();

    for result in Parser::new_from_str(content) {
        let (event, span) = result.map_err(|e| parse_error(&e))?;
        if builder.on_event(event, span)? == Progress::DocumentDone {
            break;
        }
    }

    Ok(builder.root)
}

fn parse_error(err: &ScanError) -> LoadError {
    let marker = err.marker();
    LoadError::Parse {
        line: marker.line(),
        column: marker.col() + 1,
        message: err.info().to_owned(),
    }
}

fn location_of(span: &Span) -> Location {
    Location::new(span.start.line(), span.start.col() + 1)
}

#[derive(Debug, PartialEq, Eq)]
enum Progress {
    Continue,
    DocumentDone,
}

/// A collection whose end event has not been seen yet.
enum Frame {
    Sequence(Vec<Node>),
    Mapping {
        entries: Vec<(Node, Node)>,
        pending_key: Option<Node>,
    },
}

/// Builds a [`Node`] tree from parser events with an explicit stack of open
/// collections.
#[derive(Default)]
struct TreeBuilder {
    stack: Vec<Frame>,
    root: Option<Node>,
}

impl TreeBuilder {
    fn on_event(&mut self, event: Event<'_>, span: Span) -> Result<Progress, LoadError> {
        match event {
            Event::DocumentEnd | Event::StreamEnd => return Ok(Progress::DocumentDone),

            Event::Scalar(value, style, _anchor_id, tag) => {
                let style = ScalarStyle::from(style);
                let tag = resolve_scalar(
                    &value,
                    style,
                    tag.as_deref()
                        .map(|t| (t.handle.as_str(), t.suffix.as_str())),
                );
                self.push_complete(Node::Scalar(ScalarNode {
                    value: value.into_owned(),
                    tag,
                    style,
                    location: location_of(&span),
                }));
            }

            Event::Alias(_anchor_id) => {
                self.push_complete(Node::Alias(AliasNode {
                    location: location_of(&span),
                }));
            }

            Event::SequenceStart(_anchor_id, _tag) => {
                self.check_depth(&span)?;
                self.stack.push(Frame::Sequence(Vec::new()));
            }

            Event::SequenceEnd => {
                let Some(Frame::Sequence(items)) = self.stack.pop() else {
                    return Err(unbalanced(&span, "sequence end without sequence start"));
                };
                self.push_complete(Node::Sequence(items));
            }

            Event::MappingStart(_anchor_id, _tag) => {
                self.check_depth(&span)?;
                self.stack.push(Frame::Mapping {
                    entries: Vec::new(),
                    pending_key: None,
                });
            }

            Event::MappingEnd => {
                let Some(Frame::Mapping {
                    entries,
                    pending_key: None,
                }) = self.stack.pop()
                else {
                    return Err(unbalanced(&span, "mapping end without mapping start"));
                };
                self.push_complete(Node::Mapping(entries));
            }

            _ => {}
        }

        Ok(Progress::Continue)
    }

    fn check_depth(&self, span: &Span) -> Result<(), LoadError> {
        if self.stack.len() < MAX_NESTING_DEPTH {
            return Ok(());
        }
        let location = location_of(span);
        Err(LoadError::TooDeep {
            max_depth: MAX_NESTING_DEPTH,
            line: location.line,
            column: location.column,
        })
    }

    fn push_complete(&mut self, node: Node) {
        match self.stack.last_mut() {
            None => self.root = Some(node),
            Some(Frame::Sequence(items)) => items.push(node),
            Some(Frame::Mapping {
                entries,
                pending_key,
            }) => match pending_key.take() {
                Some(key) => entries.push((key, node)),
                None => *pending_key = Some(node),
            },
        }
    }
}

fn unbalanced(span: &Span, message: &str) -> LoadError {
    let location = location_of(span);
    LoadError::Parse {
        line: location.line,
        column: location.column,
        message: message.to_owned(),
    }
}
