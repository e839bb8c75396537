//! JSON encoding of a [`Taxonomy`].
//!
//! Output is pretty-printed with a fixed number of spaces per level, keeps
//! non-ASCII text literal and has no trailing newline. Writing a tree that was
//! read back from this output reproduces it byte for byte.
//!
//! Each tree level is two levels of JSON nesting (node object, `children`
//! array). serde_json's recursion limit is lifted and both directions run on a
//! stack that grows on demand, so any tree that can be written can be read.

use std::io::Write;

use serde::{Deserialize, Serialize};
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::Taxonomy;

/// Serialize `taxonomy` into `writer` using `indent` spaces per nesting level.
pub fn write_pretty<W: Write>(
    taxonomy: &Taxonomy,
    writer: W,
    indent: usize,
) -> ApplicationResult<()> {
    let indent = " ".repeat(indent);
    let formatter = PrettyFormatter::with_indent(indent.as_bytes());
    let mut serializer = Serializer::with_formatter(writer, formatter);
    taxonomy
        .serialize(serde_stacker::Serializer::new(&mut serializer))
        .map_err(|source| ApplicationError::Serialization {
            context: "serialize taxonomy".to_string(),
            source,
        })
}

/// Serialize `taxonomy` into a string using `indent` spaces per nesting level.
pub fn to_string_pretty(taxonomy: &Taxonomy, indent: usize) -> ApplicationResult<String> {
    let mut buf = Vec::new();
    write_pretty(taxonomy, &mut buf, indent)?;
    String::from_utf8(buf).map_err(|e| ApplicationError::OperationFailed {
        context: "encode taxonomy".to_string(),
        source: Box::new(e),
    })
}

/// Parse a previously written taxonomy.
pub fn from_str(content: &str) -> ApplicationResult<Taxonomy> {
    let parse_error = |source| ApplicationError::Serialization {
        context: "parse taxonomy JSON".to_string(),
        source,
    };
    let mut deserializer = serde_json::Deserializer::from_str(content);
    deserializer.disable_recursion_limit();
    let taxonomy = Taxonomy::deserialize(serde_stacker::Deserializer::new(&mut deserializer))
        .map_err(parse_error)?;
    deserializer.end().map_err(parse_error)?;
    Ok(taxonomy)
}
