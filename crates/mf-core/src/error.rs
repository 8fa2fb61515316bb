//! Error taxonomy for the MapFile engine.
//!
//! A parse either fully succeeds or fully fails: the grammar has no
//! reliable mid-document recovery point, so the first structural or
//! field-level error aborts the whole parse and no partial `Map` is
//! returned.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// All failure modes surfaced by the engine.
#[derive(Debug, Error)]
pub enum Error {
    /// A referenced path does not exist: the document itself, or a
    /// fontset/symbolset path checked eagerly at set-time.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// The document exists but could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// I/O failure while writing a serialized document.
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Structural nesting error during the block scan: an `END` with no
    /// open block, or end-of-input while a block is still open.
    #[error("malformed block at line {line}: {reason}")]
    MalformedBlock { line: usize, reason: String },

    /// A scalar field's value does not match its expected shape.
    #[error("line {line}: cannot parse {field} from {value:?}")]
    FieldParse {
        line: usize,
        field: &'static str,
        value: String,
    },

    /// A token or numeric code outside a closed enum family's table.
    #[error("unknown {family} value {value:?}")]
    UnknownEnumValue {
        family: &'static str,
        value: String,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
