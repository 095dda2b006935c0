use thiserror::Error;

use crate::parser::ParseError;
use crate::writer::WriteError;

/// Top-level error for the two public entry points in [`crate`].
///
/// `UnresolvableToken` is deliberately not a variant here: a token that
/// fails to resolve during overlay projection is a soft failure, reported
/// through `unused_tokens`, never an `Err`.
#[derive(Debug, Error)]
pub enum XmlDiffError {
    /// One of the two input documents failed to parse.
    #[error("failed to parse XML: {0}")]
    Parse(#[from] ParseError),
    /// The colored overlay failed to serialize back to XML.
    #[error("failed to serialize XML: {0}")]
    Write(#[from] WriteError),
}
