use thiserror::Error;

use crate::{Kind, Mismatch, TypeInfo};

/// Failure to dispatch a call to a registered implementation.
///
/// A panic raised *inside* a matched implementation is not an
/// `Error`; it unwinds straight through the mock to the caller.
#[derive(Debug, Error)]
pub enum Error {
    /// Nothing was registered under the member's name.
    #[error("✗ no {kind} implementation was registered for `{name}`")]
    NotFound { name: String, kind: Kind },

    /// Implementations exist for the name but none of them accepts
    /// the call.
    #[error(
        "✗ none of the {} {kind} implementation(s) of `{name}` accepts {arguments} -> {output}\n{}",
        .rejections.len(),
        .rejections.join("\n")
    )]
    NoMatch {
        name: String,
        kind: Kind,
        arguments: String,
        output: TypeInfo,
        rejections: Vec<String>,
    },

    /// The single implementation registered for the name does not
    /// accept the call.
    #[error("✗ the implementation of `{name}` cannot be called with {arguments}: {mismatch}")]
    Signature {
        name: String,
        arguments: String,
        mismatch: Mismatch,
    },
}
