use core::fmt;

use thiserror::Error;

use crate::format::WireFormat;

/// Boxed source error of a wire-format backend.
pub type BoxedError = Box<dyn core::error::Error + Send + Sync>;

/// The half of a binding an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Parse,
    Write,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Parse => "parser",
            Self::Write => "writer",
        })
    }
}

// -----------------------------------------------------------------------------
// ConfigurationError

/// A root registration could not be completed.
///
/// Raised at start-up, never swallowed. The registry is left as it was
/// before the failing [`register_closure`](crate::TypeRegistry::register_closure) call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ConfigurationError {
    /// A binding half did not answer its probe call as expected.
    #[error("{operation} for `{type_path}` ({format}) is not materialized: {detail}")]
    Unmaterialized {
        type_path: &'static str,
        format: WireFormat,
        operation: Operation,
        detail: &'static str,
    },
    /// `Shaped::descriptor` returned a descriptor of another type.
    #[error("descriptor of `{expected}` describes `{found}`")]
    DescriptorMismatch {
        expected: &'static str,
        found: &'static str,
    },
}

// -----------------------------------------------------------------------------
// CodecError

/// Failure while using a binding.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CodecError {
    /// The value handed to a binding is not of the bound type.
    #[error("value is not a `{expected}`")]
    TypeMismatch { expected: &'static str },

    #[error("cannot parse `{type_path}` as {format}: {source}")]
    Parse {
        type_path: &'static str,
        format: WireFormat,
        #[source]
        source: BoxedError,
    },

    #[error("cannot write `{type_path}` as {format}: {source}")]
    Write {
        type_path: &'static str,
        format: WireFormat,
        #[source]
        source: BoxedError,
    },

    /// No binding exists for the type and format.
    #[error("no {format} binding registered for `{type_path}`")]
    Unregistered {
        type_path: &'static str,
        format: WireFormat,
    },
}
