use core::fmt;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::BoxedError;

// -----------------------------------------------------------------------------
// WireFormat

/// The textual wire formats bindings exist for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum WireFormat {
    /// JSON, through `serde_json`.
    Json,
    /// Rusty Object Notation, through `ron`.
    Ron,
}

impl WireFormat {
    /// Every format, in registration order.
    pub const ALL: [WireFormat; 2] = [WireFormat::Json, WireFormat::Ron];

    #[inline]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Json => "JSON",
            Self::Ron => "RON",
        }
    }
}

impl fmt::Display for WireFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// -----------------------------------------------------------------------------
// TextFormat

/// A serde-driven text backend for one [`WireFormat`].
///
/// Bindings are generic over the backend, so each `(type, format)` pair is
/// its own monomorphized function.
pub trait TextFormat: 'static {
    const FORMAT: WireFormat;

    fn from_text<T: DeserializeOwned>(text: &str) -> Result<T, BoxedError>;

    fn to_text<T: Serialize>(value: &T) -> Result<String, BoxedError>;
}

/// [`WireFormat::Json`].
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormat;

impl TextFormat for JsonFormat {
    const FORMAT: WireFormat = WireFormat::Json;

    #[inline]
    fn from_text<T: DeserializeOwned>(text: &str) -> Result<T, BoxedError> {
        serde_json::from_str(text).map_err(Into::into)
    }

    #[inline]
    fn to_text<T: Serialize>(value: &T) -> Result<String, BoxedError> {
        serde_json::to_string(value).map_err(Into::into)
    }
}

/// [`WireFormat::Ron`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RonFormat;

impl TextFormat for RonFormat {
    const FORMAT: WireFormat = WireFormat::Ron;

    #[inline]
    fn from_text<T: DeserializeOwned>(text: &str) -> Result<T, BoxedError> {
        ron::from_str(text).map_err(Into::into)
    }

    #[inline]
    fn to_text<T: Serialize>(value: &T) -> Result<String, BoxedError> {
        ron::to_string(value).map_err(Into::into)
    }
}
