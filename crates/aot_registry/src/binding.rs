use core::any::{Any, TypeId};
use core::fmt;

use crate::descriptor::{Shaped, TypeDescriptor};
use crate::error::CodecError;
use crate::format::{TextFormat, WireFormat};

/// Parses text into a boxed value of the bound type.
pub type ParseFn = fn(&str) -> Result<Box<dyn Any + Send + Sync>, CodecError>;

/// Writes a value of the bound type as text.
pub type WriteFn = fn(&dyn Any) -> Result<String, CodecError>;

/// The parser half of the `(T, F)` binding.
pub fn parse_value<T: Shaped, F: TextFormat>(
    text: &str,
) -> Result<Box<dyn Any + Send + Sync>, CodecError> {
    match F::from_text::<T>(text) {
        Ok(value) => Ok(Box::new(value)),
        Err(source) => Err(CodecError::Parse {
            type_path: T::descriptor().type_path(),
            format: F::FORMAT,
            source,
        }),
    }
}

/// The writer half of the `(T, F)` binding.
///
/// Answers [`CodecError::TypeMismatch`] for values that are not a `T`.
pub fn write_value<T: Shaped, F: TextFormat>(value: &dyn Any) -> Result<String, CodecError> {
    let Some(value) = value.downcast_ref::<T>() else {
        return Err(CodecError::TypeMismatch {
            expected: T::descriptor().type_path(),
        });
    };
    F::to_text(value).map_err(|source| CodecError::Write {
        type_path: T::descriptor().type_path(),
        format: F::FORMAT,
        source,
    })
}

// -----------------------------------------------------------------------------
// SerializerBinding

/// Read and write logic of one type in one [`WireFormat`].
#[derive(Clone, Copy)]
pub struct SerializerBinding {
    descriptor: &'static TypeDescriptor,
    format: WireFormat,
    parse: ParseFn,
    write: WriteFn,
}

impl SerializerBinding {
    pub(crate) fn from_parts(
        descriptor: &'static TypeDescriptor,
        format: WireFormat,
        parse: ParseFn,
        write: WriteFn,
    ) -> Self {
        Self {
            descriptor,
            format,
            parse,
            write,
        }
    }

    #[inline]
    pub fn descriptor(&self) -> &'static TypeDescriptor {
        self.descriptor
    }

    #[inline]
    pub fn type_id(&self) -> TypeId {
        self.descriptor.type_id()
    }

    #[inline]
    pub fn format(&self) -> WireFormat {
        self.format
    }

    /// Parses `text` into a boxed value of the bound type.
    #[inline]
    pub fn parse(&self, text: &str) -> Result<Box<dyn Any + Send + Sync>, CodecError> {
        (self.parse)(text)
    }

    /// Parses `text` and unboxes it as `T`.
    ///
    /// Fails with [`CodecError::TypeMismatch`] if `T` is not the bound type.
    pub fn parse_as<T: 'static>(&self, text: &str) -> Result<T, CodecError> {
        if !self.descriptor.is::<T>() {
            return Err(CodecError::TypeMismatch {
                expected: self.descriptor.type_path(),
            });
        }
        match self.parse(text)?.downcast::<T>() {
            Ok(value) => Ok(*value),
            Err(_) => Err(CodecError::TypeMismatch {
                expected: self.descriptor.type_path(),
            }),
        }
    }

    /// Writes `value`, which must be of the bound type.
    #[inline]
    pub fn write(&self, value: &dyn Any) -> Result<String, CodecError> {
        (self.write)(value)
    }
}

impl fmt::Debug for SerializerBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SerializerBinding")
            .field("type_path", &self.descriptor.type_path())
            .field("format", &self.format)
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::{parse_value, write_value};
    use crate::error::CodecError;
    use crate::format::{JsonFormat, RonFormat};

    #[test]
    fn halves_round_trip() {
        let text = write_value::<Vec<u16>, JsonFormat>(&vec![1_u16, 2, 3]).unwrap();
        assert_eq!(text, "[1,2,3]");
        let value = parse_value::<Vec<u16>, JsonFormat>(&text).unwrap();
        assert_eq!(value.downcast_ref::<Vec<u16>>(), Some(&vec![1, 2, 3]));

        let text = write_value::<Option<String>, RonFormat>(&Some(String::from("a"))).unwrap();
        let value = parse_value::<Option<String>, RonFormat>(&text).unwrap();
        assert_eq!(value.downcast_ref::<Option<String>>(), Some(&Some("a".into())));
    }

    #[test]
    fn writer_rejects_foreign_values() {
        let err = write_value::<u32, JsonFormat>(&"text").unwrap_err();
        assert!(matches!(err, CodecError::TypeMismatch { expected: "u32" }));
    }

    #[test]
    fn parser_reports_format() {
        let err = parse_value::<u32, RonFormat>("nope").unwrap_err();
        assert!(matches!(err, CodecError::Parse { .. }));
        assert!(err.to_string().contains("RON"));
    }
}
