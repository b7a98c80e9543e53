use core::any::{Any, TypeId, type_name};
use std::collections::VecDeque;

use crate::binding::{ParseFn, SerializerBinding, WriteFn, parse_value, write_value};
use crate::descriptor::{Shape, Shaped};
use crate::error::{CodecError, ConfigurationError, Operation};
use crate::format::{JsonFormat, RonFormat, TextFormat};

use super::TypeRegistry;

/// Value no binding is registered for, used to probe writers.
struct ForeignProbe;

// -----------------------------------------------------------------------------
// Registrar

/// Walks the closure of one root and records every type it adds.
///
/// Created by [`TypeRegistry::register_closure`]. On failure the recorded
/// types are removed again, leaving the registry as before the call.
pub struct Registrar<'a> {
    registry: &'a mut TypeRegistry,
    journal: Vec<TypeId>,
}

impl<'a> Registrar<'a> {
    pub(super) fn new(registry: &'a mut TypeRegistry) -> Self {
        Self {
            registry,
            journal: Vec::new(),
        }
    }

    /// Types added so far, in visiting order.
    #[inline]
    pub fn added(&self) -> &[TypeId] {
        &self.journal
    }

    /// Registers the closure of `T`.
    ///
    /// Already registered types are skipped, which also ends cycles: a
    /// type is marked before its sub-types are visited.
    pub fn visit<T: Shaped>(&mut self) -> Result<(), ConfigurationError> {
        let type_id = TypeId::of::<T>();
        if self.registry.contains(type_id) {
            return Ok(());
        }

        let descriptor = T::descriptor();
        if descriptor.type_id() != type_id {
            return Err(ConfigurationError::DescriptorMismatch {
                expected: type_name::<T>(),
                found: descriptor.type_path(),
            });
        }

        self.registry.insert_descriptor(descriptor);
        self.journal.push(type_id);
        log::debug!(
            "`{}` joined the closure as {}",
            descriptor.type_path(),
            descriptor.shape().kind_name(),
        );

        match descriptor.shape() {
            Shape::Scalar(_) => {}
            Shape::Nullable(inner) | Shape::Indirect(inner) => inner.register(self)?,
            Shape::Array { element, .. } | Shape::List { element, .. } => {
                element.register(self)?;
                element.register_list_family(self)?;
            }
            Shape::Map { key, value, .. } => {
                key.register(self)?;
                value.register(self)?;
            }
            Shape::Record(record) => {
                for generic in record.generics() {
                    generic.register(self)?;
                }
                for field in record.fields() {
                    field.ty().register(self)?;
                }
            }
        }

        self.register_format::<T, JsonFormat>()?;
        self.register_format::<T, RonFormat>()?;
        Ok(())
    }

    fn register_format<T: Shaped, F: TextFormat>(&mut self) -> Result<(), ConfigurationError> {
        let parse = self.register_parser::<T, F>()?;
        let write = self.register_writer::<T, F>()?;
        self.registry.insert_binding(SerializerBinding::from_parts(
            T::descriptor(),
            F::FORMAT,
            parse,
            write,
        ));
        Ok(())
    }

    /// Materializes the parser of `T` in `F` and proves it callable.
    ///
    /// The parser is invoked on empty input. It may reject it, but a value
    /// it produces must be a `T`.
    pub fn register_parser<T: Shaped, F: TextFormat>(&mut self) -> Result<ParseFn, ConfigurationError> {
        let parse: ParseFn = parse_value::<T, F>;

        if let Ok(value) = parse("")
            && !(*value).is::<T>()
        {
            return Err(ConfigurationError::Unmaterialized {
                type_path: type_name::<T>(),
                format: F::FORMAT,
                operation: Operation::Parse,
                detail: "parser produced a value of another type",
            });
        }

        log::trace!("{} parser for `{}` materialized", F::FORMAT, type_name::<T>());
        Ok(parse)
    }

    /// Materializes the writer of `T` in `F` and proves it callable.
    ///
    /// The writer is invoked with a value of an unrelated type and must
    /// answer [`CodecError::TypeMismatch`].
    pub fn register_writer<T: Shaped, F: TextFormat>(&mut self) -> Result<WriteFn, ConfigurationError> {
        let write: WriteFn = write_value::<T, F>;

        let probe: &dyn Any = &ForeignProbe;
        match write(probe) {
            Err(CodecError::TypeMismatch { .. }) => {}
            _ => {
                return Err(ConfigurationError::Unmaterialized {
                    type_path: type_name::<T>(),
                    format: F::FORMAT,
                    operation: Operation::Write,
                    detail: "writer accepted a foreign value",
                });
            }
        }

        log::trace!("{} writer for `{}` materialized", F::FORMAT, type_name::<T>());
        Ok(write)
    }

    /// Removes everything this registrar added.
    pub(super) fn rollback(self) {
        for type_id in self.journal.iter().rev() {
            self.registry.remove_type(*type_id);
        }
    }

    /// Checks that every added type has a binding for each format.
    #[cfg(all(feature = "debug", debug_assertions))]
    pub(super) fn assert_complete(&self) {
        for type_id in &self.journal {
            for format in crate::WireFormat::ALL {
                debug_assert!(
                    self.registry.get_binding(*type_id, format).is_some(),
                    "`{}` is missing its {format} binding",
                    self.registry
                        .get_descriptor(*type_id)
                        .map_or("<unknown>", |d| d.type_path()),
                );
            }
        }
    }
}

/// Registers the containers a sequence of `E` can be rebuilt into.
pub(crate) fn register_list_family<E: Shaped>(
    registrar: &mut Registrar<'_>,
) -> Result<(), ConfigurationError> {
    registrar.visit::<Vec<E>>()?;
    registrar.visit::<Box<[E]>>()?;
    registrar.visit::<VecDeque<E>>()
}
