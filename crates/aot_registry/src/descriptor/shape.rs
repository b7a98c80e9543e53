use super::{FieldRef, TypeRef};

// -----------------------------------------------------------------------------
// Shape

/// Shape classification driving closure registration.
#[derive(Debug, Clone)]
pub enum Shape {
    /// A leaf value.
    Scalar(ScalarKind),
    /// `Option<T>`.
    Nullable(TypeRef),
    /// An owning pointer such as `Box<T>` or `Arc<T>`.
    Indirect(TypeRef),
    /// `[T; N]` when `len` is known, `Box<[T]>` otherwise.
    Array { element: TypeRef, len: Option<usize> },
    List { element: TypeRef, kind: ListKind },
    Map {
        key: TypeRef,
        value: TypeRef,
        kind: MapKind,
    },
    /// A user-defined struct or enum.
    Record(RecordShape),
}

impl Shape {
    #[inline]
    pub fn is_scalar(&self) -> bool {
        matches!(self, Self::Scalar(_))
    }

    /// The element of an array or list.
    pub fn element(&self) -> Option<&TypeRef> {
        match self {
            Self::Array { element, .. } | Self::List { element, .. } => Some(element),
            _ => None,
        }
    }

    /// Short name of the variant, for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Scalar(_) => "scalar",
            Self::Nullable(_) => "nullable",
            Self::Indirect(_) => "indirect",
            Self::Array { .. } => "array",
            Self::List { .. } => "list",
            Self::Map { .. } => "map",
            Self::Record(_) => "record",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Unit,
    Bool,
    Char,
    I8,
    I16,
    I32,
    I64,
    I128,
    Isize,
    U8,
    U16,
    U32,
    U64,
    U128,
    Usize,
    F32,
    F64,
    String,
    Decimal,
    Uuid,
    Duration,
    DateTimeUtc,
    DateTimeOffset,
    Weekday,
}

/// Which sequence a list shape stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListKind {
    /// `Vec<T>`.
    Growable,
    /// `VecDeque<T>`.
    Enumerable,
    /// `BTreeSet<T>`.
    Ordered,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MapKind {
    /// `HashMap<K, V>`.
    Hashed,
    /// `BTreeMap<K, V>`.
    Ordered,
}

// -----------------------------------------------------------------------------
// RecordShape

/// Fields and generic arguments of a record.
///
/// Enum records list the fields of every variant.
#[derive(Debug, Clone, Default)]
pub struct RecordShape {
    fields: Box<[FieldRef]>,
    generics: Box<[TypeRef]>,
}

impl RecordShape {
    pub fn new(fields: &[FieldRef]) -> Self {
        Self {
            fields: fields.into(),
            generics: Box::new([]),
        }
    }

    pub fn with_generics(mut self, generics: &[TypeRef]) -> Self {
        self.generics = generics.into();
        self
    }

    #[inline]
    pub fn fields(&self) -> &[FieldRef] {
        &self.fields
    }

    #[inline]
    pub fn generics(&self) -> &[TypeRef] {
        &self.generics
    }

    pub fn field(&self, name: &str) -> Option<&FieldRef> {
        self.fields.iter().find(|f| f.name() == name)
    }
}
