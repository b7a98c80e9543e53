//! [`Shaped`] for built-in scalars and standard containers.

use core::hash::Hash;
use core::time::Duration;
use std::collections::{BTreeMap, BTreeSet, HashMap, VecDeque};
use std::sync::Arc;

use chrono::{DateTime, FixedOffset, Utc, Weekday};
use rust_decimal::Decimal;
use serde::Serialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::descriptor::{GenericDescriptorCell, NonGenericDescriptorCell, Shaped, TypeDescriptor};
use crate::descriptor::{ListKind, MapKind, ScalarKind, Shape, TypeRef};

// -----------------------------------------------------------------------------
// Scalars

macro_rules! impl_scalar {
    ($($ty:ty => $kind:ident),* $(,)?) => {$(
        impl Shaped for $ty {
            fn descriptor() -> &'static TypeDescriptor {
                static CELL: NonGenericDescriptorCell = NonGenericDescriptorCell::new();
                CELL.get_or_init(|| {
                    TypeDescriptor::new::<Self>(Shape::Scalar(ScalarKind::$kind)).with_default::<Self>()
                })
            }
        }
    )*};
}

impl_scalar! {
    () => Unit,
    bool => Bool,
    char => Char,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    i128 => I128,
    isize => Isize,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    u128 => U128,
    usize => Usize,
    f32 => F32,
    f64 => F64,
    String => String,
    Decimal => Decimal,
    Uuid => Uuid,
    Duration => Duration,
    DateTime<Utc> => DateTimeUtc,
    DateTime<FixedOffset> => DateTimeOffset,
}

// No `Default`.
impl Shaped for Weekday {
    fn descriptor() -> &'static TypeDescriptor {
        static CELL: NonGenericDescriptorCell = NonGenericDescriptorCell::new();
        CELL.get_or_init(|| TypeDescriptor::new::<Self>(Shape::Scalar(ScalarKind::Weekday)))
    }
}

// -----------------------------------------------------------------------------
// Wrappers

impl<T: Shaped> Shaped for Option<T> {
    fn descriptor() -> &'static TypeDescriptor {
        static CELL: GenericDescriptorCell = GenericDescriptorCell::new();
        CELL.get_or_insert::<Self>(|| {
            TypeDescriptor::new::<Self>(Shape::Nullable(TypeRef::of::<T>())).with_default::<Self>()
        })
    }
}

impl<T: Shaped> Shaped for Box<T> {
    fn descriptor() -> &'static TypeDescriptor {
        static CELL: GenericDescriptorCell = GenericDescriptorCell::new();
        CELL.get_or_insert::<Self>(|| TypeDescriptor::new::<Self>(Shape::Indirect(TypeRef::of::<T>())))
    }
}

impl<T: Shaped> Shaped for Arc<T> {
    fn descriptor() -> &'static TypeDescriptor {
        static CELL: GenericDescriptorCell = GenericDescriptorCell::new();
        CELL.get_or_insert::<Self>(|| TypeDescriptor::new::<Self>(Shape::Indirect(TypeRef::of::<T>())))
    }
}

// -----------------------------------------------------------------------------
// Sequences

impl<T: Shaped> Shaped for Box<[T]> {
    fn descriptor() -> &'static TypeDescriptor {
        static CELL: GenericDescriptorCell = GenericDescriptorCell::new();
        CELL.get_or_insert::<Self>(|| {
            TypeDescriptor::new::<Self>(Shape::Array {
                element: TypeRef::element::<T>(),
                len: None,
            })
            .with_default::<Self>()
        })
    }
}

impl<T: Shaped, const N: usize> Shaped for [T; N]
where
    [T; N]: Serialize + DeserializeOwned,
{
    fn descriptor() -> &'static TypeDescriptor {
        static CELL: GenericDescriptorCell = GenericDescriptorCell::new();
        CELL.get_or_insert::<Self>(|| {
            TypeDescriptor::new::<Self>(Shape::Array {
                element: TypeRef::element::<T>(),
                len: Some(N),
            })
        })
    }
}

macro_rules! impl_list {
    ($($ty:ident => $kind:ident $(+ $bound:ident)*),* $(,)?) => {$(
        impl<T: Shaped $(+ $bound)*> Shaped for $ty<T> {
            fn descriptor() -> &'static TypeDescriptor {
                static CELL: GenericDescriptorCell = GenericDescriptorCell::new();
                CELL.get_or_insert::<Self>(|| {
                    TypeDescriptor::new::<Self>(Shape::List {
                        element: TypeRef::element::<T>(),
                        kind: ListKind::$kind,
                    })
                    .with_default::<Self>()
                })
            }
        }
    )*};
}

impl_list! {
    Vec => Growable,
    VecDeque => Enumerable,
    BTreeSet => Ordered + Ord,
}

// -----------------------------------------------------------------------------
// Maps

impl<K: Shaped + Eq + Hash, V: Shaped> Shaped for HashMap<K, V> {
    fn descriptor() -> &'static TypeDescriptor {
        static CELL: GenericDescriptorCell = GenericDescriptorCell::new();
        CELL.get_or_insert::<Self>(|| {
            TypeDescriptor::new::<Self>(Shape::Map {
                key: TypeRef::of::<K>(),
                value: TypeRef::of::<V>(),
                kind: MapKind::Hashed,
            })
            .with_default::<Self>()
        })
    }
}

impl<K: Shaped + Ord, V: Shaped> Shaped for BTreeMap<K, V> {
    fn descriptor() -> &'static TypeDescriptor {
        static CELL: GenericDescriptorCell = GenericDescriptorCell::new();
        CELL.get_or_insert::<Self>(|| {
            TypeDescriptor::new::<Self>(Shape::Map {
                key: TypeRef::of::<K>(),
                value: TypeRef::of::<V>(),
                kind: MapKind::Ordered,
            })
            .with_default::<Self>()
        })
    }
}
