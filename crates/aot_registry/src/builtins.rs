use core::time::Duration;
use std::collections::HashMap;

use chrono::{DateTime, FixedOffset, Utc, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ConfigurationError;
use crate::registry::TypeRegistry;

/// Record registered with the built-in set.
///
/// Proves record closures are materialized before any user type is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, crate::Shaped)]
#[shaped(default)]
pub struct BuiltinProbe {
    pub dummy: String,
}

/// Registers `T`, `Option<T>`, the sequences of `T` and `HashMap<String, T>`.
macro_rules! register_scalars {
    ($registry:ident: $($ty:ty),* $(,)?) => {$(
        $registry.register_closure::<$ty>()?;
        $registry.register_closure::<Option<$ty>>()?;
        $registry.register_closure::<Vec<$ty>>()?;
        $registry.register_closure::<Vec<Option<$ty>>>()?;
        $registry.register_closure::<HashMap<String, $ty>>()?;
    )*};
}

/// Registers `HashMap<T, String>`.
macro_rules! register_keys {
    ($registry:ident: $($ty:ty),* $(,)?) => {$(
        $registry.register_closure::<HashMap<$ty, String>>()?;
    )*};
}

pub(crate) fn register(registry: &mut TypeRegistry) -> Result<(), ConfigurationError> {
    register_scalars!(registry:
        bool, char,
        i8, i16, i32, i64, isize,
        u8, u16, u32, u64, usize,
        f32, f64,
        Decimal, String,
        Uuid, Duration, DateTime<Utc>, DateTime<FixedOffset>, Weekday,
    );

    // JSON object keys must be strings or numbers, so struct-like
    // scalars such as `Duration` stay out of this list.
    register_keys!(registry:
        bool, char,
        i8, i16, i32, i64, isize,
        u8, u16, u32, u64, usize,
        Decimal,
        Uuid, DateTime<Utc>, DateTime<FixedOffset>, Weekday,
    );

    registry.register_closure::<BuiltinProbe>()
}

#[cfg(test)]
mod tests {
    use core::any::TypeId;
    use core::fmt::Debug;
    use core::hash::Hash;
    use core::time::Duration;
    use std::collections::{HashMap, VecDeque};

    use chrono::{DateTime, FixedOffset, TimeZone, Utc, Weekday};
    use rust_decimal::Decimal;
    use uuid::Uuid;

    use super::BuiltinProbe;
    use crate::{TypeRegistry, WireFormat};

    fn builtins() -> TypeRegistry {
        let mut registry = TypeRegistry::new();
        registry.register_builtins().unwrap();
        registry
    }

    fn assert_bound<T: 'static>(registry: &TypeRegistry) {
        for format in WireFormat::ALL {
            let binding = registry.get_binding_of::<T>(format);
            assert!(
                binding.is_some(),
                "missing {format} binding for `{}`",
                core::any::type_name::<T>()
            );
            assert_eq!(binding.unwrap().type_id(), TypeId::of::<T>());
        }
    }

    macro_rules! assert_scalar_family {
        ($registry:ident: $($ty:ty),*) => {$(
            assert_bound::<$ty>(&$registry);
            assert_bound::<Option<$ty>>(&$registry);
            assert_bound::<Vec<$ty>>(&$registry);
            assert_bound::<Box<[$ty]>>(&$registry);
            assert_bound::<VecDeque<$ty>>(&$registry);
            assert_bound::<HashMap<String, $ty>>(&$registry);
        )*};
    }

    #[test]
    fn every_scalar_has_both_formats() {
        let registry = builtins();
        assert_scalar_family!(registry:
            bool, char, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64,
            Decimal, String, Uuid, Duration, DateTime<Utc>, DateTime<FixedOffset>, Weekday
        );
        assert_bound::<HashMap<Uuid, String>>(&registry);
        assert_bound::<HashMap<i64, String>>(&registry);
        assert_bound::<BuiltinProbe>(&registry);
    }

    fn assert_key_round_trip<K>(registry: &TypeRegistry, key: K)
    where
        K: Hash + Eq + Clone + Debug + 'static,
    {
        let map = HashMap::from([(key, String::from("v"))]);
        for format in WireFormat::ALL {
            let binding = registry.require_binding::<HashMap<K, String>>(format).unwrap();
            let text = binding.write(&map).unwrap_or_else(|e| {
                panic!("{format} cannot write `{}` keys: {e}", core::any::type_name::<K>())
            });
            let back: HashMap<K, String> = binding.parse_as(&text).unwrap();
            assert_eq!(back, map, "{format}: {text}");
        }
    }

    #[test]
    fn every_key_binding_writes_and_reads() {
        let registry = builtins();
        assert_key_round_trip(&registry, true);
        assert_key_round_trip(&registry, 'k');
        assert_key_round_trip(&registry, -8_i8);
        assert_key_round_trip(&registry, -16_i16);
        assert_key_round_trip(&registry, -32_i32);
        assert_key_round_trip(&registry, -64_i64);
        assert_key_round_trip(&registry, -1_isize);
        assert_key_round_trip(&registry, 8_u8);
        assert_key_round_trip(&registry, 16_u16);
        assert_key_round_trip(&registry, 32_u32);
        assert_key_round_trip(&registry, 64_u64);
        assert_key_round_trip(&registry, 1_usize);
        assert_key_round_trip(&registry, Decimal::new(1234, 2));
        assert_key_round_trip(&registry, Uuid::from_u128(0x1234_5678));
        assert_key_round_trip(&registry, Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap());
        let offset = FixedOffset::east_opt(3600).unwrap();
        assert_key_round_trip(&registry, offset.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap());
        assert_key_round_trip(&registry, Weekday::Fri);
    }

    #[test]
    fn duration_is_not_a_key_type() {
        let registry = builtins();
        assert!(!registry.contains_type::<HashMap<Duration, String>>());
    }

    #[test]
    fn builtins_are_idempotent() {
        let mut registry = builtins();
        let before = registry.len();
        registry.register_builtins().unwrap();
        assert_eq!(registry.len(), before);
    }

    #[test]
    fn builtin_bindings_work() {
        let registry = builtins();

        let json = registry.require_binding::<BuiltinProbe>(WireFormat::Json).unwrap();
        let probe: BuiltinProbe = json.parse_as(r#"{"dummy":"x"}"#).unwrap();
        assert_eq!(probe.dummy, "x");

        let ron = registry.require_binding::<Option<i32>>(WireFormat::Ron).unwrap();
        assert_eq!(ron.write(&Some(5_i32)).unwrap(), "Some(5)");
        assert_eq!(ron.parse_as::<Option<i32>>("None").unwrap(), None);

        let uuid = registry.require_binding::<Uuid>(WireFormat::Json).unwrap();
        assert_eq!(uuid.write(&Uuid::nil()).unwrap(), "\"00000000-0000-0000-0000-000000000000\"");
    }
}
