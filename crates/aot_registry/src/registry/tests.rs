use core::any::TypeId;
use std::collections::{HashMap, VecDeque};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::descriptor::{NonGenericDescriptorCell, ScalarKind, Shape, Shaped, TypeDescriptor};
use crate::{ConfigurationError, TypeRegistry, WireFormat};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, crate::Shaped)]
struct LineItem {
    sku: String,
    quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, crate::Shaped)]
struct Order {
    items: Vec<LineItem>,
    tags: HashMap<String, String>,
}

#[derive(Debug, PartialEq, Serialize, Deserialize, crate::Shaped)]
struct Node {
    value: i32,
    children: Vec<Node>,
    next: Option<Box<Node>>,
}

#[derive(Debug, PartialEq, Serialize, Deserialize, crate::Shaped)]
struct Envelope<T> {
    seq: u64,
    body: T,
}

#[derive(Debug, PartialEq, Serialize, Deserialize, crate::Shaped)]
enum Event {
    Created { id: Uuid },
    Renamed(String, String),
    Closed,
}

#[derive(Default)]
struct Scratch;

#[derive(Serialize, Deserialize, crate::Shaped)]
struct WithSkipped {
    kept: i16,
    #[serde(skip)]
    #[shaped(skip)]
    scratch: Scratch,
}

/// Claims to be a `u8`.
#[derive(Serialize, Deserialize)]
struct Broken;

impl Shaped for Broken {
    fn descriptor() -> &'static TypeDescriptor {
        static CELL: NonGenericDescriptorCell = NonGenericDescriptorCell::new();
        CELL.get_or_init(|| TypeDescriptor::new::<u8>(Shape::Scalar(ScalarKind::U8)))
    }
}

#[derive(Serialize, Deserialize, crate::Shaped)]
struct HasBroken {
    fine: VecDeque<i64>,
    broken: Broken,
}

fn assert_bound<T: 'static>(registry: &TypeRegistry) {
    for format in WireFormat::ALL {
        assert!(
            registry.get_binding_of::<T>(format).is_some(),
            "missing {format} binding for `{}`",
            core::any::type_name::<T>(),
        );
    }
}

#[test]
fn order_closure() {
    let mut registry = TypeRegistry::new();
    registry.register_closure::<Order>().unwrap();

    assert_bound::<Order>(&registry);
    assert_bound::<LineItem>(&registry);
    assert_bound::<Vec<LineItem>>(&registry);
    assert_bound::<Box<[LineItem]>>(&registry);
    assert_bound::<VecDeque<LineItem>>(&registry);
    assert_bound::<String>(&registry);
    assert_bound::<u32>(&registry);
    assert_bound::<HashMap<String, String>>(&registry);

    assert!(!registry.contains_type::<Vec<Order>>());
}

#[test]
fn order_bindings_round_trip() {
    let mut registry = TypeRegistry::new();
    registry.register_closure::<Order>().unwrap();

    let order = Order {
        items: vec![LineItem {
            sku: "A-1".into(),
            quantity: 3,
        }],
        tags: HashMap::from([("rush".into(), "yes".into())]),
    };

    for format in WireFormat::ALL {
        let binding = registry.require_binding::<Order>(format).unwrap();
        let text = binding.write(&order).unwrap();
        assert_eq!(binding.parse_as::<Order>(&text).unwrap(), order, "{format}: {text}");
    }

    let items = registry
        .require_binding::<Box<[LineItem]>>(WireFormat::Json)
        .unwrap()
        .parse_as::<Box<[LineItem]>>(r#"[{"sku":"B","quantity":1}]"#)
        .unwrap();
    assert_eq!(items.len(), 1);
}

#[test]
fn binding_rejects_other_types() {
    let mut registry = TypeRegistry::new();
    registry.register_closure::<LineItem>().unwrap();
    let binding = registry.require_binding::<LineItem>(WireFormat::Ron).unwrap();

    assert!(matches!(
        binding.write(&42_u32),
        Err(crate::CodecError::TypeMismatch { .. })
    ));
    assert!(matches!(
        binding.parse_as::<u32>("1"),
        Err(crate::CodecError::TypeMismatch { .. })
    ));
    assert!(matches!(
        registry.require_binding::<Order>(WireFormat::Json),
        Err(crate::CodecError::Unregistered { .. })
    ));
}

#[test]
fn registration_is_idempotent() {
    let mut registry = TypeRegistry::new();
    registry.register_closure::<Order>().unwrap();
    let types = registry.len();
    let bindings = registry.bindings().len();

    registry.register_closure::<Order>().unwrap();
    registry.register_closure::<LineItem>().unwrap();

    assert_eq!(registry.len(), types);
    assert_eq!(registry.bindings().len(), bindings);
    assert_eq!(bindings, types * WireFormat::ALL.len());
}

#[test]
fn self_reference_terminates() {
    let mut registry = TypeRegistry::new();
    registry.register_closure::<Node>().unwrap();

    assert_bound::<Node>(&registry);
    assert_bound::<Vec<Node>>(&registry);
    assert_bound::<Option<Box<Node>>>(&registry);
    assert_bound::<Box<Node>>(&registry);
    assert_bound::<i32>(&registry);

    let node = Node {
        value: 1,
        children: vec![Node {
            value: 2,
            children: Vec::new(),
            next: None,
        }],
        next: Some(Box::new(Node {
            value: 3,
            children: Vec::new(),
            next: None,
        })),
    };
    let binding = registry.require_binding::<Node>(WireFormat::Ron).unwrap();
    let text = binding.write(&node).unwrap();
    assert_eq!(binding.parse_as::<Node>(&text).unwrap(), node);
}

#[test]
fn generic_arguments_are_registered() {
    let mut registry = TypeRegistry::new();
    registry.register_closure::<Envelope<Event>>().unwrap();

    assert_bound::<Envelope<Event>>(&registry);
    assert_bound::<Event>(&registry);
    assert_bound::<Uuid>(&registry);
    assert_bound::<String>(&registry);
    assert_bound::<u64>(&registry);

    let desc = <Envelope<Event>>::descriptor();
    let Shape::Record(record) = desc.shape() else {
        panic!("not a record: {desc:?}");
    };
    assert_eq!(record.generics().len(), 1);
    assert!(record.generics()[0].is::<Event>());
    assert!(record.field("body").is_some());

    let Shape::Record(event) = Event::descriptor().shape() else {
        panic!("not a record");
    };
    let names: Vec<_> = event.fields().iter().map(|f| f.name()).collect();
    assert_eq!(names, ["Created.id", "Renamed.0", "Renamed.1"]);
}

#[test]
fn skipped_fields_are_not_visited() {
    let mut registry = TypeRegistry::new();
    registry.register_closure::<WithSkipped>().unwrap();

    assert!(registry.contains_type::<i16>());
    assert!(!registry.contains_type::<Scratch>());

    let Shape::Record(record) = WithSkipped::descriptor().shape() else {
        panic!("not a record");
    };
    assert!(record.field("scratch").is_none());
}

#[test]
fn failed_root_rolls_back() {
    let mut registry = TypeRegistry::new();
    registry.register_closure::<String>().unwrap();
    let before = registry.len();

    let err = registry.register_closure::<HasBroken>().unwrap_err();
    assert!(matches!(err, ConfigurationError::DescriptorMismatch { found: "u8", .. }));

    assert_eq!(registry.len(), before);
    assert!(registry.contains_type::<String>());
    assert!(!registry.contains_type::<HasBroken>());
    assert!(!registry.contains_type::<VecDeque<i64>>());
    assert!(!registry.contains_type::<i64>());
    assert!(registry.get_binding_of::<i64>(WireFormat::Json).is_none());
    assert!(registry.get_with_type_path(core::any::type_name::<HasBroken>()).is_none());

    // Siblings registered earlier in a failed root can be registered on their own.
    registry.register_closure::<VecDeque<i64>>().unwrap();
    assert_bound::<i64>(&registry);
}

#[test]
fn lookup_by_type_path() {
    let mut registry = TypeRegistry::new();
    registry.register_closure::<LineItem>().unwrap();

    let desc = registry
        .get_with_type_path(core::any::type_name::<LineItem>())
        .unwrap();
    assert_eq!(desc.type_id(), TypeId::of::<LineItem>());
    assert!(registry.iter().any(|d| d.is::<u32>()));
}
