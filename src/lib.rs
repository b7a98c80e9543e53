#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub use aot_os as os;
pub use aot_registry as registry;
pub use aot_utils as utils;

use aot_registry::{ConfigurationError, TypeRegistry};

/// Prepares `registry` for ahead-of-time use.
///
/// Registers the built-in scalar set, then every auto-registered root.
/// Call once at start-up, before any serialization.
pub fn init_for_aot(registry: &mut TypeRegistry) -> Result<(), ConfigurationError> {
    registry.register_builtins()?;
    let roots = registry.auto_register()?;
    log::debug!(
        "registry initialized: {} type(s), {roots} auto-registered root(s)",
        registry.len(),
    );
    Ok(())
}

aot_os::declare_module!();

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use serde::{Deserialize, Serialize};

    use crate::os::platform::{Platform, StdPlatform};
    use crate::registry::{Shaped, TypeRegistry, WireFormat};

    #[derive(Debug, PartialEq, Serialize, Deserialize, Shaped)]
    #[shaped(auto_register)]
    struct Manifest {
        name: String,
        entries: HashMap<String, Vec<u16>>,
    }

    #[test]
    fn init_registers_builtins_and_submitted_roots() {
        let mut registry = TypeRegistry::new();
        crate::init_for_aot(&mut registry).unwrap();

        assert!(registry.contains_type::<crate::registry::BuiltinProbe>());
        assert!(registry.get_binding_of::<f64>(WireFormat::Ron).is_some());

        #[cfg(feature = "auto_register")]
        {
            assert!(registry.contains_type::<Manifest>());
            assert!(registry.contains_type::<Vec<u16>>());
        }
    }

    #[test]
    fn init_twice_changes_nothing() {
        let mut registry = TypeRegistry::new();
        crate::init_for_aot(&mut registry).unwrap();
        let types = registry.len();
        crate::init_for_aot(&mut registry).unwrap();
        assert_eq!(registry.len(), types);
    }

    #[cfg(feature = "auto_register")]
    #[test]
    fn workspace_crates_are_listed() {
        let names: Vec<_> = StdPlatform::new()
            .loaded_modules()
            .iter()
            .map(|m| m.name)
            .collect();
        for name in ["aot_core", "aot_os", "aot_registry"] {
            assert!(names.contains(&name), "{name} missing from {names:?}");
        }
    }

    #[test]
    fn platform_and_registry_together() {
        let dir = tempfile::tempdir().unwrap();
        let platform = StdPlatform::with_base_dir(dir.path());
        let path = platform.resolve_path("~/manifest.json", Some("conf"));
        platform.create_directory(path.parent().unwrap()).unwrap();

        let mut registry = TypeRegistry::new();
        registry.register_closure::<Manifest>().unwrap();
        let binding = registry.require_binding::<Manifest>(WireFormat::Json).unwrap();

        let manifest = Manifest {
            name: "demo".into(),
            entries: HashMap::from([("a".into(), vec![1, 2])]),
        };
        std::fs::write(&path, binding.write(&manifest).unwrap()).unwrap();

        let text = platform.read_all_text(&path).unwrap();
        assert_eq!(binding.parse_as::<Manifest>(&text).unwrap(), manifest);
    }
}
