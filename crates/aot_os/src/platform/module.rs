/// A crate linked into the binary.
///
/// Registered with [`declare_module!`](crate::declare_module) and listed by
/// [`Platform::loaded_modules`](super::Platform::loaded_modules).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadedModule {
    pub name: &'static str,
    pub version: &'static str,
}

#[cfg(feature = "auto_register")]
inventory::collect!(LoadedModule);

/// All modules declared in this binary, sorted by name.
///
/// Without the `auto_register` feature nothing is collected and the list is empty.
pub fn loaded_modules() -> Vec<&'static LoadedModule> {
    #[cfg(feature = "auto_register")]
    {
        let mut modules: Vec<_> = inventory::iter::<LoadedModule>.into_iter().collect();
        modules.sort_by_key(|m| m.name);
        modules
    }

    #[cfg(not(feature = "auto_register"))]
    {
        Vec::new()
    }
}

/// Declares the calling crate as a loaded module.
///
/// Expands to nothing when the `auto_register` feature of `aot_os` is disabled.
///
/// ```ignore
/// aot_os::declare_module!();
/// ```
#[cfg(feature = "auto_register")]
#[macro_export]
macro_rules! declare_module {
    () => {
        $crate::__macro_exports::inventory::submit! {
            $crate::platform::LoadedModule {
                name: ::core::env!("CARGO_PKG_NAME"),
                version: ::core::env!("CARGO_PKG_VERSION"),
            }
        }
    };
}

/// Declares the calling crate as a loaded module.
///
/// Expands to nothing when the `auto_register` feature of `aot_os` is disabled.
#[cfg(not(feature = "auto_register"))]
#[macro_export]
macro_rules! declare_module {
    () => {};
}
