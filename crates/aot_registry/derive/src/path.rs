//! Paths into `aot_registry` used by the generated code.

use proc_macro2::TokenStream;
use quote::quote;

/// Get the correct access path to the `aot_registry` crate.
///
/// 1. For crates that depend on `aot_registry`, `::aot_registry` is returned.
/// 2. For crates that depend on `aot_core`, `::aot_core::registry` is returned.
/// 3. For other situations, `::aot_registry` is returned, but this may be incorrect.
///
/// Reading the manifest is not free, so the path is resolved once per
/// expansion and passed around.
pub(crate) fn aot_registry() -> syn::Path {
    aot_macro_utils::Manifest::shared(|manifest| manifest.get_crate_path("aot_registry"))
}

#[inline]
pub(crate) fn shaped_(aot_registry_path: &syn::Path) -> TokenStream {
    quote! {
        #aot_registry_path::Shaped
    }
}

#[inline]
pub(crate) fn descriptor_(aot_registry_path: &syn::Path) -> TokenStream {
    quote! {
        #aot_registry_path::descriptor
    }
}

#[cfg(feature = "auto_register")]
#[inline]
pub(crate) fn macro_exports_(aot_registry_path: &syn::Path) -> TokenStream {
    quote! {
        #aot_registry_path::__macro_exports
    }
}
