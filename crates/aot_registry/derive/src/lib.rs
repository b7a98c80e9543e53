//! See following macros:
//!
//! - [`Shaped`](derive_shaped)
//! - [`impl_auto_register`]
#![cfg_attr(docsrs, feature(doc_cfg))]

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

static SHAPED_ATTRIBUTE_NAME: &str = "shaped";

// -----------------------------------------------------------------------------
// Modules

mod attributes;
mod auto_register;
mod path;
mod shaped;

// -----------------------------------------------------------------------------
// Macros

/// # Derive `Shaped`
///
/// Implements `aot_registry::Shaped` for a struct or enum. The type is
/// classified as a record whose fields are every field of the struct, or
/// of every variant for enums. Tuple fields are named by index and enum
/// fields as `Variant.field`.
///
/// The type must also implement `serde::Serialize` and
/// `serde::Deserialize`, and every field type must implement `Shaped`.
/// Each generic type parameter gets a `Shaped` bound.
///
/// ```rust, ignore
/// #[derive(Shaped, Serialize, Deserialize)]
/// struct Order {
///     items: Vec<LineItem>,
///     tags: HashMap<String, String>,
/// }
/// ```
///
/// ## Type attributes
///
/// - `default`: attach `Default::default` as the constructor used by the
///   instantiator.
/// - `auto_register`: submit the type for `TypeRegistry::auto_register`.
///   No effect on generic types, or without the `auto_register` feature.
///
/// ```rust, ignore
/// #[derive(Shaped, Serialize, Deserialize, Default)]
/// #[shaped(default, auto_register)]
/// struct Settings { /* ... */ }
/// ```
///
/// ## Field attributes
///
/// - `skip`: leave the field out of the shape. Pair it with `#[serde(skip)]`.
///
/// ```rust, ignore
/// #[derive(Shaped, Serialize, Deserialize)]
/// struct Cached {
///     value: u64,
///     #[serde(skip)]
///     #[shaped(skip)]
///     scratch: Scratch,
/// }
/// ```
#[proc_macro_derive(Shaped, attributes(shaped))]
pub fn derive_shaped(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    match shaped::impl_shaped(&ast) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.into_compile_error().into(),
    }
}

/// Submits a concrete type for `TypeRegistry::auto_register`.
///
/// ```rust, ignore
/// impl_auto_register!(foo::Foo);
/// impl_auto_register!(Vec<u32>); // Ok
/// impl_auto_register!(Vec<T>); // Error
/// ```
///
/// Expands to nothing without the `auto_register` feature.
///
/// This is not conflict with `shaped(auto_register)` attribute.
#[proc_macro]
pub fn impl_auto_register(input: TokenStream) -> TokenStream {
    let ty = parse_macro_input!(input as syn::Type);
    let aot_registry_path = path::aot_registry();

    auto_register::submit(&aot_registry_path, &ty, proc_macro2::Span::call_site()).into()
}
