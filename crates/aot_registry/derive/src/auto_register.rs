use proc_macro2::{Span, TokenStream};

/// Submit `ty` to the `inventory` of auto-registered roots.
#[cfg(feature = "auto_register")]
pub(crate) fn submit(aot_registry_path: &syn::Path, ty: &syn::Type, span: Span) -> TokenStream {
    let macro_exports_ = crate::path::macro_exports_(aot_registry_path);

    quote::quote_spanned! { span =>
        const _: () = {
            #macro_exports_::inventory::submit! {
                #macro_exports_::AutoRegistration::of::<#ty>()
            }
        };
    }
}

#[cfg(not(feature = "auto_register"))]
pub(crate) fn submit(_: &syn::Path, _: &syn::Type, _: Span) -> TokenStream {
    TokenStream::new()
}
