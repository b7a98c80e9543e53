use proc_macro2::Span;
use syn::Attribute;

use crate::SHAPED_ATTRIBUTE_NAME;

/// `#[shaped(...)]` on the type.
#[derive(Default, Debug)]
pub(crate) struct TypeAttributes {
    /// `default`: attach `Default::default` as constructor.
    pub default: Option<Span>,
    /// `auto_register`: submit for `TypeRegistry::auto_register`.
    pub auto_register: Option<Span>,
}

impl TypeAttributes {
    pub(crate) fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut out = Self::default();
        for attr in attrs {
            if !attr.path().is_ident(SHAPED_ATTRIBUTE_NAME) {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                let span = meta.path.require_ident()?.span();
                if meta.path.is_ident("default") {
                    out.default = Some(span);
                } else if meta.path.is_ident("auto_register") {
                    out.auto_register = Some(span);
                } else {
                    return Err(meta.error("expected `default` or `auto_register`"));
                }
                Ok(())
            })?;
        }
        Ok(out)
    }
}

/// `#[shaped(...)]` on a field.
#[derive(Default, Debug)]
pub(crate) struct FieldAttributes {
    pub skip: bool,
}

impl FieldAttributes {
    pub(crate) fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut out = Self::default();
        for attr in attrs {
            if !attr.path().is_ident(SHAPED_ATTRIBUTE_NAME) {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("skip") {
                    out.skip = true;
                    Ok(())
                } else {
                    Err(meta.error("expected `skip`"))
                }
            })?;
        }
        Ok(out)
    }
}
