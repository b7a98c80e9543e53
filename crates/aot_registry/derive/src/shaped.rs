use proc_macro2::TokenStream;
use quote::{quote, quote_spanned};
use syn::ext::IdentExt;
use syn::{Data, DeriveInput, Fields, LitStr, Type, parse_quote};

use crate::attributes::{FieldAttributes, TypeAttributes};
use crate::{auto_register, path};

/// A field that takes part in the shape.
struct ShapedField<'a> {
    name: String,
    ty: &'a Type,
}

/// Generate the `Shaped` implementation.
pub(crate) fn impl_shaped(ast: &DeriveInput) -> syn::Result<TokenStream> {
    let attrs = TypeAttributes::parse_attrs(&ast.attrs)?;

    if let Some(lifetime) = ast.generics.lifetimes().next() {
        return Err(syn::Error::new_spanned(
            lifetime,
            "`Shaped` types must be `'static`; lifetime parameters are not supported",
        ));
    }

    let fields = collect_fields(&ast.data)?;

    let aot_registry_path = path::aot_registry();
    let shaped_ = path::shaped_(&aot_registry_path);
    let descriptor_ = path::descriptor_(&aot_registry_path);

    let ident = &ast.ident;
    let type_params: Vec<_> = ast.generics.type_params().map(|p| &p.ident).collect();
    let is_generic = ast.generics.type_params().next().is_some()
        || ast.generics.const_params().next().is_some();

    let mut generics = ast.generics.clone();
    if !type_params.is_empty() {
        let where_clause = generics.make_where_clause();
        for param in &type_params {
            where_clause.predicates.push(parse_quote!(#param: #shaped_));
        }
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let field_names = fields
        .iter()
        .map(|f| LitStr::new(&f.name, proc_macro2::Span::call_site()));
    let field_tys = fields.iter().map(|f| f.ty);

    let with_default = attrs.default.map(|span| {
        quote_spanned! { span =>
            .with_default::<Self>()
        }
    });

    let build = quote! {
        || {
            #descriptor_::TypeDescriptor::new::<Self>(
                #descriptor_::Shape::Record(
                    #descriptor_::RecordShape::new(&[
                        #( #descriptor_::FieldRef::new::<#field_tys>(#field_names), )*
                    ])
                    .with_generics(&[
                        #( #descriptor_::TypeRef::of::<#type_params>(), )*
                    ])
                )
            )
            #with_default
        }
    };

    let body = if is_generic {
        quote! {
            static CELL: #descriptor_::GenericDescriptorCell = #descriptor_::GenericDescriptorCell::new();
            CELL.get_or_insert::<Self>(#build)
        }
    } else {
        quote! {
            static CELL: #descriptor_::NonGenericDescriptorCell = #descriptor_::NonGenericDescriptorCell::new();
            CELL.get_or_init(#build)
        }
    };

    // Invalid for generic types.
    let auto_register = match attrs.auto_register {
        Some(span) if !is_generic => {
            let ty: Type = parse_quote!(#ident);
            auto_register::submit(&aot_registry_path, &ty, span)
        }
        _ => TokenStream::new(),
    };

    Ok(quote! {
        impl #impl_generics #shaped_ for #ident #ty_generics #where_clause {
            fn descriptor() -> &'static #descriptor_::TypeDescriptor {
                #body
            }
        }

        #auto_register
    })
}

fn collect_fields(data: &Data) -> syn::Result<Vec<ShapedField<'_>>> {
    let mut out = Vec::new();
    match data {
        Data::Struct(data) => push_fields(&mut out, None, &data.fields)?,
        Data::Enum(data) => {
            for variant in &data.variants {
                let prefix = variant.ident.unraw().to_string();
                push_fields(&mut out, Some(&prefix), &variant.fields)?;
            }
        }
        Data::Union(data) => {
            return Err(syn::Error::new(
                data.union_token.span,
                "`Shaped` cannot be derived for unions",
            ));
        }
    }
    Ok(out)
}

fn push_fields<'a>(
    out: &mut Vec<ShapedField<'a>>,
    prefix: Option<&str>,
    fields: &'a Fields,
) -> syn::Result<()> {
    for (index, field) in fields.iter().enumerate() {
        if FieldAttributes::parse_attrs(&field.attrs)?.skip {
            continue;
        }
        let name = match &field.ident {
            Some(ident) => ident.unraw().to_string(),
            None => index.to_string(),
        };
        let name = match prefix {
            Some(prefix) => format!("{prefix}.{name}"),
            None => name,
        };
        out.push(ShapedField {
            name,
            ty: &field.ty,
        });
    }
    Ok(())
}
