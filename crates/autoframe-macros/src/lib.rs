//! Proc-macros for autoframe.
//!
//! Currently provided:
//! - `#[derive(WithBuilders)]`: generates `with_<field>(...)` builder-style methods
//!   for each named field in a layout record.
//!
//! ## Field control
//! - `#[with_builders(skip)]`: no builder is generated for the field.
//! - `#[with_builders(into)]`: the builder accepts `impl Into<T>`.
//!
//! Fields of type `Option<T>` get a builder taking a bare `T` that stores `Some(value)`.
//! Unsetting such a field is done by assigning the field directly.
//!
//! ### Example
//! ```ignore
//! use autoframe_macros::WithBuilders;
//!
//! #[derive(Clone, Debug, Default, WithBuilders)]
//! pub struct Frame {
//!     pub item_spacing: f64,
//!     pub max_width: Option<f64>,
//!     #[with_builders(skip)]
//!     pub cached: bool,
//! }
//!
//! let frame = Frame::default().with_item_spacing(8.0).with_max_width(640.0);
//! assert_eq!(frame.max_width, Some(640.0));
//! // .with_cached(...) is NOT generated.
//! ```

use proc_macro::TokenStream;
use quote::{format_ident, quote};
use syn::{
    parse_macro_input, spanned::Spanned, Data, DeriveInput, Field, Fields, GenericArgument,
    PathArguments, Type,
};

/// Derive that generates `with_<field>` builder methods for structs with named fields.
///
/// Generated methods take `self` by value (builder style) and return `Self`.
///
/// Field attributes:
/// - `#[with_builders(skip)]`: do not generate a builder method for this field.
/// - `#[with_builders(into)]`: take `impl Into<T>` instead of `T`.
#[proc_macro_derive(WithBuilders, attributes(with_builders))]
pub fn derive_with_builders(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let ident = &input.ident;
    let generics = &input.generics;

    let Data::Struct(data_struct) = &input.data else {
        return syn::Error::new(
            input.span(),
            "#[derive(WithBuilders)] only supports structs",
        )
        .to_compile_error()
        .into();
    };

    let Fields::Named(fields_named) = &data_struct.fields else {
        return syn::Error::new(
            data_struct.fields.span(),
            "#[derive(WithBuilders)] only supports structs with named fields",
        )
        .to_compile_error()
        .into();
    };

    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let mut methods = Vec::with_capacity(fields_named.named.len());
    for field in &fields_named.named {
        let Some(field_ident) = field.ident.as_ref() else {
            continue;
        };

        let options = match FieldOptions::parse(field) {
            Ok(options) => options,
            Err(err) => return err.to_compile_error().into(),
        };
        if options.skip {
            continue;
        }

        let method_ident = format_ident!("with_{}", field_ident);
        let doc = format!("Set `{field_ident}`.");

        // Option<T> fields are set from a bare T.
        let (value_ty, stored) = match option_inner(&field.ty) {
            Some(inner) => (inner, quote! { ::core::option::Option::Some(value) }),
            None => (&field.ty, quote! { value }),
        };

        let (param, convert) = if options.into {
            (
                quote! { value: impl ::core::convert::Into<#value_ty> },
                quote! { let value: #value_ty = value.into(); },
            )
        } else {
            (quote! { value: #value_ty }, quote! {})
        };

        methods.push(quote! {
            #[doc = #doc]
            #[inline]
            #[must_use]
            pub fn #method_ident(mut self, #param) -> Self {
                #convert
                self.#field_ident = #stored;
                self
            }
        });
    }

    quote! {
        impl #impl_generics #ident #ty_generics #where_clause {
            #(#methods)*
        }
    }
    .into()
}

#[derive(Default)]
struct FieldOptions {
    skip: bool,
    into: bool,
}

impl FieldOptions {
    fn parse(field: &Field) -> syn::Result<Self> {
        let mut options = Self::default();
        for attr in &field.attrs {
            if !attr.path().is_ident("with_builders") {
                continue;
            }

            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("skip") {
                    options.skip = true;
                    Ok(())
                } else if meta.path.is_ident("into") {
                    options.into = true;
                    Ok(())
                } else {
                    Err(meta.error("expected `skip` or `into`"))
                }
            })?;
        }
        Ok(options)
    }
}

/// Returns `T` when `ty` is spelled `Option<T>` (or a path ending in `Option<T>`).
fn option_inner(ty: &Type) -> Option<&Type> {
    let Type::Path(type_path) = ty else {
        return None;
    };
    if type_path.qself.is_some() {
        return None;
    }

    let segment = type_path.path.segments.last()?;
    if segment.ident != "Option" {
        return None;
    }

    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };
    if args.args.len() != 1 {
        return None;
    }
    match args.args.first()? {
        GenericArgument::Type(inner) => Some(inner),
        _ => None,
    }
}
