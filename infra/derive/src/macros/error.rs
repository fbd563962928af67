use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{Data, DeriveInput, Field, Fields, Ident, Type, Variant};

/// What the generator needs to know about one enum variant.
struct ErrorVariant<'a> {
    ident: &'a Ident,
    source: Option<&'a Type>,
    has_context: bool,
    has_message: bool,
}

pub fn expand(input: DeriveInput) -> TokenStream {
    let Data::Enum(data) = &input.data else {
        return syn::Error::new_spanned(&input.ident, "drill_error can only be applied to enums")
            .to_compile_error();
    };

    let mut variants = Vec::with_capacity(data.variants.len());
    for variant in &data.variants {
        match inspect(variant) {
            Ok(v) => variants.push(v),
            Err(err) => return err.to_compile_error(),
        }
    }

    let name = &input.ident;
    let ext = format_ident!("{}Ext", name);

    let context_trait = context_trait(name, &ext, &variants);
    let source_impls = variants.iter().filter_map(|v| source_impl(name, &ext, v));
    let internal_impls = internal_impls(name, &variants);

    quote! {
        #[derive(Debug, ::thiserror::Error)]
        #input

        #context_trait
        #(#source_impls)*
        #internal_impls

        #[allow(dead_code)]
        fn format_context(
            context: &Option<std::borrow::Cow<'static, str>>,
        ) -> std::borrow::Cow<'static, str> {
            match context {
                Some(c) => std::borrow::Cow::Owned(format!(" ({c})")),
                None => std::borrow::Cow::Borrowed(""),
            }
        }
    }
}

fn inspect(variant: &Variant) -> syn::Result<ErrorVariant<'_>> {
    let Fields::Named(fields) = &variant.fields else {
        return Err(syn::Error::new_spanned(
            variant,
            "drill_error variants must use named fields (`source`, `message`, `context`)",
        ));
    };

    let mut out =
        ErrorVariant { ident: &variant.ident, source: None, has_context: false, has_message: false };

    for field in &fields.named {
        if is_named(field, "context") {
            if !is_context_type(&field.ty) {
                return Err(syn::Error::new_spanned(
                    &field.ty,
                    "`context` must be Option<Cow<'static, str>>",
                ));
            }
            out.has_context = true;
        } else if is_named(field, "message") {
            out.has_message = true;
        } else if is_named(field, "source") || has_attr(field, "source") || has_attr(field, "from")
        {
            out.source = Some(&field.ty);
        }
    }

    if out.source.is_some() && !out.has_context {
        return Err(syn::Error::new_spanned(
            &variant.ident,
            "variants wrapping a `source` need a `context: Option<Cow<'static, str>>` field",
        ));
    }

    Ok(out)
}

fn context_trait(name: &Ident, ext: &Ident, variants: &[ErrorVariant<'_>]) -> TokenStream {
    let arms = variants.iter().filter(|v| v.has_context).map(|v| {
        let ident = v.ident;
        quote! { #name::#ident { context, .. } => *context = Some(value), }
    });

    quote! {
        /// Attaches a human readable context to a failing result.
        pub trait #ext<T> {
            fn context(
                self,
                context: impl Into<std::borrow::Cow<'static, str>>,
            ) -> ::core::result::Result<T, #name>;
        }

        #[automatically_derived]
        impl<T> #ext<T> for ::core::result::Result<T, #name> {
            #[inline]
            #[allow(unreachable_patterns, unused_variables)]
            fn context(self, context: impl Into<std::borrow::Cow<'static, str>>) -> Self {
                self.map_err(|mut err| {
                    let value = context.into();
                    match &mut err {
                        #(#arms)*
                        _ => {}
                    }
                    err
                })
            }
        }
    }
}

fn source_impl(name: &Ident, ext: &Ident, v: &ErrorVariant<'_>) -> Option<TokenStream> {
    let ty = v.source?;
    let ident = v.ident;
    let extra = v.has_message.then(|| quote! { message: std::borrow::Cow::Borrowed(""), });

    Some(quote! {
        #[automatically_derived]
        impl From<#ty> for #name {
            #[inline]
            fn from(source: #ty) -> Self {
                Self::#ident { source, #extra context: None }
            }
        }

        #[automatically_derived]
        impl<T> #ext<T> for ::core::result::Result<T, #ty> {
            #[inline]
            fn context(
                self,
                context: impl Into<std::borrow::Cow<'static, str>>,
            ) -> ::core::result::Result<T, #name> {
                self.map_err(|source| #name::#ident {
                    source,
                    #extra
                    context: Some(context.into()),
                })
            }
        }
    })
}

fn internal_impls(name: &Ident, variants: &[ErrorVariant<'_>]) -> TokenStream {
    let has_internal =
        variants.iter().any(|v| v.ident == "Internal" && v.has_message && v.has_context);
    if !has_internal {
        return TokenStream::new();
    }

    quote! {
        #[automatically_derived]
        impl From<&'static str> for #name {
            #[inline]
            fn from(message: &'static str) -> Self {
                Self::Internal { message: std::borrow::Cow::Borrowed(message), context: None }
            }
        }

        #[automatically_derived]
        impl From<String> for #name {
            #[inline]
            fn from(message: String) -> Self {
                Self::Internal { message: std::borrow::Cow::Owned(message), context: None }
            }
        }
    }
}

fn is_named(field: &Field, name: &str) -> bool {
    field.ident.as_ref().is_some_and(|ident| ident == name)
}

fn has_attr(field: &Field, name: &str) -> bool {
    field.attrs.iter().any(|attr| attr.path().is_ident(name))
}

/// Compares the normalized token text, so `std::borrow::Cow` and a bare `Cow` both match.
fn is_context_type(ty: &Type) -> bool {
    let text: String = quote!(#ty).to_string().chars().filter(|c| !c.is_whitespace()).collect();
    let text = text.trim_start_matches("std::option::").trim_start_matches("core::option::");
    matches!(
        text,
        "Option<Cow<'static,str>>"
            | "Option<std::borrow::Cow<'static,str>>"
            | "Option<alloc::borrow::Cow<'static,str>>"
    )
}
