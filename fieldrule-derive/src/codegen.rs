use proc_macro2::TokenStream;
use quote::{quote, quote_spanned};
use syn::ext::IdentExt;
use syn::{spanned::Spanned, Field, Ident, LitStr, Visibility};

use crate::args::FieldArgs;
use crate::struct_info::StructInfo;

/// Expands the record layout and the target/selector plumbing for `info`.
pub fn generate(info: &StructInfo) -> syn::Result<TokenStream> {
    let ident = &info.ident;
    let record_name = LitStr::new(&ident.to_string(), ident.span());

    let descriptors = info
        .fields
        .iter()
        .map(descriptor)
        .collect::<syn::Result<Vec<_>>>()?;

    Ok(quote! {
        #[automatically_derived]
        impl ::fieldrule::Record for #ident {
            fn fields(&self) -> ::std::vec::Vec<::fieldrule::FieldDescriptor<'_>> {
                ::std::vec![#(#descriptors),*]
            }

            fn record_name(&self) -> &'static str {
                #record_name
            }
        }

        #[automatically_derived]
        impl ::fieldrule::AsRecord for #ident {
            fn as_record(&self) -> ::core::option::Option<&dyn ::fieldrule::Record> {
                ::core::option::Option::Some(self)
            }
        }

        #[automatically_derived]
        impl<'r> ::fieldrule::Target for &'r #ident {
            fn instance(&self) -> ::fieldrule::Instance<'_> {
                ::fieldrule::Instance::Record(*self)
            }
        }

        #[automatically_derived]
        impl<'r> ::fieldrule::Target for &'r mut #ident {
            fn instance(&self) -> ::fieldrule::Instance<'_> {
                ::fieldrule::Instance::Record(&**self)
            }
        }

        #[automatically_derived]
        impl ::fieldrule::Target for #ident {
            fn instance(&self) -> ::fieldrule::Instance<'_> {
                ::fieldrule::Instance::Invalid("record value")
            }
        }

        #[automatically_derived]
        impl<'r, 's> ::fieldrule::Target for &'r &'s #ident {
            fn instance(&self) -> ::fieldrule::Instance<'_> {
                ::fieldrule::Instance::Invalid("reference to a record reference")
            }
        }

        #[automatically_derived]
        impl<'a> ::fieldrule::Selector<'a> for #ident {
            type Target = #ident;

            fn select(self) -> ::core::option::Option<&'a #ident> {
                ::core::option::Option::None
            }
        }
    })
}

fn descriptor(field: &Field) -> syn::Result<TokenStream> {
    let ident = field_ident(field)?;
    let args = FieldArgs::from_attrs(&field.attrs)?;
    let name = LitStr::new(&ident.unraw().to_string(), ident.span());
    let public = matches!(field.vis, Visibility::Public(_));
    let ty_span = field.ty.span();

    let tags = args.tags().into_iter().map(|(key, value)| quote!((#key, #value)));
    let mut tokens = quote! {
        ::fieldrule::FieldDescriptor::new(#name, &self.#ident)
            .with_public(#public)
            .with_tags(&[#(#tags),*])
    };
    if args.embed {
        tokens.extend(quote_spanned! {ty_span=>
            .embedded(::fieldrule::AsRecord::as_record(&self.#ident))
        });
    }
    if args.validate {
        tokens.extend(quote_spanned! {ty_span=>
            .validatable(&self.#ident)
        });
    }
    Ok(tokens)
}

fn field_ident(field: &Field) -> syn::Result<&Ident> {
    field
        .ident
        .as_ref()
        .ok_or_else(|| syn::Error::new(field.span(), "#[derive(Record)] needs a struct with named fields"))
}
