use syn::{spanned::Spanned, DeriveInput, Field, Fields, Ident};

/// Validated wrapper around the `DeriveInput` of a record.
///
/// Construction fails unless the item is a non-generic struct with named
/// fields, so code generation can rely on both.
pub struct StructInfo {
    pub ident: Ident,
    pub fields: Vec<Field>,
}

impl StructInfo {
    pub fn from_derive_input(input: DeriveInput) -> syn::Result<Self> {
        // Lifetimes count too: a record must be `'static` to be located by type.
        if let Some(param) = input.generics.params.first() {
            return Err(syn::Error::new(
                param.span(),
                "#[derive(Record)] cannot be applied to a type with generic parameters",
            ));
        }

        let syn::Data::Struct(data) = input.data else {
            return Err(syn::Error::new(
                input.ident.span(),
                "#[derive(Record)] is only available for structs",
            ));
        };

        let Fields::Named(named) = data.fields else {
            return Err(syn::Error::new(
                input.ident.span(),
                "#[derive(Record)] needs a struct with named fields",
            ));
        };

        Ok(Self {
            ident: input.ident,
            fields: named.named.into_iter().collect(),
        })
    }
}
