use syn::meta::ParseNestedMeta;
use syn::{Attribute, LitStr, Result};

/// Per-field settings collected from `#[field(..)]` and `#[serde(..)]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldArgs {
    /// The field is an embedded sub-record whose fields are promoted.
    pub embed: bool,
    /// The field value implements `Validatable`.
    pub validate: bool,
    /// `#[field(rename = "..")]`, recorded under the `field` tag key.
    pub rename: Option<String>,
    /// Serialized name from `#[serde(rename ..)]`.
    pub serde_rename: Option<String>,
    /// `#[serde(skip)]` / `#[serde(skip_serializing)]`.
    pub serde_skip: bool,
}

impl FieldArgs {
    pub fn from_attrs(attrs: &[Attribute]) -> Result<Self> {
        let mut args = Self::default();
        for attr in attrs {
            if attr.path().is_ident("field") {
                args.parse_field_attr(attr)?;
            } else if attr.path().is_ident("serde") {
                args.parse_serde_attr(attr)?;
            }
        }
        Ok(args)
    }

    fn parse_field_attr(&mut self, attr: &Attribute) -> Result<()> {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("embed") {
                set_flag(&mut self.embed, &meta, "embed")
            } else if meta.path.is_ident("validate") {
                set_flag(&mut self.validate, &meta, "validate")
            } else if meta.path.is_ident("rename") {
                if self.rename.is_some() {
                    return Err(meta.error("duplicate `rename` in #[field] attribute"));
                }
                let name: LitStr = meta.value()?.parse()?;
                self.rename = Some(name.value());
                Ok(())
            } else {
                Err(meta.error("Unknown key in #[field] attribute"))
            }
        })
    }

    /// Only the keys that affect naming or layout are read; everything else
    /// belongs to serde and is skipped.
    fn parse_serde_attr(&mut self, attr: &Attribute) -> Result<()> {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename") {
                if meta.input.peek(syn::Token![=]) {
                    let name: LitStr = meta.value()?.parse()?;
                    self.serde_rename = Some(name.value());
                } else {
                    meta.parse_nested_meta(|inner| {
                        let name: LitStr = inner.value()?.parse()?;
                        if inner.path.is_ident("serialize") {
                            self.serde_rename = Some(name.value());
                        }
                        Ok(())
                    })?;
                }
            } else if meta.path.is_ident("skip") || meta.path.is_ident("skip_serializing") {
                self.serde_skip = true;
            } else if meta.path.is_ident("flatten") {
                self.embed = true;
            } else {
                skip_value(&meta)?;
            }
            Ok(())
        })
    }

    /// Declaration tags recorded on the field descriptor.
    pub fn tags(&self) -> Vec<(&'static str, String)> {
        let mut tags = Vec::new();
        if self.serde_skip {
            tags.push(("serde", "-".to_string()));
        } else if let Some(name) = &self.serde_rename {
            tags.push(("serde", name.clone()));
        }
        if let Some(name) = &self.rename {
            tags.push(("field", name.clone()));
        }
        tags
    }
}

fn set_flag(flag: &mut bool, meta: &ParseNestedMeta<'_>, key: &str) -> Result<()> {
    if *flag {
        return Err(meta.error(format!("duplicate `{key}` in #[field] attribute")));
    }
    *flag = true;
    Ok(())
}

/// Consumes `= value` or `(..)` after a key we do not interpret.
fn skip_value(meta: &ParseNestedMeta<'_>) -> Result<()> {
    if meta.input.peek(syn::Token![=]) {
        meta.value()?.parse::<syn::Expr>()?;
    } else if meta.input.peek(syn::token::Paren) {
        let content;
        syn::parenthesized!(content in meta.input);
        content.parse::<proc_macro2::TokenStream>()?;
    }
    Ok(())
}
