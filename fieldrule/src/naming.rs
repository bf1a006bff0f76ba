//! Visible names for recorded failures.

use std::borrow::Cow;

use crate::record::FieldDescriptor;

/// Tag value that suppresses a field's serialized name.
pub const OMIT_TAG: &str = "-";

/// Resolves the name a field's failure is recorded under.
pub trait NamingPolicy: Send + Sync {
    fn error_name(&self, field: &FieldDescriptor<'_>) -> String;
}

/// Uses the value of a declaration tag (`serde` by default) up to the first
/// comma. An absent, empty or omitted (`-`) tag falls back to the declared
/// field name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagNaming {
    tag: Cow<'static, str>,
}

impl TagNaming {
    pub fn new(tag: impl Into<Cow<'static, str>>) -> Self {
        Self { tag: tag.into() }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }
}

impl Default for TagNaming {
    fn default() -> Self {
        Self::new("serde")
    }
}

impl NamingPolicy for TagNaming {
    fn error_name(&self, field: &FieldDescriptor<'_>) -> String {
        let tagged = field
            .tag(&self.tag)
            .and_then(|value| value.split(',').next())
            .filter(|name| !name.is_empty() && *name != OMIT_TAG);
        tagged.unwrap_or(field.name()).to_string()
    }
}

/// Always uses the declared field name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeclaredNaming;

impl NamingPolicy for DeclaredNaming {
    fn error_name(&self, field: &FieldDescriptor<'_>) -> String {
        field.name().to_string()
    }
}
