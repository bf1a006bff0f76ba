use fieldrule::{field, find_field, validate_struct, Error, FieldSelector, Record, Validatable};

#[derive(Record, Default)]
struct Audit {
    created_by: String,
}

impl Validatable for Audit {
    fn validate(&self) -> Result<(), Error> {
        if self.created_by.is_empty() {
            return Err(Error::from("cannot be blank"));
        }
        Ok(())
    }
}

#[derive(Record, Default)]
struct Document {
    #[field(embed, validate)]
    audit: Audit,
    #[serde(flatten)]
    extra: Option<Box<Audit>>,
    #[field(validate, rename = "approver")]
    reviewer: Option<Audit>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    title: String,
}

fn main() {
    let doc = Document {
        extra: Some(Box::default()),
        ..Default::default()
    };

    let promoted = find_field(&doc, &FieldSelector::of(&doc.audit.created_by)).unwrap();
    assert_eq!(promoted.embedded_path(), &["audit"]);

    let nested = doc.extra.as_deref().unwrap();
    assert!(find_field(&doc, &FieldSelector::of(&nested.created_by)).is_some());

    let err = validate_struct(&doc, [field!(&doc.audit), field!(&doc.reviewer), field!(&doc.title)])
        .unwrap_err();
    assert_eq!(err.to_string(), "audit: cannot be blank.");
}
