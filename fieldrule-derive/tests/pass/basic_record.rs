use fieldrule::{field, validate_struct, Error, Record, Selector, SKIP};

#[derive(Record, Default)]
pub struct Profile {
    pub name: String,
    #[serde(rename = "mail")]
    email: String,
    r#type: u8,
}

fn main() {
    let mut profile = Profile::default();
    assert_eq!(profile.record_name(), "Profile");
    assert_eq!(profile.fields().len(), 3);
    assert_eq!(profile.fields()[2].name(), "type");

    // Bindings accept shared and exclusive references to the record.
    let result: Result<(), Error> = validate_struct(&profile, [field!(&profile.email, SKIP)]);
    assert!(result.is_ok());
    assert!(validate_struct(&mut profile, Vec::new()).is_ok());

    // A copy of the record is neither a target nor a selector.
    assert!(Profile::default().select().is_none());
    assert!(validate_struct(Profile::default(), Vec::new()).is_err());
}
