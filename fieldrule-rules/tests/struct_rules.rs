use std::collections::HashMap;

use fieldrule::{
    field, validate_struct, validate_struct_with_context, Context, Error, InternalError, Record,
    Rule,
};
use fieldrule_rules::{
    by, by_with_context, each, is_in, length, matches_pattern, skip_when, NIL_OR_NOT_EMPTY,
    NOT_NIL, REQUIRED, SKIP,
};

struct ValidateXyz;

impl Rule<String> for ValidateXyz {
    fn validate(&self, value: &String) -> Result<(), Error> {
        if value == "xyz" {
            return Ok(());
        }
        Err("error xyz".into())
    }
}

#[derive(Record, Default)]
struct Model1 {
    a: String,
    b: String,
    d: Option<String>,
    e: Option<String>,
    h: Vec<String>,
    i: HashMap<String, String>,
}

#[derive(Record, Default)]
struct Inner {
    a: String,
}

#[derive(Record, Default)]
struct Outer {
    #[field(embed)]
    inner: Inner,
    b: String,
}

#[derive(Record)]
struct Setting {
    name: String,
    value: String,
}

fn render(result: Result<(), Error>) -> String {
    result.err().map(|e| e.to_string()).unwrap_or_default()
}

fn model1() -> Model1 {
    Model1 {
        a: "abc".into(),
        h: vec!["abc".into(), "abc".into()],
        i: HashMap::from([("foo".to_string(), "abc".to_string())]),
        ..Default::default()
    }
}

#[test]
fn absent_options_pass_length_checks() {
    let m1 = model1();
    assert_eq!(render(validate_struct(&m1, [field!(&m1.d, length(5, 10))])), "");
    let m2 = Model1 {
        d: Some("abc".into()),
        ..model1()
    };
    assert_eq!(
        render(validate_struct(&m2, [field!(&m2.d, length(5, 10))])),
        "d: the length must be between 5 and 10."
    );
}

#[test]
fn each_element_is_keyed() {
    let m1 = model1();
    let err = validate_struct(
        &m1,
        [field!(&m1.h, each(ValidateXyz)), field!(&m1.i, each(ValidateXyz))],
    )
    .unwrap_err();
    assert_eq!(err.to_string(), "h: (0: error xyz; 1: error xyz.); i: (foo: error xyz.).");

    let nested = err.as_fields().and_then(|errors| errors.get("h"));
    assert_eq!(nested.and_then(Error::as_fields).map(|e| e.len()), Some(2));
}

#[test]
fn required_with_skip() {
    let m1 = model1();
    let cases = [
        ("t7.1", render(validate_struct(&m1, [field!(&m1.a, REQUIRED)])), ""),
        (
            "t7.2",
            render(validate_struct(&m1, [field!(&m1.b, REQUIRED)])),
            "b: cannot be blank.",
        ),
        ("t7.3", render(validate_struct(&m1, [field!(&m1.b, SKIP, REQUIRED)])), ""),
        (
            "t7.4",
            render(validate_struct(&m1, [field!(&m1.b, REQUIRED, SKIP)])),
            "b: cannot be blank.",
        ),
        (
            "t7.5",
            render(validate_struct(&m1, [field!(&m1.d, NOT_NIL)])),
            "d: is required.",
        ),
        ("t7.6", render(validate_struct(&m1, [field!(&m1.d, SKIP, NOT_NIL)])), ""),
        (
            "t7.7",
            render(validate_struct(&m1, [field!(&m1.b, skip_when(false), REQUIRED)])),
            "b: cannot be blank.",
        ),
        (
            "t7.8",
            render(validate_struct(&m1, [field!(&m1.b, SKIP.when(m1.a.is_empty()), REQUIRED)])),
            "b: cannot be blank.",
        ),
    ];
    for (tag, actual, expected) in cases {
        assert_eq!(actual, expected, "{tag}");
    }
}

#[test]
fn optional_values() {
    let m1 = Model1 {
        e: Some(String::new()),
        ..model1()
    };
    assert_eq!(
        render(validate_struct(
            &m1,
            [field!(&m1.d, NIL_OR_NOT_EMPTY), field!(&m1.e, NIL_OR_NOT_EMPTY)],
        )),
        "e: cannot be blank."
    );
    assert_eq!(render(validate_struct(&m1, [field!(&m1.e, NOT_NIL)])), "");
}

#[test]
fn embedded_required_fields_use_their_own_names() {
    let outer = Outer::default();
    assert_eq!(
        render(validate_struct(
            &outer,
            [field!(&outer.inner.a, REQUIRED), field!(&outer.b, REQUIRED)],
        )),
        "a: cannot be blank; b: cannot be blank."
    );
}

#[test]
fn required_then_length() {
    let setting = Setting {
        name: "timeout".into(),
        value: "demo".into(),
    };
    let expected = "value: the length must be between 5 and 10.";

    let err = validate_struct(
        &setting,
        [
            field!(&setting.name, REQUIRED),
            field!(&setting.value, REQUIRED, length(5, 10)),
        ],
    )
    .unwrap_err();
    assert_eq!(err.to_string(), expected);

    let err = validate_struct_with_context(
        &Context::background(),
        &setting,
        [
            field!(&setting.name, REQUIRED),
            field!(&setting.value, REQUIRED, length(5, 10)),
        ],
    )
    .unwrap_err();
    assert_eq!(err.to_string(), expected);
}

#[test]
fn membership_and_patterns() {
    let setting = Setting {
        name: "retries".into(),
        value: "3x".into(),
    };
    let digits = matches_pattern(r"^\d+$").unwrap();
    let err = validate_struct(
        &setting,
        [
            field!(&setting.name, is_in(["timeout", "retries"])),
            field!(&setting.value, digits.error("must be a number")),
        ],
    )
    .unwrap_err();
    assert_eq!(err.to_string(), "value: must be a number.");

    let err = validate_struct(&setting, [field!(&setting.name, is_in(["timeout"]))]).unwrap_err();
    assert_eq!(err.to_string(), "name: must be a valid value.");
}

#[test]
fn closures_as_rules() {
    let setting = Setting {
        name: "limit".into(),
        value: "100".into(),
    };
    let numeric = by(|v: &String| -> Result<(), Error> {
        v.parse::<u32>().map(drop).map_err(|_| "must be numeric".into())
    });
    assert!(validate_struct(&setting, [field!(&setting.value, numeric)]).is_ok());

    let max = by_with_context(|ctx: &Context, v: &String| -> Result<(), Error> {
        let Some(limit) = ctx.value::<u32>() else {
            return Err(InternalError::new("no limit configured").into());
        };
        let n: u32 = v.parse().map_err(|_| Error::from("must be numeric"))?;
        fieldrule::require!(n <= *limit, "exceeds the configured limit");
        Ok(())
    });
    let ctx = Context::background().with_value(50u32);
    let err = validate_struct_with_context(&ctx, &setting, [field!(&setting.value, &max)])
        .unwrap_err();
    assert_eq!(err.to_string(), "value: exceeds the configured limit.");

    let err = validate_struct(&setting, [field!(&setting.value, &max)]).unwrap_err();
    assert!(err.is_internal());
}
