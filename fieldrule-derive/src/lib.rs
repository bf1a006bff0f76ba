use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

mod args;
mod codegen;
mod struct_info;

use struct_info::StructInfo;

/// # `Record` derive macro
///
/// Implements `fieldrule::Record` for a struct with named fields, so that
/// references taken to its fields can be mapped back to the fields they
/// designate. It also implements:
///
/// * `AsRecord`, used when the struct is embedded in another record;
/// * `Target` for `&T` and `&mut T` (validation targets) and for `T` and `&&T`
///   (rejected as `NotAStructPointer`);
/// * `Selector` for `T`, so that binding a copy instead of a reference is
///   reported as `FieldPointer`.
///
/// ```ignore
/// use fieldrule::{Record, Validatable};
///
/// #[derive(Record)]
/// struct Customer {
///     #[serde(rename = "customer_name")]
///     name: String,
///     #[field(embed, validate)]
///     address: Address,
///     #[field(validate)]
///     billing: Option<Box<Address>>,
/// }
/// ```
///
/// ## `#[field(..)]` attributes
///
/// | Attribute | Purpose |
/// |-----------|---------|
/// | `embed` | The field is an embedded record: its fields are located as if declared on the parent, and its failures are merged unprefixed. Works through `Box` and `Option`. |
/// | `validate` | The field type implements `Validatable`; it is validated when bound without rules. |
/// | `rename = ".."` | Name recorded under the `field` tag key. |
///
/// ## `#[serde(..)]` attributes
///
/// `rename = ".."`, `rename(serialize = "..")`, `skip`, `skip_serializing` and
/// `flatten` (treated as `embed`) are read; any other key is ignored.
///
/// Generic structs, tuple structs and enums are rejected.
#[proc_macro_derive(Record, attributes(field, serde))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input: DeriveInput = parse_macro_input!(input);

    let info = match StructInfo::from_derive_input(input) {
        Ok(info) => info,
        Err(e) => return e.to_compile_error().into(),
    };

    match codegen::generate(&info) {
        Ok(ts) => TokenStream::from(ts),
        Err(e) => e.to_compile_error().into(),
    }
}
