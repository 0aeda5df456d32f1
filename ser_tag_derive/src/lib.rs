use proc_macro2;
use syn::{parse_macro_input, Data, DeriveInput};

mod structs;
use structs::derive_struct;

/// Derive `Record` for a struct, routing each field through the scope with
/// a stable identifier.
///
/// Fields are annotated with `#[tag(N)]` for values with an
/// `Encode`/`Decode` binding, or `#[record(N)]` for nested records.
/// Identifiers must be strictly increasing in declaration order — the wire
/// format's delta encoding requires it, so the macro rejects anything else
/// at compile time rather than at the first write. Fields without either
/// attribute are not serialized.
#[proc_macro_derive(Record, attributes(tag, record))]
pub fn record(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
	let input = parse_macro_input!(input as DeriveInput);
	record_impl(input).into()
}

fn record_impl(input: DeriveInput) -> proc_macro2::TokenStream {
	match input.data {
		Data::Struct(data) => derive_struct(data, input.ident, input.generics),
		Data::Enum(_) => panic!(
			"Deriving `Record` on enums is not supported; a record's fields need stable identifiers"
		),
		Data::Union(_) => panic!("Deriving `Record` on unions is not supported"),
	}
}
