use proc_macro2::TokenStream;
use quote::{quote, quote_spanned};
use syn::{spanned::Spanned, DataStruct, Field, Fields, Generics, Ident, Index, LitInt};

pub fn derive_struct(data: DataStruct, ident: Ident, generics: Generics) -> TokenStream {
	let field_stmts: Vec<TokenStream> = match data.fields {
		Fields::Named(fields) => get_field_stmts(fields.named.iter().map(|field| {
			let field_name = field.ident.as_ref().expect("Missing field name");
			(quote! {#field_name}, field)
		})),
		Fields::Unnamed(fields) => {
			get_field_stmts(fields.unnamed.iter().enumerate().map(|(index, field)| {
				let index = Index::from(index);
				(quote! {#index}, field)
			}))
		}
		Fields::Unit => vec![],
	};

	let (impl_generics, type_generics, where_clause) = generics.split_for_impl();

	quote! {
		#[automatically_derived]
		impl #impl_generics ::ser_tag::Record for #ident #type_generics #where_clause {
			fn fields(
				&mut self,
				scope: &mut ::ser_tag::Scope<'_, '_>,
			) -> ::ser_tag::Result<()> {
				#(#field_stmts)*
				Ok(())
			}
		}
	}
}

fn get_field_stmts<'f>(
	fields: impl Iterator<Item = (TokenStream, &'f Field)>,
) -> Vec<TokenStream> {
	let mut prev_id: Option<u64> = None;
	let mut stmts = Vec::new();

	for (field_name, field) in fields {
		let (id, kind) = match get_id(field) {
			Some(tagged) => tagged,
			// Fields without a `#[tag]`/`#[record]` attribute are not serialized
			None => continue,
		};

		// Enforce the scope's ordering contract at expansion time, so a
		// mis-numbered schema fails the build instead of the first write.
		if let Some(prev_id) = prev_id {
			if id <= prev_id {
				panic!(
					"Field identifiers must be strictly increasing in declaration order; \
					 found {} after {}",
					id, prev_id
				);
			}
		}
		prev_id = Some(id);

		stmts.push(match kind {
			FieldKind::Value => quote_spanned! {field.span()=>
				scope.field(#id, &mut self.#field_name)?;
			},
			FieldKind::Record => quote_spanned! {field.span()=>
				scope.record(#id, |scope| ::ser_tag::Record::fields(&mut self.#field_name, scope))?;
			},
		});
	}

	stmts
}

enum FieldKind {
	/// `#[tag(N)]`: a value with an `Encode`/`Decode` binding.
	Value,
	/// `#[record(N)]`: a nested record, framed as one skippable field.
	Record,
}

fn get_id(field: &Field) -> Option<(u64, FieldKind)> {
	let mut found: Option<(u64, FieldKind)> = None;

	for attr in &field.attrs {
		let kind = if attr.path.is_ident("tag") {
			FieldKind::Value
		} else if attr.path.is_ident("record") {
			FieldKind::Record
		} else {
			continue;
		};

		if found.is_some() {
			panic!("Cannot have more than 1 `#[tag]`/`#[record]` attribute on a field");
		}

		let id = attr
			.parse_args::<LitInt>()
			.and_then(|lit| lit.base10_parse::<u64>())
			.expect("`#[tag]`/`#[record]` needs a field identifier e.g. `#[tag(2)]`");
		found = Some((id, kind));
	}

	found
}
