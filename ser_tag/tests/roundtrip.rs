mod common;
use common::{rng, Generate, Profile};

use ser_tag::{
	from_bytes, to_bytes, ByteBuf, Encode, FieldStatus, Record, Stream, WideString,
};

#[test]
fn scalar_and_string_fields() {
	let mut out = Stream::writer();
	let mut scope = out.scope();
	scope.field(0, &mut 7u32).unwrap();
	scope.field(2, &mut String::from("ok")).unwrap();
	let bytes = out.into_bytes();

	let mut input = Stream::reader(bytes);
	let mut scope = input.scope();
	let mut count = 0u32;
	let mut name = String::new();
	assert_eq!(scope.field(0, &mut count).unwrap(), FieldStatus::Found);
	assert_eq!(scope.field(2, &mut name).unwrap(), FieldStatus::Found);
	assert_eq!(count, 7);
	assert_eq!(name, "ok");
}

#[test]
fn all_scalars() {
	let mut out = Stream::writer();
	let mut scope = out.scope();
	scope.field(0, &mut 0x01u8).unwrap();
	scope.field(1, &mut 0x0203u16).unwrap();
	scope.field(2, &mut 0x04050607u32).unwrap();
	scope.field(3, &mut 0x08090a0b0c0d0e0fu64).unwrap();
	scope
		.field(4, &mut 0x101112131415161718191a1b1c1d1e1fu128)
		.unwrap();
	scope.field(5, &mut -5i8).unwrap();
	scope.field(6, &mut -500i16).unwrap();
	scope.field(7, &mut -500_000i32).unwrap();
	scope.field(8, &mut -5_000_000_000i64).unwrap();
	scope.field(9, &mut i128::MIN).unwrap();
	scope.field(10, &mut usize::MAX).unwrap();
	scope.field(11, &mut (isize::MAX / 2)).unwrap();
	scope.field(12, &mut f32::MAX).unwrap();
	scope.field(13, &mut (f64::MAX / 2.0)).unwrap();
	scope.field(14, &mut true).unwrap();
	scope.field(15, &mut 'c').unwrap();
	let bytes = out.into_bytes();

	let mut input = Stream::reader(bytes);
	let mut scope = input.scope();

	macro_rules! read_back {
		($id:expr, $init:expr, $expected:expr) => {{
			let mut value = $init;
			assert_eq!(scope.field($id, &mut value).unwrap(), FieldStatus::Found);
			assert_eq!(value, $expected);
		}};
	}

	read_back!(0, 0u8, 0x01);
	read_back!(1, 0u16, 0x0203);
	read_back!(2, 0u32, 0x04050607);
	read_back!(3, 0u64, 0x08090a0b0c0d0e0f);
	read_back!(4, 0u128, 0x101112131415161718191a1b1c1d1e1f);
	read_back!(5, 0i8, -5);
	read_back!(6, 0i16, -500);
	read_back!(7, 0i32, -500_000);
	read_back!(8, 0i64, -5_000_000_000);
	read_back!(9, 0i128, i128::MIN);
	read_back!(10, 0usize, usize::MAX);
	read_back!(11, 0isize, isize::MAX / 2);
	read_back!(12, 0f32, f32::MAX);
	read_back!(13, 0f64, f64::MAX / 2.0);
	read_back!(14, false, true);
	read_back!(15, 'x', 'c');
}

#[test]
fn wide_strings() {
	let mut out = Stream::writer();
	let mut scope = out.scope();
	scope.field(0, &mut WideString::from("plain")).unwrap();
	// Surrogate pairs on the wire: a non-BMP scalar
	scope.field(1, &mut WideString::from("clef 𝄞")).unwrap();
	scope.field(2, &mut WideString::default()).unwrap();
	let bytes = out.into_bytes();

	let mut input = Stream::reader(bytes);
	let mut scope = input.scope();
	let mut a = WideString::default();
	let mut b = WideString::default();
	let mut c = WideString::from("overwritten");
	scope.field(0, &mut a).unwrap();
	scope.field(1, &mut b).unwrap();
	scope.field(2, &mut c).unwrap();
	assert_eq!(a.as_str(), "plain");
	assert_eq!(b.as_str(), "clef 𝄞");
	assert_eq!(c.as_str(), "");
}

#[test]
fn sequence_of_pairs() {
	let mut pairs: Vec<(i32, String)> = vec![
		(-1, "first".to_owned()),
		(0, "second".to_owned()),
		(i32::MAX, "third".to_owned()),
	];

	let mut out = Stream::writer();
	out.scope().field(0, &mut pairs).unwrap();
	let bytes = out.into_bytes();

	let mut decoded: Vec<(i32, String)> = Vec::new();
	let mut input = Stream::reader(bytes);
	assert_eq!(
		input.scope().field(0, &mut decoded).unwrap(),
		FieldStatus::Found
	);
	assert_eq!(decoded, pairs);
}

#[test]
fn nested_sequences_tuples_arrays() {
	let mut deep: Vec<Vec<u16>> = vec![vec![], vec![1], vec![2, 3, 4]];
	let mut tuple = (1u8, -2i64, "three".to_owned(), (4.0f64, false));
	let mut array = [5u32, 6, 7];

	let mut out = Stream::writer();
	let mut scope = out.scope();
	scope.field(0, &mut deep).unwrap();
	scope.field(1, &mut tuple).unwrap();
	scope.field(2, &mut array).unwrap();
	let bytes = out.into_bytes();

	let mut input = Stream::reader(bytes);
	let mut scope = input.scope();
	let mut deep2: Vec<Vec<u16>> = Vec::new();
	let mut tuple2 = (0u8, 0i64, String::new(), (0.0f64, true));
	let mut array2 = [0u32; 3];
	scope.field(0, &mut deep2).unwrap();
	scope.field(1, &mut tuple2).unwrap();
	scope.field(2, &mut array2).unwrap();
	assert_eq!(deep2, deep);
	assert_eq!(tuple2, tuple);
	assert_eq!(array2, array);
}

#[test]
fn cursor_accounting() {
	// After writing N values, the cursor (and buffer length) equals the sum
	// of bytes each individual write reported.
	let mut buf = ByteBuf::new();
	let mut offset = 0;
	offset += 7u32.encode(&mut buf, offset).unwrap();
	offset += String::from("hello").encode(&mut buf, offset).unwrap();
	offset += vec![1u8, 2, 3].encode(&mut buf, offset).unwrap();
	offset += (-1i16, 2.5f64).encode(&mut buf, offset).unwrap();
	assert_eq!(offset, 4 + 6 + (8 + 3) + (2 + 8));
	assert_eq!(buf.len(), offset);

	// Same accounting through a stream
	let mut out = Stream::writer();
	let mut scope = out.scope();
	scope.field(0, &mut 7u32).unwrap();
	scope.field(1, &mut String::from("hello")).unwrap();
	drop(scope);
	// Each field adds an 8-byte tag ahead of its payload
	assert_eq!(out.offset(), (8 + 4) + (8 + 6));
	assert_eq!(out.as_bytes().len(), out.offset());
}

#[test]
fn delta_spans_large_identifier_gaps() {
	let mut out = Stream::writer();
	let mut scope = out.scope();
	scope.field(1, &mut 0xaau8).unwrap();
	scope.field(1_000_000, &mut 0xbbu8).unwrap();
	scope.field(1_000_001, &mut 0xccu8).unwrap();
	let bytes = out.into_bytes();

	let mut input = Stream::reader(bytes);
	let mut scope = input.scope();
	let (mut a, mut b, mut c) = (0u8, 0u8, 0u8);
	assert_eq!(scope.field(1, &mut a).unwrap(), FieldStatus::Found);
	assert_eq!(scope.field(1_000_000, &mut b).unwrap(), FieldStatus::Found);
	assert_eq!(scope.field(1_000_001, &mut c).unwrap(), FieldStatus::Found);
	assert_eq!((a, b, c), (0xaa, 0xbb, 0xcc));
}

#[test]
fn derived_record() {
	let mut profile = Profile {
		id: 17,
		name: "dagny".to_owned(),
		motto: WideString::from("never yield"),
		..Profile::default()
	};
	profile.stats.level = 3;
	profile.unlocked = vec![(9, "ladder".to_owned())];

	let bytes = to_bytes(&mut profile).unwrap();
	let decoded: Profile = from_bytes(&bytes).unwrap();
	assert_eq!(decoded, profile);
}

#[test]
fn generated_records() {
	let mut rng = rng();
	for _ in 0..100 {
		let mut profile = Profile::generate(&mut rng);
		let bytes = to_bytes(&mut profile).unwrap();
		let decoded: Profile = from_bytes(&bytes).unwrap();
		assert_eq!(decoded, profile);
	}
}

#[test]
fn read_borrowed_view() {
	let mut out = Stream::writer();
	out.scope().field(0, &mut 99u64).unwrap();
	let bytes = out.into_bytes();

	// Borrowing the bytes works the same as taking ownership
	let mut input = Stream::reader_borrowed(&bytes);
	let mut value = 0u64;
	assert_eq!(
		input.scope().field(0, &mut value).unwrap(),
		FieldStatus::Found
	);
	assert_eq!(value, 99);
}

#[test]
fn writer_reuse_after_clear() {
	let mut out = Stream::writer();
	out.scope().field(0, &mut 1u8).unwrap();
	let first_len = out.as_bytes().len();
	out.clear();
	assert_eq!(out.offset(), 0);
	assert!(out.as_bytes().is_empty());

	out.scope().field(0, &mut 2u8).unwrap();
	assert_eq!(out.as_bytes().len(), first_len);

	let mut input = Stream::reader(out.into_bytes());
	let mut value = 0u8;
	input.scope().field(0, &mut value).unwrap();
	assert_eq!(value, 2);
}

#[test]
fn record_trait_is_bidirectional() {
	// One `fields` implementation serves both modes.
	struct Manual {
		a: u32,
		b: String,
	}

	impl Record for Manual {
		fn fields(&mut self, scope: &mut ser_tag::Scope<'_, '_>) -> ser_tag::Result<()> {
			scope.field(0, &mut self.a)?;
			scope.field(2, &mut self.b)?;
			Ok(())
		}
	}

	let mut manual = Manual {
		a: 7,
		b: "ok".to_owned(),
	};
	let bytes = to_bytes(&mut manual).unwrap();

	let mut decoded = Manual {
		a: 0,
		b: String::new(),
	};
	ser_tag::read_into(&bytes, &mut decoded).unwrap();
	assert_eq!(decoded.a, 7);
	assert_eq!(decoded.b, "ok");
}
