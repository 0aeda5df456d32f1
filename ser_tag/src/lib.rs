//! Compact binary serialization with tagged fields, tolerant of schema
//! evolution.
//!
//! Values are converted to and from a contiguous byte buffer. Each field of
//! a structured record is identified by a stable numeric identifier rather
//! than its position, and framed with a delta-compressed tag carrying the
//! payload's byte length — so a reader whose schema gained or lost fields
//! relative to the writer still decodes every field both sides know:
//! unrecognized fields are skipped by byte count, absent fields come back
//! as [`FieldStatus::Missing`] with the destination's default intact.
//!
//! ```
//! use ser_tag::{from_bytes, to_bytes, Record, Result};
//!
//! #[derive(Record, Debug, Default, PartialEq)]
//! struct Player {
//! 	#[tag(0)]
//! 	health: u32,
//! 	#[tag(2)]
//! 	name: String,
//! }
//!
//! # fn main() -> Result<()> {
//! let mut player = Player {
//! 	health: 7,
//! 	name: "ok".to_owned(),
//! };
//! let bytes = to_bytes(&mut player)?;
//! assert_eq!(from_bytes::<Player>(&bytes)?, player);
//! # Ok(())
//! # }
//! ```
//!
//! The lower-level session API is [`Stream`] (one per buffer, fixed in
//! write or read mode) and [`Scope`] (one per record), with the
//! [`Encode`]/[`Decode`] codec traits underneath as the extensibility
//! point for custom leaf types.

#[cfg(feature = "derive")]
pub use ser_tag_derive::Record;

pub mod bits;
pub mod codec;
pub use codec::{Decode, Encode, WideString};

mod buf;
pub use buf::ByteBuf;

mod error;
pub use error::{Error, Result};

mod scope;
pub use scope::{FieldStatus, Record, Scope};

mod stream;
pub use stream::{Mode, Stream};

mod tag;
pub use tag::FieldId;

/// Serialize a record into a fresh buffer, shrunk to fit.
///
/// The record is taken by `&mut` because [`Record::fields`] serves both
/// directions; a write-mode session only reads from it.
pub fn to_bytes<T: Record>(value: &mut T) -> Result<Vec<u8>> {
	let mut stream = Stream::writer();
	value.fields(&mut stream.scope())?;
	Ok(stream.into_bytes())
}

/// Deserialize a record from `bytes`, starting from its default value.
///
/// Fields absent from `bytes` keep their defaults.
pub fn from_bytes<T: Record + Default>(bytes: &[u8]) -> Result<T> {
	let mut value = T::default();
	read_into(bytes, &mut value)?;
	Ok(value)
}

/// Deserialize a record from `bytes` into an existing value.
///
/// Fields absent from `bytes` are left untouched.
pub fn read_into<T: Record>(bytes: &[u8], value: &mut T) -> Result<()> {
	let mut stream = Stream::reader_borrowed(bytes);
	value.fields(&mut stream.scope())
}
