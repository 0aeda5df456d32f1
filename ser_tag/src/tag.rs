//! Field tagging.
//!
//! Fields inside a record are identified by stable numeric identifiers
//! rather than positional order, so a reader built against a newer or older
//! schema can still parse the subset of fields both sides know. Each field
//! on the wire is framed as
//!
//! ```text
//! [tag: u64 LE = pack(delta, payload length)] [payload bytes]
//! ```
//!
//! The delta compresses consecutive identifiers (`id - prev - 1`, or the
//! identifier itself for a scope's first field); the payload length lets a
//! reader skip a field it does not recognize by byte count alone, without
//! understanding its type.

use crate::bits::Pack2;
use crate::{Error, Result};

/// Stable numeric name of a logical field, assigned by the schema author.
///
/// Must be unique and strictly increasing in write order within one scope.
pub type FieldId = u64;

/// Bits of the tag word holding the identifier delta.
const DELTA_BITS: u32 = 32;
/// Bits of the tag word holding the payload byte length.
const LEN_BITS: u32 = 32;

type TagPack = Pack2<DELTA_BITS, LEN_BITS>;

/// Bytes a tag word occupies on the wire.
pub(crate) const TAG_BYTES: usize = 8;

/// One field's frame header: identifier delta and payload byte length.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Tag {
	pub delta: u32,
	pub len: u32,
}

impl Tag {
	/// Pack into the on-wire word, delta in the most significant half.
	#[inline]
	pub(crate) fn word(self) -> u64 {
		TagPack::pack([self.delta as u64, self.len as u64])
	}

	/// Unpack an on-wire word. Both fields are 32 bits wide, so the
	/// unpacked values always fit.
	#[inline]
	pub(crate) fn from_word(word: u64) -> Self {
		let [delta, len] = TagPack::unpack(word);
		Self {
			delta: delta as u32,
			len: len as u32,
		}
	}

	/// Identifier of the field this tag introduces, given the previous
	/// identifier decoded from the same scope.
	///
	/// `offset` is the tag's position in the buffer, for error context.
	pub(crate) fn identifier(self, prev: Option<FieldId>, offset: usize) -> Result<FieldId> {
		match prev {
			None => Ok(self.delta as FieldId),
			Some(prev) => prev
				.checked_add(self.delta as u64 + 1)
				.ok_or(Error::IdentifierOverflow { offset }),
		}
	}
}

/// Delta encoding of `id` against the previous identifier written in the
/// same scope: the gap minus one, or the identifier itself for the first
/// field.
///
/// Checked contracts: `id` must be strictly greater than `prev`, and the
/// delta must fit the tag's delta field.
pub(crate) fn delta(id: FieldId, prev: Option<FieldId>) -> Result<u32> {
	let wide = match prev {
		None => id,
		Some(prev) if id <= prev => return Err(Error::IdentifierOrder { id, prev }),
		Some(prev) => id - prev - 1,
	};
	u32::try_from(wide).map_err(|_| Error::DeltaOverflow { id, prev })
}

/// Outcome of peeking the next tag while looking for a requested field.
pub(crate) enum Lookahead {
	/// The next field in the buffer is the requested one.
	Found(Tag),
	/// The requested field is absent: the scope ended, or the next
	/// identifier is already past the requested one (the schema shrank).
	Missing,
	/// The next field is one this reader does not know (the schema grew);
	/// skip its payload by byte count and look again.
	Unrecognized { id: FieldId, tag: Tag },
}
