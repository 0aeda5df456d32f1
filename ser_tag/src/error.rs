use std::collections::TryReserveError;

use thiserror::Error;

use crate::tag::FieldId;

/// Failures reported by serialization and deserialization.
///
/// All failures are local and synchronous: they are returned to the
/// immediate caller of the violating operation and nothing is retried
/// internally. Variants carry the context (field identifier, offset,
/// byte counts) needed to diagnose a schema mismatch from the error alone.
#[derive(Debug, Error)]
pub enum Error {
	/// A read required more bytes than remain in the buffer.
	///
	/// The cursor is left where it was; no bytes are consumed by a failed
	/// read.
	#[error("buffer underrun at offset {offset}: needed {needed} bytes, {available} available")]
	BufferUnderrun {
		offset: usize,
		needed: usize,
		available: usize,
	},

	/// A field was written with an identifier not strictly greater than the
	/// previous identifier in the same scope.
	#[error("field identifier {id} must be greater than previous identifier {prev} in this scope")]
	IdentifierOrder { id: FieldId, prev: FieldId },

	/// The gap between consecutive field identifiers does not fit the tag's
	/// delta field.
	#[error("gap between field identifiers {prev:?} and {id} exceeds the tag delta range")]
	DeltaOverflow { id: FieldId, prev: Option<FieldId> },

	/// A single field's payload is too large for the tag's length field.
	#[error("field {id} payload of {len} bytes exceeds the tag length range")]
	FieldTooLarge { id: FieldId, len: usize },

	/// A field's payload did not decode to exactly the byte count its tag
	/// declared. The writer and reader disagree about the field's type.
	#[error("field {id}: tag declared {declared} payload bytes but decoding consumed {consumed}")]
	FieldLength {
		id: FieldId,
		declared: usize,
		consumed: usize,
	},

	/// A decoded tag's delta would advance the field identifier past the
	/// maximum representable value. The buffer is corrupt.
	#[error("tag at offset {offset} advances field identifier beyond representable range")]
	IdentifierOverflow { offset: usize },

	/// A decoded element count or size does not fit in `usize` on this
	/// platform.
	#[error("decoded count {0} does not fit in usize")]
	CountOverflow(u64),

	/// A string containing an embedded NUL cannot be written, as the wire
	/// format is NUL-terminated.
	#[error("string contains an embedded NUL and cannot be NUL-terminated")]
	EmbeddedNul,

	/// Decoded string bytes are not valid UTF-8.
	#[error("decoded string is not valid UTF-8: {0}")]
	Utf8(#[from] std::str::Utf8Error),

	/// Decoded wide-string code units are not valid UTF-16.
	#[error("decoded wide string is not valid UTF-16: {0}")]
	Utf16(#[from] std::string::FromUtf16Error),

	/// A decoded `bool` byte was neither 0 nor 1.
	#[error("invalid bool byte {0:#04x}")]
	InvalidBool(u8),

	/// A decoded `char` value is not a valid Unicode scalar value.
	#[error("invalid char value {0:#010x}")]
	InvalidChar(u32),

	/// The buffer could not be grown to fit a write.
	#[error("buffer allocation failed: {0}")]
	Allocation(#[from] TryReserveError),
}

pub type Result<T> = std::result::Result<T, Error>;
