use std::borrow::Cow;

use crate::buf::ByteBuf;
use crate::codec::Encode;
use crate::scope::Scope;
use crate::Result;

/// Session mode. Fixed when the [`Stream`] is constructed; a stream never
/// changes mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
	/// Copies bytes from values onto the buffer.
	Write,
	/// Copies bytes from the buffer onto values.
	Read,
}

enum Repr<'buf> {
	Write(ByteBuf),
	Read(Cow<'buf, [u8]>),
}

/// Top-level serialization session, owning the byte buffer and cursor.
///
/// A write-mode stream starts with an empty growable buffer; a read-mode
/// stream takes a pre-existing buffer produced by a prior write-mode
/// session, either by ownership transfer ([`reader`](Stream::reader)) or by
/// borrowing a view ([`reader_borrowed`](Stream::reader_borrowed) — the
/// integration point for memory-mapped or externally managed bytes).
///
/// The byte buffer itself is the persisted artifact; there is no header or
/// framing around it. Records are processed through a [`Scope`] obtained
/// from [`scope()`](Stream::scope).
///
/// A stream (with its scopes) is a private unit of work: it needs external
/// synchronization to be touched from more than one thread, and nothing
/// else shares its buffer.
///
/// # Example
///
/// ```
/// use ser_tag::{FieldStatus, Stream};
///
/// let mut out = Stream::writer();
/// let mut scope = out.scope();
/// scope.field(0, &mut 7u32)?;
/// scope.field(2, &mut String::from("ok"))?;
/// let bytes = out.into_bytes();
///
/// let mut input = Stream::reader(bytes);
/// let mut scope = input.scope();
/// let mut count = 0u32;
/// let mut name = String::new();
/// assert_eq!(scope.field(0, &mut count)?, FieldStatus::Found);
/// assert_eq!(scope.field(2, &mut name)?, FieldStatus::Found);
/// assert_eq!(count, 7);
/// assert_eq!(name, "ok");
/// # Ok::<(), ser_tag::Error>(())
/// ```
pub struct Stream<'buf> {
	repr: Repr<'buf>,
	offset: usize,
}

impl Stream<'static> {
	/// Create a write-mode stream with an empty buffer and offset zero.
	/// Memory is allocated when the first field is written.
	///
	/// If the amount of buffer space needed is known, or can be estimated,
	/// in advance, allocating upfront with
	/// [`writer_with_capacity`](Stream::writer_with_capacity) avoids
	/// regrowing the buffer while serializing.
	#[inline]
	pub fn writer() -> Self {
		Self {
			repr: Repr::Write(ByteBuf::new()),
			offset: 0,
		}
	}

	/// Create a write-mode stream with `capacity` bytes pre-allocated.
	#[inline]
	pub fn writer_with_capacity(capacity: usize) -> Self {
		Self {
			repr: Repr::Write(ByteBuf::with_capacity(capacity)),
			offset: 0,
		}
	}

	/// Create a read-mode stream taking ownership of `bytes`.
	#[inline]
	pub fn reader(bytes: Vec<u8>) -> Self {
		Self {
			repr: Repr::Read(Cow::Owned(bytes)),
			offset: 0,
		}
	}
}

impl<'buf> Stream<'buf> {
	/// Create a read-mode stream borrowing a view over `bytes`.
	#[inline]
	pub fn reader_borrowed(bytes: &'buf [u8]) -> Self {
		Self {
			repr: Repr::Read(Cow::Borrowed(bytes)),
			offset: 0,
		}
	}

	#[inline]
	pub fn mode(&self) -> Mode {
		match &self.repr {
			Repr::Write(_) => Mode::Write,
			Repr::Read(_) => Mode::Read,
		}
	}

	/// Current cursor position in the buffer.
	#[inline]
	pub fn offset(&self) -> usize {
		self.offset
	}

	/// The buffer's bytes: everything written so far in write mode, the
	/// whole input in read mode.
	#[inline]
	pub fn as_bytes(&self) -> &[u8] {
		match &self.repr {
			Repr::Write(buf) => buf.as_slice(),
			Repr::Read(bytes) => bytes,
		}
	}

	/// Begin a structured record.
	///
	/// Nested records obtain nested scopes through
	/// [`Scope::record`](crate::Scope::record); all scopes share this
	/// stream's buffer and cursor.
	#[inline]
	pub fn scope(&mut self) -> Scope<'_, 'buf> {
		Scope::new(self)
	}

	/// Consume the stream, yielding the buffer's bytes.
	///
	/// In write mode the buffer is shrunk to the written length first. In
	/// read mode this hands back the input (copied, if it was borrowed).
	#[inline]
	pub fn into_bytes(self) -> Vec<u8> {
		match self.repr {
			Repr::Write(mut buf) => {
				buf.shrink_to_fit();
				buf.into_vec()
			}
			Repr::Read(bytes) => bytes.into_owned(),
		}
	}

	/// Reset the session to its starting state: a write-mode stream
	/// discards all written bytes, a read-mode stream rewinds to the start
	/// of its buffer. Capacity is kept either way.
	#[inline]
	pub fn clear(&mut self) {
		self.offset = 0;
		if let Repr::Write(buf) = &mut self.repr {
			buf.clear();
		}
	}

	/// Encode `value` at the cursor and advance by the bytes written.
	///
	/// Write mode only; scopes dispatch on [`mode()`](Stream::mode) before
	/// calling this.
	pub(crate) fn write_value<T: Encode + ?Sized>(&mut self, value: &T) -> Result<usize> {
		let buf = match &mut self.repr {
			Repr::Write(buf) => buf,
			Repr::Read(_) => unreachable!("write path taken on a read-mode stream"),
		};
		let written = value.encode(buf, self.offset)?;
		self.offset += written;
		Ok(written)
	}

	/// Overwrite an already-written word at `offset`, leaving the cursor
	/// alone. Used to patch a field's tag once its payload length is known.
	pub(crate) fn patch_word(&mut self, offset: usize, word: u64) -> Result<()> {
		match &mut self.repr {
			Repr::Write(buf) => buf.write_at(offset, &word.to_le_bytes()),
			Repr::Read(_) => unreachable!("write path taken on a read-mode stream"),
		}
	}

	/// Advance the cursor by `n` bytes already accounted for.
	#[inline]
	pub(crate) fn advance(&mut self, n: usize) {
		self.offset += n;
	}

	#[inline]
	pub(crate) fn set_offset(&mut self, offset: usize) {
		debug_assert!(offset <= self.as_bytes().len());
		self.offset = offset;
	}
}
