use log::trace;

use crate::codec::{Decode, Encode};
use crate::stream::{Mode, Stream};
use crate::tag::{self, FieldId, Lookahead, Tag, TAG_BYTES};
use crate::{Error, Result};

/// Caller-visible outcome of processing one field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldStatus {
	/// The field was written, or was present in the buffer and decoded.
	Found,
	/// Read mode only: the buffer carries no such field. The destination
	/// was left untouched and zero bytes were consumed.
	Missing,
}

impl FieldStatus {
	#[inline]
	pub fn is_found(self) -> bool {
		matches!(self, FieldStatus::Found)
	}

	#[inline]
	pub fn is_missing(self) -> bool {
		matches!(self, FieldStatus::Missing)
	}
}

/// Structured record types implement this trait, routing each of their
/// fields through the scope with a stable identifier.
///
/// Usually implemented with `#[derive(Record)]` and `#[tag(N)]` field
/// attributes; a hand-written implementation is a sequence of
/// [`Scope::field`]/[`Scope::record`] calls with ascending identifiers.
///
/// The same implementation serves both directions: the scope dispatches on
/// its stream's mode, so `fields` reads or writes depending on the session
/// it was handed.
pub trait Record {
	/// Route each of the record's fields through `scope`, in ascending
	/// field-identifier order.
	fn fields(&mut self, scope: &mut Scope<'_, '_>) -> Result<()>;
}

/// Bookkeeping context for one structured record's fields.
///
/// A scope holds no bytes of its own: it borrows its [`Stream`]'s buffer
/// and cursor and tracks only the identifier state needed to compute
/// deltas. Dropping a scope performs no flush — every field's bytes are
/// committed to the stream as the field is processed.
pub struct Scope<'stream, 'buf> {
	stream: &'stream mut Stream<'buf>,
	/// Identifier of the last field written to (or consumed from) the
	/// buffer in this scope. `None` until the first field.
	prev_id: Option<FieldId>,
	/// Read mode: end of this record's bytes — the buffer's end for a
	/// top-level scope, the enclosing field's payload fence for a nested
	/// one. Unused in write mode.
	end: usize,
}

impl<'stream, 'buf> Scope<'stream, 'buf> {
	pub(crate) fn new(stream: &'stream mut Stream<'buf>) -> Self {
		let end = match stream.mode() {
			Mode::Read => stream.as_bytes().len(),
			Mode::Write => usize::MAX,
		};
		Self {
			stream,
			prev_id: None,
			end,
		}
	}

	/// Process one field: write `value` in a write-mode session, decode
	/// into `value` in a read-mode session.
	///
	/// Identifiers must be strictly increasing within a scope, in both the
	/// order fields are written and the order they are asked for.
	///
	/// On a read, three things can happen:
	///
	/// * the buffer's next field is `id` — it is decoded into `value` and
	///   [`FieldStatus::Found`] is returned;
	/// * the buffer has fields this code does not know (its writer's schema
	///   was newer) — they are skipped by their declared byte length until
	///   one of the other cases applies;
	/// * the buffer has no field `id` (its writer's schema was older) —
	///   `value` is left untouched, no bytes are consumed, and
	///   [`FieldStatus::Missing`] is returned, so a default survives.
	pub fn field<T: Encode + Decode>(&mut self, id: FieldId, value: &mut T) -> Result<FieldStatus> {
		match self.stream.mode() {
			Mode::Write => {
				self.write_field(id, value)?;
				Ok(FieldStatus::Found)
			}
			Mode::Read => self.read_field(id, value),
		}
	}

	/// Process a nested record as a single field.
	///
	/// The closure receives a fresh scope for the nested record, sharing
	/// this stream's buffer and cursor, with its own identifier sequence.
	/// On the wire the whole nested record is one tagged field, so a reader
	/// that does not know `id` skips the record in one step.
	///
	/// On a read, fields at the end of the nested record that the closure
	/// did not ask for are skipped, keeping the cursor aligned for the
	/// fields after the record.
	pub fn record<F>(&mut self, id: FieldId, f: F) -> Result<FieldStatus>
	where
		F: FnOnce(&mut Scope<'_, 'buf>) -> Result<()>,
	{
		match self.stream.mode() {
			Mode::Write => {
				let delta = tag::delta(id, self.prev_id)?;
				let tag_pos = self.write_tag_placeholder()?;

				let start = self.stream.offset();
				let mut nested = Scope {
					stream: &mut *self.stream,
					prev_id: None,
					end: usize::MAX,
				};
				f(&mut nested)?;

				let len = self.stream.offset() - start;
				self.patch_tag(tag_pos, id, delta, len)?;
				self.prev_id = Some(id);
				Ok(FieldStatus::Found)
			}
			Mode::Read => {
				let tag = match self.locate(id)? {
					Some(tag) => tag,
					None => return Ok(FieldStatus::Missing),
				};

				let fence = self.stream.offset() + tag.len as usize;
				let mut nested = Scope {
					stream: &mut *self.stream,
					prev_id: None,
					end: fence,
				};
				f(&mut nested)?;

				let unread = fence - self.stream.offset();
				if unread > 0 {
					trace!("skipping {unread} unread bytes at the end of record field {id}");
				}
				self.stream.set_offset(fence);
				self.prev_id = Some(id);
				Ok(FieldStatus::Found)
			}
		}
	}

	/// Write path: order check, tag placeholder, payload, tag patch.
	fn write_field<T: Encode>(&mut self, id: FieldId, value: &T) -> Result<()> {
		// Ordering and delta range are checked before any bytes are written,
		// so a rejected field leaves the buffer as it was.
		let delta = tag::delta(id, self.prev_id)?;

		let tag_pos = self.write_tag_placeholder()?;
		let len = self.stream.write_value(value)?;
		self.patch_tag(tag_pos, id, delta, len)?;

		self.prev_id = Some(id);
		Ok(())
	}

	/// Reserve the tag word's bytes at the cursor, returning their
	/// position. The payload length half of the tag is only known once the
	/// payload's codec has run, so the tag is patched afterwards.
	fn write_tag_placeholder(&mut self) -> Result<usize> {
		let tag_pos = self.stream.offset();
		let written = self.stream.write_value(&0u64)?;
		debug_assert_eq!(written, TAG_BYTES);
		Ok(tag_pos)
	}

	fn patch_tag(&mut self, tag_pos: usize, id: FieldId, delta: u32, len: usize) -> Result<()> {
		let len = u32::try_from(len).map_err(|_| Error::FieldTooLarge { id, len })?;
		self.stream.patch_word(tag_pos, Tag { delta, len }.word())
	}

	/// Read path: locate the field, then decode its payload against the
	/// length the tag declared.
	fn read_field<T: Decode>(&mut self, id: FieldId, value: &mut T) -> Result<FieldStatus> {
		let tag = match self.locate(id)? {
			Some(tag) => tag,
			None => return Ok(FieldStatus::Missing),
		};

		// Decode against a fence at the payload's declared end, so the
		// codec cannot read past the field even if writer and reader
		// disagree about its type.
		let offset = self.stream.offset();
		let declared = tag.len as usize;
		let (decoded, consumed) = T::decode(&self.stream.as_bytes()[..offset + declared], offset)?;
		if consumed != declared {
			return Err(Error::FieldLength {
				id,
				declared,
				consumed,
			});
		}

		*value = decoded;
		self.stream.advance(consumed);
		self.prev_id = Some(id);
		Ok(FieldStatus::Found)
	}

	/// Walk tags forward until the requested field is found or shown to be
	/// absent, skipping unrecognized fields by their declared byte length.
	///
	/// On `Some`, the matching tag has been consumed and the cursor sits on
	/// its payload (which is verified to lie within the scope). On `None`,
	/// the cursor has consumed nothing beyond skipped fields.
	fn locate(&mut self, wanted: FieldId) -> Result<Option<Tag>> {
		loop {
			match self.peek(wanted)? {
				Lookahead::Missing => return Ok(None),
				Lookahead::Found(tag) => {
					self.stream.advance(TAG_BYTES);
					return Ok(Some(tag));
				}
				Lookahead::Unrecognized { id, tag } => {
					trace!(
						"skipping unrecognized field {id} ({len} payload bytes)",
						len = tag.len
					);
					self.stream.advance(TAG_BYTES + tag.len as usize);
					self.prev_id = Some(id);
				}
			}
		}
	}

	/// Peek the tag at the cursor and classify it against `wanted`, without
	/// consuming any bytes.
	fn peek(&self, wanted: FieldId) -> Result<Lookahead> {
		let offset = self.stream.offset();
		if offset >= self.end {
			return Ok(Lookahead::Missing);
		}

		let bytes = &self.stream.as_bytes()[..self.end];
		let (word, _) = u64::decode(bytes, offset)?;
		let tag = Tag::from_word(word);
		let id = tag.identifier(self.prev_id, offset)?;

		// The payload must lie inside the scope whether or not this reader
		// recognizes the field; skipping relies on the declared length.
		let available = self.end - (offset + TAG_BYTES);
		let needed = tag.len as usize;
		if needed > available {
			return Err(Error::BufferUnderrun {
				offset: offset + TAG_BYTES,
				needed,
				available,
			});
		}

		Ok(if id == wanted {
			Lookahead::Found(tag)
		} else if id > wanted {
			Lookahead::Missing
		} else {
			Lookahead::Unrecognized { id, tag }
		})
	}
}
