use crate::{Error, Result};

/// Growable byte buffer owned by a write-mode [`Stream`].
///
/// Just a wrapper around `Vec<u8>`. The buffer's length always equals the
/// total bytes written so far (codecs grow it to exactly fit each write);
/// capacity grows separately with `Vec`'s amortized doubling, so repeated
/// small writes do not reallocate per field.
///
/// [`Stream`]: crate::Stream
pub struct ByteBuf {
	inner: Vec<u8>,
}

impl ByteBuf {
	/// Create new empty `ByteBuf` without allocating. Memory is allocated
	/// when the first value is written.
	#[inline]
	pub fn new() -> Self {
		Self { inner: Vec::new() }
	}

	/// Create new `ByteBuf` with pre-allocated capacity of `capacity` bytes.
	#[inline]
	pub fn with_capacity(capacity: usize) -> Self {
		Self {
			inner: Vec::with_capacity(capacity),
		}
	}

	/// Number of bytes written so far.
	#[inline]
	pub fn len(&self) -> usize {
		self.inner.len()
	}

	#[inline]
	pub fn is_empty(&self) -> bool {
		self.inner.is_empty()
	}

	/// Current capacity in bytes.
	#[inline]
	pub fn capacity(&self) -> usize {
		self.inner.capacity()
	}

	#[inline]
	pub fn as_slice(&self) -> &[u8] {
		self.inner.as_slice()
	}

	/// Write `bytes` at `offset`, growing the buffer if the write extends
	/// past the current end.
	///
	/// Writes within the already-written region overwrite in place. This is
	/// how a field's tag word, written as a placeholder before the payload,
	/// is patched once the payload length is known.
	#[inline]
	pub fn write_at(&mut self, offset: usize, bytes: &[u8]) -> Result<()> {
		// A write is either a patch of existing bytes or an append at the
		// current end. Offsets past the end would leave a gap of zeroes the
		// cursor never accounted for.
		debug_assert!(offset <= self.inner.len());

		let end = offset + bytes.len();
		if end > self.inner.len() {
			self.grow_to(end)?;
		}
		self.inner[offset..end].copy_from_slice(bytes);
		Ok(())
	}

	/// Grow the buffer's length to `new_len`, zero-filling the new bytes.
	///
	/// Failure to allocate is reported as [`Error::Allocation`]; the buffer
	/// is unchanged in that case.
	#[inline]
	pub fn grow_to(&mut self, new_len: usize) -> Result<()> {
		debug_assert!(new_len >= self.inner.len());

		// `try_reserve` grows capacity with the same amortized strategy as
		// `reserve`, so the `resize` below cannot reallocate (and cannot
		// fail).
		self
			.inner
			.try_reserve(new_len - self.inner.len())
			.map_err(Error::Allocation)?;
		self.inner.resize(new_len, 0);
		Ok(())
	}

	/// Discard all written bytes. Does not reduce capacity.
	#[inline]
	pub fn clear(&mut self) {
		self.inner.clear();
	}

	/// Shrink capacity to the written length.
	#[inline]
	pub fn shrink_to_fit(&mut self) {
		self.inner.shrink_to_fit();
	}

	/// Consume the buffer, yielding the written bytes.
	#[inline]
	pub fn into_vec(self) -> Vec<u8> {
		self.inner
	}
}

impl Default for ByteBuf {
	#[inline]
	fn default() -> Self {
		Self::new()
	}
}
