//! Codec bindings for recursive containers: sequences, arrays, tuples.
//!
//! Sequences are length-prefixed (element count as an 8-byte unsigned LE
//! integer); arrays and tuples are arity-fixed and carry no prefix. Total
//! bytes written/read is the sum of the prefix and all recursive calls.

use std::cmp;

use super::{Decode, Encode};
use crate::{buf::ByteBuf, Error, Result};

impl<T: Encode> Encode for [T] {
	fn encode(&self, buf: &mut ByteBuf, offset: usize) -> Result<usize> {
		let mut written = (self.len() as u64).encode(buf, offset)?;
		for value in self {
			written += value.encode(buf, offset + written)?;
		}
		Ok(written)
	}
}

impl<T: Encode> Encode for Vec<T> {
	#[inline]
	fn encode(&self, buf: &mut ByteBuf, offset: usize) -> Result<usize> {
		self.as_slice().encode(buf, offset)
	}
}

impl<T: Decode> Decode for Vec<T> {
	fn decode(bytes: &[u8], offset: usize) -> Result<(Self, usize)> {
		let (count, mut read) = u64::decode(bytes, offset)?;
		let count = usize::try_from(count).map_err(|_| Error::CountOverflow(count))?;

		// A corrupt count must not drive allocation. Reserve no more than one
		// element per byte actually remaining in the buffer; decoding the
		// elements grows the vector normally past that if the bytes are
		// really there.
		let remaining = bytes.len().saturating_sub(offset + read);
		let mut values = Vec::with_capacity(cmp::min(count, remaining));
		for _ in 0..count {
			let (value, n) = T::decode(bytes, offset + read)?;
			read += n;
			values.push(value);
		}
		Ok((values, read))
	}
}

impl<T: Encode, const N: usize> Encode for [T; N] {
	fn encode(&self, buf: &mut ByteBuf, offset: usize) -> Result<usize> {
		let mut written = 0;
		for value in self {
			written += value.encode(buf, offset + written)?;
		}
		Ok(written)
	}
}

impl<T: Decode, const N: usize> Decode for [T; N] {
	fn decode(bytes: &[u8], offset: usize) -> Result<(Self, usize)> {
		let mut values = Vec::with_capacity(N);
		let mut read = 0;
		for _ in 0..N {
			let (value, n) = T::decode(bytes, offset + read)?;
			read += n;
			values.push(value);
		}

		match <[T; N]>::try_from(values) {
			Ok(array) => Ok((array, read)),
			// Length is `N` by construction
			Err(_) => unreachable!(),
		}
	}
}

macro_rules! impl_codec_for_tuple {
	($($name:ident : $idx:tt),+) => {
		impl<$($name: Encode),+> Encode for ($($name,)+) {
			fn encode(&self, buf: &mut ByteBuf, offset: usize) -> Result<usize> {
				let mut written = 0;
				$(written += self.$idx.encode(buf, offset + written)?;)+
				Ok(written)
			}
		}

		impl<$($name: Decode),+> Decode for ($($name,)+) {
			fn decode(bytes: &[u8], offset: usize) -> Result<(Self, usize)> {
				let mut read = 0;
				let value = ($(
					{
						let (value, n) = $name::decode(bytes, offset + read)?;
						read += n;
						value
					},
				)+);
				Ok((value, read))
			}
		}
	};
}

impl_codec_for_tuple!(A:0);
impl_codec_for_tuple!(A:0, B:1);
impl_codec_for_tuple!(A:0, B:1, C:2);
impl_codec_for_tuple!(A:0, B:1, C:2, D:3);
impl_codec_for_tuple!(A:0, B:1, C:2, D:3, E:4);
impl_codec_for_tuple!(A:0, B:1, C:2, D:3, E:4, F:5);
impl_codec_for_tuple!(A:0, B:1, C:2, D:3, E:4, F:5, G:6);
impl_codec_for_tuple!(A:0, B:1, C:2, D:3, E:4, F:5, G:6, H:7);
