//! Codec bindings for trivially-copyable scalar types.
//!
//! All multi-byte values travel little-endian. `usize`/`isize` are 8 bytes
//! on the wire regardless of the platform's word size, so buffers written
//! on one platform decode on another.

use std::mem;

use super::{take, Decode, Encode};
use crate::{buf::ByteBuf, Error, Result};

macro_rules! impl_codec_for_num {
	($($ty:ty),* $(,)?) => {$(
		impl Encode for $ty {
			#[inline]
			fn encode(&self, buf: &mut ByteBuf, offset: usize) -> Result<usize> {
				buf.write_at(offset, &self.to_le_bytes())?;
				Ok(mem::size_of::<$ty>())
			}
		}

		impl Decode for $ty {
			#[inline]
			fn decode(bytes: &[u8], offset: usize) -> Result<(Self, usize)> {
				let raw = take::<{ mem::size_of::<$ty>() }>(bytes, offset)?;
				Ok((<$ty>::from_le_bytes(raw), mem::size_of::<$ty>()))
			}
		}
	)*};
}

impl_codec_for_num!(u8, u16, u32, u64, u128);
impl_codec_for_num!(i8, i16, i32, i64, i128);
impl_codec_for_num!(f32, f64);

impl Encode for usize {
	#[inline]
	fn encode(&self, buf: &mut ByteBuf, offset: usize) -> Result<usize> {
		(*self as u64).encode(buf, offset)
	}
}

impl Decode for usize {
	#[inline]
	fn decode(bytes: &[u8], offset: usize) -> Result<(Self, usize)> {
		let (wide, read) = u64::decode(bytes, offset)?;
		let value = usize::try_from(wide).map_err(|_| Error::CountOverflow(wide))?;
		Ok((value, read))
	}
}

impl Encode for isize {
	#[inline]
	fn encode(&self, buf: &mut ByteBuf, offset: usize) -> Result<usize> {
		(*self as i64).encode(buf, offset)
	}
}

impl Decode for isize {
	#[inline]
	fn decode(bytes: &[u8], offset: usize) -> Result<(Self, usize)> {
		let (wide, read) = i64::decode(bytes, offset)?;
		let value = isize::try_from(wide).map_err(|_| Error::CountOverflow(wide as u64))?;
		Ok((value, read))
	}
}

impl Encode for bool {
	#[inline]
	fn encode(&self, buf: &mut ByteBuf, offset: usize) -> Result<usize> {
		buf.write_at(offset, &[*self as u8])?;
		Ok(1)
	}
}

impl Decode for bool {
	#[inline]
	fn decode(bytes: &[u8], offset: usize) -> Result<(Self, usize)> {
		let [byte] = take::<1>(bytes, offset)?;
		// Strictly 0 or 1. Anything else means the cursor is desynchronized
		// or the buffer is corrupt, and must not decode to a "valid" bool.
		match byte {
			0 => Ok((false, 1)),
			1 => Ok((true, 1)),
			byte => Err(Error::InvalidBool(byte)),
		}
	}
}

impl Encode for char {
	#[inline]
	fn encode(&self, buf: &mut ByteBuf, offset: usize) -> Result<usize> {
		(*self as u32).encode(buf, offset)
	}
}

impl Decode for char {
	#[inline]
	fn decode(bytes: &[u8], offset: usize) -> Result<(Self, usize)> {
		let (value, read) = u32::decode(bytes, offset)?;
		let value = char::from_u32(value).ok_or(Error::InvalidChar(value))?;
		Ok((value, read))
	}
}

impl Encode for () {
	#[inline]
	fn encode(&self, _buf: &mut ByteBuf, _offset: usize) -> Result<usize> {
		Ok(0)
	}
}

impl Decode for () {
	#[inline]
	fn decode(_bytes: &[u8], _offset: usize) -> Result<(Self, usize)> {
		Ok(((), 0))
	}
}
