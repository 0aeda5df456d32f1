//! Codec bindings for strings.
//!
//! Both flavors are NUL-terminated with no length prefix: the terminator
//! implies the length, so an embedded NUL cannot be represented and is
//! rejected at write time.

use std::str;

use super::{take, Decode, Encode};
use crate::{buf::ByteBuf, Error, Result};

impl Encode for str {
	fn encode(&self, buf: &mut ByteBuf, offset: usize) -> Result<usize> {
		if self.contains('\0') {
			return Err(Error::EmbeddedNul);
		}

		let bytes = self.as_bytes();
		buf.write_at(offset, bytes)?;
		buf.write_at(offset + bytes.len(), &[0])?;
		Ok(bytes.len() + 1)
	}
}

impl Encode for String {
	#[inline]
	fn encode(&self, buf: &mut ByteBuf, offset: usize) -> Result<usize> {
		self.as_str().encode(buf, offset)
	}
}

impl Decode for String {
	fn decode(bytes: &[u8], offset: usize) -> Result<(Self, usize)> {
		let remaining = bytes.get(offset..).unwrap_or(&[]);
		match remaining.iter().position(|&byte| byte == 0) {
			Some(nul) => {
				let value = str::from_utf8(&remaining[..nul])?;
				Ok((value.to_owned(), nul + 1))
			}
			// No terminator before the end of the buffer: at least one more
			// byte than remains would be needed to finish the string.
			None => Err(Error::BufferUnderrun {
				offset,
				needed: remaining.len() + 1,
				available: remaining.len(),
			}),
		}
	}
}

/// String encoded as NUL-terminated UTF-16 code units (2 bytes each,
/// little-endian) instead of UTF-8 bytes.
///
/// A thin wrapper around `String`; the UTF-16 form exists only on the wire,
/// for interoperating with buffers whose schema declares a wide string.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct WideString(pub String);

impl WideString {
	#[inline]
	pub fn as_str(&self) -> &str {
		&self.0
	}

	#[inline]
	pub fn into_string(self) -> String {
		self.0
	}
}

impl From<String> for WideString {
	#[inline]
	fn from(value: String) -> Self {
		Self(value)
	}
}

impl From<&str> for WideString {
	#[inline]
	fn from(value: &str) -> Self {
		Self(value.to_owned())
	}
}

impl Encode for WideString {
	fn encode(&self, buf: &mut ByteBuf, offset: usize) -> Result<usize> {
		if self.0.contains('\0') {
			return Err(Error::EmbeddedNul);
		}

		let mut pos = offset;
		for unit in self.0.encode_utf16() {
			buf.write_at(pos, &unit.to_le_bytes())?;
			pos += 2;
		}
		buf.write_at(pos, &[0, 0])?;
		Ok(pos + 2 - offset)
	}
}

impl Decode for WideString {
	fn decode(bytes: &[u8], offset: usize) -> Result<(Self, usize)> {
		let mut units = Vec::new();
		let mut pos = offset;
		loop {
			let unit = u16::from_le_bytes(take::<2>(bytes, pos)?);
			pos += 2;
			if unit == 0 {
				break;
			}
			units.push(unit);
		}

		let value = String::from_utf16(&units)?;
		Ok((Self(value), pos - offset))
	}
}
