use crate::Error;
use alloc::vec::Vec;
use core::fmt;
use nom::{combinator::verify, error::ErrorKind, number::complete::le_u8, Err, IResult};

pub fn uleb128(mut value: u64) -> Vec<u8> {
	let mut out = vec![];
	loop {
		let byte = (value & 0x7F) as u8;
		value >>= 7;
		if value == 0 {
			out.push(byte);
			return out;
		}
		out.push(byte | 0x80);
	}
}

/// Same as [`uleb128`], for callers holding a signed value that must not be negative.
pub fn try_uleb128(value: i64) -> Result<Vec<u8>, Error> {
	if value < 0 {
		return Err(Error::InvalidInput { value });
	}
	Ok(uleb128(value as u64))
}

/// Signed LEB128. Stops once the remaining value is pure sign extension of bit 6 of the
/// last group, which is why 127 takes two bytes.
pub fn sleb128(mut value: i64) -> Vec<u8> {
	let mut out = vec![];
	loop {
		let byte = (value & 0x7F) as u8;
		value >>= 7;
		let sign = byte & 0x40 != 0;
		if (value == 0 && !sign) || (value == -1 && sign) {
			out.push(byte);
			return out;
		}
		out.push(byte | 0x80);
	}
}

pub fn u64(mut i: &[u8]) -> IResult<&[u8], u64> {
	let mut result = 0;
	let mut shift = 0;
	for idx in 0.. {
		let (rem, byte) = verify(le_u8, |b: &u8| idx < 9 || *b <= 0x01)(i)?;
		i = rem;
		let byte = byte as u64;
		result |= (byte & 0x7F) << shift;
		if byte & 0x80 == 0 {
			break;
		}
		shift += 7;
	}
	Ok((i, result))
}

pub fn i64(mut i: &[u8]) -> IResult<&[u8], i64> {
	let mut result = 0;
	let mut shift = 0;
	for idx in 0.. {
		let (rem, byte) = verify(le_u8, |b: &u8| idx < 9 || (idx == 9 && valid_signed_end(*b, 1)))(i)?;
		i = rem;
		let byte = byte as i64;

		result |= (byte & 0x7F) << shift;
		shift += 7;
		if byte & 0x80 == 0 {
			if shift < 64 && byte & 0x40 > 0 {
				result |= !0 << shift;
			}
			break;
		}
	}
	Ok((i, result))
}

fn valid_signed_end(b: u8, used_bits: i8) -> bool {
	let sign_and_unused = (b << 1) as i8 >> used_bits;
	sign_and_unused == 0 || sign_and_unused == -1
}

/// Decodes an unsigned LEB128 value starting at `pos`, returning it with the number of
/// bytes it occupied.
pub fn decode_unsigned(data: &[u8], pos: usize) -> Result<(u64, usize), Error> {
	let input = data.get(pos..).unwrap_or(&[][..]);
	let (rest, value) = u64(input).map_err(|e| leb_error(e, pos))?;
	Ok((value, input.len() - rest.len()))
}

pub fn decode_signed(data: &[u8], pos: usize) -> Result<(i64, usize), Error> {
	let input = data.get(pos..).unwrap_or(&[][..]);
	let (rest, value) = i64(input).map_err(|e| leb_error(e, pos))?;
	Ok((value, input.len() - rest.len()))
}

fn leb_error(err: Err<(&[u8], ErrorKind)>, offset: usize) -> Error {
	match err {
		Err::Error((_, ErrorKind::Verify)) | Err::Failure((_, ErrorKind::Verify)) => Error::Overflow { offset },
		_ => Error::TruncatedEncoding { offset },
	}
}

pub fn encode_name(text: &str) -> Vec<u8> {
	encode_vec_byte(text.as_bytes())
}

pub fn encode_vec<T: AsRef<[u8]>>(items: &[T]) -> Vec<u8> {
	let mut out = uleb128(items.len() as u64);
	for item in items {
		out.extend_from_slice(item.as_ref());
	}
	out
}

pub fn encode_vec_byte(bytes: &[u8]) -> Vec<u8> {
	let mut out = uleb128(bytes.len() as u64);
	out.extend_from_slice(bytes);
	out
}

pub(crate) fn write_hex(f: &mut impl fmt::Write, bytes: &[u8]) -> fmt::Result {
	for (i, b) in bytes.iter().enumerate() {
		if i > 0 {
			f.write_char(' ')?;
		}
		write!(f, "{:02x}", b)?;
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn unsigned_vectors() {
		assert_eq!(uleb128(0), [0x00]);
		assert_eq!(uleb128(127), [0x7F]);
		assert_eq!(uleb128(128), [0x80, 0x01]);
		assert_eq!(uleb128(16384), [0x80, 0x80, 0x01]);
		assert_eq!(uleb128(u64::MAX).len(), 10);
	}

	#[test]
	fn signed_vectors() {
		assert_eq!(sleb128(0), [0x00]);
		assert_eq!(sleb128(-1), [0x7F]);
		assert_eq!(sleb128(63), [0x3F]);
		assert_eq!(sleb128(64), [0xC0, 0x00]);
		assert_eq!(sleb128(127), [0xFF, 0x00]);
		assert_eq!(sleb128(-64), [0x40]);
		assert_eq!(sleb128(-65), [0xBF, 0x7F]);
		assert_eq!(sleb128(100), [0xE4, 0x00]);
	}

	#[test]
	fn negative_unsigned_input() {
		assert_eq!(try_uleb128(-1), Err(Error::InvalidInput { value: -1 }));
		assert_eq!(try_uleb128(300), Ok(vec![0xAC, 0x02]));
	}

	#[test]
	fn decode_reports_consumed_bytes() {
		let data = [0xFF, 0x80, 0x80, 0x01, 0x2A];
		assert_eq!(decode_unsigned(&data, 1), Ok((16384, 3)));
		assert_eq!(decode_unsigned(&data, 4), Ok((42, 1)));
		assert_eq!(decode_signed(&[0xBF, 0x7F], 0), Ok((-65, 2)));
		assert_eq!(decode_signed(&[0xFF, 0x00], 0), Ok((127, 2)));
	}

	#[test]
	fn decode_truncated() {
		assert_eq!(decode_unsigned(&[0x80, 0x80], 0), Err(Error::TruncatedEncoding { offset: 0 }));
		assert_eq!(decode_unsigned(&[0x01], 1), Err(Error::TruncatedEncoding { offset: 1 }));
		assert_eq!(decode_signed(&[0xC0], 0), Err(Error::TruncatedEncoding { offset: 0 }));
	}

	#[test]
	fn decode_overlong() {
		let mut data = vec![0xFF; 9];
		data.push(0x02);
		assert_eq!(decode_unsigned(&data, 0), Err(Error::Overflow { offset: 0 }));
		data[9] = 0x01;
		assert_eq!(decode_unsigned(&data, 0), Ok((u64::MAX, 10)));
	}

	#[test]
	fn names_and_vectors() {
		assert_eq!(encode_name("env"), [0x03, b'e', b'n', b'v']);
		assert_eq!(encode_vec(&[vec![0x01u8, 0x02], vec![0x03]]), [0x02, 0x01, 0x02, 0x03]);
		assert_eq!(encode_vec::<Vec<u8>>(&[]), [0x00]);
	}
}
