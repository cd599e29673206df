//! Unsigned variable-length integers.
//!
//! Every byte carries seven bits of the value, least significant group first. The high bit of a
//! byte is set when more bytes follow.

use crate::deckstring::FrameError;

const CONTINUATION: u8 = 0x80;
const PAYLOAD: u8 = 0x7f;

/// Decode one value starting at `position`.
///
/// Returns the value together with the position directly after it. Values are limited to
/// [`u32`]; longer encodings are rejected instead of silently wrapping.
pub fn read(data: &[u8], position: usize) -> Result<(u32, usize), FrameError> {
    let mut value = 0u32;
    let mut cursor = position;

    for shift in (0..u32::BITS).step_by(7) {
        let byte = *data
            .get(cursor)
            .ok_or(FrameError::TruncatedVarInt { offset: position })?;
        cursor += 1;

        let payload = u32::from(byte & PAYLOAD);
        if payload.leading_zeros() < shift {
            return Err(FrameError::VarIntOverflow { offset: position });
        }
        value |= payload << shift;

        if byte & CONTINUATION == 0 {
            return Ok((value, cursor));
        }
    }

    Err(FrameError::VarIntOverflow { offset: position })
}

/// Append the encoding of `value` to `out`.
pub fn write(mut value: u32, out: &mut Vec<u8>) {
    while value >= u32::from(CONTINUATION) {
        out.push((value & u32::from(PAYLOAD)) as u8 | CONTINUATION);
        value >>= 7;
    }
    out.push(value as u8);
}

/// Cursor over a byte buffer.
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> Reader<'a> {
    #[must_use]
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, position: 0 }
    }

    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Number of bytes not consumed yet.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.data.len() - self.position
    }

    /// Read a single raw byte.
    pub fn read_byte(&mut self) -> Result<u8, FrameError> {
        let byte = *self
            .data
            .get(self.position)
            .ok_or(FrameError::Truncated {
                offset: self.position,
            })?;
        self.position += 1;
        Ok(byte)
    }

    /// Read a single variable-length integer.
    pub fn read(&mut self) -> Result<u32, FrameError> {
        let (value, position) = read(self.data, self.position)?;
        self.position = position;
        Ok(value)
    }
}
