//! UTF-8 <-> UTF-32 conversion
//!
//! Documents are held as decoded code points (`char`). Bytes only exist at the
//! file boundary, so this module is the single place where encoding happens.

use alloc::vec::Vec;
use core::fmt;

/// UTF-8 byte order mark
pub const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// Substituted for every malformed byte sequence
pub const REPLACEMENT_CHARACTER: char = '\u{FFFD}';

/// Why a byte sequence could not be decoded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeErrorKind {
    /// Lead byte is a continuation byte or 11111xxx
    InvalidLeadByte,
    /// A continuation byte did not match 10xxxxxx
    InvalidContinuation,
    /// Input ended inside a multi-byte sequence
    Truncated,
    /// Sequence encodes a value that fits a shorter form
    Overlong,
    /// Surrogate or value above U+10FFFF
    InvalidScalar,
}

/// Malformed UTF-8 at a byte offset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeError {
    /// Offset of the lead byte of the bad sequence
    pub offset: usize,
    pub kind: DecodeErrorKind,
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let what = match self.kind {
            DecodeErrorKind::InvalidLeadByte => "invalid lead byte",
            DecodeErrorKind::InvalidContinuation => "invalid continuation byte",
            DecodeErrorKind::Truncated => "truncated sequence",
            DecodeErrorKind::Overlong => "overlong encoding",
            DecodeErrorKind::InvalidScalar => "invalid scalar value",
        };
        write!(f, "Malformed UTF-8 at byte {}: {}", self.offset, what)
    }
}

/// Result of a lossy decode
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Decoded {
    pub text: Vec<char>,
    pub errors: Vec<DecodeError>,
}

/// Byte cursor decoding one code point per call
pub struct Utf8Decoder<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Utf8Decoder<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    /// Current byte offset
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn is_at_end(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    /// Decode the next code point, or `None` at end of input.
    ///
    /// On error the cursor has already been moved past the lead byte and any
    /// continuation bytes that were valid, so the caller can keep going.
    pub fn next_code_point(&mut self) -> Option<Result<char, DecodeError>> {
        let start = self.pos;
        let lead = *self.bytes.get(start)?;

        let (len, initial, min) = match lead {
            b if b & 0b1000_0000 == 0b0000_0000 => {
                self.pos += 1;
                return Some(Ok(b as char));
            }
            b if b & 0b1110_0000 == 0b1100_0000 => (2, (b & 0b0001_1111) as u32, 0x80),
            b if b & 0b1111_0000 == 0b1110_0000 => (3, (b & 0b0000_1111) as u32, 0x800),
            b if b & 0b1111_1000 == 0b1111_0000 => (4, (b & 0b0000_0111) as u32, 0x1_0000),
            _ => {
                self.pos += 1;
                return Some(Err(self.error(start, DecodeErrorKind::InvalidLeadByte)));
            }
        };

        self.pos += 1;
        let mut value = initial;
        for _ in 1..len {
            match self.bytes.get(self.pos) {
                None => return Some(Err(self.error(start, DecodeErrorKind::Truncated))),
                Some(b) if b & 0b1100_0000 != 0b1000_0000 => {
                    return Some(Err(self.error(start, DecodeErrorKind::InvalidContinuation)));
                }
                Some(b) => {
                    value = (value << 6) | (b & 0b0011_1111) as u32;
                    self.pos += 1;
                }
            }
        }

        if value < min {
            return Some(Err(self.error(start, DecodeErrorKind::Overlong)));
        }
        match char::from_u32(value) {
            Some(ch) => Some(Ok(ch)),
            None => Some(Err(self.error(start, DecodeErrorKind::InvalidScalar))),
        }
    }

    fn error(&self, offset: usize, kind: DecodeErrorKind) -> DecodeError {
        DecodeError { offset, kind }
    }
}

impl Iterator for Utf8Decoder<'_> {
    type Item = Result<char, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_code_point()
    }
}

/// Decode UTF-8, substituting U+FFFD for malformed sequences
pub fn decode_utf8(bytes: &[u8]) -> Decoded {
    let mut decoded = Decoded {
        // never longer than the input
        text: Vec::with_capacity(bytes.len()),
        errors: Vec::new(),
    };

    for result in Utf8Decoder::new(bytes) {
        match result {
            Ok(ch) => decoded.text.push(ch),
            Err(err) => {
                decoded.text.push(REPLACEMENT_CHARACTER);
                decoded.errors.push(err);
            }
        }
    }
    decoded
}

/// Strip a leading UTF-8 BOM, reporting whether one was present
pub fn detect_and_skip_bom(bytes: &[u8]) -> (&[u8], bool) {
    match bytes.strip_prefix(&UTF8_BOM) {
        Some(rest) => (rest, true),
        None => (bytes, false),
    }
}

/// Encode code points as UTF-8
pub fn encode_utf8(text: &[char]) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len());
    let mut scratch = [0u8; 4];
    for ch in text {
        out.extend_from_slice(ch.encode_utf8(&mut scratch).as_bytes());
    }
    out
}
