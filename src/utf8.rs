//! UTF-8 byte classification and UTF-8 to UTF-16 conversion.

pub const REPLACEMENT_CHARACTER: u16 = 0xFFFD;

const SUPPLEMENTARY_PLANE_FIRST: u32 = 0x1_0000;
const SURROGATE_LEAD_FIRST: u32 = 0xD800;
const SURROGATE_TRAIL_FIRST: u32 = 0xDC00;

#[inline]
pub fn is_single_byte(b: u8) -> bool {
    b < 0x80
}

#[inline]
pub fn is_continuation(b: u8) -> bool {
    b & 0xC0 == 0x80
}

/// Lead bytes of sequences that can encode a valid scalar value.
/// 0xF5 and above are defined by the encoding scheme but exceed U+10FFFF.
#[inline]
pub fn is_first_of_multibyte(b: u8) -> bool {
    (0xC2..0xF5).contains(&b)
}

/// Validates a byte out of context.
#[inline]
pub fn is_valid(b: u8) -> bool {
    b < 0xC0 || is_first_of_multibyte(b)
}

/// Number of continuation bytes that follow a valid lead byte.
#[inline]
pub fn continuation_bytes(lead: u8) -> usize {
    const LEN: [usize; 4] = [1, 1, 2, 3];
    if lead < 0xC0 {
        0
    } else {
        LEN[usize::from((lead & 0x30) >> 4)]
    }
}

/// Validates the character starting at `buf[0]`.
pub fn is_valid_char(buf: &[u8]) -> bool {
    let Some(&lead) = buf.first() else {
        return false;
    };
    if is_single_byte(lead) {
        return true;
    }
    if !is_first_of_multibyte(lead) {
        return false;
    }
    let n = continuation_bytes(lead);
    buf.len() > n && buf[1..=n].iter().all(|&b| is_continuation(b))
}

/// Rewinds `index` to the lead byte of the character containing it.
///
/// Never moves past the start of `buf` or over more than five continuation
/// bytes, so arbitrary input cannot rewind unboundedly.
pub fn character_start(buf: &[u8], index: usize) -> usize {
    let mut back = 0;
    while back < index
        && back < 5
        && buf.get(index - back).is_some_and(|&b| is_continuation(b))
    {
        back += 1;
    }
    index - back
}

/// Iterates UTF-8 bytes as UTF-16 code units.
///
/// Invalid lead bytes and broken continuation runs become U+FFFD; a broken
/// run only consumes the bytes that were valid continuations. Lead bytes of
/// the obsolete 5 and 6 byte forms are decoded by length.
#[derive(Debug, Clone)]
pub struct Utf16Units<'a> {
    text: &'a [u8],
    position: usize,
    len_bytes: usize,
    units: [u16; 2],
    unit_count: usize,
    unit_index: usize,
}

impl<'a> Utf16Units<'a> {
    pub fn new(text: &'a [u8]) -> Self {
        Utf16Units {
            text,
            position: 0,
            len_bytes: 0,
            units: [0; 2],
            unit_count: 0,
            unit_index: 0,
        }
    }

    /// Byte offset of the character the next unit comes from.
    pub fn position(&self) -> usize {
        if self.unit_index < self.unit_count {
            self.position
        } else {
            self.position + self.len_bytes
        }
    }

    fn decode_at(&mut self, pos: usize) {
        let buf = &self.text[pos..];
        let lead = buf[0];
        let (mut code_point, mut len) = match lead {
            0x00..=0x7F => (u32::from(lead), 1),
            0x80..=0xBF => (u32::from(REPLACEMENT_CHARACTER), 1),
            0xC0..=0xDF => (u32::from(lead & 0x1F), 2),
            0xE0..=0xEF => (u32::from(lead & 0x0F), 3),
            0xF0..=0xF7 => (u32::from(lead & 0x07), 4),
            0xF8..=0xFB => (u32::from(lead & 0x03), 5),
            0xFC..=0xFD => (u32::from(lead & 0x01), 6),
            0xFE..=0xFF => (u32::from(REPLACEMENT_CHARACTER), 1),
        };
        for i in 1..len {
            match buf.get(i) {
                Some(&b) if is_continuation(b) => {
                    code_point = (code_point << 6) | u32::from(b & 0x3F);
                }
                _ => {
                    code_point = u32::from(REPLACEMENT_CHARACTER);
                    len = i;
                    break;
                }
            }
        }
        if code_point > 0x10_FFFF || (0xD800..0xE000).contains(&code_point) {
            code_point = u32::from(REPLACEMENT_CHARACTER);
        }

        self.position = pos;
        self.len_bytes = len;
        self.unit_index = 0;
        if code_point < SUPPLEMENTARY_PLANE_FIRST {
            self.units = [code_point as u16, 0];
            self.unit_count = 1;
        } else {
            let offset = code_point - SUPPLEMENTARY_PLANE_FIRST;
            self.units = [
                ((offset >> 10) + SURROGATE_LEAD_FIRST) as u16,
                ((offset & 0x3FF) + SURROGATE_TRAIL_FIRST) as u16,
            ];
            self.unit_count = 2;
        }
    }
}

impl Iterator for Utf16Units<'_> {
    type Item = u16;

    fn next(&mut self) -> Option<u16> {
        if self.unit_index >= self.unit_count {
            let next = self.position + self.len_bytes;
            if next >= self.text.len() {
                self.position = self.text.len();
                self.len_bytes = 0;
                self.unit_count = 0;
                self.unit_index = 0;
                return None;
            }
            self.decode_at(next);
        }
        let unit = self.units[self.unit_index];
        self.unit_index += 1;
        Some(unit)
    }
}

/// Converts UTF-8 bytes to UTF-16, replacing malformed input.
pub fn utf8_to_wide(text: &[u8]) -> Vec<u16> {
    Utf16Units::new(text).collect()
}

/// Converts UTF-16 to a `String`, replacing unpaired surrogates.
pub fn wide_to_utf8(wide: &[u16]) -> String {
    char::decode_utf16(wide.iter().copied())
        .map(|r| r.unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect()
}
