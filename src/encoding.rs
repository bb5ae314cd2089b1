//! Best-effort text encoding detection.
//!
//! [`detect_encoding`] classifies a byte buffer by byte-order marks and byte
//! patterns. It is a heuristic: very short or adversarial input can be
//! misclassified. The order of the checks matters; an aligned zero 32-bit
//! word anywhere marks the buffer as binary before any BOM is looked at.

use crate::utf8::{continuation_bytes, is_continuation, is_first_of_multibyte, wide_to_utf8};
use std::fmt;
use tracing::debug;

const BOM_UTF32_LE: [u8; 4] = [0xFF, 0xFE, 0x00, 0x00];
const BOM_UTF32_BE: [u8; 4] = [0x00, 0x00, 0xFE, 0xFF];
const BOM_UTF16_LE: [u8; 2] = [0xFF, 0xFE];
const BOM_UTF16_BE: [u8; 2] = [0xFE, 0xFF];
const BOM_UTF8: [u8; 3] = [0xEF, 0xBB, 0xBF];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Encoding {
    Binary,
    Utf32Le,
    Utf32Be,
    Utf16Le,
    Utf16Be,
    Utf8,
    /// ASCII or a legacy 8-bit codepage.
    SingleByte,
}

impl Encoding {
    pub fn label(self) -> &'static str {
        match self {
            Encoding::Binary => "Binary",
            Encoding::Utf32Le => "UTF-32 LE",
            Encoding::Utf32Be => "UTF-32 BE",
            Encoding::Utf16Le => "UTF-16 LE",
            Encoding::Utf16Be => "UTF-16 BE",
            Encoding::Utf8 => "UTF-8",
            Encoding::SingleByte => "ANSI",
        }
    }

    pub fn short_label(self) -> &'static str {
        match self {
            Encoding::Binary => "bin",
            Encoding::Utf32Le => "U32LE",
            Encoding::Utf32Be => "U32BE",
            Encoding::Utf16Le => "U16LE",
            Encoding::Utf16Be => "U16BE",
            Encoding::Utf8 => "U8",
            Encoding::SingleByte => "A",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodingVerdict {
    pub encoding: Encoding,
    pub has_bom: bool,
    /// Only set for [`Encoding::SingleByte`] when nothing ruled out plain
    /// ASCII; callers may apply their own codepage guess.
    pub inconclusive: bool,
}

impl EncodingVerdict {
    fn new(encoding: Encoding) -> Self {
        EncodingVerdict {
            encoding,
            has_bom: false,
            inconclusive: false,
        }
    }

    fn with_bom(encoding: Encoding) -> Self {
        EncodingVerdict {
            has_bom: true,
            ..EncodingVerdict::new(encoding)
        }
    }

    fn single_byte(inconclusive: bool) -> Self {
        EncodingVerdict {
            inconclusive,
            ..EncodingVerdict::new(Encoding::SingleByte)
        }
    }

    /// Windows codepage identifier; `-1` for binary, `0` for the ANSI codepage.
    pub fn codepage(&self) -> i32 {
        match self.encoding {
            Encoding::Binary => -1,
            Encoding::SingleByte => 0,
            Encoding::Utf16Le => 1200,
            Encoding::Utf16Be => 1201,
            Encoding::Utf32Le => 12000,
            Encoding::Utf32Be => 12001,
            Encoding::Utf8 => 65001,
        }
    }

    /// Length of the byte-order mark at the start of the buffer.
    pub fn bom_len(&self) -> usize {
        if !self.has_bom {
            return 0;
        }
        match self.encoding {
            Encoding::Utf32Le | Encoding::Utf32Be => 4,
            Encoding::Utf16Le | Encoding::Utf16Be => 2,
            Encoding::Utf8 => 3,
            Encoding::Binary | Encoding::SingleByte => 0,
        }
    }
}

impl fmt::Display for EncodingVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.encoding.label())?;
        if self.has_bom {
            f.write_str(" BOM")?;
        }
        if self.inconclusive {
            f.write_str(" (guess)")?;
        }
        Ok(())
    }
}

/// Classifies `buf`. The first matching rule wins:
///
/// 1. fewer than two bytes: single byte
/// 2. an all-zero 32-bit word at a 4-byte aligned offset: binary
/// 3. UTF-32 BOMs, then UTF-16 BOMs, then the UTF-8 BOM
/// 4. a UTF-8 structure scan, which also reports UTF-16 when zero bytes
///    exceed 2% of the buffer
pub fn detect_encoding(buf: &[u8]) -> EncodingVerdict {
    let verdict = classify(buf);
    debug!(len = buf.len(), %verdict, "encoding detected");
    verdict
}

fn classify(buf: &[u8]) -> EncodingVerdict {
    if buf.len() < 2 {
        return EncodingVerdict::single_byte(false);
    }
    if buf.chunks_exact(4).any(|w| w == [0, 0, 0, 0]) {
        return EncodingVerdict::new(Encoding::Binary);
    }
    if buf.starts_with(&BOM_UTF32_LE) {
        return EncodingVerdict::with_bom(Encoding::Utf32Le);
    }
    if buf.starts_with(&BOM_UTF32_BE) {
        return EncodingVerdict::with_bom(Encoding::Utf32Be);
    }
    if buf.starts_with(&BOM_UTF16_LE) {
        return EncodingVerdict::with_bom(Encoding::Utf16Le);
    }
    if buf.starts_with(&BOM_UTF16_BE) {
        return EncodingVerdict::with_bom(Encoding::Utf16Be);
    }
    if buf.starts_with(&BOM_UTF8) {
        return EncodingVerdict::with_bom(Encoding::Utf8);
    }
    scan_utf8(buf)
}

fn scan_utf8(buf: &[u8]) -> EncodingVerdict {
    let null_limit = buf.len() / 50;
    let mut nulls = 0usize;
    let mut expected = 0usize;
    let mut non_ascii = false;

    for (i, &b) in buf.iter().enumerate() {
        if b < 0x80 {
            if expected > 0 {
                return EncodingVerdict::single_byte(true);
            }
            if b == 0 {
                nulls += 1;
                if nulls > null_limit {
                    let encoding = if i % 2 == 1 {
                        Encoding::Utf16Le
                    } else {
                        Encoding::Utf16Be
                    };
                    return EncodingVerdict::new(encoding);
                }
            }
            continue;
        }

        if expected > 0 {
            if !is_continuation(b) {
                return EncodingVerdict::single_byte(false);
            }
            expected -= 1;
            continue;
        }
        if !is_first_of_multibyte(b) {
            return EncodingVerdict::single_byte(false);
        }
        expected = continuation_bytes(b);
        non_ascii = true;
    }

    // a sequence cut off by the end of the buffer is accepted: callers often
    // sniff a prefix of a larger file
    if non_ascii {
        EncodingVerdict::new(Encoding::Utf8)
    } else {
        EncodingVerdict::single_byte(true)
    }
}

/// Decodes `buf` according to `verdict`, skipping the BOM.
///
/// Malformed units become U+FFFD. Single-byte text is read as ISO-8859-1.
/// Returns `None` for binary buffers.
pub fn decode_text(buf: &[u8], verdict: &EncodingVerdict) -> Option<String> {
    let body = buf.get(verdict.bom_len()..).unwrap_or_default();
    let text = match verdict.encoding {
        Encoding::Binary => return None,
        Encoding::Utf8 => String::from_utf8_lossy(body).into_owned(),
        Encoding::SingleByte => body.iter().map(|&b| char::from(b)).collect(),
        Encoding::Utf16Le => decode_utf16(body, u16::from_le_bytes),
        Encoding::Utf16Be => decode_utf16(body, u16::from_be_bytes),
        Encoding::Utf32Le => decode_utf32(body, u32::from_le_bytes),
        Encoding::Utf32Be => decode_utf32(body, u32::from_be_bytes),
    };
    Some(text)
}

fn decode_utf16(body: &[u8], unit: fn([u8; 2]) -> u16) -> String {
    let chunks = body.chunks_exact(2);
    let trailing = !chunks.remainder().is_empty();
    let wide: Vec<u16> = chunks.map(|c| unit([c[0], c[1]])).collect();
    let mut text = wide_to_utf8(&wide);
    if trailing {
        text.push(char::REPLACEMENT_CHARACTER);
    }
    text
}

fn decode_utf32(body: &[u8], unit: fn([u8; 4]) -> u32) -> String {
    let chunks = body.chunks_exact(4);
    let trailing = !chunks.remainder().is_empty();
    let mut text: String = chunks
        .map(|c| {
            char::from_u32(unit([c[0], c[1], c[2], c[3]])).unwrap_or(char::REPLACEMENT_CHARACTER)
        })
        .collect();
    if trailing {
        text.push(char::REPLACEMENT_CHARACTER);
    }
    text
}
