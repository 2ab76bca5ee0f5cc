//! Byte Order Mark (BOM) handling for chart input and CSV output.
//!
//! Chart XML is read as UTF-8 only: a UTF-8 BOM is skipped, any other BOM is
//! rejected. CSV output is prefixed with a UTF-8 BOM so spreadsheet tools
//! pick the right encoding.

use crate::common::{Error, Result};
use std::io::{Read, Seek, SeekFrom, Write};

/// Encodings recognised by their BOM.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BomKind {
    Utf8,
    Utf16Le,
    Utf16Be,
    Utf32Le,
    Utf32Be,
}

impl BomKind {
    /// Returns the byte representation of the BOM.
    #[inline]
    pub const fn as_bytes(&self) -> &'static [u8] {
        match self {
            BomKind::Utf8 => &UTF8_BOM,
            BomKind::Utf16Le => &UTF16_LE_BOM,
            BomKind::Utf16Be => &UTF16_BE_BOM,
            BomKind::Utf32Le => &UTF32_LE_BOM,
            BomKind::Utf32Be => &UTF32_BE_BOM,
        }
    }

    /// Encoding label used in error messages.
    pub const fn label(&self) -> &'static str {
        match self {
            BomKind::Utf8 => "UTF-8",
            BomKind::Utf16Le => "UTF-16LE",
            BomKind::Utf16Be => "UTF-16BE",
            BomKind::Utf32Le => "UTF-32LE",
            BomKind::Utf32Be => "UTF-32BE",
        }
    }
}

/// UTF-8 BOM bytes.
pub const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];
/// UTF-16 little-endian BOM bytes.
pub const UTF16_LE_BOM: [u8; 2] = [0xFF, 0xFE];
/// UTF-16 big-endian BOM bytes.
pub const UTF16_BE_BOM: [u8; 2] = [0xFE, 0xFF];
/// UTF-32 little-endian BOM bytes.
pub const UTF32_LE_BOM: [u8; 4] = [0xFF, 0xFE, 0x00, 0x00];
/// UTF-32 big-endian BOM bytes.
pub const UTF32_BE_BOM: [u8; 4] = [0x00, 0x00, 0xFE, 0xFF];

/// Positions `reader` at the start of UTF-8 content.
///
/// A UTF-8 BOM is consumed; without a BOM the reader is rewound to where it
/// started. A BOM for any other encoding yields
/// [`Error::UnsupportedEncoding`].
pub fn skip_utf8_bom<R: Read + Seek>(reader: &mut R) -> Result<()> {
    let start = reader.stream_position()?;
    let mut buf = [0u8; 4];
    let mut read = 0usize;

    while read < buf.len() {
        match reader.read(&mut buf[read..])? {
            0 => break,
            n => read += n,
        }
    }

    match detect_bom(&buf, read) {
        Some(BomKind::Utf8) => {
            reader.seek(SeekFrom::Start(start + UTF8_BOM.len() as u64))?;
            Ok(())
        },
        Some(other) => Err(Error::UnsupportedEncoding(other.label().to_string())),
        None => {
            reader.seek(SeekFrom::Start(start))?;
            Ok(())
        },
    }
}

/// Writes the requested BOM to the writer.
pub fn write_bom<W: Write>(writer: &mut W, kind: BomKind) -> Result<()> {
    writer.write_all(kind.as_bytes())?;
    Ok(())
}

fn detect_bom(buf: &[u8; 4], read: usize) -> Option<BomKind> {
    // UTF-32LE shares its first two bytes with UTF-16LE, so check it first
    if read >= UTF32_BE_BOM.len() {
        if buf[..UTF32_BE_BOM.len()] == UTF32_BE_BOM {
            return Some(BomKind::Utf32Be);
        }
        if buf[..UTF32_LE_BOM.len()] == UTF32_LE_BOM {
            return Some(BomKind::Utf32Le);
        }
    }

    if read >= UTF8_BOM.len() && buf[..UTF8_BOM.len()] == UTF8_BOM {
        return Some(BomKind::Utf8);
    }

    if read >= UTF16_BE_BOM.len() && buf[..UTF16_BE_BOM.len()] == UTF16_BE_BOM {
        return Some(BomKind::Utf16Be);
    }
    if read >= UTF16_LE_BOM.len() && buf[..UTF16_LE_BOM.len()] == UTF16_LE_BOM {
        return Some(BomKind::Utf16Le);
    }

    None
}
