//! Text encoding for the overlay font
//!
//! The overlay uses the standard Helvetica font with `WinAnsiEncoding`, so
//! every string written with `Tj` is a byte string in that encoding. The
//! code tables come from lopdf; this module only adds the replacement policy
//! for characters the font cannot show.

use lopdf::{dictionary, Dictionary, Document, Encoding};

/// Byte used for characters the encoding cannot represent
pub const REPLACEMENT: u8 = b'?';

/// Font dictionary of the overlay font
pub fn overlay_font_dictionary() -> Dictionary {
    dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    }
}

/// Encode text for a font, one character at a time.
///
/// lopdf drops characters it cannot map; here each of them becomes
/// [`REPLACEMENT`] so the run keeps its length. Tabs and line breaks become
/// spaces.
pub fn encode_text(encoding: &Encoding, text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len());
    let mut buf = [0u8; 4];

    for c in text.chars() {
        let c = match c {
            '\t' | '\n' | '\r' => ' ',
            other => other,
        };
        let bytes = Document::encode_text(encoding, c.encode_utf8(&mut buf));
        if bytes.is_empty() {
            out.push(REPLACEMENT);
        } else {
            out.extend_from_slice(&bytes);
        }
    }

    out
}

/// Decode a `Tj` operand with the font's encoding, if known
pub fn decode_text(encoding: Option<&Encoding>, bytes: &[u8]) -> String {
    encoding
        .and_then(|enc| Document::decode_text(enc, bytes).ok())
        .unwrap_or_else(|| bytes.iter().map(|&b| b as char).collect())
}
