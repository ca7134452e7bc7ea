//! MIDI encoder output and its conversion to raw SMF bytes

use crate::errors::ExportError;

/// What the MIDI encoder handed back
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MidiPayload {
    /// `data:audio/midi,...` URL with percent-escaped bytes
    Encoded(String),

    /// Raw Standard MIDI File bytes
    Binary(Vec<u8>),
}

impl MidiPayload {
    /// Raw SMF bytes, decoding the `data:` URL form if needed
    pub fn into_bytes(self) -> Result<Vec<u8>, ExportError> {
        match self {
            MidiPayload::Binary(bytes) => Ok(bytes),
            MidiPayload::Encoded(encoded) => decode_data_url(&encoded),
        }
    }
}

/// Decode a percent-escaped `data:` URL body into bytes
///
/// The `data:<mime>,` header is optional. Characters outside `%XX` escapes
/// stand for their own code point, which must fit in a byte.
pub fn decode_data_url(encoded: &str) -> Result<Vec<u8>, ExportError> {
    let body = match encoded.strip_prefix("data:") {
        Some(rest) => {
            let (header, body) = rest
                .split_once(',')
                .ok_or_else(|| ExportError::Decode("data URL has no ',' separator".to_string()))?;
            if header.ends_with(";base64") {
                return Err(ExportError::Decode("base64 data URLs are not supported".to_string()));
            }
            body
        }
        None => encoded,
    };

    let mut bytes = Vec::with_capacity(body.len());
    let mut chars = body.char_indices();
    while let Some((index, c)) = chars.next() {
        if c == '%' {
            let hex = body
                .get(index + 1..index + 3)
                .ok_or_else(|| ExportError::Decode(format!("truncated escape at offset {}", index)))?;
            let invalid = || ExportError::Decode(format!("invalid escape '%{}' at offset {}", hex, index));
            if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
                return Err(invalid());
            }
            let byte = u8::from_str_radix(hex, 16).map_err(|_| invalid())?;
            bytes.push(byte);
            chars.next();
            chars.next();
        } else {
            let byte = u8::try_from(u32::from(c))
                .map_err(|_| ExportError::Decode(format!("character {:?} at offset {} is not a byte", c, index)))?;
            bytes.push(byte);
        }
    }

    Ok(bytes)
}
