//! Plain-text decoding.

use std::borrow::Cow;

/// Decode the bytes of an uploaded `.txt` file.
///
/// Tries UTF-8 first (BOM handled by encoding_rs), then falls back to
/// Windows-1252, which also covers the Latin-1 range old text files tend
/// to use. The fallback cannot fail; every byte sequence decodes to
/// something.
pub fn extract_txt(data: &[u8]) -> String {
    decode_text(data).into_owned()
}

fn decode_text(bytes: &[u8]) -> Cow<'_, str> {
    let (result, _encoding, malformed) = encoding_rs::UTF_8.decode(bytes);
    if !malformed {
        return result;
    }

    let (result, _encoding, _malformed) = encoding_rs::WINDOWS_1252.decode(bytes);
    result
}
