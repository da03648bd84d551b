use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

/// Decodes a base64 image payload into raw bytes.
///
/// Accepts plain base64 (line breaks allowed) or a `data:<mime>;base64,`
/// URL as produced by browsers' `FileReader.readAsDataURL`.
pub fn decode_image_payload(payload: &str) -> crop_disease::Result<Vec<u8>> {
    let trimmed = payload.trim();
    let encoded = match trimmed.strip_prefix("data:") {
        Some(rest) => rest.split_once(";base64,").map(|(_, data)| data).unwrap_or(rest),
        None => trimmed,
    };
    let compact: String = encoded.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    Ok(STANDARD.decode(compact)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_base64() {
        assert_eq!(decode_image_payload("aGVsbG8=").unwrap(), b"hello");
    }

    #[test]
    fn test_wrapped_lines_and_padding_whitespace() {
        assert_eq!(decode_image_payload("  aGVs\nbG8=\r\n").unwrap(), b"hello");
    }

    #[test]
    fn test_data_url_prefix() {
        assert_eq!(decode_image_payload("data:image/png;base64,aGVsbG8=").unwrap(), b"hello");
    }

    #[test]
    fn test_invalid_base64() {
        let err = decode_image_payload("not base64!!").unwrap_err();
        assert!(matches!(err, crop_disease::Error::Base64(_)));
    }
}
