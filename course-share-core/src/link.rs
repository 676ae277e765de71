//! Share-link derivation from the current selection.

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};

use crate::{Error, QualifiedCourseId, Result};

/// Derives the shareable feed URL for a selection.
///
/// The backend resolves `<base>/calendar.ics?l=<token>` into an ICS
/// feed containing exactly the courses named in the token.
pub struct LinkSynthesizer {
    base_endpoint: String,
}

impl LinkSynthesizer {
    /// Create a synthesizer for the given origin. A trailing `/` on the
    /// origin is normalized away.
    pub fn new(base_endpoint: impl Into<String>) -> Self {
        let mut base_endpoint = base_endpoint.into();
        while base_endpoint.ends_with('/') {
            base_endpoint.pop();
        }
        Self { base_endpoint }
    }

    /// Compose `<base>/calendar.ics?l=<token>` for the selection.
    ///
    /// An empty selection still carries the encoded `[]` token so the
    /// backend always receives a well-formed list.
    pub fn share_link(&self, selection: &[QualifiedCourseId]) -> String {
        format!(
            "{}/calendar.ics?l={}",
            self.base_endpoint,
            encode_selection(selection)
        )
    }
}

/// URL-safe unpadded base64 of the selection's JSON array form.
///
/// The array order is the selection's ascending order, so the token is
/// identical for any click sequence reaching the same set.
pub fn encode_selection(selection: &[QualifiedCourseId]) -> String {
    // A slice of plain strings always serializes.
    let json = serde_json::to_string(selection).unwrap_or_else(|_| "[]".to_string());
    URL_SAFE_NO_PAD.encode(json.as_bytes())
}

/// Decode a share token back into the qualified ids it names.
///
/// Inverse of [`encode_selection`]; padding is not expected.
pub fn decode_token(token: &str) -> Result<Vec<QualifiedCourseId>> {
    let bytes = URL_SAFE_NO_PAD
        .decode(token)
        .map_err(|e| Error::Token(format!("invalid base64: {}", e)))?;
    let ids = serde_json::from_slice(&bytes)?;
    Ok(ids)
}

#[cfg(test)]
mod tests {
    use base64::Engine as _;

    use super::*;

    fn ids(raw: &[&str]) -> Vec<QualifiedCourseId> {
        raw.iter().copied().map(QualifiedCourseId::from).collect()
    }

    #[test]
    fn empty_selection_encodes_empty_json_array() {
        // base64url("[]") with no padding
        assert_eq!(encode_selection(&[]), "W10");
        assert_eq!(decode_token("W10").unwrap(), Vec::<QualifiedCourseId>::new());
    }

    #[test]
    fn token_is_unpadded_and_url_safe() {
        let token = encode_selection(&ids(&["Fall2024/CS101"]));
        assert!(!token.contains('='));
        assert!(!token.contains('+'));
        assert!(!token.contains('/'));
    }

    #[test]
    fn share_link_carries_token_for_empty_selection() {
        let synthesizer = LinkSynthesizer::new("https://courses.example.org/");
        assert_eq!(
            synthesizer.share_link(&[]),
            "https://courses.example.org/calendar.ics?l=W10"
        );
    }

    #[test]
    fn round_trip_reproduces_selection() {
        let selection = ids(&["Fall2024/CS101", "Fall2024/CS200", "Spring2025/MA101"]);
        let decoded = decode_token(&encode_selection(&selection)).unwrap();
        assert_eq!(decoded, selection);
    }

    #[test]
    fn decoded_payload_is_plain_json_array() {
        let selection = ids(&["Fall2024/CS101", "Fall2024/CS200"]);
        let token = encode_selection(&selection);
        let bytes = base64::engine::general_purpose::URL_SAFE_NO_PAD
            .decode(token)
            .unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            r#"["Fall2024/CS101","Fall2024/CS200"]"#
        );
    }

    #[test]
    fn malformed_tokens_are_rejected() {
        assert!(decode_token("not base64!").is_err());
        // valid base64 but not a JSON array of strings
        let token = base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(b"{\"a\":1}");
        assert!(decode_token(&token).is_err());
    }
}
