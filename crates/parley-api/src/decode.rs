//! Incremental UTF-8 decoding for streamed response bodies
//!
//! The transport fragments the body at arbitrary byte offsets, so a
//! multi-byte character can arrive split across two reads. The decoder keeps
//! the undecoded tail of each read and prepends it to the next one instead of
//! emitting a replacement character at every fragment boundary.

/// Stateful byte-to-text decoder.
///
/// `decode` returns the longest valid prefix of the carried-over bytes plus
/// the new input; an incomplete trailing sequence is buffered for the next
/// call. Invalid sequences decode to U+FFFD.
#[derive(Debug, Default)]
pub struct Utf8Decoder {
    carry: Vec<u8>,
}

impl Utf8Decoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode the next chunk of bytes, buffering any incomplete trailing
    /// character.
    pub fn decode(&mut self, input: &[u8]) -> String {
        let mut bytes = std::mem::take(&mut self.carry);
        bytes.extend_from_slice(input);

        let mut out = String::new();
        let mut rest = bytes.as_slice();
        loop {
            match std::str::from_utf8(rest) {
                Ok(valid) => {
                    out.push_str(valid);
                    break;
                }
                Err(e) => {
                    let valid_up_to = e.valid_up_to();
                    out.push_str(&String::from_utf8_lossy(&rest[..valid_up_to]));
                    match e.error_len() {
                        // Invalid sequence: substitute and continue past it
                        Some(len) => {
                            out.push('\u{FFFD}');
                            rest = &rest[valid_up_to + len..];
                        }
                        // Incomplete trailing sequence: keep for the next read
                        None => {
                            self.carry = rest[valid_up_to..].to_vec();
                            break;
                        }
                    }
                }
            }
        }
        out
    }

    /// Flush a dangling incomplete sequence at end of stream.
    ///
    /// Returns an empty string when the stream ended on a character boundary.
    pub fn finish(&mut self) -> String {
        let carry = std::mem::take(&mut self.carry);
        if carry.is_empty() {
            String::new()
        } else {
            String::from_utf8_lossy(&carry).into_owned()
        }
    }

    /// Whether bytes are currently buffered awaiting completion
    pub fn has_pending(&self) -> bool {
        !self.carry.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_passthrough() {
        let mut d = Utf8Decoder::new();
        assert_eq!(d.decode(b"Hi"), "Hi");
        assert_eq!(d.decode(b" there"), " there");
        assert_eq!(d.finish(), "");
    }

    #[test]
    fn test_multibyte_split_across_reads() {
        // "é" is 0xC3 0xA9; split it between two fragments
        let mut d = Utf8Decoder::new();
        assert_eq!(d.decode(&[0x63, 0x61, 0x66, 0xC3]), "caf");
        assert!(d.has_pending());
        assert_eq!(d.decode(&[0xA9]), "é");
        assert_eq!(d.finish(), "");
    }

    #[test]
    fn test_four_byte_char_split_three_ways() {
        // U+1F600 GRINNING FACE: F0 9F 98 80
        let mut d = Utf8Decoder::new();
        assert_eq!(d.decode(&[0xF0]), "");
        assert_eq!(d.decode(&[0x9F, 0x98]), "");
        assert_eq!(d.decode(&[0x80]), "😀");
    }

    #[test]
    fn test_split_never_yields_replacement() {
        let text = "híℝ😀".as_bytes();
        // Feed one byte at a time; concatenation must round-trip exactly
        let mut d = Utf8Decoder::new();
        let mut out = String::new();
        for b in text {
            out.push_str(&d.decode(std::slice::from_ref(b)));
        }
        out.push_str(&d.finish());
        assert_eq!(out, "híℝ😀");
        assert!(!out.contains('\u{FFFD}'));
    }

    #[test]
    fn test_invalid_byte_substituted() {
        let mut d = Utf8Decoder::new();
        // 0xFF can never start a sequence
        assert_eq!(d.decode(&[0x61, 0xFF, 0x62]), "a\u{FFFD}b");
        assert!(!d.has_pending());
    }

    #[test]
    fn test_truncated_sequence_flushed_at_end() {
        let mut d = Utf8Decoder::new();
        assert_eq!(d.decode(&[0x61, 0xC3]), "a");
        // Stream ends mid-character: the dangling byte becomes U+FFFD
        assert_eq!(d.finish(), "\u{FFFD}");
        assert!(!d.has_pending());
    }

    #[test]
    fn test_empty_input() {
        let mut d = Utf8Decoder::new();
        assert_eq!(d.decode(&[]), "");
        assert_eq!(d.finish(), "");
    }
}
