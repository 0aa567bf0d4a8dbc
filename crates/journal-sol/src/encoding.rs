//! Borsh-compatible byte encoding for instruction payloads and account data.
//!
//! The journal program deserializes its arguments with Borsh, so every
//! `String` argument travels as:
//!
//! ```text
//! length   u32 little-endian (byte length, not char count)
//! bytes    UTF-8, no terminator, no padding
//! ```

use crate::error::JournalError;

/// Size of the little-endian length header in front of every string.
pub const LENGTH_PREFIX_LEN: usize = 4;

/// Encode `s` as a length-prefixed UTF-8 string.
///
/// No upper bound is enforced here; callers that map the string onto a
/// bounded on-chain field check the length themselves.
pub fn encode_length_prefixed_string(s: &str) -> Vec<u8> {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(LENGTH_PREFIX_LEN + bytes.len());
    out.extend_from_slice(&(bytes.len() as u32).to_le_bytes());
    out.extend_from_slice(bytes);
    out
}

/// Concatenate byte chunks in order.
pub fn concat(chunks: &[&[u8]]) -> Vec<u8> {
    let total = chunks.iter().map(|c| c.len()).sum();
    let mut out = Vec::with_capacity(total);
    for chunk in chunks {
        out.extend_from_slice(chunk);
    }
    out
}

/// Decode a length-prefixed UTF-8 string from the start of `data`.
///
/// Returns the string and the number of bytes consumed (header included).
pub fn decode_length_prefixed_string(data: &[u8]) -> Result<(String, usize), JournalError> {
    let header: [u8; LENGTH_PREFIX_LEN] = data
        .get(..LENGTH_PREFIX_LEN)
        .and_then(|h| h.try_into().ok())
        .ok_or_else(|| {
            JournalError::AccountData(format!(
                "expected {LENGTH_PREFIX_LEN}-byte length header, got {} bytes",
                data.len()
            ))
        })?;
    let len = u32::from_le_bytes(header) as usize;

    let end = LENGTH_PREFIX_LEN
        .checked_add(len)
        .filter(|end| *end <= data.len())
        .ok_or_else(|| {
            JournalError::AccountData(format!(
                "string length {len} exceeds remaining {} bytes",
                data.len() - LENGTH_PREFIX_LEN
            ))
        })?;

    let s = std::str::from_utf8(&data[LENGTH_PREFIX_LEN..end])
        .map_err(|e| JournalError::AccountData(format!("invalid utf-8: {e}")))?;

    Ok((s.to_owned(), end))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_hi() {
        assert_eq!(
            encode_length_prefixed_string("hi"),
            vec![0x02, 0x00, 0x00, 0x00, 0x68, 0x69]
        );
    }

    #[test]
    fn encode_empty_string_is_header_only() {
        assert_eq!(encode_length_prefixed_string(""), vec![0, 0, 0, 0]);
    }

    #[test]
    fn length_header_counts_bytes_not_chars() {
        // "é" is 2 bytes, "日本" is 6 bytes.
        let s = "é日本";
        let encoded = encode_length_prefixed_string(s);
        assert_eq!(encoded.len(), 4 + 8);
        let header = u32::from_le_bytes(encoded[..4].try_into().unwrap());
        assert_eq!(header, 8);
        assert_eq!(&encoded[4..], s.as_bytes());
    }

    #[test]
    fn header_and_length_hold_for_random_strings() {
        use rand::distributions::{Alphanumeric, DistString};

        let mut rng = rand::thread_rng();
        for len in [0usize, 1, 31, 32, 33, 255, 256, 1000] {
            let s = Alphanumeric.sample_string(&mut rng, len);
            let encoded = encode_length_prefixed_string(&s);
            assert_eq!(encoded.len(), 4 + s.len());
            let header = u32::from_le_bytes(encoded[..4].try_into().unwrap());
            assert_eq!(header as usize, s.len());
        }
    }

    #[test]
    fn concat_preserves_order() {
        let out = concat(&[&[1, 2], &[], &[3], &[4, 5, 6]]);
        assert_eq!(out, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn concat_of_nothing_is_empty() {
        assert!(concat(&[]).is_empty());
    }

    #[test]
    fn decode_reads_back_and_reports_consumed() {
        let mut data = encode_length_prefixed_string("journal");
        data.extend_from_slice(&[0xff, 0xff]);

        let (s, consumed) = decode_length_prefixed_string(&data).unwrap();
        assert_eq!(s, "journal");
        assert_eq!(consumed, 4 + 7);
    }

    #[test]
    fn decode_rejects_short_header() {
        let err = decode_length_prefixed_string(&[1, 0]).unwrap_err();
        assert!(matches!(err, JournalError::AccountData(_)));
    }

    #[test]
    fn decode_rejects_truncated_body() {
        let err = decode_length_prefixed_string(&[5, 0, 0, 0, b'a', b'b']).unwrap_err();
        assert!(err.to_string().contains("exceeds remaining 2 bytes"));
    }

    #[test]
    fn decode_rejects_huge_length() {
        let err = decode_length_prefixed_string(&[0xff, 0xff, 0xff, 0xff]).unwrap_err();
        assert!(matches!(err, JournalError::AccountData(_)));
    }

    #[test]
    fn decode_rejects_invalid_utf8() {
        let err = decode_length_prefixed_string(&[2, 0, 0, 0, 0xc3, 0x28]).unwrap_err();
        assert!(err.to_string().contains("invalid utf-8"));
    }
}
