//! Encoding and parsing of the on-disk record framing.
//!
//! Every record is a self-describing frame: a little-endian `payload_len`
//! prefix, a one-byte op, two little-endian length fields, the key bytes,
//! the value bytes (PUT only), and a repeated `payload_len` suffix. The
//! prefix/suffix pair lets recovery detect a torn trailing write without
//! needing a separate checksum.

use crate::storage_engine::constants::*;

/// A record successfully parsed out of a byte slice, with all offsets
/// absolute within that slice.
#[derive(Debug, Clone, Copy)]
pub struct ParsedRecord {
    pub op: u8,
    pub key_start: usize,
    pub key_len: usize,
    pub value_start: usize,
    pub value_len: usize,
    /// Total bytes consumed by this record, prefix through suffix inclusive.
    pub record_len: usize,
}

impl ParsedRecord {
    #[inline]
    pub fn is_put(&self) -> bool {
        self.op == OP_PUT
    }

    #[inline]
    pub fn key_range(&self) -> std::ops::Range<usize> {
        self.key_start..self.key_start + self.key_len
    }

    #[inline]
    pub fn value_range(&self) -> std::ops::Range<usize> {
        self.value_start..self.value_start + self.value_len
    }
}

/// Attempts to parse one record starting at `offset` within `data`.
///
/// Returns `None` whenever the bytes at `offset` do not describe a
/// complete, well-formed record: too few trailing bytes for the header, an
/// unrecognised op, a DEL with a non-zero `val_len`, a prefix/suffix
/// mismatch, or a claimed payload that would run past the end of `data`.
/// Every one of these is recovery's cue to truncate at `offset` and stop
/// (see `RawLog::recover`); none of them is distinguished from the others,
/// matching the spec's "if any check fails... truncate" recovery rule.
pub fn try_parse_record(data: &[u8], offset: usize) -> Option<ParsedRecord> {
    let len = data.len();

    if offset.checked_add(LEN_FIELD_SIZE)? > len {
        return None;
    }
    let prefix_len = u32::from_le_bytes(data[offset..offset + LEN_FIELD_SIZE].try_into().ok()?);

    let header_start = offset + LEN_FIELD_SIZE;
    if header_start + HEADER_SIZE > len {
        return None;
    }

    let op = data[header_start];
    if op != OP_PUT && op != OP_DEL {
        return None;
    }

    let key_len =
        u32::from_le_bytes(data[header_start + 1..header_start + 5].try_into().ok()?) as usize;
    let val_len =
        u32::from_le_bytes(data[header_start + 5..header_start + 9].try_into().ok()?) as usize;

    if op == OP_DEL && val_len != 0 {
        return None;
    }

    let expected_payload_len = (OP_FIELD_SIZE + LEN_FIELD_SIZE + LEN_FIELD_SIZE + key_len + val_len) as u32;
    if prefix_len != expected_payload_len {
        return None;
    }

    let key_start = header_start + HEADER_SIZE;
    let value_start = key_start + key_len;
    let suffix_start = value_start + val_len;

    if suffix_start + LEN_FIELD_SIZE > len {
        return None;
    }

    let suffix_len =
        u32::from_le_bytes(data[suffix_start..suffix_start + LEN_FIELD_SIZE].try_into().ok()?);
    if suffix_len != prefix_len {
        return None;
    }

    Some(ParsedRecord {
        op,
        key_start,
        key_len,
        value_start,
        value_len: val_len,
        record_len: (suffix_start + LEN_FIELD_SIZE) - offset,
    })
}

/// Appends one framed record for `key`/`value` (PUT) to `out`.
pub fn encode_put(out: &mut Vec<u8>, key: &[u8], value: &[u8]) {
    encode_record(out, OP_PUT, key, value);
}

/// Appends one framed tombstone record for `key` to `out`.
pub fn encode_del(out: &mut Vec<u8>, key: &[u8]) {
    encode_record(out, OP_DEL, key, &[]);
}

fn encode_record(out: &mut Vec<u8>, op: u8, key: &[u8], value: &[u8]) {
    let payload_len = (OP_FIELD_SIZE + LEN_FIELD_SIZE + LEN_FIELD_SIZE + key.len() + value.len()) as u32;

    out.reserve(encoded_len(key.len(), value.len()));
    out.extend_from_slice(&payload_len.to_le_bytes());
    out.push(op);
    out.extend_from_slice(&(key.len() as u32).to_le_bytes());
    out.extend_from_slice(&(value.len() as u32).to_le_bytes());
    out.extend_from_slice(key);
    out.extend_from_slice(value);
    out.extend_from_slice(&payload_len.to_le_bytes());
}

/// The total on-disk size of a record with the given key/value lengths.
#[inline]
pub fn encoded_len(key_len: usize, value_len: usize) -> usize {
    LEN_FIELD_SIZE + HEADER_SIZE + key_len + value_len + LEN_FIELD_SIZE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_a_put() {
        let mut buf = Vec::new();
        encode_put(&mut buf, b"alpha", b"one");
        let parsed = try_parse_record(&buf, 0).expect("should parse");
        assert!(parsed.is_put());
        assert_eq!(&buf[parsed.key_range()], b"alpha");
        assert_eq!(&buf[parsed.value_range()], b"one");
        assert_eq!(parsed.record_len, buf.len());
    }

    #[test]
    fn round_trips_a_del() {
        let mut buf = Vec::new();
        encode_del(&mut buf, b"alpha");
        let parsed = try_parse_record(&buf, 0).expect("should parse");
        assert!(!parsed.is_put());
        assert_eq!(&buf[parsed.key_range()], b"alpha");
        assert_eq!(parsed.value_len, 0);
    }

    #[test]
    fn empty_value_put_is_distinct_from_tombstone() {
        let mut put_buf = Vec::new();
        encode_put(&mut put_buf, b"k", b"");
        let put = try_parse_record(&put_buf, 0).unwrap();
        assert!(put.is_put());
        assert_eq!(put.value_len, 0);

        let mut del_buf = Vec::new();
        encode_del(&mut del_buf, b"k");
        let del = try_parse_record(&del_buf, 0).unwrap();
        assert!(!del.is_put());
    }

    #[test]
    fn zero_length_key_is_legal() {
        let mut buf = Vec::new();
        encode_put(&mut buf, b"", b"value");
        let parsed = try_parse_record(&buf, 0).unwrap();
        assert_eq!(parsed.key_len, 0);
        assert_eq!(&buf[parsed.value_range()], b"value");
    }

    #[test]
    fn rejects_partial_tail() {
        let mut buf = Vec::new();
        encode_put(&mut buf, b"alpha", b"one");
        buf.truncate(buf.len() - 1);
        assert!(try_parse_record(&buf, 0).is_none());
    }

    #[test]
    fn rejects_mismatched_suffix() {
        let mut buf = Vec::new();
        encode_put(&mut buf, b"alpha", b"one");
        let last = buf.len() - 1;
        buf[last] ^= 0xFF;
        assert!(try_parse_record(&buf, 0).is_none());
    }

    #[test]
    fn two_records_parse_sequentially() {
        let mut buf = Vec::new();
        encode_put(&mut buf, b"a", b"1");
        let first_len = buf.len();
        encode_put(&mut buf, b"b", b"2");

        let first = try_parse_record(&buf, 0).unwrap();
        assert_eq!(first.record_len, first_len);
        let second = try_parse_record(&buf, first_len).unwrap();
        assert_eq!(&buf[second.key_range()], b"b");
    }
}
