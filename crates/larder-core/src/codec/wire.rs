//! Byte format for encoded collections.
//!
//! A collection column is one buffer: a little-endian `u32` entry count
//! followed by the entries. Each entry is a tag byte and a payload: fixed
//! 8 bytes for int/float/date, a `u32` length prefix plus the bytes for
//! text/bytes, and a nested count plus entries for containers. Map buffers
//! hold alternating key/value entries, so their count is `2 * len`.
//!
//! Encoding is canonical: set entries are sorted by their encoded bytes and
//! de-duplicated, map entries are sorted by encoded key bytes with duplicate
//! keys rejected. Identical input therefore always yields byte-identical
//! output.

use crate::{Atom, Error, Result, Timestamp};

const TAG_NULL: u8 = 0;
const TAG_INT: u8 = 1;
const TAG_FLOAT: u8 = 2;
const TAG_DATE: u8 = 3;
const TAG_TEXT: u8 = 4;
const TAG_BYTES: u8 = 5;
const TAG_LIST: u8 = 6;
const TAG_MAP: u8 = 7;
const TAG_SET: u8 = 8;

pub(crate) fn encode_list(items: &[Atom]) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    write_count(&mut buf, items.len())?;
    for atom in items {
        write_atom(&mut buf, atom)?;
    }
    Ok(buf)
}

pub(crate) fn encode_set(items: &[Atom]) -> Result<Vec<u8>> {
    let mut entries = Vec::with_capacity(items.len());
    for atom in items {
        let mut entry = Vec::new();
        write_atom(&mut entry, atom)?;
        entries.push(entry);
    }
    entries.sort();
    entries.dedup();

    let mut buf = Vec::new();
    write_count(&mut buf, entries.len())?;
    for entry in &entries {
        buf.extend_from_slice(entry);
    }
    Ok(buf)
}

pub(crate) fn encode_map(entries: &[(Atom, Atom)]) -> Result<Vec<u8>> {
    let mut encoded = Vec::with_capacity(entries.len());
    for (key, value) in entries {
        let mut key_buf = Vec::new();
        write_atom(&mut key_buf, key)?;
        let mut value_buf = Vec::new();
        write_atom(&mut value_buf, value)?;
        encoded.push((key_buf, value_buf));
    }
    encoded.sort_by(|a, b| a.0.cmp(&b.0));
    for pair in encoded.windows(2) {
        if pair[0].0 == pair[1].0 {
            return Err(Error::unsupported_type("duplicate key in keyed collection"));
        }
    }

    let mut buf = Vec::new();
    write_count(&mut buf, entries.len() * 2)?;
    for (key, value) in &encoded {
        buf.extend_from_slice(key);
        buf.extend_from_slice(value);
    }
    Ok(buf)
}

pub(crate) fn decode_list(bytes: &[u8]) -> Result<Vec<Atom>> {
    let mut cursor = Cursor::new(bytes);
    let items = read_list(&mut cursor)?;
    cursor.finish()?;
    Ok(items)
}

pub(crate) fn decode_set(bytes: &[u8]) -> Result<Vec<Atom>> {
    // Same layout as a list; the stored order is the canonical one.
    decode_list(bytes)
}

pub(crate) fn decode_map(bytes: &[u8]) -> Result<Vec<(Atom, Atom)>> {
    let mut cursor = Cursor::new(bytes);
    let entries = read_map(&mut cursor)?;
    cursor.finish()?;
    Ok(entries)
}

fn write_count(buf: &mut Vec<u8>, count: usize) -> Result<()> {
    let count = u32::try_from(count)
        .map_err(|_| Error::unsupported_type("collection has more than u32::MAX entries"))?;
    buf.extend_from_slice(&count.to_le_bytes());
    Ok(())
}

fn write_atom(buf: &mut Vec<u8>, atom: &Atom) -> Result<()> {
    match atom {
        Atom::Null => buf.push(TAG_NULL),
        Atom::Int(v) => {
            buf.push(TAG_INT);
            buf.extend_from_slice(&v.to_le_bytes());
        }
        Atom::Float(v) => {
            if !v.is_finite() {
                return Err(Error::unsupported_type(
                    "non-finite float has no storage representation",
                ));
            }
            buf.push(TAG_FLOAT);
            buf.extend_from_slice(&v.to_le_bytes());
        }
        Atom::Date(ts) => {
            buf.push(TAG_DATE);
            buf.extend_from_slice(&ts.millis().to_le_bytes());
        }
        Atom::Text(v) => {
            buf.push(TAG_TEXT);
            write_count(buf, v.len())?;
            buf.extend_from_slice(v.as_bytes());
        }
        Atom::Bytes(v) => {
            buf.push(TAG_BYTES);
            write_count(buf, v.len())?;
            buf.extend_from_slice(v);
        }
        Atom::List(items) => {
            buf.push(TAG_LIST);
            buf.extend_from_slice(&encode_list(items)?);
        }
        Atom::Map(entries) => {
            buf.push(TAG_MAP);
            buf.extend_from_slice(&encode_map(entries)?);
        }
        Atom::Set(items) => {
            buf.push(TAG_SET);
            buf.extend_from_slice(&encode_set(items)?);
        }
    }
    Ok(())
}

fn read_list(cursor: &mut Cursor<'_>) -> Result<Vec<Atom>> {
    let count = cursor.take_count()?;
    let mut items = Vec::with_capacity(count.min(1024));
    for _ in 0..count {
        items.push(read_atom(cursor)?);
    }
    Ok(items)
}

fn read_map(cursor: &mut Cursor<'_>) -> Result<Vec<(Atom, Atom)>> {
    let count = cursor.take_count()?;
    if count % 2 != 0 {
        return Err(Error::corrupt_encoding(
            "keyed collection buffer holds an odd number of entries",
        ));
    }
    let mut entries = Vec::with_capacity((count / 2).min(1024));
    for _ in 0..count / 2 {
        let key = read_atom(cursor)?;
        let value = read_atom(cursor)?;
        entries.push((key, value));
    }
    Ok(entries)
}

fn read_atom(cursor: &mut Cursor<'_>) -> Result<Atom> {
    let tag = cursor.take_u8()?;
    Ok(match tag {
        TAG_NULL => Atom::Null,
        TAG_INT => Atom::Int(i64::from_le_bytes(cursor.take_fixed()?)),
        TAG_FLOAT => Atom::Float(f64::from_le_bytes(cursor.take_fixed()?)),
        TAG_DATE => Atom::Date(Timestamp::from_millis(i64::from_le_bytes(
            cursor.take_fixed()?,
        ))),
        TAG_TEXT => {
            let len = cursor.take_count()?;
            let bytes = cursor.take(len)?;
            let text = std::str::from_utf8(bytes)
                .map_err(|_| Error::corrupt_encoding("text entry is not valid UTF-8"))?;
            Atom::Text(text.to_string())
        }
        TAG_BYTES => {
            let len = cursor.take_count()?;
            Atom::Bytes(cursor.take(len)?.to_vec())
        }
        TAG_LIST => Atom::List(read_list(cursor)?),
        TAG_MAP => Atom::Map(read_map(cursor)?),
        TAG_SET => Atom::Set(read_list(cursor)?),
        _ => {
            return Err(Error::corrupt_encoding(format!(
                "unknown collection entry tag {tag}"
            )))
        }
    })
}

struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8]> {
        let end = self
            .pos
            .checked_add(len)
            .filter(|&end| end <= self.bytes.len())
            .ok_or_else(|| Error::corrupt_encoding("collection buffer truncated"))?;
        let slice = &self.bytes[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    fn take_u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    fn take_fixed<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    fn take_count(&mut self) -> Result<usize> {
        Ok(u32::from_le_bytes(self.take_fixed()?) as usize)
    }

    fn finish(&self) -> Result<()> {
        if self.pos != self.bytes.len() {
            return Err(Error::corrupt_encoding(
                "trailing bytes after collection entries",
            ));
        }
        Ok(())
    }
}
