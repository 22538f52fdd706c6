//! Minimal XDR (RFC 4506) reader and writer.
//!
//! Everything is big-endian and 4-byte aligned. Variable-length opaques and
//! arrays carry a u32 length prefix; opaques are zero-padded to a multiple of 4.

use crate::error::TxError;

/// Append-only XDR encoder.
#[derive(Default)]
pub struct XdrWriter {
    buf: Vec<u8>,
}

impl XdrWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write_i32(&mut self, v: i32) {
        self.buf.extend_from_slice(&v.to_be_bytes());
    }

    pub fn write_u32(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_be_bytes());
    }

    pub fn write_i64(&mut self, v: i64) {
        self.buf.extend_from_slice(&v.to_be_bytes());
    }

    pub fn write_u64(&mut self, v: u64) {
        self.buf.extend_from_slice(&v.to_be_bytes());
    }

    pub fn write_bool(&mut self, v: bool) {
        self.write_u32(u32::from(v));
    }

    /// Fixed-length opaque: raw bytes plus padding, no length prefix.
    pub fn write_fixed(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
        self.pad(bytes.len());
    }

    /// Variable-length opaque: u32 length, bytes, padding.
    pub fn write_var(&mut self, bytes: &[u8]) {
        self.write_u32(bytes.len() as u32);
        self.write_fixed(bytes);
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    fn pad(&mut self, len: usize) {
        let padding = (4 - len % 4) % 4;
        self.buf.extend(std::iter::repeat(0u8).take(padding));
    }
}

/// Cursor over an XDR buffer.
pub struct XdrReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> XdrReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], TxError> {
        let end = self
            .pos
            .checked_add(n)
            .filter(|&end| end <= self.data.len())
            .ok_or(TxError::UnexpectedEof {
                offset: self.pos,
                needed: n,
            })?;
        let slice = &self.data[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    fn take_array<const N: usize>(&mut self) -> Result<[u8; N], TxError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    pub fn read_i32(&mut self) -> Result<i32, TxError> {
        Ok(i32::from_be_bytes(self.take_array()?))
    }

    pub fn read_u32(&mut self) -> Result<u32, TxError> {
        Ok(u32::from_be_bytes(self.take_array()?))
    }

    pub fn read_i64(&mut self) -> Result<i64, TxError> {
        Ok(i64::from_be_bytes(self.take_array()?))
    }

    pub fn read_u64(&mut self) -> Result<u64, TxError> {
        Ok(u64::from_be_bytes(self.take_array()?))
    }

    pub fn read_bool(&mut self) -> Result<bool, TxError> {
        match self.read_i32()? {
            0 => Ok(false),
            1 => Ok(true),
            value => Err(TxError::UnsupportedDiscriminant { what: "bool", value }),
        }
    }

    pub fn read_fixed<const N: usize>(&mut self) -> Result<[u8; N], TxError> {
        let out = self.take_array::<N>()?;
        self.skip_padding(N)?;
        Ok(out)
    }

    /// Variable-length opaque with an upper bound on its length.
    pub fn read_var(&mut self, what: &'static str, max: usize) -> Result<Vec<u8>, TxError> {
        let len = self.read_u32()? as usize;
        if len > max {
            return Err(TxError::LengthExceeded { what, len, max });
        }
        let bytes = self.take(len)?.to_vec();
        self.skip_padding(len)?;
        Ok(bytes)
    }

    /// Array length prefix with an upper bound.
    pub fn read_len(&mut self, what: &'static str, max: usize) -> Result<usize, TxError> {
        let len = self.read_u32()? as usize;
        if len > max {
            return Err(TxError::LengthExceeded { what, len, max });
        }
        Ok(len)
    }

    /// Fail unless every byte has been consumed.
    pub fn finish(self) -> Result<(), TxError> {
        match self.data.len() - self.pos {
            0 => Ok(()),
            rest => Err(TxError::TrailingBytes(rest)),
        }
    }

    fn skip_padding(&mut self, len: usize) -> Result<(), TxError> {
        let padding = (4 - len % 4) % 4;
        if self.take(padding)?.iter().any(|&b| b != 0) {
            return Err(TxError::NonZeroPadding);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers_are_big_endian() {
        let mut w = XdrWriter::new();
        w.write_i32(2);
        w.write_i64(-1);
        assert_eq!(
            w.into_bytes(),
            vec![0, 0, 0, 2, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff]
        );
    }

    #[test]
    fn var_opaque_is_padded() {
        let mut w = XdrWriter::new();
        w.write_var(&[1, 2, 3, 4, 5]);
        assert_eq!(w.into_bytes(), vec![0, 0, 0, 5, 1, 2, 3, 4, 5, 0, 0, 0]);
    }

    #[test]
    fn reader_reads_back_writer_output() {
        let mut w = XdrWriter::new();
        w.write_u32(7);
        w.write_var(b"abc");
        w.write_fixed(&[9, 9, 9, 9]);
        w.write_bool(true);
        let bytes = w.into_bytes();

        let mut r = XdrReader::new(&bytes);
        assert_eq!(r.read_u32().unwrap(), 7);
        assert_eq!(r.read_var("test", 64).unwrap(), b"abc");
        assert_eq!(r.read_fixed::<4>().unwrap(), [9, 9, 9, 9]);
        assert!(r.read_bool().unwrap());
        r.finish().unwrap();
    }

    #[test]
    fn truncated_input_reports_offset() {
        let mut r = XdrReader::new(&[0, 0, 0]);
        assert_eq!(
            r.read_u32(),
            Err(TxError::UnexpectedEof { offset: 0, needed: 4 })
        );
    }

    #[test]
    fn oversized_var_rejected_before_reading() {
        let bytes = [0u8, 0, 1, 0];
        let mut r = XdrReader::new(&bytes);
        assert!(matches!(
            r.read_var("signature", 64),
            Err(TxError::LengthExceeded { len: 256, max: 64, .. })
        ));
    }

    #[test]
    fn nonzero_padding_rejected() {
        let bytes = [0u8, 0, 0, 1, 0xAA, 0, 0, 1];
        let mut r = XdrReader::new(&bytes);
        assert_eq!(r.read_var("test", 4), Err(TxError::NonZeroPadding));
    }

    #[test]
    fn trailing_bytes_rejected() {
        let bytes = [0u8; 8];
        let mut r = XdrReader::new(&bytes);
        r.read_u32().unwrap();
        assert_eq!(r.finish(), Err(TxError::TrailingBytes(4)));
    }
}
