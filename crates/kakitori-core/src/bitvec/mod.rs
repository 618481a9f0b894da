//! BitVector - Fixed-size bit arrays
//!
//! Bits are packed into bytes least significant bit first. Bits past the
//! declared length are kept clear, so equality and [`BitVector::count_ones`]
//! only ever see meaningful bits.

mod serial;

/// A bit array with a declared length.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct BitVector {
    bytes: Vec<u8>,
    len: usize,
}

impl BitVector {
    /// Create a bit vector of `len` clear bits.
    pub fn new(len: usize) -> Self {
        Self::with_fill(len, false)
    }

    /// Create a bit vector of `len` bits all set to `fill`.
    pub fn with_fill(len: usize, fill: bool) -> Self {
        let mut v = Self {
            bytes: vec![if fill { 0xff } else { 0 }; len.div_ceil(8)],
            len,
        };
        v.clear_tail();
        v
    }

    /// Number of bits
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Read bit `index`.
    #[inline]
    pub fn get(&self, index: usize) -> bool {
        debug_assert!(index < self.len, "bit index out of range");
        self.bytes[index / 8] & (1 << (index % 8)) != 0
    }

    /// Write bit `index`.
    #[inline]
    pub fn set(&mut self, index: usize, value: bool) {
        debug_assert!(index < self.len, "bit index out of range");
        let mask = 1 << (index % 8);
        if value {
            self.bytes[index / 8] |= mask;
        } else {
            self.bytes[index / 8] &= !mask;
        }
    }

    /// Change the length; new bits take the value `fill`.
    pub fn resize(&mut self, len: usize, fill: bool) {
        let old = self.len;
        self.bytes.resize(len.div_ceil(8), 0);
        self.len = len;
        for i in old..len {
            self.set(i, fill);
        }
        self.clear_tail();
    }

    /// Number of set bits
    pub fn count_ones(&self) -> usize {
        self.bytes.iter().map(|b| b.count_ones() as usize).sum()
    }

    /// Iterate over the indices of set bits in ascending order.
    pub fn ones(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.len).filter(|&i| self.get(i))
    }

    /// Packed bytes, least significant bit first
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    fn clear_tail(&mut self) {
        let used = self.len % 8;
        if used == 0 {
            return;
        }
        if let Some(last) = self.bytes.last_mut() {
            *last &= (1u8 << used) - 1;
        }
    }
}
