/// A fixed-length packed bit vector.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bitmap {
    words: Vec<u64>,
    len: usize,
}

impl Bitmap {
    /// A bitmap of `len` cleared bits.
    pub fn new(len: usize) -> Self {
        Self {
            words: vec![0; len.div_ceil(64)],
            len,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Bit `i`. Out-of-range bits read as cleared.
    #[inline]
    pub fn get(&self, i: usize) -> bool {
        i < self.len && self.words[i / 64] & (1 << (i % 64)) != 0
    }

    /// Set bit `i`. Out-of-range writes are ignored.
    #[inline]
    pub fn set(&mut self, i: usize, value: bool) {
        if i >= self.len {
            return;
        }
        let mask = 1 << (i % 64);
        if value {
            self.words[i / 64] |= mask;
        } else {
            self.words[i / 64] &= !mask;
        }
    }

    /// Number of set bits.
    pub fn count_ones(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Iterate over every bit in order.
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.len).map(|i| self.get(i))
    }

    /// Order-sensitive checksum, comparable across hosts.
    ///
    /// Each bit is weighted by the next term of `f = 3f + 1` (wrapping).
    pub fn checksum(&self) -> u32 {
        let mut factor: u32 = 0;
        let mut sum: u32 = 0;
        for bit in self.iter() {
            factor = factor.wrapping_mul(3).wrapping_add(1);
            if bit {
                sum ^= factor;
            }
        }
        sum
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_and_get_across_words() {
        let mut b = Bitmap::new(130);
        b.set(0, true);
        b.set(64, true);
        b.set(129, true);
        assert!(b.get(0) && b.get(64) && b.get(129));
        assert!(!b.get(1) && !b.get(128));
        assert_eq!(b.count_ones(), 3);
        b.set(64, false);
        assert!(!b.get(64));
    }

    #[test]
    fn out_of_range_is_cleared_and_ignored() {
        let mut b = Bitmap::new(3);
        b.set(3, true);
        assert!(!b.get(3));
        assert_eq!(b.count_ones(), 0);
    }

    #[test]
    fn checksum_weights_by_position() {
        let mut b = Bitmap::new(4);
        assert_eq!(b.checksum(), 0);
        b.set(0, true);
        assert_eq!(b.checksum(), 1);
        b.set(0, false);
        b.set(1, true);
        assert_eq!(b.checksum(), 4);
        b.set(2, true);
        assert_eq!(b.checksum(), 4 ^ 13);
    }
}
