//! Carry-propagating accumulator for Solinas modular reduction.
//!
//! A Solinas reduction rewrites a 512-bit product as eight signed sums of
//! 32-bit limbs of the product. The sums are evaluated in 64-bit signed
//! arithmetic; each one deposits its low 32 bits into the output and
//! carries the (possibly negative) remainder into the next sum.

use super::util::{set_u32, Word, Words};

/// Accumulates the signed partial sums of a Solinas reduction into a
/// 256-bit output, least-significant limb first.
pub(crate) struct SolinasAccum<'a> {
    r: &'a mut Words,
    idx: usize,
    carry: i64,
}

impl<'a> SolinasAccum<'a> {
    /// Begins accumulation into `r`, which must be zero.
    pub fn new(r: &'a mut Words) -> Self {
        Self { r, idx: 0, carry: 0 }
    }

    /// Folds in the next partial sum. Each sum is small (a handful of
    /// 33-bit terms), so adding the running carry cannot overflow i64.
    pub fn accum(&mut self, s: i64) {
        debug_assert!(self.idx < 8);

        let s = s + self.carry;
        set_u32(self.r, self.idx, s as u32);
        self.carry = s >> 32;
        self.idx += 1;
    }

    /// Finishes accumulation, returning the final signed carry offset by
    /// `c`. The caller chooses `c` so the result is non-negative.
    pub fn final_carry(self, c: i64) -> Word {
        debug_assert_eq!(self.idx, 8);

        let s = c + self.carry;
        debug_assert!(s >= 0);
        s as Word
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arithmetic::util::{get_u32, LIMBS};

    #[test]
    fn positive_sums_propagate() {
        let mut r = [0; LIMBS];
        let mut accum = SolinasAccum::new(&mut r);
        accum.accum(0x1_0000_0005); // low limb 5, carry 1
        accum.accum(1); // 1 + carry = 2
        for _ in 2..8 {
            accum.accum(0);
        }
        assert_eq!(accum.final_carry(0), 0);
        assert_eq!(get_u32(&r, 0), 5);
        assert_eq!(get_u32(&r, 1), 2);
    }

    #[test]
    fn negative_sum_borrows_from_next() {
        let mut r = [0; LIMBS];
        let mut accum = SolinasAccum::new(&mut r);
        accum.accum(-1); // limb = 2^32 - 1, carry = -1
        accum.accum(3); // 3 - 1 = 2
        for _ in 2..8 {
            accum.accum(0);
        }
        assert_eq!(accum.final_carry(0), 0);
        assert_eq!(get_u32(&r, 0), u32::MAX);
        assert_eq!(get_u32(&r, 1), 2);
    }

    #[test]
    fn final_carry_offsets() {
        let mut r = [0; LIMBS];
        let mut accum = SolinasAccum::new(&mut r);
        for _ in 0..7 {
            accum.accum(0);
        }
        accum.accum(0x3_0000_0000); // carry 3 out of the top limb
        assert_eq!(accum.final_carry(2), 5);
    }
}
