//! Word-level helper functions and the crate's word model.
//!
//! All 256-bit quantities are stored as little-endian arrays of native
//! machine words. Every routine in this module executes a fixed sequence of
//! word operations regardless of operand values; conditions are carried as
//! all-zero/all-one word masks, never as branches.

use crypto_bigint::U256;

/// Native machine word used for multi-word integer storage.
pub use crypto_bigint::Word;

/// Number of words in a 256-bit value.
pub const LIMBS: usize = U256::LIMBS;

/// Number of words in a double-width (512-bit) value.
pub const WIDE_LIMBS: usize = 2 * LIMBS;

/// A 256-bit unsigned integer as little-endian words.
pub type Words = [Word; LIMBS];

/// A 512-bit unsigned integer as little-endian words, e.g. an unreduced
/// field-element product.
pub type WideWords = [Word; WIDE_LIMBS];

#[cfg(target_pointer_width = "32")]
pub(crate) type WideWord = u64;
#[cfg(target_pointer_width = "64")]
pub(crate) type WideWord = u128;

/// Computes `a + b + carry`, returning the result along with the new carry.
#[inline(always)]
pub(crate) const fn adc(a: Word, b: Word, carry: Word) -> (Word, Word) {
    let ret = (a as WideWord) + (b as WideWord) + (carry as WideWord);
    (ret as Word, (ret >> Word::BITS) as Word)
}

/// Computes `a - (b + borrow)`, returning the result along with the new
/// borrow. The borrow is in mask form: zero or all ones.
#[inline(always)]
pub(crate) const fn sbb(a: Word, b: Word, borrow: Word) -> (Word, Word) {
    let ret = (a as WideWord).wrapping_sub((b as WideWord) + ((borrow >> (Word::BITS - 1)) as WideWord));
    (ret as Word, (ret >> Word::BITS) as Word)
}

/// Computes `a + (b * c) + carry`, returning the result along with the new
/// carry.
#[inline(always)]
pub(crate) const fn mac(a: Word, b: Word, c: Word, carry: Word) -> (Word, Word) {
    let ret = (a as WideWord) + ((b as WideWord) * (c as WideWord)) + (carry as WideWord);
    (ret as Word, (ret >> Word::BITS) as Word)
}

/// Adds two multi-word values, returning the sum and the carry-out word
/// (zero or one).
pub(crate) fn add_words(a: &Words, b: &Words) -> (Words, Word) {
    let mut w = [0; LIMBS];
    let mut carry = 0;
    for i in 0..LIMBS {
        let (t, c) = adc(a[i], b[i], carry);
        w[i] = t;
        carry = c;
    }
    (w, carry)
}

/// Subtracts `b` from `a`, returning the difference and the borrow-out in
/// mask form (all ones iff `a < b`).
pub(crate) fn sub_words(a: &Words, b: &Words) -> (Words, Word) {
    let mut w = [0; LIMBS];
    let mut borrow = 0;
    for i in 0..LIMBS {
        let (t, b2) = sbb(a[i], b[i], borrow);
        w[i] = t;
        borrow = b2;
    }
    (w, borrow)
}

/// Adds `b` to `a` iff `mask` is all ones. `mask` must be zero or all ones.
pub(crate) fn cnd_add(a: &Words, b: &Words, mask: Word) -> Words {
    let mut w = [0; LIMBS];
    let mut carry = 0;
    for i in 0..LIMBS {
        let (t, c) = adc(a[i], b[i] & mask, carry);
        w[i] = t;
        carry = c;
    }
    w
}

/// Modular addition: `(a + b) mod p`. Both inputs must already be reduced.
pub(crate) fn add_mod(a: &Words, b: &Words, p: &Words) -> Words {
    let (w, carry) = add_words(a, b);

    // The sum may exceed the modulus (and may not fit in LIMBS words when
    // the modulus has its top bit set), so subtract p and add it back if
    // that underflowed.
    let (d, borrow) = sub_words(&w, p);
    let (_, borrow) = sbb(carry, 0, borrow);
    cnd_add(&d, p, borrow)
}

/// Modular subtraction: `(a - b) mod p`. Both inputs must already be reduced.
pub(crate) fn sub_mod(a: &Words, b: &Words, p: &Words) -> Words {
    let (w, borrow) = sub_words(a, b);
    cnd_add(&w, p, borrow)
}

/// Schoolbook multiplication producing the full double-width product.
pub(crate) fn mul_wide(a: &Words, b: &Words) -> WideWords {
    let mut w = [0; WIDE_LIMBS];
    for i in 0..LIMBS {
        let mut carry = 0;
        for j in 0..LIMBS {
            let (t, c) = mac(w[i + j], a[i], b[j], carry);
            w[i + j] = t;
            carry = c;
        }
        w[i + LIMBS] = carry;
    }
    w
}

/// Dedicated squaring: computes the off-diagonal products once, doubles
/// them with a single shift, then folds in the diagonal terms. Saves close
/// to half the single-word multiplications of [`mul_wide`].
pub(crate) fn square_wide(a: &Words) -> WideWords {
    let mut w = [0; WIDE_LIMBS];

    for i in 0..LIMBS {
        let mut carry = 0;
        for j in (i + 1)..LIMBS {
            let (t, c) = mac(w[i + j], a[i], a[j], carry);
            w[i + j] = t;
            carry = c;
        }
        w[i + LIMBS] = carry;
    }

    // Double the off-diagonal sum. Its top bit is clear, so nothing shifts
    // out of the high word.
    let mut top = 0;
    for i in 0..WIDE_LIMBS {
        let t = w[i] >> (Word::BITS - 1);
        w[i] = (w[i] << 1) | top;
        top = t;
    }

    // Fold in the diagonal squares.
    let mut carry = 0;
    for i in 0..LIMBS {
        let (lo, c) = mac(w[2 * i], a[i], a[i], carry);
        w[2 * i] = lo;
        let (hi, c2) = adc(w[2 * i + 1], 0, c);
        w[2 * i + 1] = hi;
        carry = c2;
    }

    w
}

/// Subtracts a small constant, assuming no multi-word underflow can occur
/// (true for any modulus above 2^64).
pub(crate) fn wsub(a: &Words, b: Word) -> Words {
    let mut w = [0; LIMBS];
    let (t, mut borrow) = sbb(a[0], b, 0);
    w[0] = t;
    for i in 1..LIMBS {
        let (t, b2) = sbb(a[i], 0, borrow);
        w[i] = t;
        borrow = b2;
    }
    debug_assert_eq!(borrow, 0);
    w
}

/// Adds one, assuming no overflow out of LIMBS words.
pub(crate) fn wadd1(a: &Words) -> Words {
    let mut w = [0; LIMBS];
    let mut carry = 1;
    for i in 0..LIMBS {
        let (t, c) = adc(a[i], 0, carry);
        w[i] = t;
        carry = c;
    }
    debug_assert_eq!(carry, 0);
    w
}

/// Logical right shift by two bits.
pub(crate) fn shr2(a: &Words) -> Words {
    let mut w = [0; LIMBS];
    for i in 0..LIMBS {
        let hi = if i + 1 < LIMBS { a[i + 1] << (Word::BITS - 2) } else { 0 };
        w[i] = (a[i] >> 2) | hi;
    }
    w
}

/// Extracts the `i`-th 32-bit limb of a little-endian word array,
/// independent of the native word width.
#[inline(always)]
pub(crate) fn get_u32(z: &[Word], i: usize) -> u32 {
    let bits = Word::BITS as usize;
    ((z[(i * 32) / bits] as u64) >> ((i * 32) % bits)) as u32
}

/// Writes the `i`-th 32-bit limb of a little-endian word array. The target
/// bits must currently be zero.
#[inline(always)]
pub(crate) fn set_u32(z: &mut [Word], i: usize, v: u32) {
    let bits = Word::BITS as usize;
    z[(i * 32) / bits] |= (v as Word) << ((i * 32) % bits);
}

/// Converts little-endian words to the canonical fixed-width big-endian
/// byte encoding.
pub(crate) fn words_to_be_bytes(w: &Words) -> [u8; 32] {
    let mut out = [0u8; 32];
    let wb = Word::BITS as usize / 8;
    for i in 0..LIMBS {
        let be = w[LIMBS - 1 - i].to_be_bytes();
        out[i * wb..(i + 1) * wb].copy_from_slice(&be);
    }
    out
}

/// Converts little-endian words to little-endian bytes.
pub(crate) fn words_to_le_bytes(w: &Words) -> [u8; 32] {
    let mut out = [0u8; 32];
    let wb = Word::BITS as usize / 8;
    for i in 0..LIMBS {
        let le = w[i].to_le_bytes();
        out[i * wb..(i + 1) * wb].copy_from_slice(&le);
    }
    out
}

/// Parses a canonical fixed-width big-endian byte encoding into
/// little-endian words.
pub(crate) fn words_from_be_bytes(bytes: &[u8; 32]) -> Words {
    let mut w = [0; LIMBS];
    let wb = Word::BITS as usize / 8;
    for i in 0..LIMBS {
        let mut word: Word = 0;
        for j in 0..wb {
            word = (word << 8) | bytes[i * wb + j] as Word;
        }
        w[LIMBS - 1 - i] = word;
    }
    w
}

/// Parses 64 big-endian bytes into double-width little-endian words.
pub(crate) fn wide_words_from_be_bytes(bytes: &[u8; 64]) -> WideWords {
    let mut w = [0; WIDE_LIMBS];
    let wb = Word::BITS as usize / 8;
    for i in 0..WIDE_LIMBS {
        let mut word: Word = 0;
        for j in 0..wb {
            word = (word << 8) | bytes[i * wb + j] as Word;
        }
        w[WIDE_LIMBS - 1 - i] = word;
    }
    w
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adc_carries() {
        assert_eq!(adc(Word::MAX, 1, 0), (0, 1));
        assert_eq!(adc(Word::MAX, Word::MAX, 1), (Word::MAX, 1));
        assert_eq!(adc(1, 2, 0), (3, 0));
    }

    #[test]
    fn sbb_borrows() {
        let (r, borrow) = sbb(0, 1, 0);
        assert_eq!(r, Word::MAX);
        assert_eq!(borrow, Word::MAX);

        let (r, borrow) = sbb(5, 2, Word::MAX);
        assert_eq!(r, 2);
        assert_eq!(borrow, 0);
    }

    #[test]
    fn mac_full_width() {
        // (2^w - 1)^2 + (2^w - 1) + (2^w - 1) = 2^(2w) - 1
        let (lo, hi) = mac(Word::MAX, Word::MAX, Word::MAX, Word::MAX);
        assert_eq!(lo, Word::MAX);
        assert_eq!(hi, Word::MAX);
    }

    #[test]
    fn square_matches_mul() {
        let a: Words = core::array::from_fn(|i| (0x1234_5678u64 as Word).wrapping_mul(i as Word + 1));
        assert_eq!(square_wide(&a), mul_wide(&a, &a));

        let ones: Words = [Word::MAX; LIMBS];
        assert_eq!(square_wide(&ones), mul_wide(&ones, &ones));
    }

    #[test]
    fn byte_round_trip() {
        let mut bytes = [0u8; 32];
        for (i, b) in bytes.iter_mut().enumerate() {
            *b = i as u8;
        }
        let w = words_from_be_bytes(&bytes);
        assert_eq!(words_to_be_bytes(&w), bytes);
    }

    #[test]
    fn u32_limb_accessors() {
        let mut w: Words = [0; LIMBS];
        for i in 0..8 {
            set_u32(&mut w, i, 0x0101_0101 * (i as u32 + 1));
        }
        for i in 0..8 {
            assert_eq!(get_u32(&w, i), 0x0101_0101 * (i as u32 + 1));
        }
    }
}
