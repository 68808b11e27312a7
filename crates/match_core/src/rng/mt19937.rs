//! MT19937 Mersenne Twister (32-bit, period 2^19937-1).
//!
//! Reproduces the reference sequence of Matsumoto and Nishimura bit-for-bit, so a
//! seed yields the same match on every platform and in every implementation that
//! uses the canonical generator.

use rand::{Error, RngCore, SeedableRng};

const N: usize = 624;
const M: usize = 397;
const MATRIX_A: u32 = 0x9908_B0DF;
const UPPER_MASK: u32 = 0x8000_0000;
const LOWER_MASK: u32 = 0x7FFF_FFFF;

/// 2^32 as f64, used for the unit-interval and bounded mappings.
const TWO_POW_32: f64 = 4_294_967_296.0;

#[derive(Clone)]
pub struct Mt19937 {
    state: [u32; N],
    index: usize,
}

impl std::fmt::Debug for Mt19937 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mt19937").field("index", &self.index).finish_non_exhaustive()
    }
}

impl Mt19937 {
    /// Seed-initialised generator. Negative seeds are reinterpreted as their
    /// two's-complement `u32`.
    pub fn new(seed: i32) -> Self {
        let mut rng = Self { state: [0; N], index: N };
        rng.seed(seed);
        rng
    }

    /// Re-initialises the state vector from `seed`.
    pub fn seed(&mut self, seed: i32) {
        self.state[0] = seed as u32;
        for i in 1..N {
            let prev = self.state[i - 1];
            self.state[i] = 1_812_433_253u32
                .wrapping_mul(prev ^ (prev >> 30))
                .wrapping_add(i as u32);
        }
        self.index = N;
    }

    /// Next tempered 32-bit output.
    pub fn next_uint32(&mut self) -> u32 {
        if self.index >= N {
            self.twist();
        }

        let mut y = self.state[self.index];
        self.index += 1;

        y ^= y >> 11;
        y ^= (y << 7) & 0x9D2C_5680;
        y ^= (y << 15) & 0xEFC6_0000;
        y ^= y >> 18;
        y
    }

    /// Uniform integer in `[min_inclusive, max_exclusive)`.
    ///
    /// Maps one draw with `floor(draw * range / 2^32)` in 64-bit precision.
    ///
    /// # Panics
    /// When `min_inclusive >= max_exclusive`. Every call site uses fixed ranges, so
    /// this is a programming error rather than a runtime condition.
    pub fn next_int(&mut self, min_inclusive: i32, max_exclusive: i32) -> i32 {
        assert!(
            min_inclusive < max_exclusive,
            "max_exclusive ({max_exclusive}) must be greater than min_inclusive ({min_inclusive})"
        );

        let range = max_exclusive.wrapping_sub(min_inclusive) as u32;
        let scaled = ((self.next_uint32() as u64 * range as u64) >> 32) as u32;
        min_inclusive.wrapping_add(scaled as i32)
    }

    /// Uniform double in `[0, 1)`: `draw / 2^32`.
    pub fn next_double(&mut self) -> f64 {
        self.next_uint32() as f64 / TWO_POW_32
    }

    fn twist(&mut self) {
        let mt = &mut self.state;
        let mag01 = |y: u32| if y & 1 == 0 { 0 } else { MATRIX_A };

        for kk in 0..N - M {
            let y = (mt[kk] & UPPER_MASK) | (mt[kk + 1] & LOWER_MASK);
            mt[kk] = mt[kk + M] ^ (y >> 1) ^ mag01(y);
        }
        for kk in N - M..N - 1 {
            let y = (mt[kk] & UPPER_MASK) | (mt[kk + 1] & LOWER_MASK);
            mt[kk] = mt[kk + M - N] ^ (y >> 1) ^ mag01(y);
        }
        let y = (mt[N - 1] & UPPER_MASK) | (mt[0] & LOWER_MASK);
        mt[N - 1] = mt[M - 1] ^ (y >> 1) ^ mag01(y);

        self.index = 0;
    }
}

// rand interop: lets the generator drive `rand::Rng` helpers where callers want them.
// The engine itself only uses the inherent methods above, whose mapping is fixed.
impl RngCore for Mt19937 {
    fn next_u32(&mut self) -> u32 {
        self.next_uint32()
    }

    fn next_u64(&mut self) -> u64 {
        let hi = self.next_uint32() as u64;
        let lo = self.next_uint32() as u64;
        (hi << 32) | lo
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.next_uint32().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for Mt19937 {
    type Seed = [u8; 4];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(i32::from_le_bytes(seed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    const GOLDEN_5489: [u32; 10] = [
        3_499_211_612,
        581_869_302,
        3_890_346_734,
        3_586_334_585,
        545_404_204,
        4_161_255_391,
        3_922_919_429,
        949_333_985,
        2_715_962_298,
        1_323_567_403,
    ];

    #[test]
    fn test_golden_vector_seed_5489() {
        let mut mt = Mt19937::new(5489);
        for (i, &expected) in GOLDEN_5489.iter().enumerate() {
            assert_eq!(mt.next_uint32(), expected, "draw {} diverged", i);
        }
    }

    #[test]
    fn test_ten_thousandth_draw() {
        // The C++ standard pins the 10000th output of a default-seeded mt19937.
        let mut mt = Mt19937::new(5489);
        for _ in 0..9_999 {
            mt.next_uint32();
        }
        assert_eq!(mt.next_uint32(), 4_123_659_995);
    }

    #[test]
    fn test_negative_seed_uses_twos_complement() {
        let mut a = Mt19937::new(-1);
        let mut b = Mt19937::new(0);
        b.seed(u32::MAX as i32);
        for _ in 0..5 {
            assert_eq!(a.next_uint32(), b.next_uint32());
        }
        let mut c = Mt19937::new(-1);
        assert_eq!(c.next_uint32(), 419_326_371);
    }

    #[test]
    fn test_next_double_is_draw_over_two_pow_32() {
        let mut mt = Mt19937::new(5489);
        let d = mt.next_double();
        assert!((d - 3_499_211_612f64 / TWO_POW_32).abs() < 1e-15);
        assert!((0.0..1.0).contains(&d));
    }

    #[test]
    fn test_next_int_multiply_high_mapping() {
        let mut mt = Mt19937::new(5489);
        // floor(3499211612 * 10 / 2^32) = 8
        assert_eq!(mt.next_int(0, 10), 8);

        let mut mt = Mt19937::new(5489);
        assert_eq!(mt.next_int(100, 106), 104);
    }

    #[test]
    fn test_next_int_stays_in_range() {
        let mut mt = Mt19937::new(42);
        for _ in 0..10_000 {
            let v = mt.next_int(-5, 7);
            assert!((-5..7).contains(&v), "value {} out of range", v);
        }
        for _ in 0..1_000 {
            assert_eq!(mt.next_int(3, 4), 3);
        }
    }

    #[test]
    fn test_next_int_full_i32_range() {
        let mut mt = Mt19937::new(7);
        for _ in 0..1_000 {
            let _ = mt.next_int(i32::MIN, i32::MAX);
        }
    }

    #[test]
    #[should_panic(expected = "must be greater than")]
    fn test_next_int_empty_range_panics() {
        let mut mt = Mt19937::new(1);
        mt.next_int(5, 5);
    }

    #[test]
    fn test_reseed_restarts_sequence() {
        let mut mt = Mt19937::new(5489);
        for _ in 0..700 {
            mt.next_uint32();
        }
        mt.seed(5489);
        assert_eq!(mt.next_uint32(), GOLDEN_5489[0]);
    }

    #[test]
    fn test_rng_core_interop() {
        let mut mt = Mt19937::from_seed(5489i32.to_le_bytes());
        assert_eq!(RngCore::next_u32(&mut mt), GOLDEN_5489[0]);

        let mut mt = Mt19937::new(5489);
        let wide = mt.next_u64();
        assert_eq!(wide, ((GOLDEN_5489[0] as u64) << 32) | GOLDEN_5489[1] as u64);

        let mut bytes = [0u8; 6];
        let mut mt = Mt19937::new(5489);
        mt.fill_bytes(&mut bytes);
        assert_eq!(&bytes[..4], &GOLDEN_5489[0].to_le_bytes());
        assert_eq!(&bytes[4..], &GOLDEN_5489[1].to_le_bytes()[..2]);

        let mut mt = Mt19937::new(11);
        let roll: u8 = mt.gen_range(1..=6);
        assert!((1..=6).contains(&roll));
    }
}
