//! Named, independently seeded random streams derived from one master seed.
//!
//! A stream's seed depends only on its name and the master seed, so the sequence a
//! decision sees never changes when another decision draws more, draws less, or is
//! requested first.

use std::collections::HashMap;

use super::mt19937::Mt19937;

const FNV_OFFSET_BASIS: u32 = 2_166_136_261;
const FNV_PRIME: u32 = 16_777_619;

/// Golden-ratio constant mixed into every derived seed.
const DERIVATION_SALT: u32 = 0x9E37_79B9;

/// Substituted when a derivation lands on zero.
const ZERO_SEED_FALLBACK: u32 = 0x6D2B_79F5;

/// 32-bit FNV-1a over the UTF-8 bytes of `name`.
pub fn fnv1a(name: &str) -> u32 {
    name.bytes()
        .fold(FNV_OFFSET_BASIS, |hash, b| (hash ^ b as u32).wrapping_mul(FNV_PRIME))
}

/// Seed for stream `name` under `master_seed`: `fnv1a(name) ^ master ^ salt`, never zero.
pub fn derive_seed(name: &str, master_seed: i32) -> i32 {
    let derived = fnv1a(name) ^ master_seed as u32 ^ DERIVATION_SALT;
    if derived == 0 {
        ZERO_SEED_FALLBACK as i32
    } else {
        derived as i32
    }
}

/// One named generator. Owned by a [`StreamRegistry`]; never reseeded after creation.
#[derive(Debug, Clone)]
pub struct RngStream {
    name: String,
    rng: Mt19937,
}

impl RngStream {
    pub fn new(name: impl Into<String>, master_seed: i32) -> Self {
        let name = name.into();
        let rng = Mt19937::new(derive_seed(&name, master_seed));
        Self { name, rng }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn next_uint32(&mut self) -> u32 {
        self.rng.next_uint32()
    }

    /// See [`Mt19937::next_int`].
    #[inline]
    pub fn next_int(&mut self, min_inclusive: i32, max_exclusive: i32) -> i32 {
        self.rng.next_int(min_inclusive, max_exclusive)
    }

    #[inline]
    pub fn next_double(&mut self) -> f64 {
        self.rng.next_double()
    }

    /// `true` with probability `p` (one draw). `p <= 0` never fires, `p >= 1` always does.
    #[inline]
    pub fn chance(&mut self, p: f64) -> bool {
        self.next_double() < p
    }
}

/// Per-match table of named streams, created lazily on first request.
#[derive(Debug, Clone)]
pub struct StreamRegistry {
    master_seed: i32,
    streams: HashMap<String, RngStream>,
}

impl StreamRegistry {
    pub fn new(master_seed: i32) -> Self {
        Self { master_seed, streams: HashMap::new() }
    }

    /// The live stream for `name`; the first call creates it, later calls return the same
    /// generator with its position preserved.
    pub fn get(&mut self, name: &str) -> &mut RngStream {
        let master = self.master_seed;
        self.streams
            .entry(name.to_owned())
            .or_insert_with(|| RngStream::new(name, master))
    }

    /// Names of the streams created so far, sorted.
    pub fn stream_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.streams.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Consumes the registry and hands out a single stream, creating it if needed.
    pub fn into_stream(mut self, name: &str) -> RngStream {
        let master = self.master_seed;
        self.streams
            .remove(name)
            .unwrap_or_else(|| RngStream::new(name, master))
    }
}
