//! Random-hyperplane LSH for cosine similarity.
//!
//! Hyperplanes are derived from blake3 over (seed, table, bit, dim), so two
//! indexes built with the same seed and dimensionality hash identically and
//! no RNG state has to be persisted.

use std::collections::HashMap;

/// A set of LSH tables over entity ids.
pub struct LshTables {
    dims: usize,
    bits: usize,
    /// `planes[table][bit]` is a `dims`-length hyperplane normal.
    planes: Vec<Vec<Vec<f32>>>,
    buckets: Vec<HashMap<u64, Vec<String>>>,
}

impl LshTables {
    pub fn new(dims: usize, tables: usize, bits: usize, seed: u64) -> Self {
        let bits = bits.min(64);
        let planes = (0..tables)
            .map(|t| (0..bits).map(|b| hyperplane(seed, t, b, dims)).collect())
            .collect();
        Self {
            dims,
            bits,
            planes,
            buckets: vec![HashMap::new(); tables],
        }
    }

    pub fn dims(&self) -> usize {
        self.dims
    }

    /// Bucket signature of `v` in table `table`.
    pub fn signature(&self, table: usize, v: &[f32]) -> u64 {
        let mut sig = 0u64;
        for (bit, plane) in self.planes[table].iter().enumerate().take(self.bits) {
            let side: f32 = plane.iter().zip(v).map(|(p, x)| p * x).sum();
            if side >= 0.0 {
                sig |= 1u64 << bit;
            }
        }
        sig
    }

    pub fn insert(&mut self, id: &str, v: &[f32]) {
        for table in 0..self.planes.len() {
            let sig = self.signature(table, v);
            self.buckets[table]
                .entry(sig)
                .or_default()
                .push(id.to_string());
        }
    }

    /// Every id sharing a bucket with `v` in at least one table. May contain
    /// duplicates and ids whose vectors have since changed.
    pub fn candidates<'a>(&'a self, v: &[f32]) -> impl Iterator<Item = &'a String> + 'a {
        let sigs: Vec<u64> = (0..self.planes.len())
            .map(|t| self.signature(t, v))
            .collect();
        sigs.into_iter()
            .enumerate()
            .filter_map(move |(t, sig)| self.buckets[t].get(&sig))
            .flatten()
    }
}

/// Gaussian hyperplane via Box-Muller over a blake3 stream.
fn hyperplane(seed: u64, table: usize, bit: usize, dims: usize) -> Vec<f32> {
    (0..dims)
        .map(|d| {
            let mut hasher = blake3::Hasher::new();
            hasher.update(&seed.to_le_bytes());
            hasher.update(&(table as u64).to_le_bytes());
            hasher.update(&(bit as u64).to_le_bytes());
            hasher.update(&(d as u64).to_le_bytes());
            let bytes = hasher.finalize();
            let raw = bytes.as_bytes();
            let u1 = unit_interval(&raw[0..8]);
            let u2 = unit_interval(&raw[8..16]);
            ((-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos()) as f32
        })
        .collect()
}

/// Map 8 bytes into (0, 1].
fn unit_interval(bytes: &[u8]) -> f64 {
    let mut buf = [0u8; 8];
    buf.copy_from_slice(bytes);
    let n = u64::from_le_bytes(buf) >> 11;
    (n as f64 + 1.0) / (1u64 << 53) as f64
}
