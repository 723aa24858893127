//! Stable fingerprints for values and rows.
//!
//! Distinct counts and duplicate-row detection compare fingerprints instead of
//! values so that floats (which are not `Eq`/`Hash`) can take part.

use blake3::Hasher;

use crate::types::{scalar_type_order, Scalar, Table};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fingerprint(pub [u8; 32]);

impl Fingerprint {
    pub fn to_hex(&self) -> String {
        // blake3 hex(32b) is 64 hex chars
        let mut s = String::with_capacity(64);
        for b in &self.0 {
            use std::fmt::Write as _;
            let _ = write!(&mut s, "{:02x}", b);
        }
        s
    }
}

impl std::fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

pub fn fingerprint_scalar(scalar: &Scalar) -> Fingerprint {
    let mut h = Hasher::new();
    hash_scalar(scalar, &mut h);
    Fingerprint(h.finalize().into())
}

/// Fingerprint of every value in row `idx`, in column order. Two rows share a
/// fingerprint iff they hold identical values, including where they are missing.
pub fn fingerprint_row(table: &Table, idx: usize) -> Fingerprint {
    let mut h = Hasher::new();
    for col in &table.columns {
        match col.values.get(idx) {
            Some(v) => hash_scalar(v, &mut h),
            None => hash_scalar(&Scalar::Null, &mut h),
        }
    }
    Fingerprint(h.finalize().into())
}

/// Hash a scalar value into a hasher.
pub fn hash_scalar(scalar: &Scalar, hasher: &mut Hasher) {
    use Scalar::*;

    // Write type discriminant first
    hasher.update(&[scalar_type_order(scalar)]);

    match scalar {
        Null => {}
        Bool(b) => {
            hasher.update(&[*b as u8]);
        }
        I64(i) => {
            hasher.update(&i.to_le_bytes());
        }
        F64(f) => {
            hasher.update(&canonical_f64_bits(*f).to_le_bytes());
        }
        Str(s) => {
            // length prefix keeps ("ab","c") apart from ("a","bc")
            hasher.update(&(s.len() as u64).to_le_bytes());
            hasher.update(s.as_bytes());
        }
        DateTime(dt) => {
            hasher.update(&dt.and_utc().timestamp().to_le_bytes());
            hasher.update(&dt.and_utc().timestamp_subsec_nanos().to_le_bytes());
        }
    }
}

/// `-0.0` folds onto `0.0` and every NaN onto one bit pattern.
fn canonical_f64_bits(f: f64) -> u64 {
    if f.is_nan() {
        f64::NAN.to_bits()
    } else if f == 0.0 {
        0.0f64.to_bits()
    } else {
        f.to_bits()
    }
}
