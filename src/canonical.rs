//! Canonical serialization for deterministic fingerprints.
//!
//! Catalog and settings fingerprints are computed over canonical JSON.
//!
//! ## Determinism Guarantees
//!
//! - Stable field order: Struct fields serialize in declaration order
//! - Stable collection order: catalog data uses BTreeMap/BTreeSet only
//! - Floats in hashed data are quantized first (see [`quantize`])

use serde::Serialize;
use xxhash_rust::xxh64::xxh64;

/// Quantization factor applied to floats before hashing.
const FLOAT_QUANTIZATION_FACTOR: f64 = 1.0e9;

/// Serialize a value to canonical JSON bytes.
pub fn to_canonical_bytes<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, serde_json::Error> {
    serde_json::to_vec(value)
}

/// Compute the canonical hash of a serializable value.
pub fn canonical_hash<T: Serialize + ?Sized>(value: &T) -> Result<u64, serde_json::Error> {
    let bytes = to_canonical_bytes(value)?;
    Ok(xxh64(&bytes, 0))
}

/// Compute the canonical hash and return it as a 16-digit hex string.
pub fn canonical_hash_hex<T: Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
    Ok(format!("{:016x}", canonical_hash(value)?))
}

/// Quantize a float to an integer so hashes do not depend on float formatting.
pub fn quantize(value: f64) -> i64 {
    (value * FLOAT_QUANTIZATION_FACTOR).round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Sample {
        name: String,
        value: i32,
    }

    #[test]
    fn test_determinism() {
        let s = Sample {
            name: "Girder".to_string(),
            value: 42,
        };
        assert_eq!(canonical_hash(&s).unwrap(), canonical_hash(&s).unwrap());
        assert_eq!(canonical_hash_hex(&s).unwrap().len(), 16);
    }

    #[test]
    fn test_quantize_absorbs_float_noise() {
        assert_eq!(quantize(1.0e-7), quantize(1.0e-7 + 1.0e-19));
        assert_eq!(quantize(0.5), 500_000_000);
    }
}
