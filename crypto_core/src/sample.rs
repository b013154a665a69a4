//! Secure random bit sampling.
//!
//! Everything is generic over `Rng + CryptoRng` so production callers pass
//! `rand::rngs::OsRng` and tests pass a seeded rng. Bytes are drawn through
//! `try_fill_bytes` so an exhausted entropy source surfaces as an error.

use rand::{CryptoRng, Rng};

/// Sample `num` uniform bits.
pub fn random_bits<R: Rng + CryptoRng>(rng: &mut R, num: usize) -> Result<Vec<bool>, rand::Error> {
    let mut bytes = vec![0u8; (num + 7) / 8];
    rng.try_fill_bytes(&mut bytes)?;
    Ok((0..num).map(|i| (bytes[i / 8] >> (i % 8)) & 1 != 0).collect())
}

/// Sample a single uniform bit.
pub fn random_bool<R: Rng + CryptoRng>(rng: &mut R) -> Result<bool, rand::Error> {
    let mut byte = [0u8; 1];
    rng.try_fill_bytes(&mut byte)?;
    Ok(byte[0] & 1 != 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_random_bits() {
        let mut rng = StdRng::seed_from_u64(7);
        let bits = random_bits(&mut rng, 1000).unwrap();
        assert_eq!(bits.len(), 1000);
        let ones = bits.iter().filter(|b| **b).count();
        assert!(ones > 400 && ones < 600, "{} ones", ones);
        assert!(random_bits(&mut rng, 0).unwrap().is_empty());
    }

    #[test]
    fn test_same_seed_same_bits() {
        let mut a = StdRng::seed_from_u64(11);
        let mut b = StdRng::seed_from_u64(11);
        assert_eq!(
            random_bits(&mut a, 128).unwrap(),
            random_bits(&mut b, 128).unwrap()
        );
    }
}
