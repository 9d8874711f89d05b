//! PNR generation and issuance.
//!
//! A PNR is six characters drawn uniformly from an alphabet without the
//! ambiguous glyphs 0/O and 1/I. Uniqueness is enforced by a partial
//! unique index over not-Expired bookings; issuance retries a handful of
//! times before giving up.

use rand::Rng;

use skyfare_db::queries::bookings;
use skyfare_types::validation::{PNR_ALPHABET, PNR_LEN};
use skyfare_types::{AppError, Result};

/// Collision retries before surfacing an internal error. With a 32-char
/// alphabet the namespace holds ~10^9 codes, so exhausting this is a
/// sign of something else being wrong.
pub const MAX_PNR_ATTEMPTS: u32 = 8;

pub fn generate_pnr<R: Rng>(rng: &mut R) -> String {
    (0..PNR_LEN)
        .map(|_| PNR_ALPHABET[rng.gen_range(0..PNR_ALPHABET.len())] as char)
        .collect()
}

/// Allocate a PNR unique among not-Expired bookings, inside the
/// confirmation transaction.
pub async fn issue(tx: &mut sqlx::Transaction<'_, sqlx::Postgres>) -> Result<String> {
    for _ in 0..MAX_PNR_ATTEMPTS {
        // ThreadRng is not Send, so it must not live across the await.
        let pnr = generate_pnr(&mut rand::thread_rng());
        let taken = bookings::pnr_exists(tx, &pnr)
            .await
            .map_err(|e| AppError::Internal(e.to_string()))?;
        if !taken {
            return Ok(pnr);
        }
    }

    Err(AppError::Internal(format!(
        "Could not allocate a unique PNR after {} attempts",
        MAX_PNR_ATTEMPTS
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use skyfare_types::validate_pnr_format;

    #[test]
    fn test_generated_pnr_shape() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let pnr = generate_pnr(&mut rng);
            assert_eq!(pnr.len(), PNR_LEN);
            assert!(validate_pnr_format(&pnr).is_ok(), "bad pnr {}", pnr);
        }
    }

    #[test]
    fn test_no_ambiguous_characters() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..1000 {
            let pnr = generate_pnr(&mut rng);
            assert!(!pnr.contains(['0', 'O', '1', 'I']));
        }
    }

    #[test]
    fn test_seeded_generation_is_deterministic() {
        let a = generate_pnr(&mut StdRng::seed_from_u64(99));
        let b = generate_pnr(&mut StdRng::seed_from_u64(99));
        assert_eq!(a, b);
    }
}
