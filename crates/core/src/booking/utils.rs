use rand::{distributions::Alphanumeric, Rng};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;

/// Hard limit on passengers per booking.
pub const MAX_PASSENGERS_PER_BOOKING: usize = 9;

/// Generate a booking reference (SF-XXXXXXXX)
pub fn generate_booking_reference() -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(8)
        .map(char::from)
        .collect();

    format!("SF-{}", suffix.to_uppercase())
}

/// Whether a client-quoted unit fare is close enough to the freshly
/// computed one. Deviation is relative to the quote.
pub fn within_drift_tolerance(quoted: Decimal, current: Decimal, tolerance: f64) -> bool {
    if quoted <= Decimal::ZERO {
        return false;
    }
    let tolerance = Decimal::from_f64(tolerance).unwrap_or(Decimal::ZERO);
    (current - quoted).abs() / quoted <= tolerance
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_booking_reference_shape() {
        let reference = generate_booking_reference();
        assert!(reference.starts_with("SF-"));
        assert_eq!(reference.len(), 11);
        assert!(reference[3..]
            .bytes()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit()));
    }

    #[test]
    fn test_drift_within_tolerance() {
        let quoted = Decimal::from(5000);
        // 1% of 5000 is 50.
        assert!(within_drift_tolerance(quoted, Decimal::from(5050), 0.01));
        assert!(within_drift_tolerance(quoted, Decimal::from(4950), 0.01));
        assert!(!within_drift_tolerance(quoted, Decimal::from(5051), 0.01));
        assert!(!within_drift_tolerance(quoted, Decimal::from(8000), 0.01));
    }

    #[test]
    fn test_drift_rejects_nonpositive_quote() {
        assert!(!within_drift_tolerance(
            Decimal::ZERO,
            Decimal::from(100),
            0.01
        ));
    }
}
