//! Validation helpers for IATA codes and traveller-facing identifiers.
//!
//! These centralize format checks that requests share across routes.

/// Characters a PNR may contain. Visually ambiguous glyphs (0/O, 1/I)
/// are excluded so agents can read a PNR over the phone.
pub const PNR_ALPHABET: &[u8] = b"23456789ABCDEFGHJKLMNPQRSTUVWXYZ";

/// Length of a PNR.
pub const PNR_LEN: usize = 6;

/// Validates a 3-letter IATA airport code (uppercase).
pub fn validate_airport_code(code: &str) -> Result<(), String> {
    if code.len() == 3 && code.bytes().all(|b| b.is_ascii_uppercase()) {
        Ok(())
    } else {
        Err(format!(
            "Invalid airport code '{}'. Expected 3 uppercase letters",
            code
        ))
    }
}

/// Validates a 2-character IATA airline code (uppercase alphanumeric).
pub fn validate_airline_code(code: &str) -> Result<(), String> {
    if code.len() == 2
        && code
            .bytes()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
    {
        Ok(())
    } else {
        Err(format!(
            "Invalid airline code '{}'. Expected 2 uppercase alphanumeric characters",
            code
        ))
    }
}

/// Validates the shape of a PNR without consulting the database.
pub fn validate_pnr_format(pnr: &str) -> Result<(), String> {
    if pnr.len() == PNR_LEN && pnr.bytes().all(|b| PNR_ALPHABET.contains(&b)) {
        Ok(())
    } else {
        Err(format!("Invalid PNR '{}'", pnr))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_airport_code() {
        assert!(validate_airport_code("DEL").is_ok());
        assert!(validate_airport_code("BOM").is_ok());
        assert!(validate_airport_code("del").is_err());
        assert!(validate_airport_code("DELH").is_err());
        assert!(validate_airport_code("D1").is_err());
    }

    #[test]
    fn test_validate_airline_code() {
        assert!(validate_airline_code("6E").is_ok());
        assert!(validate_airline_code("AI").is_ok());
        assert!(validate_airline_code("ai").is_err());
        assert!(validate_airline_code("AIR").is_err());
    }

    #[test]
    fn test_validate_pnr_format() {
        assert!(validate_pnr_format("X7K2MP").is_ok());
        assert!(validate_pnr_format("ABCDE").is_err());
        // Ambiguous characters are never part of a PNR.
        assert!(validate_pnr_format("AB0CDE").is_err());
        assert!(validate_pnr_format("ABOCDI").is_err());
        assert!(validate_pnr_format("ab2cde").is_err());
    }
}
