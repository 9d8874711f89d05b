//! Seat map generation for newly created flights.
//!
//! Cabins are laid out in rows of six (A..F) from the nose back:
//! First, Business, EconomyFlex, Economy. A row never mixes classes.

use rust_decimal::Decimal;
use std::collections::BTreeMap;

use skyfare_types::enums::{CabinClass, SeatPosition};

const ROW_LETTERS: [char; 6] = ['A', 'B', 'C', 'D', 'E', 'F'];

/// Cabin order from the front of the aircraft.
const CABIN_ORDER: [CabinClass; 4] = [
    CabinClass::First,
    CabinClass::Business,
    CabinClass::EconomyFlex,
    CabinClass::Economy,
];

pub type SeatSpec = (String, CabinClass, SeatPosition, Decimal);

fn position_for(letter: char) -> SeatPosition {
    match letter {
        'A' | 'F' => SeatPosition::Window,
        'C' | 'D' => SeatPosition::Aisle,
        _ => SeatPosition::Middle,
    }
}

fn surcharge_for(position: SeatPosition) -> Decimal {
    match position {
        SeatPosition::Window => Decimal::from(150),
        SeatPosition::Aisle => Decimal::from(100),
        SeatPosition::Middle => Decimal::ZERO,
    }
}

/// Materialise seat specs from an aircraft's class distribution.
pub fn generate_seat_map(class_distribution: &BTreeMap<CabinClass, i32>) -> Vec<SeatSpec> {
    let mut seats = Vec::new();
    let mut row = 1;

    for cabin in CABIN_ORDER {
        let count = class_distribution.get(&cabin).copied().unwrap_or(0).max(0);
        for index in 0..count {
            let letter = ROW_LETTERS[(index % 6) as usize];
            let position = position_for(letter);
            seats.push((
                format!("{}{}", row, letter),
                cabin,
                position,
                surcharge_for(position),
            ));
            if index % 6 == 5 {
                row += 1;
            }
        }
        // Start the next cabin on a fresh row.
        if count % 6 != 0 {
            row += 1;
        }
    }

    seats
}

#[cfg(test)]
mod tests {
    use super::*;

    fn distribution(pairs: &[(CabinClass, i32)]) -> BTreeMap<CabinClass, i32> {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_counts_match_distribution() {
        let dist = distribution(&[
            (CabinClass::First, 4),
            (CabinClass::Business, 8),
            (CabinClass::Economy, 30),
        ]);
        let seats = generate_seat_map(&dist);

        assert_eq!(seats.len(), 42);
        for (cabin, expected) in &dist {
            let got = seats.iter().filter(|(_, c, _, _)| c == cabin).count();
            assert_eq!(got as i32, *expected);
        }
    }

    #[test]
    fn test_seat_numbers_unique_and_rows_unmixed() {
        let dist = distribution(&[(CabinClass::Business, 7), (CabinClass::Economy, 13)]);
        let seats = generate_seat_map(&dist);

        let mut numbers: Vec<&str> = seats.iter().map(|(n, _, _, _)| n.as_str()).collect();
        numbers.sort_unstable();
        numbers.dedup();
        assert_eq!(numbers.len(), seats.len());

        // No row carries two classes.
        let mut row_class: BTreeMap<String, CabinClass> = BTreeMap::new();
        for (number, cabin, _, _) in &seats {
            let row: String = number.chars().take_while(|c| c.is_ascii_digit()).collect();
            let entry = row_class.entry(row).or_insert(*cabin);
            assert_eq!(entry, cabin);
        }
    }

    #[test]
    fn test_positions_by_letter() {
        let dist = distribution(&[(CabinClass::Economy, 6)]);
        let seats = generate_seat_map(&dist);

        let by_number: BTreeMap<&str, SeatPosition> = seats
            .iter()
            .map(|(n, _, p, _)| (n.as_str(), *p))
            .collect();
        assert_eq!(by_number["1A"], SeatPosition::Window);
        assert_eq!(by_number["1B"], SeatPosition::Middle);
        assert_eq!(by_number["1C"], SeatPosition::Aisle);
        assert_eq!(by_number["1D"], SeatPosition::Aisle);
        assert_eq!(by_number["1F"], SeatPosition::Window);
    }

    #[test]
    fn test_surcharges_nonnegative() {
        let dist = distribution(&[(CabinClass::Economy, 12), (CabinClass::First, 2)]);
        for (_, _, _, surcharge) in generate_seat_map(&dist) {
            assert!(surcharge >= Decimal::ZERO);
        }
    }
}
