//! Cash change breakdown.
//!
//! Amounts are handled as integer cents. The breakdown is greedy over a
//! descending denomination set, which is optimal for US currency.

use serde::Serialize;

use crate::error_handling::ChangeError;

/// A bill or coin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Denomination {
    pub name: &'static str,
    pub cents: u64,
}

const fn denom(name: &'static str, cents: u64) -> Denomination {
    Denomination { name, cents }
}

/// Bills and coins, twenties down to pennies.
pub const TILL_DRAWER: &[Denomination] = &[
    denom("twenties", 2000),
    denom("tens", 1000),
    denom("fives", 500),
    denom("ones", 100),
    denom("quarters", 25),
    denom("dimes", 10),
    denom("nickels", 5),
    denom("pennies", 1),
];

/// Dollar coins down to pennies.
pub const COIN_DRAWER: &[Denomination] = &[
    denom("dollars", 100),
    denom("quarters", 25),
    denom("dimes", 10),
    denom("nickels", 5),
    denom("pennies", 1),
];

/// Whole-dollar bills only; cents end up in the remainder.
pub const BILLS_ONLY: &[Denomination] = &[
    denom("twenties", 2000),
    denom("tens", 1000),
    denom("fives", 500),
    denom("ones", 100),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Breakdown {
    /// One count per denomination, in the set's order.
    pub counts: Vec<(Denomination, u64)>,
    /// Cents the set could not express.
    pub remainder_cents: u64,
}

impl Breakdown {
    fn zero(set: &[Denomination]) -> Self {
        Self {
            counts: set.iter().map(|d| (*d, 0)).collect(),
            remainder_cents: 0,
        }
    }

    /// Face value of all counted pieces.
    pub fn total_cents(&self) -> u64 {
        self.counts.iter().map(|(d, n)| d.cents * n).sum()
    }

    pub fn count_of(&self, name: &str) -> Option<u64> {
        self.counts
            .iter()
            .find(|(d, _)| d.name == name)
            .map(|(_, n)| *n)
    }
}

/// Converts a currency amount to whole cents.
pub fn to_cents(amount: f64) -> Result<i64, ChangeError> {
    if !amount.is_finite() {
        return Err(ChangeError::NotFinite(amount));
    }
    Ok((amount * 100.0).round() as i64)
}

/// Greedy breakdown of `cents` over a descending denomination set.
pub fn breakdown(cents: u64, set: &[Denomination]) -> Breakdown {
    let mut remaining = cents;
    let counts = set
        .iter()
        .map(|d| {
            let count = if d.cents == 0 { 0 } else { remaining / d.cents };
            remaining -= count * d.cents;
            (*d, count)
        })
        .collect();
    Breakdown {
        counts,
        remainder_cents: remaining,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChangeResult {
    /// Change owed in cents; negative when too little was received.
    pub change_cents: i64,
    pub insufficient: bool,
    pub breakdown: Breakdown,
}

impl ChangeResult {
    pub fn change(&self) -> f64 {
        self.change_cents as f64 / 100.0
    }
}

/// Computes the change for a cash sale.
///
/// When `received < due`, `insufficient` is set and every count is zero.
pub fn calculate_change(
    due: f64,
    received: f64,
    set: &[Denomination],
) -> Result<ChangeResult, ChangeError> {
    for amount in [due, received] {
        if !amount.is_finite() {
            return Err(ChangeError::NotFinite(amount));
        }
        if amount < 0.0 {
            return Err(ChangeError::Negative(amount));
        }
    }

    let change_cents = to_cents(received)? - to_cents(due)?;
    if change_cents < 0 {
        return Ok(ChangeResult {
            change_cents,
            insufficient: true,
            breakdown: Breakdown::zero(set),
        });
    }

    Ok(ChangeResult {
        change_cents,
        insufficient: false,
        breakdown: breakdown(change_cents as u64, set),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classic_till_example() {
        let result = calculate_change(13.67, 50.0, TILL_DRAWER).unwrap();
        assert_eq!(result.change_cents, 3633);
        let b = &result.breakdown;
        assert_eq!(b.count_of("twenties"), Some(1));
        assert_eq!(b.count_of("tens"), Some(1));
        assert_eq!(b.count_of("fives"), Some(1));
        assert_eq!(b.count_of("ones"), Some(1));
        assert_eq!(b.count_of("quarters"), Some(1));
        assert_eq!(b.count_of("dimes"), Some(0));
        assert_eq!(b.count_of("nickels"), Some(1));
        assert_eq!(b.count_of("pennies"), Some(3));
        assert_eq!(b.remainder_cents, 0);
    }

    #[test]
    fn test_float_amounts_round_to_cents() {
        // 0.1 + 0.2 style inputs must not lose a penny
        let result = calculate_change(0.7, 1.0, COIN_DRAWER).unwrap();
        assert_eq!(result.change_cents, 30);
        assert_eq!(result.breakdown.count_of("quarters"), Some(1));
        assert_eq!(result.breakdown.count_of("nickels"), Some(1));
    }

    #[test]
    fn test_bills_only_reports_remainder() {
        let b = breakdown(3633, BILLS_ONLY);
        assert_eq!(b.total_cents(), 3600);
        assert_eq!(b.remainder_cents, 33);
    }

    #[test]
    fn test_insufficient_payment_zeroes_counts() {
        let result = calculate_change(20.0, 5.0, TILL_DRAWER).unwrap();
        assert!(result.insufficient);
        assert_eq!(result.change_cents, -1500);
        assert!(result.breakdown.counts.iter().all(|(_, n)| *n == 0));
    }

    #[test]
    fn test_invalid_amounts_rejected() {
        assert!(matches!(
            calculate_change(f64::NAN, 1.0, TILL_DRAWER),
            Err(ChangeError::NotFinite(_))
        ));
        assert!(matches!(
            calculate_change(f64::INFINITY, 1.0, TILL_DRAWER),
            Err(ChangeError::NotFinite(_))
        ));
        assert_eq!(
            calculate_change(-1.0, 1.0, TILL_DRAWER),
            Err(ChangeError::Negative(-1.0))
        );
    }

    use proptest::prelude::*;

    proptest! {
        #[test]
        fn test_breakdown_sums_to_amount(cents in 0u64..10_000_000) {
            for set in [TILL_DRAWER, COIN_DRAWER] {
                let b = breakdown(cents, set);
                prop_assert_eq!(b.total_cents(), cents);
                prop_assert_eq!(b.remainder_cents, 0);
            }
        }

        #[test]
        fn test_negative_change_has_zero_counts(due in 0.01f64..10_000.0, short in 0.01f64..100.0) {
            let received = (due - short).max(0.0);
            prop_assume!(to_cents(received).unwrap() < to_cents(due).unwrap());
            let result = calculate_change(due, received, TILL_DRAWER).unwrap();
            prop_assert!(result.insufficient);
            prop_assert!(result.breakdown.counts.iter().all(|(_, n)| *n == 0));
        }

        #[test]
        fn test_remainder_below_smallest_denomination(cents in 0u64..1_000_000) {
            let b = breakdown(cents, BILLS_ONLY);
            prop_assert!(b.remainder_cents < 100);
            prop_assert_eq!(b.total_cents() + b.remainder_cents, cents);
        }
    }
}
