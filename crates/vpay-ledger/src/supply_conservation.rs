//! Supply conservation invariant checker.
//!
//! Invariant enforced after every state-changing manager operation:
//! ```text
//! Σ(deposit values) == total_received - total_paid_out
//! ```
//!
//! Value only enters the ledger through received deposits and only leaves
//! through payouts. Settlement between two deposits moves value but never
//! creates or destroys it. A violation means the ledger is corrupt.

use vpay_types::{checked_add, Amount, Result, VpayError};

/// Running totals of value entering and leaving escrow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SupplyConservation {
    /// Total value received since genesis.
    total_received: Amount,
    /// Total value paid out since genesis.
    total_paid_out: Amount,
}

impl SupplyConservation {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Tracker resumed from persisted totals.
    #[must_use]
    pub fn from_totals(total_received: Amount, total_paid_out: Amount) -> Self {
        Self {
            total_received,
            total_paid_out,
        }
    }

    /// Record value entering escrow.
    ///
    /// # Errors
    /// Returns `ArithmeticOverflow` if the running total overflows.
    pub fn record_received(&mut self, amount: Amount) -> Result<()> {
        self.total_received = checked_add(self.total_received, amount)?;
        Ok(())
    }

    /// Record value leaving escrow.
    ///
    /// # Errors
    /// Returns `ArithmeticOverflow` if the running total overflows.
    pub fn record_paid_out(&mut self, amount: Amount) -> Result<()> {
        self.total_paid_out = checked_add(self.total_paid_out, amount)?;
        Ok(())
    }

    /// Expected value held in escrow: received - paid out.
    ///
    /// # Errors
    /// Returns `SupplyInvariantViolation` if more was paid out than received.
    pub fn expected_supply(&self) -> Result<Amount> {
        self.total_received
            .checked_sub(self.total_paid_out)
            .ok_or_else(|| VpayError::SupplyInvariantViolation {
                reason: format!(
                    "paid out {} exceeds received {}",
                    self.total_paid_out, self.total_received
                ),
            })
    }

    /// Verify that the sum of all deposit balances matches the expected supply.
    ///
    /// # Errors
    /// Returns [`VpayError::SupplyInvariantViolation`] if actual ≠ expected.
    pub fn verify(&self, actual_supply: Amount) -> Result<()> {
        let expected = self.expected_supply()?;
        if actual_supply != expected {
            return Err(VpayError::SupplyInvariantViolation {
                reason: format!(
                    "actual supply {actual_supply} != expected {expected} \
                     (received={}, paid_out={})",
                    self.total_received, self.total_paid_out
                ),
            });
        }
        Ok(())
    }

    #[must_use]
    pub fn total_received(&self) -> Amount {
        self.total_received
    }

    #[must_use]
    pub fn total_paid_out(&self) -> Amount {
        self.total_paid_out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_supply_is_zero() {
        let sc = SupplyConservation::new();
        assert_eq!(sc.expected_supply().unwrap(), 0);
        assert!(sc.verify(0).is_ok());
    }

    #[test]
    fn received_increases_expected() {
        let mut sc = SupplyConservation::new();
        sc.record_received(1000).unwrap();
        sc.record_received(500).unwrap();
        assert_eq!(sc.expected_supply().unwrap(), 1500);
    }

    #[test]
    fn payouts_decrease_expected() {
        let mut sc = SupplyConservation::new();
        sc.record_received(500).unwrap();
        sc.record_paid_out(200).unwrap();
        sc.record_paid_out(100).unwrap();
        assert_eq!(sc.expected_supply().unwrap(), 200);
        assert!(sc.verify(200).is_ok());
    }

    #[test]
    fn verify_fails_when_unbalanced() {
        let mut sc = SupplyConservation::new();
        sc.record_received(10).unwrap();
        let err = sc.verify(11).unwrap_err();
        assert!(matches!(err, VpayError::SupplyInvariantViolation { .. }));
        assert!(err.to_string().contains("VP_ERR_800"));
    }

    #[test]
    fn overpaid_is_violation() {
        let sc = SupplyConservation::from_totals(5, 6);
        assert!(sc.expected_supply().is_err());
    }

    #[test]
    fn received_overflow_fails() {
        let mut sc = SupplyConservation::from_totals(u128::MAX, 0);
        assert!(matches!(
            sc.record_received(1).unwrap_err(),
            VpayError::ArithmeticOverflow
        ));
        assert_eq!(sc.total_received(), u128::MAX);
    }
}
