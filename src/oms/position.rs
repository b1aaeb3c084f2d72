//! Net position with volume-weighted average price

use crate::{Money, Quantity};
use serde::{Deserialize, Serialize};

/// Net signed quantity held in one product and the average price of the
/// last fill that moved it.
///
/// Invariant: a flat position (net zero) always carries a zero average
/// price. Only the execution engine mutates a position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    quantity: Quantity,
    average_price: Money,
}

impl Position {
    /// The untouched (0, 0) position
    pub const FLAT: Position = Position {
        quantity: 0,
        average_price: Money::ZERO,
    };

    pub fn quantity(&self) -> Quantity {
        self.quantity
    }

    pub fn average_price(&self) -> Money {
        self.average_price
    }

    /// True only for the exact (0, 0) pair
    pub fn is_flat(&self) -> bool {
        *self == Self::FLAT
    }

    /// Advance the net quantity and record the price of the fill that did it
    pub(crate) fn apply(&mut self, delta: Quantity, fill_price: Money) {
        self.quantity = self.quantity.saturating_add(delta);
        self.average_price = if self.quantity == 0 {
            Money::ZERO
        } else {
            fill_price
        };
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.quantity, self.average_price)
    }
}
