//! Ranked implicit-conversion costs.

use std::iter::Sum;
use std::ops::Add;

/// How expensive an implicit conversion is.
///
/// Variants are declared in rank order, so the derived `Ord` is the
/// overload-resolution order: `Free < Normal(_) < Narrowing(_) < Impossible`.
/// Within `Normal` and `Narrowing` the smaller magnitude wins.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CoercionCost {
    Free,
    /// Widening by this many priority steps, or the n-th entry of a
    /// generic's coercible list.
    Normal(u32),
    /// Lossy conversion down this many priority steps.
    Narrowing(u32),
    Impossible,
}

impl CoercionCost {
    pub fn is_possible(self, allow_narrowing: bool) -> bool {
        match self {
            CoercionCost::Free | CoercionCost::Normal(_) => true,
            CoercionCost::Narrowing(_) => allow_narrowing,
            CoercionCost::Impossible => false,
        }
    }
}

/// Accumulates per-argument costs when ranking a call.
///
/// Any impossible argument makes the call impossible, and a single narrowing
/// argument makes the whole call narrowing.
impl Add for CoercionCost {
    type Output = CoercionCost;

    fn add(self, rhs: CoercionCost) -> CoercionCost {
        use CoercionCost::{Free, Impossible, Narrowing, Normal};
        match (self, rhs) {
            (Impossible, _) | (_, Impossible) => Impossible,
            (Narrowing(a), Narrowing(b)) => Narrowing(a.saturating_add(b)),
            (Narrowing(a), _) | (_, Narrowing(a)) => Narrowing(a),
            (Normal(a), Normal(b)) => Normal(a.saturating_add(b)),
            (Normal(a), Free) | (Free, Normal(a)) => Normal(a),
            (Free, Free) => Free,
        }
    }
}

impl Sum for CoercionCost {
    fn sum<I: Iterator<Item = CoercionCost>>(iter: I) -> CoercionCost {
        iter.fold(CoercionCost::Free, Add::add)
    }
}
