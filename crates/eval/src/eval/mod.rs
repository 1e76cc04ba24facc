// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Poker hand evaluator.
//!
//! The evaluator scores every 5 cards combination of the input (21 hands for a
//! 7 cards hand) and keeps the strongest. A [HandValue] is ordered by its
//! [HandRank] category and then by a tiebreak scalar built from the ranks that
//! decide between hands of the same category, so that hands can be compared
//! with the standard ordering operators or with [compare_hands].
mod rank;
mod value;

pub use rank::HandRank;
pub use value::{HandValue, compare_hands};
