// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Hold'em hand evaluator.
//!
//! Poker hand evaluator for 5, 6 and 7 cards hands. To use the evaluator create
//! a hand and use [HandValue] to evaluate the hand and get its rank:
//!
//! ```
//! # use holdem_eval::*;
//! let cards = ["AH", "KH", "QH", "JH", "TH", "2C", "3C"]
//!     .iter()
//!     .map(|c| c.parse::<Card>().unwrap())
//!     .collect::<Vec<_>>();
//! let royal = HandValue::eval(&cards);
//! assert_eq!(royal.rank(), HandRank::RoyalFlush);
//!
//! // 2C, 3C, .., 6C is a straight flush.
//! let deck = Deck::default().into_iter().take(10).collect::<Vec<_>>();
//! let v1 = HandValue::eval(&deck[0..5]);
//! let v2 = HandValue::eval(&deck[5..]);
//! assert_eq!(v1.rank(), HandRank::StraightFlush);
//! assert!(v2 > v1);
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
pub mod eval;
pub use eval::{HandRank, HandValue, compare_hands};

// Reexport cards types.
pub use holdem_cards::{Card, Deck, Rank, Suit};
