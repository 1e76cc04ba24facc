// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Hold'em cards types.
//!
//! This crate define types to create cards:
//!
//! ```
//! # use holdem_cards::{Card, Rank, Suit};
//! let ah = Card::new(Rank::Ace, Suit::Hearts);
//! let kd: Card = "KD".parse().unwrap();
//! assert!(ah.rank() > kd.rank());
//! ```
//!
//! and a [Deck] type for shuffling and drawing cards, the deck takes its
//! randomness from the caller so that games can be replayed with a seed:
//!
//! ```
//! # use holdem_cards::Deck;
//! use rand::{SeedableRng, rngs::StdRng};
//!
//! let mut rng = StdRng::seed_from_u64(101);
//! let mut deck = Deck::new_and_shuffled(&mut rng);
//! let flop = deck.draw(3);
//! assert_eq!(flop.len(), 3);
//! assert_eq!(deck.count(), Deck::SIZE - 3);
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
mod deck;
pub use deck::{Card, Deck, Rank, Suit};
