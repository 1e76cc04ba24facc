// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Hand value computation.
use serde::{Deserialize, Serialize};
use std::{cmp::Ordering, fmt};

use holdem_cards::Card;

use super::HandRank;

/// The value of the best 5 cards hand.
///
/// Values are ordered by category first and by tiebreak second, the tiebreak
/// packs the ranks that decide between two hands of the same category, most
/// significant first, 4 bits per rank. The five cards are carried along for
/// display and do not take part in comparisons.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HandValue {
    rank: HandRank,
    tiebreak: u32,
    hand: [Card; 5],
}

impl HandValue {
    /// Evaluates the best 5 cards hand out of 5 or more cards.
    ///
    /// Panics if there are fewer than 5 cards.
    pub fn eval(cards: &[Card]) -> Self {
        match Self::try_eval(cards) {
            Some(value) => value,
            None => panic!("A hand needs at least 5 cards, got {}", cards.len()),
        }
    }

    /// Evaluates the best 5 cards hand, returns `None` if there are fewer than 5
    /// cards.
    pub fn try_eval(cards: &[Card]) -> Option<Self> {
        let mut best: Option<HandValue> = None;
        for_each_hand(cards, |hand| {
            let value = Self::eval5(hand);
            if best.is_none_or(|b| value > b) {
                best = Some(value);
            }
        });

        best
    }

    /// The hand category.
    pub fn rank(&self) -> HandRank {
        self.rank
    }

    /// The tiebreak value used to compare hands with the same category.
    pub fn tiebreak(&self) -> u32 {
        self.tiebreak
    }

    /// The tiebreak rank values, most significant first.
    ///
    /// For example a full house sevens over deuces returns `[7, 2]`.
    pub fn tiebreak_ranks(&self) -> Vec<u8> {
        let mut ranks = Vec::with_capacity(5);
        let mut v = self.tiebreak;
        while v > 0 {
            ranks.push((v & 0xf) as u8);
            v >>= 4;
        }

        ranks.reverse();
        ranks
    }

    /// The five cards that make this hand sorted by descending rank.
    pub fn hand(&self) -> &[Card] {
        &self.hand
    }

    fn eval5(hand: &[Card; 5]) -> Self {
        let mut hand = *hand;
        hand.sort_unstable_by(|a, b| b.rank().cmp(&a.rank()));

        let ranks = hand.map(|c| c.rank().value());
        let is_flush = hand.iter().all(|c| c.suit() == hand[0].suit());

        // Groups of (count, rank), largest groups first then higher ranks.
        let mut groups: Vec<(u8, u8)> = Vec::with_capacity(5);
        for r in ranks {
            match groups.last_mut() {
                Some((count, rank)) if *rank == r => *count += 1,
                _ => groups.push((1, r)),
            }
        }
        groups.sort_unstable_by(|a, b| b.cmp(a));
        let group_ranks = groups.iter().map(|g| g.1).collect::<Vec<_>>();

        let straight_high = if groups.len() < 5 {
            None
        } else if ranks[0] - ranks[4] == 4 {
            Some(ranks[0])
        } else if ranks == [14, 5, 4, 3, 2] {
            // The wheel, the ace plays low.
            Some(5)
        } else {
            None
        };

        let first = groups[0].0;
        let second = groups.get(1).map(|g| g.0).unwrap_or_default();

        let (rank, tiebreak) = match (straight_high, is_flush) {
            (Some(14), true) => (HandRank::RoyalFlush, pack(&[14])),
            (Some(high), true) => (HandRank::StraightFlush, pack(&[high])),
            _ if first == 4 => (HandRank::FourOfAKind, pack(&group_ranks)),
            _ if first == 3 && second == 2 => (HandRank::FullHouse, pack(&group_ranks)),
            (_, true) => (HandRank::Flush, pack(&ranks)),
            (Some(high), false) => (HandRank::Straight, pack(&[high])),
            _ if first == 3 => (HandRank::ThreeOfAKind, pack(&group_ranks)),
            _ if first == 2 && second == 2 => (HandRank::TwoPair, pack(&group_ranks)),
            _ if first == 2 => (HandRank::Pair, pack(&group_ranks)),
            _ => (HandRank::HighCard, pack(&ranks)),
        };

        Self {
            rank,
            tiebreak,
            hand,
        }
    }
}

impl PartialEq for HandValue {
    fn eq(&self, other: &Self) -> bool {
        self.rank == other.rank && self.tiebreak == other.tiebreak
    }
}

impl Eq for HandValue {}

impl PartialOrd for HandValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HandValue {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.rank, self.tiebreak).cmp(&(other.rank, other.tiebreak))
    }
}

impl fmt::Display for HandValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.rank)?;
        for card in &self.hand {
            write!(f, " {card}")?;
        }

        Ok(())
    }
}

/// Compares two hands, the category dominates the tiebreak and equal values
/// split the pot.
pub fn compare_hands(a: &HandValue, b: &HandValue) -> Ordering {
    a.cmp(b)
}

fn pack(ranks: &[u8]) -> u32 {
    ranks.iter().fold(0, |acc, &r| (acc << 4) | r as u32)
}

/// Calls `f` for each 5 cards hand in `cards`.
fn for_each_hand<F>(cards: &[Card], mut f: F)
where
    F: FnMut(&[Card; 5]),
{
    let n = cards.len();
    for c1 in 0..n {
        for c2 in (c1 + 1)..n {
            for c3 in (c2 + 1)..n {
                for c4 in (c3 + 1)..n {
                    for c5 in (c4 + 1)..n {
                        f(&[cards[c1], cards[c2], cards[c3], cards[c4], cards[c5]]);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cards(s: &str) -> Vec<Card> {
        s.split_whitespace().map(|c| c.parse().unwrap()).collect()
    }

    fn eval(s: &str) -> HandValue {
        HandValue::eval(&cards(s))
    }

    #[test]
    fn royal_flush() {
        let v = eval("AH KH QH JH TH 2C 3C");
        assert_eq!(v.rank(), HandRank::RoyalFlush);
        assert_eq!(v.hand(), cards("AH KH QH JH TH").as_slice());
    }

    #[test]
    fn full_house_with_board_pair() {
        let v = eval("7H 7D 7C 2S 2H 9C 4D");
        assert_eq!(v.rank(), HandRank::FullHouse);
        assert_eq!(v.tiebreak_ranks(), vec![7, 2]);
    }

    #[test]
    fn high_card_kickers() {
        let v = eval("2H 7D 9C JC KS 3D 4H");
        assert_eq!(v.rank(), HandRank::HighCard);
        assert_eq!(v.tiebreak_ranks(), vec![13, 11, 9, 7, 4]);
    }

    #[test]
    fn categories() {
        let tests = [
            ("9S 8S 7S 6S 5S 2D 2C", HandRank::StraightFlush, vec![9]),
            ("5D 4D 3D 2D AD KC KH", HandRank::StraightFlush, vec![5]),
            ("QC QD QH QS 3C 3D 9H", HandRank::FourOfAKind, vec![12, 9]),
            ("KC KD KH 4S 4C 4D 2H", HandRank::FullHouse, vec![13, 4]),
            ("AC 9C 7C 4C 2C KD KH", HandRank::Flush, vec![14, 9, 7, 4, 2]),
            ("TC 9D 8H 7S 6C 2D 2H", HandRank::Straight, vec![10]),
            ("AC 2D 3H 4S 5C KD 9H", HandRank::Straight, vec![5]),
            ("8C 8D 8H KS 3C 2D 5H", HandRank::ThreeOfAKind, vec![8, 13, 5]),
            ("JC JD 4H 4S AC 2D 2H", HandRank::TwoPair, vec![11, 4, 14]),
            ("6C 6D AH TS 3C 2D 9H", HandRank::Pair, vec![6, 14, 10, 9]),
        ];

        for (hand, rank, tiebreak) in tests {
            let v = eval(hand);
            assert_eq!(v.rank(), rank, "{hand}");
            assert_eq!(v.tiebreak_ranks(), tiebreak, "{hand}");
        }
    }

    #[test]
    fn category_dominates_tiebreak() {
        let quads = eval("2C 2D 2H 2S 3C");
        let flush = eval("AH KH QH JH 9H");
        assert!(flush.tiebreak() > quads.tiebreak());
        assert_eq!(compare_hands(&quads, &flush), Ordering::Greater);
        assert_eq!(compare_hands(&flush, &quads), Ordering::Less);
    }

    #[test]
    fn same_category_tiebreak() {
        let kings = eval("KC KD 9H 7S 2C");
        let kings_better_kicker = eval("KH KS TH 7D 2D");
        assert_eq!(
            compare_hands(&kings_better_kicker, &kings),
            Ordering::Greater
        );

        let wheel = eval("AC 2D 3H 4S 5C");
        let six_high = eval("2C 3D 4H 5S 6C");
        assert!(six_high > wheel);

        let steel_wheel = eval("AH 2H 3H 4H 5H");
        let six_high_sf = eval("2S 3S 4S 5S 6S");
        assert!(six_high_sf > steel_wheel);
    }

    #[test]
    fn split_pot_equal() {
        // Board plays for both hands.
        let board = "AC KD QH JS TC";
        let v1 = eval(&format!("{board} 2C 3D"));
        let v2 = eval(&format!("{board} 4H 5S"));
        assert_eq!(compare_hands(&v1, &v2), Ordering::Equal);
        assert_eq!(v1, v2);
    }

    #[test]
    fn best_of_six() {
        let v = eval("AC AD KH KS 2C KD");
        assert_eq!(v.rank(), HandRank::FullHouse);
        assert_eq!(v.tiebreak_ranks(), vec![13, 14]);
        assert_eq!(v.hand().len(), 5);
    }

    #[test]
    fn too_few_cards() {
        assert!(HandValue::try_eval(&cards("AC AD KH KS")).is_none());
    }

    #[test]
    #[should_panic]
    fn eval_too_few_cards_panics() {
        HandValue::eval(&cards("AC AD"));
    }

    #[test]
    fn ranking_total_order() {
        // One hand per category from the weakest to the strongest.
        let hands = [
            "2C 4D 6H 8S TC",
            "2C 2D 6H 8S TC",
            "2C 2D 6H 6S TC",
            "2C 2D 2H 8S TC",
            "2C 3D 4H 5S 6C",
            "2C 4C 6C 8C TC",
            "2C 2D 2H 8S 8C",
            "2C 2D 2H 2S TC",
            "2C 3C 4C 5C 6C",
            "TD JD QD KD AD",
        ];

        let values = hands.iter().map(|h| eval(h)).collect::<Vec<_>>();
        for (value, rank) in values.iter().zip(HandRank::ranks()) {
            assert_eq!(value.rank(), rank);
        }

        assert!(values.windows(2).all(|w| w[0] < w[1]));
    }
}
