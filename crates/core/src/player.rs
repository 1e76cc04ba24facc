// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Table player types.
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{
    error::GameError,
    poker::{Card, Chips, PlayerCards, PlayerId},
};

/// An action a player can submit to the table.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Give up the hand.
    Fold,
    /// Pass when there is no bet to match.
    Check,
    /// Match the current bet.
    Call,
    /// Open the betting, the amount is the bet.
    Bet,
    /// Raise the current bet, the amount is the increment over the current bet.
    Raise,
    /// Commit all the remaining chips.
    AllIn,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Action::Fold => "Fold",
            Action::Check => "Check",
            Action::Call => "Call",
            Action::Bet => "Bet",
            Action::Raise => "Raise",
            Action::AllIn => "All-In",
        };

        write!(f, "{s}")
    }
}

/// The last action of a player in the current betting round.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerAction {
    /// No action.
    #[default]
    None,
    /// Player paid the small blind.
    SmallBlind,
    /// Player paid the big blind.
    BigBlind,
    /// Player acted.
    Acted(Action),
}

impl PlayerAction {
    /// Checks if the player made a voluntary action in this round.
    pub fn has_acted(&self) -> bool {
        matches!(self, PlayerAction::Acted(_))
    }
}

/// The player status in a hand.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerStatus {
    /// The player is in the hand and can act.
    #[default]
    Active,
    /// The player folded this hand.
    Folded,
    /// The player has no chips behind and waits for the showdown.
    AllIn,
    /// The player has no chips and doesn't take part in hands.
    SittingOut,
}

/// A table player state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    player_id: PlayerId,
    name: String,
    stack: Chips,
    bet: Chips,
    hole_cards: Vec<Card>,
    status: PlayerStatus,
    seat: usize,
    action: PlayerAction,
}

impl Player {
    /// Creates a new player.
    pub fn new(player_id: PlayerId, name: impl Into<String>, stack: Chips) -> Self {
        Self {
            player_id,
            name: name.into(),
            stack,
            bet: Chips::ZERO,
            hole_cards: Vec::with_capacity(2),
            status: if stack > Chips::ZERO {
                PlayerStatus::Active
            } else {
                PlayerStatus::SittingOut
            },
            seat: 0,
            action: PlayerAction::None,
        }
    }

    /// The player id.
    pub fn player_id(&self) -> &PlayerId {
        &self.player_id
    }

    /// The player name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The chips behind.
    pub fn stack(&self) -> Chips {
        self.stack
    }

    /// The chips committed in the current betting round.
    pub fn bet(&self) -> Chips {
        self.bet
    }

    /// The player hole cards, empty or two cards once dealt.
    pub fn hole_cards(&self) -> &[Card] {
        &self.hole_cards
    }

    /// The player status.
    pub fn status(&self) -> PlayerStatus {
        self.status
    }

    /// The player seat index.
    pub fn seat(&self) -> usize {
        self.seat
    }

    /// The last player action in this round.
    pub fn action(&self) -> PlayerAction {
        self.action
    }

    /// The player can still act in this hand.
    pub fn is_active(&self) -> bool {
        self.status == PlayerStatus::Active
    }

    /// The player is still in the hand, all-in players remain in the pot but
    /// take no further actions.
    pub fn can_act(&self) -> bool {
        matches!(self.status, PlayerStatus::Active | PlayerStatus::AllIn)
    }

    /// The hole cards as a pair.
    pub fn cards(&self) -> PlayerCards {
        match self.hole_cards.as_slice() {
            [c1, c2] => PlayerCards::Cards(*c1, *c2),
            _ => PlayerCards::None,
        }
    }

    /// Moves `amount` chips from the stack to the bet.
    ///
    /// The bet accumulates across calls in the same round, the player goes
    /// all-in when the stack reaches zero.
    pub fn place_bet(&mut self, amount: Chips) -> Result<(), GameError> {
        if amount > self.stack {
            return Err(GameError::InsufficientStack {
                needed: amount,
                available: self.stack,
            });
        }

        self.stack -= amount;
        self.bet += amount;

        if self.stack == Chips::ZERO {
            self.status = PlayerStatus::AllIn;
        }

        Ok(())
    }

    /// Sets this player in fold state.
    pub fn fold(&mut self) {
        self.status = PlayerStatus::Folded;
        self.action = PlayerAction::Acted(Action::Fold);
    }

    /// Adds won chips to the stack.
    pub fn collect(&mut self, chips: Chips) {
        self.stack += chips;
    }

    /// Reset state for a new hand.
    pub fn reset_for_new_hand(&mut self) {
        self.hole_cards.clear();
        self.bet = Chips::ZERO;
        self.action = PlayerAction::None;
        self.status = if self.stack > Chips::ZERO {
            PlayerStatus::Active
        } else {
            PlayerStatus::SittingOut
        };
    }

    /// Posts a forced bet, a short stack goes all-in for what it has.
    ///
    /// Returns the chips posted.
    pub(crate) fn post_blind(&mut self, blind: Chips, action: PlayerAction) -> Chips {
        let amount = blind.min(self.stack);
        self.stack -= amount;
        self.bet += amount;

        if self.stack == Chips::ZERO {
            self.status = PlayerStatus::AllIn;
        }

        self.action = action;
        amount
    }

    pub(crate) fn deal(&mut self, card: Card) {
        self.hole_cards.push(card);
    }

    pub(crate) fn set_seat(&mut self, seat: usize) {
        self.seat = seat;
    }

    pub(crate) fn set_action(&mut self, action: Action) {
        self.action = PlayerAction::Acted(action);
    }

    /// Clears the bet and the last action when a new street starts.
    pub(crate) fn start_round(&mut self) {
        self.bet = Chips::ZERO;
        self.action = PlayerAction::None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::poker::{Rank, Suit};

    fn new_player(chips: u32) -> Player {
        Player::new(PlayerId::new("p1"), "Alice", Chips::new(chips))
    }

    #[test]
    fn place_bet_accumulates() {
        let mut p = new_player(100);
        p.place_bet(Chips::new(20)).unwrap();
        p.place_bet(Chips::new(30)).unwrap();
        assert_eq!(p.bet(), Chips::new(50));
        assert_eq!(p.stack(), Chips::new(50));
        assert!(p.is_active());
    }

    #[test]
    fn place_bet_insufficient_stack() {
        let mut p = new_player(100);
        let err = p.place_bet(Chips::new(101)).unwrap_err();
        assert_eq!(
            err,
            GameError::InsufficientStack {
                needed: Chips::new(101),
                available: Chips::new(100),
            }
        );
        assert_eq!(p.stack(), Chips::new(100));
        assert_eq!(p.bet(), Chips::ZERO);
    }

    #[test]
    fn place_whole_stack_goes_all_in() {
        let mut p = new_player(100);
        p.place_bet(Chips::new(100)).unwrap();
        assert_eq!(p.status(), PlayerStatus::AllIn);
        assert_eq!(p.stack(), Chips::ZERO);
        assert!(!p.is_active());
        assert!(p.can_act());
    }

    #[test]
    fn fold_is_terminal() {
        let mut p = new_player(100);
        p.fold();
        assert_eq!(p.status(), PlayerStatus::Folded);
        assert!(!p.is_active());
        assert!(!p.can_act());
    }

    #[test]
    fn reset_for_new_hand() {
        let mut p = new_player(100);
        p.deal(Card::new(Rank::Ace, Suit::Spades));
        p.deal(Card::new(Rank::King, Suit::Spades));
        p.place_bet(Chips::new(40)).unwrap();
        p.fold();

        p.reset_for_new_hand();
        assert!(p.hole_cards().is_empty());
        assert_eq!(p.bet(), Chips::ZERO);
        assert_eq!(p.stack(), Chips::new(60));
        assert_eq!(p.status(), PlayerStatus::Active);

        p.place_bet(Chips::new(60)).unwrap();
        p.reset_for_new_hand();
        assert_eq!(p.status(), PlayerStatus::SittingOut);
        assert!(!p.can_act());
    }

    #[test]
    fn short_blind_goes_all_in() {
        let mut p = new_player(5);
        let posted = p.post_blind(Chips::new(10), PlayerAction::BigBlind);
        assert_eq!(posted, Chips::new(5));
        assert_eq!(p.status(), PlayerStatus::AllIn);
        assert_eq!(p.action(), PlayerAction::BigBlind);
        assert_eq!(p.stack(), Chips::ZERO);
        assert_eq!(p.bet(), Chips::new(5));
    }

    #[test]
    fn blind_from_deep_stack() {
        let mut p = new_player(100);
        let posted = p.post_blind(Chips::new(10), PlayerAction::SmallBlind);
        assert_eq!(posted, Chips::new(10));
        assert_eq!(p.stack(), Chips::new(90));
        assert_eq!(p.bet(), Chips::new(10));
        assert_eq!(p.status(), PlayerStatus::Active);
        assert!(!p.action().has_acted());
    }

    #[test]
    fn hole_cards_pair() {
        let mut p = new_player(5);
        assert_eq!(p.cards(), PlayerCards::None);

        let (c1, c2) = (
            Card::new(Rank::Ace, Suit::Spades),
            Card::new(Rank::Trey, Suit::Hearts),
        );
        p.deal(c1);
        assert_eq!(p.cards(), PlayerCards::None);
        p.deal(c2);
        assert_eq!(p.cards(), PlayerCards::Cards(c1, c2));
    }
}
