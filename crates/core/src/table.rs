// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Table state types.
//!
//! The [Table] owns the deck and the players and is the only type that mutates
//! them during a hand. A hand goes through the [Phase] sequence once, the
//! table deals the streets as betting rounds complete and pays the pot when
//! the hand ends at the showdown or when a single player is left.
use ahash::AHashSet;
use log::{debug, error, info, warn};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{
    error::GameError,
    player::{Action, Player, PlayerAction},
    poker::{Card, Chips, Deck, HandRank, HandValue, PlayerCards, PlayerId},
    view::{ActionRequest, PlayerView, TableView},
};

/// The hand phase.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Blinds posted and hole cards dealt.
    PreFlop,
    /// Three board cards dealt.
    Flop,
    /// Fourth board card dealt.
    Turn,
    /// Fifth board card dealt.
    River,
    /// Hands compared and pot paid.
    Showdown,
}

impl Phase {
    /// The phase that follows this one, `None` after the showdown.
    pub fn next(&self) -> Option<Phase> {
        match self {
            Phase::PreFlop => Some(Phase::Flop),
            Phase::Flop => Some(Phase::Turn),
            Phase::Turn => Some(Phase::River),
            Phase::River => Some(Phase::Showdown),
            Phase::Showdown => None,
        }
    }

    /// The number of board cards dealt when entering this phase.
    fn board_cards(&self) -> usize {
        match self {
            Phase::Flop => 3,
            Phase::Turn | Phase::River => 1,
            Phase::PreFlop | Phase::Showdown => 0,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Phase::PreFlop => "Pre-Flop",
            Phase::Flop => "Flop",
            Phase::Turn => "Turn",
            Phase::River => "River",
            Phase::Showdown => "Showdown",
        };

        write!(f, "{s}")
    }
}

/// The chips a player won in a hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandPayoff {
    /// The winner id.
    pub player_id: PlayerId,
    /// The winner seat.
    pub seat: usize,
    /// The chips won.
    pub chips: Chips,
    /// The winning hand category, `None` if everyone else folded.
    pub rank: Option<HandRank>,
    /// The winning five cards, empty if everyone else folded.
    pub cards: Vec<Card>,
}

/// A poker table.
///
/// The whole state is serializable so that a game can be persisted and
/// resumed between any two actions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    players: Vec<Player>,
    deck: Deck,
    board: Vec<Card>,
    phase: Phase,
    pot: Chips,
    current_bet: Chips,
    dealer_seat: usize,
    acting_seat: usize,
    last_aggressor: Option<usize>,
    min_raise: Chips,
    small_blind: Chips,
    big_blind: Chips,
    hand_number: u64,
    payoffs: Vec<HandPayoff>,
}

impl Table {
    /// The maximum number of seats.
    pub const MAX_SEATS: usize = 10;

    /// Creates a table with the given players in seat order.
    ///
    /// The table waits for [Table::start_new_hand] to play the first hand.
    pub fn new(
        mut players: Vec<Player>,
        small_blind: Chips,
        big_blind: Chips,
    ) -> Result<Self, GameError> {
        if players.len() < 2 {
            return Err(GameError::InvalidSetup("a table needs at least 2 players"));
        }

        if players.len() > Self::MAX_SEATS {
            return Err(GameError::InvalidSetup("too many players"));
        }

        if big_blind == Chips::ZERO || small_blind > big_blind {
            return Err(GameError::InvalidSetup("invalid blinds"));
        }

        let mut ids = AHashSet::with_capacity(players.len());
        if !players.iter().all(|p| ids.insert(p.player_id().clone())) {
            return Err(GameError::InvalidSetup("duplicate player id"));
        }

        for (seat, player) in players.iter_mut().enumerate() {
            player.set_seat(seat);
        }

        // The first hand moves the button to the first seat with chips.
        let dealer_seat = players.len() - 1;

        Ok(Self {
            players,
            deck: Deck::default(),
            board: Vec::with_capacity(5),
            phase: Phase::Showdown,
            pot: Chips::ZERO,
            current_bet: Chips::ZERO,
            dealer_seat,
            acting_seat: dealer_seat,
            last_aggressor: None,
            min_raise: big_blind,
            small_blind,
            big_blind,
            hand_number: 0,
            payoffs: Vec::default(),
        })
    }

    /// The players in seat order.
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// The community cards.
    pub fn board(&self) -> &[Card] {
        &self.board
    }

    /// The hand phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The chips committed in this hand.
    pub fn pot(&self) -> Chips {
        self.pot
    }

    /// The bet to match in this round.
    pub fn current_bet(&self) -> Chips {
        self.current_bet
    }

    /// The minimum raise increment.
    pub fn min_raise(&self) -> Chips {
        self.min_raise
    }

    /// The small blind.
    pub fn small_blind(&self) -> Chips {
        self.small_blind
    }

    /// The big blind.
    pub fn big_blind(&self) -> Chips {
        self.big_blind
    }

    /// The seat with the button.
    pub fn dealer_seat(&self) -> usize {
        self.dealer_seat
    }

    /// The seat that should act.
    pub fn acting_seat(&self) -> usize {
        self.acting_seat
    }

    /// The last player who bet or raised in this round.
    pub fn last_aggressor(&self) -> Option<usize> {
        self.last_aggressor
    }

    /// The number of hands started at this table.
    pub fn hand_number(&self) -> u64 {
        self.hand_number
    }

    /// The payoffs of the last finished hand.
    pub fn payoffs(&self) -> &[HandPayoff] {
        &self.payoffs
    }

    /// The number of cards left in the deck.
    pub fn deck_count(&self) -> usize {
        self.deck.count()
    }

    /// Checks if the hand has ended.
    pub fn is_hand_over(&self) -> bool {
        self.phase == Phase::Showdown || self.count_in_hand() <= 1
    }

    /// Starts a new hand.
    ///
    /// Shuffles a new deck with `rng`, moves the button, posts the blinds and
    /// deals the hole cards.
    pub fn start_new_hand<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), GameError> {
        if !self.is_hand_over() {
            return Err(GameError::IllegalAction("a hand is in progress"));
        }

        if self.count_with_chips() < 2 {
            return Err(GameError::NotEnoughPlayers);
        }

        self.deck = Deck::new_and_shuffled(rng);
        self.board.clear();
        self.phase = Phase::PreFlop;
        self.pot = Chips::ZERO;
        self.payoffs.clear();
        self.hand_number += 1;

        for player in &mut self.players {
            player.reset_for_new_hand();
        }

        // Move the button, players with no chips are sitting out.
        self.dealer_seat = self.next_active_seat(self.dealer_seat);

        let sb_seat = self.next_active_seat(self.dealer_seat);
        self.pot += self.players[sb_seat].post_blind(self.small_blind, PlayerAction::SmallBlind);

        let bb_seat = self.next_active_seat(sb_seat);
        self.pot += self.players[bb_seat].post_blind(self.big_blind, PlayerAction::BigBlind);

        self.current_bet = self.big_blind;
        self.min_raise = self.big_blind;
        self.last_aggressor = Some(bb_seat);

        // Deal one card at a time to each player starting left of the button.
        let n = self.players.len();
        for _ in 0..2 {
            for offset in 1..=n {
                let seat = (self.dealer_seat + offset) % n;
                if !self.players[seat].can_act() {
                    continue;
                }

                match self.deck.deal() {
                    Some(card) => self.players[seat].deal(card),
                    None => error!("Deck exhausted dealing hole cards"),
                }
            }
        }

        self.acting_seat = self.next_active_seat(bb_seat);

        info!(
            "Hand {} started, button {} small blind {} big blind {}",
            self.hand_number, self.dealer_seat, sb_seat, bb_seat
        );

        // Blinds may have put everyone all-in.
        if self.is_round_complete() {
            self.next_round();
        }

        Ok(())
    }

    /// Finds the first active seat clockwise after `seat`.
    ///
    /// Scans at most one full rotation and returns `seat` if no player can
    /// act.
    pub fn next_active_seat(&self, seat: usize) -> usize {
        let n = self.players.len();
        (1..=n)
            .map(|offset| (seat + offset) % n)
            .find(|&s| self.players[s].is_active())
            .unwrap_or(seat)
    }

    /// Applies an action for the player at the acting seat.
    ///
    /// The `amount` is the bet for [Action::Bet], the increment over the
    /// current bet for [Action::Raise], and it is ignored for other actions.
    /// A rejected action leaves the table unchanged.
    pub fn process_action(&mut self, action: Action, amount: Chips) -> Result<(), GameError> {
        if self.is_hand_over() {
            return Err(GameError::IllegalAction("no hand in progress"));
        }

        let seat = self.acting_seat;
        let current_bet = self.current_bet;
        let min_raise = self.min_raise;
        let big_blind = self.big_blind;

        let player = &mut self.players[seat];
        if !player.is_active() {
            return Err(GameError::IllegalAction("the acting player cannot act"));
        }

        let to_call = current_bet - player.bet();
        let res = match action {
            Action::Fold => {
                player.fold();
                Ok(Chips::ZERO)
            }
            Action::Check if to_call > Chips::ZERO => {
                Err(GameError::IllegalAction("cannot check facing a bet"))
            }
            Action::Check => Ok(Chips::ZERO),
            Action::Call if to_call == Chips::ZERO => {
                Err(GameError::IllegalAction("nothing to call"))
            }
            Action::Call => player.place_bet(to_call).map(|_| to_call),
            Action::Bet if current_bet > Chips::ZERO => {
                Err(GameError::IllegalAction("cannot bet with an open bet"))
            }
            Action::Bet if amount < big_blind => {
                Err(GameError::IllegalAction("bet below the big blind"))
            }
            Action::Bet => player.place_bet(amount).map(|_| amount),
            Action::Raise if current_bet == Chips::ZERO => {
                Err(GameError::IllegalAction("cannot raise without a bet"))
            }
            Action::Raise if amount < min_raise => {
                Err(GameError::IllegalAction("raise below the minimum raise"))
            }
            Action::Raise => {
                let chips = to_call + amount;
                player.place_bet(chips).map(|_| chips)
            }
            Action::AllIn => {
                let chips = player.stack();
                player.place_bet(chips).map(|_| chips)
            }
        };

        let chips = match res {
            Ok(chips) => chips,
            Err(e) => {
                warn!("Seat {seat} action {action} rejected: {e}");
                return Err(e);
            }
        };

        player.set_action(action);
        let total_bet = player.bet();
        self.pot += chips;

        match action {
            Action::Bet | Action::Raise => {
                self.current_bet = total_bet;
                self.min_raise = amount;
                self.last_aggressor = Some(seat);
            }
            Action::AllIn if total_bet > self.current_bet => {
                // Only a full raise changes the minimum raise.
                let raise = total_bet - self.current_bet;
                if raise >= self.min_raise {
                    self.min_raise = raise;
                }

                self.current_bet = total_bet;
                self.last_aggressor = Some(seat);
            }
            _ => {}
        }

        debug!(
            "Seat {seat} {action} {chips}, pot {} current bet {}",
            self.pot, self.current_bet
        );

        self.action_update();
        Ok(())
    }

    /// Returns the actions available to the acting player.
    pub fn action_request(&self) -> Option<ActionRequest> {
        if self.is_hand_over() {
            return None;
        }

        let player = self
            .players
            .get(self.acting_seat)
            .filter(|p| p.is_active())?;

        let to_call = self.current_bet - player.bet();
        let stack = player.stack();

        let mut actions = vec![Action::Fold];

        if to_call == Chips::ZERO {
            actions.push(Action::Check);
        }

        if to_call > Chips::ZERO && stack >= to_call {
            actions.push(Action::Call);
        }

        if self.current_bet == Chips::ZERO && stack >= self.big_blind {
            actions.push(Action::Bet);
        }

        if self.current_bet > Chips::ZERO && stack >= to_call + self.min_raise {
            actions.push(Action::Raise);
        }

        actions.push(Action::AllIn);

        Some(ActionRequest {
            seat: self.acting_seat,
            player_id: player.player_id().clone(),
            actions,
            to_call,
            min_raise: self.min_raise,
            big_blind: self.big_blind,
            stack,
        })
    }

    /// The actions the acting player may choose from, empty when no hand is in
    /// progress.
    pub fn legal_actions(&self) -> Vec<Action> {
        self.action_request()
            .map(|req| req.actions)
            .unwrap_or_default()
    }

    /// Returns a snapshot of the table as seen by `viewer`.
    ///
    /// Other players hole cards are covered until the showdown, with no viewer
    /// all hole cards are covered.
    pub fn view(&self, viewer: Option<&PlayerId>) -> TableView {
        let players = self
            .players
            .iter()
            .map(|p| {
                let cards = if !p.can_act() || p.hole_cards().is_empty() {
                    PlayerCards::None
                } else if Some(p.player_id()) == viewer || self.phase == Phase::Showdown {
                    p.cards()
                } else {
                    PlayerCards::Covered
                };

                PlayerView {
                    player_id: p.player_id().clone(),
                    name: p.name().to_string(),
                    stack: p.stack(),
                    bet: p.bet(),
                    status: p.status(),
                    action: p.action(),
                    seat: p.seat(),
                    cards,
                    has_button: p.seat() == self.dealer_seat,
                }
            })
            .collect();

        TableView {
            hand_number: self.hand_number,
            phase: self.phase,
            players,
            board: self.board.clone(),
            pot: self.pot,
            current_bet: self.current_bet,
            dealer_seat: self.dealer_seat,
            acting_seat: (!self.is_hand_over()).then_some(self.acting_seat),
            payoffs: self.payoffs.clone(),
        }
    }

    fn action_update(&mut self) {
        if self.count_in_hand() < 2 {
            // Everybody else folded.
            self.determine_winners();
            return;
        }

        self.acting_seat = self.next_active_seat(self.acting_seat);

        if self.is_round_complete() {
            self.next_round();
        }
    }

    /// Deals the next streets while the betting round is complete, all-in
    /// players run the board out to the showdown.
    fn next_round(&mut self) {
        while self.phase != Phase::Showdown && self.is_round_complete() {
            self.advance_phase();
        }
    }

    fn advance_phase(&mut self) {
        match self.phase.next() {
            Some(Phase::Showdown) => {
                self.phase = Phase::Showdown;
                self.determine_winners();
            }
            Some(street) => {
                if let Err(e) = self.deal_street(street) {
                    debug!("{e}");
                }
            }
            None => {}
        }
    }

    /// Burns a card and deals the board cards for `street`.
    fn deal_street(&mut self, street: Phase) -> Result<(), GameError> {
        if self.phase.next() != Some(street) || street.board_cards() == 0 {
            return Err(GameError::InvalidPhaseTransition { phase: self.phase });
        }

        let burn = self.deck.deal();
        let count = street.board_cards();
        let cards = self.deck.draw(count);
        if burn.is_none() || cards.len() < count {
            error!("Deck exhausted dealing the {street}");
        }

        self.board.extend(cards);
        self.phase = street;

        for player in &mut self.players {
            player.start_round();
        }

        self.current_bet = Chips::ZERO;
        self.min_raise = self.big_blind;
        self.last_aggressor = None;
        self.acting_seat = self.next_active_seat(self.dealer_seat);

        debug!("Dealt {street}: {}", cards_to_string(&self.board));
        Ok(())
    }

    /// Pays the pot to the best hands.
    ///
    /// A split pot is divided evenly, odd chips go one each to the winners
    /// closest to the left of the button.
    fn determine_winners(&mut self) {
        let n = self.players.len();
        let seats = (1..=n)
            .map(|offset| (self.dealer_seat + offset) % n)
            .filter(|&seat| self.players[seat].can_act())
            .collect::<Vec<_>>();

        let pot = self.pot;
        self.payoffs.clear();

        if let [seat] = seats[..] {
            let player = &mut self.players[seat];
            player.collect(pot);
            self.pot = Chips::ZERO;

            info!("Seat {seat} {} wins {pot}", player.player_id());

            self.payoffs.push(HandPayoff {
                player_id: player.player_id().clone(),
                seat,
                chips: pot,
                rank: None,
                cards: Vec::default(),
            });

            return;
        }

        let values = seats
            .iter()
            .filter_map(|&seat| {
                let mut cards = self.players[seat].hole_cards().to_vec();
                cards.extend_from_slice(&self.board);
                HandValue::try_eval(&cards).map(|value| (seat, value))
            })
            .collect::<Vec<_>>();

        let Some(best) = values.iter().map(|(_, v)| *v).max() else {
            error!("No hands to compare at showdown");
            return;
        };

        let winners = values
            .into_iter()
            .filter(|(_, v)| *v == best)
            .collect::<Vec<_>>();

        let share = pot / winners.len() as u32;
        let mut odd_chips = (pot % winners.len() as u32).amount();

        for (seat, value) in winners {
            let mut chips = share;
            if odd_chips > 0 {
                chips += Chips::new(1);
                odd_chips -= 1;
            }

            let player = &mut self.players[seat];
            player.collect(chips);

            info!(
                "Seat {seat} {} wins {chips} with {value}",
                player.player_id()
            );

            self.payoffs.push(HandPayoff {
                player_id: player.player_id().clone(),
                seat,
                chips,
                rank: Some(value.rank()),
                cards: value.hand().to_vec(),
            });
        }

        self.pot = Chips::ZERO;
    }

    /// Checks if all players in the hand have acted and matched the bet.
    ///
    /// This is the case when the action is back to the last aggressor, or
    /// when every active player acted if nobody bet.
    fn is_round_complete(&self) -> bool {
        if self.count_in_hand() < 2 {
            return true;
        }

        // If a player didn't match the current bet and is not all-in then the
        // player has to act and the round is not complete.
        if self
            .players
            .iter()
            .any(|p| p.is_active() && p.bet() < self.current_bet)
        {
            return false;
        }

        // At most one player has chips all others are all in.
        if self.count_active() < 2 {
            return true;
        }

        // Blinds are not an action, the big blind has the option to raise.
        self.players
            .iter()
            .filter(|p| p.is_active())
            .all(|p| p.action().has_acted())
    }

    /// Players that have not folded.
    fn count_in_hand(&self) -> usize {
        self.players.iter().filter(|p| p.can_act()).count()
    }

    /// Players that can still act.
    fn count_active(&self) -> usize {
        self.players.iter().filter(|p| p.is_active()).count()
    }

    fn count_with_chips(&self) -> usize {
        self.players
            .iter()
            .filter(|p| p.stack() > Chips::ZERO)
            .count()
    }
}

fn cards_to_string(cards: &[Card]) -> String {
    cards
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
