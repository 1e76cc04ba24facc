// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Bot strategies that play through the table action requests.
use rand::{Rng, SeedableRng, rngs::StdRng};

use holdem_core::{Action, ActionRequest, Chips, PlayerCards, TableView};

/// A strategy that chooses an action for a request.
pub trait Strategy: Send + 'static {
    /// Execute an action given a table view.
    fn execute(&mut self, req: &ActionRequest, view: &TableView) -> (Action, Chips);
}

/// A strategy that never folds when it can stay in the hand.
#[derive(Debug, Clone, Default)]
pub struct CallOrCheck;

impl Strategy for CallOrCheck {
    fn execute(&mut self, req: &ActionRequest, _view: &TableView) -> (Action, Chips) {
        if req.can_call() {
            (Action::Call, Chips::ZERO)
        } else if req.can_check() {
            (Action::Check, Chips::ZERO)
        } else {
            (Action::Fold, Chips::ZERO)
        }
    }
}

/// A strategy with some randomness that raises pocket pairs.
#[derive(Debug, Clone)]
pub struct RandomStrategy {
    rng: StdRng,
}

impl RandomStrategy {
    /// Creates a strategy with a seeded generator.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Strategy for RandomStrategy {
    fn execute(&mut self, req: &ActionRequest, view: &TableView) -> (Action, Chips) {
        let p = self.rng.random::<f64>();

        let player = view.players.iter().find(|p| p.player_id == req.player_id);
        if let Some(PlayerCards::Cards(c1, c2)) = player.map(|p| p.cards) {
            // Raise with a pair.
            if c1.rank() == c2.rank() && p > 0.3 {
                if req.can_raise() {
                    return (Action::Raise, req.min_raise);
                } else if req.can_bet() {
                    return (Action::Bet, req.big_blind * 2);
                }
            }
        }

        if p < 0.02 {
            (Action::AllIn, Chips::ZERO)
        } else if p < 0.15 && !req.can_check() {
            (Action::Fold, Chips::ZERO)
        } else if p > 0.9 && req.can_bet() {
            (Action::Bet, req.big_blind)
        } else if req.can_call() {
            (Action::Call, Chips::ZERO)
        } else if req.can_check() {
            (Action::Check, Chips::ZERO)
        } else {
            (Action::Fold, Chips::ZERO)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use holdem_core::{Player, PlayerId, Table};

    fn new_table() -> Table {
        let players = (0..4)
            .map(|i| Player::new(PlayerId::new(format!("p{i}")), "bot", Chips::new(1_000)))
            .collect();
        Table::new(players, Chips::new(5), Chips::new(10)).unwrap()
    }

    #[test]
    fn call_or_check() {
        let mut table = new_table();
        table.start_new_hand(&mut StdRng::seed_from_u64(1)).unwrap();

        let mut bot = CallOrCheck;
        let req = table.action_request().unwrap();
        let view = table.view(Some(&req.player_id));
        assert_eq!(bot.execute(&req, &view), (Action::Call, Chips::ZERO));

        // Everybody limps and the big blind checks.
        for _ in 0..3 {
            let req = table.action_request().unwrap();
            let (action, amount) = bot.execute(&req, &table.view(None));
            table.process_action(action, amount).unwrap();
        }

        let req = table.action_request().unwrap();
        assert_eq!(bot.execute(&req, &table.view(None)).0, Action::Check);
    }

    #[test]
    fn random_strategy_plays_legal_actions() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut bots = (0..4).map(RandomStrategy::new).collect::<Vec<_>>();
        let mut table = new_table();

        for _ in 0..50 {
            if table.start_new_hand(&mut rng).is_err() {
                break;
            }

            while let Some(req) = table.action_request() {
                let view = table.view(Some(&req.player_id));
                let (action, amount) = bots[req.seat].execute(&req, &view);
                if table.process_action(action, amount).is_err() {
                    table.process_action(Action::Fold, Chips::ZERO).unwrap();
                }
            }
        }

        let total = table.players().iter().map(|p| p.stack()).sum::<Chips>();
        assert_eq!(total, Chips::new(4_000));
    }
}
