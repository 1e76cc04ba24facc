// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Game errors.
use thiserror::Error;

use crate::{poker::Chips, table::Phase};

/// An error returned when the table refuses a request.
///
/// All errors are recoverable, a refused request leaves the table unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// The action is not valid in the current betting state.
    #[error("Illegal action: {0}")]
    IllegalAction(&'static str),
    /// The player doesn't have enough chips for the action.
    #[error("Insufficient stack: needed {needed}, available {available}")]
    InsufficientStack {
        /// The chips needed.
        needed: Chips,
        /// The player chips.
        available: Chips,
    },
    /// A street cannot be dealt in the current phase.
    #[error("Invalid phase transition from {phase}")]
    InvalidPhaseTransition {
        /// The phase the table is in.
        phase: Phase,
    },
    /// Fewer than two players have chips.
    #[error("Not enough players with chips")]
    NotEnoughPlayers,
    /// The table configuration is invalid.
    #[error("Invalid table setup: {0}")]
    InvalidSetup(&'static str),
}
