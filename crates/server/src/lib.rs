// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Hold'em games runner.
#![warn(clippy::all, rust_2018_idioms, missing_docs)]

pub mod bot;
pub mod db;
pub mod games;
pub mod server;
pub use server::{Config, run};
