//! Rules and move search for Advance, a two-player game on a 9x9 board.
//!
//! A [`Board`] is read from and written to the plain-text notation that bots
//! exchange, [`legal_actions()`] lists what a side may do, and
//! [`choose_move()`] picks one of those actions by looking ahead.

pub use actions::*;
pub use board::*;
pub use errors::*;
pub use movegen::*;
pub use rules::*;
pub use search::*;
pub use units::*;
pub use visualization::*;

mod actions;
#[cfg(test)]
mod arbitrary;
mod board;
mod errors;
mod movegen;
mod notation;
mod rules;
mod search;
mod units;
mod visualization;
