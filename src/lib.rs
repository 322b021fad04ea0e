//! Narrow a catalog of pre-generated Nightreign map seeds down to the ones
//! consistent with what the player has seen so far.
pub mod catalog;
pub mod cli;
pub mod commands;
pub mod config;
pub mod cursor;
pub mod filter;
pub mod inspect;
pub mod observation;
pub mod output;
pub mod session;
pub mod slots;
