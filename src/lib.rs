//! Pokedex TUI
//!
//! Lists creatures from PokeAPI, pages through them ten at a time, and looks
//! entries up by name. The library exposes the modules for testing.

pub mod action;
pub mod api;
pub mod components;
pub mod config;
pub mod effect;
pub mod paginate;
pub mod reducer;
pub mod state;
