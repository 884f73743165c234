//! PokeRecord Archive: look up Pokémon from the public REST API and browse
//! every known name, in a full-screen terminal interface.

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod fetch;
pub mod models;
pub mod sprite;
pub mod ui;
pub mod utils;
