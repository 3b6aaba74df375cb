//! Side-scrolling "flappy" arcade game.
//!
//! The simulation core (`entities`, `registry`, `player`, `pipes`,
//! `collision`, `hud`, `compute`) is free of terminal I/O; the collaborator
//! modules (`assets`, `audio`, `display`, `input`, `clock`) sit at the edge
//! and are only touched through small traits.

pub mod assets;
pub mod audio;
pub mod clock;
pub mod collision;
pub mod compute;
pub mod config;
pub mod display;
pub mod entities;
pub mod error;
pub mod hud;
pub mod input;
pub mod pipes;
pub mod player;
pub mod registry;
