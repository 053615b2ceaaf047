//! Rockstorm game library
//!
//! A twin-stick arcade shooter: the simulation core (pools, waves, AI,
//! combat) is plain deterministic data advanced one fixed tick at a time,
//! and the Bevy shell around it handles input, rendering, audio, and menus.

pub mod asteroid;
pub mod audio;
pub mod body;
pub mod config;
pub mod constants;
pub mod control;
pub mod enemy;
pub mod error;
pub mod menu;
pub mod particlefx;
pub mod physics;
pub mod player;
pub mod pool;
pub mod powerup;
pub mod projectile;
pub mod rendering;
pub mod scoreboard;
pub mod session;
pub mod simulation;
pub mod wave;
