//! Falling-block puzzle game for the terminal.
//!
//! `game` holds the rules and state, `input` maps keys onto them, `ui`
//! paints a frame and `app` drives the update/redraw loop.

pub mod app;
pub mod config;
pub mod constants;
pub mod game;
pub mod input;
pub mod logging;
pub mod ui;
