//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer: the view draws a [`GameSnapshot`](crate::core::GameSnapshot)
//! into a framebuffer and the renderer flushes only what changed to the terminal.
//! Board cells are two columns wide to make them look square.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, GameView, Viewport, CONTROLS};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
