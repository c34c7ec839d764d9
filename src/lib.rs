//! Space garbage: a terminal rocket game driven by a cooperative tick
//! scheduler. Every on-screen entity is a `Behavior` resumed once per tick;
//! behaviors share a screen buffer, an obstacle registry and the in-game year.

pub mod assets;
pub mod behaviors;
pub mod canvas;
pub mod compute;
pub mod config;
pub mod entities;
pub mod error;
pub mod game;
pub mod obstacles;
pub mod scenario;
pub mod scheduler;

pub use error::{GameError, Result};
