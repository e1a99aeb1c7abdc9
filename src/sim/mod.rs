//! Simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering
//! and platform dependencies:
//! - Time comes in as an elapsed-seconds argument
//! - Seeded RNG only
//! - Stable iteration order (bricks in layout order, power-ups in spawn order)

pub mod collision;
pub mod level;
pub mod particles;
pub mod powerup;
pub mod state;
pub mod tick;

pub use collision::{Collision, Direction, Rect, ball_box_collision, box_overlap};
pub use level::{Level, LevelError, TileGrid, parse_tiles};
pub use particles::{Particle, ParticleGenerator};
pub use state::{Ball, GameEvent, GameObject, GamePhase, GameState, PostFx, PowerUp, PowerUpKind};
pub use tick::{FrameInput, process_input, tick, update};
