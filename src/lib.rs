//! Breakout - simulation core for a brick-breaking arcade game
//!
//! Core modules:
//! - `sim`: Frame-driven simulation (collisions, power-ups, game state)
//! - `renderer`: Render-ready view of the world for an external sprite renderer
//! - `resources`: Opaque texture handles resolved by name
//! - `settings`: Session configuration

pub mod renderer;
pub mod resources;
pub mod settings;
pub mod sim;

pub use resources::{TextureHandle, TextureRegistry, Textures};
pub use settings::GameConfig;

/// Game configuration constants
pub mod consts {
    use glam::{Vec2, Vec3};

    /// Fixed simulation timestep used by the native driver
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Default playfield dimensions
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;

    /// Paddle defaults
    pub const PLAYER_SIZE: Vec2 = Vec2::new(100.0, 20.0);
    pub const PLAYER_VELOCITY: f32 = 500.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 12.5;
    pub const INITIAL_BALL_VELOCITY: Vec2 = Vec2::new(100.0, -350.0);
    /// How hard the paddle offset steers the rebound
    pub const PADDLE_STRENGTH: f32 = 2.0;

    /// Solid brick hit
    pub const SHAKE_DURATION: f32 = 0.05;

    /// Power-up defaults
    pub const POWERUP_SIZE: Vec2 = Vec2::new(60.0, 20.0);
    pub const POWERUP_VELOCITY: Vec2 = Vec2::new(0.0, 150.0);
    /// One in N per kind on every destroyed brick
    pub const POWERUP_SPAWN_CHANCE: u32 = 75;
    pub const SPEED_FACTOR: f32 = 1.2;
    pub const PADDLE_GROWTH: f32 = 50.0;

    pub const WHITE: Vec3 = Vec3::ONE;
    pub const STICKY_PADDLE_TINT: Vec3 = Vec3::new(1.0, 0.5, 1.0);
    pub const PASS_THROUGH_BALL_TINT: Vec3 = Vec3::new(1.0, 0.5, 0.5);
}
