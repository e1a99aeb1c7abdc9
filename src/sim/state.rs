//! Game state and core simulation types
//!
//! The controller owns every entity for the whole session; nothing here is
//! global.

use glam::{Vec2, Vec3};
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::level::{Level, TileGrid};
use super::particles::ParticleGenerator;
use crate::consts::*;
use crate::resources::{TextureHandle, Textures};
use crate::settings::GameConfig;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Normal play
    Active,
    /// Level selection (driven outside the core)
    Menu,
    /// Session won
    Win,
}

/// Smallest size component an object may have
const MIN_EXTENT: f32 = f32::EPSILON;

/// Base movable, drawable entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameObject {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub vel: Vec2,
    pub color: Vec3,
    /// Degrees
    pub rotation: f32,
    /// Indestructible, never spawns power-ups
    pub solid: bool,
    pub destroyed: bool,
    pub sprite: TextureHandle,
}

impl GameObject {
    pub fn new(pos: Vec2, size: Vec2, sprite: TextureHandle, color: Vec3, vel: Vec2) -> Self {
        Self {
            pos,
            size: size.max(Vec2::splat(MIN_EXTENT)),
            vel,
            color,
            rotation: 0.0,
            solid: false,
            destroyed: false,
            sprite,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }
}

/// The ball: a game object with a radius and a few status flags
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub body: GameObject,
    pub radius: f32,
    /// Riding the paddle, velocity not integrated
    pub stuck: bool,
    /// Re-attach on the next paddle contact
    pub sticky: bool,
    /// No physical response against breakable bricks
    pub pass_through: bool,
}

impl Ball {
    pub fn new(pos: Vec2, radius: f32, vel: Vec2, sprite: TextureHandle) -> Self {
        Self {
            body: GameObject::new(pos, Vec2::splat(radius * 2.0), sprite, WHITE, vel),
            radius,
            stuck: true,
            sticky: false,
            pass_through: false,
        }
    }

    /// Integrate velocity and bounce off the left, right and top walls
    ///
    /// The bottom edge is left open: crossing it loses the ball.
    pub fn advance(&mut self, dt: f32, width: f32) -> Vec2 {
        if self.stuck {
            return self.body.pos;
        }

        let body = &mut self.body;
        body.pos += body.vel * dt;

        if body.pos.x <= 0.0 {
            body.vel.x = -body.vel.x;
            body.pos.x = 0.0;
        } else if body.pos.x + body.size.x >= width {
            body.vel.x = -body.vel.x;
            body.pos.x = width - body.size.x;
        }
        if body.pos.y <= 0.0 {
            body.vel.y = -body.vel.y;
            body.pos.y = 0.0;
        }

        body.pos
    }

    /// Put the ball back on the paddle with fresh status
    pub fn reset(&mut self, pos: Vec2, vel: Vec2) {
        self.body.pos = pos;
        self.body.vel = vel;
        self.body.color = WHITE;
        self.stuck = true;
        self.sticky = false;
        self.pass_through = false;
    }

    /// Circle center as used by collision tests
    pub fn center(&self) -> Vec2 {
        self.body.pos + self.radius
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUpKind {
    Speed,
    Sticky,
    PassThrough,
    PadSizeIncrease,
    Confuse,
    Chaos,
}

impl PowerUpKind {
    /// Spawn-roll order
    pub const ALL: [PowerUpKind; 6] = [
        PowerUpKind::Speed,
        PowerUpKind::Sticky,
        PowerUpKind::PassThrough,
        PowerUpKind::PadSizeIncrease,
        PowerUpKind::Confuse,
        PowerUpKind::Chaos,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn color(self) -> Vec3 {
        match self {
            PowerUpKind::Speed => Vec3::new(0.5, 0.5, 1.0),
            PowerUpKind::Sticky => Vec3::new(1.0, 0.5, 1.0),
            PowerUpKind::PassThrough => Vec3::new(0.5, 1.0, 0.5),
            PowerUpKind::PadSizeIncrease => Vec3::new(1.0, 0.6, 0.4),
            PowerUpKind::Confuse => Vec3::new(1.0, 0.3, 0.3),
            PowerUpKind::Chaos => Vec3::new(0.9, 0.25, 0.25),
        }
    }

    /// Effect duration in seconds, 0 for instantaneous effects
    pub fn duration(self) -> f32 {
        match self {
            PowerUpKind::Speed | PowerUpKind::PadSizeIncrease => 0.0,
            PowerUpKind::Sticky => 20.0,
            PowerUpKind::PassThrough => 10.0,
            PowerUpKind::Confuse | PowerUpKind::Chaos => 15.0,
        }
    }

    pub fn texture_name(self) -> &'static str {
        match self {
            PowerUpKind::Speed => "powerup_speed",
            PowerUpKind::Sticky => "powerup_sticky",
            PowerUpKind::PassThrough => "powerup_passthrough",
            PowerUpKind::PadSizeIncrease => "powerup_increase",
            PowerUpKind::Confuse => "powerup_confuse",
            PowerUpKind::Chaos => "powerup_chaos",
        }
    }
}

/// A falling or collected power-up
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerUp {
    pub body: GameObject,
    pub kind: PowerUpKind,
    /// Seconds of effect left once activated
    pub duration: f32,
    /// Collected and in force
    pub activated: bool,
}

impl PowerUp {
    pub fn new(kind: PowerUpKind, pos: Vec2, sprite: TextureHandle) -> Self {
        Self {
            body: GameObject::new(pos, POWERUP_SIZE, sprite, kind.color(), POWERUP_VELOCITY),
            kind,
            duration: kind.duration(),
            activated: false,
        }
    }

    /// Spent: off the field and no effect pending
    pub fn is_spent(&self) -> bool {
        self.body.destroyed && !self.activated
    }
}

/// Flags consumed by the external post-processing pass
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PostFx {
    pub shake: bool,
    pub confuse: bool,
    pub chaos: bool,
    /// Seconds of shake left
    pub shake_time: f32,
}

/// Things that happened during an update, for audio/UI collaborators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    BrickDestroyed,
    SolidBrickHit,
    PaddleHit,
    PowerUpSpawned(PowerUpKind),
    PowerUpActivated(PowerUpKind),
    PowerUpExpired(PowerUpKind),
    BallLost,
    LevelCompleted,
}

/// Complete world state for one session
#[derive(Debug, Clone, Serialize)]
pub struct GameState {
    pub config: GameConfig,
    pub phase: GamePhase,
    pub paddle: GameObject,
    pub ball: Ball,
    pub levels: Vec<Level>,
    /// Index of the active level
    pub level: usize,
    /// Live power-ups, in spawn order
    pub powerups: Vec<PowerUp>,
    pub effects: PostFx,
    pub particles: ParticleGenerator,
    pub textures: Textures,
    /// Pending events (drain each frame)
    pub events: Vec<GameEvent>,
    /// Completion already reported for the active level
    pub(crate) completion_reported: bool,
    #[serde(skip)]
    pub rng: Pcg32,
}

impl GameState {
    /// Create a session from level definitions; play starts on the first one
    pub fn new(config: GameConfig, definitions: Vec<TileGrid>, textures: Textures) -> Self {
        let (level_width, level_height) = config.level_size();
        let levels = definitions
            .into_iter()
            .map(|def| Level::new(def, level_width, level_height, &textures))
            .collect();

        let paddle_pos = Self::paddle_start(&config);
        let paddle = GameObject::new(paddle_pos, PLAYER_SIZE, textures.paddle, WHITE, Vec2::ZERO);
        let ball = Ball::new(
            Self::ball_start(paddle_pos),
            BALL_RADIUS,
            INITIAL_BALL_VELOCITY,
            textures.ball,
        );

        log::info!(
            "New session: {}x{} playfield, seed {}",
            config.width,
            config.height,
            config.seed
        );

        Self {
            rng: Pcg32::seed_from_u64(config.seed),
            particles: ParticleGenerator::new(config.max_particles()),
            config,
            phase: GamePhase::Active,
            paddle,
            ball,
            levels,
            level: 0,
            powerups: Vec::new(),
            effects: PostFx::default(),
            textures,
            events: Vec::new(),
            completion_reported: false,
        }
    }

    /// Paddle top-left: centered, resting on the bottom edge
    pub fn paddle_start(config: &GameConfig) -> Vec2 {
        Vec2::new(
            config.width / 2.0 - PLAYER_SIZE.x / 2.0,
            config.height - PLAYER_SIZE.y,
        )
    }

    /// Ball top-left: centered on top of the paddle
    pub fn ball_start(paddle_pos: Vec2) -> Vec2 {
        paddle_pos + Vec2::new(PLAYER_SIZE.x / 2.0 - BALL_RADIUS, -BALL_RADIUS * 2.0)
    }

    pub fn active_level(&self) -> Option<&Level> {
        self.levels.get(self.level)
    }

    /// True iff the active level has no breakable bricks left
    pub fn is_completed(&self) -> bool {
        self.active_level().is_some_and(Level::is_completed)
    }

    /// Switch to another level and rebuild it; out-of-range indices are ignored
    pub fn select_level(&mut self, index: usize) {
        if let Some(level) = self.levels.get_mut(index) {
            level.reload();
            self.level = index;
            self.completion_reported = false;
            log::info!("Selected level {}", index + 1);
        }
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all events recorded since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// JSON dump of the world for debugging
    pub fn snapshot_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::TextureRegistry;
    use crate::sim::level::parse_tiles;

    fn new_state() -> GameState {
        let textures = Textures::resolve(&mut TextureRegistry::new());
        let levels = vec![parse_tiles("2 2\n1 3").unwrap(), parse_tiles("4").unwrap()];
        GameState::new(GameConfig::default(), levels, textures)
    }

    #[test]
    fn test_initial_layout() {
        let state = new_state();
        assert_eq!(state.phase, GamePhase::Active);
        assert_eq!(state.paddle.pos, Vec2::new(350.0, 580.0));
        assert_eq!(state.ball.body.pos, Vec2::new(387.5, 555.0));
        assert_eq!(state.ball.body.size, Vec2::splat(25.0));
        assert!(state.ball.stuck);
        assert_eq!(state.levels.len(), 2);
        assert!(!state.is_completed());
    }

    #[test]
    fn test_select_level() {
        let mut state = new_state();
        state.select_level(1);
        assert_eq!(state.level, 1);
        assert_eq!(state.active_level().unwrap().bricks().len(), 1);

        state.select_level(5);
        assert_eq!(state.level, 1);
    }

    #[test]
    fn test_ball_advance_bounces_off_walls() {
        let mut ball = Ball::new(Vec2::new(5.0, 5.0), 5.0, Vec2::new(-100.0, -100.0), TextureHandle(0));
        ball.stuck = false;
        ball.advance(0.1, 100.0);
        assert_eq!(ball.body.pos, Vec2::ZERO);
        assert_eq!(ball.body.vel, Vec2::new(100.0, 100.0));

        ball.body.pos = Vec2::new(85.0, 50.0);
        ball.advance(0.1, 100.0);
        assert_eq!(ball.body.pos.x, 90.0);
        assert_eq!(ball.body.vel.x, -100.0);
    }

    #[test]
    fn test_ball_bottom_is_open() {
        let mut ball = Ball::new(Vec2::new(50.0, 95.0), 5.0, Vec2::new(0.0, 100.0), TextureHandle(0));
        ball.stuck = false;
        ball.advance(1.0, 100.0);
        assert_eq!(ball.body.pos.y, 195.0);
        assert_eq!(ball.body.vel.y, 100.0);
    }

    #[test]
    fn test_stuck_ball_does_not_move() {
        let mut ball = Ball::new(Vec2::new(10.0, 10.0), 5.0, Vec2::new(50.0, 50.0), TextureHandle(0));
        assert_eq!(ball.advance(1.0, 100.0), Vec2::new(10.0, 10.0));
    }

    #[test]
    fn test_ball_reset_clears_status() {
        let mut ball = Ball::new(Vec2::ZERO, 5.0, Vec2::ZERO, TextureHandle(0));
        ball.stuck = false;
        ball.sticky = true;
        ball.pass_through = true;
        ball.body.color = PASS_THROUGH_BALL_TINT;
        ball.reset(Vec2::new(1.0, 2.0), INITIAL_BALL_VELOCITY);
        assert!(ball.stuck && !ball.sticky && !ball.pass_through);
        assert_eq!(ball.body.color, WHITE);
        assert_eq!(ball.body.vel, INITIAL_BALL_VELOCITY);
    }

    #[test]
    fn test_object_size_is_positive() {
        let obj = GameObject::new(Vec2::ZERO, Vec2::new(0.0, -3.0), TextureHandle(0), WHITE, Vec2::ZERO);
        assert!(obj.size.x > 0.0 && obj.size.y > 0.0);
    }

    #[test]
    fn test_snapshot_json() {
        let json = new_state().snapshot_json().unwrap();
        assert!(json.contains("\"phase\": \"Active\""));
    }
}
