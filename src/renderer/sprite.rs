//! Sprite instances for 2D rendering

use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3};

use crate::resources::TextureHandle;
use crate::sim::{Ball, GameObject, GamePhase, GameState, Particle, PostFx, PowerUp};

/// On-screen size of a trail particle
const PARTICLE_SIZE: f32 = 10.0;

/// Everything a renderer needs to draw one entity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawInfo {
    pub pos: Vec2,
    pub size: Vec2,
    pub color: Vec3,
    /// Degrees
    pub rotation: f32,
    pub sprite: TextureHandle,
}

/// Entities that can appear on screen
pub trait Drawable {
    /// `None` when the entity should not be drawn this frame
    fn draw_info(&self) -> Option<DrawInfo>;
}

impl Drawable for GameObject {
    fn draw_info(&self) -> Option<DrawInfo> {
        if self.destroyed {
            return None;
        }
        Some(DrawInfo {
            pos: self.pos,
            size: self.size,
            color: self.color,
            rotation: self.rotation,
            sprite: self.sprite,
        })
    }
}

impl Drawable for Ball {
    fn draw_info(&self) -> Option<DrawInfo> {
        self.body.draw_info()
    }
}

impl Drawable for PowerUp {
    fn draw_info(&self) -> Option<DrawInfo> {
        self.body.draw_info()
    }
}

/// GPU instance: one textured, tinted quad
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct SpriteInstance {
    pub position: [f32; 2],
    pub size: [f32; 2],
    pub color: [f32; 4],
    pub rotation: f32,
    pub texture: u32,
}

impl From<DrawInfo> for SpriteInstance {
    fn from(info: DrawInfo) -> Self {
        Self {
            position: info.pos.to_array(),
            size: info.size.to_array(),
            color: info.color.extend(1.0).to_array(),
            rotation: info.rotation,
            texture: info.sprite.0,
        }
    }
}

impl SpriteInstance {
    fn particle(particle: &Particle, texture: TextureHandle) -> Self {
        Self {
            position: particle.pos.to_array(),
            size: [PARTICLE_SIZE; 2],
            color: particle.color.to_array(),
            rotation: 0.0,
            texture: texture.0,
        }
    }
}

/// One frame's draw list
#[derive(Debug, Clone, Default)]
pub struct Frame {
    /// Background, bricks, paddle, power-ups, ball - in draw order
    pub sprites: Vec<SpriteInstance>,
    /// Additively blended trail particles
    pub particles: Vec<SpriteInstance>,
    pub effects: PostFx,
}

impl Frame {
    /// Raw bytes of the sprite list for a GPU instance buffer
    pub fn sprite_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.sprites)
    }

    pub fn particle_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.particles)
    }
}

/// Collect the draw list; nothing is drawn outside active play
pub fn build_frame(state: &GameState) -> Option<Frame> {
    if state.phase != GamePhase::Active {
        return None;
    }

    let background = DrawInfo {
        pos: Vec2::ZERO,
        size: Vec2::new(state.config.width, state.config.height),
        color: Vec3::ONE,
        rotation: 0.0,
        sprite: state.textures.background,
    };

    let bricks = state.active_level().map(|l| l.bricks()).unwrap_or_default();
    let sprites = std::iter::once(Some(background))
        .chain(bricks.iter().map(Drawable::draw_info))
        .chain(std::iter::once(state.paddle.draw_info()))
        .chain(state.powerups.iter().map(Drawable::draw_info))
        .chain(std::iter::once(state.ball.draw_info()))
        .flatten()
        .map(SpriteInstance::from)
        .collect();

    let particles = state
        .particles
        .alive()
        .map(|p| SpriteInstance::particle(p, state.textures.particle))
        .collect();

    Some(Frame {
        sprites,
        particles,
        effects: state.effects.clone(),
    })
}
