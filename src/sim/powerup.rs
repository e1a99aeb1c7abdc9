//! Power-up lifecycle
//!
//! Spawned when a breakable brick is destroyed, collected by the paddle,
//! kept in the live set while a timed effect is in force, then pruned.

use glam::Vec2;
use rand::Rng;

use super::collision::box_overlap;
use super::state::{GameEvent, GameState, PowerUp, PowerUpKind};
use crate::consts::*;

/// One-in-`chance` roll
pub fn should_spawn(rng: &mut impl Rng, chance: u32) -> bool {
    rng.random_range(0..chance) == 0
}

/// Roll every kind independently at a destroyed brick's position
pub fn spawn_powerups(state: &mut GameState, pos: Vec2) {
    for kind in PowerUpKind::ALL {
        if should_spawn(&mut state.rng, POWERUP_SPAWN_CHANCE) {
            log::debug!("Spawned {:?} at ({:.0}, {:.0})", kind, pos.x, pos.y);
            state
                .powerups
                .push(PowerUp::new(kind, pos, state.textures.powerup(kind)));
            state.push_event(GameEvent::PowerUpSpawned(kind));
        }
    }
}

/// Apply a collected power-up's effect
pub fn activate(state: &mut GameState, kind: PowerUpKind) {
    match kind {
        PowerUpKind::Speed => state.ball.body.vel *= SPEED_FACTOR,
        PowerUpKind::Sticky => {
            state.ball.sticky = true;
            state.paddle.color = STICKY_PADDLE_TINT;
        }
        PowerUpKind::PassThrough => {
            state.ball.pass_through = true;
            state.ball.body.color = PASS_THROUGH_BALL_TINT;
        }
        PowerUpKind::PadSizeIncrease => state.paddle.size.x += PADDLE_GROWTH,
        PowerUpKind::Confuse => {
            // Confuse and chaos never run together
            if !state.effects.chaos {
                state.effects.confuse = true;
            }
        }
        PowerUpKind::Chaos => {
            if !state.effects.confuse {
                state.effects.chaos = true;
            }
        }
    }
    log::debug!("Activated {:?}", kind);
    state.push_event(GameEvent::PowerUpActivated(kind));
}

/// Undo a timed effect
fn deactivate(state: &mut GameState, kind: PowerUpKind) {
    match kind {
        PowerUpKind::Sticky => {
            state.ball.sticky = false;
            state.paddle.color = WHITE;
        }
        PowerUpKind::PassThrough => {
            state.ball.pass_through = false;
            state.ball.body.color = WHITE;
        }
        PowerUpKind::Confuse => state.effects.confuse = false,
        PowerUpKind::Chaos => state.effects.chaos = false,
        PowerUpKind::Speed | PowerUpKind::PadSizeIncrease => {}
    }
}

/// Whether another collected power-up of `kind` is still in force
pub fn is_other_active(powerups: &[PowerUp], kind: PowerUpKind) -> bool {
    powerups.iter().any(|p| p.activated && p.kind == kind)
}

/// Drop power-ups that left the field and collect those touching the paddle
pub fn collect_powerups(state: &mut GameState) {
    let paddle = state.paddle.rect();
    let bottom = state.config.height;
    let mut collected = Vec::new();

    for powerup in state.powerups.iter_mut().filter(|p| !p.body.destroyed) {
        if powerup.body.pos.y >= bottom {
            powerup.body.destroyed = true;
        }
        if box_overlap(paddle, powerup.body.rect()) {
            powerup.body.destroyed = true;
            powerup.activated = true;
            collected.push(powerup.kind);
        }
    }

    for kind in collected {
        activate(state, kind);
    }
}

/// Advance falling power-ups, expire timed effects, prune spent entries
pub fn update_powerups(state: &mut GameState, dt: f32) {
    let mut expired = Vec::new();

    for powerup in &mut state.powerups {
        // Collected entries only count down
        if !powerup.body.destroyed {
            powerup.body.pos += powerup.body.vel * dt;
        }
        if powerup.activated {
            powerup.duration -= dt;
            if powerup.duration <= 0.0 {
                powerup.activated = false;
                expired.push(powerup.kind);
            }
        }
    }

    for kind in expired {
        // Overlapping pickups keep the effect alive until the last one expires
        if !is_other_active(&state.powerups, kind) {
            deactivate(state, kind);
        }
        log::debug!("Expired {:?}", kind);
        state.push_event(GameEvent::PowerUpExpired(kind));
    }

    state.powerups.retain(|p| !p.is_spent());
}

/// Remove every power-up and lift all of their effects
pub fn clear_powerups(state: &mut GameState) {
    for kind in PowerUpKind::ALL {
        deactivate(state, kind);
    }
    state.powerups.clear();
}
