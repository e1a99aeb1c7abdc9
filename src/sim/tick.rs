//! Per-frame controller
//!
//! One call order per rendered frame: `process_input`, `update`, then the
//! external renderer reads the state.

use glam::Vec2;

use super::collision::{Collision, Direction, ball_box_collision};
use super::powerup::{clear_powerups, collect_powerups, spawn_powerups, update_powerups};
use super::state::{Ball, GameEvent, GamePhase, GameState};
use crate::consts::*;

/// Pressed-key snapshot for a single frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameInput {
    pub left: bool,
    pub right: bool,
    /// Release the ball from the paddle
    pub launch: bool,
}

/// Move the paddle (and a stuck ball with it), launch on request
pub fn process_input(state: &mut GameState, input: &FrameInput, dt: f32) {
    if state.phase != GamePhase::Active {
        return;
    }

    let velocity = PLAYER_VELOCITY * dt;
    let paddle = &mut state.paddle;
    let ball = &mut state.ball;

    if input.left && paddle.pos.x >= 0.0 {
        paddle.pos.x -= velocity;
        if ball.stuck {
            ball.body.pos.x -= velocity;
        }
    }
    if input.right && paddle.pos.x <= state.config.width - paddle.size.x {
        paddle.pos.x += velocity;
        if ball.stuck {
            ball.body.pos.x += velocity;
        }
    }
    if input.launch && ball.stuck {
        ball.stuck = false;
        log::trace!("Ball launched");
    }
}

/// Advance the world by `dt` seconds
pub fn update(state: &mut GameState, dt: f32) {
    if state.phase != GamePhase::Active {
        return;
    }

    state.ball.advance(dt, state.config.width);

    do_collisions(state);

    if state.ball.body.pos.y >= state.config.height {
        lose_ball(state);
    }

    update_powerups(state, dt);

    let effects = &mut state.effects;
    if effects.shake_time > 0.0 {
        effects.shake_time -= dt;
        if effects.shake_time <= 0.0 {
            effects.shake = false;
        }
    }

    let offset = Vec2::splat(state.ball.radius / 2.0);
    state
        .particles
        .update(dt, &state.ball, 2, offset, &mut state.rng);

    if !state.completion_reported && state.is_completed() {
        state.completion_reported = true;
        log::info!("Level {} completed", state.level + 1);
        state.push_event(GameEvent::LevelCompleted);
    }
}

/// Process input then advance one frame
pub fn tick(state: &mut GameState, input: &FrameInput, dt: f32) {
    process_input(state, input, dt);
    update(state, dt);
}

/// Resolve ball contacts with bricks and paddle, then power-up pickups
pub fn do_collisions(state: &mut GameState) {
    resolve_bricks(state);
    resolve_paddle(state);
    collect_powerups(state);
}

fn resolve_bricks(state: &mut GameState) {
    let Some(level) = state.levels.get_mut(state.level) else {
        return;
    };
    let ball = &mut state.ball;
    let mut destroyed_at = Vec::new();

    for brick in level.bricks_mut().iter_mut().filter(|b| !b.destroyed) {
        let Collision::Hit {
            direction,
            difference,
        } = ball_box_collision(ball.body.pos, ball.radius, brick.rect())
        else {
            continue;
        };

        if brick.solid {
            if state.config.effective_screen_shake() {
                state.effects.shake_time = SHAKE_DURATION;
                state.effects.shake = true;
            }
            state.events.push(GameEvent::SolidBrickHit);
        } else {
            brick.destroyed = true;
            destroyed_at.push(brick.pos);
            state.events.push(GameEvent::BrickDestroyed);
            if ball.pass_through {
                continue;
            }
        }

        log::trace!("Brick hit {:?}, difference {:?}", direction, difference);
        bounce_off_box(ball, direction, difference);
    }

    for pos in destroyed_at {
        spawn_powerups(state, pos);
    }
}

/// Reflect along the hit axis and push the ball out of the box
fn bounce_off_box(ball: &mut Ball, direction: Direction, difference: Vec2) {
    let body = &mut ball.body;
    if direction.is_horizontal() {
        body.vel.x = -body.vel.x;
        let penetration = ball.radius - difference.x.abs();
        if direction == Direction::Left {
            body.pos.x += penetration;
        } else {
            body.pos.x -= penetration;
        }
    } else {
        body.vel.y = -body.vel.y;
        let penetration = ball.radius - difference.y.abs();
        if direction == Direction::Up {
            body.pos.y -= penetration;
        } else {
            body.pos.y += penetration;
        }
    }
}

/// Redirect the ball by where it struck the paddle, keeping its speed
fn resolve_paddle(state: &mut GameState) {
    let ball = &mut state.ball;
    let paddle = &state.paddle;
    if ball.stuck || !ball_box_collision(ball.body.pos, ball.radius, paddle.rect()).is_hit() {
        return;
    }

    let center_board = paddle.pos.x + paddle.size.x / 2.0;
    let distance = (ball.body.pos.x + ball.radius) - center_board;
    let percentage = distance / (paddle.size.x / 2.0);

    let old_velocity = ball.body.vel;
    let vel = &mut ball.body.vel;
    vel.x = INITIAL_BALL_VELOCITY.x * percentage * PADDLE_STRENGTH;
    vel.y = -vel.y.abs();
    *vel = vel.normalize_or_zero() * old_velocity.length();

    ball.stuck = ball.sticky;
    state.events.push(GameEvent::PaddleHit);
}

/// Ball crossed the bottom edge: rebuild the level and start over
fn lose_ball(state: &mut GameState) {
    log::info!("Ball lost on level {}", state.level + 1);
    state.push_event(GameEvent::BallLost);
    clear_powerups(state);
    reset_level(state);
    reset_player(state);
}

/// Rebuild the active level's bricks from its definition
pub fn reset_level(state: &mut GameState) {
    if let Some(level) = state.levels.get_mut(state.level) {
        level.reload();
    }
    state.completion_reported = false;
}

/// Restore paddle and ball to their starting size, position and status
pub fn reset_player(state: &mut GameState) {
    let paddle_pos = GameState::paddle_start(&state.config);
    state.paddle.size = PLAYER_SIZE;
    state.paddle.pos = paddle_pos;
    state.paddle.color = WHITE;
    state
        .ball
        .reset(GameState::ball_start(paddle_pos), INITIAL_BALL_VELOCITY);
}
