//! Render-ready view of the simulation
//!
//! The core never draws. Each frame it hands an external sprite renderer a
//! flat list of instances plus the post-processing flags.

pub mod sprite;

pub use sprite::{DrawInfo, Drawable, Frame, SpriteInstance, build_frame};
