//! Texture handles
//!
//! The core never touches pixel data. Sprites are referred to by opaque
//! handles handed out by name; the presentation layer maps names to real
//! GPU textures.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::sim::PowerUpKind;

/// Opaque reference to a texture owned by the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TextureHandle(pub u32);

/// Name-keyed handle allocator
#[derive(Debug, Clone, Default)]
pub struct TextureRegistry {
    by_name: HashMap<String, TextureHandle>,
    names: Vec<String>,
}

impl TextureRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle for `name`, allocating a new one on first use
    pub fn handle(&mut self, name: &str) -> TextureHandle {
        if let Some(&handle) = self.by_name.get(name) {
            return handle;
        }
        let handle = TextureHandle(self.names.len() as u32);
        self.names.push(name.to_string());
        self.by_name.insert(name.to_string(), handle);
        handle
    }

    /// Reverse lookup for the renderer
    pub fn name_of(&self, handle: TextureHandle) -> Option<&str> {
        self.names.get(handle.0 as usize).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Every texture the simulation assigns to an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Textures {
    pub background: TextureHandle,
    pub paddle: TextureHandle,
    pub ball: TextureHandle,
    pub block: TextureHandle,
    pub block_solid: TextureHandle,
    pub particle: TextureHandle,
    pub powerups: [TextureHandle; PowerUpKind::ALL.len()],
}

impl Textures {
    /// Resolve the fixed set of sprite names against a registry
    pub fn resolve(registry: &mut TextureRegistry) -> Self {
        Self {
            background: registry.handle("background"),
            paddle: registry.handle("paddle"),
            ball: registry.handle("face"),
            block: registry.handle("block"),
            block_solid: registry.handle("block_solid"),
            particle: registry.handle("particle"),
            powerups: PowerUpKind::ALL.map(|kind| registry.handle(kind.texture_name())),
        }
    }

    pub fn powerup(&self, kind: PowerUpKind) -> TextureHandle {
        self.powerups[kind.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_name_same_handle() {
        let mut registry = TextureRegistry::new();
        let a = registry.handle("paddle");
        let b = registry.handle("face");
        assert_ne!(a, b);
        assert_eq!(registry.handle("paddle"), a);
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.name_of(b), Some("face"));
    }

    #[test]
    fn test_resolve_assigns_distinct_powerup_textures() {
        let mut registry = TextureRegistry::new();
        let textures = Textures::resolve(&mut registry);
        assert_eq!(registry.len(), 6 + PowerUpKind::ALL.len());
        assert_eq!(
            registry.name_of(textures.powerup(PowerUpKind::Chaos)),
            Some("powerup_chaos")
        );
    }
}
