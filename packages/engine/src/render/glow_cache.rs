//! Pre-rendered glow sprites keyed by color and scale bucket.
//!
//! Building a radial gradient per spark per frame is the expensive part of
//! a frame; with 10 colors and 5 scale buckets the cache tops out at 50
//! sprites. Owned by one renderer and dropped with it.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use crate::core::RendererResult;

use super::surface::{GlowSpec, Surface};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GlowKey {
    pub color: u8,
    /// Scale in tenths
    pub scale_bucket: u8,
}

impl GlowKey {
    pub const fn new(color: u8, scale_bucket: u8) -> Self {
        Self { color, scale_bucket }
    }

    #[inline]
    pub fn scale(&self) -> f32 {
        self.scale_bucket as f32 / 10.0
    }
}

pub struct GlowCache<T> {
    sprites: HashMap<GlowKey, T>,
    pixel_density: f64,
}

impl<T> GlowCache<T> {
    pub fn new() -> Self {
        Self {
            sprites: HashMap::new(),
            pixel_density: 1.0,
        }
    }

    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }

    pub fn contains(&self, key: GlowKey) -> bool {
        self.sprites.contains_key(&key)
    }

    pub fn clear(&mut self) {
        self.sprites.clear();
    }

    /// Cached sprite for `key`, rendering it through `surface` on a miss.
    ///
    /// Sprites are rasterized at a fixed pixel density, so a density change
    /// drops everything cached so far.
    pub fn get_or_create<S, F>(
        &mut self,
        key: GlowKey,
        pixel_density: f64,
        surface: &mut S,
        spec: F,
    ) -> RendererResult<&T>
    where
        S: Surface<Sprite = T>,
        F: FnOnce() -> GlowSpec,
    {
        if self.pixel_density != pixel_density {
            self.sprites.clear();
            self.pixel_density = pixel_density;
        }
        match self.sprites.entry(key) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => {
                let sprite = surface.create_glow_sprite(&spec())?;
                Ok(entry.insert(sprite))
            }
        }
    }
}

impl<T> Default for GlowCache<T> {
    fn default() -> Self {
        Self::new()
    }
}
