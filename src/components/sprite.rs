//! Displayed image of an entity.
//!
//! A [`Sprite`] is identified by an image key and its size in pixels. The
//! behavior layer swaps `image` to animate; it never touches the pixels.
//! Bounding edges are computed from the entity's centre position.

use bevy_ecs::prelude::Component;
use glam::Vec2;

/// Key identifying an image (a frame) in the [`ImageStore`](crate::resources::imagestore::ImageStore).
pub type ImageKey = String;

#[derive(Component, Clone, Debug, PartialEq)]
pub struct Sprite {
    pub image: ImageKey,
    pub width: f32,
    pub height: f32,
}

impl Sprite {
    pub fn new(image: impl Into<ImageKey>, width: f32, height: f32) -> Self {
        Self {
            image: image.into(),
            width,
            height,
        }
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Swap the displayed image. Returns `true` when the image actually changed.
    pub fn set_image(&mut self, image: &str) -> bool {
        if self.image == image {
            return false;
        }
        self.image = image.to_string();
        true
    }

    /// Axis-aligned bounds for a sprite centred at `center`.
    pub fn bounds(&self, center: Vec2) -> Bounds {
        Bounds::from_center(center, self.size())
    }
}

/// Edges of an axis-aligned box in world pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Bounds {
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        let half = size * 0.5;
        Self {
            left: center.x - half.x,
            top: center.y - half.y,
            right: center.x + half.x,
            bottom: center.y + half.y,
        }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(
            (self.left + self.right) * 0.5,
            (self.top + self.bottom) * 0.5,
        )
    }

    /// True when this box and `other` share interior area.
    pub fn overlaps(&self, other: &Bounds) -> bool {
        self.left < other.right
            && self.right > other.left
            && self.top < other.bottom
            && self.bottom > other.top
    }
}
