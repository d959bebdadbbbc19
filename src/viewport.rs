use cgmath::{Vector2, vec2};

use crate::error::{Error, Result};

/// Drawable area in pixels. Both dimensions are finite and > 0.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    width: f32,
    height: f32,
}

impl Viewport {
    /// Errors: `Error::InvalidViewport` on a zero, negative or non-finite side.
    pub fn new(width: f32, height: f32) -> Result<Self> {
        if !width.is_finite() || !height.is_finite() || width <= 0.0 || height <= 0.0 {
            return Err(Error::InvalidViewport { width, height });
        }
        Ok(Self { width, height })
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn center(&self) -> Vector2<f32> {
        vec2(self.width * 0.5, self.height * 0.5)
    }

    /// Inclusive bounds check against [0, width] x [0, height].
    pub fn contains(&self, p: Vector2<f32>) -> bool {
        (0.0..=self.width).contains(&p.x) && (0.0..=self.height).contains(&p.y)
    }

    /// True once `p` lies more than `margin` outside the viewport on any side.
    pub fn escaped(&self, p: Vector2<f32>, margin: f32) -> bool {
        p.x < -margin || p.x > self.width + margin || p.y < -margin || p.y > self.height + margin
    }
}
