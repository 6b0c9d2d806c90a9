use crate::foundation::error::{AquarelleError, AquarelleResult};

pub use kurbo::{BezPath, Point, Rect, Vec2};

/// Raster dimensions of a paint surface, in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
}

impl CanvasSize {
    pub fn new(width: u32, height: u32) -> AquarelleResult<Self> {
        if width == 0 || height == 0 {
            return Err(AquarelleError::validation("canvas dimensions must be > 0"));
        }
        Ok(Self { width, height })
    }

    pub fn pixel_count(self) -> usize {
        (self.width as usize).saturating_mul(self.height as usize)
    }

    pub fn contains(self, p: Point) -> bool {
        p.x.is_finite()
            && p.y.is_finite()
            && p.x >= 0.0
            && p.y >= 0.0
            && p.x < f64::from(self.width)
            && p.y < f64::from(self.height)
    }
}

/// Straight-alpha RGBA8 color. Paint layers carry a very low alpha
/// (1-2 of 255); opacity builds up where deformed layers overlap.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Same color with a replaced alpha channel.
    pub fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Premultiplied byte form (r,g,b scaled by a, round-half-up).
    pub fn premul(self) -> [u8; 4] {
        fn premul(c: u8, a: u8) -> u8 {
            let c = u16::from(c);
            let a = u16::from(a);
            (((c * a) + 127) / 255) as u8
        }

        [
            premul(self.r, self.a),
            premul(self.g, self.a),
            premul(self.b, self.a),
            self.a,
        ]
    }
}

/// True when every coordinate in `pts` is finite.
pub fn all_finite(pts: &[Point]) -> bool {
    pts.iter().all(|p| p.x.is_finite() && p.y.is_finite())
}
