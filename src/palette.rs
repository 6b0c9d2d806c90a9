use crate::foundation::core::Rgba8;
use crate::foundation::error::{AquarelleError, AquarelleResult};

/// Fixed note-to-swatch remapping (circle of fifths), so harmonically
/// adjacent pitches land on neighboring swatches.
const NOTE_TO_SWATCH: [usize; 12] = [0, 7, 2, 9, 4, 11, 6, 1, 8, 3, 10, 5];

/// An ordered set of brush colors.
///
/// Doubles as the hit-testing model for a horizontal palette strip: the
/// strip is split into equal-width swatches, one per color.
#[derive(Clone, Debug)]
pub struct Palette {
    colors: Vec<Rgba8>,
}

impl Default for Palette {
    /// Twelve pigment-leaning colors, one per pitch class.
    fn default() -> Self {
        Self {
            colors: vec![
                Rgba8::opaque(172, 36, 48),  // crimson
                Rgba8::opaque(224, 82, 43),  // vermilion
                Rgba8::opaque(236, 144, 42), // orange ochre
                Rgba8::opaque(242, 205, 70), // cadmium yellow
                Rgba8::opaque(130, 166, 61), // sap green
                Rgba8::opaque(28, 120, 98),  // viridian
                Rgba8::opaque(46, 138, 186), // cerulean
                Rgba8::opaque(36, 68, 156),  // ultramarine
                Rgba8::opaque(94, 58, 148),  // violet
                Rgba8::opaque(176, 62, 140), // magenta
                Rgba8::opaque(138, 84, 50),  // burnt sienna
                Rgba8::opaque(72, 82, 94),   // payne's grey
            ],
        }
    }
}

impl Palette {
    pub fn new(colors: Vec<Rgba8>) -> AquarelleResult<Self> {
        if colors.is_empty() {
            return Err(AquarelleError::validation(
                "palette needs at least one color",
            ));
        }
        Ok(Self { colors })
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Modular lookup; any index maps to some swatch.
    pub fn color(&self, idx: usize) -> Rgba8 {
        self.colors[idx % self.colors.len()]
    }

    /// Swatch index under `x` on a palette strip of `strip_width` pixels
    /// split into equal-width buckets. `None` when the click misses the
    /// strip entirely (callers leave the brush color unchanged).
    pub fn swatch_at(&self, x: f64, strip_width: f64) -> Option<usize> {
        if !x.is_finite() || !strip_width.is_finite() || strip_width <= 0.0 {
            return None;
        }
        if x < 0.0 || x >= strip_width {
            return None;
        }
        let idx = (x / strip_width * self.colors.len() as f64) as usize;
        Some(idx.min(self.colors.len() - 1))
    }

    /// Palette color for a pitch class (C = 0), routed through the fixed
    /// note-to-swatch table.
    pub fn color_for_pitch_class(&self, pc: usize) -> Rgba8 {
        self.color(NOTE_TO_SWATCH[pc % 12])
    }
}
