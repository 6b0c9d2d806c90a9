use rand::Rng;

use crate::config::BrushConfig;
use crate::foundation::core::{Point, Rgba8};
use crate::foundation::error::{AquarelleError, AquarelleResult};
use crate::render::surface::PaintSurface;
use crate::stroke::layer::StrokeLayer;

/// An ensemble of independently-deforming stroke layers sharing one anchor
/// and color: one visual blob of paint.
///
/// Every layer starts as an identical single-point polygon (independent
/// copies, no aliasing) and diverges as each deformation round draws its
/// own randomness. Rendering them in order onto the accumulating surface
/// produces pigment that is dense near the anchor, where most layers still
/// overlap, and washes out toward the edges where their shapes disagree.
#[derive(Clone, Debug)]
pub struct StrokeBundle {
    layers: Vec<StrokeLayer>,
}

impl StrokeBundle {
    /// Draw the layer count uniformly from the configured inclusive range
    /// and seed that many layers with copies of `[anchor]`.
    pub fn new(
        anchor: Point,
        color: Rgba8,
        config: &BrushConfig,
        rng: &mut impl Rng,
    ) -> AquarelleResult<Self> {
        config.validate()?;
        if !anchor.x.is_finite() || !anchor.y.is_finite() {
            return Err(AquarelleError::geometry("anchor point must be finite"));
        }

        let count = rng.random_range(config.layers.min..=config.layers.max);
        let fill = color.with_alpha(config.alpha);
        let layers = (0..count)
            .map(|_| StrokeLayer::new(&[anchor], fill))
            .collect::<AquarelleResult<Vec<_>>>()?;
        Ok(Self { layers })
    }

    pub fn layers(&self) -> &[StrokeLayer] {
        &self.layers
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Apply `rounds` deformation rounds to every layer. All layers get the
    /// same round count (equal vertex counts afterwards) but consume their
    /// own draws from `rng`, so their shapes diverge.
    pub fn deform_all(&mut self, rounds: u32, radius: f64, rng: &mut impl Rng) {
        for _ in 0..rounds {
            for layer in &mut self.layers {
                layer.deform(radius, rng);
            }
        }
    }

    /// Render layers in construction order; the surface's alpha
    /// accumulation does the rest.
    pub fn render_all(&self, surface: &mut PaintSurface) -> AquarelleResult<()> {
        for layer in &self.layers {
            layer.render(surface)?;
        }
        Ok(())
    }

    /// The single entry point the rest of the application calls: build a
    /// bundle at `anchor`, deform it (round count drawn once per event),
    /// render it. Calling twice with the same arguments paints two
    /// independent overlapping blobs.
    #[tracing::instrument(skip(surface, config, rng))]
    pub fn paint(
        surface: &mut PaintSurface,
        anchor: Point,
        color: Rgba8,
        config: &BrushConfig,
        rng: &mut impl Rng,
    ) -> AquarelleResult<()> {
        let mut bundle = Self::new(anchor, color, config, rng)?;
        bundle.deform_all(config.rounds_for_event(rng), config.radius, rng);
        bundle.render_all(surface)
    }
}
