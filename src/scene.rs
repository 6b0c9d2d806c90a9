use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::config::BrushConfig;
use crate::foundation::core::{CanvasSize, Point, Rgba8};
use crate::foundation::error::{AquarelleError, AquarelleResult};
use crate::render::surface::PaintSurface;
use crate::stroke::bundle::StrokeBundle;

/// A replayable painting: canvas, background, seed, brush tuning and an
/// ordered list of paint events. The JSON form is the batch-rendering
/// input of the CLI.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Scene {
    pub canvas: CanvasSize,
    pub background: Rgba8,
    pub seed: u64, // determinism seed for the whole painting
    #[serde(default)]
    pub brush: BrushConfig,
    pub strokes: Vec<StrokeEvent>,
}

/// One paint event: anchor plus brush color (alpha comes from the brush
/// config, not from here).
#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
pub struct StrokeEvent {
    pub x: f64,
    pub y: f64,
    pub color: Rgba8,
}

impl Scene {
    pub fn validate(&self) -> AquarelleResult<()> {
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(AquarelleError::validation("scene canvas must be non-zero"));
        }
        self.brush.validate()?;
        for (i, s) in self.strokes.iter().enumerate() {
            if !self.canvas.contains(Point::new(s.x, s.y)) {
                return Err(AquarelleError::validation(format!(
                    "stroke {i} anchor ({}, {}) is outside the canvas",
                    s.x, s.y
                )));
            }
        }
        Ok(())
    }
}

/// Render a scene start-to-finish: clear to the background, then paint
/// every stroke in order with a generator seeded from the scene.
#[tracing::instrument(skip(scene), fields(strokes = scene.strokes.len()))]
pub fn render_scene(scene: &Scene) -> AquarelleResult<PaintSurface> {
    scene.validate()?;

    let mut surface = PaintSurface::new(scene.canvas)?;
    surface.clear(scene.background);

    let mut rng = Pcg32::seed_from_u64(scene.seed);
    for stroke in &scene.strokes {
        StrokeBundle::paint(
            &mut surface,
            Point::new(stroke.x, stroke.y),
            stroke.color,
            &scene.brush,
            &mut rng,
        )?;
    }
    Ok(surface)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny_scene() -> Scene {
        Scene {
            canvas: CanvasSize {
                width: 64,
                height: 64,
            },
            background: Rgba8::opaque(250, 247, 240),
            seed: 9,
            // Fixed rounds so every layer has enough vertices to cover
            // pixels, whatever the seed draws.
            brush: BrushConfig {
                rounds: crate::config::RoundsPolicy::Fixed(5),
                ..BrushConfig::default()
            },
            strokes: vec![StrokeEvent {
                x: 32.0,
                y: 32.0,
                color: Rgba8::opaque(40, 70, 160),
            }],
        }
    }

    #[test]
    fn validate_accepts_in_bounds_strokes() {
        tiny_scene().validate().unwrap();
    }

    #[test]
    fn validate_rejects_out_of_bounds_anchor() {
        let mut scene = tiny_scene();
        scene.strokes[0].x = 64.0;
        assert!(scene.validate().is_err());

        scene.strokes[0].x = f64::NAN;
        assert!(scene.validate().is_err());
    }

    #[test]
    fn validate_rejects_bad_brush() {
        let mut scene = tiny_scene();
        scene.brush.radius = -1.0;
        assert!(scene.validate().is_err());
    }

    #[test]
    fn scene_json_round_trips() {
        let scene = tiny_scene();
        let json = serde_json::to_string(&scene).unwrap();
        let back: Scene = serde_json::from_str(&json).unwrap();
        assert_eq!(back.canvas, scene.canvas);
        assert_eq!(back.seed, scene.seed);
        assert_eq!(back.strokes.len(), 1);
        back.validate().unwrap();
    }

    #[test]
    fn empty_scene_renders_flat_background() {
        let mut scene = tiny_scene();
        scene.strokes.clear();
        let surface = render_scene(&scene).unwrap();
        for px in surface.pixels_premul().chunks_exact(4) {
            assert_eq!(px, [250, 247, 240, 255]);
        }
    }

    #[test]
    fn stroked_scene_leaves_pigment() {
        let surface = render_scene(&tiny_scene()).unwrap();
        let paper = [250u8, 247, 240, 255];
        assert!(
            surface
                .pixels_premul()
                .chunks_exact(4)
                .any(|px| px != paper)
        );
    }
}
