use std::sync::mpsc;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::audio::pitch::{PitchDetector, pitch_class};
use crate::config::BrushConfig;
use crate::foundation::core::{CanvasSize, Point, Rgba8};
use crate::foundation::error::AquarelleResult;
use crate::palette::Palette;
use crate::render::surface::PaintSurface;
use crate::stroke::bundle::StrokeBundle;

/// Tracked-limb positions below this confidence are ignored.
pub const LIMB_CONFIDENCE_THRESHOLD: f64 = 0.60;

/// A one-shot input delivered by an external collaborator (pointer, pose
/// tracker, palette widget, microphone). Events carry data, not failures:
/// a collaborator that dies simply stops sending.
#[derive(Clone, Debug)]
pub enum InputEvent {
    Pointer { x: f64, y: f64 },
    Limb { x: f64, y: f64, confidence: f64 },
    PaletteClick { x: f64 },
    AudioBuffer(Vec<f32>),
}

/// Construction options for a [`PaintSession`].
#[derive(Clone, Debug)]
pub struct SessionOptions {
    pub canvas: CanvasSize,
    pub background: Rgba8,
    pub brush: BrushConfig,
    pub palette: Palette,
    /// Frame rate of the driving loop, used by the idle recolor timer.
    pub frame_rate: u32,
    /// Re-pick a random swatch every U(1, frame_rate) frames when enabled
    /// (the "wandering color" variant).
    pub idle_recolor: bool,
    /// Sample rate of incoming audio buffers.
    pub sample_rate_hz: f64,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            canvas: CanvasSize {
                width: 800,
                height: 600,
            },
            background: Rgba8::opaque(250, 247, 240),
            brush: BrushConfig::default(),
            palette: Palette::default(),
            frame_rate: 24,
            idle_recolor: false,
            sample_rate_hz: 44_100.0,
        }
    }
}

/// The single-threaded controller that owns all mutable paint state.
///
/// External collaborators push [`InputEvent`]s through the channel from
/// wherever they run; the session drains the channel once per frame tick,
/// keeps only the latest known state of each kind, and paints from that
/// state. Stale events are overwritten, never queued and replayed, so a
/// slow frame skips work instead of falling behind.
pub struct PaintSession {
    surface: PaintSurface,
    palette: Palette,
    brush: BrushConfig,
    detector: PitchDetector,
    rng: Pcg32,
    inbox: mpsc::Receiver<InputEvent>,
    frame_rate: u32,
    idle_recolor: bool,

    color: Rgba8,
    anchor: Option<Point>,
    pending_audio: Option<Vec<f32>>,
    recolor_in: u32,
}

impl PaintSession {
    /// Build a session and the sender half collaborators push events into.
    /// The surface starts cleared to the configured background.
    pub fn new(
        options: SessionOptions,
        seed: u64,
    ) -> AquarelleResult<(Self, mpsc::Sender<InputEvent>)> {
        options.brush.validate()?;
        let mut surface = PaintSurface::new(options.canvas)?;
        surface.clear(options.background);

        let mut rng = Pcg32::seed_from_u64(seed);
        let frame_rate = options.frame_rate.max(1);
        let recolor_in = rng.random_range(1..=frame_rate);
        let color = options.palette.color(0);

        let (tx, rx) = mpsc::channel();
        let session = Self {
            surface,
            palette: options.palette,
            brush: options.brush,
            detector: PitchDetector::new(options.sample_rate_hz)?,
            rng,
            inbox: rx,
            frame_rate,
            idle_recolor: options.idle_recolor,
            color,
            anchor: None,
            pending_audio: None,
            recolor_in,
        };
        Ok((session, tx))
    }

    pub fn color(&self) -> Rgba8 {
        self.color
    }

    pub fn set_color(&mut self, color: Rgba8) {
        self.color = color;
    }

    pub fn surface(&self) -> &PaintSurface {
        &self.surface
    }

    /// Hand the accumulated painting over (for export).
    pub fn into_surface(self) -> PaintSurface {
        self.surface
    }

    /// Paint one blob at `point` with the current brush color.
    pub fn paint_at(&mut self, point: Point) -> AquarelleResult<()> {
        StrokeBundle::paint(
            &mut self.surface,
            point,
            self.color,
            &self.brush,
            &mut self.rng,
        )
    }

    /// One frame tick: drain the inbox into latest-known state, apply
    /// color sources (palette clicks, detected pitch, idle recolor timer),
    /// then paint at the latest anchor if there is one. Synchronous;
    /// completes within the tick.
    pub fn tick(&mut self) -> AquarelleResult<()> {
        self.drain_inbox();

        if let Some(buf) = self.pending_audio.take()
            && let Some(freq) = self.detector.estimate(&buf)
        {
            self.color = self.palette.color_for_pitch_class(pitch_class(freq));
        }

        if self.idle_recolor {
            self.recolor_in = self.recolor_in.saturating_sub(1);
            if self.recolor_in == 0 {
                let idx = self.rng.random_range(0..self.palette.len());
                self.color = self.palette.color(idx);
                self.recolor_in = self.rng.random_range(1..=self.frame_rate);
            }
        }

        if let Some(anchor) = self.anchor {
            self.paint_at(anchor)?;
        }
        Ok(())
    }

    fn drain_inbox(&mut self) {
        let canvas = self.surface.size();
        while let Ok(event) = self.inbox.try_recv() {
            match event {
                InputEvent::Pointer { x, y } => {
                    let p = Point::new(x, y);
                    if canvas.contains(p) {
                        self.anchor = Some(p);
                    }
                }
                InputEvent::Limb { x, y, confidence } => {
                    let p = Point::new(x, y);
                    if confidence >= LIMB_CONFIDENCE_THRESHOLD && canvas.contains(p) {
                        self.anchor = Some(p);
                    }
                }
                InputEvent::PaletteClick { x } => {
                    let strip = f64::from(canvas.width);
                    if let Some(idx) = self.palette.swatch_at(x, strip) {
                        self.color = self.palette.color(idx);
                    }
                }
                InputEvent::AudioBuffer(buf) => {
                    self.pending_audio = Some(buf);
                }
            }
        }
    }
}
