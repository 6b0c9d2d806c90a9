use rand::Rng;

use crate::foundation::error::{AquarelleError, AquarelleResult};

/// Inclusive bounds on how many translucent layers one stroke bundle gets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LayerRange {
    pub min: u32,
    pub max: u32,
}

/// Deformation-round policy for a paint event.
///
/// Both variants apply the same round count to every layer in the bundle;
/// they only differ in where that count comes from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundsPolicy {
    /// Same round count for every event.
    Fixed(u32),
    /// Round count drawn once per event from an inclusive range.
    Uniform { min: u32, max: u32 },
}

/// Tunables for the stroke engine.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BrushConfig {
    /// Magnitude of the random midpoint perturbation, in pixels.
    pub radius: f64,
    /// Alpha of every stroke layer (1-2 reads as watercolor; higher turns
    /// the blob into flat paint).
    pub alpha: u8,
    pub layers: LayerRange,
    pub rounds: RoundsPolicy,
}

impl Default for BrushConfig {
    fn default() -> Self {
        Self {
            radius: 32.0,
            alpha: 2,
            layers: LayerRange { min: 8, max: 32 },
            rounds: RoundsPolicy::Uniform { min: 1, max: 8 },
        }
    }
}

impl BrushConfig {
    pub fn validate(&self) -> AquarelleResult<()> {
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(AquarelleError::validation(
                "brush radius must be finite and > 0",
            ));
        }
        if self.alpha == 0 {
            return Err(AquarelleError::validation("brush alpha must be >= 1"));
        }
        if self.layers.min < 1 || self.layers.min > self.layers.max {
            return Err(AquarelleError::validation(
                "brush layer range must satisfy 1 <= min <= max",
            ));
        }
        match self.rounds {
            RoundsPolicy::Fixed(n) if n < 1 => {
                Err(AquarelleError::validation("brush rounds must be >= 1"))
            }
            RoundsPolicy::Uniform { min, max } if min < 1 || min > max => Err(
                AquarelleError::validation("brush rounds range must satisfy 1 <= min <= max"),
            ),
            _ => Ok(()),
        }
    }

    /// Round count for one paint event. Drawn once; every layer in the
    /// bundle receives the same count.
    pub fn rounds_for_event(&self, rng: &mut impl Rng) -> u32 {
        match self.rounds {
            RoundsPolicy::Fixed(n) => n,
            RoundsPolicy::Uniform { min, max } => rng.random_range(min..=max),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn default_config_validates() {
        BrushConfig::default().validate().unwrap();
    }

    #[test]
    fn validate_rejects_bad_fields() {
        let mut c = BrushConfig::default();
        c.radius = 0.0;
        assert!(c.validate().is_err());

        let mut c = BrushConfig::default();
        c.radius = f64::NAN;
        assert!(c.validate().is_err());

        let mut c = BrushConfig::default();
        c.alpha = 0;
        assert!(c.validate().is_err());

        let mut c = BrushConfig::default();
        c.layers = LayerRange { min: 9, max: 3 };
        assert!(c.validate().is_err());

        let mut c = BrushConfig::default();
        c.rounds = RoundsPolicy::Fixed(0);
        assert!(c.validate().is_err());

        let mut c = BrushConfig::default();
        c.rounds = RoundsPolicy::Uniform { min: 4, max: 2 };
        assert!(c.validate().is_err());
    }

    #[test]
    fn fixed_rounds_ignore_rng() {
        let c = BrushConfig {
            rounds: RoundsPolicy::Fixed(5),
            ..BrushConfig::default()
        };
        let mut rng = Pcg32::seed_from_u64(0);
        assert_eq!(c.rounds_for_event(&mut rng), 5);
        assert_eq!(c.rounds_for_event(&mut rng), 5);
    }

    #[test]
    fn uniform_rounds_stay_in_range() {
        let c = BrushConfig {
            rounds: RoundsPolicy::Uniform { min: 1, max: 8 },
            ..BrushConfig::default()
        };
        let mut rng = Pcg32::seed_from_u64(17);
        for _ in 0..1000 {
            let r = c.rounds_for_event(&mut rng);
            assert!((1..=8).contains(&r));
        }
    }

    #[test]
    fn partial_json_uses_defaults() {
        let c: BrushConfig = serde_json::from_str(r#"{ "radius": 12.5 }"#).unwrap();
        assert_eq!(c.radius, 12.5);
        assert_eq!(c.alpha, BrushConfig::default().alpha);
        assert_eq!(c.layers, BrushConfig::default().layers);
    }
}
