//! Expanding sound-wave fronts.
//!
//! Claps (and anything else that makes noise) drop a wave into the field; the
//! level then asks which tiles each front has reached. The source of a sound
//! never has to know what it touches.

use crate::config::Config;
use crate::error::Result;
use crate::math::{Rect, Vec2};
use crate::render::{Color, Renderer};

/// Tunables shared by every wave in a field.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WaveSettings {
    pub initial_radius: f32,
    /// Radius growth in px/s.
    pub growth_rate: f32,
    /// A wave is dropped once its radius passes this.
    pub max_radius: f32,
    pub color: Color,
}

impl Default for WaveSettings {
    fn default() -> Self {
        Self {
            initial_radius: 4.0,
            growth_rate: 240.0,
            max_radius: 160.0,
            color: [0.8, 0.9, 1.0, 0.6],
        }
    }
}

impl WaveSettings {
    /// Read `initialRadius`, `growthRate` and `maxRadius`, keeping defaults
    /// for anything absent.
    pub fn from_config(config: &Config) -> Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            initial_radius: config.parse_or("initialRadius", defaults.initial_radius)?,
            growth_rate: config.parse_or("growthRate", defaults.growth_rate)?,
            max_radius: config.parse_or("maxRadius", defaults.max_radius)?,
            color: defaults.color,
        })
    }
}

/// One circular front.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Wave {
    pub center: Vec2,
    pub radius: f32,
    pub growth_rate: f32,
    pub max_radius: f32,
}

impl Wave {
    pub fn is_expired(&self) -> bool {
        self.radius > self.max_radius
    }

    /// True when the circle touches `rect`: the point of `rect` nearest the
    /// center lies within `radius`.
    pub fn touches(&self, rect: &Rect) -> bool {
        let center = self.center.to_glam();
        let nearest = center.clamp(rect.min().to_glam(), rect.max().to_glam());
        center.distance_squared(nearest) <= self.radius * self.radius
    }
}

/// All live waves, in creation order.
#[derive(Clone, Debug, Default)]
pub struct WaveField {
    waves: Vec<Wave>,
    settings: WaveSettings,
}

impl WaveField {
    pub fn new(settings: WaveSettings) -> Self {
        Self {
            waves: Vec::new(),
            settings,
        }
    }

    pub fn settings(&self) -> &WaveSettings {
        &self.settings
    }

    pub fn waves(&self) -> &[Wave] {
        &self.waves
    }

    pub fn len(&self) -> usize {
        self.waves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waves.is_empty()
    }

    /// Start a new wave at `(x, y)`.
    pub fn create_wave(&mut self, x: f32, y: f32) {
        self.waves.push(Wave {
            center: Vec2::new(x, y),
            radius: self.settings.initial_radius,
            growth_rate: self.settings.growth_rate,
            max_radius: self.settings.max_radius,
        });
        log::debug!("wave created at ({x:.1}, {y:.1}), {} live", self.waves.len());
    }

    /// Grow every wave, then drop the ones past their max radius.
    pub fn update_waves(&mut self, dt: f32) {
        for wave in &mut self.waves {
            wave.radius += wave.growth_rate * dt;
        }
        self.waves.retain(|w| !w.is_expired());
    }

    /// Whether any live wave touches `rect`. Waves are checked in creation
    /// order and the first hit wins.
    pub fn collide_sound(&self, rect: &Rect) -> bool {
        self.waves.iter().any(|w| w.touches(rect))
    }

    /// Draw each wave as a ring that fades as it grows.
    pub fn render_waves(&self, renderer: &mut dyn Renderer) {
        for wave in &self.waves {
            let mut color = self.settings.color;
            let life = if wave.max_radius > 0.0 {
                (1.0 - wave.radius / wave.max_radius).clamp(0.0, 1.0)
            } else {
                0.0
            };
            color[3] *= life;
            renderer.draw_ring(wave.center, wave.radius, color);
        }
    }

    /// Drop every wave. Used when a level is torn down.
    pub fn delete_waves(&mut self) {
        self.waves.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{CommandBuffer, DrawCommand};

    fn field() -> WaveField {
        WaveField::new(WaveSettings {
            initial_radius: 10.0,
            growth_rate: 100.0,
            max_radius: 50.0,
            color: [1.0; 4],
        })
    }

    #[test]
    fn new_wave_hits_nearby_tile_immediately() {
        let mut waves = field();
        waves.create_wave(0.0, 0.0);
        assert!(waves.collide_sound(&Rect::new(5, -5, 32, 32)));
        assert!(!waves.collide_sound(&Rect::new(40, 40, 32, 32)));
    }

    #[test]
    fn corner_distance_uses_nearest_point() {
        let wave = Wave {
            center: Vec2::new(0.0, 0.0),
            radius: 10.0,
            growth_rate: 0.0,
            max_radius: 100.0,
        };
        // Nearest corner (6, 8) is exactly 10 away.
        assert!(wave.touches(&Rect::new(6, 8, 10, 10)));
        assert!(!wave.touches(&Rect::new(7, 8, 10, 10)));
        // Center inside the rectangle.
        assert!(wave.touches(&Rect::new(-5, -5, 10, 10)));
    }

    #[test]
    fn waves_expire_past_max_radius() {
        let mut waves = field();
        waves.create_wave(0.0, 0.0);
        let tile = Rect::new(0, 0, 8, 8);

        waves.update_waves(0.3);
        assert_eq!(waves.len(), 1);
        assert!(waves.collide_sound(&tile));

        waves.update_waves(0.2);
        assert!(waves.is_empty());
        assert!(!waves.collide_sound(&tile));
    }

    #[test]
    fn growth_reaches_distant_tiles() {
        let mut waves = field();
        waves.create_wave(0.0, 0.0);
        let far = Rect::new(30, 0, 8, 8);
        assert!(!waves.collide_sound(&far));
        waves.update_waves(0.25);
        assert!(waves.collide_sound(&far));
    }

    #[test]
    fn render_is_noop_when_empty_and_fades_otherwise() {
        let mut waves = field();
        let mut buf = CommandBuffer::new();
        waves.render_waves(&mut buf);
        assert!(buf.commands().is_empty());

        waves.create_wave(1.0, 2.0);
        waves.update_waves(0.15);
        waves.render_waves(&mut buf);
        match buf.commands() {
            [DrawCommand::Ring { center, radius, color }] => {
                assert_eq!(*center, Vec2::new(1.0, 2.0));
                assert!((radius - 25.0).abs() < 1e-4);
                assert!((color[3] - 0.5).abs() < 1e-4);
            }
            other => panic!("unexpected commands {other:?}"),
        }
    }

    #[test]
    fn delete_waves_clears_everything() {
        let mut waves = field();
        waves.create_wave(0.0, 0.0);
        waves.create_wave(10.0, 0.0);
        waves.delete_waves();
        assert!(waves.is_empty());
    }

    #[test]
    fn settings_from_config() {
        let cfg = Config::new("wave").with("maxRadius", 80).with("growthRate", "120.5");
        let settings = WaveSettings::from_config(&cfg).unwrap();
        assert_eq!(settings.max_radius, 80.0);
        assert_eq!(settings.growth_rate, 120.5);
        assert_eq!(settings.initial_radius, WaveSettings::default().initial_radius);
    }
}
