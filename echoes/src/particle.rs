//! Explicit-Euler motion shared by every moving thing in the world.

use crate::math::Vec2;

/// Axis-aligned containment box for a particle.
///
/// An axis whose min equals its max is unconstrained.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Bounds {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Constrain only the x axis.
    pub fn horizontal(min_x: f32, max_x: f32) -> Self {
        Self::new(Vec2::new(min_x, 0.0), Vec2::new(max_x, 0.0))
    }
}

/// Position, velocity and acceleration in pixels, px/s and px/s².
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    pub acceleration: Vec2,
    /// Velocity multiplier applied when bouncing off a bound.
    pub damping: f32,
    pub bounds: Bounds,
}

impl Particle {
    pub fn new(position: Vec2) -> Self {
        Self {
            position,
            damping: 1.0,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    #[must_use]
    pub fn with_acceleration(mut self, acceleration: Vec2) -> Self {
        self.acceleration = acceleration;
        self
    }

    #[must_use]
    pub fn with_damping(mut self, damping: f32) -> Self {
        self.damping = damping;
        self
    }

    #[must_use]
    pub fn with_bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = bounds;
        self
    }

    /// Reflect off any bound the particle is touching or past, clamping it
    /// onto that bound.
    pub fn resolve_bounds(&mut self) {
        let Bounds { min, max } = self.bounds;
        if max.x != min.x {
            if self.position.x <= min.x {
                self.velocity.x = -self.damping * self.velocity.x;
                self.position.x = min.x;
            }
            if self.position.x >= max.x {
                self.velocity.x = -self.damping * self.velocity.x;
                self.position.x = max.x;
            }
        }
        if max.y != min.y {
            if self.position.y <= min.y {
                self.velocity.y = -self.damping * self.velocity.y;
                self.position.y = min.y;
            }
            if self.position.y >= max.y {
                self.velocity.y = -self.damping * self.velocity.y;
                self.position.y = max.y;
            }
        }
    }

    /// Advance by `dt` seconds: bounds, then `v += a*dt`, then `p += v*dt`.
    ///
    /// Nothing limits `dt`, so a long frame can carry a fast particle through
    /// thin geometry.
    pub fn update(&mut self, dt: f32) {
        self.resolve_bounds();
        self.velocity += self.acceleration * dt;
        self.position += self.velocity * dt;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn free_fall_integrates_velocity_first() {
        let mut p = Particle::new(Vec2::ZERO).with_acceleration(Vec2::new(0.0, 10.0));
        p.update(0.5);
        assert_eq!(p.velocity, Vec2::new(0.0, 5.0));
        assert_eq!(p.position, Vec2::new(0.0, 2.5));
    }

    #[test]
    fn bounce_off_min_bound_with_damping() {
        let mut p = Particle::new(Vec2::new(-3.0, 0.0))
            .with_velocity(Vec2::new(-20.0, 0.0))
            .with_damping(0.5)
            .with_bounds(Bounds::horizontal(0.0, 100.0));

        p.update(0.1);
        assert_eq!(p.velocity.x, 10.0);
        assert!((p.position.x - 1.0).abs() < 1e-6);

        // Back inside and moving away: no second reflection.
        p.update(0.1);
        assert_eq!(p.velocity.x, 10.0);
        assert!((p.position.x - 2.0).abs() < 1e-6);
    }

    #[test]
    fn bounce_off_max_bound() {
        let mut p = Particle::new(Vec2::new(150.0, 0.0))
            .with_velocity(Vec2::new(40.0, 0.0))
            .with_bounds(Bounds::horizontal(0.0, 100.0));
        p.update(0.0);
        assert_eq!(p.position.x, 100.0);
        assert_eq!(p.velocity.x, -40.0);
    }

    #[test]
    fn degenerate_axis_is_free() {
        let mut p = Particle::new(Vec2::new(0.0, -500.0))
            .with_velocity(Vec2::new(0.0, -10.0))
            .with_bounds(Bounds::horizontal(-10.0, 10.0));
        p.update(1.0);
        assert_eq!(p.position.y, -510.0);
        assert_eq!(p.velocity.y, -10.0);
    }

    #[test]
    fn vertical_bounds_reflect_independently() {
        let mut p = Particle::new(Vec2::new(5.0, 60.0))
            .with_velocity(Vec2::new(3.0, 8.0))
            .with_damping(0.25)
            .with_bounds(Bounds::new(Vec2::new(0.0, 0.0), Vec2::new(50.0, 50.0)));
        p.resolve_bounds();
        assert_eq!(p.position, Vec2::new(5.0, 50.0));
        assert_eq!(p.velocity, Vec2::new(3.0, -2.0));
    }

    proptest! {
        #[test]
        fn zero_dt_unbounded_is_identity(
            x in -1e4f32..1e4, y in -1e4f32..1e4,
            vx in -1e3f32..1e3, vy in -1e3f32..1e3,
            ax in -1e3f32..1e3, ay in -1e3f32..1e3,
        ) {
            let mut p = Particle::new(Vec2::new(x, y))
                .with_velocity(Vec2::new(vx, vy))
                .with_acceleration(Vec2::new(ax, ay));
            let before = p;
            p.update(0.0);
            prop_assert_eq!(p.position, before.position);
            prop_assert_eq!(p.velocity, before.velocity);
        }

        #[test]
        fn at_or_past_bound_reflects_and_clamps(
            overshoot in 0.0f32..500.0,
            vx in -1e3f32..1e3,
            damp in 0.0f32..1.0,
            lower in any::<bool>(),
        ) {
            let x = if lower { -overshoot } else { 100.0 + overshoot };
            let mut p = Particle::new(Vec2::new(x, 0.0))
                .with_velocity(Vec2::new(vx, 0.0))
                .with_damping(damp)
                .with_bounds(Bounds::horizontal(0.0, 100.0));
            p.update(0.0);
            prop_assert_eq!(p.position.x, if lower { 0.0 } else { 100.0 });
            prop_assert_eq!(p.velocity.x, -damp * vx);
        }
    }
}
