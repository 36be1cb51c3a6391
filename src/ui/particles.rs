/// Transient effect particles: simple ballistic motion, lifetime decay,
/// fade-and-shrink rendering.
///
/// The arena is a plain Vec compacted with swap_remove in the update
/// pass, so the per-frame hot path never reallocates.

use crate::config::PARTICLE_GRAVITY;
use crate::domain::geometry::Vec2;

use rand::Rng;
use raylib::prelude::{Color, RaylibDraw, RaylibDrawHandle, Vector2};

struct Particle {
    position: Vec2,
    velocity: Vec2,
    lifetime: f32,
    max_lifetime: f32,
    color: (u8, u8, u8),
}

pub struct ParticleSystem {
    particles: Vec<Particle>,
}

impl ParticleSystem {
    pub fn new() -> Self {
        ParticleSystem { particles: Vec::with_capacity(64) }
    }

    /// Spawn `count` particles at `origin`, each with a uniformly random
    /// direction, speed, and lifetime. Ranges are inclusive, so a
    /// degenerate `(x, x)` range is legal.
    pub fn emit(
        &mut self,
        origin: Vec2,
        color: (u8, u8, u8),
        count: usize,
        speed_range: (f32, f32),
        lifetime_range: (f32, f32),
        rng: &mut impl Rng,
    ) {
        for _ in 0..count {
            let angle = rng.gen_range(0.0..std::f32::consts::TAU);
            let speed = rng.gen_range(speed_range.0..=speed_range.1);
            let lifetime = rng.gen_range(lifetime_range.0..=lifetime_range.1);
            self.particles.push(Particle {
                position: origin,
                velocity: Vec2::new(angle.cos(), angle.sin()) * speed,
                lifetime,
                max_lifetime: lifetime,
                color,
            });
        }
    }

    /// Integrate motion and decay lifetimes. Every particle whose
    /// remaining lifetime reaches zero is removed in this same call.
    pub fn update(&mut self, dt: f32) {
        let mut i = 0;
        while i < self.particles.len() {
            let p = &mut self.particles[i];
            p.position = p.position + p.velocity * dt;
            p.velocity.y += PARTICLE_GRAVITY * dt;
            p.lifetime -= dt;
            if p.lifetime <= 0.0 {
                self.particles.swap_remove(i);
            } else {
                i += 1;
            }
        }
    }

    /// Lifetime ratio maps linearly onto both transparency and radius,
    /// down to nothing at expiry.
    pub fn draw(&self, d: &mut RaylibDrawHandle) {
        for p in &self.particles {
            let ratio = (p.lifetime / p.max_lifetime).clamp(0.0, 1.0);
            let radius = 4.0 * ratio;
            if radius <= 0.0 {
                continue;
            }
            let (r, g, b) = p.color;
            let color = Color::new(r, g, b, (255.0 * ratio) as u8);
            d.draw_circle_v(Vector2::new(p.position.x, p.position.y), radius, color);
        }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    #[cfg(test)]
    fn lifetimes(&self) -> Vec<f32> {
        self.particles.iter().map(|p| p.lifetime).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const WHITE: (u8, u8, u8) = (255, 255, 255);

    #[test]
    fn emit_spawns_exactly_count_particles_at_origin() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut ps = ParticleSystem::new();
        ps.emit(Vec2::new(5.0, 6.0), WHITE, 12, (20.0, 80.0), (0.2, 0.5), &mut rng);
        assert_eq!(ps.len(), 12);
        for p in &ps.particles {
            assert_eq!(p.position, Vec2::new(5.0, 6.0));
            assert!(p.velocity.length() >= 20.0 - 1e-3);
            assert!(p.velocity.length() <= 80.0 + 1e-3);
            assert!(p.lifetime >= 0.2 && p.lifetime <= 0.5);
            assert_eq!(p.lifetime, p.max_lifetime);
        }
    }

    #[test]
    fn degenerate_ranges_expire_in_one_tick() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut ps = ParticleSystem::new();
        ps.emit(Vec2::ZERO, WHITE, 5, (0.0, 0.0), (1.0, 1.0), &mut rng);
        assert_eq!(ps.len(), 5);
        ps.update(1.0);
        assert_eq!(ps.len(), 0);
    }

    #[test]
    fn update_removes_exactly_the_expired() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut ps = ParticleSystem::new();
        ps.emit(Vec2::ZERO, WHITE, 3, (0.0, 0.0), (0.1, 0.1), &mut rng);
        ps.emit(Vec2::ZERO, WHITE, 4, (0.0, 0.0), (2.0, 2.0), &mut rng);

        ps.update(0.5);
        // The short-lived batch is gone; the rest decayed by exactly dt.
        assert_eq!(ps.len(), 4);
        for life in ps.lifetimes() {
            assert!((life - 1.5).abs() < 1e-4);
        }
    }

    #[test]
    fn gravity_pulls_velocity_downward() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut ps = ParticleSystem::new();
        ps.emit(Vec2::ZERO, WHITE, 1, (0.0, 0.0), (10.0, 10.0), &mut rng);
        ps.update(1.0);
        assert!((ps.particles[0].velocity.y - PARTICLE_GRAVITY).abs() < 1e-3);
    }
}
