//! Particle field state and per-frame update
//!
//! A fixed-size set of point masses drifting inside the viewport. Each frame
//! the pointer pushes nearby particles away, then velocities are integrated
//! and reflected at the viewport edges.

use rand::Rng;
use std::ops::Range;
use tracing::{debug, trace};

use super::config::{FieldConfig, INTERACTION_RADIUS};

/// One simulated point
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    /// Render radius
    pub radius: f64,
    /// Weight applied to pointer repulsion displacement
    pub density: f64,
}

impl Particle {
    /// Random particle inside a `width` x `height` viewport
    pub fn random<R: Rng + ?Sized>(rng: &mut R, width: f64, height: f64, config: &FieldConfig) -> Self {
        let speed = -config.max_speed..config.max_speed;
        Self {
            x: sample(rng, 0.0..width),
            y: sample(rng, 0.0..height),
            vx: sample(rng, speed.clone()),
            vy: sample(rng, speed),
            radius: sample(rng, config.radius_range.clone()),
            density: sample(rng, config.density_range.clone()),
        }
    }

    /// Displace away from the pointer.
    ///
    /// Displacement is `direction * force * density` with a linear falloff
    /// `force = (radius - distance) / radius`. Returns the applied (dx, dy).
    pub fn repel(&mut self, pointer: (f64, f64), radius: f64) -> (f64, f64) {
        let dx = pointer.0 - self.x;
        let dy = pointer.1 - self.y;
        let distance = (dx * dx + dy * dy).sqrt();

        // Pointer exactly on the particle: direction is undefined, no force
        if distance == 0.0 || !distance.is_finite() || distance >= radius {
            return (0.0, 0.0);
        }

        let force = (radius - distance) / radius;
        let shift_x = dx / distance * force * self.density;
        let shift_y = dy / distance * force * self.density;
        self.x -= shift_x;
        self.y -= shift_y;
        (shift_x, shift_y)
    }

    /// Integrate velocity, then reflect off the viewport edges.
    ///
    /// Position is never clamped. Velocity flips only while heading further
    /// out, so a particle left outside (viewport shrink, pointer push) walks
    /// back in instead of oscillating in place.
    pub fn integrate(&mut self, width: f64, height: f64) {
        self.x += self.vx;
        self.y += self.vy;

        if (self.x < 0.0 && self.vx < 0.0) || (self.x > width && self.vx > 0.0) {
            self.vx = -self.vx;
        }
        if (self.y < 0.0 && self.vy < 0.0) || (self.y > height && self.vy > 0.0) {
            self.vy = -self.vy;
        }
    }
}

/// Uniform sample that tolerates empty ranges (returns the start)
fn sample<R: Rng + ?Sized>(rng: &mut R, range: Range<f64>) -> f64 {
    if range.start < range.end {
        rng.gen_range(range)
    } else {
        range.start
    }
}

/// Ambient host state read by the simulator: viewport size and pointer
#[derive(Clone, Debug, PartialEq)]
pub struct FieldContext {
    pub width: f64,
    pub height: f64,
    /// Last known pointer position, `None` until the pointer first moves
    pub pointer: Option<(f64, f64)>,
    pub interaction_radius: f64,
}

impl Default for FieldContext {
    fn default() -> Self {
        Self {
            width: 0.0,
            height: 0.0,
            pointer: None,
            interaction_radius: INTERACTION_RADIUS,
        }
    }
}

impl FieldContext {
    pub fn new(width: f64, height: f64) -> Self {
        let mut ctx = Self::default();
        ctx.resize(width, height);
        ctx
    }

    /// Viewport size change; non-finite or negative sizes become 0
    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = sanitize_extent(width);
        self.height = sanitize_extent(height);
        debug!(width = self.width, height = self.height, "Viewport resized");
    }

    /// Record a pointer move; non-finite coordinates are ignored
    pub fn pointer_moved(&mut self, x: f64, y: f64) {
        if x.is_finite() && y.is_finite() {
            self.pointer = Some((x, y));
        }
    }
}

fn sanitize_extent(v: f64) -> f64 {
    if v.is_finite() && v > 0.0 {
        v
    } else {
        0.0
    }
}

/// The particle collection
#[derive(Clone, Debug, Default)]
pub struct ParticleField {
    particles: Vec<Particle>,
}

impl ParticleField {
    /// Build `count` random particles inside the context viewport
    pub fn initialize<R: Rng + ?Sized>(
        rng: &mut R,
        count: usize,
        ctx: &FieldContext,
        config: &FieldConfig,
    ) -> Self {
        let particles = (0..count)
            .map(|_| Particle::random(rng, ctx.width, ctx.height, config))
            .collect();
        debug!(count, width = ctx.width, height = ctx.height, "Particle field initialized");
        Self { particles }
    }

    /// Field from explicit particles
    pub fn from_particles(particles: Vec<Particle>) -> Self {
        Self { particles }
    }

    /// Replace the whole collection with fresh random particles
    pub fn reinitialize<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        count: usize,
        ctx: &FieldContext,
        config: &FieldConfig,
    ) {
        *self = Self::initialize(rng, count, ctx, config);
    }

    /// Advance every particle by one frame, in collection order
    pub fn advance(&mut self, ctx: &FieldContext) {
        for (idx, p) in self.particles.iter_mut().enumerate() {
            if let Some(pointer) = ctx.pointer {
                let (sx, sy) = p.repel(pointer, ctx.interaction_radius);
                if sx != 0.0 || sy != 0.0 {
                    trace!(idx, sx, sy, "Pointer repulsion");
                }
            }
            p.integrate(ctx.width, ctx.height);
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn particle(x: f64, y: f64, vx: f64, vy: f64) -> Particle {
        Particle {
            x,
            y,
            vx,
            vy,
            radius: 2.0,
            density: 10.0,
        }
    }

    fn dist(p: &Particle, q: (f64, f64)) -> f64 {
        ((p.x - q.0).powi(2) + (p.y - q.1).powi(2)).sqrt()
    }

    #[test]
    fn test_initialize_ranges() {
        let mut rng = StdRng::seed_from_u64(7);
        let ctx = FieldContext::new(800.0, 600.0);
        let config = FieldConfig::default();
        let field = ParticleField::initialize(&mut rng, 60, &ctx, &config);

        assert_eq!(field.len(), 60);
        for p in field.particles() {
            assert!((0.0..800.0).contains(&p.x));
            assert!((0.0..600.0).contains(&p.y));
            assert!((-0.4..0.4).contains(&p.vx));
            assert!((-0.4..0.4).contains(&p.vy));
            assert!((1.0..3.0).contains(&p.radius));
            assert!((1.0..31.0).contains(&p.density));
        }
    }

    #[test]
    fn test_initialize_on_empty_viewport() {
        let mut rng = StdRng::seed_from_u64(1);
        let ctx = FieldContext::default();
        let field = ParticleField::initialize(&mut rng, 5, &ctx, &FieldConfig::default());
        assert!(field.particles().iter().all(|p| p.x == 0.0 && p.y == 0.0));
    }

    #[test]
    fn test_reinitialize_replaces_collection() {
        let mut rng = StdRng::seed_from_u64(3);
        let ctx = FieldContext::new(100.0, 100.0);
        let config = FieldConfig::default();
        let mut field = ParticleField::initialize(&mut rng, 10, &ctx, &config);
        let before = field.particles().to_vec();
        field.reinitialize(&mut rng, 4, &ctx, &config);
        assert_eq!(field.len(), 4);
        assert_ne!(field.particles(), &before[..4]);
    }

    #[test]
    fn test_positions_stay_finite() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut ctx = FieldContext::new(640.0, 480.0);
        let config = FieldConfig::default();
        let mut field = ParticleField::initialize(&mut rng, 60, &ctx, &config);

        for frame in 0..5000 {
            // Sweep the pointer around, including landing on particles
            if frame % 50 == 0 {
                let target = field.particles()[frame / 50 % 60];
                ctx.pointer_moved(target.x, target.y);
            } else {
                ctx.pointer_moved((frame % 640) as f64, (frame % 480) as f64);
            }
            field.advance(&ctx);
        }

        for p in field.particles() {
            assert!(p.x.is_finite() && p.y.is_finite());
            assert!(p.vx.is_finite() && p.vy.is_finite());
        }
    }

    #[test]
    fn test_right_edge_reflection() {
        let ctx = FieldContext::new(100.0, 100.0);
        let mut field = ParticleField::from_particles(vec![particle(99.8, 50.0, 0.4, 0.0)]);

        field.advance(&ctx);
        let p = field.particles()[0];
        assert!(p.x > 100.0, "crossed the edge unclamped");
        assert_eq!(p.vx, -0.4);

        field.advance(&ctx);
        let q = field.particles()[0];
        assert!(q.x < p.x, "moves left after reflection");
        assert_eq!(q.vx, -0.4);
    }

    #[test]
    fn test_returns_after_viewport_shrink() {
        let mut ctx = FieldContext::new(1000.0, 1000.0);
        let mut field = ParticleField::from_particles(vec![particle(800.0, 500.0, 0.3, 0.0)]);
        ctx.resize(500.0, 1000.0);

        for _ in 0..2000 {
            field.advance(&ctx);
        }
        let p = field.particles()[0];
        assert!((0.0..=500.0).contains(&p.x), "still outside at x = {}", p.x);
    }

    #[test]
    fn test_returns_after_pointer_push_past_edge() {
        let mut ctx = FieldContext::new(1000.0, 1000.0);
        let mut p = particle(995.0, 500.0, 0.3, 0.0);
        p.density = 30.0;
        let mut field = ParticleField::from_particles(vec![p]);

        ctx.pointer_moved(980.0, 500.0);
        for _ in 0..5 {
            field.advance(&ctx);
        }
        assert!(field.particles()[0].x > 1000.0, "pushed past the edge");

        ctx.pointer = None;
        for _ in 0..2000 {
            field.advance(&ctx);
        }
        let p = field.particles()[0];
        assert!((0.0..=1000.0).contains(&p.x), "still outside at x = {}", p.x);
        assert!(p.vx < 0.0);
    }

    #[test]
    fn test_reflection_preserves_speed() {
        let ctx = FieldContext::new(50.0, 50.0);
        let mut field = ParticleField::from_particles(vec![particle(0.1, 0.1, -0.3, -0.2)]);
        field.advance(&ctx);
        let p = field.particles()[0];
        assert_eq!((p.vx, p.vy), (0.3, 0.2));
    }

    #[test]
    fn test_pointer_repulsion_moves_away() {
        let mut ctx = FieldContext::new(1000.0, 1000.0);
        ctx.pointer_moved(500.0, 500.0);
        let offsets = [(10.0, 0.0), (-40.0, 30.0), (0.0, -149.0), (100.0, 100.0)];

        for (ox, oy) in offsets {
            let mut field =
                ParticleField::from_particles(vec![particle(500.0 + ox, 500.0 + oy, 0.0, 0.0)]);
            let before = dist(&field.particles()[0], (500.0, 500.0));
            field.advance(&ctx);
            let after = dist(&field.particles()[0], (500.0, 500.0));
            assert!(after > before, "offset ({ox}, {oy}): {after} <= {before}");
        }
    }

    #[test]
    fn test_repulsion_force_falloff() {
        let mut near = particle(490.0, 500.0, 0.0, 0.0);
        let mut far = particle(400.0, 500.0, 0.0, 0.0);
        let (near_dx, _) = near.repel((500.0, 500.0), 150.0);
        let (far_dx, _) = far.repel((500.0, 500.0), 150.0);
        // force = (150 - 10) / 150 * density 10
        assert!((near_dx - 140.0 / 150.0 * 10.0).abs() < 1e-9);
        assert!(near_dx.abs() > far_dx.abs());
    }

    #[test]
    fn test_no_repulsion_outside_radius() {
        let mut p = particle(0.0, 0.0, 0.0, 0.0);
        assert_eq!(p.repel((150.0, 0.0), 150.0), (0.0, 0.0));
        assert_eq!(p.repel((300.0, 300.0), 150.0), (0.0, 0.0));
        assert_eq!((p.x, p.y), (0.0, 0.0));
    }

    #[test]
    fn test_pointer_on_particle_is_zero_force() {
        let mut p = particle(20.0, 20.0, 0.0, 0.0);
        assert_eq!(p.repel((20.0, 20.0), 150.0), (0.0, 0.0));
        assert_eq!((p.x, p.y), (20.0, 20.0));
    }

    #[test]
    fn test_no_pointer_only_integrates() {
        let ctx = FieldContext::new(100.0, 100.0);
        let mut field = ParticleField::from_particles(vec![particle(10.0, 10.0, 0.25, -0.25)]);
        field.advance(&ctx);
        assert_eq!(field.particles()[0].x, 10.25);
        assert_eq!(field.particles()[0].y, 9.75);
    }

    #[test]
    fn test_resize_sanitizes() {
        let mut ctx = FieldContext::new(10.0, 10.0);
        ctx.resize(f64::NAN, -5.0);
        assert_eq!((ctx.width, ctx.height), (0.0, 0.0));
        ctx.pointer_moved(f64::INFINITY, 1.0);
        assert_eq!(ctx.pointer, None);
    }
}
