//! Frame tick: advance then render, with per-frame failure containment
//!
//! The host calls [`Simulation::tick`] once per display refresh. A failed
//! frame is logged and counted; the next tick runs normally.

use rand::rngs::SmallRng;
use rand::SeedableRng;
use tracing::{error, info};

use super::config::FieldConfig;
use super::particle::{FieldContext, ParticleField};
use super::render::render_field;
use super::surface::Surface;

/// Running counters for the frame loop
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub frames: u64,
    pub failed_frames: u64,
    /// Connection lines drawn by the last successful frame
    pub last_edges: usize,
}

/// Particle field together with its ambient context and tuning
pub struct Simulation {
    pub ctx: FieldContext,
    field: ParticleField,
    config: FieldConfig,
    rng: SmallRng,
    stats: FrameStats,
}

impl Simulation {
    /// Simulation seeded from OS entropy
    pub fn new(config: FieldConfig, width: f64, height: f64) -> Self {
        Self::with_rng(config, width, height, SmallRng::from_entropy())
    }

    /// Deterministic simulation for tests and headless runs
    pub fn seeded(config: FieldConfig, width: f64, height: f64, seed: u64) -> Self {
        Self::with_rng(config, width, height, SmallRng::seed_from_u64(seed))
    }

    fn with_rng(config: FieldConfig, width: f64, height: f64, mut rng: SmallRng) -> Self {
        let mut ctx = FieldContext::new(width, height);
        ctx.interaction_radius = config.interaction_radius;
        let field = ParticleField::initialize(&mut rng, config.particle_count, &ctx, &config);
        info!(
            particles = field.len(),
            width = ctx.width,
            height = ctx.height,
            "Simulation started"
        );
        Self {
            ctx,
            field,
            config,
            rng,
            stats: FrameStats::default(),
        }
    }

    /// Rebuild the particle set for the current viewport
    pub fn reinitialize(&mut self) {
        self.field
            .reinitialize(&mut self.rng, self.config.particle_count, &self.ctx, &self.config);
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.ctx.resize(width, height);
    }

    pub fn pointer_moved(&mut self, x: f64, y: f64) {
        self.ctx.pointer_moved(x, y);
    }

    /// One frame: advance every particle, then draw.
    ///
    /// Never fails; a surface error skips the rest of the frame's drawing.
    pub fn tick<S: Surface + ?Sized>(&mut self, surface: &mut S) -> FrameStats {
        self.stats.frames += 1;
        self.field.advance(&self.ctx);

        match render_field(&self.field, &self.config, surface) {
            Ok(edges) => self.stats.last_edges = edges,
            Err(e) => {
                self.stats.failed_frames += 1;
                error!(error = %e, frame = self.stats.frames, "Animation frame failed");
            }
        }
        self.stats
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn stats(&self) -> FrameStats {
        self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::surface::{RecordingSurface, Surface};

    #[test]
    fn test_tick_advances_and_draws() {
        let mut sim = Simulation::seeded(FieldConfig::default(), 800.0, 600.0, 11);
        let mut surface = RecordingSurface::new(800.0, 600.0);
        let before = sim.field().particles().to_vec();

        let stats = sim.tick(&mut surface);
        assert_eq!(stats.frames, 1);
        assert_eq!(stats.failed_frames, 0);
        assert_eq!(surface.circles().count(), 60);
        assert_eq!(surface.lines().count(), stats.last_edges);
        assert_ne!(sim.field().particles(), &before[..]);
    }

    #[test]
    fn test_failed_frame_keeps_running() {
        let mut sim = Simulation::seeded(FieldConfig::default(), 800.0, 600.0, 5);
        // Clear plus three circles, then every primitive fails
        let mut surface = RecordingSurface::new(800.0, 600.0).failing_after(4);

        for _ in 0..10 {
            sim.tick(&mut surface);
        }
        let stats = sim.stats();
        assert_eq!(stats.frames, 10);
        assert_eq!(stats.failed_frames, 10);

        // Simulation state still advanced on failed frames
        assert!(sim
            .field()
            .particles()
            .iter()
            .all(|p| p.x.is_finite() && p.y.is_finite()));
    }

    #[test]
    fn test_resize_keeps_particles_in_place() {
        let mut sim = Simulation::seeded(FieldConfig::default(), 800.0, 600.0, 21);
        let mut surface = RecordingSurface::new(800.0, 600.0);
        sim.tick(&mut surface);
        let before = sim.field().particles().to_vec();

        surface.resize(200.0, 150.0);
        sim.resize(200.0, 150.0);
        assert_eq!((sim.ctx.width, sim.ctx.height), (200.0, 150.0));
        assert_eq!((surface.width(), surface.height()), (200.0, 150.0));
        assert_eq!(sim.field().particles(), &before[..]);

        // Out-of-bounds particles are still drawn where they are
        sim.tick(&mut surface);
        assert_eq!(surface.circles().count(), before.len());
    }

    #[test]
    fn test_same_seed_same_field() {
        let a = Simulation::seeded(FieldConfig::default(), 300.0, 300.0, 99);
        let b = Simulation::seeded(FieldConfig::default(), 300.0, 300.0, 99);
        assert_eq!(a.field().particles(), b.field().particles());
    }

    #[test]
    fn test_config_particle_count_and_radius() {
        let config = FieldConfig {
            particle_count: 7,
            interaction_radius: 80.0,
            ..FieldConfig::default()
        };
        let mut sim = Simulation::seeded(config, 100.0, 100.0, 1);
        assert_eq!(sim.field().len(), 7);
        assert_eq!(sim.ctx.interaction_radius, 80.0);

        sim.resize(50.0, 50.0);
        sim.reinitialize();
        assert!(sim.field().particles().iter().all(|p| p.x < 50.0 && p.y < 50.0));
    }
}
