//! Frame rendering: particles with glow plus distance-faded connection lines

use super::config::FieldConfig;
use super::error::Result;
use super::particle::ParticleField;
use super::surface::{Glow, Surface};

/// Line opacity for two particles `distance` apart.
///
/// 1.0 when touching, falling linearly to 0 at `threshold`; `None` when the
/// pair is not connected.
pub fn connection_opacity(distance: f64, threshold: f64) -> Option<f64> {
    if !distance.is_finite() || distance >= threshold {
        return None;
    }
    Some(1.0 - distance / threshold)
}

/// Draw the whole field. Returns the number of connection lines drawn.
pub fn render_field<S: Surface + ?Sized>(
    field: &ParticleField,
    config: &FieldConfig,
    surface: &mut S,
) -> Result<usize> {
    surface.clear()?;

    let glow = Glow {
        blur: config.glow_blur,
        color: config.glow_color,
    };
    for p in field.particles() {
        surface.fill_circle(p.x, p.y, p.radius, config.particle_color, Some(glow))?;
    }

    let particles = field.particles();
    let mut edges = 0;
    for (i, a) in particles.iter().enumerate() {
        for b in &particles[i + 1..] {
            let dx = a.x - b.x;
            let dy = a.y - b.y;
            let distance = (dx * dx + dy * dy).sqrt();
            if let Some(opacity) = connection_opacity(distance, config.connection_distance) {
                surface.stroke_line(
                    (a.x, a.y),
                    (b.x, b.y),
                    config.line_color.with_alpha(opacity),
                    config.line_width,
                )?;
                edges += 1;
            }
        }
    }
    Ok(edges)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::particle::Particle;
    use crate::core::surface::{DrawCommand, RecordingSurface};

    fn at(x: f64, y: f64) -> Particle {
        Particle {
            x,
            y,
            vx: 0.0,
            vy: 0.0,
            radius: 1.5,
            density: 1.0,
        }
    }

    #[test]
    fn test_opacity_bounds() {
        assert_eq!(connection_opacity(0.0, 150.0), Some(1.0));
        assert_eq!(connection_opacity(150.0, 150.0), None);
        assert_eq!(connection_opacity(200.0, 150.0), None);
        assert_eq!(connection_opacity(f64::NAN, 150.0), None);
    }

    #[test]
    fn test_opacity_monotonic() {
        let mut prev = f64::INFINITY;
        for step in 0..150 {
            let o = connection_opacity(step as f64, 150.0).unwrap();
            assert!(o < prev);
            assert!(o > 0.0 && o <= 1.0);
            prev = o;
        }
    }

    #[test]
    fn test_render_draws_particles_then_edges() {
        let field = ParticleField::from_particles(vec![at(0.0, 0.0), at(75.0, 0.0), at(500.0, 500.0)]);
        let config = FieldConfig::default();
        let mut surface = RecordingSurface::new(600.0, 600.0);

        let edges = render_field(&field, &config, &mut surface).unwrap();
        assert_eq!(edges, 1);
        assert_eq!(surface.commands[0], DrawCommand::Clear);
        assert_eq!(surface.circles().count(), 3);

        let line = surface.lines().next().unwrap();
        match line {
            DrawCommand::Line { from, to, color, width } => {
                assert_eq!(*from, (0.0, 0.0));
                assert_eq!(*to, (75.0, 0.0));
                assert!((color.a - 0.5).abs() < 1e-12);
                assert_eq!((color.r, color.g, color.b), (255, 77, 77));
                assert_eq!(*width, 0.8);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_coincident_particles_full_opacity() {
        let field = ParticleField::from_particles(vec![at(10.0, 10.0), at(10.0, 10.0)]);
        let mut surface = RecordingSurface::new(100.0, 100.0);
        render_field(&field, &FieldConfig::default(), &mut surface).unwrap();
        match surface.lines().next() {
            Some(DrawCommand::Line { color, .. }) => assert_eq!(color.a, 1.0),
            other => panic!("expected a line, got {other:?}"),
        };
    }

    #[test]
    fn test_particles_carry_glow() {
        let field = ParticleField::from_particles(vec![at(1.0, 1.0)]);
        let mut surface = RecordingSurface::new(10.0, 10.0);
        render_field(&field, &FieldConfig::default(), &mut surface).unwrap();
        match surface.circles().next() {
            Some(DrawCommand::Circle { glow: Some(g), fill, radius, .. }) => {
                assert_eq!(g.blur, 10.0);
                assert_eq!(fill.to_css(), "rgba(0, 123, 255, 0.8)");
                assert_eq!(*radius, 1.5);
            }
            other => panic!("expected a glowing circle, got {other:?}"),
        };
    }

    #[test]
    fn test_full_pair_scan() {
        // 60 particles within a few pixels of each other: every pair connects
        let particles = (0..60).map(|i| at(i as f64 * 0.5, 0.0)).collect();
        let field = ParticleField::from_particles(particles);
        let mut surface = RecordingSurface::new(100.0, 100.0);
        let edges = render_field(&field, &FieldConfig::default(), &mut surface).unwrap();
        assert_eq!(edges, 1770);
    }
}
