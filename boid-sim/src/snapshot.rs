use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use boid_core::World;
use boid_shared::{AttractorFrame, BoidFrame, FrameSnapshot, ObstacleFrame, Position};

/// Captures what a renderer would read from the world.
pub fn capture(world: &World) -> FrameSnapshot {
    let bounds = world.bounds();
    FrameSnapshot {
        tick: world.tick(),
        width: bounds.width(),
        height: bounds.height(),
        slop: bounds.slop(),
        boids: world
            .boids()
            .iter()
            .map(|boid| BoidFrame {
                position: Position::new(boid.position.x, boid.position.y),
                heading: boid.heading_degrees(),
                size: boid.size,
                color: [boid.color.r, boid.color.g, boid.color.b],
            })
            .collect(),
        attractors: world
            .attractors()
            .iter()
            .map(|a| AttractorFrame {
                position: Position::new(a.position.x, a.position.y),
                magnitude: a.magnitude,
            })
            .collect(),
        obstacles: world
            .obstacles()
            .iter()
            .map(|o| ObstacleFrame {
                position: Position::new(o.position.x, o.position.y),
                size: o.size,
            })
            .collect(),
    }
}

/// Writes `frame` as pretty JSON to `target`, where `-` means stdout.
pub fn write(frame: &FrameSnapshot, target: &str) -> Result<()> {
    if target == "-" {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        serde_json::to_writer_pretty(&mut out, frame).context("Failed to write snapshot")?;
        writeln!(out)?;
        return Ok(());
    }

    let path = Path::new(target);
    let json = serde_json::to_string_pretty(frame).context("Failed to encode snapshot")?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write snapshot to {}", path.display()))?;
    log::info!("Snapshot written to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use boid_core::{Color, FlockConfig, Vector2D, WorldBounds};

    #[test]
    fn test_capture_reports_heading_and_entities() {
        let bounds = WorldBounds::new(800.0, 600.0, 50.0).unwrap();
        let mut world = World::new(bounds, FlockConfig::default()).unwrap();
        world
            .spawn(
                Vector2D::new(10.0, 20.0),
                Vector2D::new(5.0, 0.0),
                Color::new(0.1, 0.2, 0.3),
                12.0,
            )
            .unwrap();
        world.add_attractor(Vector2D::new(1.0, 1.0), 4.0).unwrap();
        world.add_obstacle(Vector2D::new(2.0, 2.0), 8.0).unwrap();

        let frame = capture(&world);

        assert_eq!(frame.width, 800.0);
        assert_eq!(frame.boids.len(), 1);
        assert!((frame.boids[0].heading - 90.0).abs() < 1e-4);
        assert_eq!(frame.boids[0].color, [0.1, 0.2, 0.3]);
        assert_eq!(frame.boids[0].size, 12.0);
        assert_eq!(frame.attractors[0].magnitude, 4.0);
        assert_eq!(frame.obstacles[0].size, 8.0);
    }
}
