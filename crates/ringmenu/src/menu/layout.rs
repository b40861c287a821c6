use crate::config::Config;
use crate::geometry::{Point, Size, lerp};
use std::f64::consts::PI;

/// Where an item lands on screen for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub center: Point,
    pub angle: f64,
    pub radius: f64,
    pub alpha: f64,
}

/// The circle items are laid out on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ring {
    pub center: Point,
    pub base_radius: f64,
    /// Radius items start from when the menu begins to open.
    pub far_radius: f64,
}

impl Ring {
    pub fn new(center: Point, base_radius: f64, fly_in: f64) -> Self {
        Self {
            center,
            base_radius,
            far_radius: base_radius * fly_in,
        }
    }

    /// Centers the ring in the viewport, sized from its smaller half-extent.
    pub fn from_viewport(viewport: Size, config: &Config) -> Self {
        let center = viewport.center();
        let base_radius = center.x.min(center.y) * config.radius_scale;
        Self::new(center, base_radius, config.fly_in)
    }

    pub fn radius(&self, progress: f64) -> f64 {
        lerp(self.far_radius, self.base_radius, progress)
    }

    /// Both ends of the sweep swing by half a turn as the menu opens, fanning the items out
    /// while they fly in.
    pub fn sweep(progress: f64) -> (f64, f64) {
        let swing = (1.0 - progress) * PI;
        (-PI * 0.5 - swing, PI * 1.5 - swing)
    }

    pub fn angle(index: usize, count: usize, progress: f64, rotation: f64) -> f64 {
        let t = index as f64 / count as f64;
        let (start, end) = Self::sweep(progress);
        start + (end - start) * t + rotation
    }

    pub fn place(&self, index: usize, count: usize, progress: f64, rotation: f64) -> Placement {
        let angle = Self::angle(index, count, progress, rotation);
        let radius = self.radius(progress);
        Placement {
            center: Point::new(
                self.center.x + angle.cos() * radius,
                self.center.y + angle.sin() * radius,
            ),
            angle,
            radius,
            alpha: progress,
        }
    }

    /// Top of the ring. The selected item settles here once the rotation converges.
    pub fn anchor(&self, progress: f64) -> Point {
        Point::new(self.center.x, self.center.y - self.radius(progress))
    }
}
