/// Something a slide can run while it is on screen.
pub trait Simulation {
    fn resume(&mut self);
    fn pause(&mut self);
    fn is_running(&self) -> bool;
    /// Advance simulated time. Implementations ignore this while paused.
    fn step(&mut self, dt: f32);
    /// Simulated seconds spent running.
    fn elapsed(&self) -> f32;
    /// Position within the simulation's cycle, in `0.0..1.0`.
    fn phase(&self) -> f32;
}

/// A point circling a centre at a fixed angular speed. Used by manifests
/// that declare simulations without any other content.
#[derive(Debug, Clone)]
pub struct Orbit {
    speed: f32,
    running: bool,
    elapsed: f32,
}

impl Orbit {
    pub fn new(speed: f32) -> Self {
        Self {
            speed,
            running: false,
            elapsed: 0.0,
        }
    }

    /// Current angle in radians.
    pub fn angle(&self) -> f32 {
        (self.elapsed * self.speed).rem_euclid(std::f32::consts::TAU)
    }
}

impl Simulation for Orbit {
    fn resume(&mut self) {
        self.running = true;
    }

    fn pause(&mut self) {
        self.running = false;
    }

    fn is_running(&self) -> bool {
        self.running
    }

    fn step(&mut self, dt: f32) {
        if self.running {
            self.elapsed += dt;
        }
    }

    fn elapsed(&self) -> f32 {
        self.elapsed
    }

    fn phase(&self) -> f32 {
        self.angle() / std::f32::consts::TAU
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orbit_only_advances_when_running() {
        let mut orbit = Orbit::new(1.0);
        orbit.step(1.0);
        assert_eq!(orbit.elapsed(), 0.0);

        orbit.resume();
        orbit.step(0.5);
        orbit.pause();
        orbit.step(0.5);
        assert_eq!(orbit.elapsed(), 0.5);
    }

    #[test]
    fn test_orbit_angle_wraps() {
        let mut orbit = Orbit::new(std::f32::consts::PI);
        orbit.resume();
        orbit.step(2.5);
        assert!((orbit.angle() - std::f32::consts::FRAC_PI_2).abs() < 1e-4);
    }
}
