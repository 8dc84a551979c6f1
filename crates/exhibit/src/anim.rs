use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Easing {
    #[default]
    Linear,
    EaseInOut,
}

impl Easing {
    pub fn apply(self, t: f32) -> f32 {
        match self {
            Easing::Linear => t,
            Easing::EaseInOut => ease_in_out(t),
        }
    }
}

pub fn ease_in_out(t: f32) -> f32 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// A single interpolation from one value to another, advanced explicitly
/// with `tick`.
#[derive(Debug, Clone, PartialEq)]
pub struct Tween {
    from: f32,
    to: f32,
    duration: f32,
    elapsed: f32,
    easing: Easing,
    cancelled: bool,
}

impl Tween {
    pub fn new(from: f32, to: f32, duration: f32) -> Self {
        Self {
            from,
            to,
            duration: duration.max(0.0),
            elapsed: 0.0,
            easing: Easing::Linear,
            cancelled: false,
        }
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Advance by `dt` and return the new value.
    pub fn tick(&mut self, dt: f32) -> f32 {
        if !self.cancelled {
            self.elapsed = (self.elapsed + dt.max(0.0)).min(self.duration);
        }
        self.value()
    }

    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).clamp(0.0, 1.0)
        }
    }

    pub fn value(&self) -> f32 {
        lerp(self.from, self.to, self.easing.apply(self.progress()))
    }

    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    pub fn is_complete(&self) -> bool {
        !self.cancelled && self.progress() >= 1.0
    }
}

/// A tween toward `target` that waits `delay` first. The start value is
/// read from the animated property once the delay has run out, so a fade
/// scheduled during another animation picks up wherever that one left it.
#[derive(Debug, Clone, PartialEq)]
pub struct Fade {
    target: f32,
    duration: f32,
    delay_remaining: f32,
    easing: Easing,
    tween: Option<Tween>,
    cancelled: bool,
}

impl Fade {
    pub fn new(target: f32, duration: f32, delay: f32) -> Self {
        Self {
            target,
            duration,
            delay_remaining: delay.max(0.0),
            easing: Easing::Linear,
            tween: None,
            cancelled: false,
        }
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Advance by `dt`. `current` is the property's present value; the
    /// returned value is what the property should become.
    pub fn tick(&mut self, dt: f32, current: f32) -> f32 {
        if self.cancelled {
            return current;
        }

        let mut dt = dt.max(0.0);
        if self.tween.is_none() {
            if dt < self.delay_remaining {
                self.delay_remaining -= dt;
                return current;
            }
            dt -= self.delay_remaining;
            self.delay_remaining = 0.0;
            self.tween =
                Some(Tween::new(current, self.target, self.duration).with_easing(self.easing));
        }

        match self.tween.as_mut() {
            Some(tween) => tween.tick(dt),
            None => current,
        }
    }

    pub fn cancel(&mut self) {
        self.cancelled = true;
        if let Some(tween) = self.tween.as_mut() {
            tween.cancel();
        }
    }

    pub fn is_complete(&self) -> bool {
        self.tween.as_ref().is_some_and(Tween::is_complete)
    }

    pub fn is_finished(&self) -> bool {
        self.cancelled || self.is_complete()
    }
}
