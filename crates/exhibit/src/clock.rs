/// Time elapsed during one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTime {
    /// Zero while the exhibit is paused.
    pub delta: f32,
    /// Wall-clock time, unaffected by pause.
    pub unscaled: f32,
}

#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    paused: bool,
}

impl FrameClock {
    pub fn frame(&self, raw_delta: f32) -> FrameTime {
        let unscaled = raw_delta.max(0.0);
        let delta = if self.paused { 0.0 } else { unscaled };
        FrameTime { delta, unscaled }
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pause_only_stops_scaled_time() {
        let mut clock = FrameClock::default();
        assert_eq!(clock.frame(0.016).delta, 0.016);

        clock.set_paused(true);
        let t = clock.frame(0.016);
        assert_eq!(t.delta, 0.0);
        assert_eq!(t.unscaled, 0.016);
    }

    #[test]
    fn test_negative_delta_is_clamped() {
        let clock = FrameClock::default();
        assert_eq!(clock.frame(-1.0), FrameTime { delta: 0.0, unscaled: 0.0 });
    }
}
