use crate::anim::{Tween, lerp};

pub const DEFAULT_FADE_IN: f32 = 0.15;
pub const DEFAULT_FADE_OUT: f32 = 0.1;
const HIDDEN_SCALE: f32 = 0.8;

/// A hover tip attached to a label on a slide. Driven by unscaled time so
/// it keeps working while the exhibit is paused.
#[derive(Debug, Clone)]
pub struct Tooltip {
    label: String,
    text: Option<String>,
    fade_in: f32,
    fade_out: f32,
    alpha: f32,
    scale: f32,
    show: Option<Tween>,
    hide: Option<Tween>,
}

impl Tooltip {
    pub fn new(label: impl Into<String>, text: Option<String>) -> Self {
        Self {
            label: label.into(),
            text,
            fade_in: DEFAULT_FADE_IN,
            fade_out: DEFAULT_FADE_OUT,
            alpha: 0.0,
            scale: 1.0,
            show: None,
            hide: None,
        }
    }

    pub fn with_durations(mut self, fade_in: f32, fade_out: f32) -> Self {
        self.fade_in = fade_in;
        self.fade_out = fade_out;
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn is_animating(&self) -> bool {
        self.show.is_some() || self.hide.is_some()
    }

    /// Cancel any hide in flight and grow/fade the tip in. Starts from the
    /// current alpha, so re-entering mid-hide does not flash.
    pub fn pointer_enter(&mut self) {
        if self.text.is_none() {
            return;
        }
        if let Some(mut hide) = self.hide.take() {
            hide.cancel();
        }
        let remaining = (1.0 - self.alpha) * self.fade_in;
        self.show = Some(Tween::new(self.alpha, 1.0, remaining));
        self.scale = lerp(HIDDEN_SCALE, 1.0, self.alpha);
    }

    /// Cancel any show in flight and fade out from wherever it got to.
    pub fn pointer_exit(&mut self) {
        if self.text.is_none() {
            return;
        }
        if let Some(mut show) = self.show.take() {
            show.cancel();
        }
        self.hide = Some(Tween::new(self.alpha, 0.0, self.fade_out));
    }

    pub fn tick(&mut self, unscaled_dt: f32) {
        if let Some(show) = self.show.as_mut() {
            self.alpha = show.tick(unscaled_dt);
            self.scale = lerp(HIDDEN_SCALE, 1.0, self.alpha);
            if show.is_complete() {
                self.alpha = 1.0;
                self.scale = 1.0;
                self.show = None;
            }
        }
        if let Some(hide) = self.hide.as_mut() {
            self.alpha = hide.tick(unscaled_dt);
            if hide.is_complete() {
                self.alpha = 0.0;
                self.scale = 1.0;
                self.hide = None;
            }
        }
    }
}
