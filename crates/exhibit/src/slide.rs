use crate::activation::Activation;
use crate::anim::{Easing, Fade};
use crate::camera::CameraBinding;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Hidden,
    Fading,
    Visible,
}

/// Opacity and input blocking for everything a slide draws.
#[derive(Debug, Clone)]
pub struct SlideGroup {
    opacity: f32,
    interactive: bool,
    fade: Option<Fade>,
}

impl Default for SlideGroup {
    fn default() -> Self {
        Self {
            opacity: 0.0,
            interactive: false,
            fade: None,
        }
    }
}

impl SlideGroup {
    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    pub fn set_interactive(&mut self, interactive: bool) {
        self.interactive = interactive;
    }

    /// Jump straight to `opacity`, dropping any fade in flight.
    pub fn set_opacity(&mut self, opacity: f32) {
        self.cancel_fade();
        self.opacity = opacity.clamp(0.0, 1.0);
    }

    /// Fade toward `target` after `delay`. A fade already running on this
    /// group is cancelled and the new one continues from the current opacity.
    pub fn fade(&mut self, target: f32, duration: f32, delay: f32, easing: Easing) {
        self.cancel_fade();
        self.fade = Some(Fade::new(target.clamp(0.0, 1.0), duration, delay).with_easing(easing));
    }

    pub fn is_fading(&self) -> bool {
        self.fade.is_some()
    }

    fn cancel_fade(&mut self) {
        if let Some(mut fade) = self.fade.take() {
            fade.cancel();
        }
    }

    pub fn tick(&mut self, dt: f32) {
        let Some(fade) = self.fade.as_mut() else {
            return;
        };
        self.opacity = fade.tick(dt, self.opacity);
        if fade.is_finished() {
            self.fade = None;
        }
    }

    pub fn visibility(&self) -> Visibility {
        if self.fade.is_some() {
            Visibility::Fading
        } else if self.opacity > 0.0 {
            Visibility::Visible
        } else {
            Visibility::Hidden
        }
    }
}

pub struct Slide {
    pub name: String,
    pub group: Option<SlideGroup>,
    pub camera: Option<CameraBinding>,
    pub activations: Vec<Box<dyn Activation>>,
}

impl Slide {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            group: Some(SlideGroup::default()),
            camera: None,
            activations: Vec::new(),
        }
    }

    pub fn without_group(mut self) -> Self {
        self.group = None;
        self
    }

    pub fn with_camera(mut self, camera: CameraBinding) -> Self {
        self.camera = Some(camera);
        self
    }

    pub fn with_activation(mut self, activation: Box<dyn Activation>) -> Self {
        self.activations.push(activation);
        self
    }

    /// Whether pointer input reaches this slide. Slides without a group
    /// take input only while current.
    pub fn accepts_input(&self, is_current: bool) -> bool {
        self.group
            .as_ref()
            .map_or(is_current, SlideGroup::is_interactive)
    }

    /// Opacity the slide should be drawn at. Slides without a group are
    /// only drawn while current, so the caller decides.
    pub fn opacity(&self) -> Option<f32> {
        self.group.as_ref().map(SlideGroup::opacity)
    }

    pub fn visibility(&self) -> Visibility {
        self.group
            .as_ref()
            .map_or(Visibility::Hidden, SlideGroup::visibility)
    }

    pub fn tick(&mut self, dt: f32) {
        if let Some(group) = self.group.as_mut() {
            group.tick(dt);
        }
        for activation in &mut self.activations {
            activation.tick(dt);
        }
    }
}

impl std::fmt::Debug for Slide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Slide")
            .field("name", &self.name)
            .field("group", &self.group)
            .field("camera", &self.camera)
            .field("activations", &self.activations.len())
            .finish()
    }
}
