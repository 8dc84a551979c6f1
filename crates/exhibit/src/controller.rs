use crate::anim::Easing;
use crate::camera::CameraRig;
use crate::manifest::ShapeWarning;
use crate::navigation::NavigationListener;
use crate::slide::Slide;

pub const DEFAULT_FADE_DURATION: f32 = 0.3;
pub const DEFAULT_FADE_OUT_DELAY: f32 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FadeTiming {
    pub duration: f32,
    /// Delay before the outgoing slide starts fading, so the incoming one
    /// appears first.
    pub fade_out_delay: f32,
    pub easing: Easing,
}

impl Default for FadeTiming {
    fn default() -> Self {
        Self {
            duration: DEFAULT_FADE_DURATION,
            fade_out_delay: DEFAULT_FADE_OUT_DELAY,
            easing: Easing::Linear,
        }
    }
}

/// Owns the slides, which one is current, and the shared camera.
pub struct PresentationController {
    /// `None` when the exhibit declares no slide container at all.
    slides: Option<Vec<Slide>>,
    current: usize,
    camera: CameraRig,
    timing: FadeTiming,
}

impl PresentationController {
    pub fn new(slides: Option<Vec<Slide>>, timing: FadeTiming) -> Self {
        Self {
            slides,
            current: 0,
            camera: CameraRig::default(),
            timing,
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn slide_count(&self) -> usize {
        self.slides.as_ref().map_or(0, Vec::len)
    }

    pub fn has_slides(&self) -> bool {
        self.slide_count() > 0
    }

    pub fn slides(&self) -> &[Slide] {
        self.slides.as_deref().unwrap_or(&[])
    }

    pub fn slide(&self, index: usize) -> Option<&Slide> {
        self.slides.as_ref()?.get(index)
    }

    pub fn camera(&self) -> &CameraRig {
        &self.camera
    }

    pub fn timing(&self) -> FadeTiming {
        self.timing
    }

    /// Hide every slide, then show `start` with its camera and simulations
    /// running. Returns false (after logging) when there is nothing to show.
    pub fn initialize(&mut self, start: usize) -> bool {
        let Some(slides) = self.slides.as_mut() else {
            log::warn!("{}", ShapeWarning::MissingSlides);
            return false;
        };
        if slides.is_empty() {
            log::warn!("{}", ShapeWarning::EmptySlides);
            return false;
        }

        let start = if start >= slides.len() {
            let clamped = slides.len() - 1;
            log::warn!(
                "{}",
                ShapeWarning::StartOutOfRange {
                    start,
                    count: slides.len()
                }
            );
            clamped
        } else {
            start
        };

        for slide in slides.iter_mut() {
            if let Some(group) = slide.group.as_mut() {
                group.set_opacity(0.0);
                group.set_interactive(false);
            }
            for activation in &mut slide.activations {
                activation.deactivate();
                activation.set_enabled(false);
            }
        }

        let slide = &mut slides[start];
        if let Some(group) = slide.group.as_mut() {
            group.set_opacity(1.0);
        }
        if let Some(binding) = slide.camera.as_mut() {
            binding.assign(&mut self.camera, start);
        }
        for activation in &mut slide.activations {
            activation.activate();
            activation.set_enabled(true);
        }
        if let Some(group) = slide.group.as_mut() {
            group.set_interactive(true);
        }

        self.current = start;
        log::debug!("presentation initialized on slide {start} ({})", slide.name);
        true
    }

    /// Switch from the current slide to `target`. Does nothing when `target`
    /// is already current or outside the slide list.
    pub fn transition_to(&mut self, target: usize) {
        let Some(slides) = self.slides.as_mut() else {
            return;
        };
        let from = self.current;
        if target == from || target >= slides.len() || from >= slides.len() {
            return;
        }
        let timing = self.timing;

        // Outgoing slide: stop input and simulations, give the camera back,
        // then fade out after a short delay.
        let outgoing = &mut slides[from];
        if let Some(group) = outgoing.group.as_mut() {
            group.set_interactive(false);
        }
        for activation in &mut outgoing.activations {
            activation.deactivate();
            activation.set_enabled(false);
        }
        if let Some(binding) = outgoing.camera.as_mut() {
            binding.release(&mut self.camera, from);
        }
        if let Some(group) = outgoing.group.as_mut() {
            group.fade(0.0, timing.duration, timing.fade_out_delay, timing.easing);
        }

        // Incoming slide
        let incoming = &mut slides[target];
        if let Some(group) = incoming.group.as_mut() {
            group.fade(1.0, timing.duration, 0.0, timing.easing);
        }
        if let Some(binding) = incoming.camera.as_mut() {
            binding.assign(&mut self.camera, target);
        }
        for activation in &mut incoming.activations {
            activation.activate();
            activation.set_enabled(true);
        }
        if let Some(group) = incoming.group.as_mut() {
            group.set_interactive(true);
        }

        self.current = target;
        log::debug!("slide {from} -> {target} ({})", incoming.name);
    }

    /// Advance fades and simulations by one frame.
    pub fn tick(&mut self, dt: f32) {
        if let Some(slides) = self.slides.as_mut() {
            for slide in slides {
                slide.tick(dt);
            }
        }
    }
}

impl NavigationListener for PresentationController {
    fn load_slide(&mut self, index: usize) {
        self.transition_to(index);
    }
}
