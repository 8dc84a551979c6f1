use crate::activation::{Activation, SimulationActivator};
use crate::camera::CameraBinding;
use crate::clock::FrameClock;
use crate::controller::{FadeTiming, PresentationController};
use crate::language::{Language, LanguageListener, LanguageToggle, TextRegistry};
use crate::manifest::{Manifest, ShapeWarning, SlideConfig};
use crate::navigation::NavigationWidget;
use crate::simulation::Orbit;
use crate::slide::Slide;
use crate::tooltip::Tooltip;

/// Overrides applied on top of the manifest at launch.
#[derive(Debug, Clone, Copy, Default)]
pub struct LaunchOptions {
    pub start_slide: Option<usize>,
    pub language: Option<Language>,
}

#[derive(Debug, Clone)]
pub struct SlideTooltip {
    pub slide: usize,
    pub tooltip: Tooltip,
}

/// Composition root: owns the controller and every widget, and routes
/// widget notifications to their listeners.
pub struct Exhibit {
    title: String,
    controller: PresentationController,
    navigation: Option<NavigationWidget>,
    header_visible: bool,
    toggle: Option<LanguageToggle>,
    texts: TextRegistry,
    tooltips: Vec<SlideTooltip>,
    clock: FrameClock,
    start_slide: usize,
    start_language: Language,
    started: bool,
}

impl Exhibit {
    pub fn from_manifest(manifest: &Manifest, options: LaunchOptions) -> Self {
        let mut texts = TextRegistry::default();
        let mut tooltips = Vec::new();

        let slides: Option<Vec<Slide>> = manifest.slides.as_ref().map(|configs| {
            configs
                .iter()
                .enumerate()
                .map(|(index, config)| {
                    for text in &config.texts {
                        texts.push(index, text.role, text.language, text.text.clone());
                    }
                    for tip in &config.tooltips {
                        tooltips.push(SlideTooltip {
                            slide: index,
                            tooltip: Tooltip::new(tip.label.clone(), tip.text.clone())
                                .with_durations(tip.fade_in, tip.fade_out),
                        });
                    }
                    build_slide(index, config)
                })
                .collect()
        });

        let timing = FadeTiming {
            duration: manifest.transition.duration,
            fade_out_delay: manifest.transition.fade_out_delay,
            easing: manifest.transition.easing,
        };

        let navigation = match manifest.navigation.as_ref() {
            Some(nav) => Some(NavigationWidget::new(
                nav.indicators,
                nav.back_control && nav.forward_control,
                nav.style.clone(),
                nav.interactive,
            )),
            None => {
                log::warn!("{}", ShapeWarning::MissingNavigation);
                None
            }
        };

        let header = manifest.header.as_ref();
        let toggle = header.and_then(|h| h.language_toggle.as_ref()).map(|t| {
            LanguageToggle::new(t.en_label.clone(), t.fr_label.clone())
        });

        Self {
            title: manifest
                .title
                .clone()
                .unwrap_or_else(|| "Exhibit".to_string()),
            controller: PresentationController::new(slides, timing),
            navigation,
            header_visible: header.is_none_or(|h| h.visible),
            toggle,
            texts,
            tooltips,
            clock: FrameClock::default(),
            start_slide: options.start_slide.unwrap_or(manifest.start_slide),
            start_language: options.language.unwrap_or_default(),
            started: false,
        }
    }

    /// Apply the starting language, show the first slide and build the
    /// navigation bubbles. Safe to call once; later calls are ignored.
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;

        self.texts.set_language(self.start_language);
        if let Some(toggle) = self.toggle.as_mut() {
            toggle.select(self.start_language);
        }

        if !self.controller.initialize(self.start_slide) {
            return;
        }

        let current = self.controller.current();
        if let Some(nav) = self.navigation.as_mut() {
            nav.rebuild_indicators(self.controller.slide_count());
            nav.set_current(current);
            nav.show_slide(current);
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn controller(&self) -> &PresentationController {
        &self.controller
    }

    pub fn navigation(&self) -> Option<&NavigationWidget> {
        self.navigation.as_ref()
    }

    pub fn header_visible(&self) -> bool {
        self.header_visible
    }

    pub fn language_toggle(&self) -> Option<&LanguageToggle> {
        self.toggle.as_ref()
    }

    pub fn language(&self) -> Language {
        self.texts.language()
    }

    pub fn texts(&self) -> &TextRegistry {
        &self.texts
    }

    pub fn tooltips(&self) -> &[SlideTooltip] {
        &self.tooltips
    }

    pub fn current_slide(&self) -> usize {
        self.controller.current()
    }

    pub fn is_paused(&self) -> bool {
        self.clock.is_paused()
    }

    pub fn go_forward(&mut self) {
        if let Some(nav) = self.navigation.as_mut() {
            nav.go_forward(&mut self.controller);
        }
    }

    pub fn go_back(&mut self) {
        if let Some(nav) = self.navigation.as_mut() {
            nav.go_back(&mut self.controller);
        }
    }

    pub fn click_indicator(&mut self, index: usize) {
        if let Some(nav) = self.navigation.as_mut() {
            nav.handle_indicator_click(index, &mut self.controller);
        }
    }

    /// Clicks the header toggle. A hidden header hides its toggle too.
    pub fn toggle_language(&mut self) {
        if !self.header_visible {
            log::debug!("header hidden, language toggle unavailable");
            return;
        }
        if let Some(toggle) = self.toggle.as_mut() {
            toggle.click(&mut self.texts);
        }
    }

    /// Pointer entered tooltip `index` (an index into [`Self::tooltips`]).
    /// Ignored while the tooltip's slide does not take input.
    pub fn pointer_enter(&mut self, index: usize) {
        let Some(spot) = self.tooltips.get_mut(index) else {
            return;
        };
        let current = self.controller.current();
        let accepts = self
            .controller
            .slide(spot.slide)
            .is_some_and(|s| s.accepts_input(spot.slide == current));
        if !accepts {
            log::trace!("slide {} is not interactive, ignoring hover", spot.slide);
            return;
        }
        spot.tooltip.pointer_enter();
    }

    pub fn pointer_exit(&mut self, index: usize) {
        if let Some(spot) = self.tooltips.get_mut(index) {
            spot.tooltip.pointer_exit();
        }
    }

    pub fn toggle_pause(&mut self) -> bool {
        let paused = !self.clock.is_paused();
        self.clock.set_paused(paused);
        paused
    }

    /// Whether anything still needs frames to finish.
    pub fn is_animating(&self) -> bool {
        let fading = self
            .controller
            .slides()
            .iter()
            .any(|s| s.group.as_ref().is_some_and(|g| g.is_fading()));
        let running = !self.clock.is_paused()
            && self
                .controller
                .slide(self.controller.current())
                .is_some_and(|s| s.activations.iter().any(|a| a.is_running()));
        fading || running || self.tooltips.iter().any(|t| t.tooltip.is_animating())
    }

    pub fn tick(&mut self, raw_dt: f32) {
        let frame = self.clock.frame(raw_dt);
        self.controller.tick(frame.delta);
        for spot in &mut self.tooltips {
            spot.tooltip.tick(frame.unscaled);
        }
    }
}

fn build_slide(index: usize, config: &SlideConfig) -> Slide {
    let mut slide = Slide::new(config.display_name(index));
    if !config.fade {
        slide = slide.without_group();
    }
    if let Some(pose) = config.camera {
        slide = slide.with_camera(CameraBinding::new(pose));
    }
    for sim in &config.simulations {
        let activator = SimulationActivator::new(sim.name.clone(), Orbit::new(sim.speed))
            .with_auto_play(sim.auto_play)
            .on_activate(|orbit: &mut Orbit| log::debug!("orbit at {:.2} rad", orbit.angle()));
        slide = slide.with_activation(Box::new(activator) as Box<dyn Activation>);
    }
    slide
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::LabelTint;
    use crate::manifest::parse;
    use crate::navigation::{IndicatorState, NavigationListener as _};
    use crate::slide::Visibility;

    const THREE: &str = r#"
title: Three
header:
  language_toggle:
    en_label: EN
    fr_label: FR
navigation:
  interactive: true
slides:
  - name: one
    texts:
      - { language: EN, role: title, text: One }
      - { language: FR, role: title, text: Un }
    camera: { position: [0, 0, -5] }
  - name: two
    simulations:
      - name: orbit
    tooltips:
      - label: info
        text: More
  - name: three
    camera: { position: [0, 0, -9] }
"#;

    fn exhibit() -> Exhibit {
        let mut e = Exhibit::from_manifest(&parse(THREE).unwrap(), LaunchOptions::default());
        e.start();
        e
    }

    fn nav_states(e: &Exhibit) -> Vec<IndicatorState> {
        e.navigation()
            .map(|n| n.indicators().iter().map(|i| i.state).collect())
            .unwrap_or_default()
    }

    #[test]
    fn test_start_shows_first_slide() {
        let e = exhibit();
        assert_eq!(e.title(), "Three");
        assert!(e.header_visible());
        assert_eq!(e.current_slide(), 0);
        assert_eq!(
            nav_states(&e),
            vec![
                IndicatorState::Current,
                IndicatorState::Future,
                IndicatorState::Future
            ]
        );
        let controls = e.navigation().and_then(|n| n.controls()).unwrap();
        assert!(!controls.back_visible);
        assert!(controls.forward_visible);
        assert_eq!(e.controller().camera().holder(), Some(0));
    }

    #[test]
    fn test_jump_to_last_slide() {
        let mut e = exhibit();
        e.click_indicator(2);
        assert_eq!(e.current_slide(), 2);
        assert_eq!(
            nav_states(&e),
            vec![
                IndicatorState::Past,
                IndicatorState::Past,
                IndicatorState::Current
            ]
        );
        let controls = e.navigation().and_then(|n| n.controls()).unwrap();
        assert!(controls.back_visible);
        assert!(!controls.forward_visible);
        assert_eq!(e.controller().camera().holder(), Some(2));
        assert_eq!(e.controller().camera().pose().position, [0.0, 0.0, -9.0]);
    }

    #[test]
    fn test_forward_back_drive_controller() {
        let mut e = exhibit();
        e.go_forward();
        assert_eq!(e.current_slide(), 1);
        assert!(e.controller().slides()[1].activations[0].is_active());
        // slide two has no camera, so nobody holds it
        assert_eq!(e.controller().camera().holder(), None);

        e.go_back();
        e.go_back();
        assert_eq!(e.current_slide(), 0);
        assert!(!e.controller().slides()[1].activations[0].is_active());
    }

    #[test]
    fn test_transition_completes_with_ticks() {
        let mut e = exhibit();
        e.go_forward();
        assert!(e.is_animating());
        for _ in 0..60 {
            e.tick(1.0 / 60.0);
        }
        let slides = e.controller().slides();
        assert_eq!(slides[0].visibility(), Visibility::Hidden);
        assert_eq!(slides[1].visibility(), Visibility::Visible);
    }

    #[test]
    fn test_language_toggle_swaps_texts() {
        let mut e = exhibit();
        let titles = |e: &Exhibit| -> Vec<String> {
            e.texts().visible_for(0).map(|t| t.text.clone()).collect()
        };
        assert_eq!(titles(&e), vec!["One"]);

        e.toggle_language();
        assert_eq!(e.language(), Language::Fr);
        assert_eq!(titles(&e), vec!["Un"]);

        e.toggle_language();
        assert_eq!(titles(&e), vec!["One"]);
    }

    #[test]
    fn test_launch_options_override_manifest() {
        let options = LaunchOptions {
            start_slide: Some(1),
            language: Some(Language::Fr),
        };
        let mut e = Exhibit::from_manifest(&parse(THREE).unwrap(), options);
        e.start();
        assert_eq!(e.current_slide(), 1);
        assert_eq!(e.language(), Language::Fr);
        assert_eq!(
            e.language_toggle().map(|t| t.language()),
            Some(Language::Fr)
        );
        assert_eq!(e.navigation().map(|n| n.current()), Some(1));
    }

    #[test]
    fn test_tooltips_run_while_paused() {
        let mut e = exhibit();
        e.go_forward();
        assert!(e.toggle_pause());
        e.pointer_enter(0);
        e.tick(0.5);
        assert_eq!(e.tooltips()[0].tooltip.alpha(), 1.0);
        // slide fades are frozen
        assert!(e.controller().slides()[1].opacity().is_some_and(|o| o < 1.0));
        e.pointer_exit(0);
        e.tick(0.5);
        assert_eq!(e.tooltips()[0].tooltip.alpha(), 0.0);
    }

    #[test]
    fn test_inert_toggle_follows_launch_language() {
        let yaml = "header:\n  language_toggle:\n    en_label: EN\nslides:\n  - texts:\n      - { language: EN, text: Hello }\n      - { language: FR, text: Bonjour }\n";
        let options = LaunchOptions {
            start_slide: None,
            language: Some(Language::Fr),
        };
        let mut e = Exhibit::from_manifest(&parse(yaml).unwrap(), options);
        e.start();

        let shown: Vec<&str> = e.texts().visible_for(0).map(|t| t.text.as_str()).collect();
        assert_eq!(shown, vec!["Bonjour"]);
        let toggle = e.language_toggle().unwrap();
        assert!(!toggle.can_toggle());
        assert_eq!(toggle.language(), Language::Fr);
        assert_eq!(toggle.tint(Language::En), LabelTint::Inactive);

        e.toggle_language();
        assert_eq!(e.language(), Language::Fr);
    }

    #[test]
    fn test_hover_ignored_on_inactive_slide() {
        let mut e = exhibit();
        // tooltip 0 lives on slide two, which is hidden at start
        e.pointer_enter(0);
        e.tick(0.5);
        assert_eq!(e.tooltips()[0].tooltip.alpha(), 0.0);

        e.go_forward();
        e.pointer_enter(0);
        e.tick(0.5);
        assert_eq!(e.tooltips()[0].tooltip.alpha(), 1.0);
    }

    #[test]
    fn test_missing_containers_degrade() {
        let mut e = Exhibit::from_manifest(&parse("title: bare\n").unwrap(), LaunchOptions::default());
        e.start();
        e.go_forward();
        e.toggle_language();
        e.tick(0.1);
        assert_eq!(e.current_slide(), 0);
        assert!(e.navigation().is_none());
        assert!(e.language_toggle().is_none());
        assert_eq!(e.controller().slide_count(), 0);
    }

    #[test]
    fn test_navigation_skipped_without_slides() {
        let mut e = Exhibit::from_manifest(
            &parse("navigation: {}\nslides: []\n").unwrap(),
            LaunchOptions::default(),
        );
        e.start();
        assert_eq!(e.navigation().map(|n| n.indicators().len()), Some(0));
        e.go_forward();
        assert_eq!(e.current_slide(), 0);
    }

    #[test]
    fn test_hidden_header() {
        let e = Exhibit::from_manifest(
            &parse("header:\n  visible: false\nslides: []\n").unwrap(),
            LaunchOptions::default(),
        );
        assert!(!e.header_visible());
    }

    #[test]
    fn test_hidden_header_blocks_language_toggle() {
        let yaml = "header:\n  visible: false\n  language_toggle: { en_label: EN, fr_label: FR }\nslides:\n  - name: one\n";
        let mut e = Exhibit::from_manifest(&parse(yaml).unwrap(), LaunchOptions::default());
        e.start();
        e.toggle_language();
        assert_eq!(e.language(), Language::En);
        assert_eq!(e.language_toggle().map(|t| t.language()), Some(Language::En));
    }

    #[test]
    fn test_controller_is_a_navigation_listener() {
        let mut e = exhibit();
        e.controller.load_slide(2);
        assert_eq!(e.current_slide(), 2);
    }
}
