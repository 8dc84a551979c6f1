pub mod shape;

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::anim::Easing;
use crate::camera::CameraPose;
use crate::controller::{DEFAULT_FADE_DURATION, DEFAULT_FADE_OUT_DELAY};
use crate::language::{Language, TextRole};
use crate::navigation::IndicatorStyles;
use crate::tooltip::{DEFAULT_FADE_IN, DEFAULT_FADE_OUT};

pub use shape::{ShapeWarning, validate};

/// An exhibit as authored in YAML: the slides container, the navigation
/// widget and the header.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default)]
    pub start_slide: usize,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,

    #[serde(default)]
    pub transition: TransitionConfig,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header: Option<HeaderConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub navigation: Option<NavigationConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slides: Option<Vec<SlideConfig>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitionConfig {
    #[serde(default = "default_fade_duration")]
    pub duration: f32,
    #[serde(default = "default_fade_out_delay")]
    pub fade_out_delay: f32,
    #[serde(default)]
    pub easing: Easing,
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self {
            duration: DEFAULT_FADE_DURATION,
            fade_out_delay: DEFAULT_FADE_OUT_DELAY,
            easing: Easing::default(),
        }
    }
}

fn default_fade_duration() -> f32 {
    DEFAULT_FADE_DURATION
}

fn default_fade_out_delay() -> f32 {
    DEFAULT_FADE_OUT_DELAY
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeaderConfig {
    #[serde(default = "default_true")]
    pub visible: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language_toggle: Option<LanguageToggleConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LanguageToggleConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub en_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fr_label: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavigationConfig {
    /// Whether there is a container to put progress bubbles in.
    #[serde(default = "default_true")]
    pub indicators: bool,
    /// Whether clicking a bubble jumps to its slide.
    #[serde(default)]
    pub interactive: bool,
    #[serde(default = "default_true")]
    pub back_control: bool,
    #[serde(default = "default_true")]
    pub forward_control: bool,
    #[serde(default)]
    pub style: IndicatorStyles,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            indicators: true,
            interactive: false,
            back_control: true,
            forward_control: true,
            style: IndicatorStyles::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlideConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Whether the slide has an opacity group to fade.
    #[serde(default = "default_true")]
    pub fade: bool,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub texts: Vec<TextConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub camera: Option<CameraPose>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub simulations: Vec<SimulationConfig>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tooltips: Vec<TooltipConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<Language>,
    #[serde(default)]
    pub role: TextRole,
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub name: String,
    #[serde(default = "default_speed")]
    pub speed: f32,
    #[serde(default = "default_true")]
    pub auto_play: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TooltipConfig {
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default = "default_tooltip_fade_in")]
    pub fade_in: f32,
    #[serde(default = "default_tooltip_fade_out")]
    pub fade_out: f32,
}

fn default_true() -> bool {
    true
}

fn default_speed() -> f32 {
    1.0
}

fn default_tooltip_fade_in() -> f32 {
    DEFAULT_FADE_IN
}

fn default_tooltip_fade_out() -> f32 {
    DEFAULT_FADE_OUT
}

impl SlideConfig {
    pub fn display_name(&self, index: usize) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| format!("Slide {}", index + 1))
    }
}

pub fn parse(content: &str) -> Result<Manifest> {
    let manifest: Manifest = serde_yaml::from_str(content)?;
    Ok(manifest)
}

pub fn load(path: &Path) -> Result<Manifest> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    parse(&content).with_context(|| format!("Invalid exhibit manifest {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::IndicatorShape;
    use crate::theme::Rgb;

    const FULL: &str = r##"
title: Forces
start_slide: 1
theme: dark
transition:
  duration: 0.5
  easing: ease-in-out
header:
  language_toggle:
    en_label: EN
    fr_label: FR
navigation:
  interactive: true
  style:
    current:
      shape: filled-disk
      color: "#00ff00"
slides:
  - name: Intro
    texts:
      - language: EN
        role: title
        text: Gravity
      - language: FR
        role: title
        text: Gravité
  - name: Orbit
    fade: false
    camera:
      position: [0, 2, -8]
      look_at: [0, 0, 0]
    simulations:
      - name: orbit
        speed: 2.0
        auto_play: false
    tooltips:
      - label: g
        text: 9.81 m/s²
"##;

    #[test]
    fn test_parse_full_manifest() {
        let m = parse(FULL).unwrap();
        assert_eq!(m.title.as_deref(), Some("Forces"));
        assert_eq!(m.start_slide, 1);
        assert_eq!(m.transition.duration, 0.5);
        assert_eq!(m.transition.fade_out_delay, DEFAULT_FADE_OUT_DELAY);
        assert_eq!(m.transition.easing, Easing::EaseInOut);

        let header = m.header.unwrap();
        assert!(header.visible);
        let toggle = header.language_toggle.unwrap();
        assert_eq!(toggle.fr_label.as_deref(), Some("FR"));

        let nav = m.navigation.unwrap();
        assert!(nav.interactive);
        assert!(nav.back_control);
        let current = nav.style.current.unwrap();
        assert_eq!(current.shape, IndicatorShape::FilledDisk);
        assert_eq!(current.color, Rgb(0, 255, 0));
        assert_eq!(nav.style.past.map(|s| s.color), Some(Rgb::BLACK));

        let slides = m.slides.unwrap();
        assert_eq!(slides.len(), 2);
        assert_eq!(slides[0].texts[1].language, Some(Language::Fr));
        assert_eq!(slides[0].texts[1].role, TextRole::Title);
        assert!(slides[0].fade);
        assert!(!slides[1].fade);
        assert_eq!(slides[1].camera.unwrap().position, [0.0, 2.0, -8.0]);
        assert_eq!(slides[1].camera.unwrap().fov, 60.0);
        assert!(!slides[1].simulations[0].auto_play);
        assert_eq!(slides[1].tooltips[0].fade_in, DEFAULT_FADE_IN);
    }

    #[test]
    fn test_null_style_removes_it() {
        let m = parse("navigation:\n  style:\n    future: null\nslides: []\n").unwrap();
        let nav = m.navigation.unwrap();
        assert!(nav.style.future.is_none());
        assert!(nav.style.past.is_some());
    }

    #[test]
    fn test_empty_manifest_has_no_containers() {
        let m = parse("title: Empty\n").unwrap();
        assert!(m.slides.is_none());
        assert!(m.navigation.is_none());
        assert!(m.header.is_none());
    }

    #[test]
    fn test_bad_color_is_an_error() {
        let yaml = "navigation:\n  style:\n    past:\n      shape: filled-disk\n      color: red\n";
        assert!(parse(yaml).is_err());
    }

    #[test]
    fn test_display_name_fallback() {
        let m = parse("slides:\n  - texts: []\n").unwrap();
        let slides = m.slides.unwrap();
        assert_eq!(slides[0].display_name(3), "Slide 4");
    }
}
