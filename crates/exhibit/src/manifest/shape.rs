use thiserror::Error;

use crate::language::Language;

use super::Manifest;

/// A part of the exhibit the manifest was expected to provide but did not.
/// None of these stop the exhibit; the dependent feature is skipped.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ShapeWarning {
    #[error("exhibit has no `slides` container")]
    MissingSlides,

    #[error("`slides` container does not contain any slides")]
    EmptySlides,

    #[error("start slide {start} is out of range for {count} slides, using the last one")]
    StartOutOfRange { start: usize, count: usize },

    #[error("exhibit has no `navigation` container")]
    MissingNavigation,

    #[error("navigation has no indicator container")]
    MissingIndicatorContainer,

    #[error("navigation needs past, current and future indicator styles")]
    MissingIndicatorStyle,

    #[error("navigation needs both back and forward controls")]
    MissingControls,

    #[error("language toggle has no {0} label")]
    MissingLanguageLabel(Language),

    #[error("slide {slide} tooltip `{label}` has no text")]
    TooltipWithoutText { slide: usize, label: String },

    #[error("slide {slide} has no {language} text")]
    MissingTranslation { slide: usize, language: Language },
}

/// Everything in `manifest` that will be skipped at runtime.
pub fn validate(manifest: &Manifest) -> Vec<ShapeWarning> {
    let mut warnings = Vec::new();

    if let Some(toggle) = manifest
        .header
        .as_ref()
        .and_then(|h| h.language_toggle.as_ref())
    {
        if toggle.en_label.is_none() {
            warnings.push(ShapeWarning::MissingLanguageLabel(Language::En));
        }
        if toggle.fr_label.is_none() {
            warnings.push(ShapeWarning::MissingLanguageLabel(Language::Fr));
        }
    }

    let Some(slides) = manifest.slides.as_ref() else {
        warnings.push(ShapeWarning::MissingSlides);
        return warnings;
    };
    if slides.is_empty() {
        warnings.push(ShapeWarning::EmptySlides);
        return warnings;
    }
    if manifest.start_slide >= slides.len() {
        warnings.push(ShapeWarning::StartOutOfRange {
            start: manifest.start_slide,
            count: slides.len(),
        });
    }

    match manifest.navigation.as_ref() {
        None => warnings.push(ShapeWarning::MissingNavigation),
        Some(nav) => {
            if !nav.indicators {
                warnings.push(ShapeWarning::MissingIndicatorContainer);
            } else if !nav.style.is_complete() {
                warnings.push(ShapeWarning::MissingIndicatorStyle);
            }
            if !nav.back_control || !nav.forward_control {
                warnings.push(ShapeWarning::MissingControls);
            }
        }
    }

    for (index, slide) in slides.iter().enumerate() {
        for tooltip in &slide.tooltips {
            if tooltip.text.is_none() {
                warnings.push(ShapeWarning::TooltipWithoutText {
                    slide: index,
                    label: tooltip.label.clone(),
                });
            }
        }

        let tagged: Vec<Language> = slide.texts.iter().filter_map(|t| t.language).collect();
        if tagged.is_empty() {
            continue;
        }
        for language in [Language::En, Language::Fr] {
            if !tagged.contains(&language) {
                warnings.push(ShapeWarning::MissingTranslation {
                    slide: index,
                    language,
                });
            }
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::parse;

    #[test]
    fn test_clean_manifest() {
        let m = parse(
            "navigation: {}\nslides:\n  - texts:\n      - { language: EN, text: Hi }\n      - { language: FR, text: Salut }\n",
        )
        .unwrap();
        assert!(validate(&m).is_empty());
    }

    #[test]
    fn test_demo_manifest_is_clean() {
        let m = parse(include_str!("../../../../demos/forces.yaml")).unwrap();
        assert!(validate(&m).is_empty());
        assert_eq!(m.slides.map(|s| s.len()), Some(3));
    }

    #[test]
    fn test_missing_slides_stops_early() {
        let m = parse("title: nothing\n").unwrap();
        assert_eq!(validate(&m), vec![ShapeWarning::MissingSlides]);

        let m = parse("slides: []\n").unwrap();
        assert_eq!(validate(&m), vec![ShapeWarning::EmptySlides]);
    }

    #[test]
    fn test_navigation_problems() {
        let m = parse(
            "slides:\n  - name: a\nnavigation:\n  back_control: false\n  style:\n    past: null\n",
        )
        .unwrap();
        assert_eq!(
            validate(&m),
            vec![
                ShapeWarning::MissingIndicatorStyle,
                ShapeWarning::MissingControls
            ]
        );

        let m = parse("slides:\n  - name: a\n").unwrap();
        assert_eq!(validate(&m), vec![ShapeWarning::MissingNavigation]);
    }

    #[test]
    fn test_slide_level_problems() {
        let m = parse(
            "start_slide: 4\nnavigation: {}\nslides:\n  - texts:\n      - { language: EN, text: Hi }\n    tooltips:\n      - label: x\n",
        )
        .unwrap();
        assert_eq!(
            validate(&m),
            vec![
                ShapeWarning::StartOutOfRange { start: 4, count: 1 },
                ShapeWarning::TooltipWithoutText {
                    slide: 0,
                    label: "x".to_string()
                },
                ShapeWarning::MissingTranslation {
                    slide: 0,
                    language: Language::Fr
                },
            ]
        );
    }

    #[test]
    fn test_language_labels() {
        let m = parse("header:\n  language_toggle:\n    en_label: EN\nslides: []\n").unwrap();
        assert_eq!(
            validate(&m),
            vec![
                ShapeWarning::MissingLanguageLabel(Language::Fr),
                ShapeWarning::EmptySlides
            ]
        );
    }

    #[test]
    fn test_warning_messages() {
        assert_eq!(
            ShapeWarning::MissingLanguageLabel(Language::Fr).to_string(),
            "language toggle has no FR label"
        );
    }
}
