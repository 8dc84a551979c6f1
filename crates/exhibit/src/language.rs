use serde::{Deserialize, Serialize};

use crate::manifest::ShapeWarning;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "EN", alias = "en")]
    En,
    #[serde(rename = "FR", alias = "fr")]
    Fr,
}

impl Language {
    pub fn tag(self) -> &'static str {
        match self {
            Language::En => "EN",
            Language::Fr => "FR",
        }
    }

    pub fn other(self) -> Self {
        match self {
            Language::En => Language::Fr,
            Language::Fr => Language::En,
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.to_ascii_uppercase().as_str() {
            "EN" => Some(Language::En),
            "FR" => Some(Language::Fr),
            _ => None,
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// Told when the user picks another language.
pub trait LanguageListener {
    fn set_language(&mut self, language: Language);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelTint {
    Active,
    Inactive,
}

/// The EN/FR switch in the header.
#[derive(Debug, Clone)]
pub struct LanguageToggle {
    en_label: Option<String>,
    fr_label: Option<String>,
    language: Language,
    can_toggle: bool,
}

impl LanguageToggle {
    pub fn new(en_label: Option<String>, fr_label: Option<String>) -> Self {
        let mut can_toggle = true;
        if en_label.is_none() {
            log::warn!("{}", ShapeWarning::MissingLanguageLabel(Language::En));
            can_toggle = false;
        }
        if fr_label.is_none() {
            log::warn!("{}", ShapeWarning::MissingLanguageLabel(Language::Fr));
            can_toggle = false;
        }
        Self {
            en_label,
            fr_label,
            language: Language::En,
            can_toggle,
        }
    }

    pub fn can_toggle(&self) -> bool {
        self.can_toggle
    }

    pub fn label(&self, language: Language) -> Option<&str> {
        match language {
            Language::En => self.en_label.as_deref(),
            Language::Fr => self.fr_label.as_deref(),
        }
    }

    pub fn tint(&self, language: Language) -> LabelTint {
        if language == self.language {
            LabelTint::Active
        } else {
            LabelTint::Inactive
        }
    }

    /// Show `language` as selected without notifying anyone. Works on an
    /// inert toggle too, so the tint always matches the shown text.
    pub fn select(&mut self, language: Language) {
        self.language = language;
    }

    /// Swap languages and tell `listener`. Inert toggles ignore clicks.
    pub fn click(&mut self, listener: &mut dyn LanguageListener) {
        if !self.can_toggle {
            log::debug!("language toggle is inert");
            return;
        }
        self.language = self.language.other();
        listener.set_language(self.language);
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TextRole {
    Title,
    #[default]
    Body,
    Caption,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextElement {
    pub slide: usize,
    pub role: TextRole,
    /// Untagged text is shown in every language.
    pub language: Option<Language>,
    pub text: String,
    pub visible: bool,
}

/// Every piece of slide text, shown or hidden by language tag.
#[derive(Debug, Clone, Default)]
pub struct TextRegistry {
    elements: Vec<TextElement>,
    language: Language,
}

impl TextRegistry {
    pub fn push(
        &mut self,
        slide: usize,
        role: TextRole,
        language: Option<Language>,
        text: impl Into<String>,
    ) {
        let visible = language.is_none_or(|l| l == self.language);
        self.elements.push(TextElement {
            slide,
            role,
            language,
            text: text.into(),
            visible,
        });
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn visible_for(&self, slide: usize) -> impl Iterator<Item = &TextElement> {
        self.elements
            .iter()
            .filter(move |e| e.slide == slide && e.visible)
    }
}

impl LanguageListener for TextRegistry {
    fn set_language(&mut self, language: Language) {
        self.language = language;
        for element in &mut self.elements {
            if let Some(tag) = element.language {
                element.visible = tag == language;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    impl LanguageToggle {
        pub(crate) fn language(&self) -> Language {
            self.language
        }
    }

    #[derive(Default)]
    struct Recorder {
        seen: Vec<Language>,
    }

    impl LanguageListener for Recorder {
        fn set_language(&mut self, language: Language) {
            self.seen.push(language);
        }
    }

    fn toggle() -> LanguageToggle {
        LanguageToggle::new(Some("EN".to_string()), Some("FR".to_string()))
    }

    #[test]
    fn test_toggle_round_trip() {
        let mut t = toggle();
        let mut rec = Recorder::default();
        assert_eq!(t.tint(Language::En), LabelTint::Active);
        assert_eq!(t.tint(Language::Fr), LabelTint::Inactive);

        t.click(&mut rec);
        assert_eq!(t.language(), Language::Fr);
        assert_eq!(t.tint(Language::En), LabelTint::Inactive);
        assert_eq!(t.tint(Language::Fr), LabelTint::Active);

        t.click(&mut rec);
        assert_eq!(t.language(), Language::En);
        assert_eq!(t.tint(Language::En), LabelTint::Active);
        assert_eq!(rec.seen, vec![Language::Fr, Language::En]);
    }

    #[test]
    fn test_missing_label_makes_toggle_inert() {
        let mut t = LanguageToggle::new(Some("EN".to_string()), None);
        let mut rec = Recorder::default();
        assert!(!t.can_toggle());

        t.click(&mut rec);
        assert_eq!(t.language(), Language::En);
        assert!(rec.seen.is_empty());
    }

    #[test]
    fn test_inert_toggle_still_shows_selected_language() {
        let mut t = LanguageToggle::new(Some("EN".to_string()), None);
        let mut rec = Recorder::default();
        t.select(Language::Fr);
        assert_eq!(t.language(), Language::Fr);
        assert_eq!(t.tint(Language::En), LabelTint::Inactive);

        t.click(&mut rec);
        assert_eq!(t.language(), Language::Fr);
        assert!(rec.seen.is_empty());
    }

    #[test]
    fn test_registry_follows_language() {
        let mut texts = TextRegistry::default();
        texts.push(0, TextRole::Title, Some(Language::En), "Hello");
        texts.push(0, TextRole::Title, Some(Language::Fr), "Bonjour");
        texts.push(0, TextRole::Caption, None, "E = mc²");
        texts.push(1, TextRole::Body, Some(Language::En), "Other slide");

        let shown: Vec<_> = texts.visible_for(0).map(|e| e.text.as_str()).collect();
        assert_eq!(shown, vec!["Hello", "E = mc²"]);

        texts.set_language(Language::Fr);
        let shown: Vec<_> = texts.visible_for(0).map(|e| e.text.as_str()).collect();
        assert_eq!(shown, vec!["Bonjour", "E = mc²"]);
        assert_eq!(texts.visible_for(1).count(), 0);
    }

    #[test]
    fn test_language_tags() {
        assert_eq!(Language::from_tag("fr"), Some(Language::Fr));
        assert_eq!(Language::from_tag("DE"), None);
        assert_eq!(Language::En.to_string(), "EN");
    }
}
