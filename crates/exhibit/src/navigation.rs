use serde::{Deserialize, Serialize};

use crate::manifest::ShapeWarning;
use crate::theme::Rgb;

/// Receives slide changes requested through the navigation widget.
pub trait NavigationListener {
    fn load_slide(&mut self, index: usize);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicatorState {
    Past,
    Current,
    Future,
}

impl IndicatorState {
    pub fn for_position(position: usize, current: usize) -> Self {
        use std::cmp::Ordering;
        match position.cmp(&current) {
            Ordering::Less => IndicatorState::Past,
            Ordering::Equal => IndicatorState::Current,
            Ordering::Greater => IndicatorState::Future,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IndicatorShape {
    FilledDisk,
    OpenCircle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndicatorStyle {
    pub shape: IndicatorShape,
    pub color: Rgb,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndicatorStyles {
    #[serde(default = "default_past")]
    pub past: Option<IndicatorStyle>,
    #[serde(default = "default_current")]
    pub current: Option<IndicatorStyle>,
    #[serde(default = "default_future")]
    pub future: Option<IndicatorStyle>,
}

fn default_past() -> Option<IndicatorStyle> {
    Some(IndicatorStyle {
        shape: IndicatorShape::FilledDisk,
        color: Rgb::BLACK,
    })
}

fn default_current() -> Option<IndicatorStyle> {
    Some(IndicatorStyle {
        shape: IndicatorShape::FilledDisk,
        color: Rgb::RED,
    })
}

fn default_future() -> Option<IndicatorStyle> {
    Some(IndicatorStyle {
        shape: IndicatorShape::OpenCircle,
        color: Rgb::WHITE,
    })
}

impl Default for IndicatorStyles {
    fn default() -> Self {
        Self {
            past: default_past(),
            current: default_current(),
            future: default_future(),
        }
    }
}

impl IndicatorStyles {
    fn resolve(&self) -> Option<[IndicatorStyle; 3]> {
        Some([self.past?, self.current?, self.future?])
    }

    pub fn is_complete(&self) -> bool {
        self.resolve().is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Indicator {
    pub state: IndicatorState,
    /// Unset until the first time the indicators are coloured.
    pub style: Option<IndicatorStyle>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Controls {
    pub back_visible: bool,
    pub forward_visible: bool,
}

/// Progress bubbles plus back/forward controls.
#[derive(Debug, Clone)]
pub struct NavigationWidget {
    /// `None` when there is nowhere to put indicators.
    indicators: Option<Vec<Indicator>>,
    styles: IndicatorStyles,
    /// `None` when either arrow is missing.
    controls: Option<Controls>,
    interactive: bool,
    slide_count: usize,
    current: usize,
}

impl NavigationWidget {
    pub fn new(
        has_indicator_container: bool,
        has_controls: bool,
        styles: IndicatorStyles,
        interactive: bool,
    ) -> Self {
        Self {
            indicators: has_indicator_container.then(Vec::new),
            styles,
            controls: has_controls.then_some(Controls {
                back_visible: false,
                forward_visible: false,
            }),
            interactive,
            slide_count: 0,
            current: 0,
        }
    }

    pub fn indicators(&self) -> &[Indicator] {
        self.indicators.as_deref().unwrap_or(&[])
    }

    pub fn controls(&self) -> Option<Controls> {
        self.controls
    }

    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    /// Sync the local index without notifying anyone.
    pub fn set_current(&mut self, index: usize) {
        self.current = index;
    }

    /// Replace all indicators with `count` fresh ones.
    pub fn rebuild_indicators(&mut self, count: usize) {
        self.slide_count = count;
        let Some(indicators) = self.indicators.as_mut() else {
            log::warn!("{}", ShapeWarning::MissingIndicatorContainer);
            return;
        };
        indicators.clear();
        indicators.extend((0..count).map(|_| Indicator {
            state: IndicatorState::Future,
            style: None,
        }));
    }

    pub fn set_active_indicator(&mut self, index: usize) {
        let Some(indicators) = self.indicators.as_mut() else {
            log::warn!("{}", ShapeWarning::MissingIndicatorContainer);
            return;
        };
        let Some([past, current, future]) = self.styles.resolve() else {
            log::warn!("{}", ShapeWarning::MissingIndicatorStyle);
            return;
        };

        for (i, indicator) in indicators.iter_mut().enumerate() {
            let state = IndicatorState::for_position(i, index);
            indicator.state = state;
            indicator.style = Some(match state {
                IndicatorState::Past => past,
                IndicatorState::Current => current,
                IndicatorState::Future => future,
            });
        }
    }

    pub fn update_control_visibility(&mut self, index: usize, count: usize) {
        let Some(controls) = self.controls.as_mut() else {
            log::warn!("{}", ShapeWarning::MissingControls);
            return;
        };
        controls.back_visible = index > 0;
        controls.forward_visible = index + 1 < count;
    }

    /// Recolour and update controls for `index` without notifying the
    /// listener. Used when the controller already knows the slide.
    pub fn show_slide(&mut self, index: usize) {
        self.set_active_indicator(index);
        self.update_control_visibility(index, self.slide_count);
    }

    pub fn change_slide(&mut self, index: usize, listener: &mut dyn NavigationListener) {
        self.show_slide(index);
        listener.load_slide(index);
    }

    /// Step back one slide. Refused on the first slide.
    pub fn go_back(&mut self, listener: &mut dyn NavigationListener) {
        let Some(index) = self.current.checked_sub(1) else {
            log::debug!("already on the first slide");
            return;
        };
        self.current = index;
        self.change_slide(index, listener);
    }

    /// Step forward one slide. Refused on the last slide.
    pub fn go_forward(&mut self, listener: &mut dyn NavigationListener) {
        let index = self.current + 1;
        if index >= self.slide_count {
            log::debug!("already on the last slide");
            return;
        }
        self.current = index;
        self.change_slide(index, listener);
    }

    pub fn handle_indicator_click(&mut self, index: usize, listener: &mut dyn NavigationListener) {
        if !self.interactive || index == self.current || index >= self.slide_count {
            return;
        }
        self.current = index;
        self.change_slide(index, listener);
    }
}
