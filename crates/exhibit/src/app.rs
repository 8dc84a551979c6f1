use eframe::egui;
use std::path::PathBuf;
use std::time::Instant;

use crate::anim::Tween;
use crate::config::Config;
use crate::language::{LabelTint, Language, TextRole};
use crate::manifest;
use crate::navigation::{IndicatorShape, IndicatorStyle};
use crate::shell::{Exhibit, LaunchOptions};
use crate::slide::Visibility;
use crate::theme::{Theme, ThemeKind};

/// Frames longer than this are treated as a hitch, not elapsed time.
const MAX_FRAME_DELTA: f32 = 0.1;
const HEADER_HEIGHT: f32 = 96.0;
const NAV_HEIGHT: f32 = 96.0;
const BUBBLE_RADIUS: f32 = 10.0;
const BUBBLE_GAP: f32 = 18.0;
const REFERENCE_CANVAS: egui::Vec2 = egui::vec2(1920.0, 1080.0);

const TOAST_HOLD: f32 = 1.0;
const TOAST_FADE: f32 = 0.5;
/// FPS readout refresh interval, in seconds.
const FPS_WINDOW: f32 = 0.5;

/// Short status message: holds, then fades out on unscaled frame time.
struct Toast {
    message: String,
    hold: f32,
    fade: Tween,
}

impl Toast {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            hold: TOAST_HOLD,
            fade: Tween::new(1.0, 0.0, TOAST_FADE),
        }
    }

    fn tick(&mut self, dt: f32) {
        let spill = (dt - self.hold).max(0.0);
        self.hold = (self.hold - dt).max(0.0);
        if spill > 0.0 {
            self.fade.tick(spill);
        }
    }

    fn opacity(&self) -> f32 {
        self.fade.value()
    }

    fn is_done(&self) -> bool {
        self.fade.is_complete()
    }
}

#[derive(Default)]
struct FpsCounter {
    frames: u32,
    window: f32,
    fps: f32,
}

impl FpsCounter {
    fn record(&mut self, dt: f32) {
        self.frames += 1;
        self.window += dt;
        if self.window >= FPS_WINDOW {
            self.fps = self.frames as f32 / self.window;
            self.frames = 0;
            self.window = 0.0;
        }
    }
}

/// Clickable and hoverable areas from the last painted frame.
#[derive(Default)]
struct HitRegions {
    back: Option<egui::Rect>,
    forward: Option<egui::Rect>,
    bubbles: Vec<egui::Rect>,
    language: Option<egui::Rect>,
    /// (index into `Exhibit::tooltips`, anchor rect)
    tooltips: Vec<(usize, egui::Rect)>,
}

struct ExhibitApp {
    exhibit: Exhibit,
    theme: Theme,
    hits: HitRegions,
    hovered_tooltip: Option<usize>,
    show_hud: bool,
    toast: Option<Toast>,
    last_esc: Option<Instant>,
    last_frame: Instant,
    fps: FpsCounter,
}

impl ExhibitApp {
    fn new(exhibit: Exhibit, theme: Theme) -> Self {
        Self {
            exhibit,
            theme,
            hits: HitRegions::default(),
            hovered_tooltip: None,
            show_hud: false,
            toast: None,
            last_esc: None,
            last_frame: Instant::now(),
            fps: FpsCounter::default(),
        }
    }

    fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
        self.toast = Some(Toast::new(format!("Theme: {}", self.theme.kind.name())));
    }

    fn toggle_pause(&mut self) {
        let paused = self.exhibit.toggle_pause();
        let message = if paused { "Paused" } else { "Resumed" };
        self.toast = Some(Toast::new(message));
    }

    fn toggle_language(&mut self) {
        let before = self.exhibit.language();
        self.exhibit.toggle_language();
        let after = self.exhibit.language();
        if before != after {
            self.toast = Some(Toast::new(format!("Language: {after}")));
        }
    }

    /// Everything is laid out on a 1920x1080 canvas and scaled to fit.
    fn layout_scale(rect: egui::Rect) -> f32 {
        (rect.size() / REFERENCE_CANVAS).min_elem()
    }

    fn handle_pointer(&mut self, ctx: &egui::Context) {
        let (clicked, pointer_pos) = ctx.input(|i| (i.pointer.primary_clicked(), i.pointer.hover_pos()));

        // Tooltips only react on the current slide
        let current = self.exhibit.current_slide();
        let hovered = pointer_pos.and_then(|pos| {
            self.hits
                .tooltips
                .iter()
                .find(|(index, rect)| {
                    rect.contains(pos)
                        && self.exhibit.tooltips().get(*index).map(|t| t.slide) == Some(current)
                })
                .map(|(index, _)| *index)
        });
        if hovered != self.hovered_tooltip {
            if let Some(old) = self.hovered_tooltip {
                self.exhibit.pointer_exit(old);
            }
            if let Some(new) = hovered {
                self.exhibit.pointer_enter(new);
            }
            self.hovered_tooltip = hovered;
        }

        let (true, Some(pos)) = (clicked, pointer_pos) else {
            return;
        };
        if self.hits.back.is_some_and(|r| r.contains(pos)) {
            self.exhibit.go_back();
        } else if self.hits.forward.is_some_and(|r| r.contains(pos)) {
            self.exhibit.go_forward();
        } else if self.hits.language.is_some_and(|r| r.contains(pos)) {
            self.toggle_language();
        } else if let Some(index) = self.hits.bubbles.iter().position(|r| r.contains(pos)) {
            self.exhibit.click_indicator(index);
        }
    }
}

impl eframe::App for ExhibitApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        let dt = (now - self.last_frame).as_secs_f32().min(MAX_FRAME_DELTA);
        self.last_frame = now;
        self.fps.record(dt);

        // Collect viewport commands to send AFTER the input closure
        // (sending inside ctx.input() causes RwLock deadlock)
        let mut viewport_cmds: Vec<egui::ViewportCommand> = Vec::new();
        let mut forward = false;
        let mut back = false;
        let mut language = false;
        let mut pause = false;
        let mut theme = false;

        ctx.input(|i| {
            if i.key_pressed(egui::Key::Q) {
                viewport_cmds.push(egui::ViewportCommand::Close);
                return;
            }

            // ESC: double-tap to quit
            if i.key_pressed(egui::Key::Escape) {
                if let Some(last) = self.last_esc {
                    if last.elapsed().as_secs_f32() < 1.0 {
                        viewport_cmds.push(egui::ViewportCommand::Close);
                        return;
                    }
                }
                self.last_esc = Some(Instant::now());
                self.toast = Some(Toast::new("Press Esc again to exit"));
                return;
            }

            if i.key_pressed(egui::Key::F) {
                viewport_cmds.push(egui::ViewportCommand::Fullscreen(
                    !i.viewport().fullscreen.unwrap_or(false),
                ));
                return;
            }

            if i.key_pressed(egui::Key::ArrowRight)
                || i.key_pressed(egui::Key::N)
                || i.key_pressed(egui::Key::Space)
            {
                forward = true;
            }
            if i.key_pressed(egui::Key::ArrowLeft) || i.key_pressed(egui::Key::P) {
                back = true;
            }
            if i.key_pressed(egui::Key::L) && self.exhibit.header_visible() {
                language = true;
            }
            if i.key_pressed(egui::Key::K) {
                pause = true;
            }
            if i.key_pressed(egui::Key::D) {
                theme = true;
            }
            if i.key_pressed(egui::Key::H) {
                self.show_hud = !self.show_hud;
            }
        });

        for cmd in viewport_cmds {
            ctx.send_viewport_cmd(cmd);
        }

        if forward {
            self.exhibit.go_forward();
        }
        if back {
            self.exhibit.go_back();
        }
        if language {
            self.toggle_language();
        }
        if pause {
            self.toggle_pause();
        }
        if theme {
            self.toggle_theme();
        }

        self.handle_pointer(ctx);
        self.exhibit.tick(dt);

        if let Some(toast) = self.toast.as_mut() {
            toast.tick(dt);
            if toast.is_done() {
                self.toast = None;
            }
        }

        let bg = self.theme.background;
        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(bg).inner_margin(0.0))
            .show(ctx, |ui| {
                let rect = ui.max_rect();
                ui.painter().rect_filled(rect, 0.0, bg);
                let scale = Self::layout_scale(rect);

                let header_h = if self.exhibit.header_visible() {
                    HEADER_HEIGHT * scale
                } else {
                    0.0
                };
                let nav_h = if self.exhibit.navigation().is_some() {
                    NAV_HEIGHT * scale
                } else {
                    0.0
                };
                let header_rect = egui::Rect::from_min_max(
                    rect.left_top(),
                    egui::pos2(rect.right(), rect.top() + header_h),
                );
                let nav_rect = egui::Rect::from_min_max(
                    egui::pos2(rect.left(), rect.bottom() - nav_h),
                    rect.right_bottom(),
                );
                let slide_rect = egui::Rect::from_min_max(
                    egui::pos2(rect.left(), header_rect.bottom()),
                    egui::pos2(rect.right(), nav_rect.top()),
                );

                self.hits = HitRegions::default();
                self.draw_slides(ui, slide_rect, scale);
                if self.exhibit.header_visible() {
                    self.draw_header(ui, header_rect, scale);
                }
                if self.exhibit.navigation().is_some() {
                    self.draw_navigation(ui, nav_rect, scale);
                }
                self.draw_chrome(ui, rect, scale);

                if let Some(ref toast) = self.toast {
                    draw_toast(ui, toast, &self.theme, rect, scale);
                }
                if self.show_hud {
                    draw_hud(ui, &self.theme, rect, scale);
                }
            });

        if self.exhibit.is_animating() || self.toast.is_some() {
            ctx.request_repaint();
        }
    }
}

impl ExhibitApp {
    fn draw_slides(&mut self, ui: &egui::Ui, rect: egui::Rect, scale: f32) {
        let current = self.exhibit.current_slide();
        let count = self.exhibit.controller().slide_count();
        for index in 0..count {
            let Some(slide) = self.exhibit.controller().slide(index) else {
                continue;
            };
            // Slides without a group are only drawn while current
            let opacity = match slide.opacity() {
                Some(_) if slide.visibility() == Visibility::Hidden => continue,
                Some(opacity) => opacity,
                None if index == current => 1.0,
                None => continue,
            };
            self.draw_slide(ui, index, rect, opacity, scale);
        }
    }

    fn draw_slide(&mut self, ui: &egui::Ui, index: usize, rect: egui::Rect, opacity: f32, scale: f32) {
        let padding = 80.0 * scale;
        let content = rect.shrink(padding);
        let theme = &self.theme;
        let mut y = content.top();

        for role in [TextRole::Title, TextRole::Body, TextRole::Caption] {
            let (size, color) = match role {
                TextRole::Title => (theme.title_size, theme.heading_color),
                TextRole::Body => (theme.body_size, theme.foreground),
                TextRole::Caption => (theme.caption_size, theme.accent),
            };
            let color = Theme::faded(color, opacity);
            for text in self
                .exhibit
                .texts()
                .visible_for(index)
                .filter(|t| t.role == role)
            {
                let galley = ui.painter().layout(
                    text.text.clone(),
                    egui::FontId::proportional(size * scale),
                    color,
                    content.width() * 0.6,
                );
                let height = galley.rect.height();
                ui.painter()
                    .galley(egui::pos2(content.left(), y), galley, color);
                y += height + 24.0 * scale;
            }
        }

        let Some(slide) = self.exhibit.controller().slide(index) else {
            return;
        };

        // Simulations: one orbit per handler, stacked on the right
        let orbit_radius = 90.0 * scale;
        for (i, activation) in slide.activations.iter().enumerate() {
            let center = egui::pos2(
                content.right() - orbit_radius - 20.0 * scale,
                content.top() + orbit_radius + i as f32 * (orbit_radius * 2.0 + 60.0 * scale),
            );
            let ring = Theme::faded(theme.foreground, 0.3 * opacity);
            ui.painter()
                .circle_stroke(center, orbit_radius, egui::Stroke::new(2.0 * scale, ring));
            let angle = activation.phase() * std::f32::consts::TAU;
            let dot = center + orbit_radius * egui::vec2(angle.cos(), angle.sin());
            ui.painter().circle_filled(
                dot,
                12.0 * scale,
                Theme::faded(theme.accent, opacity),
            );
            let state = if activation.is_running() {
                "running"
            } else if activation.is_active() && activation.is_enabled() {
                "paused"
            } else {
                "off"
            };
            let label = format!("{} ({state}, {:.1}s)", activation.name(), activation.elapsed());
            let label_color = Theme::faded(theme.foreground, 0.6 * opacity);
            let galley = ui.painter().layout_no_wrap(
                label,
                egui::FontId::proportional(18.0 * scale),
                label_color,
            );
            let pos = egui::pos2(
                center.x - galley.rect.width() / 2.0,
                center.y + orbit_radius + 10.0 * scale,
            );
            ui.painter().galley(pos, galley, label_color);
        }

        // Camera readout while this slide holds the camera
        let camera = self.exhibit.controller().camera();
        if camera.holder() == Some(index) {
            let pose = camera.pose();
            let text = format!(
                "camera ({:.1}, {:.1}, {:.1}) \u{2192} ({:.1}, {:.1}, {:.1})  fov {:.0}\u{00b0}",
                pose.position[0],
                pose.position[1],
                pose.position[2],
                pose.look_at[0],
                pose.look_at[1],
                pose.look_at[2],
                pose.fov
            );
            let color = Theme::faded(theme.foreground, 0.35 * opacity);
            let galley = ui.painter().layout_no_wrap(
                text,
                egui::FontId::monospace(14.0 * scale),
                color,
            );
            let pos = egui::pos2(content.left(), rect.bottom() - 30.0 * scale);
            ui.painter().galley(pos, galley, color);
        }

        self.draw_tooltips(ui, index, content, opacity, scale);
    }

    fn draw_tooltips(
        &mut self,
        ui: &egui::Ui,
        slide: usize,
        content: egui::Rect,
        opacity: f32,
        scale: f32,
    ) {
        let theme = &self.theme;
        let padding = 10.0 * scale;
        let mut x = content.left();
        let y = content.bottom() - 40.0 * scale;

        for (index, spot) in self.exhibit.tooltips().iter().enumerate() {
            if spot.slide != slide {
                continue;
            }
            let tooltip = &spot.tooltip;
            let chip_color = Theme::faded(theme.accent, opacity);
            let galley = ui.painter().layout_no_wrap(
                format!("\u{24d8} {}", tooltip.label()),
                egui::FontId::proportional(22.0 * scale),
                chip_color,
            );
            let chip = egui::Rect::from_min_size(
                egui::pos2(x, y),
                galley.rect.size() + egui::vec2(padding * 2.0, padding * 2.0),
            );
            ui.painter().rect_filled(
                chip,
                8.0 * scale,
                Theme::faded(theme.panel_background, opacity),
            );
            ui.painter()
                .galley(chip.min + egui::vec2(padding, padding), galley, chip_color);
            self.hits.tooltips.push((index, chip));
            x = chip.right() + 16.0 * scale;

            let alpha = tooltip.alpha() * opacity;
            let Some(text) = tooltip.text() else {
                continue;
            };
            if alpha <= 0.0 {
                continue;
            }
            let tip_scale = tooltip.scale() * scale;
            let text_color = Theme::faded(theme.foreground, alpha);
            let tip_galley = ui.painter().layout(
                text.to_string(),
                egui::FontId::proportional(20.0 * tip_scale),
                text_color,
                420.0 * scale,
            );
            let tip_padding = 12.0 * tip_scale;
            let tip_size = tip_galley.rect.size() + egui::vec2(tip_padding * 2.0, tip_padding * 2.0);
            let tip_rect = egui::Rect::from_min_size(
                egui::pos2(chip.left(), chip.top() - tip_size.y - 8.0 * scale),
                tip_size,
            );
            ui.painter().rect_filled(
                tip_rect,
                8.0 * scale,
                Theme::faded(theme.panel_background, alpha * 0.95),
            );
            ui.painter().galley(
                tip_rect.min + egui::vec2(tip_padding, tip_padding),
                tip_galley,
                text_color,
            );
        }
    }

    fn draw_header(&mut self, ui: &egui::Ui, rect: egui::Rect, scale: f32) {
        let theme = &self.theme;
        ui.painter().rect_filled(rect, 0.0, theme.panel_background);

        let title_galley = ui.painter().layout_no_wrap(
            self.exhibit.title().to_string(),
            egui::FontId::proportional(32.0 * scale),
            theme.heading_color,
        );
        let title_pos = egui::pos2(
            rect.left() + 40.0 * scale,
            rect.center().y - title_galley.rect.height() / 2.0,
        );
        ui.painter()
            .galley(title_pos, title_galley, theme.heading_color);

        let Some(toggle) = self.exhibit.language_toggle() else {
            return;
        };

        // Labels laid out right to left: FR then EN
        let mut right = rect.right() - 40.0 * scale;
        let mut bounds: Option<egui::Rect> = None;
        for language in [Language::Fr, Language::En] {
            let Some(label) = toggle.label(language) else {
                continue;
            };
            let color = match toggle.tint(language) {
                LabelTint::Active => theme.label_active,
                LabelTint::Inactive => theme.label_inactive,
            };
            let galley = ui.painter().layout_no_wrap(
                label.to_string(),
                egui::FontId::proportional(26.0 * scale),
                color,
            );
            let pos = egui::pos2(
                right - galley.rect.width(),
                rect.center().y - galley.rect.height() / 2.0,
            );
            let label_rect = egui::Rect::from_min_size(pos, galley.rect.size());
            bounds = Some(bounds.map_or(label_rect, |b| b.union(label_rect)));
            ui.painter().galley(pos, galley, color);
            right = pos.x - 16.0 * scale;
        }
        if toggle.can_toggle() {
            self.hits.language = bounds.map(|b| b.expand(8.0 * scale));
        }
    }

    fn draw_navigation(&mut self, ui: &egui::Ui, rect: egui::Rect, scale: f32) {
        let theme = &self.theme;
        let Some(nav) = self.exhibit.navigation() else {
            return;
        };

        let radius = BUBBLE_RADIUS * scale;
        let gap = BUBBLE_GAP * scale;
        let indicators = nav.indicators();
        let count = indicators.len() as f32;
        let total_w = if indicators.is_empty() {
            0.0
        } else {
            count * radius * 2.0 + (count - 1.0) * gap
        };
        let mut x = rect.center().x - total_w / 2.0 + radius;
        let cy = rect.center().y;

        for indicator in indicators {
            let center = egui::pos2(x, cy);
            if let Some(style) = indicator.style {
                draw_bubble(ui, center, radius, style, scale);
            }
            if nav.is_interactive() {
                self.hits.bubbles.push(egui::Rect::from_center_size(
                    center,
                    egui::vec2(radius * 2.0 + gap / 2.0, radius * 2.0 + gap / 2.0),
                ));
            }
            x += radius * 2.0 + gap;
        }

        let Some(controls) = nav.controls() else {
            return;
        };
        let arrow = 18.0 * scale;
        let margin = 48.0 * scale;
        let color = theme.foreground;
        if controls.back_visible {
            let c = egui::pos2(rect.center().x - total_w / 2.0 - margin, cy);
            draw_arrow(ui, c, arrow, -1.0, color);
            self.hits.back = Some(egui::Rect::from_center_size(c, egui::vec2(arrow * 3.0, arrow * 3.0)));
        }
        if controls.forward_visible {
            let c = egui::pos2(rect.center().x + total_w / 2.0 + margin, cy);
            draw_arrow(ui, c, arrow, 1.0, color);
            self.hits.forward =
                Some(egui::Rect::from_center_size(c, egui::vec2(arrow * 3.0, arrow * 3.0)));
        }
    }

    fn draw_chrome(&self, ui: &egui::Ui, rect: egui::Rect, scale: f32) {
        let count = self.exhibit.controller().slide_count();
        if self.exhibit.controller().has_slides() {
            let counter_text = format!("{} / {}", self.exhibit.current_slide() + 1, count);
            let counter_color = Theme::faded(self.theme.foreground, 0.3);
            let counter_galley = ui.painter().layout_no_wrap(
                counter_text,
                egui::FontId::monospace(14.0 * scale),
                counter_color,
            );
            let counter_pos = egui::pos2(
                rect.right() - counter_galley.rect.width() - 16.0 * scale,
                rect.bottom() - 30.0 * scale,
            );
            ui.painter()
                .galley(counter_pos, counter_galley, counter_color);
        } else {
            let color = Theme::faded(self.theme.foreground, 0.5);
            let galley = ui.painter().layout_no_wrap(
                "This exhibit has no slides".to_string(),
                egui::FontId::proportional(28.0 * scale),
                color,
            );
            let pos = rect.center() - galley.rect.size() / 2.0;
            ui.painter().galley(pos, galley, color);
        }

        if self.exhibit.is_paused() {
            let color = Theme::faded(self.theme.accent, 0.8);
            let galley = ui.painter().layout_no_wrap(
                "PAUSED".to_string(),
                egui::FontId::monospace(16.0 * scale),
                color,
            );
            let pos = egui::pos2(rect.left() + 16.0 * scale, rect.bottom() - 30.0 * scale);
            ui.painter().galley(pos, galley, color);
        }

        // FPS overlay
        let fps_text = format!("{:.0} fps", self.fps.fps);
        let fps_color = Theme::faded(self.theme.foreground, 0.3);
        let fps_galley =
            ui.painter()
                .layout_no_wrap(fps_text, egui::FontId::monospace(14.0 * scale), fps_color);
        let fps_pos = egui::pos2(
            rect.right() - fps_galley.rect.width() - 12.0 * scale,
            rect.top() + 10.0 * scale,
        );
        ui.painter().galley(fps_pos, fps_galley, fps_color);
    }
}

fn draw_bubble(ui: &egui::Ui, center: egui::Pos2, radius: f32, style: IndicatorStyle, scale: f32) {
    let color = style.color.to_color32();
    match style.shape {
        IndicatorShape::FilledDisk => {
            ui.painter().circle_filled(center, radius, color);
        }
        IndicatorShape::OpenCircle => {
            ui.painter().circle_stroke(
                center,
                radius - scale,
                egui::Stroke::new(2.0 * scale, color),
            );
        }
    }
}

/// A filled triangle pointing left (`dir < 0`) or right.
fn draw_arrow(ui: &egui::Ui, center: egui::Pos2, size: f32, dir: f32, color: egui::Color32) {
    let tip = center + egui::vec2(dir * size, 0.0);
    let top = center + egui::vec2(-dir * size * 0.6, -size);
    let bottom = center + egui::vec2(-dir * size * 0.6, size);
    ui.painter().add(egui::Shape::convex_polygon(
        vec![tip, top, bottom],
        color,
        egui::Stroke::NONE,
    ));
}

/// Pill above the navigation bar.
fn draw_toast(ui: &egui::Ui, toast: &Toast, theme: &Theme, rect: egui::Rect, scale: f32) {
    let opacity = toast.opacity();
    if opacity <= 0.0 {
        return;
    }
    let text_color = Theme::faded(theme.heading_color, opacity);
    let galley = ui.painter().layout_no_wrap(
        toast.message.clone(),
        egui::FontId::proportional(22.0 * scale),
        text_color,
    );
    let pad = egui::vec2(28.0, 12.0) * scale;
    let size = galley.rect.size() + pad * 2.0;
    let center = egui::pos2(rect.center().x, rect.bottom() - (NAV_HEIGHT + 48.0) * scale);
    let pill = egui::Rect::from_center_size(center, size);
    ui.painter()
        .rect_filled(pill, size.y / 2.0, Theme::faded(theme.panel_background, opacity));
    ui.painter().rect_stroke(
        pill,
        size.y / 2.0,
        egui::Stroke::new(1.5 * scale, Theme::faded(theme.accent, opacity)),
        egui::StrokeKind::Inside,
    );
    ui.painter().galley(pill.min + pad, galley, text_color);
}

const SHORTCUTS: &[(&str, &str)] = &[
    ("\u{2192}  N  Space", "next slide"),
    ("\u{2190}  P", "previous slide"),
    ("click bubble", "jump to slide"),
    ("L", "switch language"),
    ("K", "pause simulations"),
    ("D", "day / night palette"),
    ("F", "fullscreen"),
    ("H", "this help"),
    ("Esc Esc  Q", "leave the exhibit"),
];

/// Help panel docked to the left edge, keys measured so the columns align.
fn draw_hud(ui: &egui::Ui, theme: &Theme, rect: egui::Rect, scale: f32) {
    let key_font = egui::FontId::monospace(16.0 * scale);
    let desc_font = egui::FontId::proportional(17.0 * scale);
    let key_color = theme.accent;
    let desc_color = theme.foreground;

    let rows: Vec<_> = SHORTCUTS
        .iter()
        .map(|(key, desc)| {
            (
                ui.painter()
                    .layout_no_wrap(key.to_string(), key_font.clone(), key_color),
                ui.painter()
                    .layout_no_wrap(desc.to_string(), desc_font.clone(), desc_color),
            )
        })
        .collect();
    let key_w = rows.iter().map(|(k, _)| k.rect.width()).fold(0.0, f32::max);
    let desc_w = rows.iter().map(|(_, d)| d.rect.width()).fold(0.0, f32::max);
    let row_h = 30.0 * scale;
    let gutter = 20.0 * scale;
    let pad = 22.0 * scale;

    let size = egui::vec2(
        key_w + gutter + desc_w + pad * 2.0,
        rows.len() as f32 * row_h + pad * 2.0,
    );
    let panel = egui::Rect::from_min_size(
        egui::pos2(rect.left() + 32.0 * scale, rect.center().y - size.y / 2.0),
        size,
    );
    ui.painter()
        .rect_filled(panel, 10.0 * scale, Theme::faded(theme.panel_background, 0.95));
    ui.painter().line_segment(
        [panel.left_top(), panel.left_bottom()],
        egui::Stroke::new(4.0 * scale, theme.accent),
    );

    let mut y = panel.top() + pad;
    for (key, desc) in rows {
        let key_x = panel.left() + pad + key_w - key.rect.width();
        ui.painter().galley(egui::pos2(key_x, y), key, key_color);
        ui.painter().galley(
            egui::pos2(panel.left() + pad + key_w + gutter, y),
            desc,
            desc_color,
        );
        y += row_h;
    }
}

/// Config wins over the manifest. Unknown names fall back to light.
fn resolve_theme(config: Option<&str>, manifest: Option<&str>) -> ThemeKind {
    let Some(name) = config.or(manifest) else {
        return ThemeKind::default();
    };
    ThemeKind::from_name(name).unwrap_or_else(|| {
        log::warn!("unknown theme `{name}`, using light");
        ThemeKind::default()
    })
}

pub fn run(
    file: PathBuf,
    windowed: bool,
    start_slide: Option<usize>,
    language: Option<Language>,
) -> anyhow::Result<()> {
    let manifest = manifest::load(&file)?;
    let config = Config::load_or_default();

    // CLI flags override config, config overrides the manifest
    let options = LaunchOptions {
        start_slide: start_slide
            .or(config.start_slide())
            .map(|s| s.saturating_sub(1)),
        language: language.or(config.language()),
    };
    let theme = Theme::new(resolve_theme(config.theme(), manifest.theme.as_deref()));

    let mut exhibit = Exhibit::from_manifest(&manifest, options);
    exhibit.start();
    let timing = exhibit.controller().timing();
    log::info!(
        "presenting {} ({} slides)",
        file.display(),
        exhibit.controller().slide_count()
    );
    log::debug!(
        "fade {:.2}s, fade-out delay {:.2}s, {:?}",
        timing.duration,
        timing.fade_out_delay,
        timing.easing
    );

    let title = exhibit.title().to_string();
    let viewport = if windowed {
        egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_title(&title)
    } else {
        egui::ViewportBuilder::default()
            .with_fullscreen(true)
            .with_title(&title)
    };

    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        &title,
        options,
        Box::new(move |_cc| Ok(Box::new(ExhibitApp::new(exhibit, theme)))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}
