use egui::{Color32, FontId, Rounding, Stroke, Visuals};

// ── Palette ──────────────────────────────────────────────────────────────────

pub const BG_DARK: Color32 = Color32::from_rgb(18, 20, 24);
pub const BG_PANEL: Color32 = Color32::from_rgb(26, 29, 34);
pub const BG_CARD: Color32 = Color32::from_rgb(32, 36, 42);
pub const BG_CARD_HOVER: Color32 = Color32::from_rgb(40, 44, 52);
pub const BG_FIELD: Color32 = Color32::from_rgb(20, 22, 27);
pub const BG_SELECTED: Color32 = Color32::from_rgba_premultiplied(60, 36, 7, 70);
pub const BACKDROP: Color32 = Color32::from_rgba_premultiplied(0, 0, 0, 128);

pub const BORDER_SUBTLE: Color32 = Color32::from_rgb(48, 52, 60);

pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(236, 236, 232);
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(170, 172, 168);
pub const TEXT_DIM: Color32 = Color32::from_rgb(110, 114, 118);

/// Copper accent used for primary buttons and progress fills.
pub const ACCENT: Color32 = Color32::from_rgb(0xc1, 0x78, 0x17);
pub const ACCENT_SOFT: Color32 = Color32::from_rgb(0x7c, 0x98, 0x85);
pub const HIGHLIGHT: Color32 = Color32::from_rgb(240, 190, 90);

// ── Sizes ────────────────────────────────────────────────────────────────────

pub const CARD_WIDTH: f32 = 300.0;
pub const CARD_ROUNDING: f32 = 10.0;
pub const STATUS_BAR_HEIGHT: f32 = 24.0;
pub const TOAST_WIDTH: f32 = 320.0;
pub const DIALOG_WIDTH: f32 = 340.0;

// ── Fonts ────────────────────────────────────────────────────────────────────

pub fn font_hero() -> FontId {
    FontId::proportional(34.0)
}

pub fn font_heading() -> FontId {
    FontId::proportional(18.0)
}

pub fn font_menu() -> FontId {
    FontId::proportional(13.0)
}

pub fn font_status() -> FontId {
    FontId::proportional(11.0)
}

pub fn font_icon() -> FontId {
    FontId::proportional(22.0)
}

// ── Apply custom visuals ─────────────────────────────────────────────────────

pub fn apply_theme(ctx: &egui::Context) {
    let mut visuals = Visuals::dark();

    visuals.override_text_color = Some(TEXT_PRIMARY);
    visuals.panel_fill = BG_PANEL;
    visuals.window_fill = BG_CARD;
    visuals.extreme_bg_color = BG_FIELD; // TextEdit bg

    visuals.widgets.noninteractive.bg_fill = BG_PANEL;
    visuals.widgets.noninteractive.bg_stroke = Stroke::new(1.0, BORDER_SUBTLE);
    visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, TEXT_SECONDARY);
    visuals.widgets.noninteractive.rounding = Rounding::same(6.0);

    visuals.widgets.inactive.bg_fill = Color32::from_rgb(44, 48, 56);
    visuals.widgets.inactive.bg_stroke = Stroke::new(1.0, BORDER_SUBTLE);
    visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, TEXT_PRIMARY);
    visuals.widgets.inactive.rounding = Rounding::same(6.0);

    visuals.widgets.hovered.bg_fill = Color32::from_rgb(54, 58, 68);
    visuals.widgets.hovered.bg_stroke = Stroke::new(1.0, ACCENT);
    visuals.widgets.hovered.fg_stroke = Stroke::new(1.0, TEXT_PRIMARY);
    visuals.widgets.hovered.rounding = Rounding::same(6.0);

    visuals.widgets.active.bg_fill = Color32::from_rgb(62, 66, 76);
    visuals.widgets.active.bg_stroke = Stroke::new(1.0, ACCENT);
    visuals.widgets.active.fg_stroke = Stroke::new(2.0, Color32::WHITE);
    visuals.widgets.active.rounding = Rounding::same(6.0);

    visuals.selection.bg_fill = BG_SELECTED;
    visuals.selection.stroke = Stroke::new(1.0, ACCENT);

    visuals.window_rounding = Rounding::same(CARD_ROUNDING);
    visuals.window_stroke = Stroke::new(1.0, BORDER_SUBTLE);

    ctx.set_visuals(visuals);

    let mut style = (*ctx.style()).clone();
    style.spacing.item_spacing = egui::vec2(8.0, 6.0);
    style.spacing.button_padding = egui::vec2(10.0, 5.0);
    ctx.set_style(style);
}

/// Accent-filled button used for primary actions.
pub fn primary_button(text: &str) -> egui::Button<'static> {
    egui::Button::new(egui::RichText::new(text.to_string()).color(Color32::WHITE))
        .fill(ACCENT)
        .rounding(Rounding::same(6.0))
}
