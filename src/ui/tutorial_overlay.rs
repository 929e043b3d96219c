use crate::model::TutorialStep;
use crate::ui::theme;
use egui::{Context, RichText};

/// Dim the window, outline the step's anchor and show its tooltip.
///
/// Returns true when the user asked to continue, either with "Next" or by
/// clicking the backdrop.
pub fn show_tutorial_step(step: &TutorialStep, target: egui::Rect, ctx: &Context) -> bool {
    let screen = ctx.screen_rect();
    let mut advance = false;

    egui::Area::new(egui::Id::new("tutorial_backdrop"))
        .order(egui::Order::Foreground)
        .fixed_pos(screen.min)
        .show(ctx, |ui| {
            let backdrop = ui.allocate_rect(screen, egui::Sense::click());
            let painter = ui.painter();
            painter.rect_filled(screen, 0.0, theme::BACKDROP);
            painter.rect_stroke(
                target.expand(6.0),
                egui::Rounding::same(theme::CARD_ROUNDING),
                egui::Stroke::new(2.0, theme::HIGHLIGHT),
            );
            if backdrop.clicked() {
                advance = true;
            }
        });

    let tooltip_pos = egui::pos2(target.left(), target.bottom() + 20.0);
    egui::Area::new(egui::Id::new("tutorial_tooltip"))
        .order(egui::Order::Tooltip)
        .fixed_pos(tooltip_pos)
        .show(ctx, |ui| {
            egui::Frame::none()
                .fill(theme::BG_CARD)
                .rounding(egui::Rounding::same(theme::CARD_ROUNDING))
                .stroke(egui::Stroke::new(1.0, theme::ACCENT))
                .inner_margin(egui::Margin::same(18.0))
                .show(ui, |ui| {
                    ui.set_max_width(340.0);
                    ui.label(RichText::new(step.title).size(18.0).strong());
                    ui.add_space(4.0);
                    ui.label(RichText::new(step.content).color(theme::TEXT_SECONDARY));
                    ui.add_space(10.0);
                    if ui.add(theme::primary_button("Next")).clicked() {
                        advance = true;
                    }
                });
        });

    advance
}
