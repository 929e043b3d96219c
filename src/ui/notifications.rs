use crate::model::NotificationCenter;
use crate::ui::theme;
use egui::{Context, RichText};
use uuid::Uuid;

/// Draw the toast stack in the top-right corner.
///
/// Returns the toasts whose close button was clicked.
pub fn show_notifications(center: &NotificationCenter, ctx: &Context) -> Vec<Uuid> {
    let mut dismissed = Vec::new();
    if center.visible().is_empty() {
        return dismissed;
    }

    egui::Area::new(egui::Id::new("toasts"))
        .anchor(egui::Align2::RIGHT_TOP, [-16.0, 48.0])
        .order(egui::Order::Foreground)
        .interactable(true)
        .show(ctx, |ui| {
            ui.set_max_width(theme::TOAST_WIDTH);
            for toast in center.visible() {
                egui::Frame::none()
                    .fill(theme::BG_CARD)
                    .rounding(egui::Rounding::same(theme::CARD_ROUNDING))
                    .stroke(egui::Stroke::new(1.5, toast.severity.border_color()))
                    .inner_margin(egui::Margin::same(12.0))
                    .show(ui, |ui| {
                        ui.set_width(theme::TOAST_WIDTH);
                        ui.horizontal(|ui| {
                            ui.label(
                                RichText::new(toast.severity.icon())
                                    .font(theme::font_icon())
                                    .color(toast.severity.border_color()),
                            );
                            ui.add(egui::Label::new(&toast.message).wrap());
                            ui.with_layout(egui::Layout::right_to_left(egui::Align::Min), |ui| {
                                let close = ui.add(
                                    egui::Button::new(
                                        RichText::new("✕").size(11.0).color(theme::TEXT_DIM),
                                    )
                                    .frame(false),
                                );
                                if close.clicked() {
                                    dismissed.push(toast.id);
                                }
                            });
                        });
                    });
                ui.add_space(8.0);
            }
        });

    dismissed
}
