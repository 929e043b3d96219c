use crate::app::{LabApp, PendingAction};
use crate::ui::theme;
use egui::{menu, RichText, Ui};
use egui_phosphor::regular as ph;

/// Render the top menu bar.
pub fn show_toolbar(app: &mut LabApp, ui: &mut Ui) {
    menu::bar(ui, |ui| {
        ui.label(
            RichText::new(format!("{} AI Learning Lab", ph::GRAPH))
                .strong()
                .color(theme::ACCENT),
        );
        ui.add_space(12.0);

        ui.menu_button(RichText::new("  Projects  ").font(theme::font_menu()), |ui| {
            if ui.button("  New Project        Ctrl+N").clicked() {
                app.pending.push(PendingAction::PromptNewProject);
                ui.close_menu();
            }
            if ui.button("  Upload Data        Ctrl+U").clicked() {
                app.pending.push(PendingAction::UploadData);
                ui.close_menu();
            }
            ui.separator();
            if ui.button("  Load More").clicked() {
                app.pending.push(PendingAction::LoadMore);
                ui.close_menu();
            }
        });

        ui.menu_button(RichText::new("  Help  ").font(theme::font_menu()), |ui| {
            if ui.button("  Take the Tour").clicked() {
                app.pending.push(PendingAction::StartTutorial);
                ui.close_menu();
            }
            if ui.button("  About").clicked() {
                app.show_about = true;
                ui.close_menu();
            }
        });

        // Right-aligned session controls
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            match app.controller.user() {
                Some(user) => {
                    if ui.button("Sign out").clicked() {
                        app.pending.push(PendingAction::Logout);
                    }
                    ui.label(
                        RichText::new(format!("{} {}", ph::USER_CIRCLE, user.name))
                            .size(12.0)
                            .color(theme::TEXT_SECONDARY),
                    );
                }
                None => {
                    if ui.add(theme::primary_button("Sign in")).clicked() {
                        app.pending.push(PendingAction::ShowAuth);
                    }
                }
            }
        });
    });
}
