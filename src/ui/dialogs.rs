use crate::app::{LabApp, PendingAction};
use crate::ui::theme;
use egui::{Color32, Context, RichText, Window};

/// Render the "New Project" name prompt.
pub fn show_new_project_dialog(app: &mut LabApp, ctx: &Context) {
    Window::new(RichText::new("New Project").strong().size(14.0))
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size([theme::DIALOG_WIDTH, 0.0])
        .show(ctx, |ui| {
            ui.visuals_mut().extreme_bg_color = theme::BG_FIELD;
            ui.add_space(4.0);

            ui.label(RichText::new("Enter project name:").color(theme::TEXT_SECONDARY));
            let field = ui.add_sized(
                [theme::DIALOG_WIDTH, 26.0],
                egui::TextEdit::singleline(&mut app.new_project_name)
                    .hint_text("e.g. Titanic Survival")
                    .text_color(theme::TEXT_PRIMARY),
            );
            field.request_focus();
            let submitted = field.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

            ui.add_space(6.0);
            ui.separator();
            ui.add_space(4.0);

            ui.horizontal(|ui| {
                if ui.add_sized([80.0, 28.0], theme::primary_button("Create")).clicked() || submitted {
                    app.pending
                        .push(PendingAction::CreateProject(app.new_project_name.clone()));
                }
                if ui.add_sized([80.0, 28.0], egui::Button::new("Cancel")).clicked() {
                    app.pending.push(PendingAction::CancelNewProject);
                }
            });
            ui.add_space(2.0);
        });
}

/// Render the simulated sign-in form. Credentials are never checked.
pub fn show_auth_dialog(app: &mut LabApp, ctx: &Context) {
    let mut submitted = false;
    Window::new(RichText::new("Sign in").strong().size(14.0))
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size([theme::DIALOG_WIDTH, 0.0])
        .show(ctx, |ui| {
            ui.visuals_mut().extreme_bg_color = theme::BG_FIELD;
            ui.add_space(4.0);

            egui::Grid::new("auth_grid")
                .num_columns(2)
                .spacing([12.0, 8.0])
                .show(ui, |ui| {
                    ui.label(RichText::new("Email").color(theme::TEXT_SECONDARY));
                    let email = ui.add_sized(
                        [230.0, 24.0],
                        egui::TextEdit::singleline(&mut app.auth_email)
                            .hint_text("learner@example.com"),
                    );
                    ui.end_row();

                    ui.label(RichText::new("Password").color(theme::TEXT_SECONDARY));
                    let password = ui.add_sized(
                        [230.0, 24.0],
                        egui::TextEdit::singleline(&mut app.auth_password).password(true),
                    );
                    ui.end_row();

                    // Enter only submits from inside the form's fields.
                    submitted = (email.lost_focus() || password.lost_focus())
                        && ui.input(|i| i.key_pressed(egui::Key::Enter));
                });

            ui.add_space(6.0);
            ui.separator();
            ui.add_space(4.0);

            ui.horizontal(|ui| {
                if ui.add_sized([80.0, 28.0], theme::primary_button("Sign in")).clicked() || submitted {
                    app.pending.push(PendingAction::Authenticate);
                }
                if ui.add_sized([80.0, 28.0], egui::Button::new("Cancel")).clicked() {
                    app.pending.push(PendingAction::HideAuth);
                }
            });
            ui.add_space(2.0);
        });
}

/// Render the "About" dialog.
pub fn show_about_dialog(app: &mut LabApp, ctx: &Context) {
    let mut should_close = false;
    Window::new("About")
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size([300.0, 180.0])
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(12.0);
                ui.heading(RichText::new("AI Learning Lab").strong());
                ui.add_space(2.0);
                ui.label(
                    RichText::new(format!("Version {}", env!("CARGO_PKG_VERSION")))
                        .color(theme::TEXT_SECONDARY),
                );
                ui.add_space(10.0);
                ui.label("A playground for machine learning projects");
                ui.label(RichText::new("built with Rust and egui.").color(Color32::GRAY));
                ui.add_space(14.0);
                if ui.add_sized([100.0, 28.0], egui::Button::new("Close")).clicked() {
                    should_close = true;
                }
            });
        });
    if should_close {
        app.show_about = false;
    }
}
