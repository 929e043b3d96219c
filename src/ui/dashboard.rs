use std::time::Duration;

use crate::app::{Anchors, PendingAction};
use crate::controller::{LabController, LabStats};
use crate::io::KeyValueStore;
use crate::model::tutorial::{HERO_ANCHOR, PROGRESS_ANCHOR, QUICK_ACTIONS_ANCHOR};
use crate::ui::theme;
use egui::{RichText, Ui};
use egui_phosphor::regular as ph;

/// Hero banner, learning progress (signed-in only) and quick actions.
pub fn show_dashboard<S: KeyValueStore>(
    controller: &LabController<S>,
    anchors: &mut Anchors,
    pending: &mut Vec<PendingAction>,
    ui: &mut Ui,
) {
    let hero = ui.vertical(|ui| {
        ui.label(
            RichText::new("Master Machine Learning")
                .font(theme::font_hero())
                .strong()
                .color(theme::TEXT_PRIMARY),
        );
        ui.label(
            RichText::new("Build intelligent models, unlock data insights and create AI solutions.")
                .size(14.0)
                .color(theme::TEXT_SECONDARY),
        );
    });
    anchors.insert(HERO_ANCHOR, hero.response.rect);
    ui.add_space(18.0);

    if let Some(user) = controller.user() {
        let stats = controller.stats();
        let progress = card_frame().show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                ui.label(
                    RichText::new(format!("{} Learning Progress", ph::GRADUATION_CAP))
                        .font(theme::font_heading())
                        .strong(),
                );
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(
                        RichText::new(format!(
                            "{} · joined {}",
                            user.email,
                            user.join_date.format("%b %-d, %Y")
                        ))
                        .size(11.0)
                        .color(theme::TEXT_DIM),
                    );
                });
            });
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                stat(ui, "Projects", stats.total.to_string());
                stat(ui, "Completed", stats.completed.to_string());
                stat(ui, "Training", stats.training.to_string());
                stat(ui, "Drafts", stats.drafts.to_string());
                stat(ui, "Avg. accuracy", format!("{:.1}%", stats.average_accuracy * 100.0));
            });
            ui.add_space(4.0);
            let done = if stats.total == 0 {
                0.0
            } else {
                stats.completed as f32 / stats.total as f32
            };
            ui.add(
                egui::ProgressBar::new(done)
                    .fill(theme::ACCENT_SOFT)
                    .rounding(egui::Rounding::same(3.0))
                    .text(format!("{} of {} projects trained", stats.completed, stats.total)),
            );
        });
        anchors.insert(PROGRESS_ANCHOR, progress.response.rect);
        ui.add_space(14.0);
    }

    let actions = ui.horizontal_wrapped(|ui| {
        if ui
            .add(theme::primary_button(&format!("{} New Project", ph::PLUS)))
            .clicked()
        {
            pending.push(PendingAction::PromptNewProject);
        }
        if ui.button(format!("{} Upload Data", ph::UPLOAD_SIMPLE)).clicked() {
            pending.push(PendingAction::UploadData);
        }
        if ui.button(format!("{} Take the Tour", ph::COMPASS)).clicked() {
            pending.push(PendingAction::StartTutorial);
        }
        if ui.button(format!("{} Load More", ph::ARROW_DOWN)).clicked() {
            pending.push(PendingAction::LoadMore);
        }
    });
    anchors.insert(QUICK_ACTIONS_ANCHOR, actions.response.rect);
}

fn stat(ui: &mut Ui, label: &str, value: String) {
    ui.vertical(|ui| {
        ui.label(RichText::new(value).size(20.0).strong().color(theme::HIGHLIGHT));
        ui.label(RichText::new(label).size(10.5).color(theme::TEXT_DIM));
    });
    ui.add_space(18.0);
}

fn card_frame() -> egui::Frame {
    egui::Frame::none()
        .fill(theme::BG_CARD)
        .rounding(egui::Rounding::same(theme::CARD_ROUNDING))
        .stroke(egui::Stroke::new(1.0, theme::BORDER_SUBTLE))
        .inner_margin(egui::Margin::same(14.0))
}

/// Bottom status line: last message left, counters right.
pub fn show_status_bar(message: &str, stats: &LabStats, until_sweep: Duration, ui: &mut Ui) {
    ui.horizontal_centered(|ui| {
        ui.label(
            RichText::new(message)
                .font(theme::font_status())
                .color(theme::TEXT_SECONDARY),
        );
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(
                RichText::new(format!("Next update in {}s", until_sweep.as_secs()))
                    .size(10.5)
                    .color(theme::TEXT_DIM),
            );
            ui.label(RichText::new(" · ").size(10.5).color(theme::TEXT_DIM));
            ui.label(
                RichText::new(format!("Training: {}", stats.training))
                    .size(10.5)
                    .color(theme::TEXT_DIM),
            );
            ui.label(RichText::new(" · ").size(10.5).color(theme::TEXT_DIM));
            ui.label(
                RichText::new(format!("Projects: {}", stats.total))
                    .size(10.5)
                    .color(theme::TEXT_DIM),
            );
        });
    });
}
