use crate::app::Anchors;
use crate::controller::ProjectCard;
use crate::model::tutorial::PROJECTS_ANCHOR;
use crate::ui::theme;
use egui::{Color32, RichText, Ui};

/// Render the project cards. Returns the id of a clicked card.
///
/// Only reads the cards; opening a project is left to the caller.
pub fn show_gallery(
    cards: &[ProjectCard],
    total: usize,
    anchors: &mut Anchors,
    ui: &mut Ui,
) -> Option<String> {
    let mut clicked = None;

    ui.horizontal(|ui| {
        ui.label(
            RichText::new("Your Projects")
                .font(theme::font_heading())
                .strong(),
        );
        ui.add_space(4.0);
        ui.label(
            RichText::new(format!("({} of {})", cards.len(), total))
                .size(11.0)
                .color(theme::TEXT_DIM),
        );
    });
    ui.add_space(6.0);

    let grid = ui.horizontal_wrapped(|ui| {
        ui.spacing_mut().item_spacing = egui::vec2(14.0, 14.0);
        for card in cards {
            if show_card(card, ui) {
                clicked = Some(card.id.clone());
            }
        }
    });
    anchors.insert(PROJECTS_ANCHOR, grid.response.rect);

    clicked
}

fn show_card(card: &ProjectCard, ui: &mut Ui) -> bool {
    let id = egui::Id::new(("project-card", card.id.as_str()));
    let hover_id = id.with("hovered");
    let hovered = ui.ctx().data(|d| d.get_temp::<bool>(hover_id)).unwrap_or(false);

    let frame = egui::Frame::none()
        .fill(if hovered { theme::BG_CARD_HOVER } else { theme::BG_CARD })
        .rounding(egui::Rounding::same(theme::CARD_ROUNDING))
        .stroke(egui::Stroke::new(1.0, theme::BORDER_SUBTLE))
        .inner_margin(egui::Margin::same(14.0));

    let frame_resp = frame.show(ui, |ui| {
        ui.set_width(theme::CARD_WIDTH);

        ui.horizontal(|ui| {
            ui.label(RichText::new(card.type_icon).font(theme::font_icon()));
            ui.vertical(|ui| {
                ui.add(egui::Label::new(RichText::new(&card.name).size(15.0).strong()).truncate());
                ui.label(RichText::new(&card.type_label).size(11.0).color(theme::TEXT_DIM));
            });
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Min), |ui| {
                ui.vertical(|ui| {
                    ui.label(
                        RichText::new(format!("{} {}", card.status_icon, card.status.label()))
                            .size(12.0)
                            .color(card.status_color),
                    );
                    ui.label(RichText::new(&card.created).size(10.5).color(theme::TEXT_DIM));
                });
            });
        });

        ui.add_space(6.0);
        ui.label(RichText::new(&card.description).size(12.0).color(theme::TEXT_SECONDARY));
        ui.add_space(6.0);

        ui.horizontal(|ui| {
            ui.label(RichText::new("Algorithm:").size(11.5).color(theme::TEXT_DIM));
            ui.label(RichText::new(&card.algorithm).size(11.5).color(Color32::WHITE));
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(RichText::new(&card.accuracy_text).size(11.5).strong().color(theme::HIGHLIGHT));
                ui.label(RichText::new("Accuracy:").size(11.5).color(theme::TEXT_DIM));
            });
        });

        ui.add(
            egui::ProgressBar::new(card.progress)
                .desired_height(6.0)
                .fill(theme::ACCENT)
                .rounding(egui::Rounding::same(3.0)),
        );
    });

    // Make the entire card clickable
    let response = ui
        .interact(frame_resp.response.rect, id, egui::Sense::click())
        .on_hover_cursor(egui::CursorIcon::PointingHand);
    let now_hovered = response.hovered();
    if now_hovered != hovered {
        ui.ctx().data_mut(|d| d.insert_temp(hover_id, now_hovered));
    }
    response.clicked()
}
