// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Step 1: registrant identity fields.

use eframe::egui;

use crate::models::registration::{Field, RegistrationDraft};
use crate::models::validation::FieldErrors;

/// Messages emitted by the identity form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IdentityMsg {
    Edited { field: Field, value: String },
    Continue,
}

/// Render the five identity inputs with their inline errors.
pub fn view(ui: &mut egui::Ui, draft: &RegistrationDraft, errors: &FieldErrors) -> Vec<IdentityMsg> {
    let mut msgs = Vec::new();

    for field in Field::IDENTITY {
        text_input(ui, draft, errors, field, &mut msgs);
        ui.add_space(10.0);
    }

    ui.add_space(6.0);
    let next = egui::Button::new(
        egui::RichText::new(format!("Next Step {}", egui_phosphor::regular::ARROW_RIGHT)).strong(),
    )
    .min_size(egui::vec2(ui.available_width(), 36.0));
    if ui.add(next).clicked() {
        msgs.push(IdentityMsg::Continue);
    }

    msgs
}

/// A labelled single-line input that reports edits as messages.
fn text_input(
    ui: &mut egui::Ui,
    draft: &RegistrationDraft,
    errors: &FieldErrors,
    field: Field,
    msgs: &mut Vec<IdentityMsg>,
) {
    ui.label(
        egui::RichText::new(field.label().to_uppercase())
            .small()
            .strong()
            .color(egui::Color32::from_gray(110)),
    );

    let mut value = draft.text(field).to_string();
    let error = errors.get(field);
    let mut edit = egui::TextEdit::singleline(&mut value)
        .hint_text(field.hint())
        .desired_width(f32::INFINITY);
    if error.is_some() {
        edit = edit.text_color(ui.visuals().error_fg_color);
    }

    if ui.add(edit).changed() {
        msgs.push(IdentityMsg::Edited { field, value });
    }

    if let Some(error) = error {
        ui.label(
            egui::RichText::new(error)
                .small()
                .strong()
                .color(ui.visuals().error_fg_color),
        );
    }
}
