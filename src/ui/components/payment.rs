// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Step 3: payment instructions, receipt upload, statement, and submit.

use eframe::egui;

use crate::config::EventConfig;
use crate::models::registration::{Field, RegistrationDraft};
use crate::models::validation::FieldErrors;
use crate::ui::components::receipt::{self, ReceiptModel, ReceiptMsg};

/// Messages emitted by the payment step.
pub enum PaymentMsg {
    StatementToggled(bool),
    Receipt(ReceiptMsg),
    Submit,
    Back,
}

/// Everything the payment step renders, borrowed from the root model.
pub struct PaymentView<'a> {
    pub event: &'a EventConfig,
    pub draft: &'a RegistrationDraft,
    pub errors: &'a FieldErrors,
    pub receipt: &'a ReceiptModel,
    pub submitting: bool,
    pub last_error: Option<&'a str>,
}

pub fn view(ui: &mut egui::Ui, props: PaymentView<'_>) -> Vec<PaymentMsg> {
    let mut msgs = Vec::new();

    render_instructions(ui, props.event);
    ui.add_space(12.0);

    ui.label(
        egui::RichText::new(Field::Photo.label().to_uppercase())
            .small()
            .strong()
            .color(egui::Color32::from_gray(110)),
    );
    let receipt_msgs = receipt::view(
        ui,
        props.receipt,
        props.draft.receipt.as_ref(),
        props.errors.get(Field::Photo),
        !props.submitting,
    );
    msgs.extend(receipt_msgs.into_iter().map(PaymentMsg::Receipt));
    ui.add_space(10.0);

    let mut agreed = props.draft.agreed_to_statement;
    let checkbox = egui::Checkbox::new(
        &mut agreed,
        "I have uploaded my payment receipt and I agree to the statement above.",
    );
    if ui.add_enabled(!props.submitting, checkbox).changed() {
        msgs.push(PaymentMsg::StatementToggled(agreed));
    }
    if let Some(error) = props.errors.get(Field::Statement) {
        ui.label(
            egui::RichText::new(error)
                .small()
                .strong()
                .color(ui.visuals().error_fg_color),
        );
    }

    ui.add_space(12.0);
    if let Some(error) = props.last_error {
        egui::Frame::new()
            .fill(ui.visuals().extreme_bg_color)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.vertical_centered(|ui| {
                    ui.label(
                        egui::RichText::new(error)
                            .strong()
                            .color(ui.visuals().error_fg_color),
                    );
                });
            });
        ui.add_space(6.0);
    }

    let label = if props.submitting {
        "Registering..."
    } else {
        "Register Me"
    };
    let submit = egui::Button::new(egui::RichText::new(label).strong())
        .min_size(egui::vec2(ui.available_width(), 36.0));
    let response = ui.add_enabled(!props.submitting, submit);
    if props.submitting {
        ui.vertical_centered(|ui| {
            ui.add(egui::Spinner::new().size(16.0));
        });
    }
    if response.clicked() {
        msgs.push(PaymentMsg::Submit);
    }

    ui.vertical_centered(|ui| {
        if ui
            .add_enabled(!props.submitting, egui::Link::new("Back"))
            .clicked()
        {
            msgs.push(PaymentMsg::Back);
        }
    });

    msgs
}

/// GCash payment instructions.
fn render_instructions(ui: &mut egui::Ui, event: &EventConfig) {
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.horizontal(|ui| {
            ui.label(
                egui::RichText::new(egui_phosphor::regular::CREDIT_CARD)
                    .color(egui::Color32::from_rgb(0, 125, 254)),
            );
            ui.label(egui::RichText::new("PAYMENT INFORMATION").small().strong());
        });
        ui.label(egui::RichText::new("PLEASE SEND VIA GCASH").strong());
        ui.label(
            egui::RichText::new(&event.gcash_number)
                .monospace()
                .size(18.0)
                .strong(),
        );
        ui.label(
            egui::RichText::new(format!("NAME: {}", event.gcash_name))
                .small()
                .color(egui::Color32::from_gray(110)),
        );
        ui.add_space(4.0);
        ui.label(
            egui::RichText::new(
                "Please ensure that you securely download and save your GCash receipt. \
                 This file will be required for registration verification and future reference.",
            )
            .small()
            .color(egui::Color32::from_gray(110)),
        );
    });
}
