// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Step 2: data privacy policy acknowledgment.

use eframe::egui;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PolicyMsg {
    Confirm,
    Back,
}

pub fn view(ui: &mut egui::Ui, event_name: &str) -> Vec<PolicyMsg> {
    let mut msgs = Vec::new();

    ui.vertical_centered(|ui| {
        ui.label(
            egui::RichText::new(egui_phosphor::regular::WARNING_CIRCLE)
                .size(40.0)
                .color(egui::Color32::from_rgb(226, 176, 7)),
        );
        ui.heading("DATA PRIVACY POLICY");
    });
    ui.add_space(8.0);

    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_width(ui.available_width());
        egui::ScrollArea::vertical()
            .max_height(180.0)
            .show(ui, |ui| {
                ui.label(format!(
                    "By registering for {event_name}, you agree that the information collected \
                     will be used solely for event coordination, security, and communication purposes."
                ));
                ui.add_space(8.0);
                ui.label(
                    "We value your privacy and will not share your data with third parties \
                     without your consent.",
                );
            });
    });

    ui.add_space(12.0);
    let confirm = egui::Button::new(egui::RichText::new("I Understand & Confirm").strong())
        .min_size(egui::vec2(ui.available_width(), 36.0));
    if ui.add(confirm).clicked() {
        msgs.push(PolicyMsg::Confirm);
    }
    ui.vertical_centered(|ui| {
        if ui.link("Back").clicked() {
            msgs.push(PolicyMsg::Back);
        }
    });

    msgs
}
