// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Top-level egui application shell for the registration wizard.
//! Handles layout, step rendering, and wiring to the command workers.

pub mod components;

use std::sync::Arc;

use eframe::egui;

use crate::config::EventConfig;
use crate::logic::wizard::WizardState;
use crate::mvu::{self, AppModel, Command, Msg};
use crate::services::Services;
use crate::ui::components::identity::{self, IdentityMsg};
use crate::ui::components::payment::{self, PaymentMsg, PaymentView};
use crate::ui::components::policy::{self, PolicyMsg};
use crate::ui::components::receipt::ReceiptMsg;

/// Brand accent used for the progress bar and icons.
const ACCENT: egui::Color32 = egui::Color32::from_rgb(226, 176, 7);

/// Stateful egui application driving one registration at a time.
pub struct RegistrationApp {
    model: AppModel,
    event: EventConfig,
    inbox: Vec<Msg>,
    cmd_tx: crossbeam_channel::Sender<Command>,
    msg_rx: crossbeam_channel::Receiver<Msg>,
}

impl RegistrationApp {
    /// Spawn the command workers and build the initial model.
    pub fn new(services: Services, event: EventConfig) -> Self {
        let (cmd_tx, cmd_rx) = crossbeam_channel::unbounded::<Command>();
        let (msg_tx, msg_rx) = crossbeam_channel::unbounded::<Msg>();
        let services = Arc::new(services);

        // Two workers so a slow submission never blocks the file dialog.
        for _ in 0..2 {
            let cmd_rx = cmd_rx.clone();
            let msg_tx = msg_tx.clone();
            let services = services.clone();
            std::thread::spawn(move || {
                for cmd in cmd_rx.iter() {
                    let msg = mvu::run_command(cmd, &services);
                    let _ = msg_tx.send(msg);
                }
            });
        }

        Self {
            model: AppModel::default(),
            event,
            inbox: Vec::new(),
            cmd_tx,
            msg_rx,
        }
    }
}

impl eframe::App for RegistrationApp {
    /// Required by eframe 0.34; all rendering happens in `update`, which eframe still calls each frame.
    fn ui(&mut self, _ui: &mut egui::Ui, _frame: &mut eframe::Frame) {}

    /// Drain worker results, apply queued messages, then render the current step.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.style_mut(|style| {
            style.spacing.item_spacing = egui::vec2(6.0, 6.0);
        });

        while let Ok(msg) = self.msg_rx.try_recv() {
            self.model.pending_commands = self.model.pending_commands.saturating_sub(1);
            self.inbox.push(msg);
        }

        self.process_inbox(ctx);

        // Keep polling while workers are busy so results show up without input events.
        if self.model.pending_commands > 0 {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }

        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new("CROSSWAY").heading().strong().color(ACCENT));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    egui::widgets::global_theme_preference_switch(ui);
                    ui.separator();
                    let register = egui::Button::new("Register");
                    if ui
                        .add_enabled(!self.model.is_submitting(), register)
                        .on_hover_text("Start a new registration")
                        .clicked()
                    {
                        self.inbox.push(Msg::Restart);
                    }
                });
            });
            ui.add_space(4.0);
        });

        egui::TopBottomPanel::bottom("status_panel")
            .resizable(false)
            .show(ctx, |ui| {
                self.render_status(ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.set_max_width(480.0);
                    ui.add_space(16.0);
                    if self.model.is_success() {
                        self.render_success(ui);
                    } else {
                        self.render_wizard(ui);
                    }
                    ui.add_space(16.0);
                });
            });
        });
    }
}

impl RegistrationApp {
    /// Apply queued messages, converting decoded receipt previews into textures first.
    fn process_inbox(&mut self, ctx: &egui::Context) {
        let mut msgs = std::mem::take(&mut self.inbox);
        msgs.reverse();
        while let Some(msg) = msgs.pop() {
            match msg {
                Msg::ReceiptDecoded { receipt, image } => {
                    let texture = ctx.load_texture(
                        format!("receipt-{}", receipt.name()),
                        image,
                        egui::TextureOptions::default(),
                    );
                    msgs.push(Msg::Receipt(ReceiptMsg::Ready {
                        receipt,
                        texture: Some(texture),
                    }));
                }
                other => {
                    let mut commands = Vec::new();
                    mvu::update(&mut self.model, other, &mut commands);
                    for cmd in commands {
                        if self.cmd_tx.send(cmd).is_ok() {
                            self.model.pending_commands += 1;
                        }
                    }
                }
            }
        }
    }

    fn render_wizard(&mut self, ui: &mut egui::Ui) {
        ui.with_layout(egui::Layout::top_down(egui::Align::Min), |ui| {
            ui.label(egui::RichText::new("REGISTER NOW").size(28.0).strong());
            ui.label(
                egui::RichText::new("Join the movement. Secure your spot.")
                    .color(egui::Color32::from_gray(110)),
            );
            ui.add_space(10.0);
            render_progress(ui, self.model.wizard().step_number());
            ui.add_space(16.0);

            match self.model.wizard() {
                WizardState::Identity => {
                    let msgs = identity::view(ui, self.model.draft(), self.model.errors());
                    self.inbox.extend(msgs.into_iter().map(|m| match m {
                        IdentityMsg::Edited { field, value } => Msg::FieldEdited { field, value },
                        IdentityMsg::Continue => Msg::Next,
                    }));
                }
                WizardState::PolicyAck => {
                    let msgs = policy::view(ui, &self.event.name);
                    self.inbox.extend(msgs.into_iter().map(|m| match m {
                        PolicyMsg::Confirm => Msg::Next,
                        PolicyMsg::Back => Msg::Back,
                    }));
                }
                WizardState::PaymentProof { .. } | WizardState::Submitting => {
                    let msgs = payment::view(
                        ui,
                        PaymentView {
                            event: &self.event,
                            draft: self.model.draft(),
                            errors: self.model.errors(),
                            receipt: &self.model.receipt,
                            submitting: self.model.is_submitting(),
                            last_error: self.model.last_error(),
                        },
                    );
                    self.inbox.extend(msgs.into_iter().map(|m| match m {
                        PaymentMsg::StatementToggled(agreed) => Msg::StatementToggled(agreed),
                        PaymentMsg::Receipt(r) => Msg::Receipt(r),
                        PaymentMsg::Submit => Msg::SubmitRequested,
                        PaymentMsg::Back => Msg::Back,
                    }));
                }
                WizardState::Success { .. } => {}
            }
        });
    }

    /// Confirmation screen shown once the registration is stored.
    fn render_success(&mut self, ui: &mut egui::Ui) {
        ui.add_space(40.0);
        ui.label(
            egui::RichText::new(egui_phosphor::regular::CHECK_CIRCLE)
                .size(72.0)
                .color(ACCENT),
        );
        ui.label(egui::RichText::new("REGISTRATION COMPLETE!").size(24.0).strong());
        ui.add_space(8.0);
        ui.label(
            egui::RichText::new(
                "Thank you for registering. The Crossway team will email or contact you \
                 within six (6) working days to confirm your registration.",
            )
            .color(egui::Color32::from_gray(110)),
        );
        if let WizardState::Success { photo_url } = self.model.wizard() {
            ui.hyperlink_to("View uploaded receipt", photo_url);
        }
        ui.add_space(24.0);
        if ui.button("Back to Home").clicked() {
            self.inbox.push(Msg::Restart);
        }
    }

    /// Render latest status message and a spinner while workers are busy.
    fn render_status(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if let Some(text) = &self.model.status {
                ui.label(egui::RichText::new(text).color(egui::Color32::from_gray(68)));
            }
            if self.model.pending_commands > 0 {
                ui.add(egui::Spinner::new().size(14.0)).on_hover_text(format!(
                    "{} task(s) running in background",
                    self.model.pending_commands
                ));
            }
        });
    }
}

/// Three-segment progress bar; segments up to `step` are highlighted.
fn render_progress(ui: &mut egui::Ui, step: u8) {
    let spacing = 8.0;
    let width = ((ui.available_width() - 2.0 * spacing) / 3.0).max(10.0);
    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = spacing;
        for segment in 1..=3u8 {
            let (rect, _) = ui.allocate_exact_size(egui::vec2(width, 4.0), egui::Sense::hover());
            let fill = if segment <= step {
                ACCENT
            } else {
                ui.visuals().widgets.inactive.bg_fill
            };
            ui.painter().rect_filled(rect, 2.0, fill);
        }
    });
}
