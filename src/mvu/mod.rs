// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Root Model-View-Update kernel: the registration workflow controller.
//!
//! The UI feeds one [`Msg`] at a time into [`update`]; side effects come back
//! out as [`Command`]s that [`run_command`] executes on a worker thread.

use std::path::PathBuf;

use crate::logic::submission;
use crate::logic::wizard::{Gate, WizardError, WizardState};
use crate::models::registration::{Field, ReceiptFile, RegistrationDraft};
use crate::models::validation::FieldErrors;
use crate::services::Services;
use crate::ui::components::receipt::{self, ReceiptCommand, ReceiptEvent, ReceiptModel, ReceiptMsg};

/// Top-level application state.
#[derive(Default)]
pub struct AppModel {
    /// Current wizard step.
    pub wizard: WizardState,
    /// Registrant input for this attempt.
    pub draft: RegistrationDraft,
    /// Field errors from the latest validation gate.
    pub errors: FieldErrors,
    /// Receipt preview state.
    pub receipt: ReceiptModel,
    /// Latest status message to display.
    pub status: Option<String>,
    /// Count of queued background commands.
    pub pending_commands: usize,
}

impl AppModel {
    pub fn wizard(&self) -> &WizardState {
        &self.wizard
    }

    pub fn draft(&self) -> &RegistrationDraft {
        &self.draft
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn is_submitting(&self) -> bool {
        self.wizard.is_submitting()
    }

    pub fn is_success(&self) -> bool {
        self.wizard.is_success()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.wizard.last_error()
    }
}

/// Application messages routed through the update function.
pub enum Msg {
    FieldEdited { field: Field, value: String },
    StatementToggled(bool),
    Next,
    Back,
    SubmitRequested,
    SubmitCompleted(Result<String, String>),
    Restart,
    Receipt(ReceiptMsg),
    /// Decoded preview; turned into [`ReceiptMsg::Ready`] by the UI, which owns the egui context.
    ReceiptDecoded {
        receipt: ReceiptFile,
        image: eframe::egui::ColorImage,
    },
}

/// Commands represent side-effects executed between frames.
pub enum Command {
    PickReceipt,
    LoadReceipt { path: PathBuf },
    Submit(Box<RegistrationDraft>),
}

/// Update the application model and enqueue commands.
pub fn update(model: &mut AppModel, msg: Msg, cmds: &mut Vec<Command>) {
    match msg {
        Msg::FieldEdited { field, value } => {
            if !matches!(model.wizard, WizardState::Identity) || !field.accepts_input(&value) {
                return;
            }
            model.draft = std::mem::take(&mut model.draft).with_text(field, value);
        }
        Msg::StatementToggled(agreed) => {
            if matches!(model.wizard, WizardState::PaymentProof { .. }) {
                model.draft = std::mem::take(&mut model.draft).with_statement(agreed);
            }
        }
        Msg::Next => {
            let gate = model.wizard.next(&model.draft);
            apply_gate(model, gate);
        }
        Msg::Back => {
            let next = model.wizard.back();
            apply_transition(model, next);
        }
        Msg::SubmitRequested => {
            let gate = model.wizard.begin_submit(&model.draft);
            let started = matches!(gate, Ok(Gate::Advanced(WizardState::Submitting)));
            apply_gate(model, gate);
            if started {
                model.status = Some("Registering...".to_string());
                cmds.push(Command::Submit(Box::new(model.draft.clone())));
            }
        }
        Msg::SubmitCompleted(outcome) => {
            let status = match &outcome {
                Ok(_) => "Registration complete.".to_string(),
                Err(err) => format!("Registration failed: {err}"),
            };
            let next = model.wizard.finish_submit(outcome);
            if next.is_ok() {
                model.status = Some(status);
            }
            apply_transition(model, next);
        }
        Msg::Restart => match model.wizard.restart() {
            Ok(state) => {
                tracing::debug!(from = model.wizard.name(), "Restarting registration");
                *model = AppModel {
                    wizard: state,
                    pending_commands: model.pending_commands,
                    ..Default::default()
                };
            }
            Err(err) => tracing::debug!(error = %err, "Restart ignored"),
        },
        Msg::Receipt(m) => {
            // A dialog or decode started on the payment step can finish after
            // the wizard moved on; the in-flight or fresh draft must not change.
            let editable = matches!(model.wizard, WizardState::PaymentProof { .. });
            if !editable && matches!(m, ReceiptMsg::Picked(Some(_)) | ReceiptMsg::Ready { .. }) {
                tracing::debug!(step = model.wizard.name(), "Late receipt dropped");
                model.receipt.finish_loading();
                return;
            }
            let mut receipt_cmds = Vec::new();
            if let Some(event) = receipt::update(&mut model.receipt, m, &mut receipt_cmds) {
                match event {
                    ReceiptEvent::Attached(file) => {
                        model.status = Some(format!("Receipt attached: {}", file.name()));
                        model.draft = std::mem::take(&mut model.draft).with_receipt(Some(file));
                    }
                    ReceiptEvent::Failed(message) => model.status = Some(message),
                }
            }
            for c in receipt_cmds {
                match c {
                    ReceiptCommand::PickFile => cmds.push(Command::PickReceipt),
                    ReceiptCommand::LoadFile { path } => cmds.push(Command::LoadReceipt { path }),
                }
            }
        }
        Msg::ReceiptDecoded { receipt, image } => {
            // Texture creation happens in ui/mod.rs where ctx is available.
            tracing::warn!(
                receipt = receipt.name(),
                width = image.size[0],
                height = image.size[1],
                "Decoded receipt reached update without a texture; attaching without preview"
            );
            update(
                model,
                Msg::Receipt(ReceiptMsg::Ready {
                    receipt,
                    texture: None,
                }),
                cmds,
            );
        }
    }
}

/// Execute a command on a worker thread and return the resulting message.
pub fn run_command(cmd: Command, services: &Services) -> Msg {
    match cmd {
        Command::PickReceipt => {
            let file = rfd::FileDialog::new()
                .set_title("Select your GCash receipt")
                .add_filter("Images", &crate::utils::file_kind::RECEIPT_IMAGE_EXTENSIONS)
                .pick_file();
            Msg::Receipt(ReceiptMsg::Picked(file))
        }
        Command::LoadReceipt { path } => match receipt::load_receipt(&path) {
            Ok((receipt, image)) => Msg::ReceiptDecoded { receipt, image },
            Err(err) => Msg::Receipt(ReceiptMsg::LoadFailed(err)),
        },
        Command::Submit(draft) => {
            let outcome = submission::submit(
                &draft,
                services.storage.as_ref(),
                services.records.as_ref(),
                time::OffsetDateTime::now_utc(),
            )
            .map_err(|err| err.user_message());
            Msg::SubmitCompleted(outcome)
        }
    }
}

/// Swap in the state a validated transition produced, or record why it was blocked.
fn apply_gate(model: &mut AppModel, gate: Result<Gate, WizardError>) {
    match gate {
        Ok(Gate::Advanced(state)) => {
            model.errors = FieldErrors::default();
            apply_transition(model, Ok(state));
        }
        Ok(Gate::Blocked(errors)) => {
            tracing::debug!(
                step = model.wizard.name(),
                fields = errors.len(),
                "Validation blocked the step"
            );
            model.errors = errors;
        }
        Err(err) => tracing::debug!(error = %err, "Transition ignored"),
    }
}

fn apply_transition(model: &mut AppModel, next: Result<WizardState, WizardError>) {
    match next {
        Ok(state) => {
            tracing::debug!(from = model.wizard.name(), to = state.name(), "Wizard transition");
            model.wizard = state;
        }
        Err(err) => tracing::debug!(error = %err, "Transition ignored"),
    }
}
