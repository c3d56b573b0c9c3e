// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Receipt picker with image preview, structured for MVU-style updates.

use std::path::{Path, PathBuf};

use eframe::egui;

use crate::models::registration::ReceiptFile;
use crate::utils::file_kind::{format_bytes, is_image};

/// Preview state for the selected receipt. The receipt itself lives in the draft.
#[derive(Default)]
pub struct ReceiptModel {
    preview: Option<egui::TextureHandle>,
    loading: bool,
}

/// Messages emitted by the receipt view or produced by worker commands.
// Debug omitted because TextureHandle is not Debug.
pub enum ReceiptMsg {
    RequestPick,
    Picked(Option<PathBuf>),
    Ready {
        receipt: ReceiptFile,
        texture: Option<egui::TextureHandle>,
    },
    LoadFailed(String),
}

/// Side effects run off the UI path.
#[derive(Debug, PartialEq, Eq)]
pub enum ReceiptCommand {
    PickFile,
    LoadFile { path: PathBuf },
}

/// Outcome the root model folds into the draft or status line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReceiptEvent {
    Attached(ReceiptFile),
    Failed(String),
}

impl ReceiptModel {
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn has_preview(&self) -> bool {
        self.preview.is_some()
    }

    /// Clear the loading flag without touching the current preview.
    pub fn finish_loading(&mut self) {
        self.loading = false;
    }
}

/// Apply a message to the receipt model. Returns an event when the draft should change.
pub fn update(
    model: &mut ReceiptModel,
    msg: ReceiptMsg,
    cmds: &mut Vec<ReceiptCommand>,
) -> Option<ReceiptEvent> {
    match msg {
        ReceiptMsg::RequestPick => {
            cmds.push(ReceiptCommand::PickFile);
            None
        }
        ReceiptMsg::Picked(Some(path)) => {
            model.loading = true;
            cmds.push(ReceiptCommand::LoadFile { path });
            None
        }
        ReceiptMsg::Picked(None) => None,
        ReceiptMsg::Ready { receipt, texture } => {
            model.loading = false;
            model.preview = texture;
            Some(ReceiptEvent::Attached(receipt))
        }
        ReceiptMsg::LoadFailed(message) => {
            model.loading = false;
            Some(ReceiptEvent::Failed(message))
        }
    }
}

/// Render the upload area. `error` is the field error for the receipt, if any.
pub fn view(
    ui: &mut egui::Ui,
    model: &ReceiptModel,
    receipt: Option<&ReceiptFile>,
    error: Option<&str>,
    enabled: bool,
) -> Vec<ReceiptMsg> {
    let mut msgs = Vec::new();
    let visuals = ui.visuals().clone();
    let stroke = if error.is_some() {
        egui::Stroke::new(1.5, visuals.error_fg_color)
    } else {
        visuals.window_stroke()
    };

    egui::Frame::new()
        .fill(visuals.faint_bg_color)
        .stroke(stroke)
        .inner_margin(12.0)
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.vertical_centered(|ui| {
                if let Some(texture) = &model.preview {
                    let size = texture.size_vec2();
                    let max = 180.0;
                    let scale = (max / size.x).min(max / size.y).min(1.0);
                    ui.add(egui::Image::new((texture.id(), size * scale)));
                } else if model.loading {
                    ui.add(egui::Spinner::new().size(24.0));
                } else {
                    ui.label(
                        egui::RichText::new(egui_phosphor::regular::UPLOAD_SIMPLE)
                            .size(28.0)
                            .color(egui::Color32::from_gray(150)),
                    );
                }

                if let Some(receipt) = receipt {
                    ui.label(receipt.name());
                    ui.label(
                        egui::RichText::new(format!(
                            "{} | {}",
                            receipt.mime(),
                            format_bytes(receipt.size())
                        ))
                        .small()
                        .color(egui::Color32::from_gray(110)),
                    );
                }

                let label = if receipt.is_some() {
                    "Choose a different file"
                } else {
                    "Click to upload"
                };
                let button = egui::Button::new(format!(
                    "{} {label}",
                    egui_phosphor::regular::IMAGE
                ));
                if ui
                    .add_enabled(enabled && !model.loading, button)
                    .clicked()
                {
                    msgs.push(ReceiptMsg::RequestPick);
                }
            });
        });

    if let Some(error) = error {
        ui.label(
            egui::RichText::new(error)
                .small()
                .strong()
                .color(visuals.error_fg_color),
        );
    }

    msgs
}

/// Read a receipt and decode a preview image for it.
///
/// Only image files are accepted; a file that cannot be decoded is rejected
/// with a message suitable for the status line.
pub fn load_receipt(path: &Path) -> Result<(ReceiptFile, egui::ColorImage), String> {
    let receipt = ReceiptFile::load(path).map_err(|e| e.to_string())?;
    if !is_image(receipt.name()) {
        return Err(format!(
            "{} is not a supported image. Please choose a photo or screenshot of your receipt.",
            receipt.name()
        ));
    }
    let preview = decode_preview(receipt.bytes())
        .map_err(|e| format!("Could not read {} as an image: {e}", receipt.name()))?;
    Ok((receipt, preview))
}

/// Decode and shrink image bytes to a preview-sized `ColorImage`.
fn decode_preview(bytes: &[u8]) -> Result<egui::ColorImage, String> {
    const MAX: u32 = 256;

    let dyn_img = image::load_from_memory(bytes).map_err(|e| e.to_string())?;
    let resized = dyn_img.thumbnail(MAX, MAX).to_rgba8();
    let size = [resized.width() as usize, resized.height() as usize];
    let pixels = resized.into_raw();
    Ok(egui::ColorImage::from_rgba_unmultiplied(size, &pixels))
}
