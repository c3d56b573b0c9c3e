// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Application entry point wiring configuration, logging, the Supabase backend, and eframe.

use anyhow::{Context, Result, anyhow};
use eframe::egui;
use egui_phosphor::Variant;

use crate::config::AppConfig;
use crate::services::Services;
use crate::services::supabase::SupabaseClient;
use crate::telemetry;
use crate::ui::RegistrationApp;

/// Bootstrap the desktop application and run the main egui event loop.
pub fn run() -> Result<()> {
    let config = AppConfig::load().context("Failed to load configuration")?;
    telemetry::init_tracing(&config.log.filter)?;

    let client = SupabaseClient::from_config(&config.supabase)?;
    let services = Services::supabase(client);
    tracing::info!(event = %config.event.name, "Starting registration desk");

    // Register Phosphor icon font.
    let mut fonts = egui::FontDefinitions::default();
    egui_phosphor::add_to_fonts(&mut fonts, Variant::Regular);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(config.event.name.clone())
            .with_inner_size([640.0, 820.0])
            .with_min_inner_size([420.0, 560.0]),
        ..Default::default()
    };

    let event = config.event.clone();
    eframe::run_native(
        &config.event.name,
        options,
        Box::new(|cc| {
            cc.egui_ctx.set_fonts(fonts);
            Ok(Box::new(RegistrationApp::new(services, event)))
        }),
    )
    .map_err(|err| anyhow!("UI event loop failed: {err}"))
}
