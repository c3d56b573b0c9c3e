// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Crossway conference registration desk.
//!
//! A three-step egui wizard collects registrant details, a GCash receipt, and
//! a statement of agreement, then uploads the receipt to Supabase Storage and
//! records the registration in a Supabase table.

pub mod app;
pub mod config;
pub mod logic;
pub mod models;
pub mod mvu;
pub mod services;
pub mod telemetry;
pub mod ui;
pub mod utils;
