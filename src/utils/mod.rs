// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Shared helper utilities reused by UI and business logic.

pub mod file_kind;
pub mod sanitize_component;

/// Guess a MIME type from a file name.
pub use file_kind::guess_mime;
/// Sanitize user-provided strings into storage-safe key components.
pub use sanitize_component::{sanitize_component, sanitize_extension};
