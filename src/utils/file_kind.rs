// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! MIME detection and display helpers for the uploaded receipt.

use std::path::Path;

/// Image extensions offered in the receipt picker and accepted for preview.
pub const RECEIPT_IMAGE_EXTENSIONS: [&str; 8] =
    ["png", "jpg", "jpeg", "bmp", "tiff", "tif", "gif", "webp"];

const OCTET_STREAM: &str = "application/octet-stream";

/// Guess the MIME type from a file name, defaulting to `application/octet-stream`.
pub fn guess_mime(name: &str) -> String {
    mime_guess::from_path(name)
        .first_or_octet_stream()
        .essence_str()
        .to_string()
}

/// First conventional extension registered for a MIME type, if any.
/// `application/octet-stream` has no meaningful extension and yields `None`.
pub fn extension_for_mime(mime: &str) -> Option<&'static str> {
    if mime.eq_ignore_ascii_case(OCTET_STREAM) {
        return None;
    }
    mime_guess::get_mime_extensions_str(mime).and_then(|exts| exts.first().copied())
}

/// Return true when the name has one of the supported raster image extensions.
pub fn is_image(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| {
            RECEIPT_IMAGE_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

/// Human-readable formatting for byte sizes with binary units.
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{bytes} B")
    } else {
        format!("{value:.1} {}", UNITS[unit])
    }
}
