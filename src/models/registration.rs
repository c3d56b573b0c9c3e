// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Registration draft, receipt handle, and the row persisted per registrant (UI-agnostic).

use std::fmt;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::utils::guess_mime;

/// Form inputs that can carry a validation error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    FullName,
    Age,
    Contact,
    Email,
    Church,
    Photo,
    Statement,
}

impl Field {
    /// Text inputs collected on the identity step, in display order.
    pub const IDENTITY: [Field; 5] = [
        Field::FullName,
        Field::Age,
        Field::Contact,
        Field::Email,
        Field::Church,
    ];

    /// Stable key used when reporting errors.
    pub fn key(self) -> &'static str {
        match self {
            Field::FullName => "fullName",
            Field::Age => "age",
            Field::Contact => "contact",
            Field::Email => "email",
            Field::Church => "church",
            Field::Photo => "photo",
            Field::Statement => "statement",
        }
    }

    /// Label shown above the input.
    pub fn label(self) -> &'static str {
        match self {
            Field::FullName => "Full Name",
            Field::Age => "Age",
            Field::Contact => "Contact Number",
            Field::Email => "Email Address",
            Field::Church => "Church Name",
            Field::Photo => "Upload GCash Receipt",
            Field::Statement => "Statement",
        }
    }

    /// Placeholder text for the input.
    pub fn hint(self) -> &'static str {
        match self {
            Field::FullName => "Juan Dela Cruz",
            Field::Age => "20",
            Field::Contact => "09123456789",
            Field::Email => "you@example.com",
            Field::Church => "Your Local Church",
            Field::Photo | Field::Statement => "",
        }
    }

    /// Whether the input only takes digits while typing.
    pub fn is_numeric(self) -> bool {
        matches!(self, Field::Age | Field::Contact)
    }

    /// Input mask for live edits: numeric fields accept only empty or all-digit text.
    pub fn accepts_input(self, text: &str) -> bool {
        !self.is_numeric() || text.chars().all(|c| c.is_ascii_digit())
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Payment receipt selected by the registrant.
///
/// Bytes are shared so snapshots of the draft handed to the submission worker
/// do not copy the file.
#[derive(Clone, PartialEq, Eq)]
pub struct ReceiptFile {
    name: String,
    mime: String,
    bytes: Arc<[u8]>,
}

impl ReceiptFile {
    pub fn new(name: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        let name = name.into();
        let mime = guess_mime(&name);
        Self {
            name,
            mime,
            bytes: bytes.into(),
        }
    }

    /// Read a receipt from disk, keeping its original file name.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be read.
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = fs::read(path)
            .with_context(|| format!("Failed to read receipt file: {}", path.display()))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "receipt".to_string());
        Ok(Self::new(name, bytes))
    }

    /// Original file name as chosen by the registrant.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mime(&self) -> &str {
        &self.mime
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Extension of the original file name, without the dot.
    pub fn extension(&self) -> Option<&str> {
        Path::new(&self.name)
            .extension()
            .and_then(|e| e.to_str())
            .filter(|e| !e.is_empty())
    }
}

impl fmt::Debug for ReceiptFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReceiptFile")
            .field("name", &self.name)
            .field("mime", &self.mime)
            .field("size", &self.bytes.len())
            .finish()
    }
}

/// In-progress registration data.
///
/// Edits consume the draft and return the updated value, so the controller
/// swaps whole drafts instead of patching fields in place.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegistrationDraft {
    pub full_name: String,
    pub age: String,
    pub contact: String,
    pub email: String,
    pub church: String,
    pub agreed_to_statement: bool,
    pub receipt: Option<ReceiptFile>,
}

impl RegistrationDraft {
    /// Current text of a text input; non-text fields read as empty.
    pub fn text(&self, field: Field) -> &str {
        match field {
            Field::FullName => &self.full_name,
            Field::Age => &self.age,
            Field::Contact => &self.contact,
            Field::Email => &self.email,
            Field::Church => &self.church,
            Field::Photo | Field::Statement => "",
        }
    }

    /// Replace the text of one input. Non-text fields are left untouched.
    #[must_use]
    pub fn with_text(mut self, field: Field, value: impl Into<String>) -> Self {
        let value = value.into();
        match field {
            Field::FullName => self.full_name = value,
            Field::Age => self.age = value,
            Field::Contact => self.contact = value,
            Field::Email => self.email = value,
            Field::Church => self.church = value,
            Field::Photo | Field::Statement => {}
        }
        self
    }

    #[must_use]
    pub fn with_statement(mut self, agreed: bool) -> Self {
        self.agreed_to_statement = agreed;
        self
    }

    #[must_use]
    pub fn with_receipt(mut self, receipt: Option<ReceiptFile>) -> Self {
        self.receipt = receipt;
        self
    }

    /// Build the row stored for this registrant once the receipt has a public URL.
    pub fn to_record(&self, photo_url: impl Into<String>) -> RegistrationRecord {
        RegistrationRecord {
            full_name: self.full_name.clone(),
            age: self.age.clone(),
            contact_number: self.contact.clone(),
            email: self.email.clone(),
            church_name: self.church.clone(),
            photo_url: photo_url.into(),
        }
    }
}

/// Row inserted into the registrations table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RegistrationRecord {
    pub full_name: String,
    pub age: String,
    pub contact_number: String,
    pub email: String,
    pub church_name: String,
    pub photo_url: String,
}
