// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Per-step validation of a registration draft.
//!
//! Validators are pure: they read the draft and report every failing field at
//! once, never only the first.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::models::registration::{Field, RegistrationDraft};

static DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+$").expect("digits pattern compiles"));

// `local@domain.tld` anywhere in the text.
static EMAIL_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").expect("email pattern compiles"));

/// Field-level error messages keyed by field, in form order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<Field, String>);

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(field, msg)| (*field, msg.as_str()))
    }

    fn insert(&mut self, field: Field, message: &str) {
        self.0.insert(field, message.to_string());
    }
}

/// Validate the identity step (name, age, contact, email, church).
///
/// # Examples
///
/// ```
/// use crossway_register::models::registration::{Field, RegistrationDraft};
/// use crossway_register::models::validation::validate_identity;
///
/// let draft = RegistrationDraft::default().with_text(Field::Age, "twenty");
/// let errors = validate_identity(&draft);
/// assert_eq!(errors.get(Field::Age), Some("Age must be a valid number"));
/// ```
pub fn validate_identity(draft: &RegistrationDraft) -> FieldErrors {
    let mut errors = FieldErrors::default();

    if draft.full_name.trim().is_empty() {
        errors.insert(Field::FullName, "Full name is required");
    }

    if draft.age.trim().is_empty() {
        errors.insert(Field::Age, "Age is required");
    } else if !DIGITS.is_match(&draft.age) {
        errors.insert(Field::Age, "Age must be a valid number");
    }

    if draft.contact.trim().is_empty() {
        errors.insert(Field::Contact, "Contact number is required");
    } else if !DIGITS.is_match(&draft.contact) {
        errors.insert(Field::Contact, "Contact must be digits only");
    }

    if draft.email.trim().is_empty() {
        errors.insert(Field::Email, "Email is required");
    } else if !EMAIL_SHAPE.is_match(&draft.email) {
        errors.insert(Field::Email, "Please use a valid email address.");
    }

    if draft.church.trim().is_empty() {
        errors.insert(Field::Church, "Church name is required");
    }

    errors
}

/// Validate the payment-proof step (receipt present, statement agreed).
pub fn validate_payment_proof(draft: &RegistrationDraft) -> FieldErrors {
    let mut errors = FieldErrors::default();

    if draft.receipt.is_none() {
        errors.insert(Field::Photo, "Please upload your GCash receipt/proof.");
    }
    if !draft.agreed_to_statement {
        errors.insert(Field::Statement, "You must verify the statement.");
    }

    errors
}
