// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Registration submission: upload the receipt, resolve its public URL, insert the row.
//!
//! The steps run strictly in order and stop at the first failure. A receipt
//! uploaded before a failed insert stays in the bucket; there is no retry and
//! no compensation, every retry is a new user-initiated submission.

use thiserror::Error;
use time::OffsetDateTime;

use crate::models::registration::{ReceiptFile, RegistrationDraft};
use crate::services::{ObjectStorage, RecordStore, ServiceError};
use crate::utils::file_kind::extension_for_mime;
use crate::utils::{sanitize_component, sanitize_extension};

/// Bucket holding payment receipts.
pub const PAYMENT_PROOFS_BUCKET: &str = "payment_proofs";
/// Table holding registration rows.
pub const REGISTRATIONS_TABLE: &str = "registrations";

/// Message shown when a failure carries no text of its own.
const GENERIC_FAILURE: &str = "An error occurred.";

#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("{0}")]
    Upload(ServiceError),

    #[error("{0}")]
    Insert(ServiceError),

    #[error("{0}")]
    Unexpected(String),
}

impl SubmissionError {
    /// Text surfaced to the registrant: the service's own message, verbatim.
    pub fn user_message(&self) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            GENERIC_FAILURE.to_string()
        } else {
            message
        }
    }
}

/// Derive the storage key `"{unix_millis}_{name}.{ext}"` for a receipt.
///
/// Whitespace is dropped from the name before it is made storage-safe, so
/// "Juan Dela Cruz" becomes `JuanDelaCruz`. The extension comes from the
/// original file name, then from the MIME type, then falls back to `bin`.
pub fn storage_key(full_name: &str, receipt: &ReceiptFile, now: OffsetDateTime) -> String {
    let millis = now.unix_timestamp_nanos() / 1_000_000;
    let collapsed: String = full_name.chars().filter(|c| !c.is_whitespace()).collect();
    let name = sanitize_component(&collapsed);
    let ext = receipt
        .extension()
        .and_then(sanitize_extension)
        .or_else(|| extension_for_mime(receipt.mime()).map(str::to_string))
        .unwrap_or_else(|| "bin".to_string());
    format!("{millis}_{name}.{ext}")
}

/// Run the submission sequence for a validated draft.
///
/// Returns the receipt's public URL once the row is stored.
///
/// # Errors
///
/// - [`SubmissionError::Unexpected`] when the draft has no receipt.
/// - [`SubmissionError::Upload`] when storage rejects the receipt; no insert is attempted.
/// - [`SubmissionError::Insert`] when the record store rejects the row.
pub fn submit(
    draft: &RegistrationDraft,
    storage: &dyn ObjectStorage,
    records: &dyn RecordStore,
    now: OffsetDateTime,
) -> Result<String, SubmissionError> {
    let span = tracing::info_span!("submission", attempt = %crate::telemetry::attempt_id());
    let _guard = span.enter();

    let receipt = draft
        .receipt
        .as_ref()
        .ok_or_else(|| SubmissionError::Unexpected("No photo selected".to_string()))?;

    let key = storage_key(&draft.full_name, receipt, now);
    tracing::info!(%key, size = receipt.size(), mime = receipt.mime(), "Uploading receipt");

    storage
        .put(PAYMENT_PROOFS_BUCKET, &key, receipt.bytes(), receipt.mime())
        .map_err(|err| {
            tracing::warn!(error = %err, "Receipt upload failed");
            SubmissionError::Upload(err)
        })?;

    let photo_url = storage.public_url(PAYMENT_PROOFS_BUCKET, &key);
    tracing::debug!(%photo_url, "Receipt stored");

    records
        .insert(REGISTRATIONS_TABLE, &draft.to_record(photo_url.clone()))
        .map_err(|err| {
            tracing::warn!(error = %err, %key, "Registration insert failed; receipt left in storage");
            SubmissionError::Insert(err)
        })?;

    tracing::info!("Registration stored");
    Ok(photo_url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::registration::{Field, RegistrationRecord};
    use crate::services::{MockObjectStorage, MockRecordStore};
    use mockall::predicate::{always, eq};
    use time::macros::datetime;

    const NOW: OffsetDateTime = datetime!(2026-03-14 09:30:00.123 UTC);

    fn draft() -> RegistrationDraft {
        RegistrationDraft::default()
            .with_text(Field::FullName, "Juan Dela Cruz")
            .with_text(Field::Age, "20")
            .with_text(Field::Contact, "09123456789")
            .with_text(Field::Email, "juan@test.com")
            .with_text(Field::Church, "Grace Church")
            .with_statement(true)
            .with_receipt(Some(ReceiptFile::new("gcash.png", vec![7u8; 100 * 1024])))
    }

    #[test]
    fn key_collapses_whitespace_and_keeps_extension() {
        let receipt = ReceiptFile::new("My Receipt.JPG", vec![1]);
        let key = storage_key("  Juan \t Dela  Cruz ", &receipt, NOW);
        assert_eq!(key, format!("{}_JuanDelaCruz.JPG", NOW.unix_timestamp() * 1000 + 123));
    }

    #[test]
    fn key_transliterates_name() {
        let receipt = ReceiptFile::new("r.png", vec![1]);
        let key = storage_key("José Peña", &receipt, NOW);
        assert!(key.ends_with("_JosePena.png"), "{key}");
    }

    #[test]
    fn key_falls_back_to_bin_without_extension() {
        let receipt = ReceiptFile::new("receipt", vec![1]);
        assert!(storage_key("Ana", &receipt, NOW).ends_with("_Ana.bin"));
    }

    #[test]
    fn uploads_then_inserts_with_public_url() {
        let mut storage = MockObjectStorage::new();
        let mut records = MockRecordStore::new();
        let mut seq = mockall::Sequence::new();

        storage
            .expect_put()
            .withf(|bucket, key, bytes, content_type| {
                bucket == PAYMENT_PROOFS_BUCKET
                    && key.contains("JuanDelaCruz")
                    && key.ends_with(".png")
                    && bytes.len() == 100 * 1024
                    && content_type == "image/png"
            })
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _, _, _| Ok(()));
        storage
            .expect_public_url()
            .with(eq(PAYMENT_PROOFS_BUCKET), always())
            .times(1)
            .in_sequence(&mut seq)
            .returning(|bucket, key| format!("https://cdn.example/{bucket}/{key}"));

        let expected_url = format!(
            "https://cdn.example/payment_proofs/{}",
            storage_key("Juan Dela Cruz", draft().receipt.as_ref().unwrap(), NOW)
        );
        let expected_record = RegistrationRecord {
            full_name: "Juan Dela Cruz".into(),
            age: "20".into(),
            contact_number: "09123456789".into(),
            email: "juan@test.com".into(),
            church_name: "Grace Church".into(),
            photo_url: expected_url.clone(),
        };
        records
            .expect_insert()
            .with(eq(REGISTRATIONS_TABLE), eq(expected_record))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));

        let url = submit(&draft(), &storage, &records, NOW).unwrap();
        assert_eq!(url, expected_url);
    }

    #[test]
    fn upload_failure_never_inserts() {
        let mut storage = MockObjectStorage::new();
        let mut records = MockRecordStore::new();

        storage
            .expect_put()
            .times(1)
            .returning(|_, _, _, _| Err(ServiceError::rejected(400, "Bucket not found")));
        storage.expect_public_url().never();
        records.expect_insert().never();

        let err = submit(&draft(), &storage, &records, NOW).unwrap_err();

        assert!(matches!(err, SubmissionError::Upload(_)));
        assert_eq!(err.user_message(), "Bucket not found");
    }

    #[test]
    fn insert_failure_reports_insert_error() {
        let mut storage = MockObjectStorage::new();
        let mut records = MockRecordStore::new();

        storage.expect_put().times(1).returning(|_, _, _, _| Ok(()));
        storage
            .expect_public_url()
            .returning(|_, key| format!("https://cdn.example/{key}"));
        records.expect_insert().times(1).returning(|_, _| {
            Err(ServiceError::rejected(
                409,
                "duplicate key value violates unique constraint",
            ))
        });

        let err = submit(&draft(), &storage, &records, NOW).unwrap_err();

        assert!(matches!(err, SubmissionError::Insert(_)));
        assert_eq!(
            err.user_message(),
            "duplicate key value violates unique constraint"
        );
    }

    #[test]
    fn missing_receipt_is_unexpected_and_touches_nothing() {
        let mut storage = MockObjectStorage::new();
        let mut records = MockRecordStore::new();
        storage.expect_put().never();
        records.expect_insert().never();

        let without_receipt = draft().with_receipt(None);
        let err = submit(&without_receipt, &storage, &records, NOW).unwrap_err();

        assert!(matches!(err, SubmissionError::Unexpected(_)));
        assert_eq!(err.user_message(), "No photo selected");
    }

    #[test]
    fn empty_service_message_falls_back_to_generic_text() {
        let err = SubmissionError::Upload(ServiceError::rejected(500, ""));
        assert_eq!(err.user_message(), "An error occurred.");
    }
}
