// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Seams to the hosted backend: object storage for receipts and the record
//! store for registrations.

pub mod supabase;

use std::sync::Arc;

#[cfg(test)]
use mockall::automock;
use thiserror::Error;

use crate::models::registration::RegistrationRecord;

/// Failure reported by a backend service call.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The request never produced a response (DNS, TLS, timeout, ...).
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("{message}")]
    Rejected { status: u16, message: String },
}

impl ServiceError {
    pub fn rejected(status: u16, message: impl Into<String>) -> Self {
        Self::Rejected {
            status,
            message: message.into(),
        }
    }
}

/// Blob storage holding uploaded payment receipts.
#[cfg_attr(test, automock)]
pub trait ObjectStorage: Send + Sync {
    /// Store `bytes` under `key` in `bucket`.
    fn put(
        &self,
        bucket: &str,
        key: &str,
        bytes: &[u8],
        content_type: &str,
    ) -> Result<(), ServiceError>;

    /// Public URL of a stored object. Only meaningful after a successful `put`.
    fn public_url(&self, bucket: &str, key: &str) -> String;
}

/// Table storage for registration rows.
#[cfg_attr(test, automock)]
pub trait RecordStore: Send + Sync {
    fn insert(&self, table: &str, record: &RegistrationRecord) -> Result<(), ServiceError>;
}

/// Backend handles shared with the command workers.
#[derive(Clone)]
pub struct Services {
    pub storage: Arc<dyn ObjectStorage>,
    pub records: Arc<dyn RecordStore>,
}

impl Services {
    pub fn new(storage: Arc<dyn ObjectStorage>, records: Arc<dyn RecordStore>) -> Self {
        Self { storage, records }
    }

    /// Use one Supabase project for both storage and records.
    pub fn supabase(client: supabase::SupabaseClient) -> Self {
        let client = Arc::new(client);
        Self {
            storage: client.clone(),
            records: client,
        }
    }
}
