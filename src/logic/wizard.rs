// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Registration wizard states and their legal transitions.
//!
//! ```text
//! Identity ──next──▶ PolicyAck ──next──▶ PaymentProof ──submit──▶ Submitting ──ok──▶ Success
//!    ▲                  │  ▲                  │    ▲                   │
//!    └──────back────────┘  └──────back────────┘    └───────failed──────┘
//! ```
//!
//! Transitions never mutate: each returns the next state and the caller swaps it in.

use thiserror::Error;

use crate::models::registration::RegistrationDraft;
use crate::models::validation::{FieldErrors, validate_identity, validate_payment_proof};

/// Where the registrant currently is in the flow.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum WizardState {
    /// Step 1: name, age, contact, email, church.
    #[default]
    Identity,
    /// Step 2: data privacy policy acknowledgment.
    PolicyAck,
    /// Step 3: receipt upload and statement; carries the last submission failure.
    PaymentProof { last_error: Option<String> },
    /// Upload and insert in flight; doubles as the reentrancy guard.
    Submitting,
    /// Registration stored.
    Success { photo_url: String },
}

/// Result of a validated transition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Gate {
    Advanced(WizardState),
    Blocked(FieldErrors),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WizardError {
    #[error("cannot {action} while in {state}")]
    InvalidTransition {
        state: &'static str,
        action: &'static str,
    },
}

impl WizardState {
    pub fn name(&self) -> &'static str {
        match self {
            WizardState::Identity => "identity",
            WizardState::PolicyAck => "policy acknowledgment",
            WizardState::PaymentProof { .. } => "payment proof",
            WizardState::Submitting => "submitting",
            WizardState::Success { .. } => "success",
        }
    }

    /// 1-based step shown in the progress bar.
    pub fn step_number(&self) -> u8 {
        match self {
            WizardState::Identity => 1,
            WizardState::PolicyAck => 2,
            WizardState::PaymentProof { .. }
            | WizardState::Submitting
            | WizardState::Success { .. } => 3,
        }
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self, WizardState::Submitting)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, WizardState::Success { .. })
    }

    /// Failure message from the last submission attempt, if it failed.
    pub fn last_error(&self) -> Option<&str> {
        match self {
            WizardState::PaymentProof { last_error } => last_error.as_deref(),
            _ => None,
        }
    }

    /// Move forward from the identity or policy step.
    pub fn next(&self, draft: &RegistrationDraft) -> Result<Gate, WizardError> {
        match self {
            WizardState::Identity => {
                let errors = validate_identity(draft);
                if errors.is_empty() {
                    Ok(Gate::Advanced(WizardState::PolicyAck))
                } else {
                    Ok(Gate::Blocked(errors))
                }
            }
            WizardState::PolicyAck => {
                Ok(Gate::Advanced(WizardState::PaymentProof { last_error: None }))
            }
            other => Err(other.invalid("continue")),
        }
    }

    /// Step back one screen without validating.
    pub fn back(&self) -> Result<WizardState, WizardError> {
        match self {
            WizardState::PolicyAck => Ok(WizardState::Identity),
            WizardState::PaymentProof { .. } => Ok(WizardState::PolicyAck),
            other => Err(other.invalid("go back")),
        }
    }

    /// Enter [`WizardState::Submitting`] when the payment-proof step validates.
    ///
    /// Rejected while a submission is already running.
    pub fn begin_submit(&self, draft: &RegistrationDraft) -> Result<Gate, WizardError> {
        match self {
            WizardState::PaymentProof { .. } => {
                let errors = validate_payment_proof(draft);
                if errors.is_empty() {
                    Ok(Gate::Advanced(WizardState::Submitting))
                } else {
                    Ok(Gate::Blocked(errors))
                }
            }
            other => Err(other.invalid("submit")),
        }
    }

    /// Fold the submission outcome (public receipt URL or user-facing error) into the next state.
    pub fn finish_submit(&self, outcome: Result<String, String>) -> Result<WizardState, WizardError> {
        match self {
            WizardState::Submitting => Ok(match outcome {
                Ok(photo_url) => WizardState::Success { photo_url },
                Err(message) => WizardState::PaymentProof {
                    last_error: Some(message),
                },
            }),
            other => Err(other.invalid("finish a submission")),
        }
    }

    /// Return to the entry step. Not allowed mid-submission.
    pub fn restart(&self) -> Result<WizardState, WizardError> {
        match self {
            WizardState::Submitting => Err(self.invalid("restart")),
            _ => Ok(WizardState::Identity),
        }
    }

    fn invalid(&self, action: &'static str) -> WizardError {
        WizardError::InvalidTransition {
            state: self.name(),
            action,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::registration::{Field, ReceiptFile};

    fn identity_draft() -> RegistrationDraft {
        RegistrationDraft::default()
            .with_text(Field::FullName, "Juan Dela Cruz")
            .with_text(Field::Age, "20")
            .with_text(Field::Contact, "09123456789")
            .with_text(Field::Email, "juan@test.com")
            .with_text(Field::Church, "Grace Church")
    }

    fn complete_draft() -> RegistrationDraft {
        identity_draft()
            .with_statement(true)
            .with_receipt(Some(ReceiptFile::new("receipt.png", vec![0u8; 16])))
    }

    #[test]
    fn identity_advances_only_when_valid() {
        let state = WizardState::Identity;

        let blocked = state.next(&RegistrationDraft::default()).unwrap();
        assert!(matches!(blocked, Gate::Blocked(ref e) if e.len() == 5));

        let advanced = state.next(&identity_draft()).unwrap();
        assert_eq!(advanced, Gate::Advanced(WizardState::PolicyAck));
    }

    #[test]
    fn policy_ack_is_unconditional() {
        let gate = WizardState::PolicyAck.next(&RegistrationDraft::default()).unwrap();
        assert_eq!(
            gate,
            Gate::Advanced(WizardState::PaymentProof { last_error: None })
        );
    }

    #[test]
    fn back_navigation() {
        assert_eq!(WizardState::PolicyAck.back(), Ok(WizardState::Identity));
        let failed = WizardState::PaymentProof {
            last_error: Some("boom".into()),
        };
        assert_eq!(failed.back(), Ok(WizardState::PolicyAck));
        assert!(WizardState::Identity.back().is_err());
        assert!(WizardState::Submitting.back().is_err());
    }

    #[test]
    fn submit_requires_receipt_and_statement() {
        let state = WizardState::PaymentProof { last_error: None };

        match state.begin_submit(&identity_draft()).unwrap() {
            Gate::Blocked(errors) => {
                assert!(errors.contains(Field::Photo));
                assert!(errors.contains(Field::Statement));
            }
            Gate::Advanced(s) => panic!("unexpected advance to {s:?}"),
        }

        assert_eq!(
            state.begin_submit(&complete_draft()).unwrap(),
            Gate::Advanced(WizardState::Submitting)
        );
    }

    #[test]
    fn second_submit_is_rejected_while_in_flight() {
        let err = WizardState::Submitting
            .begin_submit(&complete_draft())
            .unwrap_err();
        assert_eq!(
            err,
            WizardError::InvalidTransition {
                state: "submitting",
                action: "submit"
            }
        );
    }

    #[test]
    fn submit_cannot_skip_earlier_gates() {
        assert!(WizardState::Identity.begin_submit(&complete_draft()).is_err());
        assert!(WizardState::PolicyAck.begin_submit(&complete_draft()).is_err());
        assert!(
            WizardState::PaymentProof { last_error: None }
                .next(&complete_draft())
                .is_err()
        );
    }

    #[test]
    fn finishing_maps_outcome() {
        let ok = WizardState::Submitting
            .finish_submit(Ok("https://cdn/r.png".into()))
            .unwrap();
        assert!(ok.is_success());

        let failed = WizardState::Submitting
            .finish_submit(Err("Bucket not found".into()))
            .unwrap();
        assert_eq!(failed.last_error(), Some("Bucket not found"));
        assert_eq!(failed.step_number(), 3);

        assert!(
            WizardState::Identity
                .finish_submit(Ok("x".into()))
                .is_err()
        );
    }

    #[test]
    fn restart_is_blocked_only_while_submitting() {
        let success = WizardState::Success {
            photo_url: "u".into(),
        };
        assert_eq!(success.restart(), Ok(WizardState::Identity));
        assert!(WizardState::Submitting.restart().is_err());
    }
}
