// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Workflow logic: the wizard state machine and the submission sequence.

pub mod submission;
pub mod wizard;
