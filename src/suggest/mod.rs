// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Client side of the external design assistant

mod client;
mod patch;
mod prompt;

pub use client::{CancelToken, RequestId, SpecGenerator, SuggestionClient, SuggestionOutcome};
pub use patch::ConfigPatch;
pub use prompt::{quick_prompts, response_schema, tag_prompt, SYSTEM_INSTRUCTION};
