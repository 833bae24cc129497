// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Suggestion client behaviour against scripted generators

use skiform::config::{CamberProfile, Configuration, EquipmentKind};
use skiform::suggest::{CancelToken, SuggestionClient, SuggestionOutcome};
use skiform::ExternalServiceError;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

fn answer(json: &'static str) -> impl Fn(&str, &CancelToken) -> Result<String, ExternalServiceError> {
    move |_: &str, _: &CancelToken| Ok(json.to_string())
}

#[test]
fn test_stale_response_is_discarded() {
    let mut client = SuggestionClient::new(
        |prompt: &str, _: &CancelToken| -> Result<String, ExternalServiceError> {
            if prompt.starts_with("slow") {
                thread::sleep(Duration::from_millis(200));
                Ok(r#"{"waistWidth": 80}"#.to_string())
            } else {
                Ok(r#"{"waistWidth": 120}"#.to_string())
            }
        },
        Duration::from_secs(5),
    );
    let config = Configuration::default();

    let first = client.submit("slow carving", &config);
    let second = client.submit("fast powder", &config);
    assert!(second > first);

    let outcome = client.wait(&config).unwrap();
    assert_eq!(outcome.id(), second);
    let SuggestionOutcome::Applied { config: next, .. } = outcome else {
        panic!("expected the latest request to apply");
    };
    assert_eq!(next.waist_width, 120.0);

    // Let the superseded worker finish, then drain it
    thread::sleep(Duration::from_millis(400));
    assert!(client.poll(&next).is_none());
    assert_eq!(client.discarded(), 1);
}

#[test]
fn test_timeout_surfaces_error_and_cancels() {
    let observed = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&observed);
    let mut client = SuggestionClient::new(
        move |_: &str, cancel: &CancelToken| -> Result<String, ExternalServiceError> {
            let start = Instant::now();
            while !cancel.is_cancelled() && start.elapsed() < Duration::from_secs(5) {
                thread::sleep(Duration::from_millis(5));
            }
            flag.store(cancel.is_cancelled(), Ordering::SeqCst);
            Err(ExternalServiceError::Cancelled)
        },
        Duration::from_millis(50),
    );
    let config = Configuration::default();
    client.submit("anything", &config);

    let outcome = client.wait(&config).unwrap();
    assert_eq!(
        outcome,
        SuggestionOutcome::Failed {
            id: outcome.id(),
            error: ExternalServiceError::Timeout(Duration::from_millis(50)),
        }
    );
    assert!(!client.is_pending());

    let deadline = Instant::now() + Duration::from_secs(2);
    while !observed.load(Ordering::SeqCst) && Instant::now() < deadline {
        thread::sleep(Duration::from_millis(5));
    }
    assert!(observed.load(Ordering::SeqCst), "generator never saw the cancellation");
}

#[test]
fn test_malformed_response_leaves_configuration() {
    let mut client = SuggestionClient::new(answer("{\"waistWidth\": 9"), Duration::from_secs(5));
    let config = Configuration::default();
    client.submit("wide", &config);

    match client.wait(&config).unwrap() {
        SuggestionOutcome::Failed { error, .. } => {
            assert!(matches!(error, ExternalServiceError::Malformed(_)))
        }
        other => panic!("unexpected outcome {other:?}"),
    }
    assert_eq!(config, Configuration::default());
}

#[test]
fn test_patch_applies_on_top_of_current() {
    let mut client = SuggestionClient::new(
        answer(r#"{"camberProfile": "rocker", "length": -1, "reasoning": "Float."}"#),
        Duration::from_secs(5),
    );
    let board = Configuration::preset(EquipmentKind::Snowboard);
    client.submit("deep snow", &board);

    let outcome = client.wait(&board).unwrap();
    assert_eq!(outcome.message().as_deref(), Some("Float."));
    let SuggestionOutcome::Applied { config, patch, .. } = outcome else {
        panic!("expected an applied patch");
    };
    assert_eq!(config.camber_profile, CamberProfile::Rocker);
    assert_eq!(config.length, board.length);
    assert_eq!(patch.dropped, vec!["length"]);
}

#[test]
fn test_explicit_cancel_drops_request() {
    let mut client = SuggestionClient::new(
        |_: &str, _: &CancelToken| -> Result<String, ExternalServiceError> {
            thread::sleep(Duration::from_millis(50));
            Ok("{}".to_string())
        },
        Duration::from_secs(5),
    );
    let config = Configuration::default();
    client.submit("anything", &config);
    client.cancel();
    assert!(!client.is_pending());
    assert!(client.wait(&config).is_none());

    thread::sleep(Duration::from_millis(150));
    assert!(client.poll(&config).is_none());
    assert_eq!(client.discarded(), 1);
}
