use super::*;
use crate::core::error::EngineError;
use crate::core::message::Sender;
use crate::utils::test_utils::{create_test_harness, GatedEngine, TEST_FALLBACK};
use std::sync::Arc;

fn echo_engine() -> Arc<GatedEngine> {
    GatedEngine::new()
}

#[tokio::test]
async fn submit_then_reply_yields_user_and_assistant_entries() {
    let engine = echo_engine();
    let gate = engine.gate("Hello");
    let mut harness = create_test_harness(engine.clone());

    harness.controller.submit("Hello").expect("submit");
    assert!(harness.controller.is_pending());

    gate.send(Ok("Hi there".into())).expect("gate open");
    harness.deliver_next().await;

    assert_eq!(
        harness.history_texts(),
        vec!["user:Hello".to_string(), "assistant:Hi there".to_string()]
    );
    assert!(!harness.controller.is_pending());
    assert_eq!(engine.calls(), 1);
}

#[tokio::test]
async fn submit_emits_append_then_typing_events() {
    let engine = echo_engine();
    let mut harness = create_test_harness(engine);

    harness.controller.submit("  ping  ").expect("submit");
    let events = harness.drain_events();

    assert_eq!(events.len(), 2);
    match &events[0] {
        RenderEvent::MessageAppended(message) => {
            assert_eq!(message.sender(), Sender::User);
            assert_eq!(message.text(), "ping");
        }
        other => panic!("expected MessageAppended, got {other:?}"),
    }
    assert_eq!(events[1], RenderEvent::TypingStarted);

    harness.deliver_next().await;
    let events = harness.drain_events();
    assert_eq!(events[0], RenderEvent::TypingStopped);
    assert!(matches!(&events[1], RenderEvent::MessageAppended(m) if m.text() == "echo: ping"));
}

#[tokio::test]
async fn empty_submission_is_rejected_without_side_effects() {
    let engine = echo_engine();
    let mut harness = create_test_harness(engine.clone());

    let err = harness.controller.submit("").expect_err("empty input");
    assert_eq!(err, InteractionError::Validation(ValidationError::EmptyMessage));

    let err = harness.controller.submit(" \t\n ").expect_err("blank input");
    assert_eq!(err, InteractionError::Validation(ValidationError::EmptyMessage));

    assert!(harness.controller.snapshot().is_empty());
    assert!(!harness.controller.is_pending());
    assert_eq!(
        harness.drain_events(),
        vec![
            RenderEvent::ValidationRejected(ValidationError::EmptyMessage),
            RenderEvent::ValidationRejected(ValidationError::EmptyMessage),
        ]
    );
    tokio::task::yield_now().await;
    assert_eq!(engine.calls(), 0);
}

#[tokio::test]
async fn concurrent_replies_append_in_completion_order() {
    let engine = echo_engine();
    let gate_a = engine.gate("A");
    let gate_b = engine.gate("B");
    let mut harness = create_test_harness(engine.clone());

    harness.controller.submit("A").expect("submit A");
    harness.controller.submit("B").expect("submit B");

    gate_b.send(Ok("reply B".into())).expect("gate B open");
    harness.deliver_next().await;
    gate_a.send(Ok("reply A".into())).expect("gate A open");
    harness.deliver_next().await;

    assert_eq!(
        harness.history_texts(),
        vec![
            "user:A".to_string(),
            "user:B".to_string(),
            "assistant:reply B".to_string(),
            "assistant:reply A".to_string(),
        ]
    );
    assert!(!harness.controller.is_pending());
    assert_eq!(engine.calls(), 2);
}

#[tokio::test]
async fn late_reply_after_clear_appends_without_reviving_indicator() {
    let engine = echo_engine();
    let gate = engine.gate("X");
    let mut harness = create_test_harness(engine);

    harness.controller.submit("X").expect("submit");
    harness.controller.clear();
    assert!(!harness.controller.is_pending());
    harness.drain_events();

    gate.send(Ok("reply to X".into())).expect("gate open");
    harness.deliver_next().await;

    assert_eq!(harness.history_texts(), vec!["assistant:reply to X".to_string()]);
    assert!(!harness.controller.is_pending());

    let events = harness.drain_events();
    assert_eq!(events.len(), 1);
    assert!(matches!(&events[0], RenderEvent::MessageAppended(_)));
}

#[tokio::test]
async fn late_reply_leaves_newer_pending_request_alone() {
    let engine = echo_engine();
    let gate_old = engine.gate("old");
    let gate_new = engine.gate("new");
    let mut harness = create_test_harness(engine);

    harness.controller.submit("old").expect("submit old");
    harness.controller.clear();
    harness.controller.submit("new").expect("submit new");

    gate_old.send(Ok("old reply".into())).expect("gate open");
    harness.deliver_next().await;
    assert!(harness.controller.is_pending());

    gate_new.send(Ok("new reply".into())).expect("gate open");
    harness.deliver_next().await;
    assert!(!harness.controller.is_pending());
    assert_eq!(
        harness.history_texts(),
        vec![
            "user:new".to_string(),
            "assistant:old reply".to_string(),
            "assistant:new reply".to_string(),
        ]
    );
}

#[tokio::test]
async fn clear_is_idempotent_and_resets_to_fresh_session() {
    let engine = echo_engine();
    let mut harness = create_test_harness(engine);

    harness.controller.submit("first").expect("submit");
    harness.deliver_next().await;
    harness.drain_events();

    harness.controller.clear();
    harness.controller.clear();
    assert!(harness.controller.snapshot().is_empty());
    assert_eq!(
        harness.drain_events(),
        vec![RenderEvent::HistoryCleared, RenderEvent::HistoryCleared]
    );

    harness.controller.submit("again").expect("submit");
    harness.deliver_next().await;
    assert_eq!(
        harness.history_texts(),
        vec!["user:again".to_string(), "assistant:echo: again".to_string()]
    );
}

#[tokio::test]
async fn clear_while_pending_stops_typing_before_reset() {
    let engine = echo_engine();
    let _gate = engine.gate("slow");
    let mut harness = create_test_harness(engine);

    harness.controller.submit("slow").expect("submit");
    harness.drain_events();
    harness.controller.clear();

    assert_eq!(
        harness.drain_events(),
        vec![RenderEvent::TypingStopped, RenderEvent::HistoryCleared]
    );
}

#[tokio::test]
async fn engine_failure_delivers_fallback_and_clears_pending() {
    let engine = echo_engine();
    let gate = engine.gate("boom");
    let mut harness = create_test_harness(engine);

    harness.controller.submit("boom").expect("submit");
    gate.send(Err(EngineError::new("backend down")))
        .expect("gate open");
    let delivery = harness.deliver_next().await;

    assert!(delivery.is_fallback());
    assert!(!harness.controller.is_pending());
    assert_eq!(
        harness.history_texts(),
        vec!["user:boom".to_string(), format!("assistant:{TEST_FALLBACK}")]
    );
}

#[tokio::test]
async fn identity_applies_to_later_messages_only() {
    let engine = echo_engine();
    let mut harness = create_test_harness(engine);

    harness.controller.submit("before").expect("submit");
    harness.controller.set_identity("  Ada  ");
    harness.controller.submit("after").expect("submit");
    harness.controller.set_identity("");
    harness.controller.submit("reset").expect("submit");

    let authors: Vec<String> = harness
        .controller
        .snapshot()
        .iter()
        .map(|message| message.author().to_string())
        .collect();
    assert_eq!(authors, vec!["You", "Ada", "You"]);
    assert_eq!(harness.controller.identity(), None);
}

#[tokio::test]
async fn identity_snapshot_is_sent_to_engine() {
    let engine = Arc::new(|text: &str, identity: Option<&str>| -> Result<String, EngineError> {
        Ok(format!("{text} for {}", identity.unwrap_or("nobody")))
    });
    let mut harness = create_test_harness(engine);

    harness.controller.set_identity("Ada");
    harness.controller.submit("help").expect("submit");
    harness.controller.set_identity("Grace");
    harness.deliver_next().await;

    let last = harness.controller.snapshot().get(1).cloned().expect("reply");
    assert_eq!(last.text(), "help for Ada");
}

#[tokio::test]
async fn quick_actions_submit_canned_queries() {
    let engine = echo_engine();
    let mut harness = create_test_harness(engine);

    harness.controller.submit_quick_action(1).expect("quick action");
    harness.deliver_next().await;
    assert_eq!(
        harness.history_texts(),
        vec![
            "user:Where is the emergency room?".to_string(),
            "assistant:echo: Where is the emergency room?".to_string(),
        ]
    );

    let err = harness
        .controller
        .submit_quick_action(9)
        .expect_err("out of range");
    assert_eq!(
        err,
        InteractionError::UnknownQuickAction {
            index: 9,
            available: 2
        }
    );
}

#[tokio::test]
async fn every_submission_gets_exactly_one_reply() {
    let engine = echo_engine();
    let mut harness = create_test_harness(engine.clone());

    for i in 0..5 {
        harness.controller.submit(&format!("q{i}")).expect("submit");
    }
    for _ in 0..5 {
        harness.deliver_next().await;
    }

    let snapshot = harness.controller.snapshot();
    assert_eq!(snapshot.iter().filter(|m| m.is_user()).count(), 5);
    assert_eq!(snapshot.iter().filter(|m| m.is_assistant()).count(), 5);
    assert_eq!(engine.calls(), 5);
    assert!(harness.deliveries.try_recv().is_err());
}

#[tokio::test]
async fn in_flight_counts_every_outstanding_request_across_clear() {
    let engine = echo_engine();
    let gate_a = engine.gate("A");
    let gate_b = engine.gate("B");
    let mut harness = create_test_harness(engine);

    harness.controller.submit("A").expect("submit A");
    harness.controller.submit("B").expect("submit B");
    assert_eq!(harness.controller.in_flight(), 2);
    let _ = harness.controller.submit("  ");
    assert_eq!(harness.controller.in_flight(), 2);

    harness.controller.clear();
    gate_a.send(Ok("reply A".into())).expect("gate A open");
    harness.deliver_next().await;
    assert_eq!(harness.controller.in_flight(), 1);

    gate_b.send(Ok("reply B".into())).expect("gate B open");
    harness.deliver_next().await;
    assert_eq!(harness.controller.in_flight(), 0);
}
