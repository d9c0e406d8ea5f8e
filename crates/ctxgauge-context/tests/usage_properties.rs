//! Property and scenario tests for context usage estimation

use ctxgauge_context::prelude::*;
use proptest::prelude::*;

fn words(count: usize) -> String {
    vec!["word"; count].join(" ")
}

#[test]
fn scenario_buffered_overflow_is_capped() {
    // 730 words -> 949 tokens, plus 1 word -> 2 tokens = 951
    let messages = vec![Message::user(words(730)), Message::assistant("ok")];
    let usage = calculate_context_usage(&messages, 1000, Some(100));

    assert_eq!(usage.used_tokens, 951);
    assert_eq!(usage.max_context_retained, 900);
    assert_eq!(usage.available_tokens, 0);
    assert!((usage.percentage - 100.0).abs() < f64::EPSILON);
    assert_eq!(usage.level(), UsageLevel::Critical);
}

#[test]
fn scenario_conversation_against_configured_window() {
    let window = ContextWindow::from_json(r#"{"maxTokens": 200, "retentionBuffer": 100}"#)
        .expect("valid window config");

    let mut context = ConversationContext::new();
    context.add_message(Message::system(words(20)));
    context.add_message(Message::assistant(words(30)).with_reasoning(words(10)));

    // 26 + 39 + 13
    let usage = context.usage(&window);
    assert_eq!(usage.used_tokens, 78);
    assert_eq!(usage.available_tokens, 22);
    assert!(usage.is_warning);
    assert!(!usage.is_critical);
}

#[test]
fn scenario_report_json_for_clients() {
    let usage = ContextWindow::new(1000).usage_from_tokens(450);
    let json = serde_json::to_string(&usage).expect("serialize usage");

    assert!(json.contains(r#""usedTokens":450"#));
    assert!(json.contains(r#""maxContextRetained":900"#));
    assert!(json.contains(r#""percentage":50.0"#));
}

proptest! {
    #[test]
    fn whitespace_only_estimates_zero(text in "[ \t\r\n]{0,32}") {
        prop_assert_eq!(estimate_token_count(&text), 0);
    }

    #[test]
    fn estimate_is_ceiling_of_word_ratio(
        parts in prop::collection::vec("[a-z]{1,8}", 1..200),
        sep in "[ \t\n]{1,3}",
    ) {
        let text = parts.join(sep.as_str());
        let expected = (parts.len() * 13).div_ceil(10);
        prop_assert_eq!(estimate_token_count(&text), expected);
    }

    #[test]
    fn available_tokens_never_exceed_capacity(
        total in 0usize..100_000,
        max_context in 0usize..50_000,
        buffer in prop::option::of(0usize..5_000),
    ) {
        let window = ContextWindow::new(max_context).with_retention_buffer(buffer);
        let usage = window.usage_from_tokens(total);
        prop_assert!(usage.available_tokens <= usage.max_context_retained);
        prop_assert!(usage.percentage >= 0.0);
        prop_assert!(!(usage.is_warning && usage.is_critical));
    }

    #[test]
    fn buffered_percentage_is_bounded(
        total in 0usize..100_000,
        max_context in 0usize..50_000,
        buffer in 0usize..5_000,
    ) {
        let usage = ContextWindow::new(max_context)
            .with_retention_buffer(Some(buffer))
            .usage_from_tokens(total);
        prop_assert!(usage.percentage <= 100.0);
    }

    #[test]
    fn unbuffered_overflow_exceeds_hundred(
        max_context in 1usize..10_000,
        excess in 1usize..10_000,
    ) {
        let usage = ContextWindow::unbuffered(max_context).usage_from_tokens(max_context + excess);
        prop_assert!(usage.percentage > 100.0);
        prop_assert!(usage.is_critical);
        prop_assert_eq!(usage.available_tokens, 0);
    }

    #[test]
    fn adding_content_is_monotonic(
        existing in prop::collection::vec(0usize..50, 0..10),
        added in 1usize..50,
        max_context in 0usize..2_000,
        buffer in prop::option::of(0usize..500),
    ) {
        let mut messages: Vec<Message> = existing.iter().map(|&n| Message::user(words(n))).collect();
        let before = calculate_context_usage(&messages, max_context, buffer);

        messages.push(Message::user(words(added)));
        let after = calculate_context_usage(&messages, max_context, buffer);

        prop_assert!(after.used_tokens > before.used_tokens);
        prop_assert!(after.percentage >= before.percentage);
    }
}
