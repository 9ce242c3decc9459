use aign_core::{CompletionRequestBuilder, Message, Role, Transcript};

#[test]
fn test_seeded_transcript_starts_with_prompt_and_acknowledgement() {
    let transcript = Transcript::seeded("你是一个小说作家", "明白了。");

    let messages = transcript.messages();
    assert_eq!(messages.len(), 2);
    assert_eq!(*messages[0].role(), Role::User);
    assert_eq!(messages[0].content(), "你是一个小说作家");
    assert_eq!(*messages[1].role(), Role::Assistant);
    assert_eq!(messages[1].content(), "明白了。");
}

#[test]
fn test_extended_with_leaves_transcript_untouched() {
    let transcript = Transcript::seeded("prompt", "ok");

    let outgoing = transcript.extended_with(Message::user("next"));

    assert_eq!(outgoing.len(), 3);
    assert_eq!(outgoing[2].content(), "next");
    assert_eq!(transcript.len(), 2);
}

#[test]
fn test_truncate_to_seed_keeps_first_two_turns() {
    let mut transcript = Transcript::seeded("prompt", "ok");
    for i in 0..5 {
        transcript.push(Message::user(format!("turn {i}")));
        transcript.push(Message::assistant(format!("reply {i}")));
    }
    assert_eq!(transcript.len(), 12);

    transcript.truncate_to_seed();

    assert_eq!(transcript.len(), 2);
    assert_eq!(transcript.messages()[1].content(), "ok");
}

#[test]
fn test_request_builder_requires_sampling() {
    let missing = CompletionRequestBuilder::default()
        .messages(vec![Message::user("hi")])
        .build();
    assert!(missing.is_err());

    let request = CompletionRequestBuilder::default()
        .messages(vec![Message::user("hi")])
        .temperature(0.7)
        .top_p(0.8)
        .max_tokens(512)
        .build()
        .expect("complete builder");
    assert_eq!(request.max_tokens, Some(512));
}

#[test]
fn test_message_serializes_lowercase_role() {
    let json = serde_json::to_string(&Message::assistant("hi")).expect("serialize");
    assert_eq!(json, r#"{"role":"assistant","content":"hi"}"#);
}
