use async_trait::async_trait;
use llm::{LLMError, MockCompletionClient};
use memory::{ConversationStore, InMemoryStore, StoreError};
use skill::manager::{
    APOLOGY_SPEECH, CLEAR_REPROMPT, FALLBACK_REPROMPT, FALLBACK_SPEECH, FAREWELL_SPEECH,
    HELP_REPROMPT, HELP_SPEECH, LAUNCH_REPROMPT, UNHANDLED_SPEECH,
};
use skill::{ContextManager, Intent, SkillConfig, SkillRequest};
use std::sync::Arc;
use voice::{ConversationState, PREAMBLE};

const USER: &str = "amzn1.ask.account.test";

struct Harness {
    llm: Arc<MockCompletionClient>,
    store: Arc<InMemoryStore>,
    manager: ContextManager,
}

fn harness(max_context_size: usize) -> Harness {
    let mut config = SkillConfig::new("sk-test");
    config.max_context_size = max_context_size;
    let llm = Arc::new(MockCompletionClient::default());
    let store = Arc::new(InMemoryStore::new());
    let manager = ContextManager::new(Arc::new(config), llm.clone(), store.clone());
    Harness { llm, store, manager }
}

fn converse(text: &str) -> SkillRequest {
    SkillRequest::Intent(Intent::Converse {
        utterance: Some(text.to_string()),
    })
}

impl Harness {
    async fn say(&self, text: &str, reply: &str) -> skill::SkillResponse {
        self.llm.push_response(reply);
        self.manager.handle(USER, converse(text)).await
    }

    async fn state(&self) -> ConversationState {
        self.store.load(USER).await.unwrap().unwrap()
    }
}

#[tokio::test]
async fn launch_then_converse_builds_transcript() {
    let h = harness(50);
    let greeting = h.manager.handle(USER, SkillRequest::Launch).await;
    assert_eq!(
        greeting.speech.as_deref(),
        Some("<voice name=\"Matthew\">Welcome to the GPT-3 Interface.</voice>")
    );
    assert_eq!(greeting.reprompt.as_deref(), Some(LAUNCH_REPROMPT));
    assert!(!greeting.end_session);
    assert_eq!(h.state().await, ConversationState::new());

    let out = h.say("hello", " hi there ").await;
    assert_eq!(
        out.speech.as_deref(),
        Some("<voice name=\"Matthew\">hi there</voice>")
    );
    assert!(!out.end_session);

    let state = h.state().await;
    assert_eq!(
        state.transcript(),
        &[
            PREAMBLE.to_string(),
            "Human: hello".to_string(),
            "AI: hi there".to_string()
        ]
    );
    assert_eq!(state.last_user_utterance(), "hello");
    assert_eq!(state.last_assistant_reply(), "hi there");
    assert_eq!(
        h.llm.prompts(),
        vec![format!("{PREAMBLE}\nHuman: hello\nAI: ")]
    );
}

#[tokio::test]
async fn launch_keeps_stored_conversation() {
    let h = harness(50);
    h.say("hello", "hi").await;
    let before = h.state().await;
    h.manager.handle(USER, SkillRequest::Launch).await;
    assert_eq!(h.state().await, before);
}

#[tokio::test]
async fn transcript_grows_by_one_pair_per_turn() {
    let h = harness(11);
    for n in 1..=5 {
        h.say(&format!("q{n}"), &format!("a{n}")).await;
        assert_eq!(h.state().await.transcript().len(), n * 2 + 1);
    }
}

#[tokio::test]
async fn transcript_is_capped_at_budget() {
    let h = harness(5);
    for n in 1..=3 {
        h.say(&format!("q{n}"), &format!("a{n}")).await;
    }
    let state = h.state().await;
    assert_eq!(
        state.transcript(),
        &[
            PREAMBLE.to_string(),
            "Human: q2".to_string(),
            "AI: a2".to_string(),
            "Human: q3".to_string(),
            "AI: a3".to_string(),
        ]
    );

    for n in 4..=8 {
        h.say(&format!("q{n}"), &format!("a{n}")).await;
        let state = h.state().await;
        assert_eq!(state.transcript().len(), 5);
        assert_eq!(state.transcript()[0], PREAMBLE);
    }
}

#[tokio::test]
async fn even_budget_settles_one_past_the_limit() {
    let h = harness(6);
    for n in 1..=12 {
        h.say(&format!("q{n}"), &format!("a{n}")).await;
        let state = h.state().await;
        assert!(state.transcript().len() <= 7);
        assert_eq!(state.transcript()[0], PREAMBLE);
    }
    let state = h.state().await;
    assert_eq!(state.transcript().len(), 7);
    assert_eq!(
        &state.transcript()[1..],
        &[
            "Human: q10".to_string(),
            "AI: a10".to_string(),
            "Human: q11".to_string(),
            "AI: a11".to_string(),
            "Human: q12".to_string(),
            "AI: a12".to_string(),
        ]
    );
}

#[tokio::test]
async fn help_speaks_usage_without_touching_state() {
    let h = harness(50);
    let out = h.manager.handle(USER, SkillRequest::Intent(Intent::Help)).await;
    assert_eq!(out.speech.as_deref(), Some(HELP_SPEECH));
    assert_eq!(out.reprompt.as_deref(), Some(HELP_REPROMPT));
    assert!(!out.end_session);
    assert!(h.store.is_empty());
    assert!(h.llm.prompts().is_empty());
}

#[tokio::test]
async fn fallback_points_to_help_without_touching_state() {
    let h = harness(50);
    let out = h
        .manager
        .handle(USER, SkillRequest::Intent(Intent::Fallback))
        .await;
    assert_eq!(out.speech.as_deref(), Some(FALLBACK_SPEECH));
    assert_eq!(out.reprompt.as_deref(), Some(FALLBACK_REPROMPT));
    assert!(!out.end_session);
    assert!(h.store.is_empty());
    assert!(h.llm.prompts().is_empty());
}

#[tokio::test]
async fn repeat_is_idempotent() {
    let h = harness(50);
    h.say("what's up", "  not much  ").await;
    for _ in 0..3 {
        let out = h
            .manager
            .handle(USER, SkillRequest::Intent(Intent::RepeatLast))
            .await;
        assert_eq!(
            out.speech.as_deref(),
            Some("<voice name=\"Matthew\">not much</voice>")
        );
        assert_eq!(out.reprompt.as_deref(), Some("You had said... what's up"));
    }
    assert_eq!(h.state().await.last_assistant_reply(), "not much");
}

#[tokio::test]
async fn repeat_before_any_conversation_speaks_placeholder() {
    let h = harness(50);
    let out = h
        .manager
        .handle(USER, SkillRequest::Intent(Intent::RepeatLast))
        .await;
    assert_eq!(
        out.speech.as_deref(),
        Some("<voice name=\"Matthew\">Nothing</voice>")
    );
    assert!(h.store.is_empty());
}

#[tokio::test]
async fn clear_resets_to_preamble() {
    let h = harness(50);
    for n in 1..=4 {
        h.say(&format!("q{n}"), &format!("a{n}")).await;
    }
    let out = h
        .manager
        .handle(USER, SkillRequest::Intent(Intent::ClearContext))
        .await;
    assert!(out
        .speech
        .as_deref()
        .unwrap()
        .starts_with("Context cleared... <voice"));
    assert_eq!(out.reprompt.as_deref(), Some(CLEAR_REPROMPT));
    assert!(!out.end_session);
    assert_eq!(h.state().await, ConversationState::new());
    assert_eq!(h.state().await.transcript(), &[PREAMBLE.to_string()]);
}

#[tokio::test]
async fn failed_completion_leaves_state_untouched() {
    let h = harness(50);
    h.say("hello", "hi").await;
    let before = h.state().await;

    h.llm.push_error(LLMError::Network("connection reset".into()));
    let out = h.manager.handle(USER, converse("again")).await;
    assert_eq!(out.speech.as_deref(), Some(APOLOGY_SPEECH));
    assert_eq!(out.reprompt.as_deref(), Some(APOLOGY_SPEECH));
    assert_eq!(h.state().await, before);
}

#[tokio::test]
async fn converse_without_utterance_apologises() {
    let h = harness(50);
    for utterance in [None, Some("   ".to_string())] {
        let out = h
            .manager
            .handle(USER, SkillRequest::Intent(Intent::Converse { utterance }))
            .await;
        assert_eq!(out.speech.as_deref(), Some(APOLOGY_SPEECH));
    }
    assert!(h.llm.prompts().is_empty());
    assert!(h.store.is_empty());
}

#[tokio::test]
async fn stop_ends_session() {
    let h = harness(50);
    let out = h.manager.handle(USER, SkillRequest::Intent(Intent::Stop)).await;
    assert_eq!(out.speech.as_deref(), Some(FAREWELL_SPEECH));
    assert!(out.end_session);
    assert!(out.reprompt.is_none());
}

#[tokio::test]
async fn unknown_intent_and_session_end_do_not_touch_state() {
    let h = harness(50);
    let out = h
        .manager
        .handle(
            USER,
            SkillRequest::Intent(Intent::Unhandled("OrderPizzaIntent".into())),
        )
        .await;
    assert_eq!(out.speech.as_deref(), Some(UNHANDLED_SPEECH));
    assert_eq!(out.reprompt.as_deref(), Some(UNHANDLED_SPEECH));
    assert!(!out.end_session);

    let out = h
        .manager
        .handle(
            USER,
            SkillRequest::SessionEnded {
                reason: Some("USER_INITIATED".into()),
            },
        )
        .await;
    assert!(out.speech.is_none());
    assert!(h.store.is_empty());
}

#[tokio::test]
async fn reply_markup_is_escaped() {
    let h = harness(50);
    let out = h.say("math", "1 < 2").await;
    assert_eq!(
        out.speech.as_deref(),
        Some("<voice name=\"Matthew\">1 &lt; 2</voice>")
    );
    assert_eq!(h.state().await.last_assistant_reply(), "1 < 2");
}

struct BrokenStore;

#[async_trait]
impl ConversationStore for BrokenStore {
    async fn load(&self, _user_id: &str) -> Result<Option<ConversationState>, StoreError> {
        Ok(None)
    }

    async fn save(&self, _user_id: &str, _state: &ConversationState) -> Result<(), StoreError> {
        Err(StoreError::Io(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "read-only table",
        )))
    }
}

#[tokio::test]
async fn storage_failure_apologises() {
    let llm = Arc::new(MockCompletionClient::new(vec!["hi".into()]));
    let manager = ContextManager::new(
        Arc::new(SkillConfig::new("sk-test")),
        llm,
        Arc::new(BrokenStore),
    );
    let out = manager.handle(USER, converse("hello")).await;
    assert_eq!(out.speech.as_deref(), Some(APOLOGY_SPEECH));
}
