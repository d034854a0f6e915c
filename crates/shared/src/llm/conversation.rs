use serde::{Deserialize, Serialize};

use super::gateway::{GenerateRequest, LlmGatewayError, TextGateway};
use super::prompts::{ContentAnalysis, ContentAnalysisKind, analyze_content};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    const fn display_label(self) -> &'static str {
        match self {
            Self::User => "User",
            Self::Assistant => "Assistant",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: Role,
    pub content: String,
}

/// Ordered, append-only transcript of one conversation. Cleared wholesale;
/// individual turns are never removed.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    turns: Vec<ConversationTurn>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, role: Role, content: impl Into<String>) {
        self.turns.push(ConversationTurn {
            role,
            content: content.into(),
        });
    }

    pub fn clear(&mut self) {
        self.turns.clear();
    }

    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Flattens the whole transcript into a single prompt, one
    /// `<Role>: <content>` line per turn. The provider sees plain text, not
    /// structured multi-turn context, so the prompt grows with the history.
    pub fn render_prompt(&self) -> String {
        let mut rendered = String::new();
        for turn in &self.turns {
            rendered.push_str(turn.role.display_label());
            rendered.push_str(": ");
            rendered.push_str(&turn.content);
            rendered.push('\n');
        }
        rendered
    }
}

/// Multi-turn conversation over any [`TextGateway`]. Each send re-transmits
/// the full rendered transcript as one prompt with default sampling.
pub struct ChatSession<G: TextGateway> {
    gateway: G,
    transcript: Transcript,
}

impl<G: TextGateway> ChatSession<G> {
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            transcript: Transcript::new(),
        }
    }

    /// Appends the user turn, sends the flattened history, appends and
    /// returns the assistant turn. On provider failure the user turn stays
    /// in the transcript and the error propagates unchanged.
    pub async fn send(
        &mut self,
        user_message: impl Into<String>,
    ) -> Result<String, LlmGatewayError> {
        self.transcript.push(Role::User, user_message);

        let reply = self
            .gateway
            .generate(GenerateRequest::new(self.transcript.render_prompt()))
            .await?;

        self.transcript.push(Role::Assistant, reply.clone());
        Ok(reply)
    }

    pub async fn analyze(
        &self,
        content: &str,
        kind: ContentAnalysisKind,
    ) -> Result<ContentAnalysis, LlmGatewayError> {
        analyze_content(&self.gateway, content, kind).await
    }

    /// Starts a fresh conversation, discarding all accumulated turns.
    pub fn reset(&mut self) {
        self.transcript.clear();
    }

    pub fn clear_history(&mut self) {
        self.transcript.clear();
    }

    pub fn history(&self) -> &[ConversationTurn] {
        self.transcript.turns()
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::super::gateway::TextGatewayFuture;
    use super::*;

    struct CannedGateway {
        reply: &'static str,
        prompts: Mutex<Vec<String>>,
    }

    impl CannedGateway {
        fn new(reply: &'static str) -> Self {
            Self {
                reply,
                prompts: Mutex::new(Vec::new()),
            }
        }
    }

    impl TextGateway for CannedGateway {
        fn generate<'a>(&'a self, request: GenerateRequest) -> TextGatewayFuture<'a> {
            Box::pin(async move {
                self.prompts
                    .lock()
                    .expect("prompt log should lock")
                    .push(request.prompt);
                Ok(self.reply.to_string())
            })
        }
    }

    struct FailingGateway;

    impl TextGateway for FailingGateway {
        fn generate<'a>(&'a self, _request: GenerateRequest) -> TextGatewayFuture<'a> {
            Box::pin(async move {
                Err(LlmGatewayError::ProviderFailure("status=500".to_string()))
            })
        }
    }

    #[tokio::test]
    async fn send_appends_user_and_assistant_turns_in_order() {
        let mut session = ChatSession::new(CannedGateway::new("hello there"));

        let reply = session.send("hi").await.expect("send should succeed");
        assert_eq!(reply, "hello there");

        let history = session.history();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].role, Role::User);
        assert_eq!(history[0].content, "hi");
        assert_eq!(history[1].role, Role::Assistant);
        assert_eq!(history[1].content, "hello there");
    }

    #[tokio::test]
    async fn send_transmits_the_full_rendered_transcript() {
        let mut session = ChatSession::new(CannedGateway::new("ack"));

        session.send("first").await.expect("send should succeed");
        session.send("second").await.expect("send should succeed");

        let prompts = session
            .gateway()
            .prompts
            .lock()
            .expect("prompt log should lock")
            .clone();
        assert_eq!(prompts.len(), 2);
        assert_eq!(prompts[0], "User: first\n");
        assert_eq!(
            prompts[1],
            "User: first\nAssistant: ack\nUser: second\n"
        );
    }

    #[tokio::test]
    async fn reset_clears_the_transcript() {
        let mut session = ChatSession::new(CannedGateway::new("ack"));
        session.send("hi").await.expect("send should succeed");
        assert!(!session.history().is_empty());

        session.reset();
        assert!(session.history().is_empty());
    }

    #[tokio::test]
    async fn provider_failure_keeps_the_user_turn_and_propagates() {
        let mut session = ChatSession::new(FailingGateway);

        let err = session.send("hi").await.expect_err("send should fail");
        assert!(matches!(err, LlmGatewayError::ProviderFailure(_)));

        let history = session.history();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].role, Role::User);
    }

    #[test]
    fn render_prompt_is_empty_for_an_empty_transcript() {
        assert_eq!(Transcript::new().render_prompt(), "");
    }
}
