//! Local responder: normalize, classify against the ordered rule list, format.
//!
//! [`PatternResponder`] is the terminal strategy. It needs no network and always produces
//! an answer; remote-backed strategies wrap it and fall back to it on failure.

mod format;
mod matcher;
mod normalize;
mod rules;

use crate::knowledge::KnowledgeBase;
use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;

pub use format::format;
pub use matcher::{classify, select_branch};
use matcher::resolve_template;
pub use normalize::normalize;
pub use rules::{default_groups, Branch, PatternGroup, Predicate, Template, Topic};

const DEFAULT_RESPONSE: &str = "That's an interesting question. I can provide information about my skills, projects, experience, education, and contact details. Feel free to ask me about those topics!";

/// Returned when no pattern group matches.
pub fn default_response() -> &'static str {
    DEFAULT_RESPONSE
}

/// Where an answer came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "topic", rename_all = "snake_case")]
pub enum AnswerSource {
    Pattern(Topic),
    Fallback,
    Remote,
}

impl AnswerSource {
    pub fn label(&self) -> &'static str {
        match self {
            AnswerSource::Pattern(_) => "pattern",
            AnswerSource::Fallback => "fallback",
            AnswerSource::Remote => "remote",
        }
    }

    pub fn topic(&self) -> Option<Topic> {
        match self {
            AnswerSource::Pattern(topic) => Some(*topic),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    pub text: String,
    pub source: AnswerSource,
}

/// One utterance in, one answer out. Implementations never fail: errors are recovered
/// inside the strategy.
#[async_trait]
pub trait Responder: Send + Sync {
    fn name(&self) -> &str;

    async fn respond(&self, utterance: &str) -> Answer;

    async fn get_response(&self, utterance: &str) -> String {
        self.respond(utterance).await.text
    }
}

/// Keyword/regex responder over an injected knowledge base.
pub struct PatternResponder {
    kb: Arc<KnowledgeBase>,
    groups: Vec<PatternGroup>,
}

impl PatternResponder {
    /// Builds the default rule list for `kb`. Fails only if a derived pattern does not compile.
    pub fn new(kb: Arc<KnowledgeBase>) -> Result<Self, regex::Error> {
        let groups = default_groups(&kb)?;
        Ok(Self { kb, groups })
    }

    /// Uses a caller-supplied rule list, evaluated in the given order.
    pub fn with_groups(kb: Arc<KnowledgeBase>, groups: Vec<PatternGroup>) -> Self {
        Self { kb, groups }
    }

    pub fn knowledge(&self) -> &Arc<KnowledgeBase> {
        &self.kb
    }

    /// Topics in evaluation order.
    pub fn topics(&self) -> Vec<Topic> {
        self.groups.iter().map(|g| g.topic).collect()
    }

    /// Synchronous core of [`Responder::respond`].
    pub fn answer(&self, utterance: &str) -> Answer {
        let normalized = normalize(utterance);
        match classify(&normalized, &self.groups) {
            Some(group) => {
                let template = resolve_template(group, &normalized);
                tracing::debug!(
                    target: "folio::chat",
                    topic = group.topic.label(),
                    template = ?template,
                    "Matched pattern group"
                );
                Answer {
                    text: format(template, &self.kb, &normalized),
                    source: AnswerSource::Pattern(group.topic),
                }
            }
            None => {
                tracing::debug!(target: "folio::chat", "No pattern group matched");
                Answer {
                    text: DEFAULT_RESPONSE.to_string(),
                    source: AnswerSource::Fallback,
                }
            }
        }
    }
}

#[async_trait]
impl Responder for PatternResponder {
    fn name(&self) -> &str {
        "pattern"
    }

    async fn respond(&self, utterance: &str) -> Answer {
        self.answer(utterance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge::Identity;

    fn responder() -> PatternResponder {
        PatternResponder::new(Arc::new(KnowledgeBase::builtin())).unwrap()
    }

    #[tokio::test]
    async fn test_empty_input_returns_default() {
        let r = responder();
        assert_eq!(r.get_response("").await, default_response());
        assert_eq!(r.respond("   ").await.source, AnswerSource::Fallback);
    }

    #[tokio::test]
    async fn test_hello_returns_greeting() {
        let r = responder();
        let answer = r.respond("hello").await;
        assert_eq!(answer.source, AnswerSource::Pattern(Topic::Greeting));
        assert_eq!(
            answer.text,
            "Hello! Nice to meet you. I'm Raghava Kami Reddy Vasa. How can I help you learn more about my skills, projects, or experience today?"
        );
    }

    #[tokio::test]
    async fn test_project_and_skill_returns_projects_response() {
        let r = responder();
        let text = r.get_response("Do your projects use all your skills?").await;
        assert_eq!(text, format(Template::ProjectSummary, r.knowledge(), ""));
    }

    #[tokio::test]
    async fn test_identical_input_gives_identical_output() {
        let r = responder();
        for utterance in ["What are your skills?", "where do you live", "🙂", "Где ты работаешь?"] {
            assert_eq!(r.respond(utterance).await, r.respond(utterance).await);
        }
    }

    #[tokio::test]
    async fn test_any_input_gets_text() {
        let r = responder();
        let long = "tell me something ".repeat(5_000);
        for utterance in ["", "🚀🚀", "\u{0}", "你好", long.as_str()] {
            assert!(!r.get_response(utterance).await.is_empty());
        }
    }

    #[tokio::test]
    async fn test_alternate_knowledge_base_changes_facts() {
        let mut kb = KnowledgeBase::builtin();
        kb.identity = Identity {
            name: "Test Person".to_string(),
            short_name: "Test".to_string(),
            email: "test@example.org".to_string(),
            location: "Springfield".to_string(),
            ..kb.identity.clone()
        };
        let r = PatternResponder::new(Arc::new(kb)).unwrap();
        assert!(r.get_response("hey").await.contains("Test Person"));
        assert!(r.get_response("what is your email").await.contains("test@example.org"));
        assert!(r.get_response("where are you based").await.contains("Springfield"));
        assert!(!r.get_response("how can i contact you").await.contains("vrkreddy27@gmail.com"));
    }

    #[tokio::test]
    async fn test_custom_group_order_is_respected() {
        let kb = Arc::new(KnowledgeBase::builtin());
        let mut groups = default_groups(&kb).unwrap();
        let skills_at = groups.iter().position(|g| g.topic == Topic::Skills).unwrap();
        let skills = groups.remove(skills_at);
        groups.insert(0, skills);
        let r = PatternResponder::with_groups(kb, groups);
        assert_eq!(r.topics()[0], Topic::Skills);
        assert_eq!(
            r.respond("which project shows your skills").await.source,
            AnswerSource::Pattern(Topic::Skills)
        );
    }

    #[test]
    fn test_answer_source_serializes_with_topic() {
        let json = serde_json::to_value(AnswerSource::Pattern(Topic::ProjectDetail)).unwrap();
        assert_eq!(json, serde_json::json!({"kind": "pattern", "topic": "project_detail"}));
        let json = serde_json::to_value(AnswerSource::Remote).unwrap();
        assert_eq!(json, serde_json::json!({"kind": "remote"}));
    }
}
