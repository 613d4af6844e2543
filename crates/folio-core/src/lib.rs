//! folio-core: portfolio assistant core library (shared config, knowledge base, local responder).
//!
//! The local responder is a keyword/regex classifier over an ordered rule list. It never
//! performs I/O, so everything here is synchronous except the [`Responder`] seam, which is
//! async so the remote-backed strategy in `folio-skills` can share the same contract.

mod knowledge;
mod responder;
mod shared;

pub use shared::{ContactConfig, CoreConfig, LlmConfig, TypingDelay, DEFAULT_CONFIG_PATH};

pub use knowledge::{
    CertificationEntry, EducationEntry, ExperienceEntry, Identity, KnowledgeBase, KnowledgeError,
    ProjectEntry, SkillCategory, SkillGroup, SocialLink,
};

pub use responder::{
    classify, default_groups, default_response, format, normalize, select_branch, Answer,
    AnswerSource, Branch, PatternGroup, PatternResponder, Predicate, Responder, Template, Topic,
};
