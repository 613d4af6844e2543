//! Ordered rule list for the local responder.
//!
//! Groups are evaluated top-to-bottom and the first match wins, so the order below is the
//! precedence table. Specific groups (named projects, technologies) sit above the generic
//! topic groups that share their vocabulary. Reordering changes classification of
//! overlapping utterances; `matcher` tests pin the current winners.

use crate::knowledge::{KnowledgeBase, SkillCategory};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Topic tag of a pattern group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Topic {
    Greeting,
    Identity,
    ProjectDetail,
    Technology,
    Projects,
    Skills,
    Experience,
    Contact,
    Education,
    Certifications,
    Location,
    Interests,
    Gratitude,
}

impl Topic {
    pub fn label(&self) -> &'static str {
        match self {
            Topic::Greeting => "greeting",
            Topic::Identity => "identity",
            Topic::ProjectDetail => "project_detail",
            Topic::Technology => "technology",
            Topic::Projects => "projects",
            Topic::Skills => "skills",
            Topic::Experience => "experience",
            Topic::Contact => "contact",
            Topic::Education => "education",
            Topic::Certifications => "certifications",
            Topic::Location => "location",
            Topic::Interests => "interests",
            Topic::Gratitude => "gratitude",
        }
    }
}

/// Which response the formatter renders for a matched group or branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Template {
    Greeting,
    Identity,
    ProjectDetail,
    TechnologyUsage,
    ProjectSummary,
    SkillSummary,
    Skills(SkillCategory),
    ExperienceSummary,
    CurrentRole,
    PreviousRoles,
    ExperienceTimeline,
    Contact,
    SocialLinks,
    Education,
    Graduation,
    Certifications,
    Location,
    Interests,
    Gratitude,
}

/// OR of lowercase substring tests and regex alternatives, tested against normalized text.
#[derive(Debug, Clone, Default)]
pub struct Predicate {
    keywords: Vec<String>,
    patterns: Vec<Regex>,
}

impl Predicate {
    pub fn keywords(keywords: &[&str]) -> Self {
        Self {
            keywords: keywords.iter().map(|k| k.to_lowercase()).collect(),
            patterns: Vec::new(),
        }
    }

    pub fn pattern(pattern: &str) -> Result<Self, regex::Error> {
        Self::default().or_pattern(pattern)
    }

    /// Adds a regex alternative.
    pub fn or_pattern(mut self, pattern: &str) -> Result<Self, regex::Error> {
        self.patterns.push(Regex::new(pattern)?);
        Ok(self)
    }

    /// Adds more substring alternatives; blank entries are ignored.
    pub fn or_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.keywords.extend(
            keywords
                .into_iter()
                .map(|k| k.as_ref().trim().to_lowercase())
                .filter(|k| !k.is_empty()),
        );
        self
    }

    /// Adds whole-word alternatives: "iot" matches "iot project" but not "patriot".
    /// Longer terms are tried first; blank entries are ignored.
    pub fn or_words<I, S>(self, words: I) -> Result<Self, regex::Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut terms: Vec<String> = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();
        if terms.is_empty() {
            return Ok(self);
        }
        terms.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        terms.dedup();
        let alternation = terms
            .iter()
            .map(|t| regex::escape(t))
            .collect::<Vec<_>>()
            .join("|");
        self.or_pattern(&format!(r"\b(?:{})\b", alternation))
    }

    pub fn matches(&self, normalized: &str) -> bool {
        self.keywords.iter().any(|k| normalized.contains(k.as_str()))
            || self.patterns.iter().any(|re| re.is_match(normalized))
    }

    /// True when the predicate can never match (no keywords, no pattern).
    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty() && self.patterns.is_empty()
    }
}

/// Ordered sub-rule of a group, evaluated against the same normalized text.
#[derive(Debug, Clone)]
pub struct Branch {
    pub label: &'static str,
    pub predicate: Predicate,
    pub template: Template,
}

/// A named rule: predicate, ordered branches, and the group-level generic template.
#[derive(Debug, Clone)]
pub struct PatternGroup {
    pub topic: Topic,
    pub predicate: Predicate,
    pub branches: Vec<Branch>,
    pub template: Template,
}

impl PatternGroup {
    fn new(topic: Topic, predicate: Predicate, template: Template) -> Self {
        Self {
            topic,
            predicate,
            branches: Vec::new(),
            template,
        }
    }

    fn branch(mut self, label: &'static str, predicate: Predicate, template: Template) -> Self {
        self.branches.push(Branch {
            label,
            predicate,
            template,
        });
        self
    }
}

/// Keywords the contact group owns; technology names equal to one of these stay with contact.
const CONTACT_KEYWORDS: &[&str] = &[
    "contact",
    "email",
    "e-mail",
    "reach",
    "phone",
    "get in touch",
    "hire",
    "linkedin",
    "github",
    "twitter",
    "social",
];

const SOCIAL_KEYWORDS: &[&str] = &["linkedin", "github", "twitter", "social"];

/// Builds the built-in rule list. Project and technology predicates, and the company names
/// in the experience rule, are derived from `kb`.
pub fn default_groups(kb: &KnowledgeBase) -> Result<Vec<PatternGroup>, regex::Error> {
    let project_keywords = kb.projects.iter().flat_map(|p| p.keywords.iter());

    let current_companies: Vec<String> = kb.current_role().map(company_terms).unwrap_or_default();
    let previous_companies: Vec<String> = kb.previous_roles().flat_map(company_terms).collect();

    Ok(vec![
        PatternGroup::new(
            Topic::Greeting,
            Predicate::pattern(r"^(hello|hi|hey|howdy|greetings|good (morning|afternoon|evening))\b")?,
            Template::Greeting,
        ),
        PatternGroup::new(
            Topic::Identity,
            Predicate::pattern(
                r"\b(who are you|your name|about yourself|introduce yourself|tell me about you)\b",
            )?,
            Template::Identity,
        ),
        PatternGroup::new(
            Topic::ProjectDetail,
            Predicate::default().or_words(project_keywords)?,
            Template::ProjectDetail,
        ),
        PatternGroup::new(Topic::Technology, technology_predicate(kb)?, Template::TechnologyUsage),
        PatternGroup::new(
            Topic::Projects,
            Predicate::keywords(&["project", "portfolio", "built", "build"]),
            Template::ProjectSummary,
        ),
        PatternGroup::new(
            Topic::Skills,
            Predicate::keywords(&[
                "skill",
                "technolog",
                "tech stack",
                "programming",
                "language",
                "framework",
                "tools",
                "expertise",
                "proficien",
                "database",
                "cloud",
                "devops",
            ]),
            Template::SkillSummary,
        )
        .branch(
            "languages",
            Predicate::keywords(&["language", "coding"]),
            Template::Skills(SkillCategory::Languages),
        )
        .branch(
            "database",
            Predicate::pattern(r"\b(databases?|sql|db|dbs)\b")?,
            Template::Skills(SkillCategory::Database),
        )
        .branch(
            "cloud",
            Predicate::keywords(&["cloud", "devops", "deploy"]),
            Template::Skills(SkillCategory::Cloud),
        )
        .branch(
            "ml",
            Predicate::pattern(r"\b(ml|ai|machine learning|deep learning|data science|data analysis|analytics)\b")?,
            Template::Skills(SkillCategory::Ml),
        )
        .branch(
            "web",
            Predicate::keywords(&["web", "frontend", "front-end", "backend", "back-end"]),
            Template::Skills(SkillCategory::Web),
        ),
        PatternGroup::new(
            Topic::Experience,
            Predicate::keywords(&["experience", "background", "career", "employ"])
                .or_words(current_companies.iter().chain(previous_companies.iter()))?
                .or_pattern(
                    r"\b(work|worked|working|jobs?|roles?|compan(y|ies)|intern|internship|position)\b",
                )?,
            Template::ExperienceSummary,
        )
        .branch(
            "duration",
            Predicate::keywords(&["how long", "how many years", "duration", "since when"]),
            Template::ExperienceTimeline,
        )
        .branch(
            "current",
            Predicate::pattern(r"\b(current|currently|now|present|today)\b")?.or_words(&current_companies)?,
            Template::CurrentRole,
        )
        .branch(
            "previous",
            Predicate::pattern(r"\b(previous|previously|past|prior|before|former|earlier)\b")?
                .or_words(&previous_companies)?,
            Template::PreviousRoles,
        ),
        PatternGroup::new(
            Topic::Contact,
            Predicate::keywords(CONTACT_KEYWORDS).or_pattern(r"\b(appointments?|schedule a call)\b")?,
            Template::Contact,
        )
        .branch(
            "social",
            Predicate::keywords(SOCIAL_KEYWORDS),
            Template::SocialLinks,
        ),
        PatternGroup::new(
            Topic::Education,
            Predicate::keywords(&[
                "education",
                "study",
                "studies",
                "degree",
                "university",
                "college",
                "school",
                "graduat",
                "master",
                "bachelor",
            ]),
            Template::Education,
        )
        .branch(
            "graduation",
            Predicate::keywords(&["graduat", "when will", "finish"]),
            Template::Graduation,
        ),
        PatternGroup::new(
            Topic::Certifications,
            Predicate::keywords(&["certif"]),
            Template::Certifications,
        ),
        PatternGroup::new(
            Topic::Location,
            Predicate::pattern(r"\b(where|live|lives|living|based|located|location)\b")?,
            Template::Location,
        ),
        PatternGroup::new(
            Topic::Interests,
            Predicate::pattern(r"\b(hobby|hobbies|interests?|free time|spare time|for fun|passion)\b")?,
            Template::Interests,
        ),
        PatternGroup::new(
            Topic::Gratitude,
            Predicate::pattern(r"\b(thanks|thank you|thx|bye|goodbye|see you)\b")?,
            Template::Gratitude,
        ),
    ])
}

/// Full company key plus its first word ("jpmorgan chase", "jpmorgan").
fn company_terms(role: &crate::knowledge::ExperienceEntry) -> Vec<String> {
    let key = role.company_key();
    let mut terms = vec![key.clone()];
    if let Some(first) = key.split_whitespace().next().filter(|w| w.len() >= 3 && *w != key) {
        terms.push(first.to_string());
    }
    terms
}

/// Field names the skills rule answers for as areas rather than single tools.
const AREA_NAMES: &[&str] = &["machine learning", "deep learning", "data analysis", "data science"];

/// Technology names the technology rule answers for: at least two characters, not claimed by
/// the contact rule and not one of the skill areas.
pub(crate) fn technology_names(kb: &KnowledgeBase) -> Vec<String> {
    kb.technologies()
        .into_iter()
        .filter(|t| {
            let lower = t.to_lowercase();
            t.chars().count() >= 2
                && !CONTACT_KEYWORDS.contains(&lower.as_str())
                && !AREA_NAMES.contains(&lower.as_str())
        })
        .collect()
}

/// Word-bounded alternation over every technology name, longest first.
fn technology_predicate(kb: &KnowledgeBase) -> Result<Predicate, regex::Error> {
    Predicate::default().or_words(technology_names(kb))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_groups_compile_in_declared_order() {
        let groups = default_groups(&KnowledgeBase::builtin()).unwrap();
        let topics: Vec<Topic> = groups.iter().map(|g| g.topic).collect();
        assert_eq!(
            topics,
            vec![
                Topic::Greeting,
                Topic::Identity,
                Topic::ProjectDetail,
                Topic::Technology,
                Topic::Projects,
                Topic::Skills,
                Topic::Experience,
                Topic::Contact,
                Topic::Education,
                Topic::Certifications,
                Topic::Location,
                Topic::Interests,
                Topic::Gratitude,
            ]
        );
    }

    #[test]
    fn test_predicate_is_or_of_keywords_and_pattern() {
        let p = Predicate::keywords(&["alpha"]).or_pattern(r"^beta\b").unwrap();
        assert!(p.matches("say alpha"));
        assert!(p.matches("beta test"));
        assert!(!p.matches("gamma only"));
        assert!(!p.matches("not beta"));
    }

    #[test]
    fn test_empty_predicate_never_matches() {
        let p = Predicate::default().or_keywords(["", "  "]);
        assert!(p.is_empty());
        assert!(!p.matches(""));
        assert!(!p.matches("anything"));
    }

    #[test]
    fn test_technology_names_skip_contact_words_and_single_letters() {
        let names = technology_names(&KnowledgeBase::builtin());
        assert!(names.iter().any(|n| n == "Apache Kafka"));
        assert!(names.iter().any(|n| n == "Git"));
        assert!(!names.iter().any(|n| n.eq_ignore_ascii_case("github")));
        assert!(!names.iter().any(|n| n == "C"));
    }

    #[test]
    fn test_technology_predicate_is_word_bounded() {
        let p = technology_predicate(&KnowledgeBase::builtin()).unwrap();
        assert!(p.matches("do you use kafka"));
        assert!(p.matches("what about apache kafka?"));
        assert!(!p.matches("i like javascriptish things"));
        assert!(p.matches("javascript"));
    }

    #[test]
    fn test_or_words_require_word_boundaries() {
        let p = Predicate::default().or_words(["iot", "", "recommendation system"]).unwrap();
        assert!(p.matches("tell me about the iot build"));
        assert!(p.matches("your recommendation system?"));
        assert!(!p.matches("i'm a patriot"));
        assert!(!p.matches("idiot"));
        assert!(Predicate::default().or_words(["  "]).unwrap().is_empty());
    }

    #[test]
    fn test_skill_areas_are_not_technology_names() {
        let names = technology_names(&KnowledgeBase::builtin());
        assert!(!names.iter().any(|n| n == "Machine Learning"));
        assert!(!names.iter().any(|n| n == "Deep Learning"));
        assert!(names.iter().any(|n| n == "TensorFlow"));
    }

    #[test]
    fn test_company_terms_include_first_word() {
        let kb = KnowledgeBase::builtin();
        let current = company_terms(kb.current_role().unwrap());
        assert_eq!(current, vec!["jpmorgan chase".to_string(), "jpmorgan".to_string()]);
        let solo = kb.experience.iter().find(|e| e.company == "CORIZO").unwrap();
        assert_eq!(company_terms(solo), vec!["corizo".to_string()]);
    }
}
