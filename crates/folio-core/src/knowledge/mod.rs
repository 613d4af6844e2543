//! Static knowledge base about the portfolio owner.
//!
//! ## Sections
//!
//! | Section          | Used by                                             |
//! |------------------|-----------------------------------------------------|
//! | `identity`       | greeting, identity, contact and location templates  |
//! | `education`      | education and graduation templates                  |
//! | `experience`     | experience (current / previous / duration)          |
//! | `projects`       | project summary and per-project detail              |
//! | `skills`         | skill summary, per-category skills, technology rule |
//! | `certifications` | certification template                              |
//! | `interests`      | interests template                                  |
//!
//! The knowledge base is constructed once and shared read-only (`Arc<KnowledgeBase>`);
//! nothing mutates it after [`KnowledgeBase::builtin`] or [`KnowledgeBase::load_json_path`].

mod profile;

use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum KnowledgeError {
    #[error("failed to read knowledge file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid knowledge file {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("knowledge base has no owner name")]
    MissingName,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLink {
    pub label: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub name: String,
    /// Speaker label used in prompts ("Raghava:").
    pub short_name: String,
    pub headline: String,
    pub location: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub social: Vec<SocialLink>,
    pub summary: String,
}

impl Identity {
    /// "raghava.ai" for a short name of "Raghava".
    pub fn assistant_name(&self) -> String {
        format!("{}.ai", self.short_name.to_lowercase())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EducationEntry {
    pub degree: String,
    pub institution: String,
    pub period: String,
    pub location: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub title: String,
    pub company: String,
    pub period: String,
    #[serde(default)]
    pub location: String,
    pub description: String,
    #[serde(default)]
    pub technologies: Vec<String>,
    /// At most one entry is expected to be current; the first current entry wins.
    #[serde(default)]
    pub current: bool,
}

impl ExperienceEntry {
    /// Lowercase company name without a trailing region suffix ("JPMorgan Chase - NA, USA" -> "jpmorgan chase").
    pub fn company_key(&self) -> String {
        self.company
            .split(" - ")
            .next()
            .unwrap_or(&self.company)
            .trim()
            .to_lowercase()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectEntry {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub technologies: Vec<String>,
    pub category: String,
    /// Lowercase aliases identifying this project in an utterance.
    #[serde(default)]
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillCategory {
    Languages,
    Web,
    Database,
    Ml,
    Cloud,
    Tools,
}

impl SkillCategory {
    pub fn label(&self) -> &'static str {
        match self {
            SkillCategory::Languages => "Programming Languages",
            SkillCategory::Web => "Web Development",
            SkillCategory::Database => "Databases",
            SkillCategory::Ml => "Machine Learning & Analytics",
            SkillCategory::Cloud => "Cloud & DevOps",
            SkillCategory::Tools => "Tools",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillGroup {
    pub category: SkillCategory,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificationEntry {
    pub name: String,
    pub issuer: String,
}

/// Read-only facts used to fill response templates and the remote prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeBase {
    pub identity: Identity,
    #[serde(default)]
    pub education: Vec<EducationEntry>,
    #[serde(default)]
    pub experience: Vec<ExperienceEntry>,
    #[serde(default)]
    pub projects: Vec<ProjectEntry>,
    #[serde(default)]
    pub skills: Vec<SkillGroup>,
    #[serde(default)]
    pub certifications: Vec<CertificationEntry>,
    #[serde(default)]
    pub interests: Vec<String>,
}

impl KnowledgeBase {
    /// The profile compiled into the binary.
    pub fn builtin() -> Self {
        profile::builtin_profile()
    }

    /// Loads a profile from a JSON file.
    pub fn load_json_path<P: AsRef<Path>>(path: P) -> Result<Self, KnowledgeError> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let raw = std::fs::read_to_string(path).map_err(|source| KnowledgeError::Io {
            path: display.clone(),
            source,
        })?;
        let kb: KnowledgeBase = serde_json::from_str(&raw).map_err(|source| KnowledgeError::Json {
            path: display,
            source,
        })?;
        if kb.identity.name.trim().is_empty() {
            return Err(KnowledgeError::MissingName);
        }
        Ok(kb)
    }

    /// Loads `path` when given, otherwise the built-in profile. A file that fails to load is
    /// logged and replaced by the built-in profile so the assistant always has facts.
    pub fn load_or_builtin(path: Option<&str>) -> Self {
        match path.map(str::trim).filter(|p| !p.is_empty()) {
            Some(p) => match Self::load_json_path(p) {
                Ok(kb) => {
                    tracing::info!(target: "folio::knowledge", path = %p, "Loaded knowledge base");
                    kb
                }
                Err(e) => {
                    tracing::warn!(target: "folio::knowledge", error = %e, "Falling back to built-in knowledge base");
                    Self::builtin()
                }
            },
            None => Self::builtin(),
        }
    }

    /// The first entry flagged `current`.
    pub fn current_role(&self) -> Option<&ExperienceEntry> {
        self.experience.iter().find(|e| e.current)
    }

    /// Every entry not flagged `current`, in declaration order.
    pub fn previous_roles(&self) -> impl Iterator<Item = &ExperienceEntry> {
        self.experience.iter().filter(|e| !e.current)
    }

    pub fn skills_in(&self, category: SkillCategory) -> Vec<&str> {
        self.skills
            .iter()
            .filter(|g| g.category == category)
            .flat_map(|g| g.items.iter().map(String::as_str))
            .collect()
    }

    /// Distinct technology names across skills, experience and projects, in first-seen order.
    /// Compound skill labels ("Flask / FastAPI", "Docker & Kubernetes") are split into their parts.
    pub fn technologies(&self) -> Vec<String> {
        let skill_names = self.skills.iter().flat_map(|g| g.items.iter());
        let role_names = self.experience.iter().flat_map(|e| e.technologies.iter());
        let project_names = self.projects.iter().flat_map(|p| p.technologies.iter());

        let mut seen: Vec<String> = Vec::new();
        for raw in skill_names.chain(role_names).chain(project_names) {
            for part in split_compound(raw) {
                if !seen.iter().any(|s| s.eq_ignore_ascii_case(part)) {
                    seen.push(part.to_string());
                }
            }
        }
        seen
    }

    /// Renders the whole knowledge base as prose for the remote completion prompt.
    pub fn prompt_context(&self) -> String {
        let id = &self.identity;
        let mut out = String::new();
        out.push_str(&format!(
            "You are {}, a virtual assistant representing {} on their portfolio website.\n",
            id.assistant_name(),
            id.name
        ));
        out.push_str(&format!(
            "You should respond as if you are {}, in a professional but friendly tone.\n\n",
            id.short_name
        ));

        out.push_str(&format!("About {}:\n", id.short_name));
        out.push_str(&format!("- {}\n", id.headline));
        out.push_str(&format!("- {}\n", id.summary));
        for e in &self.education {
            out.push_str(&format!("- {} at {} ({})\n", e.degree, e.institution, e.period));
        }
        for e in &self.experience {
            let when = if e.current { "current" } else { "previous" };
            out.push_str(&format!("- {} at {} ({}, {})\n", e.title, e.company, when, e.period));
        }
        out.push_str(&format!("- Currently living in {}\n", id.location));
        out.push_str(&format!("- Contact: {}, {}\n", id.email, id.phone));
        for link in &id.social {
            out.push_str(&format!("- {}: {}\n", link.label, link.url));
        }

        out.push_str("\nSkills:\n");
        for g in &self.skills {
            out.push_str(&format!("- {}: {}\n", g.category.label(), g.items.join(", ")));
        }

        out.push_str("\nProjects:\n");
        for (i, p) in self.projects.iter().enumerate() {
            out.push_str(&format!(
                "{}. {} ({})\n   - {}\n",
                i + 1,
                p.title,
                p.technologies.join(", "),
                p.description
            ));
        }

        if !self.certifications.is_empty() {
            out.push_str("\nCertifications:\n");
            for c in &self.certifications {
                out.push_str(&format!("- {}: {}\n", c.name, c.issuer));
            }
        }

        if !self.interests.is_empty() {
            out.push_str(&format!("\nInterests: {}\n", self.interests.join(", ")));
        }

        out.push_str(&format!(
            "\nRemember to keep responses concise, helpful, and in a tone that represents {} well.",
            id.short_name
        ));
        out
    }
}

/// Splits "Flask / FastAPI" and "Docker & Kubernetes" into parts and drops parenthetical
/// qualifiers ("GraphQL (Ariadne)" -> "GraphQL"). "CI/CD" has no spaces and stays whole.
pub(crate) fn split_compound(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(" / ")
        .flat_map(|part| part.split(" & "))
        .map(|part| part.split(" (").next().unwrap_or(part).trim())
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_builtin_profile_has_current_role_and_projects() {
        let kb = KnowledgeBase::builtin();
        assert_eq!(kb.identity.short_name, "Raghava");
        let current = kb.current_role().expect("current role");
        assert!(current.company.starts_with("JPMorgan"));
        assert!(kb.previous_roles().count() >= 1);
        assert!(kb.projects.iter().all(|p| !p.keywords.is_empty()));
    }

    #[test]
    fn test_company_key_drops_region_suffix() {
        let kb = KnowledgeBase::builtin();
        let current = kb.current_role().unwrap();
        assert_eq!(current.company_key(), "jpmorgan chase");
    }

    #[test]
    fn test_technologies_split_compound_labels_and_dedupe() {
        let kb = KnowledgeBase::builtin();
        let tech = kb.technologies();
        assert!(tech.iter().any(|t| t == "FastAPI"));
        assert!(tech.iter().any(|t| t == "Kubernetes"));
        assert_eq!(tech.iter().filter(|t| t.eq_ignore_ascii_case("python")).count(), 1);
        assert!(tech.iter().any(|t| t == "GraphQL"));
        assert!(tech.iter().any(|t| t == "CI/CD"));
        assert!(!tech.iter().any(|t| t.contains(" / ") || t.contains('(')));
    }

    #[test]
    fn test_prompt_context_mentions_every_section() {
        let kb = KnowledgeBase::builtin();
        let ctx = kb.prompt_context();
        assert!(ctx.starts_with("You are raghava.ai"));
        assert!(ctx.contains("New Jersey Institute of Technology"));
        assert!(ctx.contains("JPMorgan Chase"));
        assert!(ctx.contains("Dental Care Centre Website"));
        assert!(ctx.contains("Full Stack Developer Certification: Microsoft"));
        assert!(ctx.contains(&kb.identity.email));
    }

    #[test]
    fn test_load_json_round_trips_through_file() {
        let kb = KnowledgeBase::builtin();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profile.json");
        std::fs::write(&path, serde_json::to_string_pretty(&kb).unwrap()).unwrap();
        let loaded = KnowledgeBase::load_json_path(&path).unwrap();
        assert_eq!(loaded, kb);
    }

    #[test]
    fn test_load_json_rejects_blank_name() {
        let mut kb = KnowledgeBase::builtin();
        kb.identity.name = "  ".to_string();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", serde_json::to_string(&kb).unwrap()).unwrap();
        let err = KnowledgeBase::load_json_path(file.path()).unwrap_err();
        assert!(matches!(err, KnowledgeError::MissingName));
    }

    #[test]
    fn test_load_or_builtin_falls_back_on_bad_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        let kb = KnowledgeBase::load_or_builtin(file.path().to_str());
        assert_eq!(kb, KnowledgeBase::builtin());
    }
}
