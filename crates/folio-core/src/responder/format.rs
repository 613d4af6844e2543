//! Template rendering over knowledge-base fields.
//!
//! Every function here is pure: the same template, knowledge base and normalized text give
//! the same string. Templates that need a specific record (a named project, a named company,
//! a technology) look for it in the normalized utterance and degrade to the matching summary
//! when nothing specific is found or the knowledge base section is empty.

use super::default_response;
use super::rules::{technology_names, Template};
use crate::knowledge::{split_compound, ExperienceEntry, KnowledgeBase, SkillCategory};

/// Renders `template` for the already normalized utterance.
pub fn format(template: Template, kb: &KnowledgeBase, normalized: &str) -> String {
    let id = &kb.identity;
    match template {
        Template::Greeting => format!(
            "Hello! Nice to meet you. I'm {}. How can I help you learn more about my skills, projects, or experience today?",
            id.name
        ),
        Template::Identity => format!(
            "I'm {}, the person behind this portfolio. {}. {}. Ask me about my skills, projects, experience or education.",
            id.name,
            trim_period(&id.headline),
            trim_period(&id.summary)
        ),
        Template::ProjectDetail => project_detail(kb, normalized),
        Template::TechnologyUsage => technology_usage(kb, normalized),
        Template::ProjectSummary => project_summary(kb),
        Template::SkillSummary => skill_summary(kb),
        Template::Skills(category) => skills_in(kb, category),
        Template::ExperienceSummary => experience_summary(kb),
        Template::CurrentRole => current_role(kb, normalized),
        Template::PreviousRoles => previous_roles(kb, normalized),
        Template::ExperienceTimeline => experience_timeline(kb),
        Template::Contact => format!(
            "You can contact me through the contact form on this website, or directly via email at {} or by phone at {}. I'm currently based in {}.",
            id.email, id.phone, id.location
        ),
        Template::SocialLinks => social_links(kb),
        Template::Education => education(kb),
        Template::Graduation => graduation(kb),
        Template::Certifications => certifications(kb),
        Template::Location => location(kb),
        Template::Interests => {
            if kb.interests.is_empty() {
                default_response().to_string()
            } else {
                format!("Outside of work, I enjoy {}.", join_prose(&kb.interests))
            }
        }
        Template::Gratitude => {
            "You're welcome! Feel free to come back anytime if you have more questions about my work."
                .to_string()
        }
    }
}

/// "a", "a and b", "a, b and c".
fn join_prose<S: AsRef<str>>(items: &[S]) -> String {
    match items {
        [] => String::new(),
        [only] => only.as_ref().to_string(),
        [init @ .., last] => {
            let head: Vec<&str> = init.iter().map(|s| s.as_ref()).collect();
            format!("{} and {}", head.join(", "), last.as_ref())
        }
    }
}

fn trim_period(s: &str) -> &str {
    s.trim().trim_end_matches('.')
}

/// True when `needle` occurs in `haystack` with no alphanumeric character on either side.
fn mentions(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return false;
    }
    haystack.match_indices(needle).any(|(at, _)| {
        let before = haystack[..at].chars().next_back();
        let after = haystack[at + needle.len()..].chars().next();
        !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
    })
}

/// Company name without the region suffix, original casing.
fn company_name(role: &ExperienceEntry) -> &str {
    role.company.split(" - ").next().unwrap_or(&role.company).trim()
}

fn role_phrase(role: &ExperienceEntry) -> String {
    format!("{} at {}", role.title, company_name(role))
}

/// "Kafka" is used wherever "Apache Kafka" is listed.
fn uses_technology(technologies: &[String], name: &str) -> bool {
    let name = name.to_lowercase();
    technologies
        .iter()
        .flat_map(|t| split_compound(t))
        .any(|t| mentions(&t.to_lowercase(), &name))
}

fn project_detail(kb: &KnowledgeBase, normalized: &str) -> String {
    let hit = kb
        .projects
        .iter()
        .find(|p| p.keywords.iter().any(|k| mentions(normalized, k.trim().to_lowercase().as_str())));
    match hit {
        Some(p) => {
            let mut out = format!("{} is one of my {} projects. {}", p.title, p.category, p.description);
            if !p.technologies.is_empty() {
                out.push_str(&format!(" I built it with {}.", join_prose(&p.technologies)));
            }
            out
        }
        None => project_summary(kb),
    }
}

fn technology_usage(kb: &KnowledgeBase, normalized: &str) -> String {
    let Some(name) = technology_names(kb)
        .into_iter()
        .filter(|n| mentions(normalized, &n.to_lowercase()))
        .max_by_key(|n| n.len())
    else {
        return skill_summary(kb);
    };

    let roles: Vec<String> = kb
        .experience
        .iter()
        .filter(|e| uses_technology(&e.technologies, &name))
        .map(role_phrase)
        .collect();
    let projects: Vec<&str> = kb
        .projects
        .iter()
        .filter(|p| uses_technology(&p.technologies, &name))
        .map(|p| p.title.as_str())
        .collect();

    let mut out = format!("Yes, I have hands-on experience with {}.", name);
    if !roles.is_empty() {
        out.push_str(&format!(" I've used it as {}.", join_prose(&roles)));
    }
    if !projects.is_empty() {
        out.push_str(&format!(" It also appears in {}.", join_prose(&projects)));
    }
    if roles.is_empty() && projects.is_empty() {
        if let Some(group) = kb.skills.iter().find(|g| uses_technology(&g.items, &name)) {
            out.push_str(&format!(" It's part of my {} skill set.", group.category.label()));
        }
    }
    out
}

fn project_summary(kb: &KnowledgeBase) -> String {
    if kb.projects.is_empty() {
        return "I don't have any projects listed yet, but feel free to ask about my skills or experience.".to_string();
    }
    let titles: Vec<&str> = kb.projects.iter().map(|p| p.title.as_str()).collect();
    format!(
        "I've worked on projects including {}. Ask me about any of them for the details!",
        join_prose(&titles)
    )
}

fn skill_summary(kb: &KnowledgeBase) -> String {
    let groups: Vec<String> = kb
        .skills
        .iter()
        .filter(|g| !g.items.is_empty())
        .map(|g| format!("{} ({})", g.category.label(), g.items.join(", ")))
        .collect();
    if groups.is_empty() {
        return default_response().to_string();
    }
    format!("My skills include: {}.", join_prose(&groups))
}

fn skills_in(kb: &KnowledgeBase, category: SkillCategory) -> String {
    let items = kb.skills_in(category);
    if items.is_empty() {
        return skill_summary(kb);
    }
    format!("For {}, I work with {}.", category.label(), join_prose(&items))
}

fn experience_summary(kb: &KnowledgeBase) -> String {
    let previous: Vec<String> = kb.previous_roles().map(role_phrase).collect();
    match (kb.current_role(), previous.is_empty()) {
        (None, true) => {
            "I don't have any work experience listed yet, but feel free to ask about my projects.".to_string()
        }
        (Some(current), true) => format!("I'm currently a {}.", role_phrase(current)),
        (Some(current), false) => format!(
            "I'm currently a {}. Before that, I worked as {}.",
            role_phrase(current),
            join_prose(&previous)
        ),
        (None, false) => format!("My experience includes working as {}.", join_prose(&previous)),
    }
}

fn role_detail(role: &ExperienceEntry, current: bool) -> String {
    let verb = if current { "I'm currently working as" } else { "I worked as" };
    format!(
        "{} a {} at {} ({}). {}",
        verb,
        role.title,
        company_name(role),
        role.period,
        role.description
    )
}

/// Key and first word of the company, so "jpmorgan" finds "JPMorgan Chase - NA, USA".
fn names_company(role: &ExperienceEntry, normalized: &str) -> bool {
    let key = role.company_key();
    normalized.contains(&key)
        || key
            .split_whitespace()
            .next()
            .is_some_and(|first| first.len() >= 3 && mentions(normalized, first))
}

fn current_role(kb: &KnowledgeBase, normalized: &str) -> String {
    // A named previous employer beats the generic "now" / "current" wording.
    if let Some(named) = kb.previous_roles().find(|e| names_company(e, normalized)) {
        return role_detail(named, false);
    }
    match kb.current_role() {
        Some(role) => role_detail(role, true),
        None => experience_summary(kb),
    }
}

fn previous_roles(kb: &KnowledgeBase, normalized: &str) -> String {
    if let Some(named) = kb.previous_roles().find(|e| names_company(e, normalized)) {
        return role_detail(named, false);
    }
    let previous: Vec<String> = kb.previous_roles().map(role_phrase).collect();
    if previous.is_empty() {
        return experience_summary(kb);
    }
    let lead = if kb.current_role().is_some() {
        "Before my current role"
    } else {
        "Previously"
    };
    format!("{}, I worked as {}.", lead, join_prose(&previous))
}

fn experience_timeline(kb: &KnowledgeBase) -> String {
    if kb.experience.is_empty() {
        return experience_summary(kb);
    }
    let entries: Vec<String> = kb
        .experience
        .iter()
        .map(|e| format!("{} ({})", role_phrase(e), e.period))
        .collect();
    format!("Here's my experience timeline: {}.", entries.join("; "))
}

fn social_links(kb: &KnowledgeBase) -> String {
    let links: Vec<String> = kb
        .identity
        .social
        .iter()
        .map(|l| format!("{} ({})", l.label, l.url))
        .collect();
    if links.is_empty() {
        return format(Template::Contact, kb, "");
    }
    format!("You can find me online on {}.", join_prose(&links))
}

fn education(kb: &KnowledgeBase) -> String {
    match kb.education.as_slice() {
        [] => "I don't have any education details listed yet.".to_string(),
        [latest] => format!(
            "I'm pursuing my {} at {} ({}).",
            latest.degree, latest.institution, latest.period
        ),
        [latest, earlier, ..] => format!(
            "I'm pursuing my {} at {} ({}) after completing my {} from {} ({}).",
            latest.degree,
            latest.institution,
            latest.period,
            earlier.degree,
            earlier.institution,
            earlier.period
        ),
    }
}

fn graduation(kb: &KnowledgeBase) -> String {
    match kb.education.first() {
        Some(latest) => format!(
            "My {} at {} is {}.",
            latest.degree, latest.institution, latest.period
        ),
        None => education(kb),
    }
}

fn certifications(kb: &KnowledgeBase) -> String {
    if kb.certifications.is_empty() {
        return "I don't have any certifications listed yet.".to_string();
    }
    let items: Vec<String> = kb
        .certifications
        .iter()
        .map(|c| format!("{} from {}", c.name, c.issuer))
        .collect();
    format!("I hold the {}.", join_prose(&items))
}

fn location(kb: &KnowledgeBase) -> String {
    let mut out = format!("I'm currently based in {}.", kb.identity.location);
    if let Some(latest) = kb.education.first() {
        out.push_str(&format!(" I'm pursuing my {} at {}.", latest.degree, latest.institution));
    }
    out
}
