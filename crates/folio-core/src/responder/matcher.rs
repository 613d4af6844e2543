use super::rules::{Branch, PatternGroup, Template};

/// First group, in declaration order, whose predicate matches `normalized`.
pub fn classify<'a>(normalized: &str, groups: &'a [PatternGroup]) -> Option<&'a PatternGroup> {
    groups.iter().find(|g| g.predicate.matches(normalized))
}

/// First branch of `group` matching the same text; `None` means the group template applies.
pub fn select_branch<'a>(group: &'a PatternGroup, normalized: &str) -> Option<&'a Branch> {
    group.branches.iter().find(|b| b.predicate.matches(normalized))
}

/// Template to render for an already matched group.
pub(crate) fn resolve_template(group: &PatternGroup, normalized: &str) -> Template {
    select_branch(group, normalized)
        .map(|b| b.template)
        .unwrap_or(group.template)
}
