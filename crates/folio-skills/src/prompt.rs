use folio_core::KnowledgeBase;

/// System message for the completion request.
pub fn system_instruction(kb: &KnowledgeBase) -> String {
    let id = &kb.identity;
    format!(
        "You are {assistant}, a helpful assistant on {name}'s portfolio website. You answer questions about {name}'s skills, projects, and experience in a friendly, professional tone. Keep responses concise (under 3 sentences when possible) and focus on {name}'s professional attributes.",
        assistant = id.assistant_name(),
        name = id.short_name
    )
}

/// Knowledge-base context followed by the utterance and the owner's speaker label.
pub fn prepare_prompt(kb: &KnowledgeBase, utterance: &str) -> String {
    format!(
        "{}\n\nUser: {}\n{}:",
        kb.prompt_context(),
        utterance,
        kb.identity.short_name
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_ends_with_speaker_label() {
        let kb = KnowledgeBase::builtin();
        let prompt = prepare_prompt(&kb, "What are your skills?");
        assert!(prompt.starts_with("You are raghava.ai"));
        assert!(prompt.ends_with("\n\nUser: What are your skills?\nRaghava:"));
    }

    #[test]
    fn test_system_instruction_names_the_assistant() {
        let kb = KnowledgeBase::builtin();
        let sys = system_instruction(&kb);
        assert!(sys.starts_with("You are raghava.ai, a helpful assistant on Raghava's portfolio website."));
    }
}
