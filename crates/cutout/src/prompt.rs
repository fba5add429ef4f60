//! Inpainting prompt construction.

/// Build the inpainting prompt for a class name. Pure: the same input always
/// yields the same string. Digits are stripped in case a caller passes a full
/// artifact name instead of its class portion, and underscores become spaces
/// so "dining_table" reads as "dining table".
pub fn build_prompt(class_name: &str) -> String {
    let subject: String = class_name
        .chars()
        .filter(|c| !c.is_ascii_digit())
        .map(|c| if c == '_' { ' ' } else { c })
        .collect();
    let subject = subject.trim();
    format!(
        "a clean, a realistic {subject} with complete structure, no items on top, isolated, \
         perfectly symmetrical, realistic lighting, studio shot"
    )
}

/// Class portion of an artifact name: `chair_12` -> `chair`,
/// `dining_table_3` -> `dining_table`. A name without a trailing numeric
/// segment is returned unchanged.
pub fn artifact_class(name: &str) -> &str {
    match name.rsplit_once('_') {
        Some((class, index)) if !index.is_empty() && index.bytes().all(|b| b.is_ascii_digit()) => {
            class
        }
        _ => name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn underscores_become_spaces() {
        let prompt = build_prompt("dining_table");
        assert!(prompt.contains("dining table"));
    }

    #[test]
    fn digits_are_stripped() {
        let prompt = build_prompt("chair_2");
        assert!(!prompt.chars().any(|c| c.is_ascii_digit()));
        assert!(prompt.contains("a realistic chair with"));
    }

    #[test]
    fn fixed_phrases_are_present() {
        let prompt = build_prompt("couch");
        for phrase in [
            "a clean,",
            "complete structure",
            "no items on top",
            "isolated",
            "perfectly symmetrical",
            "realistic lighting",
            "studio shot",
        ] {
            assert!(prompt.contains(phrase), "missing phrase: {phrase}");
        }
    }

    #[test]
    fn prompts_are_deterministic() {
        assert_eq!(build_prompt("bed"), build_prompt("bed"));
    }

    #[test]
    fn artifact_class_strips_trailing_index() {
        assert_eq!(artifact_class("chair_1"), "chair");
        assert_eq!(artifact_class("dining_table_12"), "dining_table");
        assert_eq!(artifact_class("potted_plant"), "potted_plant");
        assert_eq!(artifact_class("vase"), "vase");
    }
}
