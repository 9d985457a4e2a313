//! Emergency keyword detection for voice commands.

/// Phrases that turn a voice command into an emergency.
pub const EMERGENCY_KEYWORDS: &[&str] = &["help", "emergency", "sos", "save me", "danger"];

/// Whether `command` contains any emergency keyword, ignoring case.
///
/// Matching is by substring, so "helpless" also triggers.
#[must_use]
pub fn is_emergency_command(command: &str) -> bool {
    let command = command.to_lowercase();
    EMERGENCY_KEYWORDS
        .iter()
        .any(|keyword| command.contains(keyword))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_keywords_case_insensitively() {
        assert!(is_emergency_command("please help me now"));
        assert!(is_emergency_command("SOS"));
        assert!(is_emergency_command("Someone Save Me"));
        assert!(is_emergency_command("there is danger here"));
        assert!(is_emergency_command("call EMERGENCY services"));
    }

    #[test]
    fn ignores_ordinary_commands() {
        assert!(!is_emergency_command("turn off lights"));
        assert!(!is_emergency_command("open safety map"));
        assert!(!is_emergency_command(""));
    }

    #[test]
    fn matches_substrings() {
        assert!(is_emergency_command("helpless"));
    }
}
