//! Prompts sent to the generative-AI service.

/// Prompt for the dashboard's daily tip. The answer must be a JSON object
/// with `title` and `content`.
pub const TIP_PROMPT: &str = r#"Generate a short, calming, and practical stress-reduction tip in Farsi (Persian) for an office employee. Return the result as a JSON object with "title" and "content" keys. Keep the content under 50 words."#;

/// Builds the script prompt for a spoken guided meditation.
///
/// # Examples
///
/// ```
/// use asoka::ai::prompts::meditation_prompt;
///
/// let prompt = meditation_prompt("focus", 5);
/// assert!(prompt.contains("\"focus\""));
/// assert!(prompt.contains("approximately 5 minutes"));
/// ```
pub fn meditation_prompt(topic: &str, minutes: u32) -> String {
    format!(
        r#"Generate a guided meditation script in Farsi (Persian) for an employee focusing on "{topic}".
The meditation should last approximately {minutes} minutes.
Speak slowly, calmly, and with a soothing tone.
Do not include introductory text like "Here is your meditation", just start the script directly."#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tip_prompt_asks_for_json_keys() {
        assert!(TIP_PROMPT.contains("\"title\""));
        assert!(TIP_PROMPT.contains("\"content\""));
    }

    #[test]
    fn test_meditation_prompt_includes_topic_and_length() {
        let prompt = meditation_prompt("deadline stress", 10);
        assert!(prompt.contains("focusing on \"deadline stress\""));
        assert!(prompt.contains("10 minutes"));
        assert!(prompt.lines().count() >= 4);
    }
}
