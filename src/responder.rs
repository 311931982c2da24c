//! Keyword-rule answers.
//!
//! The bot does not understand anything: the lower-cased input is checked
//! against an ordered rule table and the first rule with a matching keyword
//! supplies a canned answer.

pub const FEED_RESPONSE: &str = "For optimal fish growth, consider a balanced diet with 25-35% protein content. Feed frequency depends on fish size and water temperature. Would you like specific recommendations for your fish species?";
pub const DISEASE_RESPONSE: &str = "Common fish diseases include bacterial infections, parasites, and viral diseases. Key prevention measures: maintain good water quality, avoid overcrowding, and quarantine new fish. What symptoms are you observing?";
pub const WATER_RESPONSE: &str = "Important water parameters: pH (6.5-8.5), dissolved oxygen (>5mg/L), ammonia (<0.25mg/L), and temperature. Regular testing and water changes are crucial. Do you need help with specific water quality issues?";
pub const SCHEME_RESPONSE: &str = "Several government schemes support aquaculture: PM-KISAN, Blue Revolution, and state-specific fisheries programs. These offer subsidies for pond construction, equipment, and training. Would you like details about eligibility criteria?";
pub const FALLBACK_RESPONSE: &str = "I'm here to help with all aspects of aquaculture! You can ask me about fish feed, disease management, water quality, pond construction, government schemes, or any other fish farming questions. How can I assist you today?";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topic {
    Feed,
    Disease,
    Water,
    Scheme,
}

#[derive(Debug)]
pub struct ResponseRule {
    pub topic: Topic,
    pub keywords: &'static [&'static str],
    pub response: &'static str,
}

impl ResponseRule {
    fn matches(&self, folded_input: &str) -> bool {
        self.keywords.iter().any(|kw| folded_input.contains(kw))
    }
}

/// Evaluated top to bottom; earlier rules win ties.
pub static RULES: &[ResponseRule] = &[
    ResponseRule {
        topic: Topic::Feed,
        keywords: &["feed", "nutrition"],
        response: FEED_RESPONSE,
    },
    ResponseRule {
        topic: Topic::Disease,
        keywords: &["disease", "sick"],
        response: DISEASE_RESPONSE,
    },
    ResponseRule {
        topic: Topic::Water,
        keywords: &["water", "quality"],
        response: WATER_RESPONSE,
    },
    ResponseRule {
        topic: Topic::Scheme,
        keywords: &["scheme", "subsidy", "government"],
        response: SCHEME_RESPONSE,
    },
];

pub fn classify(input: &str) -> Option<Topic> {
    let folded = input.to_lowercase();
    RULES.iter().find(|rule| rule.matches(&folded)).map(|rule| rule.topic)
}

pub fn select_response(input: &str) -> &'static str {
    let folded = input.to_lowercase();
    RULES
        .iter()
        .find(|rule| rule.matches(&folded))
        .map(|rule| rule.response)
        .unwrap_or(FALLBACK_RESPONSE)
}

/// Every text `select_response` can return.
pub fn all_responses() -> impl Iterator<Item = &'static str> {
    RULES
        .iter()
        .map(|rule| rule.response)
        .chain(std::iter::once(FALLBACK_RESPONSE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_topic_has_its_answer() {
        assert_eq!(select_response("what should I feed tilapia"), FEED_RESPONSE);
        assert_eq!(select_response("my fish look sick"), DISEASE_RESPONSE);
        assert_eq!(select_response("how to test water"), WATER_RESPONSE);
        assert_eq!(select_response("is there a subsidy for ponds"), SCHEME_RESPONSE);
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        assert_eq!(select_response("NUTRITION for catfish"), FEED_RESPONSE);
        assert_eq!(select_response("Government help?"), SCHEME_RESPONSE);
    }

    #[test]
    fn test_earliest_rule_wins() {
        assert_eq!(
            select_response("does bad feed cause disease?"),
            FEED_RESPONSE
        );
        assert_eq!(
            select_response("sick fish and poor water quality"),
            DISEASE_RESPONSE
        );
        assert_eq!(classify("water scheme"), Some(Topic::Water));
    }

    #[test]
    fn test_keywords_match_inside_words() {
        assert_eq!(select_response("feeding schedule"), FEED_RESPONSE);
        assert_eq!(select_response("seasickness"), DISEASE_RESPONSE);
    }

    #[test]
    fn test_unmatched_input_falls_back() {
        assert_eq!(select_response("hello there"), FALLBACK_RESPONSE);
        assert_eq!(select_response(""), FALLBACK_RESPONSE);
        assert_eq!(classify("pond construction"), None);
    }

    #[test]
    fn test_all_responses_lists_every_answer() {
        let all: Vec<_> = all_responses().collect();
        assert_eq!(all.len(), RULES.len() + 1);
        assert_eq!(all.last(), Some(&FALLBACK_RESPONSE));
    }
}
