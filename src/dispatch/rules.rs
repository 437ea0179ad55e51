//! Ordered rule table for safety phrases and explicit commands.
//!
//! Rules are evaluated top to bottom against the trimmed, lower-cased
//! utterance; the first rule whose predicate holds decides the turn and the
//! classifier is never consulted. The standard table:
//!
//! | # | rule               | predicate                                          |
//! |---|--------------------|----------------------------------------------------|
//! | 1 | `start`            | `"start"`                                          |
//! | 2 | `exercise_accept`  | awaiting confirmation and `"yes"`                  |
//! | 3 | `exercise_decline` | awaiting confirmation and `"no"`                   |
//! | 4 | `negative_affect`  | negative phrase pattern or negative keyword        |
//! | 5 | `no_thanks`        | `"no thanks"`                                      |
//! | 6 | `thanks`           | `"thanks"` or `"thank you"`                        |
//! | 7 | `stop`             | `"stop"`                                           |
//! | 8 | `help`             | `"help"`                                           |
//! | 9 | `resources`        | `"resources"`                                      |
//! | 10| `help_crisis`      | mentions help and an urgent word                   |
//! | 11| `help_resources`   | mentions help and a resource word                  |
//! | 12| `help_advice`      | mentions help and an advice word                   |
//! | 13| `help_menu`        | mentions help                                      |
//!
//! Keyword groups are substring tests, so inflections count ("sadness",
//! "badly", "supportive") and so do words that merely contain a keyword
//! ("goodbye"). The groups overlap on purpose ("anxious" is negative affect
//! even in "I need help, I'm anxious"); order alone resolves the overlap.

use regex::Regex;

use super::state::ConversationState;
use crate::analysis::token_filter::fold_case;
use crate::content::CannedReplies;
use crate::error::{HavenError, Result};

const NEGATIVE_PATTERNS: &[&str] = &[
    r"\b(not\s+okay|feeling\s+bad|feeling\s+sad|feeling\s+down|feeling\s+hopeless|not\s+right|feeling\s+overwhelmed|don't\s+feel\s+good|feeling\s+anxious|feeling\s+scared|feeling\s+depressed|feeling\s+stressed)\b",
];

const NEGATIVE_KEYWORDS: &[&str] = &[
    "okay",
    "bad",
    "sad",
    "down",
    "hopeless",
    "right",
    "overwhelmed",
    "good",
    "anxious",
    "scared",
    "depressed",
    "stressed",
];

const HELP_MARKERS: &[&str] = &["help", "need help"];
const URGENT_WORDS: &[&str] = &["urgent", "crisis", "emergency", "suicidal", "danger"];
const RESOURCE_WORDS: &[&str] = &["resources", "guides", "information", "support"];
const ADVICE_WORDS: &[&str] = &["advice", "guidance", "tips", "suggestions"];

/// Condition over the prepared utterance and the current state.
#[derive(Debug, Clone)]
pub enum Predicate {
    /// The utterance equals the text.
    Equals(String),
    /// The session is in the given state.
    InState(ConversationState),
    /// Any of the patterns matches somewhere in the utterance.
    MatchesAny(Vec<Regex>),
    /// Any of the fragments occurs anywhere in the utterance.
    ContainsText(Vec<String>),
    All(Vec<Predicate>),
    Any(Vec<Predicate>),
}

impl Predicate {
    pub fn equals<S: Into<String>>(text: S) -> Self {
        Predicate::Equals(text.into())
    }

    /// Equal to one of the texts.
    pub fn one_of(texts: &[&str]) -> Self {
        Predicate::Any(texts.iter().map(|t| Predicate::equals(*t)).collect())
    }

    pub fn in_state(state: ConversationState) -> Self {
        Predicate::InState(state)
    }

    /// Compile a pattern set.
    pub fn matches_any(patterns: &[&str]) -> Result<Self> {
        let compiled = patterns
            .iter()
            .map(|p| {
                Regex::new(p)
                    .map_err(|e| HavenError::config(format!("Invalid rule pattern '{p}': {e}")))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Predicate::MatchesAny(compiled))
    }

    pub fn contains_text(fragments: &[&str]) -> Self {
        Predicate::ContainsText(fragments.iter().map(|f| f.to_string()).collect())
    }

    /// Evaluate against a prepared utterance.
    pub fn matches(&self, message: &str, state: ConversationState) -> bool {
        match self {
            Predicate::Equals(text) => message == text,
            Predicate::InState(expected) => state == *expected,
            Predicate::MatchesAny(patterns) => patterns.iter().any(|re| re.is_match(message)),
            Predicate::ContainsText(fragments) => {
                fragments.iter().any(|f| message.contains(f.as_str()))
            }
            Predicate::All(predicates) => predicates.iter().all(|p| p.matches(message, state)),
            Predicate::Any(predicates) => predicates.iter().any(|p| p.matches(message, state)),
        }
    }
}

/// What a matched rule does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleAction {
    /// Fixed reply, state back to idle.
    Reply(String),
    /// Offer a random exercise and wait for confirmation.
    OfferExercise,
    /// Start a random exercise, state back to idle.
    StartExercise,
}

impl RuleAction {
    /// State after the action ran.
    pub fn next_state(&self) -> ConversationState {
        match self {
            RuleAction::OfferExercise => ConversationState::AwaitingExerciseConfirmation,
            RuleAction::Reply(_) | RuleAction::StartExercise => ConversationState::Idle,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Rule {
    pub name: String,
    pub predicate: Predicate,
    pub action: RuleAction,
}

impl Rule {
    pub fn new<S: Into<String>>(name: S, predicate: Predicate, action: RuleAction) -> Self {
        Rule {
            name: name.into(),
            predicate,
            action,
        }
    }
}

/// Rules in precedence order.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    pub fn new(rules: Vec<Rule>) -> Self {
        RuleSet { rules }
    }

    /// The standard safety and command table.
    pub fn standard(replies: &CannedReplies) -> Result<Self> {
        let awaiting = || Predicate::in_state(ConversationState::AwaitingExerciseConfirmation);
        let help = || Predicate::contains_text(HELP_MARKERS);
        let reply = |text: &str| RuleAction::Reply(text.to_string());

        let rules = vec![
            Rule::new("start", Predicate::equals("start"), reply(&replies.greeting)),
            Rule::new(
                "exercise_accept",
                Predicate::All(vec![awaiting(), Predicate::equals("yes")]),
                RuleAction::StartExercise,
            ),
            Rule::new(
                "exercise_decline",
                Predicate::All(vec![awaiting(), Predicate::equals("no")]),
                reply(&replies.exercise_declined),
            ),
            Rule::new(
                "negative_affect",
                Predicate::Any(vec![
                    Predicate::matches_any(NEGATIVE_PATTERNS)?,
                    Predicate::contains_text(NEGATIVE_KEYWORDS),
                ]),
                RuleAction::OfferExercise,
            ),
            Rule::new("no_thanks", Predicate::equals("no thanks"), reply(&replies.no_thanks)),
            Rule::new(
                "thanks",
                Predicate::one_of(&["thanks", "thank you"]),
                reply(&replies.thanks),
            ),
            Rule::new("stop", Predicate::equals("stop"), reply(&replies.stop)),
            Rule::new("help", Predicate::equals("help"), reply(&replies.help)),
            Rule::new("resources", Predicate::equals("resources"), reply(&replies.resources)),
            Rule::new(
                "help_crisis",
                Predicate::All(vec![help(), Predicate::contains_text(URGENT_WORDS)]),
                reply(&replies.crisis_help),
            ),
            Rule::new(
                "help_resources",
                Predicate::All(vec![help(), Predicate::contains_text(RESOURCE_WORDS)]),
                reply(&replies.resources),
            ),
            Rule::new(
                "help_advice",
                Predicate::All(vec![help(), Predicate::contains_text(ADVICE_WORDS)]),
                reply(&replies.advice_offer),
            ),
            Rule::new("help_menu", help(), reply(&replies.help_menu)),
        ];

        Ok(RuleSet { rules })
    }

    /// Trim and case-fold an utterance for matching.
    pub fn prepare(utterance: &str) -> String {
        fold_case(utterance.trim())
    }

    /// First rule that matches the prepared utterance.
    pub fn evaluate(&self, message: &str, state: ConversationState) -> Option<&Rule> {
        self.rules
            .iter()
            .find(|rule| rule.predicate.matches(message, state))
    }

    /// Append a rule with the lowest precedence.
    pub fn push(&mut self, rule: Rule) {
        self.rules.push(rule);
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const IDLE: ConversationState = ConversationState::Idle;
    const AWAITING: ConversationState = ConversationState::AwaitingExerciseConfirmation;

    fn standard() -> RuleSet {
        RuleSet::standard(&CannedReplies::default()).unwrap()
    }

    fn rule_name(rules: &RuleSet, utterance: &str, state: ConversationState) -> Option<String> {
        rules
            .evaluate(&RuleSet::prepare(utterance), state)
            .map(|rule| rule.name.clone())
    }

    #[test]
    fn test_standard_order() {
        let binding = standard();
        let names: Vec<&str> = binding.rules().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "start",
                "exercise_accept",
                "exercise_decline",
                "negative_affect",
                "no_thanks",
                "thanks",
                "stop",
                "help",
                "resources",
                "help_crisis",
                "help_resources",
                "help_advice",
                "help_menu",
            ]
        );
    }

    #[test]
    fn test_literal_commands() {
        let rules = standard();
        assert_eq!(rule_name(&rules, "  START ", IDLE).as_deref(), Some("start"));
        assert_eq!(rule_name(&rules, "Thank you", IDLE).as_deref(), Some("thanks"));
        assert_eq!(rule_name(&rules, "no thanks", IDLE).as_deref(), Some("no_thanks"));
        assert_eq!(rule_name(&rules, "stop", IDLE).as_deref(), Some("stop"));
        assert_eq!(rule_name(&rules, "help", IDLE).as_deref(), Some("help"));
        assert_eq!(rule_name(&rules, "resources", IDLE).as_deref(), Some("resources"));
    }

    #[test]
    fn test_confirmation_requires_pending_offer() {
        let rules = standard();
        assert_eq!(rule_name(&rules, "yes", AWAITING).as_deref(), Some("exercise_accept"));
        assert_eq!(rule_name(&rules, "No", AWAITING).as_deref(), Some("exercise_decline"));
        assert_eq!(rule_name(&rules, "yes", IDLE), None);
        assert_eq!(rule_name(&rules, "no", IDLE), None);
    }

    #[test]
    fn test_negative_affect() {
        let rules = standard();
        for utterance in [
            "I'm feeling overwhelmed",
            "i am not okay",
            "I don’t feel good",
            "everything feels hopeless",
            "so SAD",
        ] {
            assert_eq!(
                rule_name(&rules, utterance, IDLE).as_deref(),
                Some("negative_affect"),
                "{utterance}"
            );
        }
    }

    #[test]
    fn test_negative_keywords_match_inside_words() {
        let rules = standard();
        for utterance in ["i feel sadness", "everything is going badly", "i feel so downcast"] {
            assert_eq!(
                rule_name(&rules, utterance, IDLE).as_deref(),
                Some("negative_affect"),
                "{utterance}"
            );
        }
        // Kept as authored: "good" also fires inside "goodbye"
        assert_eq!(rule_name(&rules, "goodbye", IDLE).as_deref(), Some("negative_affect"));
    }

    #[test]
    fn test_negative_affect_wins_over_help() {
        let rules = standard();
        assert_eq!(
            rule_name(&rules, "I need help, I'm anxious", IDLE).as_deref(),
            Some("negative_affect")
        );
    }

    #[test]
    fn test_help_triage() {
        let rules = standard();
        assert_eq!(
            rule_name(&rules, "I need urgent help", IDLE).as_deref(),
            Some("help_crisis")
        );
        assert_eq!(
            rule_name(&rules, "help me find support", IDLE).as_deref(),
            Some("help_resources")
        );
        assert_eq!(
            rule_name(&rules, "can you help with some tips", IDLE).as_deref(),
            Some("help_advice")
        );
        assert_eq!(
            rule_name(&rules, "can you help me", IDLE).as_deref(),
            Some("help_menu")
        );
    }

    #[test]
    fn test_help_groups_match_inside_words() {
        let rules = standard();
        assert_eq!(
            rule_name(&rules, "help me find supportive people", IDLE).as_deref(),
            Some("help_resources")
        );
        assert_eq!(
            rule_name(&rules, "help, this is an emergency!", IDLE).as_deref(),
            Some("help_crisis")
        );
    }

    #[test]
    fn test_unmatched() {
        let rules = standard();
        assert_eq!(rule_name(&rules, "asdkjasdlkj", IDLE), None);
        assert_eq!(rule_name(&rules, "", IDLE), None);
    }

    #[test]
    fn test_actions_set_state() {
        assert_eq!(RuleAction::OfferExercise.next_state(), AWAITING);
        assert_eq!(RuleAction::StartExercise.next_state(), IDLE);
        assert_eq!(RuleAction::Reply("x".into()).next_state(), IDLE);
    }

    #[test]
    fn test_invalid_pattern_rejected() {
        assert!(Predicate::matches_any(&["(unclosed"]).is_err());
    }
}
