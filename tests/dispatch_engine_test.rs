use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use haven::analysis::TextNormalizer;
use haven::content::{ContentPack, IntentCatalog, ResponseCatalog};
use haven::dispatch::{ConversationState, DispatchEngine, EngineContext, Route};
use haven::error::Result;
use haven::ml::intent_classifier::{IntentClassifier, IntentScorer, Vocabulary};

const INTENTS: &str = r#"{"intents": [
    {"tag": "greeting", "patterns": ["hi", "hello"], "responses": ["Hello there, friend."]},
    {"tag": "farewell", "patterns": ["bye"], "responses": ["Goodbye, take care."]}
]}"#;

const FALLBACK: &str = "I'm here to help! You can ask about exercises, crisis support, or FAQs.";

/// Fails the test if the classifier is ever consulted.
struct PanickingScorer {
    labels: Vec<String>,
}

impl IntentScorer for PanickingScorer {
    fn labels(&self) -> &[String] {
        &self.labels
    }

    fn score(&self, _features: &[f64]) -> Result<Vec<f64>> {
        panic!("classifier consulted for a rule-matched utterance");
    }

    fn name(&self) -> &str {
        "panicking"
    }
}

/// Returns fixed scores and counts calls.
struct FixedScorer {
    labels: Vec<String>,
    scores: Vec<f64>,
    calls: AtomicUsize,
}

impl FixedScorer {
    fn new(labels: &[&str], scores: &[f64]) -> Self {
        FixedScorer {
            labels: labels.iter().map(|l| l.to_string()).collect(),
            scores: scores.to_vec(),
            calls: AtomicUsize::new(0),
        }
    }
}

impl IntentScorer for FixedScorer {
    fn labels(&self) -> &[String] {
        &self.labels
    }

    fn score(&self, _features: &[f64]) -> Result<Vec<f64>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.scores.clone())
    }

    fn name(&self) -> &str {
        "fixed"
    }
}

fn classifier(scorer: Arc<dyn IntentScorer>) -> IntentClassifier {
    let vocabulary = Vocabulary::new(vec!["hello".to_string(), "bye".to_string()]).unwrap();
    IntentClassifier::new(TextNormalizer::new(), vocabulary, scorer, 0.25).unwrap()
}

fn engine_with(classifier: Option<IntentClassifier>, catalog: ResponseCatalog) -> DispatchEngine {
    let context =
        EngineContext::new(ContentPack::default(), catalog, classifier, "mindfulness", Some(5))
            .unwrap();
    DispatchEngine::new(Arc::new(context))
}

fn preloaded() -> ResponseCatalog {
    ResponseCatalog::preloaded(IntentCatalog::from_json(INTENTS).unwrap())
}

#[test]
fn test_rules_short_circuit_the_classifier() {
    let scorer = Arc::new(PanickingScorer {
        labels: vec!["greeting".to_string()],
    });
    let engine = engine_with(Some(classifier(scorer)), preloaded());

    let idle = ConversationState::Idle;
    let awaiting = ConversationState::AwaitingExerciseConfirmation;
    for (utterance, state) in [
        ("start", idle),
        ("feeling overwhelmed", idle),
        ("I need help, I'm anxious", idle),
        ("thanks", idle),
        ("thank you", idle),
        ("no thanks", idle),
        ("stop", idle),
        ("help", idle),
        ("resources", idle),
        ("I need urgent help", idle),
        ("help me with some tips", idle),
        ("yes", awaiting),
        ("no", awaiting),
    ] {
        let outcome = engine.handle_turn(utterance, state);
        assert!(
            matches!(outcome.route, Route::Rule(_)),
            "{utterance} was not handled by a rule"
        );
    }
}

#[test]
fn test_negative_affect_beats_help_triage() {
    let engine = engine_with(None, preloaded());
    let outcome = engine.handle_turn("I need help, I'm anxious", ConversationState::Idle);

    assert_eq!(outcome.route, Route::Rule("negative_affect".to_string()));
    assert_eq!(outcome.state, ConversationState::AwaitingExerciseConfirmation);
}

#[test]
fn test_threshold_boundary() {
    let at = Arc::new(FixedScorer::new(&["greeting"], &[0.25]));
    let engine = engine_with(Some(classifier(at.clone())), preloaded());
    let outcome = engine.handle_turn("hello there", ConversationState::Idle);
    assert_eq!(outcome.route, Route::Fallback);
    assert_eq!(outcome.response, FALLBACK);
    assert_eq!(at.calls.load(Ordering::SeqCst), 1);

    let above = Arc::new(FixedScorer::new(&["greeting"], &[0.2500001]));
    let engine = engine_with(Some(classifier(above)), preloaded());
    let outcome = engine.handle_turn("hello there", ConversationState::Idle);
    assert_eq!(outcome.response, "Hello there, friend.");
    assert!(matches!(outcome.route, Route::Intent(ref i) if i.label == "greeting"));
}

#[test]
fn test_tie_resolves_to_first_label() {
    let scorer = Arc::new(FixedScorer::new(&["farewell", "greeting"], &[0.5, 0.5]));
    let engine = engine_with(Some(classifier(scorer)), preloaded());

    for _ in 0..20 {
        let outcome = engine.handle_turn("hello", ConversationState::Idle);
        assert_eq!(outcome.response, "Goodbye, take care.");
    }
}

#[test]
fn test_state_round_trip() {
    let engine = engine_with(None, preloaded());

    let offer = engine.handle_turn("feeling overwhelmed", ConversationState::Idle);
    assert!(offer.response.starts_with("It sounds like you're having a tough time."));
    assert!(offer.response.contains("Would you like to try a grounding exercise?"));
    assert_eq!(offer.state, ConversationState::AwaitingExerciseConfirmation);

    let start = engine.handle_turn("yes", offer.state);
    assert!(start.response.starts_with("Great! Let's get started with: **"));
    assert_eq!(start.state, ConversationState::Idle);

    let names: Vec<&str> = engine
        .context()
        .exercises()
        .iter()
        .map(|e| e.name.as_str())
        .collect();
    assert!(names.iter().any(|name| start.response.contains(name)));
}

#[test]
fn test_yes_without_offer_is_free_text() {
    let engine = engine_with(None, preloaded());
    let outcome = engine.handle_turn("yes", ConversationState::Idle);

    assert_eq!(outcome.route, Route::Fallback);
    assert_eq!(outcome.state, ConversationState::Idle);
}

#[test]
fn test_fallback() {
    let scorer = Arc::new(FixedScorer::new(&["greeting", "farewell"], &[0.1, 0.05]));
    let engine = engine_with(Some(classifier(scorer)), preloaded());

    let outcome = engine.handle_turn("asdkjasdlkj", ConversationState::Idle);
    assert_eq!(outcome.response, FALLBACK);
    assert_eq!(outcome.state, ConversationState::Idle);
}

#[test]
fn test_faq_after_no_intent() {
    let engine = engine_with(None, preloaded());
    let outcome = engine.handle_turn("How can I relieve stress quickly?", ConversationState::Idle);

    assert_eq!(outcome.route, Route::Faq);
    assert_eq!(
        outcome.response,
        "You can manage stress by exercising, practicing mindfulness, and seeking support."
    );
}

#[test]
fn test_scorer_width_mismatch_degrades_to_no_intent() {
    let scorer = Arc::new(FixedScorer::new(&["greeting", "farewell"], &[0.9]));
    let engine = engine_with(Some(classifier(scorer)), preloaded());

    let outcome = engine.handle_turn("hello", ConversationState::Idle);
    assert_eq!(outcome.route, Route::Fallback);
}

#[test]
fn test_unknown_tag_apology() {
    let scorer = Arc::new(FixedScorer::new(&["weather"], &[0.9]));
    let engine = engine_with(Some(classifier(scorer)), preloaded());

    let outcome = engine.handle_turn("hello", ConversationState::Idle);
    assert_eq!(outcome.response, "I'm sorry, I didn't quite understand that.");
}

#[test]
fn test_invalid_input() {
    let scorer = Arc::new(PanickingScorer {
        labels: vec!["greeting".to_string()],
    });
    let engine = engine_with(Some(classifier(scorer)), preloaded());

    let outcome = engine.handle_message(&serde_json::json!(17), ConversationState::Idle);
    assert_eq!(outcome.response, "Invalid input.");
    assert_eq!(outcome.route, Route::Invalid);
}

#[test]
fn test_empty_utterance() {
    let engine = engine_with(None, preloaded());
    let outcome = engine.handle_turn("   ", ConversationState::AwaitingExerciseConfirmation);

    assert_eq!(outcome.response, FALLBACK);
    assert_eq!(outcome.state, ConversationState::Idle);
}

#[test]
fn test_out_of_vocabulary_features() {
    let scorer = Arc::new(FixedScorer::new(&["greeting"], &[0.0]));
    let classifier = classifier(scorer);

    let features = classifier.features("qwerty zxcvb").unwrap();
    assert_eq!(features, vec![0.0, 0.0]);

    let features = classifier.features("Hello hello HELLO").unwrap();
    assert_eq!(features, vec![1.0, 0.0]);
}

#[test]
fn test_normalization_is_idempotent() {
    let normalizer = TextNormalizer::new();
    for utterance in [
        "I'm worried about my exams and classes",
        "Any tips for the children's feelings?",
        "Crises, guides, helplines",
    ] {
        let once = normalizer.normalize(utterance).unwrap();
        let twice = normalizer.normalize(&once.join(" ")).unwrap();
        assert_eq!(once, twice, "{utterance}");
    }
}

#[test]
fn test_inflected_negative_words_offer_an_exercise() {
    let scorer = Arc::new(PanickingScorer {
        labels: vec!["greeting".to_string()],
    });
    let engine = engine_with(Some(classifier(scorer)), preloaded());

    for utterance in ["i feel sadness", "everything is going badly", "i feel so downcast"] {
        let outcome = engine.handle_turn(utterance, ConversationState::Idle);
        assert_eq!(outcome.route, Route::Rule("negative_affect".to_string()), "{utterance}");
        assert_eq!(outcome.state, ConversationState::AwaitingExerciseConfirmation);
    }

    let outcome = engine.handle_turn("help me find supportive people", ConversationState::Idle);
    assert_eq!(outcome.route, Route::Rule("help_resources".to_string()));
}

#[test]
fn test_faq_keywords_match_inside_words() {
    let engine = engine_with(None, preloaded());
    let outcome = engine.handle_turn("stressful week", ConversationState::Idle);

    assert_eq!(outcome.route, Route::Faq);
    assert_eq!(
        outcome.response,
        "You can manage stress by exercising, practicing mindfulness, and seeking support."
    );
}
