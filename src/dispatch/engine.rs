//! The dispatch engine: one utterance in, one response and the next state out.
//!
//! The engine itself is stateless. Everything it reads is held by an
//! [`EngineContext`] that is built once at startup and shared read-only, and
//! the conversational state is passed in and handed back on every turn.

use std::fmt;
use std::sync::Arc;

use log::{debug, info, warn};
use serde::Serialize;

use super::faq::FaqMatcher;
use super::mood::Mood;
use super::response::ResponseResolver;
use super::rules::{Rule, RuleAction, RuleSet};
use super::state::ConversationState;
use crate::config::{ClassifierSource, EngineConfig};
use crate::content::{CannedReplies, ContentPack, GuidedExercise, IntentCatalog, ResponseCatalog};
use crate::error::{HavenError, Result};
use crate::ml::intent_classifier::{IntentClassifier, ScoredIntent};

/// Which strategy produced a turn's response.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum Route {
    /// A safety or command rule, by name.
    Rule(String),
    /// A confidently classified intent.
    Intent(ScoredIntent),
    Faq,
    Fallback,
    /// The intents file could not be read.
    ContentError,
    /// The message was not text.
    Invalid,
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Rule(name) => write!(f, "rule:{name}"),
            Route::Intent(intent) => write!(f, "intent:{} ({:.3})", intent.label, intent.score),
            Route::Faq => f.write_str("faq"),
            Route::Fallback => f.write_str("fallback"),
            Route::ContentError => f.write_str("content_error"),
            Route::Invalid => f.write_str("invalid"),
        }
    }
}

/// Result of one turn.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TurnOutcome {
    pub response: String,
    pub state: ConversationState,
    pub route: Route,
    pub mood: Mood,
}

impl TurnOutcome {
    /// Response text and next state.
    pub fn into_pair(self) -> (String, ConversationState) {
        (self.response, self.state)
    }
}

/// Read-only data shared by every turn of every session.
#[derive(Debug)]
pub struct EngineContext {
    rules: RuleSet,
    classifier: Option<IntentClassifier>,
    faq: FaqMatcher,
    responses: ResponseResolver,
    exercises: Vec<GuidedExercise>,
    replies: CannedReplies,
}

impl EngineContext {
    /// Assemble a context from loaded parts.
    ///
    /// `classifier` may be `None`, in which case classification never
    /// resolves an intent.
    pub fn new(
        content: ContentPack,
        catalog: ResponseCatalog,
        classifier: Option<IntentClassifier>,
        exercise_category: &str,
        seed: Option<u64>,
    ) -> Result<Self> {
        let exercises = content
            .exercises
            .category(exercise_category)
            .filter(|exercises| !exercises.is_empty())
            .ok_or_else(|| {
                HavenError::config(format!("Unknown exercise category '{exercise_category}'"))
            })?
            .to_vec();

        Ok(EngineContext {
            rules: RuleSet::standard(&content.replies)?,
            classifier,
            faq: FaqMatcher::new(&content.faq)?,
            responses: ResponseResolver::new(catalog, content.replies.unknown_intent.clone(), seed),
            exercises,
            replies: content.replies,
        })
    }

    /// Load everything named by the configuration.
    ///
    /// A classifier that fails to load is logged and left out. A missing
    /// intents file is fatal only with `eager_content`.
    pub fn from_config(config: &EngineConfig) -> Result<Self> {
        config.validate()?;

        let content = match &config.content_path {
            Some(path) => {
                let pack = ContentPack::load(path)?;
                info!("Loaded content pack from {}", path.display());
                pack
            }
            None => ContentPack::default(),
        };

        let catalog = if config.eager_content {
            let intents = IntentCatalog::load(&config.intents_path)?;
            info!(
                "Loaded {} intents from {}",
                intents.len(),
                config.intents_path.display()
            );
            ResponseCatalog::preloaded(intents)
        } else {
            ResponseCatalog::from_file(&config.intents_path)
        };

        let classifier = match Self::load_classifier(config, &catalog) {
            Ok(Some(classifier)) => {
                info!(
                    "Classifier ready: {} scorer, {} labels, {} vocabulary entries",
                    classifier.scorer_name(),
                    classifier.labels().len(),
                    classifier.vocabulary().len()
                );
                Some(classifier)
            }
            Ok(None) => {
                info!("Classifier disabled");
                None
            }
            Err(e) => {
                warn!(
                    "Classifier unavailable, running without intent classification until restart: {e}"
                );
                None
            }
        };

        Self::new(
            content,
            catalog,
            classifier,
            &config.exercise_category,
            config.seed,
        )
    }

    fn load_classifier(
        config: &EngineConfig,
        catalog: &ResponseCatalog,
    ) -> Result<Option<IntentClassifier>> {
        let threshold = config.confidence_threshold;
        match &config.classifier {
            ClassifierSource::Artifact { path } => {
                IntentClassifier::from_artifact(path, threshold).map(Some)
            }
            ClassifierSource::Patterns => {
                let samples = catalog.get()?.samples();
                IntentClassifier::from_samples(&samples, threshold).map(Some)
            }
            ClassifierSource::Disabled => Ok(None),
        }
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn classifier(&self) -> Option<&IntentClassifier> {
        self.classifier.as_ref()
    }

    /// Whether the engine runs without a classifier.
    pub fn is_degraded(&self) -> bool {
        self.classifier.is_none()
    }

    pub fn faq(&self) -> &FaqMatcher {
        &self.faq
    }

    pub fn responses(&self) -> &ResponseResolver {
        &self.responses
    }

    /// Exercises offered after negative affect.
    pub fn exercises(&self) -> &[GuidedExercise] {
        &self.exercises
    }

    pub fn replies(&self) -> &CannedReplies {
        &self.replies
    }
}

/// Stateless turn handler over a shared [`EngineContext`].
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use haven::content::{ContentPack, IntentCatalog, ResponseCatalog};
/// use haven::dispatch::{ConversationState, DispatchEngine, EngineContext};
///
/// let context = EngineContext::new(
///     ContentPack::default(),
///     ResponseCatalog::preloaded(IntentCatalog::default()),
///     None,
///     "mindfulness",
///     Some(7),
/// )
/// .unwrap();
/// let engine = DispatchEngine::new(Arc::new(context));
///
/// let (response, state) = engine
///     .handle_turn("feeling overwhelmed", ConversationState::Idle)
///     .into_pair();
/// assert!(response.starts_with("It sounds like you're having a tough time."));
/// assert_eq!(state, ConversationState::AwaitingExerciseConfirmation);
/// ```
#[derive(Debug, Clone)]
pub struct DispatchEngine {
    context: Arc<EngineContext>,
}

impl DispatchEngine {
    pub fn new(context: Arc<EngineContext>) -> Self {
        DispatchEngine { context }
    }

    /// Build a context from configuration and wrap it.
    pub fn from_config(config: &EngineConfig) -> Result<Self> {
        Ok(Self::new(Arc::new(EngineContext::from_config(config)?)))
    }

    pub fn context(&self) -> &Arc<EngineContext> {
        &self.context
    }

    /// Handle a raw transport message.
    ///
    /// Anything but a JSON string gets the invalid-input reply and leaves the
    /// state untouched.
    pub fn handle_message(
        &self,
        message: &serde_json::Value,
        state: ConversationState,
    ) -> TurnOutcome {
        match message.as_str() {
            Some(utterance) => self.handle_turn(utterance, state),
            None => {
                debug!("rejected non-text message: {message}");
                TurnOutcome {
                    response: self.context.replies.invalid_input.clone(),
                    state,
                    route: Route::Invalid,
                    mood: Mood::Unknown,
                }
            }
        }
    }

    /// Handle one utterance.
    pub fn handle_turn(&self, utterance: &str, state: ConversationState) -> TurnOutcome {
        let message = RuleSet::prepare(utterance);
        let mood = Mood::detect(&message);

        let outcome = match self.context.rules.evaluate(&message, state) {
            Some(rule) => self.apply_rule(rule, mood),
            None => self.resolve_free_text(&message, mood),
        };

        debug!(
            "turn {:?}: route={} state={} -> {} mood={}",
            message, outcome.route, state, outcome.state, outcome.mood
        );
        outcome
    }

    fn apply_rule(&self, rule: &Rule, mood: Mood) -> TurnOutcome {
        let replies = &self.context.replies;
        let response = match &rule.action {
            RuleAction::Reply(text) => Some(text.clone()),
            RuleAction::OfferExercise => self.pick_exercise().map(|e| replies.render_offer(e)),
            RuleAction::StartExercise => self.pick_exercise().map(|e| replies.render_start(e)),
        };

        match response {
            Some(response) => TurnOutcome {
                response,
                state: rule.action.next_state(),
                route: Route::Rule(rule.name.clone()),
                mood,
            },
            None => TurnOutcome {
                response: replies.fallback.clone(),
                state: ConversationState::Idle,
                route: Route::Fallback,
                mood,
            },
        }
    }

    fn pick_exercise(&self) -> Option<&GuidedExercise> {
        self.context.responses.pick(&self.context.exercises)
    }

    fn resolve_free_text(&self, message: &str, mood: Mood) -> TurnOutcome {
        let ctx = &self.context;

        let (response, route) = match self.classify(message) {
            Some(intent) => match ctx.responses.resolve(&intent.label) {
                Ok(response) => (response, Route::Intent(intent)),
                Err(e) => {
                    warn!("Cannot resolve intent '{}': {e}", intent.label);
                    (self.content_error_text(&e), Route::ContentError)
                }
            },
            None => match ctx.faq.find(message) {
                Some(answer) => (answer.to_string(), Route::Faq),
                None => (ctx.replies.fallback.clone(), Route::Fallback),
            },
        };

        TurnOutcome {
            response,
            state: ConversationState::Idle,
            route,
            mood,
        }
    }

    fn classify(&self, message: &str) -> Option<ScoredIntent> {
        let classifier = self.context.classifier.as_ref()?;
        match classifier.classify(message) {
            Ok(intent) => intent,
            Err(e) => {
                warn!("Classification failed, treating as no intent: {e}");
                None
            }
        }
    }

    fn content_error_text(&self, error: &HavenError) -> String {
        let replies = &self.context.replies;
        if error.is_not_found() {
            replies.intents_missing.clone()
        } else {
            format!("{}{error}", replies.content_error_prefix)
        }
    }
}
