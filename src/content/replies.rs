//! Fixed reply strings.
//!
//! Templates use `{name}` and `{instructions}` placeholders for the chosen
//! exercise.

use serde::{Deserialize, Serialize};

use super::exercises::GuidedExercise;

/// Every canned reply the engine can produce.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CannedReplies {
    pub greeting: String,
    pub exercise_offer: String,
    pub exercise_start: String,
    pub exercise_declined: String,
    pub no_thanks: String,
    pub thanks: String,
    pub stop: String,
    pub help: String,
    pub resources: String,
    pub crisis_help: String,
    pub advice_offer: String,
    pub help_menu: String,
    pub fallback: String,
    pub unknown_intent: String,
    pub invalid_input: String,
    pub intents_missing: String,
    pub content_error_prefix: String,
}

impl Default for CannedReplies {
    fn default() -> Self {
        Self {
            greeting: "Hello! How can I help you today?".to_string(),
            exercise_offer: "It sounds like you're having a tough time. I'm here for you.\n\n\
                Would you like to try a grounding exercise? Here's one:\n\n\
                {name}\n{instructions}\n\n\
                Please reply with 'yes' to try it or 'no' to talk about something else."
                .to_string(),
            exercise_start: "Great! Let's get started with: **{name}**\n{instructions}".to_string(),
            exercise_declined:
                "Alright, if you want to talk or need help with something else, I'm here for you."
                    .to_string(),
            no_thanks: "No problem! If you change your mind or need anything else, just let me know."
                .to_string(),
            thanks: "You're welcome! I'm here to help. If you have any other questions or need support, just ask."
                .to_string(),
            stop: "Okay, if you need me later, just let me know!".to_string(),
            help: "I'm here to help! You can ask about exercises, crisis support, or FAQs."
                .to_string(),
            resources: "I have a collection of mental health resources, including guides on managing stress, coping strategies, and professional support contacts. Would you like to see some?"
                .to_string(),
            crisis_help: "I'm really sorry you're feeling this way. Please consider reaching out to a crisis helpline. If you're in immediate danger, please call emergency services. Would you like me to find a helpline for your country?"
                .to_string(),
            advice_offer: "I'm happy to offer guidance! You can ask about stress relief, mindfulness, or self-care techniques. What specifically would you like advice on?"
                .to_string(),
            help_menu: "Sure! Here are some ways I can assist you:\n\n\
                - Mental Health Advice (Ask: \"How do I cope with stress?\")\n\
                - Find Resources (Ask: \"Where can I get support?\")\n\
                - Crisis Help (Ask: \"I need urgent help\")\n\
                - Mindfulness Exercises (Ask: \"Guide me through deep breathing\")\n\n\
                Let me know how I can support you."
                .to_string(),
            fallback: "I'm here to help! You can ask about exercises, crisis support, or FAQs."
                .to_string(),
            unknown_intent: "I'm sorry, I didn't quite understand that.".to_string(),
            invalid_input: "Invalid input.".to_string(),
            intents_missing: "Error: Intents file not found.".to_string(),
            content_error_prefix: "Error: ".to_string(),
        }
    }
}

impl CannedReplies {
    /// Offer an exercise after negative affect was detected.
    pub fn render_offer(&self, exercise: &GuidedExercise) -> String {
        Self::render(&self.exercise_offer, exercise)
    }

    /// Walk the user into an accepted exercise.
    pub fn render_start(&self, exercise: &GuidedExercise) -> String {
        Self::render(&self.exercise_start, exercise)
    }

    fn render(template: &str, exercise: &GuidedExercise) -> String {
        template
            .replace("{name}", &exercise.name)
            .replace("{instructions}", &exercise.instructions)
    }
}
