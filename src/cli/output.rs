//! Output formatting for CLI commands.

use serde::{Deserialize, Serialize};

use crate::cli::args::{HavenArgs, OutputFormat};
use crate::dispatch::TurnOutcome;
use crate::error::Result;
use crate::ml::intent_classifier::ScoredIntent;

/// Result structure for classification.
#[derive(Debug, Serialize, Deserialize)]
pub struct ClassificationReport {
    pub utterance: String,
    pub threshold: f64,
    /// Every label, in label-set order.
    pub scores: Vec<ScoredIntent>,
    pub intent: Option<ScoredIntent>,
}

/// Result structure for the configuration check.
#[derive(Debug, Serialize, Deserialize)]
pub struct CheckReport {
    pub rules: usize,
    pub faq_entries: usize,
    pub exercises: usize,
    pub intents: Option<usize>,
    pub intents_error: Option<String>,
    pub classifier: Option<String>,
    pub labels: usize,
    pub vocabulary: usize,
    pub threshold: Option<f64>,
    pub degraded: bool,
    /// Why the engine is degraded, when it is.
    pub degraded_reason: Option<String>,
}

/// Output a result in the specified format.
pub fn output_result<T: Serialize>(message: &str, result: &T, args: &HavenArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => output_human(message, result, args),
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output one turn.
///
/// Human output is the response text alone; with `-vv` the route, state and
/// mood follow on separate lines.
pub fn output_turn(outcome: &TurnOutcome, args: &HavenArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => {
            println!("{}", outcome.response);
            if args.verbosity() > 1 {
                println!("  route: {}", outcome.route);
                println!("  state: {}", outcome.state);
                println!("  mood: {}", outcome.mood);
            }
            Ok(())
        }
        OutputFormat::Json => output_json(outcome, args),
    }
}

/// Output in human-readable format.
fn output_human<T: Serialize>(message: &str, result: &T, args: &HavenArgs) -> Result<()> {
    if args.verbosity() > 0 {
        println!("{message}");
        println!();
    }

    let value = serde_json::to_value(result)?;
    output_generic_human(&value, 0);
    Ok(())
}

/// Output generic data in human format.
fn output_generic_human(value: &serde_json::Value, indent: usize) {
    let spaces = "  ".repeat(indent);

    match value {
        serde_json::Value::Object(obj) => {
            for (key, val) in obj {
                match val {
                    serde_json::Value::Array(items) if !items.is_empty() => {
                        println!("{spaces}{key}:");
                        for item in items {
                            println!("{spaces}  - {}", format_value(item));
                        }
                    }
                    _ => println!("{spaces}{key}: {}", format_value(val)),
                }
            }
        }
        _ => println!("{spaces}{}", format_value(value)),
    }
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &HavenArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    println!("{json}");
    Ok(())
}

/// Format a JSON value for display.
pub fn format_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Number(n) => match n.as_f64() {
            Some(f) if n.is_f64() => format!("{f:.4}"),
            _ => n.to_string(),
        },
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Null => "-".to_string(),
        serde_json::Value::Array(arr) => arr.iter().map(format_value).collect::<Vec<_>>().join(", "),
        serde_json::Value::Object(obj) => obj
            .iter()
            .map(|(k, v)| format!("{k}={}", format_value(v)))
            .collect::<Vec<_>>()
            .join(" "),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(&json!("text")), "text");
        assert_eq!(format_value(&json!(3)), "3");
        assert_eq!(format_value(&json!(0.5)), "0.5000");
        assert_eq!(format_value(&json!(null)), "-");
        assert_eq!(
            format_value(&json!({"label": "greeting", "score": 0.75})),
            "label=greeting score=0.7500"
        );
    }
}
