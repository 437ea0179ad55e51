//! Command implementations for the Haven CLI.

use std::io::{self, BufRead, Write};
use std::path::Path;

use anyhow::{Context, Result, bail};
use log::info;

use crate::cli::args::*;
use crate::cli::output::*;
use crate::config::{ClassifierSource, EngineConfig};
use crate::dispatch::DispatchEngine;
use crate::session::SessionStore;

/// Execute a CLI command.
pub fn execute_command(args: HavenArgs) -> Result<()> {
    let config = load_config(&args)?;
    let engine = DispatchEngine::from_config(&config).context("Failed to start the engine")?;

    match &args.command {
        Command::Chat(chat_args) => chat(engine, chat_args, &args),
        Command::Turn(turn_args) => turn(&engine, turn_args, &args),
        Command::Classify(classify_args) => classify(&engine, classify_args, &args),
        Command::Check => check(&engine, &config, &args),
    }
}

/// Build the engine configuration from the config file and CLI overrides.
pub fn load_config(args: &HavenArgs) -> Result<EngineConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let base = path.parent().unwrap_or_else(|| Path::new("."));
            EngineConfig::load(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?
                .relative_to(base)
        }
        None => EngineConfig::default(),
    };

    if let Some(intents) = &args.intents {
        config.intents_path = intents.clone();
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    info!("Intents file: {}", config.intents_path.display());
    Ok(config)
}

/// Interactive chat over stdin.
fn chat(engine: DispatchEngine, chat_args: &ChatArgs, cli_args: &HavenArgs) -> Result<()> {
    let store = SessionStore::new(engine);
    let session = store.start();
    let interactive = cli_args.output_format == OutputFormat::Human;

    if chat_args.greet {
        output_turn(&store.turn(session, "start")?, cli_args)?;
    }

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        if interactive {
            print!("{}", chat_args.prompt);
            io::stdout().flush()?;
        }

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let outcome = store.turn(session, &line)?;
        output_turn(&outcome, cli_args)?;
    }

    store.end(session);
    if interactive {
        println!();
    }
    Ok(())
}

/// Handle a single turn.
fn turn(engine: &DispatchEngine, turn_args: &TurnArgs, cli_args: &HavenArgs) -> Result<()> {
    let outcome = engine.handle_turn(&turn_args.utterance, turn_args.state);
    output_turn(&outcome, cli_args)?;
    Ok(())
}

/// Show every label score for an utterance.
fn classify(
    engine: &DispatchEngine,
    classify_args: &ClassifyArgs,
    cli_args: &HavenArgs,
) -> Result<()> {
    let Some(classifier) = engine.context().classifier() else {
        bail!("No classifier is loaded; check the classifier section of the configuration");
    };

    let scores = classifier.scores(&classify_args.utterance)?;
    let intent = classifier.classify(&classify_args.utterance)?;

    output_result(
        "Classification",
        &ClassificationReport {
            utterance: classify_args.utterance.clone(),
            threshold: classifier.threshold(),
            scores,
            intent,
        },
        cli_args,
    )?;
    Ok(())
}

/// Explain degraded mode for the configured classifier source.
pub fn degraded_reason(source: &ClassifierSource) -> String {
    match source {
        ClassifierSource::Disabled => "classifier disabled in configuration".to_string(),
        ClassifierSource::Artifact { path } => format!(
            "classifier artifact {} could not be loaded; restart after fixing it",
            path.display()
        ),
        ClassifierSource::Patterns => {
            "intents file was unreadable at startup; the pattern classifier is only built \
             then, so restart once the file is readable"
                .to_string()
        }
    }
}

/// Report what was loaded.
fn check(engine: &DispatchEngine, config: &EngineConfig, cli_args: &HavenArgs) -> Result<()> {
    let context = engine.context();
    let classifier = context.classifier();
    let (intents, intents_error) = match context.responses().catalog().get() {
        Ok(catalog) => (Some(catalog.len()), None),
        Err(e) => (None, Some(e.to_string())),
    };

    output_result(
        "Engine check",
        &CheckReport {
            rules: context.rules().len(),
            faq_entries: context.faq().len(),
            exercises: context.exercises().len(),
            intents,
            intents_error,
            classifier: classifier.map(|c| c.scorer_name().to_string()),
            labels: classifier.map_or(0, |c| c.labels().len()),
            vocabulary: classifier.map_or(0, |c| c.vocabulary().len()),
            threshold: classifier.map(|c| c.threshold()),
            degraded: context.is_degraded(),
            degraded_reason: context
                .is_degraded()
                .then(|| degraded_reason(&config.classifier)),
        },
        cli_args,
    )?;
    Ok(())
}
