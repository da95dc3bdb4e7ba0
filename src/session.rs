//! Interactive session.
//!
//! Defaults are loaded once on start. Each input line is a command that edits a field, runs a
//! validation or shows the last outcome. Nothing resets the outcome except the next run.

use crate::render::{phase_name, render_phase};
use sourcecheck_core::{AppController, SourceCheckError};
use std::path::Path;
use tokio::io::{AsyncBufReadExt, BufReader};

const HELP: &str = "\
Commands:
  source <text>          set the source document
  source-file <path>     read the source document from a file
  claims <text>          set the claims (plain text or JSON)
  claims-file <path>     read the claims from a file
  schema-file <path>     replace the schema document
  policies-file <path>   replace the policies document
  validate               submit the current inputs
  show                   show the last outcome
  state                  summarise the current inputs
  help                   show this help
  quit                   leave the session";

const DEMO_SOURCE_TEXT: &str = "\
The quarterly earnings call took place on Tuesday morning at 9 AM EST. CEO Sarah Chen announced \
that revenue grew by 12% year-over-year, reaching $45 million in Q3. The company hired 25 new \
employees across engineering and sales departments. Customer retention rate improved to 89%, up \
from 85% last quarter. The product team launched two new features in September. Operating \
expenses increased by 8% due to expanded marketing efforts. The board approved a $5 million \
investment in R&D for the next fiscal year.";

const DEMO_CLAIMS: &str = "\
The company's Q3 earnings call revealed strong performance with revenue growing 15% to $48 \
million. CEO Sarah Chen highlighted the addition of 30 new team members and announced three major \
product launches in September. Customer retention reached an impressive 92%, and the board \
committed $8 million to future R&D initiatives.";

#[derive(Debug, PartialEq, Eq)]
enum Command<'a> {
    Source(&'a str),
    SourceFile(&'a str),
    Claims(&'a str),
    ClaimsFile(&'a str),
    SchemaFile(&'a str),
    PoliciesFile(&'a str),
    Validate,
    Show,
    State,
    Help,
    Quit,
    Empty,
    Unknown(&'a str),
}

fn parse_command(line: &str) -> Command<'_> {
    let line = line.trim();
    let (name, rest) = line
        .split_once(char::is_whitespace)
        .map(|(name, rest)| (name, rest.trim()))
        .unwrap_or((line, ""));

    match name {
        "" => Command::Empty,
        "source" => Command::Source(rest),
        "source-file" => Command::SourceFile(rest),
        "claims" => Command::Claims(rest),
        "claims-file" => Command::ClaimsFile(rest),
        "schema-file" => Command::SchemaFile(rest),
        "policies-file" => Command::PoliciesFile(rest),
        "validate" => Command::Validate,
        "show" => Command::Show,
        "state" => Command::State,
        "help" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => Command::Unknown(other),
    }
}

/// Prefill the inputs with an earnings call transcript and a summary that misstates it.
pub fn seed_demo(controller: &mut AppController) {
    controller.set_source_text(DEMO_SOURCE_TEXT);
    controller.set_claims_input(DEMO_CLAIMS);
}

pub async fn run(mut controller: AppController) -> anyhow::Result<()> {
    controller.load_defaults().await;
    tracing::info!(
        "session started with {} chars of source and {} chars of claims",
        controller.state().source_text().len(),
        controller.state().claims_input().len(),
    );
    println!("{HELP}");
    print!("{}", summarise(&controller));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match apply(&mut controller, parse_command(&line)).await {
            Some(output) => print!("{output}"),
            None => break,
        }
    }

    Ok(())
}

/// Apply one command and return what to print, or `None` to end the session.
async fn apply(controller: &mut AppController, command: Command<'_>) -> Option<String> {
    let output = match command {
        Command::Source(text) => {
            controller.set_source_text(text);
            "source updated\n".into()
        }
        Command::Claims(text) => {
            controller.set_claims_input(text);
            "claims updated\n".into()
        }
        Command::SourceFile(path) => match load(path).await {
            Ok(text) => {
                controller.set_source_text(text);
                "source updated\n".into()
            }
            Err(message) => message,
        },
        Command::ClaimsFile(path) => match load(path).await {
            Ok(text) => {
                controller.set_claims_input(text);
                "claims updated\n".into()
            }
            Err(message) => message,
        },
        Command::SchemaFile(path) => match load(path).await {
            Ok(text) => {
                controller.set_schema_text(text);
                "schema updated\n".into()
            }
            Err(message) => message,
        },
        Command::PoliciesFile(path) => match load(path).await {
            Ok(text) => {
                controller.set_policies_text(text);
                "policies updated\n".into()
            }
            Err(message) => message,
        },
        Command::Validate => match controller.submit().await {
            Ok(phase) => render_phase(phase),
            Err(e @ SourceCheckError::SubmissionInFlight) => format!("{e}\n"),
            Err(e) => format!("Error: {e}\n"),
        },
        Command::Show => render_phase(controller.state().phase()),
        Command::State => summarise(controller),
        Command::Help => format!("{HELP}\n"),
        Command::Quit => return None,
        Command::Empty => String::new(),
        Command::Unknown(name) => {
            tracing::warn!("unknown session command '{name}'");
            format!("unknown command '{name}', try 'help'\n")
        }
    };

    Some(output)
}

async fn load(path: &str) -> Result<String, String> {
    if path.is_empty() {
        return Err("a file path is required\n".into());
    }
    crate::read_file(Path::new(path))
        .await
        .map_err(|e| format!("Error: {e:#}\n"))
}

fn summarise(controller: &AppController) -> String {
    let state = controller.state();
    format!(
        "source: {} chars, claims: {} chars, schema: {} chars, policies: {} chars, \
         last outcome: {}\n",
        state.source_text().chars().count(),
        state.claims_input().chars().count(),
        state.schema_text().chars().count(),
        state.policies_text().chars().count(),
        phase_name(state.phase()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use sourcecheck_core::ClientConfig;
    use std::sync::Arc;

    fn offline_controller() -> AppController {
        let config = Arc::new(ClientConfig::new("http://127.0.0.1:9").unwrap());
        AppController::from_config(config).unwrap()
    }

    #[test]
    fn test_parse_command() {
        assert_eq!(
            parse_command("source Revenue grew 12%."),
            Command::Source("Revenue grew 12%.")
        );
        assert_eq!(
            parse_command("  claims   {\"body\": \"x\"} "),
            Command::Claims("{\"body\": \"x\"}")
        );
        assert_eq!(parse_command("validate"), Command::Validate);
        assert_eq!(parse_command("exit"), Command::Quit);
        assert_eq!(parse_command("   "), Command::Empty);
        assert_eq!(parse_command("frobnicate now"), Command::Unknown("frobnicate"));
        assert_eq!(parse_command("schema-file"), Command::SchemaFile(""));
    }

    #[tokio::test]
    async fn test_apply_edits_fields() {
        let mut controller = offline_controller();

        let out = apply(&mut controller, Command::Source("Revenue grew 12%.")).await;
        assert_eq!(out.as_deref(), Some("source updated\n"));
        apply(&mut controller, Command::Claims("Revenue grew 15%.")).await;

        assert_eq!(controller.state().source_text(), "Revenue grew 12%.");
        assert_eq!(controller.state().claims_input(), "Revenue grew 15%.");
        assert!(summarise(&controller).contains("last outcome: idle"));
    }

    #[tokio::test]
    async fn test_apply_missing_file_keeps_session_alive() {
        let mut controller = offline_controller();

        let out = apply(&mut controller, Command::SchemaFile("/definitely/not/here.yaml"))
            .await
            .unwrap();
        assert!(out.starts_with("Error: failed to read"));

        let out = apply(&mut controller, Command::PoliciesFile("")).await.unwrap();
        assert_eq!(out, "a file path is required\n");
    }

    #[test]
    fn test_seed_demo_fills_source_and_claims() {
        let mut controller = offline_controller();
        seed_demo(&mut controller);

        let state = controller.state();
        assert!(state.source_text().starts_with("The quarterly earnings call"));
        assert!(state.source_text().contains("revenue grew by 12% year-over-year"));
        assert!(state.source_text().ends_with("for the next fiscal year."));
        assert!(state.claims_input().contains("revenue growing 15% to $48 million"));
        assert!(!state.claims_input().contains("  "));
        assert!(state.schema_text().is_empty());
        assert!(summarise(&controller).contains("last outcome: idle"));
    }

    #[tokio::test]
    async fn test_apply_unknown_command_keeps_session_alive() {
        let mut controller = offline_controller();
        let out = apply(&mut controller, Command::Unknown("frobnicate")).await;
        assert_eq!(out.as_deref(), Some("unknown command 'frobnicate', try 'help'\n"));
    }

    #[tokio::test]
    async fn test_apply_quit_and_show() {
        let mut controller = offline_controller();

        assert_eq!(apply(&mut controller, Command::Quit).await, None);
        let out = apply(&mut controller, Command::Show).await.unwrap();
        assert!(out.contains("No validation"));
    }
}
