//! Interactive profile entry for `add`.
use std::io::{self, IsTerminal};

use anyhow::{anyhow, bail, Error, Result};
use inquire::{Confirm, InquireError, Password, PasswordDisplayMode, Text};

use super::{args::AddArgs, ui};
use crate::store::{
    Profile, AUTH_TOKEN_VAR, BASE_URL_VAR, DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_TIMEOUT_MS,
    DISABLE_TRAFFIC_VAR, MODEL_VAR, TIMEOUT_MS_VAR,
};

/// Answers for the interactive `add` flow.
pub trait FieldPrompter {
    /// Called once before the first question.
    fn begin(&mut self, profile_name: &str) -> Result<()>;
    /// Secret entry; the answer is never echoed.
    fn secret(&mut self, question: &str) -> Result<String>;
    /// Free text; an empty answer yields `default`.
    fn text(&mut self, question: &str, default: &str) -> Result<String>;
    /// Yes/no question.
    fn confirm(&mut self, question: &str, default: bool) -> Result<bool>;
}

/// Prompts rendered on the terminal by `inquire`.
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl FieldPrompter for TerminalPrompter {
    fn begin(&mut self, profile_name: &str) -> Result<()> {
        if !io::stdin().is_terminal() {
            bail!(
                "No terminal available for prompts. Pass --token to set {AUTH_TOKEN_VAR} \
                 without prompting."
            );
        }
        eprintln!(
            "\n{}\n{}\n",
            ui::info(&format!("Adding profile: {}", ui::highlight(profile_name))),
            ui::dim("Press Enter to accept the suggested value.")
        );
        Ok(())
    }

    fn secret(&mut self, question: &str) -> Result<String> {
        Password::new(question)
            .without_confirmation()
            .with_display_mode(PasswordDisplayMode::Masked)
            .prompt()
            .map_err(|err| entry_failed(question, err))
    }

    fn text(&mut self, question: &str, default: &str) -> Result<String> {
        Text::new(question)
            .with_default(default)
            .prompt()
            .map_err(|err| entry_failed(question, err))
    }

    fn confirm(&mut self, question: &str, default: bool) -> Result<bool> {
        Confirm::new(question)
            .with_default(default)
            .prompt()
            .map_err(|err| entry_failed(question, err))
    }
}

fn entry_failed(question: &str, err: InquireError) -> Error {
    match err {
        InquireError::OperationCanceled | InquireError::OperationInterrupted => {
            anyhow!("Profile entry cancelled.")
        }
        other => anyhow!("{question} entry failed: {other}"),
    }
}

/// Build the profile for `add`.
///
/// With `--token` everything comes from flags and defaults. Otherwise each
/// field is asked for, with any flag value as the suggested answer.
pub fn collect_profile<P: FieldPrompter>(args: &AddArgs, prompter: &mut P) -> Result<Profile> {
    let base_url = args.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL);
    let model = args.model.as_deref().unwrap_or(DEFAULT_MODEL);
    let timeout = args.timeout_ms.as_deref().unwrap_or(DEFAULT_TIMEOUT_MS);

    if let Some(token) = &args.token {
        return Ok(assemble(token, base_url, model, timeout, args.disable_traffic));
    }

    prompter.begin(&args.name)?;
    let token = prompter.secret("API token (sk-...)")?;
    let base_url = prompter.text("Base URL", base_url)?;
    let model = prompter.text("Model", model)?;
    let timeout = prompter.text("Timeout (ms)", timeout)?;
    let disable_traffic =
        prompter.confirm("Disable non-essential traffic?", args.disable_traffic)?;

    Ok(assemble(
        token.trim(),
        base_url.trim(),
        model.trim(),
        timeout.trim(),
        disable_traffic,
    ))
}

fn assemble(
    token: &str,
    base_url: &str,
    model: &str,
    timeout: &str,
    disable_traffic: bool,
) -> Profile {
    let mut profile = Profile::new()
        .with_var(AUTH_TOKEN_VAR, token)
        .with_var(BASE_URL_VAR, base_url)
        .with_var(MODEL_VAR, model);
    if !timeout.is_empty() {
        profile.insert(TIMEOUT_MS_VAR, timeout);
    }
    if disable_traffic {
        profile.insert(DISABLE_TRAFFIC_VAR, "1");
    }
    profile
}
