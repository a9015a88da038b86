//! Terminal interaction.

use crate::{Error, Result};
use dialoguer::console::Term;
use dialoguer::Input;
use std::collections::VecDeque;
use std::io::BufRead;

/// Line-oriented user interaction.
pub trait Prompter {
    /// Ask for one line of input; an empty answer is allowed.
    fn input(&mut self, prompt: &str) -> Result<String>;

    /// Ask a yes/no question. Only `y`/`yes` (any case) count as yes.
    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        let answer = self.input(prompt)?;
        Ok(is_yes(&answer))
    }

    /// Wait for the user to press ENTER.
    fn pause(&mut self, prompt: &str) -> Result<()> {
        self.input(prompt).map(|_| ())
    }

    /// Clear the screen between steps.
    fn clear_screen(&mut self) {}
}

/// Check if an answer means yes.
pub fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Prompter backed by the controlling terminal.
pub struct TerminalPrompter {
    term: Term,
}

impl TerminalPrompter {
    pub fn new() -> Self {
        Self {
            term: Term::stdout(),
        }
    }
}

impl Default for TerminalPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompter for TerminalPrompter {
    fn input(&mut self, prompt: &str) -> Result<String> {
        let answer: String = Input::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text_on(&self.term)?;
        Ok(answer)
    }

    fn clear_screen(&mut self) {
        if let Err(e) = self.term.clear_screen() {
            tracing::debug!("Failed to clear screen: {}", e);
        }
    }
}

/// Prompter replaying answers given up front, one per prompt.
///
/// Used when stdin is not a terminal, e.g. `mkvedit < answers.txt`.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<String>,
    prompts: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            prompts: Vec::new(),
        }
    }

    /// Take one answer per line from `reader`.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let answers = reader.lines().collect::<std::io::Result<Vec<_>>>()?;
        tracing::debug!("Read {} scripted answers", answers.len());
        Ok(Self::new(answers))
    }

    /// Prompts shown so far.
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    /// Answers not consumed yet.
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

impl Prompter for ScriptedPrompter {
    fn input(&mut self, prompt: &str) -> Result<String> {
        self.prompts.push(prompt.to_string());
        let answer = self
            .answers
            .pop_front()
            .ok_or_else(|| Error::other(format!("no answer left for prompt: {}", prompt)))?;
        println!("{}: {}", prompt, answer);
        Ok(answer)
    }
}
