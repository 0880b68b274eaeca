//! Terminal prompts backed by dialoguer

use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Select};
use graft_core::{Error, Prompter, Result};

/// Asks questions on the controlling terminal
#[derive(Default)]
pub struct TerminalPrompter {
    theme: ColorfulTheme,
}

impl TerminalPrompter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Prompter for TerminalPrompter {
    fn select(&mut self, prompt: &str, items: &[String]) -> Result<usize> {
        Select::with_theme(&self.theme)
            .with_prompt(prompt)
            .items(items)
            .default(0)
            .interact()
            .map_err(|e| Error::Prompt(e.to_string()))
    }

    fn input(&mut self, prompt: &str) -> Result<String> {
        Input::<String>::with_theme(&self.theme)
            .with_prompt(prompt)
            .interact_text()
            .map_err(|e| Error::Prompt(e.to_string()))
    }
}
