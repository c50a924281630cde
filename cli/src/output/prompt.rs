//! `DialoguerPrompter`: terminal implementation of the `Prompter` port.

use anyhow::{Context, Result};

use crate::application::ports::Prompter;

/// Reads answers from the terminal with `dialoguer`.
pub struct DialoguerPrompter {
    interactive: bool,
}

impl DialoguerPrompter {
    /// Prompts are shown only when `non_interactive` is off and a user is
    /// attached to the terminal.
    #[must_use]
    pub fn new(non_interactive: bool) -> Self {
        Self {
            interactive: !non_interactive && console::user_attended(),
        }
    }
}

impl Prompter for DialoguerPrompter {
    fn is_interactive(&self) -> bool {
        self.interactive
    }

    fn ask(&self, prompt: &str, hint: Option<&str>) -> Result<String> {
        let prompt = match hint {
            Some(hint) => format!("{prompt} (e.g. {hint})"),
            None => prompt.to_string(),
        };
        dialoguer::Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
            .context("reading answer from terminal")
    }
}
