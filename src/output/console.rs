//! Terminal interaction
//!
//! Every line the CLI prints and every question it asks goes through
//! [`Console`], so command flows can run against a buffer in tests.

use dialoguer::{Confirm, Input};
use log::debug;

use crate::error::{Error, Result};

pub trait Console: Send + Sync {
    /// Print a block of text followed by a newline.
    fn print(&self, text: &str);

    /// Ask whether to fetch the next page. `false` ends the listing.
    fn confirm_next_page(&self) -> Result<bool>;

    /// Ask for a missing value.
    fn prompt_input(&self, label: &str) -> Result<String>;

    /// Whether a person is there to answer prompts.
    fn is_interactive(&self) -> bool;
}

/// stdout + dialoguer
#[derive(Debug, Default)]
pub struct StdConsole;

impl Console for StdConsole {
    fn print(&self, text: &str) {
        println!("{}", text);
    }

    fn confirm_next_page(&self) -> Result<bool> {
        if !self.is_interactive() {
            debug!("stdin is not a terminal; continuing without prompting");
            return Ok(true);
        }

        let more = Confirm::new()
            .with_prompt("Show next page?")
            .default(true)
            .interact()?;
        Ok(more)
    }

    fn prompt_input(&self, label: &str) -> Result<String> {
        if !self.is_interactive() {
            return Err(Error::MissingInput(label.to_string()));
        }

        let value: String = Input::new().with_prompt(label).interact_text()?;
        let value = value.trim().to_string();
        if value.is_empty() {
            return Err(Error::MissingInput(label.to_string()));
        }
        Ok(value)
    }

    fn is_interactive(&self) -> bool {
        ::console::user_attended()
    }
}

#[cfg(test)]
pub use buffer::BufferConsole;
