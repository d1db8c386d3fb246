//! `:` commands.
//!
//! | Command | Action |
//! |---------|--------|
//! | `q`, `quit` | Quit |
//! | `help` | Toggle the help popup |
//! | `theme <name>` | Switch theme (`default`, `gruvbox`) |
//! | `industry <value>` | Filter on industry (also `province`, `verified`, `cert`) |
//! | `clear [facet]` | Drop one facet selection, or all of them |
//! | `sort <field:dir>` | Change the sort key |
//! | `search` | Re-run the current search |
//!
//! Facet, clear, sort and search commands start a new search.

use sift_core::Facet;

/// A parsed, validated command ready to be executed by the app shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Quit,
    Help,
    Theme(String),
    SetFacet(Facet, String),
    /// `None` clears every facet.
    Clear(Option<Facet>),
    Sort(String),
    Search,
}

impl Command {
    /// Parse a raw command string (the text after the `:` prefix).
    ///
    /// Returns `Ok(cmd)` on success, `Err(message)` on failure. An empty
    /// string returns `Err("")` as a sentinel meaning "close without acting".
    pub fn parse(input: &str) -> Result<Command, String> {
        let input = input.trim();
        if input.is_empty() {
            return Err(String::new());
        }

        let (word, rest) = input
            .split_once(char::is_whitespace)
            .map(|(w, r)| (w, r.trim()))
            .unwrap_or((input, ""));

        match word {
            "q" | "quit" => Ok(Command::Quit),
            "help" => Ok(Command::Help),
            "search" => Ok(Command::Search),
            "theme" => {
                if rest.is_empty() {
                    Err("usage: theme <default|gruvbox>".to_string())
                } else {
                    Ok(Command::Theme(rest.to_string()))
                }
            }
            "sort" => {
                if rest.is_empty() {
                    Err("usage: sort <field:asc|desc>".to_string())
                } else {
                    Ok(Command::Sort(rest.to_string()))
                }
            }
            "clear" => {
                if rest.is_empty() {
                    Ok(Command::Clear(None))
                } else {
                    Facet::from_field(rest)
                        .map(|f| Command::Clear(Some(f)))
                        .ok_or_else(|| format!("unknown facet: {rest}"))
                }
            }
            other => match Facet::from_field(other) {
                Some(facet) if !rest.is_empty() => Ok(Command::SetFacet(facet, rest.to_string())),
                Some(facet) => Err(format!("usage: {facet} <value>")),
                None => Err(format!("unknown command: {other}")),
            },
        }
    }

    /// Whether executing this command should start a new search.
    pub fn triggers_search(&self) -> bool {
        matches!(
            self,
            Command::SetFacet(..) | Command::Clear(_) | Command::Sort(_) | Command::Search
        )
    }
}
