//! Interactive seed narrowing in the terminal.
//!
//! The inspector is a view over one `Session`: the left pane lists the slots
//! of the chosen map with their assertions, the right pane lists the seeds
//! that still match.
//!
//! | Pane | Content |
//! |------|---------|
//! | Slots | Slot ids, coordinates and the player's mark for each |
//! | Seeds | Matching seeds, ascending; the cursor walks this list |
mod app;
mod external;
mod format;
mod text;
mod ui;

use crate::config::ResolvedConfig;
use crate::session::Session;
use anyhow::Result;
use std::io::{self, IsTerminal};

const EVENT_POLL_MS: u64 = 200;

/// Which list owns the up/down keys.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Pane {
    Slots,
    Seeds,
}

impl Pane {
    fn other(self) -> Self {
        match self {
            Pane::Slots => Pane::Seeds,
            Pane::Seeds => Pane::Slots,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Pane::Slots => "Slots",
            Pane::Seeds => "Seeds",
        }
    }
}

/// Run the inspector, falling back to a text summary off a terminal.
pub fn run(session: Session, config: ResolvedConfig) -> Result<()> {
    if !io::stdout().is_terminal() || !io::stdin().is_terminal() {
        text::print_text_summary(&session, &config);
        return Ok(());
    }
    ui::run_tui(session, config)
}
