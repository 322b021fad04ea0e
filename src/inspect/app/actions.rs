//! Actions for the inspector TUI that leave the terminal.

use super::super::external::{open_image, run_external, TerminalGuard};
use super::App;
use anyhow::{anyhow, Result};
use ratatui::backend::CrosstermBackend;
use std::io;

impl App {
    pub(in crate::inspect) fn open_selected_pattern(
        &mut self,
        guard: &mut TerminalGuard,
        terminal: &mut ratatui::Terminal<CrosstermBackend<io::Stdout>>,
    ) -> Result<()> {
        let seed_number = self
            .selected_seed()
            .map(|seed| seed.seed_number)
            .ok_or_else(|| anyhow!("no seed selected"))?;
        let path = self.config.pattern_image(seed_number);
        run_external(guard, terminal, || open_image(&path))?;
        self.set_message(format!("opened {}", path.display()));
        Ok(())
    }
}
