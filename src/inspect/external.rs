use anyhow::{anyhow, Context, Result};
use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use shell_words::split as shell_split;
use std::io;
use std::path::Path;
use std::process::Command;

const VIEWER_VAR: &str = "SEEDSCOPE_VIEWER";
const FALLBACK_VIEWER: &str = "xdg-open";

/// Open a seed pattern image in `$SEEDSCOPE_VIEWER`, else `xdg-open`.
pub(super) fn open_image(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(anyhow!("missing pattern image {}", path.display()));
    }
    let cmd = viewer_command(std::env::var(VIEWER_VAR).ok().as_deref());
    run_command(cmd, path)
}

fn viewer_command(value: Option<&str>) -> Vec<String> {
    value
        .filter(|value| !value.trim().is_empty())
        .and_then(|value| shell_split(value).ok())
        .filter(|parts| !parts.is_empty())
        .unwrap_or_else(|| vec![FALLBACK_VIEWER.to_string()])
}

fn run_command(mut cmd: Vec<String>, path: &Path) -> Result<()> {
    if cmd.is_empty() {
        return Err(anyhow!("missing command"));
    }
    let program = cmd.remove(0);
    let status = Command::new(&program)
        .args(cmd)
        .arg(path)
        .status()
        .with_context(|| format!("run {program}"))?;
    if !status.success() {
        return Err(anyhow!("{program} exited with {status}"));
    }
    Ok(())
}

pub(super) fn run_external<F>(
    guard: &mut TerminalGuard,
    terminal: &mut ratatui::Terminal<CrosstermBackend<io::Stdout>>,
    f: F,
) -> Result<()>
where
    F: FnOnce() -> Result<()>,
{
    guard.suspend()?;
    let result = f();
    guard.resume()?;
    terminal.clear().ok();
    result
}

/// Raw mode and the alternate screen, restored on drop.
pub(super) struct TerminalGuard {
    active: bool,
}

impl TerminalGuard {
    pub(super) fn enter() -> Result<Self> {
        enable_raw_mode().context("enable raw mode")?;
        execute!(io::stdout(), EnterAlternateScreen, Hide).context("enter alt screen")?;
        Ok(Self { active: true })
    }

    pub(super) fn suspend(&mut self) -> Result<()> {
        if self.active {
            disable_raw_mode().ok();
            execute!(io::stdout(), LeaveAlternateScreen, Show).ok();
            self.active = false;
        }
        Ok(())
    }

    pub(super) fn resume(&mut self) -> Result<()> {
        if !self.active {
            execute!(io::stdout(), EnterAlternateScreen, Hide).ok();
            enable_raw_mode().ok();
            self.active = true;
        }
        Ok(())
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = self.suspend();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewer_command_splits_or_falls_back() {
        assert_eq!(
            viewer_command(Some("feh --scale-down")),
            vec!["feh".to_string(), "--scale-down".to_string()]
        );
        assert_eq!(viewer_command(Some("  ")), vec!["xdg-open".to_string()]);
        assert_eq!(viewer_command(None), vec!["xdg-open".to_string()]);
        assert_eq!(viewer_command(Some("'unterminated")), vec!["xdg-open".to_string()]);
    }
}
