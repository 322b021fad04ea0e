mod actions;
mod state;
mod view;

use super::Pane;
use crate::config::ResolvedConfig;
use crate::session::Session;

pub(super) struct App {
    session: Session,
    config: ResolvedConfig,
    pane: Pane,
    /// Index into the active map's slot table.
    slot_selection: usize,
    message: Option<String>,
    show_help: bool,
    detail_view: bool,
}
