//! Application state management for the inspector TUI.

use super::super::Pane;
use super::App;
use crate::catalog::{MapType, Nightlord, NightlordChoice, SeedRef};
use crate::config::ResolvedConfig;
use crate::cursor::Direction;
use crate::observation::Assertion;
use crate::session::Session;
use crate::slots::{slots_for, SlotDefinition};

impl App {
    pub(in crate::inspect) fn new(session: Session, config: ResolvedConfig) -> Self {
        Self {
            session,
            config,
            pane: Pane::Slots,
            slot_selection: 0,
            message: None,
            show_help: false,
            detail_view: false,
        }
    }

    pub(in crate::inspect) fn switch_pane(&mut self) {
        self.pane = self.pane.other();
        self.detail_view = false;
    }

    pub(in crate::inspect) fn move_selection(&mut self, delta: isize) {
        match self.pane {
            Pane::Slots => {
                let max = self.active_slots().len();
                if max == 0 {
                    self.slot_selection = 0;
                    return;
                }
                let next = self.slot_selection as isize + delta;
                self.slot_selection = next.clamp(0, max as isize - 1) as usize;
            }
            Pane::Seeds => {
                let direction = if delta < 0 {
                    Direction::Previous
                } else {
                    Direction::Next
                };
                for _ in 0..delta.unsigned_abs() {
                    if !self.session.step(direction) {
                        break;
                    }
                }
            }
        }
    }

    pub(in crate::inspect) fn cycle_map_type(&mut self, forward: bool) {
        let current = self.session.state().map_type();
        match (current, cycle(&MapType::ALL, current, forward)) {
            (_, Some(next)) => self.session.toggle_map_type(next),
            (Some(current), None) => self.session.toggle_map_type(current),
            (None, None) => {}
        }
        self.slot_selection = 0;
        self.after_change();
    }

    pub(in crate::inspect) fn cycle_nightlord(&mut self, forward: bool) {
        let choices = nightlord_choices();
        let current = self.session.state().nightlord();
        match (current, cycle(&choices, current, forward)) {
            (_, Some(next)) => self.session.toggle_nightlord(next),
            (Some(current), None) => self.session.toggle_nightlord(current),
            (None, None) => {}
        }
        self.after_change();
    }

    /// Mark the highlighted slot.
    pub(in crate::inspect) fn mark_selected(&mut self, assertion: Assertion) {
        let Some(slot) = self.selected_slot() else {
            self.set_message("choose a map type first ([ or ])".to_string());
            return;
        };
        if !self.session.state().poi_filter_enabled() {
            self.set_message("poi filter is off (f to turn it on)".to_string());
            return;
        }
        self.session.set_assertion(slot.id, assertion);
        self.after_change();
    }

    pub(in crate::inspect) fn toggle_poi_filter(&mut self) {
        if !self.session.toggle_poi_filter() {
            self.set_message("choose a map type before turning on the poi filter".to_string());
            return;
        }
        self.after_change();
        if self.message.is_none() {
            let state = if self.session.state().poi_filter_enabled() {
                "on"
            } else {
                "off"
            };
            self.set_message(format!("poi filter {state}"));
        }
    }

    pub(in crate::inspect) fn clear_all(&mut self) {
        self.session.clear_all_assertions();
        self.after_change();
        self.set_message("slot marks cleared".to_string());
    }

    pub(in crate::inspect) fn reset(&mut self) {
        self.session.reset();
        self.slot_selection = 0;
        self.detail_view = false;
        self.after_change();
        self.set_message("reset".to_string());
    }

    pub(in crate::inspect) fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub(in crate::inspect) fn toggle_detail(&mut self) {
        if self.selected_seed().is_none() {
            self.set_message("no seed selected".to_string());
            return;
        }
        self.detail_view = !self.detail_view;
    }

    pub(in crate::inspect) fn close_detail(&mut self) {
        self.detail_view = false;
    }

    pub(in crate::inspect) fn is_detail_view(&self) -> bool {
        self.detail_view
    }

    pub(in crate::inspect) fn set_message(&mut self, message: String) {
        self.message = Some(message);
    }

    pub(super) fn active_slots(&self) -> &'static [SlotDefinition] {
        self.session
            .state()
            .map_type()
            .map(slots_for)
            .unwrap_or_default()
    }

    pub(super) fn selected_slot(&self) -> Option<&'static SlotDefinition> {
        self.active_slots().get(self.slot_selection)
    }

    pub(super) fn selected_seed(&self) -> Option<&SeedRef> {
        self.session.selected()
    }

    /// Every command resets the cursor; jump to a definitive match when one
    /// exists so the player sees it immediately. With the poi filter off the
    /// first seed is shown once nightlord and map are chosen.
    fn after_change(&mut self) {
        self.message = None;
        let max = self.active_slots().len();
        if self.slot_selection >= max {
            self.slot_selection = max.saturating_sub(1);
        }
        let definitive = self
            .session
            .definitive_match()
            .map(|seed| seed.seed_number);
        match definitive {
            Some(seed_number) => {
                self.session.select_seed(seed_number);
                self.set_message(format!("definitive match: seed {seed_number}"));
            }
            None if self.session.browse_default().is_some() => {
                self.session.select_index(0);
            }
            None => self.detail_view = false,
        }
    }
}

fn nightlord_choices() -> Vec<NightlordChoice> {
    Nightlord::ALL
        .into_iter()
        .map(NightlordChoice::Known)
        .chain([NightlordChoice::Unknown])
        .collect()
}

/// Step through `options` with an unselected position between the last and
/// the first entry.
fn cycle<T: Copy + PartialEq>(options: &[T], current: Option<T>, forward: bool) -> Option<T> {
    let position = current.and_then(|value| options.iter().position(|option| *option == value));
    match (position, forward) {
        (None, true) => options.first().copied(),
        (None, false) => options.last().copied(),
        (Some(index), true) => options.get(index + 1).copied(),
        (Some(0), false) => None,
        (Some(index), false) => options.get(index - 1).copied(),
    }
}
