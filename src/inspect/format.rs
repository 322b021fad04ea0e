use crate::filter::MatchScope;
use crate::observation::Assertion;
use ratatui::style::Color;

pub(super) fn scope_label(scope: MatchScope) -> &'static str {
    match scope {
        MatchScope::Unconstrained => "whole catalog",
        MatchScope::CatalogOnly => "nightlord/map only",
        MatchScope::PoiFiltered => "slot filter",
    }
}

/// Short mark shown next to a slot.
pub(super) fn mark_label(assertion: Assertion) -> &'static str {
    match assertion {
        Assertion::Unmarked => "·",
        Assertion::Church => "church",
        Assertion::Mage => "mage",
        Assertion::Village => "village",
        Assertion::Other => "other",
        Assertion::Unknown => "?",
    }
}

pub(super) fn mark_color(assertion: Assertion) -> Color {
    match assertion {
        Assertion::Unmarked => Color::DarkGray,
        Assertion::Church => Color::Yellow,
        Assertion::Mage => Color::Magenta,
        Assertion::Village => Color::Green,
        Assertion::Other => Color::Cyan,
        Assertion::Unknown => Color::Red,
    }
}

pub(super) fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len || max_len <= 3 {
        return text.to_string();
    }
    let mut truncated = text.chars().take(max_len - 3).collect::<String>();
    truncated.push_str("...");
    truncated
}
