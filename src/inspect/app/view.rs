use super::super::format::{mark_color, mark_label, scope_label, truncate_text};
use super::super::Pane;
use super::App;
use crate::catalog::SeedRecord;
use crate::config::Locale;
use crate::slots::slot_at;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;

impl App {
    pub(in crate::inspect) fn draw(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Min(4),
                Constraint::Length(1),
            ])
            .split(area);

        self.draw_header(frame, layout[0]);
        self.draw_main(frame, layout[1]);
        self.draw_footer(frame, layout[2]);

        if self.detail_view {
            self.draw_detail(frame);
        }
        if self.show_help {
            self.draw_help(frame);
        }
    }

    fn draw_header(&self, frame: &mut Frame, area: Rect) {
        let locale = self.config.config.locale;
        let state = self.session.state();
        let matches = self.session.matches();
        let nightlord = state
            .nightlord()
            .map(|choice| locale.nightlord_label(choice))
            .unwrap_or("-");
        let map = state
            .map_type()
            .map(|map| locale.map_label(map))
            .unwrap_or("-");
        let bold = Style::default().add_modifier(Modifier::BOLD);

        let line1 = Line::from(vec![
            Span::raw("Nightlord: "),
            Span::styled(nightlord, bold),
            Span::raw(" | Map: "),
            Span::styled(map, bold),
            Span::raw(" | Truth: "),
            Span::raw(self.session.source().as_str()),
            Span::raw(" | POI filter: "),
            Span::raw(if state.poi_filter_enabled() { "on" } else { "off" }),
        ]);

        let mut spans = vec![
            Span::raw("Matches: "),
            Span::styled(matches.len().to_string(), count_style(matches.len())),
            Span::raw(format!(
                " of {} ({})",
                self.session.catalog().len(),
                scope_label(matches.scope())
            )),
        ];
        if let Some(seed) = self.session.definitive_match() {
            spans.push(Span::raw(" | "));
            spans.push(Span::styled(
                format!("definitive: {}", seed.padded_number()),
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            ));
        }

        let paragraph = Paragraph::new(vec![line1, Line::from(spans)]).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }

    fn draw_main(&self, frame: &mut Frame, area: Rect) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(area);
        self.draw_slots(frame, columns[0]);
        self.draw_seeds(frame, columns[1]);
    }

    fn draw_slots(&self, frame: &mut Frame, area: Rect) {
        let focused = self.pane == Pane::Slots;
        let block = pane_block(Pane::Slots, focused, self.active_slots().len());
        if self.session.state().map_type().is_none() {
            let hint = Paragraph::new("Choose a map type with [ and ]")
                .block(block)
                .wrap(Wrap { trim: true });
            frame.render_widget(hint, area);
            return;
        }
        let items = self
            .active_slots()
            .iter()
            .map(|slot| {
                let assertion = self.session.state().assertion(slot.id);
                ListItem::new(Line::from(vec![
                    Span::raw(format!("{:>2}  ({:>3}, {:>3})  ", slot.id, slot.x, slot.y)),
                    Span::styled(
                        mark_label(assertion),
                        Style::default().fg(mark_color(assertion)),
                    ),
                ]))
            })
            .collect::<Vec<_>>();
        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
        let mut state = ListState::default();
        state.select(Some(self.slot_selection));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_seeds(&self, frame: &mut Frame, area: Rect) {
        let locale = self.config.config.locale;
        let matches = self.session.matches();
        let block = pane_block(Pane::Seeds, self.pane == Pane::Seeds, matches.len());
        if matches.is_empty() {
            let empty = Paragraph::new(empty_message(self.session.catalog().is_empty()))
                .block(block)
                .wrap(Wrap { trim: true });
            frame.render_widget(empty, area);
            return;
        }
        let items = matches
            .seeds()
            .iter()
            .map(|seed| ListItem::new(seed_line(seed, locale)))
            .collect::<Vec<_>>();
        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
        let mut state = ListState::default();
        state.select(self.session.cursor().index());
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_detail(&self, frame: &mut Frame) {
        let Some(seed) = self.selected_seed() else {
            return;
        };
        let locale = self.config.config.locale;
        let area = centered_rect(70, 70, frame.area());
        let mut lines = vec![
            Line::from(format!(
                "{}  {}",
                locale.nightlord_label(seed.nightlord.into()),
                locale.map_label(seed.map_type)
            )),
            Line::from(format!(
                "Pattern: {}",
                self.config.pattern_image(seed.seed_number).display()
            )),
            Line::from(""),
        ];
        for (id, poi) in &seed.pois {
            let slot = slot_at(seed.map_type, poi.coordinates.x, poi.coordinates.y)
                .map(|slot| format!("slot {}", slot.id))
                .unwrap_or_else(|| "off-slot".to_string());
            lines.push(Line::from(format!(
                "POI{id:<3} ({:>5.1}, {:>5.1})  {:<8} {slot}",
                poi.coordinates.x,
                poi.coordinates.y,
                poi.kind.as_str()
            )));
        }
        let title = format!("Seed {} (Enter/Esc close, p open pattern)", seed.padded_number());
        let paragraph = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title(title))
            .wrap(Wrap { trim: false });
        frame.render_widget(Clear, area);
        frame.render_widget(paragraph, area);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let message = self.message.clone().unwrap_or_else(|| {
            "q quit | tab pane | [ ] map | { } nightlord | c m v o u x mark | f poi filter | C clear | r reset | ? help"
                .to_string()
        });
        let message = truncate_text(&message, area.width as usize);
        let paragraph =
            Paragraph::new(message).style(Style::default().add_modifier(Modifier::REVERSED));
        frame.render_widget(paragraph, area);
    }

    fn draw_help(&self, frame: &mut Frame) {
        let area = centered_rect(70, 70, frame.area());
        let lines = vec![
            Line::from("Keys:"),
            Line::from("  q / Esc: quit (or close seed detail)"),
            Line::from("  Tab: switch between slots and seeds"),
            Line::from("  Up/Down, j/k: move selection or step through seeds"),
            Line::from("  [ / ]: previous / next map type"),
            Line::from("  { / }: previous / next nightlord"),
            Line::from("  c m v o: mark slot church / mage / village / other"),
            Line::from("  u: mark slot unknown (not church, mage or village)"),
            Line::from("  x / Backspace: clear the slot mark"),
            Line::from("  C: clear every slot mark"),
            Line::from("  f: toggle the poi filter (needs a map; clears marks)"),
            Line::from("  r: reset nightlord, map and marks"),
            Line::from("  Enter: seed detail"),
            Line::from("  p: open the seed pattern image"),
            Line::from("  ?: toggle help"),
        ];
        let paragraph = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title("Help"))
            .wrap(Wrap { trim: true });
        frame.render_widget(Clear, area);
        frame.render_widget(paragraph, area);
    }
}

fn pane_block(pane: Pane, focused: bool, count: usize) -> Block<'static> {
    let style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    Block::default()
        .borders(Borders::ALL)
        .border_style(style)
        .title(format!("{} ({count})", pane.label()))
}

fn seed_line(seed: &SeedRecord, locale: Locale) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            seed.padded_number(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(
            "  {:<10}  {}",
            locale.nightlord_label(seed.nightlord.into()),
            locale.map_label(seed.map_type)
        )),
    ])
}

fn empty_message(catalog_empty: bool) -> &'static str {
    if catalog_empty {
        "Catalog is empty. Check catalog_path in the config or pass --catalog."
    } else {
        "No seeds match these observations."
    }
}

fn count_style(count: usize) -> Style {
    match count {
        0 => Style::default().fg(Color::Red),
        1 => Style::default().fg(Color::Green),
        _ => Style::default().add_modifier(Modifier::BOLD),
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
