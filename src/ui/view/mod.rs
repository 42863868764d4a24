//! View layer
//!
//! Main render entry point and the individual view functions

pub mod components;
pub mod layouts;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
};

use super::state::{App, AppMode, ConfirmAction};
use crate::models::FormField;
use components::{notice_color, render_dialog_frame, render_form_field};
use layouts::centered_rect;

const FORM_FIELDS: [(FormField, &str); 4] = [
    (FormField::Isbn, "ISBN"),
    (FormField::BookName, "Book Name"),
    (FormField::Author, "Author"),
    (FormField::Kind, "Donation Type (←/→ to change)"),
];

/// Render the UI
pub fn render(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // title
            Constraint::Length(3), // search bar
            Constraint::Min(8),    // donation list
            Constraint::Length(3), // status / help
        ])
        .split(frame.area());

    render_title(frame, chunks[0]);
    render_search_bar(frame, app, chunks[1]);
    render_donation_list(frame, app, chunks[2]);
    render_status(frame, app, chunks[3]);

    // Dialog overlays
    match &app.mode {
        AppMode::Donating => render_donation_dialog(frame, app),
        AppMode::Details => render_details_dialog(frame, app),
        AppMode::Confirm(action) => render_confirm_dialog(frame, action),
        _ => {}
    }
}

fn render_title(frame: &mut Frame, area: Rect) {
    let title = Paragraph::new("Alms: Donation Management")
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(title, area);
}

fn render_search_bar(frame: &mut Frame, app: &App, area: Rect) {
    let editing = app.mode == AppMode::Searching;
    let style = if editing {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };

    let bar = Paragraph::new(app.search_term.as_str()).style(style).block(
        Block::default()
            .title("Search by book name / Donation ID")
            .borders(Borders::ALL),
    );
    frame.render_widget(bar, area);
}

fn render_donation_list(frame: &mut Frame, app: &mut App, area: Rect) {
    let items: Vec<ListItem> = app
        .display_list
        .iter()
        .enumerate()
        .filter_map(|(i, &idx)| app.donations.get(idx).map(|d| (i, d)))
        .map(|(i, donation)| {
            let style = if i == app.selected_index {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD | Modifier::REVERSED)
            } else {
                Style::default()
            };
            ListItem::new(Line::from(vec![Span::styled(
                donation.summary_line(),
                style,
            )]))
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().title("Donations").borders(Borders::ALL))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));

    let mut state = ListState::default();
    state.select(Some(app.selected_index));

    frame.render_stateful_widget(list, area, &mut state);
}

fn render_status(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = match &app.mode {
        AppMode::Browse => {
            "[a] donate  [/] search  [g] get details  [d] cancel donation  [j/k] navigate  [q] quit"
        }
        AppMode::Donating => "[Tab] next field  [Enter] submit  [Esc] cancel",
        AppMode::Searching => "type to filter  [Esc] clear  [Enter] done",
        AppMode::Details => "[Tab] next field  [Enter] update  [Esc] close",
        AppMode::Confirm(_) => "[y] confirm  [n] keep",
    };

    let line = match &app.notice {
        Some(notice) => Line::from(vec![
            Span::styled(
                notice.message(),
                Style::default().fg(notice_color(notice)),
            ),
            Span::styled(format!("  |  {}", help_text), Style::default().fg(Color::Gray)),
        ]),
        None => Line::from(Span::styled(help_text, Style::default().fg(Color::Gray))),
    };

    frame.render_widget(
        Paragraph::new(line).block(Block::default().borders(Borders::ALL)),
        area,
    );
}

fn render_donation_dialog(frame: &mut Frame, app: &App) {
    let area = centered_rect(60, 60, frame.area());
    let inner = render_dialog_frame(frame, area, "New Donation");
    let chunks = form_chunks(inner);

    for ((field, label), chunk) in FORM_FIELDS.iter().zip(chunks.iter()) {
        render_form_field(frame, *chunk, label, app.draft.field(*field), app.focus == *field);
    }
}

fn render_details_dialog(frame: &mut Frame, app: &App) {
    let area = centered_rect(60, 60, frame.area());
    let inner = render_dialog_frame(frame, area, "Donation Details");

    let Some(selected) = &app.selected else {
        frame.render_widget(Paragraph::new("No donation details found."), inner);
        return;
    };

    let chunks = form_chunks(inner);
    for ((field, label), chunk) in FORM_FIELDS.iter().zip(chunks.iter()) {
        render_form_field(frame, *chunk, label, selected.field(*field), app.focus == *field);
    }
}

fn form_chunks(inner: Rect) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(inner)
}

fn render_confirm_dialog(frame: &mut Frame, action: &ConfirmAction) {
    let area = centered_rect(50, 20, frame.area());
    frame.render_widget(Clear, area);

    let message = match action {
        ConfirmAction::CancelDonation(_) => "Cancel this donation?",
    };

    let dialog = Paragraph::new(format!("{}\n\n[y] confirm  [n] keep", message))
        .style(Style::default().fg(Color::Red))
        .block(Block::default().title("Confirm").borders(Borders::ALL));

    frame.render_widget(dialog, area);
}
