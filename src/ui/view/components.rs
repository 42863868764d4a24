//! Shared view components
//!
//! Dialog frame and form field widgets used by both dialogs

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::ui::state::{Notice, NoticeLevel};

/// Clear the area and draw a titled dialog frame, returning its inner rect
pub fn render_dialog_frame(frame: &mut Frame, area: Rect, title: &str) -> Rect {
    frame.render_widget(Clear, area);
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    inner
}

/// A labelled single-line form field; the focused one is highlighted
pub fn render_form_field(frame: &mut Frame, area: Rect, label: &str, value: &str, focused: bool) {
    let style = if focused {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };

    let field = Paragraph::new(value)
        .style(style)
        .wrap(Wrap { trim: false })
        .block(Block::default().title(label).borders(Borders::ALL));
    frame.render_widget(field, area);
}

/// Color for a notice, by severity
pub fn notice_color(notice: &Notice) -> Color {
    match notice.level() {
        NoticeLevel::Success => Color::Green,
        NoticeLevel::Warning => Color::Yellow,
        NoticeLevel::Error => Color::Red,
    }
}
