use chrono::NaiveDate;
use ratatui::{
    layout::{Alignment, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::models::User;
use crate::tui::theme;

pub fn render(frame: &mut Frame, area: Rect, user: &User, today: NaiveDate) {
    let title_line = Line::from(vec![
        Span::styled("  ▲ ", theme::chalk().add_modifier(Modifier::BOLD)),
        Span::styled("cragbook", theme::chalk()),
    ]);

    let user_line = Line::from(vec![
        Span::styled(user.first_name.as_str(), theme::bold()),
        Span::styled("  ·  ", theme::dim()),
        Span::styled(today.format("%A, %b %d, %Y").to_string(), theme::dim()),
    ]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::chalk())
        .style(theme::base());

    let paragraph = Paragraph::new(vec![title_line, user_line])
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}
