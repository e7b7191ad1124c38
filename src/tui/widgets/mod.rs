pub mod climbs;
pub mod header;
pub mod monthly;
pub mod progression;
pub mod statusbar;
pub mod streak;
pub mod today;

use ratatui::{
    text::Span,
    widgets::{Block, BorderType, Borders},
};

use crate::tui::theme;

/// Rounded panel with a chalk-coloured title.
pub fn panel(title: &str) -> Block<'_> {
    Block::default()
        .title(Span::styled(format!(" {} ", title), theme::chalk()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border())
        .style(theme::surface())
}
