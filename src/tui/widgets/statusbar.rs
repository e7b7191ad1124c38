use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::tui::app::View;
use crate::tui::theme;

pub fn render(frame: &mut Frame, area: Rect, view: &View) {
    let hints: &[(&str, &str)] = match view {
        View::Stats => &[
            ("[← →]", " month  "),
            ("[r]", " reload  "),
            ("[s]", " dashboard  "),
            ("[Esc]", " back"),
        ],
        _ => &[
            ("[s]", " stats  "),
            ("[r]", " reload  "),
            ("[?]", " help  "),
            ("[Esc]", " quit"),
        ],
    };

    let mut spans = Vec::new();
    for (key, label) in hints {
        spans.push(Span::styled(*key, theme::chalk()));
        spans.push(Span::styled(*label, theme::dim()));
    }

    let paragraph = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}
