use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::models::{Outcome, TodayStats};
use crate::tui::theme;
use crate::tui::widgets::panel;

pub fn render(frame: &mut Frame, area: Rect, stats: &TodayStats) {
    let row = |label: &str, value: u32, style| {
        Line::from(vec![
            Span::styled(format!("  {:<10}", label), theme::dim()),
            Span::styled(value.to_string(), style),
        ])
    };

    let text = vec![
        Line::from(""),
        row("Climbs", stats.climbs, theme::bold()),
        row("Flashes", stats.flashes, theme::outcome(Outcome::Flash)),
        row("Sends", stats.sends, theme::outcome(Outcome::Send)),
        row("Projects", stats.projects, theme::outcome(Outcome::Project)),
    ];
    frame.render_widget(Paragraph::new(text).block(panel("Today")), area);
}
