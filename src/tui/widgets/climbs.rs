use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::models::Climb;
use crate::tui::theme;
use crate::tui::widgets::panel;
use crate::utils::format::pad;

pub fn render(frame: &mut Frame, area: Rect, climbs: &[Climb]) {
    let mut lines = vec![Line::from("")];

    if climbs.is_empty() {
        lines.push(Line::from(Span::styled(
            "  Nothing logged yet. `cragbook log` to add a climb",
            theme::dim(),
        )));
    }

    // gym column takes whatever the fixed columns leave
    let gym_width = (area.width as usize).saturating_sub(42).clamp(6, 24);
    for climb in climbs {
        lines.push(Line::from(vec![
            Span::styled(format!("  {}  ", climb.climb_date.format("%b %d")), theme::dim()),
            Span::styled(pad(&climb.grade, 4), theme::bold()),
            Span::styled("  ", theme::dim()),
            Span::styled(pad(&climb.route_type, 10), theme::blue()),
            Span::styled("  ", theme::dim()),
            Span::styled(
                pad(&climb.outcome, 7),
                climb.outcome_kind().map(theme::outcome).unwrap_or_else(theme::dim),
            ),
            Span::styled("  ", theme::dim()),
            Span::styled(pad(&climb.gym, gym_width), theme::dim()),
        ]));
    }

    frame.render_widget(Paragraph::new(lines).block(panel("Recent Climbs")), area);
}
