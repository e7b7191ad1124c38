use ratatui::{
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::models::{MonthlySummary, YearMonth};
use crate::tui::theme;
use crate::tui::widgets::panel;
use crate::utils::format::{pad, progress_bar};

pub fn render(
    frame: &mut Frame,
    area: Rect,
    month: YearMonth,
    summary: &MonthlySummary,
    position: Option<(usize, usize)>,
) {
    let mut title = format!("{} {}", month.name(), month.year);
    if let Some((idx, total)) = position {
        title.push_str(&format!("  ({}/{})", idx + 1, total));
    }

    let mut lines = vec![Line::from("")];

    if summary.is_empty() {
        lines.push(Line::from(Span::styled("  No climbs this month", theme::dim())));
        frame.render_widget(Paragraph::new(lines).block(panel(&title)), area);
        return;
    }

    lines.push(Line::from(vec![
        Span::styled("  Climbs        ", theme::dim()),
        Span::styled(summary.total_climbs.to_string(), theme::bold()),
    ]));
    lines.push(Line::from(vec![
        Span::styled("  Max grade     ", theme::dim()),
        Span::styled(
            summary.max_grade.as_str(),
            theme::chalk().add_modifier(Modifier::BOLD),
        ),
    ]));
    lines.push(Line::from(vec![
        Span::styled("  Success rate  ", theme::dim()),
        Span::styled(progress_bar(summary.success_rate, 100, 16), theme::green()),
        Span::styled(format!("  {}%", summary.success_rate), theme::green()),
    ]));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("  Route types", theme::chalk())));

    for share in &summary.route_type_breakdown {
        lines.push(Line::from(vec![
            Span::styled(format!("  {}  ", pad(&share.route_type, 10)), theme::dim()),
            Span::styled(progress_bar(share.percentage, 100, 16), theme::blue()),
            Span::styled(
                format!("  {:>3}%  ({})", share.percentage, share.count),
                theme::dim(),
            ),
        ]));
    }

    frame.render_widget(Paragraph::new(lines).block(panel(&title)), area);
}
