use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Paragraph},
    Frame,
};

use crate::models::{GradeProgression, GradeScale};
use crate::tui::theme;
use crate::tui::widgets::panel;

const BAR_WIDTH: u16 = 6;

pub fn render(frame: &mut Frame, area: Rect, progression: &GradeProgression, scale: &GradeScale) {
    if progression.points.is_empty() {
        let text = vec![
            Line::from(""),
            Line::from(Span::styled("  No months to chart yet", theme::dim())),
        ];
        frame.render_widget(Paragraph::new(text).block(panel("Grade Progression")), area);
        return;
    }

    // keep the most recent months that fit
    let fits = (area.width.saturating_sub(2) / (BAR_WIDTH + 1)).max(1) as usize;
    let start = progression.points.len().saturating_sub(fits);

    let bars: Vec<Bar> = progression.points[start..]
        .iter()
        .map(|p| {
            let month = p.year_month();
            Bar::default()
                .value(p.grade_value as u64)
                .text_value(p.max_grade.clone())
                .label(Line::from(format!("{} {:02}", month.short_name(), p.year % 100)))
        })
        .collect();

    let chart = BarChart::default()
        .block(panel("Grade Progression"))
        .data(BarGroup::default().bars(&bars))
        .bar_width(BAR_WIDTH)
        .bar_gap(1)
        .max(scale.len() as u64)
        .bar_style(theme::chalk())
        .value_style(theme::bold().bg(theme::CHALK))
        .label_style(theme::dim());

    frame.render_widget(chart, area);
}
