use ratatui::{
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::tui::theme;
use crate::tui::widgets::panel;
use crate::utils::format::progress_bar;

const DAY_LETTERS: [&str; 7] = ["S", "M", "T", "W", "T", "F", "S"];

pub fn render(frame: &mut Frame, area: Rect, streak: u32, days: &[bool; 7]) {
    let mut letters = vec![Span::styled("  ", theme::dim())];
    let mut dots = vec![Span::styled("  ", theme::dim())];
    for (letter, climbed) in DAY_LETTERS.iter().zip(days) {
        letters.push(Span::styled(format!("{} ", letter), theme::dim()));
        let (dot, style) = if *climbed {
            ("●", theme::green().add_modifier(Modifier::BOLD))
        } else {
            ("○", theme::dim())
        };
        dots.push(Span::styled(format!("{} ", dot), style));
    }

    let streak_line = Line::from(vec![
        Span::styled("  ", theme::dim()),
        Span::styled(progress_bar(streak, 7, 14), theme::green()),
        Span::styled(
            format!("  {} / 7 days", streak),
            theme::green().add_modifier(Modifier::BOLD),
        ),
    ]);

    let text = vec![
        Line::from(""),
        streak_line,
        Line::from(""),
        Line::from(letters),
        Line::from(dots),
    ];
    frame.render_widget(Paragraph::new(text).block(panel("This Week")), area);
}
