use ratatui::style::{Color, Modifier, Style};

use crate::models::Outcome;

pub const BG: Color = Color::Rgb(20, 20, 24);
pub const SURFACE: Color = Color::Rgb(30, 31, 36);
pub const BORDER: Color = Color::Rgb(62, 64, 72);
pub const TEXT: Color = Color::Rgb(226, 224, 218);
pub const TEXT_DIM: Color = Color::Rgb(122, 124, 132);
pub const CHALK: Color = Color::Rgb(222, 150, 80);
pub const GREEN: Color = Color::Rgb(104, 170, 110);
pub const BLUE: Color = Color::Rgb(96, 150, 200);
pub const AMBER: Color = Color::Rgb(214, 176, 72);
pub const RED: Color = Color::Rgb(190, 86, 72);

pub fn base() -> Style {
    Style::default().fg(TEXT).bg(BG)
}

pub fn surface() -> Style {
    Style::default().fg(TEXT).bg(SURFACE)
}

pub fn border() -> Style {
    Style::default().fg(BORDER)
}

pub fn dim() -> Style {
    Style::default().fg(TEXT_DIM)
}

pub fn chalk() -> Style {
    Style::default().fg(CHALK)
}

pub fn green() -> Style {
    Style::default().fg(GREEN)
}

pub fn blue() -> Style {
    Style::default().fg(BLUE)
}

pub fn amber() -> Style {
    Style::default().fg(AMBER)
}

pub fn red() -> Style {
    Style::default().fg(RED)
}

pub fn bold() -> Style {
    Style::default().fg(TEXT).add_modifier(Modifier::BOLD)
}

pub fn outcome(outcome: Outcome) -> Style {
    match outcome {
        Outcome::Flash => chalk().add_modifier(Modifier::BOLD),
        Outcome::Send => green(),
        Outcome::Project => amber(),
        Outcome::Attempt => dim(),
    }
}
