use anyhow::Result;
use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use log::warn;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};
use rusqlite::Connection;

use crate::config::AppConfig;
use crate::db::repository::{ClimbRepo, StatsRepo, UserRepo};
use crate::models::{Climb, GradeProgression, MonthlySummary, TodayStats, User, YearMonth};
use crate::stats;
use crate::tui::events::{Event, EventHandler};
use crate::tui::theme;
use crate::tui::widgets::{climbs, header, monthly, progression, statusbar, streak, today};
use crate::utils::time::{local_today, utc_today};

#[derive(Debug, Clone, PartialEq)]
pub enum View {
    Dashboard,
    Stats,
    Help,
}

pub struct App {
    pub view: View,
    pub config: AppConfig,
    pub should_quit: bool,
    pub user: User,

    // Cached state (refreshed on load)
    pub utc_today: NaiveDate,
    pub local_today: NaiveDate,
    pub streak: u32,
    pub week_days: [bool; 7],
    pub today_stats: TodayStats,
    pub recent: Vec<Climb>,
    pub months: Vec<YearMonth>,
    pub month_idx: usize,
    pub summary: MonthlySummary,
    pub progression: GradeProgression,
    pub load_error: Option<String>,
}

impl App {
    pub fn new(config: AppConfig, user: User) -> Self {
        let summary = stats::compute_monthly_summary(&config.climbing.grade_scale, &[]);
        App {
            view: View::Dashboard,
            config,
            should_quit: false,
            user,
            utc_today: utc_today(),
            local_today: local_today(),
            streak: 0,
            week_days: [false; 7],
            today_stats: TodayStats::default(),
            recent: Vec::new(),
            months: Vec::new(),
            month_idx: 0,
            summary,
            progression: GradeProgression::default(),
            load_error: None,
        }
    }

    /// Month shown in the stats view.
    pub fn selected_month(&self) -> YearMonth {
        self.months
            .get(self.month_idx)
            .copied()
            .unwrap_or_else(|| YearMonth::from_date(self.local_today))
    }

    pub fn load(&mut self, conn: &Connection) -> Result<()> {
        let user_id = self.user.id;

        self.streak = StatsRepo::refresh_streak(conn, user_id, self.utc_today)?;
        if let Some(user) = UserRepo::get(conn, user_id)? {
            self.user = user;
        }
        self.week_days = StatsRepo::week_days(conn, user_id, self.utc_today)?;
        self.today_stats = StatsRepo::today_stats(conn, user_id, self.local_today)?;
        self.recent = ClimbRepo::list_recent(conn, user_id, self.config.display.recent_climbs)?;

        self.months = StatsRepo::available_months(conn, user_id)?;
        self.month_idx = self.month_idx.min(self.months.len().saturating_sub(1));
        self.load_month(conn)
    }

    fn load_month(&mut self, conn: &Connection) -> Result<()> {
        let scale = &self.config.climbing.grade_scale;
        let month = self.selected_month();
        self.summary = StatsRepo::monthly_stats(conn, scale, self.user.id, month)?;
        self.progression = StatsRepo::grade_progression(conn, scale, self.user.id, month)?;
        Ok(())
    }

    fn reload(&mut self, conn: &Connection) {
        self.load_error = match self.load(conn) {
            Ok(()) => None,
            Err(e) => {
                warn!("Dashboard reload failed: {:#}", e);
                Some(format!("{:#}", e))
            }
        };
    }

    pub fn tick(&mut self, conn: &Connection) {
        let (utc, local) = (utc_today(), local_today());
        if utc != self.utc_today || local != self.local_today {
            self.utc_today = utc;
            self.local_today = local;
            self.reload(conn);
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent, conn: &Connection) {
        // some terminals also report release and repeat events
        if key.kind != KeyEventKind::Press {
            return;
        }
        match self.view {
            View::Dashboard => self.handle_dashboard_key(key, conn),
            View::Stats => self.handle_stats_key(key, conn),
            View::Help => self.handle_help_key(key),
        }
    }

    fn handle_dashboard_key(&mut self, key: KeyEvent, conn: &Connection) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('s') => self.view = View::Stats,
            KeyCode::Char('?') => self.view = View::Help,
            KeyCode::Char('r') => self.reload(conn),
            _ => {}
        }
    }

    fn handle_stats_key(&mut self, key: KeyEvent, conn: &Connection) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('s') => self.view = View::Dashboard,
            KeyCode::Char('r') => self.reload(conn),
            // months are newest first
            KeyCode::Left | KeyCode::Char('h') => {
                if self.month_idx + 1 < self.months.len() {
                    self.month_idx += 1;
                    self.reload_month(conn);
                }
            }
            KeyCode::Right | KeyCode::Char('l') => {
                if self.month_idx > 0 {
                    self.month_idx -= 1;
                    self.reload_month(conn);
                }
            }
            _ => {}
        }
    }

    fn handle_help_key(&mut self, key: KeyEvent) {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('?')) {
            self.view = View::Dashboard;
        }
    }

    fn reload_month(&mut self, conn: &Connection) {
        if let Err(e) = self.load_month(conn) {
            warn!("Loading {} failed: {:#}", self.selected_month(), e);
            self.load_error = Some(format!("{:#}", e));
        }
    }

    pub fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        frame.render_widget(Block::default().style(theme::base()), area);

        let outer = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4), // header
                Constraint::Min(0),    // body
                Constraint::Length(1), // status bar
            ])
            .split(area);

        header::render(frame, outer[0], &self.user, self.local_today);
        statusbar::render(frame, outer[2], &self.view);

        match self.view {
            View::Stats => self.draw_stats(frame, outer[1]),
            View::Dashboard => self.draw_dashboard(frame, outer[1]),
            View::Help => {
                self.draw_dashboard(frame, outer[1]);
                self.draw_help_overlay(frame);
            }
        }

        if let Some(err) = &self.load_error {
            self.draw_error(frame, err);
        }
    }

    fn draw_dashboard(&self, frame: &mut Frame, body: Rect) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(38), Constraint::Percentage(62)])
            .split(body);

        let left = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(7), // streak
                Constraint::Length(7), // today
                Constraint::Min(0),
            ])
            .split(columns[0]);

        streak::render(frame, left[0], self.streak, &self.week_days);
        today::render(frame, left[1], &self.today_stats);
        climbs::render(frame, columns[1], &self.recent);
    }

    fn draw_stats(&self, frame: &mut Frame, body: Rect) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(14), Constraint::Min(8)])
            .split(body);

        let position = if self.months.is_empty() {
            None
        } else {
            Some((self.month_idx, self.months.len()))
        };
        monthly::render(frame, rows[0], self.selected_month(), &self.summary, position);
        progression::render(
            frame,
            rows[1],
            &self.progression,
            &self.config.climbing.grade_scale,
        );
    }

    fn draw_help_overlay(&self, frame: &mut Frame) {
        let area = frame.area();
        let popup_area = Rect {
            x: area.width / 4,
            y: area.height / 4,
            width: area.width / 2,
            height: (area.height / 2).max(10).min(area.height),
        };

        frame.render_widget(Clear, popup_area);

        let key = |k: &'static str, what: &'static str| {
            Line::from(vec![
                Span::styled(format!("  {:<10}", k), theme::chalk()),
                Span::styled(what, theme::dim()),
            ])
        };

        let help_text = vec![
            Line::from(Span::styled(
                "  Keybindings",
                theme::chalk().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            key("[s]", "Toggle stats view"),
            key("[← →]", "Previous / next month (stats)"),
            key("[r]", "Reload from the logbook"),
            key("[?]", "Toggle help"),
            key("[Esc]", "Back / quit"),
            Line::from(""),
            Line::from(Span::styled(
                "  Log climbs with `cragbook log`",
                theme::dim(),
            )),
        ];

        let block = Block::default()
            .title(Span::styled(" Help ", theme::chalk()))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::chalk())
            .style(theme::surface());

        frame.render_widget(Paragraph::new(help_text).block(block), popup_area);
    }

    fn draw_error(&self, frame: &mut Frame, err: &str) {
        let area = frame.area();
        let popup_area = Rect {
            x: area.width / 6,
            y: area.height.saturating_sub(6),
            width: area.width * 2 / 3,
            height: 4.min(area.height),
        };
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(Span::styled(" Error ", theme::red()))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::red())
            .style(theme::surface());
        let text = Line::from(Span::styled(format!("  {}", err), theme::red()));
        frame.render_widget(Paragraph::new(text).block(block), popup_area);
    }
}

/// Run the TUI event loop.
pub fn run(conn: Connection, config: AppConfig) -> Result<()> {
    let user = UserRepo::require_active(&conn)?;
    let tick_rate = config.display.tick_rate_ms;
    let mut app = App::new(config, user);
    app.load(&conn)?;

    let mut terminal = ratatui::init();
    let events = EventHandler::new(tick_rate);

    let result = (|| -> Result<()> {
        loop {
            terminal.draw(|frame| app.draw(frame))?;

            match events.next()? {
                Event::Key(key) => {
                    app.handle_key(key, &conn);
                    if app.should_quit {
                        return Ok(());
                    }
                }
                Event::Resize => {}
                Event::Tick => app.tick(&conn),
            }
        }
    })();

    ratatui::restore();
    result
}
