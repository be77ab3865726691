use std::{io, time::Duration};

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::{Bar, BarChart, BarGroup, Block, BorderType, Borders, Gauge, Padding, Paragraph},
};

use riderlog_core::{DashboardStore, MonthlyReportUseCase, Period, ReportData};

use crate::render::format_ratio;

// --- THEME ---
struct Theme {
    primary: Color,
    muted: Color,
    text: Color,
    success: Color,
    failed: Color,
    returned: Color,
}

const THEME: Theme = Theme {
    primary: Color::Cyan,
    muted: Color::DarkGray,
    text: Color::White,
    success: Color::Green,
    failed: Color::Yellow,
    returned: Color::Red,
};

pub struct ReportApp<'a, S: DashboardStore> {
    usecase: MonthlyReportUseCase<'a, S>,
    top_n: usize,
    pub period: Period,
    pub report: ReportData,
}

impl<'a, S: DashboardStore> ReportApp<'a, S> {
    pub fn new(store: &'a S, period: Period, top_n: usize) -> Result<Self> {
        let usecase = MonthlyReportUseCase::new(store);
        let report = usecase.generate(period, top_n)?;
        Ok(Self {
            usecase,
            top_n,
            period,
            report,
        })
    }

    pub fn previous_month(&mut self) -> Result<()> {
        self.period = self.period.previous();
        self.report = self.usecase.generate(self.period, self.top_n)?;
        Ok(())
    }

    pub fn next_month(&mut self) -> Result<()> {
        self.period = self.period.next();
        self.report = self.usecase.generate(self.period, self.top_n)?;
        Ok(())
    }
}

pub fn run<S: DashboardStore>(store: &S, period: Period, top_n: usize) -> Result<()> {
    let mut app = ReportApp::new(store, period, top_n)?;

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Main loop
    let result = run_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_loop<B: Backend, S: DashboardStore>(
    terminal: &mut Terminal<B>,
    app: &mut ReportApp<S>,
) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    loop {
        terminal.draw(|f| ui(f, app))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                        KeyCode::Left | KeyCode::Char('h') => app.previous_month()?,
                        KeyCode::Right | KeyCode::Char('l') => app.next_month()?,
                        _ => {}
                    }
                }
            }
        }
    }
}

fn ui<S: DashboardStore>(frame: &mut Frame, app: &ReportApp<S>) {
    let size = frame.area();

    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(10),   // Chart + Sidebar
            Constraint::Length(1), // Footer
        ])
        .split(size);

    // --- Header ---
    let header_block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(THEME.muted));

    let header_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(20),
            Constraint::Min(1),
            Constraint::Length(30),
        ])
        .split(main_layout[0]);

    let app_title = Paragraph::new(Span::styled(
        "RIDERLOG REPORT",
        Style::default().fg(THEME.primary).add_modifier(Modifier::BOLD),
    ))
    .block(Block::default().padding(Padding::new(0, 0, 1, 0)));
    frame.render_widget(app_title, header_layout[0]);

    let title = format!(" {} {} ", app.period.month_name(), app.period.year);
    let nav_text = Line::from(vec![
        Span::styled(" < ", Style::default().fg(THEME.text)),
        Span::styled(title, Style::default().fg(THEME.text).add_modifier(Modifier::BOLD)),
        Span::styled(" > ", Style::default().fg(THEME.text)),
    ]);
    let nav = Paragraph::new(nav_text)
        .alignment(Alignment::Right)
        .block(Block::default().padding(Padding::new(0, 0, 1, 0)));
    frame.render_widget(nav, header_layout[2]);

    frame.render_widget(header_block, main_layout[0]);

    // --- Content ---
    if app.report.rider_stats.is_empty() {
        frame.render_widget(
            Paragraph::new("No rider activity recorded for this month").alignment(Alignment::Center),
            main_layout[1],
        );
    } else {
        let content_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(75),
                Constraint::Length(1),
                Constraint::Percentage(25),
            ])
            .split(main_layout[1]);

        draw_chart(frame, &app.report, content_chunks[0]);
        draw_info_panel(frame, &app.report, content_chunks[2]);
    }

    // --- Footer ---
    let help = Line::from(vec![
        Span::styled("MONTH: ", Style::default().fg(THEME.muted)),
        Span::styled("←/→ ", Style::default().fg(THEME.text)),
        Span::raw("  "),
        Span::styled("QUIT: ", Style::default().fg(THEME.muted)),
        Span::styled("q", Style::default().fg(THEME.text)),
    ]);
    let footer = Paragraph::new(help)
        .alignment(Alignment::Center)
        .style(Style::default().fg(THEME.muted));
    frame.render_widget(footer, main_layout[2]);
}

fn draw_chart(frame: &mut Frame, report: &ReportData, area: Rect) {
    let mut bar_data = Vec::new();

    for stats in &report.rider_stats {
        // Label with the rider's first name under the success bar
        let label = stats
            .rider_name
            .split_whitespace()
            .next()
            .unwrap_or("?")
            .to_string();

        bar_data.push((label, stats.successful as u64, THEME.success));
        bar_data.push(("".to_string(), stats.failed as u64, THEME.failed));
        bar_data.push(("".to_string(), stats.returned as u64, THEME.returned));

        // Spacer between riders
        bar_data.push(("".to_string(), 0, Color::Reset));
    }

    let bar_items: Vec<Bar> = bar_data
        .iter()
        .map(|(label, value, color)| {
            Bar::default()
                .label(label.as_str())
                .value(*value)
                .style(Style::default().fg(*color))
                .text_value(if *value > 0 { value.to_string() } else { "".to_string() })
        })
        .collect();

    let max = report
        .rider_stats
        .iter()
        .map(|s| s.successful.max(s.failed).max(s.returned) as u64)
        .max()
        .unwrap_or(1);

    let chart_block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(THEME.muted))
        .title(" Deliveries by Rider (success / failed / returned) ");

    let chart = BarChart::default()
        .block(chart_block)
        .bar_width(5)
        .bar_gap(0)
        .data(BarGroup::default().bars(&bar_items))
        .max(max);

    frame.render_widget(chart, area);
}

fn draw_info_panel(frame: &mut Frame, report: &ReportData, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(10), // Summary
            Constraint::Min(1),     // Gauge
        ])
        .split(area);

    let top = &report.rider_stats[0];
    let listed_successful: u32 = report.rider_stats.iter().map(|s| s.successful).sum();
    let listed_total: u32 = report.rider_stats.iter().map(|s| s.total).sum();

    let info_text = vec![
        Line::from(vec![Span::styled(
            "Overview",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Entries:  ", Style::default().fg(THEME.muted)),
            Span::styled(
                report.total_entries.to_string(),
                Style::default().fg(THEME.text).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("Listed:   ", Style::default().fg(THEME.muted)),
            Span::styled(
                report.rider_stats.len().to_string(),
                Style::default().fg(THEME.text),
            ),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Top:      ", Style::default().fg(THEME.muted)),
            Span::styled(
                top.rider_name.clone(),
                Style::default().fg(THEME.primary).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("          ", Style::default()),
            Span::styled(
                format!("{} on {} days", format_ratio(top.success_ratio), top.active_days),
                Style::default().fg(THEME.success),
            ),
        ]),
    ];

    let info_block = Paragraph::new(info_text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(THEME.muted))
            .title(" Summary "),
    );
    frame.render_widget(info_block, chunks[0]);

    let ratio = if listed_total > 0 {
        listed_successful as f64 / listed_total as f64
    } else {
        0.0
    };

    let gauge = Gauge::default()
        .block(
            Block::default()
                .title(" Team Success ")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(THEME.muted)),
        )
        .gauge_style(Style::default().fg(if ratio < 0.8 { THEME.failed } else { THEME.success }))
        .ratio(ratio.min(1.0))
        .label(format_ratio(ratio));

    frame.render_widget(gauge, chunks[1]);
}
