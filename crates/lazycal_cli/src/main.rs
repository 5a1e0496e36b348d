//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `lazycal_core` linkage and storage wiring from a terminal.
//! - Render the current month grid, week window and today's agenda as text.
//!
//! Usage: `lazycal [DB_PATH]`. Without a path an in-memory database is used.
//!
//! Logging is enabled when `LAZYCAL_LOG_DIR` is set; relative directories
//! resolve against the working directory. `LAZYCAL_LOG_LEVEL` overrides the
//! build's default level.

use chrono::{Datelike, Local};
use lazycal_core::db::{open_db, open_db_in_memory};
use lazycal_core::{
    day_heading, default_log_level, init_logging, CalendarService, EventQuery, MonthGrid,
    NavigationState, SqliteKvRepository, ViewMode,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

const WEEKDAY_HEADER: &str = "Sun Mon Tue Wed Thu Fri Sat";
const LOG_DIR_ENV: &str = "LAZYCAL_LOG_DIR";
const LOG_LEVEL_ENV: &str = "LAZYCAL_LOG_LEVEL";

fn main() -> ExitCode {
    println!("lazycal_core ping={}", lazycal_core::ping());
    println!("lazycal_core version={}", lazycal_core::core_version());

    if let Err(err) = start_logging() {
        eprintln!("failed to initialize logging: {err}");
        return ExitCode::FAILURE;
    }

    let conn = match std::env::args().nth(1) {
        Some(path) => open_db(path),
        None => open_db_in_memory(),
    };
    let conn = match conn {
        Ok(conn) => conn,
        Err(err) => {
            eprintln!("failed to open calendar database: {err}");
            return ExitCode::FAILURE;
        }
    };

    let service = CalendarService::open(SqliteKvRepository::new(&conn));
    let mut nav = NavigationState::new(Local::now().date_naive());
    let query = EventQuery::default();

    println!();
    print!("{}", render_month(&nav.visible_month()));

    nav.set_mode(ViewMode::Week);
    println!();
    println!(
        "week: prev={} next={}",
        nav.can_go_previous(),
        nav.can_go_next()
    );
    for date in nav.visible_week().into_iter().flatten() {
        let count = service.events_on(date, &query).len();
        println!("  {} events={count}", date.format("%a %Y-%m-%d"));
    }

    nav.set_mode(ViewMode::Day);
    let today = nav.selected_date();
    println!();
    println!("{}", day_heading(today));
    let agenda = service.events_on(today, &query);
    if agenda.is_empty() {
        println!("  No events on {}.", nav.relative_day().label());
    }
    for event in agenda {
        println!(
            "  {}-{} {}",
            event.start.format("%H:%M"),
            event.end.format("%H:%M"),
            event.title
        );
    }

    ExitCode::SUCCESS
}

fn start_logging() -> Result<(), String> {
    let Some(raw_dir) = std::env::var_os(LOG_DIR_ENV) else {
        return Ok(());
    };
    let cwd = std::env::current_dir()
        .map_err(|err| format!("cannot resolve working directory: {err}"))?;
    let log_dir = resolve_log_dir(Path::new(&raw_dir), &cwd);
    let log_dir = log_dir
        .to_str()
        .ok_or_else(|| format!("{LOG_DIR_ENV} is not valid UTF-8"))?;
    let level = std::env::var(LOG_LEVEL_ENV).unwrap_or_else(|_| default_log_level().to_string());
    init_logging(&level, log_dir)
}

fn resolve_log_dir(raw: &Path, cwd: &Path) -> PathBuf {
    if raw.is_absolute() {
        raw.to_path_buf()
    } else {
        cwd.join(raw)
    }
}

fn render_month(grid: &MonthGrid) -> String {
    let mut out = format!("{:04}-{:02}\n{WEEKDAY_HEADER}\n", grid.year(), grid.month());
    for week in grid.weeks() {
        let row = week
            .iter()
            .map(|cell| match cell {
                Some(at) => format!("{:>3}", at.day()),
                None => "   ".to_string(),
            })
            .collect::<Vec<_>>()
            .join(" ");
        out.push_str(row.trim_end());
        out.push('\n');
    }
    out
}
