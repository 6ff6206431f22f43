mod display;
mod import;

use std::path::PathBuf;

use anyhow::{bail, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand, ValueEnum};

use crate::display::{
    display_draws, display_frequency, display_gan, display_import_summary, display_provinces,
    display_streaks,
};
use xoso_db::db::{
    count_draws, db_path, fetch_draws, fetch_last_draws, latest_draw_date, list_provinces,
    migrate, open_db,
};
use xoso_db::rusqlite::Connection;
use xoso_engine::extract::DigitWidth;
use xoso_engine::window::WindowSpec;
use xoso_engine::{frequency, gap, streak};

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
pub enum Digits {
    #[default]
    #[value(name = "2")]
    Two,
    #[value(name = "3")]
    Three,
}

impl Digits {
    fn width(self) -> DigitWidth {
        match self {
            Digits::Two => DigitWidth::Two,
            Digits::Three => DigitWidth::Three,
        }
    }
}

#[derive(Parser)]
#[command(name = "xoso", about = "Vietnamese lottery draw analytics")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Import prize rows from a semicolon-separated CSV file
    Import {
        /// Path to the CSV file (province;date;tier;position;value)
        #[arg(short, long, default_value = "assets/xoso.csv")]
        file: PathBuf,
    },

    /// Print the database path
    DbPath,

    /// List provinces in the database with their draw schedules
    Provinces,

    /// List the most recent draws of a province
    List {
        /// Province identifier (e.g. mien-bac, tp-hcm)
        #[arg(short, long)]
        province: String,

        /// Number of draws to display
        #[arg(short, long, default_value = "5")]
        last: u32,
    },

    /// Hot and cold number frequencies
    Stats {
        /// Province identifier
        #[arg(short, long)]
        province: String,

        /// Analysis window in draws
        #[arg(short = 'w', long, default_value = "100", conflicts_with = "days")]
        draws: u32,

        /// Analysis window in calendar days instead of draws
        #[arg(long)]
        days: Option<u32>,

        /// Digit width of the analyzed numbers
        #[arg(short, long, default_value = "2")]
        digits: Digits,

        /// Rows per table
        #[arg(short, long, default_value = "10")]
        top: usize,

        /// Reference end date (defaults to the latest stored draw)
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Lô Gan: most overdue numbers
    Gan {
        /// Province identifier
        #[arg(short, long)]
        province: String,

        /// Analysis window in draws (preferred mode)
        #[arg(short = 'w', long, default_value = "100", conflicts_with = "days")]
        draws: u32,

        /// Analysis window in calendar days instead of draws
        #[arg(long)]
        days: Option<u32>,

        /// Digit width of the analyzed numbers
        #[arg(short, long, default_value = "2")]
        digits: Digits,

        /// Number of rows to report
        #[arg(short, long, default_value = "10")]
        limit: usize,

        /// Reference end date (defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Consecutive-draw appearance streaks
    Streak {
        /// Province identifier
        #[arg(short, long)]
        province: String,

        /// Analysis window in draws
        #[arg(short = 'w', long, default_value = "30", conflicts_with = "days")]
        draws: u32,

        /// Analysis window in calendar days instead of draws
        #[arg(long)]
        days: Option<u32>,

        /// Digit width of the analyzed numbers
        #[arg(short, long, default_value = "2")]
        digits: Digits,

        /// Minimum streak length to report
        #[arg(short, long, default_value = "2")]
        min: u32,

        /// Number of rows per list
        #[arg(short, long, default_value = "10")]
        limit: usize,

        /// Reference end date (defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let path = db_path();
    let conn = open_db(&path)?;
    migrate(&conn)?;

    match cli.command {
        Command::Import { file } => cmd_import(&conn, &file),
        Command::DbPath => {
            println!("{}", path.display());
            Ok(())
        }
        Command::Provinces => cmd_provinces(&conn),
        Command::List { province, last } => cmd_list(&conn, &province, last),
        Command::Stats {
            province,
            draws,
            days,
            digits,
            top,
            date,
        } => cmd_stats(&conn, &province, window_spec(draws, days)?, digits, top, date),
        Command::Gan {
            province,
            draws,
            days,
            digits,
            limit,
            date,
        } => cmd_gan(&conn, &province, window_spec(draws, days)?, digits, limit, date),
        Command::Streak {
            province,
            draws,
            days,
            digits,
            min,
            limit,
            date,
        } => cmd_streak(&conn, &province, window_spec(draws, days)?, digits, min, limit, date),
    }
}

/// Builds the window request. Clap already rejects `--draws` together with
/// `--days`; zero sizes are rejected here before any resolution.
fn window_spec(draws: u32, days: Option<u32>) -> Result<WindowSpec> {
    let spec = match days {
        Some(n) => WindowSpec::Days(n),
        None => WindowSpec::Draws(draws),
    };
    match spec {
        WindowSpec::Draws(0) | WindowSpec::Days(0) => bail!("Window size must be positive"),
        _ => Ok(spec),
    }
}

/// Reference end date for an analysis: explicit `--date`, else the latest
/// stored draw for the province, else today.
fn reference_date(conn: &Connection, province: &str, date: Option<NaiveDate>) -> Result<NaiveDate> {
    if let Some(d) = date {
        return Ok(d);
    }
    if let Some(d) = latest_draw_date(conn, province)? {
        return Ok(d);
    }
    Ok(Local::now().date_naive())
}

fn cmd_import(conn: &Connection, file: &PathBuf) -> Result<()> {
    let result = import::import_csv(conn, file)?;
    display_import_summary(&result);
    Ok(())
}

fn cmd_provinces(conn: &Connection) -> Result<()> {
    let provinces = list_provinces(conn)?;
    display_provinces(&provinces);
    Ok(())
}

fn cmd_list(conn: &Connection, province: &str, last: u32) -> Result<()> {
    if count_draws(conn, province)? == 0 {
        println!("No draws stored for {}. Run: xoso import", province);
        return Ok(());
    }
    let records = fetch_last_draws(conn, province, last)?;
    display_draws(&records);
    Ok(())
}

fn cmd_stats(
    conn: &Connection,
    province: &str,
    spec: WindowSpec,
    digits: Digits,
    top: usize,
    date: Option<NaiveDate>,
) -> Result<()> {
    let end = reference_date(conn, province, date)?;
    let (window, meta) = spec.resolve(province, end)?;
    let records = fetch_draws(conn, province, window.start, window.end)?;
    if records.is_empty() {
        println!("No draw data for {} in the requested window.", province);
        return Ok(());
    }

    let hot = frequency::hot(&records, digits.width(), top);
    let cold = frequency::cold(&records, digits.width(), top);
    display_frequency(&hot, &cold, &meta, province);
    Ok(())
}

fn cmd_gan(
    conn: &Connection,
    province: &str,
    spec: WindowSpec,
    digits: Digits,
    limit: usize,
    date: Option<NaiveDate>,
) -> Result<()> {
    let end = reference_date(conn, province, date)?;
    let (window, meta) = spec.resolve(province, end)?;
    let records = fetch_draws(conn, province, window.start, window.end)?;
    let report = gap::analyze(province, window, &meta, &records, digits.width(), limit);
    display_gan(&report, province);
    Ok(())
}

fn cmd_streak(
    conn: &Connection,
    province: &str,
    spec: WindowSpec,
    digits: Digits,
    min: u32,
    limit: usize,
    date: Option<NaiveDate>,
) -> Result<()> {
    let end = reference_date(conn, province, date)?;
    let (window, meta) = spec.resolve(province, end)?;
    let records = fetch_draws(conn, province, window.start, window.end)?;
    let report = streak::analyze(&records, digits.width(), min, limit);
    display_streaks(&report, province, &meta);
    Ok(())
}
