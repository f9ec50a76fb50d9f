use anyhow::Result;
use chrono::{DateTime, Utc};
use quickquote_lib::{ChangeBasis, Quote, RankedEntry, Snapshot, UniverseMovers};
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Clone, Debug, PartialEq)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
    Markdown,
}

impl OutputFormat {
    /// Unknown names fall back to a table.
    pub fn parse(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "json" => OutputFormat::Json,
            "csv" => OutputFormat::Csv,
            "markdown" | "md" => OutputFormat::Markdown,
            _ => OutputFormat::Table,
        }
    }
}

#[derive(Tabled, Serialize)]
struct QuoteRow {
    #[tabled(rename = "Symbol")]
    #[serde(rename = "Symbol")]
    symbol: String,
    #[tabled(rename = "Price")]
    #[serde(rename = "Price")]
    price: String,
    #[tabled(rename = "Change")]
    #[serde(rename = "Change")]
    change: String,
    #[tabled(rename = "Open")]
    #[serde(rename = "Open")]
    open: String,
    #[tabled(rename = "High")]
    #[serde(rename = "High")]
    high: String,
    #[tabled(rename = "Low")]
    #[serde(rename = "Low")]
    low: String,
    #[tabled(rename = "Volume")]
    #[serde(rename = "Volume")]
    volume: String,
    #[tabled(rename = "Basis")]
    #[serde(rename = "Basis")]
    basis: String,
    #[tabled(rename = "Updated")]
    #[serde(rename = "Updated")]
    updated: String,
}

#[derive(Tabled, Serialize)]
struct MoverRow {
    #[tabled(rename = "Universe")]
    #[serde(rename = "Universe")]
    universe: String,
    #[tabled(rename = "Side")]
    #[serde(rename = "Side")]
    side: String,
    #[tabled(rename = "Rank")]
    #[serde(rename = "Rank")]
    rank: usize,
    #[tabled(rename = "Symbol")]
    #[serde(rename = "Symbol")]
    symbol: String,
    #[tabled(rename = "Change %")]
    #[serde(rename = "Change %")]
    change_percent: String,
}

// -- Row builders --

fn build_quote_row(q: &Quote) -> QuoteRow {
    QuoteRow {
        symbol: q.display_symbol.clone(),
        price: format_usd(q.price),
        change: format!("{} ({})", format_pct(q.change_percent), format_signed(q.change)),
        open: format_usd(q.open),
        high: format_usd(q.high),
        low: format_usd(q.low),
        volume: format_volume(q.volume),
        basis: match q.basis {
            ChangeBasis::PreviousClose => "prev close".to_string(),
            ChangeBasis::Open => "open".to_string(),
            ChangeBasis::Unavailable => "-".to_string(),
        },
        updated: format_observed(q.observed_at),
    }
}

fn side_rows(universe: &str, side: &str, entries: &[RankedEntry]) -> Vec<MoverRow> {
    entries
        .iter()
        .enumerate()
        .map(|(i, e)| MoverRow {
            universe: universe.to_string(),
            side: side.to_string(),
            rank: i + 1,
            symbol: e.symbol.clone(),
            change_percent: format_pct(e.change_percent),
        })
        .collect()
}

fn universe_rows(universe: &str, movers: &UniverseMovers) -> Vec<MoverRow> {
    let mut rows = side_rows(universe, "gainer", &movers.gainers);
    rows.extend(side_rows(universe, "loser", &movers.losers));
    rows
}

fn build_mover_rows(snapshot: &Snapshot) -> Vec<MoverRow> {
    let mut rows = universe_rows("stocks", &snapshot.stocks);
    rows.extend(universe_rows("reits", &snapshot.income_trusts));
    rows
}

// -- Printers --

pub fn print_quote(quote: &Quote, format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(quote),
        OutputFormat::Csv => print_csv(vec![build_quote_row(quote)])?,
        OutputFormat::Markdown => print_markdown(vec![build_quote_row(quote)]),
        OutputFormat::Table => println!("{}", Table::new(vec![build_quote_row(quote)])),
    }
    Ok(())
}

pub fn print_snapshot(snapshot: &Snapshot, format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(snapshot),
        OutputFormat::Csv => print_csv(build_mover_rows(snapshot))?,
        OutputFormat::Markdown => print_markdown(build_mover_rows(snapshot)),
        OutputFormat::Table => {
            println!("{}", Table::new(build_mover_rows(snapshot)));
            println!("Computed: {}", format_datetime(snapshot.computed_at));
        }
    }
    Ok(())
}

fn print_markdown<T: Tabled>(rows: Vec<T>) {
    let mut table = Table::new(rows);
    table.with(Style::markdown());
    println!("{}", table);
}

fn print_csv<T: Serialize>(rows: Vec<T>) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(std::io::stdout());
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn print_json<T: serde::Serialize>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}

// -- Formatting --

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

fn format_usd(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => {
            let fixed = format!("{:.2}", v.abs());
            let (int_part, frac) = fixed.split_once('.').unwrap_or((&fixed, "00"));
            let sign = if v < 0.0 { "-" } else { "" };
            format!("{}${}.{}", sign, group_thousands(int_part), frac)
        }
        _ => "-".to_string(),
    }
}

fn format_pct(value: f64) -> String {
    if !value.is_finite() {
        return "-".to_string();
    }
    let sign = if value > 0.0 { "+" } else { "" };
    format!("{}{:.2}%", sign, value)
}

fn format_signed(value: f64) -> String {
    let sign = if value > 0.0 { "+" } else { "" };
    format!("{}{:.2}", sign, value)
}

fn format_volume(value: Option<u64>) -> String {
    match value {
        Some(v) => group_thousands(&v.to_string()),
        None => "-".to_string(),
    }
}

fn format_datetime(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

fn format_observed(epoch_secs: i64) -> String {
    DateTime::from_timestamp(epoch_secs, 0)
        .map(format_datetime)
        .unwrap_or_else(|| "-".to_string())
}
