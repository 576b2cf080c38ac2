//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use serde::Serialize;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::drawing_store::JsonDrawingStore;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::html_chart::HtmlChartAdapter;
use crate::domain::annotation::{annotate, AnnotationStyle};
use crate::domain::config_validation::validate_chart_config;
use crate::domain::error::PnlChartError;
use crate::domain::merge::{merge_asof, net_pl_series};
use crate::domain::pnl::{compute_positions, PositionState};
use crate::domain::settings::{
    ChartSettings, DEFAULT_DRAWINGS, DEFAULT_LINE_WIDTH_PER_UNIT, DEFAULT_OUTPUT,
    DEFAULT_PANE_HEIGHT,
};
use crate::domain::summary::PnlSummary;
use crate::domain::trade::{normalize_trades, TradeRecord, DEFAULT_TZ_SHIFT_HOURS};
use crate::ports::chart_port::ChartPort;
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;
use crate::ports::drawing_port::DrawingPort;

pub const NET_PL_LINE: &str = "NetPL";
pub const NET_PL_COLOR: &str = "blue";

#[derive(Parser, Debug)]
#[command(name = "pnlchart", about = "Trade log P&L chart builder")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render the price chart with trade markers and the net P&L pane
    Render {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        symbol: Option<String>,
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(long)]
        drawings: Option<PathBuf>,
    },
    /// Print per-trade position and P&L as CSV
    Pnl {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Validate a configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    let result = match cli.command {
        Command::Render {
            config,
            symbol,
            output,
            drawings,
        } => run_render(&config, symbol, output, drawings),
        Command::Pnl { config } => run_pnl(&config, io::stdout().lock()),
        Command::Validate { config } => run_validate(&config).map(|_| ()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

/// Load, validate and resolve the settings from an INI file.
pub fn load_settings(config_path: &Path) -> Result<ChartSettings, PnlChartError> {
    eprintln!("Loading config from {}", config_path.display());
    let adapter = FileConfigAdapter::from_file(config_path)?;
    validate_chart_config(&adapter)?;
    build_chart_settings(&adapter)
}

pub fn build_chart_settings(adapter: &dyn ConfigPort) -> Result<ChartSettings, PnlChartError> {
    let required = |section: &str, key: &str| {
        adapter
            .get_string(section, key)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| PnlChartError::ConfigMissing {
                section: section.into(),
                key: key.into(),
            })
    };

    let trades_path = PathBuf::from(required("trades", "path")?);
    let prices_path = PathBuf::from(required("prices", "path")?);
    let symbol = required("chart", "symbol")?;

    Ok(ChartSettings {
        trades_path,
        prices_path,
        tz_shift_hours: adapter.get_int("trades", "tz_shift_hours", DEFAULT_TZ_SHIFT_HOURS),
        symbol,
        output: PathBuf::from(
            adapter
                .get_string("chart", "output")
                .unwrap_or_else(|| DEFAULT_OUTPUT.to_string()),
        ),
        drawings: PathBuf::from(
            adapter
                .get_string("chart", "drawings")
                .unwrap_or_else(|| DEFAULT_DRAWINGS.to_string()),
        ),
        pane_height: adapter.get_double("chart", "pane_height", DEFAULT_PANE_HEIGHT),
        style: AnnotationStyle {
            line_width_per_unit: adapter.get_double(
                "chart",
                "line_width_per_unit",
                DEFAULT_LINE_WIDTH_PER_UNIT,
            ),
            ..AnnotationStyle::default()
        },
    })
}

/// CLI flags win over config values.
pub fn apply_overrides(
    mut settings: ChartSettings,
    symbol: Option<String>,
    output: Option<PathBuf>,
    drawings: Option<PathBuf>,
) -> ChartSettings {
    if let Some(s) = symbol.filter(|s| !s.trim().is_empty()) {
        settings.symbol = s.trim().to_string();
    }
    if let Some(o) = output {
        settings.output = o;
    }
    if let Some(d) = drawings {
        settings.drawings = d;
    }
    settings
}

/// Fetch, parse, shift and sort the trade log. An empty log is fatal.
pub fn load_trades(
    data_port: &dyn DataPort,
    tz_shift_hours: i64,
) -> Result<Vec<TradeRecord>, PnlChartError> {
    let raws = data_port.fetch_trades()?;
    if raws.is_empty() {
        return Err(PnlChartError::NoTrades {
            path: data_port.trade_source(),
        });
    }
    normalize_trades(&raws, tz_shift_hours)
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderOutcome {
    pub summary: PnlSummary,
    pub net_pl_points: usize,
    pub markers: usize,
    pub trend_lines: usize,
}

pub fn run_render_pipeline(
    data_port: &dyn DataPort,
    chart: &mut dyn ChartPort,
    drawing_port: &dyn DrawingPort,
    settings: &ChartSettings,
) -> Result<RenderOutcome, PnlChartError> {
    // Stage 1: Load trades
    eprintln!("Loading trades from {}", data_port.trade_source());
    let trades = load_trades(data_port, settings.tz_shift_hours)?;

    // Stage 2: Position and P&L
    eprintln!("Computing P&L for {} trades", trades.len());
    let states = compute_positions(&trades);

    // Stage 3: Price bars and as-of merge
    let bars = data_port.fetch_bars()?;
    eprintln!("Merging onto {} price bars", bars.len());
    let merged = merge_asof(&bars, &states);
    let net_pl = net_pl_series(&merged);
    if net_pl.is_empty() {
        eprintln!("warning: no price bars at or after the first trade; P&L pane is empty");
    }

    // Stage 4: Markers and trend lines
    let annotations = annotate(&trades, &states, &settings.style);

    // Stage 5: Drawing state
    let mut drawings = drawing_port.load()?;
    if drawings.is_empty() {
        eprintln!("No saved drawings, starting with a clean chart");
    }

    // Stage 6: Hand everything to the chart
    chart.set_bars(&bars);
    chart.create_line(NET_PL_LINE, NET_PL_COLOR, &net_pl);
    for marker in &annotations.markers {
        chart.marker(marker);
    }
    for line in &annotations.trend_lines {
        chart.trend_line(line);
    }
    chart.load_drawings(&settings.symbol, drawings.get(&settings.symbol).cloned());
    chart.show(&settings.output)?;
    eprintln!("Chart written to: {}", settings.output.display());

    // Stage 7: Persist drawing state under the same symbol
    drawings.set(&settings.symbol, chart.drawings(&settings.symbol));
    drawing_port.save(&drawings)?;

    Ok(RenderOutcome {
        summary: PnlSummary::compute(&states),
        net_pl_points: net_pl.len(),
        markers: annotations.markers.len(),
        trend_lines: annotations.trend_lines.len(),
    })
}

fn print_summary(symbol: &str, outcome: &RenderOutcome) {
    let s = &outcome.summary;
    eprintln!("\n=== {} ===", symbol);
    eprintln!("Trades:           {}", s.total_trades);
    eprintln!("Round Trips:      {}", s.round_trips);
    eprintln!("Win Rate:         {:.1}%", s.win_rate * 100.0);
    eprintln!("Realized P&L:     {:.2}", s.realized_pl);
    eprintln!("Final Net P&L:    {:.2}", s.final_net_pl);
    eprintln!("Largest Win:      {:.2}", s.largest_win);
    eprintln!("Largest Loss:     -{:.2}", s.largest_loss);
    if s.open_position != 0 {
        eprintln!("Open Position:    {}", s.open_position);
    }
    eprintln!(
        "Drawn:            {} markers, {} trend lines, {} P&L points",
        outcome.markers, outcome.trend_lines, outcome.net_pl_points
    );
}

pub fn run_render(
    config_path: &Path,
    symbol: Option<String>,
    output: Option<PathBuf>,
    drawings: Option<PathBuf>,
) -> Result<(), PnlChartError> {
    let settings = apply_overrides(load_settings(config_path)?, symbol, output, drawings);

    let data_port = CsvAdapter::new(settings.trades_path.clone(), settings.prices_path.clone());
    let drawing_port = JsonDrawingStore::new(settings.drawings.clone());
    let mut chart = HtmlChartAdapter::new(settings.pane_height);

    let outcome = run_render_pipeline(&data_port, &mut chart, &drawing_port, &settings)?;
    print_summary(&settings.symbol, &outcome);
    Ok(())
}

#[derive(Debug, Serialize)]
struct PnlRow {
    timestamp: String,
    action: String,
    quantity: i64,
    price: f64,
    notional_value: f64,
    commission: f64,
    fee: f64,
    position: i64,
    realized_pl: f64,
    gain: f64,
    net_pl: f64,
}

/// Write one CSV row per trade with its derived position state.
pub fn write_pnl_table<W: io::Write>(
    writer: W,
    trades: &[TradeRecord],
    states: &[PositionState],
) -> Result<(), PnlChartError> {
    let mut wtr = csv::Writer::from_writer(writer);
    let to_io = |e: csv::Error| PnlChartError::Io(io::Error::other(e));
    for (trade, state) in trades.iter().zip(states) {
        wtr.serialize(PnlRow {
            timestamp: trade.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
            action: trade.action.to_string(),
            quantity: trade.quantity,
            price: trade.price,
            notional_value: trade.notional_value,
            commission: trade.commission,
            fee: trade.fee,
            position: state.position,
            realized_pl: state.realized_pl,
            gain: state.gain,
            net_pl: state.net_pl,
        })
        .map_err(to_io)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn run_pnl<W: io::Write>(config_path: &Path, out: W) -> Result<(), PnlChartError> {
    let settings = load_settings(config_path)?;

    let data_port = CsvAdapter::new(settings.trades_path.clone(), settings.prices_path.clone());
    eprintln!("Loading trades from {}", data_port.trade_source());
    let trades = load_trades(&data_port, settings.tz_shift_hours)?;
    let states = compute_positions(&trades);
    write_pnl_table(out, &trades, &states)
}

pub fn run_validate(config_path: &Path) -> Result<ChartSettings, PnlChartError> {
    let settings = load_settings(config_path)?;

    eprintln!("\nSettings:");
    eprintln!("  trades:         {}", settings.trades_path.display());
    eprintln!("  prices:         {}", settings.prices_path.display());
    eprintln!("  tz shift:       {:+}h", settings.tz_shift_hours);
    eprintln!("  symbol:         {}", settings.symbol);
    eprintln!("  output:         {}", settings.output.display());
    eprintln!("  drawings:       {}", settings.drawings.display());
    eprintln!("  pane height:    {:.2}", settings.pane_height);
    eprintln!("  width per unit: {}", settings.style.line_width_per_unit);
    eprintln!("\nConfiguration is valid.");
    Ok(settings)
}
