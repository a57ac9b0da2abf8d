//! # anomaly-cli
//!
//! Command-line interface for rolling z-score anomaly detection.

use anomaly::{AnomalyScorer, RollingConfig, RollingScorer, StdEstimator, DEFAULT_WINDOW_SIZE};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use data::{SeriesReader, TextEncoding, TsvReader};
use session::{Session, SessionConfig, SessionEvent, Upload};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

type CliResult<T> = std::result::Result<T, String>;

#[derive(Parser, Debug)]
#[command(name = "anomaly")]
#[command(about = "Rolling z-score anomaly detection for a single time series", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Flag anomalies and optionally export the selected range
    Detect {
        /// Tab-separated input with `time` and `value` columns
        #[arg(short, long)]
        input: PathBuf,

        /// Text encoding of the input (utf-8, windows-1252, latin1, ascii)
        #[arg(short, long)]
        encoding: Option<TextEncoding>,

        /// Detection threshold in standard deviations, 1.0 to 5.0
        #[arg(short, long)]
        threshold: Option<f64>,

        /// First day of the exported range (YYYY-MM-DD)
        #[arg(long)]
        start: Option<NaiveDate>,

        /// Last day of the exported range, inclusive (YYYY-MM-DD)
        #[arg(long)]
        end: Option<NaiveDate>,

        /// Write the rows of the range to this .xlsx file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Print every scored row with its rolling statistics
    Score {
        /// Tab-separated input with `time` and `value` columns
        #[arg(short, long)]
        input: PathBuf,

        /// Text encoding of the input
        #[arg(short, long)]
        encoding: Option<TextEncoding>,

        /// Detection threshold in standard deviations
        #[arg(short, long, default_value = "3.0")]
        threshold: f64,

        /// Trailing window length
        #[arg(short, long, default_value_t = DEFAULT_WINDOW_SIZE)]
        window: usize,

        /// Standard deviation divisor (sample, population)
        #[arg(long, default_value = "sample", value_parser = parse_estimator)]
        estimator: StdEstimator,

        /// Print JSON instead of TSV
        #[arg(long)]
        json: bool,
    },

    /// List supported input encodings
    Encodings,
}

fn parse_estimator(s: &str) -> CliResult<StdEstimator> {
    match s.to_lowercase().as_str() {
        "sample" => Ok(StdEstimator::Sample),
        "population" => Ok(StdEstimator::Population),
        _ => Err(format!("Unknown estimator: {}. Use 'sample' or 'population'", s)),
    }
}

fn fmt_opt(value: Option<f64>) -> String {
    value.map(|v| format!("{:.6}", v)).unwrap_or_default()
}

/// Run anomaly detection command
#[allow(clippy::too_many_arguments)]
fn run_detect(
    config: SessionConfig,
    input: PathBuf,
    encoding: Option<TextEncoding>,
    threshold: Option<f64>,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    output: Option<PathBuf>,
    json: bool,
) -> CliResult<()> {
    let mut session = Session::new(config);

    if let Some(encoding) = encoding {
        session
            .handle(SessionEvent::EncodingChanged(encoding))
            .map_err(|e| e.to_string())?;
    }
    if let Some(threshold) = threshold {
        session
            .handle(SessionEvent::ThresholdChanged(threshold))
            .map_err(|e| e.to_string())?;
    }

    let upload = Upload::from_path(&input).map_err(|e| e.to_string())?;
    session
        .handle(SessionEvent::Uploaded(upload))
        .map_err(|e| e.to_string())?;

    if start.is_some() || end.is_some() {
        let span = session.data_span().ok_or("No data in input")?;
        session
            .handle(SessionEvent::RangeChanged {
                start: start.unwrap_or(span.start()),
                end: end.unwrap_or(span.end()),
            })
            .map_err(|e| e.to_string())?;
    }

    let view = session.view().map_err(|e| e.to_string())?;

    if json {
        let body = serde_json::json!({
            "file": session.upload_name(),
            "encoding": session.encoding(),
            "threshold": view.threshold,
            "range": view.range,
            "total_points": session.samples().len(),
            "visible_points": view.visible.len(),
            "anomaly_count": view.anomalies.len(),
            "anomalies": view.anomalies.iter().map(|s| {
                serde_json::json!({
                    "time": s.timestamp(),
                    "value": s.value(),
                    "z_score": s.z_score(),
                })
            }).collect::<Vec<_>>(),
        });
        let text = serde_json::to_string_pretty(&body)
            .map_err(|e| format!("Failed to write JSON: {}", e))?;
        println!("{}", text);
    } else {
        println!(
            "Loaded {} data points from {}",
            session.samples().len(),
            session.upload_name().unwrap_or_default()
        );
        println!("Encoding: {}", session.encoding());
        println!("Threshold: {}", view.threshold);
        println!("Range: {}", view.range);
        println!("Visible points: {}", view.visible.len());
        println!("Anomalies found: {}", view.anomalies.len());

        if !view.anomalies.is_empty() {
            println!("\ntime\tvalue");
            for s in &view.anomalies {
                println!("{}\t{}", s.timestamp(), s.value());
            }
        }
    }

    if let Some(path) = output {
        let bytes = session.export().map_err(|e| e.to_string())?;
        std::fs::write(&path, bytes).map_err(|e| format!("Failed to create output: {}", e))?;
        if !json {
            println!("\nResults written to {:?}", path);
        }
    }

    Ok(())
}

/// Run full scoring command
fn run_score(
    config: &SessionConfig,
    input: PathBuf,
    encoding: Option<TextEncoding>,
    threshold: f64,
    window: usize,
    estimator: StdEstimator,
    json: bool,
) -> CliResult<()> {
    let reader = TsvReader::with_encoding(encoding.unwrap_or(config.default_encoding));
    let samples = reader
        .read_path(&input)
        .map_err(|e| e.to_string())?;

    let scorer = RollingScorer::new(RollingConfig::new(window, threshold).with_estimator(estimator))
        .map_err(|e| e.to_string())?;
    let series = scorer.score(&samples).map_err(|e| e.to_string())?;

    if json {
        let text = serde_json::to_string_pretty(&series)
            .map_err(|e| format!("Failed to write JSON: {}", e))?;
        println!("{}", text);
        return Ok(());
    }

    println!("time\tvalue\trolling_mean\trolling_std\tanomaly");
    for s in &series {
        println!(
            "{}\t{}\t{}\t{}\t{}",
            s.timestamp(),
            s.value(),
            fmt_opt(s.rolling_mean),
            fmt_opt(s.rolling_std),
            s.is_anomaly
        );
    }
    Ok(())
}

fn run_encodings(config: &SessionConfig) -> CliResult<()> {
    for encoding in TextEncoding::all() {
        if *encoding == config.default_encoding {
            println!("{} (default)", encoding);
        } else {
            println!("{}", encoding);
        }
    }
    Ok(())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,anomaly=info,session=info".into()),
        )
        .init();
}

fn run(cli: Cli) -> CliResult<()> {
    let config = SessionConfig::from_env().map_err(|e| e.to_string())?;

    match cli.command {
        Commands::Detect {
            input,
            encoding,
            threshold,
            start,
            end,
            output,
            json,
        } => run_detect(config, input, encoding, threshold, start, end, output, json),

        Commands::Score {
            input,
            encoding,
            threshold,
            window,
            estimator,
            json,
        } => run_score(&config, input, encoding, threshold, window, estimator, json),

        Commands::Encodings => run_encodings(&config),
    }
}

fn main() {
    // Load .env file (optional - won't fail if missing)
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
