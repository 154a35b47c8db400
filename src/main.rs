use clap::{Args, Parser, Subcommand};
use dtfmt::civil::CivilDateTime;
use dtfmt::decode::decode_str;
use dtfmt::encode::{dt_str, now_str, to_dt_str, to_str};
use dtfmt::flags::{
    dump_flags, parse_flags, DateOrder, DateSep, DateTimeSep, Format, Precision, TimeSep,
};
use serde::Serialize;
use tracing::{debug, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "dtf", version, about = "Format nanosecond timestamps and sniff their layout")]
struct Cli {
    /// Log filter (tracing EnvFilter syntax)
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the current time
    Now {
        #[command(flatten)]
        layout: LayoutArgs,
        /// Whole-hour offset from UTC
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        offset: i32,
    },
    /// Format a nanosecond timestamp as date-time text
    Format {
        timestamp: u64,
        #[command(flatten)]
        layout: LayoutArgs,
    },
    /// Print a timestamp as bare digits (current time if omitted)
    Numeric {
        timestamp: Option<u64>,
        /// secs, msecs, usecs or nsecs
        #[arg(short, long, default_value = "nsecs")]
        precision: String,
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        offset: i32,
    },
    /// Recover the flags that produced a date-time string
    Sniff {
        input: String,
        #[arg(long)]
        json: bool,
    },
    /// Print the symbolic names of a raw flag mask
    Dump {
        /// Decimal or 0x-prefixed mask
        bits: String,
        /// Prefix every name with `dtf::`
        #[arg(long)]
        prefix: bool,
    },
    /// Print every valid layout applied to one timestamp
    Matrix {
        /// Defaults to 2019-01-08T16:50:23.006057057Z
        #[arg(default_value = "1546966223006057057")]
        timestamp: u64,
        #[arg(long)]
        json: bool,
    },
}

/// Layout selection: a whole mask via `--flags`, or per-axis overrides on
/// top of the default `yyyy-mm-dd/hh:mm:ss.mmm`.
#[derive(Args)]
struct LayoutArgs {
    /// Comma separated flag names or a numeric mask
    #[arg(short, long, conflicts_with_all = ["order", "date_sep", "dt_sep", "time_sep", "precision"])]
    flags: Option<String>,
    /// yyyy_mm_dd (ymd) or dd_mm_yyyy (dmy)
    #[arg(long)]
    order: Option<String>,
    /// dash, point or empty
    #[arg(long)]
    date_sep: Option<String>,
    /// T, t, space, underscore or slash
    #[arg(long)]
    dt_sep: Option<String>,
    /// colon, point or empty
    #[arg(long)]
    time_sep: Option<String>,
    /// secs, msecs, usecs or nsecs
    #[arg(short, long)]
    precision: Option<String>,
}

impl LayoutArgs {
    fn resolve(&self) -> Result<Format, Box<dyn std::error::Error>> {
        if let Some(flags) = &self.flags {
            return Ok(Format::from_bits(parse_mask(flags)?)?);
        }
        let d = Format::DEFAULT;
        let format = Format::new(
            opt(&self.order, DateOrder::from_name, d.date_order())?,
            opt(&self.date_sep, DateSep::from_name, d.date_sep())?,
            opt(&self.dt_sep, DateTimeSep::from_name, d.dt_sep())?,
            opt(&self.time_sep, TimeSep::from_name, d.time_sep())?,
            opt(&self.precision, Precision::from_name, d.precision())?,
        )?;
        Ok(format)
    }
}

#[derive(Serialize)]
struct MatrixRow {
    bits:   u32,
    format: Format,
    output: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_new(&cli.log_level).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();

    match cli.command {

        // ── Now ──────────────────────────────────────────────────────────────
        Commands::Now { layout, offset } => {
            let format = layout.resolve()?;
            debug!(offset, %format, "formatting current time");
            println!("{}", dt_str(format, offset));
        }

        // ── Format ───────────────────────────────────────────────────────────
        Commands::Format { timestamp, layout } => {
            let format = layout.resolve()?;
            debug!(timestamp, bits = format.bits(), %format, "formatting");
            println!("{}", to_dt_str(timestamp, format));
        }

        // ── Numeric ──────────────────────────────────────────────────────────
        Commands::Numeric { timestamp, precision, offset } => {
            let precision = Precision::from_name(&precision)?;
            let digits = match timestamp {
                Some(ts) => to_str(ts, precision),
                None     => now_str(precision, offset),
            };
            println!("{digits}");
        }

        // ── Sniff ────────────────────────────────────────────────────────────
        Commands::Sniff { input, json } => {
            let format = decode_str(&input).map_err(|e| {
                warn!(input = %input, error = %e, "rejected");
                e
            })?;
            if json {
                println!("{}", serde_json::to_string_pretty(&format)?);
            } else {
                println!("{:#07x}  {}", format.bits(), format);
            }
        }

        // ── Dump ─────────────────────────────────────────────────────────────
        Commands::Dump { bits, prefix } => {
            let mask = parse_mask(&bits)?;
            if let Err(e) = Format::from_bits(mask) {
                warn!(mask, error = %e, "not a valid layout");
            }
            println!("{}", dump_flags(mask, prefix));
        }

        // ── Matrix ───────────────────────────────────────────────────────────
        Commands::Matrix { timestamp, json } => {
            let dt = CivilDateTime::decompose(timestamp);
            debug!(?dt, "matrix");
            let rows: Vec<MatrixRow> = Format::all()
                .map(|format| MatrixRow {
                    bits:   format.bits(),
                    format,
                    output: to_dt_str(timestamp, format),
                })
                .collect();
            if json {
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                for row in &rows {
                    println!("{:<29}  {:#07x}  {}", row.output, row.bits, row.format);
                }
            }
        }
    }

    Ok(())
}

// ── helpers ──────────────────────────────────────────────────────────────────

/// A mask given as decimal, `0x` hex, or flag names.
fn parse_mask(s: &str) -> Result<u32, Box<dyn std::error::Error>> {
    let s = s.trim();
    if let Some(hex) = s.strip_prefix("0x") {
        return Ok(u32::from_str_radix(hex, 16)?);
    }
    if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) {
        return Ok(s.parse()?);
    }
    Ok(parse_flags(s)?)
}

fn opt<T, E>(value: &Option<String>, parse: fn(&str) -> Result<T, E>, default: T) -> Result<T, E> {
    match value {
        Some(v) => parse(v),
        None    => Ok(default),
    }
}
