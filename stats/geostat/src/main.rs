use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use geostat_pvalue::{Decision, PValueEngine, PValueError, PValueQuery, PValueResult, Rejection};
use geostat_tables::{TableError, Tails};
use log::LevelFilter;
use serde::Serialize;

mod config;

use config::Settings;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputMode {
    Text,
    Json,
}

#[derive(Debug, Parser)]
#[command(
    name = "geostat",
    version,
    about = "Look up p-values and critical values in textbook distribution tables",
    long_about = "geostat converts a test statistic into a p-value using the normal,\n\
        Student's t and chi-square tables, the same way you would by hand.\n\
        Values are matched to the nearest tabulated entry; nothing is interpolated.\n\n\
        EXAMPLES:\n\
        \n  geostat pvalue 1.45 -n 85                    Normal table, one-tailed\n\
        \n  geostat pvalue -1.245 -n 11 --min-n 10       Wilcoxon signed-rank threshold\n\
        \n  geostat pvalue 3.96 -n 5 --chi-square        Goodness-of-fit over 5 categories\n\
        \n  geostat critical --alpha 0.05 -n 10 -r 2     Two-tailed critical t\n\
        \n  geostat lookup t 2.96 --df 10                Area between the mean and t",
    after_help = "Tables are read from --tables DIR or GEOSTAT_TABLE_DIR when set, \
        otherwise the built-in tables are used."
)]
struct Cli {
    /// Increase verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Directory containing the table CSV files
    #[arg(long, value_name = "DIR", global = true)]
    tables: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// P-value for a test statistic
    Pvalue(PValueArgs),

    /// Critical value for a significance level
    Critical(CriticalArgs),

    /// Compare a statistic with its critical value
    Decide(DecideArgs),

    /// Query a single table directly
    #[command(subcommand)]
    Lookup(LookupCommand),
}

#[derive(Debug, Args, Clone)]
struct QueryArgs {
    /// Sample size, or number of categories with --chi-square
    #[arg(short = 'n', long = "sample-size", value_name = "N")]
    n: u32,

    /// Rejection region: 2 two-tailed, 1 positive tail, -1 negative tail
    #[arg(short, long, default_value_t = 1, allow_negative_numbers = true)]
    rejection: i32,

    /// Use the normal table from this sample size on
    #[arg(long, value_name = "N")]
    min_n: Option<u32>,

    /// Use the chi-square table (df = N - 1)
    #[arg(long)]
    chi_square: bool,
}

#[derive(Debug, Args, Clone)]
struct PValueArgs {
    /// The test statistic
    #[arg(allow_negative_numbers = true)]
    statistic: f64,

    #[command(flatten)]
    query: QueryArgs,
}

#[derive(Debug, Args, Clone)]
struct CriticalArgs {
    /// Significance level
    #[arg(short, long, default_value_t = 0.05)]
    alpha: f64,

    #[command(flatten)]
    query: QueryArgs,
}

#[derive(Debug, Args, Clone)]
struct DecideArgs {
    /// The test statistic
    #[arg(allow_negative_numbers = true)]
    statistic: f64,

    /// Significance level
    #[arg(short, long, default_value_t = 0.05)]
    alpha: f64,

    #[command(flatten)]
    query: QueryArgs,
}

#[derive(Debug, Subcommand, Clone)]
enum LookupCommand {
    /// Area between the mean and z
    Normal {
        #[arg(allow_negative_numbers = true)]
        z: f64,
        #[arg(long, default_value_t = 1)]
        tails: u32,
    },
    /// Z-score for an area
    Z {
        probability: f64,
        #[arg(long, default_value_t = 1)]
        tails: u32,
    },
    /// One-tailed area between the mean and t
    T {
        #[arg(allow_negative_numbers = true)]
        t: f64,
        #[arg(long)]
        df: u32,
        #[arg(long, default_value_t = 1)]
        tails: u32,
    },
    /// Critical t for a confidence level
    TCritical {
        #[arg(long)]
        df: u32,
        #[arg(long, default_value_t = 0.95)]
        confidence: f64,
        #[arg(long, default_value_t = 2)]
        tails: u32,
    },
    /// Area to the left of a chi-square statistic
    Chi2 {
        chi2: f64,
        #[arg(long)]
        df: u32,
    },
    /// Critical chi-square for a confidence level
    Chi2Critical {
        #[arg(long)]
        df: u32,
        #[arg(long, default_value_t = 0.95)]
        confidence: f64,
    },
}

#[derive(Debug, Serialize)]
struct PValueReport {
    query: PValueQuery,
    #[serde(flatten)]
    result: PValueResult,
}

#[derive(Debug, Serialize)]
struct CriticalReport {
    query: PValueQuery,
    alpha: f64,
    critical_value: f64,
}

#[derive(Debug, Serialize)]
struct LookupReport {
    table: &'static str,
    input: f64,
    value: f64,
}

impl QueryArgs {
    fn to_query(&self, statistic: f64) -> Result<PValueQuery, PValueError> {
        let rejection = Rejection::try_from(self.rejection)?;
        let mut query = if self.chi_square {
            let mut query = PValueQuery::chi_square(statistic, self.n);
            query.rejection = rejection;
            query
        } else {
            PValueQuery::new(statistic, self.n, rejection)
        };
        if let Some(min_n) = self.min_n {
            query = query.with_min_n(min_n);
        }
        Ok(query)
    }
}

fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .try_init();
}

fn emit<T: Serialize>(mode: OutputMode, report: &T, text: String) -> Result<(), Failure> {
    match mode {
        OutputMode::Json => {
            let json = serde_json::to_string_pretty(report)
                .map_err(|e| Failure::Output(format!("cannot encode result as JSON: {e}")))?;
            println!("{json}");
        }
        OutputMode::Text => println!("{text}"),
    }
    Ok(())
}

fn run_pvalue(engine: &PValueEngine, args: &PValueArgs, mode: OutputMode) -> Result<(), Failure> {
    let query = args.query.to_query(args.statistic)?;
    let result = engine.evaluate(&query)?;
    let text = format!("area = {}\np-value = {}", result.area, result.pvalue);
    emit(mode, &PValueReport { query, result }, text)
}

fn run_critical(
    engine: &PValueEngine,
    args: &CriticalArgs,
    mode: OutputMode,
) -> Result<(), Failure> {
    let query = args.query.to_query(0.0)?;
    let critical_value = engine.critical_value(&query, args.alpha)?;
    let text = format!("critical value = {critical_value}");
    let report = CriticalReport {
        query,
        alpha: args.alpha,
        critical_value,
    };
    emit(mode, &report, text)
}

fn run_decide(engine: &PValueEngine, args: &DecideArgs, mode: OutputMode) -> Result<(), Failure> {
    let query = args.query.to_query(args.statistic)?;
    let decision: Decision = engine.decide(&query, args.alpha)?;
    let verdict = if decision.reject_null {
        "reject the null hypothesis"
    } else {
        "do not reject the null hypothesis"
    };
    let text = format!(
        "|statistic| = {}, critical value = {}: {verdict}",
        decision.test_statistic, decision.critical_value
    );
    emit(mode, &decision, text)
}

fn run_lookup(
    engine: &PValueEngine,
    cmd: &LookupCommand,
    mode: OutputMode,
) -> Result<(), Failure> {
    let catalog = engine.catalog();
    let (table, input, value) = match *cmd {
        LookupCommand::Normal { z, tails } => (
            "normal",
            z,
            catalog
                .normal()?
                .probability_for_score_tails(z, Tails::try_from(tails)?)?,
        ),
        LookupCommand::Z { probability, tails } => (
            "normal",
            probability,
            catalog
                .normal()?
                .score_for_probability(probability, Tails::try_from(tails)?)?,
        ),
        LookupCommand::T { t, df, tails } => (
            "student_t",
            t,
            catalog
                .student_t(Tails::try_from(tails)?)?
                .confidence_for_statistic(t, df)?,
        ),
        LookupCommand::TCritical {
            df,
            confidence,
            tails,
        } => (
            "student_t",
            confidence,
            catalog
                .student_t(Tails::try_from(tails)?)?
                .statistic_for_confidence(df, confidence)?,
        ),
        LookupCommand::Chi2 { chi2, df } => (
            "chi_square",
            chi2,
            catalog.chi_square()?.confidence_for_statistic(chi2, df)?,
        ),
        LookupCommand::Chi2Critical { df, confidence } => (
            "chi_square",
            confidence,
            catalog.chi_square()?.statistic_for_confidence(df, confidence)?,
        ),
    };
    let report = LookupReport {
        table,
        input,
        value,
    };
    emit(mode, &report, value.to_string())
}

/// Why a command failed, and so which exit code it gets.
#[derive(Debug)]
enum Failure {
    Lookup(String),
    Usage(String),
    Output(String),
}

impl Failure {
    fn exit_code(&self) -> i32 {
        match self {
            Failure::Lookup(_) | Failure::Output(_) => 1,
            Failure::Usage(_) => 2,
        }
    }

    fn message(&self) -> &str {
        match self {
            Failure::Lookup(msg) | Failure::Usage(msg) | Failure::Output(msg) => msg,
        }
    }
}

impl From<PValueError> for Failure {
    fn from(err: PValueError) -> Self {
        match err {
            PValueError::InvalidArgument(msg) => Failure::Usage(msg),
            PValueError::Table(TableError::InvalidArgument(msg)) => Failure::Usage(msg),
            other => Failure::Lookup(other.to_string()),
        }
    }
}

impl From<TableError> for Failure {
    fn from(err: TableError) -> Self {
        PValueError::from(err).into()
    }
}

fn run_cli() -> i32 {
    let cli = Cli::parse();
    init_logger(cli.verbose);
    let mode = if cli.json {
        OutputMode::Json
    } else {
        OutputMode::Text
    };

    let settings = match Settings::from_env(cli.tables.clone()) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return 2;
        }
    };
    let engine = settings.engine();

    let outcome = match &cli.command {
        Command::Pvalue(args) => run_pvalue(&engine, args, mode),
        Command::Critical(args) => run_critical(&engine, args, mode),
        Command::Decide(args) => run_decide(&engine, args, mode),
        Command::Lookup(cmd) => run_lookup(&engine, cmd, mode),
    };

    match outcome {
        Ok(()) => 0,
        Err(failure) => {
            eprintln!("error: {}", failure.message());
            failure.exit_code()
        }
    }
}

fn main() {
    std::process::exit(run_cli());
}
