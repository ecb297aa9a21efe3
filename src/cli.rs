//! CLI definition and dispatch.

use clap::{Parser, Subcommand, ValueEnum};
use std::fs::File;
use std::io::{self, Write};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::adapters::csv_export::write_chart_csv;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::format::money;
use crate::adapters::svg_chart::render_svg;
use crate::adapters::terminal::ascii_chart::{render_ascii, DEFAULT_HEIGHT};
use crate::adapters::terminal::render::render_lesson;
use crate::adapters::terminal::{run_tour, StdConsole};
use crate::domain::chart::Chart;
use crate::domain::config_validation::{validate_course_config, validate_web_config};
use crate::domain::course::{Course, CourseSettings};
use crate::domain::error::AcademyError;
use crate::domain::risk::{parse_amount, reward_to_risk, CalculatorField, PositionInputs};
use crate::domain::section::Section;
use crate::domain::session::CourseSession;
use crate::domain::timeframe::Timeframe;
use crate::ports::config_port::ConfigPort;

pub const DEFAULT_LISTEN: &str = "127.0.0.1:3000";
pub const DEFAULT_STATIC_DIR: &str = "static";
pub const DEFAULT_SESSION_MINUTES: i64 = 60;

#[derive(Parser, Debug)]
#[command(name = "swingacademy", about = "Interactive swing trading course", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Walk through the course in the terminal
    Tour {
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Section to open first (intro, patterns, risk, timeframes, entries, quiz)
        #[arg(long)]
        start: Option<String>,
    },
    /// Size a position with the fixed-percentage risk rule
    Calc {
        #[arg(long)]
        account: Option<String>,
        /// Percent of the account to risk
        #[arg(long)]
        risk: Option<String>,
        #[arg(long)]
        entry: Option<String>,
        #[arg(long)]
        stop: Option<String>,
        /// Profit target, adds the reward-to-risk ratio
        #[arg(long)]
        target: Option<String>,
        /// Reject degenerate inputs instead of sizing zero shares
        #[arg(long)]
        strict: bool,
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Print a lesson's full content
    Lesson {
        section: String,
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Export a lesson chart
    Chart {
        #[arg(value_enum)]
        kind: ChartKind,
        /// 1-based position in the lesson
        index: usize,
        /// Scenario timeframe (weekly, daily, 4h)
        #[arg(long)]
        timeframe: Option<String>,
        #[arg(long, value_enum, default_value_t = ChartFormat::Ascii)]
        format: ChartFormat,
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Start the web server
    Serve {
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ChartKind {
    Pattern,
    Strategy,
    Scenario,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ChartFormat {
    Ascii,
    Csv,
    Svg,
}

pub fn run(cli: Cli) -> ExitCode {
    let result = match cli.command {
        Command::Tour { config, start } => run_tour_command(config.as_deref(), start.as_deref()),
        Command::Calc {
            account,
            risk,
            entry,
            stop,
            target,
            strict,
            config,
        } => {
            let overrides = CalcOverrides {
                account,
                risk,
                entry,
                stop,
                target,
                strict,
            };
            run_calc(&overrides, config.as_deref())
        }
        Command::Lesson { section, config } => run_lesson(&section, config.as_deref()),
        Command::Chart {
            kind,
            index,
            timeframe,
            format,
            output,
            config,
        } => run_chart(
            kind,
            index,
            timeframe.as_deref(),
            format,
            output.as_deref(),
            config.as_deref(),
        ),
        Command::Serve { config } => run_serve(config.as_deref()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

/// Reads the INI file at `path`; no path means every setting uses its default.
pub fn load_config(path: Option<&Path>) -> Result<FileConfigAdapter, AcademyError> {
    match path {
        Some(path) => {
            tracing::info!(path = %path.display(), "loading config");
            FileConfigAdapter::from_file(path)
        }
        None => Ok(FileConfigAdapter::empty()),
    }
}

pub fn build_settings(config: &dyn ConfigPort) -> Result<CourseSettings, AcademyError> {
    validate_course_config(config)?;

    let defaults = PositionInputs::default();
    let mut calculator = defaults;
    for field in CalculatorField::ALL {
        calculator.set(
            field,
            config.get_double("calculator", field.key(), defaults.get(field)),
        );
    }

    // Already validated above.
    let trend_seed = config
        .get_string("timeframes", "seed")
        .and_then(|raw| raw.trim().parse::<u64>().ok());

    Ok(CourseSettings {
        calculator,
        strict_calculator: config.get_bool("calculator", "strict", false),
        trend_seed,
    })
}

#[derive(Debug, Clone, PartialEq)]
pub struct WebSettings {
    pub listen: SocketAddr,
    pub static_dir: PathBuf,
    /// Idle time after which a browser's course progress is dropped.
    pub session_minutes: i64,
}

pub fn build_web_settings(config: &dyn ConfigPort) -> Result<WebSettings, AcademyError> {
    validate_web_config(config)?;
    let raw = config
        .get_string("web", "listen")
        .unwrap_or_else(|| DEFAULT_LISTEN.to_string());
    let listen = raw.trim().parse().map_err(|_| AcademyError::ConfigInvalid {
        section: "web".into(),
        key: "listen".into(),
        reason: format!("'{raw}' is not a socket address"),
    })?;
    let static_dir = config
        .get_string("web", "static_dir")
        .map(|dir| PathBuf::from(dir.trim()))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR));
    Ok(WebSettings {
        listen,
        static_dir,
        session_minutes: config.get_int("web", "session_minutes", DEFAULT_SESSION_MINUTES),
    })
}

fn load_course(config_path: Option<&Path>) -> Result<Course, AcademyError> {
    let config = load_config(config_path)?;
    Ok(Course::load(build_settings(&config)?))
}

fn run_tour_command(config_path: Option<&Path>, start: Option<&str>) -> Result<(), AcademyError> {
    let course = load_course(config_path)?;
    let start = start.map(str::parse::<Section>).transpose()?;
    let mut session = match start {
        Some(section) => CourseSession::starting_at(&course, section),
        None => CourseSession::new(),
    };
    let mut console = StdConsole::new();
    run_tour(&mut console, &course, &mut session)
}

/// Calculator values given on the command line, as typed.
#[derive(Debug, Clone, Default)]
pub struct CalcOverrides {
    pub account: Option<String>,
    pub risk: Option<String>,
    pub entry: Option<String>,
    pub stop: Option<String>,
    pub target: Option<String>,
    pub strict: bool,
}

impl CalcOverrides {
    /// Applies the typed values on top of `base`.
    pub fn apply(&self, base: PositionInputs) -> Result<PositionInputs, AcademyError> {
        let mut inputs = base;
        let given = [
            (CalculatorField::AccountSize, &self.account),
            (CalculatorField::RiskPercent, &self.risk),
            (CalculatorField::EntryPrice, &self.entry),
            (CalculatorField::StopLoss, &self.stop),
        ];
        for (field, raw) in given {
            if let Some(raw) = raw {
                inputs.set(field, parse_amount(field, raw)?);
            }
        }
        Ok(inputs)
    }

    pub fn target(&self) -> Result<Option<f64>, AcademyError> {
        self.target
            .as_deref()
            .map(|raw| {
                let value: f64 = raw.trim().parse().map_err(|_| {
                    AcademyError::invalid_input("target", format!("'{}' is not a number", raw.trim()))
                })?;
                if value.is_finite() {
                    Ok(value)
                } else {
                    Err(AcademyError::invalid_input("target", "must be a finite number"))
                }
            })
            .transpose()
    }
}

pub fn calc_report(
    inputs: &PositionInputs,
    target: Option<f64>,
    strict: bool,
) -> Result<String, AcademyError> {
    let size = inputs.calculate(strict)?;
    let mut out = String::new();
    out.push_str(&format!("Risk Amount:          {}\n", money(size.risk_amount)));
    out.push_str(&format!("Risk Per Share:       {}\n", money(size.risk_per_share)));
    out.push_str(&format!("Position Size:        {} shares\n", size.shares));
    out.push_str(&format!("Total Position Value: {}\n", money(size.total_value)));
    if let Some(target) = target {
        let ratio = match reward_to_risk(inputs.entry_price, inputs.stop_loss, target) {
            Some(r) => format!("{r:.1}:1"),
            None => "n/a".to_string(),
        };
        out.push_str(&format!("Reward-to-Risk:       {ratio}\n"));
    }
    Ok(out)
}

fn run_calc(overrides: &CalcOverrides, config_path: Option<&Path>) -> Result<(), AcademyError> {
    let config = load_config(config_path)?;
    let settings = build_settings(&config)?;
    let inputs = overrides.apply(settings.calculator)?;
    let report = calc_report(
        &inputs,
        overrides.target()?,
        overrides.strict || settings.strict_calculator,
    )?;
    print!("{report}");
    Ok(())
}

fn run_lesson(section: &str, config_path: Option<&Path>) -> Result<(), AcademyError> {
    let section: Section = section.parse()?;
    let course = load_course(config_path)?;
    print!("{}", render_lesson(&course, section)?);
    Ok(())
}

/// Looks up the chart for a 1-based lesson position.
pub fn resolve_chart(
    course: &Course,
    kind: ChartKind,
    index: usize,
    timeframe: Option<&str>,
) -> Result<Chart, AcademyError> {
    let (name, available) = match kind {
        ChartKind::Pattern => ("pattern", course.patterns().len()),
        ChartKind::Strategy => ("strategy", course.strategies().len()),
        ChartKind::Scenario => ("scenario", course.scenarios().len()),
    };
    let Some(position) = index.checked_sub(1) else {
        return Err(AcademyError::UnknownItem {
            kind: name.to_string(),
            index,
            available,
        });
    };

    match kind {
        ChartKind::Pattern => Ok(course.pattern(position)?.chart(true)),
        ChartKind::Strategy => Ok(course.strategy(position)?.chart()),
        ChartKind::Scenario => {
            let scenario = course.scenario(position)?;
            let timeframe = match timeframe {
                Some(raw) => Timeframe::parse(raw).ok_or_else(|| {
                    AcademyError::invalid_input(
                        "timeframe",
                        format!("'{raw}' is not one of weekly, daily, 4h"),
                    )
                })?,
                None => Timeframe::Weekly,
            };
            scenario
                .chart_for(timeframe)
                .map(|c| c.chart())
                .ok_or_else(|| AcademyError::UnknownItem {
                    kind: format!("{} chart", timeframe.name()),
                    index,
                    available: scenario.charts.len(),
                })
        }
    }
}

pub fn write_chart(chart: &Chart, format: ChartFormat, out: &mut dyn Write) -> Result<(), AcademyError> {
    match format {
        ChartFormat::Ascii => out.write_all(render_ascii(chart, DEFAULT_HEIGHT).as_bytes())?,
        ChartFormat::Svg => {
            out.write_all(render_svg(chart).as_bytes())?;
            out.write_all(b"\n")?;
        }
        ChartFormat::Csv => write_chart_csv(chart, &mut *out)?,
    }
    out.flush()?;
    Ok(())
}

fn run_chart(
    kind: ChartKind,
    index: usize,
    timeframe: Option<&str>,
    format: ChartFormat,
    output: Option<&Path>,
    config_path: Option<&Path>,
) -> Result<(), AcademyError> {
    let course = load_course(config_path)?;
    let chart = resolve_chart(&course, kind, index, timeframe)?;
    match output {
        Some(path) => {
            let mut file = File::create(path)?;
            write_chart(&chart, format, &mut file)?;
            tracing::info!(path = %path.display(), "chart written");
            Ok(())
        }
        None => write_chart(&chart, format, &mut io::stdout().lock()),
    }
}

fn run_serve(config_path: Option<&Path>) -> Result<(), AcademyError> {
    #[cfg(feature = "web")]
    {
        use crate::adapters::web::{serve, AppState};

        let config = load_config(config_path)?;
        let settings = build_settings(&config)?;
        let web = build_web_settings(&config)?;
        let mut state = AppState::new(Course::load(settings), web.static_dir);
        state.session_idle_minutes = web.session_minutes;

        eprintln!("Starting web server on http://{}", web.listen);
        tokio::runtime::Runtime::new()?.block_on(serve(web.listen, state))
    }

    #[cfg(not(feature = "web"))]
    {
        let _ = config_path;
        Err(AcademyError::Io(io::Error::new(
            io::ErrorKind::Unsupported,
            "web feature is required for serve",
        )))
    }
}
