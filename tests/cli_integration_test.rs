//! CLI integration tests.
//!
//! Tests cover:
//! - Config loading from real INI files on disk (load_config, build_settings)
//! - Web settings (build_web_settings)
//! - Calculator overrides and report text
//! - Chart lookup and export in every format
//! - Exit codes from `run`

mod common;

use approx::assert_relative_eq;
use clap::Parser;
use common::*;
use std::path::PathBuf;
use std::process::ExitCode;
use swingacademy::cli::{self, CalcOverrides, ChartFormat, ChartKind, Cli};
use swingacademy::domain::error::AcademyError;
use swingacademy::domain::risk::PositionInputs;

const VALID_INI: &str = r#"
[calculator]
account_size = 25000
risk_percent = 1
entry_price = 20
stop_loss = 19
strict = true

[timeframes]
seed = 7

[web]
listen = 0.0.0.0:8080
static_dir = assets
session_minutes = 15
"#;

fn exit(code: ExitCode) -> String {
    format!("{code:?}")
}

mod config_loading {
    use super::*;

    #[test]
    fn missing_path_gives_defaults() {
        let config = cli::load_config(None).unwrap();
        let settings = cli::build_settings(&config).unwrap();
        assert_eq!(settings.calculator, PositionInputs::default());
        assert!(!settings.strict_calculator);
        assert_eq!(settings.trend_seed, None);
    }

    #[test]
    fn values_come_from_the_file() {
        let file = write_temp_ini(VALID_INI);
        let config = cli::load_config(Some(file.path())).unwrap();
        let settings = cli::build_settings(&config).unwrap();
        assert_relative_eq!(settings.calculator.account_size, 25_000.0);
        assert_relative_eq!(settings.calculator.risk_percent, 1.0);
        assert_relative_eq!(settings.calculator.entry_price, 20.0);
        assert_relative_eq!(settings.calculator.stop_loss, 19.0);
        assert!(settings.strict_calculator);
        assert_eq!(settings.trend_seed, Some(7));
    }

    #[test]
    fn partial_calculator_keeps_other_defaults() {
        let file = write_temp_ini("[calculator]\nentry_price = 75\n");
        let config = cli::load_config(Some(file.path())).unwrap();
        let settings = cli::build_settings(&config).unwrap();
        assert_relative_eq!(settings.calculator.entry_price, 75.0);
        assert_relative_eq!(settings.calculator.account_size, 10_000.0);
    }

    #[test]
    fn missing_file_is_a_parse_error() {
        let path = PathBuf::from("/nonexistent/academy.ini");
        let err = cli::load_config(Some(&path)).unwrap_err();
        assert!(matches!(err, AcademyError::ConfigParse { .. }));
    }

    #[test]
    fn risk_above_five_percent_is_rejected() {
        let file = write_temp_ini("[calculator]\nrisk_percent = 8\n");
        let config = cli::load_config(Some(file.path())).unwrap();
        match cli::build_settings(&config) {
            Err(AcademyError::ConfigInvalid { key, .. }) => assert_eq!(key, "risk_percent"),
            other => panic!("expected ConfigInvalid, got {other:?}"),
        }
    }

    #[test]
    fn negative_seed_is_rejected() {
        let file = write_temp_ini("[timeframes]\nseed = -3\n");
        let config = cli::load_config(Some(file.path())).unwrap();
        assert!(matches!(
            cli::build_settings(&config),
            Err(AcademyError::ConfigInvalid { .. })
        ));
    }

    #[test]
    fn web_settings_from_file() {
        let file = write_temp_ini(VALID_INI);
        let config = cli::load_config(Some(file.path())).unwrap();
        let web = cli::build_web_settings(&config).unwrap();
        assert_eq!(web.listen.to_string(), "0.0.0.0:8080");
        assert_eq!(web.static_dir, PathBuf::from("assets"));
        assert_eq!(web.session_minutes, 15);
    }

    #[test]
    fn web_settings_defaults() {
        let config = cli::load_config(None).unwrap();
        let web = cli::build_web_settings(&config).unwrap();
        assert_eq!(web.listen.to_string(), cli::DEFAULT_LISTEN);
        assert_eq!(web.static_dir, PathBuf::from(cli::DEFAULT_STATIC_DIR));
        assert_eq!(web.session_minutes, cli::DEFAULT_SESSION_MINUTES);
    }

    #[test]
    fn bad_listen_address_is_rejected() {
        let file = write_temp_ini("[web]\nlisten = localhost\n");
        let config = cli::load_config(Some(file.path())).unwrap();
        assert!(matches!(
            cli::build_web_settings(&config),
            Err(AcademyError::ConfigInvalid { .. })
        ));
    }

    #[test]
    fn zero_session_minutes_is_rejected() {
        let file = write_temp_ini("[web]\nsession_minutes = 0\n");
        let config = cli::load_config(Some(file.path())).unwrap();
        assert!(matches!(
            cli::build_web_settings(&config),
            Err(AcademyError::ConfigInvalid { .. })
        ));
    }
}

mod calculator {
    use super::*;

    #[test]
    fn default_inputs_report() {
        let report = cli::calc_report(&PositionInputs::default(), None, false).unwrap();
        assert_eq!(
            report,
            "Risk Amount:          $200.00\n\
             Risk Per Share:       $2.00\n\
             Position Size:        100 shares\n\
             Total Position Value: $5,000.00\n"
        );
    }

    #[test]
    fn target_adds_reward_to_risk() {
        let report = cli::calc_report(&PositionInputs::default(), Some(56.0), false).unwrap();
        assert!(report.ends_with("Reward-to-Risk:       3.0:1\n"));
    }

    #[test]
    fn overrides_apply_on_top_of_config() {
        let overrides = CalcOverrides {
            account: Some("50000".into()),
            stop: Some("49".into()),
            ..CalcOverrides::default()
        };
        let inputs = overrides.apply(PositionInputs::default()).unwrap();
        let report = cli::calc_report(&inputs, None, false).unwrap();
        assert!(report.contains("Risk Amount:          $1,000.00"));
        assert!(report.contains("Position Size:        1000 shares"));
    }

    #[test]
    fn lenient_mode_sizes_zero_shares_when_stop_equals_entry() {
        let inputs = PositionInputs {
            stop_loss: 50.0,
            ..PositionInputs::default()
        };
        let report = cli::calc_report(&inputs, Some(60.0), false).unwrap();
        assert!(report.contains("Position Size:        0 shares"));
        assert!(report.contains("Reward-to-Risk:       n/a"));
    }

    #[test]
    fn strict_mode_rejects_stop_at_entry() {
        let inputs = PositionInputs {
            stop_loss: 50.0,
            ..PositionInputs::default()
        };
        assert!(matches!(
            cli::calc_report(&inputs, None, true),
            Err(AcademyError::InvalidInput { .. })
        ));
    }

    #[test]
    fn non_numeric_override_is_invalid_input() {
        let overrides = CalcOverrides {
            risk: Some("two".into()),
            ..CalcOverrides::default()
        };
        assert!(matches!(
            overrides.apply(PositionInputs::default()),
            Err(AcademyError::InvalidInput { .. })
        ));
    }
}

mod charts {
    use super::*;

    #[test]
    fn pattern_chart_is_revealed() {
        let course = seeded_course(1);
        let chart = cli::resolve_chart(&course, ChartKind::Pattern, 1, None).unwrap();
        assert!(chart.title.contains("Head and Shoulders"));
        assert!(!chart.levels.is_empty());
    }

    #[test]
    fn index_zero_is_unknown() {
        let course = seeded_course(1);
        assert!(matches!(
            cli::resolve_chart(&course, ChartKind::Strategy, 0, None),
            Err(AcademyError::UnknownItem { .. })
        ));
    }

    #[test]
    fn index_past_the_end_is_unknown() {
        let course = seeded_course(1);
        match cli::resolve_chart(&course, ChartKind::Scenario, 4, None) {
            Err(AcademyError::UnknownItem {
                index, available, ..
            }) => {
                assert_eq!(index, 4);
                assert_eq!(available, 3);
            }
            other => panic!("expected UnknownItem, got {other:?}"),
        }
    }

    #[test]
    fn scenario_timeframes_differ() {
        let course = seeded_course(3);
        let weekly = cli::resolve_chart(&course, ChartKind::Scenario, 1, None).unwrap();
        let hourly = cli::resolve_chart(&course, ChartKind::Scenario, 1, Some("4h")).unwrap();
        assert_ne!(weekly.prices, hourly.prices);
    }

    #[test]
    fn unknown_timeframe_is_invalid_input() {
        let course = seeded_course(3);
        assert!(matches!(
            cli::resolve_chart(&course, ChartKind::Scenario, 1, Some("monthly")),
            Err(AcademyError::InvalidInput { .. })
        ));
    }

    #[test]
    fn csv_export_to_file() {
        let course = seeded_course(5);
        let chart = cli::resolve_chart(&course, ChartKind::Strategy, 2, None).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("breakout.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        cli::write_chart(&chart, ChartFormat::Csv, &mut file).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("x,price"));
        assert_eq!(lines.count(), chart.prices.len());
    }

    #[test]
    fn svg_and_ascii_exports() {
        let course = seeded_course(5);
        let chart = cli::resolve_chart(&course, ChartKind::Pattern, 2, None).unwrap();

        let mut svg = Vec::new();
        cli::write_chart(&chart, ChartFormat::Svg, &mut svg).unwrap();
        let svg = String::from_utf8(svg).unwrap();
        assert!(svg.starts_with("<svg"));

        let mut ascii = Vec::new();
        cli::write_chart(&chart, ChartFormat::Ascii, &mut ascii).unwrap();
        let ascii = String::from_utf8(ascii).unwrap();
        assert!(ascii.starts_with(&chart.title));
    }
}

mod exit_codes {
    use super::*;

    fn run(args: &[&str]) -> String {
        let mut argv = vec!["swingacademy"];
        argv.extend_from_slice(args);
        exit(cli::run(Cli::try_parse_from(argv).unwrap()))
    }

    #[test]
    fn calc_succeeds_with_defaults() {
        assert_eq!(run(&["calc"]), exit(ExitCode::SUCCESS));
    }

    #[test]
    fn calc_with_bad_number_exits_3() {
        assert_eq!(run(&["calc", "--entry", "abc"]), exit(ExitCode::from(3)));
    }

    #[test]
    fn strict_calc_with_bad_geometry_exits_3() {
        assert_eq!(
            run(&["calc", "--entry", "50", "--stop", "50", "--strict"]),
            exit(ExitCode::from(3))
        );
    }

    #[test]
    fn unknown_lesson_exits_4() {
        assert_eq!(run(&["lesson", "charts"]), exit(ExitCode::from(4)));
    }

    #[test]
    fn lesson_prints_successfully() {
        assert_eq!(run(&["lesson", "quiz"]), exit(ExitCode::SUCCESS));
    }

    #[test]
    fn invalid_config_exits_2() {
        let file = write_temp_ini("[calculator]\nrisk_percent = 0\n");
        let path = file.path().to_str().unwrap().to_string();
        assert_eq!(run(&["calc", "--config", &path]), exit(ExitCode::from(2)));
    }

    #[test]
    fn chart_written_to_output_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pattern.svg");
        let out = path.to_str().unwrap().to_string();
        assert_eq!(
            run(&["chart", "pattern", "1", "--format", "svg", "--output", &out]),
            exit(ExitCode::SUCCESS)
        );
        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("neckline"));
    }

    #[test]
    fn chart_to_unwritable_path_exits_1() {
        assert_eq!(
            run(&["chart", "strategy", "1", "--output", "/nonexistent/dir/out.txt"]),
            exit(ExitCode::from(1))
        );
    }
}
