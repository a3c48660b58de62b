use clap::Parser;
use rstest::rstest;

use streamlab::cli::args::{Cli, Commands, ConfigCommands};
use streamlab::cli::commands::apply_run_overrides;
use streamlab::config::Settings;
use streamlab::util::testing;

#[ctor::ctor]
fn init() {
    testing::init_test_setup();
}

#[rstest]
fn given_run_with_names_when_parsed_then_names_kept_in_order() {
    let cli = Cli::try_parse_from(["streamlab", "run", "filter", "distinct"]).unwrap();
    match cli.command {
        Some(Commands::Run { names, all, .. }) => {
            assert_eq!(names, vec!["filter", "distinct"]);
            assert!(!all);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[rstest]
fn given_run_all_with_names_when_parsed_then_conflict() {
    assert!(Cli::try_parse_from(["streamlab", "run", "--all", "filter"]).is_err());
}

#[rstest]
fn given_run_without_names_when_parsed_then_error() {
    assert!(Cli::try_parse_from(["streamlab", "run"]).is_err());
}

#[rstest]
fn given_global_flags_when_parsed_then_available_on_subcommand() {
    let cli = Cli::try_parse_from(["streamlab", "config", "show", "-dd", "--config", "x.toml"])
        .unwrap();
    assert_eq!(cli.debug, 2);
    assert_eq!(cli.config.as_deref(), Some(std::path::Path::new("x.toml")));
    assert!(matches!(
        cli.command,
        Some(Commands::Config {
            command: ConfigCommands::Show
        })
    ));
}

#[rstest]
fn given_run_flags_when_applied_then_override_settings() {
    let settings = apply_run_overrides(Settings::default(), Some(r"\n"), true);
    assert_eq!(settings.separator, "\n");
    assert!(!settings.parallel);
}

#[rstest]
fn given_no_run_flags_when_applied_then_settings_unchanged() {
    let settings = apply_run_overrides(Settings::default(), None, false);
    assert_eq!(settings, Settings::default());
}
