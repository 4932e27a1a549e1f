//! Clap command definition and flag parsing.

use clap::{Arg, ArgMatches, Command};

use kvcodec_codec::{ConfigError, StrategyKind, VerifierConfig};

/// Build the CLI command.
pub fn build_cli() -> Command {
    Command::new("kvcodec")
        .about("Round-trip records through codec strategies and a key-value store")
        .arg(
            Arg::new("strategy")
                .long("strategy")
                .short('s')
                .help("Strategy to run: json, portable, compact, or all")
                .default_value("all"),
        )
        .arg(
            Arg::new("prefix")
                .long("prefix")
                .help("Prefix for every storage key")
                .default_value(""),
        )
        .arg(
            Arg::new("keep")
                .long("keep")
                .help("Leave keys in the store after verification")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log every encode, store, and decode step")
                .action(clap::ArgAction::SetTrue),
        )
}

/// Parse a `--strategy` value.
pub fn parse_strategies(value: &str) -> Result<Vec<StrategyKind>, ConfigError> {
    if value.trim().eq_ignore_ascii_case("all") {
        Ok(StrategyKind::ALL.to_vec())
    } else {
        value.parse::<StrategyKind>().map(|kind| vec![kind])
    }
}

/// Build a validated verifier configuration from parsed flags.
pub fn config_from_matches(matches: &ArgMatches) -> Result<VerifierConfig, ConfigError> {
    let strategies = parse_strategies(
        matches
            .get_one::<String>("strategy")
            .map(|s| s.as_str())
            .unwrap_or("all"),
    )?;
    let prefix = matches
        .get_one::<String>("prefix")
        .cloned()
        .unwrap_or_default();

    let config = VerifierConfig::default()
        .with_key_prefix(prefix)
        .with_cleanup(!matches.get_flag("keep"))
        .with_strategies(strategies);
    config.validate()?;
    Ok(config)
}
