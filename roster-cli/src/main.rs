mod cli;
mod commands;

use anyhow::{Context, Result};
use clap::Parser;
use roster_core::config::{Format, RosterConfig};
use roster_core::logging::init_logging;
use roster_core::roster::Roster;

use cli::CommandLine;

fn main() -> Result<()> {
    let args = CommandLine::parse();
    init_logging(&args.log_level, args.log_dir.as_deref())?;

    let config = build_config(&args)?;
    let mut roster = Roster::open(&config)
        .with_context(|| format!("Unable to open roster at {}", config.data_file.display()))?;

    let mut stdout = std::io::stdout().lock();
    commands::run(&mut roster, args.command, &mut stdout)
}

/// Flags over environment over defaults
fn build_config(args: &CommandLine) -> Result<RosterConfig> {
    Ok(apply_flags(RosterConfig::from_env()?, args))
}

fn apply_flags(mut config: RosterConfig, args: &CommandLine) -> RosterConfig {
    if let Some(path) = &args.data_file {
        config.data_file = path.clone();
    }
    if let Some(format) = args.format {
        config.format = format;
    }
    if args.compact {
        config.pretty = false;
    }
    if args.recover_corrupt {
        config.recover_corrupt = true;
    }
    if config.format == Format::Bincode && args.compact {
        tracing::warn!("--compact only applies to the json format");
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster_core::prelude::{CourseFilter, StudentRecord};
    use tempfile::TempDir;

    fn parse(args: &[&str]) -> CommandLine {
        CommandLine::try_parse_from(args).unwrap()
    }

    #[test]
    fn flags_override_environment() {
        let dir = TempDir::new().unwrap();
        let flag_path = dir.path().join("flag.bin");
        let env = RosterConfig::from_lookup(|key| match key {
            "ROSTER_DATA_FILE" => Some(dir.path().join("env.json").display().to_string()),
            "ROSTER_RECOVER_CORRUPT" => Some("false".into()),
            _ => None,
        })
        .unwrap();

        let flag_str = flag_path.display().to_string();
        let args = parse(&[
            "roster", "courses", "--data-file", flag_str.as_str(), "--format", "bincode", "--recover-corrupt",
        ]);
        let config = apply_flags(env.clone(), &args);
        assert_eq!(config.data_file, flag_path);
        assert_eq!(config.format, Format::Bincode);
        assert!(config.recover_corrupt);
        assert!(config.pretty);

        // no flags keeps the environment values
        let config = apply_flags(env.clone(), &parse(&["roster", "courses"]));
        assert_eq!(config, env);
    }

    #[test]
    fn commands_persist_to_configured_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("students.json");
        let path_str = path.display().to_string();

        for argv in [
            vec!["roster", "add", "--id", "1", "--name", "Amy", "--age", "20", "--course", "Math"],
            vec!["roster", "add", "--id", "2", "--name", "Bo", "--age", "21", "--course", "CS"],
            vec!["roster", "delete", "1"],
        ] {
            let mut argv = argv;
            argv.extend(["--data-file", path_str.as_str(), "--compact"]);
            let args = parse(&argv);
            let config = apply_flags(RosterConfig::default(), &args);
            let mut roster = Roster::open(&config).unwrap();
            commands::run(&mut roster, args.command, &mut Vec::new()).unwrap();
        }

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 1);

        let roster = Roster::open(&RosterConfig::new(&path)).unwrap();
        let view = roster.view("", &CourseFilter::All);
        assert_eq!(view.rows, vec![StudentRecord::new("2", "Bo", "21", "CS")]);
    }
}
