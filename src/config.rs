use anyhow::anyhow;
use clap::{arg, value_parser, Arg, ArgAction, ArgMatches, Command};
use log::LevelFilter;
use rle::config::{Config, FileConfig};
use std::path::PathBuf;

pub enum RunnerConfig {
    Generate {
        encoder_config: Config,
        verbosity: LevelFilter,
    },
    PrintConfig,
}

fn command() -> Command {
    Command::new("logo-rle")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Packs a black-and-white image into a run-length encoded C string literal")
        .args([
            arg!([INPUT] "Input image, any format the image crate decodes")
                .value_parser(value_parser!(PathBuf))
                .required_unless_present("print-config"),
            arg!(-o --output <FILE> "Output file, the input path with the configured extension by default")
                .value_parser(value_parser!(PathBuf)),
            arg!(-c --config <FILE> "Custom config file").value_parser(value_parser!(PathBuf)),
            arg!(--symbol <NAME> "Name of the generated char pointer constant")
                .value_parser(value_parser!(String)),
            arg!(--"no-header" "Don't prepend the auto-generated comment")
                .action(ArgAction::SetTrue),
            arg!(--"print-config" "Print the default config file and exit")
                .action(ArgAction::SetTrue),
            Arg::new("verbosity")
                .short('v')
                .help("Verbosity level: -v for warnings, -vv for info, -vvv for debug, -vvvv for trace")
                .action(ArgAction::Count),
        ])
}

pub fn from_cli() -> anyhow::Result<RunnerConfig> {
    from_matches(&command().get_matches())
}

fn from_matches(matches: &ArgMatches) -> anyhow::Result<RunnerConfig> {
    if matches.get_flag("print-config") {
        return Ok(RunnerConfig::PrintConfig);
    }

    let mut config = FileConfig::new(matches.get_one::<PathBuf>("config").cloned())?;
    if let Some(symbol) = matches.get_one::<String>("symbol") {
        config.output.symbol = symbol.clone();
    }
    if matches.get_flag("no-header") {
        config.output.header = false;
    }

    let input = matches
        .get_one::<PathBuf>("INPUT")
        .ok_or(anyhow!("Input image is required"))?;
    let encoder_config = Config::new(
        input.clone(),
        matches.get_one::<PathBuf>("output").cloned(),
        &config.output,
    )?;

    let verbosity = match matches.get_count("verbosity") {
        0 => LevelFilter::Error,
        1 => LevelFilter::Warn,
        2 => LevelFilter::Info,
        3 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    Ok(RunnerConfig::Generate {
        encoder_config,
        verbosity,
    })
}
