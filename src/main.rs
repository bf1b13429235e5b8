#[macro_use]
extern crate log;

mod config;

use config::RunnerConfig;
use fern::colors::{Color, ColoredLevelConfig};
use log::LevelFilter;

fn setup_logger(verbosity: LevelFilter) -> Result<(), fern::InitError> {
    let colors = ColoredLevelConfig::new()
        .info(Color::Green)
        .debug(Color::Blue)
        .trace(Color::Cyan);
    fern::Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "[{} {} {}]: {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                colors.color(record.level()),
                record.module_path().unwrap_or("<unknown>"),
                message
            ));
        })
        .level(log::LevelFilter::Error)
        .level_for("logo_rle", verbosity)
        .level_for("rle", verbosity)
        .chain(std::io::stderr())
        .apply()?;

    Ok(())
}

fn main() -> anyhow::Result<()> {
    let (encoder_config, verbosity) = match config::from_cli()? {
        RunnerConfig::PrintConfig => {
            print!("{}", rle::config::default_config());
            return Ok(());
        }
        RunnerConfig::Generate {
            encoder_config,
            verbosity,
        } => (encoder_config, verbosity),
    };
    setup_logger(verbosity)?;

    debug!(
        "Generating {} from {}",
        encoder_config.output.display(),
        encoder_config.input.display()
    );
    rle::make_c_image(&encoder_config)
}
