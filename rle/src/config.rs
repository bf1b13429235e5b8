pub mod defaults;
mod file_config;

pub use file_config::{default_config, FileConfig, OutputConfig};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Everything a single generation needs, resolved from the CLI and the config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub input: PathBuf,
    pub output: PathBuf,
    pub symbol: String,
    pub header: bool,
}

impl Config {
    pub fn new(
        input: PathBuf,
        output: Option<PathBuf>,
        output_config: &OutputConfig,
    ) -> anyhow::Result<Self> {
        if !is_c_identifier(&output_config.symbol) {
            anyhow::bail!("Invalid C identifier \"{}\"", output_config.symbol);
        }
        let output = match output {
            Some(output) => output,
            None => output_path(&input, &output_config.extension)?,
        };
        if is_same_file(&input, &output) {
            anyhow::bail!(
                "Output path {} would overwrite the input image",
                output.display()
            );
        }

        Ok(Self {
            input,
            output,
            symbol: output_config.symbol.clone(),
            header: output_config.header,
        })
    }
}

/// Replaces the extension of the input path, or appends one if it has none.
pub fn output_path(input: &Path, extension: &str) -> anyhow::Result<PathBuf> {
    let extension = extension.trim_start_matches('.');
    if extension.is_empty() {
        anyhow::bail!("Output extension is empty");
    }

    Ok(input.with_extension(extension))
}

/// Paths naming the same existing file through different spellings
/// (`assets/../logo.png`, symlinks) are the same file too.
fn is_same_file(input: &Path, output: &Path) -> bool {
    if input == output {
        return true;
    }
    match (fs::canonicalize(input), fs::canonicalize(output)) {
        (Ok(input), Ok(output)) => input == output,
        _ => false,
    }
}

pub fn is_c_identifier(symbol: &str) -> bool {
    let mut chars = symbol.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}
