use crate::{codes::compress, config::Config, literal::c_string};
use anyhow::Context;
use chrono::{DateTime, Local};
use std::{
    ffi::OsStr,
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};
use tempfile::{Builder, NamedTempFile};

/// Comment block marking the fragment as generated.
pub struct Header<'a> {
    pub source: &'a Path,
    pub generated_at: DateTime<Local>,
}

impl Header<'_> {
    fn render(&self) -> String {
        let source = self
            .source
            .file_name()
            .unwrap_or(OsStr::new("an image"))
            .to_string_lossy();
        format!(
            "// Auto-generated by logo-rle from {source}, do not edit by hand.\n\
             // Generated on {}.\n\
             // Regenerate it from the source image instead.\n",
            self.generated_at.format("%Y-%m-%d %H:%M:%S"),
        )
    }
}

pub fn render(symbol: &str, literal: &str, header: Option<&Header>) -> String {
    let mut source = header.map(Header::render).unwrap_or_default();
    source.push_str(&format!("char * {symbol} = {literal};\n"));

    source
}

/// Decodes `config.input` and writes its RLE literal as C source to `config.output`.
pub fn make_c_image(config: &Config) -> anyhow::Result<()> {
    let literal = {
        let image = image::open(&config.input)
            .with_context(|| format!("Failed to decode image {}", config.input.display()))?;
        debug!(
            "Decoded {} ({}x{}, {:?})",
            config.input.display(),
            image.width(),
            image.height(),
            image.color()
        );
        let codes = compress(&image);
        info!(
            "Encoded {} into {} bytes",
            config.input.display(),
            codes.len()
        );

        c_string(codes)
    };

    let header = config.header.then(|| Header {
        source: &config.input,
        generated_at: Local::now(),
    });
    let source = render(&config.symbol, &literal, header.as_ref());

    write_atomically(&config.output, &source)?;
    info!("Wrote {} to {}", config.symbol, config.output.display());

    Ok(())
}

fn write_atomically(path: &Path, content: &str) -> anyhow::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };

    let mut file = temp_file_in(&dir)
        .with_context(|| format!("Failed to create output file in {}", dir.display()))?;
    trace!("Writing into temporary {}", file.path().display());
    file.write_all(content.as_bytes())
        .and_then(|()| file.as_file().sync_all())
        .with_context(|| format!("Failed to write {}", path.display()))?;
    if let Ok(metadata) = fs::metadata(path) {
        file.as_file()
            .set_permissions(metadata.permissions())
            .with_context(|| format!("Failed to keep permissions of {}", path.display()))?;
    }
    file.persist(path)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    Ok(())
}

/// Temporary files are owner-only by default, the output gets the mode
/// of a plain create instead (still subject to the umask).
fn temp_file_in(dir: &Path) -> io::Result<NamedTempFile> {
    let mut builder = Builder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(fs::Permissions::from_mode(0o666));
    }
    builder.tempfile_in(dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, OutputConfig};
    use chrono::TimeZone;
    use image::{Rgb, RgbImage};
    use rstest::rstest;
    use std::fs;
    use tempfile::{tempdir, TempDir};

    fn fixed_time() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap()
    }

    fn black_then_white(dir: &TempDir) -> PathBuf {
        let path = dir.path().join("logo.png");
        RgbImage::from_fn(2, 1, |x, _| {
            if x == 0 {
                Rgb([0, 0, 0])
            } else {
                Rgb([255, 255, 255])
            }
        })
        .save(&path)
        .unwrap();
        path
    }

    fn config(input: PathBuf, header: bool) -> Config {
        let output_config = OutputConfig {
            header,
            ..OutputConfig::default()
        };
        Config::new(input, None, &output_config).unwrap()
    }

    #[rstest]
    fn bare_fragment() {
        assert_eq!(
            "char * LOGO_RLE = \"\\x81\\x01\";\n",
            render("LOGO_RLE", r#""\x81\x01""#, None)
        );
    }

    #[rstest]
    fn fragment_with_header() {
        let header = Header {
            source: Path::new("logo/f6kgl-f5kff.png"),
            generated_at: fixed_time(),
        };

        assert_eq!(
            "// Auto-generated by logo-rle from f6kgl-f5kff.png, do not edit by hand.\n\
             // Generated on 2024-03-09 14:05:07.\n\
             // Regenerate it from the source image instead.\n\
             char * SPLASH = \"\";\n",
            render("SPLASH", r#""""#, Some(&header))
        );
    }

    #[rstest]
    fn writes_bare_source() {
        let dir = tempdir().unwrap();
        let config = config(black_then_white(&dir), false);

        make_c_image(&config).unwrap();

        assert_eq!(dir.path().join("logo.c"), config.output);
        assert_eq!(
            "char * LOGO_RLE = \"\\x81\\x01\";\n",
            fs::read_to_string(&config.output).unwrap()
        );
    }

    #[rstest]
    fn writes_header() {
        let dir = tempdir().unwrap();
        let config = config(black_then_white(&dir), true);

        make_c_image(&config).unwrap();

        let source = fs::read_to_string(&config.output).unwrap();
        let lines: Vec<&str> = source.lines().collect();
        assert_eq!(4, lines.len());
        assert!(lines[..3].iter().all(|line| line.starts_with("// ")));
        assert!(lines[0].contains("logo.png"));
        assert_eq!("char * LOGO_RLE = \"\\x81\\x01\";", lines[3]);
    }

    #[rstest]
    fn replaces_existing_output() {
        let dir = tempdir().unwrap();
        let config = config(black_then_white(&dir), false);
        fs::write(&config.output, "stale").unwrap();

        make_c_image(&config).unwrap();

        assert_eq!(
            "char * LOGO_RLE = \"\\x81\\x01\";\n",
            fs::read_to_string(&config.output).unwrap()
        );
    }

    #[cfg(unix)]
    #[rstest]
    fn output_mode_matches_plain_create() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let config = config(black_then_white(&dir), false);
        let reference = dir.path().join("reference.c");
        fs::write(&reference, "").unwrap();

        make_c_image(&config).unwrap();

        let mode = |path: &Path| fs::metadata(path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode(&reference), mode(&config.output));
    }

    #[cfg(unix)]
    #[rstest]
    fn keeps_mode_of_existing_output() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let config = config(black_then_white(&dir), false);
        fs::write(&config.output, "stale").unwrap();
        fs::set_permissions(&config.output, fs::Permissions::from_mode(0o640)).unwrap();

        make_c_image(&config).unwrap();

        let mode = fs::metadata(&config.output).unwrap().permissions().mode() & 0o777;
        assert_eq!(0o640, mode);
    }

    #[rstest]
    fn missing_input() {
        let dir = tempdir().unwrap();
        let config = config(dir.path().join("missing.png"), true);

        let result = make_c_image(&config);

        assert!(result
            .unwrap_err()
            .to_string()
            .starts_with("Failed to decode image"));
        assert!(!config.output.exists());
    }

    #[rstest]
    fn undecodable_input_keeps_previous_output() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("logo.png");
        fs::write(&input, "not an image").unwrap();
        let config = config(input, true);
        fs::write(&config.output, "previous").unwrap();

        assert!(make_c_image(&config).is_err());
        assert_eq!("previous", fs::read_to_string(&config.output).unwrap());
    }

    #[rstest]
    fn missing_output_directory() {
        let dir = tempdir().unwrap();
        let input = black_then_white(&dir);
        let config = Config::new(
            input,
            Some(dir.path().join("missing").join("logo.c")),
            &OutputConfig::default(),
        )
        .unwrap();

        let result = make_c_image(&config);

        assert!(result
            .unwrap_err()
            .to_string()
            .starts_with("Failed to create output file in"));
        assert_eq!(1, fs::read_dir(dir.path()).unwrap().count());
    }
}
