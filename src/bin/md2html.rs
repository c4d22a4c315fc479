//! CLI binary for readme2html.
//!
//! A thin shim over the library crate that maps CLI flags and the document's
//! sidecar to `ConversionConfig` and prints the HTML.

use anyhow::{Context, Result};
use clap::Parser;
use readme2html::{
    convert_document, load_sidecar, sidecar_path_for, ConversionConfig, ConversionConfigBuilder,
    Document, ErrorKind, ImageMapping, Md2HtmlError,
};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Convert README.md in the current directory (stdout)
  md2html

  # Convert to file
  md2html docs/README.md -o README.html

  # Configure images on the command line
  md2html --base-path https://blog.example.com/files/2018/09 \
          --image structured-test-run=250x223:56176 README.md

  # JSON output with statistics
  md2html --json README.md > readme.json

SIDECAR FILE:
  README.md is configured by README.yaml next to it, when present:

    base-bath: https://blog.example.com/files/2018/09
    structured-test-run: 250x223:56176
    grouped-test-run: 250x270:56175

  The `base-bath` key is spelled exactly like that. Blank lines are allowed;
  any other line must have one of the two shapes above. Command-line flags
  override sidecar entries. A file named with --mapping must exist.

EXIT STATUS:
  0  success
  1  other failure (stdout closed, …)
  2  invalid command-line arguments
  3  malformed Markdown (unterminated ``` block)
  4  image referenced without a mapping
  5  unparseable sidecar line
  6  invalid configuration (no base path, bad WxH or id, duplicate name)
  7  file could not be read or written

ENVIRONMENT VARIABLES:
  MD2HTML_BASE_PATH       Base path for image links
  MD2HTML_OUTPUT          Output file
  RUST_LOG                Log filter (overrides -v / -q)
"#;

/// Convert README-style Markdown to blog-ready HTML.
#[derive(Parser, Debug)]
#[command(
    name = "md2html",
    version,
    about = "Convert README-style Markdown to blog-ready HTML",
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Markdown file to convert.
    #[arg(default_value = "README.md")]
    input: PathBuf,

    /// Write HTML to this file instead of stdout.
    #[arg(short, long, env = "MD2HTML_OUTPUT")]
    output: Option<PathBuf>,

    /// URL prefix under which the images are hosted.
    #[arg(long, env = "MD2HTML_BASE_PATH")]
    base_path: Option<String>,

    /// Image mapping NAME=WxH:ID (repeatable).
    #[arg(long = "image", value_name = "NAME=WxH:ID", value_parser = parse_image)]
    images: Vec<ImageMapping>,

    /// Sidecar file to read instead of the one next to INPUT.
    #[arg(long, conflicts_with = "no_sidecar")]
    mapping: Option<PathBuf>,

    /// Do not load any sidecar file.
    #[arg(long)]
    no_sidecar: bool,

    /// Output structured JSON (ConversionOutput) instead of HTML.
    #[arg(long)]
    json: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long)]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:?}");
            ExitCode::from(exit_code(&err))
        }
    }
}

/// Exit status for a failed run, by the library error kind in the chain.
/// 2 is left to clap for usage errors.
fn exit_code(err: &anyhow::Error) -> u8 {
    let kind = err
        .chain()
        .find_map(|e| e.downcast_ref::<Md2HtmlError>())
        .map(Md2HtmlError::kind);
    match kind {
        Some(ErrorKind::MalformedInput) => 3,
        Some(ErrorKind::MissingImageMapping) => 4,
        Some(ErrorKind::ConfigParse) => 5,
        Some(ErrorKind::Config) => 6,
        Some(ErrorKind::Io) => 7,
        None => 1,
    }
}

fn run(cli: &Cli) -> Result<()> {
    // ── Build config ─────────────────────────────────────────────────────
    let document = Document::open(&cli.input)
        .with_context(|| format!("Failed to read {}", cli.input.display()))?;
    let config = build_config(cli)?.build().context("Invalid configuration")?;
    debug!(?config, "Resolved configuration");

    // ── Run conversion ───────────────────────────────────────────────────
    let output = convert_document(&document, &config).context("Conversion failed")?;

    if let Some(ref output_path) = cli.output {
        std::fs::write(output_path, output.html.as_bytes())
            .with_context(|| format!("Failed to write {}", output_path.display()))?;

        if cli.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&output.stats)
                    .context("Failed to serialise stats")?
            );
        } else if !cli.quiet {
            eprintln!(
                "{}  {} prose / {} code segments, {} images  {}ms  →  {}",
                green("✔"),
                output.stats.prose_segments,
                output.stats.code_segments,
                output.stats.images,
                dim(&output.stats.duration_ms.to_string()),
                bold(&output_path.display().to_string()),
            );
        }
    } else if cli.json {
        let json = serde_json::to_string_pretty(&output).context("Failed to serialise output")?;
        println!("{json}");
    } else {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        handle
            .write_all(output.html.as_bytes())
            .context("Failed to write to stdout")?;
    }

    Ok(())
}

/// Sidecar first, then flags on top.
fn build_config(cli: &Cli) -> Result<ConversionConfigBuilder> {
    let mut builder = ConversionConfig::builder();

    if let Some(ref path) = cli.mapping {
        // named explicitly, so it has to exist
        let sidecar = load_sidecar(path)
            .and_then(|found| {
                found.ok_or_else(|| Md2HtmlError::FileNotFound { path: path.clone() })
            })
            .with_context(|| format!("Failed to load mapping {}", path.display()))?;
        builder = builder.sidecar(sidecar);
    } else if !cli.no_sidecar {
        let sidecar = sidecar_path_for(&cli.input);
        builder = builder
            .load_sidecar(&sidecar)
            .with_context(|| format!("Failed to load sidecar {}", sidecar.display()))?;
    }

    if let Some(ref base) = cli.base_path {
        builder = builder.base_path(base);
    }
    for mapping in &cli.images {
        builder = builder.override_image(mapping.clone());
    }

    Ok(builder)
}

/// Parse `--image NAME=WxH:ID`.
fn parse_image(s: &str) -> Result<ImageMapping> {
    let (name, rest) = s
        .split_once('=')
        .with_context(|| format!("Expected NAME=WxH:ID, got '{s}'"))?;
    let (resolution, id) = rest
        .split_once(':')
        .with_context(|| format!("Expected NAME=WxH:ID, got '{s}'"))?;

    if name.trim().is_empty() {
        anyhow::bail!("Image name is empty in '{}'", s);
    }

    Ok(ImageMapping::new(name.trim(), resolution.trim(), id.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_image_flag() {
        let m = parse_image("grouped-test-run=250x270:56175").unwrap();
        assert_eq!(m, ImageMapping::new("grouped-test-run", "250x270", "56175"));
    }

    #[test]
    fn rejects_malformed_image_flag() {
        assert!(parse_image("grouped-test-run").is_err());
        assert!(parse_image("a=250x270").is_err());
        assert!(parse_image("=1x1:1").is_err());
    }

    #[test]
    fn flags_override_sidecar() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("README.md");
        std::fs::write(dir.path().join("README.yaml"), "base-bath: old\na: 1x1:1\n").unwrap();

        let cli = Cli::parse_from([
            "md2html",
            input.to_str().unwrap(),
            "--base-path",
            "new",
            "--image",
            "a=2x2:2",
        ]);
        let config = build_config(&cli).unwrap().build().unwrap();
        assert_eq!(config.base_path.as_deref(), Some("new"));
        assert_eq!(config.images.get("a").unwrap().id, "2");
    }

    #[test]
    fn missing_explicit_mapping_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("README.md");
        let mapping = dir.path().join("images.yaml");

        let cli = Cli::parse_from([
            "md2html",
            input.to_str().unwrap(),
            "--mapping",
            mapping.to_str().unwrap(),
        ]);
        let err = build_config(&cli).unwrap_err();
        assert_eq!(exit_code(&err), 7);
        assert!(format!("{err:#}").contains("images.yaml"), "got: {err:#}");
    }

    #[test]
    fn explicit_mapping_replaces_auto_discovery() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("README.md");
        let mapping = dir.path().join("images.yaml");
        std::fs::write(dir.path().join("README.yaml"), "a: 1x1:1\n").unwrap();
        std::fs::write(&mapping, "base-bath: base\nb: 2x2:2\n").unwrap();

        let cli = Cli::parse_from([
            "md2html",
            input.to_str().unwrap(),
            "--mapping",
            mapping.to_str().unwrap(),
        ]);
        let config = build_config(&cli).unwrap().build().unwrap();
        assert!(!config.images.contains("a"));
        assert!(config.images.contains("b"));
    }

    #[test]
    fn exit_codes_follow_error_kind() {
        let fence: anyhow::Error = Md2HtmlError::UnterminatedFence { fences: 1 }.into();
        assert_eq!(exit_code(&fence.context("Conversion failed")), 3);

        let missing: anyhow::Error = Md2HtmlError::MissingImageMapping { name: "x".into() }.into();
        assert_eq!(exit_code(&missing), 4);

        let parse: anyhow::Error = Md2HtmlError::ConfigParse {
            path: PathBuf::from("README.yaml"),
            line: 1,
            content: "#".into(),
        }
        .into();
        assert_eq!(exit_code(&parse), 5);

        let config: anyhow::Error = Md2HtmlError::InvalidConfig("dup".into()).into();
        assert_eq!(exit_code(&config.context("Invalid configuration")), 6);

        assert_eq!(exit_code(&anyhow::anyhow!("stdout closed")), 1);
    }

    #[test]
    fn no_sidecar_skips_loading() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("README.md");
        std::fs::write(dir.path().join("README.yaml"), "not valid at all\n").unwrap();

        let cli = Cli::parse_from(["md2html", input.to_str().unwrap(), "--no-sidecar"]);
        let config = build_config(&cli).unwrap().build().unwrap();
        assert!(config.images.is_empty());
    }
}
