use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use chunkit_core::decode::Decoder;
use chunkit_core::encode::{Encoder, EncoderConfig};
use chunkit_core::inspect::inspect;

#[derive(Parser)]
#[command(
    name = "chunkit",
    version,
    about = "Split files into fixed-size chunks and join them back"
)]
struct Cli {
    /// More log output on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Split a file into numbered chunks plus a manifest
    Encode {
        input_file: PathBuf,
        /// Created fresh; an existing directory gets a `_N` suffix instead
        output_directory: PathBuf,
        /// Bytes per chunk; K, M and G suffixes are binary multiples
        #[arg(value_parser = parse_size)]
        chunk_size: usize,
    },
    /// Reassemble a chunk directory into the original file
    Decode {
        input_directory: PathBuf,
        /// Defaults to the current directory
        output_directory: Option<PathBuf>,
    },
    /// Report manifest contents and missing chunks
    Inspect { input_directory: PathBuf },
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            // --help / --version are not errors
            return if e.use_stderr() { ExitCode::FAILURE } else { ExitCode::SUCCESS };
        }
    };
    init_logging(cli.verbose, cli.quiet);
    match run(cli.cmd) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => tracing::Level::ERROR,
        (false, 0) => tracing::Level::WARN,
        (false, 1) => tracing::Level::INFO,
        (false, 2) => tracing::Level::DEBUG,
        (false, _) => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt().with_max_level(level).with_writer(std::io::stderr).init();
}

fn run(cmd: Cmd) -> Result<()> {
    match cmd {
        Cmd::Encode { input_file, output_directory, chunk_size } => {
            encode(&input_file, &output_directory, chunk_size)
        }
        Cmd::Decode { input_directory, output_directory } => {
            decode(&input_directory, output_directory.as_deref())
        }
        Cmd::Inspect { input_directory } => inspect_dir(&input_directory),
    }
}

fn encode(input: &Path, outdir: &Path, chunk_size: usize) -> Result<()> {
    let cfg = EncoderConfig::new(chunk_size);
    let enc = Encoder::encode(input, outdir, &cfg)
        .with_context(|| format!("encode {}", input.display()))?;
    println!(
        "Wrote {} chunk(s), {} byte(s) under {}",
        enc.manifest.total_chunks,
        enc.manifest.original_size,
        enc.dir.display()
    );
    Ok(())
}

fn decode(input_dir: &Path, outdir: Option<&Path>) -> Result<()> {
    let rep = Decoder::join(input_dir, outdir)
        .with_context(|| format!("decode {}", input_dir.display()))?;
    println!(
        "Rebuilt {} ({} byte(s) from {} chunk(s))",
        rep.output_path.display(),
        rep.bytes_written,
        rep.manifest.total_chunks
    );
    Ok(())
}

fn inspect_dir(input_dir: &Path) -> Result<()> {
    let rep = inspect(input_dir).with_context(|| format!("inspect {}", input_dir.display()))?;
    let m = &rep.manifest;
    println!("Name: {}", m.original_name);
    println!("Size: {} byte(s)", m.original_size);
    println!(
        "Chunks: {}/{} present, {} byte(s) on disk",
        rep.present, m.total_chunks, rep.chunk_bytes
    );
    if let Some(created) = &m.created_utc {
        println!("Created: {created}");
    }
    if !rep.stray.is_empty() {
        println!("Stray chunk indices: {:?}", rep.stray);
    }
    if !rep.is_complete() {
        bail!("{} chunk(s) missing: {:?}", rep.missing.len(), rep.missing);
    }
    println!("OK");
    Ok(())
}

/// Byte count with an optional K/M/G (binary) suffix; zero is rejected.
fn parse_size(spec: &str) -> std::result::Result<usize, String> {
    let s = spec.trim().to_uppercase();
    let (num, mul) = if let Some(n) = s.strip_suffix('K') {
        (n, 1usize << 10)
    } else if let Some(n) = s.strip_suffix('M') {
        (n, 1 << 20)
    } else if let Some(n) = s.strip_suffix('G') {
        (n, 1 << 30)
    } else {
        (&s[..], 1)
    };
    let v: usize = num.trim().parse().map_err(|_| format!("bad size {spec:?}"))?;
    let bytes = v.checked_mul(mul).ok_or_else(|| format!("size {spec:?} overflows"))?;
    if bytes == 0 {
        return Err("chunk size must be positive".to_string());
    }
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::parse_size;

    #[test]
    fn plain_and_suffixed_sizes() {
        assert_eq!(parse_size("4").unwrap(), 4);
        assert_eq!(parse_size("4k").unwrap(), 4096);
        assert_eq!(parse_size("2M").unwrap(), 2 << 20);
        assert_eq!(parse_size("1G").unwrap(), 1 << 30);
    }

    #[test]
    fn zero_and_garbage_are_rejected() {
        assert!(parse_size("0").is_err());
        assert!(parse_size("0K").is_err());
        assert!(parse_size("-3").is_err());
        assert!(parse_size("abc").is_err());
        assert!(parse_size("").is_err());
    }
}
