use crate::utils::Result;
use clap::{ArgAction, ArgGroup, Parser};
use env_logger::fmt::Color;
use log::{Level, LevelFilter};
use once_cell::sync::Lazy;
use std::{
    ffi::OsString,
    io::Write,
    path::{Path, PathBuf},
};

pub static FULL_VERSION: Lazy<String> = Lazy::new(|| {
    format!(
        "{}-{}",
        env!("CARGO_PKG_VERSION"),
        env!("VERGEN_GIT_DESCRIBE")
    )
});

#[derive(Parser, Debug)]
#[command(name="cmprseq",
          version=&**FULL_VERSION,
          about="Position-wise sequence comparison with alphabet-specific wildcards",
          long_about = None,
          help_template = "{name} {version}\n{about-section}\n{usage-heading}\n    {usage}\n\n{all-args}{after-help}",
          )]
#[command(group(ArgGroup::new("input").required(true).multiple(true).args(["seq_a", "seq_b", "fasta_path"])))]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[clap(short = 'a')]
    #[clap(long = "seq-a")]
    #[clap(help = "First sequence (case-sensitive, compared byte by byte)")]
    #[clap(value_name = "SEQ_A")]
    #[clap(requires = "seq_b")]
    #[clap(conflicts_with = "fasta_path")]
    pub seq_a: Option<OsString>,

    #[clap(short = 'b')]
    #[clap(long = "seq-b")]
    #[clap(help = "Second sequence (case-sensitive, compared byte by byte)")]
    #[clap(value_name = "SEQ_B")]
    #[clap(requires = "seq_a")]
    #[clap(conflicts_with = "fasta_path")]
    pub seq_b: Option<OsString>,

    #[clap(short = 'f')]
    #[clap(long = "fasta")]
    #[clap(help = "FASTA file whose first two records are compared (may be gzipped)")]
    #[clap(value_name = "FASTA")]
    #[arg(value_parser = check_file_exists)]
    pub fasta_path: Option<PathBuf>,

    #[clap(short = 'm')]
    #[clap(long = "alphabet")]
    #[clap(
        help = "Alphabet selector: n (N and X are wildcards), a (X is a wildcard), anything else for exact matching"
    )]
    #[clap(value_name = "ALPHABET")]
    #[clap(default_value = "n")]
    #[arg(value_parser = check_alphabet_nonempty)]
    pub alphabet: String,

    #[clap(short = 'o')]
    #[clap(long = "output")]
    #[clap(help = "Write the match vector to this file instead of stdout")]
    #[clap(value_name = "OUTPUT")]
    #[arg(value_parser = check_prefix_path)]
    pub output_path: Option<String>,

    #[clap(short = 't')]
    #[clap(long = "threads")]
    #[clap(help = "Number of threads")]
    #[clap(value_name = "THREADS")]
    #[clap(default_value = "1")]
    #[arg(value_parser = threads_in_range)]
    pub num_threads: usize,

    #[clap(help_heading("Advanced"))]
    #[clap(long = "chunk-size")]
    #[clap(value_name = "CHUNK_SIZE")]
    #[clap(
        help = "Minimum number of positions per parallel task; larger inputs are split adaptively above this size"
    )]
    #[clap(default_value = "65536")]
    #[arg(value_parser = chunk_size_in_range)]
    pub chunk_size: usize,

    #[clap(short = 'v')]
    #[clap(long = "verbose")]
    #[clap(action = ArgAction::Count, help = "Specify multiple times to increase verbosity level (e.g., -vv for more verbosity)")]
    pub verbosity: u8,
}

fn verbosity_filter(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    }
}

pub fn init_verbose(args: &Cli) {
    env_logger::Builder::from_default_env()
        .format(|buf, record| {
            let level = record.level();
            let mut style = buf.style();
            match level {
                Level::Error => style.set_color(Color::Red),
                Level::Warn => style.set_color(Color::Yellow),
                Level::Info => style.set_color(Color::Green),
                Level::Debug => style.set_color(Color::Blue),
                Level::Trace => style.set_color(Color::Cyan),
            };

            writeln!(
                buf,
                "{} [{}] - {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                style.value(level),
                record.args()
            )
        })
        .filter_level(verbosity_filter(args.verbosity))
        .init();
}

fn check_prefix_path(s: &str) -> Result<String> {
    let path = Path::new(s);
    if let Some(parent_dir) = path.parent() {
        if !parent_dir.as_os_str().is_empty() && !parent_dir.exists() {
            return Err(format!("Path does not exist: {}", parent_dir.display()));
        }
    }
    Ok(s.to_string())
}

fn check_file_exists(s: &str) -> Result<PathBuf> {
    let path = Path::new(s);
    if !path.exists() {
        Err(format!("File does not exist: {}", path.display()))
    } else {
        Ok(path.to_path_buf())
    }
}

fn check_alphabet_nonempty(s: &str) -> Result<String> {
    if s.is_empty() {
        Err("Alphabet selector cannot be an empty string".to_string())
    } else {
        Ok(s.to_string())
    }
}

fn threads_in_range(s: &str) -> Result<usize> {
    let thread: usize = s
        .parse()
        .map_err(|_| format!("`{}` is not a valid thread number", s))?;
    if thread >= 1 {
        Ok(thread)
    } else {
        Err("Number of threads must be at least 1".into())
    }
}

fn chunk_size_in_range(s: &str) -> Result<usize> {
    let chunk_size: usize = s
        .parse()
        .map_err(|_| format!("`{}` is not a valid chunk size", s))?;
    if chunk_size >= 1 {
        Ok(chunk_size)
    } else {
        Err("Chunk size must be at least 1".into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::ffi::OsStr;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_literal_sequences() {
        let cli = Cli::try_parse_from(["cmprseq", "-a", "ACGT", "-b", "ACGA", "-m", "a"]).unwrap();
        assert_eq!(cli.seq_a.as_deref(), Some(OsStr::new("ACGT")));
        assert_eq!(cli.seq_b.as_deref(), Some(OsStr::new("ACGA")));
        assert_eq!(cli.alphabet, "a");
        assert_eq!(cli.num_threads, 1);
        assert_eq!(cli.chunk_size, 65536);
        assert!(cli.output_path.is_none());
    }

    #[test]
    fn test_parse_defaults_to_nucleotide() {
        let cli = Cli::try_parse_from(["cmprseq", "-a", "ACGT", "-b", "ACGA"]).unwrap();
        assert_eq!(cli.alphabet, "n");
    }

    #[test]
    fn test_parse_requires_both_sequences() {
        assert!(Cli::try_parse_from(["cmprseq", "-a", "ACGT"]).is_err());
        assert!(Cli::try_parse_from(["cmprseq", "-b", "ACGT"]).is_err());
    }

    #[test]
    fn test_parse_fasta_conflicts_with_literals() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pair.fa");
        std::fs::write(&path, ">a\nA\n>b\nA\n").unwrap();
        let path = path.to_str().unwrap();
        assert!(Cli::try_parse_from(["cmprseq", "-f", path]).is_ok());
        assert!(Cli::try_parse_from(["cmprseq", "-f", path, "-a", "A", "-b", "A"]).is_err());
    }

    #[test]
    fn test_parse_empty_sequences_allowed() {
        let cli = Cli::try_parse_from(["cmprseq", "-a", "", "-b", ""]).unwrap();
        assert_eq!(cli.seq_a.as_deref(), Some(OsStr::new("")));
    }

    #[cfg(unix)]
    #[test]
    fn test_parse_non_utf8_sequences() {
        use std::os::unix::ffi::OsStringExt;
        let seq_a = OsString::from_vec(b"AC\xE9T".to_vec());
        let cli = Cli::try_parse_from([
            OsString::from("cmprseq"),
            OsString::from("-a"),
            seq_a.clone(),
            OsString::from("-b"),
            OsString::from("ACGT"),
        ])
        .unwrap();
        assert_eq!(cli.seq_a, Some(seq_a));
    }

    #[test]
    fn test_verbosity_count() {
        let cli = Cli::try_parse_from(["cmprseq", "-vv", "-a", "A", "-b", "A"]).unwrap();
        assert_eq!(verbosity_filter(cli.verbosity), LevelFilter::Debug);
        assert_eq!(verbosity_filter(0), LevelFilter::Warn);
        assert_eq!(verbosity_filter(1), LevelFilter::Info);
    }

    #[test]
    fn test_value_parsers() {
        assert!(threads_in_range("0").is_err());
        assert!(threads_in_range("x").is_err());
        assert_eq!(threads_in_range("4"), Ok(4));
        assert!(chunk_size_in_range("0").is_err());
        assert_eq!(chunk_size_in_range("128"), Ok(128));
        assert!(check_alphabet_nonempty("").is_err());
        assert!(check_file_exists("/definitely/not/here.fa").is_err());
        assert!(check_prefix_path("/definitely/not/here/out.txt").is_err());
        assert_eq!(check_prefix_path("out.txt"), Ok("out.txt".to_string()));
    }
}
