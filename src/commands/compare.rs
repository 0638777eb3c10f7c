use crate::binding::{self, HostValue};
use crate::cli::Cli;
use crate::comparator::{compare_par, MatchVector};
use crate::utils::{open_sequence_reader, read_fasta_records, Result};
use rayon::ThreadPoolBuilder;
use std::{
    fs::File,
    io::{self, BufWriter, Write},
    time,
};

pub fn compare(args: Cli) -> Result<()> {
    let start_timer = time::Instant::now();

    if !matches!(args.alphabet.as_bytes().first(), Some(b'n' | b'a' | b'r')) {
        log::warn!(
            "Unrecognized alphabet '{}', comparing without wildcards",
            args.alphabet
        );
    }

    let inputs = host_inputs(&args)?;
    let matches = if args.num_threads > 1 {
        let pool = initialize_thread_pool(args.num_threads)?;
        binding::invoke_with(&inputs, 1, |seq_a, seq_b, mode| {
            pool.install(|| compare_par(seq_a, seq_b, mode, args.chunk_size))
        })
    } else {
        binding::invoke(&inputs, 1)
    }
    .map_err(|e| e.to_string())?;

    log_summary(&matches);
    write_matches(&matches, args.output_path.as_deref())?;

    log::info!("Total execution time: {:.2?}", start_timer.elapsed());
    Ok(())
}

/// Builds `[seq_a, seq_b, alphabet]` from the command line. A FASTA file
/// with fewer than two records yields fewer inputs and is rejected by the binding.
fn host_inputs(args: &Cli) -> Result<Vec<HostValue>> {
    let mut inputs: Vec<HostValue> = match &args.fasta_path {
        Some(path) => {
            let records = read_fasta_records(open_sequence_reader(path)?)?;
            if records.len() > 2 {
                log::warn!(
                    "{} contains {} records, comparing the first two",
                    path.display(),
                    records.len()
                );
            }
            records
                .into_iter()
                .take(2)
                .map(|record| {
                    log::debug!("Read {} ({} bp)", record.name, record.seq.len());
                    HostValue::row(record.seq)
                })
                .collect()
        }
        None => [&args.seq_a, &args.seq_b]
            .into_iter()
            .flatten()
            .map(|seq| HostValue::row(seq.as_encoded_bytes()))
            .collect(),
    };
    if inputs.len() == 2 {
        inputs.push(HostValue::row(args.alphabet.as_bytes()));
    }
    Ok(inputs)
}

fn initialize_thread_pool(num_threads: usize) -> Result<rayon::ThreadPool> {
    ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .thread_name(|i| format!("cmprseq-{}", i))
        .build()
        .map_err(|e| format!("Failed to initialize thread pool: {}", e))
}

fn log_summary(matches: &MatchVector) {
    let num_matches = matches.count_matches();
    if matches.is_empty() {
        log::info!("Compared 0 positions");
    } else {
        log::info!(
            "Compared {} positions: {} matches ({:.2}%)",
            matches.len(),
            num_matches,
            num_matches as f64 / matches.len() as f64 * 100.0
        );
    }
}

fn write_matches(matches: &MatchVector, output_path: Option<&str>) -> Result<()> {
    let mut writer: Box<dyn Write> = match output_path {
        Some(path) => {
            let file = File::create(path).map_err(|e| format!("File {}: {}", path, e))?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };
    writeln!(writer, "{}", matches).map_err(|e| e.to_string())?;
    writer.flush().map_err(|e| e.to_string())
}
