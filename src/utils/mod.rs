mod alphabet;
mod readers;
mod util;

pub use alphabet::AlphabetMode;
pub use readers::{open_sequence_reader, read_fasta_records, FastaRecord};
pub use util::{handle_error_and_exit, Result};
