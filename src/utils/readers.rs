use super::Result;
use flate2::read::MultiGzDecoder;
use std::fs::File;
use std::io::{BufRead, BufReader, Read as ioRead};
use std::path::Path;

#[derive(Debug, Clone, PartialEq)]
pub struct FastaRecord {
    pub name: String,
    pub seq: Vec<u8>,
}

pub fn open_sequence_reader(path: &Path) -> Result<BufReader<Box<dyn ioRead>>> {
    fn is_gzipped(path: &Path) -> bool {
        let path_str = path.to_string_lossy().to_lowercase();
        path_str.ends_with(".gz") || path_str.ends_with(".gzip")
    }
    let file = File::open(path).map_err(|e| format!("File {}: {}", path.display(), e))?;
    if is_gzipped(path) {
        let gz_decoder = MultiGzDecoder::new(file);
        if gz_decoder.header().is_some() {
            Ok(BufReader::new(Box::new(gz_decoder)))
        } else {
            Err(format!("Invalid gzip header: {}", path.to_string_lossy()))
        }
    } else {
        Ok(BufReader::new(Box::new(file)))
    }
}

/// Reads every record of a FASTA stream, joining wrapped sequence lines.
/// Bytes are kept as-is: no case folding and no alphabet check.
pub fn read_fasta_records<R: BufRead>(reader: R) -> Result<Vec<FastaRecord>> {
    let mut records: Vec<FastaRecord> = Vec::new();

    for (line_number, line) in reader.split(b'\n').enumerate() {
        let line = line.map_err(|e| format!("Error reading line {}: {}", line_number + 1, e))?;
        let line = line.trim_ascii_end();
        if let Some(header) = line.strip_prefix(b">") {
            let header = String::from_utf8_lossy(header);
            let name = header.split_whitespace().next().unwrap_or_default();
            records.push(FastaRecord {
                name: name.to_string(),
                seq: Vec::new(),
            });
        } else if line.is_empty() {
            continue;
        } else if let Some(record) = records.last_mut() {
            record.seq.extend_from_slice(line);
        } else {
            return Err(format!(
                "Sequence data before first FASTA header at line {}",
                line_number + 1
            ));
        }
    }

    Ok(records)
}
