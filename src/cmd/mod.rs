pub mod catalog;
pub mod estimate;
pub mod rates;
pub mod schema;

use beema::CalculationRequest;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

/// Read a calculation request (JSON) from a file, or stdin with "-".
pub fn read_request(path: &Path) -> anyhow::Result<CalculationRequest> {
    if path.as_os_str() == "-" {
        read_from_stdin()
    } else {
        read_from_file(path)
    }
}

fn read_from_file(path: &Path) -> anyhow::Result<CalculationRequest> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    Ok(serde_json::from_reader(reader)?)
}

fn read_from_stdin() -> anyhow::Result<CalculationRequest> {
    let stdin = io::stdin();
    let mut reader = BufReader::new(stdin.lock());

    let mut buffer = Vec::new();
    reader.read_to_end(&mut buffer)?;

    if buffer.is_empty() {
        anyhow::bail!("No input received. Provide a file or pipe a request to stdin.");
    }

    Ok(serde_json::from_slice(&buffer)?)
}
