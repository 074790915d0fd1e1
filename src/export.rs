//! CSV persistence of a finished capture.
//!
//! Columns: timestamp,cpu_util,gpu_util,gpu_temp,gpu_power. Missing GPU
//! values are written as empty fields and read back as `None`.

use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use tracing::info;

use crate::error::ExportError;
use crate::sampler::{Sample, SampleCollection};

/// `<prefix>_<YYYYMMDD>_<HHMMSS>.csv`
pub fn capture_file_name(prefix: &str, at: DateTime<Local>) -> String {
    format!("{}_{}.csv", prefix, at.format("%Y%m%d_%H%M%S"))
}

pub fn write_samples<W: Write>(writer: W, collection: &SampleCollection) -> Result<(), ExportError> {
    let mut csv = csv::Writer::from_writer(writer);
    if collection.is_empty() {
        // serde only emits the header with the first record
        csv.write_record(["timestamp", "cpu_util", "gpu_util", "gpu_temp", "gpu_power"])?;
    }
    for sample in collection.samples() {
        csv.serialize(sample)?;
    }
    csv.flush()?;
    Ok(())
}

pub fn read_samples<R: Read>(reader: R) -> Result<SampleCollection, ExportError> {
    let mut csv = csv::Reader::from_reader(reader);
    let samples = csv.deserialize::<Sample>().collect::<Result<Vec<_>, _>>()?;
    Ok(SampleCollection::from_samples(samples))
}

/// Write the collection into `dir`, named after `prefix` and the current time
pub fn save(collection: &SampleCollection, dir: &Path, prefix: &str) -> Result<PathBuf, ExportError> {
    let path = dir.join(capture_file_name(prefix, Local::now()));
    let file = File::create(&path)?;
    write_samples(file, collection)?;
    info!(path = %path.display(), rows = collection.len(), "capture saved");
    Ok(path)
}

pub fn load(path: &Path) -> Result<SampleCollection, ExportError> {
    read_samples(File::open(path)?)
}
