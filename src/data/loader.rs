//! Signal file adapters: `.txt`, `.csv` and `.edf`.

use std::fs;
use std::path::{Path, PathBuf};

use edf_reader::sync_reader::SyncEDFReader;
use local_edf_reader::{init_sync_reader, LocalFileReader};
use log::info;

use super::signal::Signal;
use crate::error::{GlueError, Result};

/// Supported on-disk formats, picked by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalFormat {
    /// Whitespace-separated numbers, read row by row.
    Txt,
    /// Header row, then `time,amplitude` rows.
    Csv,
    /// European Data Format; all channels flattened in channel order.
    Edf,
}

impl SignalFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "txt" => Ok(SignalFormat::Txt),
            "csv" => Ok(SignalFormat::Csv),
            "edf" => Ok(SignalFormat::Edf),
            "" => Err(GlueError::UnsupportedFormat(format!(
                "{} has no extension",
                path.display()
            ))),
            other => Err(GlueError::UnsupportedFormat(format!(".{other}"))),
        }
    }

    /// Extensions offered by file dialogs.
    pub const EXTENSIONS: [&'static str; 3] = ["csv", "txt", "edf"];
}

/// A loaded signal together with the time axis it came with.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedSignal {
    pub path: PathBuf,
    pub format: SignalFormat,
    /// Same length as `signal`. Sample indices when the file has no time column.
    pub time: Vec<f64>,
    pub signal: Signal,
}

impl LoadedSignal {
    /// `[time, amplitude]` pairs for plotting.
    pub fn points(&self) -> Vec<[f64; 2]> {
        self.time
            .iter()
            .zip(self.signal.iter())
            .map(|(&t, &v)| [t, v])
            .collect()
    }
}

/// Load a signal, dispatching on the file extension.
pub fn load_signal(path: impl AsRef<Path>) -> Result<LoadedSignal> {
    let path = path.as_ref();
    let format = SignalFormat::from_path(path)?;
    let (time, samples) = match format {
        SignalFormat::Txt => {
            let samples = read_txt(path)?;
            (index_axis(samples.len()), samples)
        }
        SignalFormat::Csv => read_csv(path)?,
        SignalFormat::Edf => {
            let samples = read_edf(path)?;
            (index_axis(samples.len()), samples)
        }
    };
    info!("loaded {} samples from {}", samples.len(), path.display());
    Ok(LoadedSignal {
        path: path.to_path_buf(),
        format,
        time,
        signal: Signal::from(samples),
    })
}

fn index_axis(n: usize) -> Vec<f64> {
    (0..n).map(|i| i as f64).collect()
}

fn read_txt(path: &Path) -> Result<Vec<f64>> {
    let text = fs::read_to_string(path)?;
    let mut samples = Vec::new();
    for (i, line) in text.lines().enumerate() {
        let line = line.split('#').next().unwrap_or("");
        for tok in line.split_whitespace() {
            let v = tok.parse::<f64>().map_err(|e| GlueError::Parse {
                path: path.to_path_buf(),
                line: i + 1,
                message: format!("{tok:?}: {e}"),
            })?;
            samples.push(v);
        }
    }
    Ok(samples)
}

/// First column is time, second is amplitude; the first row is a header.
fn read_csv(path: &Path) -> Result<(Vec<f64>, Vec<f64>)> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)?;
    let mut time = Vec::new();
    let mut amplitude = Vec::new();
    for record in rdr.records() {
        let record = record?;
        let line = record.position().map_or(0, |p| p.line() as usize);
        let parse_error = |message: String| GlueError::Parse {
            path: path.to_path_buf(),
            line,
            message,
        };
        if record.len() < 2 {
            return Err(parse_error(format!(
                "expected time and signal columns, found {}",
                record.len()
            )));
        }
        let field = |idx: usize| -> Result<f64> {
            let raw = &record[idx];
            raw.parse::<f64>()
                .map_err(|e| parse_error(format!("column {}: {raw:?}: {e}", idx + 1)))
        };
        time.push(field(0)?);
        amplitude.push(field(1)?);
    }
    Ok((time, amplitude))
}

fn read_edf(path: &Path) -> Result<Vec<f64>> {
    let path_str = path
        .to_str()
        .ok_or_else(|| GlueError::UnsupportedFormat(format!("non UTF-8 path {}", path.display())))?;
    let reader: SyncEDFReader<LocalFileReader> = init_sync_reader(path_str)?;
    let header = &reader.edf_header;
    let duration_ms = header.number_of_blocks * header.block_duration;
    let channels = reader.read_data_window(0, duration_ms)?;
    info!(
        "EDF {}: {} channels, {} ms",
        path.display(),
        channels.len(),
        duration_ms
    );
    Ok(channels
        .iter()
        .flat_map(|ch| ch.iter().map(|&v| f64::from(v)))
        .collect())
}
