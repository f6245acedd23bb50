use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use csv::StringRecord;
use tempfile::NamedTempFile;
use thiserror::Error;
use vacancy_core::{VacancyRecord, CSV_HEADER};
use vacancy_logging::vacancy_info;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("data directory missing or not writable: {0}")]
    DataDir(String),
    #[error("path has no parent directory: {0}")]
    NoParent(PathBuf),
    #[error("csv error in {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Ensure the data directory exists; create it if missing.
pub fn ensure_data_dir(dir: &Path) -> Result<(), PersistError> {
    if dir.exists() {
        let meta = fs::metadata(dir).map_err(|e| PersistError::DataDir(e.to_string()))?;
        if !meta.is_dir() {
            return Err(PersistError::DataDir(format!(
                "{} is not a directory",
                dir.display()
            )));
        }
    } else {
        fs::create_dir_all(dir).map_err(|e| PersistError::DataDir(e.to_string()))?;
    }
    Ok(())
}

/// Load the previously seen records. A missing file means a first run.
pub fn load_seen(path: &Path) -> Result<Vec<VacancyRecord>, PersistError> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            vacancy_info!("No seen file at {}, starting fresh", path.display());
            return Ok(Vec::new());
        }
        Err(err) => return Err(err.into()),
    };

    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(file);
    let records = reader
        .records()
        .map(|row| row.map(|row| record_from_row(&row)))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|source| PersistError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
    vacancy_info!("Loaded {} seen vacancies from {}", records.len(), path.display());
    Ok(records)
}

/// Map a row onto the six columns by position, in [`CSV_HEADER`] order.
///
/// Missing trailing columns read as empty. Columns past the sixth are
/// ignored, so they do not survive the next rewrite of the file.
fn record_from_row(row: &StringRecord) -> VacancyRecord {
    let column = |index: usize| row.get(index).unwrap_or_default().to_string();
    VacancyRecord {
        stage: column(0),
        url: column(1),
        position: column(2),
        service: column(3),
        rating: column(4),
        comments: column(5),
    }
}

/// Write `records` under the fixed header, replacing `path` atomically.
pub fn write_records(path: &Path, records: &[VacancyRecord]) -> Result<(), PersistError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    let csv_err = |source| PersistError::Csv {
        path: path.to_path_buf(),
        source,
    };
    writer.write_record(CSV_HEADER).map_err(csv_err)?;
    for record in records {
        writer.serialize(record).map_err(csv_err)?;
    }
    let content = writer
        .into_inner()
        .map_err(|err| PersistError::Io(err.into_error()))?;

    let dir = match path.parent() {
        Some(parent) if parent.as_os_str().is_empty() => Path::new("."),
        Some(parent) => parent,
        None => return Err(PersistError::NoParent(path.to_path_buf())),
    };
    let file_name = path
        .file_name()
        .ok_or_else(|| PersistError::NoParent(path.to_path_buf()))?;
    AtomicFileWriter::new(dir.to_path_buf()).write(Path::new(file_name), &content)?;
    Ok(())
}

/// Atomically write content to `{dir}/{filename}` by writing a temp file then renaming.
pub struct AtomicFileWriter {
    dir: PathBuf,
}

impl AtomicFileWriter {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn write(&self, filename: &Path, content: &[u8]) -> Result<PathBuf, PersistError> {
        ensure_data_dir(&self.dir)?;

        let target = self.dir.join(filename);
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(content)?;
        tmp.flush()?;
        tmp.as_file_mut().sync_all()?;

        tmp.persist(&target).map_err(|e| PersistError::Io(e.error))?;
        Ok(target)
    }
}
