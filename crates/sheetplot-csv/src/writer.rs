//! Serialized CSV document writer
//!
//! `csv::Writer` keeps internal buffer state between records and is not
//! reentrant. [`CsvDocumentWriter`] owns one writer behind a mutex and only
//! exposes whole-document writes, so the guard is held for exactly one
//! document and released on every return path.

use once_cell::sync::Lazy;
use parking_lot::Mutex;

use crate::error::{CsvError, CsvResult};
use crate::options::CsvWriteOptions;

static SHARED: Lazy<CsvDocumentWriter> =
    Lazy::new(|| CsvDocumentWriter::new(CsvWriteOptions::default()));

/// A lock-guarded CSV writer producing one in-memory document per call
pub struct CsvDocumentWriter {
    options: CsvWriteOptions,
    writer: Mutex<csv::Writer<Vec<u8>>>,
}

impl CsvDocumentWriter {
    /// Create a writer with the given options
    pub fn new(options: CsvWriteOptions) -> Self {
        let writer = Mutex::new(Self::build(&options));
        Self { options, writer }
    }

    /// The process-wide writer with default options (comma, CRLF)
    pub fn shared() -> &'static CsvDocumentWriter {
        &SHARED
    }

    /// Write options in use
    pub fn options(&self) -> &CsvWriteOptions {
        &self.options
    }

    /// Serialize `records` as one complete document
    ///
    /// On failure the underlying writer is replaced, so no partial record
    /// leaks into the next document.
    pub fn write_document<I, R, F>(&self, records: I) -> CsvResult<Vec<u8>>
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = F>,
        F: AsRef<[u8]>,
    {
        let mut writer = self.writer.lock();

        let result = Self::write_records(&mut writer, records);
        if let Err(e) = result {
            log::error!("csv document write failed: {}", e);
            *writer = Self::build(&self.options);
            return Err(e);
        }

        let finished = std::mem::replace(&mut *writer, Self::build(&self.options));
        finished
            .into_inner()
            .map_err(|e| CsvError::Io(e.into_error()))
    }

    fn write_records<I, R, F>(writer: &mut csv::Writer<Vec<u8>>, records: I) -> CsvResult<()>
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = F>,
        F: AsRef<[u8]>,
    {
        for record in records {
            writer.write_record(record)?;
        }
        writer.flush()?;
        Ok(())
    }

    fn build(options: &CsvWriteOptions) -> csv::Writer<Vec<u8>> {
        csv::WriterBuilder::new()
            .delimiter(options.delimiter)
            .quote(options.quote)
            .terminator(options.line_terminator.to_csv())
            .flexible(true)
            .from_writer(Vec::new())
    }
}

impl Default for CsvDocumentWriter {
    fn default() -> Self {
        Self::new(CsvWriteOptions::default())
    }
}
