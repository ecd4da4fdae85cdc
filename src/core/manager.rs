use crate::core::import::{parse_line, LineError};
use crate::domain::model::{ImportResult, Patron};
use crate::utils::validation::{is_blank, is_valid_fine, is_valid_id};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use thiserror::Error;

/// Why `add_patron` refused a record. Variants are ordered by the priority
/// the import report uses: the first failing rule wins.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    #[error("Duplicate ID")]
    DuplicateId,

    #[error("Fine must be 0..250")]
    FineOutOfRange,

    #[error("Name/Address empty")]
    EmptyField,

    #[error("Failed validation")]
    Invalid,
}

/// In-memory patron collection. Lookups are linear scans over insertion
/// order; listing order is decided by [`PatronManager::sorted`].
#[derive(Debug, Default)]
pub struct PatronManager {
    patrons: Vec<Patron>,
}

impl PatronManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Admit `patron` if every rule holds. A rejected patron leaves the
    /// collection untouched.
    pub fn add_patron(&mut self, patron: Patron) -> Result<(), RejectReason> {
        if self.contains(patron.id()) {
            return Err(RejectReason::DuplicateId);
        }
        if !is_valid_fine(patron.fine()) {
            return Err(RejectReason::FineOutOfRange);
        }
        if is_blank(patron.name()) || is_blank(patron.address()) {
            return Err(RejectReason::EmptyField);
        }
        if !is_valid_id(patron.id()) {
            return Err(RejectReason::Invalid);
        }

        tracing::debug!("Admitted patron {:07}", patron.id());
        self.patrons.push(patron);
        Ok(())
    }

    /// Remove the patron with `id`, keeping the order of the rest.
    pub fn remove_patron(&mut self, id: u32) -> bool {
        match self.patrons.iter().position(|p| p.id() == id) {
            Some(index) => {
                self.patrons.remove(index);
                tracing::debug!("Removed patron {:07}", id);
                true
            }
            None => false,
        }
    }

    pub fn get_all(&self) -> &[Patron] {
        &self.patrons
    }

    /// Patrons ascending by id. Stable.
    pub fn sorted(&self) -> Vec<&Patron> {
        let mut all: Vec<&Patron> = self.patrons.iter().collect();
        all.sort_by_key(|p| p.id());
        all
    }

    pub fn contains(&self, id: u32) -> bool {
        self.patrons.iter().any(|p| p.id() == id)
    }

    pub fn len(&self) -> usize {
        self.patrons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patrons.is_empty()
    }

    /// Import every line of the file at `path`. A file that cannot be
    /// opened or read yields a single `File not found` error and no
    /// counts.
    pub fn load_from_file<P: AsRef<Path>>(&mut self, path: P) -> ImportResult {
        let path = path.as_ref();
        tracing::info!("Importing patrons from {}", path.display());

        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) => {
                tracing::warn!("Cannot open {}: {}", path.display(), e);
                return ImportResult::failed(file_not_found(path));
            }
        };

        match self.import_lines(BufReader::new(file)) {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!("Read of {} failed part-way: {}", path.display(), e);
                ImportResult::failed(file_not_found(path))
            }
        }
    }

    /// Same as [`PatronManager::load_from_file`] over any buffered
    /// source. A read failure is reported as `Unreadable input`.
    pub fn load_from_reader<R: BufRead>(&mut self, reader: R) -> ImportResult {
        match self.import_lines(reader) {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!("Import read failed part-way: {}", e);
                ImportResult::failed(format!("Unreadable input: {}", e))
            }
        }
    }

    /// Line-by-line import. On a read error the patrons admitted so far in
    /// this call are withdrawn before the error is returned.
    fn import_lines<R: BufRead>(&mut self, mut reader: R) -> io::Result<ImportResult> {
        let admitted_before = self.patrons.len();
        let mut result = ImportResult::new();
        let mut buf = Vec::new();
        let mut line_no = 0;

        loop {
            buf.clear();
            let read = match reader.read_until(b'\n', &mut buf) {
                Ok(read) => read,
                Err(e) => {
                    self.patrons.truncate(admitted_before);
                    return Err(e);
                }
            };
            if read == 0 {
                break;
            }

            for raw in split_line_breaks(&buf) {
                line_no += 1;
                let line = String::from_utf8_lossy(raw);
                match self.import_line(&line) {
                    Ok(()) => result.record_added(),
                    Err(reason) => {
                        tracing::debug!("Line {} skipped: {}", line_no, reason);
                        result.record_skipped(line_no, reason);
                    }
                }
            }
        }

        tracing::info!("Import finished: {}", result);
        Ok(result)
    }

    fn import_line(&mut self, line: &str) -> Result<(), LineError> {
        let candidate = parse_line(line)?;
        self.add_patron(candidate)?;
        Ok(())
    }
}

/// Lines within one `\n`-terminated chunk. A lone `\r` also ends a line;
/// `\r\n` is a single break.
fn split_line_breaks(chunk: &[u8]) -> impl Iterator<Item = &[u8]> {
    let chunk = chunk.strip_suffix(b"\n").unwrap_or(chunk);
    let chunk = chunk.strip_suffix(b"\r").unwrap_or(chunk);
    chunk.split(|&b| b == b'\r')
}

fn file_not_found(path: &Path) -> String {
    format!("File not found: {}", path.display())
}
