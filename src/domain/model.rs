use std::fmt;

/// One library member: a 7-digit id, full name, mailing address and
/// outstanding fine.
#[derive(Debug, Clone, PartialEq)]
pub struct Patron {
    id: u32,
    name: String,
    address: String,
    fine: f64,
}

impl Patron {
    pub fn new(id: u32, name: impl Into<String>, address: impl Into<String>, fine: f64) -> Self {
        Self {
            id,
            name: name.into(),
            address: address.into(),
            fine,
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn fine(&self) -> f64 {
        self.fine
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_address(&mut self, address: impl Into<String>) {
        self.address = address.into();
    }

    pub fn set_fine(&mut self, fine: f64) {
        self.fine = fine;
    }
}

impl fmt::Display for Patron {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:07} | {} | {} | ${:.2}",
            self.id, self.name, self.address, self.fine
        )
    }
}

/// Summary of one bulk import. Built by the manager, read-only for callers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportResult {
    added: usize,
    skipped: usize,
    errors: Vec<String>,
}

impl ImportResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// A result carrying only a fatal error, with both counts at zero.
    pub(crate) fn failed(message: String) -> Self {
        Self {
            errors: vec![message],
            ..Self::default()
        }
    }

    pub(crate) fn record_added(&mut self) {
        self.added += 1;
    }

    pub(crate) fn record_skipped(&mut self, line_no: usize, reason: impl fmt::Display) {
        self.skipped += 1;
        self.errors.push(format!("Line {}: {}", line_no, reason));
    }

    pub fn added(&self) -> usize {
        self.added
    }

    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// True when no error messages were collected.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

impl fmt::Display for ImportResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Added: {}, Skipped: {}", self.added, self.skipped)
    }
}
