use std::fmt;

/// Category of a user-visible error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorStatus {
    NoConnection,
    InvalidRepo,
    ScanError,
    JsonParsing,
    InvalidCbom,
    IgnoredComponent,
    MultiUpload,
    EmptyDatabase,
    FallBackLocalComplianceReport,
    ScanWarning,
}

impl ErrorStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorStatus::NoConnection => "NoConnection",
            ErrorStatus::InvalidRepo => "InvalidRepo",
            ErrorStatus::ScanError => "ScanError",
            ErrorStatus::JsonParsing => "JsonParsing",
            ErrorStatus::InvalidCbom => "InvalidCbom",
            ErrorStatus::IgnoredComponent => "IgnoredComponent",
            ErrorStatus::MultiUpload => "MultiUpload",
            ErrorStatus::EmptyDatabase => "EmptyDatabase",
            ErrorStatus::FallBackLocalComplianceReport => "FallBackLocalComplianceReport",
            ErrorStatus::ScanWarning => "ScanWarning",
        }
    }
}

impl fmt::Display for ErrorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorEntry {
    pub status: ErrorStatus,
    pub message: String,
}

/// Ordered list of user-visible errors; each entry is dismissed by index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorLog {
    entries: Vec<ErrorEntry>,
}

impl ErrorLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, status: ErrorStatus, message: impl Into<String>) {
        self.entries.push(ErrorEntry {
            status,
            message: message.into(),
        });
    }

    /// Removes the entry at `index`; out of range is a no-op
    pub fn close(&mut self, index: usize) -> Option<ErrorEntry> {
        (index < self.entries.len()).then(|| self.entries.remove(index))
    }

    pub fn entries(&self) -> &[ErrorEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
