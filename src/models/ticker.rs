use std::path::PathBuf;

/// Where the ticker list for a scan comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickerSource {
    /// S&P 500 constituents from the configured remote listing.
    Sp500,
    /// NASDAQ-listed symbols from the configured remote listing.
    Nasdaq,
    /// Local text file, one symbol per line.
    File(PathBuf),
    /// Symbols given directly on the command line.
    Manual(Vec<String>),
}

impl TickerSource {
    pub fn mode(&self) -> ScanMode {
        match self {
            TickerSource::Sp500 => ScanMode::Sp500,
            TickerSource::Nasdaq => ScanMode::Nasdaq,
            TickerSource::File(_) => ScanMode::File,
            TickerSource::Manual(_) => ScanMode::Manual,
        }
    }
}

/// Scan mode label, carried through to report file naming.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanMode {
    Sp500,
    Nasdaq,
    File,
    Manual,
}

impl ScanMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScanMode::Sp500 => "SP500",
            ScanMode::Nasdaq => "NASDAQ",
            ScanMode::File => "File",
            ScanMode::Manual => "Manual",
        }
    }
}
