//! Tagged text format for persisted generations.
//!
//! ```text
//! <header>
//! GenSolver-File 0.1
//! </header>
//! <data>
//! ...
//! </data>
//! ```
//!
//! Tokens are separated by whitespace. Only format version `0.1` (any
//! version in `(0, 0.1]`) is accepted. The data section is reserved: it is
//! kept as raw tokens, never decoded into chromosomes, and never a reason to
//! reject a file.

use super::generation::Generation;
use super::types::GeneValue;
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use thiserror::Error;

/// Magic token following `<header>`.
pub const FILE_TAG: &str = "GenSolver-File";

/// Highest supported format version.
pub const MAX_VERSION: f64 = 0.1;

const HEADER_OPEN: &str = "<header>";
const HEADER_CLOSE: &str = "</header>";
const DATA_OPEN: &str = "<data>";
const DATA_CLOSE: &str = "</data>";

/// Why a generation file was rejected.
#[derive(Error, Debug)]
pub enum FormatError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("unexpected end of file, expected `{expected}`")]
    MissingToken { expected: &'static str },

    #[error("expected `{expected}`, found `{found}`")]
    UnexpectedToken {
        expected: &'static str,
        found: String,
    },

    #[error("invalid version `{0}`")]
    InvalidVersion(String),

    #[error("unsupported version {0} (supported: up to 0.1)")]
    UnsupportedVersion(f64),
}

/// Contents of a generation file.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationFile {
    pub version: f64,
    /// Raw tokens of the `<data>` section, without the tags.
    pub data: Vec<String>,
}

impl GenerationFile {
    /// A file of the current version with an empty data section.
    pub fn new() -> Self {
        Self {
            version: MAX_VERSION,
            data: Vec::new(),
        }
    }

    /// Records every chromosome as raw data tokens: the number of
    /// sub-genes, the sizes, then the values.
    pub fn from_generation<T: GeneValue>(generation: &Generation<T>) -> Self {
        let mut data = Vec::new();
        for chromosome in generation {
            data.push(chromosome.number_of_sub_genes().to_string());
            data.extend(chromosome.sub_gene_sizes().iter().map(usize::to_string));
            data.extend(chromosome.values().iter().map(T::to_string));
        }
        Self {
            version: MAX_VERSION,
            data,
        }
    }

    /// Parses file contents.
    ///
    /// Only the header is checked: `<header>`, the file tag and a supported
    /// version, then any further tokens up to `</header>`. Whatever follows
    /// is collected as data without failing; a leading `<data>` and a
    /// closing `</data>` are stripped when present.
    pub fn parse(text: &str) -> Result<Self, FormatError> {
        let mut tokens = text.split_whitespace();

        expect(&mut tokens, HEADER_OPEN)?;
        expect(&mut tokens, FILE_TAG)?;
        let raw = tokens.next().ok_or(FormatError::MissingToken {
            expected: "version",
        })?;
        let version: f64 = raw
            .parse()
            .map_err(|_| FormatError::InvalidVersion(raw.to_string()))?;
        if !(version > 0.0 && version <= MAX_VERSION) {
            return Err(FormatError::UnsupportedVersion(version));
        }
        if !tokens.any(|token| token == HEADER_CLOSE) {
            return Err(FormatError::MissingToken {
                expected: HEADER_CLOSE,
            });
        }

        let mut rest = tokens.peekable();
        if rest.peek() == Some(&DATA_OPEN) {
            rest.next();
        }
        let data = rest
            .take_while(|&token| token != DATA_CLOSE)
            .map(str::to_string)
            .collect();

        Ok(Self { version, data })
    }

    /// Writes the file in the tagged text format.
    pub fn write_to<W: Write>(&self, mut out: W) -> io::Result<()> {
        writeln!(out, "{HEADER_OPEN}")?;
        writeln!(out, "{FILE_TAG} {}", self.version)?;
        writeln!(out, "{HEADER_CLOSE}")?;
        writeln!(out, "{DATA_OPEN}")?;
        if !self.data.is_empty() {
            writeln!(out, "{}", self.data.join(" "))?;
        }
        writeln!(out, "{DATA_CLOSE}")
    }

    /// Writes the file to `path`, replacing it.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), FormatError> {
        let mut out = io::BufWriter::new(fs::File::create(path)?);
        self.write_to(&mut out)?;
        out.flush()?;
        Ok(())
    }
}

impl Default for GenerationFile {
    fn default() -> Self {
        Self::new()
    }
}

fn expect<'a, I>(tokens: &mut I, expected: &'static str) -> Result<(), FormatError>
where
    I: Iterator<Item = &'a str>,
{
    match tokens.next() {
        Some(token) if token == expected => Ok(()),
        Some(token) => Err(FormatError::UnexpectedToken {
            expected,
            found: token.to_string(),
        }),
        None => Err(FormatError::MissingToken { expected }),
    }
}

/// Reads and checks a generation file.
///
/// A rejected file is reported with `log::warn!` and returned as `Err`;
/// nothing is modified.
pub fn load_generation<P: AsRef<Path>>(path: P) -> Result<GenerationFile, FormatError> {
    let path = path.as_ref();
    let result = fs::read_to_string(path)
        .map_err(FormatError::from)
        .and_then(|text| GenerationFile::parse(&text));
    if let Err(ref e) = result {
        log::warn!("cannot load generation file {}: {e}", path.display());
    }
    result
}
