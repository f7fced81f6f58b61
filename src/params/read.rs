//! JSON read parameters
//!
//! Options for DuckDB's `read_json` table function.

use crate::error::{Error, Result};
use crate::sql::quote_literal;
use std::collections::BTreeMap;
use std::fmt;

/// Default `maximum_object_size` (16 MiB)
pub const DEFAULT_MAX_OBJECT_SIZE: u64 = 16_777_216;

/// Default number of sampled objects for type detection
pub const DEFAULT_SAMPLE_SIZE: i64 = 20_480;

// ============================================================================
// Option Enums
// ============================================================================

/// Compression of the input JSON files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum JsonCompression {
    /// Detect from the file extension
    #[default]
    Auto,
    /// Plain JSON
    None,
    /// Gzip compressed
    Gzip,
    /// Zstandard compressed
    Zstd,
}

impl JsonCompression {
    /// Value as understood by `read_json`
    pub fn as_str(&self) -> &'static str {
        match self {
            JsonCompression::Auto => "auto_detect",
            JsonCompression::None => "uncompressed",
            JsonCompression::Gzip => "gzip",
            JsonCompression::Zstd => "zstd",
        }
    }
}

/// Layout of the JSON input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum JsonFormat {
    /// Let the engine detect the layout
    Auto,
    /// Concatenated JSON values without delimiters
    Unstructured,
    /// One JSON value per line
    #[value(name = "newline_delimited")]
    NewlineDelimited,
    /// A top-level JSON array
    #[default]
    Array,
}

impl JsonFormat {
    /// Value as understood by `read_json`
    pub fn as_str(&self) -> &'static str {
        match self {
            JsonFormat::Auto => "auto",
            JsonFormat::Unstructured => "unstructured",
            JsonFormat::NewlineDelimited => "newline_delimited",
            JsonFormat::Array => "array",
        }
    }
}

/// Whether top-level objects are unpacked into columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Records {
    #[default]
    Auto,
    #[value(name = "true")]
    True,
    #[value(name = "false")]
    False,
}

impl Records {
    /// Value as understood by `read_json`
    pub fn as_str(&self) -> &'static str {
        match self {
            Records::Auto => "auto",
            Records::True => "true",
            Records::False => "false",
        }
    }
}

macro_rules! impl_display_as_str {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        })*
    };
}

impl_display_as_str!(JsonCompression, JsonFormat, Records);

// ============================================================================
// Read Parameters
// ============================================================================

/// Parameters for reading JSON files through `read_json`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadParams {
    auto_detect: bool,
    columns: BTreeMap<String, String>,
    compression: JsonCompression,
    convert_strings_to_integers: bool,
    date_format: String,
    filename: bool,
    format: JsonFormat,
    hive_partitioning: bool,
    ignore_errors: bool,
    max_depth: i64,
    max_object_size: u64,
    records: Records,
    sample_size: i64,
    timestamp_format: String,
    union_by_name: bool,
}

impl Default for ReadParams {
    fn default() -> Self {
        Self {
            auto_detect: true,
            columns: BTreeMap::new(),
            compression: JsonCompression::default(),
            convert_strings_to_integers: false,
            date_format: "iso".to_string(),
            filename: false,
            format: JsonFormat::default(),
            hive_partitioning: false,
            ignore_errors: false,
            max_depth: -1,
            max_object_size: DEFAULT_MAX_OBJECT_SIZE,
            records: Records::default(),
            sample_size: DEFAULT_SAMPLE_SIZE,
            timestamp_format: "iso".to_string(),
            union_by_name: false,
        }
    }
}

impl ReadParams {
    /// Create parameters with the engine defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable key/type auto detection
    #[must_use]
    pub fn with_auto_detect(mut self, enabled: bool) -> Self {
        self.auto_detect = enabled;
        self
    }

    /// Set explicit column types (key name to engine type)
    #[must_use]
    pub fn with_columns(mut self, columns: BTreeMap<String, String>) -> Self {
        self.columns = columns;
        self
    }

    /// Set input compression
    #[must_use]
    pub fn with_compression(mut self, compression: JsonCompression) -> Self {
        self.compression = compression;
        self
    }

    /// Convert strings holding integers to a numeric type
    #[must_use]
    pub fn with_convert_strings_to_integers(mut self, enabled: bool) -> Self {
        self.convert_strings_to_integers = enabled;
        self
    }

    /// Set the date format used when parsing dates
    #[must_use]
    pub fn with_date_format(mut self, format: impl Into<String>) -> Self {
        self.date_format = format.into();
        self
    }

    /// Add a `filename` column to the result
    #[must_use]
    pub fn with_filename(mut self, enabled: bool) -> Self {
        self.filename = enabled;
        self
    }

    /// Set the JSON layout
    #[must_use]
    pub fn with_format(mut self, format: JsonFormat) -> Self {
        self.format = format;
        self
    }

    /// Interpret the source path as hive partitioned
    #[must_use]
    pub fn with_hive_partitioning(mut self, enabled: bool) -> Self {
        self.hive_partitioning = enabled;
        self
    }

    /// Ignore parse errors (newline delimited input only)
    #[must_use]
    pub fn with_ignore_errors(mut self, enabled: bool) -> Self {
        self.ignore_errors = enabled;
        self
    }

    /// Maximum nesting depth for type detection (-1 for unlimited)
    #[must_use]
    pub fn with_max_depth(mut self, depth: i64) -> Self {
        self.max_depth = depth;
        self
    }

    /// Maximum size of a single JSON object in bytes
    #[must_use]
    pub fn with_max_object_size(mut self, size: u64) -> Self {
        self.max_object_size = size;
        self
    }

    /// Set record unpacking
    #[must_use]
    pub fn with_records(mut self, records: Records) -> Self {
        self.records = records;
        self
    }

    /// Number of sampled objects for type detection (-1 scans everything)
    #[must_use]
    pub fn with_sample_size(mut self, size: i64) -> Self {
        self.sample_size = size;
        self
    }

    /// Set the format used when parsing timestamps
    #[must_use]
    pub fn with_timestamp_format(mut self, format: impl Into<String>) -> Self {
        self.timestamp_format = format.into();
        self
    }

    /// Unify the schemas of multiple files by column name
    #[must_use]
    pub fn with_union_by_name(mut self, enabled: bool) -> Self {
        self.union_by_name = enabled;
        self
    }

    /// Render the named-parameter list of `read_json`
    pub fn params(&self) -> String {
        let mut params = vec![format!("auto_detect = {}", self.auto_detect)];

        if !self.columns.is_empty() {
            let columns = self
                .columns
                .iter()
                .map(|(name, ty)| format!("{}: {}", quote_literal(name), quote_literal(ty)))
                .collect::<Vec<_>>()
                .join(", ");
            params.push(format!("columns = {{{columns}}}"));
        }

        params.extend([
            format!("compression = {}", quote_literal(self.compression.as_str())),
            format!(
                "convert_strings_to_integers = {}",
                self.convert_strings_to_integers
            ),
            format!("dateformat = {}", quote_literal(&self.date_format)),
            format!("filename = {}", self.filename),
            format!("format = {}", quote_literal(self.format.as_str())),
            format!("hive_partitioning = {}", self.hive_partitioning),
            format!("ignore_errors = {}", self.ignore_errors),
            format!("maximum_depth = {}", self.max_depth),
            format!("maximum_object_size = {}", self.max_object_size),
            format!("records = {}", quote_literal(self.records.as_str())),
            format!("sample_size = {}", self.sample_size),
            format!("timestampformat = {}", quote_literal(&self.timestamp_format)),
            format!("union_by_name = {}", self.union_by_name),
        ]);

        params.join(", ")
    }

    /// Render the full `read_json('<source>', ...)` call
    pub fn read_json(&self, source: &str) -> String {
        format!("read_json({}, {})", quote_literal(source), self.params())
    }
}

/// Parse `--columns` values of the form `name:type`.
///
/// Everything before the last colon is the name, so `a:b:INTEGER` maps
/// `a:b` to `INTEGER`. A value without any colon is rejected.
pub fn parse_columns<S: AsRef<str>>(values: &[S]) -> Result<BTreeMap<String, String>> {
    let mut columns = BTreeMap::new();

    for value in values {
        let Some((name, ty)) = value.as_ref().rsplit_once(':') else {
            let all = values
                .iter()
                .map(AsRef::as_ref)
                .collect::<Vec<_>>()
                .join(",");
            return Err(Error::invalid_columns(all));
        };
        columns.insert(name.to_string(), ty.to_string());
    }

    Ok(columns)
}
