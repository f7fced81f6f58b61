//! Parquet write parameters
//!
//! Options for the `COPY ... TO ... (FORMAT PARQUET, ...)` statement.

use crate::sql::{quote_identifier, quote_literal};
use std::fmt;

/// Parquet compression codec
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ParquetCompression {
    Uncompressed,
    #[default]
    Snappy,
    Gzip,
    Zstd,
}

impl ParquetCompression {
    /// Codec name as understood by the Parquet writer
    pub fn as_str(&self) -> &'static str {
        match self {
            ParquetCompression::Uncompressed => "uncompressed",
            ParquetCompression::Snappy => "snappy",
            ParquetCompression::Gzip => "gzip",
            ParquetCompression::Zstd => "zstd",
        }
    }
}

impl fmt::Display for ParquetCompression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Hive partitioned output (a directory tree keyed by partition values)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HivePartitionConfig {
    partition_by: Vec<String>,
    overwrite_or_ignore: bool,
    filename_pattern: Option<String>,
}

impl HivePartitionConfig {
    /// Create an empty (disabled) partition config
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the partition columns
    #[must_use]
    pub fn with_partition_by<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.partition_by = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Allow writing into a non-empty directory
    #[must_use]
    pub fn with_overwrite_or_ignore(mut self, enabled: bool) -> Self {
        self.overwrite_or_ignore = enabled;
        self
    }

    /// Set the file name pattern (e.g. `data_{i}`)
    #[must_use]
    pub fn with_filename_pattern(mut self, pattern: Option<String>) -> Self {
        self.filename_pattern = pattern.filter(|p| !p.is_empty());
        self
    }

    /// Partitioning is only active with at least one partition column
    pub fn is_enabled(&self) -> bool {
        !self.partition_by.is_empty()
    }

    fn options(&self) -> Vec<String> {
        if !self.is_enabled() {
            return Vec::new();
        }

        let columns = self
            .partition_by
            .iter()
            .map(|c| quote_identifier(c))
            .collect::<Vec<_>>()
            .join(", ");
        let mut options = vec![format!("PARTITION_BY ({columns})")];

        if self.overwrite_or_ignore {
            options.push("OVERWRITE_OR_IGNORE true".to_string());
        }
        if let Some(ref pattern) = self.filename_pattern {
            options.push(format!("FILENAME_PATTERN {}", quote_literal(pattern)));
        }

        options
    }
}

/// Parameters for writing Parquet output
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteParams {
    compression: ParquetCompression,
    row_group_size: Option<u64>,
    per_thread_output: bool,
    hive: HivePartitionConfig,
}

impl WriteParams {
    /// Create parameters with default settings (snappy, single file)
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set compression codec
    #[must_use]
    pub fn with_compression(mut self, compression: ParquetCompression) -> Self {
        self.compression = compression;
        self
    }

    /// Set row group size
    #[must_use]
    pub fn with_row_group_size(mut self, size: Option<u64>) -> Self {
        self.row_group_size = size;
        self
    }

    /// Write one file per engine thread
    #[must_use]
    pub fn with_per_thread_output(mut self, enabled: bool) -> Self {
        self.per_thread_output = enabled;
        self
    }

    /// Set hive partitioning
    #[must_use]
    pub fn with_hive_partition_config(mut self, hive: HivePartitionConfig) -> Self {
        self.hive = hive;
        self
    }

    /// Whether the destination is a directory of partitions
    pub fn is_partitioned(&self) -> bool {
        self.hive.is_enabled()
    }

    /// Render the parenthesized `COPY` option list
    pub fn params(&self) -> String {
        let mut options = vec![
            "FORMAT PARQUET".to_string(),
            format!("COMPRESSION {}", quote_literal(self.compression.as_str())),
        ];

        if let Some(size) = self.row_group_size {
            options.push(format!("ROW_GROUP_SIZE {size}"));
        }
        if self.per_thread_output {
            options.push("PER_THREAD_OUTPUT true".to_string());
        }
        options.extend(self.hive.options());

        format!("({})", options.join(", "))
    }
}
