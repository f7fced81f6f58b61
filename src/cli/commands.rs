//! CLI commands and argument parsing

use crate::error::Result;
use crate::params::{
    parse_columns, HivePartitionConfig, JsonCompression, JsonFormat, ParquetCompression,
    ReadParams, Records, WriteParams,
};
use clap::{Args, Parser, Subcommand};

/// Convert JSON files to Apache Parquet files
#[derive(Parser, Debug)]
#[command(name = "pqconv")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Parquet write options (shared by every command)
    #[command(flatten)]
    pub parquet: ParquetArgs,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert JSON files to Apache Parquet files
    #[command(name = "json2parquet")]
    Json2Parquet {
        /// Full path of a JSON file, or a glob for multiple JSON files
        #[arg(long)]
        source: String,

        /// Output Parquet file, or directory for hive partitioned output
        #[arg(long)]
        dest: String,

        #[command(flatten)]
        json: JsonArgs,

        /// Flatten struct columns into top-level columns
        #[arg(long)]
        flatten: bool,

        /// Print the COPY statement instead of running it
        #[arg(long, conflicts_with = "flatten")]
        dry_run: bool,
    },

    /// Print the schema inferred for JSON files
    Describe {
        /// Full path of a JSON file, or a glob for multiple JSON files
        #[arg(long)]
        source: String,

        #[command(flatten)]
        json: JsonArgs,

        /// Show the columns as they are after flattening
        #[arg(long)]
        flatten: bool,

        /// Output format
        #[arg(short, long, default_value = "pretty")]
        output: OutputFormat,
    },
}

/// Parquet write flags
#[derive(Args, Debug, Clone)]
pub struct ParquetArgs {
    /// Parquet compression codec
    #[arg(long, global = true, default_value = "snappy")]
    pub parquet_compression: ParquetCompression,

    /// Rows per Parquet row group
    #[arg(long, global = true)]
    pub row_group_size: Option<u64>,

    /// Write one file per thread
    #[arg(long, global = true)]
    pub per_thread_output: bool,

    /// Columns to hive partition the output by (comma-separated)
    #[arg(long, global = true, value_delimiter = ',')]
    pub partition_by: Vec<String>,

    /// Allow writing partitions into a non-empty directory
    #[arg(long, global = true)]
    pub overwrite_or_ignore: bool,

    /// File name pattern for partition files, e.g. "data_{i}"
    #[arg(long, global = true)]
    pub filename_pattern: Option<String>,
}

impl ParquetArgs {
    /// Build write parameters from the flags
    pub fn write_params(&self) -> WriteParams {
        WriteParams::new()
            .with_compression(self.parquet_compression)
            .with_row_group_size(self.row_group_size)
            .with_per_thread_output(self.per_thread_output)
            .with_hive_partition_config(
                HivePartitionConfig::new()
                    .with_partition_by(self.partition_by.iter().cloned())
                    .with_overwrite_or_ignore(self.overwrite_or_ignore)
                    .with_filename_pattern(self.filename_pattern.clone()),
            )
    }
}

/// JSON read flags
#[derive(Args, Debug, Clone)]
pub struct JsonArgs {
    /// Disable detection of key names and value types
    #[arg(long)]
    pub disable_autodetect: bool,

    /// Compression of the input files
    #[arg(long, default_value = "auto")]
    pub compression: JsonCompression,

    /// Key names and value types, e.g. "key1:INTEGER,key2:VARCHAR"
    #[arg(long, value_delimiter = ',')]
    pub columns: Vec<String>,

    /// JSON layout
    #[arg(long, default_value = "array")]
    pub format: JsonFormat,

    /// Date format used when parsing dates
    #[arg(long, default_value = "iso")]
    pub dateformat: String,

    /// Format used when parsing timestamps
    #[arg(long, default_value = "iso")]
    pub timestampformat: String,

    /// Maximum nesting depth for type detection (-1 for unlimited)
    #[arg(long, default_value_t = -1, allow_negative_numbers = true)]
    pub max_depth: i64,

    /// Maximum size of a JSON object in bytes
    #[arg(long, default_value_t = 16_777_216)]
    pub max_obj_size: u64,

    /// Unpack top-level objects into columns
    #[arg(long, default_value = "auto")]
    pub records: Records,

    /// Objects sampled for type detection (-1 scans everything)
    #[arg(long, default_value_t = 20_480, allow_negative_numbers = true)]
    pub sample_size: i64,

    /// Convert strings holding integers to a numeric type
    #[arg(long)]
    pub convert_str_to_int: bool,

    /// Add a column with the source file name
    #[arg(long)]
    pub filename: bool,

    /// Interpret the source path as hive partitioned
    #[arg(long)]
    pub hive_partitioning: bool,

    /// Ignore parse errors (newline_delimited only)
    #[arg(long)]
    pub ignore_errors: bool,

    /// Unify the schemas of multiple files by column name
    #[arg(long)]
    pub union_by_name: bool,
}

impl JsonArgs {
    /// Build read parameters from the flags
    pub fn read_params(&self) -> Result<ReadParams> {
        Ok(ReadParams::new()
            .with_auto_detect(!self.disable_autodetect)
            .with_columns(parse_columns(&self.columns)?)
            .with_compression(self.compression)
            .with_convert_strings_to_integers(self.convert_str_to_int)
            .with_date_format(self.dateformat.clone())
            .with_filename(self.filename)
            .with_format(self.format)
            .with_hive_partitioning(self.hive_partitioning)
            .with_ignore_errors(self.ignore_errors)
            .with_max_depth(self.max_depth)
            .with_max_object_size(self.max_obj_size)
            .with_records(self.records)
            .with_sample_size(self.sample_size)
            .with_timestamp_format(self.timestampformat.clone())
            .with_union_by_name(self.union_by_name))
    }
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// Human-readable output
    Pretty,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::collections::BTreeMap;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("pqconv").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_json2parquet_defaults() {
        let cli = parse(&["json2parquet", "--source", "in.json", "--dest", "out.parquet"]);

        assert_eq!(cli.parquet.write_params(), WriteParams::new());
        match cli.command {
            Commands::Json2Parquet {
                source,
                dest,
                json,
                flatten,
                dry_run,
            } => {
                assert_eq!(source, "in.json");
                assert_eq!(dest, "out.parquet");
                assert!(!flatten);
                assert!(!dry_run);
                assert_eq!(json.read_params().unwrap(), ReadParams::new());
            }
            Commands::Describe { .. } => panic!("expected json2parquet"),
        }
    }

    #[test]
    fn test_json2parquet_all_flags() {
        let cli = parse(&[
            "--parquet-compression",
            "zstd",
            "--partition-by",
            "year,month",
            "--overwrite-or-ignore",
            "json2parquet",
            "--source",
            "in/*.json",
            "--dest",
            "out",
            "--disable-autodetect",
            "--columns",
            "k1:INTEGER,k2:VARCHAR",
            "--compression",
            "gzip",
            "--format",
            "newline_delimited",
            "--max-depth",
            "-1",
            "--sample-size",
            "-1",
            "--records",
            "false",
            "--union-by-name",
            "--filename-pattern",
            "part_{i}",
        ]);

        let expected_write = WriteParams::new()
            .with_compression(ParquetCompression::Zstd)
            .with_hive_partition_config(
                HivePartitionConfig::new()
                    .with_partition_by(["year", "month"])
                    .with_overwrite_or_ignore(true)
                    .with_filename_pattern(Some("part_{i}".to_string())),
            );
        assert_eq!(cli.parquet.write_params(), expected_write);

        let Commands::Json2Parquet { json, .. } = cli.command else {
            panic!("expected json2parquet");
        };
        let expected_read = ReadParams::new()
            .with_auto_detect(false)
            .with_columns(BTreeMap::from([
                ("k1".to_string(), "INTEGER".to_string()),
                ("k2".to_string(), "VARCHAR".to_string()),
            ]))
            .with_compression(JsonCompression::Gzip)
            .with_format(JsonFormat::NewlineDelimited)
            .with_records(Records::False)
            .with_sample_size(-1)
            .with_union_by_name(true);
        assert_eq!(json.read_params().unwrap(), expected_read);
    }

    #[test]
    fn test_bad_columns_flag() {
        let cli = parse(&[
            "describe",
            "--source",
            "in.json",
            "--columns",
            "badtoken",
        ]);

        let Commands::Describe { json, .. } = cli.command else {
            panic!("expected describe");
        };
        assert!(matches!(
            json.read_params().unwrap_err(),
            Error::InvalidColumns { .. }
        ));
    }

    #[test]
    fn test_source_is_required() {
        let result = Cli::try_parse_from(["pqconv", "json2parquet", "--dest", "out.parquet"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_dry_run_conflicts_with_flatten() {
        let result = Cli::try_parse_from([
            "pqconv",
            "json2parquet",
            "--source",
            "in.json",
            "--dest",
            "out.parquet",
            "--flatten",
            "--dry-run",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_enum_value() {
        let result = Cli::try_parse_from([
            "pqconv",
            "--parquet-compression",
            "lzma",
            "describe",
            "--source",
            "in.json",
        ]);
        assert!(result.is_err());
    }
}
