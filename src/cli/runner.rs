//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, JsonArgs, OutputFormat};
use crate::convert::{copy_statement, Converter};
use crate::database::DuckDbEngine;
use crate::error::{Result, ResultExt};
use crate::schema::TableDesc;
use std::io::Write;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command, writing command output to stdout
    pub fn run(&self) -> Result<()> {
        let stdout = std::io::stdout();
        self.run_with(&mut stdout.lock())
    }

    /// Run the CLI command, writing command output to `out`
    pub fn run_with(&self, out: &mut impl Write) -> Result<()> {
        match &self.cli.command {
            Commands::Json2Parquet {
                source,
                dest,
                json,
                flatten,
                dry_run,
            } => self.json2parquet(source, dest, json, *flatten, *dry_run, out),
            Commands::Describe {
                source,
                json,
                flatten,
                output,
            } => self.describe(source, json, *flatten, *output, out),
        }
    }

    fn converter(&self) -> Result<Converter<DuckDbEngine>> {
        let engine = DuckDbEngine::open_in_memory().context("failed getting duckdb client")?;
        Ok(Converter::new(engine))
    }

    fn json2parquet(
        &self,
        source: &str,
        dest: &str,
        json: &JsonArgs,
        flatten: bool,
        dry_run: bool,
        out: &mut impl Write,
    ) -> Result<()> {
        let read = json.read_params().context("failed getting json read flags")?;
        let write = self.cli.parquet.write_params();

        if dry_run {
            writeln!(out, "{}", copy_statement(source, dest, &write, &read))?;
            return Ok(());
        }

        let converter = self.converter()?;
        let result = if flatten {
            converter.json_to_flattened_parquet(source, dest, &write, &read)
        } else {
            converter.json_to_parquet(source, dest, &write, &read)
        };
        result.context("failed converting json to parquet")
    }

    fn describe(
        &self,
        source: &str,
        json: &JsonArgs,
        flatten: bool,
        output: OutputFormat,
        out: &mut impl Write,
    ) -> Result<()> {
        let read = json.read_params().context("failed getting json read flags")?;
        let converter = self.converter()?;

        let table = if flatten {
            converter.describe_json_flattened(source, &read)?
        } else {
            converter.describe_json(source, &read)?
        };

        if table.is_empty() {
            tracing::warn!("No columns found in {}", source);
        }
        print_table(&table, output, out)?;

        tracing::debug!(
            "Described {} columns using {}",
            table.len(),
            converter.engine().location()
        );
        Ok(())
    }
}

fn print_table(table: &TableDesc, output: OutputFormat, out: &mut impl Write) -> Result<()> {
    match output {
        OutputFormat::Json => {
            writeln!(out, "{}", serde_json::to_string_pretty(table)?)?;
        }
        OutputFormat::Pretty => {
            let width = table.iter().map(|c| c.name.len()).max().unwrap_or(0);
            for column in table {
                writeln!(out, "{:<width$}  {}", column.name, column.column_type)?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn run(args: &[&str]) -> Result<String> {
        let cli = Cli::try_parse_from(std::iter::once("pqconv").chain(args.iter().copied()))
            .unwrap();
        let mut out = Vec::new();
        Runner::new(cli).run_with(&mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    fn write_json(dir: &std::path::Path) -> String {
        let path = dir.join("in.json");
        std::fs::write(&path, r#"[{"id": 1, "s": {"a": "x", "b": 2.5}}]"#).unwrap();
        path.to_string_lossy().to_string()
    }

    #[test]
    fn test_dry_run_prints_statement() {
        let out = run(&[
            "json2parquet",
            "--source",
            "in.json",
            "--dest",
            "out.parquet",
            "--dry-run",
        ])
        .unwrap();

        assert!(out.starts_with("COPY (SELECT * FROM read_json('in.json'"));
        assert!(out.trim_end().ends_with("(FORMAT PARQUET, COMPRESSION 'snappy')"));
    }

    #[test]
    fn test_bad_columns_reported_with_context() {
        let err = run(&[
            "json2parquet",
            "--source",
            "in.json",
            "--dest",
            "out.parquet",
            "--columns",
            "badtoken",
            "--dry-run",
        ])
        .unwrap_err();

        assert_eq!(
            err.to_string(),
            "failed getting json read flags: Incorrect columns format: badtoken"
        );
    }

    #[test]
    fn test_json2parquet_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let source = write_json(dir.path());
        let dest = dir.path().join("out.parquet");
        let dest_str = dest.to_string_lossy().to_string();

        let out = run(&[
            "json2parquet",
            "--source",
            source.as_str(),
            "--dest",
            dest_str.as_str(),
        ])
        .unwrap();

        assert!(out.is_empty());
        assert!(dest.exists());
    }

    #[test]
    fn test_json2parquet_missing_source() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("out.parquet");
        let dest_str = dest.to_string_lossy().to_string();

        let err = run(&[
            "json2parquet",
            "--source",
            "/nonexistent/in.json",
            "--dest",
            dest_str.as_str(),
        ])
        .unwrap_err();

        assert!(err
            .to_string()
            .starts_with("failed converting json to parquet: "));
        assert!(!dest.exists());
    }

    #[test]
    fn test_describe_pretty() {
        let dir = tempfile::tempdir().unwrap();
        let source = write_json(dir.path());

        let out = run(&["describe", "--source", source.as_str(), "--flatten"]).unwrap();

        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines, vec!["id   BIGINT", "s_a  VARCHAR", "s_b  DOUBLE"]);
    }

    #[test]
    fn test_describe_json() {
        let dir = tempfile::tempdir().unwrap();
        let source = write_json(dir.path());

        let out = run(&["describe", "--source", source.as_str(), "--output", "json"]).unwrap();

        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["columns"][0]["name"], "id");
        assert_eq!(value["columns"][1]["name"], "s");
        assert_eq!(value["columns"][1]["type"], "STRUCT(a VARCHAR, b DOUBLE)");
    }
}
