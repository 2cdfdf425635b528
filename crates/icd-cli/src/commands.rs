use std::fs::File;
use std::io::{self, BufWriter, IsTerminal, Write};
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, info_span, warn};

use icd_ingest::{CsvOptions, load_diagnosis_csv, validate_records};
use icd_map::CatalogStatistics;
use icd_model::{MapperConfig, PatientMappings};
use icd_report::{ConfidenceThresholds, render_text_report, to_json, write_csv};

use icd_cli::pipeline::{ConfigOverrides, load_engine, map_records, resolve_config};

use crate::cli::{Cli, LookupArgs, MapArgs, OutputFormatArg};
use crate::types::{LookupResult, MapResult};

const PROGRESS_TEMPLATE: &str =
    "{spinner:.green} {prefix:.bold} [{elapsed_precise}] [{bar:32.cyan/blue}] {pos}/{len} ({percent}%)";

fn overrides(cli: &Cli) -> ConfigOverrides {
    ConfigOverrides {
        confidence_threshold: cli.threshold,
        max_suggestions: cli.max_suggestions,
    }
}

pub fn run_catalog(cli: &Cli) -> Result<CatalogStatistics> {
    let engine = load_engine(cli.catalog.as_deref(), cli.rules.as_deref())?;
    Ok(engine.catalog_statistics())
}

pub fn run_lookup(cli: &Cli, args: &LookupArgs) -> Result<LookupResult> {
    let config = resolve_config(cli.config.as_deref(), overrides(cli))?;
    let engine = load_engine(cli.catalog.as_deref(), cli.rules.as_deref())?;
    let results = engine.map_batch(&args.texts, &config);
    Ok(LookupResult { config, results })
}

pub fn run_map(cli: &Cli, args: &MapArgs) -> Result<MapResult> {
    let span = info_span!("map", input = %args.input.display());
    let _guard = span.enter();
    let start = Instant::now();

    let config = resolve_config(cli.config.as_deref(), overrides(cli))?;
    let engine = load_engine(cli.catalog.as_deref(), cli.rules.as_deref())?;

    let mut options = CsvOptions::default().with_diagnosis_column(args.column.as_str());
    if let Some(column) = &args.id_column {
        options = options.with_id_column(column.as_str());
    }
    let records = load_diagnosis_csv(&args.input, &options)
        .with_context(|| format!("load {}", args.input.display()))?;
    let ingest = validate_records(&records);
    for error in &ingest.validation_errors {
        warn!("{error}");
    }

    let progress = progress_bar(ingest.total_diagnoses as u64);
    let results = map_records(&engine, &records, &config, args.parallel, |done, _| {
        progress.set_position(done as u64);
    });
    progress.finish_and_clear();

    write_results(&results, &config, args.format, args.output.as_deref())?;
    info!(
        patients = results.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "map run finished"
    );

    Ok(MapResult {
        input: args.input.clone(),
        output: args.output.clone(),
        config,
        ingest,
        results,
    })
}

fn progress_bar(total: u64) -> ProgressBar {
    if !io::stderr().is_terminal() {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new(total);
    if let Ok(style) = ProgressStyle::with_template(PROGRESS_TEMPLATE) {
        bar.set_style(style.progress_chars("=> "));
    }
    bar.set_prefix("mapping");
    bar
}

fn write_results(
    results: &[PatientMappings],
    config: &MapperConfig,
    format: OutputFormatArg,
    output: Option<&Path>,
) -> Result<()> {
    let mut writer: Box<dyn Write> = match output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("create {}", path.display()))?,
        )),
        None => Box::new(io::stdout().lock()),
    };
    match format {
        OutputFormatArg::Csv => write_csv(results, &mut writer).context("write csv")?,
        OutputFormatArg::Json => {
            let json = to_json(results).context("serialize json")?;
            writeln!(writer, "{json}").context("write json")?;
        }
        OutputFormatArg::Text => {
            let report = render_text_report(
                results,
                config.confidence_threshold,
                &ConfidenceThresholds::default(),
            );
            writer.write_all(report.as_bytes()).context("write report")?;
        }
    }
    writer.flush().context("flush output")?;
    if let Some(path) = output {
        info!(path = %path.display(), "wrote mapping results");
    }
    Ok(())
}
