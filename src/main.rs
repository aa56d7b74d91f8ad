use clap::{CommandFactory, Parser};
use colored::*;
use cvscan::calibration::{self, THRESHOLD_RANGE};
use cvscan::cli::{Cli, Commands, OutputFormat, clean_keywords};
use cvscan::config::Config;
use cvscan::corpus::Corpus;
use cvscan::error::{CvscanError, Result as CvscanResult};
use cvscan::fuzzy;
use cvscan::matcher::Algorithm;
use cvscan::metrics::Metrics;
use cvscan::search::{SearchEngine, SearchOutcome, SearchRequest};
use env_logger::{Builder, Env, Target};
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};
use std::fs;
use std::io;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

fn main() -> CvscanResult<()> {
    let cli = Cli::parse();
    setup_logging(&cli)?;

    let start_time = Instant::now();
    info!("Application started with command: {:?}", cli.command);

    let config = Config::load(cli.config.as_deref())?;

    match &cli.command {
        Commands::Search {
            keywords,
            corpus,
            algorithm,
            top,
            threshold,
            recursive,
            format,
            metrics,
        } => {
            let algorithm: Algorithm = match algorithm {
                Some(name) => name.parse()?,
                None => config.algorithm()?,
            };
            let mut engine_config = config.engine_config()?;
            if let Some(threshold) = threshold {
                engine_config.threshold = fuzzy::validate_threshold(*threshold)?;
            }
            let keywords = clean_keywords(keywords);
            if keywords.is_empty() {
                return Err(CvscanError::Config("no non-blank keywords given".to_string()));
            }
            let top_n = top.unwrap_or(config.search.top_n);
            let request = SearchRequest::new(keywords.as_slice(), algorithm, top_n);

            let pb = spinner()?;
            pb.set_message(format!("Loading corpus from {}", corpus.display()));
            let corpus = Corpus::load(corpus, *recursive)?;
            if corpus.is_empty() {
                warn!("Corpus is empty, nothing to search");
            }
            pb.set_message(format!("Searching {} documents", corpus.len()));

            let engine = SearchEngine::new(engine_config, Arc::new(Metrics::new()));
            let outcome = engine.search(&request, &corpus)?;
            pb.finish_and_clear();

            match format {
                OutputFormat::Text => print_search_text(&outcome, algorithm),
                OutputFormat::Json => print_search_json(&outcome, algorithm)?,
            }
            if *metrics {
                println!("{}", engine.metrics.gather());
            }
        }
        Commands::Calibrate {
            folds,
            dataset,
            format,
        } => {
            let dataset = match dataset {
                Some(path) => calibration::load_dataset(path)?,
                None => calibration::default_dataset(),
            };
            let folds = folds.unwrap_or(config.calibration.folds);
            info!("Calibrating over {} labeled pairs with {folds} folds", dataset.len());

            let pb = ProgressBar::new(THRESHOLD_RANGE.clone().count() as u64).with_style(
                ProgressStyle::default_bar()
                    .template(
                        "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
                    )
                    .map_err(|e| CvscanError::Other(e.to_string()))?
                    .progress_chars("#>-"),
            );
            let result = calibration::calibrate_with(&dataset, folds, |threshold, f1| {
                pb.set_message(format!("threshold {threshold}: F1 {f1:.3}"));
                pb.inc(1);
            })?;
            pb.finish_and_clear();

            match format {
                OutputFormat::Text => {
                    println!(
                        "{} {}%",
                        "Calibrated threshold:".green().bold(),
                        result.threshold.to_string().bold()
                    );
                    println!("Mean F1 over {folds} folds: {:.4}", result.f1);
                }
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&result)?);
                }
            }
        }
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(*shell, &mut cmd, "cvscan", &mut io::stdout());
        }
    }

    info!("Application finished in {:.2?}", start_time.elapsed());
    Ok(())
}

fn spinner() -> CvscanResult<ProgressBar> {
    let style = ProgressStyle::default_spinner()
        .template("{spinner:.green} [{elapsed_precise}] {msg}")
        .map_err(|e| CvscanError::Other(e.to_string()))?
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏");
    Ok(ProgressBar::new_spinner().with_style(style))
}

fn print_search_text(outcome: &SearchOutcome, algorithm: Algorithm) {
    if outcome.results.is_empty() {
        println!("{}", "No matching documents".yellow());
    }
    for (rank, result) in outcome.results.iter().enumerate() {
        println!(
            "{}. {} {} ({} matches)",
            rank + 1,
            "Document".bold(),
            result.id.to_string().cyan().bold(),
            result.total()
        );
        for (keyword, count) in &result.matches {
            println!("   {}: {}", keyword.green(), count);
        }
    }

    println!();
    println!(
        "Exact search ({}): {} ms",
        algorithm.name(),
        outcome.exact_elapsed_ms()
    );
    if outcome.used_fuzzy() {
        println!(
            "{} {} ms",
            "Fuzzy fallback:".yellow(),
            outcome.fuzzy_elapsed_ms()
        );
    }
}

fn print_search_json(outcome: &SearchOutcome, algorithm: Algorithm) -> CvscanResult<()> {
    let report = serde_json::json!({
        "algorithm": algorithm.to_string(),
        "used_fuzzy": outcome.used_fuzzy(),
        "exact_elapsed_ms": outcome.exact_elapsed_ms(),
        "fuzzy_elapsed_ms": outcome.fuzzy_elapsed_ms(),
        "results": outcome.results,
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn setup_logging(cli: &Cli) -> CvscanResult<()> {
    let default_level = if cli.verbose { "debug" } else { "info" };
    let mut builder = Builder::from_env(Env::default().default_filter_or(default_level));

    builder.format(|buf, record| {
        use std::io::Write;
        writeln!(
            buf,
            "{} [{}] [{}] {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
            record.level(),
            record.module_path().unwrap_or("unknown"),
            record.args()
        )
    });

    if let Some(log_path) = &cli.log {
        create_parent_dir(log_path)?;
        let log_file = fs::File::create(log_path).map_err(CvscanError::Io)?;
        builder.target(Target::Pipe(Box::new(log_file)));
    } else {
        builder.target(Target::Stderr);
    }

    builder
        .try_init()
        .map_err(|e| CvscanError::Other(e.to_string()))?;
    Ok(())
}

fn create_parent_dir(path: &Path) -> CvscanResult<()> {
    if let Some(parent_dir) = path.parent() {
        if !parent_dir.as_os_str().is_empty() && !parent_dir.exists() {
            fs::create_dir_all(parent_dir).map_err(CvscanError::Io)?;
        }
    }
    Ok(())
}
