mod cli;
mod pgn;

use std::io::Write;

use anyhow::{anyhow, Result};
use clap::Parser;
use cli::{AnalyzeCommand, Cli, Commands, CompareCommand, OptionsArgs, TraceCommand};
use common::{get_env_usize, ConfigLoader, FsExt};
use dotenv::dotenv;
use env_logger::Env;
use log::info;
use pgn::{cohort_name, open_output, read_records, write_json_lines};
use spbts::{analyze_collection, analyze_record, compare_cohorts, AnalysisOptions};

fn main() -> Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let mut builder = rayon::ThreadPoolBuilder::new();

    if let Some(num_threads) = get_env_usize("SPBTS_THREADS")? {
        builder = builder.num_threads(num_threads);
    }

    builder.build_global()?;

    let cli = Cli::parse();

    match &cli.command {
        Commands::Analyze(args) => analyze(args),
        Commands::Trace(args) => trace(args),
        Commands::Compare(args) => compare(args),
    }
}

fn analyze(args: &AnalyzeCommand) -> Result<()> {
    let options = load_options(&args.options)?;
    let records = read_records(&args.pgn)?;

    let outcome = analyze_collection(&records, &options);

    let mut writer = open_output(args.out.as_deref())?;
    write_json_lines(&mut *writer, &outcome.analyzed)?;

    Ok(())
}

fn trace(args: &TraceCommand) -> Result<()> {
    let options = load_options(&args.options)?;
    let records = read_records(&args.pgn)?;

    let record = args
        .game
        .checked_sub(1)
        .and_then(|index| records.get(index))
        .ok_or_else(|| {
            anyhow!(
                "Game {} not found, the file holds {} games",
                args.game,
                records.len()
            )
        })?;

    let (analysis, trace) = analyze_record(record, &options)?;
    info!(
        "Tracing game {:?}: {} plies",
        analysis.metadata.game_id, analysis.plies_analyzed
    );

    let mut writer = open_output(args.out.as_deref())?;
    write_json_lines(&mut *writer, trace.rows())?;

    Ok(())
}

fn compare(args: &CompareCommand) -> Result<()> {
    let options = load_options(&args.options)?;

    let name1 = args.name1.clone().unwrap_or_else(|| cohort_name(&args.cohort1));
    let name2 = args.name2.clone().unwrap_or_else(|| cohort_name(&args.cohort2));

    let outcome1 = analyze_collection(&read_records(&args.cohort1)?, &options);
    let outcome2 = analyze_collection(&read_records(&args.cohort2)?, &options);

    let comparison = compare_cohorts(
        (name1.as_str(), outcome1.analyzed.as_slice()),
        (name2.as_str(), outcome2.analyzed.as_slice()),
    );

    let mut writer = open_output(args.out.as_deref())?;
    serde_json::to_writer_pretty(&mut writer, &comparison)?;
    writeln!(writer)?;
    writer.flush()?;

    Ok(())
}

fn load_options(args: &OptionsArgs) -> Result<AnalysisOptions> {
    let config_path = args.config.relative_to_cwd()?;

    let config = if config_path.is_file() {
        ConfigLoader::new(&config_path, "spbts".to_string())?
    } else {
        info!("No config found at {:?}, using defaults", config_path);
        ConfigLoader::from_env("spbts".to_string())
    };

    let mut options: AnalysisOptions = config.load()?;
    apply_overrides(&mut options, args)?;

    options.validate()?;

    info!("{:?}", options);

    Ok(options)
}

/// Command line flags take precedence over the config file and the environment.
fn apply_overrides(options: &mut AnalysisOptions, args: &OptionsArgs) -> Result<()> {
    if let Some(max_plies) = args.max_plies {
        options.max_plies = max_plies;
    }

    if let Some(file) = &args.file {
        options.distinguished_file = file.parse()?;
    }

    if let Some(min_exposure) = args.min_exposure {
        options.min_exposure = min_exposure;
    }

    Ok(())
}
