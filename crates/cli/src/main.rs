//! wordsieve CLI
//!
//! Curates a candidate word list into a lemma-sorted vocabulary, using
//! heuristics, a human-maintained annotation store and a word classifier.

mod config;
mod labels;
mod progress;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;
use wordsieve_core::{
    AnnotationStore, NgramClassifier, Persisted, Pipeline, PipelineConfig, PipelineDeps,
    PipelineOutcome, RuleLemmatizer, Table, WordClassifier,
};
use wordsieve_filters::HeuristicChain;
use wordsieve_formats::read_word_list;

use config::SieveConfig;
use progress::RunProgress;

/// Exit status when the run stopped to wait for human review
const EXIT_REVIEW_REQUIRED: u8 = 2;

#[derive(Parser)]
#[command(name = "wordsieve")]
#[command(version, about = "Vocabulary curation for corpus building", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file (YAML or TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Annotation store directory (overrides config)
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output statistics in JSON format
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Filter a word list into a lemma-sorted vocabulary
    Run {
        /// Input word list (`word,frequency`, optionally gzipped)
        #[arg(short, long)]
        input: PathBuf,

        /// Output table (`word,lemma,frequency`)
        #[arg(short, long)]
        output: PathBuf,

        /// Classifier model file
        #[arg(long)]
        model: Option<PathBuf>,

        /// Directory for review files
        #[arg(long)]
        review_dir: Option<PathBuf>,

        /// Number of classification workers
        #[arg(long)]
        threads: Option<usize>,
    },

    /// Append labeled rows to an annotation table
    Annotate {
        /// Table to append to
        #[arg(short, long, value_enum)]
        table: TableArg,

        /// Labeled file: `word,0|1` or, for manual-lemma, `word,lemma`
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Train the classifier from the manual classification table
    Train {
        /// Additional labeled `word,0|1` file
        #[arg(long)]
        extra: Option<PathBuf>,

        /// Where to write the model (defaults to the configured model path)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show annotation table sizes
    Stats,

    /// Write a config file with every default filled in
    InitConfig {
        #[arg(value_name = "PATH")]
        path: PathBuf,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum TableArg {
    Exclusion,
    ManualClass,
    ManualLemma,
}

impl From<TableArg> for Table {
    fn from(arg: TableArg) -> Self {
        match arg {
            TableArg::Exclusion => Table::Exclusion,
            TableArg::ManualClass => Table::ManualClass,
            TableArg::ManualLemma => Table::ManualLemma,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_ansi(!cli.json) // Disable colors if JSON output
        .with_writer(std::io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Error: failed to install logger: {}", e);
        return ExitCode::FAILURE;
    }

    match execute(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn execute(cli: Cli) -> Result<ExitCode> {
    let mut config = SieveConfig::load_or_default(cli.config.as_deref())?;
    if let Some(store) = cli.store {
        config.store.path = store;
    }

    match cli.command {
        Commands::Run {
            input,
            output,
            model,
            review_dir,
            threads,
        } => {
            if let Some(model) = model {
                config.classifier.model = model;
            }
            if let Some(dir) = review_dir {
                config.output.review_dir = dir;
            }
            if threads.is_some() {
                config.classifier.threads = threads;
            }
            run_pipeline(&input, &output, &config, cli.json)
        }
        Commands::Annotate { table, file } => {
            annotate(table.into(), &file, &config, cli.json)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Train { extra, output } => {
            let output = output.unwrap_or_else(|| config.classifier.model.clone());
            train(extra.as_deref(), &output, &config, cli.json)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Stats => {
            show_stats(&config, cli.json)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::InitConfig { path } => {
            config.save(&path)?;
            info!("Wrote config to {:?}", path);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Completions { shell } => {
            generate_completions(shell);
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn open_store(config: &SieveConfig) -> Result<AnnotationStore> {
    AnnotationStore::open(&config.store.path)
        .with_context(|| format!("Failed to open annotation store: {}", config.store.path.display()))
}

fn build_pipeline(config: &SieveConfig) -> Result<Pipeline> {
    let store = open_store(config)?;
    let annotations = Arc::new(store.snapshot()?);

    let classifier: Arc<dyn WordClassifier> = Arc::new(NgramClassifier::load(&config.classifier.model)?);

    let mut lemmatizer = RuleLemmatizer::new();
    if let Some(lexicon) = &config.lemmatizer.lexicon {
        lemmatizer = lemmatizer
            .with_lexicon_file(lexicon)
            .with_context(|| format!("Failed to load lemma lexicon: {}", lexicon.display()))?;
    }

    let heuristics = HeuristicChain::new(config.heuristics.clone())?;

    let pipeline = Pipeline::new(
        PipelineDeps {
            heuristics,
            lemmatizer: Arc::new(lemmatizer),
            annotations,
            classifier,
        },
        PipelineConfig {
            num_threads: config.classifier.threads,
        },
    )?;
    Ok(pipeline)
}

fn run_pipeline(input: &Path, output: &Path, config: &SieveConfig, json_output: bool) -> Result<ExitCode> {
    info!("Starting vocabulary curation");
    info!("  Input: {:?}", input);
    info!("  Output: {:?}", output);
    info!("  Store: {:?}", config.store.path);
    info!("  Model: {:?}", config.classifier.model);

    let progress = RunProgress::new(!json_output);

    progress.stage("Loading annotation store and classifier");
    let pipeline = build_pipeline(config)?;

    progress.stage("Reading word list");
    let rows = read_word_list(input)
        .with_context(|| format!("Failed to read word list: {}", input.display()))?;

    progress.stage("Filtering");
    let outcome = pipeline.run(rows)?;

    progress.stage("Writing results");
    let persisted = outcome.persist(output, &config.output.review_dir, config.output.review_chunk_size)?;
    progress.finish(if outcome.is_complete() {
        "Complete!"
    } else {
        "Review required"
    });

    if json_output {
        let files: Vec<String> = match &persisted {
            Persisted::Table(path) => vec![path.to_string_lossy().to_string()],
            Persisted::Review(paths) => paths.iter().map(|p| p.to_string_lossy().to_string()).collect(),
        };
        let report = serde_json::json!({
            "input": input.to_string_lossy().to_string(),
            "status": match outcome {
                PipelineOutcome::Completed { .. } => "completed",
                PipelineOutcome::ReviewRequired { .. } => "review_required",
            },
            "files": files,
            "summary": outcome.summary(),
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        progress::print_summary_report(input, &persisted, outcome.summary());
    }

    if outcome.is_complete() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(EXIT_REVIEW_REQUIRED))
    }
}

fn annotate(table: Table, file: &Path, config: &SieveConfig, json_output: bool) -> Result<()> {
    let store = open_store(config)?;

    let report = match table {
        Table::ManualLemma => store.import_lemmas(&labels::read_lemmas(file)?)?,
        _ => store.import_flags(table, &labels::read_flags(file)?)?,
    };

    for word in &report.conflicts {
        warn!("{}: {} conflicts with the stored value, skipped", table.tree_name(), word);
    }

    if json_output {
        let output = serde_json::json!({
            "table": table.tree_name(),
            "report": report,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        progress::print_import_report(table.tree_name(), &report);
    }
    Ok(())
}

fn train(extra: Option<&Path>, output: &Path, config: &SieveConfig, json_output: bool) -> Result<()> {
    let store = open_store(config)?;
    let mut samples = store.manual_class_rows()?;
    info!("Loaded {} labeled words from the manual classification table", samples.len());

    if let Some(extra) = extra {
        let rows = labels::read_flags(extra)?;
        info!("Loaded {} extra labeled words from {:?}", rows.len(), extra);
        samples.extend(rows);
    }

    let params = &config.classifier.training;
    let model = NgramClassifier::train(&samples, params)?;
    model
        .save(output)
        .with_context(|| format!("Failed to write model: {}", output.display()))?;

    if json_output {
        let report = serde_json::json!({
            "model": output.to_string_lossy().to_string(),
            "samples": samples.len(),
            "target_samples": samples.iter().filter(|(_, label)| *label).count(),
            "params": params,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    }
    Ok(())
}

fn show_stats(config: &SieveConfig, json_output: bool) -> Result<()> {
    let store = open_store(config)?;
    let counts = store.counts();

    if json_output {
        let report = serde_json::json!({
            "store": store.path().to_string_lossy().to_string(),
            "tables": counts,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        progress::print_store_counts(store.path(), &counts);
    }
    Ok(())
}

fn generate_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, &mut std::io::stdout());
}
