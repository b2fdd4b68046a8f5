//! Progress reporting and summaries for the CLI

use std::path::Path;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use wordsieve_core::{ImportReport, Persisted, RunSummary, TableCounts};

/// Spinner shown while a run is in progress
pub struct RunProgress {
    bar: ProgressBar,
}

impl RunProgress {
    /// Create a spinner; hidden when stdout carries JSON
    pub fn new(enabled: bool) -> Self {
        if !enabled {
            return Self {
                bar: ProgressBar::hidden(),
            };
        }

        let bar = ProgressBar::new_spinner();
        let style = ProgressStyle::default_spinner()
            .template("{spinner:.cyan} [{elapsed_precise}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        bar.set_style(style);
        bar.enable_steady_tick(Duration::from_millis(120));
        Self { bar }
    }

    pub fn stage(&self, message: &str) {
        self.bar.set_message(message.to_string());
    }

    pub fn finish(&self, message: &str) {
        self.bar.finish_with_message(message.to_string());
    }
}

/// Print a formatted summary of a pipeline run
pub fn print_summary_report(input: &Path, persisted: &Persisted, summary: &RunSummary) {
    println!("\n{}", "═".repeat(72));
    match persisted {
        Persisted::Table(_) => println!("Vocabulary Curation Complete"),
        Persisted::Review(_) => println!("Vocabulary Curation Stopped: Review Required"),
    }
    println!("{}", "═".repeat(72));
    println!("Input:              {}", input.display());

    match persisted {
        Persisted::Table(path) => println!("Output:             {}", path.display()),
        Persisted::Review(paths) => {
            println!(
                "Review files:       {} ({} words)",
                paths.len(),
                format_with_commas(summary.review_words)
            );
            for path in paths {
                println!("                    {}", path.display());
            }
        }
    }

    println!("{}", "─".repeat(72));
    println!("{:<30} {:>10} {:>10} {:>8} {:>9}", "Stage", "In", "Out", "Removed", "Time");
    for stage in &summary.stages {
        println!(
            "{:<30} {:>10} {:>10} {:>7.1}% {:>8.3}s",
            stage.stage,
            format_with_commas(stage.input),
            format_with_commas(stage.output),
            stage.reduction_pct(),
            stage.elapsed.as_secs_f64()
        );
    }
    println!("{}", "─".repeat(72));

    println!("Candidate words:    {}", format_with_commas(summary.input_words));
    if let Persisted::Table(_) = persisted {
        println!(
            "Saved:              {} words, {} lemmas",
            format_with_commas(summary.output_words),
            format_with_commas(summary.distinct_lemmas)
        );
    }
    println!("{}", "═".repeat(72));
}

pub fn print_import_report(table: &str, report: &ImportReport) {
    println!("Table {}:", table);
    println!("  inserted:  {}", format_with_commas(report.inserted));
    println!("  unchanged: {}", format_with_commas(report.unchanged));
    println!("  conflicts: {}", format_with_commas(report.conflicts.len()));
    for word in &report.conflicts {
        println!("    {}", word);
    }
}

pub fn print_store_counts(path: &Path, counts: &TableCounts) {
    println!("Annotation store: {}", path.display());
    println!("  exclusion:     {}", format_with_commas(counts.exclusion));
    println!("  manual_class:  {}", format_with_commas(counts.manual_class));
    println!("  manual_lemma:  {}", format_with_commas(counts.manual_lemma));
}

/// Format number with thousand separators
fn format_with_commas(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
