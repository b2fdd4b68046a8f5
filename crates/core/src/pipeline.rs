//! Vocabulary curation pipeline
//!
//! Sequences the stages over a candidate word list:
//!
//! 1. load (lemma computed once per word)
//! 2. heuristic chain, then a manual-label consistency check on the survivors
//! 3. exclusion lookup; any unresolved word stops the run for review
//! 4. manual classification override
//! 5. manual lemma override
//! 6. statistical classifier on a dedicated worker pool
//! 7. sort by lemma
//!
//! Every dependency is constructed by the caller and handed in through
//! [`PipelineDeps`]; the pipeline itself holds no global state.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use ahash::AHashSet;
use rayon::prelude::*;
use serde::Serialize;
use tracing::{info, warn};
use wordsieve_filters::{HeuristicChain, StageReport};
use wordsieve_formats::{write_output_table, write_review_batch, OutputRow, WordFrequency};

use crate::candidate::CandidateWord;
use crate::classifier::WordClassifier;
use crate::lemmatizer::Lemmatize;
use crate::store::AnnotationSnapshot;
use crate::{Error, Result};

/// Words that could not be resolved against the exclusion table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewBatch {
    words: Vec<String>,
}

impl ReviewBatch {
    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Split into files of at most `size` words
    pub fn chunks(&self, size: usize) -> impl Iterator<Item = &[String]> {
        self.words.chunks(size.max(1))
    }
}

/// Counts for a whole run
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunSummary {
    pub stages: Vec<StageReport>,
    pub input_words: usize,
    pub output_words: usize,
    pub distinct_lemmas: usize,
    pub review_words: usize,
}

/// Result of a run: either every word was decided or humans must label some
#[derive(Debug)]
pub enum PipelineOutcome {
    Completed {
        records: Vec<OutputRow>,
        summary: RunSummary,
    },
    ReviewRequired {
        batch: ReviewBatch,
        summary: RunSummary,
    },
}

/// Files written for an outcome
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Persisted {
    Table(PathBuf),
    Review(Vec<PathBuf>),
}

impl PipelineOutcome {
    pub fn summary(&self) -> &RunSummary {
        match self {
            PipelineOutcome::Completed { summary, .. } => summary,
            PipelineOutcome::ReviewRequired { summary, .. } => summary,
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, PipelineOutcome::Completed { .. })
    }

    /// Write the output table, or the review files if the run stopped early
    pub fn persist(&self, output: &Path, review_dir: &Path, chunk_size: usize) -> Result<Persisted> {
        match self {
            PipelineOutcome::Completed { records, summary } => {
                write_output_table(output, records)?;
                info!(
                    "saved {} words {} lemmas in {:?}",
                    summary.output_words, summary.distinct_lemmas, output
                );
                Ok(Persisted::Table(output.to_path_buf()))
            }
            PipelineOutcome::ReviewRequired { batch, summary } => {
                let paths = write_review_batch(review_dir, batch.words(), chunk_size)?;
                warn!(
                    "{}/{} words not found in the exclusion table, label them and re-run",
                    batch.len(),
                    summary.input_words
                );
                Ok(Persisted::Review(paths))
            }
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PipelineConfig {
    /// Classification workers (None = one per core)
    pub num_threads: Option<usize>,
}

/// Everything the pipeline needs, built once at process start
pub struct PipelineDeps {
    pub heuristics: HeuristicChain,
    pub lemmatizer: Arc<dyn Lemmatize>,
    pub annotations: Arc<AnnotationSnapshot>,
    pub classifier: Arc<dyn WordClassifier>,
}

pub struct Pipeline {
    heuristics: HeuristicChain,
    lemmatizer: Arc<dyn Lemmatize>,
    annotations: Arc<AnnotationSnapshot>,
    classifier: Arc<dyn WordClassifier>,
    pool: rayon::ThreadPool,
}

impl Pipeline {
    pub fn new(deps: PipelineDeps, config: PipelineConfig) -> Result<Self> {
        let num_threads = match config.num_threads {
            Some(0) => {
                return Err(Error::InvalidConfig(
                    "num_threads must be at least 1".to_string(),
                ))
            }
            Some(n) => n,
            None => std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1),
        };

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .thread_name(|i| format!("classify-{}", i))
            .build()
            .map_err(|e| Error::InvalidConfig(format!("failed to build worker pool: {}", e)))?;

        info!("Pipeline ready with {} classification workers", num_threads);
        Ok(Self {
            heuristics: deps.heuristics,
            lemmatizer: deps.lemmatizer,
            annotations: deps.annotations,
            classifier: deps.classifier,
            pool,
        })
    }

    pub fn num_threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Run every stage over the input rows
    pub fn run(&self, rows: Vec<WordFrequency>) -> Result<PipelineOutcome> {
        let mut summary = RunSummary {
            input_words: rows.len(),
            ..Default::default()
        };

        let (words, report) = self.load(rows);
        summary.stages.push(report);

        let (words, reports) = self.heuristics.apply(words);
        summary.stages.extend(reports);

        check_manual_consistency(&words, &self.annotations)?;

        let start = Instant::now();
        let input = words.len();
        let (words, batch) = check_exclusions(words, &self.annotations);
        let report = StageReport::new("remove_excluded_words", input, words.len(), start.elapsed());
        report.log();
        summary.stages.push(report);

        if !batch.is_empty() {
            summary.review_words = batch.len();
            return Ok(PipelineOutcome::ReviewRequired { batch, summary });
        }

        let (words, report) = wordsieve_filters::heuristics::timed("remove_using_manual_labels", words, |ws| {
            apply_manual_class(ws, &self.annotations)
        });
        summary.stages.push(report);

        let (words, report) = wordsieve_filters::heuristics::timed("add_manual_lemmas", words, |ws| {
            apply_manual_lemmas(ws, &self.annotations)
        });
        summary.stages.push(report);

        let (mut words, report) =
            wordsieve_filters::heuristics::timed("remove_using_model", words, |ws| self.classify(ws));
        summary.stages.push(report);

        sort_by_lemma(&mut words);

        summary.output_words = words.len();
        summary.distinct_lemmas = words
            .iter()
            .map(CandidateWord::canonical_lemma)
            .collect::<AHashSet<_>>()
            .len();

        let records = words.iter().map(CandidateWord::to_output).collect();
        Ok(PipelineOutcome::Completed { records, summary })
    }

    /// Turn input rows into candidates, lemmatizing each word once
    pub fn load(&self, rows: Vec<WordFrequency>) -> (Vec<CandidateWord>, StageReport) {
        let start = Instant::now();
        let input = rows.len();
        let lemmatizer = &*self.lemmatizer;
        let words: Vec<CandidateWord> = rows
            .into_iter()
            .enumerate()
            .map(|(position, row)| CandidateWord::from_row(row, position, lemmatizer))
            .collect();

        let report = StageReport::new("load_words", input, words.len(), start.elapsed());
        report.log();
        (words, report)
    }

    /// Keep words a human accepted, or that the model accepts by surface or lemma
    pub fn classify(&self, words: Vec<CandidateWord>) -> Vec<CandidateWord> {
        let classifier = &*self.classifier;
        self.pool.install(|| {
            words
                .into_par_iter()
                .filter(|w| w.keep || classifier.predict(&w.surface) || classifier.predict(&w.lemma))
                .collect()
        })
    }
}

/// Fail if a word and its lemma carry opposite manual labels
pub fn check_manual_consistency(words: &[CandidateWord], annotations: &AnnotationSnapshot) -> Result<()> {
    let mut conflicts: Vec<String> = words
        .iter()
        .filter(|w| w.surface != w.lemma)
        .filter_map(|w| {
            match (annotations.manual_class(&w.surface), annotations.manual_class(&w.lemma)) {
                (Some(a), Some(b)) if a != b => Some(format!("{} ({})", w.surface, w.lemma)),
                _ => None,
            }
        })
        .collect();

    if conflicts.is_empty() {
        return Ok(());
    }
    conflicts.sort();
    conflicts.dedup();
    Err(Error::ConflictingManualClass(conflicts))
}

/// Drop excluded words; collect words neither the surface nor the lemma of
/// which is in the exclusion table.
///
/// The surface entry always decides when present, even when it says "not
/// excluded"; the lemma is consulted only for unknown surfaces.
pub fn check_exclusions(
    words: Vec<CandidateWord>,
    annotations: &AnnotationSnapshot,
) -> (Vec<CandidateWord>, ReviewBatch) {
    let mut kept = Vec::with_capacity(words.len());
    let mut batch = ReviewBatch::default();
    let mut queued: AHashSet<String> = AHashSet::new();

    for word in words {
        let excluded = match annotations.exclusion(&word.surface) {
            Some(found) => found,
            None => match annotations.exclusion(&word.lemma) {
                Some(found) => found,
                None => {
                    if queued.insert(word.surface.clone()) {
                        batch.words.push(word.surface);
                    }
                    continue;
                }
            },
        };
        if !excluded {
            kept.push(word);
        }
    }

    (kept, batch)
}

/// Apply human verdicts: a "not target" label on surface or lemma drops the
/// word; a "target" label marks it to bypass the classifier.
pub fn apply_manual_class(words: Vec<CandidateWord>, annotations: &AnnotationSnapshot) -> Vec<CandidateWord> {
    words
        .into_iter()
        .filter_map(|mut word| {
            let labels = [
                annotations.manual_class(&word.surface),
                annotations.manual_class(&word.lemma),
            ];
            if labels.contains(&Some(false)) {
                return None;
            }
            if labels.contains(&Some(true)) {
                word.keep = true;
            }
            Some(word)
        })
        .collect()
}

pub fn apply_manual_lemmas(mut words: Vec<CandidateWord>, annotations: &AnnotationSnapshot) -> Vec<CandidateWord> {
    for word in &mut words {
        word.manual_lemma = annotations.manual_lemma(&word.surface).map(str::to_string);
    }
    words
}

/// Order by output lemma, then by input position
pub fn sort_by_lemma(words: &mut [CandidateWord]) {
    words.sort_by(|a, b| {
        a.canonical_lemma()
            .cmp(b.canonical_lemma())
            .then(a.position.cmp(&b.position))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lemmatizer::RuleLemmatizer;
    use ahash::AHashMap;
    use wordsieve_filters::{HeuristicConfig, StopWordList};
    use wordsieve_formats::REVIEW_CHUNK_SIZE;

    /// Predicts true only for a fixed set of words
    struct StubClassifier(AHashSet<&'static str>);

    impl StubClassifier {
        fn accepting(words: &[&'static str]) -> Arc<dyn WordClassifier> {
            Arc::new(Self(words.iter().copied().collect()))
        }
    }

    impl WordClassifier for StubClassifier {
        fn predict(&self, word: &str) -> bool {
            self.0.contains(word)
        }
    }

    fn flags(pairs: &[(&str, bool)]) -> AHashMap<String, bool> {
        pairs.iter().map(|(w, f)| (w.to_string(), *f)).collect()
    }

    fn snapshot(
        exclusion: &[(&str, bool)],
        manual_class: &[(&str, bool)],
        manual_lemma: &[(&str, &str)],
    ) -> AnnotationSnapshot {
        AnnotationSnapshot::from_maps(
            flags(exclusion),
            flags(manual_class),
            manual_lemma
                .iter()
                .map(|(w, l)| (w.to_string(), l.to_string()))
                .collect(),
        )
        .unwrap()
    }

    fn pipeline_with(
        annotations: AnnotationSnapshot,
        classifier: Arc<dyn WordClassifier>,
        threads: usize,
    ) -> Pipeline {
        let heuristics = HeuristicChain::with_stop_words(
            HeuristicConfig::default(),
            StopWordList::from_words(&["the", "which"]),
        )
        .unwrap();
        Pipeline::new(
            PipelineDeps {
                heuristics,
                lemmatizer: Arc::new(RuleLemmatizer::new()),
                annotations: Arc::new(annotations),
                classifier,
            },
            PipelineConfig {
                num_threads: Some(threads),
            },
        )
        .unwrap()
    }

    fn rows(pairs: &[(&str, u64)]) -> Vec<WordFrequency> {
        pairs
            .iter()
            .enumerate()
            .map(|(i, (w, f))| WordFrequency::new(*w, *f, i + 2))
            .collect()
    }

    fn candidates(words: &[&str]) -> Vec<CandidateWord> {
        let lem = RuleLemmatizer::new();
        words
            .iter()
            .enumerate()
            .map(|(i, w)| CandidateWord::new(*w, 10, i, &lem))
            .collect()
    }

    fn surfaces(words: &[CandidateWord]) -> Vec<&str> {
        words.iter().map(|w| w.surface.as_str()).collect()
    }

    fn completed(outcome: PipelineOutcome) -> Vec<OutputRow> {
        match outcome {
            PipelineOutcome::Completed { records, .. } => records,
            PipelineOutcome::ReviewRequired { batch, .. } => {
                panic!("unexpected review batch: {:?}", batch.words())
            }
        }
    }

    #[test]
    fn test_excluded_word_dropped_regardless_of_classifier() {
        let annotations = snapshot(&[("zagreb", true), ("garden", false)], &[], &[]);
        let pipeline = pipeline_with(annotations, StubClassifier::accepting(&["zagreb", "garden"]), 2);

        let records = completed(pipeline.run(rows(&[("zagreb", 50), ("garden", 9)])).unwrap());
        let words: Vec<_> = records.iter().map(|r| r.word.as_str()).collect();
        assert_eq!(words, vec!["garden"]);
    }

    #[test]
    fn test_manual_target_label_bypasses_classifier() {
        let annotations = snapshot(&[("foo", false)], &[("foo", true)], &[]);
        let pipeline = pipeline_with(annotations, StubClassifier::accepting(&[]), 2);

        let records = completed(pipeline.run(rows(&[("foo", 5)])).unwrap());
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].word, "foo");
    }

    #[test]
    fn test_surface_entry_takes_priority_over_lemma() {
        let annotations = snapshot(
            &[("gardens", true), ("garden", false), ("houses", false), ("house", true)],
            &[],
            &[],
        );
        let (kept, batch) = check_exclusions(candidates(&["gardens", "houses"]), &annotations);
        assert!(batch.is_empty());
        // surface says excluded even though the lemma is fine; surface says
        // fine even though the lemma is excluded
        assert_eq!(surfaces(&kept), vec!["houses"]);
    }

    #[test]
    fn test_lemma_consulted_for_unknown_surface() {
        let annotations = snapshot(&[("garden", false), ("house", true)], &[], &[]);
        let (kept, batch) = check_exclusions(candidates(&["gardens", "houses"]), &annotations);
        assert!(batch.is_empty());
        assert_eq!(surfaces(&kept), vec!["gardens"]);
    }

    #[test]
    fn test_review_batch_lists_each_unknown_word_once() {
        let annotations = snapshot(&[("garden", false)], &[], &[]);
        let words = candidates(&["windows", "gardens", "windows", "kuća", "garden"]);

        let (kept, batch) = check_exclusions(words.clone(), &annotations);
        assert_eq!(surfaces(&kept), vec!["gardens", "garden"]);
        assert_eq!(batch.words(), &["windows".to_string(), "kuća".to_string()]);

        // same input and store give the same result
        let (kept_again, batch_again) = check_exclusions(words, &annotations);
        assert_eq!(kept, kept_again);
        assert_eq!(batch, batch_again);
    }

    #[test]
    fn test_run_stops_for_review() {
        let annotations = snapshot(&[("garden", false)], &[], &[]);
        let pipeline = pipeline_with(annotations, StubClassifier::accepting(&["garden"]), 1);

        let outcome = pipeline
            .run(rows(&[("garden", 9), ("unknown", 9), ("xyzzy", 1)]))
            .unwrap();
        assert!(!outcome.is_complete());
        assert_eq!(outcome.summary().review_words, 1);
        match outcome {
            PipelineOutcome::ReviewRequired { batch, .. } => {
                assert_eq!(batch.words(), &["unknown".to_string()])
            }
            _ => panic!("expected review"),
        }
    }

    #[test]
    fn test_review_chunks_cover_batch() {
        let batch = ReviewBatch {
            words: (0..10).map(|i| format!("w{}", i)).collect(),
        };
        let chunks: Vec<_> = batch.chunks(4).collect();
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks.concat(), batch.words().to_vec());
    }

    #[test]
    fn test_manual_rejection_on_lemma_drops_word() {
        let annotations = snapshot(&[], &[("window", false), ("garden", true)], &[]);
        let out = apply_manual_class(candidates(&["windows", "gardens", "house"]), &annotations);

        assert_eq!(surfaces(&out), vec!["gardens", "house"]);
        assert!(out[0].keep);
        assert!(!out[1].keep);
    }

    #[test]
    fn test_conflicting_manual_labels_abort() {
        let annotations = snapshot(&[], &[("gardens", true), ("garden", false)], &[]);
        let err = check_manual_consistency(&candidates(&["gardens", "house"]), &annotations).unwrap_err();
        match err {
            Error::ConflictingManualClass(words) => assert_eq!(words, vec!["gardens (garden)"]),
            other => panic!("unexpected error: {}", other),
        }

        let pipeline = pipeline_with(annotations, StubClassifier::accepting(&[]), 1);
        assert!(pipeline.run(rows(&[("gardens", 9)])).is_err());
    }

    #[test]
    fn test_conflict_on_filtered_word_does_not_abort() {
        let annotations = snapshot(&[("garden", false)], &[("gardens", true), ("garden", false)], &[]);
        let pipeline = pipeline_with(annotations, StubClassifier::accepting(&["garden"]), 1);

        // "gardens" is rare and never reaches the manual labels
        let outcome = pipeline.run(rows(&[("gardens", 1), ("garden", 9)])).unwrap();
        let summary = outcome.summary().clone();
        assert!(completed(outcome).is_empty());
        let rare = summary
            .stages
            .iter()
            .find(|s| s.stage == "remove_infrequent_words")
            .unwrap();
        assert_eq!((rare.input, rare.output), (2, 1));
    }

    #[test]
    fn test_manual_lemma_used_for_sorting_and_output() {
        let annotations = snapshot(
            &[("better", false), ("apple", false), ("zebra", false)],
            &[],
            &[("better", "good")],
        );
        let pipeline = pipeline_with(
            annotations,
            StubClassifier::accepting(&["better", "apple", "zebra"]),
            2,
        );

        let records = completed(
            pipeline
                .run(rows(&[("zebra", 4), ("better", 7), ("apple", 3)]))
                .unwrap(),
        );
        let lemmas: Vec<_> = records.iter().map(|r| r.lemma.as_str()).collect();
        assert_eq!(lemmas, vec!["apple", "good", "zebra"]);
        assert_eq!(records[1].word, "better");
    }

    #[test]
    fn test_classifier_checks_surface_and_lemma() {
        let pipeline = pipeline_with(
            AnnotationSnapshot::default(),
            StubClassifier::accepting(&["garden", "house"]),
            3,
        );
        let out = pipeline.classify(candidates(&["gardens", "houses", "windows"]));
        let mut kept = surfaces(&out);
        kept.sort();
        assert_eq!(kept, vec!["gardens", "houses"]);
    }

    #[test]
    fn test_output_sorted_and_independent_of_workers() {
        let input = [
            ("windows", 9),
            ("gardens", 4),
            ("garden", 12),
            ("apple", 3),
            ("house", 8),
            ("houses", 5),
        ];
        let exclusion: Vec<(&str, bool)> = input.iter().map(|(w, _)| (*w, false)).collect();
        let accept: Vec<&'static str> = input.iter().map(|(w, _)| *w).collect();

        let run = |threads| {
            let pipeline = pipeline_with(
                snapshot(&exclusion, &[], &[]),
                StubClassifier::accepting(&accept),
                threads,
            );
            completed(pipeline.run(rows(&input)).unwrap())
        };

        let single = run(1);
        let many = run(4);
        assert_eq!(single, many);

        let words: Vec<_> = single.iter().map(|r| r.word.as_str()).collect();
        assert_eq!(words, vec!["apple", "gardens", "garden", "house", "houses", "windows"]);
    }

    #[test]
    fn test_summary_counts() {
        let annotations = snapshot(&[("gardens", false), ("garden", false), ("house", false)], &[], &[]);
        let pipeline = pipeline_with(
            annotations,
            StubClassifier::accepting(&["garden", "house"]),
            2,
        );
        let outcome = pipeline
            .run(rows(&[("gardens", 4), ("garden", 12), ("house", 8), ("aaa", 9)]))
            .unwrap();

        let summary = outcome.summary();
        assert_eq!(summary.input_words, 4);
        assert_eq!(summary.output_words, 3);
        assert_eq!(summary.distinct_lemmas, 2);
        assert_eq!(summary.stages.first().unwrap().stage, "load_words");
        assert_eq!(summary.stages.last().unwrap().stage, "remove_using_model");
        for pair in summary.stages.windows(2) {
            assert_eq!(pair[0].output, pair[1].input);
        }
    }

    #[test]
    fn test_persist_writes_table_or_review_files() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.csv");
        let review_dir = dir.path().join("review");

        let pipeline = pipeline_with(
            snapshot(&[("garden", false)], &[], &[]),
            StubClassifier::accepting(&["garden"]),
            1,
        );

        let done = pipeline.run(rows(&[("garden", 9)])).unwrap();
        assert_eq!(
            done.persist(&output, &review_dir, 49_000).unwrap(),
            Persisted::Table(output.clone())
        );
        assert_eq!(
            std::fs::read_to_string(&output).unwrap(),
            "word,lemma,frequency\ngarden,garden,9\n"
        );

        let stopped = pipeline.run(rows(&[("garden", 9), ("house", 9)])).unwrap();
        match stopped.persist(&output, &review_dir, 49_000).unwrap() {
            Persisted::Review(paths) => {
                assert_eq!(paths.len(), 1);
                assert_eq!(std::fs::read_to_string(&paths[0]).unwrap(), "house");
            }
            other => panic!("expected review files, got {:?}", other),
        }
    }

    /// Distinct words with vowels, no repeated letters and no inflection
    fn synthetic_word(n: usize) -> String {
        let consonants = b"bcdfghjklm";
        let mut word = String::from("z");
        for digit in n.to_string().bytes() {
            word.push(consonants[(digit - b'0') as usize] as char);
            word.push('a');
        }
        word
    }

    #[test]
    fn test_large_review_batch_split_across_files() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.csv");
        let review_dir = dir.path().join("review");

        let total = REVIEW_CHUNK_SIZE + 1;
        let input: Vec<WordFrequency> = (0..total)
            .map(|i| WordFrequency::new(synthetic_word(i), 10, i + 2))
            .collect();
        let expected: AHashSet<String> = input.iter().map(|row| row.word.clone()).collect();
        assert_eq!(expected.len(), total);

        let pipeline = pipeline_with(AnnotationSnapshot::default(), StubClassifier::accepting(&[]), 2);
        let outcome = pipeline.run(input).unwrap();
        assert_eq!(outcome.summary().review_words, total);

        let paths = match outcome.persist(&output, &review_dir, REVIEW_CHUNK_SIZE).unwrap() {
            Persisted::Review(paths) => paths,
            other => panic!("expected review files, got {:?}", other),
        };
        assert_eq!(paths.len(), 2);
        assert!(!output.exists());

        let files: Vec<String> = paths
            .iter()
            .map(|p| std::fs::read_to_string(p).unwrap())
            .collect();
        assert_eq!(files[0].lines().count(), REVIEW_CHUNK_SIZE);
        assert_eq!(files[1].lines().count(), 1);

        let mut seen = AHashSet::new();
        for line in files.iter().flat_map(|f| f.lines()) {
            assert!(seen.insert(line.to_string()), "{} written twice", line);
        }
        assert_eq!(seen, expected);
    }

    #[test]
    fn test_zero_threads_rejected() {
        let heuristics = HeuristicChain::with_stop_words(HeuristicConfig::default(), StopWordList::default()).unwrap();
        let result = Pipeline::new(
            PipelineDeps {
                heuristics,
                lemmatizer: Arc::new(RuleLemmatizer::new()),
                annotations: Arc::new(AnnotationSnapshot::default()),
                classifier: StubClassifier::accepting(&[]),
            },
            PipelineConfig { num_threads: Some(0) },
        );
        assert!(matches!(result, Err(Error::InvalidConfig(_))));
    }
}
