use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use wordsieve_filters::{Candidate, HeuristicChain, HeuristicConfig, StopWordList};

#[derive(Clone)]
struct Word(String, u64);

impl Candidate for Word {
    fn surface(&self) -> &str {
        &self.0
    }
    fn frequency(&self) -> u64 {
        self.1
    }
}

fn word_list(n: usize) -> Vec<Word> {
    let stems = ["garden", "running", "aeon", "pfft", "zzzap", "portal.hr", "the", "al-jabr"];
    (0..n)
        .map(|i| Word(format!("{}{}", stems[i % stems.len()], i % 97), (i % 11) as u64))
        .collect()
}

fn bench_chain(c: &mut Criterion) {
    let chain = HeuristicChain::with_stop_words(
        HeuristicConfig::default(),
        StopWordList::from_words(&["the", "and", "which"]),
    )
    .unwrap();

    let mut group = c.benchmark_group("heuristic_chain");
    for size in [10_000, 100_000] {
        let words = word_list(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_function(format!("{}_words", size), |b| {
            b.iter(|| black_box(chain.apply(words.clone())))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_chain);
criterion_main!(benches);
