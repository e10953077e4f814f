// Criterion benchmarks for gramspell.
//
// The dictionary is generated from syllable combinations, so no external
// word list is needed.
//
// Run:
//   cargo bench -p gramspell

use std::sync::Arc;

use criterion::{Criterion, criterion_group, criterion_main};
use gramspell::{Popularity, SpellChecker, SpellOptions, WordList};
use gramspell_index::{IndexLocation, MemoryIndex, Record};

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

const SYLLABLES: &[&str] = &[
    "ka", "lo", "mi", "ten", "ser", "va", "nu", "pri", "sto", "el", "dar", "ko",
];

/// Every three-syllable combination: 1728 words.
fn generated_words() -> Vec<String> {
    let mut words = Vec::with_capacity(SYLLABLES.len().pow(3));
    for a in SYLLABLES {
        for b in SYLLABLES {
            for c in SYLLABLES {
                words.push(format!("{a}{b}{c}"));
            }
        }
    }
    words
}

/// Drop one char from the middle of up to `n` words spread over the list.
fn misspellings(words: &[String], n: usize) -> Vec<String> {
    let step = (words.len() / n.max(1)).max(1);
    words
        .iter()
        .step_by(step)
        .take(n)
        .map(|w| {
            let mut chars: Vec<char> = w.chars().collect();
            if !chars.is_empty() {
                chars.remove(chars.len() / 2);
            }
            chars.into_iter().collect()
        })
        .collect()
}

fn indexed_checker(words: &[String]) -> SpellChecker {
    let checker = SpellChecker::new(Arc::new(MemoryIndex::new()), SpellOptions::default());
    checker
        .index_dictionary(&mut WordList::from(words.to_vec()))
        .expect("index dictionary");
    checker
}

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

/// Index the whole generated dictionary into a fresh index.
fn bench_index_dictionary(c: &mut Criterion) {
    let words = generated_words();

    c.bench_function("index_1728_words", |b| {
        b.iter(|| {
            std::hint::black_box(indexed_checker(&words));
        });
    });
}

/// Suggest 5 corrections for 50 misspelled words.
fn bench_suggest_similar(c: &mut Criterion) {
    let words = generated_words();
    let checker = indexed_checker(&words);
    let queries = misspellings(&words, 50);

    c.bench_function("suggest_50_misspelled", |b| {
        b.iter(|| {
            for word in &queries {
                std::hint::black_box(checker.suggest_similar(word, 5).ok());
            }
        });
    });
}

/// More queries requested than the dictionary has words.
fn bench_suggest_small_dictionary(c: &mut Criterion) {
    let words: Vec<String> = generated_words().into_iter().take(20).collect();
    let checker = indexed_checker(&words);
    let queries = misspellings(&words, 50);
    assert_eq!(queries.len(), words.len());

    c.bench_function("suggest_small_dictionary", |b| {
        b.iter(|| {
            for word in &queries {
                std::hint::black_box(checker.suggest_similar(word, 5).ok());
            }
        });
    });
}

/// Same as `suggest_50_misspelled`, restricted to the words of a reference
/// index.
fn bench_suggest_with_popularity(c: &mut Criterion) {
    let words = generated_words();
    let checker = indexed_checker(&words);
    let queries = misspellings(&words, 50);

    let reference = MemoryIndex::with_records(
        words
            .iter()
            .step_by(3)
            .map(|w| Record::new().with("body", w.as_str())),
    );
    let view = reference.searcher().expect("reference searcher");

    c.bench_function("suggest_50_misspelled_popular", |b| {
        b.iter(|| {
            for word in &queries {
                let popularity = Popularity::new(&*view, "body");
                std::hint::black_box(checker.suggest(word, 5, Some(popularity)).ok());
            }
        });
    });
}

criterion_group!(
    benches,
    bench_index_dictionary,
    bench_suggest_similar,
    bench_suggest_small_dictionary,
    bench_suggest_with_popularity,
);
criterion_main!(benches);
