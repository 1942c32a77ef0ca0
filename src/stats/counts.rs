//! Frequency Counting Module
//! Value counts, histograms, cross tabulation and word frequencies.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::HashMap;

/// Words kept for the word cloud.
pub const MAX_WORDS: usize = 200;

static WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\w[\w']+").expect("valid word regex"));

/// English stop-words, matching the usual word-cloud default set.
const STOPWORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "also", "am", "an", "and", "any",
    "are", "aren't", "as", "at", "be", "because", "been", "before", "being", "below", "between",
    "both", "but", "by", "can", "can't", "cannot", "com", "could", "couldn't", "did", "didn't",
    "do", "does", "doesn't", "doing", "don't", "down", "during", "each", "else", "ever", "few",
    "for", "from", "further", "get", "had", "hadn't", "has", "hasn't", "have", "haven't",
    "having", "he", "he'd", "he'll", "hence", "her", "here", "hers", "herself", "him", "himself",
    "his", "how", "however", "http", "i", "i'd", "i'll", "i'm", "i've", "if", "in", "into", "is",
    "isn't", "it", "its", "itself", "just", "k", "let", "like", "me", "more", "most", "mustn't",
    "my", "myself", "no", "nor", "not", "of", "off", "on", "once", "only", "or", "other",
    "otherwise", "ought", "our", "ours", "ourselves", "out", "over", "own", "r", "same", "shall",
    "shan't", "she", "she'd", "she'll", "should", "shouldn't", "since", "so", "some", "such",
    "than", "that", "the", "their", "theirs", "them", "themselves", "then", "there", "therefore",
    "these", "they", "they'd", "they'll", "they're", "they've", "this", "those", "through", "to",
    "too", "under", "until", "up", "very", "was", "wasn't", "we", "we'd", "we'll", "we're",
    "we've", "were", "weren't", "what", "when", "where", "which", "while", "who", "whom", "why",
    "with", "won't", "would", "wouldn't", "www", "you", "you'd", "you'll", "you're", "you've",
    "your", "yours", "yourself", "yourselves",
];

/// A label and how many rows carry it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub label: String,
    pub count: usize,
}

/// One equal-width histogram bin, `[start, end)` except the last.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

/// Contingency table: `counts[row][col]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CrossTab {
    pub rows: Vec<String>,
    pub columns: Vec<String>,
    pub counts: Vec<Vec<u32>>,
}

impl CrossTab {
    pub fn max_count(&self) -> u32 {
        self.counts
            .iter()
            .flat_map(|r| r.iter().copied())
            .max()
            .unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordFrequency {
    pub word: String,
    pub count: usize,
}

/// Count occurrences, most frequent first. Ties are ordered by label.
pub fn value_counts<I, S>(values: I) -> Vec<CategoryCount>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut counts: HashMap<String, usize> = HashMap::new();
    for v in values {
        *counts.entry(v.as_ref().to_string()).or_default() += 1;
    }

    let mut out: Vec<CategoryCount> = counts
        .into_iter()
        .map(|(label, count)| CategoryCount { label, count })
        .collect();
    out.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.label.cmp(&b.label)));
    out
}

/// The `n` most frequent values.
pub fn top_n<I, S>(values: I, n: usize) -> Vec<CategoryCount>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut counts = value_counts(values);
    counts.truncate(n);
    counts
}

/// Equal-width histogram over the finite values.
pub fn histogram(values: &[f64], bins: usize) -> Vec<HistogramBin> {
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() || bins == 0 {
        return Vec::new();
    }

    let min = finite.iter().copied().fold(f64::INFINITY, f64::min);
    let max = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    if min == max {
        return vec![HistogramBin {
            start: min - 0.5,
            end: max + 0.5,
            count: finite.len(),
        }];
    }

    let width = (max - min) / bins as f64;
    let mut out: Vec<HistogramBin> = (0..bins)
        .map(|i| HistogramBin {
            start: min + i as f64 * width,
            end: min + (i + 1) as f64 * width,
            count: 0,
        })
        .collect();

    for v in finite {
        let idx = (((v - min) / width).floor() as usize).min(bins - 1);
        out[idx].count += 1;
    }
    out
}

/// Tabulate `(row, column)` pairs for the given row and column labels.
/// Pairs outside those labels are ignored.
pub fn cross_tab(pairs: &[(String, String)], rows: &[String], columns: &[String]) -> CrossTab {
    let mut rows = rows.to_vec();
    let mut columns = columns.to_vec();
    rows.sort();
    columns.sort();

    let mut counts = vec![vec![0u32; columns.len()]; rows.len()];
    for (r, c) in pairs {
        if let (Ok(ri), Ok(ci)) = (rows.binary_search(r), columns.binary_search(c)) {
            counts[ri][ci] += 1;
        }
    }

    CrossTab {
        rows,
        columns,
        counts,
    }
}

/// Normalise one raw token; `None` if it should not be counted.
fn normalize_token(token: &str) -> Option<&str> {
    let token = token
        .strip_suffix("'s")
        .or_else(|| token.strip_suffix("'S"))
        .unwrap_or(token);
    if token.chars().count() < 2 || token.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    if STOPWORDS.contains(&token.to_lowercase().as_str()) {
        return None;
    }
    Some(token)
}

/// Word frequencies over free text, case-insensitive, keeping the most
/// common spelling of each word.
pub fn word_frequencies(text: &str, max_words: usize) -> Vec<WordFrequency> {
    // lowercase key -> (total, spelling -> count); ties pick the smallest spelling
    let mut groups: HashMap<String, (usize, HashMap<&str, usize>)> = HashMap::new();

    for m in WORD_RE.find_iter(text) {
        let Some(token) = normalize_token(m.as_str()) else {
            continue;
        };
        let entry = groups.entry(token.to_lowercase()).or_default();
        entry.0 += 1;
        *entry.1.entry(token).or_default() += 1;
    }

    let mut out: Vec<WordFrequency> = groups
        .into_values()
        .map(|(count, spellings)| {
            let word = spellings
                .into_iter()
                .max_by(|a, b| a.1.cmp(&b.1).then_with(|| b.0.cmp(a.0)))
                .map(|(w, _)| w.to_string())
                .unwrap_or_default();
            WordFrequency { word, count }
        })
        .collect();

    out.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.word.cmp(&b.word)));
    out.truncate(max_words);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn value_counts_orders_by_count_then_label() {
        let counts = value_counts(["TV-MA", "PG", "TV-MA", "R", "PG", "TV-MA"]);
        let pairs: Vec<(&str, usize)> = counts
            .iter()
            .map(|c| (c.label.as_str(), c.count))
            .collect();
        assert_eq!(pairs, vec![("TV-MA", 3), ("PG", 2), ("R", 1)]);
    }

    #[test]
    fn top_n_truncates() {
        let top = top_n(["a", "b", "b", "c", "c", "c"], 2);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].label, "c");
        assert_eq!(top[1].label, "b");
    }

    #[test]
    fn histogram_covers_range() {
        let bins = histogram(&[0.0, 1.0, 2.0, 3.0, 4.0, f64::NAN], 4);
        assert_eq!(bins.len(), 4);
        assert_eq!(bins[0].start, 0.0);
        assert_eq!(bins[3].end, 4.0);
        let counts: Vec<usize> = bins.iter().map(|b| b.count).collect();
        // Max lands in the last bin.
        assert_eq!(counts, vec![1, 1, 1, 2]);
    }

    #[test]
    fn histogram_of_constant_values() {
        let bins = histogram(&[90.0, 90.0], 30);
        assert_eq!(bins.len(), 1);
        assert_eq!(bins[0].count, 2);
        assert!(histogram(&[], 30).is_empty());
    }

    #[test]
    fn cross_tab_counts_pairs() {
        let pairs = vec![
            ("Dramas".to_string(), "India".to_string()),
            ("Dramas".to_string(), "India".to_string()),
            ("Comedies".to_string(), "France".to_string()),
            ("Horror".to_string(), "France".to_string()),
        ];
        let rows = vec!["Dramas".to_string(), "Comedies".to_string()];
        let cols = vec!["India".to_string(), "France".to_string()];

        let tab = cross_tab(&pairs, &rows, &cols);
        assert_eq!(tab.rows, vec!["Comedies", "Dramas"]);
        assert_eq!(tab.columns, vec!["France", "India"]);
        assert_eq!(tab.counts, vec![vec![1, 0], vec![0, 2]]);
        assert_eq!(tab.max_count(), 2);
    }

    #[test]
    fn word_frequencies_group_case_and_drop_noise() {
        let words = word_frequencies(
            "Chris O'Dowd and Chris Pine, chris 2021 of Melissa's Melissa a",
            10,
        );
        assert_eq!(
            words,
            vec![
                WordFrequency {
                    word: "Chris".to_string(),
                    count: 3
                },
                WordFrequency {
                    word: "Melissa".to_string(),
                    count: 2
                },
                WordFrequency {
                    word: "O'Dowd".to_string(),
                    count: 1
                },
                WordFrequency {
                    word: "Pine".to_string(),
                    count: 1
                },
            ]
        );
    }

    #[test]
    fn name_particles_are_kept() {
        let words: Vec<String> = word_frequencies(
            "Robert De Niro, Jean-Claude Van Damme, Guillermo del Toro, Ana de la Reguera",
            20,
        )
        .into_iter()
        .map(|w| w.word)
        .collect();

        for particle in ["De", "Van", "del", "la"] {
            assert!(
                words.iter().any(|w| w.eq_ignore_ascii_case(particle)),
                "{particle} missing from {words:?}"
            );
        }
        // "De" and "de" group together; the tie resolves to the smaller spelling.
        assert!(words.contains(&"De".to_string()));
        assert!(words.contains(&"Niro".to_string()));
    }

    #[test]
    fn spelling_ties_resolve_to_smallest() {
        let words = word_frequencies("Smith smith", 5);
        assert_eq!(
            words,
            vec![WordFrequency {
                word: "Smith".to_string(),
                count: 2
            }]
        );
    }
}
