//! Composition of the political parties: size, age, sex and previous activity.

use log::debug;
use std::collections::HashMap;

use crate::model::*;

/// The number of bins of the age histograms when nothing else is requested.
pub const DEFAULT_AGE_BINS: usize = 12;

#[derive(PartialEq, Debug, Clone)]
pub struct PartySize {
    pub party: String,
    pub deputies: usize,
    /// Percentage (0-100) of all the deputies.
    pub share: f64,
}

#[derive(PartialEq, Debug, Clone)]
pub struct AgeBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
    pub probability: f64,
}

#[derive(PartialEq, Debug, Clone)]
pub struct WomenShare {
    pub party: String,
    pub female: usize,
    pub male: usize,
    /// Between 0 and 1.
    pub female_share: f64,
}

impl WomenShare {
    pub fn total(&self) -> usize {
        self.female + self.male
    }
}

/// Counts of labels, largest first, ties broken by label.
fn value_counts<'a, I: Iterator<Item = &'a str>>(labels: I) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for l in labels {
        *counts.entry(l).or_insert(0) += 1;
    }
    let mut res: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(l, c)| (l.to_string(), c))
        .collect();
    res.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    res
}

/// The number of deputies in each party, largest party first.
pub fn party_sizes(deputies: &[Deputy]) -> Vec<PartySize> {
    let total = deputies.len();
    value_counts(deputies.iter().map(|d| d.party.as_str()))
        .into_iter()
        .map(|(party, count)| PartySize {
            party,
            deputies: count,
            share: 100.0 * count as f64 / total as f64,
        })
        .collect()
}

/// An histogram of the ages of the deputies, with `bins` bins of equal width
/// between the youngest and the oldest. The last bin includes its upper bound.
/// Deputies with an unknown age are not counted.
pub fn age_histogram(deputies: &[&Deputy], bins: usize) -> Vec<AgeBin> {
    let ages: Vec<f64> = deputies
        .iter()
        .filter_map(|d| d.age)
        .map(|a| a as f64)
        .collect();
    if ages.is_empty() || bins == 0 {
        return vec![];
    }
    let mut lower = ages.iter().cloned().fold(f64::INFINITY, f64::min);
    let mut upper = ages.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    if lower == upper {
        lower -= 0.5;
        upper += 0.5;
    }
    let width = (upper - lower) / bins as f64;

    let mut counts: Vec<usize> = vec![0; bins];
    for a in ages.iter() {
        let idx = (((a - lower) / width) as usize).min(bins - 1);
        counts[idx] += 1;
    }
    debug!(
        "age_histogram: {} ages in [{}, {}]: {:?}",
        ages.len(),
        lower,
        upper,
        counts
    );
    let total = ages.len() as f64;
    counts
        .iter()
        .enumerate()
        .map(|(idx, count)| AgeBin {
            lower: lower + idx as f64 * width,
            upper: if idx == bins - 1 {
                upper
            } else {
                lower + (idx + 1) as f64 * width
            },
            count: *count,
            probability: *count as f64 / total,
        })
        .collect()
}

/// The proportion of women in each party, from the most to the least feminized.
pub fn women_share_by_party(deputies: &[Deputy]) -> Vec<WomenShare> {
    let mut by_party: HashMap<&str, (usize, usize)> = HashMap::new();
    for d in deputies.iter() {
        let e = by_party.entry(d.party.as_str()).or_insert((0, 0));
        match d.sex {
            Sex::Female => e.0 += 1,
            Sex::Male => e.1 += 1,
        }
    }
    let mut res: Vec<WomenShare> = by_party
        .into_iter()
        .map(|(party, (female, male))| WomenShare {
            party: party.to_string(),
            female,
            male,
            female_share: female as f64 / (female + male) as f64,
        })
        .collect();
    res.sort_by(|a, b| {
        b.female_share
            .total_cmp(&a.female_share)
            .then_with(|| a.party.cmp(&b.party))
    });
    res
}

/// The previous activities of the deputies, most frequent first.
pub fn activity_repartition(deputies: &[&Deputy]) -> Vec<(String, usize)> {
    value_counts(deputies.iter().map(|d| d.activity.as_str()))
}
