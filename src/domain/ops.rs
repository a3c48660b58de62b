//! Sequence operations over in-memory collections
//!
//! Each function is a thin, typed wrapper around an iterator, `itertools`
//! or `rayon` primitive. Inputs are borrowed and never mutated; results
//! keep input order unless the operation sorts.

use std::collections::HashSet;
use std::fmt::Display;
use std::hash::Hash;

use itertools::{Itertools, MinMaxResult};
use rayon::prelude::*;

use super::decimal::Decimal;
use super::error::{DomainError, DomainResult};
use super::value::Value;

/// How predicate matching and `find_any` iterate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionMode {
    Sequential,
    #[default]
    Parallel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// Render every element in order, separated by `sep`.
pub fn for_each_joined<T: Display>(items: &[T], sep: &str) -> String {
    items.iter().join(sep)
}

/// Keep elements in the half-open range `[lower, upper)`.
pub fn filter_range<T: PartialOrd + Clone>(items: &[T], lower: &T, upper: &T) -> Vec<T> {
    items
        .iter()
        .filter(|x| *x >= lower && *x < upper)
        .cloned()
        .collect()
}

/// Upper-case the first character of every word longer than one character.
pub fn capitalize_words<S: AsRef<str>>(words: &[S]) -> Vec<String> {
    words
        .iter()
        .map(|word| {
            let word = word.as_ref();
            let mut chars = word.chars();
            match chars.next() {
                Some(first) if word.chars().count() > 1 => {
                    first.to_uppercase().chain(chars).collect()
                }
                _ => word.to_string(),
            }
        })
        .collect()
}

/// Collect several lists into one list of lists.
pub fn group<T, I>(lists: I) -> Vec<Vec<T>>
where
    I: IntoIterator<Item = Vec<T>>,
{
    lists.into_iter().collect()
}

/// Remove duplicates, keeping the first occurrence of each element.
pub fn distinct<T: Eq + Hash + Clone>(items: &[T]) -> Vec<T> {
    items.iter().unique().cloned().collect()
}

/// Flatten nested lists and map every element.
pub fn flat_map<T, R, F>(groups: &[Vec<T>], f: F) -> Vec<R>
where
    F: Fn(&T) -> R,
{
    groups.iter().flatten().map(f).collect()
}

/// Incrementally assembled sequence.
#[derive(Debug, Clone, Default)]
pub struct SequenceBuilder<T> {
    items: Vec<T>,
}

impl<T> SequenceBuilder<T> {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn add(mut self, item: T) -> Self {
        self.items.push(item);
        self
    }

    pub fn build(self) -> Vec<T> {
        self.items
    }
}

pub fn to_set<T: Eq + Hash + Clone>(items: &[T]) -> HashSet<T> {
    items.iter().cloned().collect()
}

/// Stable sort in the requested order.
pub fn sorted<T: Ord + Clone>(items: &[T], order: SortOrder) -> Vec<T> {
    match order {
        SortOrder::Ascending => items.iter().cloned().sorted().collect(),
        SortOrder::Descending => items.iter().cloned().sorted_by(|a, b| b.cmp(a)).collect(),
    }
}

pub fn count<T>(items: &[T]) -> u64 {
    items.len() as u64
}

pub fn min<T: Ord + Clone>(items: &[T]) -> Option<T> {
    items.iter().min().cloned()
}

pub fn max<T: Ord + Clone>(items: &[T]) -> Option<T> {
    items.iter().max().cloned()
}

/// Smallest and largest element in a single pass.
pub fn min_max<T: Ord + Clone>(items: &[T]) -> Option<(T, T)> {
    match items.iter().minmax() {
        MinMaxResult::NoElements => None,
        MinMaxResult::OneElement(x) => Some((x.clone(), x.clone())),
        MinMaxResult::MinMax(lo, hi) => Some((lo.clone(), hi.clone())),
    }
}

/// Skip `skip` elements, then take at most `limit`.
///
/// Skipping past the end yields an empty result; a limit past the end
/// yields the remainder.
pub fn page<T: Clone>(items: &[T], skip: usize, limit: usize) -> Vec<T> {
    items.iter().skip(skip).take(limit).cloned().collect()
}

/// Append `b` to `a`, unifying element types as `Value`.
pub fn concat<A, B>(a: &[A], b: &[B]) -> Vec<Value>
where
    A: Clone + Into<Value>,
    B: Clone + Into<Value>,
{
    a.iter()
        .cloned()
        .map(Into::into)
        .chain(b.iter().cloned().map(Into::into))
        .collect()
}

/// True if any element satisfies `pred`. Short-circuits in both modes.
pub fn any_match<T, P>(items: &[T], pred: P, mode: ExecutionMode) -> bool
where
    T: Sync,
    P: Fn(&T) -> bool + Sync + Send,
{
    match mode {
        ExecutionMode::Sequential => items.iter().any(pred),
        ExecutionMode::Parallel => items.par_iter().any(pred),
    }
}

/// True if every element satisfies `pred`; vacuously true when empty.
pub fn all_match<T, P>(items: &[T], pred: P, mode: ExecutionMode) -> bool
where
    T: Sync,
    P: Fn(&T) -> bool + Sync + Send,
{
    match mode {
        ExecutionMode::Sequential => items.iter().all(pred),
        ExecutionMode::Parallel => items.par_iter().all(pred),
    }
}

/// Reduce without an identity value; `None` for an empty sequence.
pub fn join_reduce<S: AsRef<str>>(items: &[S], sep: &str) -> Option<String> {
    items
        .iter()
        .map(|s| s.as_ref().to_string())
        .reduce(|acc, next| format!("{acc}{sep}{next}"))
}

pub fn find_first<T: Clone>(items: &[T]) -> Option<T> {
    items.first().cloned()
}

/// Any element of the sequence.
///
/// Sequential mode always yields the first element; parallel mode yields
/// whichever element a worker reaches first.
pub fn find_any<T: Clone + Sync>(items: &[T], mode: ExecutionMode) -> Option<T> {
    match mode {
        ExecutionMode::Sequential => items.first().cloned(),
        ExecutionMode::Parallel => items.par_iter().find_any(|_| true).cloned(),
    }
}

/// Sum of the half-open range `start..end`, in closed form.
///
/// An empty range sums to `0`; a sum outside `i64` is `Overflow`.
pub fn range_sum(start: i64, end: i64) -> DomainResult<i64> {
    if end <= start {
        return Ok(0);
    }
    let overflow = DomainError::Overflow {
        operation: "range_sum",
    };
    let (first, last) = (i128::from(start), i128::from(end) - 1);
    // first + last and the length differ in parity, so the product is even
    let total = (first + last)
        .checked_mul(last - first + 1)
        .ok_or(overflow.clone())?
        / 2;
    i64::try_from(total).map_err(|_| overflow)
}

/// Float sum with Neumaier compensation.
///
/// Low-order bits lost when adding a small term to a large running sum are
/// carried separately, so `[1e16, 1.0, 1.0]` sums to `1e16 + 2.0`.
pub fn sum_f64(items: &[f64]) -> f64 {
    let mut sum = 0.0f64;
    let mut compensation = 0.0f64;
    let mut naive = 0.0f64;
    for &x in items {
        let t = sum + x;
        if sum.abs() >= x.abs() {
            compensation += (sum - t) + x;
        } else {
            compensation += (x - t) + sum;
        }
        sum = t;
        naive += x;
    }
    let total = sum + compensation;
    // inf - inf in the compensation term yields NaN; the plain sum is right
    if total.is_nan() && naive.is_infinite() {
        naive
    } else {
        total
    }
}

/// Integer reduce with identity `0`.
pub fn fold_sum(items: &[i64]) -> DomainResult<i64> {
    items
        .iter()
        .try_fold(0i64, |acc, x| acc.checked_add(*x))
        .ok_or(DomainError::Overflow {
            operation: "fold_sum",
        })
}

/// Exact decimal reduce with identity `Decimal::ZERO`.
pub fn sum_decimals(items: &[Decimal]) -> DomainResult<Decimal> {
    items
        .iter()
        .try_fold(Decimal::ZERO, |acc, x| acc.checked_add(*x))
        .ok_or(DomainError::Overflow {
            operation: "sum_decimals",
        })
}
