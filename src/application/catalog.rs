//! Catalog of worked sequence-processing examples
//!
//! Every example builds its input from literals, runs one operation and
//! returns the console lines it would print. Examples are independent of
//! each other; `run_all` executes them in catalog order.

use itertools::Itertools;
use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::{debug, instrument};

use crate::application::error::{ApplicationError, ApplicationResult};
use crate::config::Settings;
use crate::domain::ops;
use crate::domain::{require, Decimal, DomainResult, ExecutionMode, SequenceBuilder, SortOrder};

/// Execution context shared by all examples of a run.
#[derive(Debug)]
pub struct RunContext {
    /// Separator placed between printed elements.
    pub separator: String,
    /// Mode used by the matching and `find-any` examples.
    pub mode: ExecutionMode,
    pool: Option<ThreadPool>,
}

impl Default for RunContext {
    fn default() -> Self {
        Self {
            separator: "\t".into(),
            mode: ExecutionMode::Parallel,
            pool: None,
        }
    }
}

impl RunContext {
    pub fn new(separator: impl Into<String>, mode: ExecutionMode) -> Self {
        Self {
            separator: separator.into(),
            mode,
            pool: None,
        }
    }

    /// Build a context from settings, with a dedicated rayon pool when
    /// `threads` is configured.
    pub fn from_settings(settings: &Settings) -> ApplicationResult<Self> {
        let mode = if settings.parallel {
            ExecutionMode::Parallel
        } else {
            ExecutionMode::Sequential
        };
        let pool = match settings.threads {
            Some(n) => Some(
                ThreadPoolBuilder::new()
                    .num_threads(n)
                    .build()
                    .map_err(|e| ApplicationError::ThreadPool {
                        message: e.to_string(),
                    })?,
            ),
            None => None,
        };
        debug!("from_settings: mode={:?}, threads={:?}", mode, settings.threads);
        Ok(Self {
            separator: settings.separator.clone(),
            mode,
            pool,
        })
    }

    fn install<R: Send>(&self, op: impl FnOnce() -> R + Send) -> R {
        match &self.pool {
            Some(pool) => pool.install(op),
            None => op(),
        }
    }
}

type Runner = fn(&RunContext) -> DomainResult<Vec<String>>;

/// A named, independently runnable example.
#[derive(Debug, Clone, Copy)]
pub struct Example {
    pub name: &'static str,
    pub summary: &'static str,
    runner: Runner,
}

impl Example {
    #[instrument(skip(self, ctx), fields(example = self.name))]
    pub fn run(&self, ctx: &RunContext) -> ApplicationResult<Vec<String>> {
        let lines = ctx.install(|| (self.runner)(ctx))?;
        debug!("produced {} lines", lines.len());
        Ok(lines)
    }
}

/// Output of one example.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExampleReport {
    pub name: &'static str,
    pub lines: Vec<String>,
}

const fn example(name: &'static str, summary: &'static str, runner: Runner) -> Example {
    Example {
        name,
        summary,
        runner,
    }
}

static CATALOG: &[Example] = &[
    example("for-each", "visit every element in order", for_each),
    example("filter", "keep values in [18, 45)", filter),
    example("map", "capitalize words longer than one char", map),
    example("of", "collect two lists into a list of lists", of),
    example("of-values", "sequence from literal values", of_values),
    example("distinct", "drop duplicates, keep first occurrence", distinct),
    example("flat-map", "flatten nested lists and double", flat_map),
    example("builder", "assemble a sequence element by element", builder),
    example("collect-set", "collect into a set", collect_set),
    example("sorted", "natural and reverse order", sorted),
    example("count", "number of elements", count),
    example("min-max", "smallest and largest element", min_max),
    example("skip-limit", "skip 2, then take 3", skip_limit),
    example("concat", "join text and integer sequences", concat),
    example("any-match", "exists an element matching", any_match),
    example("all-match", "every element matches", all_match),
    example("reduce-join", "reduce without identity", reduce_join),
    example("reduce-decimal", "exact decimal sum", reduce_decimal),
    example("find-first", "first element", find_first),
    example("find-any", "any element", find_any),
    example("int-range-sum", "sum of 1..5", int_range_sum),
    example("double-sum", "sum of floating point values", double_sum),
    example("int-reduce", "integer reduce with identity 0", int_reduce),
    example("decimal-reduce", "0 + 1 + 10 as decimals", decimal_reduce),
];

pub fn catalog() -> &'static [Example] {
    CATALOG
}

pub fn find(name: &str) -> ApplicationResult<&'static Example> {
    CATALOG
        .iter()
        .find(|e| e.name == name)
        .ok_or_else(|| ApplicationError::UnknownExample(name.to_string()))
}

pub fn run(name: &str, ctx: &RunContext) -> ApplicationResult<ExampleReport> {
    let example = find(name)?;
    Ok(ExampleReport {
        name: example.name,
        lines: example.run(ctx)?,
    })
}

/// Run every example in catalog order; the first failure stops the run.
pub fn run_all(ctx: &RunContext) -> ApplicationResult<Vec<ExampleReport>> {
    CATALOG
        .iter()
        .map(|example| -> ApplicationResult<ExampleReport> {
            Ok(ExampleReport {
                name: example.name,
                lines: example.run(ctx)?,
            })
        })
        .collect()
}

fn decimals(literals: &[&str]) -> DomainResult<Vec<Decimal>> {
    literals.iter().map(|s| s.parse()).collect()
}

fn for_each(ctx: &RunContext) -> DomainResult<Vec<String>> {
    let cities = ["长沙", "深圳", "武汉", "伊犁", "洛阳", "开封"];
    let mut looped = Vec::new();
    for city in cities {
        looped.push(city);
    }
    Ok(vec![
        looped.join(ctx.separator.as_str()),
        ops::for_each_joined(&cities, &ctx.separator),
    ])
}

fn filter(ctx: &RunContext) -> DomainResult<Vec<String>> {
    let ages = [8, 12, 28, 19, 22, 39, 33, 44, 54, 33, 23];
    let kept = ops::filter_range(&ages, &18, &45);
    Ok(vec![ops::for_each_joined(&kept, &ctx.separator)])
}

fn map(_ctx: &RunContext) -> DomainResult<Vec<String>> {
    let words = ["how", "are", "you", ",", "I", "am", "fine", "!"];
    Ok(vec![ops::capitalize_words(&words).join(" ")])
}

fn of(_ctx: &RunContext) -> DomainResult<Vec<String>> {
    let grouped = ops::group([vec![1, 2, 3], vec![41, 52, 63]]);
    Ok(vec![format!("{grouped:?}")])
}

fn of_values(ctx: &RunContext) -> DomainResult<Vec<String>> {
    let phrases = ["覆巢之下", "安有完卵", "天下攘攘", "皆为利往"];
    Ok(vec![ops::for_each_joined(&phrases, &ctx.separator)])
}

fn distinct(ctx: &RunContext) -> DomainResult<Vec<String>> {
    let names = ["秦汗", "武汉", "汉武", "武汉", "大楚"];
    Ok(vec![ops::for_each_joined(
        &ops::distinct(&names),
        &ctx.separator,
    )])
}

fn flat_map(_ctx: &RunContext) -> DomainResult<Vec<String>> {
    let doubled = ops::flat_map(&[vec![1, 2, 3], vec![41, 51, 61]], |x| 2 * x);
    Ok(vec![ops::for_each_joined(&doubled, " ")])
}

fn builder(_ctx: &RunContext) -> DomainResult<Vec<String>> {
    let dynasties = SequenceBuilder::new()
        .add("大秦")
        .add("大商")
        .add("大魏")
        .build();
    Ok(vec![format!("[{}]", dynasties.join(", "))])
}

fn collect_set(_ctx: &RunContext) -> DomainResult<Vec<String>> {
    let set = ops::to_set(&["a", "b", "c", "d", "e"]);
    // HashSet iteration order is unspecified
    Ok(vec![set.iter().sorted().join(" ")])
}

fn sorted(ctx: &RunContext) -> DomainResult<Vec<String>> {
    let letters = ["c", "e", "a", "d", "b"];
    Ok(vec![
        ops::for_each_joined(&ops::sorted(&letters, SortOrder::Ascending), &ctx.separator),
        ops::for_each_joined(&ops::sorted(&letters, SortOrder::Descending), &ctx.separator),
    ])
}

fn count(_ctx: &RunContext) -> DomainResult<Vec<String>> {
    Ok(vec![ops::count(&["c", "e", "a", "d", "b"]).to_string()])
}

fn min_max(ctx: &RunContext) -> DomainResult<Vec<String>> {
    let values = [31, 22, 133, 465, 125];
    let lo = require(ops::min(&values), "min")?;
    let hi = require(ops::max(&values), "max")?;
    Ok(vec![format!("{lo}{}{hi}", ctx.separator)])
}

fn skip_limit(_ctx: &RunContext) -> DomainResult<Vec<String>> {
    let letters = ["a", "b", "c", "d", "e", "f", "g"];
    Ok(vec![ops::page(&letters, 2, 3).join(" ")])
}

fn concat(_ctx: &RunContext) -> DomainResult<Vec<String>> {
    let joined = ops::concat(&["a", "b"], &[110i64, 120]);
    Ok(vec![ops::for_each_joined(&joined, " ")])
}

fn any_match(ctx: &RunContext) -> DomainResult<Vec<String>> {
    let places = ["长沙", "长安", "常州", "昌平"];
    let exact = ops::any_match(&places, |p| *p == "长安", ctx.mode);
    let fuzzy = ops::any_match(&places, |p| *p == "西安" || p.contains('安'), ctx.mode);
    Ok(vec![format!("{exact}{}{fuzzy}", ctx.separator)])
}

fn all_match(ctx: &RunContext) -> DomainResult<Vec<String>> {
    let ages = [22, 34, 55, 43, 28];
    let adults = ops::all_match(&ages, |a| *a > 18, ExecutionMode::Sequential);
    let over_28 = ops::all_match(&ages, |a| *a > 28, ctx.mode);
    Ok(vec![format!("{adults},{over_28}")])
}

fn reduce_join(_ctx: &RunContext) -> DomainResult<Vec<String>> {
    let words = ["you", "give", "me", "stop"];
    // Nothing is printed for an empty sequence
    Ok(ops::join_reduce(&words, ",").into_iter().collect())
}

fn reduce_decimal(_ctx: &RunContext) -> DomainResult<Vec<String>> {
    let amounts = decimals(&["11.11", "22.22", "33.33"])?;
    Ok(vec![ops::sum_decimals(&amounts)?.to_string()])
}

fn find_first(_ctx: &RunContext) -> DomainResult<Vec<String>> {
    let words = ["you", "give", "me", "stop"];
    Ok(vec![require(ops::find_first(&words), "find_first")?.to_string()])
}

fn find_any(ctx: &RunContext) -> DomainResult<Vec<String>> {
    let words = ["you", "give", "me", "stop"];
    Ok(vec![require(ops::find_any(&words, ctx.mode), "find_any")?.to_string()])
}

fn int_range_sum(_ctx: &RunContext) -> DomainResult<Vec<String>> {
    Ok(vec![ops::range_sum(1, 5)?.to_string()])
}

fn double_sum(_ctx: &RunContext) -> DomainResult<Vec<String>> {
    Ok(vec![ops::sum_f64(&[23.48, 52.26, 13.5]).to_string()])
}

fn int_reduce(_ctx: &RunContext) -> DomainResult<Vec<String>> {
    Ok(vec![ops::fold_sum(&[5, 1, 100])?.to_string()])
}

fn decimal_reduce(_ctx: &RunContext) -> DomainResult<Vec<String>> {
    let values = [Decimal::ZERO, Decimal::ONE, Decimal::TEN];
    Ok(vec![ops::sum_decimals(&values)?.to_string()])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn names_are_unique() {
        let names: HashSet<_> = catalog().iter().map(|e| e.name).collect();
        assert_eq!(names.len(), catalog().len());
    }
}
