//! Protocol adapters.
//!
//! Three request surfaces reduce to the same [`RecipeQuery`]:
//!
//! - REST query strings ([`RecipeQuery::from_query_string`],
//!   [`RecipeQuery::from_query_pairs`])
//! - JSON-RPC tool arguments ([`RecipeQuery::from_rpc_arguments`])
//! - free text run through a [`QueryTranslator`] ([`translate_query`])
//!
//! All three feed one accumulator, so the parameter vocabulary, numeric
//! parsing and whitelist checks cannot drift apart. Input that does not parse
//! or names an unknown field is dropped, never defaulted and never an error.

use std::collections::HashSet;

use serde::Serialize;
use serde_json::{Map, Number, Value};
use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::fields::{NumericField, NumericKind, SortColumn, SortOrder};
use crate::filter::{Bound, FilterSpec};
use crate::traits::QueryTranslator;

/// Request parameter names outside the `min_*` / `max_*` families.
pub mod params {
    pub const SEARCH: &str = "search";
    pub const DIET: &str = "diet";
    pub const INCLUDE_INGREDIENTS: &str = "include_ingredients";
    pub const EXCLUDE_INGREDIENTS: &str = "exclude_ingredients";
    pub const SORT_BY: &str = "sort_by";
    pub const SORT_ORDER: &str = "sort_order";
}

/// A parsed search request: an optional preset key plus caller constraints.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct RecipeQuery {
    /// Preset key as supplied. Unknown keys are resolved (to nothing) by the
    /// catalog, not here.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diet: Option<String>,
    pub filter: FilterSpec,
}

impl RecipeQuery {
    pub fn new(filter: FilterSpec) -> Self {
        Self { diet: None, filter }
    }

    pub fn with_diet(mut self, key: impl Into<String>) -> Self {
        self.diet = Some(key.into());
        self
    }

    /// Parse decoded `key=value` pairs. The first occurrence of a key wins.
    pub fn from_query_pairs<I, K, V>(pairs: I, row_limit: u32) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut acc = QueryAccumulator::new(row_limit);
        for (key, value) in pairs {
            acc.apply(key.as_ref(), ParamValue::Text(value.as_ref()));
        }
        acc.finish()
    }

    /// Parse a raw `application/x-www-form-urlencoded` query string.
    pub fn from_query_string(raw: &str, row_limit: u32) -> Self {
        let raw = raw.strip_prefix('?').unwrap_or(raw);
        Self::from_query_pairs(url::form_urlencoded::parse(raw.as_bytes()), row_limit)
    }

    /// Parse a JSON-RPC argument map.
    ///
    /// Numbers may arrive as JSON numbers or numeric strings; ingredient lists
    /// as a comma-separated string or an array of strings. `null` counts as
    /// absent.
    pub fn from_rpc_arguments(args: &Map<String, Value>, row_limit: u32) -> Self {
        let mut acc = QueryAccumulator::new(row_limit);
        for (key, value) in args {
            let value = match value {
                Value::String(s) => ParamValue::Text(s),
                Value::Number(n) => ParamValue::Number(n),
                Value::Array(items) => ParamValue::List(items),
                Value::Null => continue,
                Value::Bool(_) | Value::Object(_) => ParamValue::Unsupported,
            };
            acc.apply(key, value);
        }
        acc.finish()
    }
}

// =============================================================================
// ACCUMULATOR
// =============================================================================

#[derive(Clone, Copy)]
enum ParamValue<'a> {
    Text(&'a str),
    Number(&'a Number),
    List(&'a [Value]),
    Unsupported,
}

impl<'a> ParamValue<'a> {
    fn text(self) -> Option<&'a str> {
        match self {
            ParamValue::Text(s) => Some(s),
            _ => None,
        }
    }

    fn number(self, kind: NumericKind) -> Option<Bound> {
        match self {
            ParamValue::Text(s) => parse_number(s, kind),
            ParamValue::Number(n) => json_number(n, kind),
            _ => None,
        }
    }

    fn tokens(self) -> Option<Vec<&'a str>> {
        match self {
            ParamValue::Text(s) => Some(s.split(',').collect()),
            ParamValue::List(items) => Some(items.iter().filter_map(Value::as_str).collect()),
            _ => None,
        }
    }
}

/// Strict numeric parsing. Integer columns reject fractional text.
fn parse_number(raw: &str, kind: NumericKind) -> Option<Bound> {
    match kind {
        NumericKind::Integer => raw.parse::<i64>().ok().map(Bound::Int),
        NumericKind::Real => raw.parse::<f64>().ok().and_then(|v| Bound::Real(v).for_kind(kind)),
    }
}

/// Integral JSON numbers stay exact; `20.0` still counts as an integer.
fn json_number(n: &Number, kind: NumericKind) -> Option<Bound> {
    let bound = match n.as_i64() {
        Some(v) => Bound::Int(v),
        None => Bound::Real(n.as_f64()?),
    };
    bound.for_kind(kind)
}

struct QueryAccumulator {
    diet: Option<String>,
    filter: FilterSpec,
    seen: HashSet<String>,
}

impl QueryAccumulator {
    fn new(row_limit: u32) -> Self {
        Self {
            diet: None,
            filter: FilterSpec::new(row_limit),
            seen: HashSet::new(),
        }
    }

    fn update(&mut self, f: impl FnOnce(FilterSpec) -> FilterSpec) {
        let filter = std::mem::take(&mut self.filter);
        self.filter = f(filter);
    }

    fn apply(&mut self, key: &str, value: ParamValue<'_>) {
        if !self.seen.insert(key.to_string()) {
            trace!(param = key, "Ignoring repeated filter parameter");
            return;
        }

        let accepted = match key {
            params::SEARCH => match value.text() {
                Some(term) => {
                    self.update(|f| f.with_text_search(term));
                    true
                }
                None => false,
            },
            params::DIET => match value.text().filter(|k| !k.is_empty()) {
                Some(key) => {
                    self.diet = Some(key.to_string());
                    true
                }
                None => false,
            },
            params::INCLUDE_INGREDIENTS => match value.tokens() {
                Some(tokens) => {
                    self.update(|f| f.include_ingredients(tokens));
                    true
                }
                None => false,
            },
            params::EXCLUDE_INGREDIENTS => match value.tokens() {
                Some(tokens) => {
                    self.update(|f| f.exclude_ingredients(tokens));
                    true
                }
                None => false,
            },
            params::SORT_BY => match value.text().and_then(SortColumn::parse) {
                Some(column) => {
                    self.filter.sort_by = Some(column);
                    true
                }
                None => false,
            },
            params::SORT_ORDER => match value.text() {
                Some(order) => {
                    self.filter.sort_order = SortOrder::parse(order);
                    true
                }
                None => false,
            },
            other => self.apply_range(other, value),
        };

        if !accepted {
            debug!(param = key, "Dropped unrecognized or unparseable filter parameter");
        }
    }

    fn apply_range(&mut self, key: &str, value: ParamValue<'_>) -> bool {
        let (is_min, stem) = if let Some(stem) = key.strip_prefix("min_") {
            (true, stem)
        } else if let Some(stem) = key.strip_prefix("max_") {
            (false, stem)
        } else {
            return false;
        };

        let Some(field) = NumericField::from_param_stem(stem) else {
            return false;
        };
        // `min_prep_time` and `min_prep_time_minutes` name the same bound.
        let canonical = format!("{}_{}", if is_min { "min" } else { "max" }, field.param_stem());
        if canonical != key && !self.seen.insert(canonical) {
            return false;
        }

        let Some(number) = value.number(field.kind()) else {
            return false;
        };
        if is_min {
            self.update(|f| f.with_min(field, number));
        } else {
            self.update(|f| f.with_max(field, number));
        }
        true
    }

    fn finish(self) -> RecipeQuery {
        RecipeQuery {
            diet: self.diet,
            filter: self.filter,
        }
    }
}

// =============================================================================
// TRANSLATED TEXT
// =============================================================================

/// Result of running free text through a translator.
#[derive(Debug, Clone, PartialEq)]
pub struct TranslatedQuery {
    /// Cleaned query string as returned by the translator.
    pub query_string: String,
    /// Decoded `key=value` pairs, first occurrence per key.
    pub parameters: Map<String, Value>,
    pub query: RecipeQuery,
}

/// Translate free text into a query, then parse it like a REST query string.
///
/// Translator failures and unusable output surface as `Error::Translator`;
/// there is no retry.
pub async fn translate_query(
    translator: &dyn QueryTranslator,
    text: &str,
    row_limit: u32,
) -> Result<TranslatedQuery> {
    let raw = translator.translate(text).await?;
    let query_string = extract_query_string(&raw).ok_or_else(|| {
        Error::Translator(format!(
            "translator returned no usable query parameters (got {} bytes)",
            raw.len()
        ))
    })?;

    let mut parameters = Map::new();
    for (key, value) in url::form_urlencoded::parse(query_string.as_bytes()) {
        if !parameters.contains_key(key.as_ref()) {
            parameters.insert(key.into_owned(), Value::String(value.into_owned()));
        }
    }
    let query = RecipeQuery::from_query_string(&query_string, row_limit);

    debug!(
        model = translator.model_name(),
        query = %query_string,
        predicates = query.filter.predicate_count(),
        "Translated free-text request"
    );

    Ok(TranslatedQuery {
        query_string,
        parameters,
        query,
    })
}

/// Pull a bare query string out of translator output.
///
/// Accepts `a=1&b=2`, `?a=1`, a full URL such as `/api/recipes?a=1`, and any
/// of those wrapped in backticks or quotes. Returns `None` when nothing
/// resembling a `key=value` pair remains.
pub fn extract_query_string(raw: &str) -> Option<String> {
    let trimmed = raw
        .trim()
        .trim_matches(|c: char| c == '`' || c == '"' || c == '\'' || c.is_whitespace());
    let query = match trimmed.split_once('?') {
        Some((_, rest)) => rest,
        None => trimmed,
    };
    let query = query.trim();

    let has_pair = query
        .split('&')
        .any(|pair| matches!(pair.split_once('='), Some((k, _)) if !k.trim().is_empty()));
    has_pair.then(|| query.to_string())
}
