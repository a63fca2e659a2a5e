//! Request parameters for the search and single-video endpoints
//!
//! Parameters are immutable values: every `with_*` method returns a new
//! instance. Enumerated parameters are closed by their types; numeric
//! parameters are range-checked by [`SearchParams::validate`], which
//! [`SearchParams::to_query`] always runs before serializing.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::api;
use crate::error::ValidationError;
use crate::types::ThumbSize;

/// Sort order for search results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Order {
    #[default]
    Latest,
    Longest,
    Shortest,
    TopRated,
    MostPopular,
    TopWeekly,
    TopMonthly,
}

impl Order {
    pub const ALL: [Order; 7] = [
        Order::Latest,
        Order::Longest,
        Order::Shortest,
        Order::TopRated,
        Order::MostPopular,
        Order::TopWeekly,
        Order::TopMonthly,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Order::Latest => "latest",
            Order::Longest => "longest",
            Order::Shortest => "shortest",
            Order::TopRated => "top-rated",
            Order::MostPopular => "most-popular",
            Order::TopWeekly => "top-weekly",
            Order::TopMonthly => "top-monthly",
        }
    }
}

impl FromStr for Order {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Order::ALL
            .into_iter()
            .find(|order| order.as_str() == s)
            .filter(|_| api::is_valid_order(s))
            .ok_or_else(|| ValidationError::not_one_of("order", s, &api::VALID_ORDERS))
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Response encoding for search and single-video lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    #[default]
    Json,
    Xml,
}

impl Format {
    pub const ALL: [Format; 2] = [Format::Json, Format::Xml];

    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Json => "json",
            Format::Xml => "xml",
        }
    }
}

impl FromStr for Format {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Format::ALL
            .into_iter()
            .find(|format| format.as_str() == s)
            .filter(|_| api::is_valid_format(s))
            .ok_or_else(|| ValidationError::not_one_of("format", s, &api::VALID_FORMATS))
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Response encoding for the removed-videos endpoint, which also offers `txt`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RemovedFormat {
    #[default]
    Json,
    Xml,
    Txt,
}

impl RemovedFormat {
    pub const ALL: [RemovedFormat; 3] =
        [RemovedFormat::Json, RemovedFormat::Xml, RemovedFormat::Txt];

    pub fn as_str(&self) -> &'static str {
        match self {
            RemovedFormat::Json => "json",
            RemovedFormat::Xml => "xml",
            RemovedFormat::Txt => "txt",
        }
    }
}

impl FromStr for RemovedFormat {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RemovedFormat::ALL
            .into_iter()
            .find(|format| format.as_str() == s)
            .filter(|_| api::is_valid_removed_format(s))
            .ok_or_else(|| {
                ValidationError::not_one_of("format", s, &api::VALID_REMOVED_FORMATS)
            })
    }
}

impl fmt::Display for RemovedFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameters for the search endpoint
///
/// # Example
/// ```
/// use eporner_core::{Order, SearchParams};
/// let params = SearchParams::new("cats").with_per_page(50).with_order(Order::TopRated);
/// let next = params.next_page();
/// assert_eq!(params.page(), 1);
/// assert_eq!(next.page(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchParams {
    query: String,
    per_page: u32,
    page: u32,
    thumbsize: ThumbSize,
    order: Order,
    gay: u8,
    lq: u8,
    format: Format,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            query: api::DEFAULT_QUERY.to_string(),
            per_page: api::DEFAULT_PER_PAGE,
            page: api::DEFAULT_PAGE,
            thumbsize: ThumbSize::default(),
            order: Order::default(),
            gay: api::DEFAULT_GAY,
            lq: api::DEFAULT_LQ,
            format: Format::default(),
        }
    }
}

impl SearchParams {
    /// Default parameters searching for `query`
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn thumbsize(&self) -> ThumbSize {
        self.thumbsize
    }

    pub fn order(&self) -> Order {
        self.order
    }

    pub fn gay(&self) -> u8 {
        self.gay
    }

    pub fn lq(&self) -> u8 {
        self.lq
    }

    pub fn format(&self) -> Format {
        self.format
    }

    pub fn with_query(self, query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..self
        }
    }

    pub fn with_per_page(self, per_page: u32) -> Self {
        Self { per_page, ..self }
    }

    pub fn with_thumbsize(self, thumbsize: ThumbSize) -> Self {
        Self { thumbsize, ..self }
    }

    pub fn with_order(self, order: Order) -> Self {
        Self { order, ..self }
    }

    /// Gay content filter: 0 = exclude, 1 = include, 2 = only
    pub fn with_gay(self, gay: u8) -> Self {
        Self { gay, ..self }
    }

    /// Low-quality filter: 0 = exclude, 1 = include, 2 = only
    pub fn with_lq(self, lq: u8) -> Self {
        Self { lq, ..self }
    }

    pub fn with_format(self, format: Format) -> Self {
        Self { format, ..self }
    }

    /// Copy of these parameters pointing at `page`
    ///
    /// The copy is not validated; an out-of-range page surfaces
    /// on the next call to [`to_query`](Self::to_query).
    pub fn with_page(&self, page: u32) -> Self {
        Self {
            page,
            ..self.clone()
        }
    }

    /// Copy of these parameters pointing at the following page
    pub fn next_page(&self) -> Self {
        self.with_page(self.page.saturating_add(1))
    }

    /// Checks every numeric parameter against its range
    ///
    /// Reports only the first violation, in the order
    /// `per_page`, `page`, `gay`, `lq`.
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_per_page(self.per_page)?;
        check_page(self.page)?;
        check_filter("gay", self.gay)?;
        check_filter("lq", self.lq)
    }

    /// Wire query parameters, validated first
    pub fn to_query(&self) -> Result<Vec<(String, String)>, ValidationError> {
        self.validate()?;

        Ok(vec![
            ("query".to_string(), self.query.clone()),
            ("per_page".to_string(), self.per_page.to_string()),
            ("page".to_string(), self.page.to_string()),
            ("thumbsize".to_string(), self.thumbsize.to_string()),
            ("order".to_string(), self.order.to_string()),
            ("gay".to_string(), self.gay.to_string()),
            ("lq".to_string(), self.lq.to_string()),
            ("format".to_string(), self.format.to_string()),
        ])
    }

    /// Builds validated parameters from wire-named string pairs
    ///
    /// Absent keys take their defaults and unknown keys are ignored. Fields
    /// are read and checked in the order `thumbsize`, `order`, `format`,
    /// `per_page`, `page`, `gay`, `lq`; the first value that is unreadable
    /// or out of range is reported.
    ///
    /// # Example
    /// ```
    /// use eporner_core::SearchParams;
    /// let err = SearchParams::from_pairs([("per_page", "0"), ("gay", "x")]).unwrap_err();
    /// assert_eq!(err.field, "per_page");
    /// ```
    pub fn from_pairs<'a, I>(pairs: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let map: HashMap<&str, &str> = pairs.into_iter().collect();
        let defaults = Self::default();

        let thumbsize = parse_domain(&map, "thumbsize", defaults.thumbsize)?;
        let order = parse_domain(&map, "order", defaults.order)?;
        let format = parse_domain(&map, "format", defaults.format)?;

        let per_page = parse_number(&map, "per_page", defaults.per_page, |v| {
            ValidationError::out_of_range("per_page", v, 1, api::MAX_PER_PAGE)
        })?;
        check_per_page(per_page)?;

        let page = parse_number(&map, "page", defaults.page, |v| {
            ValidationError::out_of_range("page", v, 1, api::MAX_PAGE)
        })?;
        check_page(page)?;

        let gay = parse_number(&map, "gay", defaults.gay, |v| {
            ValidationError::not_one_of("gay", v, &api::VALID_FILTER_OPTIONS)
        })?;
        check_filter("gay", gay)?;

        let lq = parse_number(&map, "lq", defaults.lq, |v| {
            ValidationError::not_one_of("lq", v, &api::VALID_FILTER_OPTIONS)
        })?;
        check_filter("lq", lq)?;

        let query = map
            .get("query")
            .map(|q| q.to_string())
            .unwrap_or(defaults.query);

        Ok(Self {
            query,
            per_page,
            page,
            thumbsize,
            order,
            gay,
            lq,
            format,
        })
    }
}

fn check_per_page(per_page: u32) -> Result<(), ValidationError> {
    if api::is_valid_per_page(per_page) {
        return Ok(());
    }
    Err(ValidationError::out_of_range(
        "per_page",
        per_page,
        1,
        api::MAX_PER_PAGE,
    ))
}

fn check_page(page: u32) -> Result<(), ValidationError> {
    if api::is_valid_page(page) {
        return Ok(());
    }
    Err(ValidationError::out_of_range("page", page, 1, api::MAX_PAGE))
}

fn check_filter(field: &str, value: u8) -> Result<(), ValidationError> {
    if api::is_valid_filter(value) {
        return Ok(());
    }
    Err(ValidationError::not_one_of(
        field,
        value,
        &api::VALID_FILTER_OPTIONS,
    ))
}

/// Closed-domain value for `key`, or `default` when absent
fn parse_domain<T>(map: &HashMap<&str, &str>, key: &str, default: T) -> Result<T, ValidationError>
where
    T: FromStr<Err = ValidationError>,
{
    match map.get(key) {
        Some(v) => v.trim().parse(),
        None => Ok(default),
    }
}

/// Number for `key`, or `default` when absent; unreadable text goes through `invalid`
fn parse_number<T, F>(
    map: &HashMap<&str, &str>,
    key: &str,
    default: T,
    invalid: F,
) -> Result<T, ValidationError>
where
    T: FromStr,
    F: FnOnce(&str) -> ValidationError,
{
    match map.get(key) {
        Some(v) => v.trim().parse().map_err(|_| invalid(v)),
        None => Ok(default),
    }
}

/// Parameters for the single-video lookup endpoint
///
/// Both fields are closed by their types, so serializing never fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VideoIdParams {
    thumbsize: ThumbSize,
    format: Format,
}

impl VideoIdParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn thumbsize(&self) -> ThumbSize {
        self.thumbsize
    }

    pub fn format(&self) -> Format {
        self.format
    }

    pub fn with_thumbsize(self, thumbsize: ThumbSize) -> Self {
        Self { thumbsize, ..self }
    }

    pub fn with_format(self, format: Format) -> Self {
        Self { format, ..self }
    }

    /// Builds lookup parameters from wire-named string pairs
    ///
    /// Absent keys take their defaults; unknown keys (including `id`) are
    /// ignored. `thumbsize` is checked before `format`.
    pub fn from_pairs<'a, I>(pairs: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let map: HashMap<&str, &str> = pairs.into_iter().collect();
        let defaults = Self::default();

        Ok(Self {
            thumbsize: parse_domain(&map, "thumbsize", defaults.thumbsize)?,
            format: parse_domain(&map, "format", defaults.format)?,
        })
    }

    /// Wire query parameters for looking up video `id`
    pub fn to_query(&self, id: &str) -> Vec<(String, String)> {
        vec![
            ("id".to_string(), id.to_string()),
            ("thumbsize".to_string(), self.thumbsize.to_string()),
            ("format".to_string(), self.format.to_string()),
        ]
    }
}
