use std::{cmp::Ordering, cmp::Reverse, fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use shared::domain::{parse_float_prefix, Product};
use thiserror::Error;

pub trait SortFields {
    fn sort_field(&self, key: &str) -> Option<Value>;
}

impl SortFields for Product {
    fn sort_field(&self, key: &str) -> Option<Value> {
        self.attribute(key)
    }
}

impl SortFields for Value {
    fn sort_field(&self, key: &str) -> Option<Value> {
        self.get(key).cloned()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NumericField {
    #[serde(rename = "price")]
    Price,
    #[serde(rename = "rating")]
    Rating,
    #[serde(rename = "discountPercentage")]
    DiscountPercentage,
}

impl NumericField {
    pub const ALL: [NumericField; 3] = [
        NumericField::Price,
        NumericField::Rating,
        NumericField::DiscountPercentage,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            NumericField::Price => "price",
            NumericField::Rating => "rating",
            NumericField::DiscountPercentage => "discountPercentage",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SortKey {
    Numeric(NumericField),
    Text(String),
}

impl SortKey {
    pub fn parse(key: &str) -> Self {
        let key = key.trim();
        NumericField::ALL
            .into_iter()
            .find(|field| field.as_str() == key)
            .map(SortKey::Numeric)
            .unwrap_or_else(|| SortKey::Text(key.to_string()))
    }

    pub fn field_name(&self) -> &str {
        match self {
            SortKey::Numeric(field) => field.as_str(),
            SortKey::Text(name) => name,
        }
    }

    pub fn value_of<T: SortFields + ?Sized>(&self, item: &T) -> SortValue {
        let raw = item.sort_field(self.field_name());
        match self {
            SortKey::Numeric(_) => SortValue::number(raw.as_ref().map_or(0.0, numeric_value)),
            SortKey::Text(_) => SortValue::Text(raw.as_ref().map(text_value).unwrap_or_default()),
        }
    }
}

impl From<&str> for SortKey {
    fn from(value: &str) -> Self {
        SortKey::parse(value)
    }
}

impl FromStr for SortKey {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(SortKey::parse(s))
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field_name())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown sort order '{0}', expected 'asc' or 'desc'")]
pub struct ParseSortOrderError(pub String);

impl FromStr for SortOrder {
    type Err = ParseSortOrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortOrder::Ascending),
            "desc" | "descending" => Ok(SortOrder::Descending),
            _ => Err(ParseSortOrderError(s.to_string())),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SortOrder::Ascending => "asc",
            SortOrder::Descending => "desc",
        })
    }
}

// Numbers never hold NaN or -0.0.
#[derive(Debug, Clone, PartialEq)]
pub enum SortValue {
    Number(f64),
    Text(String),
}

impl SortValue {
    fn number(value: f64) -> Self {
        if value.is_nan() || value == 0.0 {
            SortValue::Number(0.0)
        } else {
            SortValue::Number(value)
        }
    }
}

impl Eq for SortValue {}

impl PartialOrd for SortValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SortValue {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortValue::Number(a), SortValue::Number(b)) => a.total_cmp(b),
            (SortValue::Text(a), SortValue::Text(b)) => a.cmp(b),
            (SortValue::Number(_), SortValue::Text(_)) => Ordering::Less,
            (SortValue::Text(_), SortValue::Number(_)) => Ordering::Greater,
        }
    }
}

pub fn compare<T: SortFields + ?Sized>(a: &T, b: &T, key: &SortKey, order: SortOrder) -> Ordering {
    let ordering = key.value_of(a).cmp(&key.value_of(b));
    match order {
        SortOrder::Ascending => ordering,
        SortOrder::Descending => ordering.reverse(),
    }
}

/// Stable in both directions: equal keys keep their previous relative order.
pub fn sort_items<T: SortFields>(items: &mut [T], key: &SortKey, order: SortOrder) {
    match order {
        SortOrder::Ascending => items.sort_by_cached_key(|item| key.value_of(item)),
        SortOrder::Descending => items.sort_by_cached_key(|item| Reverse(key.value_of(item))),
    }
}

pub fn numeric_value(value: &Value) -> f64 {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_float_prefix(s),
        _ => None,
    };
    match parsed {
        Some(v) if !v.is_nan() => v,
        _ => 0.0,
    }
}

pub fn text_value(value: &Value) -> String {
    match value {
        Value::Null | Value::Bool(false) => String::new(),
        Value::Bool(true) => "true".to_string(),
        Value::Number(n) if n.as_f64() == Some(0.0) => String::new(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.to_lowercase(),
        Value::Array(_) | Value::Object(_) => value.to_string().to_lowercase(),
    }
}

#[cfg(test)]
#[path = "tests/sort_tests.rs"]
mod tests;
