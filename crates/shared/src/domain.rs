use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_newtype!(ProductId);
id_newtype!(UserId);

/// Any JSON value decodes; a missing or non-integer id stays in `attributes`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value")]
pub struct Product {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<ProductId>,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl From<Value> for Product {
    fn from(value: Value) -> Self {
        let mut attributes = match value {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        let id = attributes.get("id").and_then(Value::as_i64).map(ProductId);
        if id.is_some() {
            attributes.remove("id");
        }
        Self { id, attributes }
    }
}

impl Product {
    pub fn new(id: ProductId) -> Self {
        Self {
            id: Some(id),
            attributes: Map::new(),
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn attribute(&self, key: &str) -> Option<Value> {
        match (key, self.id) {
            ("id", Some(id)) => Some(Value::from(id.0)),
            _ => self.attributes.get(key).cloned(),
        }
    }

    pub fn title(&self) -> &str {
        self.text("title").unwrap_or_default()
    }

    pub fn description(&self) -> Option<&str> {
        self.text("description")
    }

    pub fn brand(&self) -> Option<&str> {
        self.text("brand").filter(|brand| !brand.is_empty())
    }

    pub fn category(&self) -> Option<&str> {
        self.text("category")
    }

    pub fn thumbnail(&self) -> Option<&str> {
        self.text("thumbnail")
    }

    pub fn price(&self) -> Option<f64> {
        self.number("price")
    }

    pub fn rating(&self) -> Option<f64> {
        self.number("rating")
    }

    pub fn discount_percentage(&self) -> Option<f64> {
        self.number("discountPercentage")
    }

    pub fn stock(&self) -> Option<i64> {
        self.attributes.get("stock").and_then(Value::as_i64)
    }

    fn text(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).and_then(Value::as_str)
    }

    fn number(&self, key: &str) -> Option<f64> {
        match self.attributes.get(key)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => parse_float_prefix(s),
            _ => None,
        }
    }
}

/// Longest leading float literal, e.g. `"12.5kg"` is 12.5.
pub fn parse_float_prefix(raw: &str) -> Option<f64> {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));

    if s[end..].starts_with("Infinity") {
        return Some(if s.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
    }

    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(&bytes[exp_end..]);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    s[..end].parse().ok()
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Category {
    Slug(String),
    Entry {
        slug: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        url: Option<String>,
    },
}

impl Category {
    pub fn slug(&self) -> &str {
        match self {
            Category::Slug(slug) => slug,
            Category::Entry { slug, .. } => slug,
        }
    }
}

impl From<&str> for Category {
    fn from(value: &str) -> Self {
        Category::Slug(value.to_string())
    }
}
