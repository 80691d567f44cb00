//! Native scalars and their tagged-attribute wire form.
//!
//! A [`Scalar`] is what callers hand to the client. An [`AttributeValue`] is
//! what travels to the backend: exactly one type tag mapping to a string
//! payload, serialized as `{"N": "7"}` or `{"S": "foo"}`. Attributes with
//! any other tag (`BOOL`, `SS`, `M`, ...) are carried through untouched.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

use serde::de::{self, Deserializer};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::Value as Json;

use crate::error::{Error, Result};

/// Backend record: attribute name to tagged value.
pub type Item = BTreeMap<String, AttributeValue>;

/// A native scalar key or value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Scalar {
    Int(i64),
    Str(String),
}

/// Which [`Scalar`] variant a piece of text should be read as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum ScalarKind {
    Int,
    #[default]
    Str,
}

impl ScalarKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScalarKind::Int => "int",
            ScalarKind::Str => "str",
        }
    }
}

impl Scalar {
    /// Read `text` as the given kind.
    ///
    /// `Str` accepts anything. `Int` requires a base-10 `i64`.
    pub fn parse_as(kind: ScalarKind, text: &str) -> Result<Self> {
        match kind {
            ScalarKind::Str => Ok(Scalar::Str(text.to_string())),
            ScalarKind::Int => text
                .trim()
                .parse::<i64>()
                .map(Scalar::Int)
                .map_err(|_| Error::InvalidScalar {
                    kind: kind.as_str(),
                    text: text.to_string(),
                }),
        }
    }

    pub fn kind(&self) -> ScalarKind {
        match self {
            Scalar::Int(_) => ScalarKind::Int,
            Scalar::Str(_) => ScalarKind::Str,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Scalar::Int(n) => Some(*n),
            Scalar::Str(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Scalar::Str(s) => Some(s),
            Scalar::Int(_) => None,
        }
    }

    /// Wrap this scalar in its tagged attribute.
    ///
    /// Integers are tagged `N`, everything else `S`. The payload is always
    /// the string form, never a numeric wire value.
    pub fn to_attribute(&self) -> AttributeValue {
        match self {
            Scalar::Int(n) => AttributeValue::N(n.to_string()),
            Scalar::Str(s) => AttributeValue::S(s.clone()),
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Int(n) => write!(f, "{}", n),
            Scalar::Str(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Scalar {
    fn from(n: i64) -> Self {
        Scalar::Int(n)
    }
}

impl From<i32> for Scalar {
    fn from(n: i32) -> Self {
        Scalar::Int(i64::from(n))
    }
}

impl From<u32> for Scalar {
    fn from(n: u32) -> Self {
        Scalar::Int(i64::from(n))
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::Str(s.to_string())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Scalar::Str(s)
    }
}

impl From<&String> for Scalar {
    fn from(s: &String) -> Self {
        Scalar::Str(s.clone())
    }
}

impl From<&Scalar> for Scalar {
    fn from(s: &Scalar) -> Self {
        s.clone()
    }
}

/// Tagged attribute as exchanged with the backend.
///
/// Serialized as a single-entry map from tag to payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeValue {
    /// Numeric attribute; the payload holds the decimal digits.
    N(String),
    /// String attribute.
    S(String),
    /// Any other tag, with its payload kept as received.
    Other { tag: String, value: Json },
}

impl AttributeValue {
    pub fn tag(&self) -> &str {
        match self {
            AttributeValue::N(_) => "N",
            AttributeValue::S(_) => "S",
            AttributeValue::Other { tag, .. } => tag,
        }
    }

    /// Payload as text. Non-string payloads of other tags render as JSON.
    pub fn payload(&self) -> Cow<'_, str> {
        match self {
            AttributeValue::N(p) | AttributeValue::S(p) => Cow::Borrowed(p),
            AttributeValue::Other { value: Json::String(p), .. } => Cow::Borrowed(p),
            AttributeValue::Other { value, .. } => Cow::Owned(value.to_string()),
        }
    }

    /// Turn the attribute back into a native scalar.
    ///
    /// `N` payloads are cast to an integer with [`cast_integer`], which never
    /// fails; any other tag yields the payload unchanged as a string.
    pub fn decode(&self) -> Scalar {
        match self {
            AttributeValue::N(payload) => Scalar::Int(cast_integer(payload)),
            other => Scalar::Str(other.payload().into_owned()),
        }
    }
}

/// Lenient integer cast of a numeric payload.
///
/// Leading whitespace is skipped, then the longest numeric prefix is read:
/// an optional sign, digits, an optional fraction and an optional exponent.
/// Fractions truncate toward zero, out-of-range values saturate at
/// `i64::MIN`/`i64::MAX`, and text without a numeric prefix gives `0`.
pub fn cast_integer(payload: &str) -> i64 {
    let text = payload.trim_start_matches([' ', '\t', '\n', '\r', '\x0b', '\x0c']);
    let bytes = text.as_bytes();

    let mut end = 0;
    if matches!(bytes.first().copied(), Some(b'+' | b'-')) {
        end = 1;
    }
    let int_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let int_digits = end - int_start;

    let mut is_float = false;
    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        let mut pos = end + 1;
        while bytes.get(pos).is_some_and(u8::is_ascii_digit) {
            pos += 1;
        }
        frac_digits = pos - end - 1;
        if int_digits + frac_digits > 0 {
            end = pos;
            is_float = true;
        }
    }
    if int_digits + frac_digits == 0 {
        return 0;
    }

    if matches!(bytes.get(end).copied(), Some(b'e' | b'E')) {
        let mut pos = end + 1;
        if matches!(bytes.get(pos).copied(), Some(b'+' | b'-')) {
            pos += 1;
        }
        let exp_start = pos;
        while bytes.get(pos).is_some_and(u8::is_ascii_digit) {
            pos += 1;
        }
        if pos > exp_start {
            end = pos;
            is_float = true;
        }
    }

    let number = text.get(..end).unwrap_or_default();
    if is_float {
        // `as` truncates toward zero and saturates
        number.parse::<f64>().map(|f| f as i64).unwrap_or(0)
    } else {
        number.parse::<i64>().unwrap_or(if number.starts_with('-') {
            i64::MIN
        } else {
            i64::MAX
        })
    }
}

impl Serialize for AttributeValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        match self {
            AttributeValue::N(p) => map.serialize_entry("N", p)?,
            AttributeValue::S(p) => map.serialize_entry("S", p)?,
            AttributeValue::Other { tag, value } => map.serialize_entry(tag, value)?,
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for AttributeValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let map = BTreeMap::<String, Json>::deserialize(deserializer)?;
        if map.len() != 1 {
            return Err(de::Error::custom(format!(
                "attribute must have exactly one type tag, got {}",
                map.len()
            )));
        }
        let Some((tag, value)) = map.into_iter().next() else {
            return Err(de::Error::custom("attribute has no type tag"));
        };

        let scalar_payload = match &value {
            Json::String(s) => Some(s.clone()),
            Json::Number(n) => Some(n.to_string()),
            _ => None,
        };
        Ok(match (tag.as_str(), scalar_payload) {
            ("N", Some(p)) => AttributeValue::N(p),
            ("S", Some(p)) => AttributeValue::S(p),
            _ => AttributeValue::Other { tag, value },
        })
    }
}

impl From<&Scalar> for AttributeValue {
    fn from(scalar: &Scalar) -> Self {
        scalar.to_attribute()
    }
}

impl From<Scalar> for AttributeValue {
    fn from(scalar: Scalar) -> Self {
        match scalar {
            Scalar::Int(n) => AttributeValue::N(n.to_string()),
            Scalar::Str(s) => AttributeValue::S(s),
        }
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.tag(), self.payload())
    }
}
