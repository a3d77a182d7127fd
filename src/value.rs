//! The in-memory values that models are checked against.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;
use std::ops::Index;

use serde::de::{MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Largest integer magnitude an `f64` holds without rounding.
const MAX_SAFE_INT: u128 = 1 << 53;

/// An in-memory JSON-like value, the input vocabulary for
/// [`Model::confirm_matches`][crate::Model::confirm_matches].
///
/// `Num` is an IEEE double and `BigInt` is a separate big-integer kind; the
/// two never compare as the same kind during validation. Integer conversions
/// pick the variant for you: widths of 32 bits or less always become `Num`,
/// 64-bit integers become `Num` when within the safe range (magnitude at most
/// 2^53) and `BigInt` otherwise, and `i128` always becomes `BigInt`.
///
/// When serialized through serde, `BigInt` is emitted with `serialize_i128`;
/// formats without a big-integer representation may narrow it.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Num(f64),
    BigInt(i128),
    Str(String),
    Array(Vec<Value>),
    Map(BTreeMap<String, Value>),
}

fn int_value(v: i128) -> Value {
    if v.unsigned_abs() <= MAX_SAFE_INT {
        Value::Num(v as f64)
    } else {
        Value::BigInt(v)
    }
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    pub fn is_num(&self) -> bool {
        matches!(self, Value::Num(_))
    }

    pub fn is_bigint(&self) -> bool {
        matches!(self, Value::BigInt(_))
    }

    pub fn is_str(&self) -> bool {
        matches!(self, Value::Str(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    pub fn is_map(&self) -> bool {
        matches!(self, Value::Map(_))
    }

    pub fn as_bool(&self) -> Option<bool> {
        if let Value::Bool(val) = *self {
            Some(val)
        } else {
            None
        }
    }

    pub fn as_num(&self) -> Option<f64> {
        if let Value::Num(val) = *self {
            Some(val)
        } else {
            None
        }
    }

    pub fn as_bigint(&self) -> Option<i128> {
        if let Value::BigInt(val) = *self {
            Some(val)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        if let Value::Str(ref val) = *self {
            Some(val.as_str())
        } else {
            None
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        if let Value::Array(ref array) = *self {
            Some(array)
        } else {
            None
        }
    }

    pub fn as_array_mut(&mut self) -> Option<&mut Vec<Value>> {
        match *self {
            Value::Array(ref mut array) => Some(array),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&BTreeMap<String, Value>> {
        if let Value::Map(ref map) = *self {
            Some(map)
        } else {
            None
        }
    }

    pub fn as_map_mut(&mut self) -> Option<&mut BTreeMap<String, Value>> {
        match *self {
            Value::Map(ref mut map) => Some(map),
            _ => None,
        }
    }

    /// The name of this value's kind, for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match *self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Num(_) => "number",
            Value::BigInt(_) => "bigint",
            Value::Str(_) => "string",
            Value::Array(_) => "array",
            Value::Map(_) => "map",
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::Null
    }
}

static NULL: Value = Value::Null;

impl Index<usize> for Value {
    type Output = Value;

    fn index(&self, index: usize) -> &Self::Output {
        self.as_array().and_then(|v| v.get(index)).unwrap_or(&NULL)
    }
}

impl Index<&str> for Value {
    type Output = Value;

    fn index(&self, index: &str) -> &Self::Output {
        self.as_map().and_then(|v| v.get(index)).unwrap_or(&NULL)
    }
}

macro_rules! impl_value_from {
    ($t: ty, $p: ident) => {
        impl From<$t> for Value {
            fn from(v: $t) -> Self {
                Value::$p(v)
            }
        }
    };
}

macro_rules! impl_value_from_num {
    ($t: ty) => {
        impl From<$t> for Value {
            fn from(v: $t) -> Self {
                Value::Num(f64::from(v))
            }
        }
    };
}

macro_rules! impl_value_from_wide {
    ($t: ty) => {
        impl From<$t> for Value {
            fn from(v: $t) -> Self {
                int_value(v as i128)
            }
        }
    };
}

impl_value_from!(bool, Bool);
impl_value_from!(f64, Num);
impl_value_from!(i128, BigInt);
impl_value_from!(String, Str);
impl_value_from!(Vec<Value>, Array);
impl_value_from!(BTreeMap<String, Value>, Map);
impl_value_from_num!(f32);
impl_value_from_num!(u8);
impl_value_from_num!(u16);
impl_value_from_num!(u32);
impl_value_from_num!(i8);
impl_value_from_num!(i16);
impl_value_from_num!(i32);
impl_value_from_wide!(u64);
impl_value_from_wide!(usize);
impl_value_from_wide!(i64);
impl_value_from_wide!(isize);

impl From<()> for Value {
    fn from((): ()) -> Self {
        Value::Null
    }
}

impl<'a> From<&'a str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl<'a> From<Cow<'a, str>> for Value {
    fn from(v: Cow<'a, str>) -> Self {
        Value::Str(v.to_string())
    }
}

impl<V: Into<Value>> std::iter::FromIterator<V> for Value {
    fn from_iter<T: IntoIterator<Item = V>>(iter: T) -> Self {
        let v: Vec<Value> = iter.into_iter().map(Into::into).collect();
        Value::Array(v)
    }
}

macro_rules! impl_try_from_value {
    ($t: ty, $p: ident) => {
        impl TryFrom<Value> for $t {
            type Error = Value;
            fn try_from(v: Value) -> Result<Self, Self::Error> {
                match v {
                    Value::$p(v) => Ok(v),
                    _ => Err(v),
                }
            }
        }
    };
}

impl_try_from_value!(bool, Bool);
impl_try_from_value!(f64, Num);
impl_try_from_value!(i128, BigInt);
impl_try_from_value!(String, Str);
impl_try_from_value!(Vec<Value>, Array);
impl_try_from_value!(BTreeMap<String, Value>, Map);

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        use serde_json::Value as Json;
        match v {
            Json::Null => Value::Null,
            Json::Bool(v) => Value::Bool(v),
            Json::Number(n) => {
                if let Some(v) = n.as_i64() {
                    int_value(v as i128)
                } else if let Some(v) = n.as_u64() {
                    int_value(v as i128)
                } else {
                    Value::Num(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            Json::String(v) => Value::Str(v),
            Json::Array(v) => Value::Array(v.into_iter().map(Value::from).collect()),
            Json::Object(v) => Value::Map(v.into_iter().map(|(k, v)| (k, Value::from(v))).collect()),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(v) => serializer.serialize_bool(*v),
            Value::Num(v) => serializer.serialize_f64(*v),
            Value::BigInt(v) => serializer.serialize_i128(*v),
            Value::Str(v) => serializer.serialize_str(v),
            Value::Array(v) => serializer.collect_seq(v),
            Value::Map(v) => serializer.collect_map(v),
        }
    }
}

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("any JSON-like value")
    }

    fn visit_bool<E>(self, v: bool) -> Result<Value, E> {
        Ok(Value::Bool(v))
    }

    fn visit_i64<E>(self, v: i64) -> Result<Value, E> {
        Ok(int_value(v as i128))
    }

    fn visit_u64<E>(self, v: u64) -> Result<Value, E> {
        Ok(int_value(v as i128))
    }

    fn visit_i128<E>(self, v: i128) -> Result<Value, E> {
        Ok(Value::BigInt(v))
    }

    fn visit_u128<E: serde::de::Error>(self, v: u128) -> Result<Value, E> {
        match i128::try_from(v) {
            Ok(v) => Ok(Value::BigInt(v)),
            Err(_) => Err(E::custom("big integer out of range")),
        }
    }

    fn visit_f64<E>(self, v: f64) -> Result<Value, E> {
        Ok(Value::Num(v))
    }

    fn visit_str<E>(self, v: &str) -> Result<Value, E> {
        Ok(Value::Str(v.to_string()))
    }

    fn visit_string<E>(self, v: String) -> Result<Value, E> {
        Ok(Value::Str(v))
    }

    fn visit_unit<E>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_none<E>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Value, D::Error> {
        deserializer.deserialize_any(self)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Value, A::Error> {
        let mut array = Vec::new();
        while let Some(item) = seq.next_element()? {
            array.push(item);
        }
        Ok(Value::Array(array))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Value, A::Error> {
        let mut map = BTreeMap::new();
        while let Some((key, value)) = access.next_entry::<String, Value>()? {
            map.insert(key, value);
        }
        Ok(Value::Map(map))
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Value, D::Error> {
        deserializer.deserialize_any(ValueVisitor)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn integer_conversions() {
        assert_eq!(Value::from(1u8), Value::Num(1.0));
        assert_eq!(Value::from(-7i32), Value::Num(-7.0));
        assert_eq!(Value::from(1i64), Value::Num(1.0));
        assert_eq!(Value::from(1i128), Value::BigInt(1));
        // 2^53 is still exact, one past it is not
        assert_eq!(Value::from(1i64 << 53), Value::Num(9007199254740992.0));
        assert_eq!(Value::from((1i64 << 53) + 1), Value::BigInt(9007199254740993));
        assert_eq!(Value::from(u64::MAX), Value::BigInt(u64::MAX as i128));
    }

    #[test]
    fn indexing() {
        let value = value!({
            "title": "First Post",
            "tags": ["first", "test"],
        });
        assert_eq!(value["title"], Value::from("First Post"));
        assert_eq!(value["tags"][1], Value::from("test"));
        assert_eq!(value["tags"][9], Value::Null);
        assert_eq!(value["missing"], Value::Null);
        assert_eq!(value["missing"]["deeper"], Value::Null);
    }

    #[test]
    fn kind_names() {
        assert_eq!(value!({}).kind_name(), "map");
        assert_eq!(value!([]).kind_name(), "array");
        assert_eq!(value!(null).kind_name(), "null");
        assert_eq!(Value::BigInt(1).kind_name(), "bigint");
    }

    #[test]
    fn serde_round_trip() {
        let value = value!({
            "public": true,
            "views": 42,
            "title": "hello",
            "tags": ["a", "b"],
            "extra": null,
        });
        let text = serde_json::to_string(&value).unwrap();
        let back: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value, back);
    }

    #[test]
    fn from_serde_json() {
        let json: serde_json::Value = serde_json::from_str(
            r#"{"a": "x", "b": [1, true, null], "c": 9007199254740993}"#,
        )
        .unwrap();
        let value = Value::from(json);
        assert_eq!(value["a"], Value::from("x"));
        assert_eq!(value["b"][0], Value::Num(1.0));
        assert_eq!(value["b"][1], Value::Bool(true));
        assert_eq!(value["b"][2], Value::Null);
        assert_eq!(value["c"], Value::BigInt(9007199254740993));
    }
}
