//! Type expressions and the recursive matching engine.

use serde::{Deserialize, Serialize};

use crate::model::Model;
use crate::value::Value;

/// Primitive type tags, the leaves of a type expression.
///
/// These are the sentinel values used when declaring a field's expected kind:
///
/// ```
/// # use json_model::{def, value, Kind::*, Model};
/// # fn main() -> json_model::Result<()> {
/// let model = Model::new(def!({"id": Num, "name": Str}))?;
/// assert!(model.confirm_matches(&value!({"id": 1, "name": "grue"})));
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Kind {
    /// UTF-8 strings.
    Str,
    /// Double-precision numbers.
    Num,
    /// Big integers.
    BigInt,
    /// Booleans.
    Bool,
    /// Any array, regardless of its items.
    Array,
    /// Any key/value mapping. Also passes null, which counts as a present
    /// (empty) object value rather than an absent one.
    Map,
    /// Passes every value without examining it.
    Any,
    /// A declared field with no declared type. Behaves like [`Kind::Any`].
    Unspecified,
}

impl Kind {
    /// Check a value against this tag. Exact kind match, no coercion.
    pub fn matches(self, value: &Value) -> bool {
        match self {
            Kind::Str => value.is_str(),
            Kind::Num => value.is_num(),
            Kind::BigInt => value.is_bigint(),
            Kind::Bool => value.is_bool(),
            Kind::Array => value.is_array(),
            Kind::Map => value.is_map() || value.is_null(),
            Kind::Any | Kind::Unspecified => true,
        }
    }
}

/// A normalized type expression: the shape a single value is expected to
/// take. Produced by [`Model`] construction; never built from user input
/// without normalization.
#[derive(Clone, Debug, PartialEq)]
pub enum TypeExpr {
    /// A primitive tag.
    Kind(Kind),
    /// A nested model. The value must be a mapping and must conform to the
    /// model, closed-world, exactly as at the top level.
    Model(Model),
    /// A union of alternatives: the value must match at least one, tried in
    /// declaration order.
    Multi(Vec<TypeExpr>),
    /// Alternatives for an array value: every item must match at least one.
    Items(Vec<TypeExpr>),
}

impl TypeExpr {
    /// Check a value against this expression. Pure and total: no side
    /// effects, and termination is bounded by the expression's nesting depth.
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            TypeExpr::Kind(kind) => kind.matches(value),
            TypeExpr::Model(model) => value.is_map() && model.confirm_matches(value),
            TypeExpr::Multi(alts) => alts.iter().any(|alt| alt.matches(value)),
            TypeExpr::Items(alts) => match value.as_array() {
                Some(items) => items
                    .iter()
                    .all(|item| alts.iter().any(|alt| alt.matches(item))),
                None => false,
            },
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn samples() -> Vec<Value> {
        vec![
            Value::Null,
            Value::Bool(false),
            Value::Num(0.5),
            Value::BigInt(420),
            Value::from("text"),
            value!([1, 2]),
            value!({"k": "v"}),
        ]
    }

    #[test]
    fn kind_matching() {
        let expect = [
            (Kind::Str, vec![Value::from("text")]),
            (Kind::Num, vec![Value::Num(0.5)]),
            (Kind::BigInt, vec![Value::BigInt(420)]),
            (Kind::Bool, vec![Value::Bool(false)]),
            (Kind::Array, vec![value!([1, 2])]),
            // the map kind also passes null
            (Kind::Map, vec![value!({"k": "v"}), Value::Null]),
        ];
        for (kind, passing) in expect {
            for value in samples() {
                assert_eq!(
                    kind.matches(&value),
                    passing.contains(&value),
                    "{:?} vs {:?}",
                    kind,
                    value
                );
            }
        }
    }

    #[test]
    fn any_matches_everything() {
        for value in samples() {
            assert!(Kind::Any.matches(&value));
            assert!(Kind::Unspecified.matches(&value));
        }
    }

    #[test]
    fn multi_needs_one_alternative_to_pass() {
        let expr = TypeExpr::Multi(vec![TypeExpr::Kind(Kind::Str), TypeExpr::Kind(Kind::Bool)]);
        assert!(expr.matches(&Value::from("text")));
        assert!(expr.matches(&Value::Bool(true)));
        assert!(!expr.matches(&Value::Num(1.0)));
    }

    #[test]
    fn items_checks_every_element() {
        let expr = TypeExpr::Items(vec![TypeExpr::Kind(Kind::Str), TypeExpr::Kind(Kind::Bool)]);
        assert!(expr.matches(&value!([])));
        assert!(expr.matches(&value!(["a", false, "b"])));
        assert!(!expr.matches(&value!(["a", 1])));
        assert!(!expr.matches(&value!({"not": "an array"})));
        assert!(!expr.matches(&Value::from("not an array")));
    }

    #[test]
    fn empty_items_rejects_any_element() {
        let expr = TypeExpr::Items(Vec::new());
        assert!(expr.matches(&value!([])));
        assert!(!expr.matches(&value!([1])));
    }
}
