//! Shape models and the validation entry point.

use std::collections::BTreeMap;

use crate::def::Def;
use crate::error::{Error, Result};
use crate::field::FieldType;
use crate::value::Value;

/// An immutable description of an object shape: a fixed set of field names,
/// each with its own [`FieldType`].
///
/// A model is built once from a [`Def`] and never changes afterwards; the
/// only operation it offers is validation. Checking is closed-world: a
/// candidate carrying any key the model does not declare fails, at every
/// nesting level.
///
/// ```
/// # use json_model::{def, value, Kind::*, Model};
/// # fn main() -> json_model::Result<()> {
/// let post = Model::new(def!({
///     "title": Str,
///     "public": Bool,
///     "views": {"type": Num, "required": false},
/// }))?;
///
/// assert!(post.confirm_matches(&value!({"title": "First Post", "public": true})));
/// assert!(!post.confirm_matches(&value!({"title": "First Post"})));
/// assert!(!post.confirm_matches(&value!({"title": "x", "public": true, "spam": 1})));
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Model {
    fields: BTreeMap<String, FieldType>,
}

impl Model {
    /// Build a model from a definition. The definition must be a field
    /// mapping; every entry is normalized into exactly one [`FieldType`],
    /// recursing through nested shapes, unions, and alternatives lists.
    ///
    /// Fails with [`Error::NullValue`] when the definition (or a nested
    /// type) is null, and [`Error::TypeMismatch`] when the definition is not
    /// a field mapping or a nested definition is malformed. These are the
    /// only failure points in the crate; validation never errors.
    pub fn new(definition: impl Into<Def>) -> Result<Self> {
        match definition.into() {
            Def::Map(fields) => Self::from_fields(fields),
            Def::Null => Err(Error::NullValue(
                "a model definition cannot be null".to_string(),
            )),
            other => Err(Error::TypeMismatch(format!(
                "a model definition must be a field mapping, not {}",
                other.name()
            ))),
        }
    }

    pub(crate) fn from_fields(fields: BTreeMap<String, Def>) -> Result<Self> {
        let fields = fields
            .into_iter()
            .map(|(name, def)| Ok((name, def.into_field()?)))
            .collect::<Result<_>>()?;
        Ok(Model { fields })
    }

    /// Look up one declared field.
    pub fn field(&self, name: &str) -> Option<&FieldType> {
        self.fields.get(name)
    }

    /// Iterate over the declared fields, in name order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldType)> {
        self.fields.iter().map(|(name, field)| (name.as_str(), field))
    }

    /// Check whether a candidate value conforms to this model. Never panics
    /// and never errors; every mismatch is a `false`.
    ///
    /// The candidate must be a mapping, must carry no key outside the
    /// model's field set, and every declared field must accept the
    /// candidate's value for it. An absent key is only tolerated by optional
    /// fields; a present null is a value like any other and must satisfy the
    /// declared type.
    pub fn confirm_matches(&self, candidate: &Value) -> bool {
        let candidate = match candidate.as_map() {
            Some(map) => map,
            None => return false,
        };
        if candidate.keys().any(|key| !self.fields.contains_key(key)) {
            return false;
        }
        self.fields
            .iter()
            .all(|(name, field)| field.matches(candidate.get(name)))
    }
}
