//! The definition language models are built from, and its normalization.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use educe::Educe;

use crate::error::{Error, Result};
use crate::expr::{Kind, TypeExpr};
use crate::field::{FieldType, Refinement};
use crate::model::Model;
use crate::value::Value;

/// A schema definition node: the vocabulary accepted by
/// [`Model::new`]. Definitions are plain data; nothing is checked until a
/// model is built from them, at which point every node is normalized into a
/// [`TypeExpr`] or a [`FieldType`] and all malformed input surfaces as a
/// construction error.
///
/// The [`def!`] macro builds these from literals. `From`
/// conversions cover the rest: kinds, models, unions, descriptors, booleans
/// (for a descriptor's `"required"` entry), and vectors of definitions.
#[derive(Clone)]
pub enum Def {
    /// Explicit null. Never a valid definition; normalization reports
    /// [`Error::NullValue`] wherever it appears.
    Null,
    /// A boolean. Only meaningful as a descriptor's `"required"` entry.
    Bool(bool),
    /// A primitive type tag.
    Kind(Kind),
    /// Alternatives for an array value: every item must match one of these.
    List(Vec<Def>),
    /// An inline nested shape, or a dynamic descriptor when it carries a
    /// `"type"` key.
    Map(BTreeMap<String, Def>),
    /// A pre-built model used as a field's type.
    Model(Model),
    /// A union of alternatives.
    Union(Union),
    /// A field descriptor in builder form.
    Desc(Desc),
    /// A refinement predicate. Only meaningful as a descriptor's
    /// `"refinement"` entry.
    Predicate(Refinement),
}

impl Def {
    /// Build a field mapping out of name/definition pairs.
    pub fn map<K, D, I>(entries: I) -> Self
    where
        K: Into<String>,
        D: Into<Def>,
        I: IntoIterator<Item = (K, D)>,
    {
        Def::Map(
            entries
                .into_iter()
                .map(|(key, def)| (key.into(), def.into()))
                .collect(),
        )
    }

    /// Wrap a predicate for use as a descriptor's `"refinement"` entry.
    pub fn refine(refine: impl Fn(&Value) -> bool + Send + Sync + 'static) -> Self {
        Def::Predicate(Arc::new(refine))
    }

    pub(crate) fn name(&self) -> &'static str {
        match *self {
            Def::Null => "null",
            Def::Bool(_) => "a boolean",
            Def::Kind(_) => "a type tag",
            Def::List(_) => "an alternatives list",
            Def::Map(_) => "a field mapping",
            Def::Model(_) => "a model",
            Def::Union(_) => "a union",
            Def::Desc(_) => "a descriptor",
            Def::Predicate(_) => "a predicate",
        }
    }

    /// Normalize a field definition into its descriptor. A mapping that
    /// carries a `"type"` key is read as a dynamic descriptor; everything
    /// else is a bare type expression, required by default.
    pub(crate) fn into_field(self) -> Result<FieldType> {
        match self {
            Def::Map(map) if map.contains_key("type") => Desc::from_map(map)?.into_field(),
            Def::Desc(desc) => desc.into_field(),
            other @ (Def::Bool(_) | Def::Predicate(_)) => Err(Error::TypeMismatch(format!(
                "{} is not a field definition",
                other.name()
            ))),
            other => Ok(FieldType::new(other.into_expr()?, true, None)),
        }
    }

    /// Normalize a definition into a type expression. In type position a
    /// mapping is always an inline nested shape, even when it happens to
    /// contain a `"type"` key.
    pub(crate) fn into_expr(self) -> Result<TypeExpr> {
        match self {
            Def::Kind(kind) => Ok(TypeExpr::Kind(kind)),
            Def::List(defs) => Ok(TypeExpr::Items(
                defs.into_iter()
                    .map(Def::into_expr)
                    .collect::<Result<_>>()?,
            )),
            Def::Map(map) => Ok(TypeExpr::Model(Model::from_fields(map)?)),
            Def::Model(model) => Ok(TypeExpr::Model(model)),
            Def::Union(union) => Ok(TypeExpr::Multi(union.normalize()?)),
            Def::Null => Err(Error::NullValue("a type cannot be null".to_string())),
            other => Err(Error::TypeMismatch(format!(
                "{} is not a type",
                other.name()
            ))),
        }
    }
}

impl fmt::Debug for Def {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Def::Null => f.write_str("Null"),
            Def::Bool(v) => f.debug_tuple("Bool").field(v).finish(),
            Def::Kind(v) => f.debug_tuple("Kind").field(v).finish(),
            Def::List(v) => f.debug_tuple("List").field(v).finish(),
            Def::Map(v) => f.debug_tuple("Map").field(v).finish(),
            Def::Model(v) => f.debug_tuple("Model").field(v).finish(),
            Def::Union(v) => f.debug_tuple("Union").field(v).finish(),
            Def::Desc(v) => f.debug_tuple("Desc").field(v).finish(),
            Def::Predicate(_) => f.write_str("Predicate"),
        }
    }
}

impl From<Kind> for Def {
    fn from(v: Kind) -> Self {
        Def::Kind(v)
    }
}

impl From<Model> for Def {
    fn from(v: Model) -> Self {
        Def::Model(v)
    }
}

impl From<Union> for Def {
    fn from(v: Union) -> Self {
        Def::Union(v)
    }
}

impl From<Desc> for Def {
    fn from(v: Desc) -> Self {
        Def::Desc(v)
    }
}

impl From<bool> for Def {
    fn from(v: bool) -> Self {
        Def::Bool(v)
    }
}

impl From<Vec<Def>> for Def {
    fn from(v: Vec<Def>) -> Self {
        Def::List(v)
    }
}

/// An ordered set of alternative types: a value passes if it matches at
/// least one of them, tried in the order they were added.
///
/// ```
/// # use json_model::{def, value, Kind::*, Model, Union};
/// # fn main() -> json_model::Result<()> {
/// let id = Union::new().alt(Num).alt(Str);
/// let model = Model::new(def!({"id": id}))?;
/// assert!(model.confirm_matches(&value!({"id": 7})));
/// assert!(model.confirm_matches(&value!({"id": "seven"})));
/// assert!(!model.confirm_matches(&value!({"id": true})));
/// # Ok(())
/// # }
/// ```
///
/// Construction never fails; alternatives that are raw shapes are
/// normalized into nested models when the union is built into a
/// [`Model`], and any malformed alternative surfaces there.
#[derive(Clone, Debug, Default)]
pub struct Union {
    alts: Vec<Def>,
}

impl Union {
    /// Make a new union with no alternatives yet. A union must be given at
    /// least one alternative before it is built into a model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an alternative.
    pub fn alt(mut self, alt: impl Into<Def>) -> Self {
        self.alts.push(alt.into());
        self
    }

    pub(crate) fn normalize(self) -> Result<Vec<TypeExpr>> {
        if self.alts.is_empty() {
            return Err(Error::TypeMismatch(
                "a union needs at least one alternative".to_string(),
            ));
        }
        self.alts.into_iter().map(Def::into_expr).collect()
    }
}

/// A field descriptor in builder form: a type plus a required flag and an
/// optional refinement.
///
/// ```
/// # use json_model::{def, value, Kind::*, Desc, Model};
/// # fn main() -> json_model::Result<()> {
/// let model = Model::new(def!({
///     "name": (Desc::new(Str).refine(|v| v.as_str().map_or(false, |s| !s.is_empty()))),
///     "alias": (Desc::new(Str).required(false)),
/// }))?;
/// assert!(model.confirm_matches(&value!({"name": "grue"})));
/// assert!(!model.confirm_matches(&value!({"name": ""})));
/// # Ok(())
/// # }
/// ```
///
/// The same descriptor can be written dynamically as a mapping with a
/// `"type"` key and optional `"required"` and `"refinement"` keys; both
/// forms normalize identically.
#[derive(Educe, Clone)]
#[educe(Debug)]
pub struct Desc {
    ty: Box<Def>,
    required: bool,
    #[educe(Debug(ignore))]
    refinement: Option<Refinement>,
}

impl Desc {
    /// Describe a field of the given type, required, with no refinement.
    pub fn new(ty: impl Into<Def>) -> Self {
        Desc {
            ty: Box::new(ty.into()),
            required: true,
            refinement: None,
        }
    }

    /// Set whether the field must be present.
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Set a refinement predicate, checked after the structural type check
    /// passes.
    pub fn refine(mut self, refine: impl Fn(&Value) -> bool + Send + Sync + 'static) -> Self {
        self.refinement = Some(Arc::new(refine));
        self
    }

    pub(crate) fn from_map(mut map: BTreeMap<String, Def>) -> Result<Self> {
        let ty = match map.remove("type") {
            Some(Def::Null) => {
                return Err(Error::NullValue("a descriptor type cannot be null".to_string()))
            }
            Some(ty) => ty,
            None => Def::Kind(Kind::Unspecified),
        };
        let mut desc = Desc {
            ty: Box::new(ty),
            required: true,
            refinement: None,
        };
        for (key, value) in map {
            match (key.as_str(), value) {
                ("required", Def::Bool(required)) => desc.required = required,
                ("required", other) => {
                    return Err(Error::TypeMismatch(format!(
                        "required must be a boolean, not {}",
                        other.name()
                    )))
                }
                ("refinement", Def::Predicate(refine)) => desc.refinement = Some(refine),
                ("refinement", other) => {
                    return Err(Error::TypeMismatch(format!(
                        "refinement must be a predicate, not {}",
                        other.name()
                    )))
                }
                (key, _) => {
                    return Err(Error::TypeMismatch(format!(
                        "unknown descriptor key {:?}",
                        key
                    )))
                }
            }
        }
        Ok(desc)
    }

    pub(crate) fn into_field(self) -> Result<FieldType> {
        Ok(FieldType::new(
            (*self.ty).into_expr()?,
            self.required,
            self.refinement,
        ))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::expr::Kind::{Bool, Str};

    #[test]
    fn builder_and_dynamic_descriptors_normalize_alike() {
        let built = Desc::new(Bool).required(false).into_field().unwrap();
        let dynamic = def!({"type": Bool, "required": false})
            .into_field()
            .unwrap();
        assert_eq!(built, dynamic);

        let bare = Def::from(Bool).into_field().unwrap();
        assert_eq!(bare, Desc::new(Bool).into_field().unwrap());
    }

    #[test]
    fn required_must_be_a_boolean() {
        let err = def!({"type": Str, "required": Str}).into_field().unwrap_err();
        assert!(matches!(err, Error::TypeMismatch(_)));
    }

    #[test]
    fn refinement_must_be_a_predicate() {
        let err = def!({"type": Str, "refinement": false})
            .into_field()
            .unwrap_err();
        assert!(matches!(err, Error::TypeMismatch(_)));

        let ok = def!({
            "type": Str,
            "refinement": (Def::refine(|v| v.as_str().map_or(false, |s| s.len() < 8))),
        })
        .into_field()
        .unwrap();
        assert!(ok.matches(Some(&Value::from("short"))));
        assert!(!ok.matches(Some(&Value::from("much too long"))));
    }

    #[test]
    fn unknown_descriptor_keys_are_rejected() {
        let err = def!({"type": Str, "requird": false}).into_field().unwrap_err();
        assert_eq!(
            err,
            Error::TypeMismatch("unknown descriptor key \"requird\"".to_string())
        );
    }

    #[test]
    fn null_types_are_rejected() {
        assert!(matches!(
            def!({"type": null}).into_field(),
            Err(Error::NullValue(_))
        ));
        assert!(matches!(def!(null).into_field(), Err(Error::NullValue(_))));
    }

    #[test]
    fn a_union_needs_alternatives() {
        let err = Def::from(Union::new()).into_field().unwrap_err();
        assert!(matches!(err, Error::TypeMismatch(_)));
    }

    #[test]
    fn stray_booleans_and_predicates_are_not_definitions() {
        assert!(def!(false).into_field().is_err());
        assert!(Def::refine(|_| true).into_field().is_err());
        assert!(def!({"a": false}).into_field().is_err());
    }

    #[test]
    fn a_map_in_type_position_is_an_inline_shape() {
        // even when the inner mapping itself has a "type" field
        let field = def!({"type": {"type": Str}}).into_field().unwrap();
        assert!(field.matches(Some(&value!({"type": "text"}))));
        assert!(!field.matches(Some(&value!({"type": true}))));
        assert!(!field.matches(Some(&value!({"other": "text"}))));
    }
}
