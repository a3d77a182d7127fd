//! Declarative shape models for verifying in-memory JSON-like values.
//!
//! A [`Model`] describes the expected shape of an object graph: primitive
//! kinds, nested shapes, unions of alternatives, arrays whose items must
//! each match one of several alternatives, optional fields, and custom
//! refinement predicates. Once built, a model answers exactly one question
//! about a given [`Value`], with a plain boolean: does it conform?
//! Verification is closed-world: a candidate carrying any key the model does
//! not declare is rejected, at every nesting level.
//!
//! Models operate on already-materialized values. This crate does not parse
//! JSON text; bring values in through the [`value!`] macro, the `From`
//! conversions (including `From<serde_json::Value>`), or serde
//! deserialization into [`Value`].
//!
//! # Examples
//!
//! Definitions are written with the [`def!`] macro and the [`Kind`] tags:
//!
//! ```
//! use json_model::{def, value, Kind::*, Model, Union};
//!
//! # fn main() -> json_model::Result<()> {
//! let post = Model::new(def!({
//!     "title": Str,
//!     "public": Bool,
//!     "views": {"type": Num, "required": false},
//!     "tags": [Str],
//!     "author": {
//!         "name": Str,
//!         "id": (Union::new().alt(Num).alt(Str)),
//!     },
//! }))?;
//!
//! assert!(post.confirm_matches(&value!({
//!     "title": "First Post",
//!     "public": true,
//!     "tags": ["first", "test"],
//!     "author": {"name": "grue", "id": 7},
//! })));
//!
//! // an undeclared key fails the whole candidate
//! assert!(!post.confirm_matches(&value!({
//!     "title": "First Post",
//!     "public": true,
//!     "tags": [],
//!     "author": {"name": "grue", "id": 7},
//!     "spam": 1,
//! })));
//! # Ok(())
//! # }
//! ```
//!
//! Fields can carry refinement predicates, applied only after the
//! structural check passes:
//!
//! ```
//! use json_model::{def, value, Kind::*, Desc, Model};
//!
//! # fn main() -> json_model::Result<()> {
//! let user = Model::new(def!({
//!     "name": (Desc::new(Str).refine(|v| v.as_str().map_or(false, |s| !s.is_empty()))),
//! }))?;
//! assert!(user.confirm_matches(&value!({"name": "grue"})));
//! assert!(!user.confirm_matches(&value!({"name": ""})));
//! # Ok(())
//! # }
//! ```
//!
//! # Errors
//!
//! Malformed definitions fail at [`Model::new`] with [`Error::NullValue`] or
//! [`Error::TypeMismatch`]; validation itself never fails and never panics.
//! Models are immutable and [`Send`]`+`[`Sync`], so a model built once can
//! be checked from many threads at once.

#[macro_use]
mod macros;

pub mod def;
pub mod error;
pub mod expr;
pub mod field;
pub mod model;
pub mod value;

pub use self::def::{Def, Desc, Union};
pub use self::error::{Error, Result};
pub use self::expr::{Kind, TypeExpr};
pub use self::field::{FieldType, Refinement};
pub use self::model::Model;
pub use self::value::Value;
