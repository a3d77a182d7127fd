//! Per-field descriptors: type expression, required flag, refinement.

use std::sync::Arc;

use educe::Educe;

use crate::expr::TypeExpr;
use crate::value::Value;

/// A caller-supplied predicate applied to a field's value after its
/// structural check has already passed.
pub type Refinement = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

/// One field's expectations: a type expression, a required flag, and an
/// optional refinement. Immutable once its owning [`Model`][crate::Model]
/// is built.
///
/// Equality ignores the refinement, which has no useful comparison.
#[derive(Educe, Clone)]
#[educe(Debug, PartialEq)]
pub struct FieldType {
    expr: TypeExpr,
    required: bool,
    #[educe(Debug(ignore), PartialEq(ignore))]
    refinement: Option<Refinement>,
}

impl FieldType {
    pub(crate) fn new(expr: TypeExpr, required: bool, refinement: Option<Refinement>) -> Self {
        FieldType {
            expr,
            required,
            refinement,
        }
    }

    /// The field's type expression.
    pub fn expr(&self) -> &TypeExpr {
        &self.expr
    }

    /// Whether the field must be present. Defaults to true.
    pub fn required(&self) -> bool {
        self.required
    }

    /// Check a field's value, with `None` meaning the key was absent
    /// altogether. A present null is a value like any other and must pass
    /// the declared type. The refinement only runs once the structural check
    /// has passed.
    pub fn matches(&self, value: Option<&Value>) -> bool {
        match value {
            None => !self.required,
            Some(value) => {
                self.expr.matches(value)
                    && self.refinement.as_ref().map_or(true, |refine| refine(value))
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::expr::Kind;
    use std::sync::atomic::{AtomicBool, Ordering};

    #[test]
    fn absent_values_hinge_on_required() {
        let required = FieldType::new(TypeExpr::Kind(Kind::Str), true, None);
        let optional = FieldType::new(TypeExpr::Kind(Kind::Str), false, None);
        assert!(!required.matches(None));
        assert!(optional.matches(None));
    }

    #[test]
    fn optional_does_not_excuse_a_present_mismatch() {
        let optional = FieldType::new(TypeExpr::Kind(Kind::Str), false, None);
        assert!(optional.matches(Some(&Value::from("text"))));
        assert!(!optional.matches(Some(&Value::Null)));
        assert!(!optional.matches(Some(&Value::Bool(true))));
    }

    #[test]
    fn refinement_runs_after_the_structural_check() {
        let called = Arc::new(AtomicBool::new(false));
        let seen = called.clone();
        let field = FieldType::new(
            TypeExpr::Kind(Kind::Num),
            true,
            Some(Arc::new(move |value: &Value| {
                seen.store(true, Ordering::SeqCst);
                value.as_num().map_or(false, |n| n > 0.0)
            })),
        );

        assert!(!field.matches(Some(&Value::from("not a number"))));
        assert!(!called.load(Ordering::SeqCst));

        assert!(!field.matches(Some(&Value::Num(-1.0))));
        assert!(called.load(Ordering::SeqCst));
        assert!(field.matches(Some(&Value::Num(1.0))));
    }
}
