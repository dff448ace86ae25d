//! # Validation Entry Points
//!
//! [`param`] validates one value; [`multi_params`] validates a positional
//! argument list against a parallel list of checkers, enforcing arity
//! first. Both start from a fresh root path and stop at the first failure.

use tsguard_core::{ValidationError, Value, ValuePath};

use crate::checker::Checker;
use crate::matcher::{self, UNDEFINED};

/// Validate `value` against `checker`.
///
/// # Errors
///
/// Returns the first [`ValidationError`] encountered while walking the
/// value.
pub fn param(checker: &Checker, value: &Value) -> Result<(), ValidationError> {
    let mut path = ValuePath::root();
    match matcher::check(checker, value, &mut path) {
        Ok(()) => {
            tracing::trace!(kind = %checker.kind(), "value accepted");
            Ok(())
        }
        Err(err) => {
            tracing::debug!(kind = %checker.kind(), error = %err, "value rejected");
            Err(err)
        }
    }
}

/// Accepted argument-count range for `checkers`: the number of
/// non-optional checkers up to the total number of checkers.
pub fn arity(checkers: &[Checker]) -> (usize, usize) {
    let min = checkers.iter().filter(|c| !c.is_optional()).count();
    (min, checkers.len())
}

/// Validate a positional argument list.
///
/// Arguments beyond the end of `args` are treated as `undefined`, so
/// trailing optional checkers are satisfied when their argument is
/// omitted. Returns `args` unchanged for positional destructuring:
///
/// ```
/// use tsguard_check::{multi_params, NUMBER, STRING};
/// use tsguard_core::Value;
///
/// let args = [Value::from("Alice"), Value::from(30)];
/// let [name, age] = multi_params(&args, &[STRING, NUMBER]).unwrap() else {
///     unreachable!()
/// };
/// assert_eq!(name.as_str(), Some("Alice"));
/// assert_eq!(age.as_f64(), Some(30.0));
/// ```
///
/// # Errors
///
/// `ArityOutOfRange` if `args.len()` is outside [`arity`], checked before
/// any argument is validated; otherwise the first argument's
/// [`ValidationError`].
pub fn multi_params<'a>(
    args: &'a [Value],
    checkers: &[Checker],
) -> Result<&'a [Value], ValidationError> {
    let (min, max) = arity(checkers);
    if args.len() < min || args.len() > max {
        tracing::debug!(min, max, received = args.len(), "argument count out of range");
        return Err(ValidationError::ArityOutOfRange {
            min,
            max,
            received: args.len(),
        });
    }
    for (i, checker) in checkers.iter().enumerate() {
        param(checker, args.get(i).unwrap_or(&UNDEFINED))?;
    }
    Ok(args)
}
