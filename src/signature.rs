use std::{
    any::{Any, TypeId},
    fmt::{self, Formatter},
};

use thiserror::Error;

use crate::Arguments;

/// A runtime type identity that remembers how to print itself.
///
/// Two `TypeInfo`s are equal when their [`TypeId`]s are; the name is
/// only kept for messages.
#[derive(Clone, Copy)]
pub struct TypeInfo {
    id: TypeId,
    name: &'static str,
}

impl TypeInfo {
    pub fn of<T: Any + ?Sized>() -> Self {
        TypeInfo {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for TypeInfo {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeInfo {}

impl fmt::Debug for TypeInfo {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

impl fmt::Display for TypeInfo {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// The declared shape of a registered implementation.
///
/// Signatures are derived from the parameter and return types of the
/// closure handed to the registry, so a call can be checked against
/// an implementation without ever running it.
#[derive(Clone, PartialEq, Eq)]
pub struct Signature {
    params: Vec<TypeInfo>,
    output: TypeInfo,
}

/// Why a [`Signature`] refused a call.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Mismatch {
    #[error("expected {expected} argument(s) but was given {actual}")]
    Arity { expected: usize, actual: usize },
    #[error("argument {position} expected `{expected}` but was given `{actual}`")]
    Argument {
        position: usize,
        expected: TypeInfo,
        actual: TypeInfo,
    },
    #[error("returns `{actual}` but the caller expected `{expected}`")]
    Output { expected: TypeInfo, actual: TypeInfo },
}

impl Signature {
    pub fn new(params: Vec<TypeInfo>, output: TypeInfo) -> Self {
        Signature { params, output }
    }

    pub fn params(&self) -> &[TypeInfo] {
        &self.params
    }

    pub fn output(&self) -> TypeInfo {
        self.output
    }

    pub fn arity(&self) -> usize {
        self.params.len()
    }

    /// Checks that `arguments` can be bound to the parameters, in
    /// order and with exactly the declared types.
    pub fn check_arguments(&self, arguments: &Arguments) -> Result<(), Mismatch> {
        if arguments.len() != self.params.len() {
            return Err(Mismatch::Arity {
                expected: self.params.len(),
                actual: arguments.len(),
            });
        }

        self.params
            .iter()
            .zip(arguments.types())
            .enumerate()
            .try_for_each(|(position, (&expected, actual))| {
                if expected == actual {
                    Ok(())
                } else {
                    Err(Mismatch::Argument {
                        position,
                        expected,
                        actual,
                    })
                }
            })
    }

    /// Checks both the arguments and the output the caller wants back.
    pub fn check(&self, arguments: &Arguments, output: TypeInfo) -> Result<(), Mismatch> {
        self.check_arguments(arguments)?;

        if self.output == output {
            Ok(())
        } else {
            Err(Mismatch::Output {
                expected: output,
                actual: self.output,
            })
        }
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("fn(")?;
        let mut params = self.params.iter();
        if let Some(first) = params.next() {
            write!(f, "{}", first)?;
        }
        params.try_for_each(|param| write!(f, ", {}", param))?;
        write!(f, ") -> {}", self.output)
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Signature({})", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args;

    fn string_int() -> Signature {
        Signature::new(
            vec![TypeInfo::of::<String>(), TypeInfo::of::<i32>()],
            TypeInfo::of::<String>(),
        )
    }

    #[test]
    fn accepts_exact_types() {
        let signature = string_int();
        let arguments = args!["hello".to_string(), 7654];
        assert_eq!(signature.check(&arguments, TypeInfo::of::<String>()), Ok(()));
    }

    #[test]
    fn rejects_wrong_arity() {
        let signature = string_int();
        let arguments = args!["hello".to_string()];
        assert_eq!(
            signature.check_arguments(&arguments),
            Err(Mismatch::Arity {
                expected: 2,
                actual: 1
            })
        );
    }

    #[test]
    fn reports_first_mismatched_position() {
        let signature = string_int();
        let arguments = args!["hello".to_string(), "world".to_string()];
        assert_eq!(
            signature.check_arguments(&arguments),
            Err(Mismatch::Argument {
                position: 1,
                expected: TypeInfo::of::<i32>(),
                actual: TypeInfo::of::<String>(),
            })
        );
    }

    #[test]
    fn output_takes_part_in_matching() {
        let signature = string_int();
        let arguments = args!["hello".to_string(), 1];
        assert!(matches!(
            signature.check(&arguments, TypeInfo::of::<i32>()),
            Err(Mismatch::Output { .. })
        ));
    }

    #[test]
    fn no_implicit_conversions() {
        let signature = string_int();
        // &str is not String and i64 is not i32
        let arguments = args!["hello", 1_i64];
        assert!(signature.check_arguments(&arguments).is_err());
    }

    #[test]
    fn displays_as_fn_pointer() {
        let signature = Signature::new(vec![], TypeInfo::of::<()>());
        assert_eq!(signature.to_string(), "fn() -> ()");

        let printed = string_int().to_string();
        assert!(printed.starts_with("fn("));
        assert!(printed.contains("String, i32) -> "));
    }
}
