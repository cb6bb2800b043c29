use std::{
    any::Any,
    fmt::{self, Formatter},
};

use crate::TypeInfo;

/// A single type-erased argument.
pub struct Arg {
    value: Box<dyn Any + Send>,
    ty: TypeInfo,
}

impl Arg {
    pub fn new<T: Any + Send>(value: T) -> Self {
        Arg {
            value: Box::new(value),
            ty: TypeInfo::of::<T>(),
        }
    }

    pub fn type_info(&self) -> TypeInfo {
        self.ty
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.value.downcast_ref()
    }

    /// Recovers the owned value, handing the argument back if it is
    /// not a `T`.
    pub fn downcast<T: Any>(self) -> Result<T, Self> {
        let Arg { value, ty } = self;
        match value.downcast::<T>() {
            Ok(value) => Ok(*value),
            Err(value) => Err(Arg { value, ty }),
        }
    }
}

impl fmt::Debug for Arg {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>", self.ty)
    }
}

/// The ordered, type-erased arguments forwarded by a mocked member.
///
/// `Arguments` is also a valid argument itself: members that take a
/// variable number of trailing values receive them as one
/// `Arguments` value. Build it with [`args!`](crate::args).
#[derive(Default)]
pub struct Arguments {
    args: Vec<Arg>,
}

impl Arguments {
    pub fn new() -> Self {
        Arguments::default()
    }

    pub fn push<T: Any + Send>(&mut self, value: T) {
        self.args.push(Arg::new(value));
    }

    /// Builder flavour of [`push`](Self::push).
    pub fn with<T: Any + Send>(mut self, value: T) -> Self {
        self.push(value);
        self
    }

    pub fn len(&self) -> usize {
        self.args.len()
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    pub fn get<T: Any>(&self, index: usize) -> Option<&T> {
        self.args.get(index)?.downcast_ref()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Arg> {
        self.args.iter()
    }

    pub fn types(&self) -> impl Iterator<Item = TypeInfo> + '_ {
        self.args.iter().map(Arg::type_info)
    }
}

impl IntoIterator for Arguments {
    type Item = Arg;
    type IntoIter = std::vec::IntoIter<Arg>;

    fn into_iter(self) -> Self::IntoIter {
        self.args.into_iter()
    }
}

impl<'a> IntoIterator for &'a Arguments {
    type Item = &'a Arg;
    type IntoIter = std::slice::Iter<'a, Arg>;

    fn into_iter(self) -> Self::IntoIter {
        self.args.iter()
    }
}

impl FromIterator<Arg> for Arguments {
    fn from_iter<I: IntoIterator<Item = Arg>>(iter: I) -> Self {
        Arguments {
            args: iter.into_iter().collect(),
        }
    }
}

/// Prints the argument types, e.g. `(alloc::string::String, i32)`.
impl fmt::Display for Arguments {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        let mut types = self.types();
        if let Some(first) = types.next() {
            write!(f, "{}", first)?;
        }
        types.try_for_each(|ty| write!(f, ", {}", ty))?;
        f.write_str(")")
    }
}

impl fmt::Debug for Arguments {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Arguments{}", self)
    }
}

/// Builds [`Arguments`] from a list of expressions.
///
/// Each value keeps its exact type: `args!["a"]` holds a `&str`,
/// `args!["a".to_string()]` holds a `String`.
///
/// ```
/// use dynamock::args;
///
/// let arguments = args!["Hello".to_string(), 7654];
/// assert_eq!(arguments.len(), 2);
/// assert_eq!(arguments.get::<i32>(1), Some(&7654));
///
/// // a trailing array travels as a single argument
/// let rest = args!["params", "keyword"];
/// let arguments = args![223344, rest];
/// assert_eq!(arguments.len(), 2);
/// ```
#[macro_export]
macro_rules! args {
    () => {
        $crate::Arguments::new()
    };
    ($($arg:expr),+ $(,)?) => {
        $crate::Arguments::new()$(.with($arg))+
    };
}
