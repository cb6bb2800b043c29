use std::{
    any::Any,
    fmt::{self, Formatter},
};

use parking_lot::Mutex;
use paste::paste;

use crate::{Arg, Arguments, Mismatch, Signature, TypeInfo};

type Output = Box<dyn Any + Send>;
type Invoker = Box<dyn FnMut(Arguments) -> Result<Output, Mismatch> + Send>;

/// A registered implementation: a closure together with the
/// [`Signature`] it was declared with.
///
/// The closure is kept behind a lock so it can be `FnMut` while the
/// mock is only borrowed immutably. An implementation must not call
/// back into the same mocked member.
pub struct Implementation {
    signature: Signature,
    invoker: Mutex<Invoker>,
}

impl Implementation {
    /// Wraps any supported closure. See [`IntoImplementation`].
    pub fn new<M>(implementation: impl IntoImplementation<M>) -> Self {
        implementation.into_implementation()
    }

    fn from_parts(signature: Signature, invoker: Invoker) -> Self {
        Implementation {
            signature,
            invoker: Mutex::new(invoker),
        }
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// Runs the implementation.
    ///
    /// The arguments are checked against the signature before the
    /// closure is touched, so a mismatch has no side effects.
    pub fn call(&self, arguments: Arguments) -> Result<Output, Mismatch> {
        let mut invoker = self.invoker.lock();
        (*invoker)(arguments)
    }

    /// Runs the implementation and recovers its typed output.
    pub fn call_typed<O: Any>(&self, arguments: Arguments) -> Result<O, Mismatch> {
        let expected = TypeInfo::of::<O>();
        if self.signature.output() != expected {
            return Err(Mismatch::Output {
                expected,
                actual: self.signature.output(),
            });
        }

        let output = self.call(arguments)?;
        output
            .downcast::<O>()
            .map(|output| *output)
            .map_err(|_| Mismatch::Output {
                expected,
                actual: self.signature.output(),
            })
    }
}

impl fmt::Debug for Implementation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        // the closure itself is opaque
        f.debug_struct("Implementation")
            .field("signature", &self.signature)
            .finish()
    }
}

/// Closures that can be registered as an [`Implementation`].
///
/// Implemented for every `FnMut` of up to eight parameters whose
/// parameter and return types are `Any + Send`. `M` is the closure's
/// function pointer type (e.g. `fn(String, i32) -> String`) and is
/// always inferred; it only exists to keep the arities apart.
///
/// Closure parameters must be annotated so their types are known:
///
/// ```
/// use dynamock::{args, Implementation};
///
/// let implementation = Implementation::new(|a: String, b: i32| format!("{a}{b}"));
/// let output: String = implementation.call_typed(args!["x".to_string(), 1]).unwrap();
/// assert_eq!(output, "x1");
/// ```
pub trait IntoImplementation<M>: Send + 'static {
    fn into_implementation(self) -> Implementation;
}

fn take<T: Any>(
    values: &mut impl Iterator<Item = (usize, Arg)>,
    arity: usize,
) -> Result<T, Mismatch> {
    let (position, arg) = values.next().ok_or(Mismatch::Arity {
        expected: arity,
        actual: 0,
    })?;

    arg.downcast::<T>().map_err(|arg| Mismatch::Argument {
        position,
        expected: TypeInfo::of::<T>(),
        actual: arg.type_info(),
    })
}

// implement IntoImplementation for closures of the given parameters
macro_rules! arity {
    ($($param:ident),*) => (
        paste! {
            impl<F, O, $($param),*> IntoImplementation<fn($($param),*) -> O> for F
            where
                F: FnMut($($param),*) -> O + Send + 'static,
                O: Any + Send,
                $($param: Any + Send,)*
            {
                fn into_implementation(self) -> Implementation {
                    let signature = Signature::new(
                        vec![$(TypeInfo::of::<$param>()),*],
                        TypeInfo::of::<O>(),
                    );
                    let expected = signature.clone();
                    let mut implementation = self;

                    let invoker = move |arguments: Arguments| -> Result<Output, Mismatch> {
                        expected.check_arguments(&arguments)?;

                        #[allow(unused_mut, unused_variables)]
                        let mut values = arguments.into_iter().enumerate();
                        $(
                            let [<$param:lower>] = take::<$param>(&mut values, expected.arity())?;
                        )*

                        let output: Output = Box::new(implementation($([<$param:lower>]),*));
                        Ok(output)
                    };

                    Implementation::from_parts(signature, Box::new(invoker))
                }
            }
        }
    )
}

// (a,b,c) => arity!(a,b,c) + peel!(b,c)
macro_rules! peel {
    () => (
        arity! {}
    );
    ($first:ident $(, $other:ident)*) => (
        arity! { $first $(, $other)* }
        peel! { $($other),* }
    );
}

peel! { A0, A1, A2, A3, A4, A5, A6, A7 }
