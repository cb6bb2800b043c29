use std::any::Any;

use crate::{
    registry::Resolution, Accessor, Arguments, CallSite, Dispatch, Error, Implementation,
    IntoImplementation, Kind, Registry, Signature, TypeInfo, INDEXER,
};

/// A mock backend that picks between overloads by signature.
///
/// Several implementations may share a member name. On every call the
/// implementations registered under the call site's name are checked,
/// in registration order, against the argument types and the output
/// type the caller expects; the first one that fits is run. A later
/// registration that conflicts with an earlier one is never reached.
///
/// Plain and generic members are kept in separate registries: a
/// generic call site is only ever resolved against generic
/// implementations, even when a plain one would fit.
///
/// ```
/// use dynamock::{args, CallSite, Dispatch, DynamicMock};
///
/// let mut mock = DynamicMock::new();
/// mock.add_method("get", |_: String| 35)
///     .add_method("get", |_: String, _: i32| "works!".to_string());
///
/// let value: String = mock.dispatch(&CallSite::method("get"), args!["Hello".to_string(), 7654]);
/// assert_eq!(value, "works!");
///
/// let value: i32 = mock.dispatch(&CallSite::method("get"), args!["Single String".to_string()]);
/// assert_eq!(value, 35);
/// ```
#[derive(Debug, Default)]
pub struct DynamicMock {
    plain: Registry,
    generic: Registry,
}

impl DynamicMock {
    pub fn new() -> Self {
        DynamicMock::default()
    }

    /// Registers an implementation of a member of the given kind.
    pub fn register<M>(
        &mut self,
        kind: Kind,
        name: impl Into<String>,
        implementation: impl IntoImplementation<M>,
    ) -> &mut Self {
        self.registry_mut(kind)
            .add(name, Implementation::new(implementation));
        self
    }

    /// Registers an implementation of a plain method.
    pub fn add_method<M>(
        &mut self,
        name: impl Into<String>,
        implementation: impl IntoImplementation<M>,
    ) -> &mut Self {
        self.register(Kind::Plain, name, implementation)
    }

    /// Registers an implementation of a generic method.
    ///
    /// Register one implementation per instantiation the code under
    /// test uses, e.g. both `|x: String| x` and `|x: i32| x` for a
    /// `fn echo<T>(&self, x: T) -> T`.
    pub fn add_generic_method<M>(
        &mut self,
        name: impl Into<String>,
        implementation: impl IntoImplementation<M>,
    ) -> &mut Self {
        self.register(Kind::Generic, name, implementation)
    }

    /// Registers the getter or setter of a property.
    pub fn add_property<M>(
        &mut self,
        name: &str,
        accessor: Accessor,
        implementation: impl IntoImplementation<M>,
    ) -> &mut Self {
        self.add_method(accessor.member_name(name), implementation)
    }

    /// Registers the getter or setter of the indexer.
    pub fn add_indexer<M>(
        &mut self,
        accessor: Accessor,
        implementation: impl IntoImplementation<M>,
    ) -> &mut Self {
        self.add_property(INDEXER, accessor, implementation)
    }

    /// Signatures registered under `name` for `kind`, in registration
    /// order.
    pub fn overloads(&self, kind: Kind, name: &str) -> Vec<&Signature> {
        self.registry(kind).signatures(name)
    }

    fn registry(&self, kind: Kind) -> &Registry {
        match kind {
            Kind::Plain => &self.plain,
            Kind::Generic => &self.generic,
        }
    }

    fn registry_mut(&mut self, kind: Kind) -> &mut Registry {
        match kind {
            Kind::Plain => &mut self.plain,
            Kind::Generic => &mut self.generic,
        }
    }
}

impl Dispatch for DynamicMock {
    fn invoke<O: Any>(&self, site: &CallSite, arguments: Arguments) -> Result<O, Error> {
        let output = TypeInfo::of::<O>();

        tracing::debug!(%site, %arguments, %output, "dispatching");

        let implementation = match self
            .registry(site.kind())
            .resolve(site.name(), &arguments, output)
        {
            Resolution::Found(implementation) => implementation,
            Resolution::Unknown => {
                return Err(Error::NotFound {
                    name: site.name().to_string(),
                    kind: site.kind(),
                })
            }
            Resolution::Rejected(rejections) => {
                return Err(Error::NoMatch {
                    name: site.name().to_string(),
                    kind: site.kind(),
                    arguments: arguments.to_string(),
                    output,
                    rejections,
                })
            }
        };

        let described = arguments.to_string();
        implementation
            .call_typed(arguments)
            .map_err(|mismatch| Error::Signature {
                name: site.name().to_string(),
                arguments: described,
                mismatch,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args;

    #[test]
    fn plain_and_generic_are_separate() {
        let mut mock = DynamicMock::new();
        mock.add_method("echo", |x: i32| x + 1)
            .add_generic_method("echo", |x: i32| x + 2);

        let plain: i32 = mock.dispatch(&CallSite::method("echo"), args![1]);
        let generic: i32 = mock.dispatch(&CallSite::generic("echo"), args![1]);
        assert_eq!(plain, 2);
        assert_eq!(generic, 3);

        assert_eq!(mock.overloads(Kind::Plain, "echo").len(), 1);
        assert_eq!(mock.overloads(Kind::Generic, "echo").len(), 1);
    }

    #[test]
    fn properties_use_synthetic_names() {
        let mut mock = DynamicMock::new();
        mock.add_property("ready", Accessor::Get, || true);

        assert_eq!(mock.overloads(Kind::Plain, "get_ready").len(), 1);
        let ready: bool = mock.dispatch(&CallSite::property("ready", Accessor::Get), args![]);
        assert!(ready);
    }

    #[test]
    fn not_found_names_the_registry() {
        let mut mock = DynamicMock::new();
        mock.add_method("only_plain", || ());

        let error = mock
            .invoke::<()>(&CallSite::generic("only_plain"), args![])
            .unwrap_err();
        assert!(matches!(
            error,
            Error::NotFound {
                kind: Kind::Generic,
                ..
            }
        ));
    }
}
