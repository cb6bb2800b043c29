use std::{any::Any, collections::HashMap};

use parking_lot::Mutex;

use crate::{
    Accessor, Arguments, CallSite, Dispatch, Error, Implementation, IntoImplementation, Mismatch,
    TypeInfo, INDEXER,
};

/// A mock backend holding at most one implementation per member name.
///
/// Members are looked up by name alone: there is no overload
/// resolution and the call site's [`Kind`](crate::Kind) is ignored.
/// Setting a member that already exists replaces it. Every
/// successful call is counted per name.
///
/// ```
/// use dynamock::{args, CallSite, Dispatch, PropertyBag};
///
/// let mut bag = PropertyBag::new();
/// bag.set("get_value", || "hi!".to_string());
///
/// let value: String = bag.dispatch(&CallSite::method("get_value"), args![]);
/// assert_eq!(value, "hi!");
/// assert_eq!(bag.call_count("get_value"), 1);
/// assert_eq!(bag.call_count("call_me"), 0);
/// ```
#[derive(Debug, Default)]
pub struct PropertyBag {
    members: HashMap<String, Implementation>,
    calls: Mutex<HashMap<String, usize>>,
}

impl PropertyBag {
    pub fn new() -> Self {
        PropertyBag::default()
    }

    /// Sets the implementation of a member, replacing any previous
    /// one.
    pub fn set<M>(
        &mut self,
        name: impl Into<String>,
        implementation: impl IntoImplementation<M>,
    ) -> &mut Self {
        let name = name.into();
        let implementation = Implementation::new(implementation);

        if let Some(previous) = self.members.get(&name) {
            tracing::debug!(
                member = %name,
                previous = %previous.signature(),
                replacement = %implementation.signature(),
                "replacing implementation"
            );
        }

        self.members.insert(name, implementation);
        self
    }

    /// Sets the getter or setter of a property.
    pub fn set_property<M>(
        &mut self,
        name: &str,
        accessor: Accessor,
        implementation: impl IntoImplementation<M>,
    ) -> &mut Self {
        self.set(accessor.member_name(name), implementation)
    }

    /// Sets the getter or setter of the indexer.
    pub fn set_indexer<M>(
        &mut self,
        accessor: Accessor,
        implementation: impl IntoImplementation<M>,
    ) -> &mut Self {
        self.set_property(INDEXER, accessor, implementation)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.members.contains_key(name)
    }

    /// How many times `name` was successfully dispatched.
    ///
    /// Names that were never called, or never set, report zero.
    pub fn call_count(&self, name: &str) -> usize {
        self.calls.lock().get(name).copied().unwrap_or(0)
    }

    pub fn reset_counts(&mut self) {
        self.calls.get_mut().clear();
    }
}

impl Dispatch for PropertyBag {
    fn invoke<O: Any>(&self, site: &CallSite, arguments: Arguments) -> Result<O, Error> {
        let output = TypeInfo::of::<O>();

        tracing::debug!(%site, %arguments, %output, "dispatching");

        let implementation = self
            .members
            .get(site.name())
            .ok_or_else(|| Error::NotFound {
                name: site.name().to_string(),
                kind: site.kind(),
            })?;

        let described = arguments.to_string();
        let signature_error = |mismatch: Mismatch| Error::Signature {
            name: site.name().to_string(),
            arguments: described.clone(),
            mismatch,
        };

        // refuse before running anything so a bad call has no effects
        implementation
            .signature()
            .check(&arguments, output)
            .map_err(signature_error)?;

        let result = implementation
            .call_typed(arguments)
            .map_err(signature_error)?;

        *self.calls.lock().entry(site.name().to_string()).or_insert(0) += 1;

        Ok(result)
    }
}
