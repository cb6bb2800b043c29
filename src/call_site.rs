use std::{
    borrow::Cow,
    fmt::{self, Formatter},
};

/// Name of the synthetic property that backs an indexer.
pub const INDEXER: &str = "index";

/// Whether a member is a plain method or a generic (type parameterized)
/// one.
///
/// Plain and generic implementations live in separate registries so a
/// generic call can never be answered by a plain implementation that
/// happens to share its name and shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    Plain,
    Generic,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Kind::Plain => f.write_str("plain"),
            Kind::Generic => f.write_str("generic"),
        }
    }
}

/// Which half of a property (or indexer) is being accessed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Accessor {
    Get,
    Set,
}

impl Accessor {
    /// The synthetic member name for this accessor of `property`.
    ///
    /// ```
    /// use dynamock::Accessor;
    ///
    /// assert_eq!(Accessor::Get.member_name("enabled"), "get_enabled");
    /// assert_eq!(Accessor::Set.member_name("enabled"), "set_enabled");
    /// ```
    pub fn member_name(self, property: &str) -> String {
        match self {
            Accessor::Get => format!("get_{}", property),
            Accessor::Set => format!("set_{}", property),
        }
    }
}

/// Identifies the member a mock is forwarding: its (possibly
/// synthetic) name and its [`Kind`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallSite {
    name: Cow<'static, str>,
    kind: Kind,
}

impl CallSite {
    pub fn new(name: impl Into<Cow<'static, str>>, kind: Kind) -> Self {
        CallSite {
            name: name.into(),
            kind,
        }
    }

    pub fn method(name: impl Into<Cow<'static, str>>) -> Self {
        CallSite::new(name, Kind::Plain)
    }

    pub fn generic(name: impl Into<Cow<'static, str>>) -> Self {
        CallSite::new(name, Kind::Generic)
    }

    pub fn property(name: &str, accessor: Accessor) -> Self {
        CallSite::method(accessor.member_name(name))
    }

    pub fn indexer(accessor: Accessor) -> Self {
        CallSite::property(INDEXER, accessor)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }
}

impl fmt::Display for CallSite {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.kind {
            Kind::Plain => f.write_str(&self.name),
            Kind::Generic => write!(f, "{}<_>", self.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn properties_are_plain_synthetic_methods() {
        let site = CallSite::property("is_something_true", Accessor::Set);
        assert_eq!(site.name(), "set_is_something_true");
        assert_eq!(site.kind(), Kind::Plain);
    }

    #[test]
    fn indexer_is_a_property() {
        assert_eq!(CallSite::indexer(Accessor::Get).name(), "get_index");
        assert_eq!(
            CallSite::indexer(Accessor::Set),
            CallSite::property(INDEXER, Accessor::Set)
        );
    }

    #[test]
    fn generic_sites_display_their_kind() {
        assert_eq!(CallSite::generic("convert").to_string(), "convert<_>");
        assert_eq!(CallSite::method("convert").to_string(), "convert");
    }
}
