use std::collections::HashMap;

use crate::{Arguments, Implementation, Signature, TypeInfo};

/// Maps member names to their registered overloads.
///
/// Overloads are kept in registration order and the registry only
/// ever grows.
#[derive(Debug, Default)]
pub struct Registry {
    overloads: HashMap<String, Vec<Implementation>>,
}

/// Outcome of looking for an overload that accepts a call.
#[derive(Debug)]
pub enum Resolution<'r> {
    /// Nothing is registered under the name.
    Unknown,
    /// The first overload, in registration order, that accepts the
    /// call.
    Found(&'r Implementation),
    /// Overloads exist but each of them refused the call; one reason
    /// per overload, in registration order.
    Rejected(Vec<String>),
}

impl Registry {
    pub fn new() -> Self {
        Registry::default()
    }

    pub fn add(&mut self, name: impl Into<String>, implementation: Implementation) {
        self.overloads
            .entry(name.into())
            .or_default()
            .push(implementation);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.overloads.contains_key(name)
    }

    /// Signatures registered under `name`, in registration order.
    pub fn signatures(&self, name: &str) -> Vec<&Signature> {
        self.overloads
            .get(name)
            .map(|overloads| overloads.iter().map(Implementation::signature).collect())
            .unwrap_or_default()
    }

    /// Number of distinct names registered.
    pub fn len(&self) -> usize {
        self.overloads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.overloads.is_empty()
    }

    /// Finds the overload of `name` that accepts `arguments` and
    /// returns `output`.
    ///
    /// Only signatures are inspected; no implementation is run while
    /// resolving.
    pub fn resolve(&self, name: &str, arguments: &Arguments, output: TypeInfo) -> Resolution<'_> {
        let overloads = match self.overloads.get(name) {
            Some(overloads) => overloads,
            None => return Resolution::Unknown,
        };

        let mut rejections = Vec::with_capacity(overloads.len());

        for implementation in overloads {
            match implementation.signature().check(arguments, output) {
                Ok(()) => return Resolution::Found(implementation),
                Err(mismatch) => {
                    tracing::trace!(
                        member = name,
                        candidate = %implementation.signature(),
                        %mismatch,
                        "skipping overload"
                    );
                    rejections.push(format!("  {}: {}", implementation.signature(), mismatch));
                }
            }
        }

        Resolution::Rejected(rejections)
    }
}
