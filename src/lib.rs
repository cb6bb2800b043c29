//! A library to build mocks of traits at runtime.
//!
//! `dynamock` does not generate code. A mock is a plain struct that
//! implements the trait by forwarding every member, together with its
//! arguments, to a dispatcher. Tests register closures with the
//! dispatcher ahead of time and the dispatcher picks the closure that
//! answers each call.
//!
//! Two dispatchers are provided:
//!
//! * [`DynamicMock`] resolves overloads. Many closures may share a
//!   member name and the one whose signature fits the call is run.
//!   Generic members are registered separately from plain ones.
//! * [`PropertyBag`] holds a single closure per name, replaces it on
//!   re-registration and counts how many times each name was called.
//!
//! Both implement [`Dispatch`], which is what the mock's members
//! forward to.
//!
//! # Example
//!
//! ```
//! use dynamock::{args, Accessor, CallSite, Dispatch, DynamicMock};
//!
//! pub trait Store {
//!     fn len(&self) -> usize;
//!     fn get(&self, key: &str) -> Option<u32>;
//!     fn get_or(&self, key: &str, default: u32) -> u32;
//! }
//!
//! struct StoreMock(DynamicMock);
//!
//! impl Store for StoreMock {
//!     fn len(&self) -> usize {
//!         self.0.dispatch(&CallSite::property("len", Accessor::Get), args![])
//!     }
//!
//!     fn get(&self, key: &str) -> Option<u32> {
//!         self.0.dispatch(&CallSite::method("get"), args![key.to_string()])
//!     }
//!
//!     // shares its name with `get`; the argument shape tells them apart
//!     fn get_or(&self, key: &str, default: u32) -> u32 {
//!         self.0.dispatch(&CallSite::method("get"), args![key.to_string(), default])
//!     }
//! }
//!
//! let mut mock = DynamicMock::new();
//! mock.add_property("len", Accessor::Get, || 1_usize)
//!     .add_method("get", |key: String| (key == "a").then_some(1_u32))
//!     .add_method("get", |_: String, default: u32| default);
//!
//! let store = StoreMock(mock);
//! assert_eq!(store.len(), 1);
//! assert_eq!(store.get("a"), Some(1));
//! assert_eq!(store.get_or("b", 7), 7);
//! ```
//!
//! # Failures
//!
//! [`Dispatch::invoke`] reports a call that cannot be dispatched as an
//! [`Error`]; [`Dispatch::dispatch`], which mocked members use, panics
//! with the same message. A panic inside a registered closure unwinds
//! through the mock unchanged.

mod arguments;
mod call_site;
mod dispatch;
mod dynamic_mock;
mod error;
mod implementation;
mod property_bag;
mod registry;
mod signature;

pub use arguments::{Arg, Arguments};
pub use call_site::{Accessor, CallSite, Kind, INDEXER};
pub use dispatch::Dispatch;
pub use dynamic_mock::DynamicMock;
pub use error::Error;
pub use implementation::{Implementation, IntoImplementation};
pub use property_bag::PropertyBag;
pub use registry::{Registry, Resolution};
pub use signature::{Mismatch, Signature, TypeInfo};
