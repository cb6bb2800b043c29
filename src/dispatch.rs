use std::any::Any;

use crate::{Arguments, CallSite, Error};

/// Something a mocked member can forward its call to.
///
/// A mock implements the mocked trait by turning each member into a
/// one-line forward:
///
/// ```
/// use dynamock::{args, CallSite, Dispatch, DynamicMock};
///
/// pub trait Greeter {
///     fn greet(&self, name: &str) -> String;
/// }
///
/// struct GreeterMock(DynamicMock);
///
/// impl Greeter for GreeterMock {
///     fn greet(&self, name: &str) -> String {
///         self.0.dispatch(&CallSite::method("greet"), args![name.to_string()])
///     }
/// }
///
/// let mut mock = DynamicMock::new();
/// mock.add_method("greet", |name: String| format!("hello {name}"));
///
/// let greeter = GreeterMock(mock);
/// assert_eq!(greeter.greet("dynamock"), "hello dynamock");
/// ```
pub trait Dispatch {
    /// Resolves `site` to a registered implementation, runs it with
    /// `arguments` and returns its output.
    fn invoke<O: Any>(&self, site: &CallSite, arguments: Arguments) -> Result<O, Error>;

    /// Like [`invoke`](Self::invoke) but panics when the call cannot
    /// be dispatched.
    ///
    /// Mocked members have the infallible signatures of the trait they
    /// mock, so this is what they forward to.
    #[track_caller]
    fn dispatch<O: Any>(&self, site: &CallSite, arguments: Arguments) -> O {
        match self.invoke(site, arguments) {
            Ok(output) => output,
            Err(error) => panic!("dynamock: {}", error),
        }
    }
}
