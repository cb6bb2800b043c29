use std::any::Any;

use dynamock::{args, Arguments};

/// Member names mocks forward under.
pub mod members {
    pub const CALL_ME: &str = "call_me";
    pub const GET_VALUE: &str = "get_value";
    pub const IS_SOMETHING_TRUE: &str = "is_something_true";

    /// Shared by every `get_value_with_*` method.
    pub const GET_VALUE_WITH_PARAMS: &str = "get_value_with_params";
}

/// The interface `ComplexSystem` depends on.
///
/// The `get_value_with_*` methods are overloads of a single logical
/// member; `get_value_with_rest` and `get_value_with_array` take a
/// variable number of trailing values as one [`Arguments`].
pub trait Service {
    fn call_me(&self);
    fn get_value(&self) -> String;

    fn is_something_true(&self) -> bool;
    fn set_is_something_true(&mut self, value: bool);

    fn get_value_with_str(&self, param: &str) -> i32;
    fn get_value_with_str_int(&self, param1: &str, param2: i32) -> String;
    fn get_value_with_strs(&self, param1: &str, param2: &str) -> String;
    fn get_value_with_array(&self, values: Arguments) -> i32;
    fn get_value_with_rest(&self, param: i32, rest: Arguments) -> f32;
    fn get_value_with_generic<T: Any + Send>(&self, param: T) -> T;
    fn get_value_with_generic_int<T: Any + Send>(&self, param: i32) -> T;

    fn item(&self, index: i32) -> String;
    fn set_item(&mut self, index: i32, value: String);
}

/// Everything `do_complex_operation` got back from the service.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub value: String,
    pub array: i32,
    pub single: i32,
    pub rest: f32,
    pub two_strings: String,
    pub string_and_int: String,
    pub generic: String,
    pub generic_from_int: f64,
    pub was_true: bool,
    pub is_true: bool,
    pub item: String,
}

/// A consumer that only knows the [`Service`] interface.
pub struct ComplexSystem<'s, S> {
    service: &'s mut S,
}

impl<'s, S: Service> ComplexSystem<'s, S> {
    pub fn new(service: &'s mut S) -> Self {
        ComplexSystem { service }
    }

    pub fn do_complex_operation(&mut self) -> Report {
        let service = &mut *self.service;

        service.call_me();

        let value = service.get_value();
        let array = service.get_value_with_array(args!["ObjectArrayItem1".to_string(), 5555]);
        let single = service.get_value_with_str("Single String");
        let rest = service.get_value_with_rest(
            223344,
            args!["Params Overload - works :)", "params", "keyword", "is", "fun"],
        );
        let two_strings = service.get_value_with_strs("Kostas", "Two String Overload - works :)");
        let string_and_int = service.get_value_with_str_int("Hello", 7654);
        let generic = service.get_value_with_generic("Generic Argument".to_string());
        let generic_from_int: f64 = service.get_value_with_generic_int(1234567);

        let was_true = service.is_something_true();
        service.set_is_something_true(!service.is_something_true());
        let is_true = service.is_something_true();

        service.call_me();

        let item = service.item(32);
        service.set_item(65, "passing value to indexer".to_string());

        let report = Report {
            value,
            array,
            single,
            rest,
            two_strings,
            string_and_int,
            generic,
            generic_from_int,
            was_true,
            is_true,
            item,
        };

        tracing::info!(?report, "done");
        report
    }
}
