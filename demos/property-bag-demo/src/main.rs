use std::{
    any::Any,
    sync::{Arc, Mutex},
};

use complex_system::{members, ComplexSystem, Service};
use dynamock::{args, Accessor, Arguments, CallSite, Dispatch, PropertyBag};
use tracing_subscriber::EnvFilter;

/// A `Service` backed by a [`PropertyBag`]: one implementation per
/// member name, so every Rust method forwards under its own name.
struct ServiceMock {
    bag: PropertyBag,
}

impl ServiceMock {
    fn forward<O: Any>(&self, name: &'static str, arguments: Arguments) -> O {
        self.bag.dispatch(&CallSite::method(name), arguments)
    }
}

impl Service for ServiceMock {
    fn call_me(&self) {
        self.forward(members::CALL_ME, args![])
    }

    fn get_value(&self) -> String {
        self.forward(members::GET_VALUE, args![])
    }

    fn is_something_true(&self) -> bool {
        self.bag.dispatch(
            &CallSite::property(members::IS_SOMETHING_TRUE, Accessor::Get),
            args![],
        )
    }

    fn set_is_something_true(&mut self, value: bool) {
        self.bag.dispatch(
            &CallSite::property(members::IS_SOMETHING_TRUE, Accessor::Set),
            args![value],
        )
    }

    fn get_value_with_str(&self, param: &str) -> i32 {
        self.forward("get_value_with_str", args![param.to_string()])
    }

    fn get_value_with_str_int(&self, param1: &str, param2: i32) -> String {
        self.forward("get_value_with_str_int", args![param1.to_string(), param2])
    }

    fn get_value_with_strs(&self, param1: &str, param2: &str) -> String {
        self.forward(
            "get_value_with_strs",
            args![param1.to_string(), param2.to_string()],
        )
    }

    fn get_value_with_array(&self, values: Arguments) -> i32 {
        self.forward("get_value_with_array", args![values])
    }

    fn get_value_with_rest(&self, param: i32, rest: Arguments) -> f32 {
        self.forward("get_value_with_rest", args![param, rest])
    }

    fn get_value_with_generic<T: Any + Send>(&self, param: T) -> T {
        self.bag
            .dispatch(&CallSite::generic("get_value_with_generic"), args![param])
    }

    fn get_value_with_generic_int<T: Any + Send>(&self, param: i32) -> T {
        self.bag.dispatch(
            &CallSite::generic("get_value_with_generic_int"),
            args![param],
        )
    }

    fn item(&self, index: i32) -> String {
        self.bag
            .dispatch(&CallSite::indexer(Accessor::Get), args![index])
    }

    fn set_item(&mut self, index: i32, value: String) {
        self.bag
            .dispatch(&CallSite::indexer(Accessor::Set), args![index, value])
    }
}

/// Builds the mock. The property is backed by `flag`, so setting it is
/// visible to the next read.
fn service_mock(flag: Arc<Mutex<bool>>) -> ServiceMock {
    let mut bag = PropertyBag::new();

    let getter = Arc::clone(&flag);
    let setter = flag;

    bag.set(members::CALL_ME, || tracing::info!("call_me!"))
        .set(members::GET_VALUE, || "hi!".to_string())
        .set_property(members::IS_SOMETHING_TRUE, Accessor::Get, move || {
            getter.lock().map(|flag| *flag).unwrap_or_default()
        })
        .set_property(
            members::IS_SOMETHING_TRUE,
            Accessor::Set,
            move |value: bool| {
                tracing::info!(value, "is_something_true set");
                if let Ok(mut flag) = setter.lock() {
                    *flag = value;
                }
            },
        );

    bag.set("get_value_with_str", |param: String| param.len() as i32)
        .set("get_value_with_str_int", |param1: String, param2: i32| {
            format!("{param1} {param2}")
        })
        .set("get_value_with_strs", |param1: String, param2: String| {
            format!("{param1} {param2}")
        })
        .set("get_value_with_array", |values: Arguments| values.len() as i32)
        .set("get_value_with_rest", |param: i32, rest: Arguments| {
            param as f32 + rest.len() as f32
        })
        .set("get_value_with_generic", |param: String| param.to_uppercase())
        .set("get_value_with_generic_int", |param: i32| param as f64 / 2.0);

    bag.set_indexer(Accessor::Get, |index: i32| format!("item {index}"))
        .set_indexer(Accessor::Set, |index: i32, value: String| {
            tracing::info!(index, %value, "indexer set");
        });

    ServiceMock { bag }
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();

    let mut service = service_mock(Arc::new(Mutex::new(false)));

    ComplexSystem::new(&mut service).do_complex_operation();

    tracing::info!(
        "{} was called {} times",
        members::CALL_ME,
        service.bag.call_count(members::CALL_ME)
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_the_whole_operation() {
        let mut service = service_mock(Arc::new(Mutex::new(false)));

        let report = ComplexSystem::new(&mut service).do_complex_operation();

        assert_eq!(report.value, "hi!");
        assert_eq!(report.array, 2);
        assert_eq!(report.single, 13);
        assert_eq!(report.rest, 223349.0);
        assert_eq!(report.two_strings, "Kostas Two String Overload - works :)");
        assert_eq!(report.string_and_int, "Hello 7654");
        assert_eq!(report.generic, "GENERIC ARGUMENT");
        assert_eq!(report.generic_from_int, 617283.5);
        assert_eq!(report.item, "item 32");

        let bag = &service.bag;
        assert_eq!(bag.call_count(members::CALL_ME), 2);
        assert_eq!(bag.call_count(members::GET_VALUE), 1);
        assert_eq!(bag.call_count("get_is_something_true"), 3);
        assert_eq!(bag.call_count("set_is_something_true"), 1);
        assert_eq!(bag.call_count("get_index"), 1);
        assert_eq!(bag.call_count("set_index"), 1);
        assert_eq!(bag.call_count("never_called"), 0);
    }

    #[test]
    fn property_state_lives_in_the_closures() {
        let mut service = service_mock(Arc::new(Mutex::new(false)));

        let report = ComplexSystem::new(&mut service).do_complex_operation();

        assert!(!report.was_true);
        assert!(report.is_true);
    }
}
