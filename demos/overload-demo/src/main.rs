use std::{
    any::Any,
    sync::{
        atomic::{AtomicU32, Ordering},
        Arc,
    },
};

use complex_system::{members, ComplexSystem, Service};
use dynamock::{args, Accessor, Arguments, CallSite, Dispatch, DynamicMock};
use tracing_subscriber::EnvFilter;

/// A `Service` whose overloads all forward to one member name and are
/// told apart by the [`DynamicMock`].
#[derive(Debug)]
struct ServiceMock {
    mock: DynamicMock,
}

impl ServiceMock {
    fn forward<O: Any>(&self, name: &'static str, arguments: Arguments) -> O {
        self.mock.dispatch(&CallSite::method(name), arguments)
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
        self.mock.dispatch(
            &CallSite::property(members::IS_SOMETHING_TRUE, Accessor::Get),
            args![],
        )
    }

    fn set_is_something_true(&mut self, value: bool) {
        self.mock.dispatch(
            &CallSite::property(members::IS_SOMETHING_TRUE, Accessor::Set),
            args![value],
        )
    }

    fn get_value_with_str(&self, param: &str) -> i32 {
        self.forward(members::GET_VALUE_WITH_PARAMS, args![param.to_string()])
    }

    fn get_value_with_str_int(&self, param1: &str, param2: i32) -> String {
        self.forward(
            members::GET_VALUE_WITH_PARAMS,
            args![param1.to_string(), param2],
        )
    }

    fn get_value_with_strs(&self, param1: &str, param2: &str) -> String {
        self.forward(
            members::GET_VALUE_WITH_PARAMS,
            args![param1.to_string(), param2.to_string()],
        )
    }

    fn get_value_with_array(&self, values: Arguments) -> i32 {
        self.forward(members::GET_VALUE_WITH_PARAMS, args![values])
    }

    fn get_value_with_rest(&self, param: i32, rest: Arguments) -> f32 {
        self.forward(members::GET_VALUE_WITH_PARAMS, args![param, rest])
    }

    fn get_value_with_generic<T: Any + Send>(&self, param: T) -> T {
        self.mock.dispatch(
            &CallSite::generic(members::GET_VALUE_WITH_PARAMS),
            args![param],
        )
    }

    fn get_value_with_generic_int<T: Any + Send>(&self, param: i32) -> T {
        self.mock.dispatch(
            &CallSite::generic(members::GET_VALUE_WITH_PARAMS),
            args![param],
        )
    }

    fn item(&self, index: i32) -> String {
        self.mock
            .dispatch(&CallSite::indexer(Accessor::Get), args![index])
    }

    fn set_item(&mut self, index: i32, value: String) {
        self.mock
            .dispatch(&CallSite::indexer(Accessor::Set), args![index, value])
    }
}

/// Builds the mock, counting `call_me` invocations into `calls`.
fn service_mock(calls: Arc<AtomicU32>) -> ServiceMock {
    let mut mock = DynamicMock::new();

    mock.add_method(members::CALL_ME, move || {
        tracing::info!("call_me!");
        calls.fetch_add(1, Ordering::SeqCst);
    })
    .add_method(members::GET_VALUE, || {
        tracing::info!("get_value!");
        "hi!".to_string()
    })
    .add_property(members::IS_SOMETHING_TRUE, Accessor::Get, || true)
    .add_property(
        members::IS_SOMETHING_TRUE,
        Accessor::Set,
        |value: bool| tracing::info!(value, "is_something_true set"),
    );

    mock.add_method(
        members::GET_VALUE_WITH_PARAMS,
        |param1: String, param2: i32| {
            tracing::info!(%param1, param2, "get_value_with_params");
            "works!".to_string()
        },
    )
    .add_method(
        members::GET_VALUE_WITH_PARAMS,
        |param1: String, param2: String| {
            tracing::info!(%param1, %param2, "get_value_with_params");
            "works too!".to_string()
        },
    )
    .add_method(members::GET_VALUE_WITH_PARAMS, |param1: String| {
        tracing::info!(%param1, "get_value_with_params");
        35
    })
    .add_method(members::GET_VALUE_WITH_PARAMS, |values: Arguments| {
        tracing::info!(%values, "get_value_with_params");
        11111111
    })
    .add_method(
        members::GET_VALUE_WITH_PARAMS,
        |param1: i32, rest: Arguments| {
            tracing::info!(param1, %rest, "get_value_with_params");
            1.5_f32
        },
    );

    mock.add_generic_method(members::GET_VALUE_WITH_PARAMS, |param1: String| {
        tracing::info!(%param1, "get_value_with_params<T>");
        "works also!".to_string()
    })
    .add_generic_method(members::GET_VALUE_WITH_PARAMS, |param1: i32| {
        tracing::info!(param1, "get_value_with_params<T>");
        0.25_f64
    });

    mock.add_indexer(Accessor::Get, |index: i32| {
        tracing::info!(index, "indexer get");
        index.to_string()
    })
    .add_indexer(Accessor::Set, |index: i32, value: String| {
        tracing::info!(index, %value, "indexer set");
    });

    ServiceMock { mock }
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();

    let calls = Arc::new(AtomicU32::new(0));
    let mut service = service_mock(Arc::clone(&calls));

    ComplexSystem::new(&mut service).do_complex_operation();

    tracing::info!(
        "{} was called {} times",
        members::CALL_ME,
        calls.load(Ordering::SeqCst)
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_overload_is_reached() {
        let calls = Arc::new(AtomicU32::new(0));
        let mut service = service_mock(Arc::clone(&calls));

        let report = ComplexSystem::new(&mut service).do_complex_operation();

        assert_eq!(report.value, "hi!");
        assert_eq!(report.array, 11111111);
        assert_eq!(report.single, 35);
        assert_eq!(report.rest, 1.5);
        assert_eq!(report.two_strings, "works too!");
        assert_eq!(report.string_and_int, "works!");
        assert_eq!(report.generic, "works also!");
        assert_eq!(report.generic_from_int, 0.25);
        assert!(report.was_true);
        assert!(report.is_true);
        assert_eq!(report.item, "32");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn overloads_share_one_member() {
        let service = service_mock(Arc::new(AtomicU32::new(0)));

        assert_eq!(
            service
                .mock
                .overloads(dynamock::Kind::Plain, members::GET_VALUE_WITH_PARAMS)
                .len(),
            5
        );
        assert_eq!(
            service
                .mock
                .overloads(dynamock::Kind::Generic, members::GET_VALUE_WITH_PARAMS)
                .len(),
            2
        );
    }

    #[test]
    #[should_panic(expected = "none of the 2 generic implementation(s)")]
    fn unregistered_instantiation_panics() {
        let service = service_mock(Arc::new(AtomicU32::new(0)));
        let _: u64 = service.get_value_with_generic_int(1);
    }
}
