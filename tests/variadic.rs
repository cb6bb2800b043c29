use dynamock::{args, Arguments, CallSite, Dispatch, DynamicMock};

const FORMAT: &str = "format";

// `format_all` takes an arbitrary number of values, `format_pair` a
// fixed two. Both forward under the same member name.
pub trait Formatter {
    fn format_all(&self, values: Arguments) -> i32;
    fn format_pair(&self, name: &str, id: i32) -> String;
    fn format_rest(&self, first: i32, rest: Arguments) -> f32;
}

struct FormatterMock(DynamicMock);

impl Formatter for FormatterMock {
    fn format_all(&self, values: Arguments) -> i32 {
        // the array travels as one argument, never spread
        self.0.dispatch(&CallSite::method(FORMAT), args![values])
    }

    fn format_pair(&self, name: &str, id: i32) -> String {
        self.0
            .dispatch(&CallSite::method(FORMAT), args![name.to_string(), id])
    }

    fn format_rest(&self, first: i32, rest: Arguments) -> f32 {
        self.0.dispatch(&CallSite::method(FORMAT), args![first, rest])
    }
}

fn register(mock: &mut DynamicMock) {
    mock.add_method(FORMAT, |name: String, id: i32| format!("{name}:{id}"))
        .add_method(FORMAT, |values: Arguments| values.len() as i32)
        .add_method(FORMAT, |first: i32, rest: Arguments| {
            first as f32 + rest.len() as f32 / 10.0
        });
}

#[test]
fn array_reaches_the_array_overload() {
    let mut mock = DynamicMock::new();
    register(&mut mock);
    let mock = FormatterMock(mock);

    // shaped exactly like the (String, i32) overload once spread
    let values = args!["ObjectArrayItem1".to_string(), 5555];
    assert_eq!(mock.format_all(values), 2);
}

#[test]
fn spreading_the_array_would_cross_match() {
    let mut mock = DynamicMock::new();
    register(&mut mock);

    let spread = args!["ObjectArrayItem1".to_string(), 5555];
    let output: String = mock.dispatch(&CallSite::method(FORMAT), spread);
    assert_eq!(output, "ObjectArrayItem1:5555");
}

#[test]
fn trailing_values_after_fixed_parameters() {
    let mut mock = DynamicMock::new();
    register(&mut mock);
    let mock = FormatterMock(mock);

    let rest = args!["Params Overload", "params", "keyword", "is", "fun"];
    assert_eq!(mock.format_rest(223344, rest), 223344.5);
}

#[test]
fn empty_array_is_still_one_argument() {
    let mut mock = DynamicMock::new();
    register(&mut mock);
    let mock = FormatterMock(mock);

    assert_eq!(mock.format_all(args![]), 0);
}

#[test]
fn implementations_can_read_the_values() {
    let mut mock = DynamicMock::new();
    mock.add_method(FORMAT, |values: Arguments| {
        values
            .iter()
            .filter_map(|value| value.downcast_ref::<&str>())
            .map(|s| s.len() as i32)
            .sum::<i32>()
    });
    let mock = FormatterMock(mock);

    assert_eq!(mock.format_all(args!["ab", 3, "cde"]), 5);
}
