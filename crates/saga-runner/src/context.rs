use indexmap::IndexMap;
use serde_json::Value;

/// Key-value mapping threaded from one step's action to the next.
///
/// The empty mapping is both the initial context and a valid terminal
/// context. Each action's returned mapping replaces the context wholesale;
/// nothing is merged.
pub type SagaContext = IndexMap<String, Value>;

/// Interpretation of the value returned by an action.
pub(crate) enum ActionOutput {
    /// The action produced a mapping or nothing; this is the next context.
    Context(SagaContext),
    /// The action produced a value that is neither a mapping nor null.
    NotAMapping(&'static str),
}

/// Interpret an action's return value.
///
/// A JSON object becomes the next context. Null stands for "no return value"
/// and continues with an empty context. Anything else is a contract violation
/// on the action's part.
pub(crate) fn interpret_output(value: Value) -> ActionOutput {
    match value {
        Value::Object(map) => ActionOutput::Context(map.into_iter().collect()),
        Value::Null => ActionOutput::Context(SagaContext::new()),
        other => ActionOutput::NotAMapping(json_kind(&other)),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "a mapping",
    }
}
