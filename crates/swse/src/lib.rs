pub mod choice;
pub mod interpreter;
pub mod parser;
pub mod reduce;
pub mod rules;
pub mod sheet;
pub mod types;

pub use interpreter::{
    EvalContext, EvalOptions, EvalWarning, LoadError, NoVariables, VariableContext, evaluate,
    evaluate_str,
};
pub use reduce::{AttributeSource, PriorityOrder, ReduceOptions, ReduceSpec, Strategy, reduce};
pub use sheet::AttributeSheet;
pub use types::{ApplicationMode, SourcedValue, Value};

/// Creates a `HashMap<String, Value>` of variables from name-value pairs.
///
/// Values are converted via `Into<Value>`, so integers, floats and strings
/// can be passed directly. Names are usually written with their `@`.
///
/// # Example
///
/// ```
/// use swse::{Value, variables};
///
/// let vars = variables! { "@STRMOD" => 3, "@WEAPON" => "1d8" };
/// assert_eq!(vars.len(), 2);
/// assert_eq!(vars["@STRMOD"].as_number(), Some(3.0));
/// assert_eq!(vars["@WEAPON"], Value::from("1d8"));
/// ```
#[macro_export]
macro_rules! variables {
    {} => {
        ::std::collections::HashMap::<String, $crate::Value>::new()
    };
    { $($key:expr => $value:expr),+ $(,)? } => {
        {
            let mut map = ::std::collections::HashMap::<String, $crate::Value>::new();
            $(
                map.insert($key.to_string(), ::std::convert::Into::<$crate::Value>::into($value));
            )+
            map
        }
    };
}
