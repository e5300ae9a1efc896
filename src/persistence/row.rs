use std::fmt::Display;

/// A validated value, as it is stored inside a [`Row`].
///
/// Every variant is the outcome of coercing a [`RawValue`] through a column:
/// `string`, `email` and `enum` columns all store [`Value::Text`].
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Null,
    Integer(i64),
    Real(f64),
    Char(char),
    Text(String),
}

/// An unvalidated input value, e.g. typed in by a user or read from a document.
///
/// Raw values are never stored. They go through
/// [`Column::validate`](super::Column::validate) first.
#[derive(Clone, Debug, PartialEq)]
pub enum RawValue {
    Null,
    Bool(bool),
    Integer(i64),
    Real(f64),
    Text(String),
}

/// One record of a [`super::Table`].
///
/// The values sit in the same order as the columns of the owning table, so
/// a row always has exactly one slot per column.
#[derive(Clone, Debug, PartialEq)]
pub struct Row(pub(crate) Vec<Value>);

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl RawValue {
    pub fn is_null(&self) -> bool {
        matches!(self, RawValue::Null)
    }

    pub fn string_form(&self) -> String {
        //! The text a column of a textual type stores for this value.

        match self {
            RawValue::Null => String::new(),
            RawValue::Bool(true) => "True".to_string(),
            RawValue::Bool(false) => "False".to_string(),
            RawValue::Integer(number) => number.to_string(),
            RawValue::Real(number) => real_form(*number),
            RawValue::Text(text) => text.clone(),
        }
    }
}

fn real_form(number: f64) -> String {
    //! Shortest text that reads back as `number`, e.g. `4.0`, `0.0001`,
    //! `1e+20` or `1.5e-05`.
    //!
    //! Plain notation is used for exponents from -4 up to 15, scientific
    //! notation with a signed two-digit exponent outside of that.

    if number.is_nan() {
        return "nan".to_string();
    }
    if number.is_infinite() {
        return if number > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let scientific = format!("{:e}", number);
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some((mantissa, exponent)) => (mantissa, exponent.parse::<i32>().unwrap_or(0)),
        None => (scientific.as_str(), 0),
    };

    if number == 0.0 || (-4..16).contains(&exponent) {
        let plain = number.to_string();
        if plain.contains('.') {
            plain
        } else {
            format!("{}.0", plain)
        }
    } else {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", mantissa, sign, exponent.abs())
    }
}

impl Row {
    pub fn values(&self) -> &[Value] {
        &self.0
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.0.get(index)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Null => write!(f, "NIL"),
            Value::Integer(number) => write!(f, "{}", number),
            Value::Real(number) => write!(f, "{}", real_form(*number)),
            Value::Char(character) => write!(f, "{}", character),
            Value::Text(text) => write!(f, "{}", text),
        }
    }
}

impl Display for RawValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RawValue::Null => write!(f, "NIL"),
            other => write!(f, "{}", other.string_form()),
        }
    }
}

impl Display for Row {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let row: Vec<String> = self.0.iter().map(|value| value.to_string()).collect();
        write!(f, "{}", row.join(" | "))
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        RawValue::Text(value)
    }
}

impl From<char> for RawValue {
    fn from(value: char) -> Self {
        RawValue::Text(value.to_string())
    }
}

impl From<bool> for RawValue {
    fn from(value: bool) -> Self {
        RawValue::Bool(value)
    }
}

impl From<i32> for RawValue {
    fn from(value: i32) -> Self {
        RawValue::Integer(value.into())
    }
}

impl From<i64> for RawValue {
    fn from(value: i64) -> Self {
        RawValue::Integer(value)
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        RawValue::Real(value)
    }
}

impl<T: Into<RawValue>> From<Option<T>> for RawValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(RawValue::Null, Into::into)
    }
}

impl From<&RawValue> for RawValue {
    fn from(value: &RawValue) -> Self {
        value.clone()
    }
}

impl From<&Value> for RawValue {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => RawValue::Null,
            Value::Integer(number) => RawValue::Integer(*number),
            Value::Real(number) => RawValue::Real(*number),
            Value::Char(character) => RawValue::Text(character.to_string()),
            Value::Text(text) => RawValue::Text(text.clone()),
        }
    }
}

impl From<Value> for RawValue {
    fn from(value: Value) -> Self {
        RawValue::from(&value)
    }
}

impl From<&serde_json::Value> for RawValue {
    fn from(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => RawValue::Null,
            serde_json::Value::Bool(flag) => RawValue::Bool(*flag),
            serde_json::Value::Number(number) => {
                if let Some(integer) = number.as_i64() {
                    RawValue::Integer(integer)
                } else if let Some(real) = number.as_f64() {
                    RawValue::Real(real)
                } else {
                    RawValue::Text(number.to_string())
                }
            }
            serde_json::Value::String(text) => RawValue::Text(text.clone()),
            composite => RawValue::Text(composite.to_string()),
        }
    }
}

impl From<serde_json::Value> for RawValue {
    fn from(value: serde_json::Value) -> Self {
        RawValue::from(&value)
    }
}

impl From<&Value> for serde_json::Value {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => serde_json::Value::Null,
            Value::Integer(number) => serde_json::Value::from(*number),
            // Stored reals are always finite, so this never falls back to null.
            Value::Real(number) => serde_json::Number::from_f64(*number)
                .map_or(serde_json::Value::Null, serde_json::Value::Number),
            Value::Char(character) => serde_json::Value::String(character.to_string()),
            Value::Text(text) => serde_json::Value::String(text.clone()),
        }
    }
}
