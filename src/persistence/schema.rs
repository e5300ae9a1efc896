use std::fmt::Display;

use once_cell::sync::Lazy;
use regex::Regex;

use super::error::DatabaseError;
use super::row::{RawValue, Value};

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$")
        .expect("email pattern is a valid regex")
});

/// The types a [`Column`] can hold.
///
/// An enum column carries its own ordered list of allowed values, so the
/// type tag and the value list can never go out of sync.
#[derive(Clone, Debug, PartialEq)]
pub enum DataType {
    Integer,
    Real,
    Char,
    String,
    Email,
    Enum(Vec<String>),
}

impl DataType {
    pub const TAGS: [&'static str; 6] = ["integer", "real", "char", "string", "email", "enum"];

    pub fn from_tag(tag: &str, enum_values: Option<Vec<String>>) -> Result<DataType, String> {
        //! Build a datatype from its lowercase tag and the optional list of
        //! enum values.
        //!
        //! The list must be given, and non-empty, for `enum` and only for `enum`.

        let enum_values = enum_values.filter(|values| !values.is_empty());

        match (tag, enum_values) {
            ("enum", Some(values)) => Ok(DataType::Enum(values)),
            ("enum", None) => Err("enum column must have predefined values".to_string()),
            (_, Some(_)) => Err(format!("type {} does not take enum values", tag)),
            ("integer", None) => Ok(DataType::Integer),
            ("real", None) => Ok(DataType::Real),
            ("char", None) => Ok(DataType::Char),
            ("string", None) => Ok(DataType::String),
            ("email", None) => Ok(DataType::Email),
            (other, None) => Err(format!("type {} is not supported", other)),
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            DataType::Integer => "integer",
            DataType::Real => "real",
            DataType::Char => "char",
            DataType::String => "string",
            DataType::Email => "email",
            DataType::Enum(_) => "enum",
        }
    }

    pub fn enum_values(&self) -> Option<&[String]> {
        match self {
            DataType::Enum(values) => Some(values),
            _ => None,
        }
    }
}

impl Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataType::Enum(values) => write!(f, "enum[{}]", values.join(",")),
            other => write!(f, "{}", other.tag()),
        }
    }
}

/// A named, typed field of a [`super::Table`].
///
/// Columns are plain values. Changing the type of a column of a table goes
/// through [`super::Table::alter_column`], which swaps in a new column.
#[derive(Clone, Debug, PartialEq)]
pub struct Column {
    pub(crate) name: String,
    pub(crate) datatype: DataType,
}

impl Column {
    pub fn new(name: impl Into<String>, datatype: DataType) -> Column {
        Column {
            name: name.into(),
            datatype,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn datatype(&self) -> &DataType {
        &self.datatype
    }

    pub(crate) fn check_definition(&self) -> Result<(), DatabaseError> {
        if let DataType::Enum(values) = &self.datatype {
            if values.is_empty() {
                return Err(DatabaseError::InvalidDefinition {
                    column: self.name.clone(),
                    reason: "enum column must have predefined values".to_string(),
                });
            }
        }
        Ok(())
    }

    pub fn validate(&self, raw: &RawValue) -> Result<Value, DatabaseError> {
        //! Coerce a raw value into the value this column stores.
        //!
        //! Null passes through untouched for every type. Anything else is
        //! either converted or rejected with [`DatabaseError::Validation`].

        if raw.is_null() {
            return Ok(Value::Null);
        }

        match &self.datatype {
            DataType::Integer => match raw {
                RawValue::Bool(_) => Err(self.reject(raw, "boolean is not allowed for integer")),
                RawValue::Integer(number) => Ok(Value::Integer(*number)),
                RawValue::Real(number) => {
                    // 2^63 is exactly representable; anything at or above it overflows.
                    if number.is_finite()
                        && number.fract() == 0.0
                        && *number >= i64::MIN as f64
                        && *number < i64::MAX as f64
                    {
                        Ok(Value::Integer(*number as i64))
                    } else {
                        Err(self.reject(raw, "not a valid integer"))
                    }
                }
                _ => raw
                    .string_form()
                    .trim()
                    .parse::<i64>()
                    .map(Value::Integer)
                    .map_err(|_| self.reject(raw, "not a valid integer")),
            },
            DataType::Real => {
                let number = match raw {
                    RawValue::Bool(flag) => f64::from(u8::from(*flag)),
                    RawValue::Integer(number) => *number as f64,
                    RawValue::Real(number) => *number,
                    _ => raw
                        .string_form()
                        .trim()
                        .parse::<f64>()
                        .map_err(|_| self.reject(raw, "not a valid real"))?,
                };

                if number.is_finite() {
                    Ok(Value::Real(number))
                } else {
                    Err(self.reject(raw, "real must be a finite number"))
                }
            }
            DataType::Char => {
                let text = raw.string_form();
                let mut characters = text.chars();
                match (characters.next(), characters.next()) {
                    (Some(character), None) => Ok(Value::Char(character)),
                    _ => Err(self.reject(raw, "not a single character")),
                }
            }
            DataType::String => Ok(Value::Text(raw.string_form())),
            DataType::Email => {
                let text = raw.string_form();
                if EMAIL_RE.is_match(&text) {
                    Ok(Value::Text(text))
                } else {
                    Err(self.reject(raw, "not a valid email"))
                }
            }
            DataType::Enum(values) => {
                if values.is_empty() {
                    return Err(self.reject(raw, "enum column must have predefined values"));
                }

                let text = raw.string_form();
                if values.contains(&text) {
                    Ok(Value::Text(text))
                } else {
                    Err(self.reject(raw, &format!("not one of [{}]", values.join(", "))))
                }
            }
        }
    }

    fn reject(&self, raw: &RawValue, reason: &str) -> DatabaseError {
        DatabaseError::Validation {
            column: self.name.clone(),
            value: raw.to_string(),
            reason: reason.to_string(),
        }
    }
}

impl Display for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.datatype)
    }
}
