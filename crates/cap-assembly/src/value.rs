//! Typed property values carried by a sheet.
//!
//! # Text encoding
//!
//! | Type tag  | Example value      | Variant                 |
//! |-----------|--------------------|-------------------------|
//! | `int`     | `-3`               | `Int(i64)`              |
//! | `float`   | `2.5`              | `Float(f32)`            |
//! | `bool`    | `true` / `0`       | `Bool(bool)`            |
//! | `string`  | `hello`            | `Text(String)`          |
//! | `vector3` | `1;0;-2`           | `Vector3([f32; 3])`     |
//! | `color`   | `1;0.5;0` or `…;a` | `Color([f32; 4])`       |
//! | `enum`    | `2`                | `Enum(i64)`             |
//!
//! Vector components are `;`-separated so they survive inside a CSV cell.
//! A three-component color gets alpha `1.0`.

use std::fmt;

use crate::{AssemblyError, AssemblyResult, FieldError};

#[derive(Clone, Debug, PartialEq)]
pub enum PropertyValue {
    Int(i64),
    Float(f32),
    Bool(bool),
    Text(String),
    Vector3([f32; 3]),
    /// RGBA, each channel nominally in `0.0..=1.0`.
    Color([f32; 4]),
    /// Discriminant of a field-specific enumeration.
    Enum(i64),
}

impl PropertyValue {
    /// Parse `raw` according to the sheet type tag `kind`.
    pub fn parse(kind: &str, raw: &str) -> AssemblyResult<Self> {
        let raw = raw.trim();
        let bad = |what: &str| {
            AssemblyError::Parse(format!("invalid {what} value {raw:?}"))
        };
        match kind.trim().to_ascii_lowercase().as_str() {
            "int" => raw.parse().map(Self::Int).map_err(|_| bad("int")),
            "float" => raw.parse().map(Self::Float).map_err(|_| bad("float")),
            "bool" => match raw.to_ascii_lowercase().as_str() {
                "true" | "1" | "yes" => Ok(Self::Bool(true)),
                "false" | "0" | "no" => Ok(Self::Bool(false)),
                _ => Err(bad("bool")),
            },
            "string" => Ok(Self::Text(raw.to_string())),
            "vector3" => match parse_floats(raw).as_deref() {
                Some([x, y, z]) => Ok(Self::Vector3([*x, *y, *z])),
                _ => Err(bad("vector3")),
            },
            "color" => match parse_floats(raw).as_deref() {
                Some([r, g, b]) => Ok(Self::Color([*r, *g, *b, 1.0])),
                Some([r, g, b, a]) => Ok(Self::Color([*r, *g, *b, *a])),
                _ => Err(bad("color")),
            },
            "enum" => raw.parse().map(Self::Enum).map_err(|_| bad("enum")),
            other => Err(AssemblyError::Parse(format!(
                "unknown property type {other:?}: expected int, float, bool, string, vector3, color or enum"
            ))),
        }
    }

    /// The sheet type tag for this value.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Bool(_) => "bool",
            Self::Text(_) => "string",
            Self::Vector3(_) => "vector3",
            Self::Color(_) => "color",
            Self::Enum(_) => "enum",
        }
    }

    // ── Typed accessors for `Configurable` impls ──────────────────────────

    pub fn as_int(&self) -> Result<i64, FieldError> {
        match *self {
            Self::Int(v) => Ok(v),
            _ => Err(self.mismatch("int")),
        }
    }

    /// Accepts `int` values too; sheets often write `3` for `3.0`.
    pub fn as_float(&self) -> Result<f32, FieldError> {
        match *self {
            Self::Float(v) => Ok(v),
            Self::Int(v) => Ok(v as f32),
            _ => Err(self.mismatch("float")),
        }
    }

    pub fn as_bool(&self) -> Result<bool, FieldError> {
        match *self {
            Self::Bool(v) => Ok(v),
            _ => Err(self.mismatch("bool")),
        }
    }

    pub fn as_str(&self) -> Result<&str, FieldError> {
        match self {
            Self::Text(v) => Ok(v),
            _ => Err(self.mismatch("string")),
        }
    }

    pub fn as_vector3(&self) -> Result<[f32; 3], FieldError> {
        match *self {
            Self::Vector3(v) => Ok(v),
            _ => Err(self.mismatch("vector3")),
        }
    }

    pub fn as_color(&self) -> Result<[f32; 4], FieldError> {
        match *self {
            Self::Color(v) => Ok(v),
            _ => Err(self.mismatch("color")),
        }
    }

    /// Enum discriminant.  Plain `int` values are accepted as well.
    pub fn as_enum(&self) -> Result<i64, FieldError> {
        match *self {
            Self::Enum(v) | Self::Int(v) => Ok(v),
            _ => Err(self.mismatch("enum")),
        }
    }

    fn mismatch(&self, expected: &'static str) -> FieldError {
        FieldError::TypeMismatch { expected, got: self.kind() }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) | Self::Enum(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Text(v) => write!(f, "{v:?}"),
            Self::Vector3([x, y, z]) => write!(f, "({x}, {y}, {z})"),
            Self::Color([r, g, b, a]) => write!(f, "rgba({r}, {g}, {b}, {a})"),
        }
    }
}

fn parse_floats(raw: &str) -> Option<Vec<f32>> {
    raw.split(';').map(|p| p.trim().parse::<f32>().ok()).collect()
}
