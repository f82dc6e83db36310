use std::fmt;

/// Runtime value produced by the evaluator.
#[derive(Debug, Clone, PartialEq)]
pub enum Object {
    Integer(i64),
    Boolean(bool),
    Null,
    Float(f64),
    String(String),
    Error(String),
}

pub const TRUE: Object = Object::Boolean(true);
pub const FALSE: Object = Object::Boolean(false);
pub const NULL: Object = Object::Null;

impl Object {
    pub fn from_bool(value: bool) -> Object {
        if value {
            TRUE
        } else {
            FALSE
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Object::Integer(_) => "INTEGER",
            Object::Boolean(_) => "BOOLEAN",
            Object::Null => "NULL",
            Object::Float(_) => "FLOAT",
            Object::String(_) => "STRING",
            Object::Error(_) => "ERROR",
        }
    }

    /// Only `false` and `null` are falsy.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Object::Null | Object::Boolean(false))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Object::Error(_))
    }

    /// Identity comparison. `true`, `false` and `null` are shared constants,
    /// so two of them are identical when they are the same constant; every
    /// other object is allocated fresh by the evaluation that produced it and
    /// is never identical to another one.
    pub fn is_same(&self, other: &Object) -> bool {
        match (self, other) {
            (Object::Boolean(left), Object::Boolean(right)) => left == right,
            (Object::Null, Object::Null) => true,
            _ => false,
        }
    }
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Object::Integer(value) => write!(f, "{}", value),
            Object::Boolean(value) => write!(f, "{}", value),
            Object::Null => write!(f, "null"),
            Object::Float(value) => {
                let text = value.to_string();
                if value.is_finite() && !text.contains('.') {
                    write!(f, "{}.0", text)
                } else {
                    write!(f, "{}", text)
                }
            }
            Object::String(value) => write!(f, "{}", value),
            Object::Error(message) => write!(f, "ERROR: {}", message),
        }
    }
}
