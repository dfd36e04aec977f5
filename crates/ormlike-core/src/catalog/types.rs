//! Core type definitions for the catalog.

use ormlike_proto::Value;
use rkyv::{Archive, Deserialize, Serialize};

/// Scalar data types a field can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Archive, Serialize, Deserialize)]
pub enum ScalarType {
    /// Boolean value.
    Bool,
    /// 32-bit signed integer.
    Int32,
    /// 64-bit signed integer.
    Int64,
    /// 32-bit floating point.
    Float32,
    /// 64-bit floating point.
    Float64,
    /// UTF-8 string.
    String,
    /// Binary data.
    Bytes,
    /// Timestamp (microseconds since Unix epoch).
    Timestamp,
    /// UUID (128-bit identifier).
    Uuid,
}

/// Field types - flat representation without recursion.
#[derive(Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize)]
pub enum FieldType {
    /// A scalar value.
    Scalar(ScalarType),
    /// An optional scalar value (nullable).
    OptionalScalar(ScalarType),
}

impl ScalarType {
    /// Check if a non-null value can be stored in a field of this type.
    ///
    /// Integers widen and floats widen; nothing else converts.
    pub fn accepts(&self, value: &Value) -> bool {
        matches!(
            (self, value),
            (ScalarType::Bool, Value::Bool(_))
                | (ScalarType::Int32, Value::Int32(_))
                | (ScalarType::Int64, Value::Int32(_) | Value::Int64(_))
                | (ScalarType::Float32, Value::Float32(_))
                | (ScalarType::Float64, Value::Float32(_) | Value::Float64(_))
                | (ScalarType::String, Value::String(_))
                | (ScalarType::Bytes, Value::Bytes(_))
                | (ScalarType::Timestamp, Value::Timestamp(_))
                | (ScalarType::Uuid, Value::Uuid(_))
        )
    }
}

impl FieldType {
    /// Create a scalar field type.
    pub fn scalar(scalar: ScalarType) -> Self {
        FieldType::Scalar(scalar)
    }

    /// Check if this type is nullable.
    pub fn is_nullable(&self) -> bool {
        matches!(self, FieldType::OptionalScalar(_))
    }

    /// Get the inner scalar type.
    pub fn scalar_type(&self) -> ScalarType {
        match self {
            FieldType::Scalar(s) | FieldType::OptionalScalar(s) => *s,
        }
    }

    /// Check if a value can be stored in a field of this type.
    pub fn accepts(&self, value: &Value) -> bool {
        if value.is_null() {
            return self.is_nullable();
        }
        self.scalar_type().accepts(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_values() {
        assert!(ScalarType::String.accepts(&Value::String("amy".into())));
        assert!(!ScalarType::String.accepts(&Value::Int32(20)));
        assert!(ScalarType::Int64.accepts(&Value::Int32(20)));
        assert!(!ScalarType::Int32.accepts(&Value::Int64(20)));
        assert!(ScalarType::Uuid.accepts(&Value::Uuid([0; 16])));
    }

    #[test]
    fn test_nullability() {
        let name = FieldType::scalar(ScalarType::String);
        assert!(!name.is_nullable());
        assert!(!name.accepts(&Value::Null));

        let other = FieldType::OptionalScalar(ScalarType::String);
        assert!(other.is_nullable());
        assert!(other.accepts(&Value::Null));
        assert_eq!(other.scalar_type(), ScalarType::String);
    }
}
