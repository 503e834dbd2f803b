//! Static types reported by typed instructions.

use core::fmt;

use crate::{String, ToString};

/// Reference to a class by its fully qualified name (`java.lang.String`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectType {
    class_name: String,
}

impl ObjectType {
    /// Create from a dotted (`java.lang.Object`) or internal
    /// (`java/lang/Object`) class name.
    pub fn new(class_name: &str) -> Self {
        Self {
            class_name: class_name.replace('/', "."),
        }
    }

    /// Dotted class name.
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// Field descriptor, e.g. `Ljava/lang/String;`.
    pub fn signature(&self) -> String {
        let mut sig = String::with_capacity(self.class_name.len() + 2);
        sig.push('L');
        sig.push_str(&self.class_name.replace('.', "/"));
        sig.push(';');
        sig
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.class_name)
    }
}

/// A JVM value type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    Boolean,
    Byte,
    Char,
    Short,
    Int,
    Long,
    Float,
    Double,
    Object(ObjectType),
}

impl Type {
    pub fn string() -> Type {
        Type::Object(ObjectType::new("java.lang.String"))
    }

    pub fn class() -> Type {
        Type::Object(ObjectType::new("java.lang.Class"))
    }

    /// Field descriptor for this type.
    pub fn signature(&self) -> String {
        match self {
            Type::Boolean => "Z".to_string(),
            Type::Byte => "B".to_string(),
            Type::Char => "C".to_string(),
            Type::Short => "S".to_string(),
            Type::Int => "I".to_string(),
            Type::Long => "J".to_string(),
            Type::Float => "F".to_string(),
            Type::Double => "D".to_string(),
            Type::Object(obj) => obj.signature(),
        }
    }

    /// Number of operand stack slots a value of this type occupies.
    pub fn size(&self) -> usize {
        match self {
            Type::Long | Type::Double => 2,
            _ => 1,
        }
    }

    pub fn is_reference(&self) -> bool {
        matches!(self, Type::Object(_))
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Boolean => f.write_str("boolean"),
            Type::Byte => f.write_str("byte"),
            Type::Char => f.write_str("char"),
            Type::Short => f.write_str("short"),
            Type::Int => f.write_str("int"),
            Type::Long => f.write_str("long"),
            Type::Float => f.write_str("float"),
            Type::Double => f.write_str("double"),
            Type::Object(obj) => write!(f, "{}", obj),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_signatures() {
        assert_eq!(Type::Byte.signature(), "B");
        assert_eq!(Type::Int.signature(), "I");
        assert_eq!(Type::string().signature(), "Ljava/lang/String;");
        assert_eq!(Type::class().signature(), "Ljava/lang/Class;");
    }

    #[test]
    fn test_internal_names_are_normalized() {
        let a = ObjectType::new("java/util/List");
        let b = ObjectType::new("java.util.List");
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "java.util.List");
    }

    #[test]
    fn test_sizes() {
        assert_eq!(Type::Long.size(), 2);
        assert_eq!(Type::Float.size(), 1);
        assert!(Type::string().is_reference());
        assert!(!Type::Int.is_reference());
    }
}
