//! Constant pool model.
//!
//! Instructions never own a pool. They resolve operands through the
//! read-only [`ConstantSource`] trait, which callers implement over whatever
//! pool representation their class-file reader produces. [`ConstantPool`] is
//! the in-crate implementation, used by code generators and tests.

use crate::error::ResolveError;
use crate::{String, ToString, Vec};

/// Tag byte identifying the kind of a constant pool entry.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstantTag {
    Utf8 = 1,
    Integer = 3,
    Float = 4,
    Long = 5,
    Double = 6,
    Class = 7,
    String = 8,
    Fieldref = 9,
    Methodref = 10,
    InterfaceMethodref = 11,
    NameAndType = 12,
    MethodHandle = 15,
    MethodType = 16,
    InvokeDynamic = 18,
}

/// A constant pool entry.
#[derive(Debug, Clone, PartialEq)]
pub enum Constant {
    Utf8(String),
    Integer(i32),
    Float(f32),
    Long(i64),
    Double(f64),
    /// Points at a Utf8 entry holding the internal class name
    Class { name_index: u16 },
    /// Points at a Utf8 entry holding the text
    String { string_index: u16 },
    Fieldref {
        class_index: u16,
        name_and_type_index: u16,
    },
    Methodref {
        class_index: u16,
        name_and_type_index: u16,
    },
    InterfaceMethodref {
        class_index: u16,
        name_and_type_index: u16,
    },
    NameAndType {
        name_index: u16,
        descriptor_index: u16,
    },
    MethodHandle {
        reference_kind: u8,
        reference_index: u16,
    },
    MethodType { descriptor_index: u16 },
    InvokeDynamic {
        bootstrap_method_attr_index: u16,
        name_and_type_index: u16,
    },
}

impl Constant {
    pub fn tag(&self) -> ConstantTag {
        match self {
            Constant::Utf8(_) => ConstantTag::Utf8,
            Constant::Integer(_) => ConstantTag::Integer,
            Constant::Float(_) => ConstantTag::Float,
            Constant::Long(_) => ConstantTag::Long,
            Constant::Double(_) => ConstantTag::Double,
            Constant::Class { .. } => ConstantTag::Class,
            Constant::String { .. } => ConstantTag::String,
            Constant::Fieldref { .. } => ConstantTag::Fieldref,
            Constant::Methodref { .. } => ConstantTag::Methodref,
            Constant::InterfaceMethodref { .. } => ConstantTag::InterfaceMethodref,
            Constant::NameAndType { .. } => ConstantTag::NameAndType,
            Constant::MethodHandle { .. } => ConstantTag::MethodHandle,
            Constant::MethodType { .. } => ConstantTag::MethodType,
            Constant::InvokeDynamic { .. } => ConstantTag::InvokeDynamic,
        }
    }

    /// Long and Double entries take up two pool slots.
    pub fn is_wide(&self) -> bool {
        matches!(self, Constant::Long(_) | Constant::Double(_))
    }
}

/// Read-only access to a constant pool.
pub trait ConstantSource {
    /// Entry at `index`, or `None` for index 0, the unusable slot after a
    /// Long/Double, or an index past the end.
    fn constant_at(&self, index: u16) -> Option<&Constant>;

    /// Like [`constant_at`](Self::constant_at), but a missing entry is an error.
    fn constant(&self, index: u16) -> Result<&Constant, ResolveError> {
        self.constant_at(index)
            .ok_or(ResolveError::MissingConstant { index })
    }

    /// Text of the Utf8 entry at `index`.
    fn utf8_at(&self, index: u16) -> Result<&str, ResolveError> {
        match self.constant(index)? {
            Constant::Utf8(text) => Ok(text),
            other => Err(ResolveError::UnexpectedIndirection {
                index,
                expected: ConstantTag::Utf8,
                found: other.tag(),
            }),
        }
    }
}

/// Growable constant pool.
///
/// Slot 0 is reserved, so the first entry added lands at index 1. Entries
/// are never removed; adding an identical Utf8, Integer or Class entry
/// returns the existing index.
#[derive(Debug, Clone)]
pub struct ConstantPool {
    entries: Vec<Option<Constant>>,
}

impl Default for ConstantPool {
    fn default() -> Self {
        Self::new()
    }
}

impl ConstantPool {
    pub fn new() -> Self {
        Self {
            entries: crate::vec![None],
        }
    }

    /// The `constant_pool_count` as written in a class file: one more than
    /// the highest usable index.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.len() == 1
    }

    /// Append `constant` without deduplication.
    ///
    /// # Panics
    ///
    /// Panics if the pool would exceed 65535 slots.
    pub fn push(&mut self, constant: Constant) -> u16 {
        let wide = constant.is_wide();
        let index = u16::try_from(self.entries.len()).expect("constant pool overflow");
        self.entries.push(Some(constant));
        if wide {
            self.entries.push(None);
        }
        assert!(self.entries.len() <= usize::from(u16::MAX), "constant pool overflow");
        index
    }

    fn find(&self, wanted: &Constant) -> Option<u16> {
        self.entries
            .iter()
            .position(|c| c.as_ref() == Some(wanted))
            .and_then(|i| u16::try_from(i).ok())
    }

    fn intern(&mut self, constant: Constant) -> u16 {
        match self.find(&constant) {
            Some(index) => index,
            None => self.push(constant),
        }
    }

    pub fn add_utf8(&mut self, text: &str) -> u16 {
        self.intern(Constant::Utf8(text.to_string()))
    }

    pub fn add_integer(&mut self, value: i32) -> u16 {
        self.intern(Constant::Integer(value))
    }

    pub fn add_float(&mut self, value: f32) -> u16 {
        // NaN never compares equal, so NaN entries are always appended
        self.intern(Constant::Float(value))
    }

    pub fn add_long(&mut self, value: i64) -> u16 {
        self.intern(Constant::Long(value))
    }

    pub fn add_double(&mut self, value: f64) -> u16 {
        self.intern(Constant::Double(value))
    }

    /// Add a String entry and the Utf8 entry it points at.
    pub fn add_string(&mut self, text: &str) -> u16 {
        let string_index = self.add_utf8(text);
        self.intern(Constant::String { string_index })
    }

    /// Add a Class entry for a dotted or internal class name.
    pub fn add_class(&mut self, class_name: &str) -> u16 {
        let name_index = self.add_utf8(&class_name.replace('.', "/"));
        self.intern(Constant::Class { name_index })
    }

    pub fn iter(&self) -> impl Iterator<Item = (u16, &Constant)> {
        self.entries
            .iter()
            .enumerate()
            .filter_map(|(i, c)| Some((u16::try_from(i).ok()?, c.as_ref()?)))
    }
}

impl ConstantSource for ConstantPool {
    fn constant_at(&self, index: u16) -> Option<&Constant> {
        self.entries.get(usize::from(index))?.as_ref()
    }
}

impl<T: ConstantSource + ?Sized> ConstantSource for &T {
    fn constant_at(&self, index: u16) -> Option<&Constant> {
        (**self).constant_at(index)
    }
}

#[cfg(test)]
#[path = "constant_pool_test.rs"]
mod constant_pool_test;
