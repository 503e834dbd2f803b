use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_first_entry_is_index_one() {
    let mut pool = ConstantPool::new();
    assert!(pool.is_empty());
    assert_eq!(pool.add_integer(42), 1);
    assert_eq!(pool.len(), 2);
    assert_eq!(pool.constant_at(0), None);
    assert_eq!(pool.constant_at(1), Some(&Constant::Integer(42)));
}

#[test]
fn test_long_and_double_take_two_slots() {
    let mut pool = ConstantPool::new();
    let long = pool.add_long(1 << 40);
    let after = pool.add_integer(7);
    assert_eq!(long, 1);
    assert_eq!(after, 3);
    assert_eq!(pool.constant_at(2), None);

    let double = pool.add_double(2.5);
    assert_eq!(pool.add_utf8("x"), double + 2);
}

#[test]
fn test_string_indirects_through_utf8() {
    let mut pool = ConstantPool::new();
    let s = pool.add_string("hello");
    let Constant::String { string_index } = pool.constant(s).unwrap() else {
        panic!("expected String entry");
    };
    assert_eq!(pool.utf8_at(*string_index).unwrap(), "hello");
}

#[test]
fn test_class_stores_internal_name() {
    let mut pool = ConstantPool::new();
    let c = pool.add_class("java.util.Map");
    let Constant::Class { name_index } = pool.constant(c).unwrap() else {
        panic!("expected Class entry");
    };
    assert_eq!(pool.utf8_at(*name_index).unwrap(), "java/util/Map");
}

#[test]
fn test_deduplication() {
    let mut pool = ConstantPool::new();
    let a = pool.add_string("dup");
    let b = pool.add_string("dup");
    assert_eq!(a, b);
    // One Utf8 plus one String
    assert_eq!(pool.iter().count(), 2);

    // push never deduplicates
    let c = pool.push(Constant::Integer(1));
    let d = pool.push(Constant::Integer(1));
    assert_ne!(c, d);
}

#[test]
fn test_missing_and_mistyped_lookups() {
    let mut pool = ConstantPool::new();
    let i = pool.add_integer(3);
    assert_eq!(
        pool.constant(99),
        Err(ResolveError::MissingConstant { index: 99 })
    );
    assert_eq!(
        pool.utf8_at(i),
        Err(ResolveError::UnexpectedIndirection {
            index: i,
            expected: ConstantTag::Utf8,
            found: ConstantTag::Integer,
        })
    );
}

#[test]
fn test_tags_match_class_file_values() {
    assert_eq!(ConstantTag::Utf8 as u8, 1);
    assert_eq!(ConstantTag::Integer as u8, 3);
    assert_eq!(ConstantTag::Class as u8, 7);
    assert_eq!(ConstantTag::String as u8, 8);
    assert_eq!(Constant::MethodType { descriptor_index: 1 }.tag(), ConstantTag::MethodType);
}
