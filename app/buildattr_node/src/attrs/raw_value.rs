/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is licensed under both the MIT license found in the
 * LICENSE-MIT file in the root directory of this source tree and the Apache
 * License, Version 2.0 found in the LICENSE-APACHE file in the root directory
 * of this source tree.
 */

use std::fmt;
use std::fmt::Display;

use allocative::Allocative;

pub const STRING_TYPE: &str = "string";
pub const LIST_TYPE: &str = "list";

/// An untyped literal as it appears in a build declaration file.
///
/// Coercers pattern match on these variants instead of performing run-time
/// type checks on an opaque object. Position inside a `List` is semantic:
/// the link group mapping target literal is `[target, traversal]` or
/// `[target, traversal, label_filter]`.
#[derive(Debug, Clone, Eq, PartialEq, Allocative)]
pub enum RawValue {
    String(String),
    Int(i64),
    Bool(bool),
    List(Vec<RawValue>),
}

impl RawValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            RawValue::String(_) => STRING_TYPE,
            RawValue::Int(_) => "int",
            RawValue::Bool(_) => "bool",
            RawValue::List(_) => LIST_TYPE,
        }
    }

    pub fn unpack_str(&self) -> Option<&str> {
        match self {
            RawValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn unpack_list(&self) -> Option<&[RawValue]> {
        match self {
            RawValue::List(items) => Some(items),
            _ => None,
        }
    }
}

/// Renders roughly the build-file source that would produce this value, for
/// echoing back in error messages. Strings include the wrapping `"`.
impl Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawValue::String(s) => write!(f, "{:?}", s),
            RawValue::Int(i) => write!(f, "{}", i),
            RawValue::Bool(true) => write!(f, "True"),
            RawValue::Bool(false) => write!(f, "False"),
            RawValue::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i != 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
        }
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::String(value.to_owned())
    }
}

impl From<i64> for RawValue {
    fn from(value: i64) -> Self {
        RawValue::Int(value)
    }
}

impl From<bool> for RawValue {
    fn from(value: bool) -> Self {
        RawValue::Bool(value)
    }
}

impl From<Vec<RawValue>> for RawValue {
    fn from(value: Vec<RawValue>) -> Self {
        RawValue::List(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_renders_build_file_repr() {
        let value = RawValue::List(vec!["//foo:bar".into(), "tree".into(), 3.into(), true.into()]);
        assert_eq!(r#"["//foo:bar", "tree", 3, True]"#, value.to_string());
    }

    #[test]
    fn unpack_is_shape_selective() {
        assert_eq!(Some("x"), RawValue::from("x").unpack_str());
        assert_eq!(None, RawValue::from(1).unpack_str());
        assert!(RawValue::List(vec![]).unpack_list().is_some());
        assert!(RawValue::from("x").unpack_list().is_none());
    }
}
