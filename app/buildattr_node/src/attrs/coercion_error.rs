/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is licensed under both the MIT license found in the
 * LICENSE-MIT file in the root directory of this source tree and the Apache
 * License, Version 2.0 found in the LICENSE-APACHE file in the root directory
 * of this source tree.
 */

use itertools::Itertools;

use crate::attrs::raw_value::RawValue;

/// The failure channel shared by every coercer. Each variant carries the
/// offending value rendered as written, the name of the type that was being
/// produced, and a human-readable reason, so the build tool can point the
/// user at the bad line. Construction of a coerced value is all-or-nothing;
/// none of these are ever recovered from locally.
#[derive(Debug, thiserror::Error)]
pub enum CoercionError {
    #[error("Cannot coerce `{value}` to `{output_type}`: {msg}")]
    Shape {
        value: String,
        output_type: &'static str,
        msg: &'static str,
    },
    #[error("Cannot coerce `{value}` to `{output_type}`: {msg}")]
    WrongElementType {
        value: String,
        output_type: &'static str,
        msg: &'static str,
    },
    #[error("Cannot coerce `{value}` to `{output_type}`: {msg}")]
    MissingPrefix {
        value: String,
        output_type: &'static str,
        msg: String,
    },
    #[error("Error coercing element {position} of `{output_type}`")]
    Delegated {
        position: usize,
        output_type: &'static str,
        #[source]
        source: anyhow::Error,
    },
    #[error("Expected value of type `{0}`, got value with type `{1}` (value was `{2}`)")]
    TypeError(&'static str, &'static str, String),
    #[error("enum called with `{0}`, only allowed: {}", .1.iter().map(|x| format!("`{x}`")).join(", "))]
    InvalidEnumVariant(String, Vec<&'static str>),
}

impl CoercionError {
    pub fn shape(value: &RawValue, output_type: &'static str, msg: &'static str) -> CoercionError {
        CoercionError::Shape {
            value: value.to_string(),
            output_type,
            msg,
        }
    }

    pub fn wrong_element_type(
        value: &RawValue,
        output_type: &'static str,
        msg: &'static str,
    ) -> CoercionError {
        CoercionError::WrongElementType {
            value: value.to_string(),
            output_type,
            msg,
        }
    }

    pub fn missing_prefix(
        value: &RawValue,
        output_type: &'static str,
        prefix: &str,
    ) -> CoercionError {
        CoercionError::MissingPrefix {
            value: value.to_string(),
            output_type,
            msg: format!("Label regex filter should start with `{}`", prefix),
        }
    }

    pub fn delegated(
        position: usize,
        output_type: &'static str,
        source: anyhow::Error,
    ) -> CoercionError {
        CoercionError::Delegated {
            position,
            output_type,
            source,
        }
    }

    pub fn type_error(expected_type: &'static str, value: &RawValue) -> CoercionError {
        CoercionError::TypeError(expected_type, value.type_name(), value.to_string())
    }

    pub fn invalid_enum(got: &str, wanted: Vec<&'static str>) -> CoercionError {
        CoercionError::InvalidEnumVariant(got.to_owned(), wanted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_enum_lists_allowed_variants() {
        let err = CoercionError::invalid_enum("forest", vec!["tree", "node"]);
        assert_eq!(
            "enum called with `forest`, only allowed: `tree`, `node`",
            err.to_string()
        );
    }

    #[test]
    fn missing_prefix_names_the_prefix() {
        let err =
            CoercionError::missing_prefix(&RawValue::from("exported"), "link_group", "label:");
        assert!(err.to_string().contains("should start with `label:`"), "{}", err);
    }

    #[test]
    fn delegated_preserves_the_inner_error() {
        let inner = anyhow::anyhow!(CoercionError::type_error("string", &RawValue::from(3)));
        let err = CoercionError::delegated(1, "link_group_mapping_target", inner);
        let chain = format!("{:#}", anyhow::Error::from(err));
        assert!(chain.contains("element 1"), "{}", chain);
        assert!(chain.contains("value was `3`"), "{}", chain);
    }
}
