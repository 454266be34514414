/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is licensed under both the MIT license found in the
 * LICENSE-MIT file in the root directory of this source tree and the Apache
 * License, Version 2.0 found in the LICENSE-APACHE file in the root directory
 * of this source tree.
 */

use std::any::TypeId;

use crate::attrs::attr_type::link_group::LinkGroupMappingTraversal;
use crate::attrs::coerce::TypeCoercer;
use crate::attrs::coercion_context::AttrCoercionContext;
use crate::attrs::coercion_error::CoercionError;
use crate::attrs::configuration_context::AttrConfigurationContext;
use crate::attrs::configured_traversal::ConfiguredAttrTraversal;
use crate::attrs::raw_value::RawValue;
use crate::attrs::raw_value::STRING_TYPE;
use crate::attrs::traversal::CoercedAttrTraversal;

/// Leaf coercer for the closed set of link group traversal modes. The mode
/// carries no configuration dependency, so configure is the identity.
#[derive(Debug, Default)]
pub struct LinkGroupTraversalTypeCoercer;

const VARIANTS: [&str; 2] = ["tree", "node"];

impl TypeCoercer for LinkGroupTraversalTypeCoercer {
    type Unconfigured = LinkGroupMappingTraversal;
    type Configured = LinkGroupMappingTraversal;

    fn coerce_unconfigured(
        &self,
        _ctx: &dyn AttrCoercionContext,
        value: &RawValue,
    ) -> anyhow::Result<LinkGroupMappingTraversal> {
        match value.unpack_str() {
            Some(s) => {
                // Enum names can be specified upper or lower case, so we
                // normalise them to lowercase before matching.
                match s.to_lowercase().as_str() {
                    "tree" => Ok(LinkGroupMappingTraversal::Tree),
                    "node" => Ok(LinkGroupMappingTraversal::Node),
                    other => Err(CoercionError::invalid_enum(other, VARIANTS.to_vec()).into()),
                }
            }
            None => Err(CoercionError::type_error(STRING_TYPE, value).into()),
        }
    }

    fn configure(
        &self,
        _ctx: &dyn AttrConfigurationContext,
        value: &LinkGroupMappingTraversal,
    ) -> anyhow::Result<LinkGroupMappingTraversal> {
        Ok(*value)
    }

    fn has_element_class(&self, classes: &[TypeId]) -> bool {
        classes.contains(&TypeId::of::<LinkGroupMappingTraversal>())
    }

    fn traverse<'a>(
        &self,
        _value: &'a LinkGroupMappingTraversal,
        _traversal: &mut dyn CoercedAttrTraversal<'a>,
    ) -> anyhow::Result<()> {
        // Traversal modes embed no target references.
        Ok(())
    }

    fn traverse_configured(
        &self,
        _value: &LinkGroupMappingTraversal,
        _traversal: &mut dyn ConfiguredAttrTraversal,
    ) -> anyhow::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attrs::testing::coercion_ctx;

    #[test]
    fn names_match_case_insensitively() {
        let coercer = LinkGroupTraversalTypeCoercer;
        for raw in ["tree", "Tree", "TREE"] {
            assert_eq!(
                LinkGroupMappingTraversal::Tree,
                coercer
                    .coerce_unconfigured(&coercion_ctx(), &RawValue::from(raw))
                    .unwrap()
            );
        }
        assert_eq!(
            LinkGroupMappingTraversal::Node,
            coercer
                .coerce_unconfigured(&coercion_ctx(), &RawValue::from("node"))
                .unwrap()
        );
    }

    #[test]
    fn unknown_name_lists_allowed_variants() {
        let err = LinkGroupTraversalTypeCoercer
            .coerce_unconfigured(&coercion_ctx(), &RawValue::from("forest"))
            .unwrap_err();
        assert_eq!(
            "enum called with `forest`, only allowed: `tree`, `node`",
            err.to_string()
        );
    }

    #[test]
    fn non_string_is_a_type_error() {
        let err = LinkGroupTraversalTypeCoercer
            .coerce_unconfigured(&coercion_ctx(), &RawValue::from(false))
            .unwrap_err();
        assert!(err.to_string().contains("got value with type `bool`"), "{}", err);
    }
}
