/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is licensed under both the MIT license found in the
 * LICENSE-MIT file in the root directory of this source tree and the Apache
 * License, Version 2.0 found in the LICENSE-APACHE file in the root directory
 * of this source tree.
 */

use std::any::TypeId;

use buildattr_core::target::ConfiguredTargetLabel;
use buildattr_core::target::TargetLabel;

use crate::attrs::coerce::TypeCoercer;
use crate::attrs::coercion_context::AttrCoercionContext;
use crate::attrs::coercion_error::CoercionError;
use crate::attrs::configuration_context::AttrConfigurationContext;
use crate::attrs::configured_traversal::ConfiguredAttrTraversal;
use crate::attrs::raw_value::RawValue;
use crate::attrs::raw_value::STRING_TYPE;
use crate::attrs::traversal::CoercedAttrTraversal;

/// Leaf coercer for build target references. Parsing of the label syntax is
/// owned by the coercion context; this coercer only unpacks the string and
/// forwards.
#[derive(Debug, Default)]
pub struct BuildTargetTypeCoercer;

impl TypeCoercer for BuildTargetTypeCoercer {
    type Unconfigured = TargetLabel;
    type Configured = ConfiguredTargetLabel;

    fn coerce_unconfigured(
        &self,
        ctx: &dyn AttrCoercionContext,
        value: &RawValue,
    ) -> anyhow::Result<TargetLabel> {
        let label = value
            .unpack_str()
            .ok_or_else(|| CoercionError::type_error(STRING_TYPE, value))?;
        ctx.coerce_target(label)
    }

    fn configure(
        &self,
        ctx: &dyn AttrConfigurationContext,
        value: &TargetLabel,
    ) -> anyhow::Result<ConfiguredTargetLabel> {
        Ok(ctx.configure_target(value))
    }

    fn has_element_class(&self, classes: &[TypeId]) -> bool {
        classes
            .iter()
            .any(|c| *c == TypeId::of::<TargetLabel>() || *c == TypeId::of::<ConfiguredTargetLabel>())
    }

    fn traverse<'a>(
        &self,
        value: &'a TargetLabel,
        traversal: &mut dyn CoercedAttrTraversal<'a>,
    ) -> anyhow::Result<()> {
        traversal.dep(value)
    }

    fn traverse_configured(
        &self,
        value: &ConfiguredTargetLabel,
        traversal: &mut dyn ConfiguredAttrTraversal,
    ) -> anyhow::Result<()> {
        traversal.dep(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attrs::testing::coercion_ctx;

    #[test]
    fn coerces_label_strings_only() {
        let coercer = BuildTargetTypeCoercer;
        let label = coercer
            .coerce_unconfigured(&coercion_ctx(), &RawValue::from("//foo:bar"))
            .unwrap();
        assert_eq!("//foo:bar", label.as_str());

        let err = coercer
            .coerce_unconfigured(&coercion_ctx(), &RawValue::from(7))
            .unwrap_err();
        assert!(err.to_string().contains("Expected value of type `string`"), "{}", err);
    }
}
