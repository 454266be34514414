/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is licensed under both the MIT license found in the
 * LICENSE-MIT file in the root directory of this source tree and the Apache
 * License, Version 2.0 found in the LICENSE-APACHE file in the root directory
 * of this source tree.
 */

use std::any::TypeId;

use buildattr_core::pattern::BuildRegex;
use dupe::Dupe;

use crate::attrs::coerce::TypeCoercer;
use crate::attrs::coercion_context::AttrCoercionContext;
use crate::attrs::coercion_error::CoercionError;
use crate::attrs::configuration_context::AttrConfigurationContext;
use crate::attrs::configured_traversal::ConfiguredAttrTraversal;
use crate::attrs::raw_value::RawValue;
use crate::attrs::raw_value::STRING_TYPE;
use crate::attrs::traversal::CoercedAttrTraversal;

/// Leaf coercer for regular expression literals. Compilation errors surface
/// unchanged with the offending source attached.
#[derive(Debug, Default)]
pub struct PatternTypeCoercer;

impl PatternTypeCoercer {
    /// Compile from an already-unpacked string. Compound coercers that strip
    /// a prefix from the literal delegate here.
    pub(crate) fn coerce_str(&self, pattern: &str) -> anyhow::Result<BuildRegex> {
        Ok(BuildRegex::new(pattern)?)
    }
}

impl TypeCoercer for PatternTypeCoercer {
    type Unconfigured = BuildRegex;
    type Configured = BuildRegex;

    fn coerce_unconfigured(
        &self,
        _ctx: &dyn AttrCoercionContext,
        value: &RawValue,
    ) -> anyhow::Result<BuildRegex> {
        let pattern = value
            .unpack_str()
            .ok_or_else(|| CoercionError::type_error(STRING_TYPE, value))?;
        self.coerce_str(pattern)
    }

    fn configure(
        &self,
        _ctx: &dyn AttrConfigurationContext,
        value: &BuildRegex,
    ) -> anyhow::Result<BuildRegex> {
        Ok(value.dupe())
    }

    fn has_element_class(&self, classes: &[TypeId]) -> bool {
        classes.contains(&TypeId::of::<BuildRegex>())
    }

    fn traverse<'a>(
        &self,
        _value: &'a BuildRegex,
        _traversal: &mut dyn CoercedAttrTraversal<'a>,
    ) -> anyhow::Result<()> {
        // Compiled patterns embed no target references.
        Ok(())
    }

    fn traverse_configured(
        &self,
        _value: &BuildRegex,
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
    fn compiles_valid_patterns() {
        let regex = PatternTypeCoercer
            .coerce_unconfigured(&coercion_ctx(), &RawValue::from("^exported_.*"))
            .unwrap();
        assert_eq!("^exported_.*", regex.as_str());
    }

    #[test]
    fn syntax_errors_propagate() {
        assert!(
            PatternTypeCoercer
                .coerce_unconfigured(&coercion_ctx(), &RawValue::from("(unclosed"))
                .is_err()
        );
    }
}
