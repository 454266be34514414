/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is licensed under both the MIT license found in the
 * LICENSE-MIT file in the root directory of this source tree and the Apache
 * License, Version 2.0 found in the LICENSE-APACHE file in the root directory
 * of this source tree.
 */

use std::any::TypeId;

use crate::attrs::coerce::TypeCoercer;
use crate::attrs::coercion_context::AttrCoercionContext;
use crate::attrs::coercion_error::CoercionError;
use crate::attrs::configuration_context::AttrConfigurationContext;
use crate::attrs::configured_traversal::ConfiguredAttrTraversal;
use crate::attrs::raw_value::LIST_TYPE;
use crate::attrs::raw_value::RawValue;
use crate::attrs::traversal::CoercedAttrTraversal;

/// Coercer for homogeneous sequences. Elements are coerced in order and a
/// failing element is wrapped with its position.
#[derive(Debug, Default)]
pub struct ListTypeCoercer<C> {
    inner: C,
}

impl<C> ListTypeCoercer<C> {
    pub fn new(inner: C) -> Self {
        Self { inner }
    }
}

impl<C: TypeCoercer> TypeCoercer for ListTypeCoercer<C> {
    type Unconfigured = Vec<C::Unconfigured>;
    type Configured = Vec<C::Configured>;

    fn coerce_unconfigured(
        &self,
        ctx: &dyn AttrCoercionContext,
        value: &RawValue,
    ) -> anyhow::Result<Vec<C::Unconfigured>> {
        let items = value
            .unpack_list()
            .ok_or_else(|| CoercionError::type_error(LIST_TYPE, value))?;
        items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                self.inner
                    .coerce_unconfigured(ctx, item)
                    .map_err(|e| CoercionError::delegated(i, LIST_TYPE, e).into())
            })
            .collect()
    }

    fn configure(
        &self,
        ctx: &dyn AttrConfigurationContext,
        value: &Vec<C::Unconfigured>,
    ) -> anyhow::Result<Vec<C::Configured>> {
        value.iter().map(|item| self.inner.configure(ctx, item)).collect()
    }

    fn has_element_class(&self, classes: &[TypeId]) -> bool {
        self.inner.has_element_class(classes)
    }

    fn traverse<'a>(
        &self,
        value: &'a Vec<C::Unconfigured>,
        traversal: &mut dyn CoercedAttrTraversal<'a>,
    ) -> anyhow::Result<()> {
        for item in value {
            self.inner.traverse(item, traversal)?;
        }
        Ok(())
    }

    fn traverse_configured(
        &self,
        value: &Vec<C::Configured>,
        traversal: &mut dyn ConfiguredAttrTraversal,
    ) -> anyhow::Result<()> {
        for item in value {
            self.inner.traverse_configured(item, traversal)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attrs::attr_type::build_target::BuildTargetTypeCoercer;
    use crate::attrs::testing::coercion_ctx;

    #[test]
    fn elements_are_coerced_in_order() {
        let coercer = ListTypeCoercer::new(BuildTargetTypeCoercer);
        let labels = coercer
            .coerce_unconfigured(
                &coercion_ctx(),
                &RawValue::List(vec!["//a:a".into(), "//b:b".into()]),
            )
            .unwrap();
        assert_eq!(
            vec!["//a:a", "//b:b"],
            labels.iter().map(|l| l.as_str()).collect::<Vec<_>>()
        );
    }

    #[test]
    fn element_failures_carry_their_position() {
        let coercer = ListTypeCoercer::new(BuildTargetTypeCoercer);
        let err = coercer
            .coerce_unconfigured(
                &coercion_ctx(),
                &RawValue::List(vec!["//a:a".into(), 3.into()]),
            )
            .unwrap_err();
        assert!(err.to_string().contains("element 1"), "{}", err);
    }

    #[test]
    fn non_sequence_input_is_a_type_error() {
        let err = ListTypeCoercer::new(BuildTargetTypeCoercer)
            .coerce_unconfigured(&coercion_ctx(), &RawValue::from("//a:a"))
            .unwrap_err();
        assert!(err.to_string().contains("Expected value of type `list`"), "{}", err);
    }
}
