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
use crate::attrs::raw_value::RawValue;
use crate::attrs::raw_value::STRING_TYPE;
use crate::attrs::traversal::CoercedAttrTraversal;

/// Leaf coercer for plain strings (e.g. link group names).
#[derive(Debug, Default)]
pub struct StringTypeCoercer;

impl TypeCoercer for StringTypeCoercer {
    type Unconfigured = String;
    type Configured = String;

    fn coerce_unconfigured(
        &self,
        _ctx: &dyn AttrCoercionContext,
        value: &RawValue,
    ) -> anyhow::Result<String> {
        match value.unpack_str() {
            Some(s) => Ok(s.to_owned()),
            None => Err(CoercionError::type_error(STRING_TYPE, value).into()),
        }
    }

    fn configure(
        &self,
        _ctx: &dyn AttrConfigurationContext,
        value: &String,
    ) -> anyhow::Result<String> {
        Ok(value.clone())
    }

    fn has_element_class(&self, classes: &[TypeId]) -> bool {
        classes.contains(&TypeId::of::<String>())
    }

    fn traverse<'a>(
        &self,
        _value: &'a String,
        _traversal: &mut dyn CoercedAttrTraversal<'a>,
    ) -> anyhow::Result<()> {
        Ok(())
    }

    fn traverse_configured(
        &self,
        _value: &String,
        _traversal: &mut dyn ConfiguredAttrTraversal,
    ) -> anyhow::Result<()> {
        Ok(())
    }
}
