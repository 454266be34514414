/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is licensed under both the MIT license found in the
 * LICENSE-MIT file in the root directory of this source tree and the Apache
 * License, Version 2.0 found in the LICENSE-APACHE file in the root directory
 * of this source tree.
 */

use std::any::TypeId;

use crate::attrs::coercion_context::AttrCoercionContext;
use crate::attrs::configuration_context::AttrConfigurationContext;
use crate::attrs::configured_traversal::ConfiguredAttrTraversal;
use crate::attrs::raw_value::RawValue;
use crate::attrs::traversal::CoercedAttrTraversal;

/// The protocol every attribute coercer implements. A coercer converts one
/// raw literal into one typed value in two phases: `coerce_unconfigured`
/// while the build file is processed, `configure` once a configuration is
/// known. Compound coercers own their sub-coercers and delegate to them, so
/// coercers for nested attribute shapes compose without any of them knowing
/// the concrete leaf shapes in advance.
///
/// Coercers hold only immutable configuration (their sub-coercers), so a
/// single instance may be used from many threads at once.
pub trait TypeCoercer: Send + Sync {
    type Unconfigured;
    type Configured;

    /// Convert a raw literal to the unconfigured form, validating shape and
    /// element types. Failures carry the offending literal; they are never
    /// recovered from locally.
    fn coerce_unconfigured(
        &self,
        ctx: &dyn AttrCoercionContext,
        value: &RawValue,
    ) -> anyhow::Result<Self::Unconfigured>;

    /// Bind an unconfigured value to the context's configuration. Only
    /// configuration-dependent fields change; everything else is copied
    /// verbatim.
    fn configure(
        &self,
        ctx: &dyn AttrConfigurationContext,
        value: &Self::Unconfigured,
    ) -> anyhow::Result<Self::Configured>;

    /// Whether values produced by this coercer can ever embed a value of one
    /// of the given types. Lets callers answer "does this attribute ever
    /// contain a target" without a full traversal.
    fn has_element_class(&self, classes: &[TypeId]) -> bool;

    /// Visit every target reference reachable from `value`, depth first.
    fn traverse<'a>(
        &self,
        value: &'a Self::Unconfigured,
        traversal: &mut dyn CoercedAttrTraversal<'a>,
    ) -> anyhow::Result<()>;

    /// Like `traverse`, for the configured form.
    fn traverse_configured(
        &self,
        value: &Self::Configured,
        traversal: &mut dyn ConfiguredAttrTraversal,
    ) -> anyhow::Result<()>;
}
