/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is licensed under both the MIT license found in the
 * LICENSE-MIT file in the root directory of this source tree and the Apache
 * License, Version 2.0 found in the LICENSE-APACHE file in the root directory
 * of this source tree.
 */

use buildattr_core::target::TargetLabel;

/// A visitor over the target references embedded in a coerced (unconfigured)
/// attribute value. Coercers forward to their children in a fixed, documented
/// order, so an order-sensitive accumulator sees a deterministic sequence.
///
/// Only values that carry a target dependency are visited. Enumeration values
/// and compiled patterns never are.
pub trait CoercedAttrTraversal<'a> {
    fn dep(&mut self, dep: &'a TargetLabel) -> anyhow::Result<()>;
}
