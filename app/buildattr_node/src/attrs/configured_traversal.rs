/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is licensed under both the MIT license found in the
 * LICENSE-MIT file in the root directory of this source tree and the Apache
 * License, Version 2.0 found in the LICENSE-APACHE file in the root directory
 * of this source tree.
 */

use buildattr_core::target::ConfiguredTargetLabel;

/// A visitor over the target references embedded in a configured attribute
/// value. Same visiting rules as the unconfigured form.
pub trait ConfiguredAttrTraversal {
    fn dep(&mut self, dep: &ConfiguredTargetLabel) -> anyhow::Result<()>;
}
