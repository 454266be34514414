/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is licensed under both the MIT license found in the
 * LICENSE-MIT file in the root directory of this source tree and the Apache
 * License, Version 2.0 found in the LICENSE-APACHE file in the root directory
 * of this source tree.
 */

use buildattr_core::configuration::Configuration;
use buildattr_core::target::ConfiguredTargetLabel;
use buildattr_core::target::TargetLabel;
use dupe::Dupe;

/// The context for attribute configuration. Contains information about the
/// configuration.
pub trait AttrConfigurationContext {
    /// The configuration of the target whose attributes are being configured.
    fn cfg(&self) -> &Configuration;

    /// The host configuration, used for tools that run during the build.
    fn exec_cfg(&self) -> &Configuration;

    fn configure_target(&self, label: &TargetLabel) -> ConfiguredTargetLabel {
        label.configure(self.cfg().dupe())
    }

    fn configure_exec_target(&self, label: &TargetLabel) -> ConfiguredTargetLabel {
        label.configure(self.exec_cfg().dupe())
    }
}

pub struct AttrConfigurationContextImpl<'b> {
    pub cfg: &'b Configuration,
    pub exec_cfg: &'b Configuration,
}

impl<'b> AttrConfigurationContext for AttrConfigurationContextImpl<'b> {
    fn cfg(&self) -> &Configuration {
        self.cfg
    }

    fn exec_cfg(&self) -> &Configuration {
        self.exec_cfg
    }
}
