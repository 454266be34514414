/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is licensed under both the MIT license found in the
 * LICENSE-MIT file in the root directory of this source tree and the Apache
 * License, Version 2.0 found in the LICENSE-APACHE file in the root directory
 * of this source tree.
 */

use buildattr_core::configuration::Configuration;

use crate::attrs::coercion_context::BuildAttrCoercionContext;
use crate::attrs::configuration_context::AttrConfigurationContext;

pub(crate) fn coercion_ctx() -> BuildAttrCoercionContext {
    BuildAttrCoercionContext::new("root//some/package".to_owned())
}

struct TestConfigurationContext {
    cfg: Configuration,
    exec_cfg: Configuration,
}

impl AttrConfigurationContext for TestConfigurationContext {
    fn cfg(&self) -> &Configuration {
        &self.cfg
    }

    fn exec_cfg(&self) -> &Configuration {
        &self.exec_cfg
    }
}

pub(crate) fn configuration_ctx() -> impl AttrConfigurationContext {
    TestConfigurationContext {
        cfg: Configuration::new("linux-x86_64"),
        exec_cfg: Configuration::new("exec-linux-x86_64"),
    }
}
