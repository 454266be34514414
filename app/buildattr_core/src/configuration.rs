/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is licensed under both the MIT license found in the
 * LICENSE-MIT file in the root directory of this source tree and the Apache
 * License, Version 2.0 found in the LICENSE-APACHE file in the root directory
 * of this source tree.
 */

use std::fmt;
use std::fmt::Display;
use std::sync::Arc;

use allocative::Allocative;
use dupe::Dupe;

/// An opaque handle to a target configuration (e.g. a resolved platform).
///
/// The attribute layer never inspects a configuration; it only attaches one
/// to target labels during the configure phase. Configurations are interned
/// per invocation by whoever resolves them, so cloning is cheap.
#[derive(Clone, Dupe, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, Allocative)]
pub struct Configuration(Arc<str>);

impl Configuration {
    pub fn new(label: &str) -> Configuration {
        Configuration(Arc::from(label))
    }

    pub fn label(&self) -> &str {
        &self.0
    }
}

impl Display for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configuration_equality_is_by_label() {
        assert_eq!(Configuration::new("linux-x86_64"), Configuration::new("linux-x86_64"));
        assert_ne!(Configuration::new("linux-x86_64"), Configuration::new("macos-arm64"));
    }
}
