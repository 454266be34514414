/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is licensed under both the MIT license found in the
 * LICENSE-MIT file in the root directory of this source tree and the Apache
 * License, Version 2.0 found in the LICENSE-APACHE file in the root directory
 * of this source tree.
 */

use buildattr_core::target::TargetLabel;

/// The context for attribute coercion. Mostly just contains information about
/// the current package (to support things like parsing targets from strings).
pub trait AttrCoercionContext {
    /// Attempt to convert a string into a target label.
    fn coerce_target(&self, value: &str) -> anyhow::Result<TargetLabel>;
}

/// Coercion context for processing one build file: resolves package-relative
/// labels (`:name`) against the package the build file belongs to.
pub struct BuildAttrCoercionContext {
    /// The enclosing package in canonical `cell//package` form.
    package: String,
}

impl BuildAttrCoercionContext {
    pub fn new(package: String) -> BuildAttrCoercionContext {
        BuildAttrCoercionContext { package }
    }
}

impl AttrCoercionContext for BuildAttrCoercionContext {
    fn coerce_target(&self, value: &str) -> anyhow::Result<TargetLabel> {
        if let Some(name) = value.strip_prefix(':') {
            return TargetLabel::parse(&format!("{}:{}", self.package, name));
        }
        TargetLabel::parse(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_labels_resolve_against_the_package() {
        let ctx = BuildAttrCoercionContext::new("root//some/package".to_owned());
        assert_eq!(
            "root//some/package:lib",
            ctx.coerce_target(":lib").unwrap().as_str()
        );
        assert_eq!("other//x:y", ctx.coerce_target("other//x:y").unwrap().as_str());
        assert!(ctx.coerce_target("not a label").is_err());
    }
}
