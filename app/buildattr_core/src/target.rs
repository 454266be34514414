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
use serde::Serialize;
use serde::Serializer;

use crate::configuration::Configuration;

#[derive(Debug, thiserror::Error)]
enum TargetLabelError {
    #[error("Invalid target label `{0}`: expected `cell//package:name`")]
    MissingRootSeparator(String),
    #[error("Invalid target label `{0}`: expected `:` separating package and target name")]
    MissingNameSeparator(String),
    #[error("Invalid target label `{0}`: missing target name after `:`")]
    MissingTargetName(String),
    #[error("Invalid target label `{0}`: expected exactly one `:` in the package-relative part")]
    MalformedTargetName(String),
}

/// A label identifying an unconfigured target: `cell//package:name`.
///
/// This is the form produced by the coercion phase of attribute processing.
/// It carries no configuration; `configure` attaches one. Cell resolution
/// (mapping aliases to canonical cell names) is owned by the build-file
/// processing layer, so labels here are already canonical.
#[derive(Clone, Dupe, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, Allocative)]
pub struct TargetLabel(Arc<str>);

impl TargetLabel {
    /// Parse a canonical label of the form `cell//package:name`. The cell may
    /// be empty (`//foo:bar`), as may the package (`cell//:bar`).
    pub fn parse(label: &str) -> anyhow::Result<TargetLabel> {
        let (_cell, rest) = label
            .split_once("//")
            .ok_or_else(|| TargetLabelError::MissingRootSeparator(label.to_owned()))?;
        let (pkg, name) = rest
            .split_once(':')
            .ok_or_else(|| TargetLabelError::MissingNameSeparator(label.to_owned()))?;
        if name.is_empty() {
            return Err(TargetLabelError::MissingTargetName(label.to_owned()).into());
        }
        if pkg.contains("//") || name.contains(':') {
            return Err(TargetLabelError::MalformedTargetName(label.to_owned()).into());
        }
        Ok(TargetLabel(Arc::from(label)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The target name, the part after `:`.
    pub fn name(&self) -> &str {
        self.0.rsplit_once(':').map_or("", |(_, name)| name)
    }

    /// Attach a configuration, producing the configured form of this label.
    pub fn configure(&self, cfg: Configuration) -> ConfiguredTargetLabel {
        ConfiguredTargetLabel {
            target: self.dupe(),
            cfg,
        }
    }
}

impl Display for TargetLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for TargetLabel {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

/// A target label bound to a specific configuration.
#[derive(Clone, Dupe, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, Allocative)]
pub struct ConfiguredTargetLabel {
    target: TargetLabel,
    cfg: Configuration,
}

impl ConfiguredTargetLabel {
    pub fn unconfigured(&self) -> &TargetLabel {
        &self.target
    }

    pub fn cfg(&self) -> &Configuration {
        &self.cfg
    }
}

impl Display for ConfiguredTargetLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.target, self.cfg)
    }
}

impl Serialize for ConfiguredTargetLabel {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

pub mod testing {
    use super::TargetLabel;

    pub trait TargetLabelExt {
        /// Parse a label in tests, panicking on malformed input.
        fn testing_parse(label: &str) -> TargetLabel;
    }

    impl TargetLabelExt for TargetLabel {
        fn testing_parse(label: &str) -> TargetLabel {
            TargetLabel::parse(label).unwrap()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::TargetLabelExt;
    use super::*;

    #[test]
    fn parse_accepts_canonical_labels() {
        for label in ["cell//some/package:name", "//foo:bar", "root//:top"] {
            let parsed = TargetLabel::parse(label).unwrap();
            assert_eq!(label, parsed.as_str());
        }
        assert_eq!("bar", TargetLabel::testing_parse("//foo:bar").name());
    }

    #[test]
    fn parse_rejects_malformed_labels() {
        for label in ["foo:bar", "//foo", "//foo:", "//foo//bar:x", "//foo:bar:baz"] {
            assert!(TargetLabel::parse(label).is_err(), "expected failure for `{}`", label);
        }
    }

    #[test]
    fn parse_errors_name_the_missing_separator() {
        let err = TargetLabel::parse("foo:bar").unwrap_err();
        assert!(err.to_string().contains("expected `cell//package:name`"), "{}", err);

        let err = TargetLabel::parse("//foo").unwrap_err();
        assert!(
            err.to_string().contains("expected `:` separating package and target name"),
            "{}",
            err
        );
    }

    #[test]
    fn configure_attaches_configuration() {
        let label = TargetLabel::testing_parse("//foo:bar");
        let configured = label.configure(Configuration::new("linux-x86_64"));
        assert_eq!("//foo:bar (linux-x86_64)", configured.to_string());
        assert_eq!(&label, configured.unconfigured());
    }
}
