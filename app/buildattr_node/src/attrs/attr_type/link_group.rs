/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is licensed under both the MIT license found in the
 * LICENSE-MIT file in the root directory of this source tree and the Apache
 * License, Version 2.0 found in the LICENSE-APACHE file in the root directory
 * of this source tree.
 */

//! Coercion for link group mappings.
//!
//! A single mapping target is written in the build file as a tuple of a
//! build target and a traversal mode, optionally followed by a label filter:
//! `("//foo:bar", "tree")` or `("//foo:bar", "tree", "label:^exported_.*")`.
//! A link group pairs a group name with a list of such mapping targets.

use std::any::TypeId;
use std::fmt;
use std::fmt::Display;

use allocative::Allocative;
use buildattr_core::pattern::BuildRegex;
use buildattr_core::target::ConfiguredTargetLabel;
use buildattr_core::target::TargetLabel;
use dupe::Dupe;

use crate::attrs::attr_type::build_target::BuildTargetTypeCoercer;
use crate::attrs::attr_type::enumeration::LinkGroupTraversalTypeCoercer;
use crate::attrs::attr_type::list::ListTypeCoercer;
use crate::attrs::attr_type::pattern::PatternTypeCoercer;
use crate::attrs::attr_type::string::StringTypeCoercer;
use crate::attrs::coerce::TypeCoercer;
use crate::attrs::coercion_context::AttrCoercionContext;
use crate::attrs::coercion_error::CoercionError;
use crate::attrs::configuration_context::AttrConfigurationContext;
use crate::attrs::configured_traversal::ConfiguredAttrTraversal;
use crate::attrs::raw_value::RawValue;
use crate::attrs::traversal::CoercedAttrTraversal;

const LABEL_REGEX_PREFIX: &str = "label:";

const MAPPING_TARGET_TYPE: &str = "link_group_mapping_target";
const MAPPING_TYPE: &str = "link_group_mapping";

/// How a link group gathers members starting from a mapping target.
#[derive(
    derive_more::Display, Debug, Clone, Dupe, Copy, Eq, PartialEq, Hash, Allocative
)]
pub enum LinkGroupMappingTraversal {
    /// The target and its whole transitive subtree.
    #[display(fmt = "tree")]
    Tree,
    /// The target only.
    #[display(fmt = "node")]
    Node,
}

/// Configured or unconfigured.
pub trait LinkGroupMaybeConfigured: Allocative {
    fn to_json(&self) -> anyhow::Result<serde_json::Value>;
    fn any_matches(&self, filter: &dyn Fn(&str) -> anyhow::Result<bool>) -> anyhow::Result<bool>;
}

/// One link group mapping target before a configuration is known. Immutable
/// once constructed: the target is always valid and the filter, when present,
/// is a successfully compiled pattern, never a raw string.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Allocative)]
pub struct UnconfiguredLinkGroupMappingTarget {
    pub target: TargetLabel,
    pub traversal: LinkGroupMappingTraversal,
    pub label_pattern: Option<BuildRegex>,
}

/// One link group mapping target bound to a configuration. Same shape as the
/// unconfigured form; only the target is configuration-dependent.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Allocative)]
pub struct LinkGroupMappingTarget {
    pub target: ConfiguredTargetLabel,
    pub traversal: LinkGroupMappingTraversal,
    pub label_pattern: Option<BuildRegex>,
}

fn fmt_mapping_target(
    f: &mut fmt::Formatter<'_>,
    target: &dyn Display,
    traversal: LinkGroupMappingTraversal,
    label_pattern: Option<&BuildRegex>,
) -> fmt::Result {
    write!(f, "(\"{}\", \"{}\"", target, traversal)?;
    if let Some(pattern) = label_pattern {
        write!(f, ", \"{}{}\"", LABEL_REGEX_PREFIX, pattern.as_str())?;
    }
    write!(f, ")")
}

impl Display for UnconfiguredLinkGroupMappingTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_mapping_target(f, &self.target, self.traversal, self.label_pattern.as_ref())
    }
}

impl Display for LinkGroupMappingTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_mapping_target(f, &self.target, self.traversal, self.label_pattern.as_ref())
    }
}

fn mapping_target_json(
    target: String,
    traversal: LinkGroupMappingTraversal,
    label_pattern: Option<&BuildRegex>,
) -> serde_json::Value {
    let mut map = serde_json::Map::new();
    map.insert("target".to_owned(), serde_json::Value::String(target));
    map.insert(
        "traversal".to_owned(),
        serde_json::Value::String(traversal.to_string()),
    );
    if let Some(pattern) = label_pattern {
        map.insert(
            "label_filter".to_owned(),
            serde_json::Value::String(pattern.as_str().to_owned()),
        );
    }
    serde_json::Value::Object(map)
}

impl LinkGroupMaybeConfigured for UnconfiguredLinkGroupMappingTarget {
    fn to_json(&self) -> anyhow::Result<serde_json::Value> {
        Ok(mapping_target_json(
            self.target.to_string(),
            self.traversal,
            self.label_pattern.as_ref(),
        ))
    }

    fn any_matches(&self, filter: &dyn Fn(&str) -> anyhow::Result<bool>) -> anyhow::Result<bool> {
        Ok(filter(self.target.as_str())?
            || filter(&self.traversal.to_string())?
            || match &self.label_pattern {
                Some(pattern) => filter(pattern.as_str())?,
                None => false,
            })
    }
}

impl LinkGroupMaybeConfigured for LinkGroupMappingTarget {
    fn to_json(&self) -> anyhow::Result<serde_json::Value> {
        Ok(mapping_target_json(
            self.target.to_string(),
            self.traversal,
            self.label_pattern.as_ref(),
        ))
    }

    fn any_matches(&self, filter: &dyn Fn(&str) -> anyhow::Result<bool>) -> anyhow::Result<bool> {
        Ok(filter(&self.target.to_string())?
            || filter(&self.traversal.to_string())?
            || match &self.label_pattern {
                Some(pattern) => filter(pattern.as_str())?,
                None => false,
            })
    }
}

/// A named link group and the mapping targets that populate it, before a
/// configuration is known.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Allocative)]
pub struct UnconfiguredLinkGroupMapping {
    pub name: String,
    pub targets: Vec<UnconfiguredLinkGroupMappingTarget>,
}

/// A named link group and the mapping targets that populate it.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Allocative)]
pub struct LinkGroupMapping {
    pub name: String,
    pub targets: Vec<LinkGroupMappingTarget>,
}

fn mapping_json(
    name: &str,
    targets: anyhow::Result<Vec<serde_json::Value>>,
) -> anyhow::Result<serde_json::Value> {
    let mut map = serde_json::Map::new();
    map.insert("name".to_owned(), serde_json::Value::String(name.to_owned()));
    map.insert("targets".to_owned(), serde_json::Value::Array(targets?));
    Ok(serde_json::Value::Object(map))
}

impl LinkGroupMaybeConfigured for UnconfiguredLinkGroupMapping {
    fn to_json(&self) -> anyhow::Result<serde_json::Value> {
        mapping_json(&self.name, self.targets.iter().map(|t| t.to_json()).collect())
    }

    fn any_matches(&self, filter: &dyn Fn(&str) -> anyhow::Result<bool>) -> anyhow::Result<bool> {
        if filter(&self.name)? {
            return Ok(true);
        }
        for target in &self.targets {
            if target.any_matches(filter)? {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

impl LinkGroupMaybeConfigured for LinkGroupMapping {
    fn to_json(&self) -> anyhow::Result<serde_json::Value> {
        mapping_json(&self.name, self.targets.iter().map(|t| t.to_json()).collect())
    }

    fn any_matches(&self, filter: &dyn Fn(&str) -> anyhow::Result<bool>) -> anyhow::Result<bool> {
        if filter(&self.name)? {
            return Ok(true);
        }
        for target in &self.targets {
            if target.any_matches(filter)? {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

/// Coercer for a single link group mapping target literal.
///
/// Owns the arity check (2 or 3 elements), the `label:` prefix handling for
/// the optional filter, and delegation to the build target, traversal and
/// pattern sub-coercers.
#[derive(Debug, Default)]
pub struct LinkGroupMappingTargetCoercer {
    build_target: BuildTargetTypeCoercer,
    traversal: LinkGroupTraversalTypeCoercer,
    pattern: PatternTypeCoercer,
}

impl LinkGroupMappingTargetCoercer {
    pub fn new() -> Self {
        Self::default()
    }

    fn extract_label_pattern(&self, value: &RawValue) -> anyhow::Result<BuildRegex> {
        let filter = value.unpack_str().ok_or_else(|| {
            CoercionError::wrong_element_type(
                value,
                MAPPING_TARGET_TYPE,
                "third element should be a label regex filter",
            )
        })?;
        let pattern = filter.strip_prefix(LABEL_REGEX_PREFIX).ok_or_else(|| {
            CoercionError::missing_prefix(value, MAPPING_TARGET_TYPE, LABEL_REGEX_PREFIX)
        })?;
        self.pattern.coerce_str(pattern)
    }
}

impl TypeCoercer for LinkGroupMappingTargetCoercer {
    type Unconfigured = UnconfiguredLinkGroupMappingTarget;
    type Configured = LinkGroupMappingTarget;

    fn coerce_unconfigured(
        &self,
        ctx: &dyn AttrCoercionContext,
        value: &RawValue,
    ) -> anyhow::Result<UnconfiguredLinkGroupMappingTarget> {
        let items = match value.unpack_list() {
            Some(items) if (2..=3).contains(&items.len()) => items,
            _ => {
                return Err(CoercionError::shape(
                    value,
                    MAPPING_TARGET_TYPE,
                    "input should be pair of a build target and traversal, \
                     optionally with a label filter",
                )
                .into());
            }
        };
        let target = self
            .build_target
            .coerce_unconfigured(ctx, &items[0])
            .map_err(|e| CoercionError::delegated(0, MAPPING_TARGET_TYPE, e))?;
        let traversal = self
            .traversal
            .coerce_unconfigured(ctx, &items[1])
            .map_err(|e| CoercionError::delegated(1, MAPPING_TARGET_TYPE, e))?;
        let label_pattern = match items.get(2) {
            Some(filter) => Some(self.extract_label_pattern(filter)?),
            None => None,
        };
        Ok(UnconfiguredLinkGroupMappingTarget {
            target,
            traversal,
            label_pattern,
        })
    }

    fn configure(
        &self,
        ctx: &dyn AttrConfigurationContext,
        value: &UnconfiguredLinkGroupMappingTarget,
    ) -> anyhow::Result<LinkGroupMappingTarget> {
        // Only the target is configuration-dependent.
        Ok(LinkGroupMappingTarget {
            target: self.build_target.configure(ctx, &value.target)?,
            traversal: value.traversal,
            label_pattern: value.label_pattern.dupe(),
        })
    }

    fn has_element_class(&self, classes: &[TypeId]) -> bool {
        self.build_target.has_element_class(classes) || self.traversal.has_element_class(classes)
    }

    fn traverse<'a>(
        &self,
        value: &'a UnconfiguredLinkGroupMappingTarget,
        traversal: &mut dyn CoercedAttrTraversal<'a>,
    ) -> anyhow::Result<()> {
        // Target first, then traversal mode. Dependency collectors rely on
        // this order; the label pattern is never visited.
        self.build_target.traverse(&value.target, traversal)?;
        self.traversal.traverse(&value.traversal, traversal)
    }

    fn traverse_configured(
        &self,
        value: &LinkGroupMappingTarget,
        traversal: &mut dyn ConfiguredAttrTraversal,
    ) -> anyhow::Result<()> {
        self.build_target.traverse_configured(&value.target, traversal)?;
        self.traversal.traverse_configured(&value.traversal, traversal)
    }
}

/// Coercer for a whole link group mapping: a pair of a group name and a list
/// of mapping targets, e.g. `("shared_libs", [("//foo:bar", "tree")])`.
#[derive(Debug, Default)]
pub struct LinkGroupMappingCoercer {
    name: StringTypeCoercer,
    targets: ListTypeCoercer<LinkGroupMappingTargetCoercer>,
}

impl LinkGroupMappingCoercer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TypeCoercer for LinkGroupMappingCoercer {
    type Unconfigured = UnconfiguredLinkGroupMapping;
    type Configured = LinkGroupMapping;

    fn coerce_unconfigured(
        &self,
        ctx: &dyn AttrCoercionContext,
        value: &RawValue,
    ) -> anyhow::Result<UnconfiguredLinkGroupMapping> {
        let items = match value.unpack_list() {
            Some(items) if items.len() == 2 => items,
            _ => {
                return Err(CoercionError::shape(
                    value,
                    MAPPING_TYPE,
                    "input should be pair of a link group name and a list of mapping targets",
                )
                .into());
            }
        };
        let name = self
            .name
            .coerce_unconfigured(ctx, &items[0])
            .map_err(|e| CoercionError::delegated(0, MAPPING_TYPE, e))?;
        let targets = self
            .targets
            .coerce_unconfigured(ctx, &items[1])
            .map_err(|e| CoercionError::delegated(1, MAPPING_TYPE, e))?;
        Ok(UnconfiguredLinkGroupMapping { name, targets })
    }

    fn configure(
        &self,
        ctx: &dyn AttrConfigurationContext,
        value: &UnconfiguredLinkGroupMapping,
    ) -> anyhow::Result<LinkGroupMapping> {
        Ok(LinkGroupMapping {
            name: value.name.clone(),
            targets: self.targets.configure(ctx, &value.targets)?,
        })
    }

    fn has_element_class(&self, classes: &[TypeId]) -> bool {
        self.name.has_element_class(classes) || self.targets.has_element_class(classes)
    }

    fn traverse<'a>(
        &self,
        value: &'a UnconfiguredLinkGroupMapping,
        traversal: &mut dyn CoercedAttrTraversal<'a>,
    ) -> anyhow::Result<()> {
        self.targets.traverse(&value.targets, traversal)
    }

    fn traverse_configured(
        &self,
        value: &LinkGroupMapping,
        traversal: &mut dyn ConfiguredAttrTraversal,
    ) -> anyhow::Result<()> {
        self.targets.traverse_configured(&value.targets, traversal)
    }
}
