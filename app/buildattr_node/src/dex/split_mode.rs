/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is licensed under both the MIT license found in the
 * LICENSE-MIT file in the root directory of this source tree and the Apache
 * License, Version 2.0 found in the LICENSE-APACHE file in the root directory
 * of this source tree.
 */

use std::collections::BTreeSet;

use allocative::Allocative;
use dupe::Dupe;

/// When splitting, how greedily to fill the primary dex.
#[derive(Debug, Clone, Dupe, Copy, Eq, PartialEq, Hash, Allocative)]
pub enum DexSplitStrategy {
    MinimizePrimaryDexSize,
    MaximizePrimaryDexSize,
}

/// Container format for secondary dex files.
#[derive(Debug, Clone, Dupe, Copy, Eq, PartialEq, Hash, Allocative)]
pub enum DexStore {
    Jar,
    Raw,
    Xz,
}

/// Bundles together some information about whether and how we should split up
/// dex files. A plain immutable record; the splitting algorithm lives with
/// the rules that consume it.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Allocative)]
pub struct DexSplitMode {
    pub should_split_dex: bool,
    pub dex_split_strategy: DexSplitStrategy,
    pub dex_store: DexStore,
    pub linear_alloc_hard_limit: u64,
    /// Non-predexed builds count method and field refs to split secondary
    /// dexes when exactly 64k refs are reached. The buffer leaves extra ref
    /// space to absorb differences between our ref counting and d8's.
    pub method_ref_count_buffer_space: u64,
    /// See `method_ref_count_buffer_space`.
    pub field_ref_count_buffer_space: u64,
    /// Maximum number of pre-dexed libraries per dex group rule. Zero means
    /// no limit, producing a single dex group per APK module.
    pub dex_group_lib_limit: u32,
    /// Substrings that, when matched, place individual input class or
    /// resource files into the primary dex. Required for correctness.
    pub primary_dex_patterns: BTreeSet<String>,
    /// File listing class files used in scenarios that should land in the
    /// primary dex along with the dependencies needed for preverification.
    /// Entries match JAR paths without the `.class` suffix, for example
    /// `java/util/Map$Entry`. Used for performance, not correctness.
    pub primary_dex_scenario_file: Option<String>,
    /// Whether the build may proceed on a best-effort basis when the scenario
    /// classes and their dependencies do not fit in the primary dex.
    pub is_primary_dex_scenario_overflow_allowed: bool,
    /// File whitelisting the class files placed in the first secondary
    /// dexes. Same entry format as the scenario file.
    pub secondary_dex_head_classes_file: Option<String>,
    /// Whether dex splitting may move R classes into secondary dex files.
    pub allow_r_dot_java_in_secondary_dex: bool,
}

impl DexSplitMode {
    /// By default, assume we have 5MB of linear alloc, 1MB of which is taken
    /// up by the framework, so that leaves 4MB.
    pub const DEFAULT_LINEAR_ALLOC_HARD_LIMIT: u64 = 4 * 1024 * 1024;

    pub const DEFAULT_DEX_GROUP_LIB_LIMIT: u32 = 0;

    pub const NO_SPLIT: DexSplitMode = DexSplitMode {
        should_split_dex: false,
        dex_split_strategy: DexSplitStrategy::MaximizePrimaryDexSize,
        dex_store: DexStore::Jar,
        linear_alloc_hard_limit: 0,
        method_ref_count_buffer_space: 0,
        field_ref_count_buffer_space: 0,
        dex_group_lib_limit: 0,
        primary_dex_patterns: BTreeSet::new(),
        primary_dex_scenario_file: None,
        is_primary_dex_scenario_overflow_allowed: false,
        secondary_dex_head_classes_file: None,
        allow_r_dot_java_in_secondary_dex: false,
    };

    /// The split strategy, meaningful only when splitting is enabled.
    pub fn split_strategy(&self) -> Option<DexSplitStrategy> {
        if self.should_split_dex {
            Some(self.dex_split_strategy)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_split_is_inert() {
        let mode = DexSplitMode::NO_SPLIT;
        assert!(!mode.should_split_dex);
        assert_eq!(None, mode.split_strategy());
        assert_eq!(0, mode.linear_alloc_hard_limit);
        assert!(mode.primary_dex_patterns.is_empty());
        assert_eq!(None, mode.primary_dex_scenario_file);
    }

    #[test]
    fn split_strategy_is_exposed_when_splitting() {
        let mode = DexSplitMode {
            should_split_dex: true,
            dex_split_strategy: DexSplitStrategy::MinimizePrimaryDexSize,
            linear_alloc_hard_limit: DexSplitMode::DEFAULT_LINEAR_ALLOC_HARD_LIMIT,
            ..DexSplitMode::NO_SPLIT
        };
        assert_eq!(Some(DexSplitStrategy::MinimizePrimaryDexSize), mode.split_strategy());
        assert_eq!(4 * 1024 * 1024, mode.linear_alloc_hard_limit);
    }
}
