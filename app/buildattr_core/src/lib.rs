/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is licensed under both the MIT license found in the
 * LICENSE-MIT file in the root directory of this source tree and the Apache
 * License, Version 2.0 found in the LICENSE-APACHE file in the root directory
 * of this source tree.
 */

//! Core value types for the attribute coercion layer: build target labels
//! (configured and unconfigured), configurations, and compiled label regexes.
//! Everything here is immutable, cheaply clonable and free of coercion logic.

pub mod configuration;
pub mod pattern;
pub mod target;
