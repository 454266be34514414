/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is licensed under both the MIT license found in the
 * LICENSE-MIT file in the root directory of this source tree and the Apache
 * License, Version 2.0 found in the LICENSE-APACHE file in the root directory
 * of this source tree.
 */

//! This module provides support for implementing and consuming attribute
//! coercers.
//!
//! Attribute values are present in 3 different states:
//!   1. raw literal - the loosely-typed value written in the build file
//!      (a string, a tuple, a list).
//!   2. coerced (unconfigured) value - the value captured after processing
//!      the build file. At this point the shape has been checked (arity,
//!      element types) and simple conversions done (target strings parsed to
//!      labels, filter strings compiled to regexes). This happens while the
//!      build file is processed, so it has no access to configurations.
//!   3. configured value - (2) with a specific configuration attached to
//!      every configuration-dependent field. For a link group mapping target
//!      only the build target is configuration-dependent; the traversal mode
//!      and label filter pass through unchanged.
//!
//! Coercion never recovers locally from malformed input: every failure
//! surfaces with the offending literal attached so the build-file author sees
//! exactly what they wrote.

pub mod attr_type;
pub mod coerce;
pub mod coercion_context;
pub mod coercion_error;
pub mod configuration_context;
pub mod configured_traversal;
pub mod raw_value;
pub mod traversal;

#[cfg(test)]
pub(crate) mod testing;
