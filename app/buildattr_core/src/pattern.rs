/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is licensed under both the MIT license found in the
 * LICENSE-MIT file in the root directory of this source tree and the Apache
 * License, Version 2.0 found in the LICENSE-APACHE file in the root directory
 * of this source tree.
 */

use std::cmp::Ordering;
use std::fmt;
use std::fmt::Display;
use std::hash::Hash;
use std::hash::Hasher;
use std::sync::Arc;

use allocative::Allocative;
use dupe::Dupe;
use regex::Regex;

/// Wrapper for `regex::Regex` used in coerced attribute values.
///
/// Equality, ordering and hashing are by the source pattern string, so two
/// independently compiled copies of the same pattern compare equal and a
/// coerced value containing one can sit in a hashed collection.
#[derive(Clone, Dupe, Debug, Allocative)]
pub struct BuildRegex(
    // Regex can hold a lot of cache, but it is not visible to allocative.
    #[allocative(skip)] Arc<Regex>,
);

impl BuildRegex {
    pub fn new(pattern: &str) -> Result<BuildRegex, regex::Error> {
        Ok(BuildRegex(Arc::new(Regex::new(pattern)?)))
    }

    /// The source pattern this regex was compiled from.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.0.is_match(text)
    }
}

impl Display for BuildRegex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "regex({:?})", self.as_str())
    }
}

impl PartialEq for BuildRegex {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for BuildRegex {}

impl PartialOrd for BuildRegex {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for BuildRegex {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_str().cmp(other.as_str())
    }
}

impl Hash for BuildRegex {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::Hash;
    use std::hash::Hasher;

    use super::*;

    fn hash_of(regex: &BuildRegex) -> u64 {
        let mut hasher = DefaultHasher::new();
        regex.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn equality_and_hash_are_by_source_pattern() {
        let a = BuildRegex::new("^exported_.*").unwrap();
        let b = BuildRegex::new("^exported_.*").unwrap();
        let c = BuildRegex::new("^internal_.*").unwrap();
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
        assert_ne!(a, c);
    }

    #[test]
    fn invalid_pattern_is_rejected() {
        assert!(BuildRegex::new("(unclosed").is_err());
    }

    #[test]
    fn display_echoes_source() {
        let regex = BuildRegex::new("^exported_.*").unwrap();
        assert_eq!("regex(\"^exported_.*\")", regex.to_string());
        assert!(regex.is_match("exported_headers"));
        assert!(!regex.is_match("private_headers"));
    }
}
