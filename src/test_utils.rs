//! Test utilities for property-based testing
//!
//! This module provides generators and helpers for proptest.

#[cfg(test)]
pub mod generators {
    use proptest::prelude::*;

    /// Generate a dotted group id (e.g., "com.example")
    pub fn group_id() -> impl Strategy<Value = String> {
        "[a-z]{2,6}(\\.[a-z]{2,8}){1,3}"
    }

    /// Generate an artifact name (lowercase alphanumeric with hyphens)
    pub fn artifact_name() -> impl Strategy<Value = String> {
        "[a-z][a-z0-9-]{0,20}[a-z0-9]"
    }

    /// Generate a version, sometimes with a SNAPSHOT qualifier
    pub fn version() -> impl Strategy<Value = String> {
        (0u32..20, 0u32..20, 0u32..20, prop::bool::ANY).prop_map(
            |(major, minor, patch, snapshot)| {
                if snapshot {
                    format!("{major}.{minor}.{patch}-SNAPSHOT")
                } else {
                    format!("{major}.{minor}.{patch}")
                }
            },
        )
    }

    /// Generate a Maven scope
    pub fn phase() -> impl Strategy<Value = String> {
        prop_oneof![
            Just("compile".to_string()),
            Just("test".to_string()),
            Just("runtime".to_string()),
            Just("provided".to_string()),
        ]
    }

    /// Generate a random acyclic repository layout.
    ///
    /// Repository `i` produces artifact `art<i>` and may only depend on
    /// artifacts of repositories with a smaller index.
    pub fn acyclic_layout() -> impl Strategy<Value = Vec<Vec<usize>>> {
        (1usize..12).prop_flat_map(|count| {
            (0..count)
                .map(|i| {
                    if i == 0 {
                        Just(Vec::new()).boxed()
                    } else {
                        prop::collection::vec(0..i, 0..=i.min(3)).boxed()
                    }
                })
                .collect::<Vec<_>>()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::generators::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_group_id_has_no_separators(group in group_id()) {
            prop_assert!(!group.contains(':'));
            prop_assert!(!group.contains('-'));
        }

        #[test]
        fn prop_layout_only_points_backwards(layout in acyclic_layout()) {
            for (i, deps) in layout.iter().enumerate() {
                prop_assert!(deps.iter().all(|d| *d < i));
            }
        }
    }
}
