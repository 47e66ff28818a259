//! # Lifecycle Thresholds & Policy Rendering
//!
//! Desired-state configuration for a managed lifecycle policy and the
//! rendering of that configuration into the document shape the
//! cluster's `_ilm/policy` API stores:
//!
//! ```json
//! {"policy":{"phases":{
//!     "hot":{"actions":{"rollover":{"max_size":"300gb","max_age":"30d"}}},
//!     "delete":{"min_age":"90d","actions":{"delete":{}}}
//! }}}
//! ```
//!
//! A zero threshold means "omit": zero rollover size or age drops that
//! rollover trigger, and a zero delete age drops the delete phase
//! entirely. Rollover size and age are independent triggers — the
//! cluster fires on whichever is exceeded first.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Suffix appended to a resource name to derive its policy name.
const POLICY_SUFFIX: &str = "ilm-policy";

/// Default rollover size threshold in gigabytes.
const DEFAULT_ROLLOVER_SIZE_GB: u64 = 300;

/// Default rollover age threshold in days.
const DEFAULT_ROLLOVER_AGE_DAYS: u64 = 30;

/// Default retention before index deletion, in days.
const DEFAULT_DELETE_AGE_DAYS: u64 = 90;

/// Desired rollover and retention thresholds for a lifecycle policy.
///
/// A zero value omits the corresponding trigger or phase from the
/// rendered document. Defaults are 300gb / 30d rollover with 90d
/// retention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifecycleThresholds {
    /// Rollover when the active index reaches this many gigabytes.
    /// Zero disables the size trigger.
    #[serde(default = "default_rollover_size_gb")]
    pub rollover_size_gb: u64,
    /// Rollover when the active index reaches this age in days.
    /// Zero disables the age trigger.
    #[serde(default = "default_rollover_age_days")]
    pub rollover_age_days: u64,
    /// Delete indices older than this many days. Zero disables the
    /// delete phase.
    #[serde(default = "default_delete_age_days")]
    pub delete_age_days: u64,
}

fn default_rollover_size_gb() -> u64 {
    DEFAULT_ROLLOVER_SIZE_GB
}

fn default_rollover_age_days() -> u64 {
    DEFAULT_ROLLOVER_AGE_DAYS
}

fn default_delete_age_days() -> u64 {
    DEFAULT_DELETE_AGE_DAYS
}

impl Default for LifecycleThresholds {
    fn default() -> Self {
        Self {
            rollover_size_gb: DEFAULT_ROLLOVER_SIZE_GB,
            rollover_age_days: DEFAULT_ROLLOVER_AGE_DAYS,
            delete_age_days: DEFAULT_DELETE_AGE_DAYS,
        }
    }
}

/// Derive the lifecycle policy name for a logical resource name.
///
/// `lifecycle_policy_name("logs-default")` is
/// `"logs-default-ilm-policy"`.
pub fn lifecycle_policy_name(resource: &str) -> String {
    format!("{resource}-{POLICY_SUFFIX}")
}

/// Format a size threshold as the cluster expects it, e.g. `"300gb"`.
pub fn render_size(gigabytes: u64) -> String {
    format!("{gigabytes}gb")
}

/// Format an age threshold as the cluster expects it, e.g. `"30d"`.
pub fn render_days(days: u64) -> String {
    format!("{days}d")
}

/// Render the full policy document for the given thresholds.
///
/// Always produces `{"policy":{"phases":{...}}}`; the hot and delete
/// phases appear only when their thresholds are non-zero. The `delete`
/// action is an empty marker object — enabled, no extra parameters.
pub fn render_policy(thresholds: &LifecycleThresholds) -> Value {
    let mut doc = json!({ "policy": { "phases": {} } });

    // render_policy builds the base object itself, so these indexes
    // cannot miss.
    let phases = &mut doc["policy"]["phases"];

    if thresholds.rollover_size_gb != 0 || thresholds.rollover_age_days != 0 {
        let mut rollover = serde_json::Map::new();
        if thresholds.rollover_size_gb != 0 {
            rollover.insert(
                "max_size".to_string(),
                Value::String(render_size(thresholds.rollover_size_gb)),
            );
        }
        if thresholds.rollover_age_days != 0 {
            rollover.insert(
                "max_age".to_string(),
                Value::String(render_days(thresholds.rollover_age_days)),
            );
        }
        phases["hot"] = json!({ "actions": { "rollover": rollover } });
    }

    if thresholds.delete_age_days != 0 {
        phases["delete"] = json!({
            "min_age": render_days(thresholds.delete_age_days),
            "actions": { "delete": {} }
        });
    }

    doc
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::DocView;

    fn phases(doc: &Value) -> DocView<'_> {
        DocView::root(doc).get_map("policy").get_map("phases")
    }

    // -- name derivation --------------------------------------------------------

    #[test]
    fn policy_name_appends_suffix() {
        assert_eq!(
            lifecycle_policy_name("logs-default"),
            "logs-default-ilm-policy"
        );
    }

    // -- formatting helpers -----------------------------------------------------

    #[test]
    fn size_and_age_formatting() {
        assert_eq!(render_size(300), "300gb");
        assert_eq!(render_days(30), "30d");
        assert_eq!(render_size(0), "0gb");
        assert_eq!(render_days(0), "0d");
    }

    // -- rendering --------------------------------------------------------------

    #[test]
    fn default_thresholds_render_all_phases() {
        let doc = render_policy(&LifecycleThresholds::default());
        let phases = phases(&doc);
        let rollover = phases.get_map("hot").get_map("actions").get_map("rollover");

        assert_eq!(rollover.get_str("max_size"), "300gb");
        assert_eq!(rollover.get_str("max_age"), "30d");
        assert_eq!(phases.get_map("delete").get_str("min_age"), "90d");
        assert!(!phases
            .get_map("delete")
            .get_map("actions")
            .get_map("delete")
            .is_empty());
    }

    #[test]
    fn all_zero_thresholds_render_empty_phases() {
        let doc = render_policy(&LifecycleThresholds {
            rollover_size_gb: 0,
            rollover_age_days: 0,
            delete_age_days: 0,
        });
        let phases = phases(&doc);

        assert!(phases.get_map("hot").is_empty());
        assert!(phases.get_map("delete").is_empty());
        assert_eq!(
            phases
                .get_map("hot")
                .get_map("actions")
                .get_map("rollover")
                .get_str("max_size"),
            ""
        );
        assert_eq!(phases.get_map("delete").get_str("min_age"), "");
    }

    #[test]
    fn zero_size_omits_only_the_size_trigger() {
        let doc = render_policy(&LifecycleThresholds {
            rollover_size_gb: 0,
            rollover_age_days: 7,
            delete_age_days: 0,
        });
        let rollover = phases(&doc)
            .get_map("hot")
            .get_map("actions")
            .get_map("rollover");

        assert_eq!(rollover.get_str("max_size"), "");
        assert_eq!(rollover.get_str("max_age"), "7d");
        assert!(phases(&doc).get_map("delete").is_empty());
    }

    #[test]
    fn zero_age_omits_only_the_age_trigger() {
        let doc = render_policy(&LifecycleThresholds {
            rollover_size_gb: 50,
            rollover_age_days: 0,
            delete_age_days: 0,
        });
        let rollover = phases(&doc)
            .get_map("hot")
            .get_map("actions")
            .get_map("rollover");

        assert_eq!(rollover.get_str("max_size"), "50gb");
        assert_eq!(rollover.get_str("max_age"), "");
    }

    #[test]
    fn delete_phase_only_when_delete_age_set() {
        let doc = render_policy(&LifecycleThresholds {
            rollover_size_gb: 0,
            rollover_age_days: 0,
            delete_age_days: 14,
        });
        let phases = phases(&doc);

        assert!(phases.get_map("hot").is_empty());
        assert_eq!(phases.get_map("delete").get_str("min_age"), "14d");
    }

    #[test]
    fn render_round_trips_through_accessor() {
        let thresholds = LifecycleThresholds {
            rollover_size_gb: 128,
            rollover_age_days: 45,
            delete_age_days: 365,
        };
        let doc = render_policy(&thresholds);
        let phases = phases(&doc);
        let rollover = phases.get_map("hot").get_map("actions").get_map("rollover");

        assert_eq!(
            rollover.get_str("max_size"),
            render_size(thresholds.rollover_size_gb)
        );
        assert_eq!(
            rollover.get_str("max_age"),
            render_days(thresholds.rollover_age_days)
        );
        assert_eq!(
            phases.get_map("delete").get_str("min_age"),
            render_days(thresholds.delete_age_days)
        );
    }

    // -- serde ------------------------------------------------------------------

    #[test]
    fn thresholds_deserialize_with_defaults() {
        let thresholds: LifecycleThresholds = serde_json::from_str("{}").expect("deserialize");
        assert_eq!(thresholds, LifecycleThresholds::default());
    }

    #[test]
    fn thresholds_deserialize_partial_override() {
        let thresholds: LifecycleThresholds =
            serde_json::from_str(r#"{"delete_age_days": 7}"#).expect("deserialize");
        assert_eq!(thresholds.rollover_size_gb, 300);
        assert_eq!(thresholds.rollover_age_days, 30);
        assert_eq!(thresholds.delete_age_days, 7);
    }
}
