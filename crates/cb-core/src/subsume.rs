//! Rule subsumption
//!
//! Rule `a` is a superset of rule `b` when every request `b` matches is also
//! matched by `a` under the same action. Only subsumption through omitted
//! constraints is detected; patterns and constraint values are never
//! interpreted, so overlapping but different values count as incomparable.

use crate::types::{LoadTypeMask, ResourceTypeMask, Rule, Trigger};

/// Absent on `a` is always at least as permissive; present on `a` but absent
/// on `b` never is; otherwise `covers` decides.
fn optional_covers<T: ?Sized>(a: Option<&T>, b: Option<&T>, covers: impl FnOnce(&T, &T) -> bool) -> bool {
    match (a, b) {
        (None, _) => true,
        (Some(_), None) => false,
        (Some(a), Some(b)) => covers(a, b),
    }
}

pub fn resource_types_cover(a: &Trigger, b: &Trigger) -> bool {
    optional_covers(a.resource_types.as_deref(), b.resource_types.as_deref(), |a, b| {
        let a: ResourceTypeMask = a.iter().copied().collect();
        let b: ResourceTypeMask = b.iter().copied().collect();
        a.contains(b)
    })
}

pub fn load_types_cover(a: &Trigger, b: &Trigger) -> bool {
    optional_covers(a.load_types.as_deref(), b.load_types.as_deref(), |a, b| {
        let a: LoadTypeMask = a.iter().copied().collect();
        let b: LoadTypeMask = b.iter().copied().collect();
        a.contains(b)
    })
}

pub fn case_sensitivity_covers(a: &Trigger, b: &Trigger) -> bool {
    optional_covers(
        a.url_filter_case_sensitive.as_ref(),
        b.url_filter_case_sensitive.as_ref(),
        |a, b| a == b,
    )
}

pub fn url_selection_covers(a: &Trigger, b: &Trigger) -> bool {
    optional_covers(a.url_selection.as_ref(), b.url_selection.as_ref(), |a, b| a == b)
}

impl Trigger {
    /// True if this trigger matches every request `other` matches.
    pub fn is_superset_of(&self, other: &Trigger) -> bool {
        self.url_filter == other.url_filter
            && resource_types_cover(self, other)
            && load_types_cover(self, other)
            && case_sensitivity_covers(self, other)
            && url_selection_covers(self, other)
    }
}

impl Rule {
    /// Rules with different actions are never supersets of one another.
    pub fn is_superset_of(&self, other: &Rule) -> bool {
        self.action == other.action && self.trigger.is_superset_of(&other.trigger)
    }
}
