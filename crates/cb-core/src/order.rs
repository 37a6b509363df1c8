//! Canonical rule ordering
//!
//! A rule list is valid for emission only once it is sorted by this order:
//! rules cluster by action type, `ignore-previous-rules` comes last, and within
//! a cluster less specific triggers precede more specific ones.
//!
//! Every sub-order is a standalone function so the pieces can be tested on
//! their own. The `Ord` impls on the model types only compose them.

use std::cmp::Ordering;

use crate::types::{Action, ActionType, LoadType, ResourceType, Rule, Trigger, UrlSelection};

/// Absent precedes present; two present values compare by `cmp`.
pub fn cmp_optional<T>(a: Option<&T>, b: Option<&T>, cmp: impl FnOnce(&T, &T) -> Ordering) -> Ordering
where
    T: ?Sized,
{
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => cmp(a, b),
    }
}

/// Element-wise comparison; on a common prefix the shorter list precedes.
pub fn cmp_list<T>(a: &[T], b: &[T], mut cmp: impl FnMut(&T, &T) -> Ordering) -> Ordering {
    for (x, y) in a.iter().zip(b) {
        match cmp(x, y) {
            Ordering::Equal => continue,
            ord => return ord,
        }
    }
    a.len().cmp(&b.len())
}

/// `false` precedes `true`.
pub fn cmp_bool(a: bool, b: bool) -> Ordering {
    a.cmp(&b)
}

/// Alphabetic by tag, except `ignore-previous-rules` is greater than every other type.
pub fn cmp_action_type(a: ActionType, b: ActionType) -> Ordering {
    if a == b {
        return Ordering::Equal;
    }
    match (a, b) {
        (ActionType::IgnorePreviousRules, _) => Ordering::Greater,
        (_, ActionType::IgnorePreviousRules) => Ordering::Less,
        _ => a.tag().cmp(b.tag()),
    }
}

pub fn cmp_resource_type(a: &ResourceType, b: &ResourceType) -> Ordering {
    a.tag().cmp(b.tag())
}

pub fn cmp_load_type(a: &LoadType, b: &LoadType) -> Ordering {
    a.tag().cmp(b.tag())
}

fn selection_rank(selection: &UrlSelection) -> u8 {
    match selection {
        UrlSelection::UnlessDomain(_) => 0,
        UrlSelection::IfDomain(_) => 1,
        UrlSelection::UnlessTopUrl(_) => 2,
        UrlSelection::IfTopUrl(_) => 3,
    }
}

/// Variant rank decides; payloads are compared only within the same variant.
pub fn cmp_url_selection(a: &UrlSelection, b: &UrlSelection) -> Ordering {
    selection_rank(a)
        .cmp(&selection_rank(b))
        .then_with(|| cmp_list(a.patterns(), b.patterns(), |x, y| x.cmp(y)))
}

pub fn cmp_action(a: &Action, b: &Action) -> Ordering {
    cmp_action_type(a.action_type(), b.action_type())
        .then_with(|| cmp_optional(a.selector(), b.selector(), |x, y| x.cmp(y)))
}

pub fn cmp_trigger(a: &Trigger, b: &Trigger) -> Ordering {
    a.url_filter
        .cmp(&b.url_filter)
        .then_with(|| {
            cmp_optional(a.load_types.as_deref(), b.load_types.as_deref(), |x, y| {
                cmp_list(x, y, cmp_load_type)
            })
        })
        .then_with(|| cmp_optional(a.url_selection.as_ref(), b.url_selection.as_ref(), cmp_url_selection))
        .then_with(|| {
            cmp_optional(a.resource_types.as_deref(), b.resource_types.as_deref(), |x, y| {
                cmp_list(x, y, cmp_resource_type)
            })
        })
        .then_with(|| {
            cmp_optional(
                a.url_filter_case_sensitive.as_ref(),
                b.url_filter_case_sensitive.as_ref(),
                |x, y| cmp_bool(*x, *y),
            )
        })
}

pub fn cmp_rule(a: &Rule, b: &Rule) -> Ordering {
    cmp_action(&a.action, &b.action).then_with(|| cmp_trigger(&a.trigger, &b.trigger))
}

impl Ord for Action {
    fn cmp(&self, other: &Self) -> Ordering {
        cmp_action(self, other)
    }
}

impl PartialOrd for Action {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Trigger {
    fn cmp(&self, other: &Self) -> Ordering {
        cmp_trigger(self, other)
    }
}

impl PartialOrd for Trigger {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Rule {
    fn cmp(&self, other: &Self) -> Ordering {
        cmp_rule(self, other)
    }
}

impl PartialOrd for Rule {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Stable sort into canonical order.
pub fn sort_rules(rules: &mut [Rule]) {
    rules.sort_by(cmp_rule);
}

pub fn is_canonical(rules: &[Rule]) -> bool {
    rules
        .windows(2)
        .all(|pair| cmp_rule(&pair[0], &pair[1]) != Ordering::Greater)
}
