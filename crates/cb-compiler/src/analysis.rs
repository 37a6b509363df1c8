use std::collections::{HashMap, HashSet};

use cb_core::types::{Action, Rule};

/// Rule `covered` matches nothing that rule `covering` does not already match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Redundancy {
    pub covering: usize,
    pub covered: usize,
}

/// Report every pair of rules where one is a superset of the other.
///
/// Indices refer to `rules`. When two rules cover each other only the later
/// one is reported as covered. Nothing is removed; the caller decides.
pub fn find_redundant_rules(rules: &[Rule]) -> Vec<Redundancy> {
    // Subsumption needs equal actions and url filters, so only those groups are compared.
    let mut groups: HashMap<(&Action, &str), Vec<usize>> = HashMap::new();
    for (index, rule) in rules.iter().enumerate() {
        groups
            .entry((&rule.action, rule.trigger.url_filter.as_str()))
            .or_default()
            .push(index);
    }

    let mut found = Vec::new();
    for members in groups.values().filter(|m| m.len() > 1) {
        for &i in members {
            for &j in members {
                if i == j || !rules[i].is_superset_of(&rules[j]) {
                    continue;
                }
                if i > j && rules[j].is_superset_of(&rules[i]) {
                    continue;
                }
                log::trace!("rule {} covers rule {}", i, j);
                found.push(Redundancy {
                    covering: i,
                    covered: j,
                });
            }
        }
    }

    found.sort_by_key(|r| (r.covered, r.covering));
    found
}

/// Number of distinct rules covered by some other rule.
pub fn count_covered(redundancies: &[Redundancy]) -> usize {
    redundancies
        .iter()
        .map(|r| r.covered)
        .collect::<HashSet<_>>()
        .len()
}

#[cfg(test)]
mod tests {
    use cb_core::types::{LoadType, ResourceType, Trigger};

    use super::*;

    #[test]
    fn reports_rules_covered_by_looser_ones() {
        let rules = vec![
            Rule::new(Trigger::new("ad").with_resource_types(vec![ResourceType::Script]), Action::Block),
            Rule::new(Trigger::new("ad"), Action::Block),
            Rule::new(Trigger::new("ad").with_load_types(vec![LoadType::ThirdParty]), Action::Block),
            Rule::new(Trigger::new("ad"), Action::BlockCookies),
            Rule::new(Trigger::new("other"), Action::Block),
        ];

        let found = find_redundant_rules(&rules);
        assert_eq!(
            found,
            vec![
                Redundancy { covering: 1, covered: 0 },
                Redundancy { covering: 1, covered: 2 },
            ]
        );
        assert_eq!(count_covered(&found), 2);
    }

    #[test]
    fn identical_rules_report_later_one() {
        let rule = Rule::new(Trigger::new("ad"), Action::Block);
        let found = find_redundant_rules(&[rule.clone(), rule]);
        assert_eq!(found, vec![Redundancy { covering: 0, covered: 1 }]);
    }

    #[test]
    fn incomparable_rules_are_not_reported() {
        let rules = vec![
            Rule::new(Trigger::new("ad").with_resource_types(vec![ResourceType::Script]), Action::Block),
            Rule::new(Trigger::new("ad").with_load_types(vec![LoadType::ThirdParty]), Action::Block),
        ];
        assert!(find_redundant_rules(&rules).is_empty());
        assert_eq!(count_covered(&[]), 0);
    }

    #[test]
    fn counts_covered_rules_in_any_order() {
        let report = [
            Redundancy { covering: 0, covered: 2 },
            Redundancy { covering: 1, covered: 3 },
            Redundancy { covering: 1, covered: 2 },
        ];
        assert_eq!(count_covered(&report), 2);
    }
}
