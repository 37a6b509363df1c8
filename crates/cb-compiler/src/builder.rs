use serde::{Deserialize, Serialize};

use cb_core::order::sort_rules;
use cb_core::types::Rule;

use crate::analysis::{count_covered, find_redundant_rules, Redundancy};
use crate::codec::to_json_string;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CompileOptions {
    /// Indent the emitted JSON
    pub pretty: bool,
    /// Look for rules covered by other rules in the list
    pub analyze_redundancy: bool,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            pretty: false,
            analyze_redundancy: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompileStats {
    pub rules: usize,
    pub redundant: usize,
}

/// A rule list in canonical order together with its JSON document.
#[derive(Debug, Clone)]
pub struct CompiledRuleList {
    pub rules: Vec<Rule>,
    pub json: String,
    /// Indices refer to the sorted `rules`
    pub redundancies: Vec<Redundancy>,
    pub stats: CompileStats,
}

pub fn compile_rule_list(rules: &[Rule], options: &CompileOptions) -> CompiledRuleList {
    let mut sorted = rules.to_vec();
    sort_rules(&mut sorted);

    let redundancies = if options.analyze_redundancy {
        find_redundant_rules(&sorted)
    } else {
        Vec::new()
    };

    let stats = CompileStats {
        rules: sorted.len(),
        redundant: count_covered(&redundancies),
    };
    log::debug!(
        "compiled {} rules ({} covered by other rules)",
        stats.rules,
        stats.redundant
    );

    let json = to_json_string(&sorted, options.pretty);
    CompiledRuleList {
        rules: sorted,
        json,
        redundancies,
        stats,
    }
}

#[cfg(test)]
mod tests {
    use cb_core::order::is_canonical;
    use cb_core::types::{Action, LoadType, Trigger, UrlSelection};

    use crate::codec::from_json_str;

    use super::*;

    fn mixed_rules() -> Vec<Rule> {
        let taboola = ".*taboola\\.com";
        vec![
            Rule::new(
                Trigger::new(".*").with_url_selection(UrlSelection::IfDomain(vec!["*important.com".into()])),
                Action::IgnorePreviousRules,
            ),
            Rule::new(
                Trigger::new(taboola)
                    .with_load_types(vec![LoadType::ThirdParty])
                    .with_case_sensitive(true),
                Action::Block,
            ),
            Rule::new(Trigger::new("*."), Action::css_display_none(".big-fat-ad")),
            Rule::new(Trigger::new(taboola).with_load_types(vec![LoadType::ThirdParty]), Action::Block),
        ]
    }

    #[test]
    fn emits_canonical_document() {
        let compiled = compile_rule_list(&mixed_rules(), &CompileOptions::default());
        assert!(is_canonical(&compiled.rules));
        assert_eq!(compiled.stats.rules, 4);

        let decoded = from_json_str(&compiled.json).expect("emitted json decodes");
        assert_eq!(decoded, compiled.rules);
        assert_eq!(decoded[3].action, Action::IgnorePreviousRules);
        assert_eq!(decoded[0].trigger.url_filter_case_sensitive, None);
    }

    #[test]
    fn reports_redundancy_against_sorted_indices() {
        let compiled = compile_rule_list(&mixed_rules(), &CompileOptions::default());
        assert_eq!(compiled.redundancies, vec![Redundancy { covering: 0, covered: 1 }]);
        assert_eq!(compiled.stats.redundant, 1);

        let options = CompileOptions {
            analyze_redundancy: false,
            ..CompileOptions::default()
        };
        let compiled = compile_rule_list(&mixed_rules(), &options);
        assert!(compiled.redundancies.is_empty());
        assert_eq!(compiled.stats.redundant, 0);
    }

    #[test]
    fn pretty_output_is_indented() {
        let options = CompileOptions {
            pretty: true,
            ..CompileOptions::default()
        };
        let compiled = compile_rule_list(&mixed_rules(), &options);
        assert!(compiled.json.contains("\n  "));
        assert!(!compile_rule_list(&mixed_rules(), &CompileOptions::default())
            .json
            .contains('\n'));
    }

    #[test]
    fn options_deserialize_with_defaults() {
        let options: CompileOptions = serde_json::from_str(r#"{ "pretty": true }"#).expect("options parse");
        assert!(options.pretty);
        assert!(options.analyze_redundancy);
    }
}
