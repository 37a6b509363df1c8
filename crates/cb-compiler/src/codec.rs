//! JSON codec for content blocker rules
//!
//! Field names map one-to-one onto the hyphenated wire keys. Optional fields
//! are omitted when absent. The URL selection is not a tagged object: it is
//! written as exactly one of four sibling keys inside the trigger.

use serde_json::{Map, Value};

use cb_core::types::{
    Action, ActionType, LoadType, ResourceType, Rule, Trigger, UrlSelection, UrlSelectionKind,
};

const TRIGGER: &str = "trigger";
const ACTION: &str = "action";
const URL_FILTER: &str = "url-filter";
const CASE_SENSITIVE: &str = "url-filter-is-case-sensitive";
const RESOURCE_TYPE: &str = "resource-type";
const LOAD_TYPE: &str = "load-type";
const TYPE: &str = "type";
const SELECTOR: &str = "selector";

/// Lookup order for the URL selection keys. The first key present wins.
const URL_SELECTION_KEYS: [UrlSelectionKind; 4] = [
    UrlSelectionKind::IfDomain,
    UrlSelectionKind::UnlessDomain,
    UrlSelectionKind::IfTopUrl,
    UrlSelectionKind::UnlessTopUrl,
];

/// Error type for rule decoding.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("Missing required field: {0}")]
    MissingRequiredField(&'static str),
    #[error("Unknown variant for {field}: {value:?}")]
    UnknownVariant { field: &'static str, value: String },
    #[error("Malformed payload at {field}: {reason}")]
    MalformedPayload { field: &'static str, reason: String },
    #[error("Rule {index}: {source}")]
    InElement {
        index: usize,
        #[source]
        source: Box<CodecError>,
    },
}

impl From<serde_json::Error> for CodecError {
    fn from(e: serde_json::Error) -> Self {
        Self::MalformedPayload {
            field: "document",
            reason: e.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CodecError>;

// =============================================================================
// Encoding
// =============================================================================

pub fn encode_rule(rule: &Rule) -> Value {
    let mut obj = Map::new();
    obj.insert(TRIGGER.to_string(), encode_trigger(&rule.trigger));
    obj.insert(ACTION.to_string(), encode_action(&rule.action));
    Value::Object(obj)
}

pub fn encode_rules(rules: &[Rule]) -> Value {
    Value::Array(rules.iter().map(encode_rule).collect())
}

fn encode_trigger(trigger: &Trigger) -> Value {
    let mut obj = Map::new();
    obj.insert(URL_FILTER.to_string(), Value::from(trigger.url_filter.as_str()));

    if let Some(case_sensitive) = trigger.url_filter_case_sensitive {
        obj.insert(CASE_SENSITIVE.to_string(), Value::Bool(case_sensitive));
    }
    if let Some(types) = &trigger.resource_types {
        obj.insert(
            RESOURCE_TYPE.to_string(),
            types.iter().map(|t| Value::from(t.tag())).collect(),
        );
    }
    if let Some(types) = &trigger.load_types {
        obj.insert(
            LOAD_TYPE.to_string(),
            types.iter().map(|t| Value::from(t.tag())).collect(),
        );
    }
    if let Some(selection) = &trigger.url_selection {
        obj.insert(
            selection.kind().key().to_string(),
            selection.patterns().iter().map(|p| Value::from(p.as_str())).collect(),
        );
    }

    Value::Object(obj)
}

fn encode_action(action: &Action) -> Value {
    let mut obj = Map::new();
    obj.insert(TYPE.to_string(), Value::from(action.action_type().tag()));
    if let Some(selector) = action.selector() {
        obj.insert(SELECTOR.to_string(), Value::from(selector));
    }
    Value::Object(obj)
}

/// Serialize a rule list as given. Callers wanting canonical output sort first.
pub fn to_json_string(rules: &[Rule], pretty: bool) -> String {
    let doc = encode_rules(rules);
    if pretty {
        format!("{doc:#}")
    } else {
        doc.to_string()
    }
}

// =============================================================================
// Decoding
// =============================================================================

pub fn decode_rule(value: &Value) -> Result<Rule> {
    let obj = as_object(value, "rule")?;
    let trigger = decode_trigger(required(obj, TRIGGER)?)?;
    let action = decode_action(required(obj, ACTION)?)?;
    Ok(Rule::new(trigger, action))
}

pub fn decode_rules(value: &Value) -> Result<Vec<Rule>> {
    let items = value.as_array().ok_or_else(|| CodecError::MalformedPayload {
        field: "document",
        reason: "expected an array of rules".to_string(),
    })?;

    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            decode_rule(item).map_err(|e| CodecError::InElement {
                index,
                source: Box::new(e),
            })
        })
        .collect()
}

pub fn from_json_str(text: &str) -> Result<Vec<Rule>> {
    let value: Value = serde_json::from_str(text)?;
    decode_rules(&value)
}

fn decode_trigger(value: &Value) -> Result<Trigger> {
    let obj = as_object(value, TRIGGER)?;

    let url_filter = as_str(required(obj, URL_FILTER)?, URL_FILTER)?.to_string();

    let url_filter_case_sensitive = optional(obj, CASE_SENSITIVE)
        .map(|v| {
            v.as_bool().ok_or_else(|| malformed(CASE_SENSITIVE, "expected a boolean"))
        })
        .transpose()?;

    let resource_types = optional(obj, RESOURCE_TYPE)
        .map(|v| tag_list(v, RESOURCE_TYPE, ResourceType::from_tag))
        .transpose()?;

    let load_types = optional(obj, LOAD_TYPE)
        .map(|v| tag_list(v, LOAD_TYPE, LoadType::from_tag))
        .transpose()?;

    Ok(Trigger {
        url_filter,
        url_filter_case_sensitive,
        resource_types,
        load_types,
        url_selection: decode_url_selection(obj)?,
    })
}

fn decode_url_selection(obj: &Map<String, Value>) -> Result<Option<UrlSelection>> {
    let mut present = URL_SELECTION_KEYS
        .into_iter()
        .filter_map(|kind| optional(obj, kind.key()).map(|v| (kind, v)));

    let Some((kind, value)) = present.next() else {
        return Ok(None);
    };

    let ignored: Vec<&str> = present.map(|(k, _)| k.key()).collect();
    if !ignored.is_empty() {
        log::warn!(
            "trigger carries several url selections, using {} and ignoring {:?}",
            kind.key(),
            ignored
        );
    }

    let patterns = string_list(value, kind.key())?;
    Ok(Some(UrlSelection::new(kind, patterns)))
}

fn decode_action(value: &Value) -> Result<Action> {
    let obj = as_object(value, ACTION)?;
    let tag = as_str(required(obj, TYPE)?, TYPE)?;
    let action_type = ActionType::from_tag(tag).ok_or_else(|| CodecError::UnknownVariant {
        field: TYPE,
        value: tag.to_string(),
    })?;

    let action = match action_type {
        ActionType::Block => Action::Block,
        ActionType::BlockCookies => Action::BlockCookies,
        ActionType::CssDisplayNone => {
            let selector = as_str(required(obj, SELECTOR)?, SELECTOR)?;
            Action::css_display_none(selector)
        }
        ActionType::IgnorePreviousRules => Action::IgnorePreviousRules,
        ActionType::MakeHttps => Action::MakeHttps,
    };
    Ok(action)
}

// =============================================================================
// Value helpers
// =============================================================================

fn malformed(field: &'static str, reason: &str) -> CodecError {
    CodecError::MalformedPayload {
        field,
        reason: reason.to_string(),
    }
}

fn as_object<'a>(value: &'a Value, field: &'static str) -> Result<&'a Map<String, Value>> {
    value.as_object().ok_or_else(|| malformed(field, "expected an object"))
}

fn as_str<'a>(value: &'a Value, field: &'static str) -> Result<&'a str> {
    value.as_str().ok_or_else(|| malformed(field, "expected a string"))
}

/// `null` is treated the same as a missing key.
fn optional<'a>(obj: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    obj.get(key).filter(|v| !v.is_null())
}

fn required<'a>(obj: &'a Map<String, Value>, key: &'static str) -> Result<&'a Value> {
    optional(obj, key).ok_or(CodecError::MissingRequiredField(key))
}

fn non_empty_array<'a>(value: &'a Value, field: &'static str) -> Result<&'a Vec<Value>> {
    match value.as_array() {
        Some(items) if !items.is_empty() => Ok(items),
        Some(_) => Err(malformed(field, "expected a non-empty array")),
        None => Err(malformed(field, "expected an array")),
    }
}

fn string_list(value: &Value, field: &'static str) -> Result<Vec<String>> {
    non_empty_array(value, field)?
        .iter()
        .map(|item| as_str(item, field).map(str::to_string))
        .collect()
}

fn tag_list<T>(value: &Value, field: &'static str, from_tag: fn(&str) -> Option<T>) -> Result<Vec<T>> {
    non_empty_array(value, field)?
        .iter()
        .map(|item| {
            let tag = as_str(item, field)?;
            from_tag(tag).ok_or_else(|| CodecError::UnknownVariant {
                field,
                value: tag.to_string(),
            })
        })
        .collect()
}
