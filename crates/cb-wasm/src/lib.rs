//! WebAssembly bindings for the content blocker rule compiler

use wasm_bindgen::prelude::*;

use cb_compiler::{compile_rule_list, from_json_str, CodecError, CompileOptions};
use cb_core::types::Rule;

fn codec_error(e: CodecError) -> JsValue {
    JsValue::from_str(&format!("Failed to decode rules: {}", e))
}

fn parse_options(options_json: Option<String>) -> Result<CompileOptions, JsValue> {
    match options_json {
        Some(text) => serde_json::from_str(&text)
            .map_err(|e| JsValue::from_str(&format!("Invalid compile options: {}", e))),
        None => Ok(CompileOptions::default()),
    }
}

/// Compile one or more JSON rule lists into a single canonical rule list.
#[wasm_bindgen]
pub fn compile_rule_lists(list_texts: JsValue, options_json: Option<String>) -> Result<JsValue, JsValue> {
    let list_array = js_sys::Array::from(&list_texts);
    let list_count = list_array.length() as usize;

    if list_count == 0 {
        return Err(JsValue::from_str("No rule lists provided"));
    }

    let options = parse_options(options_json)?;
    let mut all_rules: Vec<Rule> = Vec::new();

    for value in list_array.iter() {
        let text = value
            .as_string()
            .ok_or_else(|| JsValue::from_str("Rule list must be a string"))?;
        all_rules.extend(from_json_str(&text).map_err(codec_error)?);
    }

    let compiled = compile_rule_list(&all_rules, &options);

    let redundancies = js_sys::Array::new();
    for r in &compiled.redundancies {
        let pair = js_sys::Object::new();
        let _ = js_sys::Reflect::set(&pair, &"covering".into(), &JsValue::from(r.covering as u32));
        let _ = js_sys::Reflect::set(&pair, &"covered".into(), &JsValue::from(r.covered as u32));
        redundancies.push(&pair);
    }

    let js_result = js_sys::Object::new();
    let _ = js_sys::Reflect::set(&js_result, &"rules".into(), &JsValue::from_str(&compiled.json));
    let _ = js_sys::Reflect::set(&js_result, &"ruleCount".into(), &JsValue::from(compiled.stats.rules as u32));
    let _ = js_sys::Reflect::set(&js_result, &"redundantCount".into(), &JsValue::from(compiled.stats.redundant as u32));
    let _ = js_sys::Reflect::set(&js_result, &"redundancies".into(), &redundancies);

    Ok(js_result.into())
}

/// Check whether the first rule's matching scope contains the second's.
///
/// Both arguments are single-rule JSON objects.
#[wasm_bindgen]
pub fn is_superset(rule_json: &str, other_json: &str) -> Result<bool, JsValue> {
    let decode = |text: &str| -> Result<Rule, JsValue> {
        let value: serde_json::Value = serde_json::from_str(text)
            .map_err(|e| codec_error(CodecError::from(e)))?;
        cb_compiler::decode_rule(&value).map_err(codec_error)
    };

    let rule = decode(rule_json)?;
    let other = decode(other_json)?;
    Ok(rule.is_superset_of(&other))
}
