/// Snort rule text parser
use super::keywords::HEADER_KEYS;
use super::model::{FieldValue, RuleModel};
use crate::error::{Result, RuleError};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

/// Option shapes, tried left to right: `name:value;` then bare `name;`
static OPTION_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\w+):([^;]*);|(\w+);").unwrap());

/// Parse a complete Snort rule into an ordered model
///
/// Example: alert tcp $EXTERNAL_NET any -> $HOME_NET 80 (msg:"Test"; sid:1;)
///
/// The seven positional header fields come first, then the parenthesized
/// option list. Option fragments that match neither recognized shape are
/// skipped; callers needing strict validation must post-check the model.
pub fn parse_rule(input: &str) -> Result<RuleModel> {
    let input = input.trim();

    // Locate the option section by its delimiters rather than by header
    // length, so extra whitespace between header fields stays harmless
    let open = input
        .find('(')
        .ok_or_else(|| RuleError::MalformedRule("rule has no option section".to_string()))?;
    if !input.ends_with(')') {
        return Err(RuleError::MalformedRule(
            "option section is not terminated by `)`".to_string(),
        ));
    }

    let header_tokens: Vec<&str> = input[..open].split_whitespace().collect();
    if header_tokens.len() < HEADER_KEYS.len() {
        return Err(RuleError::MalformedRule(format!(
            "expected {} header fields, found {}",
            HEADER_KEYS.len(),
            header_tokens.len()
        )));
    }

    let mut model = RuleModel::empty();
    for (key, value) in HEADER_KEYS.iter().zip(header_tokens.iter()) {
        model.set(key, *value);
    }

    // The last option before `)` may legally omit its terminating semicolon
    let mut body = input[open + 1..input.len() - 1].trim().to_string();
    if !body.is_empty() && !body.ends_with(';') {
        body.push(';');
    }

    let mut scanned = 0;
    for caps in OPTION_RE.captures_iter(&body) {
        let matched = caps.get(0).unwrap();
        let gap = body[scanned..matched.start()].trim();
        if !gap.is_empty() {
            debug!("Skipping unrecognized option fragment: {:?}", gap);
        }
        scanned = matched.end();

        if let Some(bare) = caps.get(3) {
            model.append_option(bare.as_str(), FieldValue::Flag);
        } else if let (Some(name), Some(value)) = (caps.get(1), caps.get(2)) {
            model.append_option(name.as_str(), value.as_str());
        }
    }

    let tail = body[scanned..].trim();
    if !tail.is_empty() {
        debug!("Skipping unrecognized option fragment: {:?}", tail);
    }

    Ok(model)
}
