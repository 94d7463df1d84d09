/// Ordered rule model for Snort rule headers and keyword options
use super::keywords::{base_name, is_argless, is_content_modifier, is_header, HEADER_KEYS};
use crate::error::{Result, RuleError};

/// Value stored under a field key
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// Literal argument text, stored verbatim (quoting included)
    Text(String),
    /// Presence marker for an argument-less keyword
    Flag,
}

impl FieldValue {
    /// Get the argument text, if this value carries one
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(v) => Some(v),
            FieldValue::Flag => None,
        }
    }

    /// Check if this value is the presence marker
    pub fn is_flag(&self) -> bool {
        matches!(self, FieldValue::Flag)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

/// One parsed rule as an ordered field-name to value mapping
///
/// Iteration order is the seven header fields followed by option keywords in
/// the order they appeared in the rule text. Repeated keywords are stored
/// under numbered keys (`content`, `content2`, ...) so that modifier keywords
/// stay adjacent to the keyword they modify.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleModel {
    fields: Vec<(String, FieldValue)>,
}

impl RuleModel {
    /// Create a rule with the default header and message
    pub fn new() -> Self {
        let mut model = Self::empty();
        model.set("action", "alert");
        model.set("protocol", "tcp");
        model.set("srcip", "any");
        model.set("srcport", "any");
        model.set("direction", "<>");
        model.set("dstip", "any");
        model.set("dstport", "any");
        model.set("msg", "\"default message\"");
        model
    }

    /// Create a rule with no fields set
    pub fn empty() -> Self {
        Self { fields: Vec::new() }
    }

    /// Get the value stored under a field key
    pub fn get(&self, key: &str) -> Result<&FieldValue> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
            .ok_or_else(|| RuleError::MissingField(key.to_string()))
    }

    /// Set a field, overwriting in place or appending a new key at the end
    pub fn set(&mut self, key: &str, value: impl Into<FieldValue>) {
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| k == key) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((key.to_string(), value)),
        }
    }

    /// Append an option keyword, numbering repeats of the same base name
    ///
    /// The first occurrence of a keyword is stored under its bare name, the
    /// second under `name2`, the third under `name3`, and so on. Counting is
    /// scoped to the exact base name after suffix stripping, so `http_uri`
    /// occurrences never perturb `http` numbering.
    pub fn append_option(&mut self, keyword: &str, value: impl Into<FieldValue>) {
        let seen = self
            .fields
            .iter()
            .filter(|(k, _)| base_name(k) == keyword)
            .count();

        if seen == 0 {
            self.fields.push((keyword.to_string(), value.into()));
        } else {
            self.fields
                .push((format!("{}{}", keyword, seen + 1), value.into()));
        }
    }

    /// Iterate over all fields in insertion order
    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Get number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if the model has no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Content-modifier keys immediately following `key` in iteration order
    ///
    /// Modifiers bind to the nearest preceding content keyword, so the run
    /// ends at the first key that is not a content modifier.
    pub fn modifiers_for(&self, key: &str) -> Vec<&str> {
        let pos = match self.fields.iter().position(|(k, _)| k == key) {
            Some(pos) => pos,
            None => return Vec::new(),
        };

        self.fields[pos + 1..]
            .iter()
            .map(|(k, _)| k.as_str())
            .take_while(|k| is_content_modifier(base_name(k)))
            .collect()
    }

    /// Serialize the model back into a single-line rule string
    ///
    /// Header fields are emitted positionally in fixed order; option keywords
    /// follow in insertion order with their numeric suffixes stripped.
    pub fn render(&self) -> Result<String> {
        let mut header = Vec::with_capacity(HEADER_KEYS.len());
        for key in HEADER_KEYS {
            match self.get(key)? {
                FieldValue::Text(v) => header.push(v.as_str()),
                FieldValue::Flag => {
                    return Err(RuleError::MalformedRule(format!(
                        "header field {} has no value",
                        key
                    )))
                }
            }
        }

        let mut options = String::new();
        for (key, value) in &self.fields {
            let base = base_name(key);
            if is_header(base) {
                continue;
            }

            if is_argless(base) {
                match value {
                    // fast_pattern may carry `only` or an offset,length pair
                    FieldValue::Text(v) if base == "fast_pattern" => {
                        options.push_str(&format!("{}:{}; ", base, v));
                    }
                    _ => options.push_str(&format!("{}; ", base)),
                }
            } else {
                match value {
                    FieldValue::Text(v) => options.push_str(&format!("{}:{}; ", base, v)),
                    FieldValue::Flag => options.push_str(&format!("{}; ", base)),
                }
            }
        }

        Ok(format!("{} ({})", header.join(" "), options.trim_end()))
    }
}

impl Default for RuleModel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_model() {
        let model = RuleModel::new();

        assert_eq!(model.get("action").unwrap().as_text(), Some("alert"));
        assert_eq!(model.get("direction").unwrap().as_text(), Some("<>"));
        assert_eq!(
            model.get("msg").unwrap().as_text(),
            Some("\"default message\"")
        );
        assert_eq!(
            model.render().unwrap(),
            r#"alert tcp any any <> any any (msg:"default message";)"#
        );
    }

    #[test]
    fn test_get_missing_field() {
        let model = RuleModel::new();

        match model.get("content") {
            Err(RuleError::MissingField(key)) => assert_eq!(key, "content"),
            other => panic!("Expected MissingField, got {:?}", other),
        }
    }

    #[test]
    fn test_set_overwrites_in_place() {
        let mut model = RuleModel::new();
        model.set("action", "drop");

        assert_eq!(model.get("action").unwrap().as_text(), Some("drop"));
        // Overwriting must not move the key to the end
        let first = model.fields().next().unwrap();
        assert_eq!(first.0, "action");
    }

    #[test]
    fn test_set_appends_new_key() {
        let mut model = RuleModel::new();
        model.set("sid", "1000001");

        let last = model.fields().last().unwrap();
        assert_eq!(last.0, "sid");
        assert_eq!(last.1.as_text(), Some("1000001"));
    }

    #[test]
    fn test_append_option_numbering() {
        let mut model = RuleModel::empty();
        model.append_option("content", "\"bogus\"");
        model.append_option("content", "\"zipper\"");
        model.append_option("content", "\"third\"");

        assert_eq!(model.get("content").unwrap().as_text(), Some("\"bogus\""));
        assert_eq!(model.get("content2").unwrap().as_text(), Some("\"zipper\""));
        assert_eq!(model.get("content3").unwrap().as_text(), Some("\"third\""));
    }

    #[test]
    fn test_append_option_counts_per_family() {
        let mut model = RuleModel::empty();
        model.append_option("content", "\"a\"");
        model.append_option("pcre", "\"/x/\"");
        model.append_option("content", "\"b\"");
        model.append_option("pcre", "\"/y/\"");

        let keys: Vec<&str> = model.fields().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["content", "pcre", "content2", "pcre2"]);
    }

    #[test]
    fn test_append_option_suffix_stripped_counting() {
        // `http_uri` repeats must not be confused with other `http_*` families
        let mut model = RuleModel::empty();
        model.append_option("http_uri", FieldValue::Flag);
        model.append_option("http_header", FieldValue::Flag);
        model.append_option("http_uri", FieldValue::Flag);

        let keys: Vec<&str> = model.fields().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["http_uri", "http_header", "http_uri2"]);
    }

    #[test]
    fn test_render_argless_keyword() {
        let mut model = RuleModel::new();
        model.append_option("nocase", FieldValue::Flag);

        assert_eq!(
            model.render().unwrap(),
            r#"alert tcp any any <> any any (msg:"default message"; nocase;)"#
        );
    }

    #[test]
    fn test_render_fast_pattern() {
        let mut model = RuleModel::new();
        model.set("fast_pattern", FieldValue::Flag);
        assert!(model.render().unwrap().ends_with("fast_pattern;)"));

        model.set("fast_pattern", "only");
        assert!(model.render().unwrap().ends_with("fast_pattern:only;)"));

        model.set("fast_pattern", "1,20");
        assert!(model.render().unwrap().ends_with("fast_pattern:1,20;)"));
    }

    #[test]
    fn test_render_flag_on_plain_keyword() {
        // A marker stored under a keyword outside the argless set still
        // renders as a bare keyword
        let mut model = RuleModel::new();
        model.set("sameip", FieldValue::Flag);

        assert!(model.render().unwrap().ends_with("sameip;)"));
    }

    #[test]
    fn test_render_missing_header() {
        let mut model = RuleModel::empty();
        model.set("action", "alert");

        match model.render() {
            Err(RuleError::MissingField(key)) => assert_eq!(key, "protocol"),
            other => panic!("Expected MissingField, got {:?}", other),
        }
    }

    #[test]
    fn test_modifiers_for() {
        let mut model = RuleModel::empty();
        model.append_option("content", "\"GET\"");
        model.append_option("nocase", FieldValue::Flag);
        model.append_option("offset", "0");
        model.append_option("content", "\"/login\"");
        model.append_option("http_uri", FieldValue::Flag);
        model.append_option("sid", "1");

        assert_eq!(model.modifiers_for("content"), vec!["nocase", "offset"]);
        assert_eq!(model.modifiers_for("content2"), vec!["http_uri"]);
        assert!(model.modifiers_for("sid").is_empty());
        assert!(model.modifiers_for("absent").is_empty());
    }
}
