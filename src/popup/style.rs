//! Conversion of raw css declaration lists into the keyed form a renderer
//! consumes (`background-color: red` becomes `backgroundColor => red`).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct StructuredStyle(BTreeMap<String, String>);

impl StructuredStyle {
    pub fn get(&self, property: &str) -> Option<&str> {
        self.0.get(property).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Parses a css declaration list. Declarations without a property or value
/// are dropped; when a property repeats, the last one wins.
pub fn convert_style_string(raw: &str) -> StructuredStyle {
    let mut style = BTreeMap::new();

    for declaration in split_declarations(raw) {
        let (property, value) = match declaration.split_once(':') {
            Some(pair) => pair,
            None => continue,
        };

        let property = property.trim();
        let value = value.trim();
        if property.is_empty() || value.is_empty() {
            continue;
        }

        style.insert(property_key(property), value.to_string());
    }

    StructuredStyle(style)
}

// splits on `;` that are not nested in parentheses or quotes, so values like
// `url(data:image/png;base64,...)` survive intact
fn split_declarations(raw: &str) -> Vec<&str> {
    let mut declarations = vec![];
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut start = 0;

    for (index, c) in raw.char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"') | (None, '\'') => quote = Some(c),
            (None, '(') => depth += 1,
            (None, ')') => depth = depth.saturating_sub(1),
            (None, ';') if depth == 0 => {
                declarations.push(&raw[start..index]);
                start = index + 1;
            }
            _ => {}
        }
    }
    declarations.push(&raw[start..]);

    declarations
}

fn property_key(property: &str) -> String {
    if property.starts_with("--") {
        return property.to_string();
    }

    let property = property.to_ascii_lowercase();
    let (vendor, property) = match property.strip_prefix('-') {
        Some(rest) => (true, rest.to_string()),
        None => (false, property),
    };

    let mut key = String::with_capacity(property.len());
    for (index, segment) in property.split('-').filter(|s| !s.is_empty()).enumerate() {
        if index == 0 {
            key.push_str(segment);
        } else {
            key.push_str(&capitalize(segment));
        }
    }

    // vendor prefixes are capitalized, except `ms` which stays lowercase
    if vendor && !key.starts_with("ms") {
        key = capitalize(&key);
    }

    key
}

fn capitalize(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_kebab_case_properties() {
        let style = convert_style_string("background-color: #fff; font-size: 12px;");

        assert_eq!(style.get("backgroundColor"), Some("#fff"));
        assert_eq!(style.get("fontSize"), Some("12px"));
        assert_eq!(style.len(), 2);
    }

    #[test]
    fn empty_and_malformed_declarations_are_skipped() {
        let style = convert_style_string(" ; color ; margin: ; :4px; padding: 2px;;");

        assert_eq!(style.get("padding"), Some("2px"));
        assert_eq!(style.len(), 1);
    }

    #[test]
    fn empty_input_is_an_empty_style() {
        assert!(convert_style_string("").is_empty());
        assert!(convert_style_string("   ").is_empty());
    }

    #[test]
    fn value_keeps_everything_after_first_colon() {
        let style = convert_style_string(
            "background-image: url(data:image/png;base64,iVBORw0KGgo=); color: red",
        );

        assert_eq!(
            style.get("backgroundImage"),
            Some("url(data:image/png;base64,iVBORw0KGgo=)")
        );
        assert_eq!(style.get("color"), Some("red"));
    }

    #[test]
    fn quoted_semicolons_do_not_split() {
        let style = convert_style_string("font-family: 'a;b', serif; color: blue");

        assert_eq!(style.get("fontFamily"), Some("'a;b', serif"));
        assert_eq!(style.get("color"), Some("blue"));
    }

    #[test]
    fn vendor_prefixes_follow_renderer_conventions() {
        let style = convert_style_string(
            "-webkit-transform: none; -moz-user-select: none; -ms-flex: 1",
        );

        assert_eq!(style.get("WebkitTransform"), Some("none"));
        assert_eq!(style.get("MozUserSelect"), Some("none"));
        assert_eq!(style.get("msFlex"), Some("1"));
    }

    #[test]
    fn custom_properties_are_kept_verbatim() {
        let style = convert_style_string("--brand-color: #123456");

        assert_eq!(style.get("--brand-color"), Some("#123456"));
    }

    #[test]
    fn later_declarations_win() {
        let style = convert_style_string("color: red; COLOR: blue");

        assert_eq!(style.get("color"), Some("blue"));
    }

    #[test]
    fn serializes_as_a_plain_object() {
        let style = convert_style_string("border-radius: 8px");

        let value = serde_json::to_value(&style).unwrap();

        assert_eq!(value, serde_json::json!({ "borderRadius": "8px" }));
    }
}
