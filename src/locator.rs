use std::collections::HashSet;
use std::fmt;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

// @module: Locator descriptor parsing and selector emission

// @const: Fallback extraction of a "locator":"..." field from malformed annotations
static LOCATOR_FIELD_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#""locator"\s*:\s*"([^"]*)""#).unwrap()
});

// @const: Java string-concatenation idiom wrapping a parameter name
static CONCAT_PARAM_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"["']\s*\+\s*([A-Za-z_][A-Za-z0-9_]*)\s*\+\s*["']"#).unwrap()
});

// @const: Key scan order for object literals whose keys are locator-type names
const PRIORITY_KEYS: [&str; 7] = [
    "id", "xpath", "css", "name", "linkText", "partialLinkText", "tagName",
];

/// How a UI element is located
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LocatorType {
    Xpath,
    Css,
    Id,
    Name,
    LinkText,
    PartialLinkText,
    ClassName,
    TagName,
    Text,
    Role,
    Label,
    Placeholder,
    Alt,
    Title,
    Unknown,
}

impl LocatorType {
    // @returns: Locator type for a key, case-insensitive; Unknown for anything else
    pub fn from_key(key: &str) -> Self {
        match key.trim().to_lowercase().as_str() {
            "xpath" => Self::Xpath,
            "css" | "cssselector" => Self::Css,
            "id" => Self::Id,
            "name" => Self::Name,
            "linktext" => Self::LinkText,
            "partiallinktext" => Self::PartialLinkText,
            "classname" => Self::ClassName,
            "tagname" => Self::TagName,
            "text" => Self::Text,
            "role" => Self::Role,
            "label" => Self::Label,
            "placeholder" => Self::Placeholder,
            "alt" | "alttext" => Self::Alt,
            "title" => Self::Title,
            _ => Self::Unknown,
        }
    }

    // @returns: Canonical key string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Xpath => "xpath",
            Self::Css => "css",
            Self::Id => "id",
            Self::Name => "name",
            Self::LinkText => "linkText",
            Self::PartialLinkText => "partialLinkText",
            Self::ClassName => "className",
            Self::TagName => "tagName",
            Self::Text => "text",
            Self::Role => "role",
            Self::Label => "label",
            Self::Placeholder => "placeholder",
            Self::Alt => "alt",
            Self::Title => "title",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for LocatorType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Typed element locator decoded from a source annotation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatorDescriptor {
    /// Locator strategy
    pub locator_type: LocatorType,

    /// Locator value; non-empty unless the type is Unknown
    pub value: String,

    /// Optional human-readable element description
    pub description: Option<String>,
}

impl LocatorDescriptor {
    /// Create a descriptor with a known type
    pub fn new(locator_type: LocatorType, value: impl Into<String>) -> Self {
        LocatorDescriptor {
            locator_type,
            value: value.into(),
            description: None,
        }
    }

    // @creates: Unknown-type descriptor carrying the raw input
    fn unknown(raw: &str) -> Self {
        LocatorDescriptor {
            locator_type: LocatorType::Unknown,
            value: raw.to_string(),
            description: None,
        }
    }

    /// Decode a raw locator string.
    ///
    /// Tries, in order: a structured object literal carrying a `locator` field
    /// or locator-type keys, a regex extraction of the `locator` field, and a
    /// plain `type=value` token. Always returns a descriptor; a string nothing
    /// recognizes comes back as `Unknown` with the original text as its value.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Self::unknown(raw);
        }

        if trimmed.starts_with('{') || trimmed.contains("\"locator\"") {
            // Annotation values embed JSON with doubled quotes
            let unescaped = trimmed.replace("\"\"", "\"");

            if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(&unescaped) {
                let description = map.get("desc")
                    .and_then(Value::as_str)
                    .filter(|desc| !desc.is_empty())
                    .map(str::to_string);

                if let Some(token) = map.get("locator").and_then(Value::as_str) {
                    let mut descriptor = Self::from_token(token);
                    descriptor.description = description;
                    return descriptor;
                }

                // Object whose own keys are locator-type names
                for key in PRIORITY_KEYS {
                    if let Some(value) = map.get(key).and_then(Value::as_str) {
                        if !value.is_empty() {
                            return LocatorDescriptor {
                                locator_type: LocatorType::from_key(key),
                                value: value.to_string(),
                                description,
                            };
                        }
                    }
                }
            }

            // Structured decode failed, salvage the locator field by regex
            if let Some(caps) = LOCATOR_FIELD_REGEX.captures(&unescaped) {
                return Self::from_token(&caps[1]);
            }

            return Self::unknown(raw);
        }

        Self::from_token(trimmed)
    }

    // @parses: Plain "type=value" token, splitting at the first '=' only
    fn from_token(token: &str) -> Self {
        let token = token.trim();
        if let Some((kind, value)) = token.split_once('=') {
            let locator_type = LocatorType::from_key(kind);
            if locator_type != LocatorType::Unknown && !value.is_empty() {
                return LocatorDescriptor {
                    locator_type,
                    value: value.to_string(),
                    description: None,
                };
            }
        }
        Self::unknown(token)
    }

    /// Render this descriptor as a Playwright locator call expression.
    ///
    /// `params` holds the in-scope parameter names; a Java concatenation idiom
    /// wrapping one of them (`'...' + name + '...'`) becomes a `${name}`
    /// interpolation slot, surrounding literal text kept intact.
    pub fn emit(&self, params: &HashSet<String>) -> String {
        let value = substitute_params(&self.value, params);

        match self.locator_type {
            LocatorType::Xpath => {
                format!("locator({})", js_string(&format!("xpath={}", value), true))
            }
            LocatorType::Css => format!("locator({})", js_string(&value, true)),
            LocatorType::Id => format!("locator({})", js_string(&format!("#{}", value), false)),
            LocatorType::Name => {
                format!("locator({})", js_string(&format!("[name=\"{}\"]", value), false))
            }
            LocatorType::ClassName => {
                format!("locator({})", js_string(&format!(".{}", value), false))
            }
            LocatorType::TagName => format!("locator({})", js_string(&value, false)),
            LocatorType::LinkText | LocatorType::Text => {
                format!("getByText({})", js_string(&value, false))
            }
            LocatorType::PartialLinkText => {
                format!("getByText({}, {{ exact: false }})", js_string(&value, false))
            }
            LocatorType::Role => format!("getByRole({})", js_string(&value, false)),
            LocatorType::Label => format!("getByLabel({})", js_string(&value, false)),
            LocatorType::Placeholder => format!("getByPlaceholder({})", js_string(&value, false)),
            LocatorType::Alt => format!("getByAltText({})", js_string(&value, false)),
            LocatorType::Title => format!("getByTitle({})", js_string(&value, false)),
            // Anything else passes the raw value through as a generic selector
            LocatorType::Unknown => format!("locator({})", js_string(&value, true)),
        }
    }
}

// @replaces: Known-parameter concatenation idioms with interpolation slots
fn substitute_params(value: &str, params: &HashSet<String>) -> String {
    if params.is_empty() {
        return value.to_string();
    }

    CONCAT_PARAM_REGEX
        .replace_all(value, |caps: &regex::Captures| {
            let name = &caps[1];
            if params.contains(name) {
                format!("${{{}}}", name)
            } else {
                caps[0].to_string()
            }
        })
        .into_owned()
}

// @quotes: A value for embedding in the generated TypeScript
// Interpolated or template-forced values use backticks, anything else single quotes
fn js_string(value: &str, force_template: bool) -> String {
    if force_template || value.contains("${") {
        format!("`{}`", value.replace('`', "\\`"))
    } else {
        format!("'{}'", value.replace('\'', "\\'"))
    }
}
