/*!
 * Tests for locator descriptor parsing and selector emission
 */

use std::collections::HashSet;
use playshift::locator::{LocatorDescriptor, LocatorType};

fn no_params() -> HashSet<String> {
    HashSet::new()
}

fn params(names: &[&str]) -> HashSet<String> {
    names.iter().map(|name| name.to_string()).collect()
}

/// Test that a plain id token parses and emits the shorthand selector
#[test]
fn test_parse_withPlainIdToken_shouldEmitIdShorthand() {
    let descriptor = LocatorDescriptor::parse("id=submitBtn");

    assert_eq!(descriptor.locator_type, LocatorType::Id);
    assert_eq!(descriptor.value, "submitBtn");
    assert_eq!(descriptor.emit(&no_params()), "locator('#submitBtn')");
}

/// Test that a structured annotation value yields the locator and description
#[test]
fn test_parse_withStructuredValue_shouldDecodeLocatorAndDesc() {
    let raw = r#"{"locator":"xpath=//button[@id='ok']","desc":"OK button"}"#;
    let descriptor = LocatorDescriptor::parse(raw);

    assert_eq!(descriptor.locator_type, LocatorType::Xpath);
    assert_eq!(descriptor.value, "//button[@id='ok']");
    assert_eq!(descriptor.description.as_deref(), Some("OK button"));
    assert_eq!(
        descriptor.emit(&no_params()),
        "locator(`xpath=//button[@id='ok']`)"
    );
}

/// Test that doubled quotes inside annotation values are unescaped
#[test]
fn test_parse_withDoubledQuotes_shouldUnescapeBeforeDecoding() {
    let raw = r#"{""locator"":""css=.toolbar"",""desc"":""Toolbar""}"#;
    let descriptor = LocatorDescriptor::parse(raw);

    assert_eq!(descriptor.locator_type, LocatorType::Css);
    assert_eq!(descriptor.value, ".toolbar");
    assert_eq!(descriptor.description.as_deref(), Some("Toolbar"));
}

/// Test that the value splits at the first '=' only
#[test]
fn test_parse_withEqualsInValue_shouldSplitAtFirstEqualsOnly() {
    let descriptor = LocatorDescriptor::parse("xpath=//input[@data-kind='a=b']");

    assert_eq!(descriptor.locator_type, LocatorType::Xpath);
    assert_eq!(descriptor.value, "//input[@data-kind='a=b']");
}

/// Test that type-keyed objects are scanned in fixed priority order
#[test]
fn test_parse_withTypeKeyedObject_shouldHonorPriorityOrder() {
    // id outranks xpath regardless of key order in the object
    let raw = r#"{"xpath":"//div[@id='x']","id":"mainPanel"}"#;
    let descriptor = LocatorDescriptor::parse(raw);

    assert_eq!(descriptor.locator_type, LocatorType::Id);
    assert_eq!(descriptor.value, "mainPanel");
}

/// Test that a malformed structured value falls back to regex extraction
#[test]
fn test_parse_withMalformedJson_shouldFallBackToRegex() {
    let raw = r#"{"locator":"css=.btn-primary", oops"#;
    let descriptor = LocatorDescriptor::parse(raw);

    assert_eq!(descriptor.locator_type, LocatorType::Css);
    assert_eq!(descriptor.value, ".btn-primary");
}

/// Test that unrecognizable input returns an Unknown descriptor, never an error
#[test]
fn test_parse_withGarbage_shouldReturnUnknownDescriptor() {
    let descriptor = LocatorDescriptor::parse("complete nonsense");

    assert_eq!(descriptor.locator_type, LocatorType::Unknown);
    assert_eq!(descriptor.value, "complete nonsense");
}

/// Test that an empty value demotes the token to Unknown
#[test]
fn test_parse_withEmptyValue_shouldReturnUnknownDescriptor() {
    let descriptor = LocatorDescriptor::parse("id=");

    assert_eq!(descriptor.locator_type, LocatorType::Unknown);
}

/// Test that type keys are matched case-insensitively
#[test]
fn test_parse_withMixedCaseKey_shouldMatchCaseInsensitively() {
    let descriptor = LocatorDescriptor::parse("LinkText=Sign in");

    assert_eq!(descriptor.locator_type, LocatorType::LinkText);
    assert_eq!(descriptor.value, "Sign in");
}

/// Test the selector mapping for each locator strategy
#[test]
fn test_emit_withEachStrategy_shouldProduceExpectedCall() {
    let cases = [
        (LocatorType::Css, "div.row", "locator(`div.row`)"),
        (LocatorType::Name, "q", "locator('[name=\"q\"]')"),
        (LocatorType::ClassName, "active", "locator('.active')"),
        (LocatorType::TagName, "button", "locator('button')"),
        (LocatorType::LinkText, "Sign in", "getByText('Sign in')"),
        (
            LocatorType::PartialLinkText,
            "Sign",
            "getByText('Sign', { exact: false })",
        ),
        (LocatorType::Text, "Welcome", "getByText('Welcome')"),
        (LocatorType::Role, "button", "getByRole('button')"),
        (LocatorType::Label, "Email", "getByLabel('Email')"),
        (
            LocatorType::Placeholder,
            "Search",
            "getByPlaceholder('Search')",
        ),
        (LocatorType::Alt, "Logo", "getByAltText('Logo')"),
        (LocatorType::Title, "Close", "getByTitle('Close')"),
    ];

    for (locator_type, value, expected) in cases {
        let descriptor = LocatorDescriptor::new(locator_type, value);
        assert_eq!(descriptor.emit(&no_params()), expected);
    }
}

/// Test that single quotes inside values are escaped for the literal
#[test]
fn test_emit_withQuoteInValue_shouldEscapeQuote() {
    let descriptor = LocatorDescriptor::new(LocatorType::Id, "it's");

    assert_eq!(descriptor.emit(&no_params()), "locator('#it\\'s')");
}

/// Test that backticks inside template-quoted values are escaped
#[test]
fn test_emit_withBacktickInValue_shouldEscapeBacktick() {
    let descriptor = LocatorDescriptor::new(LocatorType::Xpath, "//pre[text()='`code`']");

    let emitted = descriptor.emit(&no_params());
    assert!(emitted.contains("\\`code\\`"));
}

/// Test that a concatenation idiom over a known parameter becomes interpolation
#[test]
fn test_emit_withKnownParameterConcat_shouldInterpolate() {
    let descriptor =
        LocatorDescriptor::new(LocatorType::Xpath, "//a[text()='\" + label + \"']");

    let emitted = descriptor.emit(&params(&["label"]));
    assert_eq!(emitted, "locator(`xpath=//a[text()='${label}']`)");
}

/// Test that a concatenation idiom over an unknown name stays literal
#[test]
fn test_emit_withUnknownParameterConcat_shouldStayLiteral() {
    let descriptor =
        LocatorDescriptor::new(LocatorType::Xpath, "//a[text()='\" + label + \"']");

    let emitted = descriptor.emit(&params(&["other"]));
    assert!(emitted.contains("+ label +"));
    assert!(!emitted.contains("${label}"));
}

/// Test that every strategy emits a non-empty complete call expression
#[test]
fn test_emit_withAnyStrategy_shouldNeverBeEmpty() {
    let types = [
        LocatorType::Xpath,
        LocatorType::Css,
        LocatorType::Id,
        LocatorType::Name,
        LocatorType::LinkText,
        LocatorType::PartialLinkText,
        LocatorType::ClassName,
        LocatorType::TagName,
        LocatorType::Text,
        LocatorType::Role,
        LocatorType::Label,
        LocatorType::Placeholder,
        LocatorType::Alt,
        LocatorType::Title,
        LocatorType::Unknown,
    ];

    for locator_type in types {
        let descriptor = LocatorDescriptor::new(locator_type, "value");
        let emitted = descriptor.emit(&no_params());
        assert!(!emitted.is_empty());
        assert!(emitted.ends_with(')'), "incomplete call: {}", emitted);
    }
}
