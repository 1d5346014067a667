use once_cell::sync::Lazy;
use regex::{Captures, Regex};

// @module: Ordered statement rule table
//
// Precedence is data: rules are evaluated in table order, first match wins.
// Families, in order: element wait-with-timeout, element actions, fixed-duration
// sleep, assertions, generic unrecognized-call passthrough.

// @const: Element read calls embedded in larger expressions
static READ_CALL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\w+)\.(getText|getAttribute|isDisplayed|isEnabled|isSelected)\(([^)]*)\)").unwrap()
});

// @const: Java double-quoted string literal
static STRING_LITERAL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#""((?:[^"\\]|\\.)*)""#).unwrap()
});

// @const: Keywords that disqualify a line from call-shaped rules
// "return" is deliberately absent: returned element reads have their own rule
const CONTROL_KEYWORDS: [&str; 15] = [
    "if", "else", "for", "while", "do", "switch", "case", "try", "catch",
    "finally", "throw", "break", "continue", "super", "this",
];

// @struct: One (predicate, transform) pair of the dispatch table
pub struct TranslationRule {
    name: &'static str,
    pattern: Regex,
    transform: fn(&Captures) -> Vec<String>,
}

impl TranslationRule {
    /// Rule identifier, used for diagnostics and recorded actions
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Match a statement against this rule's shape
    pub fn matches<'a>(&self, line: &'a str) -> Option<Captures<'a>> {
        self.pattern.captures(line)
    }

    /// Produce the converted statement lines for a match
    pub fn transform(&self, caps: &Captures) -> Vec<String> {
        (self.transform)(caps)
    }
}

/// The dispatch table, in precedence order
pub fn rules() -> &'static [TranslationRule] {
    &RULES
}

/// Whether a statement opens with a control-flow keyword.
///
/// Such lines never enter the call-shaped rules; the translator falls through
/// to its comment/drop policy for them.
pub fn is_control_flow(line: &str) -> bool {
    let first = line
        .split(|c: char| !c.is_ascii_alphabetic())
        .next()
        .unwrap_or("");
    CONTROL_KEYWORDS.contains(&first)
}

/// Convert a literal duration argument.
///
/// Values above 1000 are divided by 1000 before use; smaller literals pass
/// through unchanged. This mirrors the behavior of the legacy suites being
/// converted and is relied on by compatibility tests.
pub fn convert_duration(raw: &str) -> u64 {
    let value: u64 = raw.trim().parse().unwrap_or(0);
    if value > 1000 { value / 1000 } else { value }
}

/// Rewrite Java double-quoted string literals as single-quoted ones
pub fn convert_literals(args: &str) -> String {
    STRING_LITERAL_REGEX
        .replace_all(args, |caps: &Captures| {
            format!("'{}'", caps[1].replace('\'', "\\'"))
        })
        .into_owned()
}

/// Rewrite element read calls and string literals inside an expression
pub fn convert_expr(expr: &str) -> String {
    let replaced = READ_CALL_REGEX.replace_all(expr.trim(), |caps: &Captures| {
        format!(
            "await (await this.{}()).{}({})",
            &caps[1],
            map_read_method(&caps[2]),
            convert_literals(&caps[3])
        )
    });
    convert_literals(&replaced)
}

// @maps: Driver read methods onto their Playwright counterparts
fn map_read_method(name: &str) -> &'static str {
    match name {
        "getText" => "textContent",
        "getAttribute" => "getAttribute",
        "isDisplayed" => "isVisible",
        "isEnabled" => "isEnabled",
        "isSelected" => "isChecked",
        _ => "textContent",
    }
}

// @splits: An argument list at its single top-level comma
fn split_two_args(raw: &str) -> Option<(String, String)> {
    let mut paren_depth = 0i32;
    let mut in_string = false;
    let mut split_at = None;

    for (idx, ch) in raw.char_indices() {
        match ch {
            '"' | '\'' => in_string = !in_string,
            '(' | '[' if !in_string => paren_depth += 1,
            ')' | ']' if !in_string => paren_depth -= 1,
            ',' if !in_string && paren_depth == 0 => {
                if split_at.is_some() {
                    return None;
                }
                split_at = Some(idx);
            }
            _ => {}
        }
    }

    split_at.map(|idx| {
        (
            raw[..idx].trim().to_string(),
            raw[idx + 1..].trim().to_string(),
        )
    })
}

fn wait_with_timeout(caps: &Captures) -> Vec<String> {
    vec![format!(
        "await (await this.{}()).waitFor({{ timeout: {} }});",
        &caps[1],
        convert_duration(&caps[2])
    )]
}

fn explicit_wait(caps: &Captures) -> Vec<String> {
    let state = match &caps[1] {
        "invisibilityOf" | "invisibilityOfElementLocated" => "hidden",
        "presenceOfElement" | "presenceOfElementLocated" => "attached",
        // visibilityOf, visibilityOfElementLocated, elementToBeClickable
        _ => "visible",
    };
    vec![format!(
        "await (await this.{}()).waitFor({{ state: '{}' }});",
        &caps[2], state
    )]
}

fn element_click(caps: &Captures) -> Vec<String> {
    vec![format!("await (await this.{}()).click();", &caps[1])]
}

fn element_fill(caps: &Captures) -> Vec<String> {
    vec![format!(
        "await (await this.{}()).fill({});",
        &caps[1],
        convert_literals(caps[2].trim())
    )]
}

fn element_clear(caps: &Captures) -> Vec<String> {
    vec![format!("await (await this.{}()).clear();", &caps[1])]
}

fn page_navigate(caps: &Captures) -> Vec<String> {
    vec![format!(
        "await this.page.goto({});",
        convert_literals(caps[1].trim())
    )]
}

fn assign_element_read(caps: &Captures) -> Vec<String> {
    vec![format!(
        "const {} = await (await this.{}()).{}({});",
        &caps[1],
        &caps[2],
        map_read_method(&caps[3]),
        convert_literals(caps[4].trim())
    )]
}

fn return_element_read(caps: &Captures) -> Vec<String> {
    vec![format!(
        "return await (await this.{}()).{}({});",
        &caps[1],
        map_read_method(&caps[2]),
        convert_literals(caps[3].trim())
    )]
}

fn thread_sleep(caps: &Captures) -> Vec<String> {
    vec![format!(
        "await this.page.waitForTimeout({});",
        convert_duration(&caps[1])
    )]
}

fn assert_equals(caps: &Captures) -> Vec<String> {
    // Java order is (expected, actual); expect() takes the actual value
    match split_two_args(&caps[1]) {
        Some((expected, actual)) => vec![format!(
            "expect({}).toBe({});",
            convert_expr(&actual),
            convert_expr(&expected)
        )],
        None => vec![format!("// TODO: {}", &caps[0])],
    }
}

fn assert_true(caps: &Captures) -> Vec<String> {
    vec![format!("expect({}).toBeTruthy();", convert_expr(&caps[1]))]
}

fn assert_false(caps: &Captures) -> Vec<String> {
    vec![format!("expect({}).toBeFalsy();", convert_expr(&caps[1]))]
}

fn assert_not_null(caps: &Captures) -> Vec<String> {
    vec![format!("expect({}).not.toBeNull();", convert_expr(&caps[1]))]
}

fn local_call(caps: &Captures) -> Vec<String> {
    vec![format!(
        "await this.{}({});",
        &caps[1],
        convert_literals(caps[2].trim())
    )]
}

static RULES: Lazy<Vec<TranslationRule>> = Lazy::new(|| {
    vec![
        // Family (a): element wait with timeout
        TranslationRule {
            name: "wait-for-element-timeout",
            pattern: Regex::new(r"^waitFor\w*\(\s*(\w+)\s*,\s*(\d+)\s*\)\s*;?$").unwrap(),
            transform: wait_with_timeout,
        },
        TranslationRule {
            name: "explicit-wait-condition",
            pattern: Regex::new(
                r"^\w+\.until\(\s*ExpectedConditions\.(\w+)\(\s*(\w+)\s*\)\s*\)\s*;?$",
            )
            .unwrap(),
            transform: explicit_wait,
        },
        // Family (b): element actions
        TranslationRule {
            name: "element-click",
            pattern: Regex::new(r"^(\w+)\.click\(\)\s*;?$").unwrap(),
            transform: element_click,
        },
        TranslationRule {
            name: "element-fill",
            pattern: Regex::new(r"^(\w+)\.sendKeys\((.+)\)\s*;?$").unwrap(),
            transform: element_fill,
        },
        TranslationRule {
            name: "element-clear",
            pattern: Regex::new(r"^(\w+)\.clear\(\)\s*;?$").unwrap(),
            transform: element_clear,
        },
        TranslationRule {
            name: "page-navigate",
            pattern: Regex::new(r"^driver\.(?:get|navigate\(\)\.to)\((.+)\)\s*;?$").unwrap(),
            transform: page_navigate,
        },
        TranslationRule {
            name: "assign-element-read",
            pattern: Regex::new(
                r"^(?:final\s+)?[\w.<>\[\]]+\s+(\w+)\s*=\s*(\w+)\.(getText|getAttribute|isDisplayed|isEnabled|isSelected)\(([^)]*)\)\s*;?$",
            )
            .unwrap(),
            transform: assign_element_read,
        },
        TranslationRule {
            name: "return-element-read",
            pattern: Regex::new(
                r"^return\s+(\w+)\.(getText|getAttribute|isDisplayed|isEnabled|isSelected)\(([^)]*)\)\s*;?$",
            )
            .unwrap(),
            transform: return_element_read,
        },
        // Family (c): fixed-duration sleep
        TranslationRule {
            name: "thread-sleep",
            pattern: Regex::new(r"^Thread\.sleep\(\s*(\d+)\s*\)\s*;?$").unwrap(),
            transform: thread_sleep,
        },
        // Family (d): assertions
        TranslationRule {
            name: "assert-equals",
            pattern: Regex::new(r"^(?:Assert\.)?assertEquals\s*\((.+)\)\s*;?$").unwrap(),
            transform: assert_equals,
        },
        TranslationRule {
            name: "assert-true",
            pattern: Regex::new(r"^(?:Assert\.)?assertTrue\s*\((.+)\)\s*;?$").unwrap(),
            transform: assert_true,
        },
        TranslationRule {
            name: "assert-false",
            pattern: Regex::new(r"^(?:Assert\.)?assertFalse\s*\((.+)\)\s*;?$").unwrap(),
            transform: assert_false,
        },
        TranslationRule {
            name: "assert-not-null",
            pattern: Regex::new(r"^(?:Assert\.)?assertNotNull\s*\((.+)\)\s*;?$").unwrap(),
            transform: assert_not_null,
        },
        // Family (e): generic call passthrough
        TranslationRule {
            name: "local-call",
            pattern: Regex::new(r"^([a-z]\w*)\s*\(([^()]*)\)\s*;?$").unwrap(),
            transform: local_call,
        },
    ]
});
