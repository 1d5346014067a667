use std::path::PathBuf;
use anyhow::Result;
use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::analysis::model::{ClassInfo, FieldInfo, MethodInfo, ParameterInfo, ProjectContext, RoleFlags};
use crate::file_utils::FileManager;
use crate::locator::{LocatorDescriptor, LocatorType};

// @module: Heuristic source scanner and role classification

// @const: Package declaration
static PACKAGE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^package\s+([\w.]+)\s*;").unwrap()
});

// @const: Import declaration, static imports included
static IMPORT_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^import\s+(?:static\s+)?([\w.*]+)\s*;").unwrap()
});

// @const: Class, interface, or enum declaration
static CLASS_DECL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:public\s+|final\s+|abstract\s+)*(?:class|interface|enum)\s+(\w+)(?:\s+extends\s+([\w.<>]+))?(?:\s+implements\s+([\w.,\s<>]+?))?\s*\{?\s*$").unwrap()
});

// @const: Annotation line, arguments optional
static ANNOTATION_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^@(\w+)\s*(?:\((.*)\))?\s*$").unwrap()
});

// @const: Scenario step annotation with its phrase
static STEP_ANNOTATION_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^@(Given|When|Then|And|But)\s*\(\s*"(.*)"\s*\)\s*$"#).unwrap()
});

// @const: Method declaration with a return type
static METHOD_DECL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:(public|private|protected)\s+)?(?:(static)\s+)?(?:final\s+|synchronized\s+)*([\w.<>\[\]]+)\s+(\w+)\s*\(([^)]*)\)\s*(?:throws\s+[\w.,\s]+)?\s*[{;]?\s*$").unwrap()
});

// @const: Constructor declaration, no return type
static CTOR_DECL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:(public|private|protected)\s+)?(\w+)\s*\(([^)]*)\)\s*(?:throws\s+[\w.,\s]+)?\s*\{?\s*$").unwrap()
});

// @const: Field declaration with optional initializer
static FIELD_DECL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:(?:public|private|protected)\s+)?(?:static\s+)?(?:final\s+)?([\w.<>\[\]]+)\s+(\w+)\s*(?:=.*)?;$").unwrap()
});

// @const: FindBy-style single key/value annotation argument
static FINDBY_PAIR_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^(\w+)\s*=\s*"([^"]*)"$"#).unwrap()
});

// @const: Element action call shapes in method bodies
static ACTION_CALL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\.\s*(click|sendKeys|clear|submit|getText|getAttribute|isDisplayed|isEnabled|isSelected)\s*\(").unwrap()
});

// @const: Keywords the method regex must not mistake for return types
const STATEMENT_KEYWORDS: [&str; 8] = [
    "new", "return", "if", "else", "while", "for", "switch", "catch",
];

// @const: Annotations that carry an element locator
const LOCATOR_ANNOTATIONS: [&str; 5] = [
    "FindBy", "ElementInfo", "ElementDesc", "Locator", "ElementLocator",
];

const PAGE_SUFFIXES: [&str; 3] = ["Page", "Screen", "View"];
const PAGE_PACKAGE_HINTS: [&str; 4] = ["page", "pages", "screen", "screens"];
const EXCEPTION_SUFFIXES: [&str; 2] = ["Exception", "Error"];
const EXCEPTION_PARENTS: [&str; 9] = [
    "Exception", "RuntimeException", "Throwable", "Error",
    "IllegalStateException", "IllegalArgumentException",
    "WebDriverException", "TimeoutException", "NoSuchElementException",
];
const STEP_SUFFIXES: [&str; 3] = ["Steps", "StepDefs", "StepDefinitions"];
const STEP_PACKAGE_HINTS: [&str; 4] = ["step", "steps", "stepdefs", "stepdefinitions"];
const UTILITY_SUFFIXES: [&str; 6] = ["Util", "Utils", "Helper", "Helpers", "Utility", "Utilities"];
const UTILITY_PACKAGE_HINTS: [&str; 4] = ["util", "utils", "helper", "helpers"];
const WRAPPER_SUFFIXES: [&str; 4] = ["Element", "Control", "Widget", "Component"];

// @const: Field types recognized as element wrappers
const ELEMENT_WRAPPER_TYPES: [&str; 12] = [
    "WebElement", "MobileElement", "RemoteWebElement", "HtmlElement",
    "TypifiedElement", "ExtendedWebElement", "Button", "TextInput",
    "Link", "CheckBox", "Select", "Image",
];

// @struct: Analysis pass over a batch of source files
pub struct ProjectAnalyzer;

impl ProjectAnalyzer {
    /// Scan every input file and build the immutable project context.
    ///
    /// Unreadable files are logged and skipped; the pass never fails the
    /// batch. Classification is order-independent: each record is classified
    /// from its own contents only, so any file order yields the same table.
    pub fn analyze_files(paths: &[PathBuf]) -> Result<ProjectContext> {
        let mut classes = Vec::new();

        for path in paths {
            match FileManager::read_to_string(path) {
                Ok(content) => classes.extend(Self::parse_source(&content)),
                Err(e) => warn!("Skipping unreadable file during analysis: {:?}: {}", path, e),
            }
        }

        let classified: Vec<ClassInfo> = classes
            .into_iter()
            .map(|mut class| {
                class.role_flags = Self::classify(&class);
                class
            })
            .collect();

        debug!("Analysis pass built {} class records", classified.len());
        Ok(ProjectContext::from_classes(classified))
    }

    /// Parse all top-level class declarations out of one source text.
    ///
    /// Tolerant line-oriented scan, not a compiler front end: lines that fit
    /// no known declaration shape are ignored.
    pub fn parse_source(content: &str) -> Vec<ClassInfo> {
        let mut classes: Vec<ClassInfo> = Vec::new();
        let mut package = String::new();
        let mut imports: Vec<String> = Vec::new();
        let mut pending_annotations: Vec<String> = Vec::new();
        let mut current: Option<ClassInfo> = None;
        let mut method: Option<MethodInfo> = None;
        let mut depth: i32 = 0;

        for raw_line in content.lines() {
            let trimmed = raw_line.trim();

            if trimmed.is_empty()
                || trimmed.starts_with("//")
                || trimmed.starts_with("/*")
                || trimmed.starts_with('*')
            {
                continue;
            }

            let opens = trimmed.matches('{').count() as i32;
            let closes = trimmed.matches('}').count() as i32;
            let next_depth = depth + opens - closes;

            // File-level declarations
            if depth == 0 {
                if let Some(caps) = PACKAGE_REGEX.captures(trimmed) {
                    package = caps[1].to_string();
                } else if let Some(caps) = IMPORT_REGEX.captures(trimmed) {
                    imports.push(caps[1].to_string());
                } else if ANNOTATION_REGEX.is_match(trimmed) {
                    pending_annotations.push(trimmed.to_string());
                } else if let Some(caps) = CLASS_DECL_REGEX.captures(trimmed) {
                    let mut class = ClassInfo::new(&caps[1], package.clone());
                    class.extends = caps.get(2).map(|m| m.as_str().to_string());
                    class.implements = caps
                        .get(3)
                        .map(|m| {
                            m.as_str()
                                .split(',')
                                .map(|part| part.trim().to_string())
                                .filter(|part| !part.is_empty())
                                .collect()
                        })
                        .unwrap_or_default();
                    class.imports = imports.clone();
                    current = Some(class);
                    pending_annotations.clear();
                }
                depth = next_depth.max(0);
                continue;
            }

            // Class body level
            if depth == 1 && method.is_none() {
                if next_depth <= 0 {
                    // Class closes
                    if let Some(class) = current.take() {
                        classes.push(class);
                    }
                    pending_annotations.clear();
                    depth = next_depth.max(0);
                    continue;
                }

                if ANNOTATION_REGEX.is_match(trimmed) {
                    pending_annotations.push(trimmed.to_string());
                    continue;
                }

                if let Some(class) = current.as_mut() {
                    if let Some(info) =
                        Self::match_method(trimmed, &class.name, &pending_annotations)
                    {
                        pending_annotations.clear();
                        if trimmed.contains('{') && next_depth > depth {
                            // Body follows on later lines
                            method = Some(info);
                        } else {
                            // Abstract or one-line declaration
                            class.methods.push(info);
                        }
                    } else if let Some(field) =
                        Self::match_field(trimmed, &pending_annotations)
                    {
                        pending_annotations.clear();
                        class.fields.push(field);
                    } else {
                        // Static initializers and other unrecognized members
                        pending_annotations.clear();
                    }
                }
                depth = next_depth.max(0);
                continue;
            }

            // Inside a method body
            if let Some(info) = method.as_mut() {
                if next_depth <= 1 {
                    let remainder = trimmed.trim_end_matches('}').trim();
                    if !remainder.is_empty() {
                        info.raw_body.push(remainder.to_string());
                    }
                    if let Some(class) = current.as_mut() {
                        class.methods.push(method.take().unwrap());
                    } else {
                        method = None;
                    }
                } else {
                    info.raw_body.push(trimmed.to_string());
                }
            }
            depth = next_depth.max(0);
        }

        // Unterminated class at EOF still yields its record
        if let Some(mut class) = current.take() {
            if let Some(info) = method.take() {
                class.methods.push(info);
            }
            classes.push(class);
        }

        classes
    }

    /// Match a method or constructor declaration at class-body level
    pub fn match_method(line: &str, class_name: &str, annotations: &[String]) -> Option<MethodInfo> {
        let step_description = annotations.iter().find_map(|annotation| {
            STEP_ANNOTATION_REGEX
                .captures(annotation)
                .map(|caps| caps[2].to_string())
        });

        if let Some(caps) = CTOR_DECL_REGEX.captures(line) {
            if &caps[2] == class_name {
                return Some(MethodInfo {
                    name: class_name.to_string(),
                    return_type: class_name.to_string(),
                    parameters: Self::split_params(caps.get(3).map_or("", |m| m.as_str())),
                    visibility: caps
                        .get(1)
                        .map_or_else(|| "package".to_string(), |m| m.as_str().to_string()),
                    is_static: false,
                    annotations: annotations.to_vec(),
                    raw_body: Vec::new(),
                    step_description,
                });
            }
        }

        let caps = METHOD_DECL_REGEX.captures(line)?;
        let return_type = caps[3].to_string();
        if STATEMENT_KEYWORDS.contains(&return_type.as_str()) {
            return None;
        }

        Some(MethodInfo {
            name: caps[4].to_string(),
            return_type,
            parameters: Self::split_params(caps.get(5).map_or("", |m| m.as_str())),
            visibility: caps
                .get(1)
                .map_or_else(|| "package".to_string(), |m| m.as_str().to_string()),
            is_static: caps.get(2).is_some(),
            annotations: annotations.to_vec(),
            raw_body: Vec::new(),
            step_description,
        })
    }

    // @matches: Field declaration at class-body level
    fn match_field(line: &str, annotations: &[String]) -> Option<FieldInfo> {
        let caps = FIELD_DECL_REGEX.captures(line)?;
        let field_type = caps[1].to_string();
        if STATEMENT_KEYWORDS.contains(&field_type.as_str()) {
            return None;
        }

        Some(FieldInfo {
            name: caps[2].to_string(),
            field_type,
            annotations: annotations.to_vec(),
            locator: annotations.iter().find_map(|a| Self::locator_from_annotation(a)),
        })
    }

    /// Decode an element locator from an annotation line, if it carries one
    pub fn locator_from_annotation(raw: &str) -> Option<LocatorDescriptor> {
        let caps = ANNOTATION_REGEX.captures(raw.trim())?;
        if !LOCATOR_ANNOTATIONS.contains(&&caps[1]) {
            return None;
        }

        let args = caps.get(2).map_or("", |m| m.as_str()).trim();
        if args.is_empty() {
            return None;
        }

        // FindBy style: @FindBy(id = "submitBtn")
        if let Some(pair) = FINDBY_PAIR_REGEX.captures(args) {
            let locator_type = LocatorType::from_key(&pair[1]);
            if locator_type != LocatorType::Unknown && !pair[2].is_empty() {
                return Some(LocatorDescriptor::new(locator_type, &pair[2]));
            }
        }

        // String-argument style: the annotation wraps a locator string
        let inner = args
            .strip_prefix('"')
            .and_then(|rest| rest.strip_suffix('"'))
            .unwrap_or(args);
        Some(LocatorDescriptor::parse(inner))
    }

    // @splits: Parameter list on commas, keeping generic arguments whole
    fn split_params(raw: &str) -> Vec<ParameterInfo> {
        let mut parts: Vec<String> = Vec::new();
        let mut current = String::new();
        let mut angle_depth = 0i32;

        for ch in raw.chars() {
            match ch {
                '<' => angle_depth += 1,
                '>' => angle_depth -= 1,
                ',' if angle_depth == 0 => {
                    parts.push(current.trim().to_string());
                    current.clear();
                    continue;
                }
                _ => {}
            }
            current.push(ch);
        }
        if !current.trim().is_empty() {
            parts.push(current.trim().to_string());
        }

        parts
            .into_iter()
            .filter_map(|part| {
                let mut tokens: Vec<&str> = part.split_whitespace().collect();
                // Drop parameter annotations and the final keyword
                tokens.retain(|token| !token.starts_with('@') && *token != "final");
                let name = tokens.pop()?;
                if tokens.is_empty() {
                    return None;
                }
                Some(ParameterInfo {
                    name: name.to_string(),
                    param_type: tokens.join(" "),
                })
            })
            .collect()
    }

    /// Compute the independent role flags for one class record.
    ///
    /// Idempotent and self-contained: depends only on the record itself,
    /// never on another class's flags.
    pub fn classify(class: &ClassInfo) -> RoleFlags {
        RoleFlags {
            is_page_object: Self::is_page_object(class),
            is_exception: Self::is_exception(class),
            is_step_definition: Self::is_step_definition(class),
            is_utility: Self::is_utility(class),
            is_element_wrapper: Self::is_element_wrapper(class),
        }
    }

    fn has_name_suffix(name: &str, suffixes: &[&str]) -> bool {
        suffixes.iter().any(|suffix| name.ends_with(suffix))
    }

    fn has_package_segment(package: &str, hints: &[&str]) -> bool {
        package
            .split('.')
            .any(|segment| hints.contains(&segment.to_lowercase().as_str()))
    }

    // @strips: Package path, generics, and array suffix off a type name
    fn base_type(type_name: &str) -> &str {
        let no_generics = type_name.split('<').next().unwrap_or(type_name);
        let no_array = no_generics.trim_end_matches("[]");
        no_array.rsplit('.').next().unwrap_or(no_array)
    }

    fn is_page_object(class: &ClassInfo) -> bool {
        let name_hint = Self::has_name_suffix(&class.name, &PAGE_SUFFIXES)
            || Self::has_package_segment(&class.package_name, &PAGE_PACKAGE_HINTS);
        if !name_hint {
            return false;
        }

        let has_wrapper_field = class.fields.iter().any(|field| {
            ELEMENT_WRAPPER_TYPES.contains(&Self::base_type(&field.field_type))
                || field.locator.is_some()
        });
        let has_action_shape = class.methods.iter().any(|method| {
            method.raw_body.iter().any(|line| ACTION_CALL_REGEX.is_match(line))
        });

        has_wrapper_field || has_action_shape
    }

    fn is_exception(class: &ClassInfo) -> bool {
        if Self::has_name_suffix(&class.name, &EXCEPTION_SUFFIXES) {
            return true;
        }

        if let Some(parent) = &class.extends {
            if EXCEPTION_PARENTS.contains(&Self::base_type(parent)) {
                return true;
            }
        }

        // Constructor shape: no-arg, or single message/cause argument
        class.methods.iter().any(|method| {
            method.name == class.name
                && match method.parameters.as_slice() {
                    [] => true,
                    [only] => matches!(
                        Self::base_type(&only.param_type),
                        "String" | "Throwable" | "Exception"
                    ),
                    _ => false,
                }
        })
    }

    fn is_step_definition(class: &ClassInfo) -> bool {
        class.methods.iter().any(MethodInfo::is_step)
            || Self::has_name_suffix(&class.name, &STEP_SUFFIXES)
            || Self::has_package_segment(&class.package_name, &STEP_PACKAGE_HINTS)
    }

    fn is_utility(class: &ClassInfo) -> bool {
        let name_hint = Self::has_name_suffix(&class.name, &UTILITY_SUFFIXES)
            || Self::has_package_segment(&class.package_name, &UTILITY_PACKAGE_HINTS);
        if !name_hint || class.methods.is_empty() {
            return false;
        }

        let static_count = class.methods.iter().filter(|method| method.is_static).count();
        static_count * 2 > class.methods.len()
    }

    fn is_element_wrapper(class: &ClassInfo) -> bool {
        let type_hint = Self::has_name_suffix(&class.name, &WRAPPER_SUFFIXES)
            || class
                .extends
                .iter()
                .chain(class.implements.iter())
                .any(|parent| ELEMENT_WRAPPER_TYPES.contains(&Self::base_type(parent)));
        if !type_hint {
            return false;
        }

        // Canonical element-action set: click plus at least one state accessor
        let has_method = |name: &str| class.methods.iter().any(|method| method.name == name);
        has_method("click")
            && ["sendKeys", "setText", "getText", "isDisplayed"]
                .iter()
                .any(|name| has_method(name))
    }
}
