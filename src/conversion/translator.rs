use std::collections::HashSet;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::analysis::{ProjectAnalyzer, ProjectContext, ParameterInfo, RoleFlags};
use crate::conversion::assembler::CodeAssembler;
use crate::conversion::context::ConversionContext;
use crate::conversion::rules::{is_control_flow, rules};
use crate::locator::LocatorDescriptor;
use crate::recognition::RecordedAction;
use crate::source_document::SourceDocument;

// @module: Statement-level translation of one source document

// @const: Reason recorded for lines no matcher recognized
const REASON_NO_MATCH: &str = "no pattern match";

// @const: Reason recorded for lines kept as inert comments
const REASON_COMMENTED: &str = "commented as TODO";

// @const: Package and import declarations, consumed without output
static PACKAGE_OR_IMPORT_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:package|import)\s+[\w.*\s]+;$").unwrap()
});

// @const: Class, interface, or enum declaration
static CLASS_DECL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:public\s+|final\s+|abstract\s+)*(?:class|interface|enum)\s+(\w+)").unwrap()
});

// @const: Scenario step annotation with its phrase
static STEP_ANNOTATION_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^@(?:Given|When|Then|And|But)\s*\(\s*"(.*)"\s*\)\s*$"#).unwrap()
});

// @struct: One dropped or commented-out input line, tagged for the diagnostic side file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    // @field: 1-based source line number
    pub line_number: usize,

    // @field: Short reason string
    pub reason: String,

    // @field: Original line text
    pub text: String,
}

// @struct: Everything one file's translation produced
#[derive(Debug)]
pub struct TranslationOutcome {
    // @field: Assembler holding the converted document
    pub assembler: CodeAssembler,

    // @field: Dropped and commented-out lines, in source order
    pub skipped: Vec<SkippedLine>,

    // @field: Element interactions observed during translation
    pub actions: Vec<RecordedAction>,

    // @field: Role flags of the file's primary class
    pub role_flags: RoleFlags,

    // @field: Primary class name, if one was declared
    pub class_name: Option<String>,
}

/// Pattern-dispatch rewriter for one source document.
///
/// Shape matching only, not semantic analysis: each logical statement runs
/// through the ordered rule table; unmatched content inside a method body is
/// kept as an inert comment, unmatched content outside is dropped and logged.
pub struct StatementTranslator;

impl Default for StatementTranslator {
    fn default() -> Self {
        Self::new()
    }
}

impl StatementTranslator {
    /// Create a translator
    pub fn new() -> Self {
        StatementTranslator
    }

    /// Translate a whole document.
    ///
    /// `project` supplies cross-file classification when the batch ran an
    /// analysis pass; without it the file's own classes are classified
    /// locally.
    pub fn translate(
        &self,
        document: &SourceDocument,
        project: Option<&ProjectContext>,
    ) -> TranslationOutcome {
        let content = document.lines().join("\n");
        let local_classes = ProjectAnalyzer::parse_source(&content);
        let primary = local_classes.first();

        let role_flags = primary
            .map(|class| {
                project
                    .and_then(|context| context.get(&class.name))
                    .map(|record| record.role_flags)
                    .unwrap_or_else(|| ProjectAnalyzer::classify(class))
            })
            .unwrap_or_default();
        let class_name = primary.map(|class| class.name.clone());

        let mut ctx = ConversionContext::new();
        let mut assembler = CodeAssembler::new();
        let mut skipped: Vec<SkippedLine> = Vec::new();
        let mut actions: Vec<RecordedAction> = Vec::new();

        let mut pending_locator: Option<LocatorDescriptor> = None;
        let mut pending_step: Option<String> = None;
        let mut current_class: Option<String> = None;
        let mut dropping_body = false;

        let lines = document.lines();
        let mut idx = 0;

        while idx < lines.len() {
            let line_number = idx + 1;
            let mut statement = lines[idx].trim().to_string();

            // A construct spanning multiple lines collapses into one statement
            let mut joined = 0;
            while paren_balance(&statement) > 0 && idx + 1 < lines.len() && joined < 4 {
                idx += 1;
                joined += 1;
                statement.push(' ');
                statement.push_str(lines[idx].trim());
            }
            idx += 1;

            if statement.is_empty() {
                if ctx.in_method {
                    assembler.push_blank();
                }
                continue;
            }

            // Comments pass through untouched
            if statement.starts_with("//")
                || statement.starts_with("/*")
                || statement.starts_with('*')
            {
                if !dropping_body {
                    assembler.push_line(&statement);
                }
                continue;
            }

            let opens = statement.matches('{').count() as i32;
            let closes = statement.matches('}').count() as i32;
            let depth_before = ctx.depth;
            ctx.depth = (ctx.depth + opens - closes).max(0);

            // File level: package, imports, class declarations
            if depth_before == 0 {
                if PACKAGE_OR_IMPORT_REGEX.is_match(&statement) {
                    continue;
                }
                if let Some(phrase) = Self::match_annotation(&statement, &mut pending_locator) {
                    pending_step = phrase;
                    continue;
                }
                if let Some(caps) = CLASS_DECL_REGEX.captures(&statement) {
                    let name = caps[1].to_string();
                    Self::emit_class_scaffold(&mut assembler, &mut ctx, &name);
                    current_class = Some(name);
                    pending_locator = None;
                    continue;
                }
                skipped.push(SkippedLine {
                    line_number,
                    reason: REASON_NO_MATCH.to_string(),
                    text: statement,
                });
                continue;
            }

            // Class body level: members and the class closer
            if depth_before == 1 && !ctx.in_method && !dropping_body {
                if ctx.depth == 0 {
                    assembler.close_scope();
                    current_class = None;
                    pending_locator = None;
                    pending_step = None;
                    continue;
                }

                if let Some(phrase) = Self::match_annotation(&statement, &mut pending_locator) {
                    if phrase.is_some() {
                        pending_step = phrase;
                    }
                    continue;
                }

                let owner_class = current_class.clone().unwrap_or_default();
                if let Some(info) =
                    ProjectAnalyzer::match_method(&statement, &owner_class, &[])
                {
                    let body_follows = ctx.depth > depth_before;

                    if info.name == owner_class {
                        // Source constructor; the scaffold already emitted one
                        skipped.push(SkippedLine {
                            line_number,
                            reason: "constructor replaced by scaffold".to_string(),
                            text: statement,
                        });
                        dropping_body = body_follows;
                        continue;
                    }

                    if let Some(descriptor) = pending_locator.take() {
                        // Locator-annotated method becomes an element accessor
                        Self::emit_accessor(
                            &mut assembler,
                            &mut ctx,
                            &info.name,
                            &info.parameters,
                            &descriptor,
                        );
                        dropping_body = body_follows;
                        continue;
                    }

                    assembler.push_blank();
                    if let Some(step) = pending_step.take() {
                        assembler.push_line(&format!("// Step: {}", step));
                    }
                    let signature =
                        format!("async {}({}) {{", info.name, ts_params(&info.parameters));
                    assembler.open_scope(&signature);
                    if body_follows {
                        ctx.in_method = true;
                    } else {
                        assembler.close_scope();
                    }
                    continue;
                }

                if let Some(descriptor) = Self::match_locator_field(&statement, &mut pending_locator)
                {
                    let field_name = descriptor.0;
                    Self::emit_accessor(&mut assembler, &mut ctx, &field_name, &[], &descriptor.1);
                    continue;
                }

                skipped.push(SkippedLine {
                    line_number,
                    reason: REASON_NO_MATCH.to_string(),
                    text: statement,
                });
                continue;
            }

            // Constructor bodies are dropped wholesale
            if dropping_body {
                if ctx.depth <= 1 {
                    dropping_body = false;
                }
                continue;
            }

            // Method body level
            if ctx.in_method {
                if ctx.depth <= 1 {
                    // Method closes; translate any content before the brace
                    let remainder = statement.trim_end_matches('}').trim().to_string();
                    if !remainder.is_empty() {
                        Self::dispatch(
                            &remainder,
                            line_number,
                            &ctx,
                            &mut assembler,
                            &mut skipped,
                            &mut actions,
                        );
                    }
                    assembler.close_scope();
                    ctx.in_method = false;
                    continue;
                }

                Self::dispatch(
                    &statement,
                    line_number,
                    &ctx,
                    &mut assembler,
                    &mut skipped,
                    &mut actions,
                );
                continue;
            }

            // Anything else outside a method is dropped
            skipped.push(SkippedLine {
                line_number,
                reason: REASON_NO_MATCH.to_string(),
                text: statement,
            });
        }

        // Imports the translation accumulated
        for import in ctx.imports() {
            assembler.add_import(import);
        }

        TranslationOutcome {
            assembler,
            skipped,
            actions,
            role_flags,
            class_name,
        }
    }

    // @dispatches: One statement through the ordered rule table
    fn dispatch(
        statement: &str,
        line_number: usize,
        ctx: &ConversionContext,
        assembler: &mut CodeAssembler,
        skipped: &mut Vec<SkippedLine>,
        actions: &mut Vec<RecordedAction>,
    ) {
        if !is_control_flow(statement) {
            for rule in rules() {
                if let Some(caps) = rule.matches(statement) {
                    if let Some(action) = action_for(rule.name(), &caps) {
                        actions.push(action);
                    }
                    for line in rule.transform(&caps) {
                        assembler.push_line(&line);
                    }
                    return;
                }
            }
        }

        if ctx.in_method {
            // Content is never silently dropped inside a method
            assembler.push_line(&format!("// TODO: {}", statement));
            skipped.push(SkippedLine {
                line_number,
                reason: REASON_COMMENTED.to_string(),
                text: statement.to_string(),
            });
        } else {
            skipped.push(SkippedLine {
                line_number,
                reason: REASON_NO_MATCH.to_string(),
                text: statement.to_string(),
            });
        }
    }

    // @matches: Annotation lines; returns a step phrase when one is carried
    #[allow(clippy::option_option)]
    fn match_annotation(
        statement: &str,
        pending_locator: &mut Option<LocatorDescriptor>,
    ) -> Option<Option<String>> {
        if !statement.starts_with('@') {
            return None;
        }
        if let Some(descriptor) = ProjectAnalyzer::locator_from_annotation(statement) {
            *pending_locator = Some(descriptor);
            return Some(None);
        }
        if let Some(caps) = STEP_ANNOTATION_REGEX.captures(statement) {
            return Some(Some(caps[1].to_string()));
        }
        // Other annotations are consumed without output
        Some(None)
    }

    // @matches: Field declaration carrying a pending locator annotation
    fn match_locator_field(
        statement: &str,
        pending_locator: &mut Option<LocatorDescriptor>,
    ) -> Option<(String, LocatorDescriptor)> {
        let descriptor = pending_locator.take()?;
        match ProjectAnalyzer::parse_source(&format!("class Holder {{\n{}\n}}", statement))
            .into_iter()
            .next()
            .and_then(|class| class.fields.into_iter().next())
        {
            Some(field) => Some((field.name, descriptor)),
            None => {
                // Annotation attached to something that is not a field
                *pending_locator = Some(descriptor);
                None
            }
        }
    }

    // @emits: Class scaffold with page handle and constructor
    fn emit_class_scaffold(assembler: &mut CodeAssembler, ctx: &mut ConversionContext, name: &str) {
        ctx.note_import("import type { Page } from '@playwright/test';");
        assembler.open_scope(&format!("export class {} {{", name));
        assembler.push_line("readonly page: Page;");
        assembler.push_blank();
        assembler.open_scope("constructor(page: Page) {");
        assembler.push_line("this.page = page;");
        assembler.close_scope();
    }

    // @emits: Element accessor method from a locator descriptor
    fn emit_accessor(
        assembler: &mut CodeAssembler,
        ctx: &mut ConversionContext,
        name: &str,
        parameters: &[ParameterInfo],
        descriptor: &LocatorDescriptor,
    ) {
        if ctx.is_accessor(name) {
            // A duplicate annotation would shadow the earlier accessor
            return;
        }

        let params: HashSet<String> = parameters
            .iter()
            .map(|param| param.name.clone())
            .collect();

        assembler.push_blank();
        if let Some(description) = &descriptor.description {
            assembler.push_line(&format!("// {}", description));
        }
        assembler.open_scope(&format!("async {}({}) {{", name, ts_params(parameters)));
        assembler.push_line(&format!("return this.page.{};", descriptor.emit(&params)));
        assembler.close_scope();
        ctx.note_accessor(name);
    }
}

// @maps: Matched rules onto recorded element interactions
fn action_for(rule_name: &str, caps: &Captures) -> Option<RecordedAction> {
    let capture = |index: usize| caps.get(index).map(|m| m.as_str().to_string());
    match rule_name {
        "element-click" => Some(RecordedAction::new("click", capture(1), None)),
        "element-fill" => Some(RecordedAction::new("fill", capture(1), capture(2))),
        "element-clear" => Some(RecordedAction::new("clear", capture(1), None)),
        "page-navigate" => Some(RecordedAction::new("navigate", None, capture(1))),
        "wait-for-element-timeout" => Some(RecordedAction::new("wait", capture(1), None)),
        "explicit-wait-condition" => Some(RecordedAction::new("wait", capture(2), None)),
        "thread-sleep" => Some(RecordedAction::new("sleep", None, capture(1))),
        _ => None,
    }
}

// @counts: Net unclosed parentheses, string contents ignored
fn paren_balance(line: &str) -> i32 {
    let mut balance = 0i32;
    let mut in_string = false;
    let mut previous = ' ';
    for ch in line.chars() {
        match ch {
            '"' if previous != '\\' => in_string = !in_string,
            '(' if !in_string => balance += 1,
            ')' if !in_string => balance -= 1,
            _ => {}
        }
        previous = ch;
    }
    balance
}

// @renders: Typed TypeScript parameter list
fn ts_params(parameters: &[ParameterInfo]) -> String {
    parameters
        .iter()
        .map(|param| format!("{}: {}", param.name, ts_type(&param.param_type)))
        .collect::<Vec<_>>()
        .join(", ")
}

// @maps: Java parameter types onto TypeScript ones
fn ts_type(java_type: &str) -> &'static str {
    let base = java_type
        .split('<')
        .next()
        .unwrap_or(java_type)
        .rsplit('.')
        .next()
        .unwrap_or(java_type);
    match base {
        "String" | "char" | "CharSequence" => "string",
        "int" | "long" | "short" | "byte" | "double" | "float" | "Integer" | "Long"
        | "Double" | "Float" => "number",
        "boolean" | "Boolean" => "boolean",
        _ => "any",
    }
}
