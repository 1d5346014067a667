use std::collections::BTreeMap;

use crate::locator::LocatorDescriptor;

// @module: Class records and the project-wide symbol table

// @struct: Single declared field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldInfo {
    // @field: Field name
    pub name: String,

    // @field: Declared type
    pub field_type: String,

    // @field: Annotation lines attached to the field, raw text
    pub annotations: Vec<String>,

    // @field: Locator decoded from an element annotation, if any
    pub locator: Option<LocatorDescriptor>,
}

// @struct: Method parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterInfo {
    // @field: Parameter name
    pub name: String,

    // @field: Declared type
    pub param_type: String,
}

// @struct: Single declared method
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodInfo {
    // @field: Method name
    pub name: String,

    // @field: Declared return type; constructors use the class name
    pub return_type: String,

    // @field: Parameters in declaration order
    pub parameters: Vec<ParameterInfo>,

    // @field: Visibility keyword, "package" when omitted
    pub visibility: String,

    // @field: Whether the method is static
    pub is_static: bool,

    // @field: Annotation lines attached to the method, raw text
    pub annotations: Vec<String>,

    // @field: Body lines, braces excluded
    pub raw_body: Vec<String>,

    // @field: Scenario step phrase from a step annotation, if any
    pub step_description: Option<String>,
}

impl MethodInfo {
    /// Whether this method carries a scenario-step annotation
    pub fn is_step(&self) -> bool {
        self.step_description.is_some()
    }
}

/// Independently computed role classifications; not mutually exclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RoleFlags {
    /// Class encapsulates locators and interactions for one UI screen
    pub is_page_object: bool,

    /// Class is an exception type
    pub is_exception: bool,

    /// Class holds scenario step methods
    pub is_step_definition: bool,

    /// Class is a static helper collection
    pub is_utility: bool,

    /// Class wraps a single UI element
    pub is_element_wrapper: bool,
}

/// Everything the analysis pass learned about one source class
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassInfo {
    /// Simple class name
    pub name: String,

    /// Declared package, empty when absent
    pub package_name: String,

    /// Declared parent type, if any
    pub extends: Option<String>,

    /// Implemented interfaces
    pub implements: Vec<String>,

    /// Declared fields
    pub fields: Vec<FieldInfo>,

    /// Declared methods
    pub methods: Vec<MethodInfo>,

    /// Import statements, raw symbol paths
    pub imports: Vec<String>,

    /// Computed role flags
    pub role_flags: RoleFlags,
}

impl ClassInfo {
    /// Create an empty record for a class declaration
    pub fn new(name: impl Into<String>, package_name: impl Into<String>) -> Self {
        ClassInfo {
            name: name.into(),
            package_name: package_name.into(),
            extends: None,
            implements: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
            imports: Vec::new(),
            role_flags: RoleFlags::default(),
        }
    }
}

/// Immutable symbol table built once per batch, before any translation.
///
/// Keyed by simple class name; read-only during translation and discarded
/// when the batch ends.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectContext {
    classes: BTreeMap<String, ClassInfo>,
}

impl ProjectContext {
    /// Build a context from classified records
    pub fn from_classes(classes: Vec<ClassInfo>) -> Self {
        ProjectContext {
            classes: classes
                .into_iter()
                .map(|class| (class.name.clone(), class))
                .collect(),
        }
    }

    /// Look up a class by simple name
    pub fn get(&self, name: &str) -> Option<&ClassInfo> {
        self.classes.get(name)
    }

    /// Whether the given type name classified as an element wrapper
    pub fn is_element_wrapper(&self, type_name: &str) -> bool {
        self.get(type_name)
            .is_some_and(|class| class.role_flags.is_element_wrapper)
    }

    /// Whether the given class classified as a page object
    pub fn is_page_object(&self, name: &str) -> bool {
        self.get(name)
            .is_some_and(|class| class.role_flags.is_page_object)
    }

    /// All known class names, in deterministic order
    pub fn class_names(&self) -> impl Iterator<Item = &str> {
        self.classes.keys().map(String::as_str)
    }

    /// Number of classes in the table
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Whether the table is empty
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}
