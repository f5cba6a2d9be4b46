//! Field records extracted from interface definition files.
//!
//! A [`Field`] is one declaration (plain field or constant) together with
//! the comment lines found around it. Fields are grouped into [`Section`]s,
//! one per `---` separated region of the file.

use crate::line::Line;

/// Primitive type names understood by the interface definition language.
pub const PRIMITIVE_TYPES: &[&str] = &[
    "bool", "byte", "char", "int8", "uint8", "int16", "uint16", "int32", "uint32", "int64",
    "uint64", "float32", "float64", "string", "time", "duration", "Header",
];

/// The bare type name that expands to the standard header type.
pub const HEADER_TYPE: &str = "Header";

/// The fully qualified standard header type.
pub const QUALIFIED_HEADER_TYPE: &str = "std_msgs/Header";

/// The primitive type whose constants keep `#` characters in their value.
pub const STRING_TYPE: &str = "string";

/// Separator between a package name and a type name.
pub const PACKAGE_SEPARATOR: char = '/';

/// Normalize a declared type name.
///
/// Primitive types are kept as they are, except `Header` which expands to
/// `std_msgs/Header`. Compound types that already carry a package qualifier
/// are kept; bare compound types are qualified with `package`.
///
/// # Example
///
/// ```
/// # use msgdoc_core::field::normalize_type;
/// assert_eq!(normalize_type("uint8", "geometry_msgs"), "uint8");
/// assert_eq!(normalize_type("Header", "geometry_msgs"), "std_msgs/Header");
/// assert_eq!(normalize_type("Point", "geometry_msgs"), "geometry_msgs/Point");
/// assert_eq!(normalize_type("std_msgs/ColorRGBA", "geometry_msgs"), "std_msgs/ColorRGBA");
/// ```
pub fn normalize_type(type_name: &str, package: &str) -> String {
    if PRIMITIVE_TYPES.contains(&type_name) {
        if type_name == HEADER_TYPE {
            QUALIFIED_HEADER_TYPE.to_string()
        } else {
            type_name.to_string()
        }
    } else if type_name.contains(PACKAGE_SEPARATOR) {
        type_name.to_string()
    } else {
        format!("{package}{PACKAGE_SEPARATOR}{type_name}")
    }
}

/// One declaration of an interface definition with its comments.
///
/// Fields are immutable once built; see [`FieldBuilder`] for construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    line: Line,
    name: String,
    type_name: String,
    array_size: String,
    value: String,
    pre_comments: Vec<Line>,
    comment: Line,
    post_comments: Vec<Line>,
}

impl Field {
    /// Returns the declaration line this field was parsed from.
    pub fn line(&self) -> &Line {
        &self.line
    }

    /// Returns the field name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the normalized type name.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Returns the array suffix: `""`, `"[]"` or `"[N]"`.
    pub fn array_size(&self) -> &str {
        &self.array_size
    }

    /// Returns the declared constant value, empty for plain fields.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Returns `true` if this declaration is a constant.
    pub fn is_constant(&self) -> bool {
        !self.value.is_empty()
    }

    /// Returns the name as rendered in documentation, including the array suffix.
    pub fn rendered_name(&self) -> String {
        format!("{}{}", self.name, self.array_size)
    }

    /// Returns the comment lines found before the declaration.
    pub fn pre_comments(&self) -> &[Line] {
        &self.pre_comments
    }

    /// Returns the inline comment; its text is empty when there is none.
    pub fn comment(&self) -> &Line {
        &self.comment
    }

    /// Returns the comment lines found after the declaration.
    pub fn post_comments(&self) -> &[Line] {
        &self.post_comments
    }
}

/// Incremental constructor for [`Field`].
///
/// Trailing comments are only known after the following lines have been
/// scanned, so the parser keeps builders around and appends to
/// [`push_post_comment`](Self::push_post_comment) until the section is
/// closed.
#[derive(Debug, Clone)]
pub struct FieldBuilder {
    field: Field,
}

impl FieldBuilder {
    /// Start a field from its declaration line, normalized type and name.
    pub fn new(line: Line, type_name: impl Into<String>, name: impl Into<String>) -> Self {
        let comment = line.blank_at();
        Self {
            field: Field {
                line,
                name: name.into(),
                type_name: type_name.into(),
                array_size: String::new(),
                value: String::new(),
                pre_comments: Vec::new(),
                comment,
                post_comments: Vec::new(),
            },
        }
    }

    /// Set the array suffix.
    pub fn with_array_size(mut self, array_size: impl Into<String>) -> Self {
        self.field.array_size = array_size.into();
        self
    }

    /// Set the constant value.
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.field.value = value.into();
        self
    }

    /// Set the inline comment text. Provenance is taken from the declaration line.
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.field.comment = self.field.line.with_text(comment);
        self
    }

    /// Set the comment lines preceding the declaration.
    pub fn with_pre_comments(mut self, pre_comments: Vec<Line>) -> Self {
        self.field.pre_comments = pre_comments;
        self
    }

    /// Append a comment line following the declaration.
    pub fn push_post_comment(&mut self, line: Line) {
        self.field.post_comments.push(line);
    }

    /// Freeze the builder into an immutable [`Field`].
    pub fn build(self) -> Field {
        self.field
    }
}

/// The fields of one `---` separated region, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Section {
    fields: Vec<Field>,
}

impl Section {
    /// Create a section from its fields.
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    /// Returns the fields of this section.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Returns `true` if the section declares nothing.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns the number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }
}
