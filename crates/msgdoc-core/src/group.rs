//! Section role configuration.
//!
//! Every schema flavour is described by a [`TypeKind`]: its file extension
//! and an ordered list of [`FieldGroup`]s, one per `---` separated section.
//! The groups only carry labels; the parsing and rendering engine is the same
//! for all kinds.

use std::{fmt, str::FromStr};

use serde::Deserialize;

use crate::field::Field;

/// Suffix appended to a role tag for type fragments.
pub const TYPE_SUFFIX: &str = "-type";

/// Suffix appended to a role tag for value fragments.
pub const VALUE_SUFFIX: &str = "-value";

/// Rendering labels for the fields and constants of one section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldGroup {
    field_name: &'static str,
    field_label: &'static str,
    constant_name: &'static str,
    constant_label: &'static str,
}

impl FieldGroup {
    /// Create a group from its role tags and human readable labels.
    pub const fn new(
        field_name: &'static str,
        field_label: &'static str,
        constant_name: &'static str,
        constant_label: &'static str,
    ) -> Self {
        Self {
            field_name,
            field_label,
            constant_name,
            constant_label,
        }
    }

    /// Returns the role tag for plain fields, e.g. `req-field`.
    pub fn field_name(&self) -> &'static str {
        self.field_name
    }

    /// Returns the label for plain fields, e.g. `Field (Request)`.
    pub fn field_label(&self) -> &'static str {
        self.field_label
    }

    /// Returns the role tag for constants, e.g. `req-constant`.
    pub fn constant_name(&self) -> &'static str {
        self.constant_name
    }

    /// Returns the label for constants.
    pub fn constant_label(&self) -> &'static str {
        self.constant_label
    }

    /// Returns the role tag that applies to `field`.
    pub fn role_for(&self, field: &Field) -> &'static str {
        if field.is_constant() {
            self.constant_name
        } else {
            self.field_name
        }
    }

    /// Describe the documentation field types this group produces.
    ///
    /// A host that turns fragments into presentation nodes uses these to
    /// know which role tags are typed (carry a `-type` companion) and which
    /// are grouped value lists.
    pub fn doc_field_types(&self) -> Vec<DocFieldType> {
        vec![
            DocFieldType::Typed {
                name: self.field_name.to_string(),
                label: self.field_label.to_string(),
                type_name: format!("{}{TYPE_SUFFIX}", self.field_name),
            },
            DocFieldType::Typed {
                name: self.constant_name.to_string(),
                label: self.constant_label.to_string(),
                type_name: format!("{}{TYPE_SUFFIX}", self.constant_name),
            },
            DocFieldType::Grouped {
                name: format!("{}{VALUE_SUFFIX}", self.constant_name),
                label: format!("{} (Value)", self.constant_label),
            },
        ]
    }
}

/// A documentation field type declared by a [`FieldGroup`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocFieldType {
    /// A field list entry with a companion type entry.
    Typed {
        name: String,
        label: String,
        type_name: String,
    },
    /// A plain grouped list of entries.
    Grouped { name: String, label: String },
}

const MESSAGE_GROUPS: &[FieldGroup] = &[FieldGroup::new(
    "field", "Field", "constant", "Constant",
)];

const SERVICE_GROUPS: &[FieldGroup] = &[
    FieldGroup::new(
        "req-field",
        "Field (Request)",
        "req-constant",
        "Constant (Request)",
    ),
    FieldGroup::new(
        "res-field",
        "Field (Response)",
        "res-constant",
        "Constant (Response)",
    ),
];

const ACTION_GROUPS: &[FieldGroup] = &[
    FieldGroup::new(
        "goal-field",
        "Field (Goal)",
        "goal-constant",
        "Constant (Goal)",
    ),
    FieldGroup::new(
        "result-field",
        "Field (Result)",
        "result-constant",
        "Constant (Result)",
    ),
    FieldGroup::new(
        "feedback-field",
        "Field (Feedback)",
        "feedback-constant",
        "Constant (Feedback)",
    ),
];

/// The flavour of an interface definition file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    /// A `.msg` file with a single section.
    #[default]
    Msg,
    /// A `.srv` file with request and response sections.
    Srv,
    /// An `.action` file with goal, result and feedback sections.
    Action,
}

impl TypeKind {
    /// Returns the file extension, which is also the directory name.
    pub fn extension(&self) -> &'static str {
        match self {
            TypeKind::Msg => "msg",
            TypeKind::Srv => "srv",
            TypeKind::Action => "action",
        }
    }

    /// Returns the section groups in positional order.
    pub fn groups(&self) -> &'static [FieldGroup] {
        match self {
            TypeKind::Msg => MESSAGE_GROUPS,
            TypeKind::Srv => SERVICE_GROUPS,
            TypeKind::Action => ACTION_GROUPS,
        }
    }

    /// Returns the documentation field types of all groups.
    pub fn doc_field_types(&self) -> Vec<DocFieldType> {
        self.groups()
            .iter()
            .flat_map(FieldGroup::doc_field_types)
            .collect()
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for TypeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "msg" => Ok(TypeKind::Msg),
            "srv" => Ok(TypeKind::Srv),
            "action" => Ok(TypeKind::Action),
            _ => Err(format!(
                "unknown interface kind `{s}`, expected one of: msg, srv, action"
            )),
        }
    }
}
