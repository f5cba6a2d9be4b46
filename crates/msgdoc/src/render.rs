//! Field rendering.
//!
//! Turns parsed [`Section`]s into field-list [`Fragment`]s:
//!
//! ```text
//! :field x: position along the x axis
//! :field-type x: float64
//! :constant MAX: upper bound
//! :constant-type MAX: int32
//! :constant-value MAX: 10
//! ```
//!
//! Every fragment keeps the provenance of the source line it was built
//! from.

use std::fmt;

use log::debug;

use msgdoc_core::{
    blocks,
    field::{Field, Section},
    group::{FieldGroup, TYPE_SUFFIX, TypeKind, VALUE_SUFFIX},
    line::Line,
    options::PlacementPolicy,
};

use crate::resolve::resolve;

/// Prefix for continuation lines of a quoted description.
const QUOTED_CONTINUATION: &str = "  | ";

/// Prefix for continuation lines of a plain description.
const PLAIN_CONTINUATION: &str = "  ";

/// What a fragment describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FragmentKind {
    /// The field description, `:<role> <name>: <text>`.
    Description,
    /// The field type, `:<role>-type <name>: <type>`.
    Type,
    /// The constant value, `:<role>-value <name>: <value>`.
    Value,
}

impl fmt::Display for FragmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FragmentKind::Description => f.write_str("description"),
            FragmentKind::Type => f.write_str("type"),
            FragmentKind::Value => f.write_str("value"),
        }
    }
}

/// One entry of a rendered field list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    kind: FragmentKind,
    role: &'static str,
    name: String,
    text: Line,
    continuation: Vec<Line>,
    linked_value: Option<String>,
}

impl Fragment {
    fn new(kind: FragmentKind, role: &'static str, name: String, text: Line) -> Self {
        Self {
            kind,
            role,
            name,
            text,
            continuation: Vec::new(),
            linked_value: None,
        }
    }

    fn with_continuation(mut self, continuation: Vec<Line>) -> Self {
        self.continuation = continuation;
        self
    }

    /// Returns what this fragment describes.
    pub fn kind(&self) -> FragmentKind {
        self.kind
    }

    /// Returns the role tag, e.g. `req-constant`.
    pub fn role(&self) -> &'static str {
        self.role
    }

    /// Returns the full tag including the kind suffix, e.g. `field-type`.
    pub fn tag(&self) -> String {
        match self.kind {
            FragmentKind::Description => self.role.to_string(),
            FragmentKind::Type => format!("{}{TYPE_SUFFIX}", self.role),
            FragmentKind::Value => format!("{}{VALUE_SUFFIX}", self.role),
        }
    }

    /// Returns the rendered field name including any array suffix.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the inline body text.
    pub fn text(&self) -> &str {
        self.text.text()
    }

    /// Returns the source line the inline body was taken from.
    pub fn source(&self) -> &Line {
        &self.text
    }

    /// Returns the continuation lines of a multi-line description.
    pub fn continuation(&self) -> &[Line] {
        &self.continuation
    }

    /// Returns the constant value folded into this description, if any.
    pub fn linked_value(&self) -> Option<&str> {
        self.linked_value.as_deref()
    }

    /// Render the fragment as field-list lines.
    pub fn lines(&self) -> Vec<Line> {
        let mut body = self.text.text().to_string();
        if let Some(value) = &self.linked_value {
            if !body.is_empty() {
                body.push(' ');
            }
            body.push_str(&format!("(``{value}``)"));
        }

        let head = if body.is_empty() {
            format!(":{} {}:", self.tag(), self.name)
        } else {
            format!(":{} {}: {body}", self.tag(), self.name)
        };

        let mut lines = Vec::with_capacity(1 + self.continuation.len());
        lines.push(self.text.with_text(head));
        lines.extend(self.continuation.iter().cloned());
        lines
    }
}

/// The fragments of one section, rendered with its [`FieldGroup`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedSection {
    group: FieldGroup,
    fragments: Vec<Fragment>,
}

impl RenderedSection {
    /// Returns the group the section was rendered with.
    pub fn group(&self) -> &FieldGroup {
        &self.group
    }

    /// Returns the fragments in field order.
    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    /// Fold constant values into their descriptions.
    ///
    /// See [`link_values`].
    pub fn link_values(&mut self) {
        link_values(&mut self.fragments);
    }

    /// Render the section as lines, preceded by a blank line.
    ///
    /// An empty section renders to nothing.
    pub fn lines(&self) -> Vec<Line> {
        let Some(first) = self.fragments.first() else {
            return Vec::new();
        };
        let mut lines = vec![first.source().blank_at()];
        lines.extend(self.fragments.iter().flat_map(Fragment::lines));
        lines
    }
}

/// Render the fields of one section with the labels of `group`.
///
/// Each field yields a description fragment, a type fragment and, for
/// constants, a value fragment.
pub fn render(section: &Section, group: &FieldGroup, policy: &PlacementPolicy) -> Vec<Fragment> {
    let mut fragments = Vec::new();
    for field in section.fields() {
        let role = group.role_for(field);
        let name = field.rendered_name();

        fragments.push(describe(field, role, name.clone(), policy));
        fragments.push(Fragment::new(
            FragmentKind::Type,
            role,
            name.clone(),
            field.line().with_text(field.type_name()),
        ));
        if field.is_constant() {
            fragments.push(Fragment::new(
                FragmentKind::Value,
                role,
                name,
                field.line().with_text(field.value()),
            ));
        }
    }
    fragments
}

/// Render every section of a schema with the groups of `kind`.
///
/// Sections are paired with groups in order. Sections beyond the groups
/// the kind declares are not rendered.
pub fn render_sections(
    sections: &[Section],
    kind: TypeKind,
    policy: &PlacementPolicy,
) -> Vec<RenderedSection> {
    let groups = kind.groups();
    if sections.len() > groups.len() {
        debug!(
            kind:% = kind,
            sections = sections.len(),
            groups = groups.len();
            "Ignoring sections without a group"
        );
    }

    sections
        .iter()
        .zip(groups)
        .map(|(section, group)| RenderedSection {
            group: *group,
            fragments: render(section, group, policy),
        })
        .collect()
}

/// Fold constant values into their description fragments.
///
/// For every value fragment whose role and name match a description
/// fragment, the value is attached to that description and the value
/// fragment is removed. Value fragments without a matching description are
/// kept as they are.
pub fn link_values(fragments: &mut Vec<Fragment>) {
    let values: Vec<(usize, &'static str, String, String)> = fragments
        .iter()
        .enumerate()
        .filter(|(_, fragment)| fragment.kind == FragmentKind::Value)
        .map(|(index, fragment)| {
            (
                index,
                fragment.role,
                fragment.name.clone(),
                fragment.text().to_string(),
            )
        })
        .collect();

    let mut linked = Vec::new();
    for (index, role, name, value) in values {
        let target = fragments.iter_mut().find(|fragment| {
            fragment.kind == FragmentKind::Description
                && fragment.role == role
                && fragment.name == name
                && fragment.linked_value.is_none()
        });
        if let Some(target) = target {
            target.linked_value = Some(value);
            linked.push(index);
        }
    }

    let mut index = 0;
    fragments.retain(|_| {
        let keep = !linked.contains(&index);
        index += 1;
        keep
    });
}

fn describe(field: &Field, role: &'static str, name: String, policy: &PlacementPolicy) -> Fragment {
    let mut description = resolve(field, policy);
    if description.len() > 1 {
        let prefix = if policy.quote() {
            QUOTED_CONTINUATION
        } else {
            PLAIN_CONTINUATION
        };
        blocks::align(&mut description, prefix);
    }

    match description.split_first() {
        None => Fragment::new(
            FragmentKind::Description,
            role,
            name,
            field.line().with_text(""),
        ),
        Some((only, [])) => Fragment::new(
            FragmentKind::Description,
            role,
            name,
            only.with_text(only.text().trim()),
        ),
        Some((first, rest)) => Fragment::new(
            FragmentKind::Description,
            role,
            name,
            first.with_text(first.text().trim_start()),
        )
        .with_continuation(rest.to_vec()),
    }
}
