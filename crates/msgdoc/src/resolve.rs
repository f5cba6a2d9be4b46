//! Description resolution.
//!
//! Picks the comment lines that document a field according to a
//! [`PlacementPolicy`].

use std::iter;

use log::trace;

use msgdoc_core::{
    blocks,
    field::Field,
    line::Line,
    options::{Placement, PlacementPolicy},
};

/// Select the description lines of `field`.
///
/// Returns an empty sequence when the policy holds no placement token or
/// the selected comments are empty. Lines are returned with their original
/// text and provenance; blank lines only appear between blocks.
///
/// # Example
///
/// ```
/// # use msgdoc_core::{line::lines_from_str, options::PlacementPolicy};
/// # use msgdoc_parser::{error::DiagnosticCollector, parse};
/// # use msgdoc::resolve::resolve;
/// let lines = lines_from_str("Range.msg", "# sensor range\nfloat32 range  # metres\n");
/// let sections = parse(&lines, "sensor_msgs", &mut DiagnosticCollector::new());
/// let field = &sections[0].fields()[0];
///
/// let up = resolve(field, &PlacementPolicy::new("up"));
/// assert_eq!(up[0].text(), " sensor range");
///
/// let right = resolve(field, &PlacementPolicy::new("right1"));
/// assert_eq!(right[0].text(), "metres");
/// ```
pub fn resolve(field: &Field, policy: &PlacementPolicy) -> Vec<Line> {
    let Some(placement) = policy.placement() else {
        return Vec::new();
    };
    trace!(field = field.name(), placement = placement.token(); "Resolving description");

    match placement {
        Placement::UpAll => blocks::normalize(field.pre_comments()),
        Placement::Up => blocks::split(field.pre_comments())
            .last()
            .map(|block| block.to_vec())
            .unwrap_or_default(),
        Placement::Right1 if field.comment().is_blank() => Vec::new(),
        Placement::Right1 => vec![field.comment().clone()],
        Placement::RightDown => {
            let trailing = trailing_comments(field);
            blocks::split(&trailing)
                .first()
                .map(|block| block.to_vec())
                .unwrap_or_default()
        }
        Placement::RightDownAll => blocks::normalize(&trailing_comments(field)),
    }
}

/// The inline comment followed by every comment line below the field.
///
/// An empty inline comment acts as a blank line, so a block directly below
/// a field without inline comment still starts a description.
fn trailing_comments(field: &Field) -> Vec<Line> {
    iter::once(field.comment())
        .chain(field.post_comments())
        .cloned()
        .collect()
}
