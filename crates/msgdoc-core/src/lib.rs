//! msgdoc Core Types and Definitions
//!
//! This crate provides the foundational types shared by the msgdoc parser
//! and renderer. It includes:
//!
//! - **Lines**: Text with origin and line number ([`line::Line`])
//! - **Fields**: Declarations with their comments ([`field::Field`], [`field::Section`])
//! - **Groups**: Section roles per interface kind ([`group::TypeKind`], [`group::FieldGroup`])
//! - **Blocks**: Comment block segmentation ([`blocks`] module)
//! - **Options**: Placement and description options ([`options`] module)

pub mod blocks;
pub mod field;
pub mod group;
pub mod line;
pub mod options;
