//! Segment encoding, message assembly, and batch interchange building.

mod batch;
mod escape;
mod message;
pub mod segment;
mod sequence;
mod structure;

pub use batch::assemble_batch;
pub use escape::{COMPONENT_SEP, ELEMENT_SEP, RELEASE, TERMINATOR, escape, truncate_field};
pub use message::assemble;
pub use segment::{Segment, SegmentKind};
pub use sequence::SegmentSequence;
pub use structure::{check as check_structure, verify as verify_structure};
