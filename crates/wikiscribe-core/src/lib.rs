//! wikiscribe-core: document tree shared by the markdown reader and the
//! Confluence writer.
//!
//! Readers lower their input into a [`Document`] of open-kinded [`Node`]s;
//! writers walk that tree and produce output bytes, reporting anything they
//! had to drop as [`FidelityWarning`]s.

mod document;
mod fidelity;
mod node;
mod properties;
mod traits;

pub use document::*;
pub use fidelity::*;
pub use node::*;
pub use properties::*;
pub use traits::*;
