//! Document adapter seam.
//!
//! The engine never reads files itself. A [`DocumentSource`] maps one
//! concrete document (a fillable PDF in the original product) to the
//! field names and values it physically contains; the engine binds those
//! onto the registered field definitions.

use formv_model::{FieldValue, Result};

/// A field as found in a physical document.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentField {
    pub name: String,
    pub value: FieldValue,
}

/// Supplies the resolved fields of one document instance.
pub trait DocumentSource {
    /// All fields present in the document, in document order.
    fn read_fields(&self) -> Result<Vec<DocumentField>>;
}
