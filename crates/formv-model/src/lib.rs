pub mod error;
pub mod field;
pub mod preferences;
pub mod property;
pub mod report;

pub use error::{FormError, Result};
pub use field::{FieldType, FieldValue, FormField};
pub use preferences::{Preferences, ReportLevel};
pub use property::{PropertyMap, PropertyValue};
pub use report::{Report, ReportEntry};
