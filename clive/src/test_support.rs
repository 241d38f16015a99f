//! Hand-written records for unit tests.

use crate::marker::CommandMarker;
use crate::record::{FieldDescriptor, FieldType, Record};

/// A record whose name and field table are supplied at runtime.
pub(crate) struct Manual {
    pub name: &'static str,
    pub fields: &'static [FieldDescriptor],
    pub marker: CommandMarker,
}

impl Record for Manual {
    fn type_name(&self) -> &'static str {
        self.name
    }

    fn fields(&self) -> &'static [FieldDescriptor] {
        self.fields
    }

    fn marker(&self) -> Option<&CommandMarker> {
        matches!(self.fields.first(), Some(f) if f.ty == FieldType::Command).then_some(&self.marker)
    }
}

pub(crate) fn manual(name: &'static str, fields: &'static [FieldDescriptor]) -> Manual {
    Manual {
        name,
        fields,
        marker: CommandMarker::default(),
    }
}
