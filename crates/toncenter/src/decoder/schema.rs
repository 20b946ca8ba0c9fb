// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use super::field::Field;
use super::stack::StackEntry;
use super::types::{DecodeError, DecodedFields};
use std::collections::HashSet;

/// Positional schema: field `i` decodes stack entry `i`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoder {
    fields: Vec<Field>,
}

impl Decoder {
    pub fn new(fields: Vec<Field>) -> Result<Self, DecodeError> {
        let mut seen = HashSet::with_capacity(fields.len());
        for field in &fields {
            if !seen.insert(field.name()) {
                return Err(DecodeError::DuplicateField(field.name().to_string()));
            }
        }
        Ok(Self { fields })
    }

    /// Build a schema whose field names are known to be distinct.
    pub(crate) fn from_distinct(fields: Vec<Field>) -> Self {
        debug_assert!(
            fields
                .iter()
                .map(Field::name)
                .collect::<HashSet<_>>()
                .len()
                == fields.len()
        );
        Self { fields }
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn decode(&self, stack: &[StackEntry]) -> Result<DecodedFields, DecodeError> {
        if stack.len() != self.fields.len() {
            return Err(DecodeError::SchemaMismatch {
                expected: self.fields.len(),
                actual: stack.len(),
            });
        }

        tracing::debug!(fields = self.fields.len(), "Decoding get-method stack");

        let mut warnings = Vec::new();
        let mut values = Vec::with_capacity(self.fields.len());

        for (index, (field, entry)) in self.fields.iter().zip(stack).enumerate() {
            let kind = field.kind();
            if !kind.accepts(entry.tag()) {
                if let Some(expected) = kind.expected_tag() {
                    return Err(DecodeError::TypeMismatch {
                        index,
                        field: field.name().to_string(),
                        expected,
                        actual: entry.tag(),
                    });
                }
            }

            let value = field.decode(entry, &mut warnings)?;
            values.push((field.name().to_string(), value));
        }

        Ok(DecodedFields::new(values, warnings))
    }
}
