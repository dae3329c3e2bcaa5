//! Client-side form model: controls, validators, and the per-entity edit
//! forms built from them.
//!
//! A control holds an optional value. Validation mirrors what the backend
//! enforces (required, maximum length, numeric maximum) so invalid records are
//! caught before a request is made. Disabled controls are not validated but
//! their value still flows into the record built from the form.

mod control;
mod entity_forms;

pub use control::{Control, FieldValue};
pub use entity_forms::{
    FACILITY_NAME_MAX_LENGTH, FacilityForm, PHONE_NUMBER_MAX, ROOM_NUMBER_MAX, ResidentForm, RoomForm,
};

use std::collections::BTreeMap;

use thiserror::Error;

/// A single field-level constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validator {
    Required,
    /// Maximum length in characters.
    MaxLength(usize),
    /// Inclusive numeric maximum.
    Max(i64),
}

/// A violated constraint on one control.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("This field is required.")]
    Required,
    #[error("This field cannot be longer than {max} characters.")]
    MaxLength { max: usize, actual: usize },
    #[error("This field cannot be more than {max}.")]
    Max { max: i64, actual: i64 },
}

/// Errors of every invalid control in a form, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    fields: BTreeMap<&'static str, Vec<ValidationError>>,
}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn get(&self, field: &str) -> &[ValidationError] {
        self.fields.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn fields(&self) -> impl Iterator<Item = (&'static str, &[ValidationError])> {
        self.fields.iter().map(|(name, errors)| (*name, errors.as_slice()))
    }

    /// Collect the errors of `control` under its name; valid controls add nothing.
    pub fn collect<T: FieldValue>(&mut self, control: &Control<T>) {
        let errors = control.errors();
        if !errors.is_empty() {
            self.fields.insert(control.name(), errors);
        }
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (name, errors) in &self.fields {
            for error in errors {
                if !first {
                    write!(f, "; ")?;
                }
                write!(f, "{}: {}", name, error)?;
                first = false;
            }
        }
        Ok(())
    }
}

/// An edit form bound to one entity type.
pub trait EntityForm: Default + Send + Sync {
    type Entity: crate::model::Entity;

    /// Copy the record's values into the controls.
    fn update_form(&mut self, entity: &Self::Entity);

    /// Build a record from the current control values.
    fn create_from_form(&self) -> Self::Entity;

    fn errors(&self) -> ValidationErrors;

    fn is_valid(&self) -> bool {
        self.errors().is_empty()
    }
}
