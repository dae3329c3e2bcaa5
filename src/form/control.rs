use std::str::FromStr;

use crate::model::{Facility, Room};

use super::{ValidationError, Validator};

/// Value types a control can hold, with the measurements validators need.
pub trait FieldValue {
    /// Length in characters, for text values.
    fn char_len(&self) -> Option<usize> {
        None
    }

    /// Numeric value, for number inputs.
    fn numeric(&self) -> Option<i64> {
        None
    }

    /// An empty text value fails `Required` just like a missing one.
    fn is_blank(&self) -> bool {
        false
    }
}

impl FieldValue for String {
    fn char_len(&self) -> Option<usize> {
        Some(self.chars().count())
    }

    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl FieldValue for i64 {
    fn numeric(&self) -> Option<i64> {
        Some(*self)
    }
}

impl FieldValue for Facility {}

impl FieldValue for Room {}

/// One form field.
#[derive(Debug, Clone)]
pub struct Control<T> {
    name: &'static str,
    value: Option<T>,
    validators: Vec<Validator>,
    disabled: bool,
}

impl<T: FieldValue> Control<T> {
    pub fn new(name: &'static str, validators: &[Validator]) -> Self {
        Self {
            name,
            value: None,
            validators: validators.to_vec(),
            disabled: false,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub fn set_value(&mut self, value: Option<T>) {
        self.value = value;
    }

    pub fn disable(&mut self) {
        self.disabled = true;
    }

    pub fn enable(&mut self) {
        self.disabled = false;
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Constraint violations of the current value. Disabled controls report none.
    pub fn errors(&self) -> Vec<ValidationError> {
        if self.disabled {
            return Vec::new();
        }
        let mut errors = Vec::new();
        for validator in &self.validators {
            match (*validator, self.value.as_ref()) {
                (Validator::Required, None) => errors.push(ValidationError::Required),
                (Validator::Required, Some(v)) if v.is_blank() => {
                    errors.push(ValidationError::Required)
                }
                (Validator::MaxLength(max), Some(v)) => {
                    if let Some(actual) = v.char_len().filter(|len| *len > max) {
                        errors.push(ValidationError::MaxLength { max, actual });
                    }
                }
                (Validator::Max(max), Some(v)) => {
                    if let Some(actual) = v.numeric().filter(|n| *n > max) {
                        errors.push(ValidationError::Max { max, actual });
                    }
                }
                _ => {}
            }
        }
        errors
    }

    pub fn is_valid(&self) -> bool {
        self.errors().is_empty()
    }
}

impl<T: FieldValue + FromStr> Control<T> {
    /// Set the value from raw input text. Input that does not parse clears
    /// the value, as a number input does with non-numeric text.
    pub fn set_input(&mut self, raw: &str) {
        self.value = raw.parse().ok();
    }

    /// Current value as input text.
    pub fn input(&self) -> String
    where
        T: ToString,
    {
        self.value.as_ref().map(ToString::to_string).unwrap_or_default()
    }
}
