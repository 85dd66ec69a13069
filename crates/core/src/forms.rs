//! Input forms that create new records.
//!
//! Forms carry raw text as typed by the user. `validate` trims and length-checks every required
//! field; a form that fails validation is the equivalent of a disabled submit button.

use crate::constants::{MAX_FORM_FIELD_LEN, MAX_FORM_TEXT_LEN};
use crate::error::{WardError, WardResult};
use ward_catalog::{NoteCategory, Service, Urgency};
use ward_types::{NonEmptyText, TextError};

fn required(field: &str, value: &str, max: usize) -> WardResult<NonEmptyText> {
    NonEmptyText::with_max_len(value, max).map_err(|e| match e {
        TextError::Empty => WardError::InvalidInput(format!("{field} is required")),
        TextError::TooLong { max } => {
            WardError::InvalidInput(format!("{field} must be at most {max} characters"))
        }
    })
}

/// A new nurse note.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NurseNoteForm {
    pub patient_id: String,
    pub category: NoteCategory,
    pub text: String,
}

/// [`NurseNoteForm`] after validation.
#[derive(Clone, Debug)]
pub struct ValidNurseNote {
    pub patient_id: NonEmptyText,
    pub category: NoteCategory,
    pub text: NonEmptyText,
}

impl NurseNoteForm {
    pub fn validate(&self) -> WardResult<ValidNurseNote> {
        Ok(ValidNurseNote {
            patient_id: required("patient", &self.patient_id, MAX_FORM_FIELD_LEN)?,
            category: self.category,
            text: required("note text", &self.text, MAX_FORM_TEXT_LEN)?,
        })
    }
}

/// A new prescription written by a doctor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrescriptionForm {
    pub patient_id: String,
    pub medication: String,
    pub dose: String,
    pub frequency: String,
    pub urgency: Urgency,
}

/// [`PrescriptionForm`] after validation.
#[derive(Clone, Debug)]
pub struct ValidPrescription {
    pub patient_id: NonEmptyText,
    pub medication: NonEmptyText,
    pub dose: NonEmptyText,
    pub frequency: NonEmptyText,
    pub urgency: Urgency,
}

impl PrescriptionForm {
    pub fn validate(&self) -> WardResult<ValidPrescription> {
        Ok(ValidPrescription {
            patient_id: required("patient", &self.patient_id, MAX_FORM_FIELD_LEN)?,
            medication: required("medication", &self.medication, MAX_FORM_FIELD_LEN)?,
            dose: required("dose", &self.dose, MAX_FORM_FIELD_LEN)?,
            frequency: required("frequency", &self.frequency, MAX_FORM_FIELD_LEN)?,
            urgency: self.urgency,
        })
    }
}

/// A referral to nutrition or physiotherapy.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReferralForm {
    pub patient_id: String,
    pub service: Service,
    pub reason: String,
    pub urgency: Urgency,
}

/// [`ReferralForm`] after validation.
#[derive(Clone, Debug)]
pub struct ValidReferral {
    pub patient_id: NonEmptyText,
    pub service: Service,
    pub reason: NonEmptyText,
    pub urgency: Urgency,
}

impl ReferralForm {
    pub fn validate(&self) -> WardResult<ValidReferral> {
        Ok(ValidReferral {
            patient_id: required("patient", &self.patient_id, MAX_FORM_FIELD_LEN)?,
            service: self.service,
            reason: required("reason", &self.reason, MAX_FORM_TEXT_LEN)?,
            urgency: self.urgency,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_note_text_is_rejected() {
        let form = NurseNoteForm {
            patient_id: "P-001".into(),
            category: NoteCategory::Observation,
            text: "  \n ".into(),
        };
        let err = form.validate().unwrap_err();
        assert!(matches!(err, WardError::InvalidInput(ref m) if m == "note text is required"));
    }

    #[test]
    fn test_prescription_fields_are_trimmed() {
        let form = PrescriptionForm {
            patient_id: " P-002 ".into(),
            medication: "Amoxicillin ".into(),
            dose: "500 mg".into(),
            frequency: " TDS".into(),
            urgency: Urgency::Routine,
        };
        let valid = form.validate().unwrap();
        assert_eq!(valid.patient_id.as_str(), "P-002");
        assert_eq!(valid.medication.as_str(), "Amoxicillin");
        assert_eq!(valid.frequency.as_str(), "TDS");
    }

    #[test]
    fn test_overlong_field_is_rejected() {
        let form = ReferralForm {
            patient_id: "P-003".into(),
            service: Service::Nutrition,
            reason: "x".repeat(MAX_FORM_TEXT_LEN + 1),
            urgency: Urgency::Urgent,
        };
        assert!(matches!(
            form.validate(),
            Err(WardError::InvalidInput(ref m)) if m.starts_with("reason must be at most")
        ));
    }
}
