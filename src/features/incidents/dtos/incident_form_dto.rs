use validator::Validate;

use crate::features::incidents::error::ValidationError;
use crate::features::incidents::form::FormSource;
use crate::features::incidents::models::{IncidentDates, IncidentReport};
use crate::features::incidents::profile::{DateMode, FieldMapping, SubmissionProfile};

const REQUIRED: &str = "required";
const INVALID_EMAIL: &str = "invalid_email";

/// Raw form values as read at submit time.
///
/// Date inputs the active profile does not use stay `None` and are skipped by
/// validation.
#[derive(Debug, Clone, Default, Validate)]
pub struct IncidentFormDto {
    #[validate(
        length(min = 1, code = "required", message = "Teacher email is required"),
        regex(
            path = "*crate::shared::validation::EMAIL_REGEX",
            code = "invalid_email",
            message = "Teacher email must look like local@domain.tld"
        )
    )]
    pub teacher_email: String,

    #[validate(length(min = 1, code = "required", message = "Room number is required"))]
    pub room_number: String,

    #[validate(length(min = 1, code = "required", message = "Incident date is required"))]
    pub incident_date: Option<String>,

    #[validate(length(min = 1, code = "required", message = "Start date is required"))]
    pub start_date: Option<String>,

    #[validate(length(min = 1, code = "required", message = "End date is required"))]
    pub end_date: Option<String>,

    #[validate(length(min = 1, code = "required", message = "Description is required"))]
    pub description: String,

    pub status: String,

    pub comment: Option<String>,
}

impl IncidentFormDto {
    /// Read every input the profile names. Absent inputs read as empty.
    pub fn read<S>(source: &S, profile: &SubmissionProfile) -> Self
    where
        S: FormSource + ?Sized,
    {
        let fields = &profile.fields;
        let value = |id: &str| source.field_value(id).unwrap_or_default();

        let (incident_date, start_date, end_date) = match profile.date_mode {
            DateMode::Single => (Some(value(&fields.incident_date)), None, None),
            DateMode::Range => (
                None,
                Some(value(&fields.start_date)),
                Some(value(&fields.end_date)),
            ),
        };

        Self {
            teacher_email: value(&fields.teacher_email),
            room_number: value(&fields.room_number),
            incident_date,
            start_date,
            end_date,
            description: value(&fields.description),
            status: value(&fields.status),
            comment: source.field_value(&fields.comment),
        }
    }

    /// Missing fields are reported before a malformed email
    pub fn check(&self, fields: &FieldMapping) -> Result<(), ValidationError> {
        let errors = match self.validate() {
            Ok(()) => return Ok(()),
            Err(errors) => errors,
        };
        let field_errors = errors.field_errors();

        let has_code = |field: &str, code: &str| {
            field_errors
                .get(field)
                .is_some_and(|errs| errs.iter().any(|e| e.code == code))
        };

        // Form identifier to validated field
        let validated = [
            (fields.teacher_email.as_str(), "teacher_email"),
            (fields.room_number.as_str(), "room_number"),
            (fields.incident_date.as_str(), "incident_date"),
            (fields.start_date.as_str(), "start_date"),
            (fields.end_date.as_str(), "end_date"),
            (fields.description.as_str(), "description"),
        ];

        let missing: Vec<String> = fields
            .required_fields(self.date_mode())
            .into_iter()
            .filter(|id| {
                validated
                    .iter()
                    .any(|(field_id, name)| field_id == id && has_code(*name, REQUIRED))
            })
            .map(String::from)
            .collect();

        if !missing.is_empty() {
            return Err(ValidationError::MissingField(missing));
        }

        if has_code("teacher_email", INVALID_EMAIL) {
            return Err(ValidationError::InvalidEmail(self.teacher_email.clone()));
        }

        Ok(())
    }

    fn date_mode(&self) -> DateMode {
        if self.incident_date.is_some() {
            DateMode::Single
        } else {
            DateMode::Range
        }
    }

    /// Build the backend body; a blank comment becomes `""`
    pub fn into_report(self) -> IncidentReport {
        let dates = match self.incident_date {
            Some(incident_date) => IncidentDates::Single { incident_date },
            None => IncidentDates::Range {
                start_date: self.start_date.unwrap_or_default(),
                end_date: self.end_date.unwrap_or_default(),
            },
        };

        IncidentReport {
            teacher_email: self.teacher_email,
            room_number: self.room_number,
            dates,
            description: self.description,
            status: self.status,
            comment: self.comment.unwrap_or_default(),
        }
    }
}
