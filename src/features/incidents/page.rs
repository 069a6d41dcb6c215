use minijinja::{context, Value};

use crate::features::incidents::form::FormSource;
use crate::features::incidents::notifier::{Notification, NotificationLevel};
use crate::features::incidents::profile::{DateMode, SubmissionProfile};
use crate::shared::constants::KNOWN_STATUSES;
use crate::shared::templates::{render_template, TemplateError};

pub const FORM_TEMPLATE: &str = "incidencias/formulario.html";
pub const FORM_PATH: &str = "/incidencias/formulario";

struct FieldSpec<'a> {
    id: &'a str,
    label: &'static str,
    kind: &'static str,
    required: bool,
}

fn field_specs(profile: &SubmissionProfile) -> Vec<FieldSpec<'_>> {
    let fields = &profile.fields;
    let mut specs = vec![
        FieldSpec {
            id: &fields.teacher_email,
            label: "Correo del docente",
            kind: "email",
            required: true,
        },
        FieldSpec {
            id: &fields.room_number,
            label: "Número de aula",
            kind: "text",
            required: true,
        },
    ];

    match profile.date_mode {
        DateMode::Single => specs.push(FieldSpec {
            id: &fields.incident_date,
            label: "Fecha de la incidencia",
            kind: "date",
            required: true,
        }),
        DateMode::Range => {
            specs.push(FieldSpec {
                id: &fields.start_date,
                label: "Fecha de inicio",
                kind: "date",
                required: true,
            });
            specs.push(FieldSpec {
                id: &fields.end_date,
                label: "Fecha de fin",
                kind: "date",
                required: true,
            });
        }
    }

    specs.extend([
        FieldSpec {
            id: &fields.description,
            label: "Descripción de la incidencia",
            kind: "textarea",
            required: true,
        },
        FieldSpec {
            id: &fields.status,
            label: "Estado",
            kind: "status",
            required: false,
        },
        FieldSpec {
            id: &fields.comment,
            label: "Comentario",
            kind: "textarea",
            required: false,
        },
    ]);

    specs
}

/// Render the form, pre-filled with `values` and an optional inline notice
pub fn render_form_page<S>(
    profile: &SubmissionProfile,
    values: &S,
    notice: Option<&Notification>,
) -> Result<String, TemplateError>
where
    S: FormSource + ?Sized,
{
    let fields: Vec<Value> = field_specs(profile)
        .into_iter()
        .map(|spec| {
            context! {
                id => spec.id,
                label => spec.label,
                kind => spec.kind,
                required => spec.required,
                value => values.field_value(spec.id).unwrap_or_default(),
            }
        })
        .collect();

    let notice = notice.map(|n| {
        let level = match n.level {
            NotificationLevel::Success => "success",
            NotificationLevel::Error => "error",
        };
        context! {
            level => level,
            message => n.message.as_str(),
            redirect => n.redirect.as_deref(),
        }
    });

    render_template(
        FORM_TEMPLATE,
        context! {
            title => "Registro de incidencias",
            action => FORM_PATH,
            fields => fields,
            statuses => KNOWN_STATUSES.to_vec(),
            notice => notice,
        },
    )
}
