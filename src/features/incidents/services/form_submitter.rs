use std::sync::Arc;

use crate::features::incidents::clients::{BackendReply, IncidentBackend};
use crate::features::incidents::dtos::IncidentFormDto;
use crate::features::incidents::error::{ServerError, SubmissionError, ValidationError};
use crate::features::incidents::form::FormSource;
use crate::features::incidents::guard::SubmissionGuard;
use crate::features::incidents::notifier::{Notification, Notifier};
use crate::features::incidents::profile::SubmissionProfile;

/// A report the backend accepted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submitted {
    pub backend_status: u16,
    /// Backend reported an update of an existing incident
    pub updated: bool,
    pub redirect: Option<String>,
}

/// Result of one submission together with what the user was told
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionOutcome {
    pub result: Result<Submitted, SubmissionError>,
    pub notification: Notification,
}

/// Reads, validates and posts the incidencias form for one profile
pub struct FormSubmitter {
    backend: Arc<dyn IncidentBackend>,
    profile: SubmissionProfile,
    guard: SubmissionGuard,
}

impl FormSubmitter {
    pub fn new(backend: Arc<dyn IncidentBackend>, profile: SubmissionProfile) -> Self {
        Self {
            backend,
            profile,
            guard: SubmissionGuard::new(),
        }
    }

    pub fn profile(&self) -> &SubmissionProfile {
        &self.profile
    }

    /// Run one submission. Never fails; every branch ends in exactly one
    /// notification delivered to `notifier` and returned in the outcome.
    pub async fn submit<S>(&self, source: &S, notifier: &dyn Notifier) -> SubmissionOutcome
    where
        S: FormSource + Sync + ?Sized,
    {
        let result = self.run(source).await;
        let notification = self.notification_for(&result);
        notifier.notify(&notification);

        SubmissionOutcome {
            result,
            notification,
        }
    }

    async fn run<S>(&self, source: &S) -> Result<Submitted, SubmissionError>
    where
        S: FormSource + Sync + ?Sized,
    {
        let form = IncidentFormDto::read(source, &self.profile);
        if let Err(e) = form.check(&self.profile.fields) {
            tracing::warn!("Incident form rejected: {}", e);
            return Err(e.into());
        }

        // One pending submission per teacher
        let key = form.teacher_email.to_lowercase();
        let _permit = self.guard.try_acquire(&key).ok_or_else(|| {
            tracing::warn!("Submission for {} already in flight", key);
            SubmissionError::AlreadyInFlight
        })?;

        let report = form.into_report();
        let reply = self
            .backend
            .post_report(&self.profile.endpoint, &report)
            .await
            .map_err(|e| {
                tracing::error!(
                    "Error connecting to incidencias backend at {}: {}",
                    self.profile.endpoint,
                    e
                );
                SubmissionError::Network(e.to_string())
            })?;

        self.interpret(reply)
    }

    fn interpret(&self, reply: BackendReply) -> Result<Submitted, SubmissionError> {
        if reply.is_success() {
            tracing::info!(
                "Incident accepted by backend with HTTP {}",
                reply.status
            );
            return Ok(Submitted {
                backend_status: reply.status,
                updated: reply.status == 200 && self.profile.distinguishes_updates(),
                redirect: self.profile.success_redirect.clone(),
            });
        }

        tracing::warn!(
            "Incident rejected by backend with HTTP {}: {}",
            reply.status,
            reply.body
        );

        let error = match reply.status {
            400 => ServerError::BadRequest(reply.message()),
            404 => ServerError::NotFound,
            status => ServerError::Unexpected {
                status,
                message: reply.message(),
            },
        };
        Err(error.into())
    }

    fn notification_for(&self, result: &Result<Submitted, SubmissionError>) -> Notification {
        let messages = &self.profile.messages;

        match result {
            Ok(submitted) => {
                let text = if submitted.updated {
                    messages.updated
                } else {
                    messages.created
                };
                Notification::success(text, submitted.redirect.clone())
            }
            Err(SubmissionError::Validation(ValidationError::MissingField(_))) => {
                Notification::error(messages.missing_fields)
            }
            Err(SubmissionError::Validation(ValidationError::InvalidEmail(_))) => {
                Notification::error(messages.invalid_email)
            }
            Err(SubmissionError::Server(ServerError::BadRequest(message))) => {
                Notification::error(format!(
                    "{}{}",
                    messages.error_prefix,
                    message.as_deref().unwrap_or(messages.bad_request_fallback)
                ))
            }
            Err(SubmissionError::Server(ServerError::NotFound)) => {
                Notification::error(messages.not_found)
            }
            Err(SubmissionError::Server(ServerError::Unexpected { message, .. })) => {
                match message {
                    Some(message) => {
                        Notification::error(format!("{}{}", messages.error_prefix, message))
                    }
                    None => Notification::error(messages.unexpected),
                }
            }
            Err(SubmissionError::Network(_)) => Notification::error(messages.network),
            Err(SubmissionError::AlreadyInFlight) => Notification::error(messages.in_flight),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::incidents::clients::incident_backend::TransportError;
    use crate::features::incidents::models::{
        IncidentDates, IncidentKey, IncidentReport, SearchFilter,
    };
    use crate::features::incidents::notifier::{NotificationLevel, TracingNotifier};
    use async_trait::async_trait;
    use fake::faker::internet::en::SafeEmail;
    use fake::Fake;
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use tokio::sync::Notify;

    /// Backend double recording every report it receives
    struct FakeBackend {
        reply: Result<BackendReply, TransportError>,
        calls: Mutex<Vec<(String, IncidentReport)>>,
        gated: bool,
        entered: Notify,
        release: Notify,
    }

    impl FakeBackend {
        fn replying(status: u16, body: &str) -> Arc<Self> {
            Arc::new(Self::with_reply(Ok(BackendReply {
                status,
                body: body.to_string(),
            })))
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self::with_reply(Err(TransportError(
                "error trying to connect: Connection refused".to_string(),
            ))))
        }

        fn gated(status: u16) -> Arc<Self> {
            let mut backend = Self::with_reply(Ok(BackendReply {
                status,
                body: String::new(),
            }));
            backend.gated = true;
            Arc::new(backend)
        }

        fn with_reply(reply: Result<BackendReply, TransportError>) -> Self {
            Self {
                reply,
                calls: Mutex::new(Vec::new()),
                gated: false,
                entered: Notify::new(),
                release: Notify::new(),
            }
        }

        fn calls(&self) -> Vec<(String, IncidentReport)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl IncidentBackend for FakeBackend {
        async fn post_report(
            &self,
            endpoint: &str,
            report: &IncidentReport,
        ) -> Result<BackendReply, TransportError> {
            self.calls
                .lock()
                .unwrap()
                .push((endpoint.to_string(), report.clone()));
            if self.gated {
                self.entered.notify_one();
                self.release.notified().await;
            }
            self.reply.clone()
        }

        async fn search(
            &self,
            _endpoint: &str,
            _filter: &SearchFilter,
        ) -> Result<BackendReply, TransportError> {
            unreachable!("the submitter never searches")
        }

        async fn delete(
            &self,
            _endpoint: &str,
            _key: &IncidentKey,
        ) -> Result<BackendReply, TransportError> {
            unreachable!("the submitter never deletes")
        }
    }

    #[derive(Default)]
    struct CollectingNotifier {
        seen: Mutex<Vec<Notification>>,
    }

    impl Notifier for CollectingNotifier {
        fn notify(&self, notification: &Notification) {
            self.seen.lock().unwrap().push(notification.clone());
        }
    }

    fn form(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn valid_single() -> HashMap<String, String> {
        form(&[
            ("correoDocente", "a@b.com"),
            ("numeroAula", "101"),
            ("fechaIncidencia", "2024-01-01"),
            ("descripcionIncidencia", "broken desk"),
        ])
    }

    fn valid_range() -> HashMap<String, String> {
        form(&[
            ("correoDocente", "a@b.com"),
            ("numeroAula", "101"),
            ("fechaInicio", "2024-01-01"),
            ("fechaFin", "2024-01-02"),
            ("descripcionIncidencia", "broken desk"),
            ("estadoIncidencia", "PENDIENTE"),
            ("comentario", "silla rota también"),
        ])
    }

    #[tokio::test]
    async fn test_created_shows_success_and_redirects() {
        let backend = FakeBackend::replying(201, "");
        let submitter = FormSubmitter::new(backend.clone(), SubmissionProfile::registro());
        let notifier = CollectingNotifier::default();

        let outcome = submitter.submit(&valid_single(), &notifier).await;

        assert_eq!(
            outcome.result,
            Ok(Submitted {
                backend_status: 201,
                updated: false,
                redirect: Some("pagina_incidencia.html".to_string()),
            })
        );
        assert_eq!(
            outcome.notification,
            Notification::success(
                "Registro exitoso. Redirigiendo...",
                Some("pagina_incidencia.html".to_string())
            )
        );
        assert_eq!(*notifier.seen.lock().unwrap(), vec![outcome.notification]);

        let calls = backend.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "http://localhost:888/incidencias");
        assert_eq!(
            serde_json::to_value(&calls[0].1).unwrap(),
            json!({
                "correoDocente": "a@b.com",
                "numeroAula": "101",
                "fechaIncidencia": "2024-01-01",
                "descripcionIncidencia": "broken desk",
                "estadoIncidencia": "",
                "comentario": ""
            })
        );
    }

    #[tokio::test]
    async fn test_range_profile_distinguishes_created_and_updated() {
        let created = FormSubmitter::new(FakeBackend::replying(201, ""), SubmissionProfile::rango());
        let outcome = created.submit(&valid_range(), &TracingNotifier).await;
        assert_eq!(outcome.notification.message, "Incidencia creada con éxito.");
        assert_eq!(outcome.notification.redirect, None);

        let backend = FakeBackend::replying(200, "");
        let updated = FormSubmitter::new(backend.clone(), SubmissionProfile::rango());
        let outcome = updated.submit(&valid_range(), &TracingNotifier).await;
        assert_eq!(
            outcome.notification.message,
            "Incidencia actualizada con éxito."
        );
        assert!(matches!(outcome.result, Ok(Submitted { updated: true, .. })));

        let calls = backend.calls();
        assert_eq!(calls[0].0, "http://localhost:8888/incidencias/post");
        let body = serde_json::to_value(&calls[0].1).unwrap();
        assert_eq!(body.as_object().unwrap().len(), 7);
        assert_eq!(body["comentario"], "silla rota también");
    }

    #[tokio::test]
    async fn test_missing_field_sends_nothing() {
        let backend = FakeBackend::replying(201, "");
        let submitter = FormSubmitter::new(backend.clone(), SubmissionProfile::registro());
        let mut input = valid_single();
        input.insert("descripcionIncidencia".to_string(), String::new());

        let outcome = submitter.submit(&input, &TracingNotifier).await;

        assert_eq!(
            outcome.result,
            Err(SubmissionError::Validation(ValidationError::MissingField(
                vec!["descripcionIncidencia".to_string()]
            )))
        );
        assert_eq!(
            outcome.notification.message,
            "Por favor, completa todos los campos obligatorios."
        );
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_email_sends_nothing() {
        let backend = FakeBackend::replying(201, "");
        let submitter = FormSubmitter::new(backend.clone(), SubmissionProfile::registro());
        let mut input = valid_single();
        input.insert("correoDocente".to_string(), "bad-email".to_string());

        let outcome = submitter.submit(&input, &TracingNotifier).await;

        assert_eq!(
            outcome.result,
            Err(SubmissionError::Validation(ValidationError::InvalidEmail(
                "bad-email".to_string()
            )))
        );
        assert_eq!(
            outcome.notification.message,
            "Por favor, ingresa un correo válido."
        );
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn test_generated_emails_are_accepted() {
        for _ in 0..20 {
            let email: String = SafeEmail().fake();
            let backend = FakeBackend::replying(201, "");
            let submitter = FormSubmitter::new(backend.clone(), SubmissionProfile::registro());
            let mut input = valid_single();
            input.insert("correoDocente".to_string(), email.clone());

            let outcome = submitter.submit(&input, &TracingNotifier).await;
            assert!(outcome.result.is_ok(), "{}", email);
            assert_eq!(backend.calls().len(), 1);
        }
    }

    #[tokio::test]
    async fn test_bad_request_message_is_shown() {
        let submitter = FormSubmitter::new(
            FakeBackend::replying(400, r#"{"message":"Aula inválida"}"#),
            SubmissionProfile::registro(),
        );

        let outcome = submitter.submit(&valid_single(), &TracingNotifier).await;

        assert_eq!(
            outcome.result,
            Err(SubmissionError::Server(ServerError::BadRequest(Some(
                "Aula inválida".to_string()
            ))))
        );
        assert_eq!(outcome.notification.level, NotificationLevel::Error);
        assert!(outcome.notification.message.contains("Aula inválida"));
    }

    #[tokio::test]
    async fn test_bad_request_without_json_uses_fallback() {
        let submitter = FormSubmitter::new(
            FakeBackend::replying(400, "ERROR: Numero de aula nulo o vacio."),
            SubmissionProfile::rango(),
        );

        let outcome = submitter.submit(&valid_range(), &TracingNotifier).await;
        assert_eq!(outcome.notification.message, "Error: Datos inválidos.");
    }

    #[tokio::test]
    async fn test_not_found_and_unexpected() {
        let not_found = FormSubmitter::new(
            FakeBackend::replying(404, r#"{"message":"ignored"}"#),
            SubmissionProfile::rango(),
        );
        let outcome = not_found.submit(&valid_range(), &TracingNotifier).await;
        assert_eq!(outcome.result, Err(ServerError::NotFound.into()));
        assert_eq!(outcome.notification.message, "No se encontró la incidencia.");

        let bare = FormSubmitter::new(FakeBackend::replying(500, ""), SubmissionProfile::rango());
        let outcome = bare.submit(&valid_range(), &TracingNotifier).await;
        assert_eq!(
            outcome.notification.message,
            "Ocurrió un error inesperado. Intente nuevamente."
        );

        let with_message = FormSubmitter::new(
            FakeBackend::replying(500, r#"{"id":"0","message":"Excepción capturada"}"#),
            SubmissionProfile::registro(),
        );
        let outcome = with_message.submit(&valid_single(), &TracingNotifier).await;
        assert_eq!(
            outcome.result,
            Err(ServerError::Unexpected {
                status: 500,
                message: Some("Excepción capturada".to_string()),
            }
            .into())
        );
        assert_eq!(
            outcome.notification.message,
            "Error al registrar: Excepción capturada"
        );
    }

    #[tokio::test]
    async fn test_network_failure_is_contained() {
        let backend = FakeBackend::failing();
        let submitter = FormSubmitter::new(backend.clone(), SubmissionProfile::registro());
        let notifier = CollectingNotifier::default();

        let outcome = submitter.submit(&valid_single(), &notifier).await;

        assert!(matches!(outcome.result, Err(SubmissionError::Network(_))));
        assert_eq!(
            outcome.notification.message,
            "Hubo un error al conectarse al servidor. Intenta nuevamente más tarde."
        );
        assert_eq!(notifier.seen.lock().unwrap().len(), 1);
        // No retry
        assert_eq!(backend.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_submission_is_rejected_while_in_flight() {
        let backend = FakeBackend::gated(201);
        let submitter = Arc::new(FormSubmitter::new(
            backend.clone(),
            SubmissionProfile::registro(),
        ));

        let first = {
            let submitter = Arc::clone(&submitter);
            tokio::spawn(async move {
                let notifier = TracingNotifier;
                submitter.submit(&valid_single(), &notifier).await
            })
        };
        backend.entered.notified().await;

        // Same teacher, different casing
        let mut again = valid_single();
        again.insert("correoDocente".to_string(), "A@B.com".to_string());
        let second = submitter.submit(&again, &TracingNotifier).await;
        assert_eq!(second.result, Err(SubmissionError::AlreadyInFlight));
        assert_eq!(backend.calls().len(), 1);

        backend.release.notify_one();
        let first = first.await.unwrap();
        assert!(first.result.is_ok());

        // Released after completion
        backend.release.notify_one();
        let third = submitter.submit(&valid_single(), &TracingNotifier).await;
        assert!(third.result.is_ok());
        assert_eq!(backend.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_failed_request_releases_guard() {
        let backend = FakeBackend::failing();
        let submitter = FormSubmitter::new(backend.clone(), SubmissionProfile::registro());

        submitter.submit(&valid_single(), &TracingNotifier).await;
        let outcome = submitter.submit(&valid_single(), &TracingNotifier).await;

        assert!(matches!(outcome.result, Err(SubmissionError::Network(_))));
        assert_eq!(backend.calls().len(), 2);
    }

    #[test]
    fn test_report_dates_follow_profile() {
        let report = IncidentFormDto::read(&valid_range(), &SubmissionProfile::rango()).into_report();
        assert!(matches!(report.dates, IncidentDates::Range { .. }));
    }
}
