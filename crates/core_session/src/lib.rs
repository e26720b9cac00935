use std::sync::Arc;

use anyhow::{Context, Result};
use config::AppConfig;
use contact::{
    ContactError, ContactForm, ContactSubmitter, Field, HttpContactTransport, MailLauncher,
    SubmitOutcome, ValidationErrors,
};
use content::{FocusAreaView, ProfileView, ProjectView};
use core_types::{Locale, PreferenceStore, Profile};
use gallery::{FilterState, FilterSummary};
use i18n::{I18n, LocaleContext, RenderMode};
use thiserror::Error;
use tokio::sync::watch;
use tracing::{debug, info, warn};

mod submission;
mod toast;

pub use submission::{SubmissionEvent, SubmissionState};
pub use toast::{TOAST_TTL, Toast, ToastCenter, ToastId, ToastKind};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("a contact submission is already in progress")]
    SubmissionInFlight,
    #[error("cannot apply {event:?} to a {state:?} submission")]
    InvalidTransition {
        state: SubmissionState,
        event: SubmissionEvent,
    },
    #[error("contact form has errors: {0}")]
    Invalid(ValidationErrors),
    #[error("contact submission failed")]
    Contact(#[source] ContactError),
}

/// A validated contact message waiting to be delivered.
pub struct PendingSubmission {
    submitter: Arc<ContactSubmitter>,
    form: ContactForm,
}

impl PendingSubmission {
    pub fn form(&self) -> &ContactForm {
        &self.form
    }

    pub async fn send(self) -> Result<SubmitOutcome, ContactError> {
        self.submitter.submit(&self.form).await
    }
}

/// The projects currently shown by the gallery.
#[derive(Debug, Clone)]
pub struct GalleryPage<'a> {
    pub projects: Vec<ProjectView<'a>>,
    pub summary: FilterSummary,
    pub available_tags: Vec<String>,
}

/// Everything one visitor's session can change. Locale, filters, toasts
/// and the contact draft are only mutated through these methods.
pub struct Session {
    profile: Arc<Profile>,
    locale: LocaleContext,
    filters: FilterState,
    toasts: ToastCenter,
    contact_form: ContactForm,
    field_errors: ValidationErrors,
    submission: SubmissionState,
    submitter: Arc<ContactSubmitter>,
}

impl Session {
    pub fn new(profile: Arc<Profile>, locale: LocaleContext, submitter: ContactSubmitter) -> Self {
        Self {
            profile,
            locale,
            filters: FilterState::new(),
            toasts: ToastCenter::new(),
            contact_form: ContactForm::default(),
            field_errors: ValidationErrors::default(),
            submission: SubmissionState::default(),
            submitter: Arc::new(submitter),
        }
    }

    /// Builds a session over the embedded profile and translations.
    pub fn bootstrap(
        config: &AppConfig,
        store: Arc<dyn PreferenceStore>,
        mode: RenderMode,
        runtime_language: Option<&str>,
        launcher: Arc<dyn MailLauncher>,
    ) -> Result<Self> {
        let profile = content::embedded_profile().context("failed to load profile content")?;
        let locale = LocaleContext::initialize(mode, store, runtime_language)
            .context("failed to load translations")?;
        if let Err(err) = locale.i18n().table().validate() {
            warn!("translation catalogs are out of sync: {err}");
        }

        let recipient = config
            .contact
            .recipient()
            .unwrap_or(&profile.email)
            .to_string();
        let mut submitter = ContactSubmitter::new(&profile.name, recipient, launcher);
        if let Some(endpoint) = config.contact.endpoint() {
            info!(endpoint, "contact form posts to endpoint");
            submitter = submitter.with_transport(Arc::new(HttpContactTransport::new(endpoint)));
        } else {
            info!("no contact endpoint configured, using mail client");
        }

        Ok(Self::new(profile, locale, submitter))
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn locale(&self) -> Locale {
        self.locale.locale()
    }

    pub fn i18n(&self) -> &I18n {
        self.locale.i18n()
    }

    pub fn t<'a>(&'a self, key: &'a str) -> &'a str {
        self.locale.t(key)
    }

    /// Switches language. A failure to persist the choice is logged; the
    /// switch itself always takes effect.
    pub fn set_locale(&mut self, locale: Locale) {
        if let Err(err) = self.locale.set_locale(locale) {
            warn!("locale preference not persisted: {err:#}");
        }
    }

    pub fn subscribe_locale(&self) -> watch::Receiver<Locale> {
        self.locale.subscribe()
    }

    pub fn view(&self) -> ProfileView<'_> {
        ProfileView::project(&self.profile, self.locale())
    }

    pub fn focus_areas(&self) -> Vec<FocusAreaView> {
        content::focus_areas(&self.profile, self.locale.i18n())
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.filters.set_query(query);
    }

    pub fn toggle_tag(&mut self, tag: &str) -> bool {
        self.filters.toggle_tag(tag)
    }

    pub fn select_tag(&mut self, tag: &str) -> bool {
        self.filters.select_tag(tag)
    }

    /// Deselects every tag. The search text is left as typed.
    pub fn clear_filters(&mut self) {
        self.filters.clear_tags();
    }

    pub fn gallery(&self) -> GalleryPage<'_> {
        let view = self.view();
        let projects: Vec<ProjectView<'_>> = self
            .filters
            .apply(&view.projects)
            .into_iter()
            .cloned()
            .collect();
        let summary = FilterSummary {
            visible: projects.len(),
            total: view.projects.len(),
        };
        GalleryPage {
            projects,
            summary,
            available_tags: gallery::available_tags(&view.projects),
        }
    }

    pub fn toasts(&self) -> &ToastCenter {
        &self.toasts
    }

    /// Hands out the address and confirms with a toast.
    pub fn copy_email(&self) -> &str {
        self.toasts.success(self.t("contact.emailCopied"));
        &self.profile.email
    }

    pub fn mailto_link(&self) -> String {
        self.submitter.mailto_link()
    }

    pub fn has_contact_endpoint(&self) -> bool {
        self.submitter.has_endpoint()
    }

    pub fn contact_form(&self) -> &ContactForm {
        &self.contact_form
    }

    pub fn update_contact(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::Name => self.contact_form.name = value,
            Field::Email => self.contact_form.email = value,
            Field::Message => self.contact_form.message = value,
        }
    }

    pub fn field_errors(&self) -> &ValidationErrors {
        &self.field_errors
    }

    /// Field errors translated into the active locale.
    pub fn field_error_messages(&self) -> Vec<(Field, &str)> {
        self.field_errors
            .iter()
            .map(|err| (err.field(), self.t(err.translation_key())))
            .collect()
    }

    pub fn submission_state(&self) -> SubmissionState {
        self.submission
    }

    /// Validates the draft and marks a submission as in flight.
    pub fn begin_contact_submission(&mut self) -> Result<PendingSubmission, SessionError> {
        if self.submission.is_submitting() {
            return Err(SessionError::SubmissionInFlight);
        }
        if let Err(errors) = self.contact_form.validate() {
            debug!(errors = errors.len(), "contact form rejected");
            self.field_errors = errors.clone();
            return Err(SessionError::Invalid(errors));
        }
        self.field_errors = ValidationErrors::default();
        self.submission = self.submission.transition(SubmissionEvent::Submit)?;
        Ok(PendingSubmission {
            submitter: Arc::clone(&self.submitter),
            form: self.contact_form.clone(),
        })
    }

    /// Applies the outcome of a submission started with
    /// [`Session::begin_contact_submission`].
    pub fn complete_contact_submission(
        &mut self,
        result: Result<SubmitOutcome, ContactError>,
    ) -> Result<SubmitOutcome, SessionError> {
        match result {
            Ok(outcome) => {
                self.submission = self.submission.transition(SubmissionEvent::Succeeded)?;
                self.contact_form.clear();
                let key = match &outcome {
                    SubmitOutcome::Sent => "contact.successMessage",
                    SubmitOutcome::MailClientOpened { .. } => "contact.openingEmail",
                };
                self.toasts.success(self.t(key));
                self.submission = self.submission.transition(SubmissionEvent::Reset)?;
                Ok(outcome)
            }
            Err(err) => {
                self.submission = self.submission.transition(SubmissionEvent::Failed)?;
                warn!(error = %err, "contact submission failed");
                self.toasts.error(self.t("contact.errorMessage"));
                Err(SessionError::Contact(err))
            }
        }
    }

    pub async fn submit_contact(&mut self) -> Result<SubmitOutcome, SessionError> {
        let pending = self.begin_contact_submission()?;
        let result = pending.send().await;
        self.complete_contact_submission(result)
    }
}
