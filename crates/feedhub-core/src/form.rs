//! Feedback form state: draft fields, validation, submission bookkeeping and
//! the recent-feedback list.

use std::collections::BTreeMap;
use std::time::Instant;

use feedhub_platform::{Feedback, FeedbackApi, NewFeedback, Surface};
use tracing::{error, info, warn};

use crate::config::CelebrationConfig;
use crate::confetti::{Confetti, FireOptions};
use crate::rating::MAX_STARS;

pub const SUBMIT_FAILED: &str = "Failed to submit. Please try again.";
pub const THANK_YOU: &str = "Thanks! Your feedback is received 🎉";
pub const EMPTY_RECENT: &str = "No feedback yet — be the first!";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Name,
    Email,
    Rating,
    /// Not an input; carries the transport failure message.
    Submit,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(BTreeMap<Field, String>);

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    pub fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn remove(&mut self, field: Field) {
        self.0.remove(&field);
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }
}

pub fn validate(record: &NewFeedback) -> ValidationErrors {
    let mut errors = ValidationErrors::default();
    if record.name.trim().is_empty() {
        errors.insert(Field::Name, "Please enter your name");
    }
    if record.email.trim().is_empty() {
        errors.insert(Field::Email, "Please enter your email");
    } else if !looks_like_email(&record.email) {
        errors.insert(Field::Email, "Enter a valid email");
    }
    if !(1..=MAX_STARS).contains(&record.rating) {
        errors.insert(Field::Rating, "Select a rating");
    }
    errors
}

/// Shape check only: some whitespace-free run of the form `x@y.z`.
pub fn looks_like_email(email: &str) -> bool {
    email.split_whitespace().any(|token| {
        let chars: Vec<char> = token.chars().collect();
        let at = chars.iter().skip(1).position(|&c| c == '@').map(|i| i + 1);
        let dot = chars
            .iter()
            .take(chars.len().saturating_sub(1))
            .rposition(|&c| c == '.');
        matches!((at, dot), (Some(at), Some(dot)) if dot >= at + 2)
    })
}

#[derive(Debug, Clone, PartialEq)]
pub struct SuccessBanner {
    pub message: String,
    pub feedback: Feedback,
    pub expires_at: Instant,
}

impl SuccessBanner {
    pub fn rating_line(&self) -> String {
        format!("Rating: {} / {MAX_STARS}", self.feedback.rating)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Stored by the server. The caller fires confetti and re-fetches the list.
    Accepted { confetti_count: usize },
    Rejected,
}

#[derive(Debug, Clone, Default)]
pub struct FeedbackForm {
    draft: NewFeedback,
    errors: ValidationErrors,
    submitting: bool,
    banner: Option<SuccessBanner>,
    recent: Vec<Feedback>,
    celebration: CelebrationConfig,
}

impl FeedbackForm {
    pub fn new(celebration: CelebrationConfig) -> Self {
        Self {
            celebration,
            ..Default::default()
        }
    }

    pub fn draft(&self) -> &NewFeedback {
        &self.draft
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn banner(&self) -> Option<&SuccessBanner> {
        self.banner.as_ref()
    }

    pub fn recent(&self) -> &[Feedback] {
        &self.recent
    }

    pub fn responses_badge(&self) -> String {
        format!("Live • {} responses", self.recent.len())
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.draft.name = name.into();
        self.errors.remove(Field::Name);
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.draft.email = email.into();
        self.errors.remove(Field::Email);
    }

    pub fn set_comments(&mut self, comments: impl Into<String>) {
        self.draft.comments = comments.into();
    }

    pub fn set_rating(&mut self, rating: u8) {
        self.draft.rating = rating;
        self.errors.remove(Field::Rating);
    }

    pub fn reset(&mut self) {
        self.draft = NewFeedback::default();
        self.errors.clear();
    }

    /// Validates the draft. Returns the record to send, or `None` when the
    /// draft is invalid (errors are stored) or a submission is in flight.
    pub fn begin_submit(&mut self) -> Option<NewFeedback> {
        if self.submitting {
            return None;
        }
        let errors = validate(&self.draft);
        if !errors.is_empty() {
            self.errors = errors;
            return None;
        }
        self.errors.clear();
        self.submitting = true;
        Some(self.draft.clone())
    }

    pub fn finish_submit(
        &mut self,
        result: feedhub_platform::Result<Feedback>,
        now: Instant,
    ) -> SubmitOutcome {
        self.submitting = false;
        match result {
            Ok(feedback) => {
                info!("feedback #{} stored with rating {}", feedback.id, feedback.rating);
                let confetti_count = self.celebration.confetti_count(feedback.rating);
                self.draft = NewFeedback::default();
                self.banner = Some(SuccessBanner {
                    message: THANK_YOU.to_string(),
                    feedback,
                    expires_at: now + self.celebration.banner_duration(),
                });
                SubmitOutcome::Accepted { confetti_count }
            }
            Err(err) => {
                error!("feedback submission failed: {err}");
                self.errors.insert(Field::Submit, SUBMIT_FAILED);
                SubmitOutcome::Rejected
            }
        }
    }

    /// Replaces the recent list. Failures keep whatever was shown before.
    pub fn apply_recent(&mut self, result: feedhub_platform::Result<Vec<Feedback>>) {
        match result {
            Ok(recent) => self.recent = recent,
            Err(err) => warn!("could not fetch recent feedback: {err}"),
        }
    }

    pub fn tick(&mut self, now: Instant) {
        if self.banner.as_ref().is_some_and(|b| now >= b.expires_at) {
            self.banner = None;
        }
    }

    pub fn fetch_recent_blocking(&mut self, api: &dyn FeedbackApi) {
        self.apply_recent(api.list());
    }

    /// Validate, send, celebrate, refresh, all on the calling thread.
    /// Returns `None` when nothing was sent.
    pub fn submit_blocking<S: Surface>(
        &mut self,
        api: &dyn FeedbackApi,
        confetti: &mut Confetti<S>,
        now: Instant,
    ) -> Option<SubmitOutcome> {
        let record = self.begin_submit()?;
        let outcome = self.finish_submit(api.create(&record), now);
        if let SubmitOutcome::Accepted { confetti_count } = outcome {
            confetti.fire(FireOptions::count(confetti_count), now);
            self.fetch_recent_blocking(api);
        }
        Some(outcome)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::time::Duration;

    use super::*;
    use crate::config::ConfettiConfig;
    use crate::confetti::tests::RecordingSurface;

    #[derive(Default)]
    struct ScriptedApi {
        stored: Mutex<Vec<Feedback>>,
        fail_create: bool,
        fail_list: bool,
        creates: Mutex<usize>,
    }

    impl FeedbackApi for ScriptedApi {
        fn list(&self) -> feedhub_platform::Result<Vec<Feedback>> {
            if self.fail_list {
                return Err("connection refused".into());
            }
            let mut stored = self.stored.lock().unwrap().clone();
            stored.reverse();
            Ok(stored)
        }

        fn create(&self, feedback: &NewFeedback) -> feedhub_platform::Result<Feedback> {
            *self.creates.lock().unwrap() += 1;
            if self.fail_create {
                return Err("503 Service Unavailable".into());
            }
            let mut stored = self.stored.lock().unwrap();
            let created = Feedback {
                id: stored.len() as u64 + 1,
                name: feedback.name.clone(),
                email: feedback.email.clone(),
                rating: feedback.rating,
                comments: feedback.comments.clone(),
                created_at: None,
            };
            stored.push(created.clone());
            Ok(created)
        }
    }

    fn record(name: &str, email: &str, rating: u8) -> NewFeedback {
        NewFeedback {
            name: name.into(),
            email: email.into(),
            rating,
            comments: String::new(),
        }
    }

    fn fill(form: &mut FeedbackForm, name: &str, email: &str, rating: u8) {
        form.set_name(name);
        form.set_email(email);
        form.set_rating(rating);
    }

    fn confetti() -> Confetti<RecordingSurface> {
        Confetti::new(RecordingSurface::sized(800.0, 600.0), &ConfettiConfig::default())
            .with_seed(11)
    }

    #[test]
    fn every_star_rating_is_accepted() {
        for rating in 1..=5 {
            assert!(validate(&record("Aarti Singh", "a@b.com", rating)).is_empty());
        }
    }

    #[test]
    fn ratings_outside_range_are_rejected() {
        for rating in [0, 6, 255] {
            let errors = validate(&record("Aarti Singh", "a@b.com", rating));
            assert_eq!(errors.get(Field::Rating), Some("Select a rating"));
            assert_eq!(errors.len(), 1);
        }
    }

    #[test]
    fn blank_name_and_email_are_reported() {
        let errors = validate(&record("   ", "", 3));
        assert_eq!(errors.get(Field::Name), Some("Please enter your name"));
        assert_eq!(errors.get(Field::Email), Some("Please enter your email"));
    }

    #[test]
    fn email_shape_check() {
        for ok in ["a@b.com", "first.last@mail.example.org", "x@y.z", "say hi a@b.co"] {
            assert!(looks_like_email(ok), "{ok}");
        }
        for bad in ["ab.com", "a@b", "@b.com", "a@.com", "a@b.", "a @b.com"] {
            assert!(!looks_like_email(bad), "{bad}");
        }
        let errors = validate(&record("Aarti", "not-an-email", 4));
        assert_eq!(errors.get(Field::Email), Some("Enter a valid email"));
    }

    #[test]
    fn successful_submit_celebrates_and_refreshes() {
        let api = ScriptedApi::default();
        let mut confetti = confetti();
        let mut form = FeedbackForm::default();
        fill(&mut form, "Aarti Singh", "a@b.com", 5);
        let now = Instant::now();

        let outcome = form.submit_blocking(&api, &mut confetti, now);

        assert_eq!(outcome, Some(SubmitOutcome::Accepted { confetti_count: 185 }));
        assert_eq!(confetti.particles().len(), 185);
        let banner = form.banner().unwrap();
        assert_eq!(banner.rating_line(), "Rating: 5 / 5");
        assert_eq!(banner.message, THANK_YOU);
        assert_eq!(form.draft(), &NewFeedback::default());
        assert_eq!(form.recent().len(), 1);
        assert_eq!(form.responses_badge(), "Live • 1 responses");
        assert!(!form.is_submitting());
    }

    #[test]
    fn invalid_draft_never_reaches_the_api() {
        let api = ScriptedApi::default();
        let mut confetti = confetti();
        let mut form = FeedbackForm::default();
        fill(&mut form, "", "a@b.com", 3);

        assert_eq!(form.submit_blocking(&api, &mut confetti, Instant::now()), None);
        assert!(form.errors().contains(Field::Name));
        assert_eq!(*api.creates.lock().unwrap(), 0);
        assert!(!confetti.is_animating());
    }

    #[test]
    fn zero_rating_blocks_submission() {
        let mut form = FeedbackForm::default();
        fill(&mut form, "Aarti", "a@b.com", 0);
        assert!(form.begin_submit().is_none());
        assert_eq!(form.errors().get(Field::Rating), Some("Select a rating"));
    }

    #[test]
    fn transport_failure_shows_one_generic_error_and_keeps_the_draft() {
        let api = ScriptedApi {
            fail_create: true,
            ..Default::default()
        };
        let mut confetti = confetti();
        let mut form = FeedbackForm::default();
        fill(&mut form, "Aarti", "a@b.com", 2);

        let outcome = form.submit_blocking(&api, &mut confetti, Instant::now());

        assert_eq!(outcome, Some(SubmitOutcome::Rejected));
        assert_eq!(form.errors().get(Field::Submit), Some(SUBMIT_FAILED));
        assert_eq!(form.errors().len(), 1);
        assert_eq!(form.draft().name, "Aarti");
        assert!(form.banner().is_none());
        assert!(!confetti.is_animating());
        assert_eq!(*api.creates.lock().unwrap(), 1);
    }

    #[test]
    fn failed_fetch_keeps_the_previous_list() {
        let mut form = FeedbackForm::default();
        form.apply_recent(Err("timeout".into()));
        assert!(form.recent().is_empty());

        let api = ScriptedApi::default();
        api.create(&record("A", "a@b.com", 4)).unwrap();
        form.fetch_recent_blocking(&api);
        assert_eq!(form.recent().len(), 1);

        let broken = ScriptedApi {
            fail_list: true,
            ..Default::default()
        };
        form.fetch_recent_blocking(&broken);
        assert_eq!(form.recent().len(), 1);
    }

    #[test]
    fn editing_a_field_clears_only_its_error() {
        let mut form = FeedbackForm::default();
        fill(&mut form, "", "", 0);
        assert!(form.begin_submit().is_none());
        assert_eq!(form.errors().len(), 3);

        form.set_name("Aarti");
        assert!(!form.errors().contains(Field::Name));
        assert!(form.errors().contains(Field::Email));

        form.set_rating(4);
        assert!(!form.errors().contains(Field::Rating));

        form.reset();
        assert!(form.errors().is_empty());
        assert_eq!(form.draft().rating, 5);
    }

    #[test]
    fn only_one_submission_in_flight() {
        let mut form = FeedbackForm::default();
        fill(&mut form, "Aarti", "a@b.com", 4);
        assert!(form.begin_submit().is_some());
        assert!(form.is_submitting());
        assert!(form.begin_submit().is_none());
    }

    #[test]
    fn banner_clears_after_its_delay() {
        let mut form = FeedbackForm::default();
        fill(&mut form, "Aarti", "a@b.com", 3);
        let sent = form.begin_submit().unwrap();
        let now = Instant::now();
        let created = Feedback {
            id: 9,
            name: sent.name,
            email: sent.email,
            rating: sent.rating,
            comments: sent.comments,
            created_at: None,
        };
        assert_eq!(
            form.finish_submit(Ok(created), now),
            SubmitOutcome::Accepted { confetti_count: 135 }
        );

        form.tick(now + Duration::from_secs(4));
        assert!(form.banner().is_some());
        form.tick(now + Duration::from_secs(5));
        assert!(form.banner().is_none());
    }
}
