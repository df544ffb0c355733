//! Adoption application: conditional fields, validation and submission.
//!
//! [`AdoptionAnswers`] is the form's current content. [`visible_fields`]
//! says which follow-up questions to show, [`validate`] lists every problem
//! at once, and [`SubmissionState`] tracks the send.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of agreement checkboxes at the bottom of the form.
pub const AGREEMENT_COUNT: usize = 7;

/// Minimum digits in a phone number.
pub const MIN_PHONE_DIGITS: usize = 10;

static EMAIL_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").ok());

static PHONE_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[\d\s\-().+]+$").ok());

/// Whether the applicant owns or rents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HomeOwnership {
    Own,
    Rent,
    Other,
}

/// Answers entered so far.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AdoptionAnswers {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub vet_phone: String,
    pub home_ownership: Option<HomeOwnership>,
    pub landlord_contact: String,
    /// Raw contents of the "number of children" input.
    pub children: String,
    pub children_ages: String,
    pub previous_dog_owner: Option<bool>,
    pub previous_dogs: String,
    pub current_pets: Option<bool>,
    pub current_pets_detail: String,
    pub agreements: [bool; AGREEMENT_COUNT],
}

impl AdoptionAnswers {
    /// Children count, when the input holds a leading integer.
    pub fn children_count(&self) -> Option<u32> {
        let digits: String = self
            .children
            .trim()
            .chars()
            .take_while(char::is_ascii_digit)
            .collect();
        digits.parse().ok()
    }

    /// Whether every agreement is ticked.
    pub fn all_agreed(&self) -> bool {
        self.agreements.iter().all(|&a| a)
    }
}

// ============================================================================
// Conditional fields
// ============================================================================

/// Follow-up questions shown only for some answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConditionalField {
    /// Shown to renters.
    LandlordContact,
    /// Shown when there is at least one child.
    ChildrenAges,
    /// Shown to previous dog owners.
    PreviousDogs,
    /// Shown when there are pets at home.
    CurrentPetsDetail,
}

impl ConditionalField {
    /// Form input name.
    pub fn input_name(self) -> &'static str {
        match self {
            Self::LandlordContact => "landlordContact",
            Self::ChildrenAges => "childrenAges",
            Self::PreviousDogs => "previousDogs",
            Self::CurrentPetsDetail => "currentPetsDetail",
        }
    }
}

/// Conditional fields that should be visible for `answers`.
pub fn visible_fields(answers: &AdoptionAnswers) -> Vec<ConditionalField> {
    let mut shown = Vec::new();
    if answers.home_ownership == Some(HomeOwnership::Rent) {
        shown.push(ConditionalField::LandlordContact);
    }
    if answers.children_count().is_some_and(|n| n > 0) {
        shown.push(ConditionalField::ChildrenAges);
    }
    if answers.previous_dog_owner == Some(true) {
        shown.push(ConditionalField::PreviousDogs);
    }
    if answers.current_pets == Some(true) {
        shown.push(ConditionalField::CurrentPetsDetail);
    }
    shown
}

// ============================================================================
// Validation
// ============================================================================

/// A problem that blocks submission. `Display` is shown to the applicant.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationError {
    #[error("Please enter a valid email address")]
    InvalidEmail,

    #[error("Please enter a valid phone number (at least 10 digits)")]
    InvalidPhone,

    #[error("Please enter a valid veterinarian phone number")]
    InvalidVetPhone,

    #[error("Please check all required agreements at the bottom of the form")]
    MissingAgreements,

    #[error("Landlord contact information is required for renters")]
    MissingLandlordContact,
}

/// Whether `email` looks like `name@domain.tld`.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.as_ref().is_some_and(|re| re.is_match(email))
}

/// Whether `phone` uses only phone punctuation and has enough digits.
pub fn is_valid_phone(phone: &str) -> bool {
    let digits = phone.chars().filter(char::is_ascii_digit).count();
    PHONE_RE.as_ref().is_some_and(|re| re.is_match(phone)) && digits >= MIN_PHONE_DIGITS
}

/// Every problem with `answers`, in form order. Empty means submittable.
pub fn validate(answers: &AdoptionAnswers) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if !is_valid_email(&answers.email) {
        errors.push(ValidationError::InvalidEmail);
    }
    if !is_valid_phone(&answers.phone) {
        errors.push(ValidationError::InvalidPhone);
    }
    if !answers.vet_phone.is_empty() && !is_valid_phone(&answers.vet_phone) {
        errors.push(ValidationError::InvalidVetPhone);
    }
    if !answers.all_agreed() {
        errors.push(ValidationError::MissingAgreements);
    }
    if answers.home_ownership == Some(HomeOwnership::Rent)
        && answers.landlord_contact.trim().is_empty()
    {
        errors.push(ValidationError::MissingLandlordContact);
    }

    errors
}

// ============================================================================
// Submission
// ============================================================================

/// Where the application is in its send.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionState {
    #[default]
    Editing,
    Submitting,
    /// Sent. The form is cleared and the success message shown.
    Submitted,
    /// The send failed. Answers are kept so the applicant can retry.
    Failed,
}

/// Inputs to the submission state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionEvent {
    /// Validation passed and the send started.
    Send,
    /// The endpoint accepted the application.
    Succeeded,
    /// The send errored.
    Errored,
    /// The applicant changed an answer.
    Edit,
}

impl SubmissionState {
    /// Next state after `event`. Events that do not apply leave the state as is.
    pub fn transition(self, event: SubmissionEvent) -> Self {
        match (self, event) {
            (Self::Editing | Self::Failed, SubmissionEvent::Send) => Self::Submitting,
            (Self::Submitting, SubmissionEvent::Succeeded) => Self::Submitted,
            (Self::Submitting, SubmissionEvent::Errored) => Self::Failed,
            (Self::Submitted | Self::Failed, SubmissionEvent::Edit) => Self::Editing,
            (state, _) => state,
        }
    }

    /// Validate `answers` and start sending them.
    ///
    /// # Errors
    ///
    /// Returns every [`ValidationError`] when the form is not submittable;
    /// the state is unchanged in that case.
    pub fn submit(self, answers: &AdoptionAnswers) -> Result<Self, Vec<ValidationError>> {
        let errors = validate(answers);
        if errors.is_empty() {
            Ok(self.transition(SubmissionEvent::Send))
        } else {
            log::debug!("Adoption form has {} problem(s)", errors.len());
            Err(errors)
        }
    }

    /// Whether the submit button accepts clicks.
    pub fn submit_enabled(self) -> bool {
        self != Self::Submitting
    }

    pub fn shows_success(self) -> bool {
        self == Self::Submitted
    }

    pub fn shows_error(self) -> bool {
        self == Self::Failed
    }
}
