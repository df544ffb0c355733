//! Croft Page — interactive page behaviour as plain state machines.
//!
//! Nothing here touches a document. Each page component is a value plus a
//! pure transition function, so the rendering layer only has to draw the
//! current state.
//!
//! - [`media`]: photo/video toggles, YouTube ids and hero backgrounds
//! - [`forms`]: adoption application visibility, validation and submission

pub mod forms;
pub mod media;

mod proptests;

pub use forms::{
    is_valid_email, is_valid_phone, validate, visible_fields, AdoptionAnswers, ConditionalField,
    HomeOwnership, SubmissionEvent, SubmissionState, ValidationError,
};
pub use media::{
    embed_url, youtube_video_id, EmbedStyle, HeroBackground, MediaEvent, MediaState,
    VideoToggle,
};
