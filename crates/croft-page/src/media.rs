//! Photo/video media: YouTube id extraction, embed URLs, card toggles and
//! the homepage hero background.
//!
//! # Example
//!
//! ```rust
//! use croft_page::media::{MediaEvent, MediaState, VideoToggle};
//!
//! let mut toggle = VideoToggle::new("https://youtu.be/dQw4w9WgXcQ").unwrap();
//! assert_eq!(toggle.state(), MediaState::PhotoShown);
//!
//! toggle.handle(MediaEvent::Toggle);
//! assert_eq!(toggle.button_label("Buttercup"), "Loading...");
//!
//! toggle.handle(MediaEvent::VideoReady);
//! assert!(toggle.iframe_src().is_some());
//! assert_eq!(toggle.button_label("Buttercup"), "Back to Photo");
//! ```

use std::sync::LazyLock;

use croft_content::markdown::Mapping;
use regex::Regex;

static YOUTUBE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?:youtube\.com/watch\?v=|youtu\.be/|youtube\.com/embed/)([a-zA-Z0-9_-]{11})",
        r"youtube\.com/shorts/([a-zA-Z0-9_-]{11})",
    ]
    .iter()
    .filter_map(|p| Regex::new(p).ok())
    .collect()
});

/// Extract the 11-character video id from a YouTube URL.
///
/// Accepts `watch?v=`, `youtu.be/`, `embed/` and `shorts/` forms.
pub fn youtube_video_id(url: &str) -> Option<String> {
    let url = url.trim();
    if url.is_empty() {
        return None;
    }
    YOUTUBE_PATTERNS
        .iter()
        .find_map(|re| re.captures(url))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Player configuration for an embed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbedStyle {
    /// Muted looping background without controls.
    Background,
    /// Autoplaying card video with sound and controls.
    Card,
    /// Plain inline player for photo/video boxes.
    Inline,
}

/// Build the embed URL for `video_id`.
pub fn embed_url(video_id: &str, style: EmbedStyle) -> String {
    let query = match style {
        EmbedStyle::Background => format!(
            "autoplay=1&mute=1&loop=1&playlist={video_id}&controls=0&showinfo=0&rel=0&modestbranding=1&playsinline=1"
        ),
        EmbedStyle::Card => "autoplay=1&mute=0&controls=1&modestbranding=1&autohide=1&rel=0&showinfo=0&iv_load_policy=3".to_string(),
        EmbedStyle::Inline => "enablejsapi=1&rel=0".to_string(),
    };
    format!("https://www.youtube.com/embed/{video_id}?{query}")
}

// ============================================================================
// Photo/video toggle
// ============================================================================

/// What a media container is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MediaState {
    #[default]
    PhotoShown,
    /// The video was requested and the player is starting.
    VideoLoading,
    VideoShown,
}

/// Inputs to the media state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaEvent {
    /// The visitor pressed the toggle button.
    Toggle,
    /// The player finished loading.
    VideoReady,
    /// The player could not load.
    VideoFailed,
}

impl MediaState {
    /// Next state after `event`. Events that do not apply leave the state as is.
    pub fn transition(self, event: MediaEvent) -> Self {
        match (self, event) {
            (Self::PhotoShown, MediaEvent::Toggle) => Self::VideoLoading,
            (Self::VideoLoading, MediaEvent::VideoReady) => Self::VideoShown,
            (Self::VideoLoading, MediaEvent::VideoFailed) => Self::PhotoShown,
            (Self::VideoShown, MediaEvent::Toggle) => Self::PhotoShown,
            (Self::VideoShown, MediaEvent::VideoFailed) => Self::PhotoShown,
            (state, _) => state,
        }
    }

    /// Whether the photo is visible.
    pub fn shows_photo(self) -> bool {
        self == Self::PhotoShown
    }

    /// Whether the player should be mounted.
    pub fn plays_video(self) -> bool {
        matches!(self, Self::VideoLoading | Self::VideoShown)
    }

    /// Whether the toggle button accepts clicks.
    pub fn button_enabled(self) -> bool {
        self != Self::VideoLoading
    }

    /// Toggle button text for an animal called `name`.
    pub fn button_label(self, name: &str) -> String {
        match self {
            Self::PhotoShown => format!("Meet {name}"),
            Self::VideoLoading => "Loading...".to_string(),
            Self::VideoShown => "Back to Photo".to_string(),
        }
    }
}

/// A photo/video toggle bound to one video.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoToggle {
    video_id: String,
    style: EmbedStyle,
    state: MediaState,
}

impl VideoToggle {
    /// A card toggle for `video_url`, or `None` when the URL is not a
    /// recognisable YouTube link (the card then shows only its photo).
    pub fn new(video_url: &str) -> Option<Self> {
        youtube_video_id(video_url).map(|video_id| Self {
            video_id,
            style: EmbedStyle::Card,
            state: MediaState::PhotoShown,
        })
    }

    /// Use a different player configuration.
    pub fn with_style(mut self, style: EmbedStyle) -> Self {
        self.style = style;
        self
    }

    pub fn video_id(&self) -> &str {
        &self.video_id
    }

    pub fn state(&self) -> MediaState {
        self.state
    }

    /// Apply `event` and return the new state.
    pub fn handle(&mut self, event: MediaEvent) -> MediaState {
        let next = self.state.transition(event);
        if next != self.state {
            log::debug!("{}: {:?} -> {:?}", self.video_id, self.state, next);
        }
        self.state = next;
        next
    }

    /// Player source while the video is loading or shown; cleared otherwise
    /// so a hidden player stops.
    pub fn iframe_src(&self) -> Option<String> {
        self.state
            .plays_video()
            .then(|| embed_url(&self.video_id, self.style))
    }

    pub fn button_label(&self, name: &str) -> String {
        self.state.button_label(name)
    }
}

// ============================================================================
// Hero background
// ============================================================================

/// Background of the homepage hero section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeroBackground {
    /// Muted looping YouTube background.
    Video { embed_url: String },
    /// A background image.
    Image(String),
    /// The stylesheet default.
    Default,
}

fn non_blank<'a>(section: &'a Mapping, key: &str) -> Option<&'a str> {
    section
        .get(key)
        .and_then(|v| v.as_str())
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

impl HeroBackground {
    /// Choose the background from a `hero_section` mapping.
    ///
    /// Video is used unless `use_video_background` is `false`, provided
    /// `hero_video_url` is a valid YouTube link. An invalid link falls back
    /// to `background_image`.
    pub fn from_section(section: &Mapping) -> Self {
        let use_video = section
            .get("use_video_background")
            .and_then(|v| v.as_bool())
            .unwrap_or(true);

        if use_video {
            if let Some(url) = non_blank(section, "hero_video_url") {
                match youtube_video_id(url) {
                    Some(id) => {
                        log::debug!("Video background enabled: {id}");
                        return Self::Video {
                            embed_url: embed_url(&id, EmbedStyle::Background),
                        };
                    }
                    None => log::warn!("Invalid YouTube URL '{url}', falling back to image"),
                }
            }
        }

        match non_blank(section, "background_image") {
            Some(image) => Self::Image(image.to_string()),
            None => Self::Default,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use croft_content::markdown::FrontmatterValue;

    const ID: &str = "dQw4w9WgXcQ";

    // ------------------------------------------------------------------------
    // youtube_video_id tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_video_id_url_forms() {
        for url in [
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=42s",
            "https://youtu.be/dQw4w9WgXcQ",
            "https://www.youtube.com/embed/dQw4w9WgXcQ",
            "https://youtube.com/shorts/dQw4w9WgXcQ",
            "  https://youtu.be/dQw4w9WgXcQ  ",
        ] {
            assert_eq!(youtube_video_id(url).as_deref(), Some(ID), "{url}");
        }
    }

    #[test]
    fn test_video_id_rejects() {
        assert_eq!(youtube_video_id(""), None);
        assert_eq!(youtube_video_id("https://vimeo.com/12345"), None);
        assert_eq!(youtube_video_id("https://youtu.be/short"), None);
    }

    #[test]
    fn test_embed_urls() {
        assert_eq!(
            embed_url(ID, EmbedStyle::Background),
            format!(
                "https://www.youtube.com/embed/{ID}?autoplay=1&mute=1&loop=1&playlist={ID}&controls=0&showinfo=0&rel=0&modestbranding=1&playsinline=1"
            )
        );
        assert!(embed_url(ID, EmbedStyle::Card).contains("mute=0&controls=1"));
        assert_eq!(
            embed_url(ID, EmbedStyle::Inline),
            format!("https://www.youtube.com/embed/{ID}?enablejsapi=1&rel=0")
        );
    }

    // ------------------------------------------------------------------------
    // MediaState tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_toggle_cycle() {
        let s = MediaState::PhotoShown.transition(MediaEvent::Toggle);
        assert_eq!(s, MediaState::VideoLoading);
        assert!(!s.button_enabled());
        let s = s.transition(MediaEvent::VideoReady);
        assert_eq!(s, MediaState::VideoShown);
        let s = s.transition(MediaEvent::Toggle);
        assert_eq!(s, MediaState::PhotoShown);
    }

    #[test]
    fn test_toggle_while_loading_is_ignored() {
        assert_eq!(
            MediaState::VideoLoading.transition(MediaEvent::Toggle),
            MediaState::VideoLoading
        );
    }

    #[test]
    fn test_failed_video_returns_to_photo() {
        assert_eq!(
            MediaState::VideoLoading.transition(MediaEvent::VideoFailed),
            MediaState::PhotoShown
        );
        assert_eq!(
            MediaState::PhotoShown.transition(MediaEvent::VideoReady),
            MediaState::PhotoShown
        );
    }

    #[test]
    fn test_button_labels() {
        assert_eq!(MediaState::PhotoShown.button_label("Clover"), "Meet Clover");
        assert_eq!(MediaState::VideoShown.button_label("Clover"), "Back to Photo");
    }

    #[test]
    fn test_video_toggle_src_follows_state() {
        assert!(VideoToggle::new("not a video").is_none());

        let mut toggle = VideoToggle::new("https://youtu.be/dQw4w9WgXcQ").unwrap();
        assert_eq!(toggle.iframe_src(), None);
        toggle.handle(MediaEvent::Toggle);
        assert_eq!(toggle.iframe_src(), Some(embed_url(ID, EmbedStyle::Card)));
        toggle.handle(MediaEvent::VideoReady);
        toggle.handle(MediaEvent::Toggle);
        assert_eq!(toggle.iframe_src(), None);
    }

    // ------------------------------------------------------------------------
    // HeroBackground tests
    // ------------------------------------------------------------------------

    fn section(pairs: &[(&str, FrontmatterValue)]) -> Mapping {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_hero_video_by_default() {
        let s = section(&[
            ("hero_video_url", "https://youtu.be/dQw4w9WgXcQ".into()),
            ("background_image", "/images/farm.jpg".into()),
        ]);
        assert_eq!(
            HeroBackground::from_section(&s),
            HeroBackground::Video {
                embed_url: embed_url(ID, EmbedStyle::Background)
            }
        );
    }

    #[test]
    fn test_hero_video_disabled() {
        let s = section(&[
            ("use_video_background", false.into()),
            ("hero_video_url", "https://youtu.be/dQw4w9WgXcQ".into()),
            ("background_image", "/images/farm.jpg".into()),
        ]);
        assert_eq!(
            HeroBackground::from_section(&s),
            HeroBackground::Image("/images/farm.jpg".into())
        );
    }

    #[test]
    fn test_hero_invalid_url_falls_back() {
        let s = section(&[
            ("hero_video_url", "https://example.com/clip".into()),
            ("background_image", "/images/farm.jpg".into()),
        ]);
        assert_eq!(
            HeroBackground::from_section(&s),
            HeroBackground::Image("/images/farm.jpg".into())
        );
    }

    #[test]
    fn test_hero_default() {
        let s = section(&[("hero_video_url", "  ".into()), ("background_image", "".into())]);
        assert_eq!(HeroBackground::from_section(&s), HeroBackground::Default);
        assert_eq!(HeroBackground::from_section(&Mapping::new()), HeroBackground::Default);
    }
}
