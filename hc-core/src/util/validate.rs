use hc_entities::{meeting::Meeting, request::Request, watch::Watch};
use thiserror::Error;

pub use fast_chemail::is_valid_email;

pub const MAX_TITLE_LEN: usize = 255;
pub const MAX_DESCRIPTION_LEN: usize = 4096;
pub const MAX_MESSAGE_LEN: usize = 4096;
pub const MAX_NICKNAME_LEN: usize = 64;

pub trait Validate {
    type Error;
    fn validate(&self) -> Result<(), Self::Error>;
}

pub fn is_valid_title(title: &str) -> bool {
    let len = title.trim().chars().count();
    len > 0 && title.chars().count() <= MAX_TITLE_LEN
}

pub fn is_valid_description(description: &str) -> bool {
    description.chars().count() <= MAX_DESCRIPTION_LEN
}

pub fn is_valid_message_content(content: &str) -> bool {
    !content.trim().is_empty() && content.chars().count() <= MAX_MESSAGE_LEN
}

pub fn is_valid_nickname(nickname: &str) -> bool {
    !nickname.is_empty()
        && nickname.chars().count() <= MAX_NICKNAME_LEN
        && !nickname.chars().any(char::is_whitespace)
}

pub fn is_valid_url(url: &str) -> bool {
    url::Url::parse(url)
        .map(|url| matches!(url.scheme(), "http" | "https"))
        .unwrap_or(false)
}

#[derive(Debug, Error)]
pub enum RequestInvalidation {
    #[error("Invalid title")]
    Title,
    #[error("Description too long")]
    Description,
    #[error("Invalid URL")]
    Url,
    #[error("Invalid weight")]
    Kilograms,
}

impl Validate for Request {
    type Error = RequestInvalidation;
    fn validate(&self) -> Result<(), Self::Error> {
        if !is_valid_title(&self.title) {
            return Err(Self::Error::Title);
        }
        if let Some(description) = &self.description {
            if !is_valid_description(description) {
                return Err(Self::Error::Description);
            }
        }
        if let Some(url) = &self.url {
            if !is_valid_url(url) {
                return Err(Self::Error::Url);
            }
        }
        if let Some(kg) = self.kilograms {
            if !kg.is_finite() || kg < 0.0 {
                return Err(Self::Error::Kilograms);
            }
        }
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum MeetingInvalidation {
    #[error("Invalid name")]
    Name,
    #[error("The end date is before the start")]
    EndDateBeforeStart,
    #[error("Invalid URL")]
    Url,
}

impl Validate for Meeting {
    type Error = MeetingInvalidation;
    fn validate(&self) -> Result<(), Self::Error> {
        if self.name.trim().is_empty() || self.name.chars().count() > MAX_TITLE_LEN {
            return Err(Self::Error::Name);
        }
        if self.end_date < self.start_date {
            return Err(Self::Error::EndDateBeforeStart);
        }
        if let Some(url) = &self.more_info_url {
            if !is_valid_url(url) {
                return Err(Self::Error::Url);
            }
        }
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum WatchInvalidation {
    #[error("No criteria")]
    NoCriteria,
}

impl Validate for Watch {
    type Error = WatchInvalidation;
    fn validate(&self) -> Result<(), Self::Error> {
        if !self.has_criteria() {
            return Err(Self::Error::NoCriteria);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hc_entities::builders::*;

    #[test]
    fn title_length_boundaries() {
        assert!(!is_valid_title(""));
        assert!(!is_valid_title("   "));
        assert!(is_valid_title("a"));
        assert!(is_valid_title(&"a".repeat(255)));
        assert!(!is_valid_title(&"a".repeat(256)));
        // Counted in characters, not bytes
        assert!(is_valid_title(&"ü".repeat(255)));
    }

    #[test]
    fn validate_request() {
        let request = Request::build().title("x").finish();
        assert!(request.validate().is_ok());

        let request = Request::build().title("").finish();
        assert!(matches!(request.validate(), Err(RequestInvalidation::Title)));

        let request = Request::build()
            .description(&"d".repeat(MAX_DESCRIPTION_LEN + 1))
            .finish();
        assert!(matches!(
            request.validate(),
            Err(RequestInvalidation::Description)
        ));

        let mut request = Request::build().finish();
        request.kilograms = Some(-1.0);
        assert!(matches!(request.validate(), Err(RequestInvalidation::Kilograms)));

        let mut request = Request::build().finish();
        request.url = Some("ftp://example.org".into());
        assert!(matches!(request.validate(), Err(RequestInvalidation::Url)));
    }

    #[test]
    fn message_content() {
        assert!(!is_valid_message_content(" \n"));
        assert!(is_valid_message_content("hi"));
        assert!(!is_valid_message_content(&"m".repeat(MAX_MESSAGE_LEN + 1)));
    }

    #[test]
    fn nicknames() {
        assert!(is_valid_nickname("carrier_42"));
        assert!(!is_valid_nickname(""));
        assert!(!is_valid_nickname("two words"));
    }

    #[test]
    fn watch_needs_a_criterion() {
        let watch = Watch::build().finish();
        assert!(watch.validate().is_err());
        let watch = Watch::build().size_floor(Default::default()).finish();
        assert!(watch.validate().is_ok());
        let watch = Watch::build().search_text("  ").finish();
        assert!(watch.validate().is_err());
    }
}
