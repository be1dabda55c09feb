use askama::Template as _;
use hc_core::{gateways::notify::NotificationData, notification::Template};
use hc_entities::{email::EmailContent, user::Language};

mod texts;

pub use self::texts::headline;

/// Messages are shortened to this number of chars.
const MAX_EXCERPT_LEN: usize = 200;

#[derive(askama::Template)]
#[template(path = "notification/body.txt")]
struct NotificationBody<'a> {
    greeting: &'static str,
    headline: &'static str,
    request_title: Option<&'a str>,
    meeting_name: Option<&'a str>,
    actor_name: Option<&'a str>,
    message_excerpt: Option<String>,
    link: Option<String>,
    footer: &'static str,
}

fn excerpt(message: &str) -> String {
    let mut chars = message.chars();
    let mut excerpt: String = chars.by_ref().take(MAX_EXCERPT_LEN).collect();
    if chars.next().is_some() {
        excerpt.push('…');
    }
    excerpt
}

fn link(ui_url: &str, template: Template, data: &NotificationData) -> Option<String> {
    let ui_url = ui_url.trim_end_matches('/');
    if template == Template::MeetingInvite {
        let meeting_id = data.meeting_id?;
        let token = data.invite_token.as_deref()?;
        return Some(format!("{ui_url}/meetings/{meeting_id}/join?token={token}"));
    }
    if template == Template::MessageCreated {
        return Some(format!("{ui_url}/messages"));
    }
    data.request_id
        .map(|request_id| format!("{ui_url}/requests/{request_id}"))
}

pub fn subject(template: Template, language: Language, data: &NotificationData) -> String {
    let headline = headline(template, language);
    match data.request_title.as_deref().or(data.meeting_name.as_deref()) {
        Some(title) => format!("{headline}: {title}"),
        None => headline.to_owned(),
    }
}

/// Renders a localized notification email.
pub fn notification_email(
    template: Template,
    language: Language,
    data: &NotificationData,
    ui_url: &str,
) -> anyhow::Result<EmailContent> {
    let body = NotificationBody {
        greeting: texts::greeting(language),
        headline: headline(template, language),
        request_title: data.request_title.as_deref(),
        meeting_name: data.meeting_name.as_deref(),
        actor_name: data.actor_name.as_deref(),
        message_excerpt: data.message_excerpt.as_deref().map(excerpt),
        link: link(ui_url, template, data),
        footer: texts::footer(language),
    }
    .render()?;
    Ok(EmailContent {
        subject: subject(template, language, data),
        body,
    })
}
