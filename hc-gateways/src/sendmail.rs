//! Delivery through the local `sendmail` binary.
//!
//! Used for the `ses` service: the local MTA relays to Amazon SES.

use fast_chemail::is_valid_email;
use hc_core::gateways::email::EmailGateway;
use hc_entities::email::*;
use itertools::Itertools as _;
#[cfg(not(test))]
use std::{
    io::prelude::*,
    process::{Command, Stdio},
};
use std::{
    io::{Error, Result},
    thread,
};
use time::{format_description::well_known::Rfc2822, OffsetDateTime};

#[derive(Debug, Clone)]
pub struct Sendmail {
    from: EmailAddress,
}

impl Sendmail {
    pub const fn new(from: EmailAddress) -> Self {
        Self { from }
    }

    fn send(&self, mail: String) {
        thread::spawn(move || {
            if let Err(err) = send_raw(&mail) {
                log::warn!("Could not send e-mail: {err}");
            }
        });
    }
}

#[cfg(not(test))]
fn send_raw(mail: &str) -> Result<()> {
    let mut child = Command::new("sendmail")
        .arg("-t")
        .stdin(Stdio::piped())
        .spawn()?;
    child
        .stdin
        .as_mut()
        .ok_or_else(|| Error::other("Could not get stdin"))?
        .write_all(mail.as_bytes())?;
    child.wait_with_output()?;
    Ok(())
}

#[cfg(test)]
fn send_raw(mail: &str) -> Result<()> {
    log::debug!("Would send e-mail: {mail}");
    Ok(())
}

impl EmailGateway for Sendmail {
    fn compose_and_send(&self, recipients: &[EmailAddress], email: &EmailContent) {
        log::debug!("Sending e-mails to: {recipients:?}");
        for to in recipients {
            match compose(&self.from.to_string(), &[to.as_str()], &email.subject, &email.body) {
                Ok(mail) => self.send(mail),
                Err(err) => log::warn!("Failed to compose e-mail: {err}"),
            }
        }
    }
}

// Header lines must not exceed 78 chars including CRLF.
const MAX_HEADER_LINE_LEN: usize = 76;

const LINE_BREAK: &str = "\r\n";

fn encoded_word(input: &str) -> String {
    format!(
        "=?UTF-8?Q?{}?=",
        quoted_printable::encode_to_str(input.as_bytes())
    )
}

/// Splits the value into encoded words that each fit into one
/// (folded) header line.
fn encode_header_field(name: &str, value: &str) -> String {
    let mut lines = Vec::new();
    let mut available = MAX_HEADER_LINE_LEN - name.len() - 1;
    let mut start = 0;
    while start < value.len() {
        let mut end = start;
        for (offset, c) in value[start..].char_indices() {
            let next = start + offset + c.len_utf8();
            if encoded_word(&value[start..next]).len() > available {
                break;
            }
            end = next;
        }
        if end == start {
            // A single char always fits into an empty line
            end = start + value[start..].chars().next().map_or(0, char::len_utf8);
        }
        lines.push(encoded_word(&value[start..end]));
        start = end;
        // Continuation lines start with a single space
        available = MAX_HEADER_LINE_LEN - 1;
    }
    format!("{name}:{}", lines.join(&format!("{LINE_BREAK} ")))
}

pub fn compose(from: &str, to: &[&str], subject: &str, body: &str) -> Result<String> {
    let to = to.iter().filter(|to| is_valid_email(to)).join(",");
    if to.is_empty() {
        return Err(Error::other("No valid email addresses specified"));
    }
    let date = OffsetDateTime::now_utc()
        .format(&Rfc2822)
        .map_err(Error::other)?;
    let mail = format!(
        "Date:{date}\r\n\
         From:{from}\r\n\
         To:{to}\r\n\
         {subject}\r\n\
         MIME-Version:1.0\r\n\
         Content-Type:text/plain;charset=utf-8\r\n\r\n\
         {body}",
        subject = encode_header_field("Subject", subject),
    );
    log::debug!("Composed email: {mail}");
    Ok(mail)
}
