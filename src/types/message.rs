//! Outgoing message entity.

use super::marshal::{format_rfc2822, indexed_key, FieldMap, Sendable};
use super::Address;
use crate::config::MessageDefaults;
use crate::errors::ValidationError;
use crate::transport::FileUpload;
use bytes::Bytes;
use chrono::{DateTime, FixedOffset};
use serde_json::{Map, Value};
use std::path::Path;

/// Maximum number of `to` recipients in one batch send
pub const MAX_RECIPIENTS: usize = 1000;

/// Clicks tracking mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClicksTracking {
    /// No clicks tracking
    Disabled,
    /// Track clicks in all bodies
    Enabled,
    /// Track clicks in the HTML body only
    HtmlOnly,
}

impl ClicksTracking {
    /// Wire value
    pub fn as_str(&self) -> &'static str {
        match self {
            ClicksTracking::Disabled => "no",
            ClicksTracking::Enabled => "yes",
            ClicksTracking::HtmlOnly => "htmlonly",
        }
    }
}

/// A file attached to a message
#[derive(Debug, Clone, PartialEq)]
pub struct Attachment {
    /// File name presented to the recipient
    pub file_name: String,
    /// File content
    pub content: Bytes,
}

impl Attachment {
    /// Create an attachment from in-memory content
    pub fn new(file_name: impl Into<String>, content: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.into(),
            content: content.into(),
        }
    }

    /// Read an attachment from disk
    pub fn from_path(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "attachment".to_string());
        Ok(Self::new(file_name, content))
    }

    fn upload(&self, field: &str, index: usize) -> FileUpload {
        FileUpload::new(
            indexed_key(field, index),
            self.file_name.clone(),
            self.content.clone(),
        )
    }
}

/// An outgoing message
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Message {
    from: Option<Address>,
    to: Vec<Address>,
    cc: Vec<Address>,
    bcc: Vec<Address>,
    reply_to: Vec<Address>,
    subject: Option<String>,
    text: Option<String>,
    html: Option<String>,
    attachments: Vec<Attachment>,
    inline: Vec<Attachment>,
    tags: Vec<String>,
    campaign_id: Option<String>,
    dkim: Option<bool>,
    delivery_time: Option<DateTime<FixedOffset>>,
    test_mode: Option<bool>,
    tracking: Option<bool>,
    clicks_tracking: Option<ClicksTracking>,
    opens_tracking: Option<bool>,
    headers: Vec<(String, String)>,
    vars: Vec<(String, String)>,
    recipient_vars: Map<String, Value>,
}

impl Message {
    /// Create an empty message with no defaults applied
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a message seeded with sender defaults
    pub fn with_defaults(defaults: &MessageDefaults) -> Self {
        Self {
            from: defaults.from.clone(),
            tags: defaults.tags.clone(),
            campaign_id: defaults.campaign_id.clone(),
            dkim: defaults.dkim,
            test_mode: defaults.test_mode,
            tracking: defaults.tracking,
            clicks_tracking: defaults.clicks_tracking,
            opens_tracking: defaults.opens_tracking,
            ..Self::default()
        }
    }

    /// Set the sender
    pub fn set_from(&mut self, address: impl Into<String>, name: Option<String>) -> &mut Self {
        self.from = Some(Address::new(address, name));
        self
    }

    /// Add a primary recipient.
    ///
    /// Fails without touching the message once [`MAX_RECIPIENTS`] is reached.
    pub fn add_to(
        &mut self,
        address: impl Into<String>,
        name: Option<String>,
    ) -> Result<&mut Self, ValidationError> {
        self.push_to(Address::new(address, name), None)
    }

    /// Add a primary recipient with per-recipient variables for batch sending
    pub fn add_to_with_vars(
        &mut self,
        address: impl Into<String>,
        name: Option<String>,
        vars: Map<String, Value>,
    ) -> Result<&mut Self, ValidationError> {
        self.push_to(Address::new(address, name), Some(vars))
    }

    fn push_to(
        &mut self,
        address: Address,
        vars: Option<Map<String, Value>>,
    ) -> Result<&mut Self, ValidationError> {
        if self.to.len() >= MAX_RECIPIENTS {
            return Err(ValidationError::TooManyRecipients {
                max: MAX_RECIPIENTS,
            });
        }
        if let Some(vars) = vars {
            self.recipient_vars
                .insert(address.address.clone(), Value::Object(vars));
        }
        self.to.push(address);
        Ok(self)
    }

    /// Add a carbon-copy recipient
    pub fn add_cc(&mut self, address: impl Into<String>, name: Option<String>) -> &mut Self {
        self.cc.push(Address::new(address, name));
        self
    }

    /// Add a blind carbon-copy recipient
    pub fn add_bcc(&mut self, address: impl Into<String>, name: Option<String>) -> &mut Self {
        self.bcc.push(Address::new(address, name));
        self
    }

    /// Add a `Reply-To` address
    pub fn add_reply_to(&mut self, address: impl Into<String>, name: Option<String>) -> &mut Self {
        self.reply_to.push(Address::new(address, name));
        self
    }

    /// Set the subject
    pub fn set_subject(&mut self, subject: impl Into<String>) -> &mut Self {
        self.subject = Some(subject.into());
        self
    }

    /// Set the plain-text body
    pub fn set_text(&mut self, text: impl Into<String>) -> &mut Self {
        self.text = Some(text.into());
        self
    }

    /// Set the HTML body
    pub fn set_html(&mut self, html: impl Into<String>) -> &mut Self {
        self.html = Some(html.into());
        self
    }

    /// Attach a file
    pub fn add_attachment(&mut self, attachment: Attachment) -> &mut Self {
        self.attachments.push(attachment);
        self
    }

    /// Attach an inline file (referenced from the HTML body by `cid:`)
    pub fn add_inline(&mut self, attachment: Attachment) -> &mut Self {
        self.inline.push(attachment);
        self
    }

    /// Add a tag
    pub fn add_tag(&mut self, tag: impl Into<String>) -> &mut Self {
        self.tags.push(tag.into());
        self
    }

    /// Set the campaign id
    pub fn set_campaign_id(&mut self, campaign_id: impl Into<String>) -> &mut Self {
        self.campaign_id = Some(campaign_id.into());
        self
    }

    /// Override DKIM signing for this message
    pub fn set_dkim(&mut self, enabled: bool) -> &mut Self {
        self.dkim = Some(enabled);
        self
    }

    /// Schedule delivery
    pub fn set_delivery_time(&mut self, time: impl Into<DateTime<FixedOffset>>) -> &mut Self {
        self.delivery_time = Some(time.into());
        self
    }

    /// Override test mode for this message
    pub fn set_test_mode(&mut self, enabled: bool) -> &mut Self {
        self.test_mode = Some(enabled);
        self
    }

    /// Override tracking for this message
    pub fn set_tracking(&mut self, enabled: bool) -> &mut Self {
        self.tracking = Some(enabled);
        self
    }

    /// Override clicks tracking for this message
    pub fn set_clicks_tracking(&mut self, mode: ClicksTracking) -> &mut Self {
        self.clicks_tracking = Some(mode);
        self
    }

    /// Override opens tracking for this message
    pub fn set_opens_tracking(&mut self, enabled: bool) -> &mut Self {
        self.opens_tracking = Some(enabled);
        self
    }

    /// Add a custom MIME header; a later value for the same name wins
    pub fn add_header(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        upsert(&mut self.headers, name.into(), value.into());
        self
    }

    /// Attach a custom variable; a later value for the same name wins
    pub fn add_var(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        upsert(&mut self.vars, name.into(), value.into());
        self
    }

    /// Sender
    pub fn from(&self) -> Option<&Address> {
        self.from.as_ref()
    }

    /// Primary recipients
    pub fn to(&self) -> &[Address] {
        &self.to
    }

    /// Carbon-copy recipients
    pub fn cc(&self) -> &[Address] {
        &self.cc
    }

    /// Blind carbon-copy recipients
    pub fn bcc(&self) -> &[Address] {
        &self.bcc
    }

    /// Subject
    pub fn subject(&self) -> Option<&str> {
        self.subject.as_deref()
    }

    /// Tags
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Campaign id
    pub fn campaign_id(&self) -> Option<&str> {
        self.campaign_id.as_deref()
    }

    /// Attachments
    pub fn attachments(&self) -> &[Attachment] {
        &self.attachments
    }

    /// Scheduled delivery time
    pub fn delivery_time(&self) -> Option<&DateTime<FixedOffset>> {
        self.delivery_time.as_ref()
    }

    /// Check the message can be sent
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.from.is_none() {
            return Err(ValidationError::MissingSender);
        }
        if self.to.is_empty() {
            return Err(ValidationError::MissingRecipients);
        }
        Ok(())
    }
}

fn upsert(entries: &mut Vec<(String, String)>, name: String, value: String) {
    match entries.iter_mut().find(|(n, _)| *n == name) {
        Some(entry) => entry.1 = value,
        None => entries.push((name, value)),
    }
}

impl Sendable for Message {
    fn to_fields(&self) -> FieldMap {
        let mut fields = FieldMap::new();

        fields.insert_opt("from", self.from.as_ref().map(|a| a.to_string()));
        fields.insert_indexed("to", &self.to);
        fields.insert_indexed("cc", &self.cc);
        fields.insert_indexed("bcc", &self.bcc);
        fields.insert_opt("subject", self.subject.as_deref());

        if !self.reply_to.is_empty() {
            let joined = self
                .reply_to
                .iter()
                .map(|a| a.to_string())
                .collect::<Vec<_>>()
                .join(", ");
            fields.insert("h:Reply-To", joined);
        }

        fields.insert_opt("text", self.text.as_deref());
        fields.insert_opt("html", self.html.as_deref());
        fields.insert_indexed("o:tag", &self.tags);
        fields.insert_opt("o:campaign", self.campaign_id.as_deref());
        fields.insert_flag("o:dkim", self.dkim);
        fields.insert_opt("o:deliverytime", self.delivery_time.as_ref().map(format_rfc2822));
        fields.insert_flag("o:testmode", self.test_mode);
        fields.insert_flag("o:tracking", self.tracking);
        fields.insert_opt("o:tracking-clicks", self.clicks_tracking.map(|m| m.as_str()));
        fields.insert_flag("o:tracking-opens", self.opens_tracking);

        for (name, value) in &self.headers {
            fields.insert(format!("h:{}", name), value.as_str());
        }
        for (name, value) in &self.vars {
            fields.insert(format!("v:{}", name), value.as_str());
        }

        if !self.recipient_vars.is_empty() {
            fields.insert(
                "recipient-variables",
                Value::Object(self.recipient_vars.clone()).to_string(),
            );
        }

        fields
    }

    fn files(&self) -> Vec<FileUpload> {
        let attachments = self
            .attachments
            .iter()
            .enumerate()
            .map(|(i, a)| a.upload("attachment", i + 1));
        let inline = self
            .inline
            .iter()
            .enumerate()
            .map(|(i, a)| a.upload("inline", i + 1));
        attachments.chain(inline).collect()
    }
}
