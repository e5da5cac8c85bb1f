//! Non-fatal findings collected while unpacking a container.
//!
//! A decode either fails with an [`SqzError`](crate::error::SqzError) or
//! produces a complete buffer. Oddities that do not invalidate the buffer
//! (an advisory size that does not match, bytes left over after the end of
//! the stream, a Huffman codeword cut off at the end) are collected as
//! `Notification` items so asset tooling can report them. Every notification is also emitted as a `tracing` warning.

use std::fmt;

/// Category of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationType {
    /// The decoded length differs from the advisory size in the header.
    PayloadSizeMismatch,
    /// Unread bytes remain after the decoder reached its end of stream.
    TrailingData,
    /// The DIET end marker appeared before the declared size was produced.
    EarlyEndOfStream,
    /// A full DIET output is followed by something other than the end marker.
    MissingEndMarker,
    /// The Huffman bits ran out inside a codeword longer than byte padding.
    PartialCodeword,
    /// Reading past the end of the stream failed; the decoded data is intact.
    TrailingReadFailed,
}

impl fmt::Display for NotificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PayloadSizeMismatch => write!(f, "PayloadSizeMismatch"),
            Self::TrailingData => write!(f, "TrailingData"),
            Self::EarlyEndOfStream => write!(f, "EarlyEndOfStream"),
            Self::MissingEndMarker => write!(f, "MissingEndMarker"),
            Self::PartialCodeword => write!(f, "PartialCodeword"),
            Self::TrailingReadFailed => write!(f, "TrailingReadFailed"),
        }
    }
}

/// A single notification produced during unpacking.
#[derive(Debug, Clone)]
pub struct Notification {
    pub notification_type: NotificationType,
    pub message: String,
}

impl Notification {
    pub fn new(notification_type: NotificationType, message: impl Into<String>) -> Self {
        Self {
            notification_type,
            message: message.into(),
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.notification_type, self.message)
    }
}

/// Collects notifications during one unpack call.
#[derive(Debug, Clone, Default)]
pub struct NotificationCollection {
    items: Vec<Notification>,
}

impl NotificationCollection {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Record a notification and log it.
    pub fn notify(&mut self, notification_type: NotificationType, message: impl Into<String>) {
        let notification = Notification::new(notification_type, message);
        tracing::warn!(kind = %notification.notification_type, "{}", notification.message);
        self.items.push(notification);
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Notification> {
        self.items.iter()
    }

    /// Check whether any notification of the given type exists.
    pub fn has_type(&self, nt: NotificationType) -> bool {
        self.items.iter().any(|n| n.notification_type == nt)
    }

    pub fn into_vec(self) -> Vec<Notification> {
        self.items
    }
}

impl IntoIterator for NotificationCollection {
    type Item = Notification;
    type IntoIter = std::vec::IntoIter<Notification>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a NotificationCollection {
    type Item = &'a Notification;
    type IntoIter = std::slice::Iter<'a, Notification>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
