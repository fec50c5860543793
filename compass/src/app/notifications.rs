//! # Toast Notifications
//!
//! A bounded queue of user-facing messages owned by the app. The oldest toast is dropped
//! when the queue is full.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};

use crate::core::error::AppError;

pub const DEFAULT_CAPACITY: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub level: ToastLevel,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct ToastQueue {
    toasts: VecDeque<Toast>,
    capacity: usize,
}

impl Default for ToastQueue {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl ToastQueue {
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            toasts: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, level: ToastLevel, message: impl Into<String>) {
        if self.toasts.len() == self.capacity {
            self.toasts.pop_front();
        }
        self.toasts.push_back(Toast {
            level,
            message: message.into(),
            created_at: lib_utils::now_utc(),
        });
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(ToastLevel::Info, message);
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(ToastLevel::Success, message);
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.push(ToastLevel::Warning, message);
    }

    pub fn error(&mut self, error: &AppError) {
        self.push(ToastLevel::Error, error.user_message());
    }

    /// Take every queued toast, oldest first.
    pub fn drain(&mut self) -> Vec<Toast> {
        self.toasts.drain(..).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.toasts.iter()
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_oldest_dropped_when_full() {
        let mut queue = ToastQueue::with_capacity(2);
        queue.info("one");
        queue.success("two");
        queue.warning("three");

        let messages: Vec<String> = queue.drain().into_iter().map(|t| t.message).collect();
        assert_eq!(messages, vec!["two", "three"]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_error_toast_uses_user_message() {
        let mut queue = ToastQueue::default();
        queue.error(&AppError::Unauthorized);

        let toast = queue.iter().next().unwrap();
        assert_eq!(toast.level, ToastLevel::Error);
        assert_eq!(toast.message, AppError::Unauthorized.user_message());
    }
}
