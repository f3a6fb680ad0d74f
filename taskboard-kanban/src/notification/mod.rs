//! Notification commands

use crate::context::BoardContext;
use crate::error::Result;
use crate::gateway::KanbanGateway;
use crate::operation::Execute;
use crate::types::{Notification, NotificationId};
use async_trait::async_trait;
use serde::Deserialize;

/// List the signed-in user's notifications, newest first
#[derive(Debug, Default, Clone)]
pub struct ListNotifications {
    /// Only return unread notifications
    pub unread_only: bool,
}

impl ListNotifications {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn unread_only(mut self) -> Self {
        self.unread_only = true;
        self
    }
}

#[async_trait]
impl<G: KanbanGateway + ?Sized> Execute<BoardContext<G>> for ListNotifications {
    type Output = Vec<Notification>;

    async fn execute(&self, ctx: &BoardContext<G>) -> Result<Vec<Notification>> {
        let mut notifications = ctx.gateway().list_notifications().await?;
        if self.unread_only {
            notifications.retain(|n| !n.is_read);
        }
        notifications.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(notifications)
    }
}

/// Number of unread notifications
#[derive(Debug, Default, Clone)]
pub struct UnreadCount;

#[async_trait]
impl<G: KanbanGateway + ?Sized> Execute<BoardContext<G>> for UnreadCount {
    type Output = u64;

    async fn execute(&self, ctx: &BoardContext<G>) -> Result<u64> {
        ctx.gateway().unread_notification_count().await
    }
}

/// Mark one notification as read
#[derive(Debug, Clone, Deserialize)]
pub struct MarkNotificationRead {
    pub id: NotificationId,
}

impl MarkNotificationRead {
    pub fn new(id: impl Into<NotificationId>) -> Self {
        Self { id: id.into() }
    }
}

#[async_trait]
impl<G: KanbanGateway + ?Sized> Execute<BoardContext<G>> for MarkNotificationRead {
    type Output = ();

    async fn execute(&self, ctx: &BoardContext<G>) -> Result<()> {
        ctx.gateway().mark_notification_read(&self.id).await
    }
}

/// Mark every notification as read
#[derive(Debug, Default, Clone)]
pub struct MarkAllNotificationsRead;

#[async_trait]
impl<G: KanbanGateway + ?Sized> Execute<BoardContext<G>> for MarkAllNotificationsRead {
    type Output = ();

    async fn execute(&self, ctx: &BoardContext<G>) -> Result<()> {
        ctx.gateway().mark_all_notifications_read().await
    }
}
