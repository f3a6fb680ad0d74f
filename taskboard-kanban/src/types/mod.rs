//! Core types for the kanban board

mod board;
mod card;
mod comment;
mod ids;
mod member;
mod notification;
mod position;

// Re-export all types
pub use board::{Board, Column, Stage};
pub use card::{Assignee, Card, CardPatch, Priority, Subtask};
pub use comment::{Comment, CommentAuthor};
pub use ids::{BoardId, CardId, ColumnId, CommentId, NotificationId, UserId};
pub use member::{BoardMember, MemberRole};
pub use notification::{unread_badge, Notification, NotificationKind};
pub use position::{NonFinitePosition, Position};
