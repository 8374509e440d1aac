//! In-memory store implementation.
//!
//! Implements every store trait against plain collections behind
//! `tokio::sync::RwLock`. Used by the test suite and by standalone
//! development runs that have no PostgreSQL at hand.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use argus_core::error::AppError;
use argus_core::result::AppResult;
use argus_entity::command::{CommandStatus, NewCommand, PendingCommand};
use argus_entity::presence::{PresenceHistoryEntry, PresenceRecord, PresenceStatus, UserPresence};
use argus_entity::session::StreamingSession;
use argus_entity::user::User;

use crate::stores::{CommandStore, PresenceStore, SessionStore, UserDirectory};

/// A single in-memory backing store for all entities.
///
/// One struct implements every store trait because the listing queries
/// join across tables; keeping the collections together mirrors what
/// the SQL joins see.
#[derive(Debug, Default)]
pub struct MemoryStore {
    users: RwLock<Vec<User>>,
    presence: RwLock<HashMap<Uuid, PresenceRecord>>,
    history: RwLock<Vec<PresenceHistoryEntry>>,
    sessions: RwLock<Vec<StreamingSession>>,
    commands: RwLock<Vec<PendingCommand>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a user to the directory.
    pub async fn add_user(&self, user: User) {
        self.users.write().await.push(user);
    }
}

#[async_trait]
impl UserDirectory for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users
            .iter()
            .find(|u| u.id == id && u.deleted_at.is_none())
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email) && u.deleted_at.is_none())
            .cloned())
    }

    async fn find_by_external_id(&self, external_id: &str) -> AppResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users
            .iter()
            .find(|u| u.external_id.as_deref() == Some(external_id) && u.deleted_at.is_none())
            .cloned())
    }

    async fn list_active_with_presence(&self) -> AppResult<Vec<UserPresence>> {
        let users = self.users.read().await;
        let presence = self.presence.read().await;
        let mut rows: Vec<UserPresence> = users
            .iter()
            .filter(|u| u.deleted_at.is_none())
            .map(|u| {
                let record = presence.get(&u.id);
                UserPresence {
                    user_id: u.id,
                    email: u.email.clone(),
                    external_id: u.external_id.clone(),
                    display_name: u.display_name.clone(),
                    status: record.map(|r| r.status),
                    last_seen_at: record.map(|r| r.last_seen_at),
                }
            })
            .collect();
        rows.sort_by(|a, b| a.email.cmp(&b.email));
        Ok(rows)
    }
}

#[async_trait]
impl PresenceStore for MemoryStore {
    async fn find(&self, user_id: Uuid) -> AppResult<Option<PresenceRecord>> {
        Ok(self.presence.read().await.get(&user_id).cloned())
    }

    async fn upsert(
        &self,
        user_id: Uuid,
        status: PresenceStatus,
        seen_at: DateTime<Utc>,
    ) -> AppResult<PresenceRecord> {
        let record = PresenceRecord {
            user_id,
            status,
            last_seen_at: seen_at,
            updated_at: seen_at,
        };
        self.presence.write().await.insert(user_id, record.clone());
        Ok(record)
    }

    async fn touch(&self, user_id: Uuid, seen_at: DateTime<Utc>) -> AppResult<()> {
        let mut presence = self.presence.write().await;
        if let Some(record) = presence.get_mut(&user_id) {
            if record.status == PresenceStatus::Online {
                record.last_seen_at = seen_at;
                record.updated_at = seen_at;
            }
        }
        Ok(())
    }

    async fn append_history(
        &self,
        user_id: Uuid,
        status: PresenceStatus,
        changed_at: DateTime<Utc>,
    ) -> AppResult<()> {
        self.history.write().await.push(PresenceHistoryEntry {
            id: Uuid::new_v4(),
            user_id,
            status,
            changed_at,
        });
        Ok(())
    }

    async fn history_for(
        &self,
        user_id: Uuid,
        limit: i64,
    ) -> AppResult<Vec<PresenceHistoryEntry>> {
        let history = self.history.read().await;
        let mut entries: Vec<PresenceHistoryEntry> = history
            .iter()
            .filter(|e| e.user_id == user_id)
            .cloned()
            .collect();
        entries.sort_by(|a, b| b.changed_at.cmp(&a.changed_at));
        entries.truncate(limit.max(0) as usize);
        Ok(entries)
    }
}

#[async_trait]
impl SessionStore for MemoryStore {
    async fn insert(
        &self,
        user_id: Uuid,
        started_at: DateTime<Utc>,
    ) -> AppResult<StreamingSession> {
        let session = StreamingSession {
            id: Uuid::new_v4(),
            user_id,
            started_at,
            stopped_at: None,
            stop_reason: None,
        };
        self.sessions.write().await.push(session.clone());
        Ok(session)
    }

    async fn close_open(
        &self,
        user_id: Uuid,
        reason: &str,
        stopped_at: DateTime<Utc>,
    ) -> AppResult<Vec<StreamingSession>> {
        let mut sessions = self.sessions.write().await;
        let mut closed = Vec::new();
        for session in sessions.iter_mut() {
            if session.user_id == user_id && session.stopped_at.is_none() {
                session.stopped_at = Some(stopped_at);
                session.stop_reason = Some(reason.to_string());
                closed.push(session.clone());
            }
        }
        Ok(closed)
    }

    async fn find_open(&self, user_id: Uuid) -> AppResult<Option<StreamingSession>> {
        let sessions = self.sessions.read().await;
        Ok(sessions
            .iter()
            .filter(|s| s.user_id == user_id && s.stopped_at.is_none())
            .max_by_key(|s| s.started_at)
            .cloned())
    }

    async fn find_latest(&self, user_id: Uuid) -> AppResult<Option<StreamingSession>> {
        let sessions = self.sessions.read().await;
        Ok(sessions
            .iter()
            .filter(|s| s.user_id == user_id)
            .max_by_key(|s| s.started_at)
            .cloned())
    }

    async fn list_open(&self) -> AppResult<Vec<StreamingSession>> {
        let sessions = self.sessions.read().await;
        let mut open: Vec<StreamingSession> = sessions
            .iter()
            .filter(|s| s.stopped_at.is_none())
            .cloned()
            .collect();
        open.sort_by(|a, b| b.started_at.cmp(&a.started_at));
        Ok(open)
    }

    async fn list_open_supervised_by(
        &self,
        supervisor_id: Uuid,
    ) -> AppResult<Vec<StreamingSession>> {
        let users = self.users.read().await;
        let sessions = self.sessions.read().await;
        let mut open: Vec<StreamingSession> = sessions
            .iter()
            .filter(|s| {
                s.stopped_at.is_none()
                    && users.iter().any(|u| {
                        u.id == s.user_id
                            && u.supervisor_id == Some(supervisor_id)
                            && u.deleted_at.is_none()
                    })
            })
            .cloned()
            .collect();
        open.sort_by(|a, b| b.started_at.cmp(&a.started_at));
        Ok(open)
    }
}

#[async_trait]
impl CommandStore for MemoryStore {
    async fn insert(&self, command: NewCommand) -> AppResult<PendingCommand> {
        let row = PendingCommand {
            id: Uuid::new_v4(),
            command: command.command,
            status: CommandStatus::Pending,
            target_user_id: command.target_user_id,
            initiated_by: command.initiated_by,
            reason: command.reason,
            created_at: Utc::now(),
            published_at: None,
            acknowledged_at: None,
        };
        self.commands.write().await.push(row.clone());
        Ok(row)
    }

    async fn mark_published(&self, id: Uuid, published_at: DateTime<Utc>) -> AppResult<()> {
        let mut commands = self.commands.write().await;
        let command = commands
            .iter_mut()
            .find(|c| c.id == id && c.status == CommandStatus::Pending)
            .ok_or_else(|| AppError::not_found(format!("No pending command with id {id}")))?;
        command.status = CommandStatus::Published;
        command.published_at = Some(published_at);
        Ok(())
    }

    async fn mark_published_many(
        &self,
        ids: &[Uuid],
        published_at: DateTime<Utc>,
    ) -> AppResult<()> {
        let mut commands = self.commands.write().await;
        for command in commands.iter_mut() {
            if ids.contains(&command.id) && command.status == CommandStatus::Pending {
                command.status = CommandStatus::Published;
                command.published_at = Some(published_at);
            }
        }
        Ok(())
    }

    async fn acknowledge(
        &self,
        id: Uuid,
        target_user_id: Uuid,
        acknowledged_at: DateTime<Utc>,
    ) -> AppResult<Option<PendingCommand>> {
        let mut commands = self.commands.write().await;
        let Some(command) = commands
            .iter_mut()
            .find(|c| c.id == id && c.target_user_id == target_user_id)
        else {
            return Ok(None);
        };
        command.status = CommandStatus::Acknowledged;
        command.acknowledged_at = Some(command.acknowledged_at.unwrap_or(acknowledged_at));
        Ok(Some(command.clone()))
    }

    async fn list_outstanding_for(&self, user_id: Uuid) -> AppResult<Vec<PendingCommand>> {
        let commands = self.commands.read().await;
        let mut rows: Vec<PendingCommand> = commands
            .iter()
            .filter(|c| c.target_user_id == user_id && c.status != CommandStatus::Acknowledged)
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(rows)
    }

    async fn list_recent_for(&self, user_id: Uuid, limit: i64) -> AppResult<Vec<PendingCommand>> {
        let commands = self.commands.read().await;
        let mut rows: Vec<PendingCommand> = commands
            .iter()
            .filter(|c| c.target_user_id == user_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        rows.truncate(limit.max(0) as usize);
        Ok(rows)
    }
}
