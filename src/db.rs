use std::{str::FromStr, time::Duration};

use serde::Serialize;
use sqlx::{sqlite::{SqliteConnectOptions, SqlitePoolOptions}, SqlitePool};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{timestamp, AppError, AppResult};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Person {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Message {
    pub id: Uuid,
    pub text: String,

    // None once the referenced person is deleted
    pub sender: Option<Uuid>,
    pub receiver: Option<Uuid>,

    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

type MessageRow = (String, String, Option<String>, Option<String>, String, String);

const MESSAGE_COLUMNS: &str = "id,text,sender_id,receiver_id,created_at,updated_at";

impl TryFrom<MessageRow> for Message {
    type Error = AppError;

    fn try_from((id, text, sender, receiver, created_at, updated_at): MessageRow) -> AppResult<Self> {
        let parse_ref = |id: Option<String>| -> AppResult<Option<Uuid>> {
            Ok(match id {
                Some(id) => Some(Uuid::parse_str(&id)?),
                None => None,
            })
        };

        Ok(Message {
            id: Uuid::parse_str(&id)?,
            text,
            sender: parse_ref(sender)?,
            receiver: parse_ref(receiver)?,
            created_at: timestamp::from_storage(&created_at)?,
            updated_at: timestamp::from_storage(&updated_at)?,
        })
    }
}

/// Which side of a message a listing filters on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mailbox {
    Received,
    Sent,
}

impl Mailbox {
    fn column(self) -> &'static str {
        match self {
            Mailbox::Received => "receiver_id",
            Mailbox::Sent => "sender_id",
        }
    }
}

/// Opens the pool and brings the schema up to date.
pub async fn connect(database_url: &str, max_connections: u32) -> anyhow::Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    // an in-memory database lives only as long as its connection
    let db_pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .idle_timeout(None::<Duration>)
        .max_lifetime(None::<Duration>)
        .connect_with(options)
        .await?;

    sqlx::migrate!("./migrations").run(&db_pool).await?;

    Ok(db_pool)
}

pub async fn create_person(db_pool: &SqlitePool, name: &str) -> AppResult<Person> {
    let id = Uuid::now_v7();
    sqlx::query("INSERT INTO people (id,name) VALUES (?,?)")
        .bind(id.to_string())
        .bind(name)
        .execute(db_pool)
        .await?;

    Ok(Person { id, name: name.to_owned() })
}

pub async fn find_person(db_pool: &SqlitePool, id: Uuid) -> AppResult<Option<Person>> {
    let row: Option<(String,)> = sqlx::query_as("SELECT name FROM people WHERE id=?")
        .bind(id.to_string())
        .fetch_optional(db_pool)
        .await?;

    Ok(row.map(|(name,)| Person { id, name }))
}

/// Not reachable over HTTP. Messages of the deleted person keep existing
/// with the reference nulled out.
pub async fn delete_person(db_pool: &SqlitePool, id: Uuid) -> AppResult<bool> {
    let result = sqlx::query("DELETE FROM people WHERE id=?")
        .bind(id.to_string())
        .execute(db_pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn create_message(
    db_pool: &SqlitePool,
    text: &str,
    sender: Uuid,
    receiver: Uuid,
) -> AppResult<Message> {
    let id = Uuid::now_v7();
    let now = timestamp::now();
    let stamp = timestamp::to_storage(now)?;

    sqlx::query("INSERT INTO messages (id,text,sender_id,receiver_id,created_at,updated_at) VALUES (?,?,?,?,?,?)")
        .bind(id.to_string())
        .bind(text)
        .bind(sender.to_string())
        .bind(receiver.to_string())
        .bind(&stamp)
        .bind(&stamp)
        .execute(db_pool)
        .await?;

    Ok(Message {
        id,
        text: text.to_owned(),
        sender: Some(sender),
        receiver: Some(receiver),
        created_at: now,
        updated_at: now,
    })
}

pub async fn find_message(db_pool: &SqlitePool, id: Uuid) -> AppResult<Option<Message>> {
    let row: Option<MessageRow> =
        sqlx::query_as(&format!("SELECT {MESSAGE_COLUMNS} FROM messages WHERE id=?"))
            .bind(id.to_string())
            .fetch_optional(db_pool)
            .await?;

    row.map(Message::try_from).transpose()
}

/// Replaces the text and refreshes `updated_at`. `None` if the message is gone.
pub async fn update_message_text(db_pool: &SqlitePool, id: Uuid, text: &str) -> AppResult<Option<Message>> {
    let result = sqlx::query("UPDATE messages SET text=?, updated_at=? WHERE id=?")
        .bind(text)
        .bind(timestamp::to_storage(timestamp::now())?)
        .bind(id.to_string())
        .execute(db_pool)
        .await?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }

    find_message(db_pool, id).await
}

pub async fn delete_message(db_pool: &SqlitePool, id: Uuid) -> AppResult<bool> {
    let result = sqlx::query("DELETE FROM messages WHERE id=?")
        .bind(id.to_string())
        .execute(db_pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Messages on one side of `user`, oldest first.
pub async fn list_messages(db_pool: &SqlitePool, mailbox: Mailbox, user: Uuid) -> AppResult<Vec<Message>> {
    let rows: Vec<MessageRow> = sqlx::query_as(&format!(
        "SELECT {MESSAGE_COLUMNS} FROM messages WHERE {}=? ORDER BY created_at ASC, rowid ASC",
        mailbox.column()
    ))
    .bind(user.to_string())
    .fetch_all(db_pool)
    .await?;

    rows.into_iter().map(Message::try_from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn pool() -> SqlitePool {
        connect("sqlite::memory:", 1).await.unwrap()
    }

    #[tokio::test]
    async fn person_roundtrip() {
        let db_pool = pool().await;
        let petya = create_person(&db_pool, "Petya").await.unwrap();

        assert_eq!(find_person(&db_pool, petya.id).await.unwrap(), Some(petya));
        assert_eq!(find_person(&db_pool, Uuid::now_v7()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn message_timestamps_match_on_create() {
        let db_pool = pool().await;
        let a = create_person(&db_pool, "A").await.unwrap();
        let b = create_person(&db_pool, "B").await.unwrap();

        let created = create_message(&db_pool, "hi", a.id, b.id).await.unwrap();
        assert_eq!(created.created_at, created.updated_at);

        let stored = find_message(&db_pool, created.id).await.unwrap().unwrap();
        assert_eq!(stored, created);
    }

    #[tokio::test]
    async fn update_refreshes_updated_at_only() {
        let db_pool = pool().await;
        let a = create_person(&db_pool, "A").await.unwrap();
        let b = create_person(&db_pool, "B").await.unwrap();
        let created = create_message(&db_pool, "hi", a.id, b.id).await.unwrap();

        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        let updated = update_message_text(&db_pool, created.id, "bye").await.unwrap().unwrap();

        assert_eq!(updated.text, "bye");
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at > created.updated_at);
        assert_eq!(update_message_text(&db_pool, Uuid::now_v7(), "x").await.unwrap(), None);
    }

    #[tokio::test]
    async fn listing_is_oldest_first_per_side() {
        let db_pool = pool().await;
        let a = create_person(&db_pool, "A").await.unwrap();
        let b = create_person(&db_pool, "B").await.unwrap();

        let first = create_message(&db_pool, "1", a.id, b.id).await.unwrap();
        let reply = create_message(&db_pool, "2", b.id, a.id).await.unwrap();
        let second = create_message(&db_pool, "3", a.id, b.id).await.unwrap();

        let received = list_messages(&db_pool, Mailbox::Received, b.id).await.unwrap();
        assert_eq!(received, vec![first.clone(), second.clone()]);

        let sent = list_messages(&db_pool, Mailbox::Sent, b.id).await.unwrap();
        assert_eq!(sent, vec![reply]);

        let nobody = list_messages(&db_pool, Mailbox::Sent, Uuid::now_v7()).await.unwrap();
        assert!(nobody.is_empty());
    }

    #[tokio::test]
    async fn deleting_a_person_orphans_their_messages() {
        let db_pool = pool().await;
        let a = create_person(&db_pool, "A").await.unwrap();
        let b = create_person(&db_pool, "B").await.unwrap();
        let msg = create_message(&db_pool, "hi", a.id, b.id).await.unwrap();

        assert!(delete_person(&db_pool, a.id).await.unwrap());
        assert!(!delete_person(&db_pool, a.id).await.unwrap());

        let orphan = find_message(&db_pool, msg.id).await.unwrap().unwrap();
        assert_eq!(orphan.sender, None);
        assert_eq!(orphan.receiver, Some(b.id));
        assert_eq!(orphan.text, "hi");
    }

    #[tokio::test]
    async fn deleting_a_receiver_orphans_only_that_side() {
        let db_pool = pool().await;
        let a = create_person(&db_pool, "A").await.unwrap();
        let b = create_person(&db_pool, "B").await.unwrap();
        let msg = create_message(&db_pool, "hi", a.id, b.id).await.unwrap();

        assert!(delete_person(&db_pool, b.id).await.unwrap());

        let orphan = find_message(&db_pool, msg.id).await.unwrap().unwrap();
        assert_eq!(orphan.receiver, None);
        assert_eq!(orphan.sender, Some(a.id));
        assert_eq!(orphan.updated_at, msg.updated_at);

        let sent = list_messages(&db_pool, Mailbox::Sent, a.id).await.unwrap();
        assert_eq!(sent, vec![orphan]);
    }

    #[tokio::test]
    async fn delete_message_once() {
        let db_pool = pool().await;
        let a = create_person(&db_pool, "A").await.unwrap();
        let msg = create_message(&db_pool, "note to self", a.id, a.id).await.unwrap();

        assert!(delete_message(&db_pool, msg.id).await.unwrap());
        assert!(!delete_message(&db_pool, msg.id).await.unwrap());
        assert_eq!(find_message(&db_pool, msg.id).await.unwrap(), None);
    }
}
