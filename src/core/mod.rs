//! Forum entities and their repositories.

pub mod question;
pub mod question_follow;
pub mod question_like;
pub mod reply;
pub mod user;

pub use question::{Question, QuestionRepository};
pub use question_follow::{QuestionFollow, QuestionFollowRepository};
pub use question_like::{QuestionLike, QuestionLikeRepository};
pub use reply::{Reply, ReplyRepository};
pub use user::{User, UserRepository};

use crate::db::Connection;
use crate::error::Result;
use rusqlite::Row;

/// A type backed by one row of one forum table.
pub trait Entity: Sized {
    /// Table the entity is stored in.
    const TABLE: &'static str;

    /// Human-readable entity name used in messages.
    const NAME: &'static str;

    /// Decode an entity from a row, reading columns by name.
    ///
    /// A missing column or an unexpected storage class is an error.
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self>;

    /// Primary key.
    fn id(&self) -> i64;
}

/// `SELECT * FROM <table>`.
pub(crate) fn all<T: Entity>(conn: &Connection) -> Result<Vec<T>> {
    conn.query(&format!("SELECT * FROM {}", T::TABLE), [], T::from_row)
}

/// `SELECT * FROM <table> WHERE id = ?`.
pub(crate) fn find_by_id<T: Entity>(conn: &Connection, id: i64) -> Result<Option<T>> {
    conn.query_row_optional(
        &format!("SELECT * FROM {} WHERE id = ?", T::TABLE),
        [id],
        T::from_row,
    )
}

/// `SELECT * FROM <table> WHERE <column> = ?`.
///
/// `column` is always a compile-time constant, never caller input.
pub(crate) fn find_by_column<T: Entity>(
    conn: &Connection,
    column: &'static str,
    value: i64,
) -> Result<Vec<T>> {
    conn.query(
        &format!("SELECT * FROM {} WHERE {} = ?", T::TABLE, column),
        [value],
        T::from_row,
    )
}

/// SQL `LIMIT` value for `n` rows. Saturates instead of wrapping, since a
/// negative limit means "no limit" to SQLite.
pub(crate) fn limit(n: usize) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}

/// Ids of `items` in ascending order.
#[cfg(test)]
pub(crate) fn sorted_ids<T: Entity>(items: &[T]) -> Vec<i64> {
    let mut ids: Vec<i64> = items.iter().map(Entity::id).collect();
    ids.sort_unstable();
    ids
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::schema::seeded;
    use crate::error::Error;

    #[test]
    fn test_limit_saturates() {
        assert_eq!(limit(0), 0);
        assert_eq!(limit(3), 3);
        assert_eq!(limit(usize::MAX), i64::MAX);
    }

    #[test]
    fn test_all_matches_row_count() {
        let conn = seeded();
        assert_eq!(all::<User>(&conn).unwrap().len(), 4);
        assert_eq!(all::<Question>(&conn).unwrap().len(), 3);
        assert_eq!(all::<Reply>(&conn).unwrap().len(), 4);
        assert_eq!(all::<QuestionFollow>(&conn).unwrap().len(), 6);
        assert_eq!(all::<QuestionLike>(&conn).unwrap().len(), 4);
    }

    #[test]
    fn test_find_by_id_returns_queried_id() {
        let conn = seeded();
        for id in 1..=4 {
            let reply: Reply = find_by_id(&conn, id).unwrap().unwrap();
            assert_eq!(reply.id(), id);
        }
    }

    #[test]
    fn test_schema_mismatch_fails_loudly() {
        let conn = Connection::open_in_memory().unwrap();
        conn.as_conn()
            .execute_batch(
                "CREATE TABLE users (id INTEGER PRIMARY KEY, first_name TEXT, lname TEXT);
                 INSERT INTO users (id, first_name, lname) VALUES (1, 'Ada', 'Lovelace');",
            )
            .unwrap();

        let result = find_by_id::<User>(&conn, 1);
        assert!(matches!(result, Err(Error::Db(_))));
    }

    #[test]
    fn test_wrong_storage_class_fails_loudly() {
        let conn = Connection::open_in_memory().unwrap();
        conn.as_conn()
            .execute_batch(
                "CREATE TABLE question_likes (id INTEGER PRIMARY KEY, q_id, u_id);
                 INSERT INTO question_likes (id, q_id, u_id) VALUES (1, 'one', 2);",
            )
            .unwrap();

        assert!(all::<QuestionLike>(&conn).is_err());
    }
}
