//! Replies and the reply repository.
//!
//! Replies form threads through `parent_id`. Traversal moves one hop at a
//! time: `parent_reply` goes up, `child_replies` goes down.

use crate::core::{Entity, Question, QuestionRepository, User, UserRepository};
use crate::db::Connection;
use crate::error::Result;
use rusqlite::Row;
use serde::Serialize;
use std::fmt;

/// A reply to a question, optionally nested under another reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reply {
    id: i64,
    pub body: String,
    pub q_id: i64,
    pub u_id: i64,
    pub parent_id: Option<i64>,
}

impl Entity for Reply {
    const TABLE: &'static str = "replies";
    const NAME: &'static str = "Reply";

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            body: row.get("body")?,
            q_id: row.get("q_id")?,
            u_id: row.get("u_id")?,
            parent_id: row.get("parent_id")?,
        })
    }

    fn id(&self) -> i64 {
        self.id
    }
}

impl Reply {
    /// Primary key.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// Whether this reply starts a thread.
    pub fn is_top_level(&self) -> bool {
        self.parent_id.is_none()
    }

    pub fn author(&self, conn: &Connection) -> Result<Option<User>> {
        UserRepository::new(conn).find_by_id(self.u_id)
    }

    pub fn question(&self, conn: &Connection) -> Result<Option<Question>> {
        QuestionRepository::new(conn).find_by_id(self.q_id)
    }

    /// The reply this one answers. `None` for top-level replies.
    pub fn parent_reply(&self, conn: &Connection) -> Result<Option<Reply>> {
        match self.parent_id {
            Some(parent_id) => ReplyRepository::new(conn).find_by_id(parent_id),
            None => Ok(None),
        }
    }

    /// Direct replies to this one.
    pub fn child_replies(&self, conn: &Connection) -> Result<Vec<Reply>> {
        ReplyRepository::new(conn).find_by_parent_id(self.id)
    }
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {}", self.id, self.body)
    }
}

/// Lookups over the `replies` table.
pub struct ReplyRepository<'c> {
    conn: &'c Connection,
}

impl<'c> ReplyRepository<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }

    pub fn all(&self) -> Result<Vec<Reply>> {
        super::all(self.conn)
    }

    pub fn find_by_id(&self, id: i64) -> Result<Option<Reply>> {
        super::find_by_id(self.conn, id)
    }

    /// Replies written by the given user.
    pub fn find_by_user_id(&self, u_id: i64) -> Result<Vec<Reply>> {
        super::find_by_column(self.conn, "u_id", u_id)
    }

    /// Every reply on the given question, at any depth.
    pub fn find_by_question_id(&self, q_id: i64) -> Result<Vec<Reply>> {
        super::find_by_column(self.conn, "q_id", q_id)
    }

    /// Direct children of the given reply.
    pub fn find_by_parent_id(&self, parent_id: i64) -> Result<Vec<Reply>> {
        super::find_by_column(self.conn, "parent_id", parent_id)
    }

    /// Replies on the given question that start a thread.
    pub fn top_level_for_question_id(&self, q_id: i64) -> Result<Vec<Reply>> {
        self.conn.query(
            "SELECT * FROM replies WHERE q_id = ? AND parent_id IS NULL",
            [q_id],
            Reply::from_row,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::sorted_ids as ids;
    use crate::db::schema::seeded;

    #[test]
    fn test_find_by_id() {
        let conn = seeded();
        let reply = ReplyRepository::new(&conn).find_by_id(2).unwrap().unwrap();
        assert_eq!(reply.id(), 2);
        assert_eq!(reply.q_id, 1);
        assert_eq!(reply.u_id, 3);
        assert_eq!(reply.parent_id, Some(1));
        assert!(!reply.is_top_level());
    }

    #[test]
    fn test_foreign_key_finders() {
        let conn = seeded();
        let repo = ReplyRepository::new(&conn);

        assert_eq!(ids(&repo.find_by_user_id(1).unwrap()), vec![3, 4]);
        assert_eq!(ids(&repo.find_by_question_id(1).unwrap()), vec![1, 2, 3]);
        assert!(repo.find_by_question_id(3).unwrap().is_empty());
        assert_eq!(ids(&repo.top_level_for_question_id(1).unwrap()), vec![1]);
    }

    #[test]
    fn test_parent_and_children() {
        let conn = seeded();
        let repo = ReplyRepository::new(&conn);

        let child = repo.find_by_id(3).unwrap().unwrap();
        let parent = child.parent_reply(&conn).unwrap().unwrap();
        assert_eq!(Some(parent.id()), child.parent_id);
        assert!(parent.is_top_level());

        let children = parent.child_replies(&conn).unwrap();
        assert_eq!(ids(&children), vec![2, 3]);
        assert!(children.iter().all(|r| r.child_replies(&conn).unwrap().is_empty()));
    }

    #[test]
    fn test_top_level_has_no_parent() {
        let conn = seeded();
        let root = ReplyRepository::new(&conn).find_by_id(4).unwrap().unwrap();
        assert!(root.parent_reply(&conn).unwrap().is_none());
    }

    #[test]
    fn test_author_and_question() {
        let conn = seeded();
        let reply = ReplyRepository::new(&conn).find_by_id(1).unwrap().unwrap();

        assert_eq!(reply.author(&conn).unwrap().unwrap().fname, "Alan");
        assert_eq!(reply.question(&conn).unwrap().unwrap().title, "Analytical Engine");
    }
}
