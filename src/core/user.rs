//! Users and the user repository.

use crate::core::{Entity, Question, QuestionFollowRepository, QuestionLikeRepository};
use crate::core::{QuestionRepository, Reply, ReplyRepository};
use crate::db::Connection;
use crate::error::Result;
use rusqlite::{params, Row};
use serde::Serialize;
use std::fmt;

/// A forum user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    id: i64,
    pub fname: String,
    pub lname: String,
}

impl Entity for User {
    const TABLE: &'static str = "users";
    const NAME: &'static str = "User";

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            fname: row.get("fname")?,
            lname: row.get("lname")?,
        })
    }

    fn id(&self) -> i64 {
        self.id
    }
}

impl User {
    /// Primary key.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// Questions this user asked.
    pub fn authored_questions(&self, conn: &Connection) -> Result<Vec<Question>> {
        QuestionRepository::new(conn).find_by_author_id(self.id)
    }

    /// Replies this user wrote.
    pub fn authored_replies(&self, conn: &Connection) -> Result<Vec<Reply>> {
        ReplyRepository::new(conn).find_by_user_id(self.id)
    }

    /// Questions this user follows.
    pub fn followed_questions(&self, conn: &Connection) -> Result<Vec<Question>> {
        QuestionFollowRepository::new(conn).followed_questions_for_user_id(self.id)
    }

    /// Questions this user liked.
    pub fn liked_questions(&self, conn: &Connection) -> Result<Vec<Question>> {
        QuestionLikeRepository::new(conn).liked_questions_for_user_id(self.id)
    }

    /// Average number of likes per authored question.
    ///
    /// Unliked questions count as zero; a user with no questions has 0.0.
    pub fn average_karma(&self, conn: &Connection) -> Result<f64> {
        let karma: Option<Option<f64>> = conn.query_row_optional(
            "SELECT
                CAST(COUNT(question_likes.id) AS REAL) / COUNT(DISTINCT questions.id) AS karma
            FROM
                questions
            LEFT JOIN
                question_likes ON question_likes.q_id = questions.id
            WHERE
                questions.u_id = ?",
            [self.id],
            |row| row.get("karma"),
        )?;
        Ok(karma.flatten().unwrap_or(0.0))
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {} {}", self.id, self.fname, self.lname)
    }
}

/// Lookups over the `users` table.
pub struct UserRepository<'c> {
    conn: &'c Connection,
}

impl<'c> UserRepository<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }

    /// Every user.
    pub fn all(&self) -> Result<Vec<User>> {
        super::all(self.conn)
    }

    /// The user with the given id, if any.
    pub fn find_by_id(&self, id: i64) -> Result<Option<User>> {
        super::find_by_id(self.conn, id)
    }

    /// Users whose first and last name match exactly. Empty if nobody matches.
    pub fn find_by_name(&self, fname: &str, lname: &str) -> Result<Vec<User>> {
        self.conn.query(
            "SELECT * FROM users WHERE fname = ? AND lname = ?",
            params![fname, lname],
            User::from_row,
        )
    }
}
