//! Question follows: the join between users and the questions they watch.

use crate::core::{limit, Entity, Question, User};
use crate::db::Connection;
use crate::error::Result;
use rusqlite::Row;
use serde::Serialize;

/// One user following one question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionFollow {
    id: i64,
    pub q_id: i64,
    pub u_id: i64,
}

impl Entity for QuestionFollow {
    const TABLE: &'static str = "question_follows";
    const NAME: &'static str = "Follow";

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            q_id: row.get("q_id")?,
            u_id: row.get("u_id")?,
        })
    }

    fn id(&self) -> i64 {
        self.id
    }
}

impl QuestionFollow {
    pub fn id(&self) -> i64 {
        self.id
    }
}

/// Lookups over the `question_follows` table.
pub struct QuestionFollowRepository<'c> {
    conn: &'c Connection,
}

impl<'c> QuestionFollowRepository<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }

    pub fn all(&self) -> Result<Vec<QuestionFollow>> {
        super::all(self.conn)
    }

    pub fn find_by_id(&self, id: i64) -> Result<Option<QuestionFollow>> {
        super::find_by_id(self.conn, id)
    }

    pub fn find_by_question_id(&self, q_id: i64) -> Result<Vec<QuestionFollow>> {
        super::find_by_column(self.conn, "q_id", q_id)
    }

    pub fn find_by_user_id(&self, u_id: i64) -> Result<Vec<QuestionFollow>> {
        super::find_by_column(self.conn, "u_id", u_id)
    }

    /// Users following the given question.
    pub fn followers_for_question_id(&self, q_id: i64) -> Result<Vec<User>> {
        self.conn.query(
            "SELECT
                users.*
            FROM
                question_follows
            JOIN
                users ON question_follows.u_id = users.id
            WHERE
                question_follows.q_id = ?",
            [q_id],
            User::from_row,
        )
    }

    /// Questions the given user follows.
    pub fn followed_questions_for_user_id(&self, u_id: i64) -> Result<Vec<Question>> {
        self.conn.query(
            "SELECT
                questions.*
            FROM
                question_follows
            JOIN
                questions ON question_follows.q_id = questions.id
            WHERE
                question_follows.u_id = ?",
            [u_id],
            Question::from_row,
        )
    }

    /// The `n` questions with the most followers, busiest first.
    ///
    /// Ties go to the newer question (higher id). Questions nobody follows
    /// are never returned.
    pub fn most_followed_questions(&self, n: usize) -> Result<Vec<Question>> {
        self.conn.query(
            "SELECT
                questions.*
            FROM
                question_follows
            JOIN
                questions ON questions.id = question_follows.q_id
            GROUP BY
                questions.id
            ORDER BY
                COUNT(question_follows.id) DESC, questions.id DESC
            LIMIT
                ?",
            [limit(n)],
            Question::from_row,
        )
    }
}
