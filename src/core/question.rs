//! Questions and the question repository.

use crate::core::{Entity, QuestionFollowRepository, QuestionLikeRepository, Reply, ReplyRepository};
use crate::core::{User, UserRepository};
use crate::db::Connection;
use crate::error::Result;
use rusqlite::Row;
use serde::Serialize;
use std::fmt;

/// A question asked on the forum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    id: i64,
    pub title: String,
    pub body: String,
    pub u_id: i64,
}

impl Entity for Question {
    const TABLE: &'static str = "questions";
    const NAME: &'static str = "Question";

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            title: row.get("title")?,
            body: row.get("body")?,
            u_id: row.get("u_id")?,
        })
    }

    fn id(&self) -> i64 {
        self.id
    }
}

impl Question {
    /// Primary key.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// The user who asked this question. `None` if `u_id` dangles.
    pub fn author(&self, conn: &Connection) -> Result<Option<User>> {
        UserRepository::new(conn).find_by_id(self.u_id)
    }

    pub fn replies(&self, conn: &Connection) -> Result<Vec<Reply>> {
        ReplyRepository::new(conn).find_by_question_id(self.id)
    }

    pub fn followers(&self, conn: &Connection) -> Result<Vec<User>> {
        QuestionFollowRepository::new(conn).followers_for_question_id(self.id)
    }

    pub fn likers(&self, conn: &Connection) -> Result<Vec<User>> {
        QuestionLikeRepository::new(conn).likers_for_question_id(self.id)
    }

    pub fn num_likes(&self, conn: &Connection) -> Result<u64> {
        QuestionLikeRepository::new(conn).num_likes_for_question_id(self.id)
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {}", self.id, self.title)
    }
}

/// Lookups over the `questions` table.
pub struct QuestionRepository<'c> {
    conn: &'c Connection,
}

impl<'c> QuestionRepository<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }

    /// Every question.
    pub fn all(&self) -> Result<Vec<Question>> {
        super::all(self.conn)
    }

    /// The question with the given id, if any.
    pub fn find_by_id(&self, id: i64) -> Result<Option<Question>> {
        super::find_by_id(self.conn, id)
    }

    /// Questions asked by the given user.
    pub fn find_by_author_id(&self, u_id: i64) -> Result<Vec<Question>> {
        super::find_by_column(self.conn, "u_id", u_id)
    }

    /// The `n` questions with the most followers.
    pub fn most_followed(&self, n: usize) -> Result<Vec<Question>> {
        QuestionFollowRepository::new(self.conn).most_followed_questions(n)
    }

    /// The `n` questions with the most likes.
    pub fn most_liked(&self, n: usize) -> Result<Vec<Question>> {
        QuestionLikeRepository::new(self.conn).most_liked_questions(n)
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
        let question = QuestionRepository::new(&conn).find_by_id(2).unwrap().unwrap();
        assert_eq!(question.id(), 2);
        assert_eq!(question.title, "Halting");
        assert_eq!(question.u_id, 2);
    }

    #[test]
    fn test_find_by_id_missing() {
        let conn = seeded();
        assert!(QuestionRepository::new(&conn).find_by_id(0).unwrap().is_none());
    }

    #[test]
    fn test_find_by_author_id() {
        let conn = seeded();
        let repo = QuestionRepository::new(&conn);
        assert_eq!(ids(&repo.find_by_author_id(1).unwrap()), vec![1, 3]);
        assert!(repo.find_by_author_id(4).unwrap().is_empty());
    }

    #[test]
    fn test_author_round_trip() {
        let conn = seeded();
        let question = QuestionRepository::new(&conn).find_by_id(1).unwrap().unwrap();

        let author = question.author(&conn).unwrap().unwrap();
        assert_eq!(author.id(), question.u_id);
        assert!(ids(&author.authored_questions(&conn).unwrap()).contains(&question.id()));
    }

    #[test]
    fn test_author_dangling() {
        let conn = seeded();
        conn.as_conn()
            .execute_batch(
                "PRAGMA foreign_keys = OFF;
                 INSERT INTO questions (id, title, body, u_id) VALUES (9, 'Orphan', '?', 42);",
            )
            .unwrap();

        let orphan = QuestionRepository::new(&conn).find_by_id(9).unwrap().unwrap();
        assert!(orphan.author(&conn).unwrap().is_none());
    }

    #[test]
    fn test_replies_followers_likers() {
        let conn = seeded();
        let question = QuestionRepository::new(&conn).find_by_id(1).unwrap().unwrap();

        assert_eq!(ids(&question.replies(&conn).unwrap()), vec![1, 2, 3]);
        assert_eq!(ids(&question.followers(&conn).unwrap()), vec![2, 3]);
        assert_eq!(ids(&question.likers(&conn).unwrap()), vec![2, 3, 4]);
        assert_eq!(question.num_likes(&conn).unwrap(), 3);
    }

    #[test]
    fn test_unfollowed_unliked_question() {
        let conn = seeded();
        let question = QuestionRepository::new(&conn).find_by_id(3).unwrap().unwrap();

        assert!(question.replies(&conn).unwrap().is_empty());
        assert!(question.likers(&conn).unwrap().is_empty());
        assert_eq!(question.num_likes(&conn).unwrap(), 0);
    }

    #[test]
    fn test_most_followed_and_most_liked() {
        let conn = seeded();
        let repo = QuestionRepository::new(&conn);

        let followed: Vec<i64> = repo.most_followed(2).unwrap().iter().map(|q| q.id()).collect();
        assert_eq!(followed, vec![2, 1]);

        let liked: Vec<i64> = repo.most_liked(5).unwrap().iter().map(|q| q.id()).collect();
        assert_eq!(liked, vec![1, 2]);
    }
}
