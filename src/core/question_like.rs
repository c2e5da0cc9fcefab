//! Question likes: the join between users and the questions they liked.

use crate::core::{limit, Entity, Question, User};
use crate::db::Connection;
use crate::error::Result;
use rusqlite::Row;
use serde::Serialize;

/// One user liking one question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionLike {
    id: i64,
    pub q_id: i64,
    pub u_id: i64,
}

impl Entity for QuestionLike {
    const TABLE: &'static str = "question_likes";
    const NAME: &'static str = "Like";

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

impl QuestionLike {
    pub fn id(&self) -> i64 {
        self.id
    }
}

/// Lookups over the `question_likes` table.
pub struct QuestionLikeRepository<'c> {
    conn: &'c Connection,
}

impl<'c> QuestionLikeRepository<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }

    pub fn all(&self) -> Result<Vec<QuestionLike>> {
        super::all(self.conn)
    }

    pub fn find_by_id(&self, id: i64) -> Result<Option<QuestionLike>> {
        super::find_by_id(self.conn, id)
    }

    pub fn find_by_question_id(&self, q_id: i64) -> Result<Vec<QuestionLike>> {
        super::find_by_column(self.conn, "q_id", q_id)
    }

    pub fn find_by_user_id(&self, u_id: i64) -> Result<Vec<QuestionLike>> {
        super::find_by_column(self.conn, "u_id", u_id)
    }

    /// Users who liked the given question.
    pub fn likers_for_question_id(&self, q_id: i64) -> Result<Vec<User>> {
        self.conn.query(
            "SELECT
                users.*
            FROM
                question_likes
            JOIN
                users ON users.id = question_likes.u_id
            WHERE
                question_likes.q_id = ?",
            [q_id],
            User::from_row,
        )
    }

    /// Number of likes on the given question. Zero if it has none or does not exist.
    pub fn num_likes_for_question_id(&self, q_id: i64) -> Result<u64> {
        let count: Option<u64> = self.conn.query_row_optional(
            "SELECT COUNT(*) AS likes FROM question_likes WHERE q_id = ?",
            [q_id],
            |row| {
                let likes: i64 = row.get("likes")?;
                u64::try_from(likes).map_err(|_| rusqlite::Error::IntegralValueOutOfRange(0, likes))
            },
        )?;
        Ok(count.unwrap_or(0))
    }

    /// Questions the given user liked.
    pub fn liked_questions_for_user_id(&self, u_id: i64) -> Result<Vec<Question>> {
        self.conn.query(
            "SELECT
                questions.*
            FROM
                question_likes
            JOIN
                questions ON questions.id = question_likes.q_id
            WHERE
                question_likes.u_id = ?",
            [u_id],
            Question::from_row,
        )
    }

    /// The `n` questions with the most likes, most liked first.
    ///
    /// Ties go to the higher question id. Unliked questions are never returned.
    pub fn most_liked_questions(&self, n: usize) -> Result<Vec<Question>> {
        self.conn.query(
            "SELECT
                questions.*
            FROM
                question_likes
            JOIN
                questions ON questions.id = question_likes.q_id
            GROUP BY
                questions.id
            ORDER BY
                COUNT(question_likes.id) DESC, questions.id DESC
            LIMIT
                ?",
            [limit(n)],
            Question::from_row,
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
        let repo = QuestionLikeRepository::new(&conn);

        let like = repo.find_by_id(4).unwrap().unwrap();
        assert_eq!(like.id(), 4);
        assert_eq!((like.q_id, like.u_id), (2, 1));
        assert!(repo.find_by_id(5).unwrap().is_none());
    }

    #[test]
    fn test_join_row_finders() {
        let conn = seeded();
        let repo = QuestionLikeRepository::new(&conn);

        assert_eq!(ids(&repo.find_by_question_id(1).unwrap()), vec![1, 2, 3]);
        assert_eq!(ids(&repo.find_by_user_id(1).unwrap()), vec![4]);
    }

    #[test]
    fn test_likers_for_question_id() {
        let conn = seeded();
        let repo = QuestionLikeRepository::new(&conn);

        assert_eq!(ids(&repo.likers_for_question_id(1).unwrap()), vec![2, 3, 4]);
        assert!(repo.likers_for_question_id(3).unwrap().is_empty());
    }

    #[test]
    fn test_num_likes_is_numeric() {
        let conn = seeded();
        let repo = QuestionLikeRepository::new(&conn);

        assert_eq!(repo.num_likes_for_question_id(1).unwrap(), 3);
        assert_eq!(repo.num_likes_for_question_id(2).unwrap(), 1);
        assert_eq!(repo.num_likes_for_question_id(3).unwrap(), 0);
        assert_eq!(repo.num_likes_for_question_id(99).unwrap(), 0);
    }

    #[test]
    fn test_liked_questions_returns_every_like() {
        let conn = seeded();
        conn.as_conn()
            .execute("INSERT INTO question_likes (q_id, u_id) VALUES (3, 2)", [])
            .unwrap();

        let liked = QuestionLikeRepository::new(&conn)
            .liked_questions_for_user_id(2)
            .unwrap();
        assert_eq!(ids(&liked), vec![1, 3]);
    }

    #[test]
    fn test_most_liked_questions() {
        let conn = seeded();
        let repo = QuestionLikeRepository::new(&conn);

        let top: Vec<i64> = repo
            .most_liked_questions(10)
            .unwrap()
            .iter()
            .map(|q| q.id())
            .collect();
        assert_eq!(top, vec![1, 2]);
        assert_eq!(repo.most_liked_questions(1).unwrap().len(), 1);
        assert!(repo.most_liked_questions(0).unwrap().is_empty());
    }

    #[test]
    fn test_most_liked_huge_limit_returns_everything() {
        let conn = seeded();
        let top = QuestionLikeRepository::new(&conn)
            .most_liked_questions(usize::MAX)
            .unwrap();
        assert_eq!(top.len(), 2);
    }
}
