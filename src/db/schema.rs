//! Forum schema.
//!
//! Table and column names are the external contract for interoperating with
//! existing `questions.db` files.

use crate::db::Connection;
use crate::error::{Error, Result};

/// Schema creation and verification.
pub struct Schema;

impl Schema {
    /// Every table the data layer reads from.
    pub const TABLES: [&'static str; 5] = [
        "users",
        "questions",
        "replies",
        "question_follows",
        "question_likes",
    ];

    /// Create the forum tables if they are missing.
    ///
    /// Used to build fresh stores for tests and demos; there is no migration
    /// support for existing files.
    pub fn init(conn: &Connection) -> Result<()> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY,
                fname TEXT NOT NULL,
                lname TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS questions (
                id INTEGER PRIMARY KEY,
                title TEXT NOT NULL,
                body TEXT NOT NULL,
                u_id INTEGER NOT NULL,
                FOREIGN KEY (u_id) REFERENCES users(id)
            );

            CREATE TABLE IF NOT EXISTS replies (
                id INTEGER PRIMARY KEY,
                body TEXT NOT NULL,
                q_id INTEGER NOT NULL,
                u_id INTEGER NOT NULL,
                parent_id INTEGER,
                FOREIGN KEY (q_id) REFERENCES questions(id),
                FOREIGN KEY (u_id) REFERENCES users(id),
                FOREIGN KEY (parent_id) REFERENCES replies(id)
            );

            CREATE TABLE IF NOT EXISTS question_follows (
                id INTEGER PRIMARY KEY,
                q_id INTEGER NOT NULL,
                u_id INTEGER NOT NULL,
                FOREIGN KEY (q_id) REFERENCES questions(id),
                FOREIGN KEY (u_id) REFERENCES users(id)
            );

            CREATE TABLE IF NOT EXISTS question_likes (
                id INTEGER PRIMARY KEY,
                q_id INTEGER NOT NULL,
                u_id INTEGER NOT NULL,
                FOREIGN KEY (q_id) REFERENCES questions(id),
                FOREIGN KEY (u_id) REFERENCES users(id)
            );

            CREATE INDEX IF NOT EXISTS idx_questions_u_id ON questions(u_id);
            CREATE INDEX IF NOT EXISTS idx_replies_q_id ON replies(q_id);
            CREATE INDEX IF NOT EXISTS idx_replies_parent_id ON replies(parent_id);
            CREATE INDEX IF NOT EXISTS idx_question_follows_q_id ON question_follows(q_id);
            CREATE INDEX IF NOT EXISTS idx_question_likes_q_id ON question_likes(q_id);",
        )?;
        Ok(())
    }

    /// Check that every forum table is present.
    pub fn verify(conn: &Connection) -> Result<()> {
        for table in Self::TABLES {
            if !conn.table_exists(table)? {
                return Err(Error::MissingTable(table.to_string()));
            }
        }
        Ok(())
    }
}

/// Shared seed data for unit tests.
///
/// Users: 1 Ada Lovelace, 2 Alan Turing, 3 Grace Hopper, 4 Edsger Dijkstra.
/// Questions 1 and 3 are Ada's, question 2 is Alan's.
/// Replies on question 1 form a thread rooted at reply 1 (children 2 and 3).
/// Follows: q1 by {2, 3}, q2 by {1, 3, 4}, q3 by {4}.
/// Likes: q1 by {2, 3, 4}, q2 by {1}, q3 by nobody.
#[cfg(test)]
pub(crate) fn seeded() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    Schema::init(&conn).unwrap();
    conn.as_conn()
        .execute_batch(
            "INSERT INTO users (id, fname, lname) VALUES
                (1, 'Ada', 'Lovelace'),
                (2, 'Alan', 'Turing'),
                (3, 'Grace', 'Hopper'),
                (4, 'Edsger', 'Dijkstra');

             INSERT INTO questions (id, title, body, u_id) VALUES
                (1, 'Analytical Engine', 'Can it compose music?', 1),
                (2, 'Halting', 'Does every program halt?', 2),
                (3, 'Notes', 'Who reads note G?', 1);

             INSERT INTO replies (id, body, q_id, u_id, parent_id) VALUES
                (1, 'Given the right operations, yes.', 1, 2, NULL),
                (2, 'Only if someone programs it.', 1, 3, 1),
                (3, 'That is my claim.', 1, 1, 1),
                (4, 'No, and you cannot decide it.', 2, 1, NULL);

             INSERT INTO question_follows (id, q_id, u_id) VALUES
                (1, 1, 2), (2, 1, 3),
                (3, 2, 1), (4, 2, 3), (5, 2, 4),
                (6, 3, 4);

             INSERT INTO question_likes (id, q_id, u_id) VALUES
                (1, 1, 2), (2, 1, 3), (3, 1, 4),
                (4, 2, 1);",
        )
        .unwrap();
    conn
}
