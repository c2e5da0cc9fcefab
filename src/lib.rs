//! # questions - Q&A forum data layer
//!
//! Read-only repositories over a SQLite forum database: users, questions,
//! threaded replies, question follows and question likes. Every lookup runs
//! one parameterized query against an explicitly passed [`Connection`].

pub mod cli;
pub mod core;
pub mod db;
pub mod error;

// Re-export commonly used types
pub use crate::core::{Entity, Question, QuestionFollow, QuestionLike, Reply, User};
pub use crate::core::{
    QuestionFollowRepository, QuestionLikeRepository, QuestionRepository, ReplyRepository,
    UserRepository,
};
pub use error::{Error, Result};

pub use db::{Connection, DbPath, Schema};
