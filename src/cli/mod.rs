//! Read-only command line front end.

mod output;

use crate::core::{Entity, QuestionFollowRepository, QuestionLikeRepository, QuestionRepository};
use crate::core::{ReplyRepository, UserRepository};
use crate::db::{Connection, DbPath, Schema};
use crate::error::{Error, Result};
use clap::{Parser, Subcommand};
use output::{Printer, QuestionDetail, ReplyDetail, UserDetail};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "questions")]
#[command(about = "Browse a Q&A forum database")]
#[command(version)]
pub struct Cli {
    /// Path to the forum database
    #[arg(long, global = true, env = "QUESTIONS_DB", default_value = DbPath::DEFAULT_FILE)]
    pub db: PathBuf,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List users
    Users {
        /// Only users with this first name (requires --lname)
        #[arg(long, requires = "lname")]
        fname: Option<String>,
        /// Only users with this last name (requires --fname)
        #[arg(long, requires = "fname")]
        lname: Option<String>,
    },

    /// Show a user with their activity
    User {
        /// User ID
        id: i64,
    },

    /// List questions
    Questions {
        /// Only questions asked by this user ID
        #[arg(long)]
        author: Option<i64>,
    },

    /// Show a question with its author and counts
    Question {
        /// Question ID
        id: i64,
    },

    /// List replies on a question
    Replies {
        /// Question ID
        question_id: i64,
    },

    /// Show a reply with its parent and children
    Reply {
        /// Reply ID
        id: i64,
    },

    /// List users following a question
    Followers {
        /// Question ID
        question_id: i64,
    },

    /// List users who liked a question
    Likers {
        /// Question ID
        question_id: i64,
    },

    /// List questions a user follows
    Followed {
        /// User ID
        user_id: i64,
    },

    /// List questions a user liked
    Liked {
        /// User ID
        user_id: i64,
    },

    /// Questions with the most followers
    MostFollowed {
        /// How many questions to show
        n: usize,
    },

    /// Questions with the most likes
    MostLiked {
        /// How many questions to show
        n: usize,
    },

    /// Count likes on a question
    Likes {
        /// Question ID
        question_id: i64,
    },

    /// Average likes per question for a user
    Karma {
        /// User ID
        user_id: i64,
    },
}

/// Turn an absent lookup into a `NotFound` error.
fn require<T: Entity>(found: Option<T>, id: i64) -> Result<T> {
    found.ok_or_else(|| Error::not_found(T::NAME, id))
}

/// Run a parsed command line.
pub fn run(cli: Cli) -> Result<()> {
    let path = DbPath::new(&cli.db);
    let conn = Connection::open_read_only(&path)?;
    Schema::verify(&conn)?;

    let out = Printer::new(cli.json);
    dispatch(&conn, &out, cli.command)?;

    conn.close()
}

fn dispatch(conn: &Connection, out: &Printer, command: Commands) -> Result<()> {
    let users = UserRepository::new(conn);
    let questions = QuestionRepository::new(conn);
    let replies = ReplyRepository::new(conn);

    match command {
        Commands::Users {
            fname: Some(fname),
            lname: Some(lname),
        } => {
            let found = users.find_by_name(&fname, &lname)?;
            if found.is_empty() {
                return Err(Error::UserNotFound { fname, lname });
            }
            out.list(&found)
        }
        Commands::Users { .. } => out.list(&users.all()?),
        Commands::User { id } => {
            let user = require(users.find_by_id(id)?, id)?;
            let detail = UserDetail {
                questions: user.authored_questions(conn)?,
                replies: user.authored_replies(conn)?.len(),
                karma: user.average_karma(conn)?,
                user,
            };
            out.user(&detail)
        }
        Commands::Questions { author: None } => out.list(&questions.all()?),
        Commands::Questions { author: Some(u_id) } => {
            out.list(&questions.find_by_author_id(u_id)?)
        }
        Commands::Question { id } => {
            let question = require(questions.find_by_id(id)?, id)?;
            let detail = QuestionDetail {
                author: question.author(conn)?,
                replies: question.replies(conn)?.len(),
                followers: question.followers(conn)?.len(),
                likes: question.num_likes(conn)?,
                question,
            };
            out.question(&detail)
        }
        Commands::Replies { question_id } => {
            require(questions.find_by_id(question_id)?, question_id)?;
            out.list(&replies.find_by_question_id(question_id)?)
        }
        Commands::Reply { id } => {
            let reply = require(replies.find_by_id(id)?, id)?;
            let detail = ReplyDetail {
                parent: reply.parent_reply(conn)?,
                children: reply.child_replies(conn)?,
                reply,
            };
            out.reply(&detail)
        }
        Commands::Followers { question_id } => {
            let question = require(questions.find_by_id(question_id)?, question_id)?;
            out.list(&question.followers(conn)?)
        }
        Commands::Likers { question_id } => {
            let question = require(questions.find_by_id(question_id)?, question_id)?;
            out.list(&question.likers(conn)?)
        }
        Commands::Followed { user_id } => {
            let user = require(users.find_by_id(user_id)?, user_id)?;
            out.list(&user.followed_questions(conn)?)
        }
        Commands::Liked { user_id } => {
            let user = require(users.find_by_id(user_id)?, user_id)?;
            out.list(&user.liked_questions(conn)?)
        }
        Commands::MostFollowed { n } => {
            out.list(&QuestionFollowRepository::new(conn).most_followed_questions(n)?)
        }
        Commands::MostLiked { n } => {
            out.list(&QuestionLikeRepository::new(conn).most_liked_questions(n)?)
        }
        Commands::Likes { question_id } => {
            require(questions.find_by_id(question_id)?, question_id)?;
            let likes = QuestionLikeRepository::new(conn).num_likes_for_question_id(question_id)?;
            out.likes(question_id, likes)
        }
        Commands::Karma { user_id } => {
            let user = require(users.find_by_id(user_id)?, user_id)?;
            let karma = user.average_karma(conn)?;
            out.karma(&user, karma)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_defaults() {
        let cli = Cli::try_parse_from(["questions", "users"]).unwrap();
        assert!(!cli.json);
        assert!(matches!(
            cli.command,
            Commands::Users {
                fname: None,
                lname: None
            }
        ));
    }

    #[test]
    fn test_parse_name_filter() {
        let cli = Cli::try_parse_from([
            "questions", "users", "--fname", "Ada", "--lname", "Lovelace",
        ])
        .unwrap();
        match cli.command {
            Commands::Users {
                fname: Some(fname),
                lname: Some(lname),
            } => assert_eq!((fname.as_str(), lname.as_str()), ("Ada", "Lovelace")),
            _ => panic!("expected users --fname --lname"),
        }
    }

    #[test]
    fn test_name_filter_needs_both_parts() {
        assert!(Cli::try_parse_from(["questions", "users", "--fname", "Ada"]).is_err());
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli =
            Cli::try_parse_from(["questions", "most-followed", "3", "--json", "--db", "x.db"])
                .unwrap();
        assert!(cli.json);
        assert_eq!(cli.db, PathBuf::from("x.db"));
        assert!(matches!(cli.command, Commands::MostFollowed { n: 3 }));
    }

    #[test]
    fn test_require() {
        let err = require::<crate::core::User>(None, 7).unwrap_err();
        assert_eq!(err.to_string(), "User #7 not found");
    }
}
