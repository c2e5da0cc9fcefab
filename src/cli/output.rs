//! Output formatting for the CLI.

use crate::core::{Question, Reply, User};
use crate::error::Result;
use serde::Serialize;
use serde_json::json;
use std::fmt::Display;

/// A user together with their activity.
#[derive(Debug, Serialize)]
pub struct UserDetail {
    pub user: User,
    pub questions: Vec<Question>,
    pub replies: usize,
    pub karma: f64,
}

/// A question together with its author and counts.
#[derive(Debug, Serialize)]
pub struct QuestionDetail {
    pub question: Question,
    pub author: Option<User>,
    pub replies: usize,
    pub followers: usize,
    pub likes: u64,
}

/// A reply together with its neighbours in the thread.
#[derive(Debug, Serialize)]
pub struct ReplyDetail {
    pub reply: Reply,
    pub parent: Option<Reply>,
    pub children: Vec<Reply>,
}

/// Writes results to stdout as text or JSON.
pub struct Printer {
    json: bool,
}

impl Printer {
    pub fn new(json: bool) -> Self {
        Self { json }
    }

    fn print_json<T: Serialize + ?Sized>(&self, value: &T) -> Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }

    /// One line per item.
    pub fn list<T: Serialize + Display>(&self, items: &[T]) -> Result<()> {
        if self.json {
            return self.print_json(items);
        }
        if items.is_empty() {
            println!("(none)");
        }
        for item in items {
            println!("{item}");
        }
        Ok(())
    }

    pub fn user(&self, detail: &UserDetail) -> Result<()> {
        if self.json {
            return self.print_json(detail);
        }
        println!("[#{}] {} {}", detail.user.id(), detail.user.fname, detail.user.lname);
        println!("Replies:    {}", detail.replies);
        println!("Karma:      {:.2}", detail.karma);
        if detail.questions.is_empty() {
            println!("Questions:  (none)");
        } else {
            println!("Questions:");
            for question in &detail.questions {
                println!("  - {question}");
            }
        }
        Ok(())
    }

    pub fn question(&self, detail: &QuestionDetail) -> Result<()> {
        if self.json {
            return self.print_json(detail);
        }
        let question = &detail.question;
        println!("[#{}] {}", question.id(), question.title);
        match &detail.author {
            Some(author) => println!("Author:     {} {}", author.fname, author.lname),
            None => println!("Author:     (unknown user #{})", question.u_id),
        }
        println!("Replies:    {}", detail.replies);
        println!("Followers:  {}", detail.followers);
        println!("Likes:      {}", detail.likes);
        println!();
        println!("{}", question.body);
        Ok(())
    }

    pub fn reply(&self, detail: &ReplyDetail) -> Result<()> {
        if self.json {
            return self.print_json(detail);
        }
        let reply = &detail.reply;
        println!("[#{}] on question #{} by user #{}", reply.id(), reply.q_id, reply.u_id);
        println!("{}", reply.body);
        match (&detail.parent, reply.parent_id) {
            (Some(parent), _) => println!("Parent:     {parent}"),
            (None, Some(parent_id)) => println!("Parent:     (missing reply #{parent_id})"),
            (None, None) => println!("Parent:     (top level)"),
        }
        if detail.children.is_empty() {
            println!("Children:   (none)");
        } else {
            println!("Children:");
            for child in &detail.children {
                println!("  - {child}");
            }
        }
        Ok(())
    }

    pub fn likes(&self, question_id: i64, likes: u64) -> Result<()> {
        if self.json {
            return self.print_json(&json!({ "question_id": question_id, "likes": likes }));
        }
        println!("The number of likes for question id {question_id} is {likes}");
        Ok(())
    }

    pub fn karma(&self, user: &User, karma: f64) -> Result<()> {
        if self.json {
            return self.print_json(&json!({ "user_id": user.id(), "karma": karma }));
        }
        println!("Average karma for {} {}: {karma:.2}", user.fname, user.lname);
        Ok(())
    }
}
