//! Plain-text and JSON output.

use serde::Serialize;
use surveypro_shared::time::display_timestamp;

use crate::{
    domain::{ExportJob, FieldErrors, Room, Survey, User, UserRole},
    usecase::SubmissionReceipt,
};

use super::error::CliError;

/// Output style chosen on the command line
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    json: bool,
}

impl Renderer {
    pub fn new(json: bool) -> Self {
        Self { json }
    }

    fn print_json<T: Serialize + ?Sized>(&self, value: &T) -> Result<(), CliError> {
        let text = serde_json::to_string_pretty(value)
            .map_err(|e| CliError::Input(format!("cannot encode output: {e}")))?;
        println!("{text}");
        Ok(())
    }

    pub fn surveys(&self, surveys: &[Survey]) -> Result<(), CliError> {
        if self.json {
            return self.print_json(surveys);
        }
        if surveys.is_empty() {
            println!("No surveys.");
            return Ok(());
        }
        for survey in surveys {
            println!("{}", survey_line(survey));
        }
        Ok(())
    }

    pub fn survey(&self, survey: &Survey) -> Result<(), CliError> {
        if self.json {
            return self.print_json(survey);
        }
        println!("{}", survey_line(survey));
        if !survey.description.is_empty() {
            println!("  {}", survey.description);
        }
        if let Some(created_at) = &survey.created_at {
            println!("  created: {}", display_timestamp(created_at));
        }
        if let Some(token) = &survey.share_token {
            println!("  share token: {token}");
        }
        for (position, question) in survey.questions.iter().enumerate() {
            let required = if question.required { " (required)" } else { "" };
            println!(
                "  {}. [{}] {}{required}",
                position + 1,
                question.question_type,
                question.content
            );
            if !question.options.is_empty() {
                println!("       options: {}", question.options.join(", "));
            }
        }
        Ok(())
    }

    pub fn rooms(&self, rooms: &[Room]) -> Result<(), CliError> {
        if self.json {
            return self.print_json(rooms);
        }
        if rooms.is_empty() {
            println!("No rooms.");
            return Ok(());
        }
        for room in rooms {
            println!("{}", room_line(room));
        }
        Ok(())
    }

    pub fn room(&self, room: &Room) -> Result<(), CliError> {
        if self.json {
            return self.print_json(room);
        }
        println!("{}", room_line(room));
        if !room.description.is_empty() {
            println!("  {}", room.description);
        }
        if let Some(link) = &room.share_link {
            println!("  share link: {link}");
        }
        for member in &room.members {
            let id = member.user_id.as_ref().map_or("-", |id| id.as_str());
            println!("  - {} <{}> {} ({id})", member.name, member.email, member.role);
        }
        Ok(())
    }

    pub fn users(&self, users: &[User]) -> Result<(), CliError> {
        if self.json {
            return self.print_json(users);
        }
        for user in users {
            let role = match user.role {
                UserRole::Admin => "admin",
                UserRole::User => "user",
            };
            let state = if user.active { "active" } else { "inactive" };
            println!(
                "{:<12} {:<32} {:<6} {state}  {}",
                user.id.as_str(),
                user.email,
                role,
                user.name
            );
        }
        Ok(())
    }

    pub fn user(&self, user: &User) -> Result<(), CliError> {
        self.users(std::slice::from_ref(user))
    }

    pub fn job(&self, job: &ExportJob) -> Result<(), CliError> {
        if self.json {
            return self.print_json(job);
        }
        print!("export {}: {}", job.id, job.status);
        if let Some(error) = &job.error {
            print!(" ({error})");
        }
        println!();
        Ok(())
    }

    pub fn receipt(&self, receipt: &SubmissionReceipt) {
        match &receipt.submission_id {
            Some(id) => println!("Submitted {} answer(s), submission {id}.", receipt.answer_count),
            None => println!("Submitted {} answer(s).", receipt.answer_count),
        }
    }
}

fn survey_line(survey: &Survey) -> String {
    let responses = survey
        .response_count
        .map(|n| format!(", {n} responses"))
        .unwrap_or_default();
    format!(
        "{:<12} {:<9} {} ({} questions{responses})",
        survey.id.as_str(),
        survey.status.to_string(),
        survey.title,
        survey.questions.len()
    )
}

fn room_line(room: &Room) -> String {
    let mut flags = Vec::new();
    if room.is_public {
        flags.push("public");
    }
    if room.is_locked {
        flags.push("locked");
    }
    let flags = if flags.is_empty() {
        String::new()
    } else {
        format!(" [{}]", flags.join(", "))
    };
    format!(
        "{:<12} {} ({} members){flags}",
        room.id.as_str(),
        room.name,
        room.members.len()
    )
}

/// Field errors in question order, for the terminal
pub fn field_errors(errors: &FieldErrors) -> String {
    errors
        .iter()
        .map(|(id, error)| format!("  {id}: {error}"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FieldError, QuestionId, RoomId};

    #[test]
    fn test_room_line_flags() {
        // テスト項目: 公開・ロックの状態が一覧に表示される
        let room = Room {
            id: RoomId::new("r1").unwrap(),
            name: "Research".to_string(),
            description: String::new(),
            members: Vec::new(),
            share_link: None,
            is_public: true,
            is_locked: true,
        };
        assert!(room_line(&room).ends_with("Research (0 members) [public, locked]"));
    }

    #[test]
    fn test_field_errors_are_listed_by_question() {
        // テスト項目: 質問 ID ごとにエラーを表示する
        let mut errors = FieldErrors::new();
        errors.insert(QuestionId::new("q2").unwrap(), FieldError::Required);
        assert_eq!(field_errors(&errors), "  q2: this question is required");
    }
}
