//! Terminal prompts: sign-in notice, token entry and interactive answering.

use std::path::Path;

use rustyline::{DefaultEditor, error::ReadlineError};

use crate::domain::{
    AnswerSheet, LoginPrompt, LoginReason, Question, QuestionType, SheetError,
};

use super::{
    error::CliError,
    input::{attach_file, parse_yes_no},
};

/// Tells the user to sign in when a protected call cannot proceed
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalLoginPrompt;

impl LoginPrompt for TerminalLoginPrompt {
    fn open(&self, reason: LoginReason) {
        eprintln!("{reason}. Run `surveypro auth login` to sign in.");
    }
}

/// Read one line; `None` on Ctrl-C or end of input
fn read_line(editor: &mut DefaultEditor, prompt: &str) -> Result<Option<String>, CliError> {
    match editor.readline(prompt) {
        Ok(line) => Ok(Some(line.trim().to_string())),
        Err(ReadlineError::Interrupted | ReadlineError::Eof) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Ask for the token issued after signing in
pub fn read_token(login_url: &str) -> Result<String, CliError> {
    println!("Open this URL in your browser and sign in with Google:");
    println!();
    println!("  {login_url}");
    println!();
    println!("Then paste the access token shown after sign-in.");
    let mut editor = DefaultEditor::new()?;
    read_line(&mut editor, "token> ")?.ok_or(CliError::Cancelled)
}

fn describe(question: &Question, position: usize) -> String {
    let mark = if question.required { " *" } else { "" };
    let hint = match question.question_type {
        QuestionType::Text => String::new(),
        QuestionType::MultipleChoice => format!(
            "\n    options: {}\n    (comma separated)",
            question.options.join(", ")
        ),
        QuestionType::Rating => format!(" [1-{}]", question.scale),
        QuestionType::YesNo => " [y/n]".to_string(),
        QuestionType::FileUpload => " [path to file]".to_string(),
    };
    format!("{}. {}{mark}{hint}", position + 1, question.content)
}

/// Apply one typed line to the sheet; a blank line leaves the question unanswered
fn apply_line(sheet: &mut AnswerSheet, question: &Question, line: &str) -> Result<(), CliError> {
    let id = &question.id;
    if line.is_empty() {
        sheet.clear_answer(id);
        return Ok(());
    }
    match question.question_type {
        QuestionType::Text => sheet.set_text(id, line)?,
        QuestionType::MultipleChoice => {
            let choices = line
                .split(',')
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(str::to_string)
                .collect();
            sheet.set_choices(id, choices)?
        }
        QuestionType::Rating => {
            let rating = line
                .parse::<u8>()
                .map_err(|_| CliError::Input(format!("enter a number from 1 to {}", question.scale)))?;
            sheet.set_rating(id, rating)?
        }
        QuestionType::YesNo => {
            let yes = parse_yes_no(line).ok_or_else(|| CliError::Input("enter y or n".to_string()))?;
            sheet.set_yes_no(id, yes)?
        }
        QuestionType::FileUpload => {
            sheet.clear_file(id);
            attach_file(sheet, id, Path::new(line))?;
            if let Some(error) = sheet.error(id) {
                return Err(CliError::Input(error.to_string()));
            }
        }
    }
    Ok(())
}

/// Walk the respondent through every question, re-asking until the input fits
///
/// Blocking; run it on a blocking thread from async code.
pub fn answer_interactively(sheet: &mut AnswerSheet) -> Result<(), CliError> {
    let mut editor = DefaultEditor::new()?;
    let survey = sheet.survey().clone();
    println!("{}", survey.title);
    if !survey.description.is_empty() {
        println!("{}", survey.description);
    }
    println!("(* required, leave blank to skip)");

    if survey.settings.collect_email {
        let email = read_line(&mut editor, "Your email: ")?.ok_or(CliError::Cancelled)?;
        sheet.set_respondent_email(Some(email));
    }

    for (position, question) in survey.questions.iter().enumerate() {
        println!();
        println!("{}", describe(question, position));
        loop {
            let line = read_line(&mut editor, "> ")?.ok_or(CliError::Cancelled)?;
            match apply_line(sheet, question, &line) {
                Ok(()) => break,
                Err(CliError::Input(message)) => println!("  {message}"),
                Err(CliError::Sheet(SheetError::Invalid { error, .. })) => println!("  {error}"),
                Err(other) => return Err(other),
            }
        }
    }
    Ok(())
}

/// Ask again for the questions that failed validation
pub fn fix_errors_interactively(sheet: &mut AnswerSheet) -> Result<(), CliError> {
    let mut editor = DefaultEditor::new()?;
    let survey = sheet.survey().clone();
    for (position, question) in survey.questions.iter().enumerate() {
        let Some(error) = sheet.error(&question.id).cloned() else {
            continue;
        };
        println!();
        println!("{}", describe(question, position));
        println!("  {error}");
        loop {
            let line = read_line(&mut editor, "> ")?.ok_or(CliError::Cancelled)?;
            match apply_line(sheet, question, &line) {
                Ok(()) => break,
                Err(CliError::Input(message)) => println!("  {message}"),
                Err(CliError::Sheet(SheetError::Invalid { error, .. })) => println!("  {error}"),
                Err(other) => return Err(other),
            }
        }
    }
    Ok(())
}
