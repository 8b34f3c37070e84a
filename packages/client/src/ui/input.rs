//! Survey definition and answer files read by the CLI.
//!
//! Files ending in `.toml` are read as TOML, anything else as JSON.

use std::{collections::BTreeMap, path::{Path, PathBuf}};

use serde::{Deserialize, de::DeserializeOwned};

use crate::domain::{
    AnswerSheet, FileAttachment, QuestionId, QuestionType, SheetError, SurveyDraft,
    SurveySettings,
};

use super::error::CliError;

/// Read a JSON or TOML document
pub fn read_document<T: DeserializeOwned>(path: &Path) -> Result<T, CliError> {
    let source = std::fs::read_to_string(path)
        .map_err(|e| CliError::Input(format!("cannot read {}: {e}", path.display())))?;
    let is_toml = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));
    if is_toml {
        toml::from_str(&source)
            .map_err(|e| CliError::Input(format!("{}: {e}", path.display())))
    } else {
        serde_json::from_str(&source)
            .map_err(|e| CliError::Input(format!("{}: {e}", path.display())))
    }
}

pub fn load_draft(path: &Path) -> Result<SurveyDraft, CliError> {
    read_document(path)
}

pub fn load_settings(path: &Path) -> Result<SurveySettings, CliError> {
    read_document(path)
}

/// One answer as written in an answers file
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum AnswerInput {
    Flag(bool),
    Number(u8),
    Text(String),
    Choices(Vec<String>),
    File { file: PathBuf },
}

/// Answers keyed by question id
pub type AnswersFile = BTreeMap<String, AnswerInput>;

/// Accepts y/yes/true/1 and n/no/false/0, case-insensitively
pub fn parse_yes_no(input: &str) -> Option<bool> {
    match input.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" | "true" | "1" => Some(true),
        "n" | "no" | "false" | "0" => Some(false),
        _ => None,
    }
}

/// Select a file for an upload question, recording unreadable files on the sheet
pub fn attach_file(
    sheet: &mut AnswerSheet,
    question_id: &QuestionId,
    path: &Path,
) -> Result<(), SheetError> {
    match FileAttachment::from_path(path) {
        Ok(file) => sheet.select_file(question_id, file),
        Err(error) => {
            tracing::warn!(path = %path.display(), %error, "cannot read selected file");
            sheet.reject_file(question_id, format!("{}: {error}", path.display()));
            Ok(())
        }
    }
}

/// Apply every answer of an answers file to the sheet
pub fn apply_answers(sheet: &mut AnswerSheet, answers: AnswersFile) -> Result<(), CliError> {
    for (raw_id, input) in answers {
        let question_id = QuestionId::new(raw_id)?;
        let question_type = sheet
            .survey()
            .question(&question_id)
            .map(|q| q.question_type)
            .ok_or_else(|| SheetError::UnknownQuestion(question_id.clone()))?;

        match (question_type, input) {
            (QuestionType::Text, AnswerInput::Text(text)) => sheet.set_text(&question_id, text)?,
            (QuestionType::MultipleChoice, AnswerInput::Text(choice)) => {
                sheet.set_choices(&question_id, vec![choice])?
            }
            (QuestionType::MultipleChoice, AnswerInput::Choices(choices)) => {
                sheet.set_choices(&question_id, choices)?
            }
            (QuestionType::Rating, AnswerInput::Number(rating)) => {
                sheet.set_rating(&question_id, rating)?
            }
            (QuestionType::YesNo, AnswerInput::Flag(yes)) => sheet.set_yes_no(&question_id, yes)?,
            (QuestionType::YesNo, AnswerInput::Text(text)) => {
                let yes = parse_yes_no(&text).ok_or_else(|| {
                    CliError::Input(format!("answer for {question_id}: expected yes or no"))
                })?;
                sheet.set_yes_no(&question_id, yes)?
            }
            (QuestionType::FileUpload, AnswerInput::File { file }) => {
                attach_file(sheet, &question_id, &file)?
            }
            (QuestionType::FileUpload, AnswerInput::Text(file)) => {
                attach_file(sheet, &question_id, Path::new(&file))?
            }
            (question_type, _) => {
                return Err(CliError::Input(format!(
                    "answer for {question_id} does not fit a {question_type} question"
                )));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        FieldError, Question, ShareToken, Survey, SurveyId, SurveyStatus,
    };

    fn question(id: &str, question_type: QuestionType) -> Question {
        Question {
            id: QuestionId::new(id).unwrap(),
            question_type,
            content: id.to_string(),
            required: false,
            options: vec!["Thai".to_string(), "Pizza".to_string()],
            scale: 5,
        }
    }

    fn sheet() -> AnswerSheet {
        let survey = Survey {
            id: SurveyId::new("s1").unwrap(),
            title: "Lunch".to_string(),
            description: String::new(),
            questions: vec![
                question("name", QuestionType::Text),
                question("food", QuestionType::MultipleChoice),
                question("score", QuestionType::Rating),
                question("again", QuestionType::YesNo),
                question("menu", QuestionType::FileUpload),
            ],
            settings: SurveySettings::default(),
            status: SurveyStatus::Active,
            share_token: None,
            response_count: None,
            created_at: None,
        };
        AnswerSheet::new(survey, ShareToken::new("tok").unwrap(), 16)
    }

    #[test]
    fn test_apply_toml_answers() {
        // テスト項目: TOML の回答ファイルを質問の種類に合わせて反映する
        // given (前提条件):
        let dir = tempfile::tempdir().unwrap();
        let menu = dir.path().join("menu.txt");
        std::fs::write(&menu, "soup").unwrap();
        let source = format!(
            r#"
            name = "Ana"
            food = ["Thai"]
            score = 4
            again = "yes"
            menu = {{ file = "{}" }}
            "#,
            menu.display()
        );
        let answers: AnswersFile = toml::from_str(&source).unwrap();
        let mut sheet = sheet();

        // when (操作):
        apply_answers(&mut sheet, answers).unwrap();

        // then (期待する結果):
        let submission = sheet.validate().unwrap();
        assert_eq!(submission.answers.len(), 5);
        assert_eq!(submission.files().count(), 1);
    }

    #[test]
    fn test_plain_path_answers_file_question() {
        // テスト項目: ファイル質問にはパス文字列だけの回答も使える
        // given (前提条件):
        let dir = tempfile::tempdir().unwrap();
        let menu = dir.path().join("menu.txt");
        std::fs::write(&menu, "soup").unwrap();
        let answers: AnswersFile =
            serde_json::from_value(serde_json::json!({ "menu": menu.display().to_string() }))
                .unwrap();
        let mut sheet = sheet();

        // when (操作):
        apply_answers(&mut sheet, answers).unwrap();

        // then (期待する結果):
        let submission = sheet.validate().unwrap();
        let files: Vec<_> = submission.files().collect();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].1.file_name, "menu.txt");
    }

    #[test]
    fn test_oversized_file_is_reported() {
        // テスト項目: 上限を超えるファイルは質問ごとのエラーになる
        let dir = tempfile::tempdir().unwrap();
        let big = dir.path().join("big.bin");
        std::fs::write(&big, vec![0u8; 64]).unwrap();
        let mut sheet = sheet();
        let menu = QuestionId::new("menu").unwrap();

        let result = attach_file(&mut sheet, &menu, &big);

        assert!(result.is_err());
        assert_eq!(
            sheet.error(&menu),
            Some(&FieldError::FileTooLarge { max: 16, actual: 64 })
        );
    }

    #[test]
    fn test_missing_file_is_recorded_as_unreadable() {
        // テスト項目: 読めないファイルは送信前のエラーとして残る
        let mut sheet = sheet();
        let menu = QuestionId::new("menu").unwrap();

        attach_file(&mut sheet, &menu, Path::new("/definitely/not/here.pdf")).unwrap();

        assert!(matches!(
            sheet.error(&menu),
            Some(FieldError::FileUnreadable(_))
        ));
    }

    #[test]
    fn test_mismatched_answer_is_rejected() {
        // テスト項目: 質問の種類に合わない回答はエラーになる
        let mut answers = AnswersFile::new();
        answers.insert("score".to_string(), AnswerInput::Text("great".to_string()));

        let result = apply_answers(&mut sheet(), answers);

        assert!(matches!(result, Err(CliError::Input(_))));
    }

    #[test]
    fn test_parse_yes_no() {
        // テスト項目: yes/no の入力を解釈する
        assert_eq!(parse_yes_no(" Yes "), Some(true));
        assert_eq!(parse_yes_no("n"), Some(false));
        assert_eq!(parse_yes_no("maybe"), None);
    }

    #[test]
    fn test_load_draft_from_json_file() {
        // テスト項目: JSON の定義ファイルからドラフトを読み込める
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("survey.json");
        std::fs::write(
            &path,
            r#"{"title": "Onboarding", "questions": [{"type": "text", "content": "Name"}]}"#,
        )
        .unwrap();

        let draft = load_draft(&path).unwrap();

        assert_eq!(draft.title, "Onboarding");
        assert_eq!(draft.questions.len(), 1);
    }
}
