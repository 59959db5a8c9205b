use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Every question offers exactly this many choices.
pub const OPTIONS_PER_QUESTION: usize = 4;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum JobStatus {
    #[serde(rename = "Application Submitted")]
    ApplicationSubmitted,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub question: String,
    pub options: [String; OPTIONS_PER_QUESTION],
    /// Index into `options`, stored as a string ("0".."3").
    pub correct_answer: String,
}

impl Question {
    /// True when `selected` names the correct option.
    pub fn is_answered_by(&self, selected: usize) -> bool {
        selected.to_string() == self.correct_answer
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: Uuid,
    pub job_title: String,
    pub job_description: String,
    pub assessment: bool,
    #[serde(default)]
    pub questions: Vec<Question>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<JobStatus>,
}

impl Job {
    pub fn has_questions(&self) -> bool {
        !self.questions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(correct: &str) -> Question {
        Question {
            question: "2+2?".to_string(),
            options: ["3", "4", "5", "6"].map(String::from),
            correct_answer: correct.to_string(),
        }
    }

    #[test]
    fn test_is_answered_by_compares_string_index() {
        let q = question("1");
        assert!(q.is_answered_by(1));
        assert!(!q.is_answered_by(0));
    }

    #[test]
    fn test_job_status_wire_name() {
        let json = serde_json::to_string(&JobStatus::ApplicationSubmitted).unwrap();
        assert_eq!(json, r#""Application Submitted""#);
    }

    #[test]
    fn test_job_without_status_omits_field() {
        let job = Job {
            id: Uuid::nil(),
            job_title: "Dev".to_string(),
            job_description: "Build stuff".to_string(),
            assessment: true,
            questions: vec![question("1")],
            status: None,
        };
        let value = serde_json::to_value(&job).unwrap();
        assert_eq!(value["jobTitle"], "Dev");
        assert_eq!(value["questions"][0]["correctAnswer"], "1");
        assert!(value.get("status").is_none());
    }

    #[test]
    fn test_question_requires_four_options() {
        let raw = r#"{"question":"q","options":["a","b","c"],"correctAnswer":"0"}"#;
        assert!(serde_json::from_str::<Question>(raw).is_err());
    }
}
