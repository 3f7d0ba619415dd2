use crate::selection::{Difficulty, Method, SelectionRecord};

/// Maps a validated selection to the request sentence sent to the
/// generation service. Values are interpolated verbatim.
pub fn build(record: &SelectionRecord) -> String {
    match record.difficulty {
        Difficulty::Basic => format!(
            "{} 분야에서 {}와 관련된 탐구 내용 추천해줘.",
            record.department,
            record.field.label(),
        ),
        Difficulty::Advanced => {
            let topic = record.topic.as_deref().unwrap_or_default();
            let method = record.method.map(Method::label).unwrap_or_default();
            format!(
                "{}라는 주제에 대해서 {} 분야, 그리고 {}와 관련있는 탐구 내용을 추천해줘. '{}'의 방법으로 할 수 있는 걸로 찾아줘.",
                topic,
                record.field.label(),
                record.department,
                method,
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::{Field, Method};

    fn basic(department: &str, field: Field) -> SelectionRecord {
        SelectionRecord {
            difficulty: Difficulty::Basic,
            department: department.to_string(),
            field,
            topic: None,
            method: None,
        }
    }

    #[test]
    fn basic_prompt_matches_template() {
        let record = basic("과학", Field::Life);
        assert_eq!(build(&record), "과학 분야에서 생명와 관련된 탐구 내용 추천해줘.");
    }

    #[test]
    fn basic_prompt_contains_no_method_text() {
        let record = basic("물리", Field::Math);
        let prompt = build(&record);
        assert!(prompt.contains("물리"));
        assert!(prompt.contains("수학"));
        for method in Method::ALL {
            assert!(!prompt.contains(method.label()));
        }
    }

    #[test]
    fn advanced_prompt_contains_all_values_in_order() {
        let record = SelectionRecord {
            difficulty: Difficulty::Advanced,
            department: "화학".to_string(),
            field: Field::Life,
            topic: Some("발효".to_string()),
            method: Some(Method::ExperimentalWork),
        };
        let prompt = build(&record);
        assert_eq!(
            prompt,
            "발효라는 주제에 대해서 생명 분야, 그리고 화학와 관련있는 탐구 내용을 추천해줘. \
             '실험수행'의 방법으로 할 수 있는 걸로 찾아줘."
        );

        // topic, field, department, method appear in that relative order
        let positions = [
            prompt.find("발효").unwrap(),
            prompt.find("생명").unwrap(),
            prompt.find("화학").unwrap(),
            prompt.find("실험수행").unwrap(),
        ];
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn build_is_deterministic() {
        let record = basic("역사", Field::Humanities);
        assert_eq!(build(&record), build(&record));
    }
}
