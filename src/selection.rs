use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Difficulty {
    #[default]
    Basic,
    Advanced,
}

impl Difficulty {
    pub const ALL: [Difficulty; 2] = [Difficulty::Basic, Difficulty::Advanced];

    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Basic => "기초",
            Difficulty::Advanced => "심화",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Math,
    Science,
    Arts,
    Humanities,
    Engineering,
    Life,
}

impl Field {
    pub const ALL: [Field; 6] = [
        Field::Math,
        Field::Science,
        Field::Arts,
        Field::Humanities,
        Field::Engineering,
        Field::Life,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Field::Math => "수학",
            Field::Science => "과학",
            Field::Arts => "예술",
            Field::Humanities => "인문/사회",
            Field::Engineering => "공학",
            Field::Life => "생명",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    LiteratureReview,
    ExperimentalWork,
}

impl Method {
    pub const ALL: [Method; 2] = [Method::LiteratureReview, Method::ExperimentalWork];

    pub fn label(self) -> &'static str {
        match self {
            Method::LiteratureReview => "문헌연구",
            Method::ExperimentalWork => "실험수행",
        }
    }
}

/// A validated snapshot of the form, built fresh on every submit.
/// `topic` and `method` are `None` exactly when `difficulty` is Basic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionRecord {
    pub difficulty: Difficulty,
    pub department: String,
    pub field: Field,
    pub topic: Option<String>,
    pub method: Option<Method>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingInput {
    Department,
    Topic,
    Field,
    Method,
}

/// Shown to the user with the same blanket notice for every missing
/// field; `missing` keeps the detail for callers that want it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("모든 항목을 입력하고 선택해야 합니다.")]
pub struct ValidationError {
    pub missing: Vec<MissingInput>,
}

/// Raw widget values plus the difficulty-driven enablement rule.
/// Toggling difficulty never clears values; Basic merely makes the
/// topic input and method group inert.
#[derive(Debug, Clone, Default)]
pub struct FormState {
    pub difficulty: Difficulty,
    pub department: String,
    pub topic: String,
    pub field: Option<Field>,
    pub method: Option<Method>,
}

impl FormState {
    pub fn advanced_enabled(&self) -> bool {
        self.difficulty == Difficulty::Advanced
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
    }

    pub fn select_field(&mut self, field: Field) {
        self.field = Some(field);
    }

    /// The method group is inert while Basic is selected.
    pub fn select_method(&mut self, method: Method) {
        if self.advanced_enabled() {
            self.method = Some(method);
        }
    }

    pub fn validate(&self) -> Result<SelectionRecord, ValidationError> {
        let advanced = self.advanced_enabled();

        let mut missing = Vec::new();
        if self.department.trim().is_empty() {
            missing.push(MissingInput::Department);
        }
        if self.field.is_none() {
            missing.push(MissingInput::Field);
        }
        if advanced {
            if self.topic.trim().is_empty() {
                missing.push(MissingInput::Topic);
            }
            if self.method.is_none() {
                missing.push(MissingInput::Method);
            }
        }

        match self.field {
            Some(field) if missing.is_empty() => Ok(SelectionRecord {
                difficulty: self.difficulty,
                department: self.department.clone(),
                field,
                topic: advanced.then(|| self.topic.clone()),
                method: if advanced { self.method } else { None },
            }),
            _ => Err(ValidationError { missing }),
        }
    }
}
