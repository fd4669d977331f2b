use serde::{Deserialize, Serialize};

/// Academic term
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum Term {
    Odd,
    Even,
}

impl<'de> Deserialize<'de> for Term {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            "odd" => Ok(Term::Odd),
            "even" => Ok(Term::Even),
            _ => Err(serde::de::Error::custom(format!(
                "Invalid term: '{s}'. Supported terms: odd, even"
            ))),
        }
    }
}

impl std::fmt::Display for Term {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Term::Odd => write!(f, "odd"),
            Term::Even => write!(f, "even"),
        }
    }
}

impl std::str::FromStr for Term {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "odd" => Ok(Term::Odd),
            "even" => Ok(Term::Even),
            _ => Err(format!("Invalid term: {s}")),
        }
    }
}

/// A scheduled section of a course, taught by one lecturer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassSection {
    pub id: i64,
    pub course_id: i64,
    pub lecturer_id: i64,
    pub day_of_week: i32, // 1 = Monday .. 7 = Sunday
    pub start_time: String, // "HH:MM"
    pub end_time: String,
    pub room: String,
    pub capacity: i32,
    pub academic_year: String,
    pub term: Term,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// Class with its eager-loaded relations.
#[derive(Debug, Clone, Serialize)]
pub struct ClassSectionDetail {
    #[serde(flatten)]
    pub class: ClassSection,
    pub course: Option<crate::models::courses::entities::Course>,
    pub lecturer: Option<crate::models::lecturers::entities::Lecturer>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_term_parsing() {
        assert_eq!("odd".parse::<Term>(), Ok(Term::Odd));
        assert_eq!("even".parse::<Term>(), Ok(Term::Even));
        assert!("summer".parse::<Term>().is_err());
    }
}
