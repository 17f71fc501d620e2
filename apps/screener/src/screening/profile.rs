//! Candidate profile scraping: contact details, skills, education and
//! experience pulled from raw resume text with regular expressions.
//!
//! Every field has its own extractor. Fields with several patterns try them in
//! order and the first match wins.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateProfile {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub skills: Vec<String>,
    pub education: Option<String>,
    pub experience: Option<String>,
}

/// Runs every field extractor over `text`.
pub fn extract_profile(text: &str) -> CandidateProfile {
    CandidateProfile {
        email: extract_email(text),
        phone: extract_phone(text),
        skills: extract_skills(text),
        education: extract_education(text),
        experience: extract_experience(text),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Contact details
// ────────────────────────────────────────────────────────────────────────────

const EMAIL_PATTERN: &str = r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}";
const PHONE_PATTERN: &str = r"(?:\+?\d{1,3}[-.\s]?)?\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}";

static EMAIL: LazyLock<Regex> = LazyLock::new(|| compile(EMAIL_PATTERN));
static PHONE: LazyLock<Regex> = LazyLock::new(|| compile(PHONE_PATTERN));
static PHONE_EXACT: LazyLock<Regex> =
    LazyLock::new(|| compile(r"^\+?\(?\d{3}\)?[-\s.]?\d{3}[-\s.]?\d{4,6}$"));

pub fn extract_email(text: &str) -> Option<String> {
    EMAIL.find(text).map(|m| m.as_str().to_string())
}

/// The first number in the strict [`validate_phone`] format wins; otherwise
/// the first loose match is returned.
pub fn extract_phone(text: &str) -> Option<String> {
    let candidates: Vec<&str> = PHONE.find_iter(text).map(|m| m.as_str()).collect();
    candidates
        .iter()
        .copied()
        .find(|candidate| validate_phone(candidate).is_some())
        .or_else(|| candidates.first().copied())
        .map(str::to_string)
}

/// Returns the input when the whole string is a 10 to 12 digit phone number.
pub fn validate_phone(phone: &str) -> Option<&str> {
    PHONE_EXACT.is_match(phone).then_some(phone)
}

// ────────────────────────────────────────────────────────────────────────────
// Skills
// ────────────────────────────────────────────────────────────────────────────

/// (lower-case needle, display name), reported in this order.
const SKILL_CATALOGUE: &[(&str, &str)] = &[
    ("python", "Python"),
    ("java", "Java"),
    ("react", "React"),
    ("aws", "AWS"),
    ("sql", "SQL"),
    ("html", "HTML"),
    ("css", "CSS"),
    ("machine learning", "Machine Learning"),
    ("ai", "AI"),
    ("tensorflow", "TensorFlow"),
    ("pytorch", "PyTorch"),
    ("docker", "Docker"),
    ("kubernetes", "Kubernetes"),
    ("git", "Git"),
    ("javascript", "JavaScript"),
    ("typescript", "TypeScript"),
    ("node.js", "Node.js"),
    ("data analysis", "Data Analysis"),
    ("pandas", "Pandas"),
    ("numpy", "NumPy"),
    ("scikit-learn", "scikit-learn"),
    ("flask", "Flask"),
    ("django", "Django"),
    ("fastapi", "FastAPI"),
    ("mongodb", "MongoDB"),
    ("postgresql", "PostgreSQL"),
    ("mysql", "MySQL"),
    ("big data", "Big Data"),
    ("hadoop", "Hadoop"),
    ("spark", "Spark"),
    ("tableau", "Tableau"),
    ("power bi", "Power BI"),
];

/// One boundary-anchored matcher per catalogue entry, so "ai" does not fire
/// inside "maintain" and "java" does not fire inside "javascript".
static SKILL_MATCHERS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    SKILL_CATALOGUE
        .iter()
        .map(|(needle, display)| {
            let pattern = format!(r"(?i)(?:^|[^\w.]){}(?:$|[^\w])", regex::escape(needle));
            (compile(&pattern), *display)
        })
        .collect()
});

pub fn extract_skills(text: &str) -> Vec<String> {
    SKILL_MATCHERS
        .iter()
        .filter(|(matcher, _)| matcher.is_match(text))
        .map(|(_, display)| display.to_string())
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Education / experience
// ────────────────────────────────────────────────────────────────────────────

/// Section heading, then a degree, then a year range.
const EDUCATION_SECTION: &str = r"(?i)(?:education|academic background|qualifications)[\s\S]*?(?:master|bachelor|ph\.?d|doctorate)[\s\S]*?\d{4}[\s-]*(?:\d{4}|present)";
/// A degree, "in"/"of", a field, and a year.
const EDUCATION_DEGREE: &str =
    r"(?i)(?:master'?s?|bachelor'?s?|ph\.?d|doctorate)[\s\S]*?(?:in|of)[\s\S]*?[a-z]+[\s,]*\d{4}";
/// An institution followed by a credential on the same line.
const EDUCATION_INSTITUTION: &str =
    r"(?i)\b(?:university|college|institute)\b.*?\b(?:degree|diploma|certificate)\b";

static EDUCATION_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [EDUCATION_SECTION, EDUCATION_DEGREE, EDUCATION_INSTITUTION]
        .into_iter()
        .map(compile)
        .collect()
});

/// "5+ years experience" or "experience ... 5 years".
const EXPERIENCE_YEARS: &str = r"(?i)\d+\+?[\s-]*(?:years?|yrs?)[\s-]*experience|experience[\s\S]*?\d+\+?[\s-]*(?:years?|yrs?)";
/// A work-history heading followed by "Month YYYY - present|YYYY".
const EXPERIENCE_HISTORY: &str =
    r"(?i)(?:experience|work history|employment)[\s\S]*?[a-z]+\s\d{4}[\s-]*(?:present|\d{4})";

static EXPERIENCE_YEARS_RE: LazyLock<Regex> = LazyLock::new(|| compile(EXPERIENCE_YEARS));
static EXPERIENCE_HISTORY_RE: LazyLock<Regex> = LazyLock::new(|| compile(EXPERIENCE_HISTORY));

/// Work-history matches longer than this are summarized.
const HISTORY_SUMMARY_CHARS: usize = 100;

pub fn extract_education(text: &str) -> Option<String> {
    first_match(&EDUCATION_PATTERNS, text)
}

pub fn extract_experience(text: &str) -> Option<String> {
    if let Some(m) = EXPERIENCE_YEARS_RE.find(text) {
        return Some(m.as_str().trim().to_string());
    }

    let history = EXPERIENCE_HISTORY_RE.find(text)?.as_str();
    if history.chars().count() > HISTORY_SUMMARY_CHARS {
        let head: String = history.chars().take(HISTORY_SUMMARY_CHARS).collect();
        Some(format!("Experience mentioned: {head}..."))
    } else {
        Some(history.trim().to_string())
    }
}

fn first_match(patterns: &[Regex], text: &str) -> Option<String> {
    patterns
        .iter()
        .find_map(|pattern| pattern.find(text))
        .map(|m| m.as_str().trim().to_string())
}

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| panic!("invalid built-in pattern {pattern:?}: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESUME: &str = "Jane Doe\n\
        jane.doe@example.com | +1 (555) 123-4567\n\
        Summary: Backend engineer with 6+ years experience in Python, Docker and AWS.\n\
        Skills: Python, Django, PostgreSQL, Docker, Kubernetes, Git, machine learning\n\
        Education\n\
        Bachelor of Science in Computer Science, State University, 2012 - 2016\n";

    #[test]
    fn test_extract_email() {
        assert_eq!(extract_email(RESUME).as_deref(), Some("jane.doe@example.com"));
        assert_eq!(extract_email("no contact here"), None);
    }

    #[test]
    fn test_extract_phone() {
        assert_eq!(extract_phone(RESUME).as_deref(), Some("+1 (555) 123-4567"));
        assert_eq!(extract_phone("call 555-123-4567 now").as_deref(), Some("555-123-4567"));
        assert_eq!(extract_phone("ext 1234"), None);
    }

    #[test]
    fn test_extract_skills_in_catalogue_order() {
        assert_eq!(
            extract_skills(RESUME),
            vec![
                "Python",
                "AWS",
                "Machine Learning",
                "Docker",
                "Kubernetes",
                "Git",
                "Django",
                "PostgreSQL",
            ]
        );
    }

    #[test]
    fn test_skills_match_whole_words_only() {
        assert!(extract_skills("I maintain legacy systems").is_empty());
        assert_eq!(extract_skills("JavaScript and TypeScript"), vec!["JavaScript", "TypeScript"]);
        assert_eq!(extract_skills("Built APIs in Node.js"), vec!["Node.js"]);
        assert_eq!(extract_skills("Dashboards in Power BI."), vec!["Power BI"]);
    }

    #[test]
    fn test_extract_education_prefers_section_pattern() {
        let education = extract_education(RESUME).unwrap();
        assert!(education.starts_with("Education"), "{education}");
        assert!(education.ends_with("2012 - 2016"), "{education}");
    }

    #[test]
    fn test_extract_education_falls_back_to_institution() {
        let text = "Attended Springfield College earning a diploma in design";
        assert_eq!(
            extract_education(text).as_deref(),
            Some("College earning a diploma")
        );
        assert_eq!(extract_education("self taught"), None);
    }

    #[test]
    fn test_extract_experience_years() {
        assert_eq!(
            extract_experience(RESUME).as_deref(),
            Some("6+ years experience")
        );
        assert_eq!(
            extract_experience("Experience: 3 yrs in retail").as_deref(),
            Some("Experience: 3 yrs")
        );
    }

    #[test]
    fn test_extract_experience_history_is_summarized_when_long() {
        let filler = "Responsible for building and operating services. ".repeat(3);
        let text = format!("Work History\n{filler}Acme Corp, March 2019 - present");
        let experience = extract_experience(&text).unwrap();
        assert!(experience.starts_with("Experience mentioned: Work History"));
        assert!(experience.ends_with("..."));
    }

    #[test]
    fn test_extract_experience_history_short() {
        let text = "Employment: Acme, June 2018 - 2021";
        assert_eq!(
            extract_experience(text).as_deref(),
            Some("Employment: Acme, June 2018 - 2021")
        );
    }

    #[test]
    fn test_extract_profile_missing_fields_are_none() {
        let profile = extract_profile("");
        assert_eq!(profile, CandidateProfile::default());
    }

    #[test]
    fn test_extract_phone_prefers_strict_format() {
        let text = "Ref no. 12 345 678 9012, phone (555) 123-4567";
        assert_eq!(extract_phone(text).as_deref(), Some("(555) 123-4567"));
    }

    #[test]
    fn test_extract_phone_falls_back_to_loose_match() {
        assert_eq!(
            extract_phone("Ref no. 12 345 678 9012").as_deref(),
            Some("12 345 678 9012")
        );
    }

    #[test]
    fn test_validate_phone() {
        assert_eq!(validate_phone("(555) 123-4567"), Some("(555) 123-4567"));
        assert_eq!(validate_phone("+5551234567"), Some("+5551234567"));
        assert_eq!(validate_phone("12345"), None);
    }
}
