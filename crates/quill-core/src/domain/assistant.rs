//! Prompt templates for the writing assistant.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// The post section the assistant can draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Intro,
    Description,
    Conclusion,
}

impl FromStr for Section {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "intro" => Ok(Section::Intro),
            "description" => Ok(Section::Description),
            "conclusion" => Ok(Section::Conclusion),
            _ => Err(DomainError::invalid(
                "section",
                "section must be one of intro, description, conclusion",
            )),
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Section::Intro => "intro",
            Section::Description => "description",
            Section::Conclusion => "conclusion",
        };
        f.write_str(name)
    }
}

/// Prompt asking for one section of a post titled `title`.
pub fn section_prompt(title: &str, section: Section) -> String {
    match section {
        Section::Intro => format!(
            "Write an engaging opening paragraph for a blog post titled \"{title}\". \
             It should draw the reader in and briefly outline what the post covers."
        ),
        Section::Description => format!(
            "Write the main body of a blog post titled \"{title}\" in several paragraphs. \
             Include relevant details, examples and insights, and keep it informative and engaging."
        ),
        Section::Conclusion => format!(
            "Write a closing paragraph for a blog post titled \"{title}\". \
             Recap the key points and finish with a thought-provoking remark or call to action."
        ),
    }
}

/// Prompt wrapping a visitor question for the site assistant.
pub fn chat_prompt(message: &str) -> String {
    format!(
        "You are the assistant of a blogging site where people read and write posts, \
         share stories and connect with other writers. Answer the following visitor \
         question: {message}\n\
         Keep the answer short, friendly and informative. When asked about site features, \
         explain how to use them. When asked about writing, offer practical tips and encouragement."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_parse() {
        assert_eq!("intro".parse::<Section>().unwrap(), Section::Intro);
        assert_eq!(" Conclusion ".parse::<Section>().unwrap(), Section::Conclusion);
        assert!(matches!(
            "summary".parse::<Section>(),
            Err(DomainError::Validation { field: "section", .. })
        ));
    }

    #[test]
    fn test_prompts_interpolate_input() {
        for section in [Section::Intro, Section::Description, Section::Conclusion] {
            let prompt = section_prompt("Async Rust", section);
            assert!(prompt.contains("\"Async Rust\""));
        }
        assert!(chat_prompt("How do I add tags?").contains("How do I add tags?"));
    }
}
