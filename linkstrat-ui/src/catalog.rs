//! Static question catalog
//!
//! The ordered sections and questions presented by the onboarding wizard.
//! Read-only after construction; the engine and prompt builder both resolve
//! question metadata through it.

use serde::Serialize;

/// Selectable option for choice questions
#[derive(Debug, Clone, Serialize)]
pub struct ChoiceOption {
    pub value: String,
    pub label: String,
}

/// Question kind, closed set
///
/// Validation and rendering both match exhaustively on this enum; there is no
/// runtime shape sniffing of answer values.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QuestionKind {
    /// One value from the options (or free text)
    SingleChoice { options: Vec<ChoiceOption> },
    /// A set of option values, bounded by min/max selections
    MultiChoice {
        options: Vec<ChoiceOption>,
        min_selections: Option<usize>,
        max_selections: Option<usize>,
    },
    /// Ordered, deduplicated free-form strings, bounded by min/max
    TagList {
        min_selections: Option<usize>,
        max_selections: Option<usize>,
        suggestions: Vec<String>,
    },
}

/// A single question
#[derive(Debug, Clone, Serialize)]
pub struct Question {
    pub id: String,
    pub prompt: String,
    pub description: Option<String>,
    #[serde(flatten)]
    pub kind: QuestionKind,
}

/// An ordered group of questions
#[derive(Debug, Clone, Serialize)]
pub struct Section {
    pub id: String,
    pub title: String,
    pub description: String,
    pub questions: Vec<Question>,
}

/// The full questionnaire
#[derive(Debug, Clone)]
pub struct Catalog {
    sections: Vec<Section>,
}

fn opt(value: &str, label: &str) -> ChoiceOption {
    ChoiceOption {
        value: value.to_string(),
        label: label.to_string(),
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Catalog {
    /// Build the standard LinkedIn strategy questionnaire
    pub fn standard() -> Self {
        let sections = vec![
            Section {
                id: "profile".into(),
                title: "Your Profile".into(),
                description: "Let's start with some basic information about you and your work."
                    .into(),
                questions: vec![Question {
                    id: "role".into(),
                    prompt: "What is your professional role?".into(),
                    description: None,
                    kind: QuestionKind::SingleChoice {
                        options: vec![
                            opt("executive", "Executive/C-Suite"),
                            opt("manager", "Manager/Director"),
                            opt("founder", "Founder/Entrepreneur"),
                            opt("consultant", "Consultant/Advisor"),
                            opt("specialist", "Specialist/Individual Contributor"),
                            opt("other", "Other"),
                        ],
                    },
                }],
            },
            Section {
                id: "goals".into(),
                title: "Goals".into(),
                description: "Let's understand what you want to achieve on LinkedIn.".into(),
                questions: vec![
                    Question {
                        id: "primaryGoal".into(),
                        prompt: "What is your primary LinkedIn goal?".into(),
                        description: None,
                        kind: QuestionKind::SingleChoice {
                            options: vec![
                                opt("thoughtLeadership", "Thought Leadership"),
                                opt("leadGeneration", "Lead Generation"),
                                opt("careerGrowth", "Career Growth"),
                                opt("communityBuilding", "Community Building"),
                                opt("brandAwareness", "PR/Brand Awareness"),
                            ],
                        },
                    },
                    Question {
                        id: "targetAudience".into(),
                        prompt: "Which audience are you primarily trying to reach on LinkedIn?"
                            .into(),
                        description: None,
                        kind: QuestionKind::SingleChoice {
                            options: vec![
                                opt("executives", "Senior Executives & Decision Makers"),
                                opt("peers", "Industry Peers & Colleagues"),
                                opt("clients", "Potential Clients & Customers"),
                                opt("recruiters", "Recruiters & Hiring Managers"),
                                opt("investors", "Investors & Stakeholders"),
                            ],
                        },
                    },
                    Question {
                        id: "commercialObjectives".into(),
                        prompt: "What commercial objectives do you have?".into(),
                        description: None,
                        kind: QuestionKind::SingleChoice {
                            options: vec![
                                opt("driveSales", "Drive Sales"),
                                opt("attractJobOffers", "Attract Job Offers"),
                                opt("secureFunding", "Secure Funding"),
                                opt("establishCredibility", "Establish Credibility"),
                                opt("expandNetwork", "Expand Professional Network"),
                            ],
                        },
                    },
                ],
            },
            Section {
                id: "audience".into(),
                title: "Understanding Your Audience".into(),
                description:
                    "Let's identify who you're speaking to and what matters most to them.".into(),
                questions: vec![
                    Question {
                        id: "audienceChallenges".into(),
                        prompt: "What are the biggest challenges your audience faces?".into(),
                        description: Some(
                            "Identify the key struggles your audience encounters.".into(),
                        ),
                        kind: QuestionKind::TagList {
                            min_selections: Some(2),
                            max_selections: Some(3),
                            suggestions: strings(&[
                                "Scaling their business",
                                "Generating consistent leads",
                                "Navigating industry changes",
                                "Managing remote teams",
                                "Breaking into leadership roles",
                            ]),
                        },
                    },
                    Question {
                        id: "audienceGoals".into(),
                        prompt: "What are the primary goals your audience wants to achieve?".into(),
                        description: Some(
                            "Determine the aspirations that drive your audience forward.".into(),
                        ),
                        kind: QuestionKind::TagList {
                            min_selections: Some(2),
                            max_selections: Some(3),
                            suggestions: strings(&[
                                "Building a strong personal brand",
                                "Getting promoted to leadership",
                                "Raising funding for their startup",
                                "Becoming a sought-after speaker",
                                "Mastering digital marketing",
                            ]),
                        },
                    },
                ],
            },
            Section {
                id: "persona".into(),
                title: "Executive Persona & Positioning".into(),
                description: "Let's define how you want to be perceived on LinkedIn.".into(),
                questions: vec![
                    Question {
                        id: "uniquePerspective".into(),
                        prompt: "How do you naturally express your insights?".into(),
                        description: Some(
                            "Define the style in which you communicate your expertise.".into(),
                        ),
                        kind: QuestionKind::SingleChoice {
                            options: vec![
                                opt(
                                    "analytical",
                                    "Analytical (Breaks down complex ideas with logic & data)",
                                ),
                                opt(
                                    "inspiring",
                                    "Inspiring (Motivates with personal stories & big-picture thinking)",
                                ),
                                opt(
                                    "challenging",
                                    "Challenging (Questions norms & disrupts industry beliefs)",
                                ),
                                opt(
                                    "informative",
                                    "Informative (Provides structured knowledge through education & tutorials)",
                                ),
                            ],
                        },
                    },
                    Question {
                        id: "contentPillars".into(),
                        prompt: "What topics do you consistently post about?".into(),
                        description: Some(
                            "Define the recurring themes that shape your LinkedIn content.".into(),
                        ),
                        kind: QuestionKind::TagList {
                            min_selections: Some(2),
                            max_selections: Some(3),
                            suggestions: strings(&[
                                "Startup Growth & Bootstrapping",
                                "AI in Marketing & Tech Trends",
                                "Leadership & Team Building",
                                "Personal Branding & Career Growth",
                                "Fundraising & Investor Relations",
                                "Sales & Business Development",
                            ]),
                        },
                    },
                ],
            },
            Section {
                id: "content".into(),
                title: "Content Strategy".into(),
                description:
                    "Let's define how you'll structure and deliver your content on LinkedIn."
                        .into(),
                questions: vec![
                    Question {
                        id: "contentTypes".into(),
                        prompt: "What content types do you want to create?".into(),
                        description: Some(
                            "Pick at least two content types that match your style.".into(),
                        ),
                        kind: QuestionKind::MultiChoice {
                            options: vec![
                                opt("storytelling", "Storytelling (Personal experiences & insights)"),
                                opt(
                                    "controversial",
                                    "Controversial Takes (Challenging industry norms)",
                                ),
                                opt(
                                    "educational",
                                    "Educational How-To Guides (Step-by-step breakdowns)",
                                ),
                                opt("dataDriven", "Data-Driven Insights (Using research & stats)"),
                                opt(
                                    "engagement",
                                    "Engagement-Driven Posts (Polls, questions, carousels)",
                                ),
                                opt(
                                    "caseStudies",
                                    "Case Studies & Testimonials (Proof-based content)",
                                ),
                                opt(
                                    "promotional",
                                    "Promotional & Lead-Generation Posts (Sales-focused content)",
                                ),
                            ],
                            min_selections: Some(2),
                            max_selections: None,
                        },
                    },
                    Question {
                        id: "postingFrequency".into(),
                        prompt: "How often do you want to post each week?".into(),
                        description: Some(
                            "Choose a frequency that aligns with your goals and availability."
                                .into(),
                        ),
                        kind: QuestionKind::SingleChoice {
                            options: vec![
                                opt("1-2", "1-2 times per week"),
                                opt("3-4", "3-4 times per week"),
                                opt("5", "5 times per week"),
                            ],
                        },
                    },
                    Question {
                        id: "userVoice".into(),
                        prompt: "How should your content feel to your audience?".into(),
                        description: Some("Helps us understand your voice".into()),
                        kind: QuestionKind::SingleChoice {
                            options: vec![
                                opt("professional", "Professional & Insightful"),
                                opt("casual", "Casual & Conversational"),
                                opt("authoritative", "Authoritative & Bold"),
                                opt("storytelling", "Storytelling & Relatable"),
                            ],
                        },
                    },
                    Question {
                        id: "engagementStyle".into(),
                        prompt: "How do you prefer to engage with your LinkedIn audience?".into(),
                        description: Some(
                            "Pick at least one engagement type that matches your style.".into(),
                        ),
                        kind: QuestionKind::MultiChoice {
                            options: vec![
                                opt("commenting", "Commenting on industry posts"),
                                opt("polls", "Running polls & discussions"),
                                opt("DMs", "Building connections through DMs"),
                                opt("live", "Hosting LinkedIn Live sessions"),
                            ],
                            min_selections: Some(1),
                            max_selections: None,
                        },
                    },
                ],
            },
        ];

        Self { sections }
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn section(&self, index: usize) -> Option<&Section> {
        self.sections.get(index)
    }

    /// Look up a question at a (section, question) position
    pub fn question_at(&self, section_index: usize, question_index: usize) -> Option<&Question> {
        self.sections.get(section_index)?.questions.get(question_index)
    }

    /// Look up a question by id anywhere in the catalog
    pub fn question(&self, question_id: &str) -> Option<&Question> {
        self.sections
            .iter()
            .flat_map(|s| s.questions.iter())
            .find(|q| q.id == question_id)
    }

    /// Total question count across all sections
    pub fn total_questions(&self) -> usize {
        self.sections.iter().map(|s| s.questions.len()).sum()
    }

    /// Position of the last question of the last section
    pub fn last_position(&self) -> (usize, usize) {
        let section_index = self.sections.len().saturating_sub(1);
        let question_index = self
            .sections
            .last()
            .map(|s| s.questions.len().saturating_sub(1))
            .unwrap_or(0);
        (section_index, question_index)
    }

    /// Resolve a stored option value to its human-readable label
    ///
    /// Falls back to the raw value for free-text answers and unknown values.
    pub fn option_label(&self, question_id: &str, value: &str) -> String {
        let options = match self.question(question_id).map(|q| &q.kind) {
            Some(QuestionKind::SingleChoice { options }) => options,
            Some(QuestionKind::MultiChoice { options, .. }) => options,
            _ => return value.to_string(),
        };
        options
            .iter()
            .find(|o| o.value == value)
            .map(|o| o.label.clone())
            .unwrap_or_else(|| value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_question_ids_unique_across_catalog() {
        let catalog = Catalog::standard();
        let mut seen = HashSet::new();
        for section in catalog.sections() {
            for question in &section.questions {
                assert!(
                    seen.insert(question.id.clone()),
                    "duplicate question id: {}",
                    question.id
                );
            }
        }
    }

    #[test]
    fn test_every_section_non_empty() {
        let catalog = Catalog::standard();
        for section in catalog.sections() {
            assert!(!section.questions.is_empty(), "empty section: {}", section.id);
        }
    }

    #[test]
    fn test_total_questions_matches_sections() {
        let catalog = Catalog::standard();
        let counted: usize = catalog.sections().iter().map(|s| s.questions.len()).sum();
        assert_eq!(catalog.total_questions(), counted);
        assert_eq!(catalog.total_questions(), 12);
    }

    #[test]
    fn test_option_label_resolves_and_falls_back() {
        let catalog = Catalog::standard();
        assert_eq!(catalog.option_label("role", "founder"), "Founder/Entrepreneur");
        // Free text and unknown values pass through unchanged
        assert_eq!(catalog.option_label("role", "Fractional CTO"), "Fractional CTO");
        assert_eq!(catalog.option_label("audienceGoals", "Ship faster"), "Ship faster");
    }

    #[test]
    fn test_last_position() {
        let catalog = Catalog::standard();
        assert_eq!(catalog.last_position(), (4, 3));
    }
}
