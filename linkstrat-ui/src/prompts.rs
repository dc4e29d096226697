//! Prompt construction for the generation endpoints
//!
//! Pure formatting: deterministic string templates built from the collected
//! answers. Stored option values are resolved to their readable labels
//! through the catalog before being embedded.

use crate::calendar::CALENDAR_MARKER;
use crate::catalog::Catalog;
use crate::wizard::answers::{AnswerStore, AnswerValue};

const NOT_SPECIFIED: &str = "Not specified";

/// Readable form of a single-choice answer, falling back to the raw value
fn readable(answers: &AnswerStore, catalog: &Catalog, question_id: &str) -> String {
    match answers.get(question_id) {
        Some(AnswerValue::Text(value)) => catalog.option_label(question_id, value),
        Some(AnswerValue::List(_)) | None => NOT_SPECIFIED.to_string(),
    }
}

/// List answer rendered as `- item` lines
fn bullet_list(answers: &AnswerStore, question_id: &str) -> String {
    match answers.get(question_id) {
        Some(AnswerValue::List(items)) if !items.is_empty() => items
            .iter()
            .map(|item| format!("- {}", item))
            .collect::<Vec<_>>()
            .join("\n"),
        _ => NOT_SPECIFIED.to_string(),
    }
}

/// List answer rendered as numbered readable labels
fn numbered_labels(answers: &AnswerStore, catalog: &Catalog, question_id: &str) -> String {
    match answers.get(question_id) {
        Some(AnswerValue::List(items)) if !items.is_empty() => items
            .iter()
            .enumerate()
            .map(|(i, value)| format!("{}. {}", i + 1, catalog.option_label(question_id, value)))
            .collect::<Vec<_>>()
            .join("\n"),
        _ => NOT_SPECIFIED.to_string(),
    }
}

/// Posts per week derived from the posting-frequency answer
fn posts_per_week(answers: &AnswerStore) -> &'static str {
    match answers.get("postingFrequency") {
        Some(AnswerValue::Text(v)) if v == "1-2" => "2",
        Some(AnswerValue::Text(v)) if v == "3-4" => "4",
        Some(AnswerValue::Text(v)) if v == "5" => "5",
        _ => "3",
    }
}

/// Shared profile block embedded in both stage prompts
fn profile_block(answers: &AnswerStore, catalog: &Catalog) -> String {
    format!(
        "### Comprehensive User Profile\n\
         * Professional Role: {role}\n\
         * Primary LinkedIn Goal: {goal}\n\
         * Target Audience: {audience}\n\
         * Commercial Objectives: {objectives}\n\
         * Communication Style: {perspective}\n\
         * Content Tone/Feel: {voice}\n\
         * Posting Frequency: {frequency}\n\
         \n\
         ### Audience Insights\n\
         * Pain Points/Challenges:\n{challenges}\n\
         * Goals:\n{audience_goals}\n\
         \n\
         ### Content Strategy Foundation\n\
         * Content Pillars:\n{pillars}\n\
         * Preferred Content Types:\n{content_types}\n\
         * Engagement Preferences:\n{engagement}",
        role = readable(answers, catalog, "role"),
        goal = readable(answers, catalog, "primaryGoal"),
        audience = readable(answers, catalog, "targetAudience"),
        objectives = readable(answers, catalog, "commercialObjectives"),
        perspective = readable(answers, catalog, "uniquePerspective"),
        voice = readable(answers, catalog, "userVoice"),
        frequency = readable(answers, catalog, "postingFrequency"),
        challenges = bullet_list(answers, "audienceChallenges"),
        audience_goals = bullet_list(answers, "audienceGoals"),
        pillars = bullet_list(answers, "contentPillars"),
        content_types = numbered_labels(answers, catalog, "contentTypes"),
        engagement = numbered_labels(answers, catalog, "engagementStyle"),
    )
}

/// Prompt for the strategic foundation stage
pub fn foundation_prompt(answers: &AnswerStore, catalog: &Catalog) -> String {
    format!(
        "You are a LinkedIn strategy expert who helps executives and professionals build \
         their personal brand on LinkedIn.\n\
         \n\
         {profile}\n\
         \n\
         ### Task\n\
         Based on this user profile, create the strategic foundation for their LinkedIn presence:\n\
         \n\
         ## STRATEGIC FOUNDATION\n\
         1. **Executive Positioning Summary**: A compelling paragraph describing how the user \
         should position themselves on LinkedIn based on their goals, expertise, and target audience.\n\
         \n\
         2. **Content Pillars Analysis**: For each of the user's content pillars, provide:\n\
         \x20  - Clear definition of the pillar and its scope\n\
         \x20  - Why this pillar will resonate with their target audience\n\
         \x20  - How this pillar supports their primary goal\n\
         \x20  - 3 specific content ideas for this pillar\n\
         \n\
         3. **Engagement Strategy**: Tactical recommendations for how they should engage with \
         their audience based on their preferences.\n\
         \n\
         4. **Growth & Measurement Plan**: Specific metrics to track based on their primary \
         goals and realistic growth targets.\n\
         \n\
         ### Output Formatting\n\
         - Format your response as clean, readable markdown\n\
         - Use headers, subheaders, and bullet points for clarity\n\
         - Ensure every recommendation is specific and actionable\n\
         - Keep the strategy both strategic and practical\n\
         \n\
         Make this strategic foundation something the user can implement immediately to build \
         their LinkedIn presence.",
        profile = profile_block(answers, catalog),
    )
}

/// Prompt for the content calendar stage; depends on the foundation text
pub fn calendar_prompt(answers: &AnswerStore, catalog: &Catalog, foundation: &str) -> String {
    format!(
        "You are a LinkedIn strategy expert who helps executives and professionals build \
         their personal brand on LinkedIn.\n\
         \n\
         {profile}\n\
         \n\
         ### Strategic Foundation (already agreed with the user)\n\
         {foundation}\n\
         \n\
         ### Task\n\
         Create a detailed 4-week content plan with {per_week} posts per week (Monday-Friday), \
         building directly on the strategic foundation above.\n\
         \n\
         Start the calendar section with exactly this heading:\n\
         {marker}\n\
         \n\
         Format the content plan as a clear markdown table with these columns:\n\
         | Week - Day | Pillar | Topic | Approach | Content Type |\n\
         | ---------- | ------ | ----- | -------- | ------------ |\n\
         | Week 1 - Monday | Pillar Name | Topic description | Detailed approach | Format details |\n\
         \n\
         In the 'Approach' column, explain the specific angle the post will take (educational, \
         case study, myth-busting, etc.) with details on what points it will cover.\n\
         \n\
         In the 'Content Type' column, specify both the format (text, carousel, image, etc.) \
         and what specific elements the content should include.\n\
         \n\
         Include at least one promotional post per week and one value-add resource (checklist, \
         template, guide, etc.) per week.\n\
         \n\
         ### Output Formatting\n\
         - Format your response as clean, readable markdown\n\
         - Make all tables properly formatted with markdown syntax\n\
         - Ensure every recommendation is specific and actionable",
        profile = profile_block(answers, catalog),
        foundation = foundation,
        per_week = posts_per_week(answers),
        marker = CALENDAR_MARKER,
    )
}

/// Inputs for a single ready-to-post generation
#[derive(Debug, Clone)]
pub struct PostRequest {
    pub pillar: String,
    pub topic: String,
    pub approach: String,
    pub content_type: String,
    pub user_voice: String,
    pub unique_perspective: String,
}

/// Prompt for one ready-to-post LinkedIn post from a calendar row
pub fn post_prompt(request: &PostRequest, catalog: &Catalog) -> String {
    let voice_label = catalog.option_label("userVoice", &request.user_voice);
    let perspective_label = catalog.option_label("uniquePerspective", &request.unique_perspective);

    format!(
        "You are a LinkedIn content creation expert. Create a ready-to-post LinkedIn post \
         based on the following details:\n\
         PILLAR: {pillar}\n\
         TOPIC: {topic}\n\
         APPROACH: {approach}\n\
         CONTENT TYPE: {content_type}\n\
         \n\
         USER'S COMMUNICATION STYLE: {perspective}\n\
         USER'S DESIRED TONE: {voice}\n\
         \n\
         Your task is to create a complete, ready-to-post LinkedIn post in the specified format.\n\
         The post should:\n\
         1. Be engaging and professional\n\
         2. Follow the specified approach exactly\n\
         3. Match the content type format\n\
         4. Include appropriate hashtags (3-5)\n\
         5. Have a clear call-to-action\n\
         6. CRITICALLY IMPORTANT: Match the user's communication style and tone specified above\n\
         \n\
         IMPORTANT: Do NOT include any introductory text or instructions. Start directly with \
         the LinkedIn post content.\n\
         \n\
         Format the response as a complete LinkedIn post, ready to copy and paste.",
        pillar = request.pillar,
        topic = request.topic,
        approach = request.approach,
        content_type = request.content_type,
        perspective = perspective_label,
        voice = voice_label,
    )
}
