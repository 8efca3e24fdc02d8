//! Profile-to-prompt rendering for the coaching chat.
//!
//! # Invariants
//! - Output is deterministic for a given profile.
//! - The profile is normalized before rendering, so whitespace noise and
//!   duplicate equipment never reach the prompt.

use crate::model::profile::FitnessProfile;

const ROLE_LINE: &str =
    "You are an experienced personal trainer and nutrition coach.";
const TASK_LINE: &str =
    "Design a one-week training plan and short nutrition guidance for the client described below.";
const BODYWEIGHT_ONLY: &str = "Bodyweight only (no equipment)";

const RESPONSE_FORMAT: &[&str] = &[
    "1. A day-by-day weekly schedule matching the available training days.",
    "2. For each session: exercises, sets, reps or duration, and rest periods.",
    "3. Warm-up and cool-down guidance.",
    "4. Nutrition guidance aligned with the goal.",
    "5. How to progress over the next four weeks.",
];

/// Renders the full coaching prompt for `profile`.
///
/// Callers are expected to pass a validated profile; rendering itself never
/// fails.
pub fn build_coaching_prompt(profile: &FitnessProfile) -> String {
    let profile = profile.normalized();
    let mut lines: Vec<String> = vec![ROLE_LINE.to_string(), TASK_LINE.to_string()];

    push_section(
        &mut lines,
        "Client profile",
        vec![
            format!("- Name: {}", profile.display_name),
            format!("- Age: {} years", profile.age_years),
            format!("- Height: {} cm", profile.height_cm),
            format!("- Weight: {} kg (BMI {:.1})", profile.weight_kg, profile.bmi()),
            format!("- Experience level: {}", profile.experience.as_str()),
            format!("- Goal: {}", profile.goal.describe()),
        ],
    );

    push_section(
        &mut lines,
        "Schedule",
        vec![
            format!(
                "- Training days per week: {}",
                profile.training_days_per_week
            ),
            format!("- Session length: {} minutes", profile.session_minutes),
        ],
    );

    let equipment = if profile.equipment.is_empty() {
        vec![format!("- {BODYWEIGHT_ONLY}")]
    } else {
        profile
            .equipment
            .iter()
            .map(|item| format!("- {item}"))
            .collect()
    };
    push_section(&mut lines, "Available equipment", equipment);

    if let Some(limitations) = profile.limitations.as_deref() {
        push_section(
            &mut lines,
            "Injuries and limitations",
            vec![
                limitations.to_string(),
                "Avoid exercises that aggravate these and suggest safe alternatives.".to_string(),
            ],
        );
    }

    if let Some(notes) = profile.notes.as_deref() {
        push_section(&mut lines, "Additional notes", vec![notes.to_string()]);
    }

    push_section(
        &mut lines,
        "Response format",
        RESPONSE_FORMAT.iter().map(|line| (*line).to_string()).collect(),
    );

    lines.join("\n")
}

fn push_section(lines: &mut Vec<String>, title: &str, body: Vec<String>) {
    lines.push(String::new());
    lines.push(format!("## {title}"));
    lines.extend(body);
}
