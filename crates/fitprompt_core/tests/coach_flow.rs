use fitprompt_core::db::open_db_in_memory;
use fitprompt_core::repo::profile_repo::{PROFILE_KEY, REPLY_KEY};
use fitprompt_core::{
    build_coaching_prompt, CoachError, CoachService, ExperienceLevel, FitnessGoal,
    FitnessProfile, KeyValueStore, KvProfileRepository, MemoryKeyValueStore, ProfileRepository,
    ProfileValidationError, RepoError, SqliteKeyValueStore,
};

fn sample_profile() -> FitnessProfile {
    FitnessProfile {
        display_name: "Sam".to_string(),
        age_years: 34,
        height_cm: 180,
        weight_kg: 81,
        goal: FitnessGoal::LoseFat,
        experience: ExperienceLevel::Intermediate,
        training_days_per_week: 4,
        session_minutes: 50,
        equipment: vec!["Dumbbells".to_string(), " dumbbells ".to_string()],
        limitations: Some("Old left knee injury".to_string()),
        notes: Some("Prefers morning sessions".to_string()),
    }
}

#[test]
fn save_profile_normalizes_and_persists() {
    let store = MemoryKeyValueStore::new();
    let service = CoachService::new(KvProfileRepository::new(&store));

    let saved = service.save_profile(&sample_profile()).unwrap();
    assert_eq!(saved.equipment, vec!["Dumbbells"]);

    let loaded = service.profile().unwrap().unwrap();
    assert_eq!(loaded, saved);
    assert!(store.get(PROFILE_KEY).unwrap().is_some());
}

#[test]
fn invalid_profile_is_never_written() {
    let store = MemoryKeyValueStore::new();
    let service = CoachService::new(KvProfileRepository::new(&store));

    let mut profile = sample_profile();
    profile.session_minutes = 500;

    let err = service.save_profile(&profile).unwrap_err();
    assert!(matches!(
        err,
        CoachError::Repo(RepoError::Validation(ProfileValidationError::OutOfRange {
            field: "session_minutes",
            ..
        }))
    ));
    assert!(store.is_empty());
}

#[test]
fn generate_prompt_requires_profile() {
    let service = CoachService::new(KvProfileRepository::new(MemoryKeyValueStore::new()));

    let err = service.generate_prompt().unwrap_err();
    assert!(matches!(err, CoachError::MissingProfile));
}

#[test]
fn generated_prompt_contains_every_profile_fact() {
    let service = CoachService::new(KvProfileRepository::new(MemoryKeyValueStore::new()));
    service.save_profile(&sample_profile()).unwrap();

    let prompt = service.generate_prompt().unwrap();
    for expected in [
        "- Name: Sam",
        "- Age: 34 years",
        "- Height: 180 cm",
        "- Weight: 81 kg (BMI 25.0)",
        "- Experience level: intermediate",
        "- Goal: lose body fat while keeping muscle",
        "- Training days per week: 4",
        "- Session length: 50 minutes",
        "- Dumbbells",
        "## Injuries and limitations",
        "Old left knee injury",
        "## Additional notes",
        "Prefers morning sessions",
        "## Response format",
    ] {
        assert!(prompt.contains(expected), "prompt missing `{expected}`:\n{prompt}");
    }
    assert!(!prompt.contains(" dumbbells "));
}

#[test]
fn prompt_is_deterministic_and_omits_empty_sections() {
    let mut profile = sample_profile();
    profile.equipment.clear();
    profile.limitations = None;
    profile.notes = Some("   ".to_string());

    let first = build_coaching_prompt(&profile);
    let second = build_coaching_prompt(&profile);
    assert_eq!(first, second);

    assert!(first.contains("- Bodyweight only (no equipment)"));
    assert!(!first.contains("## Injuries and limitations"));
    assert!(!first.contains("## Additional notes"));
    assert!(first.starts_with("You are an experienced personal trainer"));
}

#[test]
fn record_reply_trims_and_rejects_blank() {
    let store = MemoryKeyValueStore::new();
    let service = CoachService::new(KvProfileRepository::new(&store));

    assert!(matches!(
        service.record_reply(" \n ").unwrap_err(),
        CoachError::EmptyReply
    ));
    assert_eq!(store.get(REPLY_KEY).unwrap(), None);

    let reply = service
        .record_reply_at("\n  Day 1: squats 3x8\n", 1_700_000_000_000)
        .unwrap();
    assert_eq!(reply.body, "Day 1: squats 3x8");
    assert_eq!(reply.recorded_at_ms, 1_700_000_000_000);
    assert_eq!(service.latest_reply().unwrap(), Some(reply));
}

#[test]
fn newer_reply_replaces_older() {
    let service = CoachService::new(KvProfileRepository::new(MemoryKeyValueStore::new()));

    service.record_reply_at("first plan", 1).unwrap();
    service.record_reply_at("second plan", 2).unwrap();

    let latest = service.latest_reply().unwrap().unwrap();
    assert_eq!(latest.body, "second plan");
    assert_eq!(latest.recorded_at_ms, 2);
}

#[test]
fn record_reply_stamps_current_time() {
    let service = CoachService::new(KvProfileRepository::new(MemoryKeyValueStore::new()));
    let reply = service.record_reply("plan").unwrap();
    assert!(reply.recorded_at_ms > 1_600_000_000_000);
}

#[test]
fn reset_clears_profile_and_reply() {
    let store = MemoryKeyValueStore::new();
    store.set("darkMode", "false").unwrap();
    let service = CoachService::new(KvProfileRepository::new(&store));

    service.save_profile(&sample_profile()).unwrap();
    service.record_reply("plan").unwrap();
    service.reset().unwrap();

    assert_eq!(service.profile().unwrap(), None);
    assert_eq!(service.latest_reply().unwrap(), None);
    assert_eq!(store.get("darkMode").unwrap().as_deref(), Some("false"));
}

#[test]
fn corrupt_profile_document_is_reported() {
    let store = MemoryKeyValueStore::with_entries([(PROFILE_KEY, "{not json")]);
    let repo = KvProfileRepository::new(&store);

    let err = repo.load_profile().unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));
    assert!(err.to_string().contains(PROFILE_KEY));
}

#[test]
fn sqlite_backed_flow_round_trips() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKeyValueStore::new(&conn);
    let service = CoachService::new(KvProfileRepository::new(&store));

    let saved = service.save_profile(&sample_profile()).unwrap();
    service.record_reply_at("Week plan", 42).unwrap();

    let reopened = CoachService::new(KvProfileRepository::new(&store));
    assert_eq!(reopened.profile().unwrap(), Some(saved));
    assert_eq!(reopened.latest_reply().unwrap().unwrap().body, "Week plan");
    assert_eq!(
        store.keys().unwrap(),
        vec![REPLY_KEY.to_string(), PROFILE_KEY.to_string()]
    );
}
