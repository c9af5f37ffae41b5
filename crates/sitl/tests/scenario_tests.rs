use intrusion_alarm_core::{StatusEvent, TriggerState};
use intrusion_alarm_sitl::{
    OutputChange, Scenario, ScenarioRunner, SimulatorError, TimeMode, Timeline,
};

fn run(scenario: &Scenario) -> Timeline {
    ScenarioRunner::new(scenario).unwrap().run()
}

fn events_of(timeline: &Timeline, wanted: StatusEvent) -> Vec<u64> {
    timeline
        .events
        .iter()
        .filter(|timed| timed.event == wanted)
        .map(|timed| timed.at_ms)
        .collect()
}

/// Lamp and buzzer levels at the end of `at_ms`
fn outputs_at(timeline: &Timeline, at_ms: u64) -> (bool, bool) {
    timeline
        .outputs
        .iter()
        .take_while(|change| change.at_ms <= at_ms)
        .last()
        .map_or((false, false), |change| (change.lamp, change.buzzer))
}

fn intruder_scenario() -> Scenario {
    Scenario::new(75_000)
        .type_keys(500, "1234#")
        .distance(0, 200)
        .distance(5_000, 30)
        .distance(8_000, 200)
        .distance(66_000, 25)
        .type_keys(70_000, "1234#")
}

#[test]
fn test_intruder_timeline() {
    let timeline = run(&intruder_scenario());

    assert_eq!(timeline.cycles, 7_500);
    assert_eq!(events_of(&timeline, StatusEvent::Armed), vec![540]);
    assert_eq!(timeline.alarm_times(), vec![5_000, 66_000]);
    assert_eq!(events_of(&timeline, StatusEvent::CooldownFinished), vec![65_000]);
    assert_eq!(events_of(&timeline, StatusEvent::Disarmed), vec![70_040]);
    assert_eq!(timeline.buzzer_activations, 2);

    assert!(!timeline.final_armed);
    assert_eq!(timeline.final_trigger, TriggerState::Disarmed);
}

#[test]
fn test_outputs_follow_cooldown() {
    let timeline = run(&intruder_scenario());

    assert_eq!(outputs_at(&timeline, 4_990), (false, false));
    assert_eq!(outputs_at(&timeline, 5_000), (true, true));
    // Sensor clears at 8 s but the cooldown holds the outputs
    assert_eq!(outputs_at(&timeline, 30_000), (true, true));
    // Expiry cycle issues no command; the next cycle clears the outputs
    assert_eq!(outputs_at(&timeline, 65_000), (true, true));
    assert_eq!(outputs_at(&timeline, 65_010), (false, false));
    assert_eq!(outputs_at(&timeline, 66_000), (true, true));
    // Disarm mid-cooldown clears everything
    assert_eq!(outputs_at(&timeline, 70_030), (true, true));
    assert_eq!(outputs_at(&timeline, 70_040), (false, false));

    assert_eq!(
        timeline.outputs.last(),
        Some(&OutputChange {
            at_ms: 70_040,
            lamp: false,
            buzzer: false
        })
    );
}

#[test]
fn test_disarmed_system_ignores_intrusion() {
    let scenario = Scenario::new(2_000).distance(0, 10);
    let timeline = run(&scenario);

    assert!(timeline.alarm_times().is_empty());
    assert!(timeline.outputs.is_empty());
    assert_eq!(timeline.final_trigger, TriggerState::Disarmed);
}

#[test]
fn test_threshold_is_strict() {
    let scenario = Scenario::new(1_000)
        .type_keys(0, "1234#")
        .distance(0, 50)
        .distance(500, 49);
    let timeline = run(&scenario);

    assert_eq!(timeline.alarm_times(), vec![500]);
}

#[test]
fn test_wrong_code_then_reset() {
    let scenario = Scenario::new(3_000)
        .type_keys(100, "1235#")
        .type_keys(500, "*1234#")
        .distance(0, 120);
    let timeline = run(&scenario);

    assert_eq!(events_of(&timeline, StatusEvent::IncorrectCode), vec![140]);
    assert_eq!(events_of(&timeline, StatusEvent::CodeReset), vec![500]);
    assert_eq!(events_of(&timeline, StatusEvent::Armed), vec![550]);
    assert!(timeline.final_armed);
    assert_eq!(timeline.final_trigger, TriggerState::Monitoring);
}

#[test]
fn test_wrong_code_without_reset_stays_disarmed() {
    // A failed confirm keeps the full buffer, so the retry is dropped
    let scenario = Scenario::new(2_000)
        .type_keys(0, "9999#")
        .type_keys(500, "1234#");
    let timeline = run(&scenario);

    assert_eq!(events_of(&timeline, StatusEvent::IncorrectCode), vec![40, 540]);
    assert!(!timeline.final_armed);
}

#[test]
fn test_cooldown_across_counter_wrap() {
    // Trigger 10 s before the 32-bit millisecond counter wraps
    let mut scenario = Scenario::new(80_000)
        .type_keys(0, "1234#")
        .distance(0, 200)
        .distance(10_000, 30);
    scenario.boot_offset_ms = u32::MAX as u64 - 20_000;
    let timeline = run(&scenario);

    assert_eq!(events_of(&timeline, StatusEvent::CooldownFinished), vec![70_000]);
    assert_eq!(timeline.alarm_times(), vec![10_000, 70_010]);
}

#[test]
fn test_custom_config() {
    let mut scenario = Scenario::new(3_000)
        .type_keys(0, "A7#")
        .distance(0, 90)
        .distance(1_000, 70);
    scenario.config.reference_code = Some("A7".to_string());
    scenario.config.distance_threshold_cm = Some(80);
    scenario.config.cooldown_duration_ms = Some(500);
    let timeline = run(&scenario);

    assert_eq!(events_of(&timeline, StatusEvent::Armed), vec![20]);
    assert_eq!(timeline.alarm_times(), vec![1_000, 1_510, 2_020, 2_530]);
}

#[test]
fn test_invalid_scenario_rejected() {
    let mut scenario = Scenario::new(1_000);
    scenario.config.reference_code = Some(String::new());
    assert!(matches!(
        ScenarioRunner::new(&scenario),
        Err(SimulatorError::InvalidConfig(_))
    ));
}

#[test]
fn test_bundled_scenarios_load() {
    let dir = concat!(env!("CARGO_MANIFEST_DIR"), "/scenarios");

    let intruder = Scenario::load(format!("{dir}/intruder.json")).unwrap();
    let timeline = run(&intruder);
    assert_eq!(timeline.alarm_times(), vec![5_000, 66_000]);
    assert!(!timeline.final_armed);

    let wrong_code = Scenario::load(format!("{dir}/wrong_code.json")).unwrap();
    let timeline = run(&wrong_code);
    assert!(timeline.final_armed);
    assert!(timeline.alarm_times().is_empty());
}

#[test]
fn test_missing_file() {
    assert!(matches!(
        Scenario::load("does/not/exist.json"),
        Err(SimulatorError::Io(_))
    ));
}

#[tokio::test]
async fn test_paced_run_matches_free_running() {
    let scenario = Scenario::new(300)
        .type_keys(0, "1234#")
        .distance(100, 20);

    let paced = ScenarioRunner::new(&scenario)
        .unwrap()
        .run_paced(TimeMode::Scaled { factor: 100.0 })
        .await;
    let free = run(&scenario);

    assert_eq!(paced, free);
    assert_eq!(paced.alarm_times(), vec![100]);
}

#[tokio::test]
async fn test_extreme_speed_runs_unpaced() {
    let scenario = Scenario::new(300)
        .type_keys(0, "1234#")
        .distance(100, 20);
    let free = run(&scenario);

    for factor in [1e30, f32::MAX, f32::INFINITY, f32::NAN, 0.0, -2.0, 1e-40] {
        let paced = ScenarioRunner::new(&scenario)
            .unwrap()
            .run_paced(TimeMode::Scaled { factor })
            .await;
        assert_eq!(paced, free, "factor {factor}");
    }
}
