//! Property tests over random request batches on the stock day.

use dayplan_engine::{PlanConfig, ScheduleEngine, TaskRequest, TimeWindow};
use proptest::prelude::*;

fn task_batch() -> impl Strategy<Value = Vec<TaskRequest>> {
    let request = (
        1u32..=300,
        prop::option::of(prop::sample::select(TimeWindow::ALL.to_vec())),
        1u8..=4,
    );
    prop::collection::vec(request, 0..14).prop_map(|specs| {
        specs
            .into_iter()
            .enumerate()
            .map(|(i, (duration, window, priority))| {
                TaskRequest::new(format!("task-{i}"), duration, window, priority)
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn prop_schedule_is_valid_and_overlap_free(tasks in task_batch()) {
        let engine = ScheduleEngine::new(PlanConfig::default()).unwrap();
        let plan = engine.plan(&tasks).unwrap();

        prop_assert!(plan.validation.is_valid, "errors: {:?}", plan.validation.errors);
        let entries = &plan.schedule.scheduled_tasks;
        for (i, a) in entries.iter().enumerate() {
            for b in &entries[i + 1..] {
                prop_assert!(!a.interval().overlaps_with(&b.interval()), "{} vs {}", a.name, b.name);
            }
        }
    }

    #[test]
    fn prop_cap_is_never_exceeded(tasks in task_batch()) {
        let config = PlanConfig::default();
        let cap = config.max_tasks_per_day;
        let engine = ScheduleEngine::new(config).unwrap();
        let result = engine.schedule(&tasks).unwrap();

        prop_assert!(result.placed_tasks().count() <= cap);
    }

    #[test]
    fn prop_every_request_accounted_for_once(tasks in task_batch()) {
        let engine = ScheduleEngine::new(PlanConfig::default()).unwrap();
        let result = engine.schedule(&tasks).unwrap();

        let mut names: Vec<&str> = result
            .placed_tasks()
            .map(|t| t.name.as_str())
            .chain(result.remaining_tasks.iter().map(|t| t.name.as_str()))
            .collect();
        names.sort_unstable();
        let mut expected: Vec<&str> = tasks.iter().map(|t| t.name.as_str()).collect();
        expected.sort_unstable();
        prop_assert_eq!(names, expected);
        prop_assert_eq!(result.total_remaining, result.remaining_tasks.len());
        prop_assert_eq!(result.total_scheduled, result.scheduled_tasks.len());
    }

    #[test]
    fn prop_placed_tasks_sit_inside_initial_free_time(tasks in task_batch()) {
        let engine = ScheduleEngine::new(PlanConfig::default()).unwrap();
        let result = engine.schedule(&tasks).unwrap();

        for task in result.placed_tasks() {
            prop_assert_eq!(task.interval().duration_minutes(), task.duration_minutes);
            prop_assert!(engine
                .available_slots()
                .iter()
                .any(|slot| slot.contains(task.start_time)
                    && slot.contains(task.end_time)
                    && slot.duration_minutes() >= task.duration_minutes));
        }
    }

    #[test]
    fn prop_scheduling_is_deterministic(tasks in task_batch()) {
        let engine = ScheduleEngine::new(PlanConfig::default()).unwrap();
        prop_assert_eq!(engine.plan(&tasks).unwrap(), engine.plan(&tasks).unwrap());
    }
}
