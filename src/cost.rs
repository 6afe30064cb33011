//! Schedule cost model.
//!
//! Tasks are executed back to back, without overlap, starting at time 0 in
//! the given order. For every task the finishing time is compared to its
//! deadline:
//!
//! ```text
//! t        += duration
//! lateness  = max(0, t - deadline)
//! cost     += w_deadline * lateness + w_difficulty * difficulty * lateness
//! ```
//!
//! Difficulty scales the lateness penalty multiplicatively: a late
//! difficulty-5 task costs five times the difficulty weight per hour.
//! Once the whole sequence is simulated, `w_makespan * t` is added as a
//! tie-breaker against needlessly long schedules.

use crate::task::Task;

/// Objective weights for [`compute_cost`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CostWeights {
    /// Penalty per hour of lateness.
    pub deadline: f64,

    /// Additional penalty per hour of lateness per difficulty point.
    pub difficulty: f64,

    /// Penalty per hour of total schedule length.
    pub makespan: f64,
}

impl Default for CostWeights {
    fn default() -> Self {
        Self {
            deadline: 5.0,
            difficulty: 2.5,
            makespan: 0.05,
        }
    }
}

/// Scores `order` against `tasks`. Lower is better.
///
/// Pure and total for any permutation of `0..tasks.len()`, including the
/// empty order (cost 0).
///
/// # Panics
///
/// Panics if `order` contains an index outside `tasks`.
pub fn compute_cost(order: &[usize], tasks: &[Task], weights: &CostWeights) -> f64 {
    let mut t = 0.0;
    let mut total = 0.0;

    for &idx in order {
        let task = &tasks[idx];
        t += task.duration;

        let lateness = (t - task.deadline).max(0.0);
        total += weights.deadline * lateness;
        total += weights.difficulty * f64::from(task.difficulty) * lateness;
    }

    total + weights.makespan * t
}

/// One task's slot in a simulated schedule.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ScheduledTask {
    /// 1-based position in the schedule.
    pub position: usize,
    /// Index into the original task list.
    pub index: usize,
    pub name: String,
    pub start: f64,
    pub end: f64,
    pub deadline: f64,
    pub lateness: f64,
    pub difficulty: u8,
}

/// Simulates `order` and reports start, end and lateness of every task.
///
/// Uses the same sequential execution model as [`compute_cost`].
pub fn schedule(order: &[usize], tasks: &[Task]) -> Vec<ScheduledTask> {
    let mut t = 0.0;
    order
        .iter()
        .enumerate()
        .map(|(pos, &idx)| {
            let task = &tasks[idx];
            let start = t;
            let end = start + task.duration;
            t = end;
            ScheduledTask {
                position: pos + 1,
                index: idx,
                name: task.name.clone(),
                start,
                end,
                deadline: task.deadline,
                lateness: (end - task.deadline).max(0.0),
                difficulty: task.difficulty,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn scenario_a() -> Vec<Task> {
        vec![Task::new("A", 2.0, 1.0, 1), Task::new("B", 1.0, 1.0, 5)]
    }

    #[test]
    fn test_scenario_a_late_order() {
        let cost = compute_cost(&[0, 1], &scenario_a(), &CostWeights::default());
        assert!((cost - 17.6).abs() < 1e-9, "got {cost}");
    }

    #[test]
    fn test_scenario_a_on_time_order() {
        let cost = compute_cost(&[1, 0], &scenario_a(), &CostWeights::default());
        assert!((cost - 0.1).abs() < 1e-9, "got {cost}");
    }

    #[test]
    fn test_empty_order_costs_nothing() {
        assert_eq!(compute_cost(&[], &[], &CostWeights::default()), 0.0);
    }

    #[test]
    fn test_difficulty_scales_lateness() {
        // One hour late; only the difficulty term is weighted.
        let weights = CostWeights {
            deadline: 0.0,
            difficulty: 1.0,
            makespan: 0.0,
        };
        let easy = vec![Task::new("e", 1.0, 2.0, 1)];
        let hard = vec![Task::new("h", 1.0, 2.0, 5)];
        let easy_cost = compute_cost(&[0], &easy, &weights);
        let hard_cost = compute_cost(&[0], &hard, &weights);
        assert!((hard_cost - 5.0 * easy_cost).abs() < 1e-12);
    }

    #[test]
    fn test_makespan_added_once() {
        let weights = CostWeights {
            deadline: 0.0,
            difficulty: 0.0,
            makespan: 1.0,
        };
        let tasks = vec![
            Task::new("a", 100.0, 1.5, 1),
            Task::new("b", 100.0, 2.5, 1),
        ];
        assert!((compute_cost(&[0, 1], &tasks, &weights) - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_schedule_breakdown() {
        let rows = schedule(&[0, 1], &scenario_a());
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].position, 1);
        assert_eq!(rows[0].name, "A");
        assert_eq!(rows[0].lateness, 0.0);
        assert_eq!(rows[1].start, 1.0);
        assert_eq!(rows[1].end, 2.0);
        assert!((rows[1].lateness - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_schedule_lateness_matches_cost() {
        let tasks = scenario_a();
        let weights = CostWeights::default();
        let rows = schedule(&[0, 1], &tasks);
        let rebuilt: f64 = rows
            .iter()
            .map(|r| {
                weights.deadline * r.lateness
                    + weights.difficulty * f64::from(r.difficulty) * r.lateness
            })
            .sum::<f64>()
            + weights.makespan * rows.last().map_or(0.0, |r| r.end);
        assert!((rebuilt - compute_cost(&[0, 1], &tasks, &weights)).abs() < 1e-9);
    }

    fn arb_tasks() -> impl Strategy<Value = Vec<Task>> {
        prop::collection::vec((0.0..48.0f64, 0.0..8.0f64, 1u8..=5), 0..12).prop_map(|rows| {
            rows.into_iter()
                .enumerate()
                .map(|(i, (deadline, duration, difficulty))| {
                    Task::new(format!("t{i}"), deadline, duration, difficulty)
                })
                .collect()
        })
    }

    proptest! {
        #[test]
        fn prop_cost_is_pure(tasks in arb_tasks()) {
            let order: Vec<usize> = (0..tasks.len()).rev().collect();
            let weights = CostWeights::default();
            let first = compute_cost(&order, &tasks, &weights);
            let second = compute_cost(&order, &tasks, &weights);
            prop_assert_eq!(first.to_bits(), second.to_bits());
        }

        #[test]
        fn prop_cost_at_least_makespan(tasks in arb_tasks()) {
            let order: Vec<usize> = (0..tasks.len()).collect();
            let weights = CostWeights::default();
            let makespan: f64 = tasks.iter().map(|t| t.duration).sum();
            prop_assert!(compute_cost(&order, &tasks, &weights) >= weights.makespan * makespan - 1e-9);
        }
    }
}
