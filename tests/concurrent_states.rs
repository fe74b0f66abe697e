//! Transitions into, out of and within concurrent regions.

use statechart::{StateBuilder, StatechartBuilder, StatechartManager};
use std::sync::{Arc, Mutex};

type Log = Arc<Mutex<Vec<String>>>;

fn tracked(name: &str, log: &Log) -> StateBuilder<&'static str> {
    let on_enter = Arc::clone(log);
    let on_exit = Arc::clone(log);
    let entered = format!("enter {name}");
    let exited = format!("exit {name}");
    StateBuilder::new(name)
        .on_enter(move |_| on_enter.lock().unwrap().push(entered.clone()))
        .on_exit(move |_| on_exit.lock().unwrap().push(exited.clone()))
}

/// root(P[concurrent](R1(X1, X2), R2(Y1, Y2)), Q)
fn chart(log: &Log) -> StatechartManager<&'static str> {
    StatechartBuilder::new()
        .root(
            StateBuilder::new("root")
                .substate(
                    tracked("P", log)
                        .concurrent()
                        .substate(
                            tracked("R1", log)
                                .substate(tracked("X1", log))
                                .substate(tracked("X2", log)),
                        )
                        .substate(
                            tracked("R2", log)
                                .substate(tracked("Y1", log))
                                .substate(tracked("Y2", log)),
                        ),
                )
                .substate(tracked("Q", log)),
        )
        .monitor_is_active(true)
        .build()
        .unwrap()
}

#[test]
fn initial_configuration_activates_every_region() {
    let log = Log::default();
    let chart = chart(&log);

    assert_eq!(chart.current_state_names(), vec!["X1", "Y1"]);
    assert_eq!(chart.current_state_count(), 2);
    assert_eq!(
        *log.lock().unwrap(),
        vec!["enter P", "enter R1", "enter X1", "enter R2", "enter Y1"]
    );
}

#[test]
fn transition_inside_one_region_leaves_the_other_alone() {
    let log = Log::default();
    let mut chart = chart(&log);
    log.lock().unwrap().clear();

    chart.goto_state("Y2", Some(&"tick")).unwrap();

    assert_eq!(chart.current_state_names(), vec!["X1", "Y2"]);
    assert_eq!(*log.lock().unwrap(), vec!["exit Y1", "enter Y2"]);
}

#[test]
fn leaving_the_concurrent_state_exits_each_region_deepest_first() {
    let log = Log::default();
    let mut chart = chart(&log);
    chart.goto_state("X2", None).unwrap();
    log.lock().unwrap().clear();

    chart.goto_state("Q", None).unwrap();

    assert_eq!(chart.current_state_names(), vec!["Q"]);
    assert_eq!(
        *log.lock().unwrap(),
        vec!["exit X2", "exit R1", "exit Y1", "exit R2", "exit P", "enter Q"]
    );
}

#[test]
fn entering_a_region_leaf_fills_sibling_regions_by_default() {
    let log = Log::default();
    let mut chart = chart(&log);
    chart.goto_state("Q", None).unwrap();
    log.lock().unwrap().clear();

    chart.goto_state("Y2", None).unwrap();

    assert_eq!(chart.current_state_names(), vec!["X1", "Y2"]);
    assert_eq!(
        *log.lock().unwrap(),
        vec!["exit Q", "enter P", "enter R1", "enter X1", "enter R2", "enter Y2"]
    );
}

#[test]
fn regions_remember_their_own_history() {
    let log = Log::default();
    let mut chart = chart(&log);
    chart.goto_state("X2", None).unwrap();
    chart.goto_state("Y2", None).unwrap();
    chart.goto_state("Q", None).unwrap();

    assert_eq!(chart.last_active_substate("R1"), Some("X2"));
    assert_eq!(chart.last_active_substate("R2"), Some("Y2"));
    assert_eq!(chart.last_active_substate("P"), None);

    chart.goto_history_state("R2", true, None).unwrap();

    assert_eq!(chart.current_state_names(), vec!["X1", "Y2"]);
}

#[test]
fn from_state_selects_the_origin_region() {
    let log = Log::default();
    let mut chart = chart(&log);
    log.lock().unwrap().clear();

    chart.goto_state_from("X2", "X1", None).unwrap();

    assert_eq!(chart.current_state_names(), vec!["X2", "Y1"]);
    assert_eq!(*log.lock().unwrap(), vec!["exit X1", "enter X2"]);
}

#[test]
fn monitor_log_matches_a_concurrent_pattern() {
    let log = Log::default();
    let mut chart = chart(&log);
    chart.goto_state("Q", None).unwrap();
    chart.reset_monitor();

    chart.goto_state("P", Some(&"resume")).unwrap();

    let monitor = chart.monitor().unwrap();
    let matched = monitor
        .matcher()
        .begin()
        .exited(["Q"])
        .entered(["P"])
        .begin_concurrent()
        .begin_sequence()
        .entered(["R2", "Y1"])
        .end_sequence()
        .begin_sequence()
        .entered(["R1", "X1"])
        .end_sequence()
        .end_concurrent()
        .end()
        .unwrap();
    assert!(matched);
    assert!(monitor.sequence().iter().all(|r| r.context == Some("resume")));
    assert!(monitor.matches_entered_states(["P", "R1", "X1", "R2", "Y1"]));
}

#[test]
fn recursive_history_recalls_every_region_of_a_nested_concurrent_state() {
    let mut chart: StatechartManager<&'static str> = StatechartBuilder::new()
        .root(
            StateBuilder::new("root")
                .substate(
                    StateBuilder::new("H")
                        .substate(
                            StateBuilder::new("P")
                                .concurrent()
                                .substate(
                                    StateBuilder::new("R1")
                                        .substate(StateBuilder::new("X1"))
                                        .substate(StateBuilder::new("X2")),
                                )
                                .substate(
                                    StateBuilder::new("R2")
                                        .substate(StateBuilder::new("Y1"))
                                        .substate(StateBuilder::new("Y2")),
                                ),
                        )
                        .substate(StateBuilder::new("Z")),
                )
                .substate(StateBuilder::new("Q")),
        )
        .build()
        .unwrap();
    chart.goto_state("X2", None).unwrap();
    chart.goto_state("Y2", None).unwrap();
    chart.goto_state("Q", None).unwrap();

    chart.goto_history_state("H", true, None).unwrap();
    assert_eq!(chart.current_state_names(), vec!["X2", "Y2"]);

    chart.goto_state("Q", None).unwrap();
    chart.goto_history_state("H", false, None).unwrap();
    assert_eq!(chart.current_state_names(), vec!["X1", "Y1"]);
}
