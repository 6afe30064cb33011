//! Engine events and the sinks that consume them.
//!
//! The event stream is the contract between the engine and its front ends.
//! With the `serde` feature each event serializes as
//!
//! ```json
//! {"type": "progress", "data": {"iter": 50, "T": 95.0, "current_cost": 3.1, "best_cost": 2.4, "accepted": true}}
//! ```
//!
//! Type identifiers and payload field names are kept verbatim so existing
//! consumers of the JSON stream keep working.

/// A significant transition of an [`AnnealingEngine`](super::AnnealingEngine).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(tag = "type", content = "data", rename_all = "snake_case")
)]
pub enum Event {
    /// The run began. Carries the run parameters and the seed order's cost.
    Start {
        #[cfg_attr(feature = "serde", serde(rename = "T_max"))]
        t_max: f64,
        #[cfg_attr(feature = "serde", serde(rename = "T_min"))]
        t_min: f64,
        alpha: f64,
        #[cfg_attr(feature = "serde", serde(rename = "iter_per_T"))]
        iter_per_t: usize,
        initial_cost: f64,
    },

    /// The temperature was lowered.
    TempChange {
        #[cfg_attr(feature = "serde", serde(rename = "T"))]
        temperature: f64,
    },

    /// Periodic snapshot of the search.
    Progress {
        iter: usize,
        #[cfg_attr(feature = "serde", serde(rename = "T"))]
        temperature: f64,
        current_cost: f64,
        best_cost: f64,
        /// Whether the most recent move was accepted.
        accepted: bool,
    },

    /// The run reached `T_min`. Terminal.
    Finish {
        best_cost: f64,
        best_order: Vec<usize>,
        /// Task names in `best_order` order.
        best_schedule: Vec<String>,
    },

    /// The run could not begin. Terminal.
    Error { message: String },
}

impl Event {
    /// The wire identifier of this event's type.
    pub fn kind(&self) -> &'static str {
        match self {
            Event::Start { .. } => "start",
            Event::TempChange { .. } => "temp_change",
            Event::Progress { .. } => "progress",
            Event::Finish { .. } => "finish",
            Event::Error { .. } => "error",
        }
    }

    /// True for `finish` and `error`, after which no further events follow.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Event::Finish { .. } | Event::Error { .. })
    }
}

/// Receives engine events.
///
/// Headless and interactive front ends are independent implementations.
/// Any `FnMut(Event)` closure is a sink.
pub trait EventSink {
    fn receive(&mut self, event: Event);
}

impl<F: FnMut(Event)> EventSink for F {
    fn receive(&mut self, event: Event) {
        self(event)
    }
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl EventSink for NullSink {
    fn receive(&mut self, _event: Event) {}
}

/// Keeps every event in arrival order.
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    pub events: Vec<Event>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Events of the given wire type.
    pub fn of_kind<'a>(&'a self, kind: &'a str) -> impl Iterator<Item = &'a Event> + 'a {
        self.events.iter().filter(move |e| e.kind() == kind)
    }
}

impl EventSink for RecordingSink {
    fn receive(&mut self, event: Event) {
        self.events.push(event);
    }
}

#[cfg(feature = "serde")]
pub use json::JsonLinesSink;

#[cfg(feature = "serde")]
mod json {
    use super::{Event, EventSink};
    use std::io::Write;

    /// Writes each event as one JSON object per line, flushing after every
    /// event so a reading process sees progress immediately.
    ///
    /// Write failures are logged and counted; the run itself continues.
    #[derive(Debug)]
    pub struct JsonLinesSink<W: Write> {
        writer: W,
        failures: usize,
    }

    impl<W: Write> JsonLinesSink<W> {
        pub fn new(writer: W) -> Self {
            Self {
                writer,
                failures: 0,
            }
        }

        /// Number of events that could not be written.
        pub fn failures(&self) -> usize {
            self.failures
        }

        pub fn into_inner(self) -> W {
            self.writer
        }

        fn write_event(&mut self, event: &Event) -> std::io::Result<()> {
            serde_json::to_writer(&mut self.writer, event)?;
            self.writer.write_all(b"\n")?;
            self.writer.flush()
        }
    }

    impl<W: Write> EventSink for JsonLinesSink<W> {
        fn receive(&mut self, event: Event) {
            if let Err(err) = self.write_event(&event) {
                self.failures += 1;
                tracing::warn!(kind = event.kind(), error = %err, "failed to write event");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        assert_eq!(Event::TempChange { temperature: 1.0 }.kind(), "temp_change");
        assert_eq!(
            Event::Error {
                message: "x".into()
            }
            .kind(),
            "error"
        );
    }

    #[test]
    fn test_terminal() {
        assert!(Event::Error {
            message: String::new()
        }
        .is_terminal());
        assert!(!Event::TempChange { temperature: 1.0 }.is_terminal());
    }

    #[test]
    fn test_closure_sink() {
        let mut seen = Vec::new();
        {
            let mut sink = |e: Event| seen.push(e.kind());
            sink.receive(Event::TempChange { temperature: 2.0 });
        }
        assert_eq!(seen, vec!["temp_change"]);
    }

    #[test]
    fn test_recording_sink_filter() {
        let mut sink = RecordingSink::new();
        sink.receive(Event::TempChange { temperature: 2.0 });
        sink.receive(Event::TempChange { temperature: 1.0 });
        sink.receive(Event::Error {
            message: "boom".into(),
        });
        assert_eq!(sink.of_kind("temp_change").count(), 2);
        assert_eq!(sink.of_kind("error").count(), 1);
    }

    #[cfg(feature = "serde")]
    mod wire {
        use super::super::*;
        use serde_json::{json, Value};

        fn to_value(event: &Event) -> Value {
            serde_json::to_value(event).expect("serializable")
        }

        #[test]
        fn test_start_shape() {
            let event = Event::Start {
                t_max: 100.0,
                t_min: 0.1,
                alpha: 0.95,
                iter_per_t: 10,
                initial_cost: 17.6,
            };
            assert_eq!(
                to_value(&event),
                json!({
                    "type": "start",
                    "data": {"T_max": 100.0, "T_min": 0.1, "alpha": 0.95, "iter_per_T": 10, "initial_cost": 17.6}
                })
            );
        }

        #[test]
        fn test_temp_change_shape() {
            let event = Event::TempChange { temperature: 95.0 };
            assert_eq!(
                to_value(&event),
                json!({"type": "temp_change", "data": {"T": 95.0}})
            );
        }

        #[test]
        fn test_progress_shape() {
            let event = Event::Progress {
                iter: 50,
                temperature: 81.45,
                current_cost: 3.0,
                best_cost: 2.5,
                accepted: false,
            };
            assert_eq!(
                to_value(&event),
                json!({
                    "type": "progress",
                    "data": {"iter": 50, "T": 81.45, "current_cost": 3.0, "best_cost": 2.5, "accepted": false}
                })
            );
        }

        #[test]
        fn test_finish_and_error_shape() {
            let event = Event::Finish {
                best_cost: 0.1,
                best_order: vec![1, 0],
                best_schedule: vec!["B".into(), "A".into()],
            };
            assert_eq!(
                to_value(&event),
                json!({
                    "type": "finish",
                    "data": {"best_cost": 0.1, "best_order": [1, 0], "best_schedule": ["B", "A"]}
                })
            );
            let event = Event::Error {
                message: "no tasks".into(),
            };
            assert_eq!(
                to_value(&event),
                json!({"type": "error", "data": {"message": "no tasks"}})
            );
        }

        #[test]
        fn test_deserialize_round_trip() {
            let line = r#"{"type":"temp_change","data":{"T":12.5}}"#;
            let event: Event = serde_json::from_str(line).expect("valid event");
            assert_eq!(event, Event::TempChange { temperature: 12.5 });
        }

        #[test]
        fn test_json_lines_sink() {
            let mut sink = JsonLinesSink::new(Vec::new());
            sink.receive(Event::TempChange { temperature: 1.0 });
            sink.receive(Event::Error {
                message: "x".into(),
            });
            assert_eq!(sink.failures(), 0);
            let text = String::from_utf8(sink.into_inner()).expect("utf8");
            let lines: Vec<&str> = text.lines().collect();
            assert_eq!(lines.len(), 2);
            assert!(lines[0].starts_with(r#"{"type":"temp_change""#));
        }
    }
}
