//! JSON documents exchanged with the engine bridge.
//!
//! Field names follow the engine's percept (`turn_number`, `cur_pos`,
//! `cake_width`, `cake_len`, `polygons`, `requests`).

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use cakecut::agent::Action;
use cakecut::geom2::{Piece, Tray};
use cakecut::plan::{Direction, MoveQueue, Phase, PlanState};
use nalgebra::Vector2;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

pub type Pair = [f64; 2];

#[inline]
pub fn pair(v: Vector2<f64>) -> Pair {
    [v.x, v.y]
}

#[inline]
pub fn vec2(p: Pair) -> Vector2<f64> {
    Vector2::new(p[0], p[1])
}

pub fn pieces_from(polygons: &[Vec<Pair>]) -> Vec<Piece> {
    polygons
        .iter()
        .map(|ring| Piece::new(ring.iter().copied().map(vec2).collect()))
        .collect()
}

/// One engine turn.
#[derive(Clone, Debug, Deserialize)]
pub struct PerceptDoc {
    pub turn_number: u32,
    pub cur_pos: Pair,
    pub cake_width: f64,
    pub cake_len: f64,
    #[serde(default)]
    pub polygons: Vec<Vec<Pair>>,
    pub requests: Vec<f64>,
}

impl PerceptDoc {
    pub fn tray(&self) -> Result<Tray> {
        Ok(Tray::new(self.cake_width, self.cake_len)?)
    }
}

/// Input of the `assign` command.
#[derive(Clone, Debug, Deserialize)]
pub struct AssignDoc {
    pub polygons: Vec<Vec<Pair>>,
    pub requests: Vec<f64>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseDoc {
    #[default]
    Horizontal,
    Vertical,
    Done,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DirectionDoc {
    #[default]
    Undetermined,
    Left,
    Right,
}

/// `PlanState` persisted between engine turns.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StateDoc {
    #[serde(default)]
    pub phase: PhaseDoc,
    #[serde(default)]
    pub direction: DirectionDoc,
    #[serde(default)]
    pub queue: Vec<Pair>,
    #[serde(default)]
    pub assigned: bool,
}

impl StateDoc {
    pub fn from_state(s: &PlanState) -> Self {
        Self {
            phase: match s.phase {
                Phase::Horizontal => PhaseDoc::Horizontal,
                Phase::Vertical => PhaseDoc::Vertical,
                Phase::Done => PhaseDoc::Done,
            },
            direction: match s.direction {
                Direction::Undetermined => DirectionDoc::Undetermined,
                Direction::Left => DirectionDoc::Left,
                Direction::Right => DirectionDoc::Right,
            },
            queue: s.queue.iter().copied().map(pair).collect(),
            assigned: s.assigned,
        }
    }

    /// Rebuild the state; queued moves are re-checked against the tray.
    pub fn into_state(self, tray: &Tray) -> Result<PlanState> {
        let mut queue = MoveQueue::default();
        for (i, p) in self.queue.iter().enumerate() {
            let v = vec2(*p);
            if !tray.contains(v) {
                anyhow::bail!("queued move {i} at {p:?} lies outside the tray");
            }
            queue.push(tray, v);
        }
        Ok(PlanState {
            phase: match self.phase {
                PhaseDoc::Horizontal => Phase::Horizontal,
                PhaseDoc::Vertical => Phase::Vertical,
                PhaseDoc::Done => Phase::Done,
            },
            direction: match self.direction {
                DirectionDoc::Undetermined => Direction::Undetermined,
                DirectionDoc::Left => Direction::Left,
                DirectionDoc::Right => Direction::Right,
            },
            queue,
            assigned: self.assigned,
        })
    }
}

/// Engine-facing action: `{"action": "CUT", "value": [x, y]}` or
/// `{"action": "ASSIGN", "value": [0, -1, ...]}`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ActionDoc {
    pub action: &'static str,
    pub value: ActionValue,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ActionValue {
    Pos(Pair),
    Assignment(Vec<i64>),
}

impl From<&Action> for ActionDoc {
    fn from(a: &Action) -> Self {
        let value = match a {
            Action::Init(p) | Action::Cut(p) => ActionValue::Pos(pair(*p)),
            Action::Assign(assignment) => ActionValue::Assignment(assignment.to_wire()),
        };
        Self {
            action: a.code(),
            value,
        }
    }
}

pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let bytes = fs::read(path)
        .with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_slice(&bytes).with_context(|| format!("parsing {}", path.display()))
}

pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating dir {}", parent.display()))?;
        }
    }
    fs::write(path, serde_json::to_vec_pretty(value)?)
        .with_context(|| format!("writing {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cakecut::assign::Assignment;
    use cakecut::geom2::Shape;
    use tempfile::tempdir;

    #[test]
    fn percept_parses_engine_fields() {
        let doc: PerceptDoc = serde_json::from_str(
            r#"{"turn_number": 3, "cur_pos": [0, 12.5], "cake_width": 40, "cake_len": 25,
                "polygons": [[[0,0],[10,0],[10,10],[0,10]]], "requests": [100, 50.5]}"#,
        )
        .unwrap();
        assert_eq!(doc.turn_number, 3);
        assert_eq!(doc.tray().unwrap().width(), 40.0);
        let pieces = pieces_from(&doc.polygons);
        assert_eq!(pieces.len(), 1);
        assert!((pieces[0].area() - 100.0).abs() < 1e-12);
    }

    #[test]
    fn percept_with_bad_tray_is_rejected() {
        let doc: PerceptDoc = serde_json::from_str(
            r#"{"turn_number": 1, "cur_pos": [0, 0], "cake_width": 0, "cake_len": 25, "requests": []}"#,
        )
        .unwrap();
        assert!(doc.polygons.is_empty());
        assert!(doc.tray().is_err());
    }

    #[test]
    fn state_survives_a_file_round_trip() {
        let tray = Tray::new(100.0, 100.0).unwrap();
        let mut state = PlanState::default();
        state.enter(Phase::Vertical);
        state.direction = Direction::Right;
        state.queue.push(&tray, Vector2::new(99.99, 100.0));
        state.queue.push(&tray, Vector2::new(50.0, 0.0));

        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/state.json");
        write_json(&path, &StateDoc::from_state(&state)).unwrap();
        let raw: serde_json::Value = read_json(&path).unwrap();
        assert_eq!(raw["phase"], "vertical");
        assert_eq!(raw["direction"], "right");

        let back: StateDoc = read_json(&path).unwrap();
        assert_eq!(back.into_state(&tray).unwrap(), state);
    }

    #[test]
    fn queued_moves_off_the_tray_are_an_error() {
        let tray = Tray::new(10.0, 10.0).unwrap();
        let doc = StateDoc {
            queue: vec![[0.0, 5.0], [11.0, 5.0]],
            ..StateDoc::default()
        };
        assert!(doc.into_state(&tray).is_err());
    }

    #[test]
    fn actions_serialize_in_engine_form() {
        let cut = ActionDoc::from(&Action::Cut(Vector2::new(0.0, 50.0)));
        assert_eq!(
            serde_json::to_value(&cut).unwrap(),
            serde_json::json!({"action": "CUT", "value": [0.0, 50.0]})
        );
        let assign = ActionDoc::from(&Action::Assign(Assignment::from(vec![Some(2), None])));
        assert_eq!(
            serde_json::to_value(&assign).unwrap(),
            serde_json::json!({"action": "ASSIGN", "value": [2, -1]})
        );
    }
}
