//! Kill leaderboard
//!
//! Side view fed from step events; never feeds back into the simulation.

use std::collections::HashMap;

use serde::Serialize;

use crate::sim::ArenaEvent;

/// Tally for one name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScoreEntry {
    pub name: String,
    pub kills: u32,
    pub deaths: u32,
}

#[derive(Debug, Clone, Default)]
pub struct Scoreboard {
    entries: HashMap<String, ScoreEntry>,
}

impl Scoreboard {
    pub fn new() -> Self {
        Self::default()
    }

    fn entry(&mut self, name: &str) -> &mut ScoreEntry {
        self.entries
            .entry(name.to_string())
            .or_insert_with(|| ScoreEntry {
                name: name.to_string(),
                ..Default::default()
            })
    }

    pub fn record(&mut self, event: &ArenaEvent) {
        match event {
            ArenaEvent::Killed { victim, killer } => {
                self.entry(killer).kills += 1;
                self.entry(victim).deaths += 1;
            }
        }
    }

    pub fn record_all<'a>(&mut self, events: impl IntoIterator<Item = &'a ArenaEvent>) {
        for event in events {
            self.record(event);
        }
    }

    pub fn get(&self, name: &str) -> Option<&ScoreEntry> {
        self.entries.get(name)
    }

    /// Top `n` by kills, ties broken by name
    pub fn leaders(&self, n: usize) -> Vec<ScoreEntry> {
        let mut ranked: Vec<_> = self.entries.values().filter(|e| e.kills > 0).cloned().collect();
        ranked.sort_by(|a, b| b.kills.cmp(&a.kills).then_with(|| a.name.cmp(&b.name)));
        ranked.truncate(n);
        ranked
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kill(victim: &str, killer: &str) -> ArenaEvent {
        ArenaEvent::Killed {
            victim: victim.to_string(),
            killer: killer.to_string(),
        }
    }

    #[test]
    fn test_tally() {
        let mut board = Scoreboard::new();
        board.record_all(&[kill("a", "b"), kill("c", "b"), kill("b", "a")]);

        assert_eq!(board.get("b").map(|e| (e.kills, e.deaths)), Some((2, 1)));
        assert_eq!(board.get("c").map(|e| (e.kills, e.deaths)), Some((0, 1)));
    }

    #[test]
    fn test_leaders_order() {
        let mut board = Scoreboard::new();
        board.record_all(&[kill("x", "zoe"), kill("y", "amy"), kill("z", "zoe"), kill("w", "bob")]);

        let names: Vec<_> = board.leaders(2).into_iter().map(|e| e.name).collect();
        assert_eq!(names, ["zoe", "amy"]);
        // Victims with no kills never rank
        assert_eq!(board.leaders(10).len(), 3);
    }

    #[test]
    fn test_empty_until_first_kill() {
        let mut board = Scoreboard::new();
        assert!(board.is_empty());
        assert!(board.leaders(5).is_empty());

        board.record(&kill("a", "b"));
        assert!(!board.is_empty());
        let json = serde_json::to_string(&board.leaders(1)).unwrap();
        assert_eq!(json, r#"[{"name":"b","kills":1,"deaths":0}]"#);
    }
}
