//! Events and the bounded event log

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::core::types::{FactionId, Tick};

/// A notable occurrence during a tick
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: u64,
    pub tick: Tick,
    pub event_type: EventType,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventType {
    // Territory
    Capture {
        x: usize,
        y: usize,
        attacker: FactionId,
        defender: FactionId,
    },
    Uprising {
        x: usize,
        y: usize,
        faction: FactionId,
    },
    Revolt {
        x: usize,
        y: usize,
        faction: FactionId,
    },

    // Faction dynamics
    MoraleBoostGained { faction: FactionId },
    AllianceFormed { members: (FactionId, FactionId) },
    AllianceDissolved { members: (FactionId, FactionId) },
    Eliminated { faction: FactionId },

    // Terminal
    Victory { faction: FactionId },
}

impl EventType {
    pub fn involves(&self, id: FactionId) -> bool {
        match self {
            EventType::Capture {
                attacker, defender, ..
            } => *attacker == id || *defender == id,
            EventType::Uprising { faction, .. }
            | EventType::Revolt { faction, .. }
            | EventType::MoraleBoostGained { faction }
            | EventType::Eliminated { faction }
            | EventType::Victory { faction } => *faction == id,
            EventType::AllianceFormed { members } | EventType::AllianceDissolved { members } => {
                members.0 == id || members.1 == id
            }
        }
    }

    /// Short line for a notification panel
    pub fn describe(&self) -> String {
        match self {
            EventType::Capture { x, y, attacker, .. } => {
                format!("Attack at ({}, {}) by {}", x, y, attacker)
            }
            EventType::Uprising { x, y, .. } => format!("Uprising at ({}, {})", x, y),
            EventType::Revolt { x, y, faction } => {
                format!("Revolt at ({}, {}) returns it to {}", x, y, faction)
            }
            EventType::MoraleBoostGained { faction } => {
                format!("{} rallies with a morale boost", faction)
            }
            EventType::AllianceFormed { members } => {
                format!("{} and {} form an alliance", members.0, members.1)
            }
            EventType::AllianceDissolved { members } => {
                format!("Alliance between {} and {} dissolves", members.0, members.1)
            }
            EventType::Eliminated { faction } => format!("{} has been eliminated", faction),
            EventType::Victory { faction } => format!("{} is victorious", faction),
        }
    }
}

/// Most recent events, oldest evicted first
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EventLog {
    events: VecDeque<Event>,
    capacity: usize,
    next_event_id: u64,
}

impl Default for EventLog {
    fn default() -> Self {
        Self::with_capacity(crate::core::constants::DEFAULT_EVENT_LOG_CAPACITY)
    }
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            events: VecDeque::new(),
            capacity,
            next_event_id: 0,
        }
    }

    pub fn add_event(&mut self, event_type: EventType, tick: Tick) -> Event {
        let id = self.next_event_id;
        self.next_event_id += 1;

        let event = Event {
            id,
            tick,
            event_type,
        };
        if self.capacity > 0 {
            if self.events.len() == self.capacity {
                self.events.pop_front();
            }
            self.events.push_back(event.clone());
        }
        event
    }

    /// Events ever recorded, including evicted ones
    pub fn total_recorded(&self) -> u64 {
        self.next_event_id
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Event> {
        self.events.iter()
    }

    /// The last `n` retained events, oldest first
    pub fn recent(&self, n: usize) -> impl Iterator<Item = &Event> {
        self.events.iter().skip(self.events.len().saturating_sub(n))
    }

    pub fn events_for_tick(&self, tick: Tick) -> impl Iterator<Item = &Event> {
        self.events.iter().filter(move |e| e.tick == tick)
    }

    pub fn events_for_faction(&self, id: FactionId) -> impl Iterator<Item = &Event> {
        self.events.iter().filter(move |e| e.event_type.involves(id))
    }
}
