use crate::models::{Incident, IncidentId, Severity};
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

/// Queue entry referencing an incident in the coordinator's index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueEntry {
    pub incident_id: IncidentId,
    pub severity: Severity,

    /// Insertion counter; lower was queued earlier
    sequence: u64,
}

impl Ord for QueueEntry {
    /// Higher severity first, then earliest queued
    fn cmp(&self, other: &Self) -> Ordering {
        self.severity
            .cmp(&other.severity)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Severity-ordered queue of pending incidents
#[derive(Debug, Default)]
pub struct DispatchQueue {
    heap: BinaryHeap<QueueEntry>,
    next_sequence: u64,

    /// Sequence handed to each incident on its first push
    sequences: HashMap<IncidentId, u64>,
}

impl DispatchQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an incident. An incident pushed again (after a reverted
    /// dispatch) keeps the place it was first given among equal severities.
    pub fn push(&mut self, incident: &Incident) {
        let sequence = match self.sequences.get(&incident.id) {
            Some(&sequence) => sequence,
            None => {
                let sequence = self.next_sequence;
                self.next_sequence += 1;
                self.sequences.insert(incident.id, sequence);
                sequence
            }
        };

        self.heap.push(QueueEntry {
            incident_id: incident.id,
            severity: incident.severity,
            sequence,
        });
    }

    /// Put back an entry that was popped but could not be served; it keeps
    /// its original place among equal severities.
    pub fn requeue(&mut self, entry: QueueEntry) {
        self.heap.push(entry);
    }

    pub fn pop_highest(&mut self) -> Option<QueueEntry> {
        self.heap.pop()
    }

    pub fn peek_highest(&self) -> Option<&QueueEntry> {
        self.heap.peek()
    }

    /// Drop an incident from the queue for good; returns whether it was
    /// queued
    pub fn remove(&mut self, incident_id: IncidentId) -> bool {
        self.sequences.remove(&incident_id);
        let before = self.heap.len();
        self.heap.retain(|entry| entry.incident_id != incident_id);
        self.heap.len() != before
    }

    pub fn contains(&self, incident_id: IncidentId) -> bool {
        self.heap.iter().any(|entry| entry.incident_id == incident_id)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}
