//! Pilot directory seam and its in-memory implementation.

use std::sync::Arc;

use dashmap::DashMap;

use super::model::Pilot;

/// Resolves flights by callsign and stores assigned stands back onto them.
pub trait PilotDirectory: Send + Sync {
    /// Current record of `callsign`, if known.
    fn lookup(&self, callsign: &str) -> Option<Pilot>;

    /// Write the assigned stand (or an empty string) onto the record.
    ///
    /// Unknown callsigns are ignored.
    fn set_stand(&self, callsign: &str, stand: &str);
}

impl<T: PilotDirectory + ?Sized> PilotDirectory for Arc<T> {
    fn lookup(&self, callsign: &str) -> Option<Pilot> {
        (**self).lookup(callsign)
    }

    fn set_stand(&self, callsign: &str, stand: &str) {
        (**self).set_stand(callsign, stand)
    }
}

/// Concurrent pilot directory keyed by callsign.
#[derive(Debug, Default)]
pub struct InMemoryPilotDirectory {
    pilots: DashMap<String, Pilot>,
}

impl InMemoryPilotDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a directory holding `pilots`. Later duplicates win.
    pub fn from_pilots<I: IntoIterator<Item = Pilot>>(pilots: I) -> Self {
        let directory = Self::new();
        for pilot in pilots {
            directory.upsert(pilot);
        }
        directory
    }

    /// Insert or replace a pilot, returning the previous record.
    pub fn upsert(&self, pilot: Pilot) -> Option<Pilot> {
        self.pilots.insert(pilot.callsign.clone(), pilot)
    }

    pub fn remove(&self, callsign: &str) -> Option<Pilot> {
        self.pilots.remove(callsign).map(|(_, pilot)| pilot)
    }

    pub fn len(&self) -> usize {
        self.pilots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pilots.is_empty()
    }

    /// All known callsigns, sorted.
    pub fn callsigns(&self) -> Vec<String> {
        let mut callsigns: Vec<String> = self.pilots.iter().map(|e| e.key().clone()).collect();
        callsigns.sort();
        callsigns
    }

    /// Copy of every record, sorted by callsign.
    pub fn snapshot(&self) -> Vec<Pilot> {
        let mut pilots: Vec<Pilot> = self.pilots.iter().map(|e| e.value().clone()).collect();
        pilots.sort_by(|a, b| a.callsign.cmp(&b.callsign));
        pilots
    }
}

impl PilotDirectory for InMemoryPilotDirectory {
    fn lookup(&self, callsign: &str) -> Option<Pilot> {
        self.pilots.get(callsign).map(|entry| entry.value().clone())
    }

    fn set_stand(&self, callsign: &str, stand: &str) {
        if let Some(mut pilot) = self.pilots.get_mut(callsign) {
            pilot.stand = stand.to_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_and_set_stand() {
        let directory = InMemoryPilotDirectory::new();
        directory.upsert(Pilot::new("DLH4", "EDDF"));

        directory.set_stand("DLH4", "V155");
        assert_eq!(directory.lookup("DLH4").unwrap().stand, "V155");

        directory.set_stand("DLH4", "");
        assert!(!directory.lookup("DLH4").unwrap().has_stand());
    }

    #[test]
    fn test_set_stand_unknown_is_ignored() {
        let directory = InMemoryPilotDirectory::new();
        directory.set_stand("GHOST", "A1");
        assert!(directory.lookup("GHOST").is_none());
        assert!(directory.is_empty());
    }

    #[test]
    fn test_from_pilots_later_duplicate_wins() {
        let directory = InMemoryPilotDirectory::from_pilots(vec![
            Pilot::new("EZY1", "LFBO"),
            Pilot::new("AFR2", "LFPG"),
            Pilot::new("EZY1", "LFMN"),
        ]);

        assert_eq!(directory.len(), 2);
        assert_eq!(directory.callsigns(), vec!["AFR2", "EZY1"]);
        assert_eq!(directory.lookup("EZY1").unwrap().destination, "LFMN");
        assert_eq!(directory.snapshot()[0].callsign, "AFR2");
    }

    #[test]
    fn test_remove() {
        let directory = InMemoryPilotDirectory::new();
        directory.upsert(Pilot::new("RYR9", "EIDW"));
        assert!(directory.remove("RYR9").is_some());
        assert!(directory.remove("RYR9").is_none());
    }

    #[test]
    fn test_arc_forwards() {
        let directory: Arc<dyn PilotDirectory> =
            Arc::new(InMemoryPilotDirectory::from_pilots(vec![Pilot::new("KLM7", "EHAM")]));
        directory.set_stand("KLM7", "D4");
        assert_eq!(directory.lookup("KLM7").unwrap().stand, "D4");
    }
}
