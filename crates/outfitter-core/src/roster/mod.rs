mod reader;
mod types;

pub use reader::RosterReader;
pub use types::*;

/// Result of looking a guest up by name
#[derive(Debug, PartialEq, Eq)]
pub enum Lookup<'a> {
    Found(&'a GuestRecord),
    NotFound,
    Ambiguous(usize),
}

/// The loaded roster. Immutable for the lifetime of a run.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    guests: Vec<GuestRecord>,
}

impl Roster {
    pub fn new(guests: Vec<GuestRecord>) -> Self {
        Self { guests }
    }

    pub fn guests(&self) -> &[GuestRecord] {
        &self.guests
    }

    pub fn len(&self) -> usize {
        self.guests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.guests.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&GuestRecord> {
        self.guests.get(index)
    }

    /// Exact, case-sensitive match against the guest name column
    pub fn lookup(&self, name: &str) -> Lookup<'_> {
        let mut matches = self.guests.iter().filter(|g| g.name == name);

        match (matches.next(), matches.count()) {
            (None, _) => Lookup::NotFound,
            (Some(guest), 0) => Lookup::Found(guest),
            (Some(_), rest) => Lookup::Ambiguous(rest + 1),
        }
    }

    /// The row following `previous`, or the first row when nothing was picked yet
    pub fn next_after(&self, previous: Option<usize>) -> Option<&GuestRecord> {
        let index = previous.map_or(0, |i| i + 1);
        self.guests.get(index)
    }
}
