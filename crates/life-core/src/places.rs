//! Place graph and date-scoped aliases.

use std::collections::{BTreeMap, HashSet};

use tracing::warn;

use crate::day::Day;
use crate::life::{Alias, Life, push_unique};

impl Life {
    /// Links `child` under `parent`. A place may have several parents.
    pub fn add_subplace(&mut self, child: &str, parent: &str) {
        if child == parent {
            warn!(place = child, "ignoring subplace link to itself");
            return;
        }
        push_unique(self.subplaces.entry(parent.to_string()).or_default(), child);
        push_unique(self.superplaces.entry(child.to_string()).or_default(), parent);
    }

    /// Removes a subplace link; returns false when it did not exist.
    pub fn remove_subplace(&mut self, child: &str, parent: &str) -> bool {
        let removed = remove_link(&mut self.subplaces, parent, child);
        remove_link(&mut self.superplaces, child, parent);
        removed
    }

    /// Direct children of `place`; when `recursive`, also each child's own
    /// direct children. Grandchildren are as deep as it goes.
    pub fn subplaces_of(&self, place: &str, recursive: bool) -> Vec<String> {
        expand(&self.subplaces, place, recursive)
    }

    /// Direct parents of `place`; when `recursive`, also each parent's own
    /// direct parents.
    pub fn superplaces_of(&self, place: &str, recursive: bool) -> Vec<String> {
        expand(&self.superplaces, place, recursive)
    }

    /// The root reached by following the first parent of each place.
    pub fn top_superplace(&self, place: &str) -> String {
        let mut seen = HashSet::new();
        let mut current = place;
        while seen.insert(current) {
            match self.superplaces.get(current).and_then(|p| p.first()) {
                Some(parent) => current = parent.as_str(),
                None => break,
            }
        }
        current.to_string()
    }

    /// The name `place` was known by on `date`, following renames.
    pub fn resolve_name_as_of(&self, place: &str, date: &str) -> String {
        resolve_alias(&self.nameswaps, place, date)
    }

    /// The place occupying the location of `place` on `date`, following
    /// location changes.
    pub fn resolve_location_as_of(&self, place: &str, date: &str) -> String {
        resolve_alias(&self.locationswaps, place, date)
    }

    /// The name of `place` as of the last day in the log.
    pub fn current_name(&self, place: &str) -> String {
        match self.last_day() {
            Some(day) => self.resolve_name_as_of(place, day.date.as_str()),
            None => place.to_string(),
        }
    }

    /// Returns a copy of `day` with every place name passed through `rename`.
    #[expect(
        clippy::unused_self,
        reason = "kept on Life alongside the other projections"
    )]
    pub fn rename_places_in<F>(&self, day: &Day, rename: F) -> Day
    where
        F: FnMut(&str) -> String,
    {
        day.rename_places(rename)
    }

    /// `day` with every place under its current name.
    pub fn with_current_names(&self, day: &Day) -> Day {
        self.rename_places_in(day, |p| self.current_name(p))
    }

    /// `day` with every place replaced by its top superplace.
    pub fn with_top_superplaces(&self, day: &Day) -> Day {
        self.rename_places_in(day, |p| self.top_superplace(p))
    }
}

fn expand(links: &BTreeMap<String, Vec<String>>, place: &str, recursive: bool) -> Vec<String> {
    let direct = links.get(place).cloned().unwrap_or_default();
    if !recursive {
        return direct;
    }
    let mut all = direct.clone();
    for next in &direct {
        for grand in links.get(next).into_iter().flatten() {
            push_unique(&mut all, grand);
        }
    }
    all
}

fn remove_link(links: &mut BTreeMap<String, Vec<String>>, key: &str, value: &str) -> bool {
    let Some(list) = links.get_mut(key) else {
        return false;
    };
    let before = list.len();
    list.retain(|v| v != value);
    let removed = list.len() != before;
    if list.is_empty() {
        links.remove(key);
    }
    removed
}

fn resolve_alias(aliases: &BTreeMap<String, Alias>, place: &str, date: &str) -> String {
    let mut seen = HashSet::new();
    let mut current = place;
    while seen.insert(current) {
        match aliases.get(current) {
            Some(alias) if alias.since.as_str() <= date => current = alias.name.as_str(),
            _ => break,
        }
    }
    current.to_string()
}
