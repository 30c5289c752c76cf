//! Season → episode grid for one series.
//!
//! Both levels are index addressed: slot `n` of the outer vector is season
//! `n`, slot `m` of a season is episode `m`. Upstream returns episodes in no
//! particular order; placing them by number yields ascending iteration, and
//! gaps stay as explicit empty slots.

use crate::models::Episode;

#[derive(Debug, Clone, Default)]
pub struct SeasonGrid {
    seasons: Vec<Option<Vec<Option<Episode>>>>,
}

/// A present season: its number and its episode slots.
#[derive(Debug, Clone, Copy)]
pub struct Season<'a> {
    pub number: u32,
    slots: &'a [Option<Episode>],
}

impl<'a> Season<'a> {
    /// Placed episodes in ascending episode number.
    pub fn episodes(&self) -> impl Iterator<Item = &'a Episode> + use<'a> {
        self.slots.iter().flatten()
    }
}

impl SeasonGrid {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place `episode` at `season`/`number`, replacing any previous occupant.
    pub fn insert(&mut self, season: u32, number: u32, episode: Episode) {
        let (season, number) = (season as usize, number as usize);
        if self.seasons.len() <= season {
            self.seasons.resize(season + 1, None);
        }
        let slots = self.seasons[season].get_or_insert_with(Vec::new);
        if slots.len() <= number {
            slots.resize(number + 1, None);
        }
        slots[number] = Some(episode);
    }

    /// Present seasons in ascending order. A season exists once any episode
    /// has been placed in it.
    pub fn seasons(&self) -> impl Iterator<Item = Season<'_>> {
        self.seasons.iter().enumerate().filter_map(|(number, slots)| {
            slots.as_deref().map(|slots| Season {
                number: number as u32,
                slots,
            })
        })
    }

    /// Every placed episode, season by season.
    pub fn episodes(&self) -> impl Iterator<Item = &Episode> {
        self.seasons().flat_map(|season| season.episodes())
    }

    pub fn is_empty(&self) -> bool {
        self.episodes().next().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn episode(title: &str) -> Episode {
        Episode {
            title: Some(title.into()),
            ..Default::default()
        }
    }

    fn titles<'a>(episodes: impl Iterator<Item = &'a Episode>) -> Vec<&'a str> {
        episodes.filter_map(|e| e.title.as_deref()).collect()
    }

    #[test]
    fn iterates_in_number_order_regardless_of_insertion() {
        let mut grid = SeasonGrid::new();
        grid.insert(2, 1, episode("S02E01"));
        grid.insert(1, 2, episode("S01E02"));
        grid.insert(1, 1, episode("S01E01"));

        let seasons: Vec<u32> = grid.seasons().map(|s| s.number).collect();
        assert_eq!(seasons, [1, 2]);
        assert_eq!(titles(grid.episodes()), ["S01E01", "S01E02", "S02E01"]);
    }

    #[test]
    fn gaps_are_skipped() {
        let mut grid = SeasonGrid::new();
        grid.insert(3, 5, episode("S03E05"));

        let seasons: Vec<Season<'_>> = grid.seasons().collect();
        assert_eq!(seasons.len(), 1);
        assert_eq!(seasons[0].number, 3);
        assert_eq!(titles(seasons[0].episodes()), ["S03E05"]);
    }

    #[test]
    fn later_insert_replaces_slot() {
        let mut grid = SeasonGrid::new();
        grid.insert(1, 1, episode("first"));
        grid.insert(1, 1, episode("second"));
        assert_eq!(titles(grid.episodes()), ["second"]);
    }

    #[test]
    fn empty_grid() {
        let grid = SeasonGrid::new();
        assert!(grid.is_empty());
        assert_eq!(grid.seasons().count(), 0);
    }
}
