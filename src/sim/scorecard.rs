//! Round scorecard
//!
//! Rows are players, columns are the holes reached so far plus a totals
//! column. Each cell is classified against that hole's par.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::state::Player;

/// Cell classification relative to par
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreClass {
    Under,
    Even,
    Over,
    Unset,
}

impl ScoreClass {
    pub fn against_par(strokes: Option<u32>, par: u32) -> Self {
        match strokes {
            None => ScoreClass::Unset,
            Some(s) => match s.cmp(&par) {
                Ordering::Less => ScoreClass::Under,
                Ordering::Equal => ScoreClass::Even,
                Ordering::Greater => ScoreClass::Over,
            },
        }
    }
}

/// A played hole in the round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoleColumn {
    /// 1-based hole number
    pub number: usize,
    pub par: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreCell {
    pub strokes: Option<u32>,
    pub class: ScoreClass,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRow {
    pub label: String,
    pub color: String,
    pub cells: Vec<ScoreCell>,
    pub total: u32,
    /// Par of the holes this player has a score on
    pub par_played: u32,
    pub total_class: ScoreClass,
}

impl ScoreRow {
    /// Strokes relative to par over the holes played (negative is under)
    pub fn to_par(&self) -> i64 {
        i64::from(self.total) - i64::from(self.par_played)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scorecard {
    pub holes: Vec<HoleColumn>,
    pub rows: Vec<ScoreRow>,
    /// Strokes on each hole summed across players
    pub column_totals: Vec<u32>,
    pub par_total: u32,
}

impl Scorecard {
    /// Build the card from the columns reached so far
    pub fn build(holes: &[HoleColumn], players: &[Player]) -> Self {
        let rows: Vec<ScoreRow> = players
            .iter()
            .map(|player| {
                let cells: Vec<ScoreCell> = holes
                    .iter()
                    .enumerate()
                    .map(|(i, hole)| {
                        let strokes = player.hole_scores.get(i).copied().flatten();
                        ScoreCell {
                            strokes,
                            class: ScoreClass::against_par(strokes, hole.par),
                        }
                    })
                    .collect();

                let total: u32 = cells.iter().filter_map(|c| c.strokes).sum();
                let par_played: u32 = cells
                    .iter()
                    .zip(holes)
                    .filter(|(cell, _)| cell.strokes.is_some())
                    .map(|(_, hole)| hole.par)
                    .sum();
                let any_played = cells.iter().any(|c| c.strokes.is_some());
                let total_class = if any_played {
                    ScoreClass::against_par(Some(total), par_played)
                } else {
                    ScoreClass::Unset
                };

                ScoreRow {
                    label: player.label.clone(),
                    color: player.color.clone(),
                    cells,
                    total,
                    par_played,
                    total_class,
                }
            })
            .collect();

        let column_totals = (0..holes.len())
            .map(|i| rows.iter().filter_map(|r| r.cells[i].strokes).sum::<u32>())
            .collect();

        Self {
            holes: holes.to_vec(),
            rows,
            column_totals,
            par_total: holes.iter().map(|h| h.par).sum(),
        }
    }

    /// Lowest total among players with at least one score
    pub fn leader(&self) -> Option<&ScoreRow> {
        self.rows
            .iter()
            .filter(|r| r.total_class != ScoreClass::Unset)
            .min_by_key(|r| r.total)
    }
}
