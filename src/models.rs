// src/models.rs

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::constants::TIER_NEW;

// --- Data Models ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Difficulty {
    Easy = 1,
    Medium = 2,
    Hard = 3,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

impl FromStr for Difficulty {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Easy" => Ok(Difficulty::Easy),
            "Medium" => Ok(Difficulty::Medium),
            "Hard" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty '{}'", other)),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The curated list a problem belongs to. Each problem number lives in exactly one list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProblemList {
    Grind75,
    Grind169,
    Neetcode150,
}

impl ProblemList {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProblemList::Grind75 => "Grind75",
            ProblemList::Grind169 => "Grind169",
            ProblemList::Neetcode150 => "Neetcode150",
        }
    }
}

impl FromStr for ProblemList {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Grind75" => Ok(ProblemList::Grind75),
            "Grind169" => Ok(ProblemList::Grind169),
            "Neetcode150" => Ok(ProblemList::Neetcode150),
            other => Err(format!("unknown problem list '{}'", other)),
        }
    }
}

impl fmt::Display for ProblemList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the problem store.
#[derive(Debug, Clone, PartialEq)]
pub struct Problem {
    pub number: u32,
    pub name: String,
    pub difficulty: Difficulty,
    pub link: String,
    pub list: ProblemList,
    /// 0 = not completed, 1..=5 = completed at that repetition tier.
    pub completion_status: u8,
    pub date_completed: Option<NaiveDateTime>,
}

impl Problem {
    pub fn is_complete(&self) -> bool {
        self.completion_status != TIER_NEW
    }

    pub fn clear_completion(&mut self) {
        self.completion_status = TIER_NEW;
        self.date_completed = None;
    }
}

/// What the selector hands back to the session for display.
#[derive(Debug, Clone, PartialEq)]
pub struct ProblemView {
    pub list: ProblemList,
    pub number: u32,
    pub name: String,
    pub difficulty: Difficulty,
    pub link: String,
}

impl From<&Problem> for ProblemView {
    fn from(p: &Problem) -> Self {
        ProblemView {
            list: p.list,
            number: p.number,
            name: p.name.clone(),
            difficulty: p.difficulty,
            link: p.link.clone(),
        }
    }
}

impl fmt::Display for ProblemView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Problem: {}. {} ({}) [{}]",
            self.number, self.name, self.difficulty, self.list
        )?;
        writeln!(f, "Link: {}", self.link)
    }
}

/// Outcome of an accepted user response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseAction {
    Completed { number: u32, tier: u8 },
    Skipped,
    ResetAll,
    Uncompleted { number: u32 },
}

// Raw CSV row. Column names and order are the on-disk format.
#[derive(Serialize, Deserialize, Debug)]
pub struct CsvProblem {
    #[serde(rename = "Number")]
    pub number: u32,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Difficulty")]
    pub difficulty: String,
    #[serde(rename = "Link")]
    pub link: String,
    #[serde(rename = "List")]
    pub list: String,
    #[serde(rename = "Date Completed")]
    pub date_completed: Option<String>,
    #[serde(rename = "Completed")]
    pub completed: u8,
}
