// src/constants.rs

use crate::models::ProblemList;

// --- Problem Lists ---
pub const LIST_PRIORITY: [ProblemList; 3] = [
    ProblemList::Grind75,
    ProblemList::Grind169,
    ProblemList::Neetcode150,
];

// --- Spaced Repetition Tiers ---
pub const TIER_NEW: u8 = 0;
pub const TIER_MAX: u8 = 5;
// Target review delay per tier, indexed by tier. Descriptive only, selection orders by tier.
pub const TIER_REVIEW_DAYS: [i64; (TIER_MAX + 1) as usize] = [0, 1, 3, 7, 16, 45];

// --- Persistence ---
pub const APP_DIR_NAME: &str = "lcprob";
pub const PROBLEMS_FILE_NAME: &str = "problems_unique.csv";
pub const CONFIG_FILE_NAME: &str = "config.json";

pub const CSV_COLUMNS: [&str; 7] = [
    "Number",
    "Name",
    "Difficulty",
    "Link",
    "List",
    "Date Completed",
    "Completed",
];

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";
pub const TIMESTAMP_PARSE_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];
pub const DATE_ONLY_FORMAT: &str = "%Y-%m-%d";
