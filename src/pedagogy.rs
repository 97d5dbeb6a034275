// src/pedagogy.rs

use crate::constants::*;
use crate::error::{ResponseError, Result, TrainerError};
use crate::models::{ProblemView, ResponseAction};
use crate::repository::{self, ProblemStore};
use chrono::NaiveDateTime;
use log::{debug, info};
use rand::seq::SliceRandom;
use rand::Rng;

// --- Public Interface ---

/// Picks the next problem to work on. `Ok(None)` means every problem is complete.
pub fn get_next_problem<R: Rng + ?Sized>(
    store: &ProblemStore,
    spaced_rep: bool,
    rng: &mut R,
) -> Result<Option<ProblemView>> {
    debug!("Requesting next problem (spaced_rep: {})...", spaced_rep);
    if spaced_rep {
        find_by_tier(store, rng).map(Some)
    } else {
        Ok(find_first_incomplete(store, rng))
    }
}

/// Applies a raw user response for the problem that was just shown.
pub fn process_response(
    store: &mut ProblemStore,
    number: u32,
    response: &str,
    spaced_rep: bool,
    now: NaiveDateTime,
) -> std::result::Result<ResponseAction, ResponseError> {
    let response = response.trim().to_lowercase();

    match response.as_str() {
        "y" => {
            let p = store
                .get_mut(number)
                .ok_or_else(|| ResponseError::ProblemNotFound(number.to_string()))?;
            p.completion_status = if spaced_rep {
                (p.completion_status + 1).min(TIER_MAX)
            } else {
                1
            };
            p.date_completed = Some(now);
            info!(
                "Problem {} completed (tier {}, next review in ~{}d)",
                number,
                p.completion_status,
                TIER_REVIEW_DAYS[p.completion_status as usize]
            );
            Ok(ResponseAction::Completed {
                number,
                tier: p.completion_status,
            })
        }
        "n" => Ok(ResponseAction::Skipped),
        "r" => {
            info!("Resetting all progress");
            store.reset_all();
            Ok(ResponseAction::ResetAll)
        }
        digits if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) => {
            // Too many digits to fit cannot name a known problem either.
            let p = digits
                .parse::<u32>()
                .ok()
                .and_then(|target| store.get_mut(target))
                .ok_or_else(|| ResponseError::ProblemNotFound(digits.to_string()))?;
            let target = p.number;
            p.clear_completion();
            info!("Problem {} marked as not completed", target);
            Ok(ResponseAction::Uncompleted { number: target })
        }
        other => Err(ResponseError::Unrecognized(other.to_string())),
    }
}

// --- Internal Selection Logic ---

fn find_first_incomplete<R: Rng + ?Sized>(store: &ProblemStore, rng: &mut R) -> Option<ProblemView> {
    for list in LIST_PRIORITY {
        let candidates = repository::find_incomplete(store, list);
        if let Some(p) = candidates.choose(rng) {
            info!(
                "Serving {}: {} (#{}) out of {} incomplete",
                list,
                p.name,
                p.number,
                candidates.len()
            );
            return Some(ProblemView::from(*p));
        }
        debug!("List {} fully completed", list);
    }

    info!("No incomplete problems available.");
    None
}

fn find_by_tier<R: Rng + ?Sized>(store: &ProblemStore, rng: &mut R) -> Result<ProblemView> {
    for tier in TIER_NEW..=TIER_MAX {
        for list in LIST_PRIORITY {
            let candidates = repository::find_at_tier(store, list, tier);
            if candidates.is_empty() {
                continue;
            }

            // New and fully matured problems are picked at random, reviews by age.
            let picked = if tier == TIER_NEW || tier == TIER_MAX {
                candidates.choose(rng).copied()
            } else {
                repository::find_most_overdue(&candidates)
            };

            if let Some(p) = picked {
                info!(
                    "Serving tier {} from {}: {} (#{}, last done {:?})",
                    tier, list, p.name, p.number, p.date_completed
                );
                return Ok(ProblemView::from(p));
            }
        }
        debug!("Tier {} empty", tier);
    }

    Err(TrainerError::TierExhausted)
}
