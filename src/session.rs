// src/session.rs

//! One interactive run: select a problem, show it, and apply the user's answer.
//!
//! The store is mutated in place; persisting it is left to the caller once
//! [`run_session`] returns successfully.

use crate::config::Config;
use crate::error::{Result, TrainerError};
use crate::models::{ProblemView, ResponseAction};
use crate::pedagogy;
use crate::repository::ProblemStore;
use chrono::{Local, NaiveDateTime, SubsecRound};
use log::{debug, info, warn};
use rand::Rng;
use std::io::{BufRead, Write};

/// Source of completion timestamps.
pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

/// Local wall-clock time, truncated to the precision the problem file stores.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local().trunc_subsecs(6)
    }
}

/// Opens a problem link somewhere the user can see it.
pub trait LinkOpener {
    fn open(&self, url: &str) -> std::io::Result<()>;
}

pub struct BrowserOpener;

impl LinkOpener for BrowserOpener {
    fn open(&self, url: &str) -> std::io::Result<()> {
        webbrowser::open(url)
    }
}

/// What happened during a session, for the caller to act on.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionOutcome {
    pub problem: ProblemView,
    pub action: ResponseAction,
    /// The store had no incomplete problem and was reset before selecting.
    pub was_reset: bool,
}

/// Selects with the one-shot reset fallback. Clears status and date on every record
/// before retrying so that spaced-repetition mode has tier-0 candidates again.
pub fn select_with_fallback<R: Rng + ?Sized>(
    store: &mut ProblemStore,
    spaced_rep: bool,
    rng: &mut R,
) -> Result<(ProblemView, bool)> {
    if let Some(p) = pedagogy::get_next_problem(store, spaced_rep, rng)? {
        return Ok((p, false));
    }

    info!("All problems completed, resetting progress");
    store.reset_all();
    match pedagogy::get_next_problem(store, spaced_rep, rng)? {
        Some(p) => Ok((p, true)),
        None => Err(TrainerError::Exhausted),
    }
}

pub fn run_session<R, C, L, I, O>(
    store: &mut ProblemStore,
    config: &Config,
    rng: &mut R,
    clock: &C,
    opener: &L,
    input: &mut I,
    output: &mut O,
) -> Result<SessionOutcome>
where
    R: Rng + ?Sized,
    C: Clock + ?Sized,
    L: LinkOpener + ?Sized,
    I: BufRead + ?Sized,
    O: Write + ?Sized,
{
    let (problem, was_reset) = select_with_fallback(store, config.spaced_rep, rng)?;
    if was_reset {
        writeln!(output, "All problems completed! Resetting progress.")?;
    }

    writeln!(output, "{}", problem)?;
    if config.open_browser {
        if let Err(e) = opener.open(&problem.link) {
            warn!("Failed to open {}: {}", problem.link, e);
        }
    }

    print_instructions(output)?;

    let mut buf = Vec::new();
    loop {
        write!(output, "Input (y/n/r/problem#): ")?;
        output.flush()?;

        buf.clear();
        if input.read_until(b'\n', &mut buf)? == 0 {
            return Err(TrainerError::PromptClosed);
        }
        // Undecodable bytes become U+FFFD and fall through to the invalid-response path.
        let line = String::from_utf8_lossy(&buf);

        match pedagogy::process_response(
            store,
            problem.number,
            &line,
            config.spaced_rep,
            clock.now(),
        ) {
            Ok(action) => {
                info!("Session finished with {:?}", action);
                return Ok(SessionOutcome {
                    problem,
                    action,
                    was_reset,
                });
            }
            Err(e) => {
                debug!("Rejected response {:?}: {:?}", line.trim(), e);
                writeln!(output, "{}", e)?;
            }
        }
    }
}

fn print_instructions<O: Write + ?Sized>(output: &mut O) -> Result<()> {
    writeln!(output, "\tTo mark a problem as completed, type 'y' and press Enter")?;
    writeln!(output, "\tTo exit, type 'n' and press Enter")?;
    writeln!(output, "\tTo reset progress, type 'r' and press Enter")?;
    writeln!(
        output,
        "\tTo undo completion of a problem, type '{{problem number}}' and press Enter"
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Difficulty, Problem, ProblemList};
    use chrono::NaiveDate;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::cell::RefCell;
    use std::io::Cursor;

    struct FixedClock(NaiveDateTime);

    impl Clock for FixedClock {
        fn now(&self) -> NaiveDateTime {
            self.0
        }
    }

    #[derive(Default)]
    struct RecordingOpener {
        opened: RefCell<Vec<String>>,
        fail: bool,
    }

    impl LinkOpener for RecordingOpener {
        fn open(&self, url: &str) -> std::io::Result<()> {
            self.opened.borrow_mut().push(url.to_string());
            if self.fail {
                Err(std::io::Error::new(std::io::ErrorKind::Other, "no browser"))
            } else {
                Ok(())
            }
        }
    }

    fn noon() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn store_with(statuses: &[(u32, ProblemList, u8)]) -> ProblemStore {
        let problems = statuses
            .iter()
            .map(|&(number, list, status)| Problem {
                number,
                name: format!("P{}", number),
                difficulty: Difficulty::Easy,
                link: format!("https://leetcode.com/problems/p{}/", number),
                list,
                completion_status: status,
                date_completed: if status == 0 { None } else { Some(noon()) },
            })
            .collect();
        ProblemStore::from_problems(problems).unwrap()
    }

    fn run(
        store: &mut ProblemStore,
        config: &Config,
        opener: &RecordingOpener,
        input: &str,
    ) -> (Result<SessionOutcome>, String) {
        run_bytes(store, config, opener, input.as_bytes())
    }

    fn run_bytes(
        store: &mut ProblemStore,
        config: &Config,
        opener: &RecordingOpener,
        input: &[u8],
    ) -> (Result<SessionOutcome>, String) {
        let mut rng = StdRng::seed_from_u64(11);
        let mut input = Cursor::new(input.to_vec());
        let mut output = Vec::new();
        let result = run_session(
            store,
            config,
            &mut rng,
            &FixedClock(noon()),
            opener,
            &mut input,
            &mut output,
        );
        (result, String::from_utf8(output).unwrap())
    }

    #[test]
    fn completes_selected_problem() {
        let mut store = store_with(&[(1, ProblemList::Grind75, 0), (2, ProblemList::Grind169, 0)]);
        let (result, text) = run(&mut store, &Config::default(), &RecordingOpener::default(), "y\n");

        let outcome = result.unwrap();
        assert_eq!(outcome.problem.number, 1);
        assert_eq!(outcome.action, ResponseAction::Completed { number: 1, tier: 1 });
        assert!(!outcome.was_reset);
        assert!(text.contains("Problem: 1. P1 (Easy)"));
        assert_eq!(store.get(1).unwrap().date_completed, Some(noon()));
    }

    #[test]
    fn invalid_responses_reprompt() {
        let mut store = store_with(&[(1, ProblemList::Grind75, 0), (2, ProblemList::Grind169, 1)]);
        let (result, text) = run(
            &mut store,
            &Config::default(),
            &RecordingOpener::default(),
            "what\n99\n2\n",
        );

        assert_eq!(result.unwrap().action, ResponseAction::Uncompleted { number: 2 });
        assert!(text.contains("Invalid response."));
        assert!(text.contains("Problem not found."));
        assert_eq!(text.matches("Input (y/n/r/problem#): ").count(), 3);
        assert_eq!(store.get(2).unwrap().completion_status, 0);
    }

    #[test]
    fn non_utf8_line_is_rejected_and_reprompted() {
        let mut store = store_with(&[(1, ProblemList::Grind75, 0)]);
        let (result, text) = run_bytes(
            &mut store,
            &Config::default(),
            &RecordingOpener::default(),
            &[0xff, 0xfe, b'\n', b'y', b'\n'],
        );

        assert_eq!(result.unwrap().action, ResponseAction::Completed { number: 1, tier: 1 });
        assert!(text.contains("Invalid response."));
        assert_eq!(text.matches("Input (y/n/r/problem#): ").count(), 2);
    }

    #[test]
    fn closed_input_is_an_error() {
        let mut store = store_with(&[(1, ProblemList::Grind75, 0)]);
        let (result, _) = run(&mut store, &Config::default(), &RecordingOpener::default(), "bogus\n");
        assert!(matches!(result, Err(TrainerError::PromptClosed)));
        assert_eq!(store.get(1).unwrap().completion_status, 0);
    }

    #[test]
    fn exhausted_store_resets_both_fields_then_selects() {
        let mut store = store_with(&[(1, ProblemList::Grind75, 1), (2, ProblemList::Neetcode150, 1)]);
        let (result, text) = run(&mut store, &Config::default(), &RecordingOpener::default(), "n\n");

        let outcome = result.unwrap();
        assert!(outcome.was_reset);
        assert_eq!(outcome.problem.number, 1);
        assert!(text.starts_with("All problems completed!"));
        assert!(store
            .iter()
            .all(|p| p.completion_status == 0 && p.date_completed.is_none()));
    }

    #[test]
    fn empty_store_is_exhausted_after_reset() {
        let mut store = ProblemStore::default();
        let mut rng = StdRng::seed_from_u64(0);
        assert!(matches!(
            select_with_fallback(&mut store, false, &mut rng),
            Err(TrainerError::Exhausted)
        ));
    }

    #[test]
    fn opens_link_only_when_enabled() {
        let config = Config {
            open_browser: true,
            ..Config::default()
        };
        let mut store = store_with(&[(3, ProblemList::Grind75, 0)]);
        let opener = RecordingOpener::default();
        run(&mut store, &config, &opener, "n\n").0.unwrap();
        assert_eq!(
            *opener.opened.borrow(),
            vec!["https://leetcode.com/problems/p3/".to_string()]
        );

        let opener = RecordingOpener::default();
        run(&mut store, &Config::default(), &opener, "n\n").0.unwrap();
        assert!(opener.opened.borrow().is_empty());
    }

    #[test]
    fn link_failure_is_ignored() {
        let config = Config {
            open_browser: true,
            ..Config::default()
        };
        let mut store = store_with(&[(3, ProblemList::Grind75, 0)]);
        let opener = RecordingOpener {
            fail: true,
            ..RecordingOpener::default()
        };
        let outcome = run(&mut store, &config, &opener, "y\n").0.unwrap();
        assert_eq!(outcome.action, ResponseAction::Completed { number: 3, tier: 1 });
    }

    #[test]
    fn spaced_rep_session_advances_tier() {
        let config = Config {
            spaced_rep: true,
            ..Config::default()
        };
        let mut store = store_with(&[(1, ProblemList::Grind75, 2), (2, ProblemList::Grind169, 3)]);
        let outcome = run(&mut store, &config, &RecordingOpener::default(), "y\n")
            .0
            .unwrap();
        assert_eq!(outcome.action, ResponseAction::Completed { number: 1, tier: 3 });
    }
}
