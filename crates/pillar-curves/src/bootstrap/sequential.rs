//! Sequential bootstrap algorithm.
//!
//! Solves one node per helper, in pillar order, each against the nodes
//! already solved. Non-local interpolations are then re-swept until the
//! node values stop moving.

use std::cell::{Cell, RefCell};
use std::sync::Arc;

use pillar_core::daycounts::DayCountConvention;
use pillar_core::types::Date;
use pillar_math::error::MathError;
use pillar_math::solvers::Solver;
use tracing::{debug, warn};

use super::{BootstrapCurve, BootstrapTrait};
use crate::config::BootstrapConfig;
use crate::error::{CurveError, CurveResult};
use crate::helpers::RateHelper;
use crate::jumps::JumpOverlay;

/// Node values produced by one bootstrap pass.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Nodes {
    pub times: Vec<f64>,
    pub data: Vec<f64>,
    pub dates: Vec<Date>,
    /// Objective evaluations across all segments
    pub evaluations: usize,
    /// Full sweeps, including the first
    pub sweeps: u32,
}

/// One bootstrap pass over sorted helpers.
pub(crate) struct Bootstrapper<'a, T: BootstrapTrait, S: Solver> {
    pub strategy: &'a T,
    pub solver: &'a S,
    pub helpers: &'a [Arc<dyn RateHelper>],
    pub reference_date: Date,
    pub day_count: DayCountConvention,
    pub jumps: &'a JumpOverlay,
    pub config: &'a BootstrapConfig,
}

impl<T: BootstrapTrait, S: Solver> Bootstrapper<'_, T, S> {
    /// Runs the pass.
    ///
    /// # Errors
    ///
    /// Fails on an unusable quote before any solving starts, on pillars
    /// whose times do not increase, and on any segment the solver cannot
    /// bring within accuracy.
    pub fn run(&self) -> CurveResult<Nodes> {
        self.validate_inputs()?;

        let n = self.helpers.len();
        let mut times = Vec::with_capacity(n + 1);
        let mut dates = Vec::with_capacity(n + 1);
        let mut data = Vec::with_capacity(n + 1);
        times.push(0.0);
        dates.push(self.reference_date);
        data.push(self.strategy.initial_value());

        let mut evaluations = 0;
        for (i, helper) in self.helpers.iter().enumerate().map(|(k, h)| (k + 1, h)) {
            let pillar = helper.pillar_date();
            let t = self.day_count.year_fraction(self.reference_date, pillar);
            let previous = times[i - 1];
            if !(t > previous) {
                return Err(CurveError::NonIncreasingPillar {
                    date: pillar,
                    time: t,
                    previous,
                });
            }
            times.push(t);
            dates.push(pillar);

            let guess = self.strategy.guess(i, &data, &times);
            data.push(guess);
            evaluations += self.solve_segment(i, &times, &dates, &mut data, guess)?;
        }

        let mut sweeps = 1;
        if !self.config.interpolation.is_local() && n > 1 {
            sweeps += self.refine(&times, &dates, &mut data, &mut evaluations)?;
        }

        Ok(Nodes {
            times,
            data,
            dates,
            evaluations,
            sweeps,
        })
    }

    fn validate_inputs(&self) -> CurveResult<()> {
        for helper in self.helpers {
            helper.quote().value()?;
            if helper.earliest_date() < self.reference_date {
                return Err(CurveError::invalid_helper(format!(
                    "{} starts before reference date {}",
                    helper.description(),
                    self.reference_date
                )));
            }
        }
        self.jumps.validate()
    }

    /// Re-solves every segment on the full node set until no node moves
    /// by more than the accuracy. Returns the number of extra sweeps.
    fn refine(
        &self,
        times: &[f64],
        dates: &[Date],
        data: &mut [f64],
        evaluations: &mut usize,
    ) -> CurveResult<u32> {
        let n = self.helpers.len();
        let mut change = f64::INFINITY;
        for sweep in 1..=self.config.max_iterations {
            let previous = data.to_vec();
            for i in 1..=n {
                let guess = data[i];
                *evaluations += self.solve_segment(i, times, dates, data, guess)?;
            }
            change = data
                .iter()
                .zip(&previous)
                .map(|(a, b)| (a - b).abs())
                .fold(0.0_f64, f64::max);
            debug!(sweep, change, "refinement sweep");
            if change <= self.config.accuracy {
                return Ok(sweep);
            }
        }
        Err(self.failure(
            n,
            dates[n],
            change,
            self.config.max_iterations,
            "node values did not settle between sweeps".to_string(),
        ))
    }

    /// Solves node `i` in place. `data` may extend past `i`: every node it
    /// holds is part of the curve the helper is priced on.
    ///
    /// Returns the number of objective evaluations.
    fn solve_segment(
        &self,
        i: usize,
        times: &[f64],
        dates: &[Date],
        data: &mut [f64],
        guess: f64,
    ) -> CurveResult<usize> {
        let helper = self.helpers[i - 1].as_ref();
        let pillar = dates[i];
        let (lower, upper) = self.strategy.bounds(i, data, times, self.config.max_rate);
        let guess = guess.max(lower).min(upper);

        let scratch = RefCell::new(data.to_vec());
        let captured: RefCell<Option<CurveError>> = RefCell::new(None);
        let calls = Cell::new(0_usize);
        let objective = |x: f64| -> f64 {
            calls.set(calls.get() + 1);
            let mut nodes = scratch.borrow_mut();
            self.strategy.update_guess(&mut nodes, x, i);
            match self.quote_error(helper, times, dates, &nodes) {
                Ok(error) => error,
                Err(e) => {
                    captured.borrow_mut().get_or_insert(e);
                    f64::NAN
                }
            }
        };

        let outcome = self.solver.solve(
            &objective,
            None::<fn(f64) -> f64>,
            guess,
            Some((lower, upper)),
            &self.config.solver_config(),
        );
        let evaluations = calls.get();

        match outcome {
            Ok(result) => {
                self.strategy.update_guess(data, result.root, i);
                let residual = self.quote_error(helper, times, dates, data)?;
                if !(residual.abs() <= self.config.accuracy) {
                    return Err(self.failure(
                        i,
                        pillar,
                        residual,
                        result.iterations,
                        format!(
                            "{} residual {residual:.2e} exceeds accuracy {:.0e}",
                            helper.description(),
                            self.config.accuracy
                        ),
                    ));
                }
                debug!(
                    segment = i,
                    pillar = %pillar,
                    value = result.root,
                    iterations = result.iterations,
                    residual,
                    "segment solved"
                );
                Ok(evaluations)
            }
            Err(err) => {
                if let Some(cause) = captured.into_inner() {
                    warn!(segment = i, pillar = %pillar, error = %cause, "helper failed during solve");
                    return Err(cause);
                }
                let (residual, iterations) = match err {
                    MathError::ConvergenceFailed {
                        iterations,
                        residual,
                    } => (residual, iterations),
                    MathError::InvalidBracket { fa, fb, .. } => (fa.abs().min(fb.abs()), 0),
                    _ => (f64::NAN, 0),
                };
                Err(self.failure(
                    i,
                    pillar,
                    residual,
                    iterations,
                    format!("{}: {err}", helper.description()),
                ))
            }
        }
    }

    fn quote_error(
        &self,
        helper: &dyn RateHelper,
        times: &[f64],
        dates: &[Date],
        data: &[f64],
    ) -> CurveResult<f64> {
        let view = BootstrapCurve::new(
            self.reference_date,
            self.day_count,
            dates,
            times,
            data,
            self.config.interpolation,
            self.strategy,
            self.jumps,
        )?;
        helper.quote_error(&view)
    }

    fn failure(
        &self,
        segment: usize,
        pillar: Date,
        residual: f64,
        iterations: u32,
        reason: String,
    ) -> CurveError {
        warn!(
            segment,
            pillar = %pillar,
            residual,
            iterations,
            reason = %reason,
            "bootstrap segment failed"
        );
        CurveError::bootstrap_failed(segment, pillar, residual, iterations, reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bootstrap::{Discount, ZeroYield};
    use crate::helpers::DepositRateHelper;
    use crate::interpolation::InterpolationMethod;
    use approx::assert_relative_eq;
    use pillar_core::quotes::{QuoteHandle, SimpleQuote};
    use pillar_math::solvers::BrentSolver;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    fn deposit(rate: f64, start: Date, end: Date) -> Arc<dyn RateHelper> {
        Arc::new(
            DepositRateHelper::new(
                QuoteHandle::from(SimpleQuote::new(rate)),
                start,
                end,
                DayCountConvention::Act360,
            )
            .unwrap(),
        )
    }

    fn run<T: BootstrapTrait>(
        strategy: &T,
        helpers: &[Arc<dyn RateHelper>],
        config: &BootstrapConfig,
    ) -> CurveResult<Nodes> {
        Bootstrapper {
            strategy,
            solver: &BrentSolver,
            helpers,
            reference_date: d(2025, 1, 15),
            day_count: DayCountConvention::Act365Fixed,
            jumps: &JumpOverlay::none(),
            config,
        }
        .run()
    }

    #[test]
    fn test_single_deposit_discount() {
        let reference = d(2025, 1, 15);
        let end = d(2025, 4, 15);
        let helpers = vec![deposit(0.02, reference, end)];
        let nodes = run(&Discount, &helpers, &BootstrapConfig::default()).unwrap();

        assert_eq!(nodes.times.len(), 2);
        assert_eq!(nodes.data[0], 1.0);
        assert_relative_eq!(nodes.data[1], 1.0 / (1.0 + 0.02 * 90.0 / 360.0), epsilon = 1e-12);
        assert_eq!(nodes.dates, vec![reference, end]);
        assert_eq!(nodes.sweeps, 1);
        assert!(nodes.evaluations > 0);
    }

    #[test]
    fn test_times_must_increase() {
        let reference = d(2025, 1, 15);
        // Out of order on purpose: the bootstrapper expects sorted input
        let helpers = vec![
            deposit(0.02, reference, d(2025, 7, 15)),
            deposit(0.02, reference, d(2025, 4, 15)),
        ];
        let err = run(&Discount, &helpers, &BootstrapConfig::default()).unwrap_err();
        assert!(matches!(err, CurveError::NonIncreasingPillar { .. }));
    }

    #[test]
    fn test_empty_quote_fails_before_solving() {
        let reference = d(2025, 1, 15);
        let helper: Arc<dyn RateHelper> = Arc::new(
            DepositRateHelper::new(
                QuoteHandle::empty(),
                reference,
                d(2025, 4, 15),
                DayCountConvention::Act360,
            )
            .unwrap(),
        );
        let err = run(&Discount, &[helper], &BootstrapConfig::default()).unwrap_err();
        assert_eq!(err, CurveError::EmptyHandle);
    }

    #[test]
    fn test_helper_before_reference_date() {
        let helpers = vec![deposit(0.02, d(2025, 1, 10), d(2025, 4, 15))];
        let err = run(&Discount, &helpers, &BootstrapConfig::default()).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_unbracketed_quote_reports_segment() {
        let reference = d(2025, 1, 15);
        let helpers = vec![
            deposit(0.02, reference, d(2025, 4, 15)),
            deposit(0.90, reference, d(2025, 7, 15)),
        ];
        let config = BootstrapConfig::default().with_max_rate(0.10);
        match run(&Discount, &helpers, &config).unwrap_err() {
            CurveError::BootstrapFailure {
                segment,
                pillar,
                residual,
                ..
            } => {
                assert_eq!(segment, 2);
                assert_eq!(pillar, d(2025, 7, 15));
                assert!(residual > 0.0);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_spline_refinement_settles() {
        let reference = d(2025, 1, 15);
        let helpers = vec![
            deposit(0.020, reference, d(2025, 4, 15)),
            deposit(0.022, reference, d(2025, 7, 15)),
            deposit(0.025, reference, d(2025, 10, 15)),
            deposit(0.027, reference, d(2026, 1, 15)),
        ];
        let config = BootstrapConfig::default()
            .with_accuracy(1e-10)
            .with_interpolation(InterpolationMethod::CubicSpline);
        let nodes = run(&ZeroYield, &helpers, &config).unwrap();
        assert!(nodes.sweeps > 1);

        // Every helper reprices on the final node set
        let none = JumpOverlay::none();
        for helper in &helpers {
            let view = BootstrapCurve::new(
                reference,
                DayCountConvention::Act365Fixed,
                &nodes.dates,
                &nodes.times,
                &nodes.data,
                config.interpolation,
                &ZeroYield,
                &none,
            )
            .unwrap();
            assert!(helper.quote_error(&view).unwrap().abs() < 1e-9);
        }
    }
}
