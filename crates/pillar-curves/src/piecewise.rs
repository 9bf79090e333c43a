//! Piecewise yield curve bootstrapped from rate helpers.
//!
//! [`PiecewiseYieldCurve`] is lazy: it observes every quote it was built
//! from, a quote change only marks it dirty, and the next read runs a new
//! bootstrap pass. Downstream objects can observe the curve in turn.
//!
//! # Example
//!
//! ```rust,ignore
//! use pillar_curves::prelude::*;
//!
//! let curve = PiecewiseYieldCurveBuilder::new(ReferenceDate::Fixed(today))
//!     .add_helper(deposit_3m)
//!     .add_helper(swap_1y)
//!     .interpolation(InterpolationMethod::LogLinear)
//!     .build()?;
//!
//! let df = curve.discount(maturity, false)?;
//! ```

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
#[cfg(test)]
use std::sync::atomic::AtomicUsize;
use std::sync::{Arc, Weak};

use parking_lot::{RwLock, RwLockReadGuard};
use pillar_core::calendars::Calendar;
use pillar_core::daycounts::DayCountConvention;
use pillar_core::observer::{Observable, Observer};
use pillar_core::quotes::QuoteHandle;
use pillar_core::settings::EvaluationDate;
use pillar_core::types::Date;
use pillar_math::interpolation::Interpolator;
use pillar_math::solvers::{BrentSolver, Solver};
use tracing::{debug, info};

use crate::bootstrap::{BootstrapTrait, Bootstrapper, Discount, TraitKind};
use crate::config::{BootstrapConfig, CurveConfig};
use crate::error::{CurveError, CurveResult};
use crate::helpers::RateHelper;
use crate::interpolation::InterpolationMethod;
use crate::jumps::JumpOverlay;
use crate::repricing::{RepricingCheck, RepricingReport};
use crate::traits::{check_time, Curve};

/// How a curve finds the date at which its time is zero.
#[derive(Clone)]
pub enum ReferenceDate {
    /// A fixed date.
    Fixed(Date),

    /// The evaluation date advanced by a number of business days.
    Moving {
        /// Business days between evaluation and reference date
        settlement_days: u32,
        /// Calendar the settlement days are counted on
        calendar: Arc<dyn Calendar>,
        /// The evaluation date followed
        evaluation_date: Arc<EvaluationDate>,
    },
}

impl ReferenceDate {
    /// Creates a moving reference date.
    #[must_use]
    pub fn moving(
        settlement_days: u32,
        calendar: Arc<dyn Calendar>,
        evaluation_date: Arc<EvaluationDate>,
    ) -> Self {
        Self::Moving {
            settlement_days,
            calendar,
            evaluation_date,
        }
    }

    /// The current reference date.
    #[must_use]
    pub fn resolve(&self) -> Date {
        match self {
            Self::Fixed(date) => *date,
            Self::Moving {
                settlement_days,
                calendar,
                evaluation_date,
            } => calendar.advance_business_days(evaluation_date.value(), *settlement_days as i32),
        }
    }

    /// Returns true if the date follows an evaluation date.
    #[must_use]
    pub fn is_moving(&self) -> bool {
        matches!(self, Self::Moving { .. })
    }

    fn register_observer(&self, observer: &Weak<dyn Observer>) {
        if let Self::Moving {
            evaluation_date, ..
        } = self
        {
            evaluation_date.register_observer(observer.clone());
        }
    }
}

impl fmt::Debug for ReferenceDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(date) => f.debug_tuple("Fixed").field(date).finish(),
            Self::Moving {
                settlement_days,
                calendar,
                evaluation_date,
            } => f
                .debug_struct("Moving")
                .field("settlement_days", settlement_days)
                .field("calendar", &calendar.name())
                .field("evaluation_date", &evaluation_date.value())
                .finish(),
        }
    }
}

impl From<Date> for ReferenceDate {
    fn from(date: Date) -> Self {
        Self::Fixed(date)
    }
}

/// Result of the last successful pass.
struct CurveState {
    reference_date: Date,
    times: Vec<f64>,
    data: Vec<f64>,
    dates: Vec<Date>,
    interpolator: Option<Box<dyn Interpolator>>,
    jumps: JumpOverlay,
}

impl CurveState {
    fn interpolator(&self) -> CurveResult<&dyn Interpolator> {
        self.interpolator
            .as_deref()
            .ok_or_else(|| CurveError::invalid_input("curve has no nodes"))
    }

    fn max_time(&self) -> f64 {
        self.times.last().copied().unwrap_or(0.0)
    }
}

/// A yield curve whose nodes are bootstrapped from market instruments.
///
/// `T` chooses the quantity stored on the nodes, `S` the root finder used
/// for each segment.
pub struct PiecewiseYieldCurve<T: BootstrapTrait = Discount, S: Solver = BrentSolver> {
    reference: ReferenceDate,
    helpers: Vec<Arc<dyn RateHelper>>,
    day_count: DayCountConvention,
    config: BootstrapConfig,
    strategy: T,
    solver: S,
    state: RwLock<CurveState>,
    dirty: AtomicBool,
    observable: Observable,
    #[cfg(test)]
    calculations: AtomicUsize,
}

impl<T: BootstrapTrait, S: Solver> PiecewiseYieldCurve<T, S> {
    /// Runs a bootstrap pass if the curve is dirty.
    ///
    /// # Errors
    ///
    /// Returns the error of the pass. The curve then stays dirty and the
    /// next read retries.
    pub fn calculate(&self) -> CurveResult<()> {
        if !self.dirty.load(Ordering::Acquire) {
            return Ok(());
        }
        let mut state = self.state.write();
        if !self.dirty.load(Ordering::Acquire) {
            return Ok(());
        }
        // Cleared first so that an update arriving mid-pass is kept
        self.dirty.store(false, Ordering::Release);
        let result = self.perform_calculations(&mut state);
        if result.is_err() {
            self.dirty.store(true, Ordering::Release);
        }
        result
    }

    /// Runs a bootstrap pass unconditionally.
    pub fn recalculate(&self) -> CurveResult<()> {
        self.dirty.store(true, Ordering::Release);
        self.calculate()
    }

    fn perform_calculations(&self, state: &mut CurveState) -> CurveResult<()> {
        let reference_date = self.reference.resolve();
        state.jumps.set_jumps(reference_date, self.day_count)?;

        let nodes = Bootstrapper {
            strategy: &self.strategy,
            solver: &self.solver,
            helpers: &self.helpers,
            reference_date,
            day_count: self.day_count,
            jumps: &state.jumps,
            config: &self.config,
        }
        .run()?;
        let interpolator = self
            .config
            .interpolation
            .build(&nodes.times, &nodes.data, true)?;

        info!(
            reference_date = %reference_date,
            instruments = self.helpers.len(),
            trait_kind = %self.strategy.kind(),
            interpolation = %self.config.interpolation,
            evaluations = nodes.evaluations,
            sweeps = nodes.sweeps,
            "curve bootstrapped"
        );

        state.reference_date = reference_date;
        state.times = nodes.times;
        state.data = nodes.data;
        state.dates = nodes.dates;
        state.interpolator = Some(interpolator);
        #[cfg(test)]
        self.calculations.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    fn fresh(&self) -> CurveResult<RwLockReadGuard<'_, CurveState>> {
        self.calculate()?;
        Ok(self.state.read())
    }

    /// Returns true if the next read will run a bootstrap pass.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::Acquire)
    }

    /// `(date, value)` for every node, reference date first.
    pub fn nodes(&self) -> CurveResult<Vec<(Date, f64)>> {
        let state = self.fresh()?;
        Ok(state
            .dates
            .iter()
            .copied()
            .zip(state.data.iter().copied())
            .collect())
    }

    /// Node times, starting at zero.
    pub fn times(&self) -> CurveResult<Vec<f64>> {
        Ok(self.fresh()?.times.clone())
    }

    /// Node dates, starting at the reference date.
    pub fn dates(&self) -> CurveResult<Vec<Date>> {
        Ok(self.fresh()?.dates.clone())
    }

    /// Node values in the units of the bootstrap trait.
    pub fn data(&self) -> CurveResult<Vec<f64>> {
        Ok(self.fresh()?.data.clone())
    }

    /// Jump dates for the current reference date.
    pub fn jump_dates(&self) -> CurveResult<Vec<Date>> {
        Ok(self.fresh()?.jumps.dates().to_vec())
    }

    /// Jump times for the current reference date.
    pub fn jump_times(&self) -> CurveResult<Vec<f64>> {
        Ok(self.fresh()?.jumps.times().to_vec())
    }

    /// Helpers in pillar order.
    #[must_use]
    pub fn helpers(&self) -> &[Arc<dyn RateHelper>] {
        &self.helpers
    }

    /// Bootstrap settings.
    #[must_use]
    pub fn config(&self) -> &BootstrapConfig {
        &self.config
    }

    /// Quantity stored on the nodes.
    #[must_use]
    pub fn trait_kind(&self) -> TraitKind {
        self.strategy.kind()
    }

    /// Interpolation over the nodes.
    #[must_use]
    pub fn interpolation(&self) -> InterpolationMethod {
        self.config.interpolation
    }

    /// How the reference date is found.
    #[must_use]
    pub fn reference(&self) -> &ReferenceDate {
        &self.reference
    }

    /// Quote error of every helper on the current curve.
    pub fn quote_errors(&self) -> CurveResult<Vec<f64>> {
        self.calculate()?;
        self.helpers
            .iter()
            .map(|helper| helper.quote_error(self))
            .collect()
    }

    /// Reprices every helper on the current curve.
    pub fn repricing_report(&self) -> CurveResult<RepricingReport> {
        self.calculate()?;
        let checks = self
            .helpers
            .iter()
            .map(|helper| RepricingCheck::from_helper(helper.as_ref(), self, self.config.accuracy))
            .collect::<CurveResult<Vec<_>>>()?;
        Ok(RepricingReport::new(checks, self.config.accuracy))
    }

    /// Registers a downstream observer of this curve.
    pub fn register_observer(&self, observer: Weak<dyn Observer>) {
        self.observable.register_observer(observer);
    }

    /// Number of completed bootstrap passes.
    #[cfg(test)]
    pub(crate) fn calculation_count(&self) -> usize {
        self.calculations.load(Ordering::Relaxed)
    }
}

impl<T: BootstrapTrait, S: Solver> Curve for PiecewiseYieldCurve<T, S> {
    fn reference_date(&self) -> Date {
        self.reference.resolve()
    }

    fn day_count(&self) -> DayCountConvention {
        self.day_count
    }

    fn max_date(&self) -> CurveResult<Date> {
        let state = self.fresh()?;
        Ok(state.dates.last().copied().unwrap_or(state.reference_date))
    }

    fn max_time(&self) -> CurveResult<f64> {
        Ok(self.fresh()?.max_time())
    }

    fn allows_extrapolation(&self) -> bool {
        self.config.allow_extrapolation
    }

    fn discount_t(&self, t: f64, extrapolate: bool) -> CurveResult<f64> {
        let state = self.fresh()?;
        check_time(
            t,
            state.max_time(),
            extrapolate || self.config.allow_extrapolation,
        )?;
        let discount = self.strategy.discount(state.interpolator()?, t)?;
        Ok(discount * state.jumps.factor(t)?)
    }
}

impl<T: BootstrapTrait, S: Solver> Observer for PiecewiseYieldCurve<T, S> {
    fn update(&self) {
        let was_dirty = self.dirty.swap(true, Ordering::AcqRel);
        debug!(was_dirty, "curve invalidated");
        self.observable.notify_observers();
    }
}

impl<T: BootstrapTrait, S: Solver> fmt::Debug for PiecewiseYieldCurve<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PiecewiseYieldCurve")
            .field("reference", &self.reference)
            .field("helpers", &self.helpers.len())
            .field("trait_kind", &self.strategy.kind())
            .field("interpolation", &self.config.interpolation)
            .field("solver", &self.solver.name())
            .field("dirty", &self.is_dirty())
            .finish_non_exhaustive()
    }
}

impl PiecewiseYieldCurve {
    /// Starts a builder for a discount-factor curve solved with Brent.
    #[must_use]
    pub fn builder(reference: impl Into<ReferenceDate>) -> PiecewiseYieldCurveBuilder {
        PiecewiseYieldCurveBuilder::new(reference)
    }
}

/// Builder for [`PiecewiseYieldCurve`].
pub struct PiecewiseYieldCurveBuilder<T: BootstrapTrait = Discount, S: Solver = BrentSolver> {
    reference: ReferenceDate,
    helpers: Vec<Arc<dyn RateHelper>>,
    day_count: DayCountConvention,
    jumps: Vec<QuoteHandle>,
    jump_dates: Vec<Date>,
    config: BootstrapConfig,
    strategy: T,
    solver: S,
}

impl PiecewiseYieldCurveBuilder {
    /// Creates a builder with ACT/365F, log-linear discount factors and
    /// the Brent solver.
    #[must_use]
    pub fn new(reference: impl Into<ReferenceDate>) -> Self {
        Self {
            reference: reference.into(),
            helpers: Vec::new(),
            day_count: DayCountConvention::default(),
            jumps: Vec::new(),
            jump_dates: Vec::new(),
            config: BootstrapConfig::default(),
            strategy: Discount,
            solver: BrentSolver,
        }
    }
}

impl PiecewiseYieldCurveBuilder<Box<dyn BootstrapTrait>, BrentSolver> {
    /// Creates a builder from a curve configuration.
    ///
    /// The trait is chosen at runtime from `config.trait_kind`.
    pub fn from_config(
        reference: impl Into<ReferenceDate>,
        config: &CurveConfig,
    ) -> CurveResult<Self> {
        config.validate()?;
        Ok(Self {
            reference: reference.into(),
            helpers: Vec::new(),
            day_count: config.day_count,
            jumps: Vec::new(),
            jump_dates: config.jump_dates.clone(),
            config: config.bootstrap,
            strategy: config.trait_kind.strategy(),
            solver: BrentSolver,
        })
    }
}

impl<T: BootstrapTrait, S: Solver> PiecewiseYieldCurveBuilder<T, S> {
    /// Adds a helper.
    #[must_use]
    pub fn add_helper<H: RateHelper + 'static>(mut self, helper: H) -> Self {
        self.helpers.push(Arc::new(helper));
        self
    }

    /// Adds a helper shared with other curves.
    #[must_use]
    pub fn add_shared_helper(mut self, helper: Arc<dyn RateHelper>) -> Self {
        self.helpers.push(helper);
        self
    }

    /// Adds several shared helpers.
    #[must_use]
    pub fn add_helpers(mut self, helpers: impl IntoIterator<Item = Arc<dyn RateHelper>>) -> Self {
        self.helpers.extend(helpers);
        self
    }

    /// Sets the day count of curve time.
    #[must_use]
    pub fn day_count(mut self, day_count: DayCountConvention) -> Self {
        self.day_count = day_count;
        self
    }

    /// Sets the jump quotes.
    #[must_use]
    pub fn jumps(mut self, jumps: Vec<QuoteHandle>) -> Self {
        self.jumps = jumps;
        self
    }

    /// Sets explicit jump dates. Without them jumps fall on year ends.
    #[must_use]
    pub fn jump_dates(mut self, dates: Vec<Date>) -> Self {
        self.jump_dates = dates;
        self
    }

    /// Replaces the bootstrap settings.
    #[must_use]
    pub fn config(mut self, config: BootstrapConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the interpolation.
    #[must_use]
    pub fn interpolation(mut self, interpolation: InterpolationMethod) -> Self {
        self.config.interpolation = interpolation;
        self
    }

    /// Sets the per-segment accuracy.
    #[must_use]
    pub fn accuracy(mut self, accuracy: f64) -> Self {
        self.config.accuracy = accuracy;
        self
    }

    /// Allows reads past the last pillar without the per-call flag.
    #[must_use]
    pub fn allow_extrapolation(mut self, allow: bool) -> Self {
        self.config.allow_extrapolation = allow;
        self
    }

    /// Chooses the quantity stored on the nodes.
    #[must_use]
    pub fn strategy<U: BootstrapTrait>(self, strategy: U) -> PiecewiseYieldCurveBuilder<U, S> {
        PiecewiseYieldCurveBuilder {
            reference: self.reference,
            helpers: self.helpers,
            day_count: self.day_count,
            jumps: self.jumps,
            jump_dates: self.jump_dates,
            config: self.config,
            strategy,
            solver: self.solver,
        }
    }

    /// Chooses the root finder.
    #[must_use]
    pub fn solver<R: Solver>(self, solver: R) -> PiecewiseYieldCurveBuilder<T, R> {
        PiecewiseYieldCurveBuilder {
            reference: self.reference,
            helpers: self.helpers,
            day_count: self.day_count,
            jumps: self.jumps,
            jump_dates: self.jump_dates,
            config: self.config,
            strategy: self.strategy,
            solver,
        }
    }
}

impl<T: BootstrapTrait, S: Solver + 'static> PiecewiseYieldCurveBuilder<T, S> {
    /// Validates the inputs and creates the curve.
    ///
    /// No bootstrap runs here: the first read does it.
    ///
    /// # Errors
    ///
    /// Configuration errors for an empty helper set, two helpers with the
    /// same pillar date, a jump/date count mismatch, an interpolation the
    /// trait cannot use, or invalid settings.
    pub fn build(self) -> CurveResult<Arc<PiecewiseYieldCurve<T, S>>> {
        let mut helpers = self.helpers;
        if helpers.is_empty() {
            return Err(CurveError::InsufficientInstruments {
                required: 1,
                got: 0,
            });
        }
        helpers.sort_by_key(|helper| helper.pillar_date());
        if let Some(pair) = helpers
            .windows(2)
            .find(|pair| pair[0].pillar_date() == pair[1].pillar_date())
        {
            return Err(CurveError::duplicate_pillar(pair[1].pillar_date()));
        }

        let jumps = JumpOverlay::new(self.jumps, self.jump_dates)?;
        self.strategy.supports(self.config.interpolation)?;
        self.config.validate()?;

        let reference_date = self.reference.resolve();
        let curve = Arc::new_cyclic(|weak: &Weak<PiecewiseYieldCurve<T, S>>| {
            let observer: Weak<dyn Observer> = weak.clone();
            for helper in &helpers {
                helper.register_observer(&observer);
            }
            jumps.register_observer(&observer);
            self.reference.register_observer(&observer);

            PiecewiseYieldCurve {
                reference: self.reference,
                helpers,
                day_count: self.day_count,
                config: self.config,
                strategy: self.strategy,
                solver: self.solver,
                state: RwLock::new(CurveState {
                    reference_date,
                    times: Vec::new(),
                    data: Vec::new(),
                    dates: Vec::new(),
                    interpolator: None,
                    jumps,
                }),
                dirty: AtomicBool::new(true),
                observable: Observable::new(),
                #[cfg(test)]
                calculations: AtomicUsize::new(0),
            }
        });
        debug!(
            reference_date = %reference_date,
            instruments = curve.helpers.len(),
            trait_kind = %curve.strategy.kind(),
            "curve created"
        );
        Ok(curve)
    }
}

impl<T: BootstrapTrait, S: Solver> fmt::Debug for PiecewiseYieldCurveBuilder<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PiecewiseYieldCurveBuilder")
            .field("reference", &self.reference)
            .field("helpers", &self.helpers.len())
            .field("jumps", &self.jumps.len())
            .field("config", &self.config)
            .field("strategy", &self.strategy)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helpers::DepositRateHelper;
    use pillar_core::calendars::WeekendCalendar;
    use pillar_core::quotes::SimpleQuote;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    fn deposit(quote: &Arc<SimpleQuote>, start: Date, end: Date) -> DepositRateHelper {
        DepositRateHelper::new(
            QuoteHandle::from(quote.clone()),
            start,
            end,
            DayCountConvention::Act360,
        )
        .unwrap()
    }

    fn two_deposit_curve(
        reference: impl Into<ReferenceDate>,
        start: Date,
    ) -> (Arc<SimpleQuote>, Arc<PiecewiseYieldCurve>) {
        let short = SimpleQuote::new(0.02);
        let long = SimpleQuote::new(0.025);
        let curve = PiecewiseYieldCurve::builder(reference)
            .add_helper(deposit(&short, start, d(2025, 4, 17)))
            .add_helper(deposit(&long, start, d(2025, 7, 17)))
            .build()
            .unwrap();
        (short, curve)
    }

    #[derive(Default)]
    struct Counter {
        updates: AtomicUsize,
    }

    impl Observer for Counter {
        fn update(&self) {
            self.updates.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_reads_are_lazy() {
        let (quote, curve) = two_deposit_curve(d(2025, 1, 15), d(2025, 1, 17));
        assert!(curve.is_dirty());
        assert_eq!(curve.calculation_count(), 0);

        curve.discount(d(2025, 5, 1), false).unwrap();
        curve.discount(d(2025, 6, 1), false).unwrap();
        curve.nodes().unwrap();
        assert_eq!(curve.calculation_count(), 1);

        quote.set_value(0.021);
        assert!(curve.is_dirty());
        assert_eq!(curve.calculation_count(), 1);

        curve.max_date().unwrap();
        assert_eq!(curve.calculation_count(), 2);
        assert!(!curve.is_dirty());
    }

    #[test]
    fn test_recalculate_is_idempotent() {
        let (_quote, curve) = two_deposit_curve(d(2025, 1, 15), d(2025, 1, 17));
        let before = curve.data().unwrap();
        curve.recalculate().unwrap();
        let after = curve.data().unwrap();
        assert_eq!(curve.calculation_count(), 2);
        for (a, b) in before.iter().zip(&after) {
            assert_eq!(a.to_bits(), b.to_bits());
        }
    }

    #[test]
    fn test_failed_pass_stays_dirty() {
        let (quote, curve) = two_deposit_curve(d(2025, 1, 15), d(2025, 1, 17));
        curve.calculate().unwrap();

        quote.reset();
        assert!(matches!(
            curve.discount_t(0.1, false),
            Err(CurveError::InvalidQuote { .. })
        ));
        assert!(curve.is_dirty());
        assert_eq!(curve.calculation_count(), 1);

        quote.set_value(0.02);
        assert!(curve.discount_t(0.1, false).is_ok());
        assert_eq!(curve.calculation_count(), 2);
    }

    #[test]
    fn test_downstream_observers_are_notified() {
        let (quote, curve) = two_deposit_curve(d(2025, 1, 15), d(2025, 1, 17));
        let counter = Arc::new(Counter::default());
        let weak: Weak<dyn Observer> = Arc::downgrade(&counter) as Weak<dyn Observer>;
        curve.register_observer(weak);

        quote.set_value(0.022);
        assert_eq!(counter.updates.load(Ordering::SeqCst), 1);
        // No change, no notification
        quote.set_value(0.022);
        assert_eq!(counter.updates.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_moving_reference_follows_evaluation_date() {
        let today = EvaluationDate::new(d(2025, 1, 13));
        let reference = ReferenceDate::moving(0, Arc::new(WeekendCalendar), today.clone());
        let (_quote, curve) = two_deposit_curve(reference, d(2025, 1, 17));

        assert_eq!(curve.reference_date(), d(2025, 1, 13));
        let times_before = curve.times().unwrap();
        let jumps_before = curve.jump_dates().unwrap();
        assert!(jumps_before.is_empty());

        today.set(d(2025, 1, 14));
        assert!(curve.is_dirty());
        assert_eq!(curve.reference_date(), d(2025, 1, 14));
        let nodes = curve.nodes().unwrap();
        assert_eq!(nodes[0], (d(2025, 1, 14), 1.0));
        let times_after = curve.times().unwrap();
        assert!((times_before[1] - times_after[1] - 1.0 / 365.0).abs() < 1e-14);
        assert_eq!(curve.calculation_count(), 2);
    }

    #[test]
    fn test_builder_rejections() {
        let start = d(2025, 1, 17);
        let quote = SimpleQuote::new(0.02);

        let empty = PiecewiseYieldCurve::builder(d(2025, 1, 15)).build();
        assert!(matches!(
            empty,
            Err(CurveError::InsufficientInstruments { got: 0, .. })
        ));

        let duplicate = PiecewiseYieldCurve::builder(d(2025, 1, 15))
            .add_helper(deposit(&quote, start, d(2025, 4, 17)))
            .add_helper(deposit(&quote, d(2025, 1, 20), d(2025, 4, 17)))
            .build();
        assert_eq!(
            duplicate.unwrap_err(),
            CurveError::DuplicatePillar { date: d(2025, 4, 17) }
        );

        let jumps = PiecewiseYieldCurve::builder(d(2025, 1, 15))
            .add_helper(deposit(&quote, start, d(2025, 4, 17)))
            .jumps(vec![QuoteHandle::from(SimpleQuote::new(0.999))])
            .jump_dates(vec![d(2025, 12, 31), d(2026, 12, 31)])
            .build();
        assert!(matches!(
            jumps,
            Err(CurveError::JumpCountMismatch { jumps: 1, dates: 2 })
        ));

        let accuracy = PiecewiseYieldCurve::builder(d(2025, 1, 15))
            .add_helper(deposit(&quote, start, d(2025, 4, 17)))
            .accuracy(0.0)
            .build();
        assert!(accuracy.unwrap_err().is_configuration());

        let flat_discounts = PiecewiseYieldCurve::builder(d(2025, 1, 15))
            .add_helper(deposit(&quote, start, d(2025, 4, 17)))
            .interpolation(InterpolationMethod::BackwardFlat)
            .build();
        assert!(matches!(
            flat_discounts,
            Err(CurveError::UnsupportedInterpolation { .. })
        ));
    }

    #[test]
    fn test_from_config_selects_trait() {
        let config = CurveConfig::from_toml_str(
            r#"
            trait_kind = "ZeroYield"

            [bootstrap]
            interpolation = "Linear"
            "#,
        )
        .unwrap();
        let quote = SimpleQuote::new(0.02);
        let curve = PiecewiseYieldCurveBuilder::from_config(d(2025, 1, 15), &config)
            .unwrap()
            .add_helper(deposit(&quote, d(2025, 1, 17), d(2025, 4, 17)))
            .build()
            .unwrap();
        assert_eq!(curve.trait_kind(), TraitKind::ZeroYield);
        let data = curve.data().unwrap();
        // Flat zero before the first pillar
        assert_eq!(data[0], data[1]);
    }
}
