//! Builds a USD curve from deposits, futures and swaps with a year-end jump.
//!
//! Run with: `RUST_LOG=pillar_curves=debug cargo run -p pillar-curves --example usd_curve`

use std::sync::Arc;

use anyhow::Result;
use pillar_curves::prelude::*;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let evaluation = EvaluationDate::new(Date::from_ymd(2025, 1, 15)?);
    let calendar: Arc<dyn Calendar> = Arc::new(WeekendCalendar);
    let reference = ReferenceDate::moving(2, calendar.clone(), evaluation.clone());
    let spot = reference.resolve();
    let mf = BusinessDayConvention::ModifiedFollowing;

    let mut quotes = Vec::new();
    let mut helpers: Vec<Arc<dyn RateHelper>> = Vec::new();

    for (months, rate) in [(1, 0.0430), (3, 0.0432)] {
        let quote = SimpleQuote::new(rate);
        helpers.push(Arc::new(DepositRateHelper::from_tenor(
            QuoteHandle::from(quote.clone()),
            spot,
            Period::months(months),
            0,
            calendar.as_ref(),
            mf,
            DayCountConvention::Act360,
        )?));
        quotes.push(quote);
    }

    for (start, price) in [
        (Date::from_ymd(2025, 6, 18)?, 95.90),
        (Date::from_ymd(2025, 9, 17)?, 96.05),
        (Date::from_ymd(2025, 12, 17)?, 96.20),
    ] {
        let quote = SimpleQuote::new(price);
        helpers.push(Arc::new(FuturesRateHelper::new(
            QuoteHandle::from(quote.clone()),
            start,
            3,
            calendar.as_ref(),
            mf,
            DayCountConvention::Act360,
            Some(QuoteHandle::from(SimpleQuote::new(0.0001))),
        )?));
        quotes.push(quote);
    }

    for (years, rate) in [(2, 0.0395), (3, 0.0398), (5, 0.0402), (7, 0.0406), (10, 0.0410), (30, 0.0425)] {
        let quote = SimpleQuote::new(rate);
        helpers.push(Arc::new(
            SwapRateHelper::builder(QuoteHandle::from(quote.clone()), spot, Period::years(years))
                .calendar(calendar.clone())
                .fixed_frequency(Frequency::SemiAnnual)
                .build()?,
        ));
        quotes.push(quote);
    }

    let turn_of_year = SimpleQuote::new(0.9998);
    let curve = PiecewiseYieldCurve::builder(reference)
        .add_helpers(helpers)
        .day_count(DayCountConvention::Act365Fixed)
        .jumps(vec![QuoteHandle::from(turn_of_year)])
        .build()?;

    println!("Nodes ({} / {}):", curve.trait_kind(), curve.interpolation());
    for (date, value) in curve.nodes()? {
        println!("  {date}  {value:.10}");
    }
    println!("Jumps: {:?}", curve.jump_dates()?);
    println!();
    println!("{}", curve.repricing_report()?);

    let dc = DayCountConvention::Act365Fixed;
    for years in [1, 2, 5, 10, 20, 30] {
        let date = spot.add_period(Period::years(years))?;
        let zero = curve.zero_rate(date, dc, Compounding::Continuous, Frequency::Annual, false)?;
        println!("  {years:>2}Y zero {:.4}%", zero.rate() * 100.0);
    }

    // A quote change only marks the curve dirty: the next read re-bootstraps
    let ten_year = Date::from_ymd(2035, 1, 17)?;
    let before = curve.discount(ten_year, false)?;
    let bumped = &quotes[quotes.len() - 2];
    bumped.set_value(0.0420);
    info!(dirty = curve.is_dirty(), "10Y swap bumped by 10bp");
    let after = curve.discount(ten_year, false)?;
    println!();
    println!("10Y discount before {before:.10}, after {after:.10}");

    // Moving the evaluation date moves the reference date
    evaluation.set(Date::from_ymd(2025, 1, 16)?);
    info!(
        reference_date = %curve.reference_date(),
        dirty = curve.is_dirty(),
        "evaluation date moved"
    );

    Ok(())
}
