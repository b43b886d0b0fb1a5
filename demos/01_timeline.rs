/// timeline - navigate installments with controlled time
use debt_schedule_rs::{DebtTimeline, Debt, DurationUnit, Money, SafeTimeProvider, TimeSource};
use chrono::{Duration, TimeZone, Utc};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("=== timeline navigation ===\n");

    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2024, 3, 10, 0, 0, 0).unwrap()
    ));
    let controller = time.test_control().unwrap();

    let debt = Debt::new(Money::from_major(5_000), Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap())
        .with_due_date(Utc.with_ymd_and_hms(2024, 7, 1, 0, 0, 0).unwrap())
        .with_installments("26", DurationUnit::Weekly)
        .with_premium(Money::from_major(130));

    let mut timeline = DebtTimeline::with_time(debt, Money::from_major(260), &time);
    println!("default selection: {:?}", timeline.selected_index());

    for component in timeline.breakdown().composition() {
        println!(
            "  {:<20} {:>10} ({:.1}%)",
            component.component.label(),
            component.amount.round_dp(2),
            component.share.as_percentage()
        );
    }

    // step through a few weeks
    for _ in 0..3 {
        timeline.advance();
        let breakdown = timeline.breakdown();
        println!(
            "as of {}: principal paid {} remaining {}",
            breakdown.status_as_of_date.format("%Y-%m-%d"),
            breakdown.principal_paid.round_dp(2),
            breakdown.remaining_principal.round_dp(2)
        );
    }

    // two months pass, selection resets to the next upcoming installment
    controller.advance(Duration::days(60));
    timeline.refresh_with_time(&time);
    println!("\nafter 60 days, selection: {:?}", timeline.selected_index());

    // settle the debt
    timeline.set_paid(true, time.now());
    println!("after settlement, selection: {:?}", timeline.selected_index());
    println!("remaining: {}", timeline.breakdown().remaining_principal);

    Ok(())
}
