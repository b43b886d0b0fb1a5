/// quick start - build a schedule and read a breakdown
use debt_schedule_rs::{build_schedule, compute_breakdown, Debt, DurationUnit, Money};
use chrono::{TimeZone, Utc};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // $1,200 repaid monthly over a year, $120 total interest from the rate service
    let debt = Debt::new(Money::from_major(1_200), Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap())
        .with_due_date(Utc.with_ymd_and_hms(2024, 12, 31, 0, 0, 0).unwrap())
        .with_installments("12", DurationUnit::Monthly);
    let total_interest = Money::from_major(120);

    let now = Utc.with_ymd_and_hms(2024, 6, 15, 0, 0, 0).unwrap();
    let schedule = build_schedule(&debt, total_interest, now);

    for installment in &schedule {
        println!(
            "#{:>2} {} {:?} pay {} remaining {}",
            installment.number,
            installment.date.format("%Y-%m-%d"),
            installment.status,
            installment.installment_amount.round_dp(2),
            installment.remaining_principal.round_dp(2),
        );
    }

    let breakdown = compute_breakdown(&schedule, Some(5), &debt, total_interest, now);
    println!("\n{}", serde_json::to_string_pretty(&breakdown)?);

    Ok(())
}
