/// json payload - normalize an api record and export the schedule
use debt_schedule_rs::{Debt, DebtTimeline, FixedInterest};
use chrono::{TimeZone, Utc};

const PAYLOAD: &str = r#"{
    "amount": "2400.00",
    "premiumAmount": "120",
    "percentage": "8.5",
    "interestType": "compound",
    "createdAt": "2024-01-15T09:30:00.000Z",
    "dueDate": "2025-01-15",
    "frequency": "4",
    "duration": "quarterly",
    "isPaid": false
}"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== json payload ===\n");

    let debt = Debt::from_json(PAYLOAD)?;
    println!("normalized: {:?}\n", debt);

    // cached figure from the interest service
    let source = FixedInterest("204".parse()?);
    let now = Utc.with_ymd_and_hms(2024, 8, 1, 0, 0, 0).unwrap();
    let timeline = DebtTimeline::from_source(debt, &source, now);

    println!("schedule:");
    println!("{}\n", serde_json::to_string_pretty(timeline.schedule())?);

    println!("breakdown at selection {:?}:", timeline.selected_index());
    println!("{}", serde_json::to_string_pretty(&timeline.breakdown())?);

    Ok(())
}
