use std::collections::BTreeMap;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ds_forecast::{
    calculate_monthly_utilization_forecast, Capacity, Child, ContractStatus, DashboardConfig,
    FacilitySettings, SlotPattern,
};
use ds_time::{CalendarMonth, Weekday};

fn roster(n: usize) -> Vec<Child> {
    let slots = [SlotPattern::Am, SlotPattern::Pm, SlotPattern::AmPm];
    (0..n)
        .map(|i| {
            let days: Vec<u8> = (1..=5u8).filter(|d| (usize::from(*d) + i) % 2 == 0).collect();
            Child {
                id: format!("c{i}"),
                name: format!("child {i}"),
                contract_status: ContractStatus::Active,
                contract_start_date: Some("2024-01-01".into()),
                contract_end_date: None,
                planned_usage_start_date: None,
                contract_days: Some(4 + (i % 12) as u32),
                planned_contract_days: None,
                pattern_time_slots: days
                    .iter()
                    .map(|d| (*d, slots[(i + usize::from(*d)) % 3]))
                    .collect::<BTreeMap<_, _>>(),
                pattern_days: days.iter().map(|d| i64::from(*d)).collect(),
                age: None,
                address: None,
            }
        })
        .collect()
}

fn bench_forecast(c: &mut Criterion) {
    let settings = FacilitySettings {
        capacity: Capacity { am: 10, pm: 10 },
        regular_holidays: [Weekday::Sunday].into_iter().collect(),
        include_holidays: true,
        ..FacilitySettings::default()
    };
    let config = DashboardConfig::default();
    let month = CalendarMonth::from_numbers(2024, 5).expect("valid month");
    let children = roster(60);

    c.bench_function("monthly_forecast_60_children", |b| {
        b.iter(|| {
            calculate_monthly_utilization_forecast(
                black_box(&children),
                &settings,
                month,
                &config,
            )
        })
    });
}

criterion_group!(benches, bench_forecast);
criterion_main!(benches);
