//! The demo reports every session starts with.

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::report::{Location, Priority, Report, ReportType};

/// Five sample reports around [`Location::DEFAULT_CENTER`], aged relative to
/// `now`. Pass the result to [`crate::ledger::Ledger::seed_reports`].
pub fn sample_reports(now: DateTime<Utc>) -> Vec<Report> {
  let sample = |kind: ReportType,
                title: &str,
                description: &str,
                priority: Priority,
                lat: f64,
                lng: f64,
                age: Duration,
                upvotes: u32| Report {
    id: Uuid::new_v4(),
    kind,
    title: title.to_owned(),
    description: description.to_owned(),
    priority,
    location: Location::new(lat, lng),
    created_at: now - age,
    upvotes,
  };

  vec![
    sample(
      ReportType::Emergency,
      "Street lights out on Jalan Sudirman",
      "Several street lights along Jalan Sudirman have been dark since yesterday, \
       making the street unsafe at night.",
      Priority::High,
      -6.2088,
      106.8456,
      Duration::hours(2),
      15,
    ),
    sample(
      ReportType::Attention,
      "Children's playground needs repairs",
      "Some of the equipment at the RW 05 playground needs fixing before it is \
       safe for children again.",
      Priority::Medium,
      -6.2150,
      106.8500,
      Duration::hours(5),
      8,
    ),
    sample(
      ReportType::Positive,
      "Neighbourhood clean-up day",
      "Inviting residents to join a clean-up of the neighbourhood every Sunday \
       morning.",
      Priority::Low,
      -6.2020,
      106.8400,
      Duration::hours(24),
      23,
    ),
    sample(
      ReportType::Emergency,
      "Blocked drain in front of house 15",
      "The drain in front of house number 15 is blocked and floods the street \
       whenever it rains.",
      Priority::Urgent,
      -6.2100,
      106.8480,
      Duration::minutes(30),
      12,
    ),
    sample(
      ReportType::Attention,
      "More public rubbish bins",
      "Extra bins are needed at a few busy spots to keep the area clean.",
      Priority::Medium,
      -6.2050,
      106.8420,
      Duration::hours(8),
      6,
    ),
  ]
}
