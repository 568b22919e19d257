//! The fixed weekly split: day -> muscle group -> exercise names.
//!
//! Plain data consumed by the UI and by the progress summary fallback;
//! nothing here is derived from the log.

/// One scheduled day of the split
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledDay {
  pub day: &'static str,
  pub muscle: &'static str,
  pub exercises: &'static [&'static str],
}

pub const WEEKLY_SPLIT: &[ScheduledDay] = &[
  ScheduledDay {
    day: "Monday",
    muscle: "Chest + Triceps + Abs",
    exercises: &[
      "Bench Press",
      "Incline DB Press",
      "Dips",
      "Pushdowns",
      "Overhead DB Extension",
      "Plank",
      "Deadbug",
      "Woodchoppers",
    ],
  },
  ScheduledDay {
    day: "Tuesday",
    muscle: "Back + Biceps",
    exercises: &[
      "Pull-Ups",
      "Barbell Rows",
      "Seated Rows",
      "Barbell Curls",
      "DB Curls",
      "Concentration Curl",
    ],
  },
  ScheduledDay {
    day: "Wednesday",
    muscle: "Legs + Shoulders",
    exercises: &[
      "Squats",
      "RDLs",
      "Lunges",
      "OHP",
      "Lateral Raises",
      "Rear Delt Flys",
      "Hanging Leg Raise",
      "Russian Twists",
    ],
  },
  ScheduledDay {
    day: "Thursday",
    muscle: "Chest + Triceps",
    exercises: &[
      "Incline Bench",
      "Chest Flys",
      "Push-Ups",
      "Skullcrushers",
      "Rope Pushdowns",
      "Dips",
    ],
  },
  ScheduledDay {
    day: "Friday",
    muscle: "Rest",
    exercises: &[],
  },
  ScheduledDay {
    day: "Saturday",
    muscle: "Back + Biceps",
    exercises: &[
      "Lat Pulldown",
      "T-Bar Row",
      "DB Row",
      "Incline DB Curl",
      "Hammer Curl",
      "Cable Curl",
      "Decline Crunch",
      "V-Ups",
      "Cable Crunch",
    ],
  },
  ScheduledDay {
    day: "Sunday",
    muscle: "Legs + Shoulders",
    exercises: &[
      "Leg Press",
      "Leg Extension",
      "Ham Curl",
      "Arnold Press",
      "Front Raise",
      "Cable Lateral Raise",
      "Stretch & Mobility",
    ],
  },
];

/// Look up a scheduled day by its label
pub fn scheduled_day(name: &str) -> Option<&'static ScheduledDay> {
  WEEKLY_SPLIT.iter().find(|d| d.day == name)
}

/// Every exercise name in the split, in schedule order (duplicates kept,
/// e.g. Dips appears on both chest days)
pub fn all_exercises() -> Vec<&'static str> {
  WEEKLY_SPLIT.iter().flat_map(|d| d.exercises.iter().copied()).collect()
}
