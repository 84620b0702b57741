//! Workout plan catalog: the day labels offered to the user and the
//! exercises each one lists.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanDay {
    pub label: &'static str,
    pub exercises: &'static [&'static str],
}

pub const PLAN_DAYS: &[PlanDay] = &[
    PlanDay {
        label: "Combo 1",
        exercises: &[
            "Barbell bench press",
            "Cable lat pulldown",
            "Barbell Shoulder Press",
            "Barbell Underhand grip",
            "Decline bench press",
            "Cable reverse fly",
            "Bicep concentration curl",
            "Leg raises",
        ],
    },
    PlanDay {
        label: "Combo 2",
        exercises: &[
            "Barbell Squat",
            "Dummbbell Split Squat",
            "Bilateral Seated Leg Press",
            "Db Bridges",
            "Db Walking lunges",
            "Superman",
            "Db Crunches",
        ],
    },
    PlanDay {
        label: "Combo 3",
        exercises: &[
            "Db Incline chest press",
            "Db Shoulder press seated",
            "Db Incline chest fly",
            "Db Alternating lateral raise",
            "Cable bar pushdown Tricep",
            "Db Front raise",
            "Decline bench leg raises",
        ],
    },
    PlanDay {
        label: "Combo 4",
        exercises: &[
            "Reverse lat pulldown",
            "Cable Facepulls",
            "Barbell upright row",
            "Barbell Shrug",
            "Low one arm standing row",
            "Barbell bicep curl",
            "Bicep 21",
            "Cable Standing twisting crunch",
        ],
    },
    PlanDay {
        label: "Combo 5",
        exercises: &[
            "Barbell Squat",
            "Dumbbell Stiff leg deadlift",
            "Dumbbell lunge",
            "Weighted floor hip thrust",
            "lateral leg raises abduction",
            "Seated db calf raises",
            "Cable twists up down",
            "Cable side bends",
        ],
    },
];

pub fn days() -> impl Iterator<Item = &'static str> {
    PLAN_DAYS.iter().map(|day| day.label)
}

pub fn exercises_for(day: &str) -> Option<&'static [&'static str]> {
    PLAN_DAYS
        .iter()
        .find(|plan| plan.label == day)
        .map(|plan| plan.exercises)
}

pub fn is_known(day: &str, exercise: &str) -> bool {
    exercises_for(day)
        .map(|exercises| exercises.contains(&exercise))
        .unwrap_or(false)
}
