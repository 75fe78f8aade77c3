//! Static catalogs: membership tiers, weekly diet plans, trainer workout
//! plans and the gym's fitness classes
//!
//! These ship with the client; nothing here is fetched from the backend.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{ClientResult, FittrackError};

/// A membership tier offered by the gym
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MembershipTier {
    pub title: &'static str,
    pub price: &'static str,
    pub benefits: &'static [&'static str],
}

/// The tiers, cheapest first
pub static MEMBERSHIP_TIERS: [MembershipTier; 3] = [
    MembershipTier {
        title: "Basic",
        price: "₹49/month",
        benefits: &[
            "Access to gym facilities",
            "Free group classes",
            "1 personal training session",
            "Locker room access",
            "Fitness assessment",
            "Mobile app access",
        ],
    },
    MembershipTier {
        title: "Standard",
        price: "₹99/month",
        benefits: &[
            "All Basic benefits",
            "Unlimited group classes",
            "2 personal training sessions",
            "Nutrition guidance",
            "Recovery zone access",
            "Guest passes (2/month)",
        ],
    },
    MembershipTier {
        title: "Premium",
        price: "₹149/month",
        benefits: &[
            "All Standard benefits",
            "24/7 gym access",
            "Unlimited training sessions",
            "Priority class booking",
            "Spa access",
            "Free merchandise",
        ],
    },
];

/// Looks a tier up by title, ignoring case.
pub fn membership_tier(title: &str) -> Option<&'static MembershipTier> {
    MEMBERSHIP_TIERS
        .iter()
        .find(|t| t.title.eq_ignore_ascii_case(title.trim()))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Meal {
    pub name: &'static str,
    pub description: &'static str,
    pub calories: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayPlan {
    pub day: &'static str,
    pub meals: Vec<Meal>,
}

impl DayPlan {
    pub fn total_calories(&self) -> u32 {
        self.meals.iter().map(|m| m.calories).sum()
    }
}

/// Seven days of meals for one fitness goal
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DietPlan {
    pub goal: &'static str,
    pub days: Vec<DayPlan>,
}

type MealRow = (&'static str, &'static str, u32);

const LEAN_MONDAY: [MealRow; 3] = [
    ("Breakfast", "Protein smoothie with spinach, berries, and whey protein", 300),
    ("Lunch", "Grilled chicken salad with mixed greens", 400),
    ("Dinner", "Baked salmon with roasted vegetables", 350),
];

const BULK_MONDAY: [MealRow; 3] = [
    ("Breakfast", "Protein pancakes with banana and almond butter", 500),
    ("Lunch", "Grilled chicken with brown rice and sweet potato", 600),
    ("Dinner", "Beef steak with roasted vegetables and quinoa", 550),
];

// Tuesday through Sunday are shared by every goal.
static REST_OF_WEEK: [(&str, [MealRow; 3]); 6] = [
    (
        "Tuesday",
        [
            ("Breakfast", "Egg white omelet with vegetables", 250),
            ("Lunch", "Turkey and quinoa bowl", 380),
            ("Dinner", "Lean beef stir-fry with cauliflower rice", 400),
        ],
    ),
    (
        "Wednesday",
        [
            ("Breakfast", "Chia seed pudding with almonds", 300),
            ("Lunch", "Grilled tofu with mixed salad", 350),
            ("Dinner", "Herb-crusted white fish with steamed broccoli", 320),
        ],
    ),
    (
        "Thursday",
        [
            ("Breakfast", "Greek yogurt with berries and granola", 280),
            ("Lunch", "Shrimp and mixed vegetable bowl", 370),
            ("Dinner", "Chicken breast with roasted sweet potato", 390),
        ],
    ),
    (
        "Friday",
        [
            ("Breakfast", "Protein pancakes with fresh berries", 320),
            ("Lunch", "Mediterranean chickpea salad", 350),
            ("Dinner", "Lean turkey meatballs with zucchini noodles", 380),
        ],
    ),
    (
        "Saturday",
        [
            ("Breakfast", "Avocado toast with poached eggs", 300),
            ("Lunch", "Grilled vegetable and lean protein wrap", 370),
            ("Dinner", "Baked cod with roasted brussels sprouts", 340),
        ],
    ),
    (
        "Sunday",
        [
            ("Breakfast", "Smoothie bowl with mixed seeds", 310),
            ("Lunch", "Lean protein Buddha bowl", 380),
            ("Dinner", "Vegetable and chicken stir-fry", 400),
        ],
    ),
];

/// Goals with a diet plan, and whether their Monday is the high-calorie one
static PLAN_GOALS: [(&str, bool); 5] = [
    ("Weight Loss", false),
    ("Muscle Gain", true),
    ("Endurance", false),
    ("Flexibility", true),
    ("Overall Fitness", false),
];

fn day(day: &'static str, rows: &[MealRow]) -> DayPlan {
    DayPlan {
        day,
        meals: rows
            .iter()
            .map(|&(name, description, calories)| Meal {
                name,
                description,
                calories,
            })
            .collect(),
    }
}

/// The weekly plan for `goal`, matched case-insensitively.
///
/// # Examples
///
/// ```
/// use fittrack::catalog::diet_plan;
///
/// let plan = diet_plan("muscle gain").unwrap();
/// assert_eq!(plan.days.len(), 7);
/// assert_eq!(plan.days[0].total_calories(), 1650);
/// assert!(diet_plan("Yoga").is_none());
/// ```
pub fn diet_plan(goal: &str) -> Option<DietPlan> {
    let goal = goal.trim();
    let &(name, bulk) = PLAN_GOALS
        .iter()
        .find(|(g, _)| g.eq_ignore_ascii_case(goal))?;

    let monday = if bulk { &BULK_MONDAY } else { &LEAN_MONDAY };
    let mut days = vec![day("Monday", monday)];
    days.extend(REST_OF_WEEK.iter().map(|(d, rows)| day(*d, rows.as_slice())));
    Some(DietPlan { goal: name, days })
}

/// Goals that have a diet plan
pub fn diet_goals() -> impl Iterator<Item = &'static str> {
    PLAN_GOALS.iter().map(|(g, _)| *g)
}

/// A ready-made workout suggested by the trainer screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrainerPlan {
    pub id: u8,
    pub name: &'static str,
    pub steps: &'static [&'static str],
}

pub static TRAINER_PLANS: [TrainerPlan; 10] = [
    TrainerPlan {
        id: 1,
        name: "Full Body Workout",
        steps: &[
            "10 mins warm-up",
            "15 squats",
            "15 push-ups",
            "10 lunges (each leg)",
            "Plank for 1 min",
        ],
    },
    TrainerPlan {
        id: 2,
        name: "Cardio Burst",
        steps: &[
            "5 mins jumping jacks",
            "5 mins high knees",
            "3 sets of 20 burpees",
            "2 sets of mountain climbers",
            "Cool down for 5 mins",
        ],
    },
    TrainerPlan {
        id: 3,
        name: "Strength Training",
        steps: &[
            "10 push-ups",
            "10 dumbbell rows (each arm)",
            "15 squats",
            "20 sit-ups",
            "Plank for 1 min",
        ],
    },
    TrainerPlan {
        id: 4,
        name: "Flexibility Stretching",
        steps: &[
            "5 mins neck and shoulder rolls",
            "5 mins toe touch stretch",
            "3 sets of 20 leg stretches",
            "2 sets of hip rotations",
            "Cool down with breathing exercises",
        ],
    },
    TrainerPlan {
        id: 5,
        name: "Yoga Flow",
        steps: &[
            "5 mins Child's Pose",
            "10 mins Downward Dog",
            "3 sets of Warrior Pose (1 min each)",
            "Plank for 1 min",
            "5 mins Savasana (relaxation)",
        ],
    },
    TrainerPlan {
        id: 6,
        name: "HIIT Circuit",
        steps: &[
            "5 mins warm-up",
            "30 secs jumping jacks",
            "30 secs burpees",
            "30 secs high knees",
            "Repeat 3 times",
            "Cool down for 5 mins",
        ],
    },
    TrainerPlan {
        id: 7,
        name: "Core Blaster",
        steps: &[
            "10 crunches",
            "20 bicycle crunches",
            "15 leg raises",
            "Plank for 1 min",
            "20 mountain climbers",
        ],
    },
    TrainerPlan {
        id: 8,
        name: "Upper Body Strength",
        steps: &[
            "10 push-ups",
            "15 tricep dips",
            "10 dumbbell rows (each arm)",
            "15 bicep curls",
            "Plank for 1 min",
        ],
    },
    TrainerPlan {
        id: 9,
        name: "Lower Body Burn",
        steps: &[
            "15 squats",
            "20 lunges (each leg)",
            "15 glute bridges",
            "20 calf raises",
            "Cool down for 5 mins",
        ],
    },
    TrainerPlan {
        id: 10,
        name: "Morning Energizer",
        steps: &[
            "5 mins light stretching",
            "10 mins fast-paced walking or running",
            "10 jumping jacks",
            "Plank for 1 min",
            "5 mins cool-down stretches",
        ],
    },
];

/// Class difficulty level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Advanced => "advanced",
        };
        f.write_str(label)
    }
}

impl FromStr for Difficulty {
    type Err = FittrackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "beginner" => Ok(Difficulty::Beginner),
            "intermediate" => Ok(Difficulty::Intermediate),
            "advanced" => Ok(Difficulty::Advanced),
            other => Err(FittrackError::Validation(format!(
                "Invalid difficulty: {}. Must be one of: beginner, intermediate, advanced",
                other
            ))),
        }
    }
}

/// A scheduled fitness class
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FitnessClass {
    pub id: u32,
    pub name: String,
    pub instructor: String,
    pub schedule: String,
    pub capacity: Option<u32>,
    pub current_enrollment: u32,
    pub difficulty: Difficulty,
}

/// Classes the gym runs out of the box
pub fn default_classes() -> Vec<FitnessClass> {
    vec![
        FitnessClass {
            id: 1,
            name: "Cardio Blast".to_string(),
            instructor: "John Doe".to_string(),
            schedule: "Mon/Wed 6 AM".to_string(),
            capacity: Some(20),
            current_enrollment: 15,
            difficulty: Difficulty::Intermediate,
        },
        FitnessClass {
            id: 2,
            name: "Yoga Flow".to_string(),
            instructor: "Jane Smith".to_string(),
            schedule: "Tue/Thu 7 PM".to_string(),
            capacity: Some(15),
            current_enrollment: 12,
            difficulty: Difficulty::Beginner,
        },
    ]
}

/// Raw "add class" input
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassForm {
    pub name: String,
    pub instructor: String,
    pub schedule: String,
    /// Optional; blank means no limit
    pub capacity: String,
    /// Blank means beginner
    pub difficulty: String,
}

impl ClassForm {
    /// Checks the form and builds class `id` with nobody enrolled.
    ///
    /// # Errors
    ///
    /// [`FittrackError::Validation`] when name, instructor or schedule is
    /// blank, or when capacity or difficulty does not parse.
    pub fn validate(&self, id: u32) -> ClientResult<FitnessClass> {
        if [&self.name, &self.instructor, &self.schedule]
            .iter()
            .any(|f| f.trim().is_empty())
        {
            return Err(FittrackError::Validation(
                "Please fill in all class details".to_string(),
            ));
        }

        let capacity = match self.capacity.trim() {
            "" => None,
            raw => Some(raw.parse::<u32>().map_err(|_| {
                FittrackError::Validation("Class capacity must be a whole number".to_string())
            })?),
        };
        let difficulty = match self.difficulty.trim() {
            "" => Difficulty::default(),
            raw => raw.parse()?,
        };

        Ok(FitnessClass {
            id,
            name: self.name.trim().to_string(),
            instructor: self.instructor.trim().to_string(),
            schedule: self.schedule.trim().to_string(),
            capacity,
            current_enrollment: 0,
            difficulty,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::FITNESS_GOALS;

    #[test]
    fn test_tiers_in_price_order() {
        let titles: Vec<_> = MEMBERSHIP_TIERS.iter().map(|t| t.title).collect();
        assert_eq!(titles, vec!["Basic", "Standard", "Premium"]);
        assert_eq!(membership_tier("premium").unwrap().price, "₹149/month");
        assert!(membership_tier("Gold").is_none());
    }

    #[test]
    fn test_every_registration_goal_has_a_plan() {
        for goal in FITNESS_GOALS {
            let plan = diet_plan(goal).unwrap_or_else(|| panic!("no plan for {}", goal));
            assert_eq!(plan.goal, goal);
            assert_eq!(plan.days.len(), 7);
            assert!(plan.days.iter().all(|d| d.meals.len() == 3));
        }
        assert_eq!(diet_goals().count(), FITNESS_GOALS.len());
    }

    #[test]
    fn test_daily_calorie_totals() {
        let plan = diet_plan("Weight Loss").unwrap();
        assert_eq!(plan.days[0].day, "Monday");
        assert_eq!(plan.days[0].total_calories(), 1050);
        assert_eq!(plan.days[6].day, "Sunday");
        assert_eq!(plan.days[6].total_calories(), 1090);
    }

    #[test]
    fn test_unknown_goal() {
        assert!(diet_plan("").is_none());
        assert!(diet_plan("Powerlifting").is_none());
    }

    #[test]
    fn test_trainer_plans_are_numbered_in_order() {
        let ids: Vec<_> = TRAINER_PLANS.iter().map(|p| p.id).collect();
        assert_eq!(ids, (1..=10).collect::<Vec<u8>>());
        assert!(TRAINER_PLANS.iter().all(|p| !p.steps.is_empty()));
        assert_eq!(TRAINER_PLANS[5].name, "HIIT Circuit");
        assert_eq!(TRAINER_PLANS[5].steps.len(), 6);
    }

    #[test]
    fn test_class_form_requires_details() {
        let form = ClassForm {
            name: "Spin".to_string(),
            instructor: " ".to_string(),
            schedule: "Fri 6 PM".to_string(),
            ..ClassForm::default()
        };
        let err = form.validate(3).unwrap_err();
        assert_eq!(err.user_message(), "Please fill in all class details");
    }

    #[test]
    fn test_class_form_builds_empty_class() {
        let form = ClassForm {
            name: " Spin ".to_string(),
            instructor: "Ravi".to_string(),
            schedule: "Fri 6 PM".to_string(),
            capacity: "25".to_string(),
            difficulty: "Advanced".to_string(),
        };
        let class = form.validate(3).unwrap();
        assert_eq!(class.id, 3);
        assert_eq!(class.name, "Spin");
        assert_eq!(class.capacity, Some(25));
        assert_eq!(class.current_enrollment, 0);
        assert_eq!(class.difficulty, Difficulty::Advanced);
    }

    #[test]
    fn test_class_form_defaults_and_bad_numbers() {
        let mut form = ClassForm {
            name: "Stretch".to_string(),
            instructor: "Ravi".to_string(),
            schedule: "Sat 8 AM".to_string(),
            ..ClassForm::default()
        };
        let class = form.validate(1).unwrap();
        assert_eq!(class.capacity, None);
        assert_eq!(class.difficulty, Difficulty::Beginner);

        form.capacity = "lots".to_string();
        assert!(matches!(form.validate(1), Err(FittrackError::Validation(_))));
        form.capacity = String::new();
        form.difficulty = "expert".to_string();
        assert!(matches!(form.validate(1), Err(FittrackError::Validation(_))));
    }

    #[test]
    fn test_default_classes() {
        let classes = default_classes();
        assert_eq!(classes.len(), 2);
        assert_eq!(classes[0].name, "Cardio Blast");
        assert_eq!(classes[1].difficulty.to_string(), "beginner");
    }
}
