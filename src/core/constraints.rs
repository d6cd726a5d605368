//! Injury, allergy and dietary-preference constraints on plan content.
//!
//! All matching is case-insensitive substring matching against fixed tables.

use serde::Serialize;
use std::fmt;

use crate::models::plan::{Meal, PlannedExercise};

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Injury {
    Knee,
    Back,
    Shoulder,
    Elbow,
    Wrist,
    Ankle,
    Hip,
}

impl Injury {
    pub const ALL: [Injury; 7] = [
        Self::Knee,
        Self::Back,
        Self::Shoulder,
        Self::Elbow,
        Self::Wrist,
        Self::Ankle,
        Self::Hip,
    ];

    /// Words in a free-text injury note that identify this injury.
    fn keywords(self) -> &'static [&'static str] {
        match self {
            Self::Knee => &["knee", "acl", "meniscus", "patella"],
            Self::Back => &["back", "spine", "lumbar", "disc"],
            Self::Shoulder => &["shoulder", "rotator"],
            Self::Elbow => &["elbow"],
            Self::Wrist => &["wrist", "carpal"],
            Self::Ankle => &["ankle", "achilles"],
            Self::Hip => &["hip"],
        }
    }

    /// Substrings that must not appear in an exercise name.
    pub fn excluded_terms(self) -> &'static [&'static str] {
        match self {
            Self::Knee => &["squat", "lunge", "leg extension", "jump", "step-up"],
            Self::Back => &[
                "deadlift",
                "barbell row",
                "good morning",
                "back extension",
                "bent over",
            ],
            Self::Shoulder => &[
                "overhead press",
                "military press",
                "upright row",
                "lateral raise",
                "dips",
                "behind the neck",
            ],
            Self::Elbow => &[
                "skull crusher",
                "barbell curl",
                "close-grip",
                "tricep extension",
            ],
            Self::Wrist => &["push-up", "front squat", "barbell curl", "clean"],
            Self::Ankle => &["jump", "calf raise", "run", "box", "lunge"],
            Self::Hip => &["hip thrust", "sumo", "deadlift", "lunge", "split squat"],
        }
    }

    /// Every injury mentioned anywhere in the user's limitation notes.
    pub fn parse_all(notes: &[String]) -> Vec<Injury> {
        let lowered: Vec<String> = notes.iter().map(|n| n.to_lowercase()).collect();
        Self::ALL
            .into_iter()
            .filter(|injury| {
                lowered
                    .iter()
                    .any(|n| injury.keywords().iter().any(|k| n.contains(k)))
            })
            .collect()
    }
}

impl fmt::Display for Injury {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Knee => write!(f, "knee"),
            Self::Back => write!(f, "back"),
            Self::Shoulder => write!(f, "shoulder"),
            Self::Elbow => write!(f, "elbow"),
            Self::Wrist => write!(f, "wrist"),
            Self::Ankle => write!(f, "ankle"),
            Self::Hip => write!(f, "hip"),
        }
    }
}

/// Canonical lifts that have named safe substitutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompoundLift {
    Squat,
    Deadlift,
    RomanianDeadlift,
    OverheadPress,
    BarbellRow,
    BenchPress,
    PullUp,
    BarbellCurl,
    LateralRaise,
    LegExtension,
    Lunge,
}

impl CompoundLift {
    pub fn from_name(name: &str) -> Option<Self> {
        let n = name.to_lowercase();
        // Ordered: "romanian deadlift" before "deadlift"
        let lift = if n.contains("romanian deadlift") {
            Self::RomanianDeadlift
        } else if n.contains("deadlift") {
            Self::Deadlift
        } else if n.contains("squat") {
            Self::Squat
        } else if n.contains("overhead press") || n.contains("military press") {
            Self::OverheadPress
        } else if n.contains("barbell row") || n.contains("bent over") {
            Self::BarbellRow
        } else if n.contains("bench press") {
            Self::BenchPress
        } else if n.contains("pull-up") {
            Self::PullUp
        } else if n.contains("barbell curl") {
            Self::BarbellCurl
        } else if n.contains("lateral raise") {
            Self::LateralRaise
        } else if n.contains("leg extension") {
            Self::LegExtension
        } else if n.contains("lunge") {
            Self::Lunge
        } else {
            return None;
        };
        Some(lift)
    }

    /// Substitutes in order of preference.
    pub fn substitutes(self) -> &'static [&'static str] {
        match self {
            Self::Squat => &["Leg Press", "Glute Bridges", "Leg Curls"],
            Self::Deadlift => &["Romanian Deadlifts", "Glute Bridges", "Leg Curls"],
            Self::RomanianDeadlift => &["Leg Curls", "Glute Bridges"],
            Self::OverheadPress => &["Landmine Press", "Face Pulls"],
            Self::BarbellRow => &["Chest-Supported Rows", "Seated Cable Rows"],
            Self::BenchPress => &["Dumbbell Bench Press", "Machine Chest Press"],
            Self::PullUp => &["Lat Pulldowns", "Seated Cable Rows"],
            Self::BarbellCurl => &["Dumbbell Hammer Curls", "Cable Curls"],
            Self::LateralRaise => &["Face Pulls", "Band Pull-Aparts"],
            Self::LegExtension => &["Leg Curls", "Glute Bridges"],
            Self::Lunge => &["Glute Bridges", "Leg Curls"],
        }
    }
}

/// Drops or substitutes exercises that conflict with reported injuries.
#[derive(Debug, Clone, Default)]
pub struct ExerciseFilter {
    injuries: Vec<Injury>,
}

impl ExerciseFilter {
    pub fn new(injury_notes: &[String]) -> Self {
        Self {
            injuries: Injury::parse_all(injury_notes),
        }
    }

    pub fn injuries(&self) -> &[Injury] {
        &self.injuries
    }

    pub fn is_empty(&self) -> bool {
        self.injuries.is_empty()
    }

    /// The first injury that rules this exercise out, if any.
    pub fn conflict(&self, name: &str) -> Option<Injury> {
        let n = name.to_lowercase();
        self.injuries
            .iter()
            .copied()
            .find(|i| i.excluded_terms().iter().any(|t| n.contains(t)))
    }

    pub fn allows(&self, name: &str) -> bool {
        self.conflict(name).is_none()
    }

    /// Filter one day's exercise list. An excluded lift is replaced by its
    /// first allowed substitute not already in the day; otherwise dropped.
    pub fn apply(&self, exercises: Vec<PlannedExercise>) -> Vec<PlannedExercise> {
        if self.is_empty() {
            return exercises;
        }
        let mut taken: Vec<String> = exercises.iter().map(|e| e.name.to_lowercase()).collect();
        let mut out = Vec::with_capacity(exercises.len());
        for ex in exercises {
            let Some(injury) = self.conflict(&ex.name) else {
                out.push(ex);
                continue;
            };
            let substitute = CompoundLift::from_name(&ex.name).and_then(|lift| {
                lift.substitutes()
                    .iter()
                    .find(|s| self.allows(s) && !taken.contains(&s.to_lowercase()))
            });
            if let Some(sub) = substitute {
                taken.push(sub.to_lowercase());
                out.push(PlannedExercise {
                    name: sub.to_string(),
                    guidance: format!(
                        "Replaces {} ({} limitation). {}",
                        ex.name, injury, ex.guidance
                    ),
                    ..ex
                });
            }
        }
        out
    }
}

/// Low-impact fallback for a day left empty by the injury filter.
pub fn core_stability_fallback() -> PlannedExercise {
    PlannedExercise {
        name: "Core Stability Circuit".to_string(),
        sets: 3,
        reps: "30-45 sec".to_string(),
        rest_seconds: 45,
        guidance: "Plank, dead bug and bird dog; stay in a pain-free range".to_string(),
        intensity_level: "Light".to_string(),
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Allergen {
    Nuts,
    Dairy,
    Gluten,
    Eggs,
    Soy,
    Shellfish,
    Fish,
    Lactose,
}

impl Allergen {
    /// Map one allergy note to an allergen. Shellfish is checked before
    /// fish since the word contains it.
    pub fn parse(note: &str) -> Option<Self> {
        let n = note.to_lowercase();
        let table: [(&[&str], Allergen); 8] = [
            (&["shellfish", "shrimp", "prawn", "crustacean"], Self::Shellfish),
            (&["fish"], Self::Fish),
            (&["lactose"], Self::Lactose),
            (&["dairy", "milk"], Self::Dairy),
            (&["gluten", "wheat", "celiac", "coeliac"], Self::Gluten),
            (&["egg"], Self::Eggs),
            (&["soy"], Self::Soy),
            (&["nut", "peanut", "almond"], Self::Nuts),
        ];
        table
            .into_iter()
            .find(|(keys, _)| keys.iter().any(|k| n.contains(k)))
            .map(|(_, a)| a)
    }

    pub fn forbidden_terms(self) -> &'static [&'static str] {
        match self {
            Self::Nuts => &[
                "peanut",
                "almond",
                "walnut",
                "cashew",
                "pecan",
                "hazelnut",
                "pistachio",
                "nut butter",
            ],
            Self::Dairy => &[
                "cottage cheese",
                "greek yogurt",
                "milk",
                "cheese",
                "yogurt",
                "cream",
                "whey",
                "casein",
                "paneer",
                "ghee",
            ],
            Self::Lactose => &[
                "cottage cheese",
                "greek yogurt",
                "milk",
                "cheese",
                "yogurt",
                "cream",
                "whey",
                "casein",
            ],
            Self::Gluten => &[
                "bread", "toast", "pasta", "wheat", "barley", "couscous", "pancake", "granola",
            ],
            Self::Eggs => &["egg"],
            Self::Soy => &["soy", "tofu", "edamame", "tempeh"],
            Self::Shellfish => &["shrimp", "prawn", "crab", "lobster", "scallop"],
            Self::Fish => &["salmon", "tuna", "cod", "fish", "tilapia", "sardine"],
        }
    }
}

impl fmt::Display for Allergen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nuts => write!(f, "nuts"),
            Self::Dairy => write!(f, "dairy"),
            Self::Gluten => write!(f, "gluten"),
            Self::Eggs => write!(f, "eggs"),
            Self::Soy => write!(f, "soy"),
            Self::Shellfish => write!(f, "shellfish"),
            Self::Fish => write!(f, "fish"),
            Self::Lactose => write!(f, "lactose"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DietPreference {
    Vegetarian,
    Vegan,
    Pescatarian,
    Keto,
    Paleo,
}

const MEATS: [&str; 9] = [
    "chicken breast",
    "turkey breast",
    "chicken",
    "beef",
    "turkey",
    "pork",
    "lamb",
    "bacon",
    "steak",
];
const SEAFOOD: [&str; 7] = ["salmon", "tuna", "cod", "fish", "shrimp", "prawn", "gelatin"];
const ANIMAL_PRODUCTS: [&str; 11] = [
    "cottage cheese",
    "greek yogurt",
    "egg",
    "milk",
    "cheese",
    "yogurt",
    "cream",
    "whey",
    "casein",
    "ghee",
    "honey",
];

impl DietPreference {
    /// Free-text preference to a known diet. Anything unrecognized, including
    /// "non-vegetarian", is no restriction.
    pub fn parse(text: &str) -> Option<Self> {
        let t = text.to_lowercase();
        if t.trim().is_empty() || t.contains("non-veg") || t.contains("non veg") {
            return None;
        }
        if t.contains("vegan") {
            Some(Self::Vegan)
        } else if t.contains("vegetarian") {
            Some(Self::Vegetarian)
        } else if t.contains("pescatarian") || t.contains("pescetarian") {
            Some(Self::Pescatarian)
        } else if t.contains("keto") {
            Some(Self::Keto)
        } else if t.contains("paleo") {
            Some(Self::Paleo)
        } else {
            None
        }
    }

    pub fn forbidden_terms(self) -> Vec<&'static str> {
        match self {
            Self::Vegetarian => MEATS.iter().chain(SEAFOOD.iter()).copied().collect(),
            Self::Vegan => MEATS
                .iter()
                .chain(SEAFOOD.iter())
                .chain(ANIMAL_PRODUCTS.iter())
                .chain(["paneer"].iter())
                .copied()
                .collect(),
            Self::Pescatarian => MEATS.to_vec(),
            Self::Keto => vec![
                "sweet potato",
                "oat",
                "rice",
                "bread",
                "toast",
                "pasta",
                "potato",
                "banana",
                "granola",
                "sugar",
                "honey",
                "quinoa",
            ],
            Self::Paleo => vec![
                "oat", "rice", "bread", "pasta", "quinoa", "bean", "lentil", "chickpea", "peanut",
                "milk", "cheese", "yogurt", "whey", "casein", "tofu", "soy",
            ],
        }
    }
}

impl fmt::Display for DietPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vegetarian => write!(f, "vegetarian"),
            Self::Vegan => write!(f, "vegan"),
            Self::Pescatarian => write!(f, "pescatarian"),
            Self::Keto => write!(f, "keto"),
            Self::Paleo => write!(f, "paleo"),
        }
    }
}

/// Replacement candidates for a forbidden term, best first.
fn alternatives(term: &str, preference: Option<DietPreference>) -> &'static [&'static str] {
    use DietPreference::*;
    match term {
        "chicken breast" | "turkey breast" | "chicken" | "turkey" | "beef" | "steak" | "pork"
        | "lamb" | "bacon" => match preference {
            Some(Vegan) => &["tofu", "tempeh", "chickpeas"],
            Some(Vegetarian) => &["paneer", "tofu", "chickpeas"],
            Some(Pescatarian) => &["white fish", "tofu"],
            _ if term.starts_with("turkey") => &["chicken", "lean beef"],
            _ => &["turkey", "lean beef"],
        },
        "salmon" | "tuna" | "cod" | "fish" | "tilapia" | "sardine" => match preference {
            Some(Vegan) => &["tofu", "tempeh", "chickpeas"],
            Some(Vegetarian) => &["paneer", "tofu", "chickpeas"],
            _ => &["chicken breast", "turkey", "tofu"],
        },
        "shrimp" | "prawn" | "crab" | "lobster" | "scallop" => match preference {
            Some(Vegan) | Some(Vegetarian) => &["tofu", "chickpeas"],
            _ => &["chicken breast", "white fish", "tofu"],
        },
        "egg" => &["tofu scramble", "chickpea omelette"],
        "milk" => &["oat drink", "almond drink", "coconut drink"],
        "cottage cheese" | "greek yogurt" | "yogurt" => &["chia pudding", "silken tofu"],
        "cheese" | "paneer" => &["tofu", "avocado", "chickpeas"],
        "cream" => &["avocado", "coconut"],
        "whey" | "casein" => &["pea protein", "hemp protein"],
        "ghee" => &["olive oil"],
        "honey" | "sugar" => match preference {
            Some(Keto) => &["stevia"],
            _ => &["maple syrup", "stevia"],
        },
        "bread" | "toast" => &["rice cakes", "corn tortilla", "lettuce wraps"],
        "pasta" => &["rice noodles", "zucchini noodles"],
        "wheat" | "barley" | "couscous" => &["quinoa", "millet", "cauliflower"],
        "pancake" => &["rice cakes", "chia pudding"],
        "granola" => &["pumpkin seeds", "chia seeds"],
        "nut butter" => &["sunflower seed butter", "tahini"],
        "peanut" | "almond" | "walnut" | "cashew" | "pecan" | "hazelnut" | "pistachio" => {
            &["sunflower seeds", "pumpkin seeds"]
        }
        "soy" | "tofu" | "edamame" | "tempeh" => match preference {
            Some(Vegan) | Some(Vegetarian) => &["chickpeas", "lentils", "seitan"],
            _ => &["chickpeas", "chicken breast", "turkey"],
        },
        "oat" => &["chia pudding", "quinoa flakes"],
        "rice" | "quinoa" => &["cauliflower", "quinoa", "millet"],
        "sweet potato" | "potato" => &["roasted zucchini", "cauliflower mash"],
        "banana" => &["berries"],
        "bean" | "lentil" | "chickpea" => &["mushrooms", "cauliflower"],
        "gelatin" => &["agar"],
        _ => &[],
    }
}

const LAST_RESORT: &str = "seasonal vegetables";

#[derive(Debug, Clone)]
struct ForbiddenTerm {
    term: &'static str,
    reason: String,
}

/// Rewrites meals that contain ingredients ruled out by allergies or the
/// dietary preference. Without either, meals pass through untouched.
#[derive(Debug, Clone, Default)]
pub struct DietFilter {
    allergens: Vec<Allergen>,
    preference: Option<DietPreference>,
    terms: Vec<ForbiddenTerm>,
}

impl DietFilter {
    pub fn new(allergy_notes: &[String], preference: &str) -> Self {
        let mut allergens: Vec<Allergen> = Vec::new();
        for note in allergy_notes {
            if let Some(a) = Allergen::parse(note)
                && !allergens.contains(&a)
            {
                allergens.push(a);
            }
        }
        let preference = DietPreference::parse(preference);

        let mut terms: Vec<ForbiddenTerm> = Vec::new();
        let mut push = |term: &'static str, reason: String| {
            if !terms.iter().any(|t| t.term == term) {
                terms.push(ForbiddenTerm { term, reason });
            }
        };
        for a in &allergens {
            for t in a.forbidden_terms() {
                push(t, format!("{} allergy", a));
            }
        }
        if let Some(p) = preference {
            for t in p.forbidden_terms() {
                push(t, format!("{} diet", p));
            }
        }
        // Longest first so "sweet potato" wins over "potato"
        terms.sort_by(|a, b| b.term.len().cmp(&a.term.len()));

        Self {
            allergens,
            preference,
            terms,
        }
    }

    pub fn allergens(&self) -> &[Allergen] {
        &self.allergens
    }

    pub fn preference(&self) -> Option<DietPreference> {
        self.preference
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Whether any active forbidden term appears in `text`.
    pub fn forbids(&self, text: &str) -> bool {
        let lower = text.to_ascii_lowercase();
        self.terms.iter().any(|t| lower.contains(t.term))
    }

    fn replacement_for(&self, term: &str) -> &'static str {
        alternatives(term, self.preference)
            .iter()
            .copied()
            .find(|alt| !self.forbids(alt))
            .unwrap_or(LAST_RESORT)
    }

    /// Rewrite one piece of text, returning the new text and a note per
    /// replacement made.
    pub fn rewrite(&self, text: &str) -> (String, Vec<String>) {
        let mut current = text.to_string();
        let mut notes = Vec::new();
        for rule in &self.terms {
            let alt = self.replacement_for(rule.term);
            if alt.contains(rule.term) {
                continue;
            }
            while let Some((start, end)) = find_word_containing(&current, rule.term) {
                let original = current[start..end].to_string();
                current.replace_range(start..end, alt);
                notes.push(format!(
                    "{}: replaced '{}' with '{}'",
                    rule.reason, original, alt
                ));
            }
        }
        (current, notes)
    }

    /// Rewrite a meal's description and ingredients in place. Returns true
    /// when anything changed.
    pub fn apply(&self, meal: &mut Meal) -> bool {
        if self.is_empty() {
            return false;
        }
        let (description, mut notes) = self.rewrite(&meal.description);
        meal.description = description;
        for ingredient in meal.ingredients.iter_mut() {
            let (rewritten, more) = self.rewrite(ingredient);
            *ingredient = rewritten;
            notes.extend(more);
        }
        if notes.is_empty() {
            return false;
        }
        notes.dedup();
        meal.modified = true;
        meal.modification_note = Some(notes.join("; "));
        true
    }

    /// Returns how many meals were modified.
    pub fn apply_all(&self, meals: &mut [Meal]) -> usize {
        let mut modified = 0;
        for meal in meals.iter_mut() {
            if self.apply(meal) {
                modified += 1;
            }
        }
        modified
    }
}

/// Byte range of the whole word containing the first case-insensitive
/// occurrence of `term` (which may span several words).
fn find_word_containing(text: &str, term: &str) -> Option<(usize, usize)> {
    let lower = text.to_ascii_lowercase();
    let pos = lower.find(term)?;
    let bytes = text.as_bytes();
    let is_word = |b: u8| b.is_ascii_alphanumeric() || b == b'_';
    let mut start = pos;
    while start > 0 && is_word(bytes[start - 1]) {
        start -= 1;
    }
    let mut end = pos + term.len();
    while end < bytes.len() && is_word(bytes[end]) {
        end += 1;
    }
    Some((start, end))
}
