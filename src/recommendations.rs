use crate::models::Tier;

pub fn recommend(tier: Tier) -> &'static [&'static str; 3] {
    match tier {
        Tier::HighSuccess => &[
            "Keep up the excellent work.",
            "Explore leadership and advanced courses.",
            "Maintain consistent study and motivation.",
        ],
        Tier::MediumSuccess => &[
            "Focus on improving weaker subjects.",
            "Increase attendance and study hours.",
            "Seek extra help or tutoring if needed.",
        ],
        Tier::Standard => &[
            "Set achievable study goals.",
            "Improve motivation with rewards.",
            "Attend counseling sessions for support.",
        ],
        Tier::AtRisk => &[
            "Immediate intervention required.",
            "Increase study time significantly.",
            "Consult teachers and parents for an action plan.",
        ],
    }
}

pub fn recommendation_set(tier: Tier) -> Vec<String> {
    recommend(tier).iter().map(|line| line.to_string()).collect()
}
