//! Demo dashboard report returned by the simulated analyzer.
//!
//! Every value here is fixed sample data. Nothing is derived from the
//! submitted file.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillFrequency {
    pub skill: String,
    pub frequency: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MissingSkill {
    pub skill: String,
    pub priority: Priority,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobRecommendation {
    pub id: u32,
    pub title: String,
    pub company: String,
    /// Match percentage, 0-100.
    #[serde(rename = "match")]
    pub match_percent: u8,
    pub salary: String,
    pub location: String,
    pub skills_matched: Vec<String>,
    pub skills_missing: Vec<String>,
    pub posted: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardReport {
    /// ATS compatibility score, 0-100.
    pub ats_score: u8,
    pub skills: Vec<SkillFrequency>,
    pub missing_skills: Vec<MissingSkill>,
    pub job_recommendations: Vec<JobRecommendation>,
}

impl DashboardReport {
    pub fn demo() -> Self {
        let skills = [
            ("React", 85),
            ("JavaScript", 78),
            ("Python", 65),
            ("AWS", 45),
            ("Node.js", 40),
        ]
        .into_iter()
        .map(|(skill, frequency)| SkillFrequency {
            skill: skill.to_string(),
            frequency,
        })
        .collect();

        let missing_skills = [
            ("TypeScript", Priority::High, "Add to your technical skills section"),
            ("Docker", Priority::Medium, "Mention in your project experience"),
            ("GraphQL", Priority::Medium, "Include in relevant projects"),
            ("Kubernetes", Priority::Low, "Consider for cloud-based roles"),
            ("MongoDB", Priority::Low, "Add to database experience"),
        ]
        .into_iter()
        .map(|(skill, priority, description)| MissingSkill {
            skill: skill.to_string(),
            priority,
            description: description.to_string(),
        })
        .collect();

        let job_recommendations = vec![
            job(
                1,
                "Senior Frontend Developer",
                "Google",
                85,
                "$120k - $160k",
                "San Francisco, CA",
                &["React", "JavaScript", "CSS"],
                &["TypeScript", "Next.js"],
                "2 days ago",
            ),
            job(
                2,
                "Full Stack Engineer",
                "Amazon",
                78,
                "$110k - $145k",
                "Seattle, WA",
                &["Python", "AWS", "React"],
                &["Docker", "GraphQL"],
                "1 day ago",
            ),
            job(
                3,
                "React Developer",
                "Microsoft",
                82,
                "$95k - $130k",
                "Remote",
                &["React", "JavaScript", "Node.js"],
                &["Azure", "TypeScript"],
                "3 days ago",
            ),
        ];

        Self {
            ats_score: 72,
            skills,
            missing_skills,
            job_recommendations,
        }
    }

    /// Share of the score still open for improvement.
    pub fn needs_improvement(&self) -> u8 {
        100u8.saturating_sub(self.ats_score)
    }
}

#[allow(clippy::too_many_arguments)]
fn job(
    id: u32,
    title: &str,
    company: &str,
    match_percent: u8,
    salary: &str,
    location: &str,
    matched: &[&str],
    missing: &[&str],
    posted: &str,
) -> JobRecommendation {
    JobRecommendation {
        id,
        title: title.to_string(),
        company: company.to_string(),
        match_percent,
        salary: salary.to_string(),
        location: location.to_string(),
        skills_matched: matched.iter().map(|s| s.to_string()).collect(),
        skills_missing: missing.iter().map(|s| s.to_string()).collect(),
        posted: posted.to_string(),
    }
}
