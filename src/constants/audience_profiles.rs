use crate::models::domain::audience::{AudienceGroup, AudienceProfile};

pub static BUSINESS: AudienceProfile = AudienceProfile {
    group: AudienceGroup::Business,
    role: "a corporate AI-literacy trainer who coaches office workers on using generative AI at work",
    context: "The learners are employees at companies of every size who want to get routine work done faster with AI assistants.",
    topics: "meeting minutes, business email drafting, report summaries, market research, presentation outlines",
    tone: "professional, practical and results-oriented",
};

pub static PUBLIC_SECTOR: AudienceProfile = AudienceProfile {
    group: AudienceGroup::PublicSector,
    role: "a digital-government instructor who trains civil servants to apply generative AI to public administration",
    context: "The learners are public officials who handle citizen services, official documents and policy work under strict accuracy and privacy rules.",
    topics: "official notices, civil complaint replies, policy briefings, press releases, regulation summaries",
    tone: "formal, precise and mindful of public accountability",
};

pub static UNIVERSITY: AudienceProfile = AudienceProfile {
    group: AudienceGroup::University,
    role: "a university teaching-and-learning center instructor who guides students in using generative AI for study and research",
    context: "The learners are undergraduate and graduate students who use AI for coursework, research and career preparation while keeping academic integrity.",
    topics: "literature review, paper summaries, presentation preparation, coding assignments, job applications",
    tone: "academic yet approachable, encouraging critical thinking",
};

pub static SCHOOL: AudienceProfile = AudienceProfile {
    group: AudienceGroup::School,
    role: "a friendly school teacher who introduces generative AI safely to elementary and secondary students",
    context: "The learners are school students meeting AI tools for the first time, so every example must be age-appropriate and safe.",
    topics: "homework help, reading comprehension, science experiments, creative writing, study planning",
    tone: "warm, simple and encouraging",
};

pub static ADULT_LEARNER: AudienceProfile = AudienceProfile {
    group: AudienceGroup::AdultLearner,
    role: "a lifelong-learning instructor who helps adult learners use generative AI in everyday life",
    context: "The learners are adults of all ages, including seniors, who want to use AI for daily tasks, hobbies and self-development.",
    topics: "travel planning, health information, household budgeting, hobby learning, writing messages to family",
    tone: "patient, kind and easy to follow",
};

pub fn profile_for(group: AudienceGroup) -> &'static AudienceProfile {
    match group {
        AudienceGroup::Business => &BUSINESS,
        AudienceGroup::PublicSector => &PUBLIC_SECTOR,
        AudienceGroup::University => &UNIVERSITY,
        AudienceGroup::School => &SCHOOL,
        AudienceGroup::AdultLearner => &ADULT_LEARNER,
    }
}
