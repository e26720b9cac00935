use core_types::{
    Avatar, Education, Experience, Locale, Localized, Profile, Project, SkillCategory, SocialLink,
};
use i18n::I18n;

/// Resolves a localizable field for `locale`.
pub fn project<T>(field: &Localized<T>, locale: Locale) -> &T {
    field.resolve(locale)
}

/// Like [`project`], for a raw locale code. Unknown codes use the default locale.
pub fn project_for_code<'a, T>(field: &'a Localized<T>, code: &str) -> &'a T {
    field.resolve(Locale::parse(code).unwrap_or_default())
}

fn project_list(field: &Localized<Vec<String>>, locale: Locale) -> &[String] {
    field.resolve(locale).as_slice()
}

#[derive(Debug, Clone)]
pub struct EducationView<'a> {
    pub institution: &'a str,
    pub degree: &'a str,
    pub location: &'a str,
    pub period: &'a str,
    pub gpa: Option<&'a str>,
    pub courses: Option<&'a [String]>,
    pub achievements: Option<&'a [String]>,
}

impl<'a> EducationView<'a> {
    pub fn project(education: &'a Education, locale: Locale) -> Self {
        Self {
            institution: &education.institution,
            degree: education.degree.resolve(locale),
            location: &education.location,
            period: &education.period,
            gpa: education.gpa.as_deref(),
            courses: education
                .courses
                .as_ref()
                .map(|courses| project_list(courses, locale)),
            achievements: education
                .achievements
                .as_ref()
                .map(|achievements| project_list(achievements, locale)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ExperienceView<'a> {
    pub company: &'a str,
    pub role: &'a str,
    pub location: &'a str,
    pub period: &'a str,
    pub bullets: &'a [String],
}

impl<'a> ExperienceView<'a> {
    pub fn project(experience: &'a Experience, locale: Locale) -> Self {
        Self {
            company: &experience.company,
            role: experience.role.resolve(locale),
            location: &experience.location,
            period: &experience.period,
            bullets: project_list(&experience.bullets, locale),
        }
    }
}

/// A project with every translated field resolved. Tags and tools are
/// never translated and are passed through verbatim.
#[derive(Debug, Clone)]
pub struct ProjectView<'a> {
    pub id: &'a str,
    pub title: &'a str,
    pub role: &'a str,
    pub period: &'a str,
    pub location: Option<&'a str>,
    pub tags: &'a [String],
    pub problem: &'a str,
    pub dataset: &'a str,
    pub approach: &'a str,
    pub tools: &'a [String],
    pub impact: &'a [String],
    pub next_steps: Option<&'a str>,
    pub github_url: Option<&'a str>,
    pub live_url: Option<&'a str>,
    pub case_study_url: Option<&'a str>,
}

impl<'a> ProjectView<'a> {
    pub fn project(project: &'a Project, locale: Locale) -> Self {
        Self {
            id: &project.id,
            title: project.title.resolve(locale),
            role: project.role.resolve(locale),
            period: &project.period,
            location: project.location.as_deref(),
            tags: &project.tags,
            problem: project.problem.resolve(locale),
            dataset: project.dataset.resolve(locale),
            approach: project.approach.resolve(locale),
            tools: &project.tools,
            impact: project_list(&project.impact, locale),
            next_steps: project
                .next_steps
                .as_ref()
                .map(|next| next.resolve(locale).as_str()),
            github_url: project.github_url.as_deref(),
            live_url: project.live_url.as_deref(),
            case_study_url: project.case_study_url.as_deref(),
        }
    }

    pub fn has_links(&self) -> bool {
        self.github_url.is_some() || self.live_url.is_some() || self.case_study_url.is_some()
    }
}

#[derive(Debug, Clone)]
pub struct ProfileView<'a> {
    pub locale: Locale,
    pub name: &'a str,
    pub location: &'a str,
    pub email: &'a str,
    pub phone: &'a str,
    pub headline: &'a str,
    pub summary: &'a str,
    pub about: &'a str,
    pub avatar: &'a Avatar,
    pub resume: Option<&'a str>,
    pub social: &'a [SocialLink],
    pub education: Vec<EducationView<'a>>,
    pub experience: Vec<ExperienceView<'a>>,
    pub projects: Vec<ProjectView<'a>>,
    pub skills: &'a [SkillCategory],
}

impl<'a> ProfileView<'a> {
    pub fn project(profile: &'a Profile, locale: Locale) -> Self {
        Self {
            locale,
            name: &profile.name,
            location: &profile.location,
            email: &profile.email,
            phone: &profile.phone,
            headline: profile.headline.resolve(locale),
            summary: profile.summary.resolve(locale),
            about: profile.about.resolve(locale),
            avatar: &profile.avatar,
            resume: profile.resume.as_deref(),
            social: &profile.social,
            education: profile
                .education
                .iter()
                .map(|education| EducationView::project(education, locale))
                .collect(),
            experience: profile
                .experience
                .iter()
                .map(|experience| ExperienceView::project(experience, locale))
                .collect(),
            projects: profile
                .projects
                .iter()
                .map(|project| ProjectView::project(project, locale))
                .collect(),
            skills: &profile.skills,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FocusAreaView {
    pub key: String,
    pub icon: String,
    pub title: String,
    pub description: String,
}

/// Focus areas carry only a key; their text comes from the translation table.
pub fn focus_areas(profile: &Profile, i18n: &I18n) -> Vec<FocusAreaView> {
    profile
        .focus_areas
        .iter()
        .map(|area| {
            let title_key = format!("focusAreas.{}.title", area.key);
            let description_key = format!("focusAreas.{}.description", area.key);
            FocusAreaView {
                key: area.key.clone(),
                icon: area.icon.clone(),
                title: i18n.t(&title_key).to_string(),
                description: i18n.t(&description_key).to_string(),
            }
        })
        .collect()
}
