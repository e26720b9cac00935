use std::fmt::{self, Write};

use clap::ValueEnum;
use content::ProjectView;
use core_session::{GalleryPage, Session};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Section {
    Hero,
    About,
    Education,
    Experience,
    Projects,
    Skills,
    Contact,
    Footer,
}

impl Section {
    pub const ALL: [Section; 8] = [
        Section::Hero,
        Section::About,
        Section::Education,
        Section::Experience,
        Section::Projects,
        Section::Skills,
        Section::Contact,
        Section::Footer,
    ];
}

/// Renders one section, or the whole page when `section` is `None`.
pub fn render_page(session: &Session, section: Option<Section>) -> Result<String, fmt::Error> {
    let mut out = String::new();
    match section {
        Some(section) => render_section(&mut out, session, section)?,
        None => {
            for (index, section) in Section::ALL.into_iter().enumerate() {
                if index > 0 {
                    writeln!(out)?;
                }
                render_section(&mut out, session, section)?;
            }
        }
    }
    Ok(out)
}

fn render_section(out: &mut String, session: &Session, section: Section) -> fmt::Result {
    match section {
        Section::Hero => render_hero(out, session),
        Section::About => render_about(out, session),
        Section::Education => render_education(out, session),
        Section::Experience => render_experience(out, session),
        Section::Projects => {
            heading(out, session.t("sections.projects"))?;
            render_gallery(out, session, &session.gallery())
        }
        Section::Skills => render_skills(out, session),
        Section::Contact => render_contact(out, session),
        Section::Footer => render_footer(out, session),
    }
}

fn heading(out: &mut String, title: &str) -> fmt::Result {
    writeln!(out, "== {title} ==")
}

fn render_hero(out: &mut String, session: &Session) -> fmt::Result {
    let view = session.view();
    writeln!(out, "{}", view.name)?;
    writeln!(out, "{}", view.headline)?;
    writeln!(out)?;
    writeln!(out, "{}", view.summary)?;
    writeln!(out)?;
    writeln!(out, "{} | {} | {}", view.location, view.email, view.phone)?;
    if let Some(resume) = view.resume {
        writeln!(out, "{}: {resume}", session.t("hero.downloadResume"))?;
    }
    writeln!(out, "{}: portfolio contact", session.t("hero.getInTouch"))
}

fn render_about(out: &mut String, session: &Session) -> fmt::Result {
    heading(out, session.t("sections.about"))?;
    writeln!(out, "{}", session.view().about)?;
    for area in session.focus_areas() {
        writeln!(out)?;
        writeln!(out, "[{}] {}", area.icon, area.title)?;
        writeln!(out, "    {}", area.description)?;
    }
    Ok(())
}

fn render_education(out: &mut String, session: &Session) -> fmt::Result {
    heading(out, session.t("sections.education"))?;
    for entry in session.view().education {
        writeln!(out, "* {} - {}", entry.institution, entry.degree)?;
        writeln!(out, "  {} | {}", entry.location, entry.period)?;
        if let Some(gpa) = entry.gpa {
            writeln!(out, "  {} {gpa}", session.t("timeline.gpa"))?;
        }
        if let Some(courses) = entry.courses {
            writeln!(
                out,
                "  {} {}",
                session.t("timeline.keyCourses"),
                courses.join(", ")
            )?;
        }
        if let Some(achievements) = entry.achievements {
            for achievement in achievements {
                writeln!(out, "  {} {achievement}", session.t("timeline.achievement"))?;
            }
        }
    }
    Ok(())
}

fn render_experience(out: &mut String, session: &Session) -> fmt::Result {
    heading(out, session.t("sections.experience"))?;
    for entry in session.view().experience {
        writeln!(out, "* {} - {}", entry.company, entry.role)?;
        writeln!(out, "  {} | {}", entry.location, entry.period)?;
        for bullet in entry.bullets {
            writeln!(out, "  - {bullet}")?;
        }
    }
    Ok(())
}

/// Filter status, the visible cards and the empty-state message.
pub fn render_gallery(out: &mut String, session: &Session, page: &GalleryPage<'_>) -> fmt::Result {
    let filters = session.filters();
    if !filters.query().is_empty() {
        writeln!(out, "\"{}\"", filters.query())?;
    }
    if !filters.selected_tags().is_empty() {
        let selected: Vec<&str> = filters.selected_tags().iter().map(String::as_str).collect();
        writeln!(
            out,
            "{} {}",
            session.t("projects.filterByTags"),
            selected.join(", ")
        )?;
    }
    writeln!(
        out,
        "{} {} {} {} {}",
        session.t("projects.showing"),
        page.summary.visible,
        session.t("projects.of"),
        page.summary.total,
        session.t("projects.projects")
    )?;

    if page.projects.is_empty() {
        return writeln!(out, "{}", session.t("projects.noProjectsFound"));
    }
    for project in &page.projects {
        writeln!(out)?;
        render_project(out, session, project)?;
    }
    Ok(())
}

fn render_project(out: &mut String, session: &Session, project: &ProjectView<'_>) -> fmt::Result {
    writeln!(out, "# {}", project.title)?;
    match project.location {
        Some(location) => writeln!(out, "  {} | {} | {location}", project.role, project.period)?,
        None => writeln!(out, "  {} | {}", project.role, project.period)?,
    }
    writeln!(out, "  [{}]", project.tags.join("] ["))?;
    writeln!(out, "  {}: {}", session.t("projects.problem"), project.problem)?;
    writeln!(out, "  {}: {}", session.t("projects.dataset"), project.dataset)?;
    writeln!(out, "  {}: {}", session.t("projects.approach"), project.approach)?;
    writeln!(
        out,
        "  {}: {}",
        session.t("projects.tools"),
        project.tools.join(", ")
    )?;
    writeln!(out, "  {}:", session.t("projects.impact"))?;
    for impact in project.impact {
        writeln!(out, "    - {impact}")?;
    }
    if let Some(next_steps) = project.next_steps {
        writeln!(out, "  {}: {next_steps}", session.t("projects.nextSteps"))?;
    }
    for url in [project.github_url, project.live_url, project.case_study_url]
        .into_iter()
        .flatten()
    {
        writeln!(out, "  -> {url}")?;
    }
    Ok(())
}

fn render_skills(out: &mut String, session: &Session) -> fmt::Result {
    heading(out, session.t("sections.skills"))?;
    for category in session.view().skills {
        writeln!(out, "* {}: {}", category.name, category.skills.join(", "))?;
    }
    Ok(())
}

fn render_contact(out: &mut String, session: &Session) -> fmt::Result {
    heading(out, session.t("contact.title"))?;
    writeln!(out, "{}", session.t("contact.subtitle"))?;
    let view = session.view();
    writeln!(out, "{} | {}", view.email, view.phone)?;
    writeln!(out, "{}", session.t("contact.preferEmail"))?;
    writeln!(out, "{}", session.mailto_link())
}

fn render_footer(out: &mut String, session: &Session) -> fmt::Result {
    let view = session.view();
    writeln!(out, "{}:", session.t("footer.connect"))?;
    for link in view.social {
        writeln!(out, "  {}: {}", link.name, link.url)?;
    }
    writeln!(out, "{}: {}", session.t("footer.contact"), view.email)?;
    writeln!(out, "(c) {}. {}", view.name, session.t("footer.rightsReserved"))
}
