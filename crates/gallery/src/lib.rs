use std::collections::BTreeSet;

use content::ProjectView;
use indexmap::IndexSet;
use tracing::trace;

/// The fields a gallery item exposes to search and tag filtering.
pub trait Filterable {
    fn title(&self) -> &str;
    fn problem(&self) -> &str;
    fn tags(&self) -> &[String];
    fn tools(&self) -> &[String];
}

impl Filterable for ProjectView<'_> {
    fn title(&self) -> &str {
        self.title
    }

    fn problem(&self) -> &str {
        self.problem
    }

    fn tags(&self) -> &[String] {
        self.tags
    }

    fn tools(&self) -> &[String] {
        self.tools
    }
}

/// Search text and selected tags of the gallery controls.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    query: String,
    selected_tags: IndexSet<String>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn selected_tags(&self) -> &IndexSet<String> {
        &self.selected_tags
    }

    pub fn is_selected(&self, tag: &str) -> bool {
        self.selected_tags.contains(tag)
    }

    /// Selects `tag` if it is not selected, deselects it otherwise.
    /// Returns whether the tag is selected afterwards.
    pub fn toggle_tag(&mut self, tag: &str) -> bool {
        if self.selected_tags.shift_remove(tag) {
            false
        } else {
            self.selected_tags.insert(tag.to_string());
            true
        }
    }

    /// Selects `tag` without toggling. Returns whether it was newly selected.
    pub fn select_tag(&mut self, tag: &str) -> bool {
        self.selected_tags.insert(tag.to_string())
    }

    pub fn clear_tags(&mut self) {
        self.selected_tags.clear();
    }

    pub fn clear(&mut self) {
        self.query.clear();
        self.selected_tags.clear();
    }

    pub fn is_active(&self) -> bool {
        !self.query.is_empty() || !self.selected_tags.is_empty()
    }

    pub fn apply<'p, T: Filterable>(&self, projects: &'p [T]) -> Vec<&'p T> {
        filter(projects, &self.query, &self.selected_tags)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterSummary {
    pub visible: usize,
    pub total: usize,
}

/// Projects matching both the search text and every selected tag, in
/// their original order.
pub fn filter<'p, T, S>(projects: &'p [T], query: &str, selected_tags: S) -> Vec<&'p T>
where
    T: Filterable,
    S: IntoIterator,
    S::Item: AsRef<str>,
{
    let selected: Vec<S::Item> = selected_tags.into_iter().collect();
    let needle = query.to_lowercase();

    let visible: Vec<&T> = projects
        .iter()
        .filter(|project| matches_query(*project, &needle) && matches_tags(*project, &selected))
        .collect();
    trace!(
        query,
        tags = selected.len(),
        visible = visible.len(),
        total = projects.len(),
        "filtered projects"
    );
    visible
}

pub fn summarize<T>(visible: &[&T], projects: &[T]) -> FilterSummary {
    FilterSummary {
        visible: visible.len(),
        total: projects.len(),
    }
}

fn matches_query<T: Filterable>(project: &T, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    let contains = |text: &str| text.to_lowercase().contains(needle);
    contains(project.title())
        || project.tags().iter().any(|tag| contains(tag))
        || contains(project.problem())
        || project.tools().iter().any(|tool| contains(tool))
}

fn matches_tags<T: Filterable, S: AsRef<str>>(project: &T, selected: &[S]) -> bool {
    selected
        .iter()
        .all(|tag| project.tags().iter().any(|own| own == tag.as_ref()))
}

/// Every tag used by any project, deduplicated and sorted.
pub fn available_tags<T: Filterable>(projects: &[T]) -> Vec<String> {
    projects
        .iter()
        .flat_map(|project| project.tags().iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use content::{ProfileView, embedded_profile};
    use core_types::Locale;

    use super::*;

    struct Card {
        title: String,
        problem: String,
        tags: Vec<String>,
        tools: Vec<String>,
    }

    impl Card {
        fn new(title: &str, tags: &[&str], tools: &[&str]) -> Self {
            Self {
                title: title.to_string(),
                problem: format!("{title} problem statement"),
                tags: tags.iter().map(|t| t.to_string()).collect(),
                tools: tools.iter().map(|t| t.to_string()).collect(),
            }
        }
    }

    impl Filterable for Card {
        fn title(&self) -> &str {
            &self.title
        }

        fn problem(&self) -> &str {
            &self.problem
        }

        fn tags(&self) -> &[String] {
            &self.tags
        }

        fn tools(&self) -> &[String] {
            &self.tools
        }
    }

    fn cards() -> Vec<Card> {
        vec![
            Card::new("Housing", &["Python", "SQL"], &["Pandas"]),
            Card::new("Bookings", &["SQL", "Tableau"], &["MySQL", "Excel"]),
            Card::new("Transit", &["Python", "Dashboard"], &["Matplotlib"]),
        ]
    }

    fn titles<'a>(items: &[&'a Card]) -> Vec<&'a str> {
        items.iter().map(|card| card.title.as_str()).collect()
    }

    #[test]
    fn empty_filters_return_everything_in_order() {
        let cards = cards();
        let visible = filter(&cards, "", Vec::<String>::new());
        assert_eq!(titles(&visible), vec!["Housing", "Bookings", "Transit"]);
    }

    #[test]
    fn query_matches_title_tags_problem_and_tools_case_insensitively() {
        let cards = cards();
        assert_eq!(titles(&filter(&cards, "HOUS", [""; 0])), vec!["Housing"]);
        assert_eq!(titles(&filter(&cards, "tableau", [""; 0])), vec!["Bookings"]);
        assert_eq!(titles(&filter(&cards, "excel", [""; 0])), vec!["Bookings"]);
        assert_eq!(
            titles(&filter(&cards, "problem stat", [""; 0])),
            vec!["Housing", "Bookings", "Transit"]
        );
    }

    #[test]
    fn query_without_matches_returns_nothing() {
        let cards = cards();
        assert!(filter(&cards, "blockchain", [""; 0]).is_empty());
    }

    #[test]
    fn tag_selection_is_conjunctive() {
        let cards = vec![Card::new("Only", &["Python", "SQL"], &[])];
        assert!(filter(&cards, "", ["Python", "Tableau"]).is_empty());
        assert_eq!(filter(&cards, "", ["Python", "SQL"]).len(), 1);
        assert_eq!(filter(&cards, "", ["Python"]).len(), 1);
    }

    #[test]
    fn query_and_tags_must_both_match() {
        let cards = cards();
        assert_eq!(titles(&filter(&cards, "trans", ["Python"])), vec!["Transit"]);
        assert!(filter(&cards, "trans", ["SQL"]).is_empty());
    }

    #[test]
    fn filtering_is_repeatable() {
        let cards = cards();
        let first = titles(&filter(&cards, "s", ["SQL"]));
        let second = titles(&filter(&cards, "s", ["SQL"]));
        assert_eq!(first, second);
        assert_eq!(first, vec!["Housing", "Bookings"]);
    }

    #[test]
    fn toggling_twice_restores_selection() {
        let mut state = FilterState::new();
        state.toggle_tag("SQL");
        let before = state.clone();

        assert!(state.toggle_tag("Python"));
        assert!(!state.toggle_tag("Python"));
        assert_eq!(state, before);

        assert!(!state.toggle_tag("SQL"));
        assert!(!state.is_active());
    }

    #[test]
    fn selecting_a_tag_twice_keeps_it_selected() {
        let mut state = FilterState::new();
        assert!(state.select_tag("Tableau"));
        assert!(!state.select_tag("Tableau"));
        assert_eq!(state.selected_tags().len(), 1);

        let cards = cards();
        assert_eq!(titles(&state.apply(&cards)), vec!["Bookings"]);
    }

    #[test]
    fn clear_tags_keeps_query() {
        let mut state = FilterState::new();
        state.set_query("trans");
        state.toggle_tag("SQL");
        state.clear_tags();
        assert_eq!(state.query(), "trans");
        assert!(state.selected_tags().is_empty());
    }

    #[test]
    fn clear_resets_query_and_tags() {
        let mut state = FilterState::new();
        state.set_query("sql");
        state.toggle_tag("Python");
        assert!(state.is_active());
        state.clear();
        assert_eq!(state, FilterState::default());
    }

    #[test]
    fn available_tags_are_sorted_and_unique() {
        let cards = cards();
        assert_eq!(
            available_tags(&cards),
            vec!["Dashboard", "Python", "SQL", "Tableau"]
        );
    }

    #[test]
    fn filters_projected_profile() {
        let profile = embedded_profile().expect("profile");
        let view = ProfileView::project(&profile, Locale::Zh);

        let mut state = FilterState::new();
        state.set_query("酒店");
        let visible = state.apply(&view.projects);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, "hospitality-cancellation");

        state.clear();
        state.toggle_tag("Tableau");
        state.toggle_tag("SQL");
        let visible = state.apply(&view.projects);
        let summary = summarize(&visible, &view.projects);
        assert_eq!(summary, FilterSummary { visible: 1, total: 4 });

        let tags = available_tags(&view.projects);
        assert!(tags.windows(2).all(|pair| pair[0] < pair[1]));
        assert!(tags.contains(&"People Analytics".to_string()));
    }
}
