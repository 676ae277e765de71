//! Calendar and course browsing state.
//!
//! Two independent remote fetches drive the browser: the calendar list
//! and, per calendar, that calendar's course list. Each fetch is keyed
//! by its target, and only the latest result per key is kept, so a
//! superseded in-flight fetch is reconciled by key rather than by
//! request identity.

use std::collections::HashMap;

use crate::{CalendarName, CourseId, catalog::CatalogSource};

/// Status of one remote fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchState<T> {
    /// The fetch is outstanding (also the initial state).
    Loading,
    /// The fetch completed with data.
    Success(T),
    /// The fetch failed; stays failed until a new fetch restarts it.
    Error,
}

impl<T> FetchState<T> {
    /// Whether data is available.
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// The fetched data, if any.
    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Success(data) => Some(data),
            _ => None,
        }
    }
}

/// Which calendar tab is active and what each fetch last returned.
///
/// Pure state machine: the transitions are driven externally (see
/// [`CatalogBrowser`]), which keeps this testable without a network.
pub struct BrowsingState {
    calendars: FetchState<Vec<CalendarName>>,
    courses: HashMap<CalendarName, FetchState<Vec<CourseId>>>,
    active: usize,
}

impl BrowsingState {
    /// Initial state: calendar list loading, first tab active.
    pub fn new() -> Self {
        Self {
            calendars: FetchState::Loading,
            courses: HashMap::new(),
            active: 0,
        }
    }

    /// State of the calendar-list fetch.
    pub fn calendars(&self) -> &FetchState<Vec<CalendarName>> {
        &self.calendars
    }

    /// Index of the active calendar tab.
    pub fn active_index(&self) -> usize {
        self.active
    }

    /// Name of the active calendar, once the calendar list is loaded
    /// and the index is in range.
    pub fn current_calendar(&self) -> Option<&CalendarName> {
        self.calendars.data()?.get(self.active)
    }

    /// State of the active calendar's course-list fetch.
    pub fn course_list(&self) -> Option<&FetchState<Vec<CourseId>>> {
        self.courses.get(self.current_calendar()?)
    }

    /// Whether the active calendar's course list is loaded.
    pub fn is_course_list_ready(&self) -> bool {
        self.course_list().is_some_and(FetchState::is_ready)
    }

    /// Switch the active tab.
    ///
    /// Reselecting the current index is a no-op; a new index resets the
    /// course-list fetch for that calendar to `Loading`. The selection
    /// store is untouched either way.
    pub fn select_calendar(&mut self, index: usize) {
        if index == self.active {
            return;
        }
        self.active = index;
        if let Some(calendar) = self.current_calendar().cloned() {
            self.courses.insert(calendar, FetchState::Loading);
        }
    }

    /// Mark the calendar-list fetch as outstanding.
    pub fn begin_calendars(&mut self) {
        self.calendars = FetchState::Loading;
    }

    /// Record the calendar-list fetch result.
    pub fn resolve_calendars(&mut self, result: crate::Result<Vec<CalendarName>>) {
        self.calendars = match result {
            Ok(calendars) => FetchState::Success(calendars),
            Err(e) => {
                tracing::warn!("calendar list fetch failed: {}", e);
                FetchState::Error
            }
        };
    }

    /// Mark one calendar's course-list fetch as outstanding.
    pub fn begin_courses(&mut self, calendar: &str) {
        self.courses
            .insert(calendar.to_string(), FetchState::Loading);
    }

    /// Record one calendar's course-list fetch result. Last transition
    /// per key wins.
    pub fn resolve_courses(&mut self, calendar: &str, result: crate::Result<Vec<CourseId>>) {
        let state = match result {
            Ok(courses) => FetchState::Success(courses),
            Err(e) => {
                tracing::warn!("course list fetch for {} failed: {}", calendar, e);
                FetchState::Error
            }
        };
        self.courses.insert(calendar.to_string(), state);
    }
}

impl Default for BrowsingState {
    fn default() -> Self {
        Self::new()
    }
}

/// Couples a [`BrowsingState`] with the remote source that feeds it.
pub struct CatalogBrowser<S: CatalogSource> {
    source: S,
    state: BrowsingState,
}

impl<S: CatalogSource> CatalogBrowser<S> {
    /// Create a browser over the given source.
    pub fn new(source: S) -> Self {
        Self {
            source,
            state: BrowsingState::new(),
        }
    }

    /// Read access to the browsing state.
    pub fn state(&self) -> &BrowsingState {
        &self.state
    }

    /// The underlying catalog source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Fetch (or refetch) the calendar list.
    pub async fn load_calendars(&mut self) {
        self.state.begin_calendars();
        let result = self.source.list_calendars().await;
        self.state.resolve_calendars(result);
    }

    /// Fetch the active calendar's course list. Does nothing until the
    /// calendar list is loaded.
    pub async fn load_active_courses(&mut self) {
        let Some(calendar) = self.state.current_calendar().cloned() else {
            return;
        };
        self.state.begin_courses(&calendar);
        let result = self.source.list_courses(&calendar).await;
        self.state.resolve_courses(&calendar, result);
    }

    /// Switch the active tab; see [`BrowsingState::select_calendar`].
    pub fn select_calendar(&mut self, index: usize) {
        self.state.select_calendar(index);
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::{Error, Result, UpdateInfo};

    struct StubCatalog {
        fail_courses_for: Option<&'static str>,
    }

    #[async_trait]
    impl CatalogSource for StubCatalog {
        async fn list_calendars(&self) -> Result<Vec<CalendarName>> {
            Ok(vec!["Fall2024".to_string(), "Spring2025".to_string()])
        }

        async fn list_courses(&self, calendar: &str) -> Result<Vec<CourseId>> {
            if self.fail_courses_for == Some(calendar) {
                return Err(Error::Timeout);
            }
            Ok(vec![format!("{}-intro", calendar)])
        }

        async fn list_course_types(&self, _calendar: &str, _course: &str) -> Result<Vec<String>> {
            Ok(vec!["lecture".to_string()])
        }

        async fn update_info(&self) -> Result<UpdateInfo> {
            Ok(UpdateInfo {
                update_start: None,
                update_end: None,
            })
        }
    }

    #[test]
    fn initial_state_is_loading_with_first_tab_active() {
        let state = BrowsingState::new();
        assert_eq!(state.calendars(), &FetchState::Loading);
        assert_eq!(state.active_index(), 0);
        assert_eq!(state.current_calendar(), None);
        assert!(!state.is_course_list_ready());
    }

    #[test]
    fn switching_tabs_resets_course_list_to_loading() {
        let mut state = BrowsingState::new();
        state.resolve_calendars(Ok(vec!["Fall2024".to_string(), "Spring2025".to_string()]));
        state.resolve_courses("Spring2025", Ok(vec!["MA101".to_string()]));

        state.select_calendar(1);
        assert_eq!(state.current_calendar().map(String::as_str), Some("Spring2025"));
        // the stale success for the new tab is superseded
        assert_eq!(state.course_list(), Some(&FetchState::Loading));
        assert!(!state.is_course_list_ready());
    }

    #[test]
    fn reselecting_the_active_tab_keeps_its_course_list() {
        let mut state = BrowsingState::new();
        state.resolve_calendars(Ok(vec!["Fall2024".to_string()]));
        state.resolve_courses("Fall2024", Ok(vec!["CS101".to_string()]));

        state.select_calendar(0);
        assert!(state.is_course_list_ready());
    }

    #[test]
    fn failed_fetch_stays_failed_until_restarted() {
        let mut state = BrowsingState::new();
        state.resolve_calendars(Err(Error::Timeout));
        assert_eq!(state.calendars(), &FetchState::Error);

        state.begin_calendars();
        assert_eq!(state.calendars(), &FetchState::Loading);
    }

    #[test]
    fn newer_result_supersedes_older_one_per_key() {
        let mut state = BrowsingState::new();
        state.resolve_calendars(Ok(vec!["Fall2024".to_string()]));
        state.resolve_courses("Fall2024", Err(Error::Timeout));
        state.resolve_courses("Fall2024", Ok(vec!["CS101".to_string()]));
        assert!(state.is_course_list_ready());
    }

    #[tokio::test]
    async fn browser_loads_calendars_and_active_courses() {
        let mut browser = CatalogBrowser::new(StubCatalog {
            fail_courses_for: None,
        });
        browser.load_calendars().await;
        browser.load_active_courses().await;

        assert!(browser.state().is_course_list_ready());
        let courses = browser.state().course_list().and_then(FetchState::data);
        assert_eq!(courses, Some(&vec!["Fall2024-intro".to_string()]));
    }

    #[tokio::test]
    async fn browser_surfaces_fetch_failures_as_error_state() {
        let mut browser = CatalogBrowser::new(StubCatalog {
            fail_courses_for: Some("Fall2024"),
        });
        browser.load_calendars().await;
        browser.load_active_courses().await;

        assert_eq!(browser.state().course_list(), Some(&FetchState::Error));

        // the failure is per key: the other calendar still loads
        browser.select_calendar(1);
        browser.load_active_courses().await;
        assert!(browser.state().is_course_list_ready());
    }
}
