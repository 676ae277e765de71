//! Subcommand implementations.

use anyhow::Result;
use course_share_core::prelude::*;

/// List calendars with their tab indices.
pub async fn calendars_command(endpoint: &str) -> Result<()> {
    let mut browser = CatalogBrowser::new(CatalogClient::new(endpoint)?);
    browser.load_calendars().await;

    let calendars = browser
        .state()
        .calendars()
        .data()
        .ok_or_else(|| anyhow::anyhow!("failed to fetch calendar list from {}", endpoint))?;

    println!("Available calendars:");
    for (index, calendar) in calendars.iter().enumerate() {
        println!("  [{}] {}", index, calendar);
    }

    Ok(())
}

/// List the courses of one calendar, optionally with their types.
pub async fn courses_command(endpoint: &str, calendar: &str, with_types: bool) -> Result<()> {
    let mut browser = CatalogBrowser::new(CatalogClient::new(endpoint)?);
    browser.load_calendars().await;

    let calendars = browser
        .state()
        .calendars()
        .data()
        .ok_or_else(|| anyhow::anyhow!("failed to fetch calendar list from {}", endpoint))?;

    let index = calendars
        .iter()
        .position(|name| name == calendar)
        .ok_or_else(|| anyhow::anyhow!("unknown calendar: {}", calendar))?;

    browser.select_calendar(index);
    browser.load_active_courses().await;

    if !browser.state().is_course_list_ready() {
        anyhow::bail!("failed to fetch courses for {}", calendar);
    }

    let courses = browser
        .state()
        .course_list()
        .and_then(FetchState::data)
        .cloned()
        .unwrap_or_default();

    println!("Courses in {}:", calendar);
    for course in &courses {
        println!("  {}", course);
        if with_types {
            match browser.source().list_course_types(calendar, course).await {
                Ok(types) => {
                    for course_type in types {
                        println!("    - {}", course_type);
                    }
                }
                Err(e) => tracing::warn!("no types for {}/{}: {}", calendar, course, e),
            }
        }
    }

    Ok(())
}

/// Replay a sequence of toggles through a session and print the link.
pub fn link_command(origin: &str, courses: Vec<String>) -> Result<()> {
    let mut session = Session::new(origin);

    for course in courses {
        if !course.contains('/') {
            anyhow::bail!("expected <calendar>/<course>, got: {}", course);
        }
        session.toggle_qualified(QualifiedCourseId::from(course));
    }

    println!("Selected courses:");
    for id in session.selection() {
        println!("  {}", id);
    }

    let link = session.share_link();
    println!("Share link:");
    println!("  {}", link);

    // show what the backend will decode, as a sanity check
    if let Some((_, token)) = link.rsplit_once("?l=") {
        let payload = decode_token(token)?;
        println!(
            "Decoded payload: [{}]",
            payload
                .iter()
                .map(QualifiedCourseId::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        );
    }

    Ok(())
}

/// Print the backend's last sync window.
pub async fn status_command(endpoint: &str) -> Result<()> {
    let client = CatalogClient::new(endpoint)?;
    let info = client.update_info().await?;

    match info.update_start {
        Some(start) => println!("Last sync started:  {}", start),
        None => println!("Last sync started:  never"),
    }
    match info.update_end {
        Some(end) => println!("Last sync finished: {}", end),
        None => println!("Last sync finished: never"),
    }

    Ok(())
}
