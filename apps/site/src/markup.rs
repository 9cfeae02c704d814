//! HTML fragments for each entity of the lab document.
//!
//! Every function here is pure: entity in, markup out. Text taken from the
//! document is escaped; only `iconSvg` is trusted and inserted verbatim.

use crate::model::{
    LabEvent, PrincipalInvestigator, ProfileLinks, Publication, ResearchPillar, TeamMember,
};
use crate::naming::substitute_placeholder;
use crate::rules::AuthorMatch;

pub const PILLAR_CARD_CLASS: &str = "pillar-card";
pub const PUBLICATION_CARD_CLASS: &str = "publication-card";
pub const EVENT_CARD_CLASS: &str = "event-card";
pub const PI_CARD_CLASS: &str = "pi-card";
/// Marks member cards so a re-render can remove the previous ones.
pub const MEMBER_CARD_CLASS: &str = "team-member-card";
pub const PI_AUTHOR_CLASS: &str = "pi-author";

pub const LOAD_FAILURE_HTML: &str = "<p class='text-red-500'>Failed to load research data.</p>";

const PHOTO_PLACEHOLDER: &str = "https://placehold.co/300x300/E5E7EB/374151?text=Photo";

const SCHOLAR_PATH: &str =
    "M12 24a7 7 0 1 1 0-14 7 7 0 0 1 0 14zm0-24L0 9.5l4.838 3.39L12 18l7.162-5.11L24 9.5z";
const GITHUB_PATH: &str = "M8 0C3.58 0 0 3.58 0 8c0 3.54 2.29 6.53 5.47 7.59.4.07.55-.17.55-.38 0-.19-.01-.82-.01-1.49-2.01.37-2.53-.49-2.69-.94-.09-.23-.48-.94-.82-1.13-.28-.15-.68-.52-.01-.53.63-.01 1.08.58 1.23.82.72 1.21 1.87.87 2.33.66.07-.52.28-.87.51-1.07-1.78-.2-3.64-.89-3.64-3.95 0-.87.31-1.59.82-2.15-.08-.2-.36-1.02.08-2.12 0 0 .67-.21 2.2.82.64-.18 1.32-.27 2-.27.68 0 1.36.09 2 .27 1.53-1.04 2.2-.82 2.2-.82.44 1.1.16 1.92.08 2.12.51.56.82 1.27.82 2.15 0 3.07-1.87 3.75-3.65 3.95.29.25.54.73.54 1.48 0 1.07-.01 1.93-.01 2.2 0 .21.15.46.55.38A8.013 8.013 0 0 0 16 8c0-4.42-3.58-8-8-8z";
const LOCATION_ICON: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" class="h-4 w-4 mr-1.5" fill="none" viewBox="0 0 24 24" stroke="currentColor" stroke-width="2"><path stroke-linecap="round" stroke-linejoin="round" d="M17.657 16.657L13.414 20.9a1.998 1.998 0 01-2.827 0l-4.244-4.243a8 8 0 1111.314 0z" /><path stroke-linecap="round" stroke-linejoin="round" d="M15 11a3 3 0 11-6 0 3 3 0 016 0z" /></svg>"#;

/// Escapes text for use in element content and double-quoted attributes.
pub fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

pub fn render_research_pillar(pillar: &ResearchPillar) -> String {
    format!(
        r#"
    <div class="{PILLAR_CARD_CLASS} bg-white dark:bg-gray-900 p-8 rounded-lg shadow-lg border border-gray-200 dark:border-gray-700">
        <div class="text-blue-500 dark:text-blue-400 mb-4">
            {icon}
        </div>
        <h3 class="text-2xl font-semibold text-gray-900 dark:text-white mb-3">
            {title}
        </h3>
        <p class="text-gray-600 dark:text-gray-400">
            {description}
        </p>
    </div>"#,
        icon = pillar.icon_svg,
        title = escape(&pillar.title),
        description = escape(&pillar.description),
    )
}

/// Authors joined with ", ", PI matches wrapped in an emphasis span.
pub fn render_authors(authors: &[String], pi_name: &str, rule: AuthorMatch) -> String {
    authors
        .iter()
        .map(|author| {
            if rule.matches(author, pi_name) {
                format!(
                    r#"<span class="{PI_AUTHOR_CLASS} font-bold text-gray-700 dark:text-gray-200">{}</span>"#,
                    escape(author)
                )
            } else {
                escape(author)
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn render_publication(publication: &Publication, pi_name: &str, rule: AuthorMatch) -> String {
    let heading = format!(
        r#"<h3 class="text-xl font-semibold text-gray-900 dark:text-white">{}</h3>"#,
        escape(&publication.title)
    );
    let title_html = match publication.url.as_deref().filter(|url| !url.trim().is_empty()) {
        Some(url) => format!(
            r#"<a href="{}" target="_blank" rel="noopener noreferrer" class="hover:underline">
            {heading}
        </a>"#,
            escape(url)
        ),
        None => heading,
    };

    format!(
        r#"
    <div class="{PUBLICATION_CARD_CLASS} bg-gray-50 dark:bg-gray-800 p-6 rounded-lg border border-gray-200 dark:border-gray-700 transition-shadow hover:shadow-lg">
        {title_html}
        <p class="text-gray-500 dark:text-gray-400 mt-2">
            {authors}
        </p>
        <p class="text-gray-600 dark:text-gray-300 italic mt-1">
            {journal}
        </p>
    </div>"#,
        authors = render_authors(&publication.authors, pi_name, rule),
        journal = escape(&publication.journal),
    )
}

/// `short_name` replaces `placeholder` in the description before escaping.
pub fn render_event(event: &LabEvent, placeholder: &str, short_name: &str) -> String {
    let description = substitute_placeholder(&event.description, placeholder, short_name);

    format!(
        r#"
    <div class="{EVENT_CARD_CLASS} bg-white dark:bg-gray-900 p-6 rounded-lg shadow-lg border border-gray-200 dark:border-gray-700 flex space-x-6">
        <div class="flex-shrink-0 text-center bg-blue-50 dark:bg-gray-800 p-4 rounded-lg border border-gray-200 dark:border-gray-700">
            <span class="block text-3xl font-bold text-blue-600 dark:text-blue-400">{day}</span>
            <span class="block text-sm font-semibold text-gray-700 dark:text-gray-300 uppercase">{month}</span>
        </div>
        <div>
            <h3 class="text-xl font-semibold text-gray-900 dark:text-white">{title}</h3>
            <p class="text-gray-500 dark:text-gray-400 mt-1">{description}</p>
            <span class="inline-flex items-center text-sm text-gray-600 dark:text-gray-300 mt-2">
                {LOCATION_ICON}
                {location}
            </span>
        </div>
    </div>"#,
        day = escape(&event.day),
        month = escape(&event.month),
        title = escape(&event.title),
        description = escape(&description),
        location = escape(&event.location),
    )
}

fn icon(path: &str, view_box: &str, size: &str) -> String {
    format!(
        r#"<svg fill="currentColor" class="{size}" viewBox="{view_box}"><path d="{path}"/></svg>"#
    )
}

/// Scholar and GitHub anchors, each only when its URL is present.
fn profile_links(person: &impl ProfileLinks, icon_size: &str, link_class: &str) -> String {
    let mut links = Vec::new();
    if let Some(url) = person.scholar_url() {
        links.push(format!(
            r#"<a href="{}" target="_blank" rel="noopener noreferrer" class="{link_class}">{}</a>"#,
            escape(url),
            icon(SCHOLAR_PATH, "0 0 24 24", icon_size)
        ));
    }
    if let Some(url) = person.github_url() {
        links.push(format!(
            r#"<a href="{}" target="_blank" rel="noopener noreferrer" class="{link_class}">{}</a>"#,
            escape(url),
            icon(GITHUB_PATH, "0 0 16 16", icon_size)
        ));
    }
    links.join("\n            ")
}

pub fn render_pi(pi: &PrincipalInvestigator) -> String {
    let links = profile_links(
        pi,
        "w-5 h-5",
        "hover:text-blue-500 dark:hover:text-blue-400",
    );
    let name = escape(&pi.name);

    format!(
        r#"
    <div class="{PI_CARD_CLASS} bg-white dark:bg-gray-900 rounded-lg shadow-xl overflow-hidden md:flex border border-gray-200 dark:border-gray-700">
        <div class="md:flex-shrink-0">
            <img class="h-48 w-full object-cover md:h-full md:w-64" src="{image}" alt="{name}">
        </div>
        <div class="p-8">
            <div class="flex justify-between items-start">
                <div>
                    <h3 class="text-2xl font-bold text-gray-900 dark:text-white">{name}</h3>
                    <p class="text-blue-500 dark:text-blue-400 text-lg font-medium mb-4">{title}</p>
                </div>
                <div class="flex space-x-3 text-gray-500 dark:text-gray-400">
                    {links}
                </div>
            </div>
            <p class="text-gray-600 dark:text-gray-400 mb-4">
                {bio}
            </p>
            <a href="{bio_url}" class="text-blue-500 dark:text-blue-400 hover:underline font-medium">View Full Bio &rarr;</a>
        </div>
    </div>"#,
        image = escape(&pi.image_url),
        title = escape(&pi.title),
        bio = escape(&pi.bio),
        bio_url = escape(&pi.bio_url),
    )
}

pub fn render_team_member(member: &TeamMember) -> String {
    let links = profile_links(member, "w-6 h-6", "hover:text-blue-400 transition-colors");

    format!(
        r#"
    <div class="{MEMBER_CARD_CLASS} group relative text-center bg-white dark:bg-gray-900 rounded-lg shadow-lg border border-gray-200 dark:border-gray-700 overflow-hidden">
        <img class="w-full h-48 object-cover" src="{image}" alt="{name}" onerror="this.src='{PHOTO_PLACEHOLDER}';">
        <div class="p-4">
            <h4 class="text-xl font-semibold text-gray-900 dark:text-white">{name}</h4>
            <p class="text-gray-500 dark:text-gray-400">{title}</p>
        </div>
        <div class="team-card-overlay absolute inset-0 flex flex-col justify-center items-center space-y-4 text-white opacity-0 group-hover:opacity-100 transition-opacity duration-300">
            {links}
        </div>
    </div>"#,
        image = escape(&member.image_url),
        name = escape(&member.name),
        title = escape(&member.title),
    )
}

pub fn render_address(lines: &[String]) -> String {
    lines
        .iter()
        .map(|line| escape(line))
        .collect::<Vec<_>>()
        .join("<br>")
}

pub fn mailto_href(email: &str) -> String {
    format!("mailto:{}", email.trim())
}

/// Renders every item and concatenates the fragments in order.
pub fn render_all<T>(items: &[T], render: impl Fn(&T) -> String) -> String {
    items.iter().map(render).collect()
}

/// Counts cards whose first class is `class`.
#[cfg(test)]
pub(crate) fn count_cards(html: &str, class: &str) -> usize {
    html.matches(&format!(r#"class="{class} "#)).count()
}
